// src/error.rs
use axum::{http::StatusCode, response::Html, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de variável de ambiente: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("Configuração inválida: {0}")]
    Config(String),

    #[error("Erro na sessão: {0}")]
    SessionError(#[from] tower_sessions::session::Error),

    // Violação da restrição UNIQUE sobre o email
    #[error("Email duplicado")]
    EmailDuplicado,

    #[error("Registo não encontrado")]
    NotFound,

    #[error("Erro interno inesperado")]
    InternalServerError,
}

impl AppError {
    /// Converte um erro do sqlx, distinguindo a violação de UNIQUE dos restantes.
    pub fn from_insert(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::EmailDuplicado,
            _ => AppError::SqlxError(e),
        }
    }
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Loga o erro detalhado no servidor
        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = match self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Error al acceder a los datos.")
            }
            AppError::EnvVarError(_) | AppError::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Error de configuración.")
            }
            AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Error en la gestión de la sesión.")
            }
            AppError::EmailDuplicado => (StatusCode::CONFLICT, "El email ya existe."),
            AppError::NotFound => (StatusCode::NOT_FOUND, "El registro no existe."),
            AppError::InternalServerError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Ha ocurrido un error inesperado.")
            }
        };

        (status, Html(format!(r#"
            <!DOCTYPE html><html><head><meta charset="utf-8"><title>Error</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Error {status_code}</h1><p>{message}</p><a href="/usuarios">Volver</a></body></html>
         "#, status_code=status.as_u16(), message=user_message))).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
