// src/web/registro_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::registro::{RegistroForm, Rol},
    services::{registro_service, validation},
    state::AppState,
    templates::{RegistroPage, RolOpcion},
    web::{
        render_page,
        session::{self, Flash, FlashTipo, MSG_CSRF_INVALIDO},
    },
};
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

const REGISTRO_URL: &str = "/registro";

pub const MSG_REGISTRO_OK: &str = "Datos válidos e insertados correctamente.";
pub const MSG_REGISTRO_DUPLICADO: &str = "No se pudo insertar: el email ya existe.";
pub const MSG_REGISTRO_ERROR_DB: &str = "Error de base de datos.";

// GET /registro
pub async fn show_registro_form(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let flash = session::take_flash(&session).await?;
    render_registro(&state, &session, flash, Vec::new(), &RegistroForm::default()).await
}

// POST /registro
pub async fn handle_registro(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegistroForm>,
) -> AppResult<Response> {
    if !session::csrf_check(&session, &form.csrf).await? {
        tracing::warn!("POST /registro: token CSRF inválido.");
        session::set_flash(&session, FlashTipo::Danger, MSG_CSRF_INVALIDO).await?;
        return Ok(Redirect::to(REGISTRO_URL).into_response());
    }

    let nuevo = match validation::validar_registro(&form) {
        Ok(nuevo) => nuevo,
        Err(errores) => {
            tracing::warn!("Registo recusado na validação: {:?}", errores);
            return render_registro(&state, &session, None, errores, &form).await;
        }
    };

    match registro_service::create_registro(&state.db_pool, &nuevo).await {
        Ok(id) => {
            tracing::info!("✅ Registo {} inserido.", id);
            session::set_flash(&session, FlashTipo::Success, MSG_REGISTRO_OK).await?;
            Ok(Redirect::to(REGISTRO_URL).into_response())
        }
        Err(AppError::EmailDuplicado) => {
            let errores = vec![MSG_REGISTRO_DUPLICADO.to_string()];
            render_registro(&state, &session, None, errores, &form).await
        }
        Err(e) => {
            tracing::error!("Erro ao inserir registo: {:?}", e);
            let errores = vec![MSG_REGISTRO_ERROR_DB.to_string()];
            render_registro(&state, &session, None, errores, &form).await
        }
    }
}

async fn render_registro(
    state: &AppState,
    session: &Session,
    flash: Option<Flash>,
    errores: Vec<String>,
    form: &RegistroForm,
) -> AppResult<Response> {
    let total_registros = registro_service::count_registros(&state.db_pool).await?;
    let (flash_tipo, flash_msg) = flash
        .map(|f| (f.tipo.as_str().to_string(), f.msg))
        .unwrap_or_default();

    let roles = Rol::TODOS
        .into_iter()
        .map(|r| RolOpcion {
            valor: r.as_str(),
            seleccionado: r.as_str() == form.rol,
        })
        .collect();

    let template = RegistroPage {
        csrf: session::csrf_token(session).await?,
        flash_tipo,
        flash_msg,
        errores,
        nombre: form.nombre.clone(),
        edad: form.edad.clone(),
        email: form.email.clone(),
        fecha_nac: form.fecha_nac.clone(),
        roles,
        terminos: form.terminos.as_deref() == Some("1"),
        total_registros,
    };
    render_page(&template, "RegistroPage")
}
