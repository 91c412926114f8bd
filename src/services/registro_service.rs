// src/services/registro_service.rs
use crate::{
    error::{AppError, AppResult},
    models::registro::NuevoRegistro,
};
use sqlx::SqlitePool;

/// Insere um registo validado. Email repetido devolve `AppError::EmailDuplicado`.
pub async fn create_registro(db_pool: &SqlitePool, registro: &NuevoRegistro) -> AppResult<i64> {
    tracing::info!("Inserindo registo para {}", registro.email);
    let fecha_nac = registro.fecha_nac.format("%Y-%m-%d").to_string();

    let result = sqlx::query(
        r#"
        INSERT INTO registros (nombre, edad, email, fecha_nac, rol)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&registro.nombre)
    .bind(registro.edad)
    .bind(&registro.email)
    .bind(fecha_nac)
    .bind(registro.rol.as_str())
    .execute(db_pool)
    .await;

    match result {
        Ok(done) => Ok(done.last_insert_rowid()),
        Err(e) => {
            let err = AppError::from_insert(e);
            if matches!(err, AppError::EmailDuplicado) {
                tracing::warn!("Registo recusado: email '{}' já existe.", registro.email);
            }
            Err(err)
        }
    }
}

/// Número de registos guardados, mostrado na página do formulário.
pub async fn count_registros(db_pool: &SqlitePool) -> AppResult<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registros")
        .fetch_one(db_pool)
        .await?;
    Ok(total)
}
