// src/services/mensaje_service.rs
use crate::{error::AppResult, models::mensaje::Mensaje};
use sqlx::SqlitePool;

pub const MENSAJES_RECIENTES: i64 = 20;

/// Guarda um mensaje. Os valores seguem sempre como parâmetros ligados.
pub async fn create_mensaje(db_pool: &SqlitePool, nombre: &str, comentario: &str) -> AppResult<i64> {
    tracing::info!("Guardando mensaje de '{}'", nombre);
    let id = sqlx::query("INSERT INTO mensajes (nombre, comentario) VALUES (?1, ?2)")
        .bind(nombre)
        .bind(comentario)
        .execute(db_pool)
        .await?
        .last_insert_rowid();
    Ok(id)
}

/// Os mensajes mais recentes primeiro.
pub async fn list_mensajes_recientes(db_pool: &SqlitePool) -> AppResult<Vec<Mensaje>> {
    let mensajes = sqlx::query_as::<_, Mensaje>(
        r#"
        SELECT id, nombre, comentario, created_at
        FROM mensajes
        ORDER BY id DESC
        LIMIT ?1
        "#,
    )
    .bind(MENSAJES_RECIENTES)
    .fetch_all(db_pool)
    .await?;
    Ok(mensajes)
}
