// src/models/mensaje.rs
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Mensaje {
    pub id: i64,
    pub nombre: String,
    pub comentario: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Default, Deserialize)]
pub struct MensajeForm {
    #[serde(default)]
    pub csrf: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub comentario: String,
}
