// src/web/mod.rs
pub mod idioma_handlers;
pub mod mensaje_handlers;
pub mod registro_handlers;
pub mod routes;
pub mod session;
pub mod usuario_handlers;

use crate::error::{AppError, AppResult};
use askama::Template;
use axum::response::{Html, IntoResponse, Response};

/// Renderiza um template Askama; uma falha de render vira erro interno.
pub(crate) fn render_page<T: Template>(template: &T, nome: &str) -> AppResult<Response> {
    match template.render() {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            tracing::error!("Falha ao renderizar template {}: {}", nome, e);
            Err(AppError::InternalServerError)
        }
    }
}
