// src/web/idioma_handlers.rs
use crate::{
    error::AppResult,
    i18n::Idioma,
    templates::{Pagina1Page, Pagina2Page},
    web::{render_page, session},
};
use axum::{
    extract::Path,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// GET /pagina1
pub async fn pagina1(session: Session) -> AppResult<Response> {
    let idioma = session::idioma(&session).await?;
    let template = Pagina1Page {
        codigo: idioma.codigo(),
        texto: idioma.bienvenida_pagina1(),
        enlace: idioma.enlace_pagina2(),
    };
    render_page(&template, "Pagina1Page")
}

// GET /pagina2
pub async fn pagina2(session: Session) -> AppResult<Response> {
    let idioma = session::idioma(&session).await?;
    let template = Pagina2Page {
        codigo: idioma.codigo(),
        texto: idioma.titulo_pagina2(),
    };
    render_page(&template, "Pagina2Page")
}

// GET /idioma/{codigo} - guarda a preferência e volta à página 1
pub async fn set_idioma(session: Session, Path(codigo): Path<String>) -> AppResult<Response> {
    match Idioma::parse(&codigo) {
        Some(idioma) => {
            session::set_idioma(&session, idioma).await?;
            tracing::debug!("Idioma da sessão alterado para '{}'.", idioma.codigo());
        }
        None => tracing::warn!("Idioma não suportado: '{}'. Preferência mantida.", codigo),
    }
    Ok(Redirect::to("/pagina1").into_response())
}
