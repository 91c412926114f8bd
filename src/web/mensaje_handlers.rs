// src/web/mensaje_handlers.rs
use crate::{
    error::AppResult,
    models::mensaje::MensajeForm,
    services::{mensaje_service, validation},
    state::AppState,
    templates::{MensajeFila, MensajesPage},
    web::{
        render_page,
        session::{self, FlashTipo, MSG_CSRF_INVALIDO},
    },
};
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// GET /mensajes
pub async fn show_mensajes(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let page = pagina_base(&state, &session).await?;
    render_page(&page, "MensajesPage")
}

// POST /mensajes
pub async fn handle_mensaje(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<MensajeForm>,
) -> AppResult<Response> {
    if !session::csrf_check(&session, &form.csrf).await? {
        tracing::warn!("POST /mensajes: token CSRF inválido.");
        session::set_flash(&session, FlashTipo::Danger, MSG_CSRF_INVALIDO).await?;
        return Ok(Redirect::to("/mensajes").into_response());
    }

    let (nombre, comentario) = match validation::validar_mensaje(&form.nombre, &form.comentario) {
        Ok(valores) => valores,
        Err(e) => {
            let mut page = pagina_base(&state, &session).await?;
            page.errores.push(e);
            page.nombre = form.nombre;
            page.comentario = form.comentario;
            return render_page(&page, "MensajesPage");
        }
    };

    mensaje_service::create_mensaje(&state.db_pool, &nombre, &comentario).await?;

    // O eco dos valores é escapado pelo Askama
    let mut page = pagina_base(&state, &session).await?;
    page.guardado = true;
    page.guardado_nombre = nombre;
    page.guardado_comentario = comentario;
    render_page(&page, "MensajesPage")
}

async fn pagina_base(state: &AppState, session: &Session) -> AppResult<MensajesPage> {
    let mensajes = mensaje_service::list_mensajes_recientes(&state.db_pool)
        .await?
        .into_iter()
        .map(|m| MensajeFila {
            nombre: m.nombre,
            comentario: m.comentario,
            created_at: m.created_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();

    let (flash_tipo, flash_msg) = session::take_flash(session)
        .await?
        .map(|f| (f.tipo.as_str().to_string(), f.msg))
        .unwrap_or_default();

    Ok(MensajesPage {
        csrf: session::csrf_token(session).await?,
        flash_tipo,
        flash_msg,
        errores: Vec::new(),
        nombre: String::new(),
        comentario: String::new(),
        guardado: false,
        guardado_nombre: String::new(),
        guardado_comentario: String::new(),
        mensajes,
    })
}
