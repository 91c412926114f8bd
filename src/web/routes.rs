// src/web/routes.rs
use crate::{
    state::AppState,
    web::{idioma_handlers, mensaje_handlers, registro_handlers, usuario_handlers},
};
use axum::{routing::get, Router};

/// Router sem camada de sessão; quem o monta escolhe o store.
pub fn create_router(app_state: AppState) -> Router {
    // --- CRUD de usuarios ---
    // GET lista, POST aplica a ação indicada no formulário
    let usuario_routes = Router::new()
        .route(
            "/usuarios",
            get(usuario_handlers::show_usuarios_page).post(usuario_handlers::handle_usuarios_post),
        )
        .route("/usuarios/{id}", get(usuario_handlers::show_edit_usuario));

    // --- Formulários de exemplo ---
    let form_routes = Router::new()
        .route(
            "/registro",
            get(registro_handlers::show_registro_form).post(registro_handlers::handle_registro),
        )
        .route(
            "/mensajes",
            get(mensaje_handlers::show_mensajes).post(mensaje_handlers::handle_mensaje),
        );

    // --- Páginas localizadas ---
    let idioma_routes = Router::new()
        .route("/pagina1", get(idioma_handlers::pagina1))
        .route("/pagina2", get(idioma_handlers::pagina2))
        .route("/idioma/{codigo}", get(idioma_handlers::set_idioma));

    Router::new()
        .route("/", get(|| async { axum::response::Redirect::permanent("/usuarios") }))
        .merge(usuario_routes)
        .merge(form_routes)
        .merge(idioma_routes)
        .with_state(app_state)
}
