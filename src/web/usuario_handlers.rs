// src/web/usuario_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::usuario::{
        Accion, Direccion, ListadoParams, ListadoQuery, Orden, Usuario, UsuarioForm,
    },
    services::{usuario_service, validation},
    state::AppState,
    templates::{ColumnaOrden, UsuarioEditPage, UsuarioFila, UsuariosPage},
    web::{
        render_page,
        session::{self, Flash, FlashTipo, MSG_CSRF_INVALIDO},
    },
};
use axum::{
    extract::{Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

const LISTADO_URL: &str = "/usuarios";

pub const MSG_CREADO: &str = "Usuario creado correctamente.";
pub const MSG_ACTUALIZADO: &str = "Usuario actualizado correctamente.";
pub const MSG_ELIMINADO: &str = "Usuario eliminado correctamente.";
pub const MSG_ACCION_INVALIDA: &str = "Acción no válida.";
pub const MSG_EMAIL_DUPLICADO: &str = "El email ya existe.";
pub const MSG_NO_EXISTE: &str = "El usuario no existe.";
pub const MSG_ERROR_OPERACION: &str = "Error en la operación. Inténtalo de nuevo más tarde.";
const MSG_ERROR_CARGA: &str = "No se pudo cargar el listado de usuarios.";

// Valores do formulário de criação a repor quando há erros
#[derive(Default)]
struct Rellenar {
    nombre: String,
    apellido: String,
    email: String,
}

impl From<&UsuarioForm> for Rellenar {
    fn from(form: &UsuarioForm) -> Self {
        Self {
            nombre: form.nombre.clone().unwrap_or_default(),
            apellido: form.apellido.clone().unwrap_or_default(),
            email: form.email.clone().unwrap_or_default(),
        }
    }
}

/// Handler para GET /usuarios - listado com pesquisa, ordenação e paginação
pub async fn show_usuarios_page(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListadoQuery>,
) -> AppResult<Response> {
    let params = ListadoParams::from(&query);
    tracing::debug!("GET /usuarios: {:?}", params);

    let flash = session::take_flash(&session).await?;
    render_listado(&state, &session, &params, flash, Vec::new(), Rellenar::default()).await
}

/// Handler para GET /usuarios/{id} - formulário de edição
pub async fn show_edit_usuario(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    tracing::debug!("GET /usuarios/{}: Mostrando formulário", id);

    let usuario = usuario_service::find_usuario_by_id(&state.db_pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let reg_date = formatar_fecha(&usuario);

    let template = UsuarioEditPage {
        csrf: session::csrf_token(&session).await?,
        errores: Vec::new(),
        id: usuario.id.to_string(),
        nombre: usuario.nombre,
        apellido: usuario.apellido,
        email: usuario.email.unwrap_or_default(),
        reg_date,
    };
    render_page(&template, "UsuarioEditPage")
}

/// Handler para POST /usuarios - create/update/delete conforme `action`
pub async fn handle_usuarios_post(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListadoQuery>,
    Form(form): Form<UsuarioForm>,
) -> AppResult<Response> {
    if !session::csrf_check(&session, &form.csrf).await? {
        tracing::warn!("POST /usuarios: token CSRF inválido (action='{}').", form.action);
        session::set_flash(&session, FlashTipo::Danger, MSG_CSRF_INVALIDO).await?;
        return Ok(Redirect::to(LISTADO_URL).into_response());
    }

    let params = ListadoParams::from(&query);

    let Some(accion) = Accion::parse(&form.action) else {
        tracing::warn!("POST /usuarios: ação desconhecida '{}'.", form.action);
        let errores = vec![MSG_ACCION_INVALIDA.to_string()];
        return render_listado(&state, &session, &params, None, errores, Rellenar::default()).await;
    };
    tracing::info!("POST /usuarios: {:?}", accion);

    match accion {
        Accion::Create => handle_create(&state, &session, &params, &form).await,
        Accion::Update => handle_update(&state, &session, &form).await,
        Accion::Delete => handle_delete(&state, &session, &params, &form).await,
    }
}

async fn handle_create(
    state: &AppState,
    session: &Session,
    params: &ListadoParams,
    form: &UsuarioForm,
) -> AppResult<Response> {
    let datos = match validation::validar_usuario(
        form.nombre.as_deref(),
        form.apellido.as_deref(),
        form.email.as_deref(),
    ) {
        Ok(datos) => datos,
        Err(errores) => {
            tracing::warn!("Criação recusada: {:?}", errores);
            return render_listado(state, session, params, None, errores, Rellenar::from(form)).await;
        }
    };

    match usuario_service::create_usuario(&state.db_pool, &datos).await {
        Ok(_) => redirect_con_flash(session, MSG_CREADO).await,
        Err(e) => {
            let errores = vec![mensaje_error(&e)];
            render_listado(state, session, params, None, errores, Rellenar::from(form)).await
        }
    }
}

async fn handle_update(state: &AppState, session: &Session, form: &UsuarioForm) -> AppResult<Response> {
    let id = validation::validar_id(form.id.as_deref());
    let datos = validation::validar_usuario(
        form.nombre.as_deref(),
        form.apellido.as_deref(),
        form.email.as_deref(),
    );

    let (id, datos) = match (id, datos) {
        (Ok(id), Ok(datos)) => (id, datos),
        (id, datos) => {
            let mut errores = Vec::new();
            if let Err(e) = id {
                errores.push(e);
            }
            if let Err(es) = datos {
                errores.extend(es);
            }
            tracing::warn!("Atualização recusada: {:?}", errores);
            return render_edit_con_errores(session, form, errores).await;
        }
    };

    match usuario_service::update_usuario(&state.db_pool, id, &datos).await {
        Ok(()) => redirect_con_flash(session, MSG_ACTUALIZADO).await,
        Err(e) => render_edit_con_errores(session, form, vec![mensaje_error(&e)]).await,
    }
}

async fn handle_delete(
    state: &AppState,
    session: &Session,
    params: &ListadoParams,
    form: &UsuarioForm,
) -> AppResult<Response> {
    let id = match validation::validar_id(form.id.as_deref()) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Eliminação recusada: {}", e);
            return render_listado(state, session, params, None, vec![e], Rellenar::default()).await;
        }
    };

    match usuario_service::delete_usuario(&state.db_pool, id).await {
        Ok(()) => redirect_con_flash(session, MSG_ELIMINADO).await,
        Err(e) => {
            let errores = vec![mensaje_error(&e)];
            render_listado(state, session, params, None, errores, Rellenar::default()).await
        }
    }
}

async fn redirect_con_flash(session: &Session, msg: &str) -> AppResult<Response> {
    session::set_flash(session, FlashTipo::Success, msg).await?;
    Ok(Redirect::to(LISTADO_URL).into_response())
}

/// Mensagem para o utilizador a partir de um erro do serviço.
/// O detalhe técnico fica só no log.
fn mensaje_error(e: &AppError) -> String {
    match e {
        AppError::EmailDuplicado => MSG_EMAIL_DUPLICADO.to_string(),
        AppError::NotFound => MSG_NO_EXISTE.to_string(),
        other => {
            tracing::error!("Erro na operação sobre usuarios: {:?}", other);
            MSG_ERROR_OPERACION.to_string()
        }
    }
}

async fn render_edit_con_errores(
    session: &Session,
    form: &UsuarioForm,
    errores: Vec<String>,
) -> AppResult<Response> {
    let template = UsuarioEditPage {
        csrf: session::csrf_token(session).await?,
        errores,
        id: form.id.clone().unwrap_or_default(),
        nombre: form.nombre.clone().unwrap_or_default(),
        apellido: form.apellido.clone().unwrap_or_default(),
        email: form.email.clone().unwrap_or_default(),
        reg_date: String::new(),
    };
    render_page(&template, "UsuarioEditPage")
}

async fn render_listado(
    state: &AppState,
    session: &Session,
    params: &ListadoParams,
    flash: Option<Flash>,
    errores: Vec<String>,
    rellenar: Rellenar,
) -> AppResult<Response> {
    let csrf = session::csrf_token(session).await?;
    let q = params.busqueda.clone().unwrap_or_default();

    let (filas, total, pagina, total_paginas, error_carga) =
        match usuario_service::list_usuarios(&state.db_pool, params, state.por_pagina).await {
            Ok(p) => {
                let filas = p.usuarios.iter().map(fila).collect();
                (filas, p.total, p.pagina, p.total_paginas, String::new())
            }
            Err(e) => {
                tracing::error!("Erro ao carregar o listado de usuarios: {:?}", e);
                (Vec::new(), 0, 1, 1, MSG_ERROR_CARGA.to_string())
            }
        };

    let columnas = Orden::TODAS
        .into_iter()
        .map(|orden| {
            let activa = orden == params.orden;
            let dir = if activa { params.direccion.invertida() } else { Direccion::Asc };
            ColumnaOrden {
                etiqueta: orden.etiqueta(),
                href: listado_href(&q, orden, dir, 1),
                flecha: match (activa, params.direccion) {
                    (false, _) => "",
                    (true, Direccion::Asc) => " ▲",
                    (true, Direccion::Desc) => " ▼",
                },
            }
        })
        .collect();

    let anterior_href = if pagina > 1 {
        listado_href(&q, params.orden, params.direccion, pagina - 1)
    } else {
        String::new()
    };
    let siguiente_href = if pagina < total_paginas {
        listado_href(&q, params.orden, params.direccion, pagina + 1)
    } else {
        String::new()
    };

    let (flash_tipo, flash_msg) = flash
        .map(|f| (f.tipo.as_str().to_string(), f.msg))
        .unwrap_or_default();

    let template = UsuariosPage {
        csrf,
        flash_tipo,
        flash_msg,
        errores,
        error_carga,
        sort: params.orden.columna(),
        dir: params.direccion.as_param(),
        q,
        columnas,
        filas,
        total,
        pagina,
        total_paginas,
        anterior_href,
        siguiente_href,
        form_nombre: rellenar.nombre,
        form_apellido: rellenar.apellido,
        form_email: rellenar.email,
    };
    render_page(&template, "UsuariosPage")
}

fn fila(u: &Usuario) -> UsuarioFila {
    UsuarioFila {
        id: u.id,
        nombre: u.nombre.clone(),
        apellido: u.apellido.clone(),
        email: u.email.clone().unwrap_or_default(),
        reg_date: formatar_fecha(u),
        editar_href: format!("{}/{}", LISTADO_URL, u.id),
    }
}

fn formatar_fecha(u: &Usuario) -> String {
    u.reg_date.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// URL do listado mantendo a pesquisa. O termo vai sempre codificado.
pub fn listado_href(q: &str, orden: Orden, dir: Direccion, pagina: i64) -> String {
    let mut href = format!(
        "{}?sort={}&dir={}&page={}",
        LISTADO_URL,
        orden.columna(),
        dir.as_param(),
        pagina
    );
    if !q.is_empty() {
        href.push_str("&q=");
        href.push_str(&urlencoding::encode(q));
    }
    href
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listado_href_codifica_busqueda() {
        assert_eq!(
            listado_href("", Orden::Id, Direccion::Desc, 1),
            "/usuarios?sort=id&dir=desc&page=1"
        );
        assert_eq!(
            listado_href("ana & co", Orden::Apellido, Direccion::Asc, 3),
            "/usuarios?sort=apellido&dir=asc&page=3&q=ana%20%26%20co"
        );
    }
}
