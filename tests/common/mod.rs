// tests/common/mod.rs
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use usuarios_crud::{
    db,
    models::usuario::UsuarioDatos,
    services::usuario_service,
    state::AppState,
    web::routes::create_router,
};

pub struct Resposta {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Resposta {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }
}

/// Aplicação completa sobre SQLite em memória, com um "browser" que guarda
/// o cookie de sessão entre pedidos.
pub struct TestApp {
    pub pool: SqlitePool,
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = db::create_db_pool("sqlite::memory:", 1)
            .await
            .expect("pool em memória");
        let state = AppState::new(pool.clone(), 10);
        let router = create_router(state)
            .layer(SessionManagerLayer::new(MemoryStore::default()).with_secure(false));
        Self { pool, router, cookie: None }
    }

    pub async fn get(&mut self, uri: &str) -> Resposta {
        let req = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(req).await
    }

    pub async fn post_form(&mut self, uri: &str, campos: &[(&str, &str)]) -> Resposta {
        let body = campos
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let req = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(req).await
    }

    /// Abre a página e devolve o token CSRF do primeiro formulário.
    pub async fn csrf(&mut self, uri: &str) -> String {
        let res = self.get(uri).await;
        assert_eq!(res.status, StatusCode::OK, "GET {uri}");
        extrair_csrf(&res.body).expect("página sem token CSRF")
    }

    pub async fn seed(&self, nombre: &str, apellido: &str, email: Option<&str>) -> i64 {
        let datos = UsuarioDatos {
            nombre: nombre.to_string(),
            apellido: apellido.to_string(),
            email: email.map(str::to_string),
        };
        usuario_service::create_usuario(&self.pool, &datos)
            .await
            .expect("seed usuario")
    }

    pub async fn count_usuarios(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM usuarios")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    async fn send(&mut self, req: Request<Body>) -> Resposta {
        let res = self.router.clone().oneshot(req).await.unwrap();
        if let Some(set_cookie) = res.headers().get(header::SET_COOKIE) {
            let valor = set_cookie.to_str().unwrap();
            let par = valor.split(';').next().unwrap_or_default().to_string();
            self.cookie = Some(par);
        }
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        Resposta {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

pub fn extrair_csrf(html: &str) -> Option<String> {
    let marca = r#"name="csrf" value=""#;
    let inicio = html.find(marca)? + marca.len();
    let fim = html[inicio..].find('"')? + inicio;
    Some(html[inicio..fim].to_string())
}

/// IDs das linhas do listado, pela ordem em que aparecem.
pub fn ids_listados(html: &str) -> Vec<i64> {
    html.split(r#"<tr data-id=""#)
        .skip(1)
        .filter_map(|resto| resto.split('"').next()?.parse().ok())
        .collect()
}
