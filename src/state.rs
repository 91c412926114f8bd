// src/state.rs
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    // Tamanho da página do listado de usuarios
    pub por_pagina: i64,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, por_pagina: i64) -> Self {
        Self {
            db_pool,
            por_pagina: por_pagina.max(1),
        }
    }
}

// Permite extrair o pool da DB diretamente
impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.db_pool.clone()
    }
}
