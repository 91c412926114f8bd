// src/config.rs
use crate::error::{AppError, AppResult};
use std::{env, net::SocketAddr};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_POR_PAGINA: i64 = 10;

/// Configuração lida das variáveis de ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    // Opcional: sem segredo o cookie é assinado com uma chave aleatória por arranque
    pub session_secret: Option<String>,
    pub db_max_connections: u32,
    pub por_pagina: i64,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        let bind_addr = match env::var("BIND_ADDR") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("BIND_ADDR inválido: '{}'", raw)))?,
            Err(_) => DEFAULT_BIND_ADDR.parse().map_err(|_| AppError::InternalServerError)?,
        };

        let session_secret = env::var("SESSION_SECRET").ok().filter(|s| !s.is_empty());

        Ok(Self {
            database_url,
            bind_addr,
            session_secret,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            por_pagina: parse_or("USUARIOS_POR_PAGINA", DEFAULT_POR_PAGINA).max(1),
        })
    }
}

fn parse_or<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Valor inválido para {}: '{}'. Usando o padrão.", key, raw);
            default
        }),
        Err(_) => default,
    }
}
