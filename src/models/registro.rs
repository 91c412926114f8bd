// src/models/registro.rs
use chrono::NaiveDate;
use serde::Deserialize;

/// Roles permitidos no formulário de registo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rol {
    Admin,
    User,
    Guest,
}

impl Rol {
    pub const TODOS: [Rol; 3] = [Rol::Admin, Rol::User, Rol::Guest];

    pub fn parse(raw: &str) -> Option<Self> {
        Rol::TODOS.into_iter().find(|r| r.as_str() == raw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rol::Admin => "admin",
            Rol::User => "user",
            Rol::Guest => "guest",
        }
    }
}

// Struct para dados do formulário de registo (valores crus)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RegistroForm {
    #[serde(default)]
    pub csrf: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub edad: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub fecha_nac: String,
    #[serde(default)]
    pub rol: String,
    // A checkbox não chega quando não está marcada
    #[serde(default)]
    pub terminos: Option<String>,
}

/// Registo validado, pronto para o INSERT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NuevoRegistro {
    pub nombre: String,
    pub edad: i64,
    pub email: String,
    pub fecha_nac: NaiveDate,
    pub rol: Rol,
}
