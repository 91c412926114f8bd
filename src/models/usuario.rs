// src/models/usuario.rs
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;

// Representa uma linha da tabela 'usuarios'
#[derive(Debug, Clone, FromRow)]
pub struct Usuario {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub email: Option<String>,
    pub reg_date: NaiveDateTime,
}

/// Dados já validados para INSERT/UPDATE (valores aparados, email vazio -> None).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsuarioDatos {
    pub nombre: String,
    pub apellido: String,
    pub email: Option<String>,
}

/// Colunas pelas quais o listado pode ser ordenado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orden {
    #[default]
    Id,
    Nombre,
    Apellido,
    Email,
    RegDate,
}

impl Orden {
    pub const TODAS: [Orden; 5] = [
        Orden::Id,
        Orden::Nombre,
        Orden::Apellido,
        Orden::Email,
        Orden::RegDate,
    ];

    /// Valor aceite na query string; qualquer outro valor cai em `Id`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "nombre" => Orden::Nombre,
            "apellido" => Orden::Apellido,
            "email" => Orden::Email,
            "reg_date" => Orden::RegDate,
            _ => Orden::Id,
        }
    }

    /// Nome da coluna SQL. É o único texto que entra no ORDER BY.
    pub fn columna(self) -> &'static str {
        match self {
            Orden::Id => "id",
            Orden::Nombre => "nombre",
            Orden::Apellido => "apellido",
            Orden::Email => "email",
            Orden::RegDate => "reg_date",
        }
    }

    pub fn etiqueta(self) -> &'static str {
        match self {
            Orden::Id => "ID",
            Orden::Nombre => "Nombre",
            Orden::Apellido => "Apellido",
            Orden::Email => "Email",
            Orden::RegDate => "Registro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direccion {
    Asc,
    #[default]
    Desc,
}

impl Direccion {
    /// Só "asc" (sem distinguir maiúsculas) ordena ascendente.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("asc") {
            Direccion::Asc
        } else {
            Direccion::Desc
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            Direccion::Asc => "ASC",
            Direccion::Desc => "DESC",
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            Direccion::Asc => "asc",
            Direccion::Desc => "desc",
        }
    }

    pub fn invertida(self) -> Self {
        match self {
            Direccion::Asc => Direccion::Desc,
            Direccion::Desc => Direccion::Asc,
        }
    }
}

/// Query string crua de GET /usuarios. Tudo é opcional e tolerante.
#[derive(Debug, Default, Deserialize)]
pub struct ListadoQuery {
    pub q: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub page: Option<String>,
}

/// Parâmetros do listado depois de normalizados.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListadoParams {
    pub busqueda: Option<String>,
    pub orden: Orden,
    pub direccion: Direccion,
    pub pagina: i64,
}

impl Default for ListadoParams {
    fn default() -> Self {
        Self {
            busqueda: None,
            orden: Orden::Id,
            direccion: Direccion::Desc,
            pagina: 1,
        }
    }
}

impl From<&ListadoQuery> for ListadoParams {
    fn from(query: &ListadoQuery) -> Self {
        let busqueda = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        let pagina = query.page.as_deref().map(parse_pagina).unwrap_or(1).max(1);

        Self {
            busqueda,
            orden: query.sort.as_deref().map(Orden::parse).unwrap_or_default(),
            direccion: query.dir.as_deref().map(Direccion::parse).unwrap_or_default(),
            pagina,
        }
    }
}

// Números grandes demais para i64 saturam, para depois serem limitados à última página.
fn parse_pagina(valor: &str) -> i64 {
    let valor = valor.trim();
    match valor.parse::<i64>() {
        Ok(n) => n,
        Err(_) if !valor.is_empty() && valor.bytes().all(|b| b.is_ascii_digit()) => i64::MAX,
        Err(_) => 1,
    }
}

/// Uma página de resultados mais o total para a paginação.
#[derive(Debug, Clone)]
pub struct PaginaUsuarios {
    pub usuarios: Vec<Usuario>,
    pub total: i64,
    // Página efetiva, já limitada a [1, total_paginas]
    pub pagina: i64,
    pub total_paginas: i64,
}

/// Formulário de POST /usuarios. O campo `action` decide a operação.
#[derive(Debug, Default, Deserialize)]
pub struct UsuarioForm {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub csrf: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellido: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accion {
    Create,
    Update,
    Delete,
}

impl Accion {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "create" => Some(Accion::Create),
            "update" => Some(Accion::Update),
            "delete" => Some(Accion::Delete),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orden_desconhecida_cai_em_id() {
        assert_eq!(Orden::parse("apellido"), Orden::Apellido);
        assert_eq!(Orden::parse("password; DROP TABLE usuarios"), Orden::Id);
        assert_eq!(Orden::parse(""), Orden::Id);
    }

    #[test]
    fn direccion_por_omissao_e_desc() {
        assert_eq!(Direccion::parse("ASC"), Direccion::Asc);
        assert_eq!(Direccion::parse("asc"), Direccion::Asc);
        assert_eq!(Direccion::parse("up"), Direccion::Desc);
        assert_eq!(Direccion::default(), Direccion::Desc);
    }

    #[test]
    fn listado_query_normaliza_valores() {
        let query = ListadoQuery {
            q: Some("  gar ".into()),
            sort: Some("apellido".into()),
            dir: Some("asc".into()),
            page: Some("abc".into()),
        };
        let params = ListadoParams::from(&query);
        assert_eq!(params.busqueda.as_deref(), Some("gar"));
        assert_eq!(params.orden, Orden::Apellido);
        assert_eq!(params.direccion, Direccion::Asc);
        assert_eq!(params.pagina, 1);

        let params = ListadoParams::from(&ListadoQuery {
            q: Some("   ".into()),
            page: Some("-4".into()),
            ..Default::default()
        });
        assert_eq!(params.busqueda, None);
        assert_eq!(params.pagina, 1);
    }

    #[test]
    fn pagina_enorme_satura() {
        let params = ListadoParams::from(&ListadoQuery {
            page: Some("99999999999999999999".into()),
            ..Default::default()
        });
        assert_eq!(params.pagina, i64::MAX);
        assert_eq!(parse_pagina(" 7 "), 7);
        assert_eq!(parse_pagina("-99999999999999999999"), 1);
    }
}
