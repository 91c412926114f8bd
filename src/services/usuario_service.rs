// src/services/usuario_service.rs
use crate::{
    error::{AppError, AppResult},
    models::usuario::{ListadoParams, Orden, PaginaUsuarios, Usuario, UsuarioDatos},
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const SELECT_USUARIOS: &str = "SELECT id, nombre, apellido, email, reg_date FROM usuarios";

/// Busca um usuario pelo seu ID.
pub async fn find_usuario_by_id(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Usuario>> {
    tracing::debug!("Buscando usuario por ID: {}", id);
    let usuario = sqlx::query_as::<_, Usuario>(
        r#"
        SELECT id, nombre, apellido, email, reg_date
        FROM usuarios
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(db_pool)
    .await?;

    if usuario.is_none() {
        tracing::debug!("Usuario {} não encontrado.", id);
    }
    Ok(usuario)
}

/// Insere um usuario e devolve o ID atribuído.
pub async fn create_usuario(db_pool: &SqlitePool, datos: &UsuarioDatos) -> AppResult<i64> {
    tracing::info!("Criando usuario: {} {}", datos.nombre, datos.apellido);
    let id = sqlx::query(
        r#"
        INSERT INTO usuarios
            (nombre, apellido, email, nombre_busqueda, apellido_busqueda, email_busqueda)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&datos.nombre)
    .bind(&datos.apellido)
    .bind(&datos.email)
    .bind(datos.nombre.to_lowercase())
    .bind(datos.apellido.to_lowercase())
    .bind(datos.email.as_deref().map(str::to_lowercase))
    .execute(db_pool)
    .await
    .map_err(AppError::from_insert)?
    .last_insert_rowid();

    tracing::info!("✅ Usuario {} criado.", id);
    Ok(id)
}

/// Atualiza um usuario. O trigger da tabela renova `reg_date`.
pub async fn update_usuario(db_pool: &SqlitePool, id: i64, datos: &UsuarioDatos) -> AppResult<()> {
    tracing::info!("Atualizando usuario: {}", id);
    let rows_affected = sqlx::query(
        r#"
        UPDATE usuarios
        SET nombre = ?1, apellido = ?2, email = ?3,
            nombre_busqueda = ?4, apellido_busqueda = ?5, email_busqueda = ?6
        WHERE id = ?7
        "#,
    )
    .bind(&datos.nombre)
    .bind(&datos.apellido)
    .bind(&datos.email)
    .bind(datos.nombre.to_lowercase())
    .bind(datos.apellido.to_lowercase())
    .bind(datos.email.as_deref().map(str::to_lowercase))
    .bind(id)
    .execute(db_pool)
    .await
    .map_err(AppError::from_insert)?
    .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Falha ao atualizar: usuario {} não encontrado.", id);
        return Err(AppError::NotFound);
    }
    tracing::info!("✅ Usuario {} atualizado.", id);
    Ok(())
}

pub async fn delete_usuario(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    tracing::info!("Apagando usuario: {}", id);
    let rows_affected = sqlx::query("DELETE FROM usuarios WHERE id = ?1")
        .bind(id)
        .execute(db_pool)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Falha ao apagar: usuario {} não encontrado.", id);
        return Err(AppError::NotFound);
    }
    tracing::info!("✅ Usuario {} apagado.", id);
    Ok(())
}

/// Listado com pesquisa, ordenação e paginação.
/// A página pedida é limitada ao intervalo [1, total_paginas].
pub async fn list_usuarios(
    db_pool: &SqlitePool,
    params: &ListadoParams,
    por_pagina: i64,
) -> AppResult<PaginaUsuarios> {
    let por_pagina = por_pagina.max(1);
    let patron = params
        .busqueda
        .as_deref()
        .map(|termo| like_pattern(&termo.to_lowercase()));

    let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM usuarios");
    push_filtro(&mut count_qb, patron.as_deref());
    let total: i64 = count_qb.build_query_scalar().fetch_one(db_pool).await?;

    let total_paginas = total_paginas(total, por_pagina);
    let pagina = params.pagina.clamp(1, total_paginas);
    let offset = (pagina - 1) * por_pagina;

    let mut qb = QueryBuilder::<Sqlite>::new(SELECT_USUARIOS);
    push_filtro(&mut qb, patron.as_deref());
    // Só fragmentos estáticos dos enums entram no ORDER BY
    qb.push(" ORDER BY ")
        .push(params.orden.columna())
        .push(" ")
        .push(params.direccion.sql());
    if params.orden != Orden::Id {
        qb.push(", id ").push(params.direccion.sql());
    }
    qb.push(" LIMIT ").push_bind(por_pagina);
    qb.push(" OFFSET ").push_bind(offset);

    let usuarios = qb.build_query_as::<Usuario>().fetch_all(db_pool).await?;
    tracing::debug!(
        "Listado: {} de {} usuarios (página {}/{}).",
        usuarios.len(),
        total,
        pagina,
        total_paginas
    );

    Ok(PaginaUsuarios {
        usuarios,
        total,
        pagina,
        total_paginas,
    })
}

// O padrão já vem em minúsculas e é comparado com as colunas `*_busqueda`.
fn push_filtro(qb: &mut QueryBuilder<'_, Sqlite>, patron: Option<&str>) {
    let Some(patron) = patron else {
        return;
    };
    qb.push(" WHERE nombre_busqueda LIKE ")
        .push_bind(patron.to_string())
        .push(" ESCAPE '\\' OR apellido_busqueda LIKE ")
        .push_bind(patron.to_string())
        .push(" ESCAPE '\\' OR email_busqueda LIKE ")
        .push_bind(patron.to_string())
        .push(" ESCAPE '\\'");
}

/// Padrão LIKE de substring, com `%`, `_` e `\` do termo escapados.
pub fn like_pattern(termo: &str) -> String {
    let mut patron = String::with_capacity(termo.len() + 2);
    patron.push('%');
    for c in termo.chars() {
        if matches!(c, '%' | '_' | '\\') {
            patron.push('\\');
        }
        patron.push(c);
    }
    patron.push('%');
    patron
}

pub fn total_paginas(total: i64, por_pagina: i64) -> i64 {
    let por_pagina = por_pagina.max(1);
    ((total + por_pagina - 1) / por_pagina).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapa_curingas() {
        assert_eq!(like_pattern("gar"), "%gar%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }

    #[test]
    fn total_paginas_nunca_e_zero() {
        assert_eq!(total_paginas(0, 10), 1);
        assert_eq!(total_paginas(10, 10), 1);
        assert_eq!(total_paginas(11, 10), 2);
        assert_eq!(total_paginas(25, 10), 3);
    }
}
