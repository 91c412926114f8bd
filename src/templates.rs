// src/templates.rs
use askama::Template;

// Linha da tabela do listado, já formatada para exibição
#[derive(Clone, Debug)]
pub struct UsuarioFila {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub reg_date: String,
    pub editar_href: String,
}

/// Cabeçalho clicável de uma coluna ordenável.
#[derive(Clone, Debug)]
pub struct ColumnaOrden {
    pub etiqueta: &'static str,
    pub href: String,
    // Seta da coluna ativa ("▲"/"▼"); vazia nas restantes
    pub flecha: &'static str,
}

#[derive(Template)]
#[template(path = "usuarios.html")]
pub struct UsuariosPage {
    pub csrf: String,
    pub flash_tipo: String,
    pub flash_msg: String,
    pub errores: Vec<String>,
    // Falha ao carregar o listado (a página é mostrada na mesma)
    pub error_carga: String,
    pub q: String,
    pub sort: &'static str,
    pub dir: &'static str,
    pub columnas: Vec<ColumnaOrden>,
    pub filas: Vec<UsuarioFila>,
    pub total: i64,
    pub pagina: i64,
    pub total_paginas: i64,
    pub anterior_href: String,
    pub siguiente_href: String,
    // Valores do formulário de criação (repostos após erro)
    pub form_nombre: String,
    pub form_apellido: String,
    pub form_email: String,
}

#[derive(Template)]
#[template(path = "usuario_edit.html")]
pub struct UsuarioEditPage {
    pub csrf: String,
    pub errores: Vec<String>,
    pub id: String,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub reg_date: String,
}

#[derive(Clone, Debug)]
pub struct RolOpcion {
    pub valor: &'static str,
    pub seleccionado: bool,
}

#[derive(Template)]
#[template(path = "registro.html")]
pub struct RegistroPage {
    pub csrf: String,
    pub flash_tipo: String,
    pub flash_msg: String,
    pub errores: Vec<String>,
    pub nombre: String,
    pub edad: String,
    pub email: String,
    pub fecha_nac: String,
    pub roles: Vec<RolOpcion>,
    pub terminos: bool,
    pub total_registros: i64,
}

#[derive(Clone, Debug)]
pub struct MensajeFila {
    pub nombre: String,
    pub comentario: String,
    pub created_at: String,
}

#[derive(Template)]
#[template(path = "mensajes.html")]
pub struct MensajesPage {
    pub csrf: String,
    pub flash_tipo: String,
    pub flash_msg: String,
    pub errores: Vec<String>,
    pub nombre: String,
    pub comentario: String,
    // Preenchidos só depois de um POST bem-sucedido
    pub guardado: bool,
    pub guardado_nombre: String,
    pub guardado_comentario: String,
    pub mensajes: Vec<MensajeFila>,
}

#[derive(Template)]
#[template(path = "pagina1.html")]
pub struct Pagina1Page {
    pub codigo: &'static str,
    pub texto: &'static str,
    pub enlace: &'static str,
}

#[derive(Template)]
#[template(path = "pagina2.html")]
pub struct Pagina2Page {
    pub codigo: &'static str,
    pub texto: &'static str,
}
