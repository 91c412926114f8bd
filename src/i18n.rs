// src/i18n.rs

/// Idiomas suportados pelas páginas localizadas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Idioma {
    #[default]
    Es,
    En,
}

impl Idioma {
    pub fn parse(codigo: &str) -> Option<Self> {
        match codigo.trim().to_ascii_lowercase().as_str() {
            "es" => Some(Idioma::Es),
            "en" => Some(Idioma::En),
            _ => None,
        }
    }

    pub fn codigo(self) -> &'static str {
        match self {
            Idioma::Es => "es",
            Idioma::En => "en",
        }
    }

    pub fn bienvenida_pagina1(self) -> &'static str {
        match self {
            Idioma::Es => "Bienvenido a la página 1",
            Idioma::En => "Welcome to page 1",
        }
    }

    pub fn titulo_pagina2(self) -> &'static str {
        match self {
            Idioma::Es => "Estás en la página 2",
            Idioma::En => "You are on page 2",
        }
    }

    pub fn enlace_pagina2(self) -> &'static str {
        match self {
            Idioma::Es => "Ir a página 2",
            Idioma::En => "Go to page 2",
        }
    }
}
