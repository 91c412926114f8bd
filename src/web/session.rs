// src/web/session.rs
//! Acesso tipado ao estado de sessão (token CSRF, flash e idioma).
//! A sessão vive fora do processo, no store do tower-sessions.
use crate::{error::AppResult, i18n::Idioma};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tower_sessions::Session;

const CSRF_KEY: &str = "csrf";
const FLASH_KEY: &str = "flash";
const IDIOMA_KEY: &str = "idioma";

pub const MSG_CSRF_INVALIDO: &str =
    "Sesión caducada o token CSRF inválido. Recarga la página e inténtalo de nuevo.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashTipo {
    Success,
    Danger,
}

impl FlashTipo {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashTipo::Success => "success",
            FlashTipo::Danger => "danger",
        }
    }
}

/// Aviso de uma só leitura mostrado depois de um redirecionamento.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub tipo: FlashTipo,
    pub msg: String,
}

/// Devolve o token CSRF da sessão, criando-o no primeiro acesso.
pub async fn csrf_token(session: &Session) -> AppResult<String> {
    if let Some(token) = session.get::<String>(CSRF_KEY).await? {
        if !token.is_empty() {
            return Ok(token);
        }
    }
    let bytes: [u8; 32] = rand::random();
    let token = hex::encode(bytes);
    session.insert(CSRF_KEY, &token).await?;
    tracing::debug!("Novo token CSRF gerado para a sessão.");
    Ok(token)
}

/// Compara o token enviado com o da sessão em tempo constante.
/// Sem token na sessão a verificação falha sempre.
pub async fn csrf_check(session: &Session, enviado: &str) -> AppResult<bool> {
    let Some(guardado) = session.get::<String>(CSRF_KEY).await? else {
        return Ok(false);
    };
    if guardado.is_empty() {
        return Ok(false);
    }
    Ok(guardado.as_bytes().ct_eq(enviado.as_bytes()).into())
}

pub async fn set_flash(session: &Session, tipo: FlashTipo, msg: impl Into<String>) -> AppResult<()> {
    let flash = Flash { tipo, msg: msg.into() };
    session.insert(FLASH_KEY, flash).await?;
    Ok(())
}

/// Lê e apaga o flash pendente.
pub async fn take_flash(session: &Session) -> AppResult<Option<Flash>> {
    Ok(session.remove::<Flash>(FLASH_KEY).await?)
}

pub async fn idioma(session: &Session) -> AppResult<Idioma> {
    let codigo = session.get::<String>(IDIOMA_KEY).await?;
    Ok(codigo.as_deref().and_then(Idioma::parse).unwrap_or_default())
}

pub async fn set_idioma(session: &Session, idioma: Idioma) -> AppResult<()> {
    session.insert(IDIOMA_KEY, idioma.codigo()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn nova_sessao() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn token_e_criado_uma_vez() {
        let session = nova_sessao();
        let token = csrf_token(&session).await.unwrap();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(csrf_token(&session).await.unwrap(), token);
    }

    #[tokio::test]
    async fn csrf_check_compara_token() {
        let session = nova_sessao();
        assert!(!csrf_check(&session, "").await.unwrap());

        let token = csrf_token(&session).await.unwrap();
        assert!(csrf_check(&session, &token).await.unwrap());
        assert!(!csrf_check(&session, "outro").await.unwrap());
        assert!(!csrf_check(&session, &token[..63]).await.unwrap());
    }

    #[tokio::test]
    async fn flash_e_consumido_na_leitura() {
        let session = nova_sessao();
        assert_eq!(take_flash(&session).await.unwrap(), None);

        set_flash(&session, FlashTipo::Success, "Usuario creado correctamente.").await.unwrap();
        let flash = take_flash(&session).await.unwrap().unwrap();
        assert_eq!(flash.tipo, FlashTipo::Success);
        assert_eq!(flash.msg, "Usuario creado correctamente.");
        assert_eq!(take_flash(&session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn idioma_por_omissao_e_espanhol() {
        let session = nova_sessao();
        assert_eq!(idioma(&session).await.unwrap(), Idioma::Es);
        set_idioma(&session, Idioma::En).await.unwrap();
        assert_eq!(idioma(&session).await.unwrap(), Idioma::En);
    }
}
