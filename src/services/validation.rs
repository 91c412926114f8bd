// src/services/validation.rs
//! Validação dos formulários. Cada função devolve o valor já limpo ou a lista
//! completa de mensagens, pela ordem dos campos.
use crate::models::{
    registro::{NuevoRegistro, RegistroForm, Rol},
    usuario::UsuarioDatos,
};
use chrono::NaiveDate;
use validator::ValidateEmail;

pub const MAX_NOMBRE: usize = 30;
pub const MAX_APELLIDO: usize = 30;
pub const MAX_EMAIL: usize = 50;

pub const MSG_ID_INVALIDO: &str = "ID inválido.";
pub const MSG_NOMBRE_OBLIGATORIO: &str = "El nombre es obligatorio.";
pub const MSG_APELLIDO_OBLIGATORIO: &str = "El apellido es obligatorio.";
pub const MSG_EMAIL_INVALIDO: &str = "El email no es válido.";
pub const MSG_FALTAN_DATOS: &str = "Faltan datos.";

const FORMATO_FECHA: &str = "%Y-%m-%d";

/// Sintaxe de endereço, com domínio de pelo menos dois rótulos e TLD alfabético.
pub fn email_valido(email: &str) -> bool {
    if !email.to_owned().validate_email() {
        return false;
    }
    let Some((_, dominio)) = email.rsplit_once('@') else {
        return false;
    };
    match dominio.rsplit_once('.') {
        Some((resto, tld)) => {
            !resto.is_empty() && !tld.is_empty() && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

// Inteiro com sinal opcional, sem zeros à esquerda. Espaços nas pontas são ignorados.
fn parse_entero(raw: &str) -> Option<i64> {
    let valor = raw.trim();
    let digitos = valor.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(valor);
    if digitos.is_empty() || !digitos.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digitos.len() > 1 && digitos.starts_with('0') {
        return None;
    }
    valor.parse().ok()
}

/// Identificador de update/delete: tem de ser um inteiro positivo.
pub fn validar_id(raw: Option<&str>) -> Result<i64, String> {
    raw.and_then(|r| r.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| MSG_ID_INVALIDO.to_string())
}

/// Valida nombre/apellido/email de um usuario. Email vazio passa a `None`.
pub fn validar_usuario(
    nombre: Option<&str>,
    apellido: Option<&str>,
    email: Option<&str>,
) -> Result<UsuarioDatos, Vec<String>> {
    let nombre = nombre.unwrap_or_default().trim();
    let apellido = apellido.unwrap_or_default().trim();
    let email = email.unwrap_or_default().trim();
    let mut errores = Vec::new();

    if nombre.is_empty() {
        errores.push(MSG_NOMBRE_OBLIGATORIO.to_string());
    } else if nombre.chars().count() > MAX_NOMBRE {
        errores.push(format!("El nombre no puede superar {} caracteres.", MAX_NOMBRE));
    }

    if apellido.is_empty() {
        errores.push(MSG_APELLIDO_OBLIGATORIO.to_string());
    } else if apellido.chars().count() > MAX_APELLIDO {
        errores.push(format!("El apellido no puede superar {} caracteres.", MAX_APELLIDO));
    }

    if !email.is_empty() {
        if !email_valido(email) {
            errores.push(MSG_EMAIL_INVALIDO.to_string());
        } else if email.chars().count() > MAX_EMAIL {
            errores.push(format!("El email no puede superar {} caracteres.", MAX_EMAIL));
        }
    }

    if !errores.is_empty() {
        return Err(errores);
    }

    Ok(UsuarioDatos {
        nombre: nombre.to_string(),
        apellido: apellido.to_string(),
        email: (!email.is_empty()).then(|| email.to_string()),
    })
}

/// Validação completa do formulário de registo.
pub fn validar_registro(form: &RegistroForm) -> Result<NuevoRegistro, Vec<String>> {
    let mut errores = Vec::new();

    let nombre = form.nombre.trim();
    if nombre.is_empty() {
        errores.push("El nombre es obligatorio.".to_string());
    } else {
        let len = nombre.chars().count();
        if !(3..=50).contains(&len) {
            errores.push("El nombre debe tener entre 3 y 50 caracteres.".to_string());
        }
    }

    let mut edad = None;
    if form.edad.is_empty() {
        errores.push("La edad es obligatoria.".to_string());
    } else {
        match parse_entero(&form.edad) {
            None => errores.push("La edad debe ser un número entero.".to_string()),
            Some(n) if !(0..=120).contains(&n) => {
                errores.push("La edad debe estar entre 0 y 120.".to_string())
            }
            Some(n) => edad = Some(n),
        }
    }

    let email = form.email.trim();
    if email.is_empty() {
        errores.push("El email es obligatorio.".to_string());
    } else if !email_valido(email) {
        errores.push("Email inválido.".to_string());
    }

    let mut fecha_nac = None;
    if form.fecha_nac.is_empty() {
        errores.push("La fecha de nacimiento es obligatoria.".to_string());
    } else {
        match parse_fecha(&form.fecha_nac) {
            Some(f) => fecha_nac = Some(f),
            None => errores.push("La fecha de nacimiento no tiene un formato válido.".to_string()),
        }
    }

    let mut rol = None;
    if form.rol.is_empty() {
        errores.push("Debes seleccionar un rol.".to_string());
    } else {
        match Rol::parse(&form.rol) {
            Some(r) => rol = Some(r),
            None => errores.push("Rol no permitido.".to_string()),
        }
    }

    if form.terminos.as_deref() != Some("1") {
        errores.push("Debes aceptar los términos.".to_string());
    }

    match (edad, fecha_nac, rol) {
        (Some(edad), Some(fecha_nac), Some(rol)) if errores.is_empty() => Ok(NuevoRegistro {
            nombre: nombre.to_string(),
            edad,
            email: email.to_string(),
            fecha_nac,
            rol,
        }),
        _ => Err(errores),
    }
}

/// Data real em `YYYY-MM-DD`. A reformatação tem de devolver o mesmo texto,
/// o que rejeita "2024-2-3" e datas como "2023-02-30".
pub fn parse_fecha(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, FORMATO_FECHA)
        .ok()
        .filter(|d| d.format(FORMATO_FECHA).to_string() == raw)
}

/// Nome e comentário aparados; ambos obrigatórios.
pub fn validar_mensaje(nombre: &str, comentario: &str) -> Result<(String, String), String> {
    let nombre = nombre.trim();
    let comentario = comentario.trim();
    if nombre.is_empty() || comentario.is_empty() {
        return Err(MSG_FALTAN_DATOS.to_string());
    }
    Ok((nombre.to_string(), comentario.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registro_ok() -> RegistroForm {
        RegistroForm {
            csrf: String::new(),
            nombre: "Lucía".into(),
            edad: "34".into(),
            email: "lucia@correo.com".into(),
            fecha_nac: "1990-04-12".into(),
            rol: "user".into(),
            terminos: Some("1".into()),
        }
    }

    #[test]
    fn usuario_valido_apara_campos() {
        let datos = validar_usuario(Some("  Ana "), Some(" García"), Some(" ana@correo.com ")).unwrap();
        assert_eq!(datos.nombre, "Ana");
        assert_eq!(datos.apellido, "García");
        assert_eq!(datos.email.as_deref(), Some("ana@correo.com"));
    }

    #[test]
    fn email_vazio_fica_none() {
        let datos = validar_usuario(Some("Ana"), Some("García"), Some("   ")).unwrap();
        assert_eq!(datos.email, None);
        let datos = validar_usuario(Some("Ana"), Some("García"), None).unwrap();
        assert_eq!(datos.email, None);
    }

    #[test]
    fn acumula_todas_as_mensagens() {
        let errores = validar_usuario(Some("   "), None, Some("no-es-email")).unwrap_err();
        assert_eq!(
            errores,
            vec![
                MSG_NOMBRE_OBLIGATORIO.to_string(),
                MSG_APELLIDO_OBLIGATORIO.to_string(),
                MSG_EMAIL_INVALIDO.to_string(),
            ]
        );
    }

    #[test]
    fn emails_mal_formados() {
        for email in [
            "ana",
            "ana@",
            "@correo.com",
            "ana @correo.com",
            "ana@@correo.com",
            "ana@correo",
            "ana@localhost",
            "ana@correo.c0m",
        ] {
            let errores = validar_usuario(Some("Ana"), Some("García"), Some(email)).unwrap_err();
            assert_eq!(errores, vec![MSG_EMAIL_INVALIDO.to_string()], "email: {email}");
        }
    }

    #[test]
    fn limites_de_comprimento() {
        let largo = "ñ".repeat(31);
        let errores = validar_usuario(Some(&largo), Some("García"), None).unwrap_err();
        assert_eq!(errores, vec!["El nombre no puede superar 30 caracteres.".to_string()]);

        // 30 caracteres multibyte continuam válidos
        let justo = "ñ".repeat(30);
        assert!(validar_usuario(Some(&justo), Some(&justo), None).is_ok());
    }

    #[test]
    fn id_tem_de_ser_positivo() {
        assert_eq!(validar_id(Some("5")), Ok(5));
        assert_eq!(validar_id(Some(" 12 ")), Ok(12));
        for raw in [None, Some(""), Some("0"), Some("-3"), Some("abc")] {
            assert_eq!(validar_id(raw), Err(MSG_ID_INVALIDO.to_string()));
        }
    }

    #[test]
    fn registro_valido() {
        let nuevo = validar_registro(&registro_ok()).unwrap();
        assert_eq!(nuevo.edad, 34);
        assert_eq!(nuevo.rol, Rol::User);
        assert_eq!(nuevo.fecha_nac, NaiveDate::from_ymd_opt(1990, 4, 12).unwrap());
    }

    #[test]
    fn registro_vazio_lista_tudo() {
        let form = RegistroForm::default();
        let errores = validar_registro(&form).unwrap_err();
        assert_eq!(
            errores,
            vec![
                "El nombre es obligatorio.",
                "La edad es obligatoria.",
                "El email es obligatorio.",
                "La fecha de nacimiento es obligatoria.",
                "Debes seleccionar un rol.",
                "Debes aceptar los términos.",
            ]
        );
    }

    #[test]
    fn registro_valores_fora_de_regra() {
        let form = RegistroForm {
            nombre: "Al".into(),
            edad: "121".into(),
            email: "lucia.correo.com".into(),
            fecha_nac: "2023-02-30".into(),
            rol: "root".into(),
            terminos: Some("on".into()),
            ..registro_ok()
        };
        let errores = validar_registro(&form).unwrap_err();
        assert_eq!(
            errores,
            vec![
                "El nombre debe tener entre 3 y 50 caracteres.",
                "La edad debe estar entre 0 y 120.",
                "Email inválido.",
                "La fecha de nacimiento no tiene un formato válido.",
                "Rol no permitido.",
                "Debes aceptar los términos.",
            ]
        );
    }

    #[test]
    fn edad_nao_inteira() {
        for edad in ["3.5", "007", "   ", "+", "1e2"] {
            let form = RegistroForm { edad: edad.into(), ..registro_ok() };
            assert_eq!(
                validar_registro(&form).unwrap_err(),
                vec!["La edad debe ser un número entero."],
                "edad: {edad:?}"
            );
        }
    }

    #[test]
    fn edad_aceita_sinal_e_espacos() {
        assert_eq!(parse_entero(" 34 "), Some(34));
        assert_eq!(parse_entero("+7"), Some(7));
        assert_eq!(parse_entero("0"), Some(0));
        assert_eq!(parse_entero("-0"), Some(0));
        let form = RegistroForm { edad: "-1".into(), ..registro_ok() };
        assert_eq!(
            validar_registro(&form).unwrap_err(),
            vec!["La edad debe estar entre 0 y 120."]
        );
    }

    #[test]
    fn email_com_dominio_pontuado() {
        assert!(email_valido("ana@correo.com"));
        assert!(email_valido("ana.garcia@sub.correo.es"));
        assert!(!email_valido("ana@correo"));
        assert!(!email_valido("ana@correo."));
    }

    #[test]
    fn fecha_exige_formato_exato() {
        assert!(parse_fecha("2024-02-29").is_some());
        assert!(parse_fecha("2023-02-29").is_none());
        assert!(parse_fecha("2024-2-3").is_none());
        assert!(parse_fecha("12/04/1990").is_none());
    }

    #[test]
    fn mensaje_exige_ambos_campos() {
        assert_eq!(
            validar_mensaje(" Ana ", " hola "),
            Ok(("Ana".to_string(), "hola".to_string()))
        );
        assert_eq!(validar_mensaje("Ana", "   "), Err(MSG_FALTAN_DATOS.to_string()));
        assert_eq!(validar_mensaje("", "hola"), Err(MSG_FALTAN_DATOS.to_string()));
    }
}
