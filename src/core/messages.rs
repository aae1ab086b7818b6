//! User-visible strings.
//!
//! The site ships in Spanish; English is kept alongside so a page can switch
//! through [`crate::config::SiteConfig::locale`].

use crate::error::{Error, Result};
use crate::form::Field;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub fn parse(v: &str) -> Result<Self> {
        match v.trim().to_ascii_lowercase().as_str() {
            "es" | "spanish" => Ok(Locale::Es),
            "en" | "english" => Ok(Locale::En),
            other => Err(Error::UnknownLocale(other.to_string())),
        }
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::Es => &SPANISH,
            Locale::En => &ENGLISH,
        }
    }
}

#[derive(Debug)]
pub struct Messages {
    pub name_too_short: &'static str,
    pub invalid_email: &'static str,
    pub topic_required: &'static str,
    pub message_too_short: &'static str,
    pub rejected: &'static str,
    pub pending: &'static str,
    pub success: &'static str,
    pub menu_open_label: &'static str,
    pub menu_close_label: &'static str,
}

impl Messages {
    pub fn field_error(&self, field: Field) -> &'static str {
        match field {
            Field::Name => self.name_too_short,
            Field::Email => self.invalid_email,
            Field::Topic => self.topic_required,
            Field::Message => self.message_too_short,
        }
    }
}

pub static SPANISH: Messages = Messages {
    name_too_short: "Introduce un nombre válido (mín. 2 caracteres).",
    invalid_email: "Introduce un email válido.",
    topic_required: "Selecciona una opción.",
    message_too_short: "Cuéntame un poco más (mín. 10 caracteres).",
    rejected: "Revisa los campos marcados.",
    pending: "Enviando…",
    success: "Listo. Mensaje preparado (demo). Conecta esto a tu backend cuando quieras.",
    menu_open_label: "Abrir menú",
    menu_close_label: "Cerrar menú",
};

pub static ENGLISH: Messages = Messages {
    name_too_short: "Enter a valid name (min. 2 characters).",
    invalid_email: "Enter a valid email.",
    topic_required: "Select an option.",
    message_too_short: "Tell me a bit more (min. 10 characters).",
    rejected: "Check the marked fields.",
    pending: "Sending…",
    success: "Done. Message prepared (demo). Connect this to your backend whenever you like.",
    menu_open_label: "Open menu",
    menu_close_label: "Close menu",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_has_a_message_in_both_locales() {
        for locale in [Locale::Es, Locale::En] {
            let m = locale.messages();
            for f in Field::all() {
                assert!(!m.field_error(*f).trim().is_empty());
            }
            assert!(!m.rejected.is_empty());
            assert!(!m.pending.is_empty());
            assert!(!m.success.is_empty());
        }
    }

    #[test]
    fn parse_locale() {
        assert_eq!(Locale::parse("ES").unwrap(), Locale::Es);
        assert_eq!(Locale::parse(" en ").unwrap(), Locale::En);
        let err = Locale::parse("fr").unwrap_err();
        assert_eq!(err.to_string(), "unknown locale `fr` (expected es|en)");
    }
}
