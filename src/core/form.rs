//! Contact form field set and validator.
//!
//! A page may carry any subset of the four known fields. Absent fields are
//! skipped entirely: they never produce a message and never affect validity.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};
use crate::messages::{Locale, Messages};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

lazy_static! {
    // one-or-more non-space/non-@, "@", one-or-more non-space/non-@, ".", one-or-more non-space.
    // U+FEFF counts as space, like in the browser.
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").unwrap();
}

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Field {
    Name,
    Email,
    Topic,
    Message,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Topic => "topic",
            Field::Message => "message",
        }
    }

    pub fn parse(v: &str) -> Result<Self> {
        match v.trim() {
            "name" => Ok(Field::Name),
            "email" => Ok(Field::Email),
            "topic" => Ok(Field::Topic),
            "message" => Ok(Field::Message),
            other => Err(Error::UnknownField(other.to_string())),
        }
    }

    pub fn all() -> &'static [Field] {
        &[Field::Name, Field::Email, Field::Topic, Field::Message]
    }

    /// Whether a trimmed value satisfies this field's rule.
    pub fn accepts(self, trimmed: &str) -> bool {
        match self {
            Field::Name => text_len(trimmed) >= NAME_MIN_CHARS,
            Field::Email => is_email(trimmed),
            Field::Topic => !trimmed.is_empty(),
            Field::Message => text_len(trimmed) >= MESSAGE_MIN_CHARS,
        }
    }
}

/// Strips the characters a browser's `trim()` strips: whitespace plus the
/// byte-order mark.
pub fn trim_value(v: &str) -> &str {
    v.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Length in UTF-16 code units, the unit the browser counts in. An emoji
/// outside the BMP counts as 2.
pub fn text_len(v: &str) -> usize {
    v.encode_utf16().count()
}

pub fn is_email(v: &str) -> bool {
    EMAIL_REGEX.is_match(trim_value(v))
}

/// One field as seen by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec<'a> {
    pub field: Field,
    pub present: bool,
    pub value: &'a str,
}

/// Raw values of the fields present on the current page.
///
/// A field missing from the map is absent from the page. A present field
/// always has a value, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    values: BTreeMap<Field, String>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// A form where every listed field is present and empty.
    pub fn with_fields(fields: &[Field]) -> Self {
        let mut input = Self::new();
        for f in fields {
            input.values.insert(*f, String::new());
        }
        input
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Marks `field` present and stores its raw value.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn is_present(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    pub fn raw(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn present_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.values.keys().copied()
    }

    /// Clears every present field's value. Presence is kept.
    pub fn reset(&mut self) {
        for v in self.values.values_mut() {
            v.clear();
        }
    }

    /// Every known field, in fixed order, with presence and trimmed value.
    pub fn specs(&self) -> impl Iterator<Item = FieldSpec<'_>> + '_ {
        Field::all().iter().map(move |f| match self.values.get(f) {
            Some(v) => FieldSpec {
                field: *f,
                present: true,
                value: trim_value(v),
            },
            None => FieldSpec {
                field: *f,
                present: false,
                value: "",
            },
        })
    }

    /// Parses `{"name": "...", "email": null, ...}`.
    ///
    /// A `null` value or a missing key means the field is absent.
    #[cfg(feature = "serde")]
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let obj = value.as_object().ok_or(Error::NotAnObject)?;
        let mut input = Self::new();
        for (k, v) in obj {
            let field = Field::parse(k)?;
            match v {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => input.set(field, s.clone()),
                _ => return Err(Error::NotAnObject),
            }
        }
        Ok(input)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ValidationResult {
    pub valid: bool,
    /// One entry per present field; empty string means no error.
    pub messages: BTreeMap<Field, String>,
}

impl ValidationResult {
    pub fn message(&self, field: Field) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    /// Fields that failed their rule.
    pub fn failed(&self) -> impl Iterator<Item = Field> + '_ {
        self.messages
            .iter()
            .filter(|(_, m)| !m.is_empty())
            .map(|(f, _)| *f)
    }
}

/// Validates with the default (Spanish) messages.
pub fn validate(input: &FormInput) -> ValidationResult {
    validate_with(input, Locale::default().messages())
}

pub fn validate_with(input: &FormInput, messages: &Messages) -> ValidationResult {
    let mut valid = true;
    let mut out = BTreeMap::new();

    for spec in input.specs().filter(|s| s.present) {
        let msg = if spec.field.accepts(spec.value) {
            ""
        } else {
            valid = false;
            messages.field_error(spec.field)
        };
        out.insert(spec.field, msg.to_string());
    }

    ValidationResult {
        valid,
        messages: out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(name: &str, email: &str, topic: &str, message: &str) -> FormInput {
        FormInput::new()
            .with(Field::Name, name)
            .with(Field::Email, email)
            .with(Field::Topic, topic)
            .with(Field::Message, message)
    }

    #[test]
    fn valid_form_has_only_empty_messages() {
        let r = validate(&full("Jo", "a@b.com", "support", "Hello there!"));
        assert!(r.valid);
        assert_eq!(r.messages.len(), 4);
        assert!(r.messages.values().all(|m| m.is_empty()));
    }

    #[test]
    fn every_rule_can_fail_at_once() {
        let r = validate(&full("J", "bad", "", "short"));
        assert!(!r.valid);
        let failed: Vec<Field> = r.failed().collect();
        assert_eq!(failed, Field::all().to_vec());
        assert_eq!(
            r.message(Field::Email),
            Some("Introduce un email válido.")
        );
    }

    #[test]
    fn only_offending_field_reports() {
        let r = validate(&full("Jo", "a@b.com", "support", "too short"));
        assert!(!r.valid);
        assert_eq!(r.failed().collect::<Vec<_>>(), vec![Field::Message]);
        assert_eq!(r.message(Field::Name), Some(""));
        assert_eq!(r.message(Field::Email), Some(""));
        assert_eq!(r.message(Field::Topic), Some(""));
    }

    #[test]
    fn absent_fields_are_skipped() {
        let r = validate(&FormInput::new().with(Field::Email, "x@y.co"));
        assert!(r.valid);
        assert_eq!(r.messages.len(), 1);
        assert_eq!(r.message(Field::Name), None);

        let r = validate(&FormInput::new().with(Field::Name, "Al"));
        assert!(r.valid);
    }

    #[test]
    fn empty_page_is_valid() {
        let r = validate(&FormInput::new());
        assert!(r.valid);
        assert!(r.messages.is_empty());
    }

    #[test]
    fn values_are_trimmed_before_checks() {
        let r = validate(&FormInput::new().with(Field::Name, "  J  "));
        assert!(!r.valid);
        let r = validate(&FormInput::new().with(Field::Topic, "   "));
        assert!(!r.valid);
        let r = validate(&FormInput::new().with(Field::Email, "  a@b.co  "));
        assert!(r.valid);
    }

    #[test]
    fn lengths_count_utf16_units() {
        assert!(Field::Name.accepts("Ñu"));
        assert!(!Field::Name.accepts("Ñ"));
        assert!(Field::Message.accepts("ñññññññññ ñ"));
        // Astral-plane characters take two units each.
        assert_eq!(text_len("😀"), 2);
        assert!(validate(&FormInput::new().with(Field::Name, "😀")).valid);
        assert!(validate(&FormInput::new().with(Field::Message, "😀😀😀😀😀")).valid);
        assert!(!validate(&FormInput::new().with(Field::Message, "😀😀😀😀")).valid);
    }

    #[test]
    fn byte_order_mark_is_trimmed() {
        assert_eq!(trim_value("\u{FEFF} J\u{FEFF}\n"), "J");
        assert!(!validate(&FormInput::new().with(Field::Name, "\u{FEFF}J\u{FEFF}")).valid);
        assert!(!validate(&FormInput::new().with(Field::Topic, "\u{FEFF}")).valid);
        assert!(validate(&FormInput::new().with(Field::Email, "\u{FEFF}a@b.co")).valid);
        assert!(!is_email("a\u{FEFF}b@c.de"));
    }

    /// Every presence subset times every pass/fail choice per field.
    #[test]
    fn verdict_matches_rules_for_every_field_set() {
        let pass = |f: Field| match f {
            Field::Name => "Jo",
            Field::Email => "a@b.com",
            Field::Topic => "support",
            Field::Message => "Hello there!",
        };
        let fail = |f: Field| match f {
            Field::Name => " J ",
            Field::Email => "a@b",
            Field::Topic => "  ",
            Field::Message => "too short",
        };

        let fields = Field::all();
        for present in 0u32..16 {
            for passing in 0u32..16 {
                let mut input = FormInput::new();
                let mut expect_valid = true;
                for (i, f) in fields.iter().enumerate() {
                    if present & (1 << i) == 0 {
                        continue;
                    }
                    let ok = passing & (1 << i) != 0;
                    expect_valid &= ok;
                    input.set(*f, if ok { pass(*f) } else { fail(*f) });
                }

                let r = validate(&input);
                assert_eq!(r.valid, expect_valid, "present={present:04b} passing={passing:04b}");
                for (i, f) in fields.iter().enumerate() {
                    let is_present = present & (1 << i) != 0;
                    let ok = passing & (1 << i) != 0;
                    match r.message(*f) {
                        None => assert!(!is_present),
                        Some(m) => {
                            assert!(is_present);
                            assert_eq!(m.is_empty(), ok, "{f:?} present={present:04b} passing={passing:04b}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn email_pattern() {
        assert!(is_email("a@b.co"));
        assert!(is_email("first.last@sub.example.org"));
        assert!(!is_email("bad"));
        assert!(!is_email("a@b"));
        assert!(!is_email("a b@c.d"));
        assert!(!is_email("a@@b.c"));
        assert!(!is_email("@b.c"));
        assert!(!is_email("a@b."));
    }

    #[test]
    fn validation_is_idempotent() {
        let input = full("J", "a@b.com", "", "Hello there!");
        assert_eq!(validate(&input), validate(&input));
    }

    #[test]
    fn english_messages() {
        let r = validate_with(
            &FormInput::new().with(Field::Topic, ""),
            Locale::En.messages(),
        );
        assert_eq!(r.message(Field::Topic), Some("Select an option."));
    }

    #[test]
    fn reset_keeps_presence() {
        let mut input = full("Jo", "a@b.com", "support", "Hello there!");
        input.reset();
        assert!(Field::all().iter().all(|f| input.is_present(*f)));
        assert!(Field::all().iter().all(|f| input.raw(*f) == Some("")));
        assert!(!validate(&input).valid);
    }

    #[test]
    fn field_parse_rejects_unknown_names() {
        assert_eq!(Field::parse("email").unwrap(), Field::Email);
        assert!(Field::parse("phone").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_input_treats_null_as_absent() {
        let input =
            FormInput::from_json_str(r#"{"name": "Al", "email": null}"#).unwrap();
        assert!(input.is_present(Field::Name));
        assert!(!input.is_present(Field::Email));
        assert!(FormInput::from_json_str(r#"{"phone": "1"}"#).is_err());
        assert!(FormInput::from_json_str(r#"[1, 2]"#).is_err());
        assert!(FormInput::from_json_str(r#"{"name": 3}"#).is_err());
    }
}
