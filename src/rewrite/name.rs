//! rewrite::name
//!
//! Display-name codecs between plain text and JSON text components.
//!
//! Newer protocol versions carry display names as JSON text components
//! (`{"text":"Iron Sword"}`); older versions carry plain strings. Forward
//! stages use [`encode`] to produce a replacement name in the format of the
//! version they write to, and [`decode`] to read an authored one.
//!
//! Only the text payload is handled. Formatting codes, translation keys,
//! and other component features are the host's concern.

use serde_json::{json, Value};

use crate::core::types::NameFormat;

/// Encode plain text as a name string in `format`.
///
/// # Example
///
/// ```
/// use keepsake::core::types::NameFormat;
/// use keepsake::rewrite::name;
///
/// assert_eq!(name::encode(NameFormat::Plain, "Iron Sword"), "Iron Sword");
/// assert_eq!(name::encode(NameFormat::Json, "Iron Sword"), r#"{"text":"Iron Sword"}"#);
/// ```
pub fn encode(format: NameFormat, text: &str) -> String {
    match format {
        NameFormat::Plain => text.to_owned(),
        NameFormat::Json => json!({ "text": text }).to_string(),
    }
}

/// Best-effort decode of a name string in `format` back to plain text.
///
/// Returns `None` when a JSON name cannot be decoded; never fails. A bare
/// JSON string (`"Iron Sword"`) is accepted alongside component objects,
/// and `extra` children contribute their text in order.
pub fn decode(format: NameFormat, raw: &str) -> Option<String> {
    match format {
        NameFormat::Plain => Some(raw.to_owned()),
        NameFormat::Json => flatten(&serde_json::from_str::<Value>(raw).ok()?),
    }
}

fn flatten(component: &Value) -> Option<String> {
    match component {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => {
            let mut out = map.get("text")?.as_str()?.to_owned();
            if let Some(extra) = map.get("extra").and_then(Value::as_array) {
                for part in extra {
                    out.push_str(&flatten(part)?);
                }
            }
            Some(out)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_passes_through() {
        assert_eq!(encode(NameFormat::Plain, "x"), "x");
        assert_eq!(decode(NameFormat::Plain, "x"), Some("x".to_owned()));
    }

    #[test]
    fn json_roundtrip() {
        let encoded = encode(NameFormat::Json, "Steve's Sword");
        assert_eq!(decode(NameFormat::Json, &encoded), Some("Steve's Sword".to_owned()));
    }

    #[test]
    fn json_accepts_bare_string() {
        assert_eq!(decode(NameFormat::Json, r#""Iron Sword""#), Some("Iron Sword".to_owned()));
    }

    #[test]
    fn json_flattens_extra() {
        let raw = r#"{"text":"Iron","extra":[" ","Sword"]}"#;
        assert_eq!(decode(NameFormat::Json, raw), Some("Iron Sword".to_owned()));
    }

    #[test]
    fn json_rejects_undecodable() {
        assert_eq!(decode(NameFormat::Json, "not json"), None);
        assert_eq!(decode(NameFormat::Json, "42"), None);
        assert_eq!(decode(NameFormat::Json, r#"{"translate":"item.sword"}"#), None);
    }
}
