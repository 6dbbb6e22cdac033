//! Lenient deserializers for loosely-typed backend fields.

use serde::{Deserialize, Deserializer};

/// Deserialize a boolean the backend may send as `true`/`false`, `0`/`1`,
/// or `"0"`/`"1"`.
///
/// Status flags come back as integers from some endpoints and booleans from
/// others; callers coerce with `#[serde(deserialize_with = "flexible_bool")]`.
///
/// # Errors
///
/// Returns a deserialization error for any value outside those forms.
pub fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Bool(b) => Ok(b),
        Raw::Int(n) => Ok(n != 0),
        Raw::Str(s) => match s.as_str() {
            "0" | "false" | "" => Ok(false),
            _ => Ok(true),
        },
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Flagged {
        #[serde(deserialize_with = "super::flexible_bool")]
        status: bool,
    }

    #[test]
    fn test_accepts_bool() {
        let f: Flagged = serde_json::from_str(r#"{"status": true}"#).expect("bool");
        assert!(f.status);
    }

    #[test]
    fn test_accepts_int() {
        let f: Flagged = serde_json::from_str(r#"{"status": 1}"#).expect("int");
        assert!(f.status);
        let f: Flagged = serde_json::from_str(r#"{"status": 0}"#).expect("int");
        assert!(!f.status);
    }

    #[test]
    fn test_accepts_string() {
        let f: Flagged = serde_json::from_str(r#"{"status": "1"}"#).expect("string");
        assert!(f.status);
        let f: Flagged = serde_json::from_str(r#"{"status": "0"}"#).expect("string");
        assert!(!f.status);
    }
}
