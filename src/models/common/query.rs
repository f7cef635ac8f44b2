//! Desserializadores para filtros opcionais em query strings
//!
//! Com `#[serde(flatten)]` todos os valores chegam como texto, então números
//! e booleanos precisam ser convertidos manualmente.

use serde::{Deserialize, Deserializer, de::Error};

pub fn optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("número inválido: '{raw}'"))),
    }
}

pub fn optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => Err(D::Error::custom(format!("booleano inválido: '{raw}'"))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Filters {
        #[serde(default, deserialize_with = "optional_i64")]
        process_id: Option<i64>,
        #[serde(default, deserialize_with = "optional_bool")]
        unread: Option<bool>,
    }

    #[test]
    fn test_parses_text_values() {
        let f: Filters = serde_json::from_str(r#"{"process_id":"12","unread":"true"}"#).unwrap();
        assert_eq!(f.process_id, Some(12));
        assert_eq!(f.unread, Some(true));
    }

    #[test]
    fn test_missing_and_empty() {
        let f: Filters = serde_json::from_str(r#"{"process_id":""}"#).unwrap();
        assert_eq!(f.process_id, None);
        assert_eq!(f.unread, None);
    }

    #[test]
    fn test_invalid_values() {
        assert!(serde_json::from_str::<Filters>(r#"{"process_id":"x"}"#).is_err());
        assert!(serde_json::from_str::<Filters>(r#"{"unread":"talvez"}"#).is_err());
    }
}
