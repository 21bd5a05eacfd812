use serde::{Deserialize, Deserializer};

/// Deserializes an optional string, treating `""` the same as a missing value.
pub fn deserialize_non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "deserialize_non_empty_string")]
        token: Option<String>,
    }

    #[test]
    fn test_present_value() {
        let payload: Payload = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert_eq!(payload.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_empty_and_blank_values_are_none() {
        let payload: Payload = serde_json::from_str(r#"{"token":""}"#).unwrap();
        assert!(payload.token.is_none());

        let payload: Payload = serde_json::from_str(r#"{"token":"   "}"#).unwrap();
        assert!(payload.token.is_none());
    }

    #[test]
    fn test_null_and_missing_values_are_none() {
        let payload: Payload = serde_json::from_str(r#"{"token":null}"#).unwrap();
        assert!(payload.token.is_none());

        let payload: Payload = serde_json::from_str("{}").unwrap();
        assert!(payload.token.is_none());
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        assert!(serde_json::from_str::<Payload>(r#"{"token":42}"#).is_err());
    }
}
