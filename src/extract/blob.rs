use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One unit of structured-data input, before parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawBlob {
    /// Serialized JSON that still needs parsing
    Text(String),

    /// A value that has already been parsed
    Structured(Value),
}

impl RawBlob {
    pub fn text(s: impl Into<String>) -> Self {
        RawBlob::Text(s.into())
    }

    /// Parse the blob into a JSON value, passing structured blobs through unchanged
    pub fn into_value(self) -> Result<Value, serde_json::Error> {
        match self {
            RawBlob::Text(text) => serde_json::from_str(&text),
            RawBlob::Structured(value) => Ok(value),
        }
    }
}

impl From<&str> for RawBlob {
    fn from(s: &str) -> Self {
        RawBlob::Text(s.to_string())
    }
}

impl From<String> for RawBlob {
    fn from(s: String) -> Self {
        RawBlob::Text(s)
    }
}

impl From<Value> for RawBlob {
    fn from(value: Value) -> Self {
        RawBlob::Structured(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_untagged_deserialize() {
        let blobs: Vec<RawBlob> =
            serde_json::from_value(json!(["{\"a\": 1}", {"b": 2}])).unwrap();

        assert_eq!(blobs[0], RawBlob::text("{\"a\": 1}"));
        assert_eq!(blobs[1], RawBlob::Structured(json!({"b": 2})));
    }

    #[test]
    fn test_structured_passes_through() {
        let value = json!({"@type": "Thing"});
        let blob = RawBlob::from(value.clone());
        assert_eq!(blob.into_value().unwrap(), value);
    }

    #[test]
    fn test_text_parse_failure() {
        assert!(RawBlob::from("{not json").into_value().is_err());
    }
}
