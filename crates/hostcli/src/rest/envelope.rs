use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Application-level wrapper around every backend response
///
/// A non-zero `code` means the call failed and `data` must not be used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub code: i64,

    #[serde(default)]
    pub description: String,

    /// Records keyed by an opaque record key, in the order the backend sent them
    ///
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// An envelope whose `data` has not been looked at yet
///
/// The code must be checked first; `data` of a failed call can have any shape.
#[derive(Debug, Deserialize)]
pub(crate) struct RawEnvelope {
    pub(crate) code: i64,

    #[serde(default)]
    pub(crate) description: String,

    #[serde(default)]
    data: Value,
}

impl RawEnvelope {
    #[must_use]
    pub(crate) fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Require `data` to be an object (or null/absent)
    ///
    /// # Errors
    ///
    /// Returns a description of the unexpected shape.
    pub(crate) fn into_envelope(self) -> Result<ResponseEnvelope, String> {
        let data = match self.data {
            Value::Null => Map::new(),
            Value::Object(data) => data,
            other => return Err(format!("expected data to be an object, got {other}")),
        };

        Ok(ResponseEnvelope {
            code: self.code,
            description: self.description,
            data,
        })
    }
}

impl ResponseEnvelope {
    #[must_use]
    pub fn success(data: Map<String, Value>) -> Self {
        Self {
            code: 0,
            description: String::new(),
            data,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_record_order_is_preserved() {
        let envelope: ResponseEnvelope = serde_json::from_str(
            r#"{"code": 0, "description": "", "data": {"z": {"name": "last"}, "a": {"name": "first"}}}"#,
        )
        .unwrap();

        let keys: Vec<&String> = envelope.data.keys().collect();
        assert_eq!(keys, ["z", "a"]);
        assert!(envelope.is_success());
    }

    #[test]
    fn test_missing_or_null_data_is_empty() {
        let missing: ResponseEnvelope =
            serde_json::from_value(json!({"code": 1, "description": "bad request"})).unwrap();
        let null: ResponseEnvelope =
            serde_json::from_value(json!({"code": 0, "data": null})).unwrap();

        assert!(missing.data.is_empty());
        assert!(!missing.is_success());
        assert!(null.data.is_empty());
    }

    #[test]
    fn test_missing_code_is_rejected() {
        assert!(serde_json::from_value::<ResponseEnvelope>(json!({"data": {}})).is_err());
    }

    #[test]
    fn test_failed_envelope_data_is_not_inspected() {
        let raw: RawEnvelope =
            serde_json::from_str(r#"{"code": 1, "description": "bad request", "data": ""}"#)
                .unwrap();

        assert!(!raw.is_success());
        assert_eq!(raw.description, "bad request");
    }

    #[test]
    fn test_successful_envelope_requires_object_data() {
        let list: RawEnvelope = serde_json::from_value(json!({"code": 0, "data": []})).unwrap();
        let null: RawEnvelope = serde_json::from_value(json!({"code": 0, "data": null})).unwrap();

        assert!(list.into_envelope().is_err());
        assert!(null.into_envelope().unwrap().data.is_empty());
    }
}
