use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error half of the envelope. Carries a human-readable message only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result envelope returned by every post operation.
///
/// On the wire this is `{"data": T, "error": null}` or
/// `{"data": null, "error": {"message": "..."}}`. Exactly one side is set.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Data(T),
    Error(ApiError),
}

impl<T> Envelope<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ApiError::new(message))
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Data(_) => None,
            Self::Error(error) => Some(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        match self {
            Self::Data(value) => Envelope::Data(f(value)),
            Self::Error(error) => Envelope::Error(error),
        }
    }
}

#[derive(Serialize)]
struct WireRef<'a, T> {
    data: Option<&'a T>,
    error: Option<&'a ApiError>,
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            Self::Data(value) => WireRef {
                data: Some(value),
                error: None,
            },
            Self::Error(error) => WireRef {
                data: None,
                error: Some(error),
            },
        };
        wire.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Envelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(bound(deserialize = "T: Deserialize<'de>"))]
        struct Wire<T> {
            data: Option<T>,
            error: Option<ApiError>,
        }

        let wire = Wire::<T>::deserialize(deserializer)?;
        match (wire.data, wire.error) {
            (Some(data), None) => Ok(Self::Data(data)),
            (None, Some(error)) => Ok(Self::Error(error)),
            (Some(_), Some(_)) => Err(serde::de::Error::custom(
                "envelope carries both `data` and `error`",
            )),
            (None, None) => Err(serde::de::Error::custom(
                "envelope carries neither `data` nor `error`",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn data_side_serializes_null_error() {
        let envelope = Envelope::Data(json!({"id": 1}));
        let value = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(value, json!({"data": {"id": 1}, "error": null}));
    }

    #[test]
    fn error_side_serializes_null_data() {
        let envelope: Envelope<Value> = Envelope::error("Something Went Wrong");
        let value = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(
            value,
            json!({"data": null, "error": {"message": "Something Went Wrong"}})
        );
    }

    #[test]
    fn deserialize_rejects_mixed_state() {
        let both = json!({"data": 1, "error": {"message": "x"}});
        assert!(serde_json::from_value::<Envelope<u32>>(both).is_err());

        let neither = json!({"data": null, "error": null});
        assert!(serde_json::from_value::<Envelope<u32>>(neither).is_err());
    }

    #[test]
    fn deserialize_accepts_each_side() {
        let data: Envelope<u32> =
            serde_json::from_value(json!({"data": 7, "error": null})).expect("data side");
        assert_eq!(data, Envelope::Data(7));

        let error: Envelope<u32> =
            serde_json::from_value(json!({"data": null, "error": {"message": "nope"}}))
                .expect("error side");
        assert_eq!(error.api_error().map(|e| e.message.as_str()), Some("nope"));
    }

    #[test]
    fn map_preserves_error() {
        let envelope: Envelope<u32> = Envelope::error("boom");
        let mapped = envelope.map(|n| n * 2);
        assert!(mapped.is_error());
        assert!(mapped.data().is_none());
    }
}
