//! Explicit presence tracking for optional record payloads

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A payload that was never set, explicitly set to null, or set to a value.
///
/// Used with `#[serde(default, skip_serializing_if = "Captured::is_absent")]`:
/// an absent payload is left out of the JSON, a null one is written as `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Captured<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Captured<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

impl<T> From<Option<T>> for Captured<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

impl<T: Serialize> Serialize for Captured<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Captured<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize, Deserialize)]
    struct Holder {
        #[serde(default, skip_serializing_if = "Captured::is_absent")]
        outputs: Captured<u32>,
    }

    #[test]
    fn test_absent_is_omitted() {
        let json = serde_json::to_value(Holder {
            outputs: Captured::Absent,
        })
        .unwrap();
        assert_eq!(json, json!({}));
    }

    #[test]
    fn test_null_is_written() {
        let json = serde_json::to_value(Holder {
            outputs: Captured::Null,
        })
        .unwrap();
        assert_eq!(json, json!({"outputs": null}));
    }

    #[test]
    fn test_deserialize_distinguishes_missing_from_null() {
        let missing: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(missing.outputs.is_absent());

        let null: Holder = serde_json::from_value(json!({"outputs": null})).unwrap();
        assert_eq!(null.outputs, Captured::Null);

        let value: Holder = serde_json::from_value(json!({"outputs": 7})).unwrap();
        assert_eq!(value.outputs.as_option(), Some(&7));
    }
}
