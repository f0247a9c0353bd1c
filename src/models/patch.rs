use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// An inbound field that may be missing, explicitly `null`, or set.
///
/// Use with `#[serde(default)]` so a missing key deserialises to `Absent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Patch::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Null => Patch::Null,
            Patch::Value(value) => Patch::Value(f(value)),
        }
    }
}

impl<T: Clone> Patch<T> {
    /// Create-time view: anything but a value becomes `None` (sent as `null`)
    pub fn cloned_option(&self) -> Option<T> {
        self.as_option().cloned()
    }
}

impl<T: Serialize> Patch<T> {
    /// Write this field onto a fetched record.
    ///
    /// `Absent` leaves the record untouched, `Null` clears the field and a
    /// value overwrites it, empty strings and zeroes included.
    pub fn apply(&self, record: &mut Map<String, Value>, key: &str) -> serde_json::Result<()> {
        match self {
            Patch::Absent => {}
            Patch::Null => {
                record.insert(key.to_string(), Value::Null);
            }
            Patch::Value(value) => {
                record.insert(key.to_string(), serde_json::to_value(value)?);
            }
        }
        Ok(())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Patch::Value(value) => value.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }
}
