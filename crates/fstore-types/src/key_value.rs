use serde::{Deserialize, Serialize};

/// An owned key and the value to store under it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue<V> {
    pub key: String,
    pub value: V,
}

impl<V> KeyValue<V> {
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl<K: Into<String>, V> From<(K, V)> for KeyValue<V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}
