use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CodecError, CodecResult};

/// Encode/decode strategy for stored values.
///
/// Implementations must be stateless with respect to individual values so a
/// single codec can be shared by every concurrent caller of a store.
pub trait Codec: Send + Sync {
    /// Short name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Filename extension (without the dot) matching this encoding.
    fn extension(&self) -> &'static str;

    /// Encode a value into bytes.
    fn encode<V>(&self, value: &V) -> CodecResult<Vec<u8>>
    where
        V: Serialize + ?Sized;

    /// Decode bytes into a freshly constructed value.
    fn decode<V>(&self, bytes: &[u8]) -> CodecResult<V>
    where
        V: DeserializeOwned;
}

/// Compact JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn encode<V>(&self, value: &V) -> CodecResult<Vec<u8>>
    where
        V: Serialize + ?Sized,
    {
        serde_json::to_vec(value).map_err(|e| CodecError::encode(self.name(), e))
    }

    fn decode<V>(&self, bytes: &[u8]) -> CodecResult<V>
    where
        V: DeserializeOwned,
    {
        serde_json::from_slice(bytes).map_err(|e| CodecError::decode(self.name(), e))
    }
}

/// TOML documents.
///
/// TOML can only express tables at the top level, so scalars and sequences
/// are rejected with [`CodecError::Encode`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TomlCodec;

impl Codec for TomlCodec {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn extension(&self) -> &'static str {
        "toml"
    }

    fn encode<V>(&self, value: &V) -> CodecResult<Vec<u8>>
    where
        V: Serialize + ?Sized,
    {
        toml::to_string(value)
            .map(String::into_bytes)
            .map_err(|e| CodecError::encode(self.name(), e))
    }

    fn decode<V>(&self, bytes: &[u8]) -> CodecResult<V>
    where
        V: DeserializeOwned,
    {
        let text = std::str::from_utf8(bytes).map_err(|e| CodecError::decode(self.name(), e))?;
        toml::from_str(text).map_err(|e| CodecError::decode(self.name(), e))
    }
}

/// bincode (not self-describing: values must be decoded into the type they
/// were encoded from).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BincodeCodec;

impl Codec for BincodeCodec {
    fn name(&self) -> &'static str {
        "bincode"
    }

    fn extension(&self) -> &'static str {
        "bin"
    }

    fn encode<V>(&self, value: &V) -> CodecResult<Vec<u8>>
    where
        V: Serialize + ?Sized,
    {
        bincode::serialize(value).map_err(|e| CodecError::encode(self.name(), e))
    }

    fn decode<V>(&self, bytes: &[u8]) -> CodecResult<V>
    where
        V: DeserializeOwned,
    {
        bincode::deserialize(bytes).map_err(|e| CodecError::decode(self.name(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct NodeState {
        name: String,
        instances: u32,
        tags: Vec<String>,
    }

    fn sample() -> NodeState {
        NodeState {
            name: "Compute".into(),
            instances: 3,
            tags: vec!["linux".into(), "x86_64".into()],
        }
    }

    fn roundtrip<C: Codec>(codec: &C) {
        let bytes = codec.encode(&sample()).unwrap();
        let back: NodeState = codec.decode(&bytes).unwrap();
        assert_eq!(back, sample());
    }

    // -----------------------------------------------------------------------
    // JSON
    // -----------------------------------------------------------------------

    #[test]
    fn json_roundtrip() {
        roundtrip(&JsonCodec);
    }

    #[test]
    fn json_is_compact_text() {
        let bytes = JsonCodec.encode(&sample()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            r#"{"name":"Compute","instances":3,"tags":["linux","x86_64"]}"#
        );
    }

    #[test]
    fn json_rejects_non_string_map_keys() {
        let mut map = BTreeMap::new();
        map.insert((1u8, 2u8), "pair");
        let err = JsonCodec.encode(&map).unwrap_err();
        assert!(matches!(err, CodecError::Encode { encoding: "json", .. }));
    }

    #[test]
    fn json_decode_garbage_fails() {
        let err = JsonCodec.decode::<NodeState>(b"{not json").unwrap_err();
        assert!(matches!(err, CodecError::Decode { encoding: "json", .. }));
    }

    #[test]
    fn json_decode_wrong_shape_fails() {
        let bytes = JsonCodec.encode(&42u32).unwrap();
        assert!(JsonCodec.decode::<NodeState>(&bytes).is_err());
    }

    // -----------------------------------------------------------------------
    // TOML
    // -----------------------------------------------------------------------

    #[test]
    fn toml_roundtrip() {
        roundtrip(&TomlCodec);
    }

    #[test]
    fn toml_rejects_bare_scalars() {
        let err = TomlCodec.encode(&42u32).unwrap_err();
        assert!(matches!(err, CodecError::Encode { encoding: "toml", .. }));
    }

    #[test]
    fn toml_decode_invalid_utf8_fails() {
        let err = TomlCodec.decode::<NodeState>(&[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, CodecError::Decode { .. }));
    }

    // -----------------------------------------------------------------------
    // bincode
    // -----------------------------------------------------------------------

    #[test]
    fn bincode_roundtrip() {
        roundtrip(&BincodeCodec);
    }

    #[test]
    fn bincode_handles_non_string_map_keys() {
        let mut map = BTreeMap::new();
        map.insert((1u8, 2u8), "pair".to_string());
        let bytes = BincodeCodec.encode(&map).unwrap();
        let back: BTreeMap<(u8, u8), String> = BincodeCodec.decode(&bytes).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn bincode_truncated_input_fails() {
        let bytes = BincodeCodec.encode(&sample()).unwrap();
        assert!(BincodeCodec.decode::<NodeState>(&bytes[..bytes.len() / 2]).is_err());
    }

    // -----------------------------------------------------------------------
    // Extensions
    // -----------------------------------------------------------------------

    #[test]
    fn extensions() {
        assert_eq!(JsonCodec.extension(), "json");
        assert_eq!(TomlCodec.extension(), "toml");
        assert_eq!(BincodeCodec.extension(), "bin");
    }
}
