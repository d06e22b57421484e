use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::codec::{BincodeCodec, Codec, JsonCodec, TomlCodec};
use crate::error::CodecResult;

/// Encoding selected by configuration.
///
/// `Encoding` is itself a [`Codec`], dispatching to the concrete codec it
/// names, so a store can be configured at runtime without boxing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Json,
    Toml,
    Bincode,
}

impl Encoding {
    pub const ALL: [Encoding; 3] = [Encoding::Json, Encoding::Toml, Encoding::Bincode];
}

impl Codec for Encoding {
    fn name(&self) -> &'static str {
        match self {
            Encoding::Json => JsonCodec.name(),
            Encoding::Toml => TomlCodec.name(),
            Encoding::Bincode => BincodeCodec.name(),
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            Encoding::Json => JsonCodec.extension(),
            Encoding::Toml => TomlCodec.extension(),
            Encoding::Bincode => BincodeCodec.extension(),
        }
    }

    fn encode<V>(&self, value: &V) -> CodecResult<Vec<u8>>
    where
        V: Serialize + ?Sized,
    {
        match self {
            Encoding::Json => JsonCodec.encode(value),
            Encoding::Toml => TomlCodec.encode(value),
            Encoding::Bincode => BincodeCodec.encode(value),
        }
    }

    fn decode<V>(&self, bytes: &[u8]) -> CodecResult<V>
    where
        V: DeserializeOwned,
    {
        match self {
            Encoding::Json => JsonCodec.decode(bytes),
            Encoding::Toml => TomlCodec.decode(bytes),
            Encoding::Bincode => BincodeCodec.decode(bytes),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown encoding: {s} (expected json, toml or bincode)"))
    }
}
