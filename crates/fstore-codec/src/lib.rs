//! Value encodings for fstore.
//!
//! A store never interprets the values it holds; it hands them to a
//! [`Codec`] on the way in and on the way out. Each codec also names the
//! filename extension its files carry on disk.
//!
//! - [`JsonCodec`] — compact JSON, extension `json` (the default)
//! - [`TomlCodec`] — TOML documents, extension `toml`; top-level values must be tables
//! - [`BincodeCodec`] — bincode, extension `bin`
//! - [`Encoding`] — configuration-selectable choice among the above

pub mod codec;
pub mod encoding;
pub mod error;

pub use codec::{BincodeCodec, Codec, JsonCodec, TomlCodec};
pub use encoding::Encoding;
pub use error::{CodecError, CodecResult};
