//! Foundation types for fstore.
//!
//! This crate holds the pieces every other fstore crate agrees on: how a key
//! is validated before it is allowed anywhere near the filesystem, which
//! categories of state a store declares itself responsible for, and the
//! owned key/value pair used by bulk writes.
//!
//! # Key Types
//!
//! - [`StoreType`] — Category of state a store instance serves
//! - [`KeyValue`] — Owned `(key, value)` pair for collection writes
//! - [`ValidationError`] — Rejection of a malformed key or nil value

pub mod error;
pub mod key;
pub mod key_value;
mod nil;
pub mod store_type;

pub use error::ValidationError;
pub use key::{check_key, check_key_and_value, check_prefix, KEY_SEPARATOR};
pub use key_value::KeyValue;
pub use store_type::StoreType;
