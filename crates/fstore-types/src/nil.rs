//! Detection of nil values.
//!
//! A value is nil when its `Serialize` impl emits nothing but `none`, `unit`
//! or a unit struct, possibly behind newtype wrappers. Anything else stops the
//! walk at the first call, so compound values are never traversed.

use std::fmt;

use serde::ser::{self, Impossible, Serializer};
use serde::Serialize;

/// Returns `true` if `value` serializes to nothing at all.
pub(crate) fn is_nil<V: Serialize + ?Sized>(value: &V) -> bool {
    matches!(value.serialize(NilDetector), Ok(true))
}

/// Serializer answering only "is this nil?".
///
/// Scalars answer `false` directly. Compound types answer with the
/// [`NotNil`] error, which ends serialization before any element is visited.
struct NilDetector;

#[derive(Debug)]
struct NotNil;

impl fmt::Display for NotNil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("value is not nil")
    }
}

impl std::error::Error for NotNil {}

impl ser::Error for NotNil {
    fn custom<T: fmt::Display>(_msg: T) -> Self {
        NotNil
    }
}

macro_rules! not_nil_scalars {
    ($($method:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method(self, _v: $ty) -> Result<bool, NotNil> {
                Ok(false)
            }
        )*
    };
}

impl Serializer for NilDetector {
    type Ok = bool;
    type Error = NotNil;

    type SerializeSeq = Impossible<bool, NotNil>;
    type SerializeTuple = Impossible<bool, NotNil>;
    type SerializeTupleStruct = Impossible<bool, NotNil>;
    type SerializeTupleVariant = Impossible<bool, NotNil>;
    type SerializeMap = Impossible<bool, NotNil>;
    type SerializeStruct = Impossible<bool, NotNil>;
    type SerializeStructVariant = Impossible<bool, NotNil>;

    not_nil_scalars! {
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_i128: i128,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_u128: u128,
        serialize_f32: f32,
        serialize_f64: f64,
        serialize_char: char,
        serialize_str: &str,
        serialize_bytes: &[u8],
    }

    fn serialize_none(self) -> Result<bool, NotNil> {
        Ok(true)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, _value: &T) -> Result<bool, NotNil> {
        Ok(false)
    }

    fn serialize_unit(self) -> Result<bool, NotNil> {
        Ok(true)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<bool, NotNil> {
        Ok(true)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> Result<bool, NotNil> {
        Ok(false)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<bool, NotNil> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<bool, NotNil> {
        Ok(false)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, NotNil> {
        Err(NotNil)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, NotNil> {
        Err(NotNil)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, NotNil> {
        Err(NotNil)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, NotNil> {
        Err(NotNil)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, NotNil> {
        Err(NotNil)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, NotNil> {
        Err(NotNil)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, NotNil> {
        Err(NotNil)
    }
}
