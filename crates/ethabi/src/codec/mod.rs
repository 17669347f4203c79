pub(crate) use codec::sealed;

pub use codec::{Codec, Encoder, Decoder};
pub use packed::encode_packed;

use crate::{Param, ParamKind, ParamType, Value, Error};
use headtail::{decode_sequence, Budget, Prepared};

mod codec;
mod headtail;
mod address;
mod array;
mod boolean;
mod bytes;
mod integer;
mod packed;
mod string;
mod tuple;

impl sealed::Encoder for ParamType {
    fn prepare(&self, value: &Value) -> Result<Prepared, Error> {
        match self.kind() {
            ParamKind::Address => address::prepare(value),
            ParamKind::Bool => boolean::prepare(value),
            ParamKind::Uint(bits) => integer::prepare_uint(*bits, value),
            ParamKind::Int(bits) => integer::prepare_int(*bits, value),
            ParamKind::FixedBytes(size) => bytes::prepare_fixed(*size, value),
            ParamKind::Bytes => bytes::prepare_dynamic(value),
            ParamKind::String => string::prepare(value),
            ParamKind::Array(inner) => array::prepare_dynamic(inner, value),
            ParamKind::FixedArray(inner, size) => array::prepare_fixed(inner, *size, self.is_dynamic(), value),
            ParamKind::Tuple(components) => tuple::prepare(components, self.is_dynamic(), value),
        }
    }
}

impl sealed::Decoder for ParamType {
    fn decode_frame(&self, frame: &[u8], position: usize, budget: &Budget) -> Result<Value, Error> {
        match self.kind() {
            ParamKind::Address => address::decode(frame, position, budget),
            ParamKind::Bool => boolean::decode(frame, position, budget),
            ParamKind::Uint(bits) => integer::decode_uint(*bits, frame, position, budget),
            ParamKind::Int(bits) => integer::decode_int(*bits, frame, position, budget),
            ParamKind::FixedBytes(size) => bytes::decode_fixed(*size, frame, position, budget),
            ParamKind::Bytes => bytes::decode_dynamic(frame, position, budget),
            ParamKind::String => string::decode(frame, position, budget),
            ParamKind::Array(inner) => array::decode_dynamic(inner, frame, position, budget),
            ParamKind::FixedArray(inner, size) => array::decode_fixed(inner, *size, self.is_dynamic(), frame, position, budget),
            ParamKind::Tuple(components) => tuple::decode(components, self.is_dynamic(), frame, position, budget),
        }
    }
}

/// Encodes `values` against `params` as one top-level frame.
pub fn encode(params: &[Param], values: &[Value]) -> Result<Vec<u8>, Error> {
    if params.len() != values.len() {
        return Err(Error::LengthMismatch { expected: params.len(), given: values.len() });
    }

    let items = params.iter().zip(values)
        .map(|(param, value)| sealed::Encoder::prepare(&param.kind, value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Prepared::frame(items).into_bytes())
}

/// Same as [`encode`] rendered as `0x` hex. Zero parameters give `"0x"`.
pub fn encode_hex(params: &[Param], values: &[Value]) -> Result<String, Error> {
    encode(params, values).map(|bytes| crate::to_hex(&bytes))
}

/// Decodes a top-level frame. `data` must be whole 32-byte words.
pub fn decode(params: &[Param], data: &[u8]) -> Result<Vec<Value>, Error> {
    if data.is_empty() && !params.is_empty() {
        let expected = params.iter().fold(0usize, |total, param| total.saturating_add(param.kind.head_size()));
        return Err(Error::DataSizeInvalid { expected, given: 0 });
    }
    if data.len() % 32 != 0 {
        let expected = (data.len() / 32 + 1) * 32;
        return Err(Error::DataSizeInvalid { expected, given: data.len() });
    }

    let budget = Budget::new(data.len());
    decode_sequence(params.iter().map(|param| &param.kind), data, &budget)
}

pub fn decode_hex(params: &[Param], data: &str) -> Result<Vec<Value>, Error> {
    decode(params, &crate::from_hex(data)?)
}
