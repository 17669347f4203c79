use crate::{Param, ParamKind, ParamType, Value, Error};
use crate::codec::{address, bytes, integer};

/// Non-standard packed encoding, as Solidity's `abi.encodePacked`.
///
/// Elementary values take their natural width with no padding. Array
/// elements are padded to a full word, except `bytes` and `string` which are
/// concatenated as is. Tuples have no packed form.
pub fn encode_packed(params: &[Param], values: &[Value]) -> Result<Vec<u8>, Error> {
    if params.len() != values.len() {
        return Err(Error::LengthMismatch { expected: params.len(), given: values.len() });
    }

    let mut out = Vec::new();
    for (param, value) in params.iter().zip(values) {
        pack(&param.kind, value, false, &mut out)?;
    }
    Ok(out)
}

fn pack(ty: &ParamType, value: &Value, in_array: bool, out: &mut Vec<u8>) -> Result<(), Error> {
    match ty.kind() {
        ParamKind::Address => {
            let address = address::address_of(value)?;
            if in_array {
                out.extend_from_slice(&[0u8; 12]);
            }
            out.extend_from_slice(address.as_bytes());
        }
        ParamKind::Bool => {
            if in_array {
                out.extend_from_slice(&[0u8; 31]);
            }
            out.push(*value.as_boolean()? as u8);
        }
        ParamKind::Uint(bits) => {
            let word = integer::uint_word(*bits, value)?;
            out.extend_from_slice(trailing(&word, bits / 8, in_array));
        }
        ParamKind::Int(bits) => {
            let word = integer::int_word(*bits, value)?;
            out.extend_from_slice(trailing(&word, bits / 8, in_array));
        }
        ParamKind::FixedBytes(size) => {
            let word = bytes::fixed_word(*size, value)?;
            let width = if in_array { 32 } else { *size };
            out.extend_from_slice(&word[..width]);
        }
        ParamKind::Bytes => out.extend_from_slice(value.as_bytes()?),
        ParamKind::String => out.extend_from_slice(value.as_string()?.as_bytes()),
        ParamKind::Array(inner) => {
            for value in value.as_array()? {
                pack(inner, value, true, out)?;
            }
        }
        ParamKind::FixedArray(inner, size) => {
            let values = value.as_array()?;
            if values.len() != *size {
                return Err(Error::ArrayLengthMismatch { expected: *size, given: values.len() });
            }
            for value in values {
                pack(inner, value, true, out)?;
            }
        }
        ParamKind::Tuple(_) => return Err(Error::UnsupportedPackedType(ty.canonical().to_string())),
    }
    Ok(())
}

/// Low `width` bytes of a left-padded word, or the whole word inside arrays.
fn trailing(word: &[u8; 32], width: usize, in_array: bool) -> &[u8] {
    if in_array { &word[..] } else { &word[32 - width..] }
}
