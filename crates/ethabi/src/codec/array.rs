use std::iter;
use crate::{ParamType, Value, Error};
use crate::codec::sealed::Encoder;
use crate::codec::headtail::{decode_sequence, read_length, read_tail, Budget, Prepared};

pub(crate) fn prepare_fixed(inner: &ParamType, size: usize, dynamic: bool, value: &Value) -> Result<Prepared, Error> {
    let values = value.as_array()?;
    if values.len() != size {
        return Err(Error::ArrayLengthMismatch { expected: size, given: values.len() });
    }

    let items = values.iter()
        .map(|value| inner.prepare(value))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Prepared::sequence(None, items, dynamic))
}

pub(crate) fn decode_fixed(
    inner: &ParamType,
    size: usize,
    dynamic: bool,
    frame: &[u8],
    position: usize,
    budget: &Budget,
) -> Result<Value, Error> {
    let elements = if dynamic {
        read_tail(frame, position, budget)?
    } else {
        let required = inner.head_size().saturating_mul(size);
        match frame.get(position..) {
            Some(elements) if elements.len() >= required => elements,
            _ => return Err(Error::DataSizeInvalid {
                expected: position.saturating_add(required),
                given: frame.len(),
            }),
        }
    };

    let values = decode_sequence(iter::repeat(inner).take(size), elements, budget)?;
    Ok(Value::Array(values))
}

pub(crate) fn prepare_dynamic(inner: &ParamType, value: &Value) -> Result<Prepared, Error> {
    let values = value.as_array()?;
    let items = values.iter()
        .map(|value| inner.prepare(value))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Prepared::sequence(Some(values.len()), items, true))
}

pub(crate) fn decode_dynamic(inner: &ParamType, frame: &[u8], position: usize, budget: &Budget) -> Result<Value, Error> {
    let body = read_tail(frame, position, budget)?;
    // Every element needs at least one head word.
    let length = read_length(body, inner.head_size().max(32), budget)?;

    let values = decode_sequence(iter::repeat(inner).take(length), &body[32..], budget)?;
    Ok(Value::Array(values))
}
