use crate::{Value, Error};
use crate::codec::headtail::{read_length, read_tail, read_word, Budget, Prepared};

fn check_size(size: usize) -> Result<(), Error> {
    match size {
        1..=32 => Ok(()),
        _ => Err(Error::InvalidType(format!("bytes{}", size))),
    }
}

/// `bytesN` content right-padded to a word.
pub(crate) fn fixed_word(size: usize, value: &Value) -> Result<[u8; 32], Error> {
    check_size(size)?;
    let bytes = value.as_bytes()?;
    if bytes.len() != size {
        return Err(Error::BytesSizeMismatch { expected: size, given: bytes.len() });
    }

    let mut word = [0u8; 32];
    word[..size].copy_from_slice(bytes);
    Ok(word)
}

pub(crate) fn prepare_fixed(size: usize, value: &Value) -> Result<Prepared, Error> {
    fixed_word(size, value).map(Prepared::word)
}

pub(crate) fn decode_fixed(size: usize, frame: &[u8], position: usize, budget: &Budget) -> Result<Value, Error> {
    check_size(size)?;
    let word = read_word(frame, position, budget)?;
    Ok(Value::Bytes(word[..size].to_vec()))
}

pub(crate) fn prepare_dynamic(value: &Value) -> Result<Prepared, Error> {
    let bytes = value.as_bytes()?;
    Ok(Prepared::padded(bytes.to_vec()))
}

pub(crate) fn decode_dynamic(frame: &[u8], position: usize, budget: &Budget) -> Result<Value, Error> {
    Ok(Value::Bytes(read_content(frame, position, budget)?.to_vec()))
}

/// Follows the offset at `position` to a length-prefixed byte region.
pub(crate) fn read_content<'a>(frame: &'a [u8], position: usize, budget: &Budget) -> Result<&'a [u8], Error> {
    let body = read_tail(frame, position, budget)?;
    let length = read_length(body, 1, budget)?;
    budget.charge(length)?;
    Ok(&body[32..32 + length])
}
