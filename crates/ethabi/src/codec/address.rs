use crate::{Address, Value, Error};
use crate::codec::headtail::{invalid_word, is_padded, read_word, Budget, Prepared};

/// Accepts an `Address` or a string that parses as one.
pub(crate) fn address_of(value: &Value) -> Result<Address, Error> {
    match value {
        Value::Address(address) => Ok(*address),
        Value::String(string) => Ok(string.parse::<Address>()?),
        _ => Err(Error::TypeMismatch { expected: "address" }),
    }
}

pub(crate) fn prepare(value: &Value) -> Result<Prepared, Error> {
    let address = address_of(value)?;
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    Ok(Prepared::word(word))
}

pub(crate) fn decode(frame: &[u8], position: usize, budget: &Budget) -> Result<Value, Error> {
    let word = read_word(frame, position, budget)?;
    if !is_padded(word, 12, 0) {
        return Err(invalid_word("address", word));
    }
    Ok(Value::Address(Address::from_slice(&word[12..])?))
}
