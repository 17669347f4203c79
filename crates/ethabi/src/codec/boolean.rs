use crate::{Value, Error};
use crate::codec::headtail::{invalid_word, is_padded, read_word, Budget, Prepared};

pub(crate) fn prepare(value: &Value) -> Result<Prepared, Error> {
    let boolean = value.as_boolean()?;
    let mut word = [0u8; 32];
    word[31] = *boolean as u8;
    Ok(Prepared::word(word))
}

pub(crate) fn decode(frame: &[u8], position: usize, budget: &Budget) -> Result<Value, Error> {
    let word = read_word(frame, position, budget)?;
    match word[31] {
        0 | 1 if is_padded(word, 31, 0) => Ok(Value::Boolean(word[31] == 1)),
        _ => Err(invalid_word("bool", word)),
    }
}
