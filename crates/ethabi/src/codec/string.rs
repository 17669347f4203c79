use crate::{Value, Error};
use crate::codec::bytes::read_content;
use crate::codec::headtail::{Budget, Prepared};

pub(crate) fn prepare(value: &Value) -> Result<Prepared, Error> {
    let string = value.as_string()?;
    Ok(Prepared::padded(string.as_bytes().to_vec()))
}

pub(crate) fn decode(frame: &[u8], position: usize, budget: &Budget) -> Result<Value, Error> {
    let content = read_content(frame, position, budget)?;
    Ok(Value::String(String::from_utf8_lossy(content).to_string()))
}
