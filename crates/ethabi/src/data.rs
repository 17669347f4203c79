use crate::Error;

/// Renders bytes as a `0x`-prefixed lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parses a hex string with or without the `0x` prefix.
pub fn from_hex(data: &str) -> Result<Vec<u8>, Error> {
    let digits = data.strip_prefix("0x").unwrap_or(data);
    Ok(hex::decode(digits)?)
}
