use num_bigint::{BigInt, BigUint, Sign};
use crate::{Value, Error};
use crate::codec::headtail::{invalid_word, is_padded, read_word, Budget, Prepared};

pub(crate) fn usize_word(value: usize) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}

fn left_pad(bytes: &[u8], fill: u8) -> [u8; 32] {
    let mut word = [fill; 32];
    word[32 - bytes.len()..].copy_from_slice(bytes);
    word
}

fn check_bits(bits: usize, name: &str) -> Result<(), Error> {
    match bits {
        8..=256 if bits % 8 == 0 => Ok(()),
        _ => Err(Error::InvalidType(format!("{}{}", name, bits))),
    }
}

/// Big-endian word of an unsigned `bits`-wide integer.
pub(crate) fn uint_word(bits: usize, value: &Value) -> Result<[u8; 32], Error> {
    check_bits(bits, "uint")?;
    let uint = match value {
        Value::UInt(uint) => uint.clone(),
        Value::Int(int) => int.to_biguint().ok_or_else(|| Error::NumericOverflow {
            value: int.clone(),
            bits,
        })?,
        _ => Err(Error::TypeMismatch { expected: "uint" })?,
    };

    if uint.bits() > bits as u64 {
        return Err(Error::NumericOverflow { value: BigInt::from(uint), bits });
    }

    Ok(left_pad(&uint.to_bytes_be(), 0))
}

/// Two's complement word of a signed `bits`-wide integer, sign-extended to 256 bits.
pub(crate) fn int_word(bits: usize, value: &Value) -> Result<[u8; 32], Error> {
    check_bits(bits, "int")?;
    let int = match value {
        Value::Int(int) => int.clone(),
        Value::UInt(uint) => BigInt::from(uint.clone()),
        _ => Err(Error::TypeMismatch { expected: "int" })?,
    };

    let bound = BigInt::from(1) << (bits - 1);
    if int < -bound.clone() || int >= bound {
        return Err(Error::NumericOverflow { value: int, bits });
    }

    let fill = if int.sign() == Sign::Minus { 0xff } else { 0x00 };
    Ok(left_pad(&int.to_signed_bytes_be(), fill))
}

pub(crate) fn prepare_uint(bits: usize, value: &Value) -> Result<Prepared, Error> {
    uint_word(bits, value).map(Prepared::word)
}

pub(crate) fn prepare_int(bits: usize, value: &Value) -> Result<Prepared, Error> {
    int_word(bits, value).map(Prepared::word)
}

pub(crate) fn decode_uint(bits: usize, frame: &[u8], position: usize, budget: &Budget) -> Result<Value, Error> {
    check_bits(bits, "uint")?;
    let word = read_word(frame, position, budget)?;
    let begin = 32 - bits / 8;
    if !is_padded(word, begin, 0) {
        return Err(invalid_word(format!("uint{}", bits), word));
    }
    Ok(Value::UInt(BigUint::from_bytes_be(&word[begin..])))
}

pub(crate) fn decode_int(bits: usize, frame: &[u8], position: usize, budget: &Budget) -> Result<Value, Error> {
    check_bits(bits, "int")?;
    let word = read_word(frame, position, budget)?;
    let begin = 32 - bits / 8;
    let fill = if word[begin] & 0x80 != 0 { 0xff } else { 0x00 };
    if !is_padded(word, begin, fill) {
        return Err(invalid_word(format!("int{}", bits), word));
    }
    Ok(Value::Int(BigInt::from_signed_bytes_be(&word[begin..])))
}
