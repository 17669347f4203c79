use num_bigint::BigInt;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("Parameter count mismatch: expected {expected}, given {given}")]
    LengthMismatch { expected: usize, given: usize },

    #[error("Invalid type: {0}")]
    InvalidType(String),

    #[error("Address \"{0}\" is invalid")]
    AddressInvalid(String),

    #[error("Size of bytes{expected} does not match the given {given} bytes")]
    BytesSizeMismatch { expected: usize, given: usize },

    #[error("Array length mismatch: expected {expected}, given {given}")]
    ArrayLengthMismatch { expected: usize, given: usize },

    #[error("Value is not an array")]
    NotAnArray,

    #[error("Number {value} is not in safe {bits}-bit range")]
    NumericOverflow { value: BigInt, bits: usize },

    #[error("Data size of {given} bytes is too small, {expected} bytes required")]
    DataSizeInvalid { expected: usize, given: usize },

    #[error("Offset {offset} is out of bounds (size: {size})")]
    OffsetOutOfBounds { offset: String, size: usize },

    #[error("Word 0x{word} is not a valid {ty}")]
    InvalidWord { ty: String, word: String },

    #[error("Decoded data exceeds {limit} bytes")]
    DecodeLimitExceeded { limit: usize },

    #[error("Type \"{0}\" is not supported for packed encoding")]
    UnsupportedPackedType(String),

    #[error("Expected {expected} value")]
    TypeMismatch { expected: &'static str },

    #[error("Missing tuple field \"{0}\"")]
    MissingField(String),

    #[error("Hex decoding error : {0}")]
    Hex(#[from] hex::FromHexError),
}
