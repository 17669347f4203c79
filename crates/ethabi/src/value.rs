use std::collections::BTreeMap;
use num_bigint::{BigInt, BigUint};
use crate::{Address, Error};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Address(Address),
    Boolean(bool),
    Int(BigInt),
    UInt(BigUint),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<Value>),
    /// Positional tuple.
    Tuple(Vec<Value>),
    /// Tuple keyed by component name. Decoding yields it for tuples whose
    /// components are all named.
    Struct(BTreeMap<String, Value>),
}

impl Value {
    pub fn address(address: &str) -> Result<Self, Error> {
        Ok(Value::Address(address.parse()?))
    }

    pub fn as_address(&self) -> Result<&Address, Error> {
        match self {
            Value::Address(address) => Ok(address),
            _ => Err(Error::TypeMismatch { expected: "address" }),
        }
    }

    pub fn as_int(&self) -> Result<&BigInt, Error> {
        match self {
            Value::Int(int) => Ok(int),
            _ => Err(Error::TypeMismatch { expected: "int" }),
        }
    }

    pub fn as_uint(&self) -> Result<&BigUint, Error> {
        match self {
            Value::UInt(uint) => Ok(uint),
            _ => Err(Error::TypeMismatch { expected: "uint" }),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8], Error> {
        match self {
            Value::Bytes(bytes) => Ok(bytes),
            _ => Err(Error::TypeMismatch { expected: "bytes" }),
        }
    }

    pub fn as_string(&self) -> Result<&str, Error> {
        match self {
            Value::String(string) => Ok(string),
            _ => Err(Error::TypeMismatch { expected: "string" }),
        }
    }

    pub fn as_array(&self) -> Result<&[Value], Error> {
        match self {
            Value::Array(array) => Ok(array),
            _ => Err(Error::NotAnArray),
        }
    }

    pub fn as_tuple(&self) -> Result<&[Value], Error> {
        match self {
            Value::Tuple(tuple) => Ok(tuple),
            _ => Err(Error::TypeMismatch { expected: "tuple" }),
        }
    }

    pub fn as_boolean(&self) -> Result<&bool, Error> {
        match self {
            Value::Boolean(boolean) => Ok(boolean),
            _ => Err(Error::TypeMismatch { expected: "bool" }),
        }
    }
}

impl From<Address> for Value {
    fn from(address: Address) -> Self {
        Value::Address(address)
    }
}

impl From<bool> for Value {
    fn from(boolean: bool) -> Self {
        Value::Boolean(boolean)
    }
}

impl From<BigUint> for Value {
    fn from(uint: BigUint) -> Self {
        Value::UInt(uint)
    }
}

impl From<BigInt> for Value {
    fn from(int: BigInt) -> Self {
        Value::Int(int)
    }
}

impl From<u64> for Value {
    fn from(uint: u64) -> Self {
        Value::UInt(uint.into())
    }
}

impl From<u128> for Value {
    fn from(uint: u128) -> Self {
        Value::UInt(uint.into())
    }
}

impl From<i64> for Value {
    fn from(int: i64) -> Self {
        Value::Int(int.into())
    }
}

impl From<&str> for Value {
    fn from(string: &str) -> Self {
        Value::String(string.to_string())
    }
}

impl From<String> for Value {
    fn from(string: String) -> Self {
        Value::String(string)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Bytes(bytes.to_vec())
    }
}
