use std::fmt;
use num_traits::ToPrimitive;
use serde::Deserialize;
use ethabi::{BigUint, Param, ParamType, Value};
use crate::Error;
use crate::eth::signature::{self, split_selector};

/// A custom error as described by a JSON ABI `error` entry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EthereumError {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<Param>,
}

impl EthereumError {
    pub fn new(name: &str, args: &[&str]) -> Result<Self, Error> {
        Ok(Self { name: name.to_string(), inputs: ethabi::parse(args)? })
    }

    /// `Error(string)`, raised by `require` and `revert` with a message.
    pub fn error_string() -> Self {
        Self { name: "Error".to_string(), inputs: vec![Param::new("message", ParamType::string())] }
    }

    /// `Panic(uint256)`, raised by failed assertions and arithmetic faults.
    pub fn panic() -> Self {
        Self { name: "Panic".to_string(), inputs: vec![Param::new("code", ParamType::uint(256))] }
    }

    pub fn signature(&self) -> String {
        signature::signature(&self.name, &self.inputs)
    }

    pub fn selector(&self) -> [u8; 4] {
        signature::selector(&self.signature())
    }

    pub fn encode(&self, args: &[Value]) -> Result<Vec<u8>, Error> {
        let encoded = ethabi::encode(&self.inputs, args)?;
        Ok([self.selector().as_slice(), encoded.as_slice()].concat())
    }

    /// Decodes revert data carrying this error's selector.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<Value>, Error> {
        let (selector, payload) = split_selector(data)?;
        if selector != self.selector() {
            return Err(Error::SelectorNotFound(selector));
        }
        Ok(ethabi::decode(&self.inputs, payload)?)
    }
}

/// Revert data interpreted against an ABI.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodedError {
    /// Revert without data.
    Empty,
    /// `Error(string)`.
    Revert(String),
    /// `Panic(uint256)`.
    Panic(BigUint),
    Custom { name: String, args: Vec<Value> },
    /// Selector absent from the ABI. `data` is the payload after the selector.
    Unknown { selector: [u8; 4], data: Vec<u8> },
}

impl DecodedError {
    pub fn reason(&self) -> String {
        match self {
            DecodedError::Empty => "execution reverted".to_string(),
            DecodedError::Revert(message) => message.clone(),
            DecodedError::Panic(code) => match panic_reason(code) {
                Some(reason) => reason.to_string(),
                None => format!("unknown panic code {:#x}", code),
            },
            DecodedError::Custom { name, args } => {
                let args = args.iter().map(format_value).collect::<Vec<_>>();
                format!("{}({})", name, args.join(", "))
            }
            DecodedError::Unknown { selector, .. } => {
                format!("unknown error 0x{}", hex::encode(selector))
            }
        }
    }
}

impl fmt::Display for DecodedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

/// Description of a compiler-inserted panic code.
pub fn panic_reason(code: &BigUint) -> Option<&'static str> {
    let reason = match code.to_u64()? {
        0x01 => "An `assert` condition failed.",
        0x11 => "Arithmetic operation resulted in underflow or overflow.",
        0x12 => "Division or modulo by zero (e.g. `5 / 0` or `23 % 0`).",
        0x21 => "Attempted to convert to an invalid type.",
        0x22 => "Attempted to access a storage byte array that is incorrectly encoded.",
        0x31 => "Performed `.pop()` on an empty array",
        0x32 => "Array index is out of bounds.",
        0x41 => "Allocated too much memory or created an array which is too large.",
        0x51 => "Attempted to call a zero-initialized variable of internal function type.",
        _ => return None,
    };
    Some(reason)
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Address(address) => address.to_string(),
        Value::Boolean(boolean) => boolean.to_string(),
        Value::Int(int) => int.to_string(),
        Value::UInt(uint) => uint.to_string(),
        Value::Bytes(bytes) => ethabi::to_hex(bytes),
        Value::String(string) => format!("{:?}", string),
        Value::Array(values) => {
            format!("[{}]", values.iter().map(format_value).collect::<Vec<_>>().join(", "))
        }
        Value::Tuple(values) => {
            format!("({})", values.iter().map(format_value).collect::<Vec<_>>().join(", "))
        }
        Value::Struct(fields) => {
            let fields = fields.iter()
                .map(|(name, value)| format!("{}: {}", name, format_value(value)))
                .collect::<Vec<_>>();
            format!("{{{}}}", fields.join(", "))
        }
    }
}
