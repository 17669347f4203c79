//! Ethereum contract ABI encoding and decoding.
//!
//! [`ethabi`] holds the type system and the parameter codec; [`contracts`]
//! builds selectors, function calls, custom errors and event logs on top of it.

pub extern crate contracts;
pub extern crate ethabi;

pub use ethabi::{Address, Param, ParamType, Value, decode, encode};
pub use contracts::eth::{Abi, DecodedError, EventDecodeOptions};
