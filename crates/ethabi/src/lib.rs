extern crate hex;
extern crate num_bigint;
extern crate num_traits;
extern crate pest;
#[macro_use]
extern crate pest_derive;
#[macro_use]
extern crate thiserror;

pub use address::Address;
pub use codec::{Codec, Encoder, Decoder, encode, encode_hex, encode_packed, decode, decode_hex};
pub use data::{to_hex, from_hex};
pub use error::Error;
pub use hash::keccak256;
pub use parser::{parse, parse_type};
pub use types::{Param, ParamKind, ParamType, array_components, resolve_type};
pub use value::Value;

pub use num_bigint::{BigInt, BigUint};

mod address;
mod codec;
mod data;
mod error;
mod grammar;
mod hash;
mod parser;
mod types;
mod value;
