#[macro_use]
extern crate async_trait;
extern crate ethabi;
extern crate hex;
extern crate log;
extern crate num_traits;
extern crate serde;
extern crate serde_json;
extern crate tiny_keccak;
#[macro_use]
extern crate thiserror;

pub use error::Error;

pub mod eth;
mod error;
