pub use abi::{Abi, AbiItem, Constructor, EntryPoint};
pub use contract::{CallChannel, CallOutcome, EthereumContract};
pub use custom_error::{DecodedError, EthereumError, panic_reason};
pub use event::{DecodedLog, EthereumEvent, EventDecodeOptions, LogParam};
pub use function::{EthereumFunction, StateMutability};

pub mod signature;
mod abi;
mod contract;
mod custom_error;
mod event;
mod function;
