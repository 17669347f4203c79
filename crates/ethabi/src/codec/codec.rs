use crate::{Value, Error};
use crate::codec::headtail::{Budget, Prepared};

pub(crate) mod sealed {
    use super::{Value, Error, Budget, Prepared};

    pub trait Encoder {
        fn prepare(&self, value: &Value) -> Result<Prepared, Error>;
    }

    pub trait Decoder {
        /// Decodes the value whose head slot sits at `position` within `frame`.
        fn decode_frame(&self, frame: &[u8], position: usize, budget: &Budget) -> Result<Value, Error>;
    }
}

pub trait Encoder: sealed::Encoder {
    /// Encodes `value` as the single parameter of a fresh frame.
    fn encode(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let frame = Prepared::frame(vec![self.prepare(value)?]);
        Ok(frame.into_bytes())
    }
}

pub trait Decoder: sealed::Decoder {
    fn decode(&self, bytes: &[u8]) -> Result<Value, Error> {
        self.decode_frame(bytes, 0, &Budget::new(bytes.len()))
    }
}

pub trait Codec: Encoder + Decoder {}

impl<T: sealed::Decoder> Decoder for T {}
impl<T: sealed::Encoder> Encoder for T {}
impl<T: Encoder + Decoder> Codec for T {}
