use std::cell::Cell;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use crate::{Error, ParamType, Value};
use crate::codec::sealed;
use crate::codec::integer::usize_word;

/// A parameter prepared for assembly.
///
/// `size` is the length of the parameter's own encoding: its inline bytes when
/// static, its tail content when dynamic. It is fixed when the node is built,
/// so assembly is a sizing pass followed by a single write into an exact buffer.
#[derive(Clone, Debug)]
pub struct Prepared {
    dynamic: bool,
    size: usize,
    body: Body,
}

#[derive(Clone, Debug)]
enum Body {
    Word([u8; 32]),
    /// Length word followed by the content right-padded to 32 bytes.
    Padded(Vec<u8>),
    /// Head/tail frame, optionally preceded by an element count.
    Sequence { length: Option<usize>, items: Vec<Prepared> },
}

impl Prepared {
    pub(crate) fn word(word: [u8; 32]) -> Self {
        Self { dynamic: false, size: 32, body: Body::Word(word) }
    }

    pub(crate) fn padded(content: Vec<u8>) -> Self {
        let size = 32 + padded_len(content.len());
        Self { dynamic: true, size, body: Body::Padded(content) }
    }

    pub(crate) fn sequence(length: Option<usize>, items: Vec<Prepared>, dynamic: bool) -> Self {
        let prefix = if length.is_some() { 32 } else { 0 };
        let size = prefix + items.iter().map(|item| item.head_size() + item.tail_size()).sum::<usize>();
        Self { dynamic, size, body: Body::Sequence { length, items } }
    }

    /// Top-level frame around a parameter list.
    pub(crate) fn frame(items: Vec<Prepared>) -> Self {
        Self::sequence(None, items, false)
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    fn head_size(&self) -> usize {
        if self.dynamic { 32 } else { self.size }
    }

    fn tail_size(&self) -> usize {
        if self.dynamic { self.size } else { 0 }
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        self.write(&mut out);
        debug_assert_eq!(out.len(), self.size());
        out
    }

    fn write(&self, out: &mut Vec<u8>) {
        match &self.body {
            Body::Word(word) => out.extend_from_slice(word),
            Body::Padded(content) => {
                out.extend_from_slice(&usize_word(content.len()));
                out.extend_from_slice(content);
                out.resize(out.len() + padded_len(content.len()) - content.len(), 0);
            }
            Body::Sequence { length, items } => {
                if let Some(length) = length {
                    out.extend_from_slice(&usize_word(*length));
                }

                let head_size: usize = items.iter().map(Prepared::head_size).sum();
                let mut tail_offset = head_size;
                for item in items {
                    if item.dynamic {
                        out.extend_from_slice(&usize_word(tail_offset));
                        tail_offset += item.size;
                    } else {
                        item.write(out);
                    }
                }

                for item in items.iter().filter(|item| item.dynamic) {
                    item.write(out);
                }
            }
        }
    }
}

fn padded_len(len: usize) -> usize {
    (len + 31) / 32 * 32
}

/// Caps the bytes a single decode may read.
///
/// Every word and byte string read is charged, so offsets pointing several
/// heads at one shared tail run out of budget instead of multiplying the
/// output. A well-formed encoding reads each input byte at most once.
pub struct Budget {
    limit: usize,
    remaining: Cell<usize>,
}

/// Reads allowed per input byte.
const AMPLIFICATION: usize = 2;

impl Budget {
    pub(crate) fn new(input: usize) -> Self {
        let limit = input.saturating_mul(AMPLIFICATION);
        Self { limit, remaining: Cell::new(limit) }
    }

    pub(crate) fn charge(&self, bytes: usize) -> Result<(), Error> {
        match self.remaining.get().checked_sub(bytes) {
            Some(remaining) => {
                self.remaining.set(remaining);
                Ok(())
            }
            None => Err(Error::DecodeLimitExceeded { limit: self.limit }),
        }
    }
}

pub(crate) fn read_word<'a>(frame: &'a [u8], position: usize, budget: &Budget) -> Result<&'a [u8], Error> {
    match position.checked_add(32) {
        Some(end) if end <= frame.len() => {
            budget.charge(32)?;
            Ok(&frame[position..end])
        }
        _ => Err(Error::DataSizeInvalid {
            expected: position.saturating_add(32),
            given: frame.len(),
        }),
    }
}

/// Reads an offset word and returns the frame region it points to.
pub(crate) fn read_tail<'a>(frame: &'a [u8], position: usize, budget: &Budget) -> Result<&'a [u8], Error> {
    let word = read_word(frame, position, budget)?;
    let offset = BigUint::from_bytes_be(word);
    match offset.to_usize() {
        Some(offset) if offset <= frame.len() => Ok(&frame[offset..]),
        _ => Err(Error::OffsetOutOfBounds {
            offset: offset.to_string(),
            size: frame.len(),
        }),
    }
}

/// Reads a length word at the start of `body` and checks that `length`
/// items of `unit` bytes each fit in the rest of the body.
pub(crate) fn read_length(body: &[u8], unit: usize, budget: &Budget) -> Result<usize, Error> {
    let word = read_word(body, 0, budget)?;
    let length = BigUint::from_bytes_be(word).to_usize().unwrap_or(usize::MAX);
    let required = length.saturating_mul(unit).saturating_add(32);
    if required > body.len() {
        return Err(Error::DataSizeInvalid { expected: required, given: body.len() });
    }
    Ok(length)
}

/// Whether the `padding` leading bytes of `word` all equal `fill`.
pub(crate) fn is_padded(word: &[u8], padding: usize, fill: u8) -> bool {
    word[..padding].iter().all(|&byte| byte == fill)
}

pub(crate) fn invalid_word(ty: impl Into<String>, word: &[u8]) -> Error {
    Error::InvalidWord { ty: ty.into(), word: hex::encode(word) }
}

/// Decodes consecutive parameters laid out as one head/tail frame.
pub(crate) fn decode_sequence<'a, I>(types: I, frame: &[u8], budget: &Budget) -> Result<Vec<Value>, Error>
where
    I: IntoIterator<Item = &'a ParamType>,
{
    let mut position = 0usize;
    types.into_iter()
        .map(|ty| {
            let value = sealed::Decoder::decode_frame(ty, frame, position, budget)?;
            position = position.checked_add(ty.head_size()).ok_or(Error::DataSizeInvalid {
                expected: usize::MAX,
                given: frame.len(),
            })?;
            Ok(value)
        })
        .collect()
}
