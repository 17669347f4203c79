use std::fmt;
use std::str::FromStr;
use num_bigint::Sign;
use serde::Deserialize;
use crate::{Error, Value};
use crate::parser::parse_type;

/// Shape of an ABI type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Address,
    Bool,
    Uint(usize),
    Int(usize),
    FixedBytes(usize),
    Bytes,
    String,
    Array(Box<ParamType>),
    FixedArray(Box<ParamType>, usize),
    Tuple(Vec<Param>),
}

/// A parsed ABI type.
///
/// Whether the type is dynamic, its head size and its canonical name are
/// resolved once when the type is built, so encoding and decoding never
/// re-derive them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamType {
    kind: ParamKind,
    dynamic: bool,
    /// `None` when the head size does not fit in a `usize`.
    head: Option<usize>,
    canonical: String,
}

impl ParamType {
    pub fn from_kind(kind: ParamKind) -> Self {
        let (dynamic, canonical) = match &kind {
            ParamKind::Address => (false, "address".to_string()),
            ParamKind::Bool => (false, "bool".to_string()),
            ParamKind::Uint(bits) => (false, format!("uint{}", bits)),
            ParamKind::Int(bits) => (false, format!("int{}", bits)),
            ParamKind::FixedBytes(size) => (false, format!("bytes{}", size)),
            ParamKind::Bytes => (true, "bytes".to_string()),
            ParamKind::String => (true, "string".to_string()),
            ParamKind::Array(inner) => (true, format!("{}[]", inner.canonical)),
            ParamKind::FixedArray(inner, size) => (inner.dynamic, format!("{}[{}]", inner.canonical, size)),
            ParamKind::Tuple(components) => {
                let names = components.iter().map(|param| param.kind.canonical.as_str()).collect::<Vec<_>>();
                let dynamic = components.iter().any(|param| param.kind.dynamic);
                (dynamic, format!("({})", names.join(",")))
            }
        };
        let head = if dynamic {
            Some(32)
        } else {
            match &kind {
                ParamKind::FixedArray(inner, size) => inner.head.and_then(|head| head.checked_mul(*size)),
                ParamKind::Tuple(components) => components.iter()
                    .try_fold(0usize, |total, param| param.kind.head.and_then(|head| total.checked_add(head))),
                _ => Some(32),
            }
        };
        Self { kind, dynamic, head, canonical }
    }

    pub fn address() -> Self { Self::from_kind(ParamKind::Address) }
    pub fn bool() -> Self { Self::from_kind(ParamKind::Bool) }
    pub fn uint(bits: usize) -> Self { Self::from_kind(ParamKind::Uint(bits)) }
    pub fn int(bits: usize) -> Self { Self::from_kind(ParamKind::Int(bits)) }
    pub fn fixed_bytes(size: usize) -> Self { Self::from_kind(ParamKind::FixedBytes(size)) }
    pub fn bytes() -> Self { Self::from_kind(ParamKind::Bytes) }
    pub fn string() -> Self { Self::from_kind(ParamKind::String) }

    pub fn array(inner: ParamType) -> Self {
        Self::from_kind(ParamKind::Array(Box::new(inner)))
    }

    pub fn fixed_array(inner: ParamType, size: usize) -> Self {
        Self::from_kind(ParamKind::FixedArray(Box::new(inner), size))
    }

    pub fn tuple(components: Vec<Param>) -> Self {
        Self::from_kind(ParamKind::Tuple(components))
    }

    pub fn kind(&self) -> &ParamKind {
        &self.kind
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Canonical type string as used in signatures, e.g. `(uint256,bytes)[]`.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Number of bytes the type occupies in the head of its enclosing frame.
    ///
    /// Saturates at `usize::MAX` for fixed arrays too large to address.
    pub fn head_size(&self) -> usize {
        self.head.unwrap_or(usize::MAX)
    }

    /// Same as [`head_size`](Self::head_size), `None` on overflow.
    pub fn checked_head_size(&self) -> Option<usize> {
        self.head
    }

    /// Whether `value` has a shape this type can encode.
    pub fn accepts(&self, value: &Value) -> bool {
        match (&self.kind, value) {
            (ParamKind::Address, Value::Address(_)) => true,
            (ParamKind::Address, Value::String(string)) => string.parse::<crate::Address>().is_ok(),
            (ParamKind::Bool, Value::Boolean(_)) => true,
            (ParamKind::Uint(_), Value::UInt(_)) => true,
            (ParamKind::Uint(_), Value::Int(int)) => int.sign() != Sign::Minus,
            (ParamKind::Int(_), Value::Int(_) | Value::UInt(_)) => true,
            (ParamKind::FixedBytes(size), Value::Bytes(bytes)) => bytes.len() == *size,
            (ParamKind::Bytes, Value::Bytes(_)) => true,
            (ParamKind::String, Value::String(_)) => true,
            (ParamKind::Array(inner), Value::Array(values)) => values.iter().all(|value| inner.accepts(value)),
            (ParamKind::FixedArray(inner, size), Value::Array(values)) => {
                values.len() == *size && values.iter().all(|value| inner.accepts(value))
            }
            (ParamKind::Tuple(components), Value::Tuple(values)) => {
                components.len() == values.len()
                    && components.iter().zip(values).all(|(param, value)| param.kind.accepts(value))
            }
            (ParamKind::Tuple(components), Value::Struct(fields)) => {
                components.iter().enumerate().all(|(index, param)| {
                    let name = param.name.clone().unwrap_or_else(|| index.to_string());
                    fields.get(&name).map_or(false, |value| param.kind.accepts(value))
                })
            }
            _ => false,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for ParamType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type(s)
    }
}

/// Splits a trailing array suffix off a type string.
///
/// `uint256[3]` yields `(Some(3), "uint256")`, `tuple[]` yields `(None, "tuple")`.
pub fn array_components(ty: &str) -> Option<(Option<usize>, &str)> {
    let body = ty.strip_suffix(']')?;
    let open = body.rfind('[')?;
    let (inner, size) = (&body[..open], &body[open + 1..]);
    if inner.is_empty() {
        return None;
    }
    if size.is_empty() {
        return Some((None, inner));
    }
    if !size.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    size.parse::<usize>().ok().map(|size| (Some(size), inner))
}

/// An ABI parameter: a type with its optional name and event metadata.
///
/// Deserializes from the JSON ABI form `{"name", "type", "components", "indexed"}`;
/// the type string is parsed when the ABI is loaded.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawParam")]
pub struct Param {
    pub name: Option<String>,
    pub kind: ParamType,
    pub indexed: bool,
    pub internal_type: Option<String>,
}

impl Param {
    pub fn new(name: &str, kind: ParamType) -> Self {
        let name = if name.is_empty() { None } else { Some(name.to_string()) };
        Self { name, kind, indexed: false, internal_type: None }
    }

    pub fn unnamed(kind: ParamType) -> Self {
        Self { name: None, kind, indexed: false, internal_type: None }
    }

    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParam {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    components: Option<Vec<Param>>,
    #[serde(default)]
    indexed: bool,
    #[serde(default)]
    internal_type: Option<String>,
}

impl TryFrom<RawParam> for Param {
    type Error = Error;

    fn try_from(raw: RawParam) -> Result<Self, Self::Error> {
        let kind = resolve_type(&raw.ty, raw.components)?;
        Ok(Self {
            name: raw.name.filter(|name| !name.is_empty()),
            kind,
            indexed: raw.indexed,
            internal_type: raw.internal_type,
        })
    }
}

/// Resolves a JSON ABI type string, wrapping `components` for `tuple` types.
pub fn resolve_type(ty: &str, components: Option<Vec<Param>>) -> Result<ParamType, Error> {
    if !ty.starts_with("tuple") {
        return parse_type(ty);
    }
    if ty == "tuple" {
        let components = components.ok_or_else(|| Error::InvalidType(ty.to_string()))?;
        return Ok(ParamType::tuple(components));
    }
    let resolved = match array_components(ty) {
        Some((Some(size), inner)) => ParamType::fixed_array(resolve_type(inner, components)?, size),
        Some((None, inner)) => ParamType::array(resolve_type(inner, components)?),
        None => return Err(Error::InvalidType(ty.to_string())),
    };
    match resolved.checked_head_size() {
        Some(_) => Ok(resolved),
        None => Err(Error::InvalidType(ty.to_string())),
    }
}
