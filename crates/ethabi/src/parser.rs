use pest::Parser;
use pest::iterators::Pair;
use crate::grammar::{EthAbi, Rule};
use crate::{Error, Param, ParamType};

struct EthAbiParser<'a> {
    source: &'a str,
}

impl<'a> EthAbiParser<'a> {
    fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn invalid(&self) -> Error {
        Error::InvalidType(self.source.to_string())
    }

    fn accept_type(&self, pair: Pair<Rule>) -> Result<ParamType, Error> {
        let rule = pair.as_rule();
        let inner = pair.into_inner().next().ok_or_else(|| self.invalid())?;

        match inner.as_rule() {
            Rule::TupleType => self.accept_tuple_type(inner),
            Rule::BasicType => self.accept_basic_type(inner),
            _ => unreachable!("Rule::Type can not expand to {:?}", rule),
        }
    }

    fn accept_tuple_type(&self, pair: Pair<Rule>) -> Result<ParamType, Error> {
        let mut components = Vec::new();
        let mut array = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::NonZeroTuple => {
                    components = inner.into_inner()
                        .map(|pair| self.accept_type(pair).map(Param::unnamed))
                        .collect::<Result<Vec<_>, Error>>()?;
                }
                Rule::Array => array = Some(inner),
                rule => unreachable!("Rule::TupleType can not expand to {:?}", rule),
            }
        }

        let tuple = ParamType::tuple(components);
        match array {
            None => Ok(tuple),
            Some(array) => self.accept_array(array, tuple),
        }
    }

    fn accept_array(&self, pair: Pair<Rule>, inner: ParamType) -> Result<ParamType, Error> {
        let mut ty = inner;
        // Suffixes apply innermost first: `uint8[2][]` is a dynamic array of `uint8[2]`.
        for pair in pair.into_inner() {
            ty = match pair.as_rule() {
                Rule::DynamicArray => ParamType::array(ty),
                Rule::ConstArray => {
                    let digits = pair.into_inner().next().ok_or_else(|| self.invalid())?;
                    let size = digits.as_str().parse::<usize>().map_err(|_| self.invalid())?;
                    let array = ParamType::fixed_array(ty, size);
                    array.checked_head_size().ok_or_else(|| self.invalid())?;
                    array
                }
                rule => unreachable!("Rule::Array can not expand to {:?}", rule),
            };
        }
        Ok(ty)
    }

    fn accept_basic_type(&self, pair: Pair<Rule>) -> Result<ParamType, Error> {
        let mut inner = pair.into_inner();

        let base = inner.next().ok_or_else(|| self.invalid())?;
        let (sub, array) = match inner.next() {
            Some(next) if next.as_rule() == Rule::Sub => (Some(next), inner.next()),
            Some(next) if next.as_rule() == Rule::Array => (None, Some(next)),
            Some(next) => unreachable!("Rule::BasicType can not expand to {:?}", next.as_rule()),
            None => (None, None),
        };

        let size = sub
            .map(|digits| digits.as_str().parse::<usize>().map_err(|_| self.invalid()))
            .transpose()?;

        let base_type = match (base.as_str(), size) {
            ("address", None) => ParamType::address(),
            ("bool", None) => ParamType::bool(),
            ("string", None) => ParamType::string(),
            ("bytes", None) => ParamType::bytes(),
            ("bytes", Some(size)) if (1..=32).contains(&size) => ParamType::fixed_bytes(size),
            ("int", size) => ParamType::int(self.integer_size(size)?),
            ("uint", size) => ParamType::uint(self.integer_size(size)?),
            _ => Err(self.invalid())?,
        };

        match array {
            None => Ok(base_type),
            Some(array) => self.accept_array(array, base_type),
        }
    }

    fn integer_size(&self, size: Option<usize>) -> Result<usize, Error> {
        match size.unwrap_or(256) {
            size if size > 0 && size <= 256 && size % 8 == 0 => Ok(size),
            _ => Err(self.invalid()),
        }
    }

    fn parse(&self) -> Result<ParamType, Error> {
        let mut pairs = EthAbi::parse(Rule::Declaration, self.source).map_err(|_| self.invalid())?;
        let pair = pairs.next().ok_or_else(|| self.invalid())?;
        self.accept_type(pair)
    }
}

/// Parses a single type string such as `uint256`, `bytes32[]` or `(address,bytes)[2]`.
pub fn parse_type(ty: &str) -> Result<ParamType, Error> {
    EthAbiParser::new(ty).parse()
}

/// Parses a list of type strings into unnamed parameters.
pub fn parse(types: &[&str]) -> Result<Vec<Param>, Error> {
    types.iter()
        .map(|ty| parse_type(ty).map(Param::unnamed))
        .collect()
}
