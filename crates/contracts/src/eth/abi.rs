use serde::Deserialize;
use ethabi::{Param, Value};
use crate::Error;
use crate::eth::{DecodedError, DecodedLog, EthereumError, EthereumEvent, EthereumFunction, EventDecodeOptions, StateMutability};
use crate::eth::signature::split_selector;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    #[serde(default)]
    pub inputs: Vec<Param>,
    #[serde(default)]
    pub state_mutability: StateMutability,
}

/// `fallback` and `receive` entries carry nothing but their mutability.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    #[serde(default)]
    pub state_mutability: StateMutability,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AbiItem {
    Function(EthereumFunction),
    Event(EthereumEvent),
    Error(EthereumError),
    Constructor(Constructor),
    Fallback(EntryPoint),
    Receive(EntryPoint),
}

/// A contract interface loaded from its JSON ABI.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Abi {
    items: Vec<AbiItem>,
}

impl Abi {
    pub fn new(items: Vec<AbiItem>) -> Self {
        Self { items }
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn items(&self) -> &[AbiItem] {
        &self.items
    }

    pub fn functions(&self) -> impl Iterator<Item = &EthereumFunction> {
        self.items.iter().filter_map(|item| match item {
            AbiItem::Function(function) => Some(function),
            _ => None,
        })
    }

    pub fn events(&self) -> impl Iterator<Item = &EthereumEvent> {
        self.items.iter().filter_map(|item| match item {
            AbiItem::Event(event) => Some(event),
            _ => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &EthereumError> {
        self.items.iter().filter_map(|item| match item {
            AbiItem::Error(error) => Some(error),
            _ => None,
        })
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        self.items.iter().find_map(|item| match item {
            AbiItem::Constructor(constructor) => Some(constructor),
            _ => None,
        })
    }

    /// Resolves `name` against `args`. A name without overloads always
    /// matches; overloads are tried in declaration order.
    pub fn function(&self, name: &str, args: &[Value]) -> Result<&EthereumFunction, Error> {
        let candidates = self.functions()
            .filter(|function| function.name == name)
            .collect::<Vec<_>>();

        match candidates.as_slice() {
            [] => Err(Error::FunctionNotFound(name.to_string())),
            [function] => Ok(*function),
            _ => {
                log::debug!("resolving {} overloads of {}", candidates.len(), name);
                candidates.iter()
                    .copied()
                    .find(|function| function.accepts(args))
                    .ok_or_else(|| Error::FunctionNotFound(name.to_string()))
            }
        }
    }

    pub fn function_by_selector(&self, selector: [u8; 4]) -> Result<&EthereumFunction, Error> {
        self.functions()
            .find(|function| function.selector() == selector)
            .ok_or(Error::SelectorNotFound(selector))
    }

    pub fn event(&self, name: &str) -> Result<&EthereumEvent, Error> {
        self.events()
            .find(|event| event.name == name)
            .ok_or_else(|| Error::EventNotFound(name.to_string()))
    }

    pub fn encode_function_data(&self, name: &str, args: &[Value]) -> Result<Vec<u8>, Error> {
        self.function(name, args)?.encode(args)
    }

    pub fn decode_function_data(&self, calldata: &[u8]) -> Result<(&EthereumFunction, Vec<Value>), Error> {
        let (selector, _) = split_selector(calldata)?;
        let function = self.function_by_selector(selector)?;
        let args = function.decode_input(calldata)?;
        Ok((function, args))
    }

    /// Decodes return data against the first function called `name`.
    pub fn decode_function_result(&self, name: &str, data: &[u8]) -> Result<Vec<Value>, Error> {
        self.function_by_name(name)?.decode(data)
    }

    pub fn encode_function_result(&self, name: &str, values: &[Value]) -> Result<Vec<u8>, Error> {
        self.function_by_name(name)?.encode_output(values)
    }

    /// Appends the ABI-encoded constructor arguments to `bytecode`.
    pub fn encode_deploy_data(&self, bytecode: &[u8], args: &[Value]) -> Result<Vec<u8>, Error> {
        if args.is_empty() {
            return Ok(bytecode.to_vec());
        }
        let constructor = self.constructor().ok_or(Error::ConstructorNotFound)?;
        if constructor.inputs.is_empty() {
            return Err(Error::ConstructorParamsNotFound);
        }

        let mut data = bytecode.to_vec();
        data.extend(ethabi::encode(&constructor.inputs, args)?);
        Ok(data)
    }

    /// Decodes the constructor arguments following `bytecode` in deploy data.
    pub fn decode_deploy_data(&self, bytecode: &[u8], data: &[u8]) -> Result<Vec<Value>, Error> {
        if data == bytecode {
            return Ok(vec![]);
        }
        let constructor = self.constructor().ok_or(Error::ConstructorNotFound)?;
        if constructor.inputs.is_empty() {
            return Err(Error::ConstructorParamsNotFound);
        }

        let args = data.strip_prefix(bytecode).ok_or(Error::BytecodeMismatch)?;
        Ok(ethabi::decode(&constructor.inputs, args)?)
    }

    /// Interprets revert data. Selectors missing from the ABI decode to
    /// [`DecodedError::Unknown`] rather than failing.
    pub fn decode_error_result(&self, data: &[u8]) -> Result<DecodedError, Error> {
        let (selector, payload) = split_selector(data)?;

        let error_string = EthereumError::error_string();
        if selector == error_string.selector() {
            let message = error_string.decode(data)?.remove(0);
            return Ok(DecodedError::Revert(message.as_string()?.to_string()));
        }

        let panic = EthereumError::panic();
        if selector == panic.selector() {
            let code = panic.decode(data)?.remove(0);
            return Ok(DecodedError::Panic(code.as_uint()?.clone()));
        }

        match self.errors().find(|error| error.selector() == selector) {
            Some(error) => Ok(DecodedError::Custom {
                name: error.name.clone(),
                args: error.decode(data)?,
            }),
            None => {
                log::warn!("revert selector 0x{} is not in the abi", hex::encode(selector));
                Ok(DecodedError::Unknown { selector, data: payload.to_vec() })
            }
        }
    }

    /// Encodes revert data for a custom error or the built-in `Error`/`Panic`.
    pub fn encode_error_result(&self, name: &str, args: &[Value]) -> Result<Vec<u8>, Error> {
        if let Some(error) = self.errors().find(|error| error.name == name) {
            return error.encode(args);
        }
        match name {
            "Error" => EthereumError::error_string().encode(args),
            "Panic" => EthereumError::panic().encode(args),
            _ => Err(Error::FunctionNotFound(name.to_string())),
        }
    }

    /// Matches `topics[0]` against the non-anonymous events and decodes the log.
    pub fn decode_event_log(&self, topics: &[[u8; 32]], data: &[u8], options: EventDecodeOptions) -> Result<DecodedLog, Error> {
        let signature = topics.first().ok_or(Error::EmptyTopics)?;
        let event = self.events()
            .find(|event| !event.anonymous && event.topic() == *signature)
            .ok_or_else(|| Error::EventNotFound(format!("0x{}", hex::encode(signature))))?;
        event.decode_log(topics, data, options)
    }

    fn function_by_name(&self, name: &str) -> Result<&EthereumFunction, Error> {
        self.functions()
            .find(|function| function.name == name)
            .ok_or_else(|| Error::FunctionNotFound(name.to_string()))
    }
}
