use serde::Deserialize;
use ethabi::{Param, Value};
use crate::Error;
use crate::eth::signature::{self, split_selector};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    #[default]
    Nonpayable,
    Payable,
}

/// A contract function as described by a JSON ABI `function` entry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthereumFunction {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<Param>,
    #[serde(default)]
    pub outputs: Vec<Param>,
    #[serde(default)]
    pub state_mutability: StateMutability,
}

impl EthereumFunction {
    /// Builds a function from type strings, e.g.
    /// `EthereumFunction::new("balanceOf", &["address"], &["uint256"])`.
    pub fn new(name: &str, args: &[&str], returns: &[&str]) -> Result<Self, Error> {
        let function = Self {
            name: name.to_string(),
            inputs: ethabi::parse(args)?,
            outputs: ethabi::parse(returns)?,
            state_mutability: StateMutability::default(),
        };
        Ok(function)
    }

    pub fn signature(&self) -> String {
        signature::signature(&self.name, &self.inputs)
    }

    pub fn selector(&self) -> [u8; 4] {
        signature::selector(&self.signature())
    }

    /// Whether `args` fit this function's inputs, for overload resolution.
    pub fn accepts(&self, args: &[Value]) -> bool {
        self.inputs.len() == args.len()
            && self.inputs.iter().zip(args).all(|(param, value)| param.kind.accepts(value))
    }

    /// Calldata: selector followed by the encoded arguments.
    pub fn encode(&self, args: &[Value]) -> Result<Vec<u8>, Error> {
        let encoded = ethabi::encode(&self.inputs, args)?;
        Ok([self.selector().as_slice(), encoded.as_slice()].concat())
    }

    pub fn decode_input(&self, calldata: &[u8]) -> Result<Vec<Value>, Error> {
        let (selector, payload) = split_selector(calldata)?;
        if selector != self.selector() {
            return Err(Error::SelectorNotFound(selector));
        }
        Ok(ethabi::decode(&self.inputs, payload)?)
    }

    /// Decodes the return data of a call.
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<Value>, Error> {
        Ok(ethabi::decode(&self.outputs, bytes)?)
    }

    pub fn encode_output(&self, values: &[Value]) -> Result<Vec<u8>, Error> {
        Ok(ethabi::encode(&self.outputs, values)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethabi::{Address, ParamType};

    #[test]
    fn test_function_signature() {
        let args = &["address"];
        let returns = &["uint256"];
        let function = EthereumFunction::new("balanceOf", args, returns).unwrap();
        assert_eq!(function.name, "balanceOf");
        assert_eq!(function.signature(), "balanceOf(address)");
        assert_eq!(function.selector(), [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn test_encode() {
        let args = &["address"];
        let returns = &["uint256"];
        let function = EthereumFunction::new("balanceOf", args, returns).unwrap();

        let encoded = function.encode(&[Value::Address(Address::ZERO)]).unwrap();
        assert_eq!(
            encoded,
            hex::decode("70a082310000000000000000000000000000000000000000000000000000000000000000").unwrap(),
        )
    }

    #[test]
    fn test_decode() {
        let args = &["address"];
        let returns = &["uint256"];
        let function = EthereumFunction::new("balanceOf", args, returns).unwrap();

        let one = hex::decode("0000000000000000000000000000000000000000000000000000000000000001").unwrap();
        let decoded = function.decode(&one).unwrap();
        assert_eq!(
            decoded,
            vec![Value::UInt(1_usize.into())],
        )
    }

    #[test]
    fn test_decode_input() {
        let function = EthereumFunction::new("transfer", &["address", "uint256"], &["bool"]).unwrap();
        let args = vec![
            Value::address("0xdAC17F958D2ee523a2206206994597C13D831ec7").unwrap(),
            Value::from(1_000_000_u64),
        ];

        let calldata = function.encode(&args).unwrap();
        assert_eq!(hex::encode(&calldata[..4]), "a9059cbb");
        assert_eq!(function.decode_input(&calldata).unwrap(), args);

        let mut foreign = calldata.clone();
        foreign[0] = 0;
        assert!(matches!(function.decode_input(&foreign), Err(Error::SelectorNotFound(_))));
    }

    #[test]
    fn test_encode_output() {
        let function = EthereumFunction::new("name", &[], &["string"]).unwrap();
        let encoded = function.encode_output(&[Value::from("Tether USD")]).unwrap();
        assert_eq!(function.decode(&encoded).unwrap(), vec![Value::from("Tether USD")]);
    }

    #[test]
    fn test_accepts() {
        let function = EthereumFunction::new("approve", &["address", "uint256"], &["bool"]).unwrap();
        assert!(function.accepts(&[Value::Address(Address::ZERO), Value::from(1_u64)]));
        assert!(!function.accepts(&[Value::Address(Address::ZERO)]));
        assert!(!function.accepts(&[Value::from(1_u64), Value::from(1_u64)]));
    }

    #[test]
    fn test_deserialize_function() {
        let function: EthereumFunction = serde_json::from_str(r#"{
            "type": "function",
            "name": "getReserves",
            "inputs": [],
            "outputs": [
                {"name": "reserve0", "type": "uint112", "internalType": "uint112"},
                {"name": "reserve1", "type": "uint112", "internalType": "uint112"},
                {"name": "blockTimestampLast", "type": "uint32", "internalType": "uint32"}
            ],
            "stateMutability": "view"
        }"#).unwrap();

        assert_eq!(function.state_mutability, StateMutability::View);
        assert_eq!(function.outputs[0].kind, ParamType::uint(112));
        assert_eq!(function.outputs[2].name.as_deref(), Some("blockTimestampLast"));
        assert_eq!(function.signature(), "getReserves()");
    }
}
