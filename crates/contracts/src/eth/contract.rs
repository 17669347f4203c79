use std::str::FromStr;
use std::sync::Arc;
use ethabi::{Address, Value};
use crate::Error;
use crate::eth::{Abi, DecodedError, EthereumFunction};

/// Result of an `eth_call`: return data, or revert data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallOutcome {
    Success(Vec<u8>),
    Revert(Vec<u8>),
}

/// Executes read-only calls against a node. `to` and `data` are `0x` hex.
#[async_trait]
pub trait CallChannel: Send + Sync {
    async fn call(&self, to: &str, data: &str) -> Result<CallOutcome, Error>;
}

pub struct EthereumContract {
    abi: Arc<Abi>,
    channel: Arc<dyn CallChannel>,
    address: Address,
}

impl EthereumContract {
    pub fn new(abi: Arc<Abi>, channel: Arc<dyn CallChannel>, address: &str) -> Result<Self, Error> {
        let contract = Self {
            abi,
            channel,
            address: Address::from_str(address)?,
        };
        Ok(contract)
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn abi(&self) -> &Abi {
        &self.abi
    }
}

impl EthereumContract {
    /// Calls `name`, resolving overloads against `args`.
    pub async fn read(&self, name: &str, args: &[Value]) -> Result<Vec<Value>, Error> {
        let function = self.abi.function(name, args)?;
        self.invoke(function, args).await
    }

    pub async fn invoke(&self, function: &EthereumFunction, args: &[Value]) -> Result<Vec<Value>, Error> {
        let data = ethabi::to_hex(&function.encode(args)?);
        let to = format!("{:#x}", self.address);
        log::trace!("eth_call {} on {}", function.signature(), to);

        match self.channel.call(&to, &data).await? {
            CallOutcome::Success(bytes) if bytes.is_empty() && !function.outputs.is_empty() => Err(Error::ZeroData),
            CallOutcome::Success(bytes) => function.decode(&bytes),
            CallOutcome::Revert(bytes) if bytes.is_empty() => Err(Error::Reverted(DecodedError::Empty)),
            CallOutcome::Revert(bytes) => Err(Error::Reverted(self.abi.decode_error_result(&bytes)?)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Mutex;
    use crate::eth::{AbiItem, EthereumError};

    const USDT: &'static str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";

    struct MockChannel {
        outcome: Result<CallOutcome, String>,
        requests: Mutex<Vec<(String, String)>>,
    }

    impl MockChannel {
        fn new(outcome: Result<CallOutcome, String>) -> Arc<Self> {
            Arc::new(Self { outcome, requests: Mutex::new(vec![]) })
        }
    }

    #[async_trait]
    impl CallChannel for MockChannel {
        async fn call(&self, to: &str, data: &str) -> Result<CallOutcome, Error> {
            self.requests.lock().unwrap().push((to.to_string(), data.to_string()));
            self.outcome.clone().map_err(Error::Transport)
        }
    }

    fn token_abi() -> Arc<Abi> {
        let name = EthereumFunction::new("name", &[], &["string"]).unwrap();
        let balance_of = EthereumFunction::new("balanceOf", &["address"], &["uint256"]).unwrap();
        let paused = EthereumError::new("Paused", &[]).unwrap();
        Arc::new(Abi::new(vec![
            AbiItem::Function(name),
            AbiItem::Function(balance_of),
            AbiItem::Error(paused),
        ]))
    }

    #[tokio::test]
    async fn test_contract_read() {
        let name = EthereumFunction::new("name", &[], &["string"]).unwrap();
        let returned = name.encode_output(&[Value::from("Tether USD")]).unwrap();
        let channel = MockChannel::new(Ok(CallOutcome::Success(returned)));

        let contract = EthereumContract::new(token_abi(), channel.clone(), USDT).unwrap();
        let results = contract.read("name", &[]).await.unwrap();
        let token_name = results[0].as_string().unwrap();

        assert_eq!(token_name, "Tether USD");
        assert_eq!(
            channel.requests.lock().unwrap().as_slice(),
            &[("0xdac17f958d2ee523a2206206994597c13d831ec7".to_string(), "0x06fdde03".to_string())]
        );
    }

    #[tokio::test]
    async fn test_contract_zero_data() {
        let channel = MockChannel::new(Ok(CallOutcome::Success(vec![])));
        let contract = EthereumContract::new(token_abi(), channel, USDT).unwrap();

        let holder = Value::Address(Address::ZERO);
        assert!(matches!(contract.read("balanceOf", &[holder]).await, Err(Error::ZeroData)));
    }

    #[tokio::test]
    async fn test_contract_revert() {
        let revert = EthereumError::error_string().encode(&[Value::from("Pausable: paused")]).unwrap();
        let channel = MockChannel::new(Ok(CallOutcome::Revert(revert)));
        let contract = EthereumContract::new(token_abi(), channel, USDT).unwrap();

        match contract.read("name", &[]).await {
            Err(Error::Reverted(reason)) => assert_eq!(reason, DecodedError::Revert("Pausable: paused".to_string())),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_contract_custom_revert() {
        let revert = EthereumError::new("Paused", &[]).unwrap().encode(&[]).unwrap();
        let channel = MockChannel::new(Ok(CallOutcome::Revert(revert)));
        let contract = EthereumContract::new(token_abi(), channel, USDT).unwrap();

        match contract.read("name", &[]).await {
            Err(Error::Reverted(reason)) => assert_eq!(reason.reason(), "Paused()"),
            other => panic!("unexpected result: {:?}", other),
        }

        let channel = MockChannel::new(Ok(CallOutcome::Revert(vec![])));
        let contract = EthereumContract::new(token_abi(), channel, USDT).unwrap();
        assert!(matches!(contract.read("name", &[]).await, Err(Error::Reverted(DecodedError::Empty))));
    }

    #[tokio::test]
    async fn test_contract_transport_error() {
        let channel = MockChannel::new(Err("connection refused".to_string()));
        let contract = EthereumContract::new(token_abi(), channel, USDT).unwrap();

        assert!(matches!(contract.read("name", &[]).await, Err(Error::Transport(message)) if message == "connection refused"));
        assert!(matches!(contract.read("symbol", &[]).await, Err(Error::FunctionNotFound(_))));
    }

    #[test]
    fn test_contract_address() {
        let channel = MockChannel::new(Ok(CallOutcome::Success(vec![])));
        assert!(matches!(
            EthereumContract::new(token_abi(), channel, "0x1234"),
            Err(Error::AbiError(ethabi::Error::AddressInvalid(_)))
        ));
    }
}
