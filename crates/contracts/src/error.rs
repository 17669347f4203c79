use crate::eth::DecodedError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("abi error: {0}")]
    AbiError(#[from] ethabi::Error),

    #[error("Function \"{0}\" not found on abi")]
    FunctionNotFound(String),

    #[error("Selector 0x{} not found on abi", hex::encode(.0))]
    SelectorNotFound([u8; 4]),

    #[error("Constructor not found on abi")]
    ConstructorNotFound,

    #[error("Constructor arguments were given but the abi constructor has no inputs")]
    ConstructorParamsNotFound,

    #[error("Deploy data does not start with the contract bytecode")]
    BytecodeMismatch,

    #[error("Event {0} not found on abi")]
    EventNotFound(String),

    #[error("Cannot decode an event log without topics")]
    EmptyTopics,

    #[error("Expected a topic for indexed parameter \"{0}\"")]
    TopicsMismatch(String),

    #[error("Log data does not match the non-indexed parameters of event \"{0}\"")]
    DataMismatch(String),

    #[error("Data of {0} bytes is too short to carry a selector")]
    InsufficientData(usize),

    #[error("Indexed parameter of type {0} cannot be used as a topic filter")]
    UnsupportedTopic(String),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex Error")]
    Hex(#[from] hex::FromHexError),

    #[error("Transport Error: {0}")]
    Transport(String),

    #[error("Execution reverted: {0}")]
    Reverted(DecodedError),

    #[error("Call returned no data")]
    ZeroData,
}
