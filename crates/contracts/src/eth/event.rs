use serde::Deserialize;
use ethabi::{Decoder, Encoder, Param, ParamKind, Value};
use crate::Error;
use crate::eth::signature;

/// An event as described by a JSON ABI `event` entry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EthereumEvent {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<Param>,
    #[serde(default)]
    pub anonymous: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventDecodeOptions {
    /// Fail on missing topics or undecodable data instead of skipping the
    /// affected parameters.
    pub strict: bool,
}

impl Default for EventDecodeOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogParam {
    pub name: Option<String>,
    pub indexed: bool,
    pub value: Value,
}

/// A log matched to its event. Parameters keep the event's declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedLog {
    pub name: String,
    pub params: Vec<LogParam>,
}

impl DecodedLog {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params.iter()
            .find(|param| param.name.as_deref() == Some(name))
            .map(|param| &param.value)
    }
}

impl EthereumEvent {
    pub fn new(name: &str, inputs: Vec<Param>) -> Self {
        Self { name: name.to_string(), inputs, anonymous: false }
    }

    pub fn signature(&self) -> String {
        signature::signature(&self.name, &self.inputs)
    }

    pub fn topic(&self) -> [u8; 32] {
        signature::topic(&self.signature())
    }

    /// Builds a log filter. `args` line up with the indexed inputs; `None`
    /// matches any value. Trailing indexed inputs without an argument are left out.
    pub fn encode_topics(&self, args: &[Option<Value>]) -> Result<Vec<Option<[u8; 32]>>, Error> {
        let indexed = self.inputs.iter().filter(|param| param.indexed).collect::<Vec<_>>();
        if args.len() > indexed.len() {
            return Err(ethabi::Error::LengthMismatch { expected: indexed.len(), given: args.len() }.into());
        }

        let mut topics = Vec::with_capacity(args.len() + 1);
        if !self.anonymous {
            topics.push(Some(self.topic()));
        }
        for (param, arg) in indexed.into_iter().zip(args) {
            let topic = match arg {
                Some(value) => Some(encode_topic(param, value)?),
                None => None,
            };
            topics.push(topic);
        }
        Ok(topics)
    }

    /// Decodes a log. `topics` starts with the event topic unless the event
    /// is anonymous.
    pub fn decode_log(&self, topics: &[[u8; 32]], data: &[u8], options: EventDecodeOptions) -> Result<DecodedLog, Error> {
        let arg_topics = if self.anonymous {
            topics
        } else {
            let (first, rest) = topics.split_first().ok_or(Error::EmptyTopics)?;
            if *first != self.topic() {
                return Err(Error::EventNotFound(format!("0x{}", hex::encode(first))));
            }
            rest
        };

        // A log carrying only the event topic leaves every indexed input unset.
        let mut indexed_values = Vec::new();
        for (position, param) in self.inputs.iter().filter(|param| param.indexed).enumerate() {
            let value = match arg_topics.get(position) {
                Some(topic) => Some(decode_topic(param, topic)?),
                None if options.strict && !arg_topics.is_empty() => {
                    let label = param.name.clone().unwrap_or_else(|| position.to_string());
                    return Err(Error::TopicsMismatch(label));
                }
                None => None,
            };
            indexed_values.push(value);
        }

        let data_params = self.inputs.iter()
            .filter(|param| !param.indexed)
            .cloned()
            .collect::<Vec<_>>();
        let data_values = if data_params.is_empty() {
            vec![]
        } else {
            match ethabi::decode(&data_params, data) {
                Ok(values) => values,
                Err(ethabi::Error::DataSizeInvalid { .. }) if options.strict => {
                    return Err(Error::DataMismatch(self.name.clone()));
                }
                Err(err) if options.strict => return Err(err.into()),
                Err(err) => {
                    log::debug!("skipping undecodable data of event {}: {}", self.name, err);
                    vec![]
                }
            }
        };

        let mut indexed_values = indexed_values.into_iter();
        let mut data_values = data_values.into_iter();
        let params = self.inputs.iter()
            .filter_map(|param| {
                let value = if param.indexed {
                    indexed_values.next().flatten()
                } else {
                    data_values.next()
                };
                value.map(|value| LogParam { name: param.name.clone(), indexed: param.indexed, value })
            })
            .collect();

        Ok(DecodedLog { name: self.name.clone(), params })
    }
}

/// Indexed arrays and tuples are stored hashed.
fn is_hashed(param: &Param) -> bool {
    matches!(
        param.kind.kind(),
        ParamKind::Bytes | ParamKind::String | ParamKind::Array(_) | ParamKind::FixedArray(..) | ParamKind::Tuple(_)
    )
}

fn decode_topic(param: &Param, topic: &[u8; 32]) -> Result<Value, Error> {
    if is_hashed(param) {
        return Ok(Value::Bytes(topic.to_vec()));
    }
    Ok(param.kind.decode(topic)?)
}

fn encode_topic(param: &Param, value: &Value) -> Result<[u8; 32], Error> {
    let hashed = match param.kind.kind() {
        ParamKind::String => ethabi::keccak256(value.as_string()?.as_bytes()),
        ParamKind::Bytes => ethabi::keccak256(value.as_bytes()?),
        ParamKind::Array(_) | ParamKind::FixedArray(..) | ParamKind::Tuple(_) => {
            return Err(Error::UnsupportedTopic(param.kind.to_string()));
        }
        _ => {
            let encoded = param.kind.encode(value)?;
            let mut topic = [0; 32];
            topic.copy_from_slice(&encoded);
            topic
        }
    };
    Ok(hashed)
}
