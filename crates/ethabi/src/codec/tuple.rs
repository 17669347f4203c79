use std::collections::BTreeSet;
use crate::{Param, Value, Error};
use crate::codec::sealed::Encoder;
use crate::codec::headtail::{decode_sequence, read_tail, Budget, Prepared};

/// Prepares a tuple. Ordered values bind to components by position whatever
/// the component names; keyed values bind by component name.
pub(crate) fn prepare(components: &[Param], dynamic: bool, value: &Value) -> Result<Prepared, Error> {
    let items = match value {
        Value::Tuple(values) => {
            if values.len() != components.len() {
                return Err(Error::LengthMismatch { expected: components.len(), given: values.len() });
            }
            components.iter().zip(values)
                .map(|(param, value)| param.kind.prepare(value))
                .collect::<Result<Vec<_>, _>>()?
        }
        Value::Struct(fields) => {
            components.iter().enumerate()
                .map(|(index, param)| {
                    let name = param.name.clone().unwrap_or_else(|| index.to_string());
                    let value = fields.get(&name).ok_or(Error::MissingField(name))?;
                    param.kind.prepare(value)
                })
                .collect::<Result<Vec<_>, _>>()?
        }
        _ => Err(Error::TypeMismatch { expected: "tuple" })?,
    };

    Ok(Prepared::sequence(None, items, dynamic))
}

/// Decodes a tuple. When every component carries a distinct name the result
/// is keyed by name, otherwise it is positional.
pub(crate) fn decode(components: &[Param], dynamic: bool, frame: &[u8], position: usize, budget: &Budget) -> Result<Value, Error> {
    let frame = if dynamic {
        read_tail(frame, position, budget)?
    } else {
        frame.get(position..).ok_or(Error::DataSizeInvalid { expected: position, given: frame.len() })?
    };

    let values = decode_sequence(components.iter().map(|param| &param.kind), frame, budget)?;
    let names = components.iter()
        .map(|param| param.name.as_deref())
        .collect::<Option<BTreeSet<_>>>();

    match names {
        Some(names) if !names.is_empty() && names.len() == components.len() => {
            let fields = components.iter()
                .filter_map(|param| param.name.clone())
                .zip(values)
                .collect();
            Ok(Value::Struct(fields))
        }
        _ => Ok(Value::Tuple(values)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use crate::{Param, ParamType, Value, Error};
    use crate::codec::{Encoder, Decoder};

    fn tuple(types: Vec<ParamType>) -> ParamType {
        ParamType::tuple(types.into_iter().map(Param::unnamed).collect())
    }

    #[test]
    fn test_simple_tuple_encoder() {
        let codec = tuple(vec![ParamType::bool(), ParamType::uint(256)]);

        let bytes = hex::decode(concat!(
            "0000000000000000000000000000000000000000000000000000000000000001",
            "000000000000000000000000000000000000000000000000000000000000FFFF",
        )).unwrap();

        assert_eq!(
            bytes,
            codec.encode(&Value::Tuple(vec![
                Value::Boolean(true),
                Value::UInt(0xFFFF_u32.into()),
            ])).unwrap()
        );
    }

    #[test]
    fn test_complex_tuple_encoder() {
        // ((uint256, (uint256, uint256[])))
        let codec = tuple(vec![
            ParamType::uint(256),
            tuple(vec![
                ParamType::uint(256),
                ParamType::array(ParamType::uint(256)),
            ]),
        ]);

        let bytes = hex::decode(concat!(
            "0000000000000000000000000000000000000000000000000000000000000020",
            "0000000000000000000000000000000000000000000000000000000000000001",
            "0000000000000000000000000000000000000000000000000000000000000040",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000040",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000003",
            "0000000000000000000000000000000000000000000000000000000000000004",
        )).unwrap();

        let value = Value::Tuple(vec![
            Value::UInt(1_u32.into()),
            Value::Tuple(vec![
                Value::UInt(2_u32.into()),
                Value::Array(vec![
                    Value::UInt(3_u32.into()),
                    Value::UInt(4_u32.into()),
                ]),
            ]),
        ]);

        assert_eq!(bytes, codec.encode(&value).unwrap());
        assert_eq!(codec.decode(&bytes).unwrap(), value);
    }

    #[test]
    fn test_more_complex_tuple_encoder() {
        // (uint,uint32[],bytes10,bytes) as a parameter list
        let params = vec![
            Param::unnamed(ParamType::uint(256)),
            Param::unnamed(ParamType::array(ParamType::uint(32))),
            Param::unnamed(ParamType::fixed_bytes(10)),
            Param::unnamed(ParamType::bytes()),
        ];

        let bytes = hex::decode(concat!(
            "0000000000000000000000000000000000000000000000000000000000000123",
            "0000000000000000000000000000000000000000000000000000000000000080",
            "3132333435363738393000000000000000000000000000000000000000000000",
            "00000000000000000000000000000000000000000000000000000000000000e0",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000456",
            "0000000000000000000000000000000000000000000000000000000000000789",
            "000000000000000000000000000000000000000000000000000000000000000d",
            "48656c6c6f2c20776f726c642100000000000000000000000000000000000000",
        )).unwrap();

        let values = vec![
            Value::UInt(0x123_u32.into()),
            Value::Array(vec![
                Value::UInt(0x456_u32.into()),
                Value::UInt(0x789_u32.into()),
            ]),
            Value::Bytes("1234567890".as_bytes().to_vec()),
            Value::Bytes("Hello, world!".as_bytes().to_vec()),
        ];

        assert_eq!(bytes, crate::encode(&params, &values).unwrap());
        assert_eq!(crate::decode(&params, &bytes).unwrap(), values);
    }

    #[test]
    fn test_many_dynamic_arrays() {
        let address = ParamType::array(ParamType::address());
        let uint = ParamType::array(ParamType::uint(256));
        let params = vec![
            Param::unnamed(address.clone()),
            Param::unnamed(uint.clone()),
            Param::unnamed(address),
            Param::unnamed(uint.clone()),
            Param::unnamed(uint),
        ];

        let bytes = hex::decode(concat!(
            "00000000000000000000000000000000000000000000000000000000000000a0",
            "0000000000000000000000000000000000000000000000000000000000000160",
            "0000000000000000000000000000000000000000000000000000000000000220",
            "0000000000000000000000000000000000000000000000000000000000000280",
            "00000000000000000000000000000000000000000000000000000000000002e0",
            "0000000000000000000000000000000000000000000000000000000000000005",
            "0000000000000000000000001111111111111111111111111111111111111111",
            "0000000000000000000000002222222222222222222222222222222222222222",
            "0000000000000000000000001111111111111111111111111111111111111111",
            "0000000000000000000000001111111111111111111111111111111111111111",
            "0000000000000000000000002222222222222222222222222222222222222222",
            "0000000000000000000000000000000000000000000000000000000000000005",
            "0000000000000000000000000000000000000000000000000000000000000001",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000003",
            "0000000000000000000000000000000000000000000000000000000000000004",
            "0000000000000000000000000000000000000000000000000000000000000005",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000001111111111111111111111111111111111111111",
            "0000000000000000000000002222222222222222222222222222222222222222",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000014",
            "0000000000000000000000000000000000000000000000000000000000000019",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000001",
            "0000000000000000000000000000000000000000000000000000000000000000"
        )).unwrap();

        let one = Value::address("1111111111111111111111111111111111111111").unwrap();
        let two = Value::address("2222222222222222222222222222222222222222").unwrap();
        let values = vec![
            Value::Array(vec![one.clone(), two.clone(), one.clone(), one.clone(), two.clone()]),
            Value::Array((1_u64..=5).map(Value::from).collect()),
            Value::Array(vec![one, two]),
            Value::Array(vec![Value::from(20_u64), Value::from(25_u64)]),
            Value::Array(vec![Value::from(1_u64), Value::from(0_u64)]),
        ];

        assert_eq!(bytes, crate::encode(&params, &values).unwrap());
        assert_eq!(crate::decode(&params, &bytes).unwrap(), values);
    }

    #[test]
    fn test_static_tuple_decoder() {
        let bytes = hex::decode(concat!(
            "0000000000000000000000000000000000000000000000000000000000000001",
            "0000000000000000000000000000000000000000000000000000000000000040",
            "0000000000000000000000000000000000000000000000000000000000000003",
            "6162630000000000000000000000000000000000000000000000000000000000",
        )).unwrap();

        let params = vec![Param::unnamed(ParamType::uint(256)), Param::unnamed(ParamType::string())];

        assert_eq!(
            vec![
                Value::UInt(1_u8.into()),
                Value::String("abc".to_string())
            ],
            crate::decode(&params, &bytes).unwrap(),
        );
    }

    #[test]
    fn test_inline_static_tuple() {
        // (bool, (uint8, address), uint256) keeps the inner tuple in the head
        let params = vec![
            Param::unnamed(ParamType::bool()),
            Param::unnamed(tuple(vec![ParamType::uint(8), ParamType::address()])),
            Param::unnamed(ParamType::uint(256)),
        ];
        let values = vec![
            Value::Boolean(true),
            Value::Tuple(vec![
                Value::from(7_u64),
                Value::address("feedfacefeedfacefeedfacefeedfacefeedface").unwrap(),
            ]),
            Value::from(9_u64),
        ];

        let bytes = crate::encode(&params, &values).unwrap();
        assert_eq!(
            bytes,
            hex::decode(concat!(
                "0000000000000000000000000000000000000000000000000000000000000001",
                "0000000000000000000000000000000000000000000000000000000000000007",
                "000000000000000000000000feedfacefeedfacefeedfacefeedfacefeedface",
                "0000000000000000000000000000000000000000000000000000000000000009",
            )).unwrap()
        );
        assert_eq!(crate::decode(&params, &bytes).unwrap(), values);
    }

    #[test]
    fn test_named_struct_value() {
        let codec = ParamType::tuple(vec![
            Param::new("amount", ParamType::uint(256)),
            Param::new("memo", ParamType::string()),
        ]);

        let mut fields = BTreeMap::new();
        fields.insert("memo".to_string(), Value::from("hi"));
        fields.insert("amount".to_string(), Value::from(5_u64));

        let positional = Value::Tuple(vec![Value::from(5_u64), Value::from("hi")]);
        let keyed = Value::Struct(fields);
        let bytes = codec.encode(&keyed).unwrap();
        assert_eq!(bytes, codec.encode(&positional).unwrap());

        // named components decode back to the keyed form
        assert_eq!(codec.decode(&bytes).unwrap(), keyed);
    }

    #[test]
    fn test_index_keyed_struct_stays_positional() {
        let codec = tuple(vec![ParamType::uint(256), ParamType::bool()]);

        let mut fields = BTreeMap::new();
        fields.insert("0".to_string(), Value::from(1_u64));
        fields.insert("1".to_string(), Value::Boolean(true));

        let bytes = codec.encode(&Value::Struct(fields)).unwrap();
        assert_eq!(
            codec.decode(&bytes).unwrap(),
            Value::Tuple(vec![Value::from(1_u64), Value::Boolean(true)])
        );
    }

    #[test]
    fn test_nested_named_tuple_round_trip() {
        let inner = ParamType::tuple(vec![
            Param::new("to", ParamType::address()),
            Param::new("data", ParamType::bytes()),
        ]);
        let codec = ParamType::tuple(vec![
            Param::new("calls", ParamType::array(inner)),
            Param::new("deadline", ParamType::uint(64)),
        ]);

        let mut call = BTreeMap::new();
        call.insert("to".to_string(), Value::Address(crate::Address::ZERO));
        call.insert("data".to_string(), Value::Bytes(vec![0xde, 0xad]));

        let mut fields = BTreeMap::new();
        fields.insert("calls".to_string(), Value::Array(vec![Value::Struct(call)]));
        fields.insert("deadline".to_string(), Value::from(100_u64));
        let value = Value::Struct(fields);

        let bytes = codec.encode(&value).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), value);
    }

    #[test]
    fn test_ordered_value_ignores_component_names() {
        let codec = ParamType::tuple(vec![
            Param::new("b", ParamType::uint(256)),
            Param::unnamed(ParamType::bool()),
        ]);
        let value = Value::Tuple(vec![Value::from(1_u64), Value::Boolean(false)]);

        let bytes = codec.encode(&value).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), value);
    }

    #[test]
    fn test_struct_missing_field() {
        let codec = ParamType::tuple(vec![
            Param::new("amount", ParamType::uint(256)),
            Param::new("memo", ParamType::string()),
        ]);
        let mut fields = BTreeMap::new();
        fields.insert("amount".to_string(), Value::from(5_u64));

        assert_eq!(
            codec.encode(&Value::Struct(fields)).err(),
            Some(Error::MissingField("memo".to_string()))
        );
    }

    #[test]
    fn test_tuple_arity_mismatch() {
        let codec = tuple(vec![ParamType::bool(), ParamType::bool()]);
        assert_eq!(
            codec.encode(&Value::Tuple(vec![Value::Boolean(true)])).err(),
            Some(Error::LengthMismatch { expected: 2, given: 1 })
        );
    }
}
