//! Integration tests for espwire
//!
//! These tests drive the codec through the public API with the built-in
//! schema table, the way a connection handler would.

use espwire::*;

fn registry() -> SchemaRegistry {
    SchemaRegistry::builtin().unwrap()
}

#[test]
fn test_switch_command_bytes() {
    let registry = registry();
    let encoder = CommandEncoder::new(&registry);
    let decoder = MessageDecoder::new(&registry);

    let payload = encoder
        .encode("switch", 42, &CommandFields::new().set("state", true))
        .unwrap();
    assert_eq!(payload, [0x08, 0x2A, 0x10, 0x01]);

    let decoded = decoder.decode(msg_types::SWITCH_COMMAND_REQUEST, &payload).unwrap();
    assert_eq!(decoded.kind, "switch");
    assert_eq!(decoded.shape, MessageShape::Command);
    assert_eq!(decoded.fields.get("key"), Some(Value::Int(42)));
    assert_eq!(decoded.fields.get("state"), Some(Value::Bool(true)));
    assert_eq!(decoded.fields.len(), 2);
}

#[test]
fn test_climate_has_pattern() {
    let registry = registry();
    let encoder = CommandEncoder::new(&registry);
    let decoder = MessageDecoder::new(&registry);

    let payload = encoder
        .encode("climate", 7, &CommandFields::new().set("targetTemperature", 21.5f32))
        .unwrap();

    let mut expected = vec![0x08, 0x07, 0x20, 0x01, 0x2D];
    expected.extend_from_slice(&21.5f32.to_bits().to_le_bytes());
    assert_eq!(payload, expected);

    // Value field alone still decodes
    let mut bare = vec![0x08, 0x07, 0x2D];
    bare.extend_from_slice(&21.5f32.to_le_bytes());
    let decoded = decoder.decode(msg_types::CLIMATE_COMMAND_REQUEST, &bare).unwrap();
    assert_eq!(decoded.fields.get("targetTemperature"), Some(Value::Float(21.5)));
    assert!(!decoded.fields.has_flag("targetTemperature"));
}

#[test]
fn test_absent_fields_are_omitted() {
    let registry = registry();
    let encoder = CommandEncoder::new(&registry);

    let payload = encoder
        .encode("climate", 7, &CommandFields::new().set("fanMode", 3u32))
        .unwrap();
    // key, has_fan_mode, fan_mode and nothing else
    assert_eq!(payload, [0x08, 0x07, 0x60, 0x01, 0x68, 0x03]);
}

#[test]
fn test_lock_enum_mapping() {
    let registry = registry();
    let encoder = CommandEncoder::new(&registry);

    let payload = encoder
        .encode("lock", 1, &CommandFields::new().set("command", "unlock"))
        .unwrap();
    assert_eq!(payload, [0x08, 0x01, 0x10, 0x00]);

    let payload = encoder
        .encode("lock", 1, &CommandFields::new().set("command", "open"))
        .unwrap();
    assert_eq!(payload, [0x08, 0x01, 0x10, 0x02]);

    let err = encoder
        .encode("lock", 1, &CommandFields::new().set("command", "explode"))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownEnumToken { field: "command", .. }));
    assert!(!err.is_structural());
}

#[test]
fn test_select_options_keep_order() {
    let registry = registry();
    let decoder = MessageDecoder::new(&registry);

    let mut payload = Vec::new();
    for option in ["eco", "comfort", "eco"] {
        wire::put_tag(6, WireType::LengthDelimited, &mut payload);
        wire::put_length_delimited(option.as_bytes(), &mut payload);
    }
    wire::put_tag(3, WireType::LengthDelimited, &mut payload);
    wire::put_length_delimited(b"Mode", &mut payload);

    let decoded = decoder
        .decode(msg_types::LIST_ENTITIES_SELECT_RESPONSE, &payload)
        .unwrap();
    assert_eq!(decoded.shape, MessageShape::ListEntities);

    let options: Vec<&str> = decoded
        .fields
        .get_repeated("options")
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(options, ["eco", "comfort", "eco"]);
    assert_eq!(decoded.fields.get("name").and_then(|v| v.as_str()), Some("Mode"));
}

#[test]
fn test_unknown_fields_are_tolerated() {
    let registry = registry();
    let decoder = MessageDecoder::new(&registry);

    let mut payload = vec![0x08, 0x05];
    // field 90 of every skippable wire type
    wire::put_tag(90, WireType::Varint, &mut payload);
    varint::put_u64(u64::MAX, &mut payload);
    wire::put_tag(90, WireType::Fixed64, &mut payload);
    payload.extend_from_slice(&[0u8; 8]);
    wire::put_tag(90, WireType::LengthDelimited, &mut payload);
    wire::put_length_delimited(b"future", &mut payload);
    wire::put_tag(90, WireType::Fixed32, &mut payload);
    payload.extend_from_slice(&[0u8; 4]);
    payload.extend_from_slice(&[0x10, 0x01]);

    let decoded = decoder.decode(msg_types::BINARY_SENSOR_STATE_RESPONSE, &payload).unwrap();
    assert_eq!(decoded.fields.key(), Some(5));
    assert_eq!(decoded.fields.get("state"), Some(Value::Bool(true)));
    assert_eq!(decoded.fields.len(), 2);
}

#[test]
fn test_unknown_message_type_is_skippable() {
    let registry = registry();
    let decoder = MessageDecoder::new(&registry);

    let err = decoder.decode(4242, &[0x08, 0x01]).unwrap_err();
    assert_eq!(err, Error::UnknownMessageType(4242));
    assert!(err.is_ignorable());
    assert!(!err.is_structural());
}

#[test]
fn test_structural_errors() {
    let registry = registry();
    let decoder = MessageDecoder::new(&registry);
    let id = msg_types::TEXT_STATE_RESPONSE;

    let cases: &[(&[u8], Error)] = &[
        (&[0x08], Error::MalformedVarint),
        (&[0x08, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01], Error::MalformedVarint),
        (&[0x12, 0x0A, b'o', b'n'], Error::TruncatedPayload),
        (&[0x12, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F], Error::TruncatedPayload),
        (&[0x09, 0x00, 0x00], Error::TruncatedPayload),
        (&[0x00, 0x00], Error::InvalidTag(0)),
        (&[0x0C], Error::InvalidTag(0x0C)),
    ];

    for (payload, expected) in cases {
        let err = decoder.decode(id, payload).unwrap_err();
        assert_eq!(&err, expected, "{payload:02x?}");
        assert!(err.is_structural());
    }
}

#[test]
fn test_oversized_payload() {
    let registry = registry();
    let decoder = MessageDecoder::new(&registry);
    let payload = vec![0u8; MAX_PAYLOAD_SIZE + 1];
    assert_eq!(
        decoder.decode(msg_types::SWITCH_STATE_RESPONSE, &payload).unwrap_err(),
        Error::PayloadTooLarge(MAX_PAYLOAD_SIZE + 1)
    );
}

#[test]
fn test_timestamps_stay_integers() {
    let registry = registry();
    let decoder = MessageDecoder::new(&registry);

    // datetime state: key, missing_state=false, epoch_seconds
    let mut payload = vec![0x0D];
    payload.extend_from_slice(&9u32.to_le_bytes());
    payload.extend_from_slice(&[0x10, 0x00, 0x1D]);
    payload.extend_from_slice(&1_700_000_000u32.to_le_bytes());

    let decoded = decoder.decode(msg_types::DATETIME_STATE_RESPONSE, &payload).unwrap();
    assert_eq!(decoded.fields.key(), Some(9));
    assert_eq!(decoded.fields.get("epochSeconds"), Some(Value::Fixed32(1_700_000_000)));
}

#[test]
fn test_every_command_kind_encodes_key_only() {
    let registry = registry();
    let encoder = CommandEncoder::new(&registry);
    let decoder = MessageDecoder::new(&registry);

    for schema in registry.kinds() {
        match schema.command {
            Some(command) => {
                let payload = encoder.encode(schema.kind, 77, &CommandFields::new()).unwrap();
                let decoded = decoder.decode(command.message_type, &payload).unwrap();
                assert_eq!(decoded.kind, schema.kind);
                assert_eq!(decoded.fields.key(), Some(77));
            }
            None => assert_eq!(
                encoder.encode(schema.kind, 77, &CommandFields::new()).unwrap_err(),
                Error::NoCommandShape(schema.kind)
            ),
        }
    }
}

#[test]
fn test_light_multi_field_roundtrip() {
    let registry = registry();
    let encoder = CommandEncoder::new(&registry);
    let decoder = MessageDecoder::new(&registry);

    let fields = CommandFields::new()
        .set("state", true)
        .set("brightness", 0.8f32)
        .set("effect", "rainbow")
        .set("transitionLength", 1500u32)
        .set("hasRgb", true)
        .set("red", 1.0f32)
        .set("deviceId", 12u32);
    let payload = encoder.encode("light", 0xCAFE, &fields).unwrap();
    let decoded = decoder.decode(msg_types::LIGHT_COMMAND_REQUEST, &payload).unwrap();

    let f = &decoded.fields;
    assert_eq!(f.key(), Some(0xCAFE));
    assert_eq!(f.get("state"), Some(Value::Bool(true)));
    assert_eq!(f.get("brightness"), Some(Value::Float(0.8)));
    assert_eq!(f.get("effect").and_then(|v| v.as_str()), Some("rainbow"));
    assert_eq!(f.get("transitionLength"), Some(Value::Int(1500)));
    assert_eq!(f.get("hasRgb"), Some(Value::Bool(true)));
    assert_eq!(f.get("red"), Some(Value::Float(1.0)));
    assert_eq!(f.get("deviceId"), Some(Value::Int(12)));
    for name in ["state", "brightness", "effect", "transitionLength"] {
        assert!(f.has_flag(name), "{name}");
    }
    assert!(!f.has_flag("white"));
}

#[test]
fn test_registry_shared_across_threads() {
    let registry = registry();
    let registry = &registry;

    std::thread::scope(|s| {
        for key in 0..8u32 {
            s.spawn(move || {
                let encoder = CommandEncoder::new(registry);
                let decoder = MessageDecoder::new(registry);
                for _ in 0..1000 {
                    let payload = encoder
                        .encode("switch", key, &CommandFields::new().set("state", key % 2 == 0))
                        .unwrap();
                    let decoded =
                        decoder.decode(msg_types::SWITCH_COMMAND_REQUEST, &payload).unwrap();
                    assert_eq!(decoded.fields.key(), Some(key));
                }
            });
        }
    });
}

#[test]
fn test_custom_schema_table() {
    const FIELDS: &[FieldSpec] = &[
        FieldSpec::new("level", 2, ValueType::Sint32),
        FieldSpec::new("label", 3, ValueType::String),
    ];
    const GAUGE: EntitySchema = EntitySchema {
        kind: "gauge",
        command: Some(CommandSchema {
            message_type: 900,
            key_field_number: 1,
            device_id_field_number: 0,
            fields: FIELDS,
            has_pattern_fields: &[],
            enum_mappings: &[],
        }),
        state: StateSchema {
            message_type: 901,
            key_field_number: 1,
            device_id_field_number: 0,
            fields: FIELDS,
        },
        list_entities: ListEntitiesSchema {
            message_type: 902,
            key_field_number: 2,
            name_field_number: 3,
            object_id_field_number: 1,
            device_id_field_number: 0,
            fields: &[],
            repeated_fields: &[],
        },
    };

    let registry = SchemaRegistry::new(&[GAUGE]).unwrap();
    let encoder = CommandEncoder::new(&registry);
    let decoder = MessageDecoder::new(&registry);

    let payload = encoder
        .encode("gauge", 1, &CommandFields::new().set("level", -1i32))
        .unwrap();
    // -1 travels as the five-byte varint of 0xFFFF_FFFF, not zig-zag
    assert_eq!(payload, [0x08, 0x01, 0x10, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);

    let decoded = decoder.decode(900, &payload).unwrap();
    assert_eq!(decoded.fields.get("level"), Some(Value::Int(-1)));

    assert_eq!(
        encoder
            .encode("gauge", 1, &CommandFields::new().set("level", i64::from(i32::MAX) + 1))
            .unwrap_err(),
        Error::InvalidValue {
            field: "level",
            expected: ValueType::Sint32
        }
    );
    assert!(registry.by_kind("switch").is_none());
}
