//! Basic usage example for espwire
//!
//! Run with: cargo run --example basic_usage

use espwire::*;

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(" ")
}

fn main() -> Result<()> {
    println!("espwire Basic Usage Example");
    println!("===========================");

    let registry = SchemaRegistry::builtin()?;
    let encoder = CommandEncoder::new(&registry);
    let decoder = MessageDecoder::new(&registry);
    println!("Loaded {} entity kinds", registry.len());

    // Example 1: Switch command
    println!("\n1. Switch Command:");
    {
        let payload = encoder.encode("switch", 42, &CommandFields::new().set("state", true))?;
        println!("  Encoded {} bytes: {}", payload.len(), hex(&payload));

        let decoded = decoder.decode(msg_types::SWITCH_COMMAND_REQUEST, &payload)?;
        println!(
            "  Decoded: kind={}, key={:?}, state={:?}",
            decoded.kind,
            decoded.fields.key(),
            decoded.fields.get("state").and_then(|v| v.as_bool())
        );
    }

    // Example 2: Sparse update through the has-pattern
    println!("\n2. Climate Target Temperature Only:");
    {
        let fields = CommandFields::new().set("targetTemperature", 21.5f32);
        let payload = encoder.encode("climate", 7, &fields)?;
        println!("  Encoded {} bytes: {}", payload.len(), hex(&payload));

        let decoded = decoder.decode(msg_types::CLIMATE_COMMAND_REQUEST, &payload)?;
        for (name, value) in decoded.fields.iter() {
            println!("  {name} = {value:?} (flagged: {})", decoded.fields.has_flag(name));
        }
    }

    // Example 3: Enum tokens
    println!("\n3. Lock Command Tokens:");
    for token in ["lock", "unlock", "open", "explode"] {
        match encoder.encode("lock", 1, &CommandFields::new().set("command", token)) {
            Ok(payload) => println!("  {token:>8} -> {}", hex(&payload)),
            Err(e) => println!("  {token:>8} -> error: {e}"),
        }
    }

    // Example 4: Entity discovery with repeated options
    println!("\n4. Select Entity Listing:");
    {
        let mut payload = Vec::new();
        wire::put_tag(1, WireType::LengthDelimited, &mut payload);
        wire::put_length_delimited(b"hvac_mode", &mut payload);
        wire::put_tag(2, WireType::Fixed32, &mut payload);
        payload.extend_from_slice(&wire::encode_fixed32(0x0BAD_F00D));
        wire::put_tag(3, WireType::LengthDelimited, &mut payload);
        wire::put_length_delimited(b"HVAC Mode", &mut payload);
        for option in ["off", "heat", "cool"] {
            wire::put_tag(6, WireType::LengthDelimited, &mut payload);
            wire::put_length_delimited(option.as_bytes(), &mut payload);
        }

        let decoded = decoder.decode(msg_types::LIST_ENTITIES_SELECT_RESPONSE, &payload)?;
        println!(
            "  {} '{}' key={:#x}",
            decoded.kind,
            decoded.fields.get("name").and_then(|v| v.as_str()).unwrap_or("?"),
            decoded.fields.key().unwrap_or_default()
        );
        let options: Vec<_> = decoded
            .fields
            .get_repeated("options")
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        println!("  options: {options:?}");
    }

    // Example 5: Unknown and malformed traffic
    println!("\n5. Error Handling:");
    {
        let inputs: [(u32, &[u8]); 3] = [
            (4000, &[0x08, 0x01]),
            (msg_types::SENSOR_STATE_RESPONSE, &[0x08, 0x80]),
            (msg_types::TEXT_SENSOR_STATE_RESPONSE, &[0x12, 0x09, b'h', b'i']),
        ];
        for (message_type, payload) in inputs {
            match decoder.decode(message_type, payload) {
                Ok(decoded) => println!("  type {message_type}: decoded {}", decoded.kind),
                Err(e) if e.is_ignorable() => println!("  type {message_type}: skipped ({e})"),
                Err(e) => println!("  type {message_type}: dropped ({})", e.description()),
            }
        }
    }

    println!("\nAll examples completed successfully!");
    Ok(())
}
