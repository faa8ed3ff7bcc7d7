use std::io::{Cursor, Read};
use std::path::Path;

use ucpack_frame::{command_name, command_shape, FrameConfig, FrameError, Packet, PacketReader, Shape};

use crate::cmd::{parse_hex, resolve_shape, DecodeArgs};
use crate::exit::{frame_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{compact_hex, print_packets, value_json, OutputFormat, PacketOutput};

pub fn run(args: DecodeArgs, config: &FrameConfig, format: OutputFormat) -> CliResult<i32> {
    let shape = args.shape.as_deref().map(resolve_shape).transpose()?;
    let input = read_input(args.file.as_deref())?;
    let bytes = if args.hex {
        let text = String::from_utf8(input)
            .map_err(|_| CliError::invalid_data("hex input is not UTF-8"))?;
        parse_hex(&text).map_err(CliError::invalid_data)?
    } else {
        input
    };

    let packets = decode_all(&bytes, config, shape)?;
    if packets.is_empty() {
        return Err(CliError::invalid_data(format!(
            "no valid packets in {} bytes of input",
            bytes.len()
        )));
    }

    print_packets(&packets, format);
    if packets.iter().any(|p| p.error.is_some()) {
        return Ok(DATA_INVALID);
    }
    Ok(SUCCESS)
}

fn read_input(path: Option<&Path>) -> CliResult<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err)),
        _ => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .map_err(|err| io_error("failed reading stdin", err))?;
            Ok(buf)
        }
    }
}

fn decode_all(
    bytes: &[u8],
    config: &FrameConfig,
    shape: Option<&'static Shape>,
) -> CliResult<Vec<PacketOutput>> {
    let mut reader = PacketReader::with_config(Cursor::new(bytes), config.clone())
        .map_err(|err| frame_error("codec setup failed", err))?;

    let mut packets = Vec::new();
    loop {
        match reader.read_packet() {
            Ok(packet) => packets.push(describe(packets.len(), packet, shape)),
            Err(FrameError::ConnectionClosed) => break,
            Err(err) => return Err(frame_error("decode failed", err)),
        }
    }

    let leftover = reader.codec().buffered();
    if leftover > 0 {
        tracing::warn!(leftover, "input ended inside an incomplete frame");
    }
    tracing::debug!(packets = packets.len(), input = bytes.len(), "decode finished");
    Ok(packets)
}

fn describe(index: usize, packet: Packet, shape: Option<&'static Shape>) -> PacketOutput {
    let shape = shape.or_else(|| command_shape(packet.code));
    let (values, error) = match shape.map(|s| packet.values(s)) {
        Some(Ok(values)) => (Some(values.iter().map(value_json).collect()), None),
        Some(Err(err)) => (None, Some(err.to_string())),
        None => (None, None),
    };

    PacketOutput {
        schema_id: "ucpack/cli/v1/packet",
        index,
        code: packet.code,
        command: command_name(packet.code),
        length: packet.payload_len(),
        data: compact_hex(&packet.data),
        shape: shape.map(Shape::name),
        values,
        error,
        raw: packet.data.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use ucpack_frame::{shape, PacketCodec, TRACK};

    use super::*;

    fn config() -> FrameConfig {
        FrameConfig::default()
    }

    #[test]
    fn decodes_stream_with_noise() {
        let mut codec = PacketCodec::new(256).unwrap();
        let mut bytes = vec![0x00, 0x13];
        bytes.extend(codec.pack_c1b(5, 200));
        bytes.extend([0xEE, 0x23]);
        bytes.extend(codec.pack_c3f(TRACK, 1.0, 2.0, 3.0));

        let packets = decode_all(&bytes, &config(), None).unwrap();
        assert_eq!(packets.len(), 2);
        assert_eq!(packets[0].code, 5);
        assert_eq!(packets[0].data, "c8");
        assert!(packets[0].values.is_none());

        assert_eq!(packets[1].command, "TRACK");
        assert_eq!(packets[1].shape, Some("C3F"));
        assert_eq!(
            packets[1].values,
            Some(vec![
                serde_json::json!(1.0),
                serde_json::json!(2.0),
                serde_json::json!(3.0)
            ])
        );
    }

    #[test]
    fn explicit_shape_mismatch_is_reported_per_packet() {
        let mut codec = PacketCodec::new(256).unwrap();
        let bytes = codec.pack_c1b(7, 1).to_vec();

        let packets = decode_all(&bytes, &config(), Some(&shape::C1F)).unwrap();
        assert_eq!(packets.len(), 1);
        assert!(packets[0].values.is_none());
        assert!(packets[0]
            .error
            .as_deref()
            .is_some_and(|e| e.contains("C1F")));
    }

    #[test]
    fn truncated_input_yields_nothing() {
        let mut codec = PacketCodec::new(256).unwrap();
        let bytes = codec.pack_c2f(1, 1.0, 2.0).to_vec();

        let packets = decode_all(&bytes[..bytes.len() - 1], &config(), None).unwrap();
        assert!(packets.is_empty());
    }
}
