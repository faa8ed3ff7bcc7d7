use ucpack_frame::{FieldKind, FrameConfig, PacketCodec, Shape, Value};

use crate::cmd::{resolve_shape, PackArgs};
use crate::exit::{frame_error, CliError, CliResult, SUCCESS};
use crate::output::{compact_hex, print_packed, OutputFormat, PackedOutput};

pub fn run(args: PackArgs, config: &FrameConfig, format: OutputFormat) -> CliResult<i32> {
    let shape = resolve_shape(&args.shape)?;
    let values = parse_values(shape, &args.values)?;

    let mut codec = PacketCodec::with_config(config.clone())
        .map_err(|err| frame_error("codec setup failed", err))?;
    let bytes = codec
        .pack(args.code, shape, &values)
        .map_err(|err| frame_error("pack failed", err))?
        .to_vec();
    tracing::debug!(shape = shape.name(), code = args.code, len = bytes.len(), "packed frame");

    let out = PackedOutput {
        schema_id: "ucpack/cli/v1/packed-frame",
        shape: shape.name(),
        code: args.code,
        length: shape.payload_len(),
        frame: compact_hex(&bytes),
        bytes,
    };
    print_packed(&out, format);
    Ok(SUCCESS)
}

fn parse_values(shape: &Shape, raw: &[String]) -> CliResult<Vec<Value>> {
    if raw.len() != shape.fields().len() {
        return Err(CliError::usage(format!(
            "shape {} takes {} values ({}), got {}",
            shape.name(),
            shape.fields().len(),
            field_list(shape),
            raw.len()
        )));
    }

    shape
        .fields()
        .iter()
        .zip(raw)
        .enumerate()
        .map(|(index, (&kind, text))| {
            parse_value(kind, text).ok_or_else(|| {
                CliError::usage(format!("value {index} ('{text}') is not a valid {kind}"))
            })
        })
        .collect()
}

fn parse_value(kind: FieldKind, text: &str) -> Option<Value> {
    let text = text.trim();
    match kind {
        FieldKind::Byte => text.parse::<u8>().ok().map(Value::Byte),
        FieldKind::Int16 => text.parse::<i16>().ok().map(Value::Int16),
        FieldKind::Float32 => text.parse::<f32>().ok().map(Value::Float32),
    }
}

fn field_list(shape: &Shape) -> String {
    shape
        .fields()
        .iter()
        .map(|kind| kind.name())
        .collect::<Vec<_>>()
        .join(", ")
}
