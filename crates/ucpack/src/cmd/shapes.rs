use ucpack_frame::shape::ALL;
use ucpack_frame::FieldKind;

use crate::cmd::ShapesArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_shapes, OutputFormat, ShapeOutput, ShapesOutput};

pub fn run(_args: ShapesArgs, format: OutputFormat) -> CliResult<i32> {
    let out = ShapesOutput {
        schema_id: "ucpack/cli/v1/shapes",
        shapes: ALL
            .iter()
            .map(|shape| ShapeOutput {
                name: shape.name(),
                fields: shape.fields().iter().map(|k| FieldKind::name(*k)).collect(),
                payload_length: shape.payload_len(),
                frame_length: shape.frame_len(),
            })
            .collect(),
    };
    print_shapes(&out, format);
    Ok(SUCCESS)
}
