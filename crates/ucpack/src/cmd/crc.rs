use ucpack_frame::crc8_maxim;

use crate::cmd::{parse_hex, CrcArgs};
use crate::exit::{CliError, CliResult, SUCCESS};
use crate::output::{print_crc, CrcOutput, OutputFormat};

pub fn run(args: CrcArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = parse_hex(&args.hex).map_err(CliError::usage)?;
    let value = crc8_maxim(&bytes);

    let out = CrcOutput {
        schema_id: "ucpack/cli/v1/crc",
        algorithm: "CRC-8/MAXIM",
        input_length: bytes.len(),
        crc: format!("0x{value:02X}"),
        value,
    };
    print_crc(&out, format);
    Ok(SUCCESS)
}
