use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use ucpack_frame::{
    EndMarkerRecovery, FrameConfig, DEFAULT_CAPACITY, DEFAULT_END_MARKER, DEFAULT_START_MARKER,
};

use crate::exit::{frame_error, CliError, CliResult};
use crate::output::OutputFormat;

pub mod crc;
pub mod decode;
pub mod pack;
pub mod shapes;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Frame a command and its values.
    Pack(PackArgs),
    /// Deframe a byte stream and print each valid packet.
    Decode(DecodeArgs),
    /// Compute the CRC-8/MAXIM of hex bytes.
    Crc(CrcArgs),
    /// List the built-in payload shapes.
    Shapes(ShapesArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, frame: &FrameArgs, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Pack(args) => pack::run(args, &frame.to_config()?, format),
        Command::Decode(args) => decode::run(args, &frame.to_config()?, format),
        Command::Crc(args) => crc::run(args, format),
        Command::Shapes(args) => shapes::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Framing options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct FrameArgs {
    /// Start marker: a literal character, 0x-prefixed hex, or a decimal of two or more digits.
    #[arg(long, value_name = "BYTE", env = "UCPACK_START_MARKER", global = true, value_parser = parse_marker)]
    pub start_marker: Option<u8>,

    /// End marker: a literal character, 0x-prefixed hex, or a decimal of two or more digits.
    #[arg(long, value_name = "BYTE", env = "UCPACK_END_MARKER", global = true, value_parser = parse_marker)]
    pub end_marker: Option<u8>,

    /// Ingest buffer capacity in bytes.
    #[arg(long, value_name = "BYTES", env = "UCPACK_CAPACITY", global = true)]
    pub capacity: Option<usize>,

    /// What to do when a frame's end marker is wrong.
    #[arg(long, value_name = "POLICY", global = true)]
    pub on_bad_end: Option<Recovery>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Recovery {
    /// Skip the frame's start marker and resynchronize.
    DropStart,
    /// Keep the buffer as is until eviction clears it.
    Hold,
}

impl FrameArgs {
    pub fn to_config(&self) -> CliResult<FrameConfig> {
        let config = FrameConfig {
            start_marker: self.start_marker.unwrap_or(DEFAULT_START_MARKER),
            end_marker: self.end_marker.unwrap_or(DEFAULT_END_MARKER),
            capacity: self.capacity.unwrap_or(DEFAULT_CAPACITY),
            end_marker_recovery: match self.on_bad_end {
                Some(Recovery::Hold) => EndMarkerRecovery::Hold,
                Some(Recovery::DropStart) | None => EndMarkerRecovery::DropStart,
            },
        };
        config
            .validate()
            .map_err(|err| frame_error("invalid framing options", err))?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct PackArgs {
    /// Payload shape, e.g. C1B, C3F, C2B1F.
    pub shape: String,
    /// Command code (0-255).
    #[arg(long, short = 'c')]
    pub code: u8,
    /// One value per shape field, in order.
    #[arg(allow_negative_numbers = true)]
    pub values: Vec<String>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input file. Reads stdin when omitted or `-`.
    pub file: Option<PathBuf>,
    /// Treat input as hex text instead of raw bytes.
    #[arg(long)]
    pub hex: bool,
    /// Decode every packet's data with this shape.
    #[arg(long)]
    pub shape: Option<String>,
}

#[derive(Args, Debug)]
pub struct CrcArgs {
    /// Bytes as hex, e.g. `05c8` or `"05 c8"`.
    pub hex: String,
}

#[derive(Args, Debug, Default)]
pub struct ShapesArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Parse a marker byte given as `A`, `0x41`, or `65`. A lone digit is taken
/// as a literal character.
pub fn parse_marker(input: &str) -> Result<u8, String> {
    let input = input.trim();
    if let Some(hex) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        return u8::from_str_radix(hex, 16).map_err(|err| format!("invalid hex byte '{input}': {err}"));
    }
    if input.chars().all(|c| c.is_ascii_digit()) && input.len() > 1 {
        return input
            .parse::<u8>()
            .map_err(|err| format!("invalid byte '{input}': {err}"));
    }
    match input.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(format!(
            "'{input}' is not a single character, 0x-prefixed hex, or decimal byte"
        )),
    }
}

/// Parse hex text, ignoring whitespace, `:` and `,` separators.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, String> {
    let digits: String = input
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && *c != ':' && *c != ',')
        .collect();
    hex::decode(&digits).map_err(|err| format!("invalid hex input: {err}"))
}

pub fn resolve_shape(name: &str) -> CliResult<&'static ucpack_frame::Shape> {
    ucpack_frame::Shape::from_name(name).ok_or_else(|| {
        CliError::usage(format!(
            "unknown shape '{name}' (run `ucpack shapes` for the list)"
        ))
    })
}
