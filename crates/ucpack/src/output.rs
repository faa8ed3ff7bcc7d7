use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use ucpack_frame::Value;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
pub struct PackedOutput {
    pub schema_id: &'static str,
    pub shape: &'static str,
    pub code: u8,
    pub length: usize,
    pub frame: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

pub fn print_packed(out: &PackedOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = new_table(vec!["SHAPE", "CODE", "LEN", "FRAME"]);
            table.add_row(vec![
                out.shape.to_string(),
                out.code.to_string(),
                out.length.to_string(),
                spaced_hex(&out.bytes),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{}", spaced_hex(&out.bytes)),
        OutputFormat::Raw => print_raw(&out.bytes),
    }
}

#[derive(Serialize)]
pub struct PacketOutput {
    pub schema_id: &'static str,
    pub index: usize,
    pub code: u8,
    pub command: &'static str,
    pub length: usize,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub raw: Vec<u8>,
}

pub fn print_packets(packets: &[PacketOutput], format: OutputFormat) {
    match format {
        OutputFormat::Json => packets.iter().for_each(print_json),
        OutputFormat::Table => {
            let mut table = new_table(vec!["#", "CODE", "COMMAND", "LEN", "DATA", "VALUES"]);
            for packet in packets {
                table.add_row(vec![
                    packet.index.to_string(),
                    format!("0x{:02X}", packet.code),
                    packet.command.to_string(),
                    packet.length.to_string(),
                    packet.data.clone(),
                    values_column(packet),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for packet in packets {
                println!(
                    "#{} code=0x{:02X} ({}) len={} data={} {}",
                    packet.index,
                    packet.code,
                    packet.command,
                    packet.length,
                    packet.data,
                    values_column(packet)
                );
            }
        }
        OutputFormat::Raw => {
            for packet in packets {
                print_raw(&packet.raw);
            }
        }
    }
}

fn values_column(packet: &PacketOutput) -> String {
    match (&packet.values, &packet.error) {
        (_, Some(err)) => format!("error: {err}"),
        (Some(values), None) => values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        (None, None) => String::new(),
    }
}

#[derive(Serialize)]
pub struct CrcOutput {
    pub schema_id: &'static str,
    pub algorithm: &'static str,
    pub input_length: usize,
    pub crc: String,
    #[serde(skip)]
    pub value: u8,
}

pub fn print_crc(out: &CrcOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = new_table(vec!["ALGORITHM", "BYTES", "CRC"]);
            table.add_row(vec![
                out.algorithm.to_string(),
                out.input_length.to_string(),
                out.crc.clone(),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{}", out.crc),
        OutputFormat::Raw => print_raw(&[out.value]),
    }
}

#[derive(Serialize)]
pub struct ShapeOutput {
    pub name: &'static str,
    pub fields: Vec<&'static str>,
    pub payload_length: usize,
    pub frame_length: usize,
}

#[derive(Serialize)]
pub struct ShapesOutput {
    pub schema_id: &'static str,
    pub shapes: Vec<ShapeOutput>,
}

pub fn print_shapes(out: &ShapesOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = new_table(vec!["SHAPE", "FIELDS", "LEN", "FRAME"]);
            for shape in &out.shapes {
                table.add_row(vec![
                    shape.name.to_string(),
                    shape.fields.join(" "),
                    shape.payload_length.to_string(),
                    shape.frame_length.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for shape in &out.shapes {
                println!(
                    "{:<6} len={:<3} frame={:<3} {}",
                    shape.name,
                    shape.payload_length,
                    shape.frame_length,
                    shape.fields.join(" ")
                );
            }
        }
    }
}

/// JSON form of a decoded field. Non-finite floats become `null`.
pub fn value_json(value: &Value) -> serde_json::Value {
    match *value {
        Value::Byte(b) => b.into(),
        Value::Int16(i) => i.into(),
        Value::Float32(f) => serde_json::Number::from_f64(f64::from(f))
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
    }
}

pub fn compact_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

pub fn spaced_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| hex::encode([*b]))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}
