//! CSV reading utilities.

mod decode;
mod reader;

pub use decode::decode_bytes;
pub use reader::{RawRecord, RawTable, parse_raw_table, read_raw_table};
