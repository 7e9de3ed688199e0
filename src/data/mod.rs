//! Data access layer for delivery log files.

mod jsonl_parser;

pub use jsonl_parser::parse_jsonl_file;
