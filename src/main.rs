//! Msglens CLI
//!
//! Analytics and reporting for message delivery logs.

mod aggregation;
mod cli;
mod commands;
mod data;
mod error;
mod models;
mod source;
mod window;


fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
