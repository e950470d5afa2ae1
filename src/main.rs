use clap::Parser;
use crtable::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    match commands::run(args) {
        Ok(stats) if stats.files_failed > 0 => {
            // Failures have already been reported by the command
            process::exit(1);
        }
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
