//! `structpatch`: apply a patch set to a JSON document.
//!
//! Usage:
//!   structpatch '<patch-array-json>'
//!
//! The document is read from stdin. The patch set is the first argument.
//! Set `RUST_LOG=structpatch=debug` to trace application on stderr.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use structpatch::cli::apply_json_patch;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let Some(patch) = std::env::args().nth(1) else {
        eprintln!("First argument must be a patch array.");
        return ExitCode::FAILURE;
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match apply_json_patch(buf.trim(), &patch) {
        Ok(result) => {
            if let Err(e) = writeln!(io::stdout(), "{result}") {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
