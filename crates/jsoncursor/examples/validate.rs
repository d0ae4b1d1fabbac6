//! Checks JSON files for validity, reporting the first fault per file.
//!
//! ```bash
//! cargo run -p jsoncursor --example validate -- file.json...
//! ```

use std::{env, fs, process::ExitCode};

use jsoncursor::{NodeKind, Parser};

/// Walks the whole document without decoding anything.
fn drain(parser: &mut Parser<'_>) {
    let mut depth = 0usize;
    loop {
        match parser.node() {
            NodeKind::None => {
                if depth == 0 {
                    return;
                }
                parser.end();
                depth -= 1;
                parser.next();
            }
            NodeKind::Object => {
                parser.start_object();
                depth += 1;
            }
            NodeKind::Array => {
                parser.start_array();
                depth += 1;
            }
            _ => {
                parser.next();
            }
        }
    }
}

fn main() -> ExitCode {
    let files: Vec<_> = env::args().skip(1).collect();
    if files.is_empty() {
        eprintln!("usage: validate FILE...");
        return ExitCode::FAILURE;
    }

    let mut ok = true;
    for path in &files {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(err) => {
                eprintln!("{path}: error opening file: {err}");
                ok = false;
                continue;
            }
        };
        let mut parser = Parser::new(data.as_slice());
        drain(&mut parser);
        if let Some(error) = parser.error() {
            eprintln!("{path}: {error}");
            ok = false;
        }
    }

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
