//! Reads JSON files and reprints them to stdout, compact by default.
//!
//! ```bash
//! cargo run -p jsoncursor --example format -- --pretty file.json...
//! ```
//!
//! All I/O lives here; the parser and printer only ever see a loaded buffer
//! and an append callback.

use std::{env, fs, io::Write as _, process::ExitCode};

use jsoncursor::{NodeKind, Parser, Printer, PrinterOptions};

fn parse_and_print<F: FnMut(&str)>(parser: &mut Parser<'_>, printer: &mut Printer<F>) {
    loop {
        let name = parser.member_name();
        let name = name.as_deref();
        match parser.node() {
            NodeKind::None => {
                if printer.depth() == 0 {
                    return;
                }
                printer.end();
                parser.end();
                parser.next();
            }
            NodeKind::Null => {
                printer.add_null(name);
                parser.next();
            }
            NodeKind::Boolean => {
                let value = parser.boolean();
                printer.add_boolean(name, value);
                parser.next();
            }
            NodeKind::Number => {
                let value = parser.number();
                printer.add_number(name, value);
                parser.next();
            }
            NodeKind::String => {
                let value = parser.string();
                printer.add_string(name, &value);
                parser.next();
            }
            NodeKind::Object => {
                printer.start_object(name);
                parser.start_object();
            }
            NodeKind::Array => {
                printer.start_array(name);
                parser.start_array();
            }
        }
    }
}

fn main() -> ExitCode {
    let mut options = PrinterOptions::default();
    let mut files = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--pretty" | "-p" => options.pretty = true,
            "--ascii" => options.ascii = true,
            _ => files.push(arg),
        }
    }
    if files.is_empty() {
        eprintln!("usage: format [--pretty] [--ascii] FILE...");
        return ExitCode::FAILURE;
    }

    let stdout = std::io::stdout();
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

        let mut out = stdout.lock();
        let mut parser = Parser::new(data.as_slice());
        let mut printer = Printer::with_options(
            |chunk: &str| {
                let _ = out.write_all(chunk.as_bytes());
            },
            options,
        );
        parse_and_print(&mut parser, &mut printer);
        drop(printer);
        let _ = writeln!(out);

        if let Some(error) = parser.error() {
            eprintln!("{path}: error parsing file: {error}");
            ok = false;
        }
    }

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
