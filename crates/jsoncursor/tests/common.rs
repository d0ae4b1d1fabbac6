#![allow(missing_docs)]
#![allow(dead_code)]

use jsoncursor::{NodeKind, ParseError, Parser, Printer, PrinterOptions};

pub const RELEASES: &str = r#"[{"name":"4.14.0","commit":"abc"},{"name":"4.12.0"}]"#;

pub const KITCHEN_SINK: &str = r#"
{
    "name": "fixture",
    "version": 3,
    "active": true,
    "retired": false,
    "extra": null,
    "scores": [1, 2.5, -3, 1e2, 0],
    "nested": {
        "empty_object": {},
        "empty_array": [],
        "deep": [[{"x": [null]}]]
    },
    "text": {
        "plain": "hello",
        "escapes": "quote \" backslash \\ slash \/ controls \b\f\n\r\t",
        "accents": "héllo wörld",
        "music": "clef"
    }
}
"#;

/// Parse-and-reprint: walk the document, feeding every decoded value straight
/// into a printer, until the printer's depth returns to 0. Returns the output
/// and the parser's sticky fault, if any.
pub fn reprint(input: &str, options: PrinterOptions) -> (String, Option<ParseError>) {
    let mut out = String::new();
    let error;
    {
        let mut parser = Parser::new(input);
        let mut printer = Printer::with_options(|chunk: &str| out.push_str(chunk), options);
        loop {
            let name = parser.member_name();
            let name = name.as_deref();
            match parser.node() {
                NodeKind::None => {
                    if printer.depth() == 0 {
                        break;
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
        error = parser.error().cloned();
    }
    (out, error)
}

pub fn pretty() -> PrinterOptions {
    PrinterOptions {
        pretty: true,
        ..Default::default()
    }
}
