use alloc::{collections::BTreeMap, string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

use crate::{NodeKind, Parser, Printer, PrinterOptions};

// Minimal value tree for round-trip checks; the crate itself never builds one.
#[derive(Clone, Debug, PartialEq)]
enum Value {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        arbitrary_value(g, 2)
    }
}

fn arbitrary_value(g: &mut Gen, depth: usize) -> Value {
    let variants = if depth == 0 { 4 } else { 6 };
    match u8::arbitrary(g) % variants {
        0 => Value::Null,
        1 => Value::Boolean(bool::arbitrary(g)),
        2 => {
            let number = f64::arbitrary(g);
            Value::Number(if number.is_finite() { number } else { 0.0 })
        }
        3 => Value::String(String::arbitrary(g)),
        4 => {
            let len = usize::arbitrary(g) % 4;
            Value::Array((0..len).map(|_| arbitrary_value(g, depth - 1)).collect())
        }
        _ => {
            let len = usize::arbitrary(g) % 4;
            Value::Object(
                (0..len)
                    .map(|_| (String::arbitrary(g), arbitrary_value(g, depth - 1)))
                    .collect(),
            )
        }
    }
}

fn print_value<F: FnMut(&str)>(printer: &mut Printer<F>, name: Option<&str>, value: &Value) {
    match value {
        Value::Null => printer.add_null(name),
        Value::Boolean(v) => printer.add_boolean(name, *v),
        Value::Number(v) => printer.add_number(name, *v),
        Value::String(v) => printer.add_string(name, v),
        Value::Array(items) => {
            printer.start_array(name);
            for item in items {
                print_value(printer, None, item);
            }
            printer.end();
        }
        Value::Object(members) => {
            printer.start_object(name);
            for (key, item) in members {
                print_value(printer, Some(key), item);
            }
            printer.end();
        }
    }
}

fn print(value: &Value, options: PrinterOptions) -> String {
    let mut out = String::new();
    let mut printer = Printer::with_options(|chunk: &str| out.push_str(chunk), options);
    print_value(&mut printer, None, value);
    assert_eq!(printer.depth(), 0);
    drop(printer);
    out
}

fn read_value(parser: &mut Parser<'_>) -> Value {
    match parser.node() {
        NodeKind::Null => Value::Null,
        NodeKind::Boolean => Value::Boolean(parser.boolean()),
        NodeKind::Number => Value::Number(parser.number()),
        NodeKind::String => Value::String(parser.string()),
        NodeKind::Array => {
            parser.start_array();
            let mut items = Vec::new();
            while parser.node() != NodeKind::None {
                items.push(read_value(parser));
                if !parser.next() {
                    break;
                }
            }
            parser.end();
            Value::Array(items)
        }
        NodeKind::Object => {
            parser.start_object();
            let mut members = BTreeMap::new();
            while parser.node() != NodeKind::None {
                let name = parser.member_name().unwrap();
                members.insert(name, read_value(parser));
                if !parser.next() {
                    break;
                }
            }
            parser.end();
            Value::Object(members)
        }
        NodeKind::None => panic!("no value under the cursor"),
    }
}

fn parse(text: &str) -> Value {
    let mut parser = Parser::new(text);
    let value = read_value(&mut parser);
    assert!(!parser.next());
    assert!(parser.error().is_none(), "fault in {text:?}: {:?}", parser.error());
    value
}

#[quickcheck]
fn compact_output_reparses_to_the_same_values(value: Value) -> bool {
    parse(&print(&value, PrinterOptions::default())) == value
}

#[quickcheck]
fn pretty_output_reparses_to_the_same_values(value: Value) -> bool {
    let options = PrinterOptions {
        pretty: true,
        ..Default::default()
    };
    parse(&print(&value, options)) == value
}

#[quickcheck]
fn ascii_output_reparses_to_the_same_values(value: Value) -> bool {
    let options = PrinterOptions {
        ascii: true,
        ..Default::default()
    };
    parse(&print(&value, options)) == value
}

#[quickcheck]
fn whitespace_is_invariant(value: Value) -> bool {
    // pretty-print, reparse, compact-print: same text as compacting directly
    let options = PrinterOptions {
        pretty: true,
        ..Default::default()
    };
    let reparsed = parse(&print(&value, options));
    print(&reparsed, PrinterOptions::default()) == print(&value, PrinterOptions::default())
}

#[test]
fn integral_doubles_round_trip_exactly() {
    for text in ["0", "-0", "12345", "1e10", "9007199254740991"] {
        let mut parser = Parser::new(text);
        let value = parser.number();
        let reprinted = print(&Value::Number(value), PrinterOptions::default());
        let mut parser = Parser::new(&reprinted);
        assert_eq!(parser.number().to_bits(), value.to_bits(), "for {text}");
    }
}
