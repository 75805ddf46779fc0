use super::*;

use crate::text::{
    escape_char, is_symbol_ref, symbol_needs_quoting, write_escaped_string, write_symbol,
};

const TEXT: &[&str] = &[
    "",
    "plain",
    "with space",
    "quotes \" and '",
    "back\\slash",
    "tab\tnew\nline\r",
    "nul\0bell\x07",
    "壁 and 😄",
    "null",
    "true",
    "$10",
    "$ion",
    "_",
    "1abc",
    "a-b",
];

#[test]
fn escaped_strings_read_back() {
    for text in TEXT {
        let mut input = String::from("\"");
        write_escaped_string(text, &mut input).unwrap();
        input.push('"');

        let mut reader = Reader::from_str(&input);

        next(&mut reader, Type::String);
        assert_eq!(*text, reader.string_value().unwrap(), "{}", input);
        end(&mut reader);
    }
}

#[test]
fn symbols_read_back() {
    for text in TEXT {
        let mut input = String::new();
        write_symbol(text, &mut input).unwrap();

        // symbols are followed by something that could be an annotation marker
        input.push_str(" 1");

        let mut reader = Reader::from_str(&input);

        symbol(&mut reader, text);
        assert!(reader.type_annotations().is_empty());

        next(&mut reader, Type::Int);
        end(&mut reader);
    }
}

#[test]
fn symbols_that_need_quoting() {
    for (symbol, expected) in [
        ("", true),
        ("null", true),
        ("nan", true),
        ("$10", true),
        ("a b", true),
        ("1abc", true),
        ("a-b", true),
        ("abc", false),
        ("$ion", false),
        ("_1", false),
        ("nullable", false),
    ] {
        assert_eq!(expected, symbol_needs_quoting(symbol), "{}", symbol);
    }
}

#[test]
fn symbol_refs() {
    assert!(is_symbol_ref("$0"));
    assert!(is_symbol_ref("$123"));

    assert!(!is_symbol_ref("$"));
    assert!(!is_symbol_ref("$1a"));
    assert!(!is_symbol_ref("10"));
}

#[test]
fn escape_chars() {
    for (c, expected) in [
        ('\n', "\\n"),
        ('"', "\\\""),
        ('\x01', "\\x01"),
        ('\u{7f}', "\\x7F"),
        ('\u{2028}', "\\u2028"),
        ('\u{1F600}', "\\U0001F600"),
    ] {
        let mut escaped = String::new();
        escape_char(c, &mut escaped).unwrap();

        assert_eq!(expected, escaped);
    }
}
