use super::*;

use std::io::BufReader;

use chrono::{TimeZone, Utc};
use num_bigint::BigInt;

use crate::{Decimal, Precision};

#[test]
fn read_cases() {
    for (input, expected) in [
        (
            include_str!("../../cases/log_event.ion"),
            include_str!("../../cases/log_event.json"),
        ),
        (
            include_str!("../../cases/config.ion"),
            include_str!("../../cases/config.json"),
        ),
    ] {
        let expected: serde_json::Value = serde_json::from_str(expected).unwrap();

        let actual = to_json(input).unwrap();

        assert_eq!(expected, serde_json::Value::Array(actual));
    }
}

#[test]
fn read_cases_from_a_buffered_reader() {
    let input = include_str!("../../cases/log_event.ion");

    // a tiny buffer makes sure values are split across refills
    let mut reader = Reader::from_reader(BufReader::with_capacity(3, input.as_bytes()));

    let mut actual = Vec::new();
    while reader.next() {
        actual.push(reader.to_json_value().unwrap());
    }
    assert!(reader.err().is_none());

    assert_eq!(to_json(input).unwrap(), actual);
}

#[test]
fn read_generated() {
    // debug builds are slow, so just run a handful of cases
    let iterations = {
        #[cfg(debug)]
        {
            100
        }

        #[cfg(not(debug))]
        {
            2000
        }
    };

    for _ in 0..iterations {
        // Check the reader against randomly generated documents
        // Fuzzing is good at finding inputs that fail, but rarely
        // finds large valid documents, so this checks the reader
        // always produces the right values for correct ones
        let (input, expected) = some::ion_document();

        match to_json(&input) {
            Ok(actual) => assert_eq!(vec![expected], actual, "reading `{}`", input),
            Err(e) => panic!("reading `{}`: {}", input, e),
        }
    }
}

#[test]
fn ignore_values() {
    let mut reader = Reader::from_str("{skip: me, please: true}\n[skip, me, please]\nfoo");

    next(&mut reader, Type::Struct);
    next(&mut reader, Type::List);
    symbol(&mut reader, "foo");

    end(&mut reader);
}

#[test]
fn sexps() {
    for (input, expected) in [
        ("(\t)", &[] as &[&str]),
        ("(foo)", &["foo"]),
        ("(foo bar baz)", &["foo", "bar", "baz"]),
        ("(a+-b . c)", &["a", "+-", "b", ".", "c"]),
        ("(x::'y' z)", &["y", "z"]),
    ] {
        let mut reader = Reader::from_str(input);

        next(&mut reader, Type::Sexp);
        reader.step_in().unwrap();

        for expected in expected {
            symbol(&mut reader, expected);
        }
        end(&mut reader);

        reader.step_out().unwrap();
        end(&mut reader);
    }
}

#[test]
fn long_strings_in_sexps() {
    use serde_json::json;

    // adjacent long strings are one value, even inside an s-expression
    assert_eq!(
        vec![json!(["wxy"])],
        to_json("( '''w''' '''x''' '''y''' )").unwrap()
    );

    // an annotation keeps them apart
    assert_eq!(
        vec![json!(["w", "x", "y"])],
        to_json("( '''w''' _::'''x''' _::'''y''' )").unwrap()
    );
}

#[test]
fn structs() {
    for (input, expected) in [
        ("{\r\n}", &[] as &[(&str, &str)]),
        ("{foo: bar}", &[("foo", "bar")]),
        (
            "{foo: a, bar: b, baz: c}",
            &[("foo", "a"), ("bar", "b"), ("baz", "c")],
        ),
        (
            "{'quoted': a, \"string\": b, '''long''' '''string''': c}",
            &[("quoted", "a"), ("string", "b"), ("longstring", "c")],
        ),
        ("{null: a, true: b}", &[("null", "a"), ("true", "b")]),
    ] {
        let mut reader = Reader::from_str(input);

        next(&mut reader, Type::Struct);
        reader.step_in().unwrap();

        for (field, value) in expected {
            symbol(&mut reader, value);
            assert_eq!(Some(*field), reader.field_name());
        }
        end(&mut reader);

        reader.step_out().unwrap();
        end(&mut reader);
    }
}

#[test]
fn multiple_structs() {
    let mut reader = Reader::from_str("{} {} {}");

    for _ in 0..3 {
        next(&mut reader, Type::Struct);

        reader.step_in().unwrap();
        assert!(!reader.next());
        reader.step_out().unwrap();
    }

    end(&mut reader);
}

#[test]
fn null_structs() {
    let mut reader = Reader::from_str("null.struct {}");

    next(&mut reader, Type::Struct);
    assert!(reader.is_null());
    assert!(reader.step_in().is_err());

    next(&mut reader, Type::Struct);
    assert!(!reader.is_null());

    end(&mut reader);
}

#[test]
fn lists() {
    for (input, expected) in [
        ("[    ]", &[] as &[&str]),
        ("[foo]", &["foo"]),
        ("[foo, bar, baz]", &["foo", "bar", "baz"]),
        ("[foo,bar/* , */,baz]", &["foo", "bar", "baz"]),
    ] {
        let mut reader = Reader::from_str(input);

        next(&mut reader, Type::List);
        reader.step_in().unwrap();

        for expected in expected {
            symbol(&mut reader, expected);
        }
        end(&mut reader);

        reader.step_out().unwrap();
        end(&mut reader);
    }
}

#[test]
fn step_out_skips_the_rest_of_a_container() {
    let mut reader = Reader::from_str("[a, [b, c], {d: (e f)}, g] (h i) {j: k, l: m} n");

    next(&mut reader, Type::List);
    reader.step_in().unwrap();
    symbol(&mut reader, "a");
    next(&mut reader, Type::List);
    reader.step_out().unwrap();

    // a symbol was read ahead while looking for annotations
    next(&mut reader, Type::Sexp);
    reader.step_in().unwrap();
    symbol(&mut reader, "h");
    reader.step_out().unwrap();

    next(&mut reader, Type::Struct);
    reader.step_in().unwrap();
    reader.step_out().unwrap();

    symbol(&mut reader, "n");
    end(&mut reader);
}

#[test]
fn step_out_after_the_end() {
    let mut reader = Reader::from_str("[[1], 2] 3");

    next(&mut reader, Type::List);
    reader.step_in().unwrap();

    next(&mut reader, Type::List);
    reader.step_in().unwrap();
    next(&mut reader, Type::Int);
    assert!(!reader.next());
    reader.step_out().unwrap();

    next(&mut reader, Type::Int);
    assert_eq!(2, reader.int_value().unwrap());
    assert!(!reader.next());
    reader.step_out().unwrap();

    next(&mut reader, Type::Int);
    assert_eq!(3, reader.int_value().unwrap());
    end(&mut reader);
}

#[test]
fn depth() {
    let mut reader = Reader::from_str("[(({}))]");

    for (depth, ty) in [Type::List, Type::Sexp, Type::Sexp, Type::Struct]
        .into_iter()
        .enumerate()
    {
        assert_eq!(depth, reader.depth());

        next(&mut reader, ty);
        reader.step_in().unwrap();
    }

    assert_eq!(4, reader.depth());

    for depth in (0..4).rev() {
        reader.step_out().unwrap();
        assert_eq!(depth, reader.depth());
    }

    end(&mut reader);
}

#[test]
fn clobs() {
    for (input, expected) in [
        ("{{\"\"}}", &b""[..]),
        ("{{ \"hello world\" }}", b"hello world"),
        ("{{'''hello world'''}}", b"hello world"),
        ("{{'''hello'''\n'''world'''}}", b"helloworld"),
        ("{{\"\\x00\\xff\"}}", b"\x00\xff"),
    ] {
        let mut reader = Reader::from_str(input);

        next(&mut reader, Type::Clob);
        assert_eq!(expected, reader.byte_value().unwrap(), "{}", input);

        end(&mut reader);
    }
}

#[test]
fn blobs() {
    for (input, expected) in [
        ("{{}}", &b""[..]),
        ("{{AA==}}", b"\0"),
        ("{{  SGVsbG8g\r\nV29ybGQ=  }}", b"Hello World"),
    ] {
        let mut reader = Reader::from_str(input);

        next(&mut reader, Type::Blob);
        assert_eq!(expected, reader.byte_value().unwrap(), "{}", input);

        end(&mut reader);
    }
}

#[test]
fn timestamps() {
    let expected = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();

    for (input, precision) in [
        ("2001T", Precision::Year),
        ("2001-01T", Precision::Month),
        ("2001-01-01", Precision::Day),
        ("2001-01-01T", Precision::Day),
        ("2001-01-01T00:00Z", Precision::Minute),
        ("2001-01-01T00:00:00Z", Precision::Second),
        ("2001-01-01T00:00:00.000Z", Precision::Fraction),
        ("2001-01-01T00:00:00.000+00:00", Precision::Fraction),
    ] {
        let mut reader = Reader::from_str(input);

        next(&mut reader, Type::Timestamp);
        assert_eq!(expected, reader.time_value().unwrap(), "{}", input);
        assert_eq!(precision, reader.timestamp_value().unwrap().precision());

        end(&mut reader);
    }
}

#[test]
fn timestamps_with_offsets() {
    let mut reader = Reader::from_str("2001-01-01T01:30+01:30 2000-12-31T23:59:59.5-00:00");

    next(&mut reader, Type::Timestamp);
    assert_eq!(
        Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap(),
        reader.time_value().unwrap()
    );

    next(&mut reader, Type::Timestamp);
    let ts = reader.timestamp_value().unwrap();
    assert_eq!(None, ts.offset());
    assert_eq!(500_000_000, ts.nanosecond());
    assert_eq!("2000-12-31T23:59:59.5-00:00", ts.to_string());

    end(&mut reader);
}

#[test]
fn decimals() {
    for (input, expected) in [
        ("123.", "123"),
        ("123.0", "123"),
        ("123.456", "123.456"),
        ("123d2", "12300"),
        ("123d+2", "12300"),
        ("123d-2", "1.23"),
        ("-0.0", "0"),
    ] {
        let mut reader = Reader::from_str(input);

        next(&mut reader, Type::Decimal);

        let expected: Decimal = expected.parse().unwrap();
        assert_eq!(expected, reader.decimal_value().unwrap(), "{}", input);

        end(&mut reader);
    }
}

#[test]
fn floats() {
    for (input, expected) in [
        ("1e100\n", 1e100),
        ("1.2e+0", 1.2),
        ("-123.456e-78", -123.456e-78),
        ("+inf", f64::INFINITY),
        ("-inf", f64::NEG_INFINITY),
        ("1_000.5e1", 10005.0),
    ] {
        let mut reader = Reader::from_str(input);

        next(&mut reader, Type::Float);
        assert_eq!(expected, reader.float_value().unwrap(), "{}", input);

        end(&mut reader);
    }
}

#[test]
fn ints() {
    for (input, expected) in [
        ("0", 0),
        ("12_345", 12345),
        ("-1_2_3_4_5", -12345),
        ("0b00_0101", 5),
        ("-0b00_0101", -5),
        ("0x01_02_0e_0F", 0x01020e0f),
        ("-0x0102_0e0F", -0x01020e0f),
    ] {
        let mut reader = Reader::from_str(input);

        next(&mut reader, Type::Int);
        assert_eq!(expected, reader.int_value().unwrap(), "{}", input);

        end(&mut reader);
    }

    for (input, expected) in [
        ("0x123_FFFF_FFFF", 0x123FFFFFFFFi64),
        ("-0x123_FFFF_FFFF", -0x123FFFFFFFF),
    ] {
        let mut reader = Reader::from_str(input);

        next(&mut reader, Type::Int);
        assert_eq!(expected, reader.int64_value().unwrap(), "{}", input);
        assert!(reader.int_value().is_err());

        end(&mut reader);
    }

    for (input, expected) in [
        ("0xEFFF_FFFF_FFFF_FFFF", "EFFFFFFFFFFFFFFF"),
        ("0xFFFF_FFFF_FFFF_FFFF", "FFFFFFFFFFFFFFFF"),
        ("-0x1_FFFF_FFFF_FFFF_FFFF", "-1FFFFFFFFFFFFFFFF"),
    ] {
        let mut reader = Reader::from_str(input);

        next(&mut reader, Type::Int);

        let expected = BigInt::parse_bytes(expected.as_bytes(), 16).unwrap();
        assert_eq!(expected, reader.big_int_value().unwrap(), "{}", input);
        assert!(reader.int64_value().is_err());

        end(&mut reader);
    }
}

#[test]
fn null_ints() {
    let mut reader = Reader::from_str("null.int");

    next(&mut reader, Type::Int);
    assert!(reader.is_null());
    assert_eq!(0, reader.int_value().unwrap());
    assert_eq!(BigInt::from(0), reader.big_int_value().unwrap());

    end(&mut reader);
}

#[test]
fn strings() {
    let mut reader =
        Reader::from_str(r#"foo::"bar" "baz" 'a'::'b'::'''beep''' '''boop''' null.string"#);

    for (annotations, expected) in [
        (&["foo"] as &[&str], "bar"),
        (&[], "baz"),
        (&["a", "b"], "beepboop"),
        (&[], ""),
    ] {
        next(&mut reader, Type::String);

        assert_eq!(annotations, reader.type_annotations());
        assert_eq!(expected, reader.string_value().unwrap());
    }

    end(&mut reader);
}

#[test]
fn symbols() {
    let mut reader = Reader::from_str("'null'::foo bar a::b::'baz' null.symbol");

    for (annotations, expected) in [
        (&["null"] as &[&str], "foo"),
        (&[], "bar"),
        (&["a", "b"], "baz"),
        (&[], ""),
    ] {
        next(&mut reader, Type::Symbol);

        assert_eq!(annotations, reader.type_annotations());
        assert_eq!(expected, reader.string_value().unwrap());
    }

    end(&mut reader);
}

#[test]
fn special_symbols() {
    let mut reader = Reader::from_str("null\nnull.struct\ntrue\nfalse\nnan 'true' null.null");

    next(&mut reader, Type::Null);
    assert!(reader.is_null());

    next(&mut reader, Type::Struct);
    assert!(reader.is_null());

    next(&mut reader, Type::Bool);
    assert!(reader.bool_value().unwrap());

    next(&mut reader, Type::Bool);
    assert!(!reader.bool_value().unwrap());

    next(&mut reader, Type::Float);
    assert!(reader.float_value().unwrap().is_nan());

    symbol(&mut reader, "true");

    next(&mut reader, Type::Null);
    assert!(reader.is_null());

    end(&mut reader);
}

#[test]
fn annotations_on_containers() {
    let mut reader = Reader::from_str("a::b::[c::1] d :: { e: f::g::( h ) }");

    next(&mut reader, Type::List);
    assert_eq!(&["a", "b"], reader.type_annotations());

    reader.step_in().unwrap();
    next(&mut reader, Type::Int);
    assert_eq!(&["c"], reader.type_annotations());
    reader.step_out().unwrap();

    next(&mut reader, Type::Struct);
    assert_eq!(&["d"], reader.type_annotations());

    reader.step_in().unwrap();
    next(&mut reader, Type::Sexp);
    assert_eq!(Some("e"), reader.field_name());
    assert_eq!(&["f", "g"], reader.type_annotations());
    reader.step_out().unwrap();

    end(&mut reader);
}

#[test]
fn comments_are_whitespace() {
    let mut reader = Reader::from_str("/* a */[/**/1//x\n,// y\n2/* , */]//");

    next(&mut reader, Type::List);
    reader.step_in().unwrap();

    next(&mut reader, Type::Int);
    assert_eq!(1, reader.int_value().unwrap());
    next(&mut reader, Type::Int);
    assert_eq!(2, reader.int_value().unwrap());

    end(&mut reader);
    reader.step_out().unwrap();
    end(&mut reader);
}
