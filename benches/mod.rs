#![cfg(unstable)]
#![feature(test)]
extern crate test;

use ion_text::{Reader, Token, Tokenizer, Type};

/**
Visit every value, stepping into containers and reading scalars.
*/
fn read_all(input: &[u8]) -> usize {
    let mut reader = Reader::from_slice(input);
    let mut count = 0;

    loop {
        while reader.next() {
            count += 1;

            match reader.ty() {
                Some(ty) if ty.is_container() && !reader.is_null() => {
                    reader.step_in().unwrap();
                    continue;
                }
                Some(Type::String) | Some(Type::Symbol) => {
                    test::black_box(reader.string_value().unwrap());
                }
                _ => (),
            }
        }

        if reader.depth() == 0 {
            assert!(reader.err().is_none());
            return count;
        }

        reader.step_out().unwrap();
    }
}

#[bench]
fn read_log_event_tokens(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.ion");

    b.bytes = input.len() as u64;
    b.iter(|| {
        let mut tokenizer = Tokenizer::from_slice(input);

        // payloads are skipped rather than read
        while tokenizer.next().unwrap() != Token::Eof {}
    })
}

#[bench]
fn read_log_event_values(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.ion");

    b.bytes = input.len() as u64;
    b.iter(|| read_all(input))
}

#[bench]
fn read_log_event_skip(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.ion");

    b.bytes = input.len() as u64;
    b.iter(|| {
        let mut reader = Reader::from_slice(input);
        while reader.next() {}
    })
}

#[bench]
fn read_log_event_sparse(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.ion");

    b.bytes = input.len() as u64;
    b.iter(|| {
        let mut reader = Reader::from_slice(input);

        reader.next();
        reader.step_in().unwrap();

        while reader.next() {
            if reader.field_name() == Some("@mt") {
                return reader.string_value().unwrap().to_owned();
            }
        }

        panic!("missing `@mt`");
    })
}

#[bench]
fn read_log_event_buffered(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.ion");

    b.bytes = input.len() as u64;
    b.iter(|| {
        let mut reader = Reader::from_reader(std::io::BufReader::new(&input[..]));
        while reader.next() {}
    })
}

#[bench]
#[cfg(feature = "serde_json")]
fn read_log_event_to_serde_json(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.ion");

    b.bytes = input.len() as u64;
    b.iter(|| {
        let mut reader = Reader::from_slice(input);
        let mut values = Vec::new();

        while reader.next() {
            values.push(reader.to_json_value().unwrap());
        }

        values
    })
}

#[bench]
fn read_config_values(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/config.ion");

    b.bytes = input.len() as u64;
    b.iter(|| read_all(input))
}

#[bench]
fn read_nested_skip(b: &mut test::Bencher) {
    let input = format!("{}{}", "[".repeat(10_000), "]".repeat(10_000));

    b.bytes = input.len() as u64;
    b.iter(|| {
        let mut reader = Reader::from_str(&input);
        while reader.next() {}
    })
}
