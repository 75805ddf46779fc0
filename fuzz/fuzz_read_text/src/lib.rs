use std::io::BufReader;

use ion_text::{
    de::{ReadSource, SliceSource},
    Options, Reader,
};

pub fn de(input: &[u8]) {
    // Make sure we don't panic when reading documents
    let mut reader = Reader::with_options(SliceSource::new(input), Options { max_depth: 16 });

    let mut values = Vec::new();
    while reader.next() {
        match reader.to_json_value() {
            Ok(value) => values.push(value),
            // values that can't be converted aren't interesting
            Err(_) => return,
        }
    }

    if reader.err().is_none() {
        // If the document was read then reading it a byte at a time must agree
        let mut buffered = Reader::with_options(
            ReadSource::new(BufReader::with_capacity(1, input)),
            Options { max_depth: 16 },
        );

        for value in values {
            assert!(buffered.next());
            assert_eq!(value, buffered.to_json_value().expect("failed to convert"));
        }

        assert!(!buffered.next());
        assert!(buffered.err().is_none());
    }
}
