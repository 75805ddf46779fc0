use std::fmt::{self, Write};

use super::{is_digit, is_identifier_part, is_identifier_start, write_escaped_symbol};

/**
Whether a symbol has to be written in `'` quotes to read back as the same text.

Empty symbols, keywords, symbol references like `$10`, and anything that isn't a plain
identifier need quoting.
*/
pub fn symbol_needs_quoting(sym: &str) -> bool {
    if matches!(sym, "" | "null" | "true" | "false" | "nan") {
        return true;
    }

    if is_symbol_ref(sym) {
        return true;
    }

    let mut bytes = sym.bytes();

    match bytes.next() {
        Some(first) if is_identifier_start(first) => !bytes.all(is_identifier_part),
        _ => true,
    }
}

/**
Whether the text is a symbol reference: a `$` followed by one or more digits.
*/
pub fn is_symbol_ref(sym: &str) -> bool {
    match sym.as_bytes() {
        [b'$', digits @ ..] if !digits.is_empty() => digits.iter().all(|c| is_digit(*c)),
        _ => false,
    }
}

/**
Write a symbol, quoting and escaping it only if it needs to be.
*/
pub fn write_symbol(sym: &str, out: &mut impl Write) -> fmt::Result {
    if symbol_needs_quoting(sym) {
        out.write_char('\'')?;
        write_escaped_symbol(sym, out)?;
        out.write_char('\'')
    } else {
        out.write_str(sym)
    }
}
