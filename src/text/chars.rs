/*!
Character classes over single ASCII bytes.

Every byte is classified once into a set of flags in a lookup table so checks in the
tokenizer's hot loops are a single load and mask.
*/

const WHITESPACE: u8 = 1 << 0;
const STOP: u8 = 1 << 1;
const DIGIT: u8 = 1 << 2;
const HEX_DIGIT: u8 = 1 << 3;
const IDENTIFIER_START: u8 = 1 << 4;
const OPERATOR: u8 = 1 << 5;

static BYTE_CLASSES: [u8; 256] = {
    let mut table = [0; 256];

    let whitespace = b" \t\n\r\x0B\x0C";
    let mut i = 0;
    while i < whitespace.len() {
        table[whitespace[i] as usize] |= WHITESPACE | STOP;
        i += 1;
    }

    let stop = b"{}[](),\"'";
    let mut i = 0;
    while i < stop.len() {
        table[stop[i] as usize] |= STOP;
        i += 1;
    }

    let operator = b"!#%&*+-./;<=>?@^`|~";
    let mut i = 0;
    while i < operator.len() {
        table[operator[i] as usize] |= OPERATOR;
        i += 1;
    }

    let mut c = b'0';
    while c <= b'9' {
        table[c as usize] |= DIGIT | HEX_DIGIT;
        c += 1;
    }

    let mut c = b'a';
    while c <= b'z' {
        table[c as usize] |= IDENTIFIER_START;
        table[(c - b'a' + b'A') as usize] |= IDENTIFIER_START;
        if c <= b'f' {
            table[c as usize] |= HEX_DIGIT;
            table[(c - b'a' + b'A') as usize] |= HEX_DIGIT;
        }
        c += 1;
    }

    table[b'_' as usize] |= IDENTIFIER_START;
    table[b'$' as usize] |= IDENTIFIER_START;

    table
};

#[inline]
fn is(c: u8, class: u8) -> bool {
    BYTE_CLASSES[c as usize] & class != 0
}

/**
Whether the byte can begin an unquoted symbol: `a-z`, `A-Z`, `_` or `$`.
*/
#[inline]
pub fn is_identifier_start(c: u8) -> bool {
    is(c, IDENTIFIER_START)
}

/**
Whether the byte can continue an unquoted symbol.
*/
#[inline]
pub fn is_identifier_part(c: u8) -> bool {
    is(c, IDENTIFIER_START | DIGIT)
}

#[inline]
pub fn is_digit(c: u8) -> bool {
    is(c, DIGIT)
}

#[inline]
pub fn is_hex_digit(c: u8) -> bool {
    is(c, HEX_DIGIT)
}

/**
Whether the byte can be part of an operator symbol inside an s-expression.
*/
#[inline]
pub fn is_operator_char(c: u8) -> bool {
    is(c, OPERATOR)
}

/**
Whether the byte ends an unquoted value like a number, timestamp or keyword.

This doesn't consider comments, because spotting the start of one takes two bytes.
The tokenizer checks for those itself.
*/
#[inline]
pub fn is_stop_char(c: u8) -> bool {
    is(c, STOP)
}

#[inline]
pub fn is_whitespace(c: u8) -> bool {
    is(c, WHITESPACE)
}

/**
The value of a hex digit.
*/
#[inline]
pub fn from_hex(c: u8) -> Option<u32> {
    (c as char).to_digit(16)
}
