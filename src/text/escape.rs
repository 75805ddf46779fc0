use std::fmt::{self, Write};

/**
The character a simple single-character escape like `\n` stands for.

Returns `None` for the numeric escapes (`\x`, `\u`, `\U`), line continuations,
and anything that isn't an escape at all.
*/
#[inline]
pub fn unescape_char(c: u8) -> Option<u8> {
    Some(match c {
        b'0' => 0,
        b'a' => 0x07,
        b'b' => 0x08,
        b't' => b'\t',
        b'n' => b'\n',
        b'f' => 0x0c,
        b'r' => b'\r',
        b'v' => 0x0b,
        b'\'' => b'\'',
        b'"' => b'"',
        b'\\' => b'\\',
        b'?' => b'?',
        b'/' => b'/',
        _ => return None,
    })
}

/**
Write the escaped form of a character.

Characters with a short escape use it, any other control character is written as `\xHH`.
*/
pub fn escape_char(c: char, out: &mut impl Write) -> fmt::Result {
    let short = match c {
        '\0' => "\\0",
        '\x07' => "\\a",
        '\x08' => "\\b",
        '\t' => "\\t",
        '\n' => "\\n",
        '\x0c' => "\\f",
        '\r' => "\\r",
        '\x0b' => "\\v",
        '\'' => "\\'",
        '"' => "\\\"",
        '\\' => "\\\\",
        c => {
            const HEX: &[u8; 16] = b"0123456789ABCDEF";

            let c = c as u32;
            if c > 0xffff {
                return write!(out, "\\U{:08X}", c);
            }
            if c > 0xff {
                return write!(out, "\\u{:04X}", c);
            }

            out.write_str("\\x")?;
            out.write_char(HEX[(c as usize >> 4) & 0xf] as char)?;
            return out.write_char(HEX[c as usize & 0xf] as char);
        }
    };

    out.write_str(short)
}

/**
Write the contents of a `"` quoted string, escaping anything that needs it.

The surrounding quotes aren't written.
*/
pub fn write_escaped_string(s: &str, out: &mut impl Write) -> fmt::Result {
    write_escaped(s, '"', out)
}

/**
Write the contents of a `'` quoted symbol, escaping anything that needs it.

The surrounding quotes aren't written.
*/
pub fn write_escaped_symbol(s: &str, out: &mut impl Write) -> fmt::Result {
    write_escaped(s, '\'', out)
}

#[inline]
fn write_escaped(s: &str, quote: char, out: &mut impl Write) -> fmt::Result {
    // copy runs of characters that don't need escaping in one go
    let mut start = 0;

    for (i, c) in s.char_indices() {
        if c < ' ' || c == '\\' || c == quote {
            out.write_str(&s[start..i])?;
            escape_char(c, out)?;
            start = i + c.len_utf8();
        }
    }

    out.write_str(&s[start..])
}
