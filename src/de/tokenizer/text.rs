use super::{Lob, Source, Token, Tokenizer};

use crate::{
    error::{Error, Result},
    std_ext::char::{is_lead_surrogate, try_from_utf16_surrogate_pair},
    text::{from_hex, is_identifier_part, is_operator_char, unescape_char},
    value::Type,
};

impl<S: Source> Tokenizer<S> {
    /**
    Read the rest of an unquoted symbol.
    */
    pub(super) fn read_identifier(&mut self) -> Result<String> {
        let mut w = String::new();

        while let Some(c) = self.cursor.peek()? {
            if !is_identifier_part(c) {
                break;
            }

            self.cursor.read()?;
            w.push(c as char);
        }

        Ok(w)
    }

    /**
    Read an operator symbol.

    An operator stops before the start of a comment, so `+//` is a `+` followed by a comment.
    */
    pub(super) fn read_operator(&mut self) -> Result<String> {
        let mut w = String::new();

        if let Some(lead) = self.operator_lead.take() {
            w.push(lead as char);
        }

        while let Some(c) = self.cursor.peek()? {
            if !is_operator_char(c) || (c == b'/' && self.is_comment_start()?) {
                break;
            }

            self.cursor.read()?;
            w.push(c as char);
        }

        Ok(w)
    }

    pub(super) fn read_quoted_symbol(&mut self) -> Result<String> {
        let mut w = Vec::new();
        self.read_quoted(b'\'', false, &mut w)?;

        into_string(w)
    }

    pub(super) fn read_string(&mut self) -> Result<String> {
        let mut w = Vec::new();
        self.read_quoted(b'"', false, &mut w)?;

        into_string(w)
    }

    pub(super) fn read_long_string(&mut self) -> Result<String> {
        let mut w = Vec::new();
        self.read_long(false, &mut w)?;

        into_string(w)
    }

    /**
    Read the `.type` part of a typed null, directly after a `null` symbol that's just been read.

    Returns `None` if the `null` isn't followed by a `.`.
    */
    pub fn read_null_type(&mut self) -> Result<Option<Type>> {
        if self.cursor.peek()? != Some(b'.') {
            return Ok(None);
        }
        self.cursor.read()?;

        let name = self.read_identifier()?;

        match Type::from_null_name(&name) {
            Some(ty) => Ok(Some(ty)),
            None => Err(Error::UnknownNullType(name)),
        }
    }

    /**
    Read the contents of a blob or clob, up to and including its closing `}}`.

    # Panics

    This method panics if the pending token isn't a [`Token::OpenDoubleBrace`].
    */
    pub fn read_lob(&mut self) -> Result<Lob> {
        match self.take_pending() {
            Token::OpenDoubleBrace => (),
            token => panic!("can't read a {} token as a lob", token),
        }

        let c = self.skip_lob_whitespace()?;

        match c {
            // {{ "short clob" }}
            Some(b'"') => {
                let mut w = Vec::new();
                self.read_quoted(b'"', true, &mut w)?;
                self.read_lob_end()?;

                Ok(Lob::Clob(w))
            }
            // {{ '''long''' '''clob''' }}
            Some(b'\'') => {
                if !self.is_triple_quote()? {
                    unexpected!(c);
                }

                let mut w = Vec::new();
                self.read_long(true, &mut w)?;
                self.read_lob_end()?;

                Ok(Lob::Clob(w))
            }
            // {{ YmxvYg== }}
            mut c => {
                let mut w = String::new();

                loop {
                    match c {
                        Some(b'}') => {
                            match self.cursor.read()? {
                                Some(b'}') => return Ok(Lob::Blob(w)),
                                c => unexpected!(c),
                            }
                        }
                        Some(b) if is_base64(b) => w.push(b as char),
                        c => unexpected!(c),
                    }

                    c = self.skip_lob_whitespace()?;
                }
            }
        }
    }

    fn read_lob_end(&mut self) -> Result<()> {
        match self.skip_lob_whitespace()? {
            Some(b'}') => (),
            c => unexpected!(c),
        }

        match self.cursor.read()? {
            Some(b'}') => Ok(()),
            c => unexpected!(c),
        }
    }

    /**
    Read up to a closing quote, which isn't included.

    Raw newlines aren't allowed, but escaped ones are line continuations.
    */
    fn read_quoted(&mut self, quote: u8, clob: bool, w: &mut Vec<u8>) -> Result<()> {
        loop {
            match self.cursor.read()? {
                Some(c) if c == quote => return Ok(()),
                Some(b'\\') => self.read_escape(clob, w)?,
                Some(b'\n') => unexpected!(Some(b'\n')),
                Some(c) => w.push(c),
                None => unexpected!(None),
            }
        }
    }

    /**
    Read a long string after its opening `'''`, along with any long strings that follow it.

    Segments can be separated by whitespace, or comments outside of a clob.
    */
    fn read_long(&mut self, clob: bool, w: &mut Vec<u8>) -> Result<()> {
        loop {
            match self.cursor.read()? {
                Some(b'\'') => {
                    if !self.is_triple_quote()? {
                        w.push(b'\'');
                        continue;
                    }

                    let c = if clob {
                        self.skip_lob_whitespace()?
                    } else {
                        self.skip_whitespace()?
                    };

                    if c == Some(b'\'') && self.is_triple_quote()? {
                        continue;
                    }

                    self.cursor.unread(c);
                    return Ok(());
                }
                Some(b'\\') => self.read_escape(clob, w)?,
                Some(c) => w.push(c),
                None => unexpected!(None),
            }
        }
    }

    /**
    Read an escape sequence after its `\`.

    Inside a clob `\x` escapes are raw bytes and `\U` escapes aren't allowed.
    */
    fn read_escape(&mut self, clob: bool, w: &mut Vec<u8>) -> Result<()> {
        let c = match self.cursor.read()? {
            // line continuation
            Some(b'\n') => return Ok(()),
            Some(c) => c,
            None => unexpected!(None),
        };

        if let Some(unescaped) = unescape_char(c) {
            w.push(unescaped);
            return Ok(());
        }

        let code = match c {
            b'x' => {
                let code = self.read_hex_escape(2)?;

                if clob {
                    w.push(code as u8);
                    return Ok(());
                }

                code
            }
            b'u' => {
                let code = self.read_hex_escape(4)?;

                if !clob && is_lead_surrogate(code) {
                    return self.read_surrogate_pair(code, w);
                }

                code
            }
            b'U' if !clob => self.read_hex_escape(8)?,
            c => return Err(Error::BadEscape(c as char)),
        };

        push_char(code, w)
    }

    /**
    Read the trailing half of a UTF-16 surrogate pair, like `\uDE00` after `\uD83D`.
    */
    fn read_surrogate_pair(&mut self, high: u32, w: &mut Vec<u8>) -> Result<()> {
        if *self.cursor.peek_n(2)? != *b"\\u" {
            return Err(invalid_code_point(high));
        }
        self.cursor.skip_n(2)?;

        let low = self.read_hex_escape(4)?;

        match try_from_utf16_surrogate_pair(high, low) {
            Some(c) => {
                let mut buf = [0; 4];
                w.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());

                Ok(())
            }
            None => Err(invalid_code_point(low)),
        }
    }

    fn read_hex_escape(&mut self, len: usize) -> Result<u32> {
        let mut code = 0;

        for _ in 0..len {
            match self.cursor.read()? {
                Some(c) => match from_hex(c) {
                    Some(digit) => code = (code << 4) | digit,
                    None => unexpected!(Some(c)),
                },
                None => unexpected!(None),
            }
        }

        Ok(code)
    }
}

#[inline]
fn is_base64(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'+' | b'/' | b'=')
}

fn push_char(code: u32, w: &mut Vec<u8>) -> Result<()> {
    match char::from_u32(code) {
        Some(c) => {
            let mut buf = [0; 4];
            w.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());

            Ok(())
        }
        None => Err(invalid_code_point(code)),
    }
}

#[cold]
fn invalid_code_point(code: u32) -> Error {
    Error::invalid_literal(format!("\\u{:04X}", code), "not a unicode scalar value")
}

fn into_string(w: Vec<u8>) -> Result<String> {
    String::from_utf8(w).map_err(|err| {
        Error::invalid_literal(
            String::from_utf8_lossy(err.as_bytes()).into_owned(),
            "invalid UTF-8",
        )
    })
}
