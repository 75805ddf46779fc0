use super::{Source, Token, Tokenizer};

use crate::{
    de::Sign,
    error::{Error, Result},
    text::{is_digit, is_hex_digit},
    value::Type,
};

impl<S: Source> Tokenizer<S> {
    /**
    Read the pending number and work out whether it's an int, float or decimal.

    Underscores between digits are dropped from the returned text.

    # Panics

    This method panics if the pending token isn't a [`Token::Number`].
    */
    pub fn read_number(&mut self) -> Result<(String, Type)> {
        let sign = match self.take_pending() {
            Token::Number(sign) => sign,
            token => panic!("can't read a {} token as a number", token),
        };

        let mut w = String::new();
        if sign.is_negative() {
            w.push('-');
        }

        let first = self.cursor.read()?;
        let start = w.len();

        let mut c = self.read_digits(first, &mut w)?;

        if first == Some(b'0') && w.len() - start > 1 {
            return Err(Error::invalid_literal(w, "leading zeros"));
        }

        let mut ty = Type::Int;

        if c == Some(b'.') {
            w.push('.');
            ty = Type::Decimal;

            let next = self.cursor.read()?;
            c = self.read_digits(next, &mut w)?;
        }

        match c {
            Some(e @ (b'e' | b'E')) => {
                w.push(e as char);
                ty = Type::Float;

                c = self.read_exponent(&mut w)?;
            }
            Some(d @ (b'd' | b'D')) => {
                w.push(d as char);
                ty = Type::Decimal;

                c = self.read_exponent(&mut w)?;
            }
            _ => (),
        }

        self.finish_unquoted(c)?;

        Ok((w, ty))
    }

    fn read_exponent(&mut self, w: &mut String) -> Result<Option<u8>> {
        let mut c = self.cursor.read()?;

        if let Some(sign @ (b'+' | b'-')) = c {
            w.push(sign as char);
            c = self.cursor.read()?;
        }

        match c {
            Some(digit) if is_digit(digit) => self.read_digits(c, w),
            c => unexpected!(c),
        }
    }

    #[inline]
    fn read_digits(&mut self, c: Option<u8>, w: &mut String) -> Result<Option<u8>> {
        self.read_radix_digits(c, is_digit, w)
    }

    /**
    Read a run of digits starting with `c`, returning the first byte after them.

    A `_` is only allowed between two digits, and isn't written to the output.
    */
    fn read_radix_digits(
        &mut self,
        mut c: Option<u8>,
        is_radix_digit: fn(u8) -> bool,
        w: &mut String,
    ) -> Result<Option<u8>> {
        let mut prev_digit = false;

        loop {
            match c {
                Some(b'_') if prev_digit => match self.cursor.peek()? {
                    Some(next) if is_radix_digit(next) => prev_digit = false,
                    _ => unexpected!(c),
                },
                Some(b'_') => unexpected!(c),
                Some(digit) if is_radix_digit(digit) => {
                    w.push(digit as char);
                    prev_digit = true;
                }
                c => return Ok(c),
            }

            c = self.cursor.read()?;
        }
    }

    pub(super) fn read_binary(&mut self, sign: Sign) -> Result<String> {
        self.read_radix(
            sign,
            |c| matches!(c, b'b' | b'B'),
            |c| matches!(c, b'0' | b'1'),
        )
    }

    pub(super) fn read_hex(&mut self, sign: Sign) -> Result<String> {
        self.read_radix(sign, |c| matches!(c, b'x' | b'X'), is_hex_digit)
    }

    /**
    Read an int with a radix prefix, like `-0x1F`.

    The sign and prefix are kept in the returned text.
    */
    fn read_radix(
        &mut self,
        sign: Sign,
        is_marker: fn(u8) -> bool,
        is_radix_digit: fn(u8) -> bool,
    ) -> Result<String> {
        let mut w = String::new();
        if sign.is_negative() {
            w.push('-');
        }

        match self.cursor.read()? {
            Some(b'0') => w.push('0'),
            c => unexpected!(c),
        }

        match self.cursor.read()? {
            Some(marker) if is_marker(marker) => w.push(marker as char),
            c => unexpected!(c),
        }

        let c = match self.cursor.read()? {
            Some(digit) if is_radix_digit(digit) => Some(digit),
            c => unexpected!(c),
        };

        let c = self.read_radix_digits(c, is_radix_digit, &mut w)?;
        self.finish_unquoted(c)?;

        Ok(w)
    }

    /**
    Read a timestamp.

    The timestamp's shape is checked here, but not whether its fields make up a real
    date and time.
    */
    pub(super) fn read_timestamp(&mut self) -> Result<String> {
        let mut w = String::new();

        // yyyyT
        let c = self.read_timestamp_digits(4, &mut w)?;
        if c == Some(b'T') {
            w.push('T');
            return self.finish_timestamp(w);
        }
        self.expect_timestamp(c, b'-', &mut w)?;

        // yyyy-mmT
        let c = self.read_timestamp_digits(2, &mut w)?;
        if c == Some(b'T') {
            w.push('T');
            return self.finish_timestamp(w);
        }
        self.expect_timestamp(c, b'-', &mut w)?;

        // yyyy-mm-dd
        let c = self.read_timestamp_digits(2, &mut w)?;
        if c != Some(b'T') {
            self.finish_unquoted(c)?;
            return Ok(w);
        }
        w.push('T');

        // yyyy-mm-ddT
        let c = match self.cursor.read()? {
            Some(digit) if is_digit(digit) => digit,
            c => {
                self.finish_unquoted(c)?;
                return Ok(w);
            }
        };
        w.push(c as char);

        // yyyy-mm-ddThh:mm
        let c = self.read_timestamp_digits(1, &mut w)?;
        self.expect_timestamp(c, b':', &mut w)?;
        let c = self.read_timestamp_digits(2, &mut w)?;

        if c != Some(b':') {
            let c = self.read_timestamp_offset(c, &mut w)?;
            self.finish_unquoted(c)?;
            return Ok(w);
        }
        w.push(':');

        // yyyy-mm-ddThh:mm:ss
        let mut c = self.read_timestamp_digits(2, &mut w)?;

        // yyyy-mm-ddThh:mm:ss.fff
        if c == Some(b'.') {
            w.push('.');

            c = match self.cursor.read()? {
                Some(digit) if is_digit(digit) => Some(digit),
                c => unexpected!(c),
            };

            while let Some(digit) = c.filter(|c| is_digit(*c)) {
                w.push(digit as char);
                c = self.cursor.read()?;
            }
        }

        let c = self.read_timestamp_offset(c, &mut w)?;
        self.finish_unquoted(c)?;

        Ok(w)
    }

    #[inline]
    fn finish_timestamp(&mut self, w: String) -> Result<String> {
        let c = self.cursor.read()?;
        self.finish_unquoted(c)?;

        Ok(w)
    }

    #[inline]
    fn expect_timestamp(&mut self, c: Option<u8>, expected: u8, w: &mut String) -> Result<()> {
        if c != Some(expected) {
            unexpected!(c);
        }

        w.push(expected as char);
        Ok(())
    }

    /**
    Read exactly `n` digits, returning the byte after them.
    */
    fn read_timestamp_digits(&mut self, n: usize, w: &mut String) -> Result<Option<u8>> {
        for _ in 0..n {
            match self.cursor.read()? {
                Some(digit) if is_digit(digit) => w.push(digit as char),
                c => unexpected!(c),
            }
        }

        self.cursor.read()
    }

    /**
    Read a `Z` or `+hh:mm` offset that starts with `c`, returning the byte after it.
    */
    fn read_timestamp_offset(&mut self, c: Option<u8>, w: &mut String) -> Result<Option<u8>> {
        match c {
            Some(z @ (b'Z' | b'z')) => {
                w.push(z as char);
                self.cursor.read()
            }
            Some(sign @ (b'+' | b'-')) => {
                w.push(sign as char);

                let c = self.read_timestamp_digits(2, w)?;
                self.expect_timestamp(c, b':', w)?;
                self.read_timestamp_digits(2, w)
            }
            c => unexpected!(c),
        }
    }
}
