/*!
Splitting Ion text into tokens.

The tokenizer works a byte at a time, looking a few bytes ahead when it needs to
decide what kind of token it's looking at. Tokens with a payload, like strings and numbers,
are left _pending_ until they're read with one of the `read_*` methods. If a pending
payload isn't read then it's skipped when moving to the next token.

Containers are skipped iteratively with a stack of the closing tokens they expect,
so deeply nested input can't overflow the call stack.
*/

use std::mem;

use super::{cursor::Cursor, Sign, SliceSource, Source, Token};

use crate::{
    error::{Error, Result},
    text::{is_digit, is_identifier_start, is_operator_char, is_stop_char, is_whitespace},
};

mod number;
mod text;

/**
The contents of a blob or clob.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lob {
    /**
    The base64 text of a blob, with any whitespace removed.
    */
    Blob(String),
    /**
    The unescaped bytes of a clob.
    */
    Clob(Vec<u8>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Idle,
    Value(Token),
}

/**
A pull-based tokenizer over Ion text.
*/
#[derive(Debug)]
pub struct Tokenizer<S> {
    cursor: Cursor<S>,
    token: Token,
    pending: Pending,
    /**
    A `+` or `-` consumed while looking for `+inf` or `-inf` that begins the pending operator.
    */
    operator_lead: Option<u8>,
}

impl<'input> Tokenizer<SliceSource<'input>> {
    #[inline]
    pub fn from_slice(input: &'input [u8]) -> Self {
        Tokenizer::new(SliceSource::new(input))
    }
}

impl<S: Source> Tokenizer<S> {
    #[inline]
    pub fn new(source: S) -> Self {
        Tokenizer {
            cursor: Cursor::new(source),
            token: Token::Eof,
            pending: Pending::Idle,
            operator_lead: None,
        }
    }

    /**
    The current token.

    Before the first call to [`Tokenizer::next`] this is [`Token::Eof`].
    */
    #[inline]
    pub fn token(&self) -> Token {
        self.token
    }

    /**
    Whether the current token's payload hasn't been read or skipped yet.
    */
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self.pending, Pending::Value(_))
    }

    /**
    Advance to the next token, skipping the payload of the current one if it hasn't been read.
    */
    pub fn next(&mut self) -> Result<Token> {
        if let Pending::Value(token) = self.pending {
            self.skip_value(token)?;
        }

        let c = self.skip_whitespace()?;
        let token = self.dispatch(c)?;

        self.token = token;
        self.pending = if token.has_payload() {
            Pending::Value(token)
        } else {
            Pending::Idle
        };

        Ok(token)
    }

    /**
    Decide what kind of token starts with the given byte.

    The byte has already been consumed. Tokens with a payload leave the cursor wherever
    their payload reader expects to start from.
    */
    fn dispatch(&mut self, c: Option<u8>) -> Result<Token> {
        let c = match c {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        match c {
            // comments have already been skipped, so this is an operator
            b'/' => {
                self.cursor.unread(Some(c));
                Ok(Token::Operator)
            }
            b':' => {
                if self.cursor.peek()? == Some(b':') {
                    self.cursor.read()?;
                    Ok(Token::DoubleColon)
                } else {
                    Ok(Token::Colon)
                }
            }
            b'{' => {
                if self.cursor.peek()? == Some(b'{') {
                    self.cursor.read()?;
                    Ok(Token::OpenDoubleBrace)
                } else {
                    Ok(Token::OpenBrace)
                }
            }
            b'}' => Ok(Token::CloseBrace),
            b'[' => Ok(Token::OpenBracket),
            b']' => Ok(Token::CloseBracket),
            b'(' => Ok(Token::OpenParen),
            b')' => Ok(Token::CloseParen),
            b',' => Ok(Token::Comma),
            b'.' => match self.cursor.peek()? {
                Some(next) if is_operator_char(next) => {
                    self.cursor.unread(Some(c));
                    Ok(Token::Operator)
                }
                _ => Ok(Token::Dot),
            },
            b'\'' => {
                if self.is_triple_quote()? {
                    Ok(Token::LongString)
                } else {
                    Ok(Token::QuotedSymbol)
                }
            }
            b'+' => {
                if self.is_inf()? {
                    Ok(Token::PlusInf)
                } else {
                    self.operator_lead = Some(c);
                    Ok(Token::Operator)
                }
            }
            b'-' => match self.cursor.peek()? {
                Some(digit) if is_digit(digit) => {
                    self.cursor.read()?;

                    let token = self.scan_numeric(digit, Sign::Negative)?;
                    if token == Token::Timestamp {
                        // there's no such thing as a negative timestamp
                        unexpected!(Some(digit));
                    }

                    self.cursor.unread(Some(digit));
                    Ok(token)
                }
                _ => {
                    if self.is_inf()? {
                        Ok(Token::MinusInf)
                    } else {
                        self.operator_lead = Some(c);
                        Ok(Token::Operator)
                    }
                }
            },
            b'"' => Ok(Token::String),
            c if is_operator_char(c) => {
                self.cursor.unread(Some(c));
                Ok(Token::Operator)
            }
            c if is_identifier_start(c) => {
                self.cursor.unread(Some(c));
                Ok(Token::Symbol)
            }
            c if is_digit(c) => {
                let token = self.scan_numeric(c, Sign::Positive)?;

                self.cursor.unread(Some(c));
                Ok(token)
            }
            c => unexpected!(Some(c)),
        }
    }

    /**
    Take the pending token so its payload can be read.

    # Panics

    This method panics if there's no pending payload to read.
    */
    #[inline]
    fn take_pending(&mut self) -> Token {
        match mem::replace(&mut self.pending, Pending::Idle) {
            Pending::Value(token) => token,
            Pending::Idle => panic!(
                "there's no pending token to read (current token is {})",
                self.token
            ),
        }
    }

    /**
    Mark the pending container as entered, so its contents are tokenized rather than skipped.
    */
    #[inline]
    pub fn enter_container(&mut self) {
        test_assert!(matches!(self.pending, Pending::Value(token) if token.closer().is_some()));

        self.pending = Pending::Idle;
    }

    /**
    Skip the rest of a container, up to and including the given closing token.

    If `include_current` is set then the current token is treated as the first
    one to skip, otherwise skipping starts from the next token.
    */
    pub fn skip_container(&mut self, closer: Token, include_current: bool) -> Result<()> {
        let mut closers = vec![closer];

        let mut token = if include_current {
            self.token
        } else {
            self.next()?
        };

        loop {
            match token {
                Token::Eof => unexpected!(None),
                Token::OpenParen | Token::OpenBrace | Token::OpenBracket => {
                    // skip the contents here rather than through `next`
                    self.pending = Pending::Idle;
                    closers.extend(token.closer());
                }
                Token::CloseParen | Token::CloseBrace | Token::CloseBracket => {
                    if closers.pop() != Some(token) {
                        return Err(Error::UnexpectedToken(token));
                    }

                    if closers.is_empty() {
                        return Ok(());
                    }
                }
                // any payload is skipped by `next`
                _ => (),
            }

            token = self.next()?;
        }
    }

    /**
    Skip the payload of a token that wasn't read.
    */
    fn skip_value(&mut self, token: Token) -> Result<()> {
        match token {
            Token::Number(_) => {
                self.read_number()?;
            }
            Token::OpenDoubleBrace => {
                self.read_lob()?;
            }
            Token::OpenParen | Token::OpenBrace | Token::OpenBracket => {
                self.pending = Pending::Idle;

                if let Some(closer) = token.closer() {
                    self.skip_container(closer, false)?;
                }
            }
            _ => {
                self.read_value()?;
            }
        }

        Ok(())
    }

    /**
    Read the text of the pending token.

    This works for symbols, operators, strings, binary and hex ints, and timestamps.
    Numbers are read with [`Tokenizer::read_number`] and lobs with [`Tokenizer::read_lob`].

    # Panics

    This method panics if there's no pending payload, or if it's one that
    needs a different reader.
    */
    pub fn read_value(&mut self) -> Result<String> {
        match self.take_pending() {
            Token::Symbol => self.read_identifier(),
            Token::QuotedSymbol => self.read_quoted_symbol(),
            Token::Operator => self.read_operator(),
            Token::String => self.read_string(),
            Token::LongString => self.read_long_string(),
            Token::Binary(sign) => self.read_binary(sign),
            Token::Hex(sign) => self.read_hex(sign),
            Token::Timestamp => self.read_timestamp(),
            token => panic!("can't read the value of a {} token as text", token),
        }
    }

    /**
    Skip whitespace and comments, returning the first byte after them.
    */
    fn skip_whitespace(&mut self) -> Result<Option<u8>> {
        loop {
            let c = self.cursor.read()?;

            match c {
                Some(c) if is_whitespace(c) => continue,
                Some(b'/') => match self.cursor.peek()? {
                    Some(b'/') => {
                        self.cursor.read()?;
                        self.skip_line_comment()?;
                    }
                    Some(b'*') => {
                        self.cursor.read()?;
                        self.skip_block_comment()?;
                    }
                    _ => return Ok(c),
                },
                c => return Ok(c),
            }
        }
    }

    /**
    Skip whitespace inside a lob, where comments aren't allowed.
    */
    fn skip_lob_whitespace(&mut self) -> Result<Option<u8>> {
        loop {
            match self.cursor.read()? {
                Some(c) if is_whitespace(c) => continue,
                c => return Ok(c),
            }
        }
    }

    fn skip_line_comment(&mut self) -> Result<()> {
        loop {
            match self.cursor.read()? {
                Some(b'\n') | None => return Ok(()),
                _ => continue,
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<()> {
        loop {
            match self.cursor.read()? {
                Some(b'*') => {
                    if self.cursor.peek()? == Some(b'/') {
                        self.cursor.read()?;
                        return Ok(());
                    }
                }
                Some(_) => continue,
                None => unexpected!(None),
            }
        }
    }

    /**
    Whether the next two bytes start a comment.
    */
    #[inline]
    fn is_comment_start(&mut self) -> Result<bool> {
        let cs = self.cursor.peek_n(2)?;

        Ok(matches!(*cs, [b'/', b'/'] | [b'/', b'*']))
    }

    /**
    Whether a byte that's just been read can end an unquoted value.

    This includes the start of a comment, so it may peek at the byte after a `/`.
    */
    #[inline]
    fn is_stop(&mut self, c: Option<u8>) -> Result<bool> {
        match c {
            None => Ok(true),
            Some(c) if is_stop_char(c) => Ok(true),
            Some(b'/') => Ok(matches!(self.cursor.peek()?, Some(b'/') | Some(b'*'))),
            Some(_) => Ok(false),
        }
    }

    /**
    Check that an unquoted value ended at a stop and push the stop back.
    */
    #[inline]
    fn finish_unquoted(&mut self, c: Option<u8>) -> Result<()> {
        if !self.is_stop(c)? {
            unexpected!(c);
        }

        self.cursor.unread(c);
        Ok(())
    }

    /**
    Whether the `'` just read begins a `'''`, consuming the other two quotes if it does.
    */
    fn is_triple_quote(&mut self) -> Result<bool> {
        if *self.cursor.peek_n(2)? == *b"''" {
            self.cursor.skip_n(2)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /**
    Whether the sign just read begins `+inf` or `-inf`, consuming the `inf` if it does.
    */
    fn is_inf(&mut self) -> Result<bool> {
        let cs = self.cursor.peek_n(5)?;

        if cs.len() < 3 || cs[..3] != *b"inf" {
            return Ok(false);
        }

        let terminated = match cs.get(3) {
            None => true,
            Some(b'/') => matches!(cs.get(4), Some(b'/') | Some(b'*')),
            Some(c) => is_stop_char(*c),
        };

        if terminated {
            self.cursor.skip_n(3)?;
        }

        Ok(terminated)
    }

    /**
    Work out what kind of number starts with the given digit by looking at the next few bytes.

    Binary and hex ints and timestamps can be told apart up front, anything else is
    decided when it's read.
    */
    fn scan_numeric(&mut self, c: u8, sign: Sign) -> Result<Token> {
        let cs = self.cursor.peek_n(4)?;

        if c == b'0' {
            match cs.first() {
                Some(b'b') | Some(b'B') => return Ok(Token::Binary(sign)),
                Some(b'x') | Some(b'X') => return Ok(Token::Hex(sign)),
                _ => (),
            }
        }

        if let [y1, y2, y3, b'-' | b'T'] = *cs {
            if [y1, y2, y3].iter().all(|c| is_digit(*c)) {
                return Ok(Token::Timestamp);
            }
        }

        Ok(Token::Number(sign))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::value::Type;

    fn tokens(input: &str) -> Vec<Token> {
        let mut tokenizer = Tokenizer::from_slice(input.as_bytes());
        let mut tokens = Vec::new();

        loop {
            match tokenizer.next().expect("failed to tokenize") {
                Token::Eof => return tokens,
                token => {
                    if token.closer().is_some() {
                        tokenizer.enter_container();
                    }

                    tokens.push(token);
                }
            }
        }
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            vec![
                Token::OpenBrace,
                Token::Symbol,
                Token::Colon,
                Token::Symbol,
                Token::DoubleColon,
                Token::OpenBracket,
                Token::Number(Sign::Positive),
                Token::Comma,
                Token::OpenParen,
                Token::Dot,
                Token::CloseParen,
                Token::CloseBracket,
                Token::CloseBrace,
            ],
            tokens("{a: b::[1, ( . )]}")
        );
    }

    #[test]
    fn skips_comments() {
        assert_eq!(
            vec![Token::Symbol, Token::Number(Sign::Positive), Token::String],
            tokens("a // line\n /* block * / */ 1/* x */\"s\" // trailing")
        );
    }

    #[test]
    fn numeric_kinds() {
        assert_eq!(
            vec![
                Token::Number(Sign::Positive),
                Token::Number(Sign::Negative),
                Token::Binary(Sign::Positive),
                Token::Hex(Sign::Negative),
                Token::Timestamp,
                Token::Timestamp,
                Token::PlusInf,
                Token::MinusInf,
            ],
            tokens("123 -1.5 0b101 -0xFF 2001T 2001-01-01 +inf -inf")
        );
    }

    #[test]
    fn inf_needs_a_stop() {
        let mut tokenizer = Tokenizer::from_slice(b"(+inf/* c */ +infinity -inf)");

        assert_eq!(Token::OpenParen, tokenizer.next().unwrap());
        tokenizer.enter_container();
        assert_eq!(Token::PlusInf, tokenizer.next().unwrap());

        assert_eq!(Token::Operator, tokenizer.next().unwrap());
        assert_eq!("+", tokenizer.read_value().unwrap());
        assert_eq!(Token::Symbol, tokenizer.next().unwrap());
        assert_eq!("infinity", tokenizer.read_value().unwrap());

        assert_eq!(Token::MinusInf, tokenizer.next().unwrap());
        assert_eq!(Token::CloseParen, tokenizer.next().unwrap());
        assert_eq!(Token::Eof, tokenizer.next().unwrap());
    }

    #[test]
    fn operators() {
        let mut tokenizer = Tokenizer::from_slice(b"(a<=b -c ...//x\n + .)");

        let mut read = Vec::new();
        loop {
            match tokenizer.next().unwrap() {
                Token::Operator | Token::Symbol => read.push(tokenizer.read_value().unwrap()),
                Token::Dot => read.push(".".to_owned()),
                Token::OpenParen => tokenizer.enter_container(),
                Token::Eof => break,
                _ => (),
            }
        }

        assert_eq!(vec!["a", "<=", "b", "-", "c", "...", "+", "."], read);
    }

    #[test]
    fn negative_timestamps_are_rejected() {
        let mut tokenizer = Tokenizer::from_slice(b"-2001-01-01");

        assert!(tokenizer.next().is_err());
    }

    #[test]
    fn unread_payloads_are_skipped() {
        let mut tokenizer =
            Tokenizer::from_slice(b"\"a]\" '''b)''' {{ \"c}\" }} [1, [\"]\"], {d: (e)}] f");

        let mut tokens = Vec::new();
        while tokenizer.next().unwrap() != Token::Eof {
            tokens.push(tokenizer.token());
        }

        assert_eq!(
            vec![
                Token::String,
                Token::LongString,
                Token::OpenDoubleBrace,
                Token::OpenBracket,
                Token::Symbol,
            ],
            tokens
        );
    }

    #[test]
    fn skip_container_leaves_cursor_after_closer() {
        let mut tokenizer = Tokenizer::from_slice(b"[a, (b [c]) {d: '''e]'''}, {{ZQ==}}] g");

        assert_eq!(Token::OpenBracket, tokenizer.next().unwrap());
        tokenizer.enter_container();
        assert_eq!(Token::Symbol, tokenizer.next().unwrap());

        tokenizer.skip_container(Token::CloseBracket, false).unwrap();

        assert_eq!(Token::Symbol, tokenizer.next().unwrap());
        assert_eq!("g", tokenizer.read_value().unwrap());
    }

    #[test]
    fn skip_container_rejects_mismatched_closers() {
        let mut tokenizer = Tokenizer::from_slice(b"[a, (b]) c");

        assert_eq!(Token::OpenBracket, tokenizer.next().unwrap());
        tokenizer.enter_container();

        assert!(tokenizer.skip_container(Token::CloseBracket, false).is_err());
    }

    #[test]
    fn skip_container_from_the_current_token() {
        let mut tokenizer = Tokenizer::from_slice(b"(a) b");

        assert_eq!(Token::OpenParen, tokenizer.next().unwrap());
        tokenizer.enter_container();
        assert_eq!(Token::Symbol, tokenizer.next().unwrap());
        assert_eq!("a", tokenizer.read_value().unwrap());
        assert_eq!(Token::CloseParen, tokenizer.next().unwrap());

        tokenizer.skip_container(Token::CloseParen, true).unwrap();

        assert_eq!(Token::Symbol, tokenizer.next().unwrap());
    }

    #[test]
    fn null_types() {
        let mut tokenizer = Tokenizer::from_slice(b"null.struct null .int null.float");

        assert_eq!(Token::Symbol, tokenizer.next().unwrap());
        assert_eq!("null", tokenizer.read_value().unwrap());
        assert_eq!(Some(Type::Struct), tokenizer.read_null_type().unwrap());

        assert_eq!(Token::Symbol, tokenizer.next().unwrap());
        assert_eq!("null", tokenizer.read_value().unwrap());
        assert_eq!(None, tokenizer.read_null_type().unwrap());

        assert_eq!(Token::Dot, tokenizer.next().unwrap());
        assert_eq!(Token::Symbol, tokenizer.next().unwrap());
        assert_eq!("int", tokenizer.read_value().unwrap());

        assert_eq!(Token::Symbol, tokenizer.next().unwrap());
        assert_eq!("null", tokenizer.read_value().unwrap());
        assert_eq!(Some(Type::Float), tokenizer.read_null_type().unwrap());
    }

    #[test]
    fn unknown_null_type() {
        let mut tokenizer = Tokenizer::from_slice(b"null.what");

        assert_eq!(Token::Symbol, tokenizer.next().unwrap());
        assert_eq!("null", tokenizer.read_value().unwrap());
        assert!(tokenizer.read_null_type().is_err());
    }

    #[test]
    #[should_panic]
    fn read_value_without_a_payload() {
        let mut tokenizer = Tokenizer::from_slice(b",");

        assert_eq!(Token::Comma, tokenizer.next().unwrap());
        let _ = tokenizer.read_value();
    }

    #[test]
    fn unexpected_bytes() {
        for input in ["\\", "#", "\u{e9}", "\"unterminated", "'''unterminated", "/* open"] {
            let mut tokenizer = Tokenizer::from_slice(input.as_bytes());

            let result = tokenizer.next().and_then(|token| match token {
                Token::Operator | Token::String | Token::LongString => {
                    tokenizer.read_value().map(|_| token)
                }
                token => Ok(token),
            });

            // `#` is a valid operator, everything else fails
            if input == "#" {
                assert_eq!(Token::Operator, result.unwrap());
            } else {
                assert!(result.is_err(), "{:?} should fail", input);
            }
        }
    }
}
