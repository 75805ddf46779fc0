use std::{io::BufRead, mem};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, FixedOffset};
use num_bigint::BigInt;
use num_traits::Zero;

use super::{Lob, ReadSource, SliceSource, Source, Token, Tokenizer};

use crate::{
    error::{Error, Result},
    value::{Decimal, Timestamp, Type},
};

/**
Runtime options for a [`Reader`].
*/
#[derive(Debug, Clone)]
pub struct Options {
    /**
    The deepest containers can be nested before the reader fails.

    It makes sure degenerate inputs like `[[[[[[[[[[[[[[[[[[[[[[[[[..`
    can't be used to grow the reader's stack without bound.
    */
    pub max_depth: usize,
}

impl Options {
    pub const DEFAULT_MAX_DEPTH: usize = 96;
}

impl Default for Options {
    #[inline]
    fn default() -> Self {
        Options {
            max_depth: Options::DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Struct,
    List,
    Sexp,
}

impl Container {
    #[inline]
    fn from_type(ty: Type) -> Option<Self> {
        match ty {
            Type::Struct => Some(Container::Struct),
            Type::List => Some(Container::List),
            Type::Sexp => Some(Container::Sexp),
            _ => None,
        }
    }

    #[inline]
    fn closer(self) -> Token {
        match self {
            Container::Struct => Token::CloseBrace,
            Container::List => Token::CloseBracket,
            Container::Sexp => Token::CloseParen,
        }
    }

    /**
    Whether values in the container are separated by commas.
    */
    #[inline]
    fn is_separated(self) -> bool {
        !matches!(self, Container::Sexp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /**
    No values have been read yet.
    */
    Start,
    /**
    A value has been read, so a separator or the end is next.
    */
    AfterValue,
    /**
    The end has been read.
    */
    Done,
}

/**
An open container.
*/
#[derive(Debug, Clone, Copy)]
struct Frame {
    container: Container,
    state: State,
}

/**
The payload of a scalar value.

Numbers are kept as their (underscore-free) text and only parsed when they're asked for.
*/
#[derive(Debug, Clone, Default)]
enum Scalar {
    #[default]
    None,
    Text(String),
    Bytes(Vec<u8>),
    Bool(bool),
    Timestamp(Timestamp),
}

/**
The value the reader is positioned on.
*/
#[derive(Debug, Default)]
struct Current {
    ty: Option<Type>,
    null: bool,
    field_name: Option<String>,
    annotations: Vec<String>,
    scalar: Scalar,
}

impl Current {
    #[inline]
    fn clear(&mut self) {
        self.ty = None;
        self.null = false;
        self.field_name = None;
        self.annotations.clear();
        self.scalar = Scalar::None;
    }
}

/**
A pull-based reader over Ion text.

The reader walks through values one at a time with [`Reader::next`], stepping in and out of
containers with [`Reader::step_in`] and [`Reader::step_out`]. Containers that aren't stepped
into, and values that aren't read, are skipped without being materialized.
*/
#[derive(Debug)]
pub struct Reader<S> {
    tokenizer: Tokenizer<S>,
    options: Options,
    /**
    The state of the top level, outside any container.
    */
    top: State,
    frames: Vec<Frame>,
    current: Current,
    /**
    Whether the tokenizer's current token was read ahead and hasn't been used yet.

    This happens after a symbol, since it might have been an annotation.
    */
    lookahead: bool,
    /**
    The error that stopped the reader, if there is one.

    Once set it's never cleared.
    */
    err: Option<Error>,
}

impl<'input> Reader<SliceSource<'input>> {
    #[inline]
    pub fn from_slice(input: &'input [u8]) -> Self {
        Reader::new(SliceSource::new(input))
    }

    #[inline]
    pub fn from_str(input: &'input str) -> Self {
        Reader::from_slice(input.as_bytes())
    }
}

impl<R: BufRead> Reader<ReadSource<R>> {
    #[inline]
    pub fn from_reader(reader: R) -> Self {
        Reader::new(ReadSource::new(reader))
    }
}

impl<S: Source> Reader<S> {
    #[inline]
    pub fn new(source: S) -> Self {
        Reader::with_options(source, Options::default())
    }

    pub fn with_options(source: S, options: Options) -> Self {
        Reader {
            tokenizer: Tokenizer::new(source),
            options,
            top: State::Start,
            frames: Vec::new(),
            current: Current::default(),
            lookahead: false,
            err: None,
        }
    }

    /**
    Advance to the next value in the current container, or at the top level.

    Returns `false` at the end of the container or input, and if the reader has failed.
    Check [`Reader::err`] to tell the difference.

    An unquoted symbol is only known to be a value, rather than an annotation, once the
    token after it has been read. Malformed input in that token fails the reader before
    the symbol is returned.
    */
    pub fn next(&mut self) -> bool {
        if self.err.is_some() {
            return false;
        }

        self.current.clear();

        match self.advance() {
            Ok(found) => found,
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    /**
    Step into the container the reader is positioned on.

    The first value in the container is read by calling [`Reader::next`].
    */
    pub fn step_in(&mut self) -> Result<()> {
        self.check()?;

        let container = match self.current.ty {
            Some(ty) if !self.current.null => Container::from_type(ty),
            _ => None,
        };

        let container = match container {
            Some(container) => container,
            None => return Err(Error::StepIn(self.describe_current())),
        };

        if self.frames.len() >= self.options.max_depth {
            return Err(self.fail(Error::DepthLimit(self.options.max_depth)));
        }

        self.tokenizer.enter_container();
        self.frames.push(Frame {
            container,
            state: State::Start,
        });
        self.current.clear();

        log::trace!("stepped into {:?} at depth {}", container, self.frames.len());

        Ok(())
    }

    /**
    Step out of the current container.

    Any values left in the container are skipped. Afterwards the reader is positioned
    before the value following the container.
    */
    pub fn step_out(&mut self) -> Result<()> {
        self.check()?;

        let frame = match self.frames.last() {
            Some(frame) => *frame,
            None => return Err(Error::StepOut),
        };

        if frame.state != State::Done {
            log::trace!("skipping the rest of {:?}", frame.container);

            let include_current = mem::take(&mut self.lookahead);

            if let Err(err) = self
                .tokenizer
                .skip_container(frame.container.closer(), include_current)
            {
                return Err(self.fail(err));
            }
        }

        test_assert_eq!(frame.container.closer(), self.tokenizer.token());

        self.frames.pop();
        self.current.clear();

        log::trace!("stepped out of {:?} to depth {}", frame.container, self.frames.len());

        Ok(())
    }

    /**
    The error that stopped the reader, if it's failed.
    */
    #[inline]
    pub fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    /**
    The number of containers the reader is inside.
    */
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /**
    The type of the current value, or `None` if the reader isn't positioned on one.
    */
    #[inline]
    pub fn ty(&self) -> Option<Type> {
        self.current.ty
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.current.null
    }

    /**
    The field name of the current value, if it's inside a struct.
    */
    #[inline]
    pub fn field_name(&self) -> Option<&str> {
        self.current.field_name.as_deref()
    }

    /**
    The annotations on the current value, in the order they were written.
    */
    #[inline]
    pub fn type_annotations(&self) -> &[String] {
        &self.current.annotations
    }

    /**
    The text of the current string or symbol.
    */
    pub fn string_value(&self) -> Result<&str> {
        match self.scalar("string or symbol", |ty| {
            matches!(ty, Type::String | Type::Symbol)
        })? {
            Some(Scalar::Text(text)) => Ok(text),
            _ => Ok(""),
        }
    }

    /**
    The current int, if it fits in an `i32`.
    */
    pub fn int_value(&self) -> Result<i32> {
        self.narrow_int("i32")
    }

    /**
    The current int, if it fits in an `i64`.
    */
    pub fn int64_value(&self) -> Result<i64> {
        self.narrow_int("i64")
    }

    pub fn big_int_value(&self) -> Result<BigInt> {
        match self.scalar("int", |ty| ty == Type::Int)? {
            Some(Scalar::Text(text)) => parse_int(text),
            _ => Ok(BigInt::zero()),
        }
    }

    pub fn float_value(&self) -> Result<f64> {
        match self.scalar("float", |ty| ty == Type::Float)? {
            Some(Scalar::Text(text)) => parse_float(text),
            _ => Ok(0.0),
        }
    }

    pub fn decimal_value(&self) -> Result<Decimal> {
        match self.scalar("decimal", |ty| ty == Type::Decimal)? {
            Some(Scalar::Text(text)) => Decimal::parse(text),
            _ => Ok(Decimal::default()),
        }
    }

    pub fn timestamp_value(&self) -> Result<Timestamp> {
        match self.scalar("timestamp", |ty| ty == Type::Timestamp)? {
            Some(Scalar::Timestamp(ts)) => Ok(ts.clone()),
            _ => Ok(Timestamp::default()),
        }
    }

    /**
    The instant the current timestamp refers to.
    */
    pub fn time_value(&self) -> Result<DateTime<FixedOffset>> {
        Ok(self.timestamp_value()?.to_datetime())
    }

    pub fn bool_value(&self) -> Result<bool> {
        match self.scalar("bool", |ty| ty == Type::Bool)? {
            Some(Scalar::Bool(b)) => Ok(*b),
            _ => Ok(false),
        }
    }

    /**
    The bytes of the current blob or clob.
    */
    pub fn byte_value(&self) -> Result<&[u8]> {
        match self.scalar("blob or clob", |ty| matches!(ty, Type::Blob | Type::Clob))? {
            Some(Scalar::Bytes(bytes)) => Ok(bytes),
            _ => Ok(&[]),
        }
    }

    /**
    Get the payload of the current value if it's of the expected type.

    A null of the expected type has no payload.
    */
    #[inline]
    fn scalar(&self, expected: &'static str, is: impl Fn(Type) -> bool) -> Result<Option<&Scalar>> {
        match self.current.ty {
            None => Err(Error::NoValue),
            Some(ty) if is(ty) => Ok(if self.current.null {
                None
            } else {
                Some(&self.current.scalar)
            }),
            Some(found) => Err(Error::TypeMismatch { expected, found }),
        }
    }

    fn narrow_int<T>(&self, target: &'static str) -> Result<T>
    where
        T: for<'a> TryFrom<&'a BigInt>,
    {
        let value = self.big_int_value()?;

        T::try_from(&value).map_err(|_| Error::Range {
            literal: value.to_string(),
            target,
        })
    }

    #[inline]
    fn check(&self) -> Result<()> {
        match self.err {
            Some(ref err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /**
    Stop the reader with an error.
    */
    #[cold]
    fn fail(&mut self, err: Error) -> Error {
        log::debug!("failed to read Ion text: {}", err);

        self.current.clear();
        self.err = Some(err.clone());

        err
    }

    fn describe_current(&self) -> String {
        match self.current.ty {
            None => "nothing".to_owned(),
            Some(ty) if self.current.null => format!("null.{}", ty),
            Some(ty) => ty.to_string(),
        }
    }

    #[inline]
    fn state(&self) -> State {
        self.frames.last().map_or(self.top, |frame| frame.state)
    }

    #[inline]
    fn set_state(&mut self, state: State) {
        match self.frames.last_mut() {
            Some(frame) => frame.state = state,
            None => self.top = state,
        }
    }

    /**
    Get the next token, using the one that was read ahead if there is one.
    */
    #[inline]
    fn next_token(&mut self) -> Result<Token> {
        if mem::take(&mut self.lookahead) {
            Ok(self.tokenizer.token())
        } else {
            self.tokenizer.next()
        }
    }

    fn advance(&mut self) -> Result<bool> {
        let container = self.frames.last().map(|frame| frame.container);
        let state = self.state();

        if state == State::Done {
            return Ok(false);
        }

        let closer = container.map(Container::closer);
        let mut token = self.next_token()?;

        // the input can only end at the top level
        if closer.is_some() && token == Token::Eof {
            unexpected!(None);
        }

        // lists and structs need a comma between values
        if state == State::AfterValue && container.map_or(false, Container::is_separated) {
            if token == Token::Comma {
                token = self.next_token()?;

                if token == Token::Eof {
                    unexpected!(None);
                }

                // trailing commas aren't allowed
                if Some(token) == closer {
                    return Err(Error::UnexpectedToken(token));
                }
            } else if Some(token) != closer {
                return Err(Error::UnexpectedToken(token));
            }
        }

        match closer {
            None if token == Token::Eof => {
                self.set_state(State::Done);
                return Ok(false);
            }
            Some(closer) if token == closer => {
                self.set_state(State::Done);
                return Ok(false);
            }
            _ => (),
        }

        if container == Some(Container::Struct) {
            let name = match token {
                Token::Symbol | Token::QuotedSymbol | Token::String | Token::LongString => {
                    self.tokenizer.read_value()?
                }
                token => return Err(Error::UnexpectedToken(token)),
            };

            match self.next_token()? {
                Token::Colon => (),
                Token::Eof => unexpected!(None),
                token => return Err(Error::UnexpectedToken(token)),
            }

            self.current.field_name = Some(name);
            token = self.next_token()?;
        }

        self.read_annotated_value(token, container)?;
        self.set_state(State::AfterValue);

        Ok(true)
    }

    /**
    Read any annotations, followed by the value they're attached to.
    */
    fn read_annotated_value(&mut self, mut token: Token, container: Option<Container>) -> Result<()> {
        loop {
            let quoted = match token {
                Token::Symbol => false,
                Token::QuotedSymbol => true,
                token => return self.read_value(token, container),
            };

            let text = self.tokenizer.read_value()?;

            let null_type = if !quoted && text == "null" {
                self.tokenizer.read_null_type()?
            } else {
                None
            };

            // a symbol followed by `::` is an annotation
            if self.tokenizer.next()? == Token::DoubleColon {
                if !quoted && is_keyword(&text) {
                    return Err(Error::UnexpectedToken(Token::DoubleColon));
                }

                self.current.annotations.push(text);
                token = self.tokenizer.next()?;

                continue;
            }

            self.lookahead = true;

            if quoted {
                self.set_scalar(Type::Symbol, Scalar::Text(text));
            } else {
                self.read_keyword(text, null_type);
            }

            return Ok(());
        }
    }

    fn read_keyword(&mut self, text: String, null_type: Option<Type>) {
        match (&*text, null_type) {
            (_, Some(ty)) => self.set_null(ty),
            ("null", None) => self.set_null(Type::Null),
            ("true", _) => self.set_scalar(Type::Bool, Scalar::Bool(true)),
            ("false", _) => self.set_scalar(Type::Bool, Scalar::Bool(false)),
            ("nan", _) => self.set_scalar(Type::Float, Scalar::Text(text)),
            _ => self.set_scalar(Type::Symbol, Scalar::Text(text)),
        }
    }

    fn read_value(&mut self, token: Token, container: Option<Container>) -> Result<()> {
        match token {
            Token::Number(_) => {
                let (text, ty) = self.tokenizer.read_number()?;
                self.set_scalar(ty, Scalar::Text(text));
            }
            Token::Binary(_) | Token::Hex(_) => {
                let text = self.tokenizer.read_value()?;
                self.set_scalar(Type::Int, Scalar::Text(text));
            }
            Token::PlusInf => self.set_scalar(Type::Float, Scalar::Text("+inf".to_owned())),
            Token::MinusInf => self.set_scalar(Type::Float, Scalar::Text("-inf".to_owned())),
            Token::Timestamp => {
                let text = self.tokenizer.read_value()?;
                let ts = Timestamp::parse(&text)?;

                self.set_scalar(Type::Timestamp, Scalar::Timestamp(ts));
            }
            Token::String | Token::LongString => {
                let text = self.tokenizer.read_value()?;
                self.set_scalar(Type::String, Scalar::Text(text));
            }
            // operators are only symbols inside s-expressions
            Token::Operator if container == Some(Container::Sexp) => {
                let text = self.tokenizer.read_value()?;
                self.set_scalar(Type::Symbol, Scalar::Text(text));
            }
            Token::Dot if container == Some(Container::Sexp) => {
                self.set_scalar(Type::Symbol, Scalar::Text(".".to_owned()));
            }
            Token::OpenDoubleBrace => match self.tokenizer.read_lob()? {
                Lob::Blob(text) => {
                    let bytes = STANDARD
                        .decode(&text)
                        .map_err(|_| Error::invalid_literal(text, "invalid base64"))?;

                    self.set_scalar(Type::Blob, Scalar::Bytes(bytes));
                }
                Lob::Clob(bytes) => self.set_scalar(Type::Clob, Scalar::Bytes(bytes)),
            },
            // the container's contents are left pending until it's stepped into or skipped
            Token::OpenBrace => self.set_scalar(Type::Struct, Scalar::None),
            Token::OpenBracket => self.set_scalar(Type::List, Scalar::None),
            Token::OpenParen => self.set_scalar(Type::Sexp, Scalar::None),
            Token::Eof => unexpected!(None),
            token => return Err(Error::UnexpectedToken(token)),
        }

        Ok(())
    }

    #[inline]
    fn set_scalar(&mut self, ty: Type, scalar: Scalar) {
        self.current.ty = Some(ty);
        self.current.null = false;
        self.current.scalar = scalar;
    }

    #[inline]
    fn set_null(&mut self, ty: Type) {
        self.current.ty = Some(ty);
        self.current.null = true;
        self.current.scalar = Scalar::None;
    }
}

/**
Unquoted symbols that stand for values rather than symbols.
*/
#[inline]
fn is_keyword(text: &str) -> bool {
    matches!(text, "null" | "true" | "false" | "nan")
}

/**
Parse int text like `-12345`, `0b101` or `-0x1F`.
*/
fn parse_int(literal: &str) -> Result<BigInt> {
    let (negative, unsigned) = match literal.strip_prefix('-') {
        Some(unsigned) => (true, unsigned),
        None => (false, literal),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        Some("0b") | Some("0B") => (2, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let magnitude = BigInt::parse_bytes(digits.as_bytes(), radix)
        .ok_or_else(|| Error::invalid_literal(literal, "malformed int"))?;

    Ok(if negative { -magnitude } else { magnitude })
}

fn parse_float(literal: &str) -> Result<f64> {
    match literal {
        "+inf" => Ok(f64::INFINITY),
        "-inf" => Ok(f64::NEG_INFINITY),
        "nan" => Ok(f64::NAN),
        literal => literal
            .parse()
            .map_err(|_| Error::invalid_literal(literal, "malformed float")),
    }
}
