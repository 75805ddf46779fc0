use std::fmt;

/**
The sign of a numeric literal.

A leading `-` is consumed while deciding what kind of token a literal is, so numeric
tokens carry it along to their payload readers.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    #[inline]
    pub fn is_negative(&self) -> bool {
        matches!(self, Sign::Negative)
    }
}

/**
A token in Ion text.

Tokens like strings and numbers have a payload that's only read on demand. If the
payload isn't read before moving to the next token then it's skipped.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /**
    The end of the input.
    */
    Eof,
    /**
    A decimal number that could still be an int, float or decimal.
    */
    Number(Sign),
    /**
    `0b101`
    */
    Binary(Sign),
    /**
    `0x1F`
    */
    Hex(Sign),
    /**
    `+inf`
    */
    PlusInf,
    /**
    `-inf`
    */
    MinusInf,
    /**
    `2001-01-01T00:00:00.000Z`
    */
    Timestamp,
    /**
    `foo`
    */
    Symbol,
    /**
    `'foo'`
    */
    QuotedSymbol,
    /**
    `+`, `-` or `<=`, only meaningful inside an s-expression.
    */
    Operator,
    /**
    `"foo"`
    */
    String,
    /**
    `'''foo'''`, along with any long strings immediately following it.
    */
    LongString,
    Dot,
    Comma,
    Colon,
    DoubleColon,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    /**
    The start of a blob or clob.

    The closing `}}` is consumed along with the lob's contents.
    */
    OpenDoubleBrace,
}

impl Token {
    /**
    The token that closes a container opened by this one.
    */
    #[inline]
    pub fn closer(&self) -> Option<Token> {
        match self {
            Token::OpenParen => Some(Token::CloseParen),
            Token::OpenBrace => Some(Token::CloseBrace),
            Token::OpenBracket => Some(Token::CloseBracket),
            _ => None,
        }
    }

    /**
    Whether the token has a payload the tokenizer still needs to read or skip.
    */
    #[inline]
    pub(crate) fn has_payload(&self) -> bool {
        match self {
            Token::Number(_)
            | Token::Binary(_)
            | Token::Hex(_)
            | Token::Timestamp
            | Token::Symbol
            | Token::QuotedSymbol
            | Token::Operator
            | Token::String
            | Token::LongString
            | Token::OpenParen
            | Token::OpenBrace
            | Token::OpenBracket
            | Token::OpenDoubleBrace => true,
            Token::Eof
            | Token::PlusInf
            | Token::MinusInf
            | Token::Dot
            | Token::Comma
            | Token::Colon
            | Token::DoubleColon
            | Token::CloseParen
            | Token::CloseBrace
            | Token::CloseBracket => false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Token::Eof => "<EOF>",
            Token::Number(_) => "<number>",
            Token::Binary(_) => "<binary>",
            Token::Hex(_) => "<hex>",
            Token::PlusInf => "+inf",
            Token::MinusInf => "-inf",
            Token::Timestamp => "<timestamp>",
            Token::Symbol => "<symbol>",
            Token::QuotedSymbol => "<quoted-symbol>",
            Token::Operator => "<operator>",
            Token::String => "<string>",
            Token::LongString => "<long-string>",
            Token::Dot => ".",
            Token::Comma => ",",
            Token::Colon => ":",
            Token::DoubleColon => "::",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::OpenBrace => "{",
            Token::CloseBrace => "}",
            Token::OpenBracket => "[",
            Token::CloseBracket => "]",
            Token::OpenDoubleBrace => "{{",
        })
    }
}
