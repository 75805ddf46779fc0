/*!
The byte-level view of the input the tokenizer works with.

The cursor normalizes line endings and lets the tokenizer look a few bytes ahead
by pushing bytes it's read back onto a small fixed stack.
*/

use std::ops::Deref;

use super::Source;

use crate::error::Result;

/**
The maximum number of bytes that can be pushed back at once.

The tokenizer never needs to look further ahead than `+inf//` after its sign.
*/
pub(crate) const MAX_PUSHBACK: usize = 5;

#[derive(Debug)]
pub(crate) struct Cursor<S> {
    source: S,
    /**
    Bytes that have been read and pushed back, in reverse order.

    The next byte to read is at `pushback[len - 1]`.
    */
    pushback: [u8; MAX_PUSHBACK],
    len: usize,
    /**
    A byte read from the source after a `\r` that wasn't a `\n`.
    */
    raw: Option<u8>,
    /**
    Whether the source has run out.

    The end of input is never pushed back. Once it's been seen every read past
    the pushed back bytes returns `None`.
    */
    eof: bool,
}

/**
Bytes peeked from the cursor, in input order.

There may be fewer bytes than asked for if the input ended.
*/
#[derive(Debug, Clone, Copy)]
pub(crate) struct Lookahead {
    bytes: [u8; MAX_PUSHBACK],
    len: usize,
}

impl Deref for Lookahead {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl<S: Source> Cursor<S> {
    #[inline]
    pub(crate) fn new(source: S) -> Self {
        Cursor {
            source,
            pushback: [0; MAX_PUSHBACK],
            len: 0,
            raw: None,
            eof: false,
        }
    }

    /**
    Read the next byte, with `\r` and `\r\n` normalized to `\n`.
    */
    #[inline]
    pub(crate) fn read(&mut self) -> Result<Option<u8>> {
        if self.len > 0 {
            self.len -= 1;
            return Ok(Some(self.pushback[self.len]));
        }

        let c = match self.raw.take() {
            Some(c) => Some(c),
            None => self.read_raw()?,
        };

        match c {
            Some(b'\r') => {
                match self.read_raw()? {
                    Some(b'\n') | None => (),
                    c => self.raw = c,
                }

                Ok(Some(b'\n'))
            }
            c => Ok(c),
        }
    }

    #[inline]
    fn read_raw(&mut self) -> Result<Option<u8>> {
        if self.eof {
            return Ok(None);
        }

        let c = self.source.read_byte()?;
        self.eof = c.is_none();

        Ok(c)
    }

    /**
    Push a byte back so it's returned by the next read.

    Pushing back the end of input does nothing, since it's latched anyway.
    */
    #[inline]
    pub(crate) fn unread(&mut self, c: Option<u8>) {
        if let Some(c) = c {
            test_assert!(self.len < MAX_PUSHBACK, "pushback overflow");

            self.pushback[self.len] = c;
            self.len += 1;
        }
    }

    #[inline]
    pub(crate) fn peek(&mut self) -> Result<Option<u8>> {
        let c = self.read()?;
        self.unread(c);

        Ok(c)
    }

    /**
    Look at up to the next `n` bytes without consuming them.
    */
    pub(crate) fn peek_n(&mut self, n: usize) -> Result<Lookahead> {
        test_assert!(n <= MAX_PUSHBACK);

        let mut lookahead = Lookahead {
            bytes: [0; MAX_PUSHBACK],
            len: 0,
        };

        while lookahead.len < n {
            match self.read()? {
                Some(c) => {
                    lookahead.bytes[lookahead.len] = c;
                    lookahead.len += 1;
                }
                None => break,
            }
        }

        for c in lookahead.iter().rev() {
            self.unread(Some(*c));
        }

        Ok(lookahead)
    }

    /**
    Skip bytes that have already been peeked.
    */
    #[inline]
    pub(crate) fn skip_n(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            if self.read()?.is_none() {
                break;
            }
        }

        Ok(())
    }
}
