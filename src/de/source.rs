use std::io::{self, BufRead};

/**
A source of input bytes for a tokenizer.

A source hands out one byte at a time until it runs out. Once a source has returned
`Ok(None)` it won't be asked for more bytes.
*/
pub trait Source {
    /**
    Read the next byte of input, or `None` at the end of the input.
    */
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<'a, S: Source + ?Sized> Source for &'a mut S {
    #[inline]
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }
}

/**
A source over a byte buffer that's already in memory.
*/
#[derive(Debug, Clone)]
pub struct SliceSource<'input> {
    input: &'input [u8],
    offset: usize,
}

impl<'input> SliceSource<'input> {
    #[inline]
    pub fn new(input: &'input [u8]) -> Self {
        SliceSource { input, offset: 0 }
    }
}

impl<'input> Source for SliceSource<'input> {
    #[inline]
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let c = self.input.get(self.offset).copied();
        self.offset += c.is_some() as usize;

        Ok(c)
    }
}

/**
A source over any buffered reader.

Bytes are pulled out of the reader's own buffer, so wrap unbuffered readers in a
[`std::io::BufReader`] first.
*/
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
}

impl<R: BufRead> ReadSource<R> {
    #[inline]
    pub fn new(reader: R) -> Self {
        ReadSource { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> Source for ReadSource<R> {
    #[inline]
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            let c = match self.reader.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };

            if c.is_some() {
                self.reader.consume(1);
            }

            return Ok(c);
        }
    }
}
