//! Byte-to-text decoding for game logs.
//!
//! French game installs write logs in Windows-1252, English ones usually in
//! UTF-8 or plain ASCII. Each line is decoded on its own: valid UTF-8 is used
//! as is, anything else is read as Windows-1252.

use std::borrow::Cow;
use std::io::{self, BufRead};

use encoding_rs::WINDOWS_1252;

/// Decode one line of log bytes.
pub fn decode_line(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => WINDOWS_1252.decode_without_bom_handling(bytes).0,
    }
}

/// Iterator over decoded lines of a reader, without line terminators.
pub struct DecodedLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> DecodedLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(256),
        }
    }
}

impl<R: BufRead> Iterator for DecodedLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
                    self.buf.pop();
                }
                Some(Ok(decode_line(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
