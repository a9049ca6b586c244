use std::cmp::min;
use std::io::{Error, ErrorKind, Read, Result, Write};

/// An in-memory stream scripted with the bytes the "server" will send.
///
/// Everything the client writes is captured in `written_buf`, so tests can
/// assert the exact command bytes that went on the wire. Reading past the end
/// of the script is an `UnexpectedEof` io error unless the stream was built
/// with [`MockStream::with_eof_after_buf`], which models an orderly close
/// instead.
#[derive(Debug, Default)]
pub struct MockStream {
    read_buf: Vec<u8>,
    read_pos: usize,
    pub written_buf: Vec<u8>,
    err_on_read: bool,
    eof_on_read: bool,
    eof_after_buf: bool,
}

impl MockStream {
    pub fn new(read_buf: Vec<u8>) -> MockStream {
        MockStream::default().with_buf(read_buf)
    }

    pub fn with_buf(mut self, read_buf: Vec<u8>) -> MockStream {
        self.read_buf = read_buf;
        self
    }

    /// Every read reports an orderly close.
    pub fn with_eof(mut self) -> MockStream {
        self.eof_on_read = true;
        self
    }

    /// Reads past the scripted bytes report an orderly close rather than an
    /// io error.
    pub fn with_eof_after_buf(mut self) -> MockStream {
        self.eof_after_buf = true;
        self
    }

    /// Every read fails with an io error.
    pub fn with_err(mut self) -> MockStream {
        self.err_on_read = true;
        self
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.eof_on_read {
            return Ok(0);
        }
        if self.err_on_read {
            return Err(Error::new(ErrorKind::Other, "MockStream error"));
        }
        let remaining = &self.read_buf[self.read_pos..];
        if remaining.is_empty() {
            if self.eof_after_buf {
                return Ok(0);
            }
            return Err(Error::new(ErrorKind::UnexpectedEof, "script exhausted"));
        }
        let n = min(buf.len(), remaining.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.read_pos += n;
        Ok(n)
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.written_buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
