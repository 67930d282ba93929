//! Faulty I/O endpoints.

use std::io::{self, BufRead, Read, Write};

/// How a [`FailingWriter`] refuses bytes once its budget is spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkFault {
    /// Return an I/O error, like a full disk.
    Error,
    /// Accept zero bytes, which `write_all` reports as `WriteZero`.
    Closed,
}

/// Accepts `budget` bytes, then fails every write.
#[derive(Debug)]
pub struct FailingWriter {
    written: Vec<u8>,
    budget: usize,
    fault: SinkFault,
}

impl FailingWriter {
    pub fn new(budget: usize, fault: SinkFault) -> Self {
        Self {
            written: Vec::new(),
            budget,
            fault,
        }
    }

    /// Bytes accepted before the fault.
    pub fn written(&self) -> &[u8] {
        &self.written
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.budget - self.written.len();
        if room == 0 && !buf.is_empty() {
            return match self.fault {
                SinkFault::Error => Err(io::Error::other("sink refused write")),
                SinkFault::Closed => Ok(0),
            };
        }
        let n = room.min(buf.len());
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Serves the first `limit` bytes of its data, then ends or fails.
#[derive(Debug)]
pub struct TruncatedReader {
    data: Vec<u8>,
    pos: usize,
    limit: usize,
    error_at_end: bool,
}

impl TruncatedReader {
    /// Clean end of input after `limit` bytes.
    pub fn ending(data: impl Into<Vec<u8>>, limit: usize) -> Self {
        Self::build(data.into(), limit, false)
    }

    /// I/O error after `limit` bytes.
    pub fn failing(data: impl Into<Vec<u8>>, limit: usize) -> Self {
        Self::build(data.into(), limit, true)
    }

    fn build(data: Vec<u8>, limit: usize, error_at_end: bool) -> Self {
        let limit = limit.min(data.len());
        Self {
            data,
            pos: 0,
            limit,
            error_at_end,
        }
    }

    fn remaining(&self) -> io::Result<&[u8]> {
        if self.pos == self.limit && self.error_at_end {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "source lost"));
        }
        Ok(&self.data[self.pos..self.limit])
    }
}

impl Read for TruncatedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.remaining()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.pos += n;
        Ok(n)
    }
}

impl BufRead for TruncatedReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.remaining()
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.limit);
    }
}
