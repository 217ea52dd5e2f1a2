//! Owned read-ahead buffer feeding the `,` instruction.

use std::collections::VecDeque;
use std::io::{self, Read};

const READ_CHUNK: usize = 512;

/// Byte source for one run of the machine.
///
/// Bytes already buffered (handed over up front or read ahead in an earlier
/// refill) are served first, in arrival order. Only when the buffer is empty
/// does `next_byte` block on the underlying reader.
pub struct Input<R> {
    pending: VecDeque<u8>,
    reader: R,
    exhausted: bool,
    bytes_read: usize,
}

impl<R: Read> Input<R> {
    pub fn new(reader: R) -> Self {
        Self {
            pending: VecDeque::new(),
            reader,
            exhausted: false,
            bytes_read: 0,
        }
    }

    /// Start with `bytes` already queued ahead of anything `reader` yields.
    pub fn with_pending(bytes: &[u8], reader: R) -> Self {
        let mut input = Self::new(reader);
        input.feed(bytes);
        input
    }

    /// Queue more bytes behind the ones already buffered.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.pending.extend(bytes);
    }

    /// Next byte in arrival order, blocking until one is available.
    ///
    /// `Ok(None)` means the reader reached end of stream and nothing is
    /// buffered. Once the reader has reported end of stream it is not polled again.
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if self.pending.is_empty() && !self.exhausted {
            self.refill()?;
        }

        let byte = self.pending.pop_front();
        if byte.is_some() {
            self.bytes_read += 1;
        }
        Ok(byte)
    }

    /// Bytes handed out by `next_byte` so far.
    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    pub fn buffered(&self) -> usize {
        self.pending.len()
    }

    fn refill(&mut self) -> io::Result<()> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.reader.read(&mut chunk) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.pending.extend(&chunk[..n]);
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
