//! In-memory [`Terminal`] implementation for tests.

use super::Terminal;
use crate::error::Result;
use crate::geometry::Size;

/// A fake terminal that records every written byte and reports a fixed size.
///
/// Never a TTY: `enter_raw_mode`/`leave_raw_mode` are no-ops, matching how a
/// real backend degrades when stdin/stdout isn't one.
pub struct TestBackend {
    size: Size,
    written: Vec<u8>,
}

impl TestBackend {
    /// Create a test backend reporting `size`.
    pub fn new(size: Size) -> Self {
        Self { size, written: Vec::new() }
    }

    /// All bytes written so far, concatenated.
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// The written bytes decoded as UTF-8 (lossy), for assertions.
    pub fn written_str(&self) -> String {
        String::from_utf8_lossy(&self.written).into_owned()
    }

    /// Clear the recorded output without changing the reported size.
    pub fn clear_written(&mut self) {
        self.written.clear();
    }

    /// Change the reported size, simulating a resize.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}

impl Terminal for TestBackend {
    fn is_tty(&self) -> bool {
        false
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> Result<()> {
        Ok(())
    }

    fn size(&self) -> Result<Size> {
        Ok(self.size)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.written.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
