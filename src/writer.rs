//! Line-oriented output with running byte offsets

use std::io::Write;

use crate::error::PDFResult;

/// Writes lines to a sink and tracks how many bytes went out
///
/// Every line is followed by exactly one `\n`, so the position always equals
/// the number of bytes handed to the sink.
pub struct PDFWriter<'a, W: Write> {
    output: &'a mut W,
    position: usize,
}

impl<'a, W: Write> PDFWriter<'a, W> {
    pub fn new(output: &'a mut W) -> Self {
        Self { output, position: 0 }
    }

    /// Byte offset of the next line
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn write_line(&mut self, content: &[u8]) -> PDFResult<()> {
        self.output.write_all(content)?;
        self.output.write_all(b"\n")?;
        self.position += content.len() + 1;
        Ok(())
    }

    /// Write a multi-line block, one physical line at a time
    pub fn write_block(&mut self, block: &[u8]) -> PDFResult<()> {
        for line in block.split(|byte| *byte == b'\n') {
            self.write_line(line)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> PDFResult<()> {
        self.output.flush()?;
        Ok(())
    }
}
