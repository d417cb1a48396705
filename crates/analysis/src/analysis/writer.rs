//! Tab-separated window output.
//!
//! ```text
//! CHROM   START   END     N       HOM
//! chr1    0       500000  500000  499999
//! ```
//!
//! `END` is exclusive, `N` is the number of covered bases and `HOM` is the
//! absolute count of homozygous bases (not a fraction).

use crate::analysis::window::Window;
use csv::{Writer, WriterBuilder};
use std::io::Write;

/// Column names of the window format.
pub const WINDOW_HEADER: [&str; 5] = ["CHROM", "START", "END", "N", "HOM"];

/// Writes windows of one chromosome as tab-separated rows.
pub struct WindowWriter<W: Write> {
    inner: Writer<W>,
    chrom: String,
}

impl<W: Write> WindowWriter<W> {
    /// Wrap `writer` and emit the header line.
    pub fn new(writer: W, chrom: impl Into<String>) -> Result<Self, csv::Error> {
        let mut inner = WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(writer);
        inner.write_record(WINDOW_HEADER)?;
        Ok(Self {
            inner,
            chrom: chrom.into(),
        })
    }

    pub fn write_window(&mut self, window: &Window) -> Result<(), csv::Error> {
        self.inner.serialize((
            &self.chrom,
            window.start,
            window.end,
            window.covered_bases,
            window.homozygous,
        ))
    }

    /// Write every window and return how many were written.
    pub fn write_all<I>(&mut self, windows: I) -> Result<usize, csv::Error>
    where
        I: IntoIterator<Item = Window>,
    {
        let mut written = 0;
        for window in windows {
            self.write_window(&window)?;
            written += 1;
        }
        Ok(written)
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W, csv::Error> {
        self.inner
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_rows() {
        let mut writer = WindowWriter::new(Vec::new(), "chr2").unwrap();
        let written = writer
            .write_all([Window::new(0, 500, 1), Window::new(500, 800, 0)])
            .unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            text,
            "CHROM\tSTART\tEND\tN\tHOM\nchr2\t0\t500\t500\t499\nchr2\t500\t800\t300\t300\n"
        );
    }

    #[test]
    fn test_header_only() {
        let writer = WindowWriter::new(Vec::new(), "chrX").unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(text, "CHROM\tSTART\tEND\tN\tHOM\n");
    }
}
