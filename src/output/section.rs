//! Agent section framing
//!
//! A section is a header line `<<<name:sep(0)>>>` followed by exactly one
//! line of compact JSON.

use std::io::Write;

use serde::Serialize;

/// One named, serialized section ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: &'static str,
    body: String,
}

impl Section {
    /// Serialize `payload` as the section body.
    pub fn new<T: Serialize + ?Sized>(name: &'static str, payload: &T) -> serde_json::Result<Self> {
        Ok(Self {
            name,
            body: serde_json::to_string(payload)?,
        })
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn header(&self) -> String {
        format!("<<<{}:sep(0)>>>", self.name)
    }
}

/// Writes sections to a stream, flushing after each one so that a later
/// failure never loses earlier output.
pub struct SectionWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> SectionWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    pub fn write(&mut self, section: &Section) -> std::io::Result<()> {
        writeln!(self.out, "{}", section.header())?;
        writeln!(self.out, "{}", section.body())?;
        self.out.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Number of sections written so far
    pub fn written(&self) -> usize {
        self.written
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
