//! Console output with spill-to-file for oversized responses.

use crate::error::Result;
use std::io::Write;
use std::path::PathBuf;

/// Longest output (in characters) printed directly to the console.
pub const MAX_OUTPUT_CHARS: usize = 30_000;

/// Shape of a piece of output, reported when it is spilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentStats {
    pub lines: usize,
    pub chars: usize,
    pub max_line_chars: usize,
}

impl ContentStats {
    /// Count lines (split on `\n`), characters, and the longest line.
    pub fn analyze(content: &str) -> Self {
        let mut lines = 0;
        let mut max_line_chars = 0;
        for line in content.split('\n') {
            lines += 1;
            max_line_chars = max_line_chars.max(line.chars().count());
        }
        Self {
            lines,
            chars: content.chars().count(),
            max_line_chars,
        }
    }
}

/// Where a piece of output ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    Inline,
    Spilled { path: PathBuf, stats: ContentStats },
}

/// Prints output, or writes it to a temp file and prints a summary when it is too long.
#[derive(Debug, Clone)]
pub struct Emitter {
    threshold: usize,
    dir: Option<PathBuf>,
}

impl Default for Emitter {
    fn default() -> Self {
        Self {
            threshold: MAX_OUTPUT_CHARS,
            dir: None,
        }
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Spill into `dir` instead of the system temp directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Emit to the process stdout/stderr.
    pub fn emit(&self, content: &str, prefix: &str) -> Result<Emitted> {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        self.emit_to(&mut stdout.lock(), &mut stderr.lock(), content, prefix)
    }

    /// Emit `content`: inline on `out`, or to a kept temp file `<prefix>_*.txt`
    /// with a summary on `err`.
    pub fn emit_to<O: Write, E: Write>(
        &self,
        out: &mut O,
        err: &mut E,
        content: &str,
        prefix: &str,
    ) -> Result<Emitted> {
        if content.chars().count() <= self.threshold {
            writeln!(out, "{}", content)?;
            out.flush()?;
            return Ok(Emitted::Inline);
        }

        let stats = ContentStats::analyze(content);
        let path = self.spill(content, prefix)?;
        tracing::debug!("spilled {} chars to {}", stats.chars, path.display());

        writeln!(err, "Response too long, saved to file:")?;
        writeln!(err, "  Path: {}", path.display())?;
        writeln!(err, "  Lines: {}", stats.lines)?;
        writeln!(err, "  Characters: {}", stats.chars)?;
        writeln!(err, "  Max line length: {}", stats.max_line_chars)?;
        err.flush()?;

        Ok(Emitted::Spilled { path, stats })
    }

    fn spill(&self, content: &str, prefix: &str) -> Result<PathBuf> {
        let file_prefix = format!("{}_", prefix);
        let mut builder = tempfile::Builder::new();
        builder.prefix(&file_prefix).suffix(".txt");

        let mut file = match &self.dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(content.as_bytes())?;
        file.flush()?;

        let (_, path) = file.keep().map_err(|e| e.error)?;
        Ok(path)
    }
}
