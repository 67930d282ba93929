//! Line-oriented text streams with indentation.

use std::fmt;
use std::io::{self, BufRead, Write};

use crate::codec::{ParseFault, StorageCodec};
use crate::config::PersistConfig;
use crate::error::ValueError;

/// Writes labelled, indented lines.
///
/// Each [`intro`](Self::intro) opens a nesting level that a matching
/// [`exdent`](Self::exdent) closes. Output is not flushed implicitly.
#[derive(Debug)]
pub struct TextWriter<W: Write> {
    sink: W,
    depth: usize,
    indent_width: usize,
}

impl<W: Write> TextWriter<W> {
    /// Wrap `sink` with the default indentation.
    pub fn new(sink: W) -> Self {
        Self::with_config(sink, &PersistConfig::default())
    }

    /// Wrap `sink` with the indentation from `config`.
    pub fn with_config(sink: W, config: &PersistConfig) -> Self {
        Self {
            sink,
            depth: 0,
            indent_width: config.indent_width,
        }
    }

    /// Write `label:` (or `label: (empty)`) and open a nesting level.
    pub fn intro(&mut self, label: fmt::Arguments<'_>, empty: bool) -> io::Result<()> {
        self.indent()?;
        if empty {
            writeln!(self.sink, "{label}: (empty)")?;
        } else {
            writeln!(self.sink, "{label}:")?;
        }
        self.depth += 1;
        Ok(())
    }

    /// Write `label: value` at the current depth.
    pub fn value_line(&mut self, label: fmt::Arguments<'_>, value: &str) -> io::Result<()> {
        self.indent()?;
        writeln!(self.sink, "{label}: {value}")
    }

    /// Close the innermost nesting level.
    pub fn exdent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn indent(&mut self) -> io::Result<()> {
        write!(self.sink, "{:width$}", "", width = self.depth * self.indent_width)
    }
}

/// Reads value tokens from labelled lines.
///
/// Indentation and labels are not validated. Blank lines and intro lines
/// (nothing, or `(empty)`, after the final `]:`) are skipped; a line without
/// a label is taken whole as a value.
#[derive(Debug)]
pub struct TextReader<R: BufRead> {
    source: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> TextReader<R> {
    /// Wrap `source`.
    pub fn new(source: R) -> Self {
        Self {
            source,
            line: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Next value token and the 1-based line it came from.
    pub fn next_value(&mut self) -> Result<(String, usize), ValueError> {
        loop {
            self.buf.clear();
            if self.source.read_line(&mut self.buf)? == 0 {
                return Err(ValueError::UnexpectedEof);
            }
            self.line += 1;
            let content = self.buf.trim();
            if content.is_empty() {
                continue;
            }
            let value = match content.rfind("]:") {
                Some(at) => content[at + 2..].trim(),
                None => content,
            };
            if value.is_empty() || value == "(empty)" {
                continue;
            }
            return Ok((value.to_owned(), self.line));
        }
    }

    /// Read and decode the next value with codec `C`.
    pub fn read<C: StorageCodec>(&mut self) -> Result<C::Value, ValueError> {
        let (token, line) = self.next_value()?;
        C::parse_text(&token).map_err(|fault| match fault {
            ParseFault::Malformed => ValueError::Malformed {
                token,
                storage: C::STORAGE,
                line,
            },
            ParseFault::OutOfRange => ValueError::OutOfRange {
                token,
                storage: C::STORAGE,
                line: Some(line),
            },
        })
    }

    /// Consume the reader and return the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{I16, R64};
    use crate::storage::Storage;

    #[test]
    fn nesting_indents_by_configured_width() {
        let config = PersistConfig::new().with_indent_width(2);
        let mut w = TextWriter::with_config(Vec::new(), &config);
        w.intro(format_args!("m [] []"), false).unwrap();
        w.intro(format_args!("m [1]"), false).unwrap();
        w.value_line(format_args!("m [1] [1]"), "7").unwrap();
        w.exdent();
        w.exdent();
        assert_eq!(w.depth(), 0);
        let text = String::from_utf8(w.into_inner()).unwrap();
        assert_eq!(text, "m [] []:\n  m [1]:\n    m [1] [1]: 7\n");
    }

    #[test]
    fn empty_intro_is_marked() {
        let mut w = TextWriter::new(Vec::new());
        w.intro(format_args!("v []"), true).unwrap();
        assert_eq!(w.into_inner(), b"v []: (empty)\n");
    }

    #[test]
    fn exdent_at_top_level_is_a_no_op() {
        let mut w = TextWriter::new(Vec::new());
        w.exdent();
        assert_eq!(w.depth(), 0);
    }

    #[test]
    fn reader_skips_structure_and_blank_lines() {
        let text = "v []:\n\n    v [1]: 3\n  v [2]:   -4  \n17\n";
        let mut r = TextReader::new(text.as_bytes());
        assert_eq!(r.read::<I16>().unwrap(), 3);
        assert_eq!(r.read::<I16>().unwrap(), -4);
        assert_eq!(r.next_value().unwrap(), ("17".to_owned(), 5));
        assert!(matches!(r.next_value(), Err(ValueError::UnexpectedEof)));
    }

    #[test]
    fn empty_marker_is_not_a_value() {
        let mut r = TextReader::new("m [] []: (empty)\nm [1]:\n".as_bytes());
        assert!(matches!(r.next_value(), Err(ValueError::UnexpectedEof)));
        assert_eq!(r.line(), 2);
    }

    #[test]
    fn malformed_token_reports_its_line() {
        let mut r = TextReader::new("x []:\n    x [1]: oops\n".as_bytes());
        match r.read::<R64>() {
            Err(ValueError::Malformed {
                token,
                storage,
                line,
            }) => {
                assert_eq!(token, "oops");
                assert_eq!(storage, Storage::R64);
                assert_eq!(line, 2);
            }
            other => panic!("expected malformed token, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_token_is_distinguished() {
        let mut r = TextReader::new("a [1]: 70000\n".as_bytes());
        assert!(matches!(
            r.read::<I16>(),
            Err(ValueError::OutOfRange { line: Some(1), .. })
        ));
    }
}
