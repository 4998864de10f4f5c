//! Row-by-row CSV reading that keeps blank lines.
//!
//! `csv::Reader` silently drops empty lines, which would shift every later
//! row index. [`CsvRows`] splits the input into records itself (honouring
//! quoted newlines), reports empty ones as [`Row::Blank`], and hands the rest
//! to the `csv` crate for field parsing.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One physical record of the input.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// A line with nothing on it
    Blank,
    /// A parsed record with at least one field
    Record(csv::StringRecord),
}

/// Quote tracking across a record's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

impl Scan {
    fn step(self, b: u8) -> Scan {
        match (self, b) {
            (Scan::Quoted, b'"') => Scan::QuoteInQuoted,
            (Scan::Quoted, _) => Scan::Quoted,
            (Scan::FieldStart, b'"') | (Scan::QuoteInQuoted, b'"') => Scan::Quoted,
            (_, b',') | (_, b'\n') => Scan::FieldStart,
            _ => Scan::Unquoted,
        }
    }
}

/// Lazy iterator over the rows of a CSV source.
pub struct CsvRows<R> {
    reader: R,
}

impl CsvRows<BufReader<File>> {
    /// Open a CSV file for row-by-row reading.
    pub fn from_path(path: &Path) -> Result<Self, csv::Error> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> CsvRows<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read the raw bytes of the next record, newline included.
    fn read_raw(&mut self) -> Result<Vec<u8>, csv::Error> {
        let mut raw = Vec::new();
        let mut state = Scan::FieldStart;

        loop {
            let start = raw.len();
            if self.reader.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            state = raw[start..].iter().fold(state, |s, &b| s.step(b));
            // newline inside quotes: the record continues
            if state != Scan::Quoted {
                break;
            }
        }

        Ok(raw)
    }

    fn read_row(&mut self) -> Result<Option<Row>, csv::Error> {
        let raw = self.read_raw()?;
        if raw.is_empty() {
            return Ok(None);
        }

        let content = trim_terminator(&raw);
        if content.is_empty() {
            return Ok(Some(Row::Blank));
        }

        let mut parser = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content);
        let mut record = csv::StringRecord::new();
        if parser.read_record(&mut record)? {
            Ok(Some(Row::Record(record)))
        } else {
            Ok(Some(Row::Blank))
        }
    }
}

impl<R: BufRead> Iterator for CsvRows<R> {
    type Item = Result<Row, csv::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_row().transpose()
    }
}

/// Strip one trailing `\n` or `\r\n`.
fn trim_terminator(raw: &[u8]) -> &[u8] {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    raw.strip_suffix(b"\r").unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(input: &str) -> Vec<Row> {
        CsvRows::new(input.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    fn record(fields: &[&str]) -> Row {
        Row::Record(csv::StringRecord::from(fields.to_vec()))
    }

    #[test]
    fn test_plain_rows() {
        assert_eq!(
            rows("text,score\nhello,1\nworld,2\n"),
            vec![
                record(&["text", "score"]),
                record(&["hello", "1"]),
                record(&["world", "2"]),
            ]
        );
    }

    #[test]
    fn test_blank_lines_are_kept() {
        assert_eq!(
            rows("header\n\nhello\n\r\n"),
            vec![record(&["header"]), Row::Blank, record(&["hello"]), Row::Blank]
        );
    }

    #[test]
    fn test_missing_final_newline() {
        assert_eq!(rows("a\nb"), vec![record(&["a"]), record(&["b"])]);
    }

    #[test]
    fn test_empty_input() {
        assert!(rows("").is_empty());
    }

    #[test]
    fn test_quoted_newline_stays_in_field() {
        assert_eq!(
            rows("h\n\"line one\n\nline three\",x\nnext\n"),
            vec![
                record(&["h"]),
                record(&["line one\n\nline three", "x"]),
                record(&["next"]),
            ]
        );
    }

    #[test]
    fn test_escaped_quotes_and_commas() {
        assert_eq!(
            rows("h\n\"she said \"\"hi, there\"\"\",2\n"),
            vec![record(&["h"]), record(&["she said \"hi, there\"", "2"])]
        );
    }

    #[test]
    fn test_quote_inside_unquoted_field_is_literal() {
        assert_eq!(
            rows("h\na 5\" screen\nnext\n"),
            vec![record(&["h"]), record(&["a 5\" screen"]), record(&["next"])]
        );
    }

    #[test]
    fn test_whitespace_line_is_not_blank() {
        assert_eq!(rows("h\n \n"), vec![record(&["h"]), record(&[" "])]);
    }

    #[test]
    fn test_crlf_terminators() {
        assert_eq!(
            rows("h\r\nhello\r\n"),
            vec![record(&["h"]), record(&["hello"])]
        );
    }

    #[test]
    fn test_missing_file() {
        assert!(CsvRows::from_path(Path::new("/nonexistent/rows.csv")).is_err());
    }
}
