use super::error::{PreprocessorError, PreprocessorResult};

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// One line of a source file, terminator included.
///
/// Kept as raw bytes; sources are not required to be UTF-8.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: Vec<u8>,
    /// 1-based line number within the owning file
    pub number: usize,
}

impl Line {
    pub fn is_directive(&self) -> bool {
        self.text.first() == Some(&b'#')
    }
}

/// Reads a file one bounded line at a time.
pub struct LineSource<R> {
    reader: R,
    path: PathBuf,
    line_number: usize,
    max_line_length: usize,
    buf: Vec<u8>,
}

impl LineSource<BufReader<File>> {
    pub fn open(path: &Path, max_line_length: usize) -> std::io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), path, max_line_length))
    }
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R, path: &Path, max_line_length: usize) -> Self {
        Self {
            reader,
            path: path.to_path_buf(),
            line_number: 0,
            max_line_length,
            buf: Vec::new(),
        }
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Next line, or `None` at end of file.
    pub fn next_line(&mut self) -> PreprocessorResult<Option<Line>> {
        self.buf.clear();
        let limit = self.max_line_length as u64 + 1;
        let read = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut self.buf)
            .map_err(|e| PreprocessorError::io(self.path.display(), e))?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        if self.buf.len() > self.max_line_length {
            return Err(PreprocessorError::LineTooLong {
                path: self.path.display().to_string(),
                line: self.line_number,
                length: self.buf.len(),
                limit: self.max_line_length,
            });
        }

        Ok(Some(Line {
            text: std::mem::take(&mut self.buf),
            number: self.line_number,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source(text: &str, max: usize) -> LineSource<Cursor<Vec<u8>>> {
        LineSource::new(
            Cursor::new(text.as_bytes().to_vec()),
            Path::new("test.vsh"),
            max,
        )
    }

    #[test]
    fn test_lines_keep_terminators_and_numbers() {
        let mut lines = source("vs.1.1\r\nmov r0, v0\nlast", 64);
        let first = lines.next_line().unwrap().unwrap();
        assert_eq!(first.text, b"vs.1.1\r\n");
        assert_eq!(first.number, 1);
        let second = lines.next_line().unwrap().unwrap();
        assert_eq!(second.text, b"mov r0, v0\n");
        assert_eq!(second.number, 2);
        let third = lines.next_line().unwrap().unwrap();
        assert_eq!(third.text, b"last");
        assert_eq!(third.number, 3);
        assert_eq!(lines.next_line().unwrap(), None);
        assert_eq!(lines.line_number(), 3);
    }

    #[test]
    fn test_line_at_limit_is_accepted() {
        let mut lines = source("abcd\n", 5);
        assert_eq!(lines.next_line().unwrap().unwrap().text, b"abcd\n");
    }

    #[test]
    fn test_line_over_limit_is_rejected() {
        let mut lines = source("ok\nabcdef\n", 5);
        assert!(lines.next_line().unwrap().is_some());
        match lines.next_line() {
            Err(PreprocessorError::LineTooLong { line, limit, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(limit, 5);
            }
            other => panic!("Expected LineTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_non_utf8_bytes_are_kept() {
        let mut lines = LineSource::new(
            Cursor::new(b"; caf\xE9\n".to_vec()),
            Path::new("test.vsh"),
            64,
        );
        assert_eq!(lines.next_line().unwrap().unwrap().text, b"; caf\xE9\n");
    }

    #[test]
    fn test_directive_detection() {
        let line = Line {
            text: b"#define A B\n".to_vec(),
            number: 1,
        };
        assert!(line.is_directive());
        let line = Line {
            text: b" #define A B\n".to_vec(),
            number: 1,
        };
        assert!(!line.is_directive());
    }
}
