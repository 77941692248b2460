use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::LineSource;
use crate::error::ShellError;

/// Lines from a script or any other reader, without prompting.
pub struct BatchSource<R> {
    reader: R,
}

impl BatchSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, ShellError> {
        let file = File::open(path).map_err(|e| ShellError::BatchFile(path.to_path_buf(), e))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> BatchSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for BatchSource<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>, ShellError> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }

        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }

        // a stray non-UTF-8 byte must not end the script
        let line = match String::from_utf8(buf) {
            Ok(line) => line,
            Err(e) => {
                log::warn!("batch line is not valid UTF-8, replacing invalid bytes");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Ok(Some(line))
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
