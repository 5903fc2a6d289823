use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::error::SessionError;

/// Reads a file as text; invalid UTF-8 is replaced rather than rejected.
pub fn read_text_file(path: &Path) -> Result<String, SessionError> {
    let mut file = File::open(path).map_err(|err| SessionError::io(path, err))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|err| SessionError::io(path, err))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn write_text_file(path: &Path, text: &str) -> Result<(), SessionError> {
    let file = File::create(path).map_err(|err| SessionError::io(path, err))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|err| SessionError::io(path, err))
}

/// Creates an empty file, failing with `AlreadyExists` if anything is at `path`.
pub fn create_empty_file(path: &Path) -> Result<(), SessionError> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map(drop)
        .map_err(|err| SessionError::io(path, err))
}
