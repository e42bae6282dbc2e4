//! Atomic file output
//!
//! A document is first written to `.<name>.new` next to its destination, which is then
//! replaced. An existing destination is left alone when anything fails on the way.

use crate::error::{DocletError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Character encoding of a generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    /// ISO-8859-1; characters beyond it are written as `\uXXXX` escapes, as in Java
    /// properties files
    Latin1,
}

impl Encoding {
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Latin1 => {
                let mut bytes = Vec::with_capacity(text.len());
                for c in text.chars() {
                    match u8::try_from(u32::from(c)) {
                        Ok(byte) => bytes.push(byte),
                        Err(_) => {
                            let mut units = [0u16; 2];
                            for unit in c.encode_utf16(&mut units) {
                                bytes.extend_from_slice(format!("\\u{:04x}", unit).as_bytes());
                            }
                        }
                    }
                }
                bytes
            }
        }
    }
}

/// Write the text produced by `render` to `path`
///
/// Parent directories are created as needed. If `render` or any file operation fails,
/// the temporary file is removed and the error is returned.
pub fn print_to_file<F>(path: &Path, encoding: Encoding, render: F) -> Result<()>
where
    F: FnOnce(&mut String) -> Result<()>,
{
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(directory).map_err(|e| DocletError::io(directory, e))?;

    let temp = temp_path(directory, path);
    let outcome = write_and_replace(path, &temp, encoding, render);
    if outcome.is_err() && temp.exists() {
        let _ = fs::remove_file(&temp);
    }
    outcome
}

fn temp_path(directory: &Path, path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    directory.join(format!(".{}.new", name))
}

fn write_and_replace<F>(path: &Path, temp: &Path, encoding: Encoding, render: F) -> Result<()>
where
    F: FnOnce(&mut String) -> Result<()>,
{
    let mut file = fs::File::create(temp).map_err(|e| DocletError::io(temp, e))?;

    let mut text = String::new();
    let rendered = render(&mut text);
    file.write_all(&encoding.encode(&text))
        .and_then(|()| file.flush())
        .map_err(|e| DocletError::io(temp, e))?;
    drop(file);
    rendered?;

    if path.exists() {
        fs::remove_file(path).map_err(|source| DocletError::DeleteExisting {
            path: path.to_path_buf(),
            source,
        })?;
    }
    fs::rename(temp, path).map_err(|source| DocletError::Rename {
        from: temp.to_path_buf(),
        to: path.to_path_buf(),
        source,
    })?;

    debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_latin1_escapes() {
        assert_eq!(Encoding::Latin1.encode("a\u{e4}"), vec![b'a', 0xe4]);
        assert_eq!(Encoding::Latin1.encode("\u{20ac}"), b"\\u20ac".to_vec());
        assert_eq!(Encoding::Utf8.encode("\u{e4}"), "\u{e4}".as_bytes().to_vec());
    }

    #[test]
    fn test_print_to_file_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/out.txt");

        print_to_file(&path, Encoding::Utf8, |out| {
            out.push_str("hello\n");
            Ok(())
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
        assert!(!dir.path().join("a/b/.out.txt.new").exists());
    }

    #[test]
    fn test_failed_render_keeps_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "previous").unwrap();

        let result = print_to_file(&path, Encoding::Utf8, |out| {
            out.push_str("partial");
            Err(DocletError::Xml("boom".to_string()))
        });

        assert!(matches!(result, Err(DocletError::Xml(ref m)) if m == "boom"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
        assert!(!dir.path().join(".out.txt.new").exists());
    }

    #[test]
    fn test_existing_file_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old").unwrap();

        print_to_file(&path, Encoding::Latin1, |out| {
            out.push_str("new");
            Ok(())
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }
}
