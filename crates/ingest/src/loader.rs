//! Plain-text file loading.
//!
//! Files are keyed by file name. Text that is not valid UTF-8 is reported as
//! absent (`text: None`) so that [`ingest`](crate::ingest) rejects it as
//! malformed input instead of the whole load failing.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::types::{DocumentSource, RawDocument};

/// Read one file. I/O failures are errors; undecodable text is not.
pub fn load_text_file(path: &Path) -> Result<RawDocument, IngestError> {
    let bytes = fs::read(path)?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ingest_file_not_utf8");
            None
        }
    };
    Ok(RawDocument {
        id: file_identifier(path),
        source: DocumentSource::File {
            path: path.to_path_buf(),
        },
        text,
    })
}

/// Load every matching file under `dir`, recursively, sorted by path.
pub fn load_directory(dir: &Path, cfg: &IngestConfig) -> Result<Vec<RawDocument>, IngestError> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let ext = entry.path().extension().and_then(|ext| ext.to_str());
        if cfg.accepts_extension(ext) {
            paths.push(entry.into_path());
        } else {
            debug!(path = %entry.path().display(), "ingest_file_skipped");
        }
    }
    paths.sort();
    paths.iter().map(|path| load_text_file(path)).collect()
}

/// Load a mix of files and directories, in argument order.
///
/// Files named explicitly are loaded whatever their extension.
pub fn load_paths<P: AsRef<Path>>(
    paths: &[P],
    cfg: &IngestConfig,
) -> Result<Vec<RawDocument>, IngestError> {
    let mut docs = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            docs.extend(load_directory(path, cfg)?);
        } else {
            docs.push(load_text_file(path)?);
        }
    }
    Ok(docs)
}

fn file_identifier(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn load_text_file_keys_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "D1.txt", b"hello world");

        let doc = load_text_file(&path).unwrap();
        assert_eq!(doc.id, "D1.txt");
        assert_eq!(doc.text.as_deref(), Some("hello world"));
        assert_eq!(doc.source, DocumentSource::File { path });
    }

    #[test]
    fn load_text_file_marks_invalid_utf8_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "bad.txt", &[0xFF, 0xFE, 0x00]);

        let doc = load_text_file(&path).unwrap();
        assert_eq!(doc.text, None);
    }

    #[test]
    fn load_text_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_text_file(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(IngestError::Io(_))));
    }

    #[test]
    fn load_directory_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b.txt", b"bravo");
        write_file(dir.path(), "a.txt", b"alpha");
        write_file(dir.path(), "c.docx", b"skipped");
        fs::create_dir(dir.path().join("nested")).unwrap();
        write_file(&dir.path().join("nested"), "z.TXT", b"zulu");

        let docs = load_directory(dir.path(), &IngestConfig::default()).unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a.txt", "b.txt", "z.TXT"]);
    }

    #[test]
    fn load_paths_mixes_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("corpus");
        fs::create_dir(&sub).unwrap();
        write_file(&sub, "one.txt", b"one");
        let loose = write_file(dir.path(), "loose.md", b"loose");

        let docs = load_paths(&[loose, sub], &IngestConfig::default()).unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["loose.md", "one.txt"]);
    }
}
