//! Corpus loading. Every configured file must exist; a missing file aborts startup.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::CorpusError;

/// A whole corpus file read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// File name the text came from, used as the chunk source.
    pub source: String,
    pub text: String,
}

/// Reads `files` (relative to `data_dir`) in order.
///
/// Existence of every file is checked before any is read, so a missing file is
/// reported without partial work.
pub fn load_documents(data_dir: &Path, files: &[&str]) -> Result<Vec<Document>, CorpusError> {
    let paths: Vec<PathBuf> = files.iter().map(|f| data_dir.join(f)).collect();

    if let Some(missing) = paths.iter().find(|p| !p.is_file()) {
        return Err(CorpusError::MissingFile {
            path: missing.clone(),
        });
    }

    let mut docs = Vec::with_capacity(paths.len());
    for path in paths {
        let text = fs::read_to_string(&path).map_err(|source| CorpusError::Read {
            path: path.clone(),
            source,
        })?;
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        info!("Loaded {} ({} chars)", source, text.chars().count());
        docs.push(Document { source, text });
    }
    Ok(docs)
}
