//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.


use crate::config::IngestConfig;
use crate::corpus::{Document, DocumentId};
use camino::{Utf8Path, Utf8PathBuf};
use encoding_rs::{Encoding, UTF_8};
use indexmap::IndexMap;
use std::ffi::OsStr;
use std::path::PathBuf;
use thiserror::Error;
use walkdir::WalkDir;

/// An error while reading documents from disc.
/// Only [IngestError::UnknownEncoding] fails a whole ingestion, everything else fails a single file.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("The path {0} has no author segment.")]
    MalformedPath(Utf8PathBuf),
    #[error("The path {0:?} is not valid utf-8.")]
    NonUtf8Path(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
    #[error("The encoding {0:?} is unknown.")]
    UnknownEncoding(String),
}

/// The documents found by an ingestion, grouped by author in first seen order.
#[derive(Debug, Default)]
pub struct IngestResult {
    pub documents_by_author: IndexMap<String, Vec<Document>>,
    pub failures: Vec<IngestError>,
}

impl IngestResult {
    pub fn document_count(&self) -> usize {
        self.documents_by_author.values().map(Vec::len).sum()
    }
}

/// Decodes raw bytes to the lower cased and normalized text expected by the tokenizer.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    encoding: &'static Encoding,
    substitutions: Vec<(String, String)>,
    lowercase: bool,
}

impl TextNormalizer {
    pub fn new(config: &IngestConfig) -> Result<Self, IngestError> {
        let encoding = match &config.encoding {
            None => UTF_8,
            Some(label) => Encoding::for_label(label.as_bytes())
                .ok_or_else(|| IngestError::UnknownEncoding(label.clone()))?,
        };
        Ok(Self {
            encoding,
            substitutions: config.substitutions.clone(),
            lowercase: config.lowercase,
        })
    }

    /// Decodes [bytes]. A byte order mark overrides the configured encoding.
    pub fn normalize(&self, bytes: &[u8]) -> String {
        let (text, used, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            log::debug!("Replaced malformed {} sequences.", used.name());
        }
        let mut text = text.into_owned();
        for (from, to) in &self.substitutions {
            if !from.is_empty() && text.contains(from.as_str()) {
                text = text.replace(from.as_str(), to);
            }
        }
        if self.lowercase {
            text.to_lowercase()
        } else {
            text
        }
    }
}

/// Returns the author of a document at [relative], the first segment of the path.
/// The document has to be located inside of the author folder.
pub fn author_of(relative: &Utf8Path) -> Result<&str, IngestError> {
    let mut components = relative.components().filter_map(|value| match value {
        camino::Utf8Component::Normal(value) => Some(value),
        _ => None,
    });
    match (components.next(), components.next()) {
        (Some(author), Some(_)) => Ok(author),
        _ => Err(IngestError::MalformedPath(relative.to_path_buf())),
    }
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Reads every file below [root] as a document of the author named by its first path segment.
///
/// Files are visited in path order, hidden files and everything below hidden folders
/// are skipped. Files that can not be ingested are reported in [IngestResult::failures].
pub fn ingest_folder(root: impl AsRef<Utf8Path>, config: &IngestConfig) -> Result<IngestResult, IngestError> {
    let root = root.as_ref();
    let normalizer = TextNormalizer::new(config)?;
    let mut result = IngestResult::default();
    let mut next_id = 0usize;

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));
    for entry in walker {
        let entry = match entry {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Failed to walk {root}: {err}");
                result.failures.push(err.into());
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = match Utf8PathBuf::from_path_buf(entry.into_path()) {
            Ok(value) => value,
            Err(path) => {
                log::warn!("Skipped non utf-8 path {path:?}");
                result.failures.push(IngestError::NonUtf8Path(path));
                continue;
            }
        };
        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        let author = match author_of(&relative) {
            Ok(value) => value.to_string(),
            Err(err) => {
                log::warn!("Skipped {path}: {err}");
                result.failures.push(err);
                continue;
            }
        };
        let bytes = match std::fs::read(&path) {
            Ok(value) => value,
            Err(source) => {
                log::warn!("Failed to read {path}: {source}");
                result.failures.push(IngestError::Read { path, source });
                continue;
            }
        };
        let document = Document::new(DocumentId(next_id), author.as_str(), normalizer.normalize(&bytes))
            .with_path(relative);
        next_id += 1;
        result
            .documents_by_author
            .entry(author)
            .or_default()
            .push(document);
    }

    log::info!(
        "Ingested {} documents of {} authors from {root}, {} failures.",
        result.document_count(),
        result.documents_by_author.len(),
        result.failures.len()
    );
    Ok(result)
}

#[cfg(test)]
mod test {
    use crate::config::IngestConfig;
    use crate::ingest::{author_of, ingest_folder, IngestError, TextNormalizer};
    use camino::{Utf8Path, Utf8PathBuf};
    use camino_tempfile::tempdir;
    use itertools::Itertools;
    use std::fs;

    #[test]
    fn author_is_first_segment() {
        assert_eq!("anna", author_of(Utf8Path::new("anna/1.txt")).unwrap());
        assert_eq!("anna", author_of(Utf8Path::new("anna/sub/1.txt")).unwrap());
        assert!(matches!(
            author_of(Utf8Path::new("loose.txt")),
            Err(IngestError::MalformedPath(path)) if path == Utf8PathBuf::from("loose.txt")
        ));
    }

    #[test]
    fn normalizes_legacy_text() {
        let config = IngestConfig {
            encoding: Some("windows-1252".to_string()),
            ..IngestConfig::default()
        };
        let normalizer = TextNormalizer::new(&config).unwrap();
        // "Ýstanbul'da daðlar" as windows-1252 bytes
        let bytes = b"\xDDstanbul'da da\xF0lar";
        assert_eq!("i̇stanbul'da dağlar", normalizer.normalize(bytes));
    }

    #[test]
    fn rejects_unknown_encoding() {
        let config = IngestConfig {
            encoding: Some("klingon".to_string()),
            ..IngestConfig::default()
        };
        assert!(matches!(
            TextNormalizer::new(&config),
            Err(IngestError::UnknownEncoding(_))
        ));
    }

    #[test]
    fn ingests_folder_per_author() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("zoe")).unwrap();
        fs::create_dir_all(root.join("adam")).unwrap();
        fs::write(root.join("zoe/b.txt"), "Second Text").unwrap();
        fs::write(root.join("zoe/a.txt"), "First Text").unwrap();
        fs::write(root.join("adam/x.txt"), "Adam Writes").unwrap();
        fs::write(root.join("adam/.hidden"), "ignored").unwrap();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::write(root.join(".git/objects/pack"), "ignored").unwrap();
        fs::create_dir_all(root.join("zoe/.drafts")).unwrap();
        fs::write(root.join("zoe/.drafts/c.txt"), "ignored").unwrap();
        fs::write(root.join("loose.txt"), "no author").unwrap();

        let result = ingest_folder(root, &IngestConfig::default()).unwrap();
        assert_eq!(
            vec!["adam", "zoe"],
            result.documents_by_author.keys().collect_vec()
        );
        assert_eq!(3, result.document_count());
        assert_eq!(1, result.failures.len());
        assert!(matches!(result.failures[0], IngestError::MalformedPath(_)));

        let zoe = &result.documents_by_author["zoe"];
        assert_eq!(vec!["first text", "second text"], zoe.iter().map(|value| value.content()).collect_vec());
        assert_eq!(Some(Utf8Path::new("zoe/a.txt")), zoe[0].path());
        let ids = result
            .documents_by_author
            .values()
            .flatten()
            .map(|value| value.id().0)
            .sorted()
            .collect_vec();
        assert_eq!(vec![0, 1, 2], ids);
    }

    #[test]
    fn missing_folder_is_reported() {
        let dir = tempdir().unwrap();
        let result = ingest_folder(dir.path().join("missing"), &IngestConfig::default()).unwrap();
        assert_eq!(0, result.document_count());
        assert!(matches!(result.failures[0], IngestError::Walk(_)));
    }
}
