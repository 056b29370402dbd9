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


mod splitter;

pub use splitter::{CorpusSplitter, Partition, DEFAULT_TEST_FRACTION};

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use text_processing::tokenizer::{TokenSequence, Tokenizer};
use text_processing::vocabulary::LabeledText;

/// The id of a document, its position in ingestion order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub usize);

impl Display for DocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// A single document of an author. Immutable after ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<Utf8PathBuf>,
    content: String,
}

impl Document {
    pub fn new(id: DocumentId, author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            author: author.into(),
            path: None,
            content: content.into(),
        }
    }

    pub fn with_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[inline]
    pub fn id(&self) -> DocumentId {
        self.id
    }

    #[inline]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// The tokens of the content.
    pub fn tokens(&self) -> TokenSequence {
        Tokenizer.tokenize(&self.content)
    }
}

impl LabeledText for Document {
    fn label(&self) -> &str {
        &self.author
    }

    fn text(&self) -> &str {
        &self.content
    }
}

/// The documents of all authors, partitioned in train and test data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corpus {
    pub train: Vec<Document>,
    pub test: Vec<Document>,
    /// The authors in first seen order.
    pub author_list: Vec<String>,
}

impl Corpus {
    /// Concatenates the partitions of all authors in author order.
    pub fn from_partitions(partitions: IndexMap<String, Partition>) -> Self {
        let mut corpus = Corpus::default();
        for (author, partition) in partitions {
            corpus.train.extend(partition.train);
            corpus.test.extend(partition.test);
            corpus.author_list.push(author);
        }
        corpus
    }

    /// The index of [author] in the author list.
    pub fn author_index(&self, author: &str) -> Option<usize> {
        self.author_list.iter().position(|value| value == author)
    }

    pub fn document_count(&self) -> usize {
        self.train.len() + self.test.len()
    }
}

#[cfg(test)]
mod test {
    use crate::corpus::{Corpus, Document, DocumentId, Partition};
    use indexmap::IndexMap;

    fn doc(id: usize, author: &str) -> Document {
        Document::new(DocumentId(id), author, format!("text {id}"))
    }

    #[test]
    fn concatenates_partitions_in_author_order() {
        let mut partitions = IndexMap::new();
        partitions.insert(
            "b".to_string(),
            Partition {
                train: vec![doc(0, "b")],
                test: vec![doc(1, "b")],
            },
        );
        partitions.insert(
            "a".to_string(),
            Partition {
                train: vec![doc(2, "a"), doc(3, "a")],
                test: vec![],
            },
        );
        let corpus = Corpus::from_partitions(partitions);
        assert_eq!(vec!["b", "a"], corpus.author_list);
        assert_eq!(
            vec![DocumentId(0), DocumentId(2), DocumentId(3)],
            corpus.train.iter().map(Document::id).collect::<Vec<_>>()
        );
        assert_eq!(1, corpus.test.len());
        assert_eq!(Some(1), corpus.author_index("a"));
        assert_eq!(None, corpus.author_index("c"));
        assert_eq!(4, corpus.document_count());
    }

    #[test]
    fn serializes_with_author_list() {
        let corpus = Corpus {
            train: vec![doc(0, "a").with_path("a/0.txt")],
            test: vec![doc(1, "a")],
            author_list: vec!["a".to_string()],
        };
        let json = serde_json::to_value(&corpus).unwrap();
        assert_eq!("a", json["authorList"][0]);
        assert_eq!("a/0.txt", json["train"][0]["path"]);
        assert_eq!("text 0", json["train"][0]["content"]);
        assert!(json["test"][0].get("path").is_none());
        let loaded: Corpus = serde_json::from_value(json).unwrap();
        assert_eq!(corpus, loaded);
    }
}
