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

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Config of the output paths.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(rename(serialize = "Paths"))]
pub struct PathsConfig {
    /// The root folder where all dumps are written to
    #[serde(default = "_default_root_folder")]
    pub root: Utf8PathBuf,
    #[serde(default)]
    pub files: Files,
}

fn _default_root_folder() -> Utf8PathBuf {
    Utf8PathBuf::from("./quill_data")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: _default_root_folder(),
            files: Files::default(),
        }
    }
}

macro_rules! path_constructors {
    ($self: ident.($($root: ident => $name: ident = $path1: ident.$path2: ident;)+)) => {
        $(
            pub fn $name(&$self) -> Utf8PathBuf {
                $self.$root.join(&$self.$path1.$path2)
            }
        )+
    };
}

impl PathsConfig {
    pub fn new(root: impl AsRef<Utf8Path>, files: Files) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            files,
        }
    }

    pub fn root_path(&self) -> &Utf8Path {
        self.root.as_path()
    }

    path_constructors! {
        self.(
            root => file_corpus = files.corpus;
            root => file_authors = files.authors;
            root => file_vocabulary = files.vocabulary;
            root => file_train_features = files.train_features;
            root => file_test_features = files.test_features;
            root => file_predictions = files.predictions;
            root => file_log = files.log;
        )
    }
}

/// The file names of the dumps, relative to the root.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
pub struct Files {
    #[serde(default = "_default_corpus_file")]
    pub corpus: Utf8PathBuf,
    #[serde(default = "_default_authors_file")]
    pub authors: Utf8PathBuf,
    #[serde(default = "_default_vocabulary_file")]
    pub vocabulary: Utf8PathBuf,
    #[serde(default = "_default_train_features_file")]
    pub train_features: Utf8PathBuf,
    #[serde(default = "_default_test_features_file")]
    pub test_features: Utf8PathBuf,
    #[serde(default = "_default_predictions_file")]
    pub predictions: Utf8PathBuf,
    #[serde(default = "_default_log_file")]
    pub log: Utf8PathBuf,
}

impl Default for Files {
    fn default() -> Self {
        Self {
            corpus: _default_corpus_file(),
            authors: _default_authors_file(),
            vocabulary: _default_vocabulary_file(),
            train_features: _default_train_features_file(),
            test_features: _default_test_features_file(),
            predictions: _default_predictions_file(),
            log: _default_log_file(),
        }
    }
}

fn _default_corpus_file() -> Utf8PathBuf { Utf8PathBuf::from("corpus.json") }
fn _default_authors_file() -> Utf8PathBuf { Utf8PathBuf::from("authors.json") }
fn _default_vocabulary_file() -> Utf8PathBuf { Utf8PathBuf::from("vocabulary.json") }
fn _default_train_features_file() -> Utf8PathBuf { Utf8PathBuf::from("train.dat") }
fn _default_test_features_file() -> Utf8PathBuf { Utf8PathBuf::from("test.dat") }
fn _default_predictions_file() -> Utf8PathBuf { Utf8PathBuf::from("predictions.json") }
fn _default_log_file() -> Utf8PathBuf { Utf8PathBuf::from("out.log") }

#[cfg(test)]
mod test {
    use crate::config::paths::{Files, PathsConfig};
    use camino::Utf8PathBuf;

    #[test]
    fn joins_files_with_root() {
        let paths = PathsConfig::new("out", Files::default());
        assert_eq!(Utf8PathBuf::from("out/corpus.json"), paths.file_corpus());
        assert_eq!(Utf8PathBuf::from("out/test.dat"), paths.file_test_features());
        assert_eq!(Utf8PathBuf::from("out/out.log"), paths.file_log());
    }
}
