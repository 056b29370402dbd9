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


use crate::error::{SparseLineError, SvmFileError};
use crate::sparse::{parse_label, SparseFeatureLine};
use camino::Utf8Path;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};

/// The file format of a class list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassListFile {
    List(Vec<String>),
    Corpus {
        #[serde(rename = "authorList")]
        author_list: Vec<String>,
    },
}

/// Maps the label indices of sparse feature files back to their names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn new(classes: Vec<String>) -> Self {
        Self(classes)
    }

    /// Reads a json array of names or a corpus dump containing an `authorList`.
    pub fn read<R: Read>(reader: R) -> Result<Self, SvmFileError> {
        Ok(match serde_json::from_reader(reader)? {
            ClassListFile::List(value) => Self(value),
            ClassListFile::Corpus { author_list } => Self(author_list),
        })
    }

    /// The name of [label], unknown labels are named `label-<idx>`.
    pub fn name_of(&self, label: usize) -> String {
        match self.0.get(label) {
            Some(value) => value.clone(),
            None => format!("label-{label}"),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn read_lines<R: BufRead, T>(
    reader: R,
    parse: impl Fn(&str) -> Result<T, SparseLineError>,
) -> Result<Vec<T>, SvmFileError> {
    let mut result = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        result.push(parse(&line).map_err(|source| SvmFileError::Line {
            line: idx + 1,
            source,
        })?);
    }
    Ok(result)
}

/// Reads the predicted labels of a svm prediction file.
/// The first field of every line is the predicted label, any following scores are ignored.
pub fn read_predicted_labels<R: BufRead>(reader: R) -> Result<Vec<usize>, SvmFileError> {
    read_lines(reader, |line| {
        parse_label(line.split_whitespace().next().ok_or(SparseLineError::Empty)?)
    })
}

/// Reads the actual labels of a sparse feature file.
pub fn read_actual_labels<R: BufRead>(reader: R) -> Result<Vec<usize>, SvmFileError> {
    read_lines(reader, |line| line.parse::<SparseFeatureLine>().map(|value| value.label))
}

/// The actual and predicted classes of an external svm run, aligned by test document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvmPredictions {
    pub actual: Vec<String>,
    pub predicted: Vec<String>,
}

impl SvmPredictions {
    pub fn from_readers<P: BufRead, T: BufRead, C: Read>(
        predictions: P,
        test_data: T,
        class_list: C,
    ) -> Result<Self, SvmFileError> {
        let predicted = read_predicted_labels(predictions)?;
        let actual = read_actual_labels(test_data)?;
        if predicted.len() != actual.len() {
            return Err(SvmFileError::LengthMismatch {
                predictions: predicted.len(),
                actual: actual.len(),
            });
        }
        let classes = ClassList::read(class_list)?;
        log::info!(
            "Loaded {} svm predictions over {} classes.",
            predicted.len(),
            classes.len()
        );
        Ok(Self {
            actual: actual.into_iter().map(|value| classes.name_of(value)).collect(),
            predicted: predicted
                .into_iter()
                .map(|value| classes.name_of(value))
                .collect(),
        })
    }

    pub fn load(
        predictions: impl AsRef<Utf8Path>,
        test_data: impl AsRef<Utf8Path>,
        class_list: impl AsRef<Utf8Path>,
    ) -> Result<Self, SvmFileError> {
        Self::from_readers(
            BufReader::new(File::open(predictions.as_ref())?),
            BufReader::new(File::open(test_data.as_ref())?),
            BufReader::new(File::open(class_list.as_ref())?),
        )
    }
}

#[cfg(test)]
mod test {
    use crate::error::SvmFileError;
    use crate::predictions::{ClassList, SvmPredictions};
    use std::io::Write;

    const PREDICTIONS: &str = "1 0.2 0.8\n0 0.9 0.1\n\n2 0.1 0.1\n";
    const TEST_DATA: &str = "1 1:1 2:1\n1 3:1\n0\n";

    #[test]
    fn maps_labels_to_names() {
        let result = SvmPredictions::from_readers(
            PREDICTIONS.as_bytes(),
            TEST_DATA.as_bytes(),
            r#"["anna", "ben"]"#.as_bytes(),
        )
        .unwrap();
        assert_eq!(vec!["ben", "ben", "anna"], result.actual);
        assert_eq!(vec!["ben", "anna", "label-2"], result.predicted);
    }

    #[test]
    fn reads_class_list_from_corpus_dump() {
        let classes = ClassList::read(
            r#"{"train": [], "test": [], "authorList": ["x", "y"]}"#.as_bytes(),
        )
        .unwrap();
        assert_eq!(ClassList::new(vec!["x".to_string(), "y".to_string()]), classes);
    }

    #[test]
    fn detects_length_mismatch() {
        let result = SvmPredictions::from_readers(
            "1\n".as_bytes(),
            TEST_DATA.as_bytes(),
            "[]".as_bytes(),
        );
        assert!(matches!(
            result,
            Err(SvmFileError::LengthMismatch {
                predictions: 1,
                actual: 3
            })
        ));
    }

    #[test]
    fn reports_broken_line() {
        let result = SvmPredictions::from_readers(
            "1\nx\n0\n".as_bytes(),
            TEST_DATA.as_bytes(),
            "[]".as_bytes(),
        );
        assert!(matches!(result, Err(SvmFileError::Line { line: 2, .. })));
    }

    #[test]
    fn loads_from_disk() {
        let dir = camino_tempfile::tempdir().unwrap();
        let write = |name: &str, content: &str| {
            let path = dir.path().join(name);
            std::fs::File::create(&path)
                .unwrap()
                .write_all(content.as_bytes())
                .unwrap();
            path
        };
        let result = SvmPredictions::load(
            write("predictions", PREDICTIONS),
            write("test.dat", TEST_DATA),
            write("classes.json", r#"["anna", "ben", "carl"]"#),
        )
        .unwrap();
        assert_eq!(vec!["ben", "anna", "carl"], result.predicted);
    }
}
