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


use thiserror::Error;

/// An error while exporting feature sets
#[derive(Debug, Error)]
pub enum FeatureExportError {
    #[error("The label {0:?} is not part of the label list.")]
    UnknownLabel(String),
    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// An error while reading a sparse feature line
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum SparseLineError {
    #[error("The line is empty.")]
    Empty,
    #[error("The label {0:?} is not a valid label index.")]
    Label(String),
    #[error("The feature {0:?} is not of the form id:value.")]
    Feature(String),
}

/// An error while reading the files of an external svm run
#[derive(Debug, Error)]
pub enum SvmFileError {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: SparseLineError,
    },
    #[error("Found {predictions} predictions but {actual} test documents.")]
    LengthMismatch { predictions: usize, actual: usize },
}
