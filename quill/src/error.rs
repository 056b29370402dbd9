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


use crate::ingest::IngestError;
use svm::error::{FeatureExportError, SvmFileError};
use thiserror::Error;

/// The errors of a training or prediction run.
#[derive(Debug, Error)]
pub enum QuillError {
    #[error("The test fraction {0} is not within [0, 1].")]
    InvalidTestFraction(f64),
    #[error("The index {index} is out of range, there are {len} test documents.")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("There is no author to predict.")]
    NoAuthors,
    #[error("The folder {0} does not contain any readable document.")]
    EmptyCorpus(String),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    FeatureExport(#[from] FeatureExportError),
    #[error(transparent)]
    SvmFile(#[from] SvmFileError),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    IO(#[from] std::io::Error),
}
