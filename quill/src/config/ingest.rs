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

use serde::{Deserialize, Serialize};

/// Config of the document ingestion.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename(serialize = "Ingest"))]
pub struct IngestConfig {
    /// The label of a legacy encoding like `windows-1252`. If not set the
    /// documents are read as utf-8.
    #[serde(default)]
    pub encoding: Option<String>,
    /// Replacements applied to the decoded text before lower casing.
    #[serde(default = "_default_substitutions")]
    pub substitutions: Vec<(String, String)>,
    /// Lower case the documents (default: true)
    #[serde(default = "_default_lowercase")]
    pub lowercase: bool,
}

/// Restores the turkish letters of texts decoded as windows-1252.
fn _default_substitutions() -> Vec<(String, String)> {
    [("ð", "ğ"), ("ý", "ı"), ("þ", "ş"), ("Ý", "İ"), ("Þ", "Ş")]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

const fn _default_lowercase() -> bool {
    true
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            encoding: None,
            substitutions: _default_substitutions(),
            lowercase: _default_lowercase(),
        }
    }
}
