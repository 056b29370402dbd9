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

use crate::corpus::DEFAULT_TEST_FRACTION;
use serde::{Deserialize, Serialize};
use svm::export::DEFAULT_AVERAGE_WORD_COUNT_TOLERANCE;

/// Config of a training run.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename(serialize = "Training"))]
pub struct TrainingConfig {
    /// The share of every authors documents used for testing (default: 0.4)
    #[serde(default = "_default_test_fraction")]
    pub test_fraction: f64,
    /// The seed for the train/test split. If not set every run reshuffles.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Adds the synthetic average word count feature to the vocabulary and the feature files.
    #[serde(default)]
    pub average_word_count_feature: bool,
    /// The max distance to an authors average document length where the
    /// average word count feature is active. (default: 50)
    #[serde(default = "_default_average_word_count_tolerance")]
    pub average_word_count_tolerance: f64,
}

const fn _default_test_fraction() -> f64 {
    DEFAULT_TEST_FRACTION
}

const fn _default_average_word_count_tolerance() -> f64 {
    DEFAULT_AVERAGE_WORD_COUNT_TOLERANCE
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: _default_test_fraction(),
            seed: None,
            average_word_count_feature: false,
            average_word_count_tolerance: _default_average_word_count_tolerance(),
        }
    }
}
