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


mod profile;

pub use profile::AuthorProfile;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use text_processing::statistics::TokenStatistics;

/// Trains the [AuthorProfile]s of all authors over a vocabulary of a fixed size.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FrequencyModel {
    vocabulary_size: usize,
}

impl FrequencyModel {
    pub fn new(vocabulary_size: usize) -> Self {
        Self { vocabulary_size }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    /// Trains a profile for every author in [author_list].
    /// Authors without statistics, e.g. without any training document, get an untrained profile.
    pub fn train<A: AsRef<str>>(
        &self,
        author_list: &[A],
        mut statistics: IndexMap<String, TokenStatistics>,
    ) -> AuthorModels {
        let mut models = IndexMap::with_capacity(author_list.len());
        for author in author_list {
            let author = author.as_ref();
            let profile = match statistics.swap_remove(author) {
                Some(value) => AuthorProfile::train(author, value, self.vocabulary_size),
                None => {
                    log::warn!("The author {author} has no training documents.");
                    AuthorProfile::untrained(author, self.vocabulary_size)
                }
            };
            log::debug!(
                "Trained {author} with {} tokens, {} unique.",
                profile.total_word_count(),
                profile.unique_word_count()
            );
            models.insert(author.to_string(), profile);
        }
        if !statistics.is_empty() {
            log::warn!(
                "Ignored the statistics of {} labels missing in the author list.",
                statistics.len()
            );
        }
        AuthorModels(models)
    }
}

/// The profiles of all authors, in author list order.
///
/// The order is part of the classification result: on equal scores the later author wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorModels(IndexMap<String, AuthorProfile>);

impl AuthorModels {
    pub fn get(&self, author: &str) -> Option<&AuthorProfile> {
        self.0.get(author)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AuthorProfile)> {
        self.0.iter().map(|(author, profile)| (author.as_str(), profile))
    }

    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The average training document length of every author with training documents.
    pub fn average_document_lengths(&self) -> HashMap<String, f64> {
        self.iter()
            .filter_map(|(author, profile)| {
                profile
                    .average_document_length()
                    .map(|value| (author.to_string(), value))
            })
            .collect()
    }
}
