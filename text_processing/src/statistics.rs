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


use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Collects the token frequencies over some documents.
///
/// The tokens are kept in the order they were first seen.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStatistics {
    document_count: u64,
    token_count: u64,
    token_counts: IndexMap<String, u64>,
}

impl TokenStatistics {
    /// Adds the tokens of a single document. Empty tokens are ignored.
    pub fn add<'a, D: IntoIterator<Item = &'a str>>(&mut self, doc: D) {
        self.document_count = self.document_count.saturating_add(1);
        for value in doc {
            if value.is_empty() {
                continue;
            }
            self.token_count = self.token_count.saturating_add(1);
            match self.token_counts.get_mut(value) {
                Some(count) => *count = count.saturating_add(1),
                None => {
                    self.token_counts.insert(value.to_string(), 1);
                }
            }
        }
    }

    /// The number of documents added
    #[inline]
    pub fn document_count(&self) -> u64 {
        self.document_count
    }

    /// The number of tokens over all documents
    #[inline]
    pub fn token_count(&self) -> u64 {
        self.token_count
    }

    /// The number of distinct tokens
    #[inline]
    pub fn unique_token_count(&self) -> usize {
        self.token_counts.len()
    }

    /// The frequency of a [token]
    pub fn token_frequency(&self, token: &str) -> Option<u64> {
        self.token_counts.get(token).copied()
    }

    /// The average number of tokens per document, none if there is no document.
    pub fn average_document_length(&self) -> Option<f64> {
        (self.document_count > 0).then(|| self.token_count as f64 / self.document_count as f64)
    }

    /// Iterates the tokens with their counts in first seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.token_counts
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
    }

    pub fn into_token_counts(self) -> IndexMap<String, u64> {
        self.token_counts
    }
}

impl Display for TokenStatistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Document Count: {}\n", self.document_count)?;
        write!(f, "Token Count: {}\n", self.token_count)?;
        write!(f, "Unique Token Count: {}\n", self.unique_token_count())?;
        write!(f, "Tokens:")?;
        for (token, count) in &self.token_counts {
            write!(f, "\n  {token}: {count}")?;
        }
        Ok(())
    }
}
