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
use text_processing::statistics::TokenStatistics;

/// The token model of a single author with add-one smoothing over the global vocabulary.
///
/// `likelihood(w) = (count(w) + 1) / (total_word_count + vocabulary_size)`
///
/// The vocabulary size is captured at training time, so the smoothing floor of
/// unseen tokens stays the same for the lifetime of the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorProfile {
    label: String,
    training_document_count: u64,
    word_counts: IndexMap<String, u64>,
    word_probs: IndexMap<String, f64>,
    total_word_count: u64,
    unique_word_count: usize,
    vocabulary_size: usize,
}

impl AuthorProfile {
    /// Trains the profile of [label] from the token [statistics] of its training documents.
    pub fn train(label: impl Into<String>, statistics: TokenStatistics, vocabulary_size: usize) -> Self {
        let training_document_count = statistics.document_count();
        let total_word_count = statistics.token_count();
        let word_counts = statistics.into_token_counts();
        let denominator = Self::denominator_of(total_word_count, vocabulary_size);
        let word_probs = word_counts
            .iter()
            .map(|(token, count)| (token.clone(), (*count as f64 + 1.0) / denominator))
            .collect();
        Self {
            label: label.into(),
            training_document_count,
            unique_word_count: word_counts.len(),
            word_counts,
            word_probs,
            total_word_count,
            vocabulary_size,
        }
    }

    /// A profile without any training data. Every token resolves to the smoothing floor.
    pub fn untrained(label: impl Into<String>, vocabulary_size: usize) -> Self {
        Self::train(label, TokenStatistics::default(), vocabulary_size)
    }

    /// A vocabulary size of 0 is treated as 1.
    #[inline(always)]
    fn denominator_of(total_word_count: u64, vocabulary_size: usize) -> f64 {
        (total_word_count as f64) + (vocabulary_size.max(1) as f64)
    }

    /// The likelihood of a token observed in the training data of this author.
    pub fn observed_likelihood(&self, token: &str) -> Option<f64> {
        self.word_probs.get(token).copied()
    }

    /// The likelihood assigned to tokens never seen by this author.
    pub fn smoothing_floor(&self) -> f64 {
        1.0 / Self::denominator_of(self.total_word_count, self.vocabulary_size)
    }

    /// The smoothed likelihood of [token], unseen tokens get the smoothing floor.
    pub fn likelihood(&self, token: &str) -> f64 {
        self.observed_likelihood(token)
            .unwrap_or_else(|| self.smoothing_floor())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn training_document_count(&self) -> u64 {
        self.training_document_count
    }

    pub fn total_word_count(&self) -> u64 {
        self.total_word_count
    }

    pub fn unique_word_count(&self) -> usize {
        self.unique_word_count
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    pub fn word_count(&self, token: &str) -> Option<u64> {
        self.word_counts.get(token).copied()
    }

    /// The average number of tokens of a training document.
    pub fn average_document_length(&self) -> Option<f64> {
        (self.training_document_count > 0)
            .then(|| self.total_word_count as f64 / self.training_document_count as f64)
    }
}

#[cfg(test)]
mod test {
    use crate::model::AuthorProfile;
    use float_cmp::approx_eq;
    use text_processing::statistics::TokenStatistics;
    use text_processing::tokenizer::Tokenizer;

    fn profile(texts: &[&str], vocabulary_size: usize) -> AuthorProfile {
        let mut statistics = TokenStatistics::default();
        for text in texts {
            statistics.add(Tokenizer.tokenize(text).words());
        }
        AuthorProfile::train("a", statistics, vocabulary_size)
    }

    #[test]
    fn laplace_smoothing_over_global_vocabulary() {
        let profile = profile(&["the cat sat"], 5);
        assert!(approx_eq!(f64, 0.25, profile.likelihood("the")));
        assert!(approx_eq!(f64, 0.125, profile.likelihood("dog")));
        assert_eq!(0.125, profile.smoothing_floor());
        assert_eq!(None, profile.observed_likelihood("dog"));
    }

    #[test]
    fn derived_counts_are_consistent() {
        let profile = profile(&["a b a c", "c c d"], 10);
        assert_eq!(2, profile.training_document_count());
        assert_eq!(7, profile.total_word_count());
        assert_eq!(4, profile.unique_word_count());
        assert_eq!(Some(3), profile.word_count("c"));
        assert_eq!(Some(3.5), profile.average_document_length());
        assert!(approx_eq!(f64, 4.0 / 17.0, profile.likelihood("c")));
    }

    #[test]
    fn likelihoods_are_bounded() {
        for vocabulary_size in 1..20 {
            let profile = profile(&["x x x y", "z"], vocabulary_size);
            for token in ["x", "y", "z", "unseen", ""] {
                let likelihood = profile.likelihood(token);
                assert!(likelihood > 0.0 && likelihood <= 1.0, "{token}: {likelihood}");
            }
            assert_eq!(
                1.0 / (5.0 + vocabulary_size as f64),
                profile.likelihood("unseen")
            );
        }
    }

    #[test]
    fn untrained_profile_uses_floor_only() {
        let profile = AuthorProfile::untrained("nobody", 4);
        assert_eq!(0, profile.total_word_count());
        assert_eq!(0, profile.unique_word_count());
        assert_eq!(None, profile.average_document_length());
        assert_eq!(0.25, profile.likelihood("anything"));
    }

    #[test]
    fn empty_vocabulary_does_not_divide_by_zero() {
        let profile = AuthorProfile::untrained("nobody", 0);
        assert_eq!(1.0, profile.likelihood("anything"));
        assert!(profile.likelihood("anything").is_finite());
    }

    #[test]
    fn survives_serialization() {
        let profile = profile(&["the cat sat"], 5);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(3, json["totalWordCount"]);
        assert_eq!(3, json["uniqueWordCount"]);
        assert_eq!(0.25, json["wordProbs"]["the"]);
        let loaded: AuthorProfile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.likelihood("dog"), loaded.likelihood("dog"));
        assert_eq!(profile, loaded);
    }
}
