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


use crate::statistics::TokenStatistics;
use crate::tokenizer::Tokenizer;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The id of a token in a [Vocabulary]. Ids start at 1, 0 is reserved.
pub type TokenId = u32;

/// The name of the synthetic vocabulary entry used for the average word count feature.
/// The [Tokenizer] splits `<` and `>` off, so no real token can have this name.
pub const AVERAGE_WORD_COUNT_FEATURE: &str = "<averageWordCount>";

/// A struct implementing this is used as train data for a vocabulary.
pub trait LabeledText {
    /// The label of the entry
    fn label(&self) -> &str;

    /// The text of the entry
    fn text(&self) -> &str;
}

impl<Label, Text> LabeledText for (Label, Text)
where
    Label: AsRef<str>,
    Text: AsRef<str>,
{
    fn label(&self) -> &str {
        self.0.as_ref()
    }

    fn text(&self) -> &str {
        self.1.as_ref()
    }
}

/// Errors when restoring a vocabulary from its serialized form.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum VocabularyError {
    #[error("The reserved slot 0 of the vocabulary is missing.")]
    MissingReservedSlot,
    #[error("The vocabulary contains an empty token at id {0}.")]
    EmptyToken(usize),
    #[error("The token {0:?} is contained more than once.")]
    DuplicateToken(String),
    #[error("The average word count feature at id {0} is not the last entry.")]
    MisplacedFeature(usize),
}

/// The ordered set of distinct training tokens.
///
/// The id of a token is its position in first seen order plus one.
/// When serialized the vocabulary is a list where the index is the id, index 0 holds an empty string.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct Vocabulary {
    tokens: IndexSet<String>,
    average_word_count_feature: bool,
}

impl Vocabulary {
    /// Inserts a token and returns its id.
    fn insert(&mut self, token: &str) -> TokenId {
        match self.tokens.get_index_of(token) {
            Some(idx) => Self::idx_to_id(idx),
            None => {
                let (idx, _) = self.tokens.insert_full(token.to_string());
                Self::idx_to_id(idx)
            }
        }
    }

    #[inline(always)]
    fn idx_to_id(idx: usize) -> TokenId {
        idx as TokenId + 1
    }

    /// The number of real tokens, the synthetic feature is not counted.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The number of ids in use, including the synthetic feature.
    pub fn feature_count(&self) -> usize {
        self.len() + usize::from(self.average_word_count_feature)
    }

    /// Returns the id of [token] if known.
    pub fn id_of(&self, token: &str) -> Option<TokenId> {
        self.tokens.get_index_of(token).map(Self::idx_to_id)
    }

    /// Returns the token for [id]. The synthetic feature is resolved to [AVERAGE_WORD_COUNT_FEATURE].
    pub fn token(&self, id: TokenId) -> Option<&str> {
        let idx = (id as usize).checked_sub(1)?;
        match self.tokens.get_index(idx) {
            Some(value) => Some(value.as_str()),
            None if Some(id) == self.average_word_count_id() => Some(AVERAGE_WORD_COUNT_FEATURE),
            None => None,
        }
    }

    /// The tokens in id order, starting with id 1.
    pub fn ordered_tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// The tokens with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &str)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(idx, token)| (Self::idx_to_id(idx), token.as_str()))
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Appends the synthetic average word count feature.
    pub fn with_average_word_count_feature(mut self) -> Self {
        self.average_word_count_feature = true;
        self
    }

    /// The id of the synthetic average word count feature, if present.
    pub fn average_word_count_id(&self) -> Option<TokenId> {
        self.average_word_count_feature
            .then(|| Self::idx_to_id(self.tokens.len()))
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(value: Vocabulary) -> Self {
        let mut result = Vec::with_capacity(value.feature_count() + 1);
        result.push(String::new());
        result.extend(value.tokens);
        if value.average_word_count_feature {
            result.push(AVERAGE_WORD_COUNT_FEATURE.to_string());
        }
        result
    }
}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = VocabularyError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        let mut iter = value.into_iter();
        match iter.next() {
            Some(reserved) if reserved.is_empty() => {}
            _ => return Err(VocabularyError::MissingReservedSlot),
        }
        let mut vocabulary = Vocabulary::default();
        let mut iter = iter.enumerate().peekable();
        while let Some((idx, token)) = iter.next() {
            if token.is_empty() {
                return Err(VocabularyError::EmptyToken(idx + 1));
            }
            if token == AVERAGE_WORD_COUNT_FEATURE {
                if iter.peek().is_some() {
                    return Err(VocabularyError::MisplacedFeature(idx + 1));
                }
                vocabulary.average_word_count_feature = true;
                break;
            }
            if !vocabulary.tokens.insert(token.clone()) {
                return Err(VocabularyError::DuplicateToken(token));
            }
        }
        Ok(vocabulary)
    }
}

/// The result of building a vocabulary.
#[derive(Debug, Default, Clone)]
pub struct VocabularyBuild {
    pub vocabulary: Vocabulary,
    /// The statistics of every label in first seen order.
    pub statistics: IndexMap<String, TokenStatistics>,
}

/// Builds a [Vocabulary] and the [TokenStatistics] per label in one pass over the training data.
#[derive(Debug)]
pub struct VocabularyBuilder<'a> {
    tokenizer: &'a Tokenizer,
    vocabulary: Vocabulary,
    statistics: IndexMap<String, TokenStatistics>,
}

impl<'a> VocabularyBuilder<'a> {
    pub fn new(tokenizer: &'a Tokenizer) -> Self {
        Self {
            tokenizer,
            vocabulary: Vocabulary::default(),
            statistics: IndexMap::new(),
        }
    }

    /// Tokenizes [entry] and registers all of its tokens.
    pub fn add<T: LabeledText + ?Sized>(&mut self, entry: &T) {
        let tokens = self.tokenizer.tokenize(entry.text());
        for token in tokens.words() {
            self.vocabulary.insert(token);
        }
        if let Some(statistics) = self.statistics.get_mut(entry.label()) {
            statistics.add(tokens.words());
        } else {
            let mut statistics = TokenStatistics::default();
            statistics.add(tokens.words());
            self.statistics.insert(entry.label().to_string(), statistics);
        }
    }

    pub fn build(self) -> VocabularyBuild {
        log::debug!(
            "Built a vocabulary with {} tokens over {} labels.",
            self.vocabulary.len(),
            self.statistics.len()
        );
        VocabularyBuild {
            vocabulary: self.vocabulary,
            statistics: self.statistics,
        }
    }
}
