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


use crate::error::FeatureExportError;
use crate::sparse::SparseFeatureLine;
use std::collections::{BTreeSet, HashMap};
use std::io::Write;
use text_processing::tokenizer::Tokenizer;
use text_processing::vocabulary::{LabeledText, TokenId, Vocabulary};

/// The default distance to the average training document length of a label
/// where the average word count feature is still active.
pub const DEFAULT_AVERAGE_WORD_COUNT_TOLERANCE: f64 = 50.0;

/// Converts documents to sparse binary feature vectors over a [Vocabulary].
///
/// Every distinct known token of a document is one active feature, unknown tokens are dropped.
/// The label is the zero based position of the document label in the label list.
#[derive(Debug)]
pub struct FeatureSetExporter<'a> {
    vocabulary: &'a Vocabulary,
    labels: HashMap<&'a str, usize>,
    tokenizer: Tokenizer,
    average_word_counts: Option<HashMap<String, f64>>,
    tolerance: f64,
}

impl<'a> FeatureSetExporter<'a> {
    pub fn new<L: AsRef<str>>(vocabulary: &'a Vocabulary, labels: &'a [L]) -> Self {
        let mut label_ids = HashMap::with_capacity(labels.len());
        for (idx, label) in labels.iter().enumerate() {
            label_ids.entry(label.as_ref()).or_insert(idx);
        }
        Self {
            vocabulary,
            labels: label_ids,
            tokenizer: Tokenizer,
            average_word_counts: None,
            tolerance: DEFAULT_AVERAGE_WORD_COUNT_TOLERANCE,
        }
    }

    /// Activates the average word count feature with the average training document length per label.
    /// Has no effect if the vocabulary lacks the synthetic feature.
    pub fn with_average_word_counts(
        mut self,
        average_word_counts: HashMap<String, f64>,
        tolerance: f64,
    ) -> Self {
        if self.vocabulary.average_word_count_id().is_none() {
            log::warn!("The vocabulary has no average word count feature, the averages are ignored.");
            return self;
        }
        self.average_word_counts = Some(average_word_counts);
        self.tolerance = tolerance;
        self
    }

    fn label_of(&self, label: &str) -> Result<usize, FeatureExportError> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| FeatureExportError::UnknownLabel(label.to_string()))
    }

    fn average_word_count_feature(&self, label: &str, word_count: usize) -> Option<TokenId> {
        let id = self.vocabulary.average_word_count_id()?;
        let average = *self.average_word_counts.as_ref()?.get(label)?;
        ((word_count as f64 - average).abs() <= self.tolerance).then_some(id)
    }

    /// Converts a single document.
    pub fn export_line<T: LabeledText + ?Sized>(
        &self,
        document: &T,
    ) -> Result<SparseFeatureLine, FeatureExportError> {
        let label = self.label_of(document.label())?;
        let tokens = self.tokenizer.tokenize(document.text());
        let mut word_count = 0usize;
        let mut ids = BTreeSet::new();
        for token in tokens.words() {
            word_count += 1;
            if let Some(id) = self.vocabulary.id_of(token) {
                ids.insert(id);
            }
        }
        if let Some(id) = self.average_word_count_feature(document.label(), word_count) {
            ids.insert(id);
        }
        Ok(SparseFeatureLine::binary(label, ids))
    }

    /// Writes one line per document to [writer], returns the number of lines.
    pub fn write_to<'d, W, I, T>(&self, writer: &mut W, documents: I) -> Result<usize, FeatureExportError>
    where
        W: Write,
        I: IntoIterator<Item = &'d T>,
        T: LabeledText + 'd,
    {
        let mut lines = 0usize;
        for document in documents {
            writeln!(writer, "{}", self.export_line(document)?)?;
            lines += 1;
        }
        Ok(lines)
    }

    /// Converts all [documents] into the line based sparse format.
    pub fn export<'d, I, T>(&self, documents: I) -> Result<String, FeatureExportError>
    where
        I: IntoIterator<Item = &'d T>,
        T: LabeledText + 'd,
    {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, documents)?;
        // only ever filled with valid utf8
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
