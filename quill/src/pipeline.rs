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


use crate::classifier::NaiveBayesClassifier;
use crate::config::TrainingConfig;
use crate::corpus::{Corpus, CorpusSplitter, Document};
use crate::error::QuillError;
use crate::evaluation::{Evaluation, Evaluator, Prediction};
use crate::model::{AuthorModels, FrequencyModel};
use indexmap::IndexMap;
use rand::Rng;
use svm::FeatureSetExporter;
use text_processing::create_vocabulary;
use text_processing::tokenizer::Tokenizer;
use text_processing::vocabulary::Vocabulary;

/// Everything derived from one train/test split.
///
/// A retraining discards the whole pipeline, nothing is shared between two instances.
#[derive(Debug, Clone)]
pub struct TrainedPipeline {
    pub corpus: Corpus,
    pub vocabulary: Vocabulary,
    pub models: AuthorModels,
}

/// The feature files of the train and the test set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportedFeatures {
    pub train: String,
    pub test: String,
}

impl TrainedPipeline {
    /// Splits the ingested documents and trains the models on the train partitions.
    pub fn train<R: Rng + ?Sized>(
        documents_by_author: &IndexMap<String, Vec<Document>>,
        config: &TrainingConfig,
        rng: &mut R,
    ) -> Result<Self, QuillError> {
        if documents_by_author.is_empty() {
            return Err(QuillError::NoAuthors);
        }
        let splitter = CorpusSplitter::new(config.test_fraction)?;
        let corpus = Corpus::from_partitions(splitter.split(documents_by_author, rng));
        log::info!(
            "Split {} documents into {} train and {} test documents.",
            corpus.document_count(),
            corpus.train.len(),
            corpus.test.len()
        );
        Ok(Self::from_corpus(corpus, config.average_word_count_feature))
    }

    /// Trains the models on an existing split.
    pub fn from_corpus(corpus: Corpus, average_word_count_feature: bool) -> Self {
        let build = create_vocabulary(&corpus.train, &Tokenizer);
        log::info!("Created a vocabulary with {} tokens.", build.vocabulary.len());
        let models = FrequencyModel::new(build.vocabulary.len()).train(&corpus.author_list, build.statistics);
        let vocabulary = if average_word_count_feature {
            build.vocabulary.with_average_word_count_feature()
        } else {
            build.vocabulary
        };
        Self {
            corpus,
            vocabulary,
            models,
        }
    }

    pub fn classifier(&self) -> NaiveBayesClassifier<'_> {
        NaiveBayesClassifier::new(&self.models)
    }

    /// Classifies the whole test set.
    pub fn evaluate(&self) -> Evaluation {
        Evaluator::new(&self.models).evaluate(&self.corpus.test)
    }

    /// Classifies the test document at [index].
    pub fn predict_test_document(&self, index: usize) -> Result<Prediction, QuillError> {
        let document = self.corpus.test.get(index).ok_or(QuillError::IndexOutOfRange {
            index,
            len: self.corpus.test.len(),
        })?;
        Evaluator::new(&self.models)
            .predict(document)
            .ok_or(QuillError::NoAuthors)
    }

    /// The exporter over the vocabulary and author list of this pipeline.
    /// The averages are only set if the vocabulary carries the average word count feature.
    pub fn feature_exporter(&self, tolerance: f64) -> FeatureSetExporter<'_> {
        let exporter = FeatureSetExporter::new(&self.vocabulary, &self.corpus.author_list);
        if self.vocabulary.average_word_count_id().is_some() {
            exporter.with_average_word_counts(self.models.average_document_lengths(), tolerance)
        } else {
            exporter
        }
    }

    pub fn export_features(&self, tolerance: f64) -> Result<ExportedFeatures, QuillError> {
        let exporter = self.feature_exporter(tolerance);
        Ok(ExportedFeatures {
            train: exporter.export(&self.corpus.train)?,
            test: exporter.export(&self.corpus.test)?,
        })
    }
}

#[cfg(test)]
mod test {
    use crate::config::TrainingConfig;
    use crate::corpus::{Corpus, Document, DocumentId};
    use crate::error::QuillError;
    use crate::pipeline::TrainedPipeline;
    use indexmap::IndexMap;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn doc(id: usize, author: &str, content: &str) -> Document {
        Document::new(DocumentId(id), author, content)
    }

    fn corpus() -> Corpus {
        Corpus {
            train: vec![doc(0, "A", "the cat sat"), doc(2, "B", "the dog ran")],
            test: vec![doc(1, "A", "the cat"), doc(3, "B", "the dog ran")],
            author_list: vec!["A".to_string(), "B".to_string()],
        }
    }

    #[test]
    fn trains_on_the_train_set_only() {
        let pipeline = TrainedPipeline::from_corpus(corpus(), false);
        assert_eq!(5, pipeline.vocabulary.len());
        assert_eq!(Some(1), pipeline.vocabulary.id_of("the"));
        assert_eq!(Some(4), pipeline.vocabulary.id_of("dog"));
        let a = pipeline.models.get("A").unwrap();
        assert_eq!(0.25, a.likelihood("the"));
        assert_eq!(0.125, a.likelihood("dog"));
    }

    #[test]
    fn evaluates_the_test_set() {
        let pipeline = TrainedPipeline::from_corpus(corpus(), false);
        let evaluation = pipeline.evaluate();
        assert_eq!(2, evaluation.total());
        assert_eq!(2, evaluation.correct);
        assert_eq!("2/2 (1.0000)", evaluation.to_string());

        let prediction = pipeline.predict_test_document(1).unwrap();
        assert_eq!(DocumentId(3), prediction.document_id);
        assert_eq!("B", prediction.predicted_author);
    }

    #[test]
    fn index_out_of_range() {
        let pipeline = TrainedPipeline::from_corpus(corpus(), false);
        assert!(matches!(
            pipeline.predict_test_document(2),
            Err(QuillError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn exports_both_sets() {
        let pipeline = TrainedPipeline::from_corpus(corpus(), false);
        let features = pipeline.export_features(50.0).unwrap();
        assert_eq!("0 1:1 2:1 3:1\n1 1:1 4:1 5:1\n", features.train);
        assert_eq!("0 1:1 2:1\n1 1:1 4:1 5:1\n", features.test);
    }

    #[test]
    fn exports_average_word_count() {
        let pipeline = TrainedPipeline::from_corpus(corpus(), true);
        assert_eq!(5, pipeline.vocabulary.len());
        assert_eq!(Some(6), pipeline.vocabulary.average_word_count_id());
        let features = pipeline.export_features(0.5).unwrap();
        assert_eq!("0 1:1 2:1 3:1 6:1\n1 1:1 4:1 5:1 6:1\n", features.train);
        // "the cat" is one word shorter than the average of A
        assert_eq!("0 1:1 2:1\n1 1:1 4:1 5:1 6:1\n", features.test);
    }

    #[test]
    fn train_splits_per_author() {
        let mut documents = IndexMap::new();
        documents.insert(
            "A".to_string(),
            (0..5).map(|id| doc(id, "A", "one two three")).collect::<Vec<_>>(),
        );
        documents.insert(
            "B".to_string(),
            (5..10).map(|id| doc(id, "B", "four five six")).collect::<Vec<_>>(),
        );
        let config = TrainingConfig::default();
        let pipeline = TrainedPipeline::train(&documents, &config, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(6, pipeline.corpus.train.len());
        assert_eq!(4, pipeline.corpus.test.len());
        assert_eq!(vec!["A", "B"], pipeline.corpus.author_list);
        assert_eq!(6, pipeline.vocabulary.len());
        assert_eq!(1.0, pipeline.evaluate().accuracy());
    }

    #[test]
    fn train_rejects_empty_input() {
        let documents = IndexMap::new();
        assert!(matches!(
            TrainedPipeline::train(&documents, &TrainingConfig::default(), &mut StdRng::seed_from_u64(1)),
            Err(QuillError::NoAuthors)
        ));
    }
}
