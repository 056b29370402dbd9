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


mod metrics;

pub use metrics::{ClassMetrics, ConfusionMatrix, MetricsReport};

use crate::classifier::NaiveBayesClassifier;
use crate::corpus::{Document, DocumentId};
use crate::model::AuthorModels;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The prediction for a single test document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub document_id: DocumentId,
    pub actual_author: String,
    pub predicted_author: String,
    pub score: f64,
}

impl Prediction {
    pub fn is_correct(&self) -> bool {
        self.actual_author == self.predicted_author
    }
}

impl Display for Prediction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Document {}: actual {}, predicted {} (score {})",
            self.document_id, self.actual_author, self.predicted_author, self.score
        )
    }
}

/// The result of classifying a test set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub correct: usize,
    pub predictions: Vec<Prediction>,
}

impl Evaluation {
    pub fn total(&self) -> usize {
        self.predictions.len()
    }

    /// The share of correct predictions, 0 for an empty test set.
    pub fn accuracy(&self) -> f64 {
        if self.predictions.is_empty() {
            0.0
        } else {
            self.correct as f64 / self.total() as f64
        }
    }

    pub fn report(&self) -> EvaluationReport {
        EvaluationReport::from(self)
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} ({:.4})",
            self.correct,
            self.total(),
            self.accuracy()
        )
    }
}

/// Runs the classifier over a test set.
#[derive(Debug, Copy, Clone)]
pub struct Evaluator<'a> {
    classifier: NaiveBayesClassifier<'a>,
}

impl<'a> Evaluator<'a> {
    pub fn new(models: &'a AuthorModels) -> Self {
        Self {
            classifier: NaiveBayesClassifier::new(models),
        }
    }

    /// Classifies a single document, none if there are no authors.
    pub fn predict(&self, document: &Document) -> Option<Prediction> {
        let classification = self.classifier.predict(document.content())?;
        Some(Prediction {
            document_id: document.id(),
            actual_author: document.author().to_string(),
            predicted_author: classification.author.to_string(),
            score: classification.score,
        })
    }

    pub fn evaluate<'d, I: IntoIterator<Item = &'d Document>>(&self, test_set: I) -> Evaluation {
        let mut evaluation = Evaluation::default();
        for document in test_set {
            match self.predict(document) {
                Some(prediction) => {
                    if prediction.is_correct() {
                        evaluation.correct += 1;
                    }
                    log::trace!("{prediction}");
                    evaluation.predictions.push(prediction);
                }
                None => {
                    log::warn!("No author available to classify document {}.", document.id());
                }
            }
        }
        log::info!("Accuracy: {evaluation}");
        evaluation
    }
}

/// The serialized form of an evaluation, compatible with external analyzers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub actual_class: Vec<String>,
    pub predicted_class: Vec<String>,
    #[serde(default)]
    pub correct: usize,
    #[serde(default)]
    pub total: usize,
}

impl EvaluationReport {
    pub fn new(actual_class: Vec<String>, predicted_class: Vec<String>) -> Self {
        let correct = actual_class
            .iter()
            .zip(&predicted_class)
            .filter(|(actual, predicted)| actual == predicted)
            .count();
        let total = actual_class.len();
        Self {
            actual_class,
            predicted_class,
            correct,
            total,
        }
    }

    pub fn metrics(&self) -> MetricsReport {
        MetricsReport::new(&self.actual_class, &self.predicted_class)
    }
}

impl From<&Evaluation> for EvaluationReport {
    fn from(value: &Evaluation) -> Self {
        Self {
            actual_class: value
                .predictions
                .iter()
                .map(|value| value.actual_author.clone())
                .collect(),
            predicted_class: value
                .predictions
                .iter()
                .map(|value| value.predicted_author.clone())
                .collect(),
            correct: value.correct,
            total: value.total(),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::corpus::{Document, DocumentId};
    use crate::evaluation::{EvaluationReport, Evaluator};
    use crate::model::{AuthorModels, FrequencyModel};
    use text_processing::create_vocabulary;
    use text_processing::tokenizer::Tokenizer;

    fn models() -> AuthorModels {
        let build = create_vocabulary(
            &[("A", "the cat sat on the mat"), ("B", "a dog ran to the park")],
            &Tokenizer,
        );
        FrequencyModel::new(build.vocabulary.len()).train(&["A", "B"], build.statistics)
    }

    #[test]
    fn counts_correct_predictions() {
        let models = models();
        let test = vec![
            Document::new(DocumentId(0), "A", "the cat on the mat"),
            Document::new(DocumentId(1), "B", "a dog in the park"),
            Document::new(DocumentId(2), "A", "dog ran park"),
        ];
        let evaluation = Evaluator::new(&models).evaluate(&test);
        assert_eq!(3, evaluation.total());
        assert_eq!(2, evaluation.correct);
        assert_eq!(2.0 / 3.0, evaluation.accuracy());
        assert_eq!("B", evaluation.predictions[2].predicted_author);
        assert_eq!(DocumentId(2), evaluation.predictions[2].document_id);
        assert_eq!("2/3 (0.6667)", evaluation.to_string());

        let report = evaluation.report();
        assert_eq!(vec!["A", "B", "A"], report.actual_class);
        assert_eq!(vec!["A", "B", "B"], report.predicted_class);
        assert_eq!(2, report.correct);
    }

    #[test]
    fn empty_test_set() {
        let models = models();
        let evaluation = Evaluator::new(&models).evaluate(&Vec::new());
        assert_eq!(0, evaluation.total());
        assert_eq!(0.0, evaluation.accuracy());
    }

    #[test]
    fn report_json_shape() {
        let report = EvaluationReport::new(
            vec!["a".to_string(), "b".to_string()],
            vec!["a".to_string(), "a".to_string()],
        );
        assert_eq!(1, report.correct);
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            r#"{"actualClass":["a","b"],"predictedClass":["a","a"],"correct":1,"total":2}"#,
            json
        );
        let minimal: EvaluationReport =
            serde_json::from_str(r#"{"actualClass":["x"],"predictedClass":["y"]}"#).unwrap();
        assert_eq!(0, minimal.correct);
        assert_eq!(vec!["x"], minimal.actual_class);
    }
}
