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


use crate::model::{AuthorModels, AuthorProfile};
use text_processing::tokenizer::{TokenSequence, Tokenizer};

/// The best matching author of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification<'a> {
    pub author: &'a str,
    pub score: f64,
}

/// Attributes documents to the author with the highest aggregated word likelihood.
///
/// Note that this is not textbook naive bayes: the score of an author is the plain
/// sum of the smoothed likelihoods of all tokens, not a product or a sum of logs.
/// The comparison starts at 0 and uses `>=`, so on equal scores the author later in
/// the model order wins. Downstream accuracy numbers depend on both.
#[derive(Debug, Copy, Clone)]
pub struct NaiveBayesClassifier<'a> {
    models: &'a AuthorModels,
    tokenizer: Tokenizer,
}

impl<'a> NaiveBayesClassifier<'a> {
    pub fn new(models: &'a AuthorModels) -> Self {
        Self {
            models,
            tokenizer: Tokenizer,
        }
    }

    /// The sum of the likelihoods of all non-empty [tokens] under [profile].
    pub fn score(profile: &AuthorProfile, tokens: &TokenSequence) -> f64 {
        tokens.words().map(|token| profile.likelihood(token)).sum()
    }

    /// The score of every author, in model order.
    pub fn scores(&self, text: &str) -> Vec<Classification<'a>> {
        let tokens = self.tokenizer.tokenize(text);
        self.models
            .iter()
            .map(|(author, profile)| Classification {
                author,
                score: Self::score(profile, &tokens),
            })
            .collect()
    }

    /// Predicts the author of [text]. Returns none only if there are no authors at all.
    ///
    /// With an empty text every author scores 0 and the last author wins.
    pub fn predict(&self, text: &str) -> Option<Classification<'a>> {
        let tokens = self.tokenizer.tokenize(text);
        let mut best: Option<Classification<'a>> = None;
        let mut best_score = 0.0;
        for (author, profile) in self.models.iter() {
            let score = Self::score(profile, &tokens);
            if score >= best_score {
                best_score = score;
                best = Some(Classification { author, score });
            }
        }
        best
    }
}

#[cfg(test)]
mod test {
    use crate::classifier::NaiveBayesClassifier;
    use crate::model::{AuthorModels, FrequencyModel};
    use float_cmp::approx_eq;
    use text_processing::create_vocabulary;
    use text_processing::tokenizer::Tokenizer;

    fn models(train: &[(&str, &str)]) -> AuthorModels {
        let build = create_vocabulary(train, &Tokenizer);
        let authors: Vec<String> = build.statistics.keys().cloned().collect();
        FrequencyModel::new(build.vocabulary.len()).train(&authors, build.statistics)
    }

    #[test]
    fn predicts_the_matching_author() {
        let models = models(&[("A", "the cat sat"), ("B", "the dog ran")]);
        let classifier = NaiveBayesClassifier::new(&models);
        let scores = classifier.scores("the dog ran");
        assert!(approx_eq!(f64, 0.5, scores[0].score));
        assert!(approx_eq!(f64, 0.75, scores[1].score));
        let prediction = classifier.predict("the dog ran").unwrap();
        assert_eq!("B", prediction.author);
        assert!(approx_eq!(f64, 0.75, prediction.score));
        assert_eq!("A", classifier.predict("the cat").unwrap().author);
    }

    #[test]
    fn ties_go_to_the_later_author() {
        let models = models(&[("A", "x"), ("B", "y"), ("C", "z")]);
        let classifier = NaiveBayesClassifier::new(&models);
        assert_eq!("C", classifier.predict("unknown words").unwrap().author);
        let empty = classifier.predict("").unwrap();
        assert_eq!("C", empty.author);
        assert_eq!(0.0, empty.score);
    }

    #[test]
    fn is_deterministic() {
        let models = models(&[("A", "a b c a"), ("B", "c d e"), ("A", "b b")]);
        let classifier = NaiveBayesClassifier::new(&models);
        let first = classifier.predict("a c e, b").unwrap();
        for _ in 0..10 {
            assert_eq!(first, classifier.predict("a c e, b").unwrap());
        }
    }

    #[test]
    fn untrained_author_never_fails() {
        let build = create_vocabulary(&[("A", "some words words here")], &Tokenizer);
        let models = FrequencyModel::new(build.vocabulary.len())
            .train(&["A", "Empty"], build.statistics);
        let classifier = NaiveBayesClassifier::new(&models);
        let scores = classifier.scores("words nobody knows");
        assert_eq!("Empty", scores[1].author);
        assert!(approx_eq!(f64, 1.0, scores[1].score));
        assert_eq!("A", classifier.predict("words words").unwrap().author);
    }

    #[test]
    fn no_authors() {
        let models = AuthorModels::default();
        assert_eq!(None, NaiveBayesClassifier::new(&models).predict("anything"));
    }
}
