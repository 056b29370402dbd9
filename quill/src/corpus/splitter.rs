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


use crate::corpus::Document;
use crate::error::QuillError;
use indexmap::IndexMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The default share of the documents of every author used as test data.
pub const DEFAULT_TEST_FRACTION: f64 = 0.4;

/// The train and test documents of a single author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub train: Vec<Document>,
    pub test: Vec<Document>,
}

/// Splits the documents of every author into train and test data.
///
/// For every author `floor(count * test_fraction)` documents are drawn uniformly
/// without replacement from the remaining train pool, one after another.
/// The remaining documents keep their original order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CorpusSplitter {
    test_fraction: f64,
}

impl Default for CorpusSplitter {
    fn default() -> Self {
        Self {
            test_fraction: DEFAULT_TEST_FRACTION,
        }
    }
}

impl CorpusSplitter {
    pub fn new(test_fraction: f64) -> Result<Self, QuillError> {
        if (0.0..=1.0).contains(&test_fraction) {
            Ok(Self { test_fraction })
        } else {
            Err(QuillError::InvalidTestFraction(test_fraction))
        }
    }

    #[inline]
    pub fn test_fraction(&self) -> f64 {
        self.test_fraction
    }

    /// The number of test documents for an author with [count] documents.
    pub fn test_count(&self, count: usize) -> usize {
        (count as f64 * self.test_fraction).floor() as usize
    }

    /// Partitions the [documents] of a single author.
    pub fn split_documents<R: Rng + ?Sized>(&self, documents: &[Document], rng: &mut R) -> Partition {
        let test_count = self.test_count(documents.len());
        let mut train = documents.to_vec();
        let mut test = Vec::with_capacity(test_count);
        for _ in 0..test_count {
            let selected = rng.gen_range(0..train.len());
            test.push(train.remove(selected));
        }
        Partition { train, test }
    }

    /// Partitions the documents of every author independently, the author order is kept.
    pub fn split<R: Rng + ?Sized>(
        &self,
        documents_by_author: &IndexMap<String, Vec<Document>>,
        rng: &mut R,
    ) -> IndexMap<String, Partition> {
        documents_by_author
            .iter()
            .map(|(author, documents)| {
                let partition = self.split_documents(documents, &mut *rng);
                log::debug!(
                    "Split {author}: {} train, {} test",
                    partition.train.len(),
                    partition.test.len()
                );
                (author.clone(), partition)
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use crate::corpus::{CorpusSplitter, Document, DocumentId};
    use crate::error::QuillError;
    use indexmap::IndexMap;
    use itertools::Itertools;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn documents(author: &str, range: std::ops::Range<usize>) -> Vec<Document> {
        range
            .map(|id| Document::new(DocumentId(id), author, format!("doc {id}")))
            .collect()
    }

    fn ids(documents: &[Document]) -> Vec<usize> {
        documents.iter().map(|value| value.id().0).collect()
    }

    #[test]
    fn partition_is_complete_and_disjoint() {
        let mut by_author = IndexMap::new();
        by_author.insert("a".to_string(), documents("a", 0..10));
        by_author.insert("b".to_string(), documents("b", 10..13));
        by_author.insert("c".to_string(), documents("c", 13..14));
        by_author.insert("d".to_string(), Vec::new());

        let splitter = CorpusSplitter::default();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let partitions = splitter.split(&by_author, &mut rng);
            assert_eq!(
                by_author.keys().collect_vec(),
                partitions.keys().collect_vec()
            );
            for (author, original) in &by_author {
                let partition = &partitions[author];
                assert_eq!(original.len(), partition.train.len() + partition.test.len());
                assert_eq!(splitter.test_count(original.len()), partition.test.len());
                let train: HashSet<_> = ids(&partition.train).into_iter().collect();
                let test: HashSet<_> = ids(&partition.test).into_iter().collect();
                assert!(train.is_disjoint(&test));
                let all: HashSet<_> = train.union(&test).copied().collect();
                assert_eq!(ids(original).into_iter().collect::<HashSet<_>>(), all);
            }
        }
        // the input is untouched
        assert_eq!(10, by_author["a"].len());
    }

    #[test]
    fn test_counts_are_floored() {
        let splitter = CorpusSplitter::default();
        assert_eq!(0, splitter.test_count(0));
        assert_eq!(0, splitter.test_count(2));
        assert_eq!(1, splitter.test_count(3));
        assert_eq!(4, splitter.test_count(10));
    }

    #[test]
    fn draws_from_the_shrinking_pool() {
        // StepRng always yields zero, so every draw takes the first remaining document
        let mut rng = StepRng::new(0, 0);
        let splitter = CorpusSplitter::new(0.5).unwrap();
        let partition = splitter.split_documents(&documents("a", 0..6), &mut rng);
        assert_eq!(vec![0, 1, 2], ids(&partition.test));
        assert_eq!(vec![3, 4, 5], ids(&partition.train));
    }

    #[test]
    fn same_seed_same_split() {
        let docs = documents("a", 0..25);
        let splitter = CorpusSplitter::default();
        let first = splitter.split_documents(&docs, &mut StdRng::seed_from_u64(7));
        let second = splitter.split_documents(&docs, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_invalid_fractions() {
        assert!(matches!(
            CorpusSplitter::new(1.5),
            Err(QuillError::InvalidTestFraction(_))
        ));
        assert!(CorpusSplitter::new(f64::NAN).is_err());
        let everything = CorpusSplitter::new(1.0).unwrap();
        let partition =
            everything.split_documents(&documents("a", 0..4), &mut StdRng::seed_from_u64(1));
        assert!(partition.train.is_empty());
        assert_eq!(4, partition.test.len());
    }
}
