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


use indexmap::{IndexMap, IndexSet};
use std::fmt::{Display, Formatter};

/// Counts of actual (rows) against predicted (columns) classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    classes: IndexSet<String>,
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// The classes are ordered by first appearance, actual classes before predicted ones.
    pub fn new<S: AsRef<str>>(actual: &[S], predicted: &[S]) -> Self {
        let classes: IndexSet<String> = actual
            .iter()
            .chain(predicted.iter())
            .map(|value| value.as_ref().to_string())
            .collect();
        let mut counts = vec![vec![0usize; classes.len()]; classes.len()];
        for (a, p) in actual.iter().zip(predicted.iter()) {
            // both are contained by construction
            if let (Some(row), Some(col)) = (
                classes.get_index_of(a.as_ref()),
                classes.get_index_of(p.as_ref()),
            ) {
                counts[row][col] += 1;
            }
        }
        Self { classes, counts }
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn count(&self, actual: &str, predicted: &str) -> usize {
        match (
            self.classes.get_index_of(actual),
            self.classes.get_index_of(predicted),
        ) {
            (Some(row), Some(col)) => self.counts[row][col],
            _ => 0,
        }
    }

    fn row_sum(&self, row: usize) -> usize {
        self.counts[row].iter().sum()
    }

    fn col_sum(&self, col: usize) -> usize {
        self.counts.iter().map(|row| row[col]).sum()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// The true positives, false positives and false negatives of every class.
    pub fn class_counts(&self) -> IndexMap<&str, (usize, usize, usize)> {
        (0..self.classes.len())
            .map(|idx| {
                let tp = self.counts[idx][idx];
                let fp = self.col_sum(idx) - tp;
                let fn_ = self.row_sum(idx) - tp;
                (self.classes[idx].as_str(), (tp, fp, fn_))
            })
            .collect()
    }
}

const HEADER: &str = "Actual\\Predicted";

impl Display for ConfusionMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|value| value.chars().count())
            .chain([HEADER.len(), self.total().to_string().len()])
            .max()
            .unwrap_or(HEADER.len())
            + 1;
        write!(f, "{HEADER:>width$}")?;
        for class in &self.classes {
            write!(f, "{class:>width$}")?;
        }
        writeln!(f, "{:>width$}", "All")?;
        for (row, class) in self.classes.iter().enumerate() {
            write!(f, "{class:>width$}")?;
            for value in &self.counts[row] {
                write!(f, "{value:>width$}")?;
            }
            writeln!(f, "{:>width$}", self.row_sum(row))?;
        }
        write!(f, "{:>width$}", "All")?;
        for col in 0..self.classes.len() {
            write!(f, "{:>width$}", self.col_sum(col))?;
        }
        writeln!(f, "{:>width$}", self.total())
    }
}

/// Precision, recall and f-measure
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f_measure: f64,
}

impl ClassMetrics {
    /// Every ratio with a zero denominator is 0.
    pub fn from_counts(tp: usize, fp: usize, fn_: usize) -> Self {
        let precision = if tp + fp != 0 {
            tp as f64 / (tp + fp) as f64
        } else {
            0.0
        };
        let recall = if tp + fn_ != 0 {
            tp as f64 / (tp + fn_) as f64
        } else {
            0.0
        };
        let f_measure = if precision + recall != 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            precision,
            recall,
            f_measure,
        }
    }
}

impl Display for ClassMetrics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\tPrecision: {}", self.precision)?;
        writeln!(f, "\tRecall: {}", self.recall)?;
        writeln!(f, "\tF-Measure: {}", self.f_measure)
    }
}

/// All metrics over a set of predictions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsReport {
    pub confusion: ConfusionMatrix,
    pub per_class: IndexMap<String, ClassMetrics>,
    pub micro: ClassMetrics,
    pub macro_: ClassMetrics,
}

impl MetricsReport {
    /// The per class metrics and the macro average cover the actual classes only, a class
    /// that is only ever predicted adds to the false positives of the micro average.
    pub fn new<S: AsRef<str>>(actual: &[S], predicted: &[S]) -> Self {
        if actual.len() != predicted.len() {
            log::warn!(
                "Got {} actual but {} predicted classes, the surplus is ignored.",
                actual.len(),
                predicted.len()
            );
        }
        let confusion = ConfusionMatrix::new(actual, predicted);
        let counts = confusion.class_counts();

        let (tp, fp, fn_) = counts
            .values()
            .fold((0, 0, 0), |(tp, fp, fn_), (a, b, c)| (tp + a, fp + b, fn_ + c));
        let micro = ClassMetrics::from_counts(tp, fp, fn_);

        let actual_classes: IndexSet<&str> = actual.iter().map(|value| value.as_ref()).collect();
        let per_class: IndexMap<String, ClassMetrics> = counts
            .iter()
            .filter(|(class, _)| actual_classes.contains(*class))
            .map(|(class, (tp, fp, fn_))| (class.to_string(), ClassMetrics::from_counts(*tp, *fp, *fn_)))
            .collect();

        let macro_ = if per_class.is_empty() {
            ClassMetrics::default()
        } else {
            let n = per_class.len() as f64;
            let (precision, recall, f_measure) = per_class.values().fold(
                (0.0, 0.0, 0.0),
                |(p, r, f), value| (p + value.precision, r + value.recall, f + value.f_measure),
            );
            ClassMetrics {
                precision: precision / n,
                recall: recall / n,
                f_measure: f_measure / n,
            }
        };

        Self {
            confusion,
            per_class,
            micro,
            macro_,
        }
    }
}

impl Display for MetricsReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.confusion)?;
        for (class, metrics) in &self.per_class {
            writeln!(f, "For {class}:")?;
            writeln!(f, "{metrics}")?;
        }
        writeln!(f, "Micro-Average Results:")?;
        writeln!(f, "{}", self.micro)?;
        writeln!(f, "Macro-Average Results:")?;
        write!(f, "{}", self.macro_)
    }
}
