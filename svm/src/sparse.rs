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


use crate::error::SparseLineError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use text_processing::vocabulary::TokenId;

/// A single line of a sparse feature file: `label id:value id:value ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseFeatureLine {
    pub label: usize,
    pub features: Vec<(TokenId, f64)>,
}

impl SparseFeatureLine {
    pub fn new(label: usize, features: Vec<(TokenId, f64)>) -> Self {
        Self { label, features }
    }

    /// Creates a line where every id in [ids] is an active binary feature.
    pub fn binary<I: IntoIterator<Item = TokenId>>(label: usize, ids: I) -> Self {
        Self::new(label, ids.into_iter().map(|id| (id, 1.0)).collect())
    }

    pub fn ids(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.features.iter().map(|(id, _)| *id)
    }
}

impl Display for SparseFeatureLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)?;
        for (id, value) in &self.features {
            write!(f, " {id}:{value}")?;
        }
        Ok(())
    }
}

/// Reads the leading label of a line, integral floats like `2.0` are accepted.
pub(crate) fn parse_label(value: &str) -> Result<usize, SparseLineError> {
    if let Ok(label) = value.parse::<usize>() {
        return Ok(label);
    }
    match value.parse::<f64>() {
        Ok(label) if label >= 0.0 && label.fract() == 0.0 => Ok(label as usize),
        _ => Err(SparseLineError::Label(value.to_string())),
    }
}

impl FromStr for SparseFeatureLine {
    type Err = SparseLineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // comments as used by svmlight
        let s = s.split('#').next().unwrap_or_default();
        let mut parts = s.split_whitespace();
        let label = parse_label(parts.next().ok_or(SparseLineError::Empty)?)?;
        let features = parts
            .map(|feature| {
                let (id, value) = feature
                    .split_once(':')
                    .ok_or_else(|| SparseLineError::Feature(feature.to_string()))?;
                match (id.parse::<TokenId>(), value.parse::<f64>()) {
                    (Ok(id), Ok(value)) => Ok((id, value)),
                    _ => Err(SparseLineError::Feature(feature.to_string())),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { label, features })
    }
}
