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


pub mod statistics;
pub mod tokenizer;
pub mod vocabulary;

use crate::tokenizer::Tokenizer;
use crate::vocabulary::{LabeledText, VocabularyBuild, VocabularyBuilder};

/// Builds the vocabulary over the [train_data] and collects the token statistics
/// of every label in the same pass.
pub fn create_vocabulary<'a, I, T>(train_data: I, tokenizer: &Tokenizer) -> VocabularyBuild
where
    I: IntoIterator<Item = &'a T>,
    T: LabeledText + 'a,
{
    let mut builder = VocabularyBuilder::new(tokenizer);
    for entry in train_data {
        builder.add(entry);
    }
    builder.build()
}

