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


//! Authorship attribution over smoothed word likelihoods.
//!
//! The score of an author is the plain sum of the smoothed likelihoods of all tokens,
//! not a product or a sum of logs as in textbook naive bayes.
//!
//! A corpus folder with one sub folder per author is split into train and test documents,
//! the train documents build the vocabulary and one frequency profile per author.
//! The test documents are classified and evaluated, the features can be exported
//! for external svm classifiers.

pub mod app;
pub mod classifier;
pub mod config;
pub mod corpus;
pub mod error;
pub mod evaluation;
pub mod ingest;
pub mod model;
pub mod pipeline;

pub use app::exec_args;
