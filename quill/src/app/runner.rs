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


use crate::app::dump::{dump_training, load_training, read_json};
use crate::app::instruction::{ApplicationMode, RunInstruction};
use crate::config::Configs;
use crate::error::QuillError;
use crate::evaluation::{Evaluation, EvaluationReport};
use crate::ingest::ingest_folder;
use crate::pipeline::TrainedPipeline;
use anyhow::Context;
use camino::Utf8Path;
use rand::rngs::StdRng;
use rand::SeedableRng;
use svm::SvmPredictions;

/// Executes a single [RunInstruction].
pub fn execute(instruction: RunInstruction) -> anyhow::Result<()> {
    let RunInstruction { mode, config } = instruction;
    match mode {
        ApplicationMode::Train { folder } => {
            let evaluation = train(&folder, &config)?;
            println!("Accuracy: {evaluation}");
        }
        ApplicationMode::Predict { index } => {
            let pipeline = load_training(&config.paths).with_context(|| {
                format!("Failed to load the training from {}", config.paths.root_path())
            })?;
            let prediction = pipeline.predict_test_document(index)?;
            println!("{prediction}");
        }
        ApplicationMode::Analyze { file } => {
            let report: EvaluationReport =
                read_json(&file).with_context(|| format!("Failed to read {file}"))?;
            println!("{}", report.metrics());
        }
        ApplicationMode::AnalyzeSvm {
            predictions,
            test_data,
            class_list,
        } => {
            let predictions = SvmPredictions::load(&predictions, &test_data, &class_list)
                .with_context(|| format!("Failed to read the svm results {predictions}"))?;
            let report = EvaluationReport::new(predictions.actual, predictions.predicted);
            println!("Accuracy: {}/{}", report.correct, report.total);
            println!("{}", report.metrics());
        }
    }
    Ok(())
}

/// Ingests [folder], trains, evaluates and dumps everything.
pub fn train(folder: &Utf8Path, config: &Configs) -> anyhow::Result<Evaluation> {
    let ingested = ingest_folder(folder, &config.ingest)
        .with_context(|| format!("Failed to ingest {folder}"))?;
    for failure in &ingested.failures {
        log::debug!("Ingestion failure: {failure}");
    }
    if ingested.document_count() == 0 {
        return Err(QuillError::EmptyCorpus(folder.to_string()).into());
    }

    let mut rng = match config.training.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let pipeline = TrainedPipeline::train(&ingested.documents_by_author, &config.training, &mut rng)?;
    let evaluation = pipeline.evaluate();
    dump_training(
        &config.paths,
        &pipeline,
        &evaluation,
        config.training.average_word_count_tolerance,
    )
    .with_context(|| format!("Failed to dump the training to {}", config.paths.root_path()))?;
    Ok(evaluation)
}
