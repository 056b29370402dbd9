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


use crate::config::PathsConfig;
use crate::error::QuillError;
use crate::evaluation::Evaluation;
use crate::pipeline::TrainedPipeline;
use camino::Utf8Path;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Utf8Path, value: &T) -> Result<(), QuillError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, QuillError> {
    Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
}

/// Writes every artifact of a training run to the configured paths.
pub(crate) fn dump_training(
    paths: &PathsConfig,
    pipeline: &TrainedPipeline,
    evaluation: &Evaluation,
    average_word_count_tolerance: f64,
) -> Result<(), QuillError> {
    std::fs::create_dir_all(paths.root_path())?;
    write_json(&paths.file_corpus(), &pipeline.corpus)?;
    write_json(&paths.file_authors(), &pipeline.models)?;
    write_json(&paths.file_vocabulary(), &pipeline.vocabulary)?;

    let exporter = pipeline.feature_exporter(average_word_count_tolerance);
    let mut train = BufWriter::new(File::create(paths.file_train_features())?);
    exporter.write_to(&mut train, &pipeline.corpus.train)?;
    train.flush()?;
    let mut test = BufWriter::new(File::create(paths.file_test_features())?);
    exporter.write_to(&mut test, &pipeline.corpus.test)?;
    test.flush()?;

    write_json(&paths.file_predictions(), &evaluation.report())?;
    log::info!("Dumped the training to {}", paths.root_path());
    Ok(())
}

/// Loads the pipeline of a previous training from the configured paths.
pub(crate) fn load_training(paths: &PathsConfig) -> Result<TrainedPipeline, QuillError> {
    Ok(TrainedPipeline {
        corpus: read_json(&paths.file_corpus())?,
        models: read_json(&paths.file_authors())?,
        vocabulary: read_json(&paths.file_vocabulary())?,
    })
}
