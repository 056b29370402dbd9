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


use crate::config::{Configs, IngestConfig, PathsConfig, SystemConfig, TrainingConfig};
use std::fs::File;
use std::io::BufWriter;

pub fn create_example_config() -> Configs {
    Configs {
        system: SystemConfig {
            log_level: log::LevelFilter::Debug,
            log_to_file: true,
        },
        paths: PathsConfig::default(),
        training: TrainingConfig {
            test_fraction: 0.4,
            seed: Some(42),
            average_word_count_feature: true,
            average_word_count_tolerance: 50.0,
        },
        ingest: IngestConfig {
            encoding: Some("windows-1252".to_string()),
            ..IngestConfig::default()
        },
    }
}

/// Writes [config] as example_config.json to its root folder.
pub fn write_example_config(config: &Configs) -> std::io::Result<()> {
    let root = config.paths.root_path();
    std::fs::create_dir_all(root)?;
    let file = File::options()
        .create(true)
        .write(true)
        .truncate(true)
        .open(root.join("example_config.json"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), config)?;
    Ok(())
}
