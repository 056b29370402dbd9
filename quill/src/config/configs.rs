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


use crate::config::{IngestConfig, PathsConfig, SystemConfig, TrainingConfig};
use camino::Utf8Path;
use config::Config;
use serde::{Deserialize, Serialize};

/// A collection of all config used in a run.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename(serialize = "Config"))]
pub struct Configs {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub training: TrainingConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl Configs {
    pub fn new(
        system: SystemConfig,
        paths: PathsConfig,
        training: TrainingConfig,
        ingest: IngestConfig,
    ) -> Self {
        Self {
            system,
            paths,
            training,
            ingest,
        }
    }

    /// Loads the config from [folder], the files in the working directory and the environment.
    pub fn load_from<P: AsRef<Utf8Path>>(folder: P) -> Result<Self, config::ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("./quill").required(false))
            .add_source(config::File::with_name(folder.as_ref().join("quill").as_str()).required(false))
            .add_source(config::File::with_name(folder.as_ref().join("config").as_str()).required(false))
            .add_source(config::Environment::with_prefix("QUILL").separator("."))
            .build()?
            .try_deserialize()
    }

    /// Tries to find a config at the default paths, falls back to the default config.
    pub fn discover_or_default() -> Result<Self, config::ConfigError> {
        match Config::builder()
            .add_source(config::File::with_name("./quill"))
            .add_source(config::File::with_name("./quill_data/quill").required(false))
            .add_source(config::Environment::with_prefix("QUILL").separator("."))
            .build()
        {
            Ok(value) => value.try_deserialize(),
            Err(_) => Ok(Default::default()),
        }
    }
}
