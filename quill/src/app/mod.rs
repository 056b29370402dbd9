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


mod args;
mod constants;
mod dump;
mod instruction;
mod logging;
mod runner;

pub use args::{QuillArgs, RunMode};
pub use instruction::{ApplicationMode, Instruction, RunInstruction};
pub use runner::{execute, train};

use crate::app::constants::{create_example_config, write_example_config};
use crate::app::logging::configure_logging;
use crate::config::Configs;
use crate::error::QuillError;
use camino::Utf8PathBuf;
use std::process::ExitCode;

pub fn exec_args(args: QuillArgs) -> ExitCode {
    match prepare_instruction(args) {
        Ok(Instruction::RunInstruction(instruction)) => {
            if let Err(err) = configure_logging(&instruction.config) {
                eprintln!("Failed to configure the logging: {err}");
            }
            match execute(instruction) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    log::error!("Failed with: {err:#}");
                    eprintln!("Error: {err:#}");
                    ExitCode::FAILURE
                }
            }
        }
        Ok(Instruction::Nothing) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Failed with: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_configs(folder: Option<String>) -> Result<Configs, QuillError> {
    Ok(match folder {
        None => Configs::discover_or_default()?,
        Some(path) => Configs::load_from(path)?,
    })
}

pub(crate) fn prepare_instruction(args: QuillArgs) -> Result<Instruction, QuillError> {
    if let Some(mode) = args.mode {
        match mode {
            RunMode::TRAIN {
                config: configs_folder,
                output,
                test_fraction,
                seed,
                average_word_count,
                override_log_level: log_level,
                log_to_file,
                folder,
            } => {
                let mut config = load_configs(configs_folder)?;
                if let Some(output) = output {
                    config.paths.root = Utf8PathBuf::from(output);
                }
                if let Some(test_fraction) = test_fraction {
                    config.training.test_fraction = test_fraction;
                }
                if seed.is_some() {
                    config.training.seed = seed;
                }
                if average_word_count {
                    config.training.average_word_count_feature = true;
                }
                if let Some(log_level) = log_level {
                    config.system.log_level = log_level;
                }
                config.system.log_to_file |= log_to_file;

                Ok(Instruction::RunInstruction(RunInstruction {
                    mode: ApplicationMode::Train {
                        folder: Utf8PathBuf::from(folder),
                    },
                    config,
                }))
            }
            RunMode::PREDICT {
                config: configs_folder,
                output,
                index,
                log_level,
            } => {
                let mut config = load_configs(configs_folder)?;
                if let Some(output) = output {
                    config.paths.root = Utf8PathBuf::from(output);
                }
                config.system.log_level = log_level;
                config.system.log_to_file = false;
                Ok(Instruction::RunInstruction(RunInstruction {
                    mode: ApplicationMode::Predict { index },
                    config,
                }))
            }
            RunMode::ANALYZE { file } => Ok(Instruction::RunInstruction(RunInstruction {
                mode: ApplicationMode::Analyze {
                    file: Utf8PathBuf::from(file),
                },
                config: Configs::default(),
            })),
            RunMode::ANALYZESVM {
                predictions,
                test_data,
                class_list,
            } => Ok(Instruction::RunInstruction(RunInstruction {
                mode: ApplicationMode::AnalyzeSvm {
                    predictions: Utf8PathBuf::from(predictions),
                    test_data: Utf8PathBuf::from(test_data),
                    class_list: Utf8PathBuf::from(class_list),
                },
                config: Configs::default(),
            })),
        }
    } else if args.generate_example_config {
        let config = create_example_config();
        write_example_config(&config)?;
        println!(
            "Wrote the example config to {}",
            config.paths.root_path().join("example_config.json")
        );
        Ok(Instruction::Nothing)
    } else {
        Ok(Instruction::Nothing)
    }
}
