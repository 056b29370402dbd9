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


use crate::config::Configs;
use camino::Utf8PathBuf;

#[derive(Debug)]
pub enum Instruction {
    RunInstruction(RunInstruction),
    Nothing,
}

#[derive(Debug)]
pub struct RunInstruction {
    pub mode: ApplicationMode,
    pub config: Configs,
}

/// What a run of the application does.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplicationMode {
    Train {
        folder: Utf8PathBuf,
    },
    Predict {
        index: usize,
    },
    Analyze {
        file: Utf8PathBuf,
    },
    AnalyzeSvm {
        predictions: Utf8PathBuf,
        test_data: Utf8PathBuf,
        class_list: Utf8PathBuf,
    },
}
