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


use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct QuillArgs {
    /// A command to initialize an exemplary config
    #[arg(long)]
    pub generate_example_config: bool,

    /// The mode of Quill
    #[command(subcommand)]
    pub mode: Option<RunMode>,
}

#[derive(Subcommand, Debug)]
pub enum RunMode {
    /// Trains on a folder with one sub folder per author and evaluates on the held out documents.
    TRAIN {
        /// The folder containing the required configs.
        #[arg(short, long)]
        config: Option<String>,
        /// The folder where the dumps are written to, overrides the config.
        #[arg(short, long)]
        output: Option<String>,
        /// The share of every authors documents used for testing, overrides the config.
        #[arg(short, long)]
        test_fraction: Option<f64>,
        /// The seed of the train/test split, overrides the config.
        #[arg(short, long)]
        seed: Option<u64>,
        /// Adds the average word count feature to the exported feature files.
        #[arg(long)]
        average_word_count: bool,
        /// overrides the log level from the config.
        #[arg(long)]
        override_log_level: Option<log::LevelFilter>,
        /// Log to file
        #[arg(long)]
        log_to_file: bool,
        /// The corpus folder.
        folder: String,
    },
    /// Classifies a single test document of a previous training.
    PREDICT {
        /// The folder containing the required configs.
        #[arg(short, long)]
        config: Option<String>,
        /// The folder of the training dumps, overrides the config.
        #[arg(short, long)]
        output: Option<String>,
        /// The position of the document in the test set.
        #[arg(short, long)]
        index: usize,
        /// The log level of Quill
        #[arg(long, default_value_t = log::LevelFilter::Info)]
        log_level: log::LevelFilter,
    },
    /// Prints the confusion matrix and the precision/recall/f-measure of saved predictions.
    ANALYZE {
        /// The predictions.json of a training.
        file: String,
    },
    /// Prints the metrics for the prediction file of an external svm classifier.
    #[command(name = "analyze-svm")]
    ANALYZESVM {
        /// The prediction file written by the svm.
        #[arg(short, long)]
        predictions: String,
        /// The feature file the svm predicted.
        #[arg(short, long)]
        test_data: String,
        /// A json list with the author names, or a corpus.json.
        #[arg(short, long)]
        class_list: String,
    },
}
