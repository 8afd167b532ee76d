//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::parser::processor::DEFAULT_PROGRESS_INTERVAL;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub processing: ProcessingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Names of the game logs inside a log directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_primary_log")]
    pub primary_log: String,
    /// Looked up next to the primary log
    #[serde(default = "default_evaluation_log")]
    pub evaluation_log: String,
}

pub fn default_primary_log() -> String {
    "BBAI.log".to_string()
}

pub fn default_evaluation_log() -> String {
    "AiEvaluation.log".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            primary_log: default_primary_log(),
            evaluation_log: default_evaluation_log(),
        }
    }
}

/// Where results are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Annotated log file name, written next to the input unless overridden
    #[serde(default = "default_annotated_log")]
    pub annotated_log: String,
    /// Export directory name, relative to the annotated log
    #[serde(default = "default_json_dir")]
    pub json_dir: String,
    #[serde(default = "default_true")]
    pub export_json: bool,
    #[serde(default = "default_true")]
    pub export_csv: bool,
}

pub fn default_annotated_log() -> String {
    "BBAI_processed.log".to_string()
}

pub fn default_json_dir() -> String {
    "exports".to_string()
}

pub fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            annotated_log: default_annotated_log(),
            json_dir: default_json_dir(),
            export_json: true,
            export_csv: true,
        }
    }
}

/// Processing behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Lines between progress reports; 0 disables them
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
    /// Run the evaluation pass when the evaluation log exists
    #[serde(default = "default_true")]
    pub process_evaluations: bool,
}

pub fn default_progress_interval() -> usize {
    DEFAULT_PROGRESS_INTERVAL
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            progress_interval: default_progress_interval(),
            process_evaluations: true,
        }
    }
}

/// Log output of the tool itself
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, used when RUST_LOG is unset
    #[serde(default)]
    pub filter: Option<String>,
}

impl Config {
    /// Reject values that would make a run meaningless.
    pub fn validate(&self) -> Result<(), String> {
        if self.input.primary_log.trim().is_empty() {
            return Err("input.primary_log must not be empty".to_string());
        }
        if self.input.evaluation_log.trim().is_empty() {
            return Err("input.evaluation_log must not be empty".to_string());
        }
        if self.output.annotated_log.trim().is_empty() {
            return Err("output.annotated_log must not be empty".to_string());
        }
        Ok(())
    }
}
