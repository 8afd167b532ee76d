//! C2C log processor library
//!
//! Parses the Caveman2Cosmos `BBAI.log` into a per-player, per-city, per-turn
//! game model and bins `AiEvaluation.log` unit evaluations onto the turns
//! recovered from it.
//!
//! ```no_run
//! use std::path::Path;
//! use c2clog::parser::{LogProcessor, DEFAULT_PROGRESS_INTERVAL};
//!
//! # fn main() -> Result<(), c2clog::ParseError> {
//! let mut processor = LogProcessor::new();
//! processor.process_file(Path::new("BBAI.log"), &mut std::io::sink())?;
//! let mut log = processor.finish();
//! log.process_evaluation_file(Path::new("AiEvaluation.log"), None, DEFAULT_PROGRESS_INTERVAL)?;
//! println!("{} turns, {} evaluations", log.state.turns_found(), log.evaluation_count());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;

pub use config::Config;
pub use error::ParseError;
pub use model::GameState;
pub use parser::{LogProcessor, ProcessedLog};
