#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod archive;
pub mod client;
pub mod config;
pub mod deletion;
pub mod error;
pub mod item;
pub mod retention;
pub mod run;

pub use config::Config;
pub use error::{LangolierError, Result};
pub use item::{Item, Kind, StatusId};
pub use retention::RetentionPolicy;
pub use run::{RunOptions, RunOrchestrator, RunSummary};
