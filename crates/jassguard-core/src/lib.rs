pub mod config;
pub mod detect;
pub mod diff;
pub mod error;
pub mod inject;
pub mod rules;
pub mod search;
pub mod source;

pub use config::Config;
pub use detect::{scan, Finding, ScanReport};
pub use diff::{compute_diff, DiffRegion, DiffStats, FileDiff};
pub use error::{Error, Result};
pub use inject::{inject, InjectionPack};
pub use rules::{Rule, RuleCatalog, Severity};
pub use search::prelude::*;
pub use source::{
    discover, inspect_script, open_source, update_script, DirSource, FileSource, ScriptSource,
    UpdateOutcome,
};
