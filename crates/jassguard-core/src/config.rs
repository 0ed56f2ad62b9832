//! Run configuration, loaded from an optional TOML file.
//!
//! ```toml
//! input_dir = "maps"
//! output_dir = "reports"
//! filter = "*.j"
//! check_subfolders = true
//! log_level = "debug"
//! create_verification_files = true
//! pack_dir = "pack"
//! rules = "rules.toml"
//! ```

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where maps are discovered when no paths are given.
    pub input_dir: Utf8PathBuf,
    /// Where reports and verification files are written.
    pub output_dir: Utf8PathBuf,
    /// Glob applied to map names during discovery.
    pub filter: String,
    pub check_subfolders: bool,
    /// Default tracing directive; `RUST_LOG` still wins.
    pub log_level: Option<String>,
    pub create_verification_files: bool,
    /// Directory holding `globals.txt`, `endglobals.txt` and `main.txt`.
    pub pack_dir: Option<Utf8PathBuf>,
    /// Rule catalog file; the builtin catalog is used when unset.
    pub rules: Option<Utf8PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: Utf8PathBuf::from("."),
            output_dir: Utf8PathBuf::from("output"),
            filter: "*".to_owned(),
            check_subfolders: false,
            log_level: None,
            create_verification_files: true,
            pack_dir: None,
            rules: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(%path, "loaded config");
        Ok(config)
    }
}
