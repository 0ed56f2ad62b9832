//! Where script text comes from and goes back to.
//!
//! A [`ScriptSource`] hands out the raw script of one map and accepts the
//! final text for the same entry. Packed archive formats are not handled
//! here; a map is either an extracted directory or a bare script file.

pub mod discover;
pub mod fs;

pub use discover::{discover, open_source};
pub use fs::{DirSource, FileSource};

use crate::diff::{compute_diff, FileDiff};
use crate::error::Result;
use crate::search::ScriptSearch;

pub trait ScriptSource {
    /// Short map name used to label outputs.
    fn name(&self) -> &str;

    fn read_script(&self) -> Result<String>;

    fn write_script(&self, text: &str) -> Result<()>;
}

/// Result of running a modification over a source.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub before: String,
    pub after: String,
    pub diff: FileDiff,
}

impl UpdateOutcome {
    #[inline]
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

/// Index the script of `source` and hand it to `inspect` read-only.
pub fn inspect_script<S, T, F>(source: &S, inspect: F) -> Result<T>
where
    S: ScriptSource + ?Sized,
    F: FnOnce(&ScriptSearch, &str) -> Result<T>,
{
    let search = ScriptSearch::new(source.read_script()?)?;
    inspect(&search, source.name())
}

/// Index the script of `source`, let `modify` edit it, and write it back if
/// the text changed. Nothing is written when `modify` fails.
pub fn update_script<S, F>(source: &S, modify: F) -> Result<UpdateOutcome>
where
    S: ScriptSource + ?Sized,
    F: FnOnce(&mut ScriptSearch, &str) -> Result<()>,
{
    let before = source.read_script()?;
    let mut search = ScriptSearch::new(before.clone())?;
    modify(&mut search, source.name())?;
    let after = search.into_text();

    let diff = compute_diff(source.name(), &before, &after);
    if after != before {
        source.write_script(&after)?;
        tracing::info!(
            map = source.name(),
            added = diff.stats.lines_added,
            removed = diff.stats.lines_removed,
            "script updated"
        );
    } else {
        tracing::debug!(map = source.name(), "script unchanged; nothing written");
    }

    Ok(UpdateOutcome {
        before,
        after,
        diff,
    })
}
