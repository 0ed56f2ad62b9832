//! Line-based diffing of a script before and after modification, using the
//! `similar` crate. Used to summarize what an update changed.

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

/// A region of change in a script diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRegion {
    /// 1-based start line in the original content.
    pub original_start: usize,
    /// 1-based start line in the modified content.
    pub modified_start: usize,
    /// The actual lines removed from the original content.
    pub removed_lines: Vec<String>,
    /// The actual lines added to the modified content.
    pub added_lines: Vec<String>,
}

/// Summary statistics for a script diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub lines_added: usize,
    pub lines_removed: usize,
    pub regions_changed: usize,
}

/// A complete script diff, including stats and regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    pub name: String,
    pub stats: DiffStats,
    pub regions: Vec<DiffRegion>,
}

impl FileDiff {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[derive(Default)]
struct OpenRegion {
    original_start: usize,
    modified_start: usize,
    removed: Vec<String>,
    added: Vec<String>,
}

impl OpenRegion {
    fn close(self) -> DiffRegion {
        DiffRegion {
            original_start: self.original_start,
            modified_start: self.modified_start,
            removed_lines: self.removed,
            added_lines: self.added,
        }
    }
}

fn trim_terminator(line: &str) -> String {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
        .to_owned()
}

/// Compute a line-based diff between two versions of a script.
pub fn compute_diff(name: impl Into<String>, original: &str, modified: &str) -> FileDiff {
    let diff = TextDiff::from_lines(original, modified);

    let mut regions = Vec::new();
    let mut current: Option<OpenRegion> = None;
    let mut original_line = 1;
    let mut modified_line = 1;

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Equal => {
                if let Some(region) = current.take() {
                    regions.push(region.close());
                }
                original_line += 1;
                modified_line += 1;
            }
            ChangeTag::Delete => {
                let region = current.get_or_insert_with(|| OpenRegion {
                    original_start: original_line,
                    modified_start: modified_line,
                    ..OpenRegion::default()
                });
                region.removed.push(trim_terminator(change.value()));
                original_line += 1;
            }
            ChangeTag::Insert => {
                let region = current.get_or_insert_with(|| OpenRegion {
                    original_start: original_line,
                    modified_start: modified_line,
                    ..OpenRegion::default()
                });
                region.added.push(trim_terminator(change.value()));
                modified_line += 1;
            }
        }
    }
    if let Some(region) = current {
        regions.push(region.close());
    }

    let stats = DiffStats {
        lines_added: regions.iter().map(|r| r.added_lines.len()).sum(),
        lines_removed: regions.iter().map(|r| r.removed_lines.len()).sum(),
        regions_changed: regions.len(),
    };

    FileDiff {
        name: name.into(),
        stats,
        regions,
    }
}
