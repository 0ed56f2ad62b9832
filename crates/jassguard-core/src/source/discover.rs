use camino::{Utf8Path, Utf8PathBuf};
use globset::Glob;
use ignore::WalkBuilder;

use crate::error::{Error, Result};
use crate::source::fs::{DirSource, FileSource};
use crate::source::ScriptSource;

/// List scannable maps under `root`: `.j` files and extracted map
/// directories whose names match `filter`. Sorted by path.
///
/// Map directories are reported whole; their contents are never walked.
pub fn discover(root: &Utf8Path, filter: &str, recursive: bool) -> Result<Vec<Utf8PathBuf>> {
    let glob = Glob::new(filter)?.compile_matcher();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .max_depth(if recursive { None } else { Some(1) })
        .filter_entry(|entry| {
            entry.depth() < 2
                || entry
                    .path()
                    .parent()
                    .and_then(Utf8Path::from_path)
                    .map_or(true, |parent| DirSource::locate(parent).is_none())
        })
        .build();

    let mut found = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.depth() == 0 {
            continue;
        }
        let Some(file_type) = entry.file_type() else {
            continue;
        };
        let path = Utf8PathBuf::from_path_buf(entry.into_path())
            .map_err(|p| Error::NonUtf8Path(p.display().to_string()))?;
        let Some(name) = path.file_name() else {
            continue;
        };

        let is_map = if file_type.is_dir() {
            DirSource::locate(&path).is_some()
        } else {
            file_type.is_file() && path.extension() == Some("j")
        };
        if is_map && glob.is_match(name) {
            found.push(path);
        }
    }
    found.sort();
    tracing::debug!(%root, filter, count = found.len(), "discovered maps");
    Ok(found)
}

/// Open `path` as a map directory or a bare script file.
pub fn open_source(path: &Utf8Path) -> Result<Box<dyn ScriptSource>> {
    if path.is_dir() {
        Ok(Box::new(DirSource::open(path)?))
    } else {
        Ok(Box::new(FileSource::new(path)))
    }
}
