use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{Error, Result};
use crate::source::ScriptSource;

/// Script entry names inside a map, in lookup order.
pub const SCRIPT_ENTRIES: [&str; 2] = ["war3map.j", "scripts/war3map.j"];

fn stem_of(path: &Utf8Path) -> String {
    path.file_stem().unwrap_or(path.as_str()).to_owned()
}

/// An extracted map directory; the script is `war3map.j`, or
/// `scripts/war3map.j` when the top-level entry is absent.
#[derive(Debug, Clone)]
pub struct DirSource {
    name: String,
    entry: Utf8PathBuf,
}

impl DirSource {
    /// The script entry inside `root`, if there is one.
    pub fn locate(root: &Utf8Path) -> Option<Utf8PathBuf> {
        SCRIPT_ENTRIES
            .iter()
            .map(|e| root.join(e))
            .find(|p| p.is_file())
    }

    pub fn open(root: &Utf8Path) -> Result<Self> {
        let entry = Self::locate(root).ok_or_else(|| Error::EntryNotFound(root.to_owned()))?;
        Ok(Self {
            name: stem_of(root),
            entry,
        })
    }

    #[inline]
    pub fn entry(&self) -> &Utf8Path {
        &self.entry
    }
}

impl ScriptSource for DirSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_script(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.entry)?)
    }

    fn write_script(&self, text: &str) -> Result<()> {
        fs::write(&self.entry, text)?;
        Ok(())
    }
}

/// A bare script file.
#[derive(Debug, Clone)]
pub struct FileSource {
    name: String,
    path: Utf8PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: stem_of(&path),
            path,
        }
    }
}

impl ScriptSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_script(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.path)?)
    }

    fn write_script(&self, text: &str) -> Result<()> {
        fs::write(&self.path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_source_falls_back_to_scripts_folder() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap().join("Arena");
        fs::create_dir_all(root.join("scripts")).unwrap();
        fs::write(root.join("scripts/war3map.j"), "globals\nendglobals").unwrap();

        let src = DirSource::open(&root).unwrap();
        assert_eq!(src.name(), "Arena");
        assert!(src.entry().ends_with("scripts/war3map.j"));
        assert_eq!(src.read_script().unwrap(), "globals\nendglobals");

        fs::write(root.join("war3map.j"), "top").unwrap();
        let src = DirSource::open(&root).unwrap();
        assert_eq!(src.read_script().unwrap(), "top");
    }

    #[test]
    fn test_dir_source_without_script() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        assert!(matches!(DirSource::open(root), Err(Error::EntryNotFound(_))));
    }

    #[test]
    fn test_file_source_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8Path::from_path(dir.path()).unwrap().join("Maze.j");
        fs::write(&path, "a").unwrap();

        let src = FileSource::new(path.clone());
        assert_eq!(src.name(), "Maze");
        src.write_script("b").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "b");
    }
}
