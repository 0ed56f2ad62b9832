use std::cell::{Cell, RefCell};
use std::fs;

use camino::Utf8Path;
use jassguard_core::{
    discover, inject, inspect_script, open_source, update_script, DirSource, Error,
    InjectionPack, LineMode, Result, ScriptSource,
};

const SCRIPT: &str = "globals
    integer x = 0
endglobals
function main takes nothing returns nothing
    local integer i
    call InitBlizzard()
endfunction
";

const INJECTED: &str = "globals
integer hack = 1
    integer x = 0
endglobals
function Hack takes nothing returns nothing
endfunction
function main takes nothing returns nothing
    local integer i
call Hack()
    call InitBlizzard()
endfunction
";

fn pack() -> InjectionPack {
    InjectionPack::new(
        "integer hack = 1",
        "function Hack takes nothing returns nothing\nendfunction",
        "call Hack()",
    )
}

struct MemorySource {
    text: RefCell<String>,
    writes: Cell<usize>,
}

impl MemorySource {
    fn new(text: &str) -> Self {
        Self {
            text: RefCell::new(text.to_owned()),
            writes: Cell::new(0),
        }
    }
}

impl ScriptSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn read_script(&self) -> Result<String> {
        Ok(self.text.borrow().clone())
    }

    fn write_script(&self, text: &str) -> Result<()> {
        *self.text.borrow_mut() = text.to_owned();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[test]
fn inject_into_map_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8Path::from_path(dir.path()).unwrap().join("Arena");
    fs::create_dir_all(root.join("scripts")).unwrap();
    fs::write(root.join("scripts/war3map.j"), SCRIPT).unwrap();

    let source = DirSource::open(&root).unwrap();
    let outcome = update_script(&source, |search, _| inject(search, &pack())).unwrap();

    assert!(outcome.changed());
    assert_eq!(outcome.before, SCRIPT);
    assert_eq!(outcome.after, INJECTED);
    assert_eq!(fs::read_to_string(root.join("scripts/war3map.j")).unwrap(), INJECTED);

    assert_eq!(outcome.diff.name, "Arena");
    assert_eq!(outcome.diff.stats.lines_added, 4);
    assert_eq!(outcome.diff.stats.lines_removed, 0);
    assert_eq!(outcome.diff.stats.regions_changed, 3);
    assert_eq!(outcome.diff.regions[2].added_lines, vec!["call Hack()"]);
}

#[test]
fn unchanged_script_is_not_written() {
    let source = MemorySource::new(SCRIPT);
    let outcome = update_script(&source, |search, _| {
        assert!(!search.contains_line("InitBlizzard", LineMode::IgnoreWhitespace)?.is_empty());
        Ok(())
    })
    .unwrap();

    assert!(!outcome.changed());
    assert!(outcome.diff.is_empty());
    assert_eq!(source.writes.get(), 0);
}

#[test]
fn failed_modification_writes_nothing() {
    let source = MemorySource::new("function main takes nothing returns nothing\nendfunction\n");
    let err = update_script(&source, |search, _| inject(search, &pack())).unwrap_err();

    assert!(matches!(err, Error::AnchorNotFound("globals")));
    assert_eq!(source.writes.get(), 0);
}

#[test]
fn blank_script_is_rejected() {
    let source = MemorySource::new(" \r\n\t");
    let err = inspect_script(&source, |_, _| Ok(())).unwrap_err();
    assert!(matches!(err, Error::InvalidInput));
}

#[test]
fn discovered_sources_can_be_inspected() {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8Path::from_path(dir.path()).unwrap();
    fs::create_dir_all(root.join("Maze")).unwrap();
    fs::write(root.join("Maze/war3map.j"), SCRIPT).unwrap();
    fs::write(root.join("Solo.j"), "globals\nendglobals\n").unwrap();

    let names: Vec<String> = discover(root, "*", false)
        .unwrap()
        .iter()
        .map(|p| {
            let source = open_source(p).unwrap();
            inspect_script(source.as_ref(), |search, name| {
                Ok(format!("{name}:{}", search.text().lines().count()))
            })
            .unwrap()
        })
        .collect();

    assert_eq!(names, vec!["Maze:7", "Solo:2"]);
}
