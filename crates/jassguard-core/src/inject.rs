//! Insert a pack of script blocks at the standard JASS anchor points.
//!
//! Anchors are located with the whitespace-insensitive engine, so spacing
//! and line-ending noise around `globals`, `endglobals` and the `main`
//! header does not matter.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{Error, Result};
use crate::search::{ScriptSearch, SearchOptions};

pub const GLOBALS_FILE: &str = "globals.txt";
pub const END_GLOBALS_FILE: &str = "endglobals.txt";
pub const MAIN_FILE: &str = "main.txt";

const GLOBALS_ANCHOR: &str = "^globals$";
const END_GLOBALS_ANCHOR: &str = "^endglobals$";
const MAIN_ANCHOR: &str = "^function main takes nothing returns nothing$";
const ANY_LINE: &str = "^.+$";

/// Blocks to splice into a script. Each block ends with `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionPack {
    /// Goes right after the `globals` line.
    pub globals: String,
    /// Goes right after the `endglobals` line.
    pub end_globals: String,
    /// Goes before the first statement of `main` that is not a `local`.
    pub main: String,
}

impl InjectionPack {
    pub fn new(
        globals: impl Into<String>,
        end_globals: impl Into<String>,
        main: impl Into<String>,
    ) -> Self {
        let block = |s: String| s + "\n";
        Self {
            globals: block(globals.into()),
            end_globals: block(end_globals.into()),
            main: block(main.into()),
        }
    }

    /// Load `globals.txt`, `endglobals.txt` and `main.txt` from `dir`.
    pub fn load(dir: &Utf8Path) -> Result<Self> {
        let read = |name: &str| -> Result<String> {
            let path: Utf8PathBuf = dir.join(name);
            if !path.is_file() {
                return Err(Error::PackFileMissing(path));
            }
            Ok(fs::read_to_string(&path)?)
        };
        Ok(Self::new(
            read(GLOBALS_FILE)?,
            read(END_GLOBALS_FILE)?,
            read(MAIN_FILE)?,
        ))
    }
}

/// Offset just past the line terminator that follows `end`, skipping any
/// trailing blanks first.
///
/// `None` when only blanks remain and there is no terminator.
fn after_line(text: &str, end: usize) -> Option<usize> {
    let blanks = text[end..]
        .char_indices()
        .find(|&(_, c)| c == '\n' || c == '\r' || !c.is_whitespace())
        .map_or(text.len() - end, |(i, _)| i);
    let end = end + blanks;
    match &text.as_bytes()[end..] {
        [b'\r', b'\n', ..] => Some(end + 2),
        [b'\n' | b'\r', ..] => Some(end + 1),
        [] => None,
        _ => Some(end),
    }
}

/// Insert `block` on a fresh line after the anchor line ending at `end`.
fn insert_after_line(search: &mut ScriptSearch, end: usize, block: &str) -> Result<usize> {
    match after_line(search.text(), end) {
        Some(at) => {
            search.insert(at, block)?;
            Ok(at)
        }
        None => {
            let at = search.text().len();
            search.insert(at, &format!("\n{block}"))?;
            Ok(at + 1)
        }
    }
}

/// Back up over the indentation in front of `at`.
fn line_start(text: &str, at: usize) -> usize {
    let indent = text[..at]
        .bytes()
        .rev()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();
    at - indent
}

fn find_anchor(search: &ScriptSearch, pattern: &str, name: &'static str) -> Result<usize> {
    search
        .find_first(pattern, &SearchOptions::lines_ci())?
        .map(|m| m.end())
        .ok_or(Error::AnchorNotFound(name))
}

/// First line at or after `from` whose whitespace-free form does not start
/// with `local`.
fn first_statement(search: &ScriptSearch, mut from: usize) -> Result<usize> {
    let opts = SearchOptions::lines_ci();
    while let Some(line) = search.find_first_from(ANY_LINE, from, &opts)? {
        let squeezed: String = line
            .value()
            .chars()
            .filter(|c| !c.is_whitespace())
            .take(5)
            .collect();
        if !squeezed.eq_ignore_ascii_case("local") {
            return Ok(line.start());
        }
        from = line.end();
    }
    Err(Error::AnchorNotFound("main body"))
}

/// Splice `pack` into the script held by `search`.
///
/// The `main` block goes at the start of the first non-`local` line, ahead
/// of its indentation.
///
/// The engine is rebuilt after each insertion, so each anchor is searched
/// for in the already-modified text.
pub fn inject(search: &mut ScriptSearch, pack: &InjectionPack) -> Result<()> {
    let end = find_anchor(search, GLOBALS_ANCHOR, "globals")?;
    let at = insert_after_line(search, end, &pack.globals)?;
    tracing::debug!(at, "injected globals block");

    let end = find_anchor(search, END_GLOBALS_ANCHOR, "endglobals")?;
    let at = insert_after_line(search, end, &pack.end_globals)?;
    tracing::debug!(at, "injected endglobals block");

    let header_end = find_anchor(search, MAIN_ANCHOR, "main function")?;
    let body = after_line(search.text(), header_end).unwrap_or(header_end);
    let at = line_start(search.text(), first_statement(search, body)?);
    search.insert(at, &pack.main)?;
    tracing::debug!(at, "injected main block");

    tracing::info!(len = search.text().len(), "injection complete");
    Ok(())
}
