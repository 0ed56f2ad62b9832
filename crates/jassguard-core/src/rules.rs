//! Signature catalog: ordered, immutable rules the detector queries the
//! engine with. Loaded once and passed around explicitly.

use std::fmt;
use std::fs;

use camino::Utf8Path;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::search::LineMode;

/// Likelihood rating, 0 (benign) to 9 (almost certainly a cheat pack).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    pub const MAX: Severity = Severity(9);

    #[inline]
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Severity {
    /// Compile-time checked constructor for builtin tables.
    const fn checked(v: u8) -> Self {
        assert!(v <= Self::MAX.0, "severity outside 0..=9");
        Self(v)
    }
}

const CRITICAL: Severity = Severity::checked(9);
const HIGH: Severity = Severity::checked(8);
const ELEVATED: Severity = Severity::checked(7);
const NOTABLE: Severity = Severity::checked(4);
const LOW: Severity = Severity::checked(2);

impl TryFrom<u8> for Severity {
    type Error = Error;

    fn try_from(v: u8) -> Result<Self> {
        if v > Self::MAX.0 {
            return Err(Error::InvalidSeverity(v));
        }
        Ok(Self(v))
    }
}

impl From<Severity> for u8 {
    fn from(s: Severity) -> Self {
        s.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One signature check. A single needle is a "contains" check; several
/// needles make a "contains any" check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub description: String,
    pub severity: Severity,
    #[serde(default)]
    pub mode: LineMode,
    pub needles: Vec<String>,
}

impl Rule {
    fn builtin(needles: &[&str], description: &str, severity: Severity, mode: LineMode) -> Self {
        Self {
            description: description.to_owned(),
            severity,
            mode,
            needles: needles.iter().map(|n| (*n).to_owned()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

const EVENT_ARROW_KEYS: &[&str] = &[
    "EVENT_PLAYER_ARROW_UP",
    "EVENT_PLAYER_ARROW_DOWN",
    "EVENT_PLAYER_ARROW_LEFT",
    "EVENT_PLAYER_ARROW_RIGHT",
];

const COMMON_COMMANDS: &[&str] = &["-kill", ".kill", "-hear", ".hear", "-maphack", ".maphack"];

static BUILTIN: Lazy<RuleCatalog> = Lazy::new(|| {
    use crate::search::LineMode::{Exact, IgnoreWhitespace as Ws};
    RuleCatalog::new(vec![
        // known cheat packs
        Rule::builtin(&["Dekar"], "Map References Dekar.", CRITICAL, Ws),
        Rule::builtin(&["fai_YauFei", "vfai"], "Map References Fai.", CRITICAL, Ws),
        Rule::builtin(&["FatherSpace"], "Map References FatherSpace.", CRITICAL, Ws),
        Rule::builtin(&["Fukki"], "Map References Fukki.", CRITICAL, Ws),
        Rule::builtin(&["HaxoRico"], "Map References HaxoRico.", CRITICAL, Ws),
        Rule::builtin(&["hke_"], "Map References HKE.", CRITICAL, Ws),
        Rule::builtin(&["JJ2197"], "Map References JJ2197.", CRITICAL, Ws),
        Rule::builtin(&["nzHash", "Nuza"], "Map References Nuza.", CRITICAL, Ws),
        Rule::builtin(&["Sabrac", "sbrkw"], "Map References Sabrac.", CRITICAL, Ws),
        Rule::builtin(&["Wc3Edit"], "Map References Wc3Edit.", CRITICAL, Ws),
        Rule::builtin(&["DoNotSaveReplay"], "Map contains DoNotSaveReplay.", CRITICAL, Ws),
        // generic cheat-pack plumbing
        Rule::builtin(&["StringHash"], "Map contains StringHash.", HIGH, Ws),
        Rule::builtin(&["CheatPack"], "Map contains the word CheatPack.", HIGH, Ws),
        Rule::builtin(&["Activator"], "Map references an Activator", ELEVATED, Ws),
        Rule::builtin(
            COMMON_COMMANDS,
            "Map contains very common cheat commands words.",
            ELEVATED,
            Exact,
        ),
        // legitimate maps use these too
        Rule::builtin(&["ForceAddPlayer"], "Map contains ForceAddPlayer.", NOTABLE, Ws),
        Rule::builtin(&["GetPlayerName"], "Map contains GetPlayerName.", NOTABLE, Ws),
        Rule::builtin(EVENT_ARROW_KEYS, "Map uses Player Arrow Key Events.", NOTABLE, Ws),
        Rule::builtin(
            &["GetEventPlayerChatString"],
            "Map uses GetEventPlayerChatString.",
            LOW,
            Ws,
        ),
        Rule::builtin(
            &["TriggerRegisterPlayerChatEvent"],
            "Map uses TriggerRegisterPlayerChatEvent.",
            LOW,
            Ws,
        ),
    ])
});

impl RuleCatalog {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The default cheat-pack signature table.
    pub fn builtin() -> &'static RuleCatalog {
        &BUILTIN
    }

    /// Parse a catalog from TOML `[[rules]]` tables.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&text)?;
        tracing::debug!(%path, rules = catalog.len(), "loaded rule catalog");
        Ok(catalog)
    }

    #[inline]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleCatalog {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
