//! Topic presets, user selections and the interactive session state.
//!
//! # Examples
//!
//! ```
//! use pulse::session::{Selection, Session, Topic};
//!
//! let mut session = Session::new();
//! assert!(session.query().is_none());
//!
//! session.select(Selection::Preset(Topic::QuantumComputing));
//! assert_eq!(session.query().unwrap().as_str(), "Quantum Computing");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PulseError, Result};

/// A search query: non-empty text with surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Build a query from raw input. Blank input is no query.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Query(trimmed.to_string()))
        }
    }

    /// The query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Curated trending technology topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    AgenticAi,
    QuantumComputing,
    ConfidentialComputing,
    SpacexStarship,
    AiSupercomputing,
    EvBatteryTech,
    CyberDefense,
    Cloud3,
}

impl Topic {
    /// All topics in display order.
    pub const ALL: [Topic; 8] = [
        Topic::AgenticAi,
        Topic::QuantumComputing,
        Topic::ConfidentialComputing,
        Topic::SpacexStarship,
        Topic::AiSupercomputing,
        Topic::EvBatteryTech,
        Topic::CyberDefense,
        Topic::Cloud3,
    ];

    /// Label shown to the user and sent as the query.
    pub fn label(self) -> &'static str {
        match self {
            Topic::AgenticAi => "Agentic AI",
            Topic::QuantumComputing => "Quantum Computing",
            Topic::ConfidentialComputing => "Confidential Computing",
            Topic::SpacexStarship => "SpaceX Starship",
            Topic::AiSupercomputing => "AI Supercomputing",
            Topic::EvBatteryTech => "EV Battery Tech",
            Topic::CyberDefense => "Cyber Defense",
            Topic::Cloud3 => "Cloud 3.0",
        }
    }

    /// Topic by its 1-based display number.
    pub fn from_index(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    /// 1-based display number.
    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|&t| t == self)
            .map_or(0, |i| i + 1)
    }

    /// The query this topic searches for.
    pub fn query(self) -> Query {
        Query(self.label().to_string())
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Topic {
    type Err = PulseError;

    /// Accepts a display number (`"2"`) or a label, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(number) = s.parse::<usize>() {
            return Topic::from_index(number).ok_or_else(|| {
                PulseError::other(format!(
                    "Topic number must be between 1 and {}, got {number}",
                    Topic::ALL.len()
                ))
            });
        }

        Topic::ALL
            .iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| PulseError::other(format!("Unknown topic: {s}")))
    }
}

/// What the user picked: a preset or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Preset(Topic),
    FreeText(String),
}

impl Selection {
    /// The query this selection searches for, if any.
    pub fn resolve(&self) -> Option<Query> {
        match self {
            Selection::Preset(topic) => Some(topic.query()),
            Selection::FreeText(text) => Query::parse(text),
        }
    }
}

/// State of one interactive session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    selected: Option<Selection>,
}

impl Session {
    /// Create an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current selection.
    pub fn select(&mut self, selection: Selection) {
        self.selected = Some(selection);
    }

    /// The current selection.
    pub fn selected(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    /// The query of the current selection; `None` while idle.
    pub fn query(&self) -> Option<Query> {
        self.selected.as_ref().and_then(Selection::resolve)
    }

    /// Return to the idle state.
    pub fn clear(&mut self) {
        self.selected = None;
    }
}

/// One line of interactive input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Pick something new.
    Select(Selection),
    /// Search the current selection again.
    Resubmit,
    /// Leave the session.
    Quit,
}

impl Input {
    /// Interpret a raw input line.
    ///
    /// A number in `1..=8` picks that topic. Any other number is free text.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Input::Resubmit;
        }
        if line == ":q" || line.eq_ignore_ascii_case("quit") {
            return Input::Quit;
        }
        match line.parse::<usize>().ok().and_then(Topic::from_index) {
            Some(topic) => Input::Select(Selection::Preset(topic)),
            None => Input::Select(Selection::FreeText(line.to_string())),
        }
    }
}
