//! Line grammar of a rendered plan document.
//!
//! The schedule holds one checklist line per slot:
//!
//! ```text
//! - [ ] **🌙 Monday** - [[Soup]] & [[Nuggets]] - ⏱️ 45 min - 🟢 Easy
//! ```
//!
//! Everything up to and including `** - ` is the day label, kept as-is by
//! edits. The remainder is the details: one or two recipe links followed by
//! the combined time and a difficulty marker. Weeks are introduced by
//! `### 📅 Week <n>` headers.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

pub const WEEK_ICON: &str = "📅";
/// Marks the start of the shopping list; everything after it is regenerated.
pub const SHOPPING_LIST_SEPARATOR: &str = "\n---\n# 🛒 Shopping List\n";

static RE_SCHEDULE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(- \[(.)\] \*\*(.+?)\s([A-Za-z]+)\*\* - )(.+)$").unwrap()
});
static RE_WEEK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^### (?:📅 )?Week (\d+)").unwrap());
static RE_RECIPE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleLine {
    prefix: String,
    pub mark: char,
    pub day_emoji: String,
    pub day: String,
    pub details: String,
}

impl ScheduleLine {
    pub fn new(day_emoji: &str, day: &str, details: impl Into<String>) -> Self {
        Self {
            prefix: format!("- [ ] **{day_emoji} {day}** - "),
            mark: ' ',
            day_emoji: day_emoji.to_owned(),
            day: day.to_owned(),
            details: details.into(),
        }
    }

    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches('\r');
        let captures = RE_SCHEDULE_LINE
            .captures(line)
            .ok_or_else(|| Error::UnparseableLine(line.to_owned()))?;

        Ok(Self {
            prefix: captures[1].to_owned(),
            mark: captures[2].chars().next().unwrap_or(' '),
            day_emoji: captures[3].trim().to_owned(),
            day: captures[4].trim().to_owned(),
            details: captures[5].to_owned(),
        })
    }

    /// The day label portion, e.g. `- [x] **🌙 Monday** - `.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Same day label with different details.
    pub fn with_details(&self, details: impl Into<String>) -> Self {
        Self {
            details: details.into(),
            ..self.clone()
        }
    }

    /// Same day emoji and label, unchecked, with new details.
    pub fn replaced(&self, details: impl Into<String>) -> Self {
        Self::new(&self.day_emoji, &self.day, details)
    }

    pub fn recipes(&self) -> Vec<String> {
        recipe_links(&self.details)
    }
}

impl fmt::Display for ScheduleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.details)
    }
}

/// Details portion of a schedule line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleDetails {
    pub main: String,
    pub kid: Option<String>,
    pub total_time: u32,
    pub difficulty_emoji: String,
    pub difficulty: String,
}

impl fmt::Display for ScheduleDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[[{}]]", self.main)?;
        if let Some(kid) = &self.kid {
            write!(f, " & [[{kid}]]")?;
        }

        write!(
            f,
            " - ⏱️ {} min - {} {}",
            self.total_time,
            self.difficulty_emoji,
            capitalize(&self.difficulty)
        )
    }
}

/// One schedule line located in a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChecklistEntry {
    /// One-based week number from the closest preceding week header.
    pub week: usize,
    pub day: String,
    pub day_emoji: String,
    pub line: String,
    pub line_index: usize,
    pub recipes: Vec<String>,
}

/// Scans a document for schedule lines.
pub fn extract_entries(content: &str) -> Vec<ChecklistEntry> {
    let mut entries = vec![];
    let mut week = 1;

    for (line_index, line) in content.lines().enumerate() {
        if let Some(captures) = RE_WEEK_HEADER.captures(line) {
            week = captures[1].parse().unwrap_or(week);
            continue;
        }

        let Ok(parsed) = ScheduleLine::parse(line) else {
            continue;
        };

        entries.push(ChecklistEntry {
            week,
            recipes: parsed.recipes(),
            day: parsed.day,
            day_emoji: parsed.day_emoji,
            line: line.trim_end_matches('\r').to_owned(),
            line_index,
        });
    }

    entries
}

pub fn recipe_links(text: &str) -> Vec<String> {
    RE_RECIPE_LINK
        .captures_iter(text)
        .map(|c| c[1].to_owned())
        .collect()
}

pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONDAY: &str = "- [ ] **🌙 Monday** - [[Soup]] - ⏱️ 30 min - 🟢 Easy";

    #[test]
    fn parse_schedule_line() {
        let line = ScheduleLine::parse(MONDAY).unwrap();

        assert_eq!(line.day_emoji, "🌙");
        assert_eq!(line.day, "Monday");
        assert_eq!(line.prefix(), "- [ ] **🌙 Monday** - ");
        assert_eq!(line.details, "[[Soup]] - ⏱️ 30 min - 🟢 Easy");
        assert_eq!(line.recipes(), vec!["Soup".to_owned()]);
        assert_eq!(line.to_string(), MONDAY);
    }

    #[test]
    fn parse_keeps_checked_mark() {
        let line = ScheduleLine::parse("- [x] **☀️ Sunday** - [[Roast]] & [[Nuggets]] - ⏱️ 95 min - 🔴 Hard")
            .unwrap();

        assert_eq!(line.mark, 'x');
        assert_eq!(line.day_emoji, "☀️");
        assert_eq!(line.recipes(), vec!["Roast".to_owned(), "Nuggets".to_owned()]);
        assert!(line.prefix().starts_with("- [x]"));
    }

    #[test]
    fn parse_rejects_other_lines() {
        assert!(matches!(
            ScheduleLine::parse("- [ ] 2 eggs"),
            Err(Error::UnparseableLine(_))
        ));
        assert!(ScheduleLine::parse("### 📅 Week 1").is_err());
    }

    #[test]
    fn details_format() {
        let details = ScheduleDetails {
            main: "Tacos".to_owned(),
            kid: Some("Nuggets".to_owned()),
            total_time: 45,
            difficulty_emoji: "🟡".to_owned(),
            difficulty: "medium".to_owned(),
        };

        assert_eq!(
            details.to_string(),
            "[[Tacos]] & [[Nuggets]] - ⏱️ 45 min - 🟡 Medium"
        );
    }

    #[test]
    fn replaced_resets_mark_and_keeps_label() {
        let line = ScheduleLine::parse("- [x] **🌙 Monday** - [[Soup]] - ⏱️ 30 min - 🟢 Easy").unwrap();
        let replaced = line.replaced("[[Tacos]] - ⏱️ 20 min - 🟢 Easy");

        assert_eq!(
            replaced.to_string(),
            "- [ ] **🌙 Monday** - [[Tacos]] - ⏱️ 20 min - 🟢 Easy"
        );
    }

    #[test]
    fn extract_entries_tracks_weeks() {
        let content = "## Meal Schedule\n\n### 📅 Week 1\n\n- [ ] **🌙 Monday** - [[Soup]] - ⏱️ 30 min - 🟢 Easy\n\n### Week 2\n\n- [ ] **🌙 Monday** - [[Tacos]] & [[Nuggets]] - ⏱️ 40 min - 🟡 Medium\n\n---\n# 🛒 Shopping List\n- [ ] 2 eggs\n";
        let entries = extract_entries(content);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].week, 1);
        assert_eq!(entries[0].line_index, 4);
        assert_eq!(entries[1].week, 2);
        assert_eq!(entries[1].recipes, vec!["Tacos".to_owned(), "Nuggets".to_owned()]);
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("default"), "Default");
        assert_eq!(capitalize(""), "");
    }
}
