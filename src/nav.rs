// src/nav.rs
//
// Navigation index: one entry per level-1/level-2 heading, in document order.

use std::fmt::Write as _;

/// Depth of a navigation entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavLevel {
    /// A `# ` heading, anchored as `section<N>`.
    Section,
    /// A `## ` heading, anchored as `section<N>-<M>`.
    Subsection,
}

/// One table-of-contents item tied to a heading anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavEntry {
    pub level: NavLevel,
    pub anchor: String,
    pub title: String,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct NavIndex {
    entries: Vec<NavEntry>,
}

impl NavIndex {
    pub(crate) fn push(&mut self, level: NavLevel, anchor: &str, title: &str) {
        self.entries.push(NavEntry {
            level,
            anchor: anchor.to_string(),
            title: title.to_string(),
        });
    }

    pub(crate) fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub(crate) fn into_entries(self) -> Vec<NavEntry> {
        self.entries
    }

    /// Navigation markup for every entry; empty when nothing was recorded.
    pub(crate) fn render(&self) -> String {
        render_entries(&self.entries)
    }
}

/// Renders entries into `nav-item` blocks joined by newlines.
pub fn render_entries(entries: &[NavEntry]) -> String {
    let mut out = String::with_capacity(entries.len() * 128);
    for (n, entry) in entries.iter().enumerate() {
        if n > 0 {
            out.push('\n');
        }
        // Writing into a String cannot fail.
        let _ = match entry.level {
            NavLevel::Section => write!(
                out,
                "<div class=\"nav-item level-1\" data-target=\"{}\">\n    \
                 <span class=\"circle\"></span>\n    \
                 {}\n\
                 </div>",
                entry.anchor, entry.title
            ),
            NavLevel::Subsection => write!(
                out,
                "<div class=\"nav-item level-2\" data-target=\"{}\">\n    \
                 <span class=\"circle small\"></span>\n    \
                 <span class=\"text2\">{}</span>\n\
                 </div>",
                entry.anchor, entry.title
            ),
        };
    }
    out
}
