// src/convert.rs
//
// Dispatcher and section state.
//
// One `Context` lives for exactly one conversion. It owns the section counters,
// the open/closed state of the content wrapper and the navigation index, and is
// only mutated by the level-1/level-2 heading handlers.

use log::{debug, trace, warn};

use crate::blocks;
use crate::nav::{NavIndex, NavLevel};
use crate::scan::{
    has_pipe, heading_level, heading_title, is_bullet, is_image_line, is_ordered_item,
    is_reference,
};
use crate::ConvertOptions;

pub(crate) const WRAPPER_OPEN: &str = "<div class=\"content-section\">";
pub(crate) const WRAPPER_CLOSE: &str = "</div>";

/* ============================ Block kinds =============================== */

/// What starts at the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Block {
    Heading(u8),
    Image,
    Table,
    BulletList,
    OrderedList,
    References,
    Paragraph,
    Blank,
}

/// Classifies `lines[i]`. The order of the tests is the priority order.
fn classify(lines: &[&str], i: usize, options: &ConvertOptions) -> Block {
    let line = lines[i].trim();
    if let Some(level) = heading_level(line) {
        Block::Heading(level)
    } else if is_image_line(line) {
        Block::Image
    } else if has_pipe(line) && lines.get(i + 1).is_some_and(|next| has_pipe(next)) {
        Block::Table
    } else if is_bullet(line) {
        Block::BulletList
    } else if options.ordered_lists && is_ordered_item(line) {
        Block::OrderedList
    } else if is_reference(line) {
        Block::References
    } else if !line.is_empty() {
        Block::Paragraph
    } else {
        Block::Blank
    }
}

/* =============================== Context ================================ */

#[derive(Debug, Default)]
pub(crate) struct Context {
    section_counter: usize,
    /// Subsection counter per section; index `n - 1` belongs to section `n`.
    subsections: Vec<usize>,
    current_section: Option<usize>,
    in_wrapper: bool,
    nav: NavIndex,
}

impl Context {
    fn open_section(&mut self) -> usize {
        self.section_counter += 1;
        let n = self.section_counter;
        self.subsections.resize(n, 0);
        self.current_section = Some(n);
        n
    }

    /// `# Title`: closes any open wrapper, starts section N, opens a new wrapper.
    fn heading1(&mut self, line: &str, out: &mut Vec<String>) {
        let title = heading_title(line, 1);
        if self.in_wrapper {
            out.push(WRAPPER_CLOSE.to_string());
        }
        let n = self.open_section();
        let anchor = format!("section{n}");

        out.push(format!("<h2 class=\"section-title\" id=\"{anchor}\">{title}</h2>"));
        self.nav.push(NavLevel::Section, &anchor, title);
        out.push(WRAPPER_OPEN.to_string());
        self.in_wrapper = true;
    }

    /// `## Title`: next subsection of the current section.
    ///
    /// Without a preceding `# ` heading a section number is taken silently (no
    /// heading, no wrapper, no navigation entry) and this becomes its first
    /// subsection.
    fn heading2(&mut self, line: &str, out: &mut Vec<String>) {
        let title = heading_title(line, 2);
        let n = match self.current_section {
            Some(n) => n,
            None => {
                let n = self.open_section();
                warn!("subsection {title:?} has no enclosing section; numbering it under section{n}");
                n
            }
        };
        self.subsections[n - 1] += 1;
        let anchor = format!("section{n}-{}", self.subsections[n - 1]);

        out.push(format!("<h3 class=\"sub-title\" id=\"{anchor}\">{title}</h3>"));
        self.nav.push(NavLevel::Subsection, &anchor, title);
    }

    pub(crate) fn into_nav(self) -> NavIndex {
        self.nav
    }
}

/* ============================== Dispatcher ============================== */

/// Runs one conversion over `text` and returns the content fragments together
/// with the context that recorded the navigation.
pub(crate) fn run(text: &str, options: &ConvertOptions) -> (Vec<String>, Context) {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut cx = Context::default();
    let mut out: Vec<String> = Vec::new();
    let mut i = 0usize;

    while i < lines.len() {
        let block = classify(&lines, i, options);
        trace!("line {}: {:?}", i + 1, block);

        let next = match block {
            Block::Heading(1) => {
                cx.heading1(lines[i].trim(), &mut out);
                i + 1
            }
            Block::Heading(2) => {
                cx.heading2(lines[i].trim(), &mut out);
                i + 1
            }
            Block::Heading(level) => {
                out.push(blocks::minor_heading(lines[i].trim(), level));
                i + 1
            }
            Block::Image => {
                let (html, next) = blocks::image(&lines, i);
                out.extend(html);
                next
            }
            Block::Table => push(&mut out, blocks::table(&lines, i)),
            Block::BulletList => push(&mut out, blocks::bullet_list(&lines, i)),
            Block::OrderedList => push(&mut out, blocks::ordered_list(&lines, i)),
            Block::References => push(&mut out, blocks::references(&lines, i)),
            Block::Paragraph => push(&mut out, blocks::paragraph(&lines, i, options)),
            Block::Blank => i + 1,
        };
        debug_assert!(next > i, "dispatcher must make progress");
        i = next;
    }

    if cx.in_wrapper {
        out.push(WRAPPER_CLOSE.to_string());
        cx.in_wrapper = false;
    }

    debug!(
        "converted {} lines into {} fragments, {} sections, {} navigation entries",
        lines.len(),
        out.len(),
        cx.section_counter,
        cx.nav.entries().len()
    );
    (out, cx)
}

#[inline]
fn push(out: &mut Vec<String>, (html, next): (String, usize)) -> usize {
    out.push(html);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(src: &str) -> Vec<String> {
        run(src, &ConvertOptions::default()).0
    }

    #[test]
    fn classify_priority() {
        let o = ConvertOptions::default();
        let lines = ["# ![a](b)", "![a](b) | x", "| a", "| b", "- [1]", "[1] x", "1. a", ""];
        assert_eq!(classify(&lines, 0, &o), Block::Heading(1));
        assert_eq!(classify(&lines, 1, &o), Block::Image);
        assert_eq!(classify(&lines, 2, &o), Block::Table);
        assert_eq!(classify(&lines, 3, &o), Block::Paragraph);
        assert_eq!(classify(&lines, 4, &o), Block::BulletList);
        assert_eq!(classify(&lines, 5, &o), Block::References);
        assert_eq!(classify(&lines, 6, &o), Block::Paragraph);
        assert_eq!(classify(&lines, 7, &o), Block::Blank);

        let o = ConvertOptions {
            ordered_lists: true,
        };
        assert_eq!(classify(&lines, 6, &o), Block::OrderedList);
    }

    #[test]
    fn sections_open_and_close_wrappers() {
        let out = content("# A\ntext\n# B\n## B1\n## B2\n# C");
        assert_eq!(
            out,
            [
                "<h2 class=\"section-title\" id=\"section1\">A</h2>",
                WRAPPER_OPEN,
                "<p>text</p>",
                WRAPPER_CLOSE,
                "<h2 class=\"section-title\" id=\"section2\">B</h2>",
                WRAPPER_OPEN,
                "<h3 class=\"sub-title\" id=\"section2-1\">B1</h3>",
                "<h3 class=\"sub-title\" id=\"section2-2\">B2</h3>",
                WRAPPER_CLOSE,
                "<h2 class=\"section-title\" id=\"section3\">C</h2>",
                WRAPPER_OPEN,
                WRAPPER_CLOSE,
            ]
        );
    }

    #[test]
    fn orphan_subsections_synthesize_one_section() {
        let (out, cx) = run("## A\n## B\n# C\n## D", &ConvertOptions::default());
        assert_eq!(out[0], "<h3 class=\"sub-title\" id=\"section1-1\">A</h3>");
        assert_eq!(out[1], "<h3 class=\"sub-title\" id=\"section1-2\">B</h3>");
        assert_eq!(out[2], "<h2 class=\"section-title\" id=\"section2\">C</h2>");
        assert_eq!(out[4], "<h3 class=\"sub-title\" id=\"section2-1\">D</h3>");

        let anchors: Vec<_> = cx.nav.entries().iter().map(|e| e.anchor.as_str()).collect();
        assert_eq!(anchors, ["section1-1", "section1-2", "section2", "section2-1"]);
    }

    #[test]
    fn minor_headings_leave_state_alone() {
        let (out, cx) = run("### x\n#### y", &ConvertOptions::default());
        assert_eq!(out, ["<h4 class=\"mini-title\">x</h4>", "<b>y</b>"]);
        assert_eq!(cx.section_counter, 0);
        assert!(cx.nav.entries().is_empty());
    }

    #[test]
    fn pipe_line_without_partner_is_a_paragraph() {
        assert_eq!(content("a | b\nplain"), ["<p>a | b plain</p>"]);
    }

    #[test]
    fn blank_input_produces_nothing() {
        assert!(content("").is_empty());
        assert!(content("\n \n\t\n").is_empty());
    }

    #[test]
    fn crlf_lines_are_trimmed() {
        let out = content("# Title\r\nbody\r\n");
        assert_eq!(out[0], "<h2 class=\"section-title\" id=\"section1\">Title</h2>");
        assert_eq!(out[2], "<p>body</p>");
    }
}
