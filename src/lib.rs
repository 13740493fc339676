//! mdpage — converts a constrained Markdown dialect into the HTML fragments a
//! sectioned page template expects, plus a matching navigation index.
//!
//! The converter is a single forward pass over lines. Each position is
//! classified as a heading, image, table, bullet list, reference list or
//! paragraph, and the matching handler emits fixed markup:
//!
//! - `# Title` → `<h2 class="section-title" id="sectionN">`, followed by an open
//!   `<div class="content-section">` that is closed before the next `# ` heading
//!   or at end of input.
//! - `## Title` → `<h3 class="sub-title" id="sectionN-M">`.
//! - `### Title` → `<h4 class="mini-title">`, `#### Title` → `<b>`.
//! - `![alt](src)` → `<img>` plus an empty `<p class="Figure"></p>` caption. A bare
//!   `http(s)://` line within the next three non-blank lines replaces `src`.
//! - Pipe tables, `- `/`* ` lists, `[n]` reference lists and paragraphs.
//!
//! Level-1 and level-2 headings are also recorded as navigation entries.
//!
//! ```
//! let (content, nav) = mdpage::convert_with_navigation("# Intro\nHello **world**.");
//! assert!(content.contains("<p>Hello <b>world</b>.</p>"));
//! assert!(nav.contains("data-target=\"section1\""));
//! ```

mod blocks;
mod convert;
pub mod error;
mod inline;
mod nav;
mod scan;

pub use error::{Error, Result};
pub use nav::{render_entries, NavEntry, NavLevel};

/// Conversion switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Emit runs of `N. item` lines as `<ol>` instead of folding them into
    /// paragraphs with `<br>` breaks.
    pub ordered_lists: bool,
}

/// Result of converting one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversion {
    /// Content fragments joined with `\n`.
    pub content: String,
    /// Navigation blocks joined with `\n`; empty when the document has no
    /// `# `/`## ` headings.
    pub navigation: String,
    /// The navigation entries behind `navigation`, in document order.
    pub entries: Vec<NavEntry>,
}

/// Markdown-to-page converter.
///
/// Holds only options. Every call to [`Converter::convert`] starts from fresh
/// section counters and an empty navigation index, so one converter can be
/// reused across documents (or threads) without numbering leaking between them.
#[derive(Clone, Copy, Debug, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn convert(&self, markdown: &str) -> Conversion {
        let (fragments, cx) = convert::run(markdown, &self.options);
        let nav = cx.into_nav();
        Conversion {
            content: fragments.join("\n"),
            navigation: nav.render(),
            entries: nav.into_entries(),
        }
    }
}

/// Content HTML for `markdown` with default options.
pub fn convert(markdown: &str) -> String {
    Converter::default().convert(markdown).content
}

/// Content and navigation HTML for `markdown` with default options.
pub fn convert_with_navigation(markdown: &str) -> (String, String) {
    let Conversion {
        content,
        navigation,
        ..
    } = Converter::default().convert(markdown);
    (content, navigation)
}

#[cfg(test)]
mod tests {
    use super::{convert, convert_with_navigation, ConvertOptions, Converter, NavLevel};
    use proptest::prelude::*;

    const SAMPLE: &str = "# Intro\nHello **world**.\n\n## Details\nSee [1] for more.\n";

    #[test]
    fn end_to_end_sample() {
        let (content, nav) = convert_with_navigation(SAMPLE);
        let expected = "\
<h2 class=\"section-title\" id=\"section1\">Intro</h2>
<div class=\"content-section\">
<p>Hello <b>world</b>.</p>
<h3 class=\"sub-title\" id=\"section1-1\">Details</h3>
<p>See <sup>[1]</sup> for more.</p>
</div>";
        assert_eq!(content, expected);
        assert!(nav.contains("<div class=\"nav-item level-1\" data-target=\"section1\">"));
        assert!(nav.contains("<span class=\"text2\">Details</span>"));
    }

    #[test]
    fn converter_reuse_does_not_leak_numbering() {
        let converter = Converter::default();
        let first = converter.convert(SAMPLE);
        let second = converter.convert(SAMPLE);
        assert_eq!(first, second);
        assert_eq!(second.entries.len(), 2);
        assert_eq!(second.entries[1].anchor, "section1-1");
    }

    #[test]
    fn full_page() {
        let src = "\
# Overview
Intro text with _emphasis_.

![Chart](chart.png)
https://cdn.example.com/chart.png

| Year | Value |
|------|-------|
| 2024 | 10[2] |

- **Fast**
- Small

[1] First source
[2] Second source
#### Note
";
        let content = convert(src);
        let expected = "\
<h2 class=\"section-title\" id=\"section1\">Overview</h2>
<div class=\"content-section\">
<p>Intro text with <i>emphasis</i>.</p>
<img src=\"https://cdn.example.com/chart.png\" alt=\"Chart\">
<p class=\"Figure\"></p>
<table>
    <thead>
        <tr>
            <th>Year</th>
            <th>Value</th>
        </tr>
    </thead>
    <tbody>
        <tr>
            <td>2024</td>
            <td>10<sup>[2]</sup></td>
        </tr>
    </tbody>
</table>
<ul class=\"uul\">
    <li>
        <p><b>Fast</b></p>
    </li>
    <li>
        <p>Small</p>
    </li>
</ul>
<ul class=\"references\">
    <li>
        <span class=\"reference-number\">[1]</span>First source
    </li>
    <li>
        <span class=\"reference-number\">[2]</span>Second source
    </li>
</ul>
<b>Note</b>
</div>";
        assert_eq!(content, expected);
    }

    #[test]
    fn ordered_lists_option() {
        let src = "Steps:\n1. mix\n2. bake";
        assert_eq!(convert(src), "<p>Steps: <br>1. mix <br>2. bake</p>");

        let converter = Converter::new(ConvertOptions {
            ordered_lists: true,
        });
        assert_eq!(
            converter.convert(src).content,
            "<p>Steps:</p>\n<ol>\n    <li>mix</li>\n    <li>bake</li>\n</ol>"
        );
    }

    #[test]
    fn no_headings_means_empty_navigation() {
        let out = Converter::default().convert("just text\n- and a list");
        assert_eq!(out.navigation, "");
        assert!(out.entries.is_empty());
        assert!(!out.content.contains("content-section"));
    }

    fn line_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (1usize..=3, "[a-z][a-z ]{0,11}")
                .prop_map(|(depth, title)| format!("{} {title}", "#".repeat(depth))),
            Just(String::new()),
            Just("| a | b |".to_string()),
            Just("|---|---|".to_string()),
            Just("- item **x**".to_string()),
            Just("[1] ref".to_string()),
            Just("![alt](a.png)".to_string()),
            Just("https://example.com/b.png".to_string()),
            Just("1. step".to_string()),
            "[a-z*_\\[\\]0-9 ]{1,20}",
        ]
    }

    proptest! {
        #[test]
        fn prop_wrappers_balance(lines in prop::collection::vec(line_strategy(), 0..40)) {
            let content = convert(&lines.join("\n"));
            let opens = content.matches("<div class=\"content-section\">").count();
            let closes = content.lines().filter(|l| *l == "</div>").count();
            prop_assert_eq!(opens, closes);
        }

        #[test]
        fn prop_navigation_tracks_headings(lines in prop::collection::vec(line_strategy(), 0..40)) {
            let out = Converter::default().convert(&lines.join("\n"));
            let headings = lines
                .iter()
                .filter(|l| l.starts_with("# ") || l.starts_with("## "))
                .count();
            prop_assert_eq!(out.entries.len(), headings);

            let mut section = 0usize;
            let mut sub = 0usize;
            for entry in &out.entries {
                match entry.level {
                    NavLevel::Section => {
                        section += 1;
                        sub = 0;
                        prop_assert_eq!(&entry.anchor, &format!("section{section}"));
                    }
                    NavLevel::Subsection => {
                        if section == 0 {
                            section = 1;
                        }
                        sub += 1;
                        prop_assert_eq!(&entry.anchor, &format!("section{section}-{sub}"));
                    }
                }
            }
        }

        #[test]
        fn prop_deterministic(lines in prop::collection::vec(line_strategy(), 0..40)) {
            let src = lines.join("\n");
            prop_assert_eq!(Converter::default().convert(&src), Converter::default().convert(&src));
        }
    }
}
