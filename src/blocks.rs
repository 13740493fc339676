// src/blocks.rs
//
// Block handlers. Each takes the full line slice and the cursor, consumes as many
// lines as its block spans, and returns the HTML it produced with the new cursor.

use log::warn;

use crate::inline::{break_numbered_items, embolden, render_inline, superscript_refs_unguarded};
use crate::scan::{
    blank_bridges, has_pipe, heading_title, image_parts, is_bullet, is_image_line,
    is_ordered_item, is_reference, is_separator_row, is_url_line, ordered_item, reference_parts,
    starts_with_number_dot, table_cells,
};
use crate::ConvertOptions;

/// How many lines after an image the source-override URL may sit.
const IMAGE_URL_LOOKAHEAD: usize = 3;

pub(crate) const FIGURE_CAPTION: &str = "<p class=\"Figure\"></p>";

/* ================================ Runs ================================== */

/// Collects trimmed lines matching `item` from `start`, stepping over blank
/// lines that are directly followed by another item.
fn collect_run<'a>(
    lines: &[&'a str],
    start: usize,
    item: impl Fn(&str) -> bool + Copy,
) -> (Vec<&'a str>, usize) {
    let mut run = Vec::new();
    let mut i = start;
    while i < lines.len() {
        let line = lines[i].trim();
        if item(line) {
            run.push(line);
        } else if !blank_bridges(lines, i, item) {
            break;
        }
        i += 1;
    }
    (run, i)
}

/* =============================== Images ================================= */

/// Image line plus an optional bare URL within the next few non-blank lines.
pub(crate) fn image(lines: &[&str], start: usize) -> (Vec<String>, usize) {
    let line = lines[start].trim();

    let mut url = None;
    let end = (start + 1 + IMAGE_URL_LOOKAHEAD).min(lines.len());
    for (j, raw) in lines.iter().enumerate().take(end).skip(start + 1) {
        let candidate = raw.trim();
        if candidate.is_empty() {
            continue;
        }
        if is_url_line(candidate) {
            url = Some((j, candidate));
        }
        break;
    }
    let next = url.map_or(start + 1, |(j, _)| j + 1);

    let Some((alt, src)) = image_parts(line) else {
        warn!("line {}: image markers without a complete ![alt](src); kept verbatim", start + 1);
        return (vec![line.to_string()], next);
    };
    let src = url.map_or(src, |(_, u)| u);

    (
        vec![
            format!("<img src=\"{src}\" alt=\"{alt}\">"),
            FIGURE_CAPTION.to_string(),
        ],
        next,
    )
}

/* =============================== Tables ================================= */

pub(crate) fn table(lines: &[&str], start: usize) -> (String, usize) {
    let mut rows = Vec::new();
    let mut i = start;
    while i < lines.len() {
        let line = lines[i].trim();
        if !has_pipe(line) {
            break;
        }
        rows.push(line);
        i += 1;
    }
    (render_table(&rows), i)
}

fn render_table(rows: &[&str]) -> String {
    let Some((header, rest)) = rows.split_first() else {
        return String::new();
    };

    let mut html = vec!["<table>".to_string()];
    html.push("    <thead>".to_string());
    html.push("        <tr>".to_string());
    for cell in table_cells(header) {
        html.push(format!("            <th>{}</th>", superscript_refs_unguarded(cell)));
    }
    html.push("        </tr>".to_string());
    html.push("    </thead>".to_string());

    let body = match rest.split_first() {
        Some((first, tail)) if is_separator_row(first) => tail,
        _ => rest,
    };
    if !body.is_empty() {
        html.push("    <tbody>".to_string());
        for row in body {
            html.push("        <tr>".to_string());
            for cell in table_cells(row) {
                html.push(format!("            <td>{}</td>", superscript_refs_unguarded(cell)));
            }
            html.push("        </tr>".to_string());
        }
        html.push("    </tbody>".to_string());
    }

    html.push("</table>".to_string());
    html.join("\n")
}

/* ================================ Lists ================================= */

pub(crate) fn bullet_list(lines: &[&str], start: usize) -> (String, usize) {
    let (items, next) = collect_run(lines, start, is_bullet);

    let mut html = vec!["<ul class=\"uul\">".to_string()];
    for item in items {
        // Strip the "- " / "* " marker.
        let content = embolden(item[2..].trim());
        html.push("    <li>".to_string());
        html.push(format!("        <p>{content}</p>"));
        html.push("    </li>".to_string());
    }
    html.push("</ul>".to_string());
    (html.join("\n"), next)
}

pub(crate) fn ordered_list(lines: &[&str], start: usize) -> (String, usize) {
    let (items, next) = collect_run(lines, start, is_ordered_item);

    let mut html = vec!["<ol>".to_string()];
    for content in items.into_iter().filter_map(ordered_item) {
        html.push(format!("    <li>{}</li>", render_inline(content)));
    }
    html.push("</ol>".to_string());
    (html.join("\n"), next)
}

/* ============================== References ============================== */

pub(crate) fn references(lines: &[&str], start: usize) -> (String, usize) {
    let (items, next) = collect_run(lines, start, is_reference);

    let mut html = vec!["<ul class=\"references\">".to_string()];
    for (number, rest) in items.into_iter().filter_map(reference_parts) {
        html.push("    <li>".to_string());
        html.push(format!(
            "        <span class=\"reference-number\">[{number}]</span>{}",
            rest.trim()
        ));
        html.push("    </li>".to_string());
    }
    html.push("</ul>".to_string());
    (html.join("\n"), next)
}

/* ============================== Paragraphs ============================== */

/// Lines that end a running paragraph.
fn ends_paragraph(line: &str, options: &ConvertOptions) -> bool {
    line.starts_with('#')
        || is_bullet(line)
        || is_image_line(line)
        || has_pipe(line)
        || is_reference(line)
        || (options.ordered_lists && is_ordered_item(line))
}

/// Joins plain lines (blank lines included in the run) into one `<p>`.
///
/// The first line is always taken, so the cursor moves even when that line
/// would end a run started elsewhere (e.g. `#tag` or a lone `a | b`).
pub(crate) fn paragraph(lines: &[&str], start: usize, options: &ConvertOptions) -> (String, usize) {
    let mut parts: Vec<&str> = Vec::new();
    let mut i = start;
    while i < lines.len() {
        let line = lines[i].trim();
        if line.is_empty() {
            i += 1;
            continue;
        }
        if i != start && ends_paragraph(line, options) {
            break;
        }
        parts.push(line);
        i += 1;
    }

    let joined = parts.join(" ");
    let text = if parts.iter().any(|l| starts_with_number_dot(l)) {
        break_numbered_items(&joined)
    } else {
        joined
    };
    (format!("<p>{}</p>", render_inline(&text)), i)
}

/* ============================== Headings ================================ */

/// `### ` → mini-title, `#### ` → bold line. Level 1/2 live in the converter,
/// they need section state.
pub(crate) fn minor_heading(line: &str, level: u8) -> String {
    let title = heading_title(line, level);
    match level {
        3 => format!("<h4 class=\"mini-title\">{title}</h4>"),
        _ => format!("<b>{title}</b>"),
    }
}
