// src/scan.rs
//
// Line classification predicates.
//
// Every predicate takes a line that has already been trimmed of surrounding
// whitespace. Patterns are matched by hand over bytes; the regex each one stands
// for is noted above it.

use memchr::{memchr, memmem};

/* ============================== Headings ================================ */

/// Heading depth of a trimmed line: `# ` → 1 through `#### ` → 4.
///
/// Five or more hashes, or hashes not followed by a space, are not headings.
pub(crate) fn heading_level(line: &str) -> Option<u8> {
    let bytes = line.as_bytes();
    let hashes = bytes.iter().take_while(|&&b| b == b'#').count();
    if (1..=4).contains(&hashes) && bytes.get(hashes) == Some(&b' ') {
        Some(hashes as u8)
    } else {
        None
    }
}

/// Heading text after the `#`-marker and its space.
pub(crate) fn heading_title(line: &str, level: u8) -> &str {
    line.get(level as usize + 1..).unwrap_or("").trim()
}

/* =============================== Images ================================= */

/// Cheap image test used by the dispatcher: both `![` and `](` occur somewhere.
pub(crate) fn is_image_line(line: &str) -> bool {
    let b = line.as_bytes();
    memmem::find(b, b"![").is_some() && memmem::find(b, b"](").is_some()
}

/// First `![alt](src)` in the line, shortest alt and src.
pub(crate) fn image_parts(line: &str) -> Option<(&str, &str)> {
    // !\[(.*?)\]\((.*?)\)
    let b = line.as_bytes();
    let open = memmem::find(b, b"![")?;
    let alt_start = open + 2;
    // Later openers can only see a subset of what follows this one, so if the
    // first opener finds no closer, none will.
    let mid = alt_start + memmem::find(&b[alt_start..], b"](")?;
    let src_start = mid + 2;
    let close = src_start + memchr(b')', &b[src_start..])?;
    Some((&line[alt_start..mid], &line[src_start..close]))
}

/// A bare `http://` or `https://` line that overrides an image source.
pub(crate) fn is_url_line(line: &str) -> bool {
    line.starts_with("http://") || line.starts_with("https://")
}

/* =============================== Tables ================================= */

#[inline]
pub(crate) fn has_pipe(line: &str) -> bool {
    memchr(b'|', line.as_bytes()).is_some()
}

/// Row made only of `|`, `-` and spaces.
pub(crate) fn is_separator_row(line: &str) -> bool {
    line.bytes().all(|b| b == b'|' || b == b'-' || b == b' ')
}

/// Trimmed, non-empty cells of a pipe-delimited row.
pub(crate) fn table_cells(line: &str) -> impl Iterator<Item = &str> {
    line.split('|').map(str::trim).filter(|cell| !cell.is_empty())
}

/* ================================ Lists ================================= */

#[inline]
pub(crate) fn is_bullet(line: &str) -> bool {
    line.starts_with("- ") || line.starts_with("* ")
}

/// Number marker at line start, without requiring any whitespace after it.
pub(crate) fn starts_with_number_dot(line: &str) -> bool {
    // ^\d+\.
    let b = line.as_bytes();
    let digits = leading_digits(b);
    digits > 0 && b.get(digits) == Some(&b'.')
}

/// Content of an ordered-list item line.
pub(crate) fn ordered_item(line: &str) -> Option<&str> {
    // ^\d+\.\s+(.*)
    let b = line.as_bytes();
    let digits = leading_digits(b);
    if digits == 0 || b.get(digits) != Some(&b'.') {
        return None;
    }
    let rest = &line[digits + 1..];
    let content = rest.trim_start();
    if content.len() == rest.len() {
        return None;
    }
    Some(content)
}

#[inline]
pub(crate) fn is_ordered_item(line: &str) -> bool {
    ordered_item(line).is_some()
}

/* ============================== References ============================== */

/// Leading `[n]` marker: returns the digits and the remainder after `]`.
pub(crate) fn reference_parts(line: &str) -> Option<(&str, &str)> {
    // ^\[(\d+)\](.*)
    let b = line.as_bytes();
    if b.first() != Some(&b'[') {
        return None;
    }
    let digits = leading_digits(&b[1..]);
    if digits == 0 || b.get(1 + digits) != Some(&b']') {
        return None;
    }
    Some((&line[1..1 + digits], &line[2 + digits..]))
}

#[inline]
pub(crate) fn is_reference(line: &str) -> bool {
    reference_parts(line).is_some()
}

/* ============================== Run helpers ============================= */

#[inline]
fn leading_digits(b: &[u8]) -> usize {
    b.iter().take_while(|c| c.is_ascii_digit()).count()
}

/// True when `lines[i]` is blank and the line right after it satisfies `item`.
///
/// Such a blank line belongs to a list or reference run: it is consumed but
/// not stored.
pub(crate) fn blank_bridges(lines: &[&str], i: usize, item: impl Fn(&str) -> bool) -> bool {
    lines[i].trim().is_empty() && lines.get(i + 1).is_some_and(|next| item(next.trim()))
}
