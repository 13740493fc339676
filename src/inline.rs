// src/inline.rs
//
// Inline markup substitutions: bold, italic and bracketed reference markers.
//
// Order matters. Bold runs before italic so `**` pairs are gone by the time the
// single `*` pattern runs, and reference markers run last so they can skip
// anything the earlier passes already wrapped. All delimiters are ASCII, so every
// slice boundary below lands on a char boundary.

use memchr::{memchr, memmem};

/// Full inline pass used for paragraphs and ordered-list items.
pub(crate) fn render_inline(text: &str) -> String {
    superscript_refs(&italicize(&embolden(text)))
}

/// `**x**` and `__x__` → `<b>x</b>`.
pub(crate) fn embolden(text: &str) -> String {
    wrap_pairs(&wrap_pairs(text, "**", "b"), "__", "b")
}

/// `*x*` and `_x_` → `<i>x</i>`.
pub(crate) fn italicize(text: &str) -> String {
    wrap_pairs(&wrap_pairs(text, "*", "i"), "_", "i")
}

/// `[n]` → `<sup>[n]</sup>`, unless the marker directly follows `>` or
/// directly precedes `<`.
pub(crate) fn superscript_refs(text: &str) -> String {
    wrap_refs(text, true)
}

/// `[n]` → `<sup>[n]</sup>` everywhere. Table cells use this form.
pub(crate) fn superscript_refs_unguarded(text: &str) -> String {
    wrap_refs(text, false)
}

/// Wraps each non-overlapping `delim ... delim` span, leftmost first, with the
/// shortest possible body (which may be empty).
fn wrap_pairs(text: &str, delim: &str, tag: &str) -> String {
    let bytes = text.as_bytes();
    let d = delim.as_bytes();
    let mut out = String::with_capacity(text.len() + 8);
    let mut i = 0usize;

    while let Some(off) = memmem::find(&bytes[i..], d) {
        let open = i + off;
        let body = open + d.len();
        let Some(close_off) = memmem::find(&bytes[body..], d) else {
            break;
        };
        let close = body + close_off;

        out.push_str(&text[i..open]);
        out.push('<');
        out.push_str(tag);
        out.push('>');
        out.push_str(&text[body..close]);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
        i = close + d.len();
    }
    out.push_str(&text[i..]);
    out
}

fn wrap_refs(text: &str, guarded: bool) -> String {
    // (?<!>)\[(\d+)\](?!<)   when guarded
    // \[(\d+)\]               otherwise
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len() + 16);
    let mut copied = 0usize;
    let mut k = 0usize;

    while let Some(off) = memchr(b'[', &bytes[k..]) {
        let open = k + off;
        k = open + 1;

        let mut j = open + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j == open + 1 || bytes.get(j) != Some(&b']') {
            continue;
        }
        if guarded && ((open > 0 && bytes[open - 1] == b'>') || bytes.get(j + 1) == Some(&b'<')) {
            continue;
        }

        out.push_str(&text[copied..open]);
        out.push_str("<sup>");
        out.push_str(&text[open..=j]);
        out.push_str("</sup>");
        copied = j + 1;
        k = j + 1;
    }
    out.push_str(&text[copied..]);
    out
}

/// Puts a `<br>` before every `N. ` marker in `text`, then drops one leading
/// `<br>` so the first item does not open with a blank line.
pub(crate) fn break_numbered_items(text: &str) -> String {
    // (\d+\.\s) → <br>\1
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len() + 16);
    let mut copied = 0usize;
    let mut p = 0usize;

    while p < bytes.len() {
        if !bytes[p].is_ascii_digit() {
            p += 1;
            continue;
        }
        let mut q = p;
        while q < bytes.len() && bytes[q].is_ascii_digit() {
            q += 1;
        }
        let followed_by_space = bytes.get(q) == Some(&b'.')
            && text[q + 1..].chars().next().is_some_and(char::is_whitespace);
        if followed_by_space {
            out.push_str(&text[copied..p]);
            out.push_str("<br>");
            copied = p;
            // Step over the marker so its digits are not matched again.
            p = q + 1;
        } else {
            p = q;
        }
    }
    out.push_str(&text[copied..]);

    match out.strip_prefix("<br>") {
        Some(rest) => rest.to_string(),
        None => out,
    }
}
