//! Markup cleanup for precedent body text.
//!
//! The detail endpoint returns body fields with inline HTML (mostly `<br/>`
//! line breaks and the odd emphasis tag) and a handful of named entities.
//! [`normalize`] turns that into a single line of plain text.

/// Named entities decoded by [`normalize`], applied in this order.
const ENTITIES: &[(&str, &str)] = &[("&nbsp;", " "), ("&lt;", "<"), ("&gt;", ">"), ("&amp;", "&")];

/// Clean raw body text into plain, single-spaced text.
///
/// Line breaks become whitespace, every other tag is removed, the small
/// set of named entities (`&nbsp;`, `&lt;`, `&gt;`, `&amp;`) is decoded, and whitespace runs
/// collapse to one space. Never fails; an empty input yields an empty
/// string.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let text = replace_line_breaks(raw);
    let text = strip_tags(&text);
    let text = decode_entities(&text);
    collapse_whitespace(&text)
}

/// [`normalize`] for optional input; `None` is treated as empty.
pub fn normalize_opt(raw: Option<&str>) -> String {
    normalize(raw.unwrap_or_default())
}

/// Replace `<br>`, `<br/>` and `<br />` (any ASCII case) with `\n`.
fn replace_line_breaks(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        result.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match line_break_len(candidate) {
            Some(len) => {
                result.push('\n');
                rest = &candidate[len..];
            }
            None => {
                result.push('<');
                rest = &candidate[1..];
            }
        }
    }
    result.push_str(rest);
    result
}

/// Byte length of the line-break tag at the start of `s`, if there is one.
fn line_break_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.len() < 4 || !bytes[1..3].eq_ignore_ascii_case(b"br") {
        return None;
    }
    let mut i = 3;
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'/' {
        i += 1;
    }
    (i < bytes.len() && bytes[i] == b'>').then_some(i + 1)
}

/// Delete anything shaped like `<...>` with at least one character inside.
///
/// A `<` with no later `>`, or an empty `<>`, is kept as literal text.
fn strip_tags(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + 1..];
        match after_open.find('>') {
            Some(end) if end > 0 => rest = &after_open[end + 1..],
            _ => {
                result.push('<');
                rest = after_open;
            }
        }
    }
    result.push_str(rest);
    result
}

fn decode_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_owned(), |acc, (entity, replacement)| {
            acc.replace(entity, replacement)
        })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
