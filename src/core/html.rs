// src/core/html.rs
// Case-insensitive tag scanning over raw HTML. Assumes regular,
// machine-generated markup: no nesting of the same tag, no scripts to skip.

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Next `open … close` block at or after `from`, as byte offsets
/// `(start of opener, end of closer)`. `lc` is `to_lower(s)`, computed once
/// by the caller for documents walked many times. Does not handle nesting
/// of the same tag.
pub fn next_tag_block_lc(s: &str, lc: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = find_tag(lc, &ol, from)?;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

/// Find `<tag` only where it is followed by whitespace, `>` or `/`,
/// so `<th` never matches `<thead`.
fn find_tag(lc: &str, open_lc: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    loop {
        let hit = lc.get(pos..)?.find(open_lc)? + pos;
        let next = lc[hit + open_lc.len()..].chars().next();
        match next {
            Some(ch) if ch.is_ascii_alphanumeric() => pos = hit + open_lc.len(),
            _ => return Some(hit),
        }
    }
}

/// Opening tag text of a block, e.g. `<table class="stats" id="totals">`.
pub fn opener(block: &str) -> &str {
    match block.find('>') {
        Some(e) => &block[..=e],
        None => block,
    }
}

/// Value of `attr` in an opening tag, quoted or not.
pub fn attr_value(open_tag: &str, attr: &str) -> Option<String> {
    let lc = to_lower(open_tag);
    let needle = join!(" ", &to_lower(attr), "=");
    let pos = lc.find(&needle)? + needle.len();
    let val = open_tag[pos..].trim_start();
    let (quote, start_off) = match val.as_bytes().first() {
        Some(b'"') => (Some('"'), 1),
        Some(b'\'') => (Some('\''), 1),
        _ => (None, 0),
    };
    let end = match quote {
        Some(q) => val[start_off..].find(q).map(|e| start_off + e),
        None => val.find(|c: char| c.is_ascii_whitespace() || c == '>'),
    }
    .unwrap_or(val.len());
    Some(s!(&val[start_off..end]))
}

/// Visible text of an HTML fragment: tags dropped, entities decoded,
/// whitespace collapsed.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&normalize_entities(&out))
}

/// Remove comment *markers* but keep what they wrap. The source ships some
/// tables inside `<!-- … -->` and renders them client-side.
pub fn uncomment(s: &str) -> String {
    s.replace("<!--", "").replace("-->", "")
}
