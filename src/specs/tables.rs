// src/specs/tables.rs
//! Generic HTML table reader.
//!
//! Turns every `<table>…</table>` on a page into a `RawTable` of trimmed
//! strings. Layout rules:
//! - tables hidden inside `<!-- … -->` are read like visible ones;
//! - the header is the *last* row of `<thead>` (grouped headers above it are
//!   dropped); without a `<thead>`, the first all-`<th>` row is the header;
//! - body rows take `<th>` and `<td>` cells in document order, so row labels
//!   rendered as `<th scope="row">` stay in their column;
//! - blank header names become `Unnamed: <i>`, repeated names get `.1`, `.2`, ….
//!
//! Typing of the cells happens later, in `table::Frame`.

use std::collections::HashMap;

use crate::core::html::{attr_value, next_tag_block_lc, opener, strip_tags, to_lower, uncomment};

/// One table as found on the page: headers plus rows of cell text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    pub id: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn col(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_columns(&self, names: &[&str]) -> bool {
        names.iter().all(|n| self.col(n).is_some())
    }

    /// Cells of one column; short rows yield "".
    pub fn column_cells<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + 'a {
        let idx = self.col(name);
        self.rows.iter().map(move |r| match idx {
            Some(i) => r.get(i).map(String::as_str).unwrap_or(""),
            None => "",
        })
    }
}

pub fn read_tables(html: &str) -> Vec<RawTable> {
    let doc = uncomment(html);
    let lc = to_lower(&doc);

    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((ts, te)) = next_tag_block_lc(&doc, &lc, "<table", "</table>", pos) {
        out.push(parse_table(&doc[ts..te], &lc[ts..te]));
        pos = te;
    }
    out
}

fn parse_table(block: &str, lc: &str) -> RawTable {
    let id = attr_value(opener(block), "id");

    // <thead> range, if any
    let thead = next_tag_block_lc(block, lc, "<thead", "</thead>", 0);

    let mut header_rows: Vec<Vec<String>> = Vec::new();
    let mut body: Vec<(Vec<String>, bool)> = Vec::new();

    let mut pos = 0usize;
    while let Some((rs, re)) = next_tag_block_lc(block, lc, "<tr", "</tr>", pos) {
        pos = re;
        let (cells, all_th) = parse_row(&block[rs..re], &lc[rs..re]);
        if cells.is_empty() {
            continue;
        }
        match thead {
            Some((hs, he)) if rs >= hs && re <= he => header_rows.push(cells),
            _ => body.push((cells, all_th)),
        }
    }

    let headers = match header_rows.pop() {
        Some(h) => h,
        None => match body.iter().position(|(_, all_th)| *all_th) {
            Some(i) => body.remove(i).0,
            None => Vec::new(),
        },
    };

    RawTable {
        id,
        headers: dedup_headers(headers),
        rows: body.into_iter().map(|(cells, _)| cells).collect(),
    }
}

/// Cells of one `<tr>` in order, and whether every cell was a `<th>`.
fn parse_row(tr: &str, lc: &str) -> (Vec<String>, bool) {
    let mut cells = Vec::new();
    let mut all_th = true;
    let mut pos = 0usize;
    loop {
        let th = next_tag_block_lc(tr, lc, "<th", "</th>", pos);
        let td = next_tag_block_lc(tr, lc, "<td", "</td>", pos);
        let (s, e, is_th) = match (th, td) {
            (Some((a, b)), Some((c, d))) => if a < c { (a, b, true) } else { (c, d, false) },
            (Some((a, b)), None) => (a, b, true),
            (None, Some((c, d))) => (c, d, false),
            (None, None) => break,
        };
        all_th &= is_th;
        cells.push(strip_tags(&tr[s..e]));
        pos = e;
    }
    (cells, all_th)
}

fn dedup_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .into_iter()
        .enumerate()
        .map(|(i, h)| {
            let base = if h.is_empty() { format!("Unnamed: {i}") } else { h };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 { base } else { format!("{base}.{count}") };
            *count += 1;
            name
        })
        .collect()
}
