//! Line classification for the block scan.
//!
//! Each helper looks at one trimmed line and either recognises the construct
//! or returns `None`. Nothing here keeps state.
use std::sync::LazyLock;

use regex::Regex;

use crate::utils::compile_regex;

static UNORDERED_ITEM: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("UNORDERED_ITEM", r"^[-*+]\s+(.*)$"));
static ORDERED_ITEM: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("ORDERED_ITEM", r"^(\d+)\.\s+(.*)$"));
static TASK_MARKER: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("TASK_MARKER", r"^\[([ xX])\]\s+(.*)$"));
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex("HEADING", r"^(#{1,6})\s+(.*?)(?:\s+#+)?\s*$")
});
static ALERT: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex(
    "ALERT",
    r"(?i)^\[!(note|tip|important|warning|caution)\]\s*(.*)$",
  )
});
static DETAILS_TAG: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex("DETAILS_TAG", r"(?i)<(/?)(details|summary)(\s+open)?\s*>")
});
static TABLE_ROW: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("TABLE_ROW", r"^\|.*\|$"));
static TABLE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex("TABLE_SEPARATOR", r"^\|(\s*:?-+:?\s*\|)+\s*$")
});

/// Kind of list, fixed when the list opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
  Ordered,
  Unordered,
}

impl ListKind {
  /// HTML element name for the list.
  #[must_use]
  pub const fn tag(self) -> &'static str {
    match self {
      Self::Ordered => "ol",
      Self::Unordered => "ul",
    }
  }
}

/// A list marker line with its marker stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItem<'a> {
  pub kind:    ListKind,
  /// Number written on an ordered item.
  pub number:  Option<u64>,
  pub content: &'a str,
}

/// Recognise `- item`, `* item`, `+ item` and `1. item`.
#[must_use]
pub fn list_item(line: &str) -> Option<ListItem<'_>> {
  if let Some(caps) = UNORDERED_ITEM.captures(line) {
    return Some(ListItem {
      kind:    ListKind::Unordered,
      number:  None,
      content: caps.get(1).map_or("", |m| m.as_str()),
    });
  }

  ORDERED_ITEM.captures(line).map(|caps| {
    ListItem {
      kind:    ListKind::Ordered,
      number:  caps.get(1).and_then(|m| m.as_str().parse().ok()),
      content: caps.get(2).map_or("", |m| m.as_str()),
    }
  })
}

/// Recognise a task marker at the start of list item content.
///
/// Returns whether the box is checked and the remaining text.
#[must_use]
pub fn task_marker(content: &str) -> Option<(bool, &str)> {
  TASK_MARKER.captures(content).map(|caps| {
    let checked = caps.get(1).is_some_and(|m| m.as_str() != " ");
    (checked, caps.get(2).map_or("", |m| m.as_str()))
  })
}

/// `---`, `___` or `***` on a line of their own.
#[must_use]
pub fn is_horizontal_rule(line: &str) -> bool {
  matches!(line, "---" | "___" | "***")
}

/// Recognise an ATX heading, returning its level and text.
///
/// A closing run of `#` characters is dropped.
#[must_use]
pub fn heading(line: &str) -> Option<(u8, &str)> {
  let caps = HEADING.captures(line)?;
  let level = u8::try_from(caps.get(1)?.as_str().len()).ok()?;
  Some((level, caps.get(2).map_or("", |m| m.as_str().trim())))
}

/// Content of a `> ` blockquote line.
#[must_use]
pub fn blockquote(line: &str) -> Option<&str> {
  line.strip_prefix("> ")
}

/// Recognise a GitHub alert marker, returning the lowercased kind and the
/// text after the marker.
#[must_use]
pub fn alert(line: &str) -> Option<(String, &str)> {
  if !line.starts_with("[!") {
    return None;
  }
  let caps = ALERT.captures(line)?;
  let kind = caps.get(1)?.as_str().to_ascii_lowercase();
  Some((kind, caps.get(2).map_or("", |m| m.as_str())))
}

/// A piece of a `<details>`/`<summary>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsPart<'a> {
  /// A canonical tag, safe to emit verbatim.
  Tag(&'static str),
  /// Text between tags, still to be inline processed.
  Text(&'a str),
}

/// Split a line starting with a details or summary tag into tags and text.
///
/// Only `<details>`, `<details open>`, `</details>`, `<summary>` and
/// `</summary>` are ever returned as tags, whatever the input casing or
/// spacing.
#[must_use]
pub fn details_parts(line: &str) -> Option<Vec<DetailsPart<'_>>> {
  if !DETAILS_TAG.find(line).is_some_and(|m| m.start() == 0) {
    return None;
  }

  let mut parts = Vec::new();
  let mut last = 0;
  for caps in DETAILS_TAG.captures_iter(line) {
    let Some(whole) = caps.get(0) else { continue };
    if whole.start() > last {
      parts.push(DetailsPart::Text(&line[last..whole.start()]));
    }
    let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
    let is_details = caps
      .get(2)
      .is_some_and(|m| m.as_str().eq_ignore_ascii_case("details"));
    let open = caps.get(3).is_some();
    parts.push(DetailsPart::Tag(match (closing, is_details, open) {
      (true, true, _) => "</details>",
      (true, false, _) => "</summary>",
      (false, true, true) => "<details open>",
      (false, true, false) => "<details>",
      (false, false, _) => "<summary>",
    }));
    last = whole.end();
  }
  if last < line.len() {
    parts.push(DetailsPart::Text(&line[last..]));
  }
  Some(parts)
}

/// Column alignment declared by a separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
  None,
  Left,
  Center,
  Right,
}

impl Alignment {
  /// Attribute fragment (with leading space) for a cell in this column.
  #[must_use]
  pub const fn attribute(self) -> &'static str {
    match self {
      Self::None => "",
      Self::Left => r#" style="text-align: left""#,
      Self::Center => r#" style="text-align: center""#,
      Self::Right => r#" style="text-align: right""#,
    }
  }
}

/// `| a | b |` shaped line.
#[must_use]
pub fn is_table_row(line: &str) -> bool {
  TABLE_ROW.is_match(line)
}

/// `| --- | :-: |` shaped line.
#[must_use]
pub fn is_table_separator(line: &str) -> bool {
  TABLE_SEPARATOR.is_match(line)
}

/// Cells of a table row, trimmed. The caller checks [`is_table_row`] first.
#[must_use]
pub fn table_cells(line: &str) -> Vec<&str> {
  line
    .strip_prefix('|')
    .and_then(|rest| rest.strip_suffix('|'))
    .map_or_else(Vec::new, |inner| inner.split('|').map(str::trim).collect())
}

/// Column alignments declared by a separator row.
#[must_use]
pub fn table_alignments(separator: &str) -> Vec<Alignment> {
  table_cells(separator)
    .into_iter()
    .map(|cell| {
      match (cell.starts_with(':'), cell.ends_with(':')) {
        (true, true) => Alignment::Center,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (false, false) => Alignment::None,
      }
    })
    .collect()
}
