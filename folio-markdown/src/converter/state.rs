//! Mutable state of one conversion pass.
use std::{collections::HashMap, fmt::Write, mem};

use log::{debug, trace, warn};

use super::{
  blocks::{self, Alignment, DetailsPart, ListItem, ListKind},
  types::{BareRowPolicy, FencePolicy, MarkdownOptions},
};
use crate::{
  inline::{InlineOptions, process_inline_with},
  render::{DiagramIds, render_code_block, render_diagram_block_with},
  types::{Header, MarkdownResult},
  utils::{anchor_id, capitalize_first, codeblock, strip_emoji},
};

/// Emitted for every blank line outside a fence.
const SPACER: &str = r#"<div class="md-spacer my-2"></div>"#;

/// Block being accumulated. Fences and lists are mutually exclusive.
#[derive(Debug, Default)]
enum Block<'a> {
  #[default]
  Idle,
  Fence {
    info:  &'a str,
    lines: Vec<&'a str>,
  },
  List {
    kind:  ListKind,
    start: Option<u64>,
    items: Vec<String>,
  },
}

/// State scoped to one call of [`MarkdownConverter::render`].
///
/// [`MarkdownConverter::render`]: super::MarkdownConverter::render
pub(crate) struct ParseState<'a> {
  options:  &'a MarkdownOptions,
  inline:   InlineOptions<'a>,
  block:    Block<'a>,
  /// Column alignments of the table whose body is open, if any.
  table:    Option<Vec<Alignment>>,
  output:   Vec<String>,
  headers:  Vec<Header>,
  anchors:  HashMap<String, usize>,
  diagrams: DiagramIds,
}

impl<'a> ParseState<'a> {
  pub(crate) fn new(options: &'a MarkdownOptions) -> Self {
    Self {
      options,
      inline: options.inline(),
      block: Block::Idle,
      table: None,
      output: Vec::new(),
      headers: Vec::new(),
      anchors: HashMap::new(),
      diagrams: DiagramIds::new(),
    }
  }

  /// Process one input line. `next` is the following line, used to detect
  /// table headers.
  pub(crate) fn push_line(&mut self, line: &'a str, next: Option<&'a str>) {
    if matches!(self.block, Block::Fence { .. }) {
      if codeblock::fence_info(line).is_some() {
        self.close_fence();
      } else if let Block::Fence { lines, .. } = &mut self.block {
        lines.push(line);
      }
      return;
    }

    let trimmed = line.trim();

    if let Some(info) = codeblock::fence_info(trimmed) {
      self.close_list();
      self.close_table();
      trace!("Opening fence with info '{info}'");
      self.block = Block::Fence {
        info,
        lines: Vec::new(),
      };
      return;
    }

    if let Some(item) = blocks::list_item(trimmed) {
      self.close_table();
      self.push_list_item(item);
      return;
    }
    self.close_list();

    if !blocks::is_table_row(trimmed) {
      self.close_table();
    }

    if blocks::is_horizontal_rule(trimmed) {
      self.output.push("<hr />".to_string());
    } else if let Some((level, text)) = blocks::heading(trimmed) {
      self.push_heading(level, text);
    } else if trimmed.is_empty() {
      self.output.push(SPACER.to_string());
    } else if let Some(content) = blocks::blockquote(trimmed) {
      let content = self.inline(content);
      self
        .output
        .push(format!("<blockquote><p>{content}</p></blockquote>"));
    } else if let Some((kind, content)) = blocks::alert(trimmed) {
      self.push_alert(&kind, content);
    } else if let Some(parts) = blocks::details_parts(trimmed) {
      self.push_details(&parts);
    } else if blocks::is_table_separator(trimmed) {
      trace!("Consumed table separator row");
    } else if blocks::is_table_row(trimmed) {
      self.push_table_row(trimmed, next);
    } else {
      self.push_paragraph(trimmed);
    }
  }

  /// Flush open blocks and assemble the result.
  pub(crate) fn finish(mut self) -> MarkdownResult {
    let pending = match &self.block {
      Block::Fence { info, lines } => Some((*info, lines.len())),
      _ => None,
    };
    if let Some((info, buffered)) = pending {
      match self.options.unterminated_fence {
        FencePolicy::Flush => {
          warn!(
            "Document ended inside a '{info}' fence, rendering {buffered} \
             buffered line(s)"
          );
          self.close_fence();
        },
        FencePolicy::Drop => {
          warn!(
            "Document ended inside a '{info}' fence, dropping {buffered} \
             buffered line(s)"
          );
          self.block = Block::Idle;
        },
      }
    }
    self.close_list();
    self.close_table();

    let title = self
      .headers
      .iter()
      .find(|h| h.level == 1)
      .map(|h| h.text.clone());

    MarkdownResult {
      html: self.output.join("\n"),
      headers: self.headers,
      title,
    }
  }

  fn inline(&self, text: &str) -> String {
    process_inline_with(text, &self.inline)
  }

  fn close_fence(&mut self) {
    let Block::Fence { info, lines } = mem::take(&mut self.block) else {
      return;
    };
    let code = lines.join("\n");
    let tag = codeblock::language_tag(info);

    let html = if self.options.is_diagram_language(tag) {
      render_diagram_block_with(
        &code,
        &mut self.diagrams,
        self.options.diagram_source,
      )
    } else {
      render_code_block(&code, info)
    };
    self.output.push(html);
  }

  fn push_list_item(&mut self, item: ListItem<'_>) {
    let same_kind =
      matches!(&self.block, Block::List { kind, .. } if *kind == item.kind);
    if !same_kind {
      self.close_list();
      self.block = Block::List {
        kind:  item.kind,
        start: item.number,
        items: Vec::new(),
      };
    }

    let html = match blocks::task_marker(item.content) {
      Some((checked, rest)) => {
        let checkbox = if checked {
          r#"<input type="checkbox" class="task-list-checkbox" checked disabled />"#
        } else {
          r#"<input type="checkbox" class="task-list-checkbox" disabled />"#
        };
        format!(
          r#"<li class="task-list-item">{checkbox}{}</li>"#,
          self.inline(rest)
        )
      },
      None => format!("<li>{}</li>", self.inline(item.content)),
    };

    if let Block::List { items, .. } = &mut self.block {
      items.push(html);
    }
  }

  fn close_list(&mut self) {
    if !matches!(self.block, Block::List { .. }) {
      return;
    }
    let Block::List { kind, start, items } = mem::take(&mut self.block) else {
      return;
    };

    let tag = kind.tag();
    let mut html =
      String::with_capacity(items.iter().map(String::len).sum::<usize>() + 16);
    match start {
      Some(n) if kind == ListKind::Ordered && n != 1 => {
        let _ = write!(html, r#"<{tag} start="{n}">"#);
      },
      _ => {
        let _ = write!(html, "<{tag}>");
      },
    }
    for item in &items {
      html.push_str(item);
    }
    let _ = write!(html, "</{tag}>");
    debug!("Closed <{tag}> with {} item(s)", items.len());
    self.output.push(html);
  }

  fn push_heading(&mut self, level: u8, text: &str) {
    let id = self.unique_anchor(anchor_id(text));
    let content = self.inline(text);
    self
      .output
      .push(format!(r#"<h{level} id="{id}">{content}</h{level}>"#));
    self.headers.push(Header {
      text: strip_emoji(text).trim().to_string(),
      level,
      id,
    });
  }

  /// Make `base` unique among the anchors of this document.
  fn unique_anchor(&mut self, base: String) -> String {
    let base = if base.is_empty() {
      "section".to_string()
    } else {
      base
    };
    let seen = self.anchors.entry(base.clone()).or_insert(0);
    let id = if *seen == 0 {
      base
    } else {
      format!("{base}-{seen}")
    };
    *seen += 1;
    id
  }

  fn push_alert(&mut self, kind: &str, content: &str) {
    let mut html = format!(
      r#"<div class="markdown-alert markdown-alert-{kind}"><p class="markdown-alert-title">{}</p>"#,
      capitalize_first(kind)
    );
    let content = self.inline(content);
    if !content.trim().is_empty() {
      let _ = write!(html, "<p>{content}</p>");
    }
    html.push_str("</div>");
    self.output.push(html);
  }

  fn push_details(&mut self, parts: &[DetailsPart<'_>]) {
    let mut html = String::new();
    for part in parts {
      match part {
        DetailsPart::Tag(tag) => html.push_str(tag),
        DetailsPart::Text(text) => html.push_str(&self.inline(text)),
      }
    }
    self.output.push(html);
  }

  fn push_table_row(&mut self, row: &str, next: Option<&str>) {
    let cells = blocks::table_cells(row);
    let separator = next.map(str::trim).filter(|n| blocks::is_table_separator(n));

    if let Some(separator) = separator {
      self.close_table();
      let alignments = blocks::table_alignments(separator);
      let mut html = String::from(r#"<table class="md-table"><thead><tr>"#);
      for (i, cell) in cells.iter().enumerate() {
        let align = alignments.get(i).copied().unwrap_or(Alignment::None);
        let _ = write!(html, "<th{}>{}</th>", align.attribute(), self.inline(cell));
      }
      html.push_str("</tr></thead><tbody>");
      self.output.push(html);
      self.table = Some(alignments);
      return;
    }

    if let Some(alignments) = &self.table {
      let mut html = String::from("<tr>");
      for (i, cell) in cells.iter().enumerate() {
        let align = alignments.get(i).copied().unwrap_or(Alignment::None);
        let _ = write!(html, "<td{}>{}</td>", align.attribute(), self.inline(cell));
      }
      html.push_str("</tr>");
      self.output.push(html);
      return;
    }

    match self.options.bare_table_rows {
      BareRowPolicy::Paragraph => self.push_paragraph(row),
      BareRowPolicy::Drop => debug!("Dropping table row outside a table: {row}"),
    }
  }

  fn close_table(&mut self) {
    if self.table.take().is_some() {
      self.output.push("</tbody></table>".to_string());
    }
  }

  fn push_paragraph(&mut self, text: &str) {
    let content = self.inline(text);
    if !content.trim().is_empty() {
      self.output.push(format!("<p>{content}</p>"));
    }
  }
}
