//! Detail view for the selected record.
//!
//! Renders the record's attributes as a fixed-order list of fact rows. A
//! row is emitted only when its field is present; searchable fields render
//! as attribute links, everything else as plain text. With no selection the
//! pane is an empty shell.
//!
//! The row model is built separately from rendering so the
//! which-rows-for-which-record contract is testable without a terminal.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use vitrine_core::Record;

use crate::hit::{ClickAction, HitRegistry};
use crate::model::{CatalogState, Pane};
use crate::theme::Theme;
use crate::views::AttributeLink;

// =============================================================================
// Fact Rows
// =============================================================================

/// Value side of one fact row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowValue {
    /// Plain text.
    Text(String),
    /// The primary image, rendered as media with no label.
    Image(String),
    /// One or more attribute links sharing the row's label.
    Links(Vec<AttributeLink>),
}

/// One label/value pair of the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct FactRow {
    /// Row label; the image row has none.
    pub label: Option<&'static str>,
    pub value: RowValue,
}

/// Build the record's fact rows in display order.
///
/// Absent fields produce no row; a label is never rendered with an empty
/// value.
pub fn fact_rows(record: &Record) -> Vec<FactRow> {
    let mut rows = Vec::new();

    push_text(&mut rows, "Title", &record.title);
    push_text(&mut rows, "Date", &record.dated);

    if let Some(url) = &record.primaryimageurl {
        rows.push(FactRow {
            label: None,
            value: RowValue::Image(url.clone()),
        });
    }

    push_text(&mut rows, "Description", &record.description);

    if !record.culture.is_empty() {
        let links = record.culture.iter().map(|c| AttributeLink::culture(c)).collect();
        push_links(&mut rows, "Culture", links);
    }

    push_text(&mut rows, "Style", &record.style);

    if let Some(technique) = &record.technique {
        push_links(&mut rows, "Technique", vec![AttributeLink::technique(technique)]);
    }
    if let Some(medium) = &record.medium {
        push_links(&mut rows, "Medium", vec![AttributeLink::medium(medium)]);
    }

    push_text(&mut rows, "Dimensions", &record.dimensions);

    let people: Vec<AttributeLink> = record
        .people
        .iter()
        .filter_map(|p| p.displayname.as_deref())
        .map(AttributeLink::person)
        .collect();
    if !people.is_empty() {
        push_links(&mut rows, "People", people);
    }

    push_text(&mut rows, "Department", &record.department);
    push_text(&mut rows, "Division", &record.division);
    push_text(&mut rows, "Contact", &record.contact);
    push_text(&mut rows, "Credit", &record.creditline);

    rows
}

/// All attribute links of the record, flattened in row order.
///
/// Indexes into this sequence are what the link cursor and
/// [`ClickAction::ActivateLink`] carry.
pub fn links(record: &Record) -> Vec<AttributeLink> {
    fact_rows(record)
        .into_iter()
        .filter_map(|row| match row.value {
            RowValue::Links(links) => Some(links),
            _ => None,
        })
        .flatten()
        .collect()
}

fn push_text(rows: &mut Vec<FactRow>, label: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        rows.push(FactRow {
            label: Some(label),
            value: RowValue::Text(value.clone()),
        });
    }
}

fn push_links(rows: &mut Vec<FactRow>, label: &'static str, links: Vec<AttributeLink>) {
    rows.push(FactRow {
        label: Some(label),
        value: RowValue::Links(links),
    });
}

// =============================================================================
// Rendering
// =============================================================================

/// Render the detail pane and register its link hit areas.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    state: &CatalogState,
    theme: &Theme,
    hits: &mut HitRegistry,
) {
    let focused = state.focus == Pane::Detail;
    let block = Block::bordered()
        .title(" Detail ")
        .border_style(theme.focused_border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // No selection: empty shell, no header, no rows.
    let Some(record) = &state.selected else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    // (line index, x offset, width) of every link, in link order.
    let mut link_cells: Vec<(usize, u16, u16)> = Vec::new();
    let mut next_link = 0usize;

    // Header: title and date, when present.
    let mut header: Vec<Span> = Vec::new();
    if let Some(title) = &record.title {
        header.push(Span::styled(title.clone(), theme.label()));
    }
    if let Some(dated) = &record.dated {
        if !header.is_empty() {
            header.push(Span::raw("  "));
        }
        header.push(Span::styled(dated.clone(), theme.dim()));
    }
    if !header.is_empty() {
        lines.push(Line::from(header));
        lines.push(Line::default());
    }

    for row in fact_rows(record) {
        match row.value {
            RowValue::Text(text) => {
                let mut spans = Vec::new();
                if let Some(label) = row.label {
                    spans.push(Span::styled(format!("{label}: "), theme.label()));
                }
                spans.push(Span::styled(text, theme.value()));
                lines.push(Line::from(spans));
            }
            RowValue::Image(url) => {
                lines.push(Line::from(Span::styled(
                    url,
                    theme.dim().add_modifier(Modifier::UNDERLINED),
                )));
            }
            RowValue::Links(links) => {
                let mut spans = Vec::new();
                let mut x = 0u16;
                if let Some(label) = row.label {
                    let label = format!("{label}: ");
                    x += label.chars().count() as u16;
                    spans.push(Span::styled(label, theme.label()));
                }
                for (i, link) in links.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::raw("  "));
                        x += 2;
                    }
                    let selected = focused && state.link_index == next_link;
                    let width = link.display().chars().count() as u16;
                    link_cells.push((lines.len(), x, width));
                    spans.push(Span::styled(link.display().to_string(), theme.link(selected)));
                    x += width;
                    next_link += 1;
                }
                lines.push(Line::from(spans));
            }
        }
    }

    // Keep the link under the cursor in view.
    let selected_line = link_cells
        .get(state.link_index)
        .map(|(line, _, _)| *line as u16)
        .unwrap_or(0);
    let scroll = selected_line.saturating_sub(inner.height.saturating_sub(1));

    frame.render_widget(Paragraph::new(Text::from(lines)).scroll((scroll, 0)), inner);

    for (index, (line, x, width)) in link_cells.iter().enumerate() {
        let line = *line as u16;
        if line < scroll || *x >= inner.width {
            continue;
        }
        let y = inner.y + (line - scroll);
        if y >= inner.y.saturating_add(inner.height) {
            continue;
        }
        let width = (*width).min(inner.width - x);
        hits.register(
            Rect::new(inner.x + x, y, width, 1),
            ClickAction::ActivateLink(index),
        );
    }
}

// =============================================================================
// Tests
// =============================================================================
