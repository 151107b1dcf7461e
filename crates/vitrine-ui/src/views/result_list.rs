//! Paginated result list.
//!
//! One summary line per record on the current page, a cursor for keyboard
//! selection, and a pagination row whose controls are live only when the
//! result set carries the matching cursor URL. Selecting an entry promotes
//! it to the detail pane; it never fetches.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use vitrine_core::{PageInfo, QueryResultSet, Record};

use crate::hit::{ClickAction, HitRegistry};
use crate::model::{CatalogState, Pane};
use crate::theme::Theme;

/// Shown in place of a missing title.
pub const UNTITLED: &str = "Untitled";

/// Marker prefix for entries that carry a primary image.
const IMAGE_MARKER: &str = "▣ ";

const PREV_LABEL: &str = "◀ Prev";
const NEXT_LABEL: &str = "Next ▶";

// =============================================================================
// Entry Model
// =============================================================================

/// Summary line for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySummary {
    /// Title, or the placeholder when the record has none.
    pub title: String,
    /// Whether the title is the placeholder.
    pub placeholder: bool,
    /// Whether the record carries a primary image.
    pub has_image: bool,
}

impl EntrySummary {
    fn of(record: &Record) -> Self {
        match &record.title {
            Some(title) => Self {
                title: title.clone(),
                placeholder: false,
                has_image: record.has_image(),
            },
            None => Self {
                title: UNTITLED.to_string(),
                placeholder: true,
                has_image: record.has_image(),
            },
        }
    }
}

/// Build one summary per record, in result order.
pub fn entries(results: &QueryResultSet) -> Vec<EntrySummary> {
    results.records.iter().map(EntrySummary::of).collect()
}

/// Which pagination controls are live: `(previous, next)`.
pub fn pagination(info: &PageInfo) -> (bool, bool) {
    (info.prev.is_some(), info.next.is_some())
}

// =============================================================================
// Rendering
// =============================================================================

/// Render the result list and register its hit areas.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    state: &CatalogState,
    theme: &Theme,
    hits: &mut HitRegistry,
) {
    let focused = state.focus == Pane::Results;
    let title = if state.loading {
        " Results (loading…) ".to_string()
    } else {
        format!(" Results ({}) ", state.results.len())
    };
    let block = Block::bordered()
        .title(title)
        .border_style(theme.focused_border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [list_area, pagination_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    render_entries(frame, list_area, state, theme, hits, focused);
    render_pagination(frame, pagination_area, &state.results.info, theme, hits);
}

fn render_entries(
    frame: &mut Frame,
    area: Rect,
    state: &CatalogState,
    theme: &Theme,
    hits: &mut HitRegistry,
    focused: bool,
) {
    let items: Vec<ListItem> = entries(&state.results)
        .into_iter()
        .map(|entry| {
            let marker = if entry.has_image { IMAGE_MARKER } else { "  " };
            let title_style = if entry.placeholder {
                theme.dim()
            } else {
                theme.value()
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, theme.dim()),
                Span::styled(entry.title, title_style),
            ]))
        })
        .collect();

    let mut list_state = ListState::default().with_selected(Some(state.cursor_index));
    let highlight = if focused {
        theme.cursor_row()
    } else {
        theme.dim()
    };
    let list = List::new(items).highlight_style(highlight);
    frame.render_stateful_widget(list, area, &mut list_state);

    // One hit row per visible entry.
    let offset = list_state.offset();
    for visible in 0..area.height as usize {
        let index = offset + visible;
        if index >= state.results.len() {
            break;
        }
        hits.register(
            Rect::new(area.x, area.y + visible as u16, area.width, 1),
            ClickAction::SelectEntry(index),
        );
    }
}

fn render_pagination(
    frame: &mut Frame,
    area: Rect,
    info: &PageInfo,
    theme: &Theme,
    hits: &mut HitRegistry,
) {
    let (prev_enabled, next_enabled) = pagination(info);
    let style = |enabled: bool| if enabled { theme.label() } else { theme.dim() };

    let line = Line::from(vec![
        Span::styled(PREV_LABEL, style(prev_enabled)),
        Span::raw("   "),
        Span::styled(NEXT_LABEL, style(next_enabled)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    // Disabled controls stay inert: no hit area.
    let prev_width = PREV_LABEL.chars().count() as u16;
    let next_width = NEXT_LABEL.chars().count() as u16;
    if prev_enabled {
        hits.register(
            Rect::new(area.x, area.y, prev_width.min(area.width), 1),
            ClickAction::PrevPage,
        );
    }
    if next_enabled && prev_width + 3 < area.width {
        hits.register(
            Rect::new(
                area.x + prev_width + 3,
                area.y,
                next_width.min(area.width - prev_width - 3),
                1,
            ),
            ClickAction::NextPage,
        );
    }
}

// =============================================================================
// Tests
// =============================================================================
