//! Application shell: terminal lifecycle, event loop, input dispatch.
//!
//! The loop redraws on two signals: terminal input, and state-change
//! notifications from the [`StateHandle`] watch channel (which is how a
//! completed fetch on a spawned task reaches the screen). All input
//! handling runs on the UI task; the only suspension point besides the
//! event stream is inside the query orchestrator's spawned fetches.

use std::io::{self, Stdout};

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};
use vitrine_core::Query;

use crate::hit::{ClickAction, HitRegistry};
use crate::model::{CatalogState, Pane, StateHandle};
use crate::query::QueryOrchestrator;
use crate::theme::Theme;
use crate::views::{record_detail, result_list};

// =============================================================================
// App
// =============================================================================

/// The running catalog browser.
pub struct App {
    state: StateHandle,
    orchestrator: QueryOrchestrator,
    hits: HitRegistry,
    theme: Theme,
}

impl App {
    /// Create the app over pre-initialized shared state.
    pub fn new(state: StateHandle, orchestrator: QueryOrchestrator) -> Self {
        Self {
            state,
            orchestrator,
            hits: HitRegistry::new(),
            theme: Theme::default(),
        }
    }

    /// Take over the terminal and run until the user quits.
    pub async fn run(mut self) -> io::Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        let restored = restore_terminal(&mut terminal);
        result.and(restored)
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> io::Result<()> {
        let mut events = EventStream::new();
        let mut redraw = self.state.subscribe();

        loop {
            terminal.draw(|frame| self.draw(frame))?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => {
                        if self.handle_event(event) {
                            return Ok(());
                        }
                    }
                    Some(Err(error)) => return Err(error),
                    None => return Ok(()),
                },
                changed = redraw.changed() => {
                    // The sender lives in the state handle we hold, so this
                    // only fails during teardown.
                    if changed.is_err() {
                        return Ok(());
                    }
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    fn draw(&mut self, frame: &mut Frame) {
        self.hits.clear();
        let snapshot = self.state.snapshot();

        let [left, right] = Layout::horizontal([
            Constraint::Percentage(45),
            Constraint::Percentage(55),
        ])
        .areas(frame.area());

        result_list::render(frame, left, &snapshot, &self.theme, &mut self.hits);
        record_detail::render(frame, right, &snapshot, &self.theme, &mut self.hits);
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Handle one terminal event. Returns true to quit.
    fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                false
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let snapshot = self.state.snapshot();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,

            KeyCode::Tab => self.state.set_focus(snapshot.focus.toggled()),

            KeyCode::Up => match snapshot.focus {
                Pane::Results => self.state.cursor_up(),
                Pane::Detail => self.state.link_up(),
            },
            KeyCode::Down => match snapshot.focus {
                Pane::Results => self.state.cursor_down(),
                Pane::Detail => self.state.link_down(link_count(&snapshot)),
            },

            KeyCode::Enter => match snapshot.focus {
                Pane::Results => {
                    if let Some(record) = snapshot.cursor_record() {
                        self.state.select_record(record.clone());
                    }
                }
                Pane::Detail => self.activate_link(&snapshot, snapshot.link_index),
            },

            KeyCode::Left | KeyCode::Char('p') => self.page(snapshot.results.info.prev.clone()),
            KeyCode::Right | KeyCode::Char('n') => self.page(snapshot.results.info.next.clone()),

            _ => {}
        }
        false
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if let Some(action) = self.hits.hit_test(mouse.column, mouse.row) {
                self.dispatch_click(action);
            }
        }
    }

    fn dispatch_click(&mut self, action: ClickAction) {
        let snapshot = self.state.snapshot();
        match action {
            ClickAction::SelectEntry(index) => {
                if let Some(record) = snapshot.results.records.get(index) {
                    self.state.select_record(record.clone());
                }
            }
            ClickAction::PrevPage => self.page(snapshot.results.info.prev.clone()),
            ClickAction::NextPage => self.page(snapshot.results.info.next.clone()),
            ClickAction::ActivateLink(index) => self.activate_link(&snapshot, index),
        }
    }

    // -------------------------------------------------------------------------
    // Query triggers
    // -------------------------------------------------------------------------

    /// Fetch a page cursor. A missing cursor means the control was disabled;
    /// nothing runs.
    fn page(&self, url: Option<String>) {
        if let Some(url) = url {
            let _ = self.orchestrator.run_query(Query::page(url));
        }
    }

    /// Activate the attribute link at `index` of the selected record.
    fn activate_link(&self, snapshot: &CatalogState, index: usize) {
        if let Some(record) = &snapshot.selected {
            if let Some(link) = record_detail::links(record).get(index) {
                let _ = self.orchestrator.run_query(link.to_query());
            }
        }
    }
}

fn link_count(snapshot: &CatalogState) -> usize {
    snapshot
        .selected
        .as_ref()
        .map(|record| record_detail::links(record).len())
        .unwrap_or(0)
}

// =============================================================================
// Terminal lifecycle
// =============================================================================

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::mock::MockFetcher;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;
    use vitrine_core::{PageInfo, QueryResultSet, Record, SearchField};

    fn scenario_a() -> QueryResultSet {
        QueryResultSet::new(
            PageInfo {
                prev: None,
                next: Some("https://example.test/object?page=2".to_string()),
            },
            vec![Record {
                title: Some("Vase".to_string()),
                primaryimageurl: Some("https://img.test/1.jpg".to_string()),
                ..Record::default()
            }],
        )
    }

    fn app_with(mock: MockFetcher, initial: QueryResultSet) -> (App, StateHandle) {
        let state = StateHandle::new(initial);
        let orchestrator = QueryOrchestrator::new(Arc::new(mock), state.clone());
        (App::new(state.clone(), orchestrator), state)
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn draw_once(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test]
    async fn test_draw_renders_both_panes() {
        let (mut app, _state) = app_with(MockFetcher::new(), scenario_a());
        let text = draw_once(&mut app);
        assert!(text.contains("Vase"));
        assert!(text.contains("Results (1)"));
        assert!(text.contains("Detail"));
    }

    #[tokio::test]
    async fn test_enter_selects_without_fetching() {
        let mock = MockFetcher::new();
        let term_calls = mock.term_calls.clone();
        let url_calls = mock.url_calls.clone();
        let (mut app, state) = app_with(mock, scenario_a());

        assert!(!app.handle_event(press(KeyCode::Enter)));

        let snapshot = state.snapshot();
        assert_eq!(snapshot.selected.as_ref().unwrap().title.as_deref(), Some("Vase"));
        assert!(!snapshot.loading);
        assert!(term_calls.lock().is_empty());
        assert!(url_calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_prev_control_is_inert() {
        let mock = MockFetcher::new();
        let url_calls = mock.url_calls.clone();
        let (mut app, state) = app_with(mock, scenario_a());

        app.handle_event(press(KeyCode::Left));

        assert!(url_calls.lock().is_empty());
        assert!(!state.snapshot().loading);
    }

    #[tokio::test]
    async fn test_clicking_a_result_entry_selects_it() {
        let (mut app, state) = app_with(MockFetcher::new(), scenario_a());
        draw_once(&mut app);

        // First list row of the left pane.
        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 2,
            row: 1,
            modifiers: KeyModifiers::NONE,
        }));

        let snapshot = state.snapshot();
        assert_eq!(snapshot.selected.as_ref().unwrap().title.as_deref(), Some("Vase"));
    }

    #[tokio::test]
    async fn test_clicking_a_culture_link_requeries() {
        let mock = MockFetcher::new();
        let term_calls = mock.term_calls.clone();
        let (mut app, state) = app_with(mock, scenario_a());
        state.select_record(Record {
            title: Some("Bowl".to_string()),
            culture: vec!["Greek".to_string(), "Roman".to_string()],
            ..Record::default()
        });
        draw_once(&mut app);

        // Find the first link ("Greek") on screen instead of hardcoding its cell.
        let (column, row) = (0..16u16)
            .find_map(|row| {
                (0..80u16).find_map(|column| {
                    (app.hits.hit_test(column, row) == Some(ClickAction::ActivateLink(0)))
                        .then_some((column, row))
                })
            })
            .expect("culture link not rendered");

        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }));

        // Raised before the spawned fetch gets a chance to run.
        assert!(state.snapshot().loading);
        while state.snapshot().loading {
            tokio::task::yield_now().await;
        }

        let after = state.snapshot();
        assert!(after.results.is_empty());
        assert!(after.selected.is_none());
        assert_eq!(
            term_calls.lock().as_slice(),
            [(SearchField::Culture, "Greek".to_string())]
        );
        assert!(draw_once(&mut app).contains("Results (0)"));
    }

    #[tokio::test]
    async fn test_q_quits() {
        let (mut app, _state) = app_with(MockFetcher::new(), QueryResultSet::default());
        assert!(app.handle_event(press(KeyCode::Char('q'))));
    }
}
