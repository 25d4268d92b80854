use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::api::BeerSource;
use crate::coordinator::{fetch_and_save, SaveOutcome};
use crate::models::BeerRecord;

use super::helpers::build_record_lines;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height of the detail card when the additional fields are collapsed.
const CARD_HEIGHT_COLLAPSED: u16 = 3;
/// Height of the detail card with brand/name/style rows visible.
const CARD_HEIGHT_EXPANDED: u16 = 6;

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Generic over the beer
/// source so the key handlers can be driven by a canned source in tests.
pub struct App<S: BeerSource> {
    conn: Connection,
    source: S,
    /// Most recently fetched record, shown in the detail card. Stays on its
    /// previous value when a fetch fails.
    current: Option<BeerRecord>,
    /// Saved-names projection, re-read from the store after each save.
    names: Vec<String>,
    /// Whether the detail card shows the additional fields.
    expanded: bool,
    /// Cursor into the saved-names list.
    selected: usize,
    status: Option<StatusMessage>,
    /// Busy guard: set for the duration of a fetch-and-save sequence so a
    /// repeated trigger cannot start an overlapping one.
    in_flight: bool,
}

impl<S: BeerSource> App<S> {
    pub fn new(conn: Connection, source: S, names: Vec<String>) -> Self {
        Self {
            conn,
            source,
            current: None,
            names,
            expanded: false,
            selected: 0,
            status: None,
            in_flight: false,
        }
    }

    /// Dispatch one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('f') | KeyCode::Enter => self.handle_fetch(),
            KeyCode::Char('d') | KeyCode::Tab => {
                self.expanded = !self.expanded;
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => {
                if !self.names.is_empty() {
                    self.selected = self.names.len() - 1;
                }
            }
            _ => {}
        }
        Ok(false)
    }

    /// Run the fetch → insert → list-refresh sequence and fold its outcome
    /// into view state. Only the fetch error leaves the detail card
    /// untouched; a store failure still shows what was fetched.
    fn handle_fetch(&mut self) {
        if self.in_flight {
            return;
        }
        self.in_flight = true;
        let result = fetch_and_save(&self.source, &self.conn);
        self.in_flight = false;

        match result {
            Ok(SaveOutcome::Saved { record, names }) => {
                self.set_status(format!("Saved {}.", record.name), StatusKind::Info);
                self.current = Some(record);
                self.names = names;
                // Keep the cursor on the newest entry.
                if !self.names.is_empty() {
                    self.selected = self.names.len() - 1;
                }
            }
            Ok(SaveOutcome::StoreFailed { record, error }) => {
                self.set_status(error.to_string(), StatusKind::Error);
                self.current = Some(record);
            }
            Err(err) => {
                self.set_status(err.to_string(), StatusKind::Error);
            }
        }
    }

    fn move_selection(&mut self, offset: isize) {
        if self.names.is_empty() {
            return;
        }
        let len = self.names.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let card_height = if self.expanded {
            CARD_HEIGHT_EXPANDED
        } else {
            CARD_HEIGHT_COLLAPSED
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(card_height),
                Constraint::Min(1),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_detail_card(frame, chunks[0]);
        self.draw_saved_list(frame, chunks[1]);
        if area.height >= FOOTER_HEIGHT {
            self.draw_footer(frame, chunks[2]);
        }
    }

    fn draw_detail_card(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Current Beer");
        let card = match &self.current {
            Some(record) => Paragraph::new(build_record_lines(record, self.expanded))
                .alignment(Alignment::Left)
                .block(block),
            None => Paragraph::new("No beer fetched yet. Press 'f' to fetch one.")
                .alignment(Alignment::Center)
                .block(block),
        };
        frame.render_widget(card, area);
    }

    fn draw_saved_list(&self, frame: &mut Frame, area: Rect) {
        let title = format!("Saved Beers ({})", self.names.len());
        let block = Block::default().borders(Borders::ALL).title(title);

        if self.names.is_empty() {
            let message = Paragraph::new("Nothing saved yet.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = self
            .names
            .iter()
            .map(|name| ListItem::new(Line::from(name.clone())))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if self.in_flight {
            Line::from(Span::styled(
                "Fetching...",
                Style::default().fg(Color::Yellow),
            ))
        } else if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = Line::from(
            "[f] fetch new beer  [d] toggle details  [up/down] browse saved  [q] quit",
        );

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchError;
    use crate::db::{ensure_schema, fetch_names};

    struct StubSource(Option<BeerRecord>);

    impl BeerSource for StubSource {
        fn fetch(&self) -> Result<BeerRecord, FetchError> {
            match &self.0 {
                Some(record) => Ok(record.clone()),
                None => Err(FetchError::Decode(
                    serde_json::from_str::<BeerRecord>("garbage").unwrap_err(),
                )),
            }
        }
    }

    fn guinness() -> BeerRecord {
        BeerRecord {
            brand: "Guinness".into(),
            name: "Guinness Draught".into(),
            style: "Stout".into(),
        }
    }

    fn app_with(source: StubSource) -> App<StubSource> {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        App::new(conn, source, Vec::new())
    }

    #[test]
    fn fetch_key_updates_display_and_list() {
        let mut app = app_with(StubSource(Some(guinness())));
        app.handle_key(KeyCode::Char('f')).unwrap();

        assert_eq!(app.current, Some(guinness()));
        assert_eq!(app.names, vec!["Guinness Draught"]);
        assert!(matches!(
            app.status,
            Some(StatusMessage {
                kind: StatusKind::Info,
                ..
            })
        ));
    }

    #[test]
    fn fetch_failure_leaves_prior_state_and_sets_error() {
        let mut app = app_with(StubSource(Some(guinness())));
        app.handle_key(KeyCode::Char('f')).unwrap();

        // Swap in a failing source; the displayed record and list must not
        // change, only the error slot.
        app.source = StubSource(None);
        app.handle_key(KeyCode::Char('f')).unwrap();

        assert_eq!(app.current, Some(guinness()));
        assert_eq!(app.names, vec!["Guinness Draught"]);
        assert!(matches!(
            app.status,
            Some(StatusMessage {
                kind: StatusKind::Error,
                ..
            })
        ));
        assert!(fetch_names(&app.conn).unwrap().len() == 1);
    }

    #[test]
    fn insert_failure_updates_display_but_not_list() {
        // Connection without schema makes every insert fail.
        let conn = Connection::open_in_memory().unwrap();
        let mut app = App::new(conn, StubSource(Some(guinness())), Vec::new());

        app.handle_key(KeyCode::Char('f')).unwrap();

        assert_eq!(app.current, Some(guinness()));
        assert!(app.names.is_empty());
        assert!(matches!(
            app.status,
            Some(StatusMessage {
                kind: StatusKind::Error,
                ..
            })
        ));
    }

    #[test]
    fn detail_toggle_flips_expanded() {
        let mut app = app_with(StubSource(Some(guinness())));
        assert!(!app.expanded);
        app.handle_key(KeyCode::Char('d')).unwrap();
        assert!(app.expanded);
        app.handle_key(KeyCode::Tab).unwrap();
        assert!(!app.expanded);
    }

    #[test]
    fn quit_keys_request_exit() {
        let mut app = app_with(StubSource(Some(guinness())));
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
        assert!(app.handle_key(KeyCode::Esc).unwrap());
        assert!(!app.handle_key(KeyCode::Char('x')).unwrap());
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut app = app_with(StubSource(Some(guinness())));
        app.handle_key(KeyCode::Up).unwrap();
        assert_eq!(app.selected, 0);

        app.handle_key(KeyCode::Char('f')).unwrap();
        app.handle_key(KeyCode::Char('f')).unwrap();
        app.handle_key(KeyCode::Down).unwrap();
        assert_eq!(app.selected, 1);
        app.handle_key(KeyCode::Down).unwrap();
        assert_eq!(app.selected, 1);
        app.handle_key(KeyCode::Home).unwrap();
        assert_eq!(app.selected, 0);
    }
}
