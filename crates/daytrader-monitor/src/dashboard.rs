//! TUI Dashboard using ratatui.

use chrono::{DateTime, Local};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use daytrader_analysis::{ScanOutcome, ScanRow, Trend};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Dashboard state.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Display currency label
    pub currency: String,
    pub rows: Vec<ScanRow>,
    pub last_refresh: Option<DateTime<Local>>,
    /// A refresh is in flight
    pub refreshing: bool,
    pub messages: Vec<String>,
}

impl DashboardState {
    /// Keep at most `keep` messages after adding one.
    pub fn push_message(&mut self, message: impl Into<String>, keep: usize) {
        self.messages.push(message.into());
        if self.messages.len() > keep {
            let excess = self.messages.len() - keep;
            self.messages.drain(..excess);
        }
    }
}

/// Counts shown in the statistics panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    bullish: usize,
    bearish: usize,
    other: usize,
    failed: usize,
}

fn tally(rows: &[ScanRow]) -> Tally {
    rows.iter().fold(Tally::default(), |mut t, row| {
        match row.trend() {
            Some(Trend::Bullish) => t.bullish += 1,
            Some(Trend::Bearish) => t.bearish += 1,
            Some(_) => t.other += 1,
            None => t.failed += 1,
        }
        t
    })
}

fn outcome_color(outcome: &ScanOutcome) -> Color {
    match outcome {
        ScanOutcome::Analyzed {
            trend: Trend::Bullish,
            ..
        } => Color::Green,
        ScanOutcome::Analyzed {
            trend: Trend::Bearish,
            ..
        } => Color::Red,
        ScanOutcome::Analyzed { .. } => Color::White,
        ScanOutcome::NoData => Color::DarkGray,
        ScanOutcome::Failed(_) => Color::Yellow,
    }
}

/// TUI Dashboard.
pub struct Dashboard {
    refresh_ms: u64,
}

impl Dashboard {
    /// Create a dashboard that redraws every `refresh_ms` milliseconds.
    pub fn new(refresh_ms: u64) -> Self {
        Self { refresh_ms }
    }

    /// Run the dashboard until 'q' or Esc.
    pub fn run<F>(&self, mut get_state: F) -> io::Result<()>
    where
        F: FnMut() -> DashboardState,
    {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal, &mut get_state);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        res
    }

    fn run_loop<B, F>(&self, terminal: &mut Terminal<B>, get_state: &mut F) -> io::Result<()>
    where
        B: Backend,
        F: FnMut() -> DashboardState,
    {
        loop {
            let state = get_state();
            terminal.draw(|f| self.ui(f, &state))?;

            if event::poll(Duration::from_millis(self.refresh_ms))? {
                if let Event::Key(key) = event::read()? {
                    if key.code == KeyCode::Char('q') || key.code == KeyCode::Esc {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn ui(&self, frame: &mut Frame, state: &DashboardState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Stats
                Constraint::Min(6),    // Watchlist
                Constraint::Length(7), // Messages
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0], state);
        self.render_stats(frame, chunks[1], state);
        self.render_watchlist(frame, chunks[2], state);
        self.render_messages(frame, chunks[3], state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let refreshed = match (&state.last_refresh, state.refreshing) {
            (_, true) => "refreshing...".to_string(),
            (Some(at), false) => format!("updated {}", at.format("%H:%M:%S")),
            (None, false) => "waiting for data".to_string(),
        };

        let header = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                "Daytrading Terminal",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(refreshed, Style::default().fg(Color::Cyan)),
            Span::raw(" | Press 'q' to quit"),
        ])])
        .block(Block::default().borders(Borders::ALL).title("System"));
        frame.render_widget(header, area);
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let t = tally(&state.rows);

        let stats = Paragraph::new(Line::from(vec![
            Span::raw("Symbols: "),
            Span::styled(
                format!("{}", state.rows.len()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  |  Bullish: "),
            Span::styled(format!("{}", t.bullish), Style::default().fg(Color::Green)),
            Span::raw("  |  Bearish: "),
            Span::styled(format!("{}", t.bearish), Style::default().fg(Color::Red)),
            Span::raw("  |  Other: "),
            Span::raw(format!("{}", t.other)),
            Span::raw("  |  Unavailable: "),
            Span::styled(format!("{}", t.failed), Style::default().fg(Color::Yellow)),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Statistics"));
        frame.render_widget(stats, area);
    }

    fn render_watchlist(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let price_header = if state.currency.is_empty() {
            "Price".to_string()
        } else {
            format!("Price ({})", state.currency)
        };
        let header_cells = ["Query".to_string(), "Ticker".to_string(), price_header, "Analysis".to_string()]
            .into_iter()
            .map(|h| Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells).height(1);

        let rows = state.rows.iter().map(|row| {
            Row::new(vec![
                Cell::from(row.query.clone()),
                Cell::from(row.symbol.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(row.price_text()),
                Cell::from(row.analysis_text())
                    .style(Style::default().fg(outcome_color(&row.outcome))),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(20),
                Constraint::Percentage(15),
                Constraint::Percentage(15),
                Constraint::Percentage(50),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Watchlist"));

        frame.render_widget(table, area);
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let messages: Vec<Line> = state
            .messages
            .iter()
            .rev()
            .take(5)
            .map(|m| Line::from(m.as_str()))
            .collect();

        let paragraph =
            Paragraph::new(messages).block(Block::default().borders(Borders::ALL).title("Log"));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn state() -> DashboardState {
        DashboardState {
            currency: "EUR".into(),
            rows: vec![
                ScanRow {
                    query: "rheinmetall".into(),
                    symbol: Some("RHM.DE".into()),
                    price: Some(512.4),
                    outcome: ScanOutcome::Analyzed {
                        trend: Trend::Bullish,
                        summary: "Bullish, RSI 63 (neutral)".into(),
                    },
                },
                ScanRow {
                    query: "boeing".into(),
                    symbol: Some("BA".into()),
                    price: Some(180.0),
                    outcome: ScanOutcome::Analyzed {
                        trend: Trend::Bearish,
                        summary: "Bearish, RSI 25 (oversold)".into(),
                    },
                },
                ScanRow::no_data("xyz", "XYZ"),
            ],
            last_refresh: None,
            refreshing: false,
            messages: vec!["XYZ: no data".into()],
        }
    }

    #[test]
    fn test_tally() {
        assert_eq!(
            tally(&state().rows),
            Tally {
                bullish: 1,
                bearish: 1,
                other: 0,
                failed: 1
            }
        );
    }

    #[test]
    fn test_push_message_bounds_history() {
        let mut state = DashboardState::default();
        for i in 0..10 {
            state.push_message(format!("m{i}"), 3);
        }
        assert_eq!(state.messages, vec!["m7", "m8", "m9"]);
    }

    #[test]
    fn test_renders_rows() {
        let dashboard = Dashboard::new(250);
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        let state = state();

        terminal.draw(|f| dashboard.ui(f, &state)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("RHM.DE"));
        assert!(screen.contains("512.40"));
        assert!(screen.contains("Price (EUR)"));
        assert!(screen.contains("waiting for data"));
        assert!(screen.contains("XYZ: no data"));
    }
}
