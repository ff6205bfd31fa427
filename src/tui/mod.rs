//! Ratatui-based distribution browser.
//!
//! Shows one column at a time: histogram outline plus KDE overlay, with the
//! Shapiro-Wilk outcome in the header. Arrow keys move between columns.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::domain::NormalityResult;
use crate::error::AppError;
use crate::stats::ColumnDistribution;

mod plotters_chart;

use plotters_chart::{DistributionChart, chart_bounds, histogram_outline};

/// Start the browser. Returns immediately when there is nothing to show.
pub fn run(distributions: Vec<ColumnDistribution>, results: Option<Vec<NormalityResult>>) -> Result<(), AppError> {
    if distributions.is_empty() {
        log::warn!("no distributions to browse");
        return Ok(());
    }

    let _guard = TerminalGuard::new()?;

    let backend = ratatui::backend::CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::compute(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(distributions, results.unwrap_or_default());
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::compute(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::compute(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    distributions: Vec<ColumnDistribution>,
    results: Vec<NormalityResult>,
    selected: usize,
}

impl App {
    fn new(distributions: Vec<ColumnDistribution>, results: Vec<NormalityResult>) -> Self {
        Self {
            distributions,
            results,
            selected: 0,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::compute(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::compute(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::compute(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the browser should close.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let n = self.distributions.len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % n;
            }
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                self.selected = (self.selected + n - 1) % n;
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = n - 1,
            _ => {}
        }
        false
    }

    fn current(&self) -> &ColumnDistribution {
        &self.distributions[self.selected]
    }

    fn result_for(&self, name: &str) -> Option<&NormalityResult> {
        self.results.iter().find(|r| r.feature == name)
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let dist = self.current();
        let (lo, hi) = dist.x_range();
        let mut lines = vec![Line::from(vec![
            Span::styled("mmm", Style::default().fg(Color::Cyan)),
            Span::raw(format!(
                " inspect | {} | n={} | bins={} | x=[{lo:.3}, {hi:.3}]",
                dist.name,
                dist.n,
                dist.histogram.counts.len()
            )),
        ])];

        let normality = match self.result_for(&dist.name) {
            Some(r) => format!("Shapiro-Wilk: W={:.6} p={:.6e}", r.w_statistic, r.p_value),
            None => "Shapiro-Wilk: not run".to_string(),
        };
        lines.push(Line::from(Span::styled(normality, Style::default().fg(Color::Gray))));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(0)])
            .split(area);

        self.draw_columns(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
    }

    fn draw_columns(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .distributions
            .iter()
            .map(|d| ListItem::new(d.name.clone()))
            .collect();
        let list = List::new(items)
            .block(Block::default().title("Columns").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let dist = self.current();
        let block = Block::default()
            .title(format!("Distribution of '{}'", dist.name))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let outline = histogram_outline(dist);
        let (x_bounds, y_bounds) = chart_bounds(dist);
        let widget = DistributionChart {
            outline: &outline,
            kde: &dist.kde,
            x_bounds,
            y_bounds,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ column  Home/End first/last  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(
                format!("{}/{}", self.selected + 1, self.distributions.len()),
                Style::default().fg(Color::Yellow),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
