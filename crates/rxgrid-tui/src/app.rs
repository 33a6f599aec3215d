//! Application core — event loop, key dispatch, and rendering.
//!
//! One screen: the drug table. All data loading and filtering runs
//! through [`TableController`]; key handlers call controller methods on
//! a clone (spawned, so the loop never blocks on I/O) and rendering
//! reads state snapshots from the watch channel.

use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Wrap},
};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::watch;
use tracing::{debug, info};

use rxgrid_core::fmt::format_launch_date;
use rxgrid_core::{ColumnId, Drug, TableController, ViewState};

use crate::event::{Event, EventReader};
use crate::theme;
use crate::tui::Tui;
use crate::widgets::company_filter::CompanyFilter;
use crate::widgets::pagination;

/// Top-level application state and event loop.
pub struct App {
    controller: TableController,
    state_rx: watch::Receiver<Arc<ViewState>>,
    /// Whether the app should keep running.
    running: bool,
    /// Row selection within the current page.
    selected_row: usize,
    /// Company dropdown overlay.
    filter: CompanyFilter,
    throbber_state: ThrobberState,
}

impl App {
    pub fn new(controller: TableController) -> Self {
        let state_rx = controller.subscribe();
        Self {
            controller,
            state_rx,
            running: true,
            selected_row: 0,
            filter: CompanyFilter::new(),
            throbber_state: ThrobberState::default(),
        }
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        // Kick off the startup load; results flow back through the
        // watch channel and show up on the next render tick.
        let controller = self.controller.clone();
        tokio::spawn(async move { controller.load().await });

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => self.handle_key_event(key),
                Event::Resize(_, _) => {}
                Event::Tick => self.throbber_state.calc_next(),
                Event::Render => tui.draw(|frame| self.render(frame))?,
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    // ── Key handling ─────────────────────────────────────────────────

    fn handle_key_event(&mut self, key: KeyEvent) {
        if self.filter.visible() {
            self.handle_filter_key(key);
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('f') | KeyCode::Char('/') => {
                let state = self.controller.snapshot();
                self.filter
                    .open(&state.filter_options(), &state.selected_company);
            }
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') => self.selected_row = 0,
            KeyCode::Char('G') => self.select_last_row(),
            KeyCode::Char('h') | KeyCode::Left => self.page_delta(-1),
            KeyCode::Char('l') | KeyCode::Right => self.page_delta(1),
            KeyCode::Enter => self.activate_selected_cell(),
            KeyCode::Char('r') => self.retry(),
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => self.filter.close(),
            KeyCode::Char('j') | KeyCode::Down => {
                let count = self.controller.snapshot().filter_options().len();
                self.filter.select_next(count);
            }
            KeyCode::Char('k') | KeyCode::Up => self.filter.select_prev(),
            KeyCode::Enter => {
                let state = self.controller.snapshot();
                let options = state.filter_options();
                if let Some(choice) = self.filter.chosen(&options) {
                    let choice = choice.to_owned();
                    self.filter.close();
                    self.selected_row = 0;
                    let controller = self.controller.clone();
                    tokio::spawn(async move { controller.select_company(&choice).await });
                }
            }
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let page_len = self.controller.snapshot().page_drugs().len();
        if page_len == 0 {
            return;
        }
        let current = self.selected_row.min(page_len - 1);
        self.selected_row = current.saturating_add_signed(delta).min(page_len - 1);
    }

    fn select_last_row(&mut self) {
        let page_len = self.controller.snapshot().page_drugs().len();
        self.selected_row = page_len.saturating_sub(1);
    }

    fn page_delta(&mut self, delta: isize) {
        let current = self.controller.snapshot().current_page;
        let Some(target) = current.checked_add_signed(delta) else {
            return;
        };
        if self.controller.change_page(target) {
            // Page changed: snap back to the top of the results region
            self.selected_row = 0;
        }
    }

    /// Enter on a row filters by that row's company, exactly like
    /// picking the company in the dropdown.
    fn activate_selected_cell(&mut self) {
        let state = self.controller.snapshot();
        let Some(drug) = state.page_drugs().get(self.selected_row) else {
            return;
        };
        let company = drug.company.clone();
        debug!(company = %company, "company cell activated");
        self.selected_row = 0;
        let controller = self.controller.clone();
        tokio::spawn(async move { controller.company_cell_clicked(&company).await });
    }

    /// Re-issue the fetch for the current filter selection.
    fn retry(&self) {
        let name = self.controller.snapshot().selected_company.clone();
        let controller = self.controller.clone();
        tokio::spawn(async move { controller.select_company(&name).await });
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let state = self.state_rx.borrow().clone();
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Table / panels
            Constraint::Length(1), // Page bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if state.table_config.is_none() && state.drugs.is_empty() {
            // Nothing has ever loaded: the data region is either a
            // full error panel or a full loading panel.
            if let Some(message) = state.error.as_deref() {
                render_error_panel(frame, layout[0], message);
            } else {
                self.render_loading_panel(frame, layout[0]);
            }
        } else {
            self.render_catalog(frame, layout[0], &state);
        }

        pagination::render(frame, layout[1], &state);
        self.render_status_bar(frame, layout[2], &state);

        self.filter
            .render(frame, area, &state.filter_options(), &state.selected_company);
    }

    fn render_catalog(&self, frame: &mut Frame, area: Rect, state: &ViewState) {
        let (banner_area, table_area) = if state.error.is_some() {
            let split = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(area);
            (Some(split[0]), split[1])
        } else {
            (None, area)
        };

        // Non-blocking banner: last-known-good rows stay visible below.
        if let (Some(banner), Some(message)) = (banner_area, state.error.as_deref()) {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!(" ⚠ {message}"),
                    theme::error_banner(),
                ))),
                banner,
            );
        }

        self.render_table(frame, table_area, state);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, state: &ViewState) {
        let Some(config) = state.table_config.as_ref() else {
            return;
        };

        let block = Block::default()
            .title(format!(" Drugs ({}) ", state.drugs.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let page = state.page_drugs();
        if page.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  No drugs found",
                    Style::default().fg(theme::BORDER_GRAY),
                )),
                inner,
            );
            return;
        }

        let header = Row::new(
            config
                .columns
                .iter()
                .map(|column| Cell::from(format!(" {}", column.label)).style(theme::table_header())),
        );

        let selected = self.selected_row.min(page.len() - 1);
        let rows: Vec<Row> = page
            .iter()
            .enumerate()
            .map(|(i, drug)| {
                let is_selected = i == selected;
                let prefix = if is_selected { "▸" } else { " " };

                let cells: Vec<Cell> = config
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(col_idx, column)| {
                        let mut text = cell_value(drug, column.id);
                        if col_idx == 0 {
                            text = format!("{prefix}{text}");
                        }
                        let cell = Cell::from(text);
                        match column.id {
                            ColumnId::Company => {
                                cell.style(Style::default().fg(theme::PILL_TEAL).add_modifier(
                                    if is_selected {
                                        Modifier::BOLD
                                    } else {
                                        Modifier::empty()
                                    },
                                ))
                            }
                            ColumnId::LaunchDate => {
                                cell.style(Style::default().fg(theme::AMBER))
                            }
                            _ => cell,
                        }
                    })
                    .collect();

                Row::new(cells).style(if is_selected {
                    theme::table_selected()
                } else {
                    theme::table_row()
                })
            })
            .collect();

        let widths: Vec<Constraint> = config
            .columns
            .iter()
            .map(|column| column_width(column.id))
            .collect();

        let table = Table::new(rows, widths).header(header);
        frame.render_widget(table, inner);
    }

    fn render_loading_panel(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let throbber = Throbber::default()
            .label("  Loading catalog...")
            .style(Style::default().fg(theme::PILL_TEAL))
            .throbber_style(Style::default().fg(theme::MINT_GREEN));

        let line = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        frame.render_stateful_widget(throbber, line, &mut self.throbber_state.clone());
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, state: &ViewState) {
        let layout =
            Layout::horizontal([Constraint::Length(12), Constraint::Min(1)]).split(area);

        // Left: loading spinner or readiness indicator
        if state.loading {
            let throbber = Throbber::default()
                .label("loading")
                .style(Style::default().fg(theme::AMBER))
                .throbber_style(Style::default().fg(theme::AMBER));
            frame.render_stateful_widget(throbber, layout[0], &mut self.throbber_state.clone());
        } else {
            let indicator = if state.error.is_some() {
                Span::styled(" ● error", theme::error_text())
            } else {
                Span::styled(" ● ready", Style::default().fg(theme::MINT_GREEN))
            };
            frame.render_widget(Paragraph::new(Line::from(indicator)), layout[0]);
        }

        // Right: current filter plus key hints
        let line = Line::from(vec![
            Span::styled("filter: ", theme::key_hint()),
            Span::styled(
                state.selected_company.clone(),
                Style::default().fg(theme::PILL_TEAL),
            ),
            Span::styled("  │ ", theme::key_hint()),
            Span::styled("f ", theme::key_hint_key()),
            Span::styled("filter  ", theme::key_hint()),
            Span::styled("j/k ", theme::key_hint_key()),
            Span::styled("rows  ", theme::key_hint()),
            Span::styled("←/→ ", theme::key_hint_key()),
            Span::styled("page  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("filter by cell  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("reload  ", theme::key_hint()),
            Span::styled("q ", theme::key_hint_key()),
            Span::styled("quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), layout[1]);
    }
}

/// Error panel shown in place of the table when no data has ever loaded.
fn render_error_panel(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .title(" Error ")
        .title_style(
            Style::default()
                .fg(theme::ERROR_RED)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::error_text());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {message}"), theme::error_text())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  r ", theme::key_hint_key()),
            Span::styled("retry  ", theme::key_hint()),
            Span::styled("q ", theme::key_hint_key()),
            Span::styled("quit", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn cell_value(drug: &Drug, id: ColumnId) -> String {
    match id {
        ColumnId::Id => drug.id.to_string(),
        ColumnId::Code => drug.code.clone(),
        ColumnId::Name => drug.display_name(),
        ColumnId::Company => drug.company.clone(),
        ColumnId::LaunchDate => format_launch_date(&drug.launch_date),
    }
}

fn column_width(id: ColumnId) -> Constraint {
    match id {
        ColumnId::Id => Constraint::Length(6),
        ColumnId::Code => Constraint::Length(12),
        ColumnId::Name => Constraint::Min(24),
        ColumnId::Company => Constraint::Length(24),
        ColumnId::LaunchDate => Constraint::Length(12),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rxgrid_core::{ColumnId, Drug};

    use super::cell_value;

    fn drug() -> Drug {
        Drug {
            id: 42,
            code: "N02BA01".into(),
            generic_name: "acetylsalicylic acid".into(),
            brand_name: "Aspirin".into(),
            company: "Bayer".into(),
            launch_date: "1899-03-06T00:00:00Z".into(),
        }
    }

    #[test]
    fn name_cell_combines_generic_and_brand() {
        assert_eq!(
            cell_value(&drug(), ColumnId::Name),
            "acetylsalicylic acid (Aspirin)"
        );
    }

    #[test]
    fn launch_date_cell_is_day_month_year() {
        assert_eq!(cell_value(&drug(), ColumnId::LaunchDate), "06.03.1899");
    }

    #[test]
    fn id_cell_is_the_plain_number() {
        assert_eq!(cell_value(&drug(), ColumnId::Id), "42");
    }
}
