//! Manufacturer filter dropdown, rendered as a centered overlay.
//!
//! The option list is always the `"all"` sentinel followed by every
//! distinct company; this widget only tracks overlay visibility and the
//! highlighted row. The actual filtering runs through the controller.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::theme;

/// Dropdown overlay state.
#[derive(Debug, Default)]
pub struct CompanyFilter {
    visible: bool,
    selected: usize,
}

impl CompanyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Open the overlay with the currently applied filter highlighted.
    pub fn open(&mut self, options: &[&str], current: &str) {
        self.visible = true;
        self.selected = options.iter().position(|o| *o == current).unwrap_or(0);
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn select_next(&mut self, option_count: usize) {
        if option_count > 0 {
            self.selected = (self.selected + 1).min(option_count - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// The highlighted option, if any.
    pub fn chosen<'a>(&self, options: &[&'a str]) -> Option<&'a str> {
        options.get(self.selected).copied()
    }

    /// Render the overlay centered in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, options: &[&str], current: &str) {
        if !self.visible {
            return;
        }

        let longest = options.iter().map(|o| o.len()).max().unwrap_or(0);
        let desired = u16::try_from(longest + 10).unwrap_or(u16::MAX).max(30);
        let width = desired.min(area.width.saturating_sub(4));
        let height = u16::try_from(options.len() + 2)
            .unwrap_or(u16::MAX)
            .min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let overlay = Rect::new(area.x + x, area.y + y, width, height);

        // Clear the background
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            overlay,
        );

        let block = Block::default()
            .title(" Filter by company ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        // Scroll so the highlighted row stays visible in short terminals
        let visible_rows = inner.height as usize;
        let first = self.selected.saturating_sub(visible_rows.saturating_sub(1));

        let lines: Vec<Line> = options
            .iter()
            .enumerate()
            .skip(first)
            .take(visible_rows)
            .map(|(i, option)| {
                let marker = if i == self.selected { "▸" } else { " " };
                let applied = if *option == current { " ●" } else { "" };
                let style = if i == self.selected {
                    theme::table_selected()
                } else {
                    theme::table_row()
                };
                Line::from(Span::styled(format!(" {marker} {option}{applied}"), style))
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::CompanyFilter;

    const OPTIONS: &[&str] = &["all", "Bayer", "Pfizer", "Roche"];

    #[test]
    fn open_highlights_the_applied_filter() {
        let mut filter = CompanyFilter::new();
        filter.open(OPTIONS, "Pfizer");
        assert!(filter.visible());
        assert_eq!(filter.chosen(OPTIONS), Some("Pfizer"));
    }

    #[test]
    fn open_falls_back_to_the_first_option() {
        let mut filter = CompanyFilter::new();
        filter.open(OPTIONS, "Novartis");
        assert_eq!(filter.chosen(OPTIONS), Some("all"));
    }

    #[test]
    fn selection_is_clamped_at_both_ends() {
        let mut filter = CompanyFilter::new();
        filter.open(OPTIONS, "all");

        filter.select_prev();
        assert_eq!(filter.chosen(OPTIONS), Some("all"));

        for _ in 0..10 {
            filter.select_next(OPTIONS.len());
        }
        assert_eq!(filter.chosen(OPTIONS), Some("Roche"));
    }
}
