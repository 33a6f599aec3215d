//! Page bar — current page, record count, and navigation hints.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use rxgrid_core::ViewState;

use crate::theme;

/// Render the page bar line under the table.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let line = Line::from(vec![
        Span::styled(
            format!("  {}", page_label(state)),
            Style::default().fg(theme::LIGHT_BLUE),
        ),
        Span::styled("   ←/→ ", theme::key_hint_key()),
        Span::styled("page", theme::key_hint()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// `Page 2/3 · 120 items`, singular-aware.
fn page_label(state: &ViewState) -> String {
    let count = state.drugs.len();
    let noun = if count == 1 { "item" } else { "items" };
    format!(
        "Page {}/{} · {count} {noun}",
        state.current_page,
        state.total_pages()
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rxgrid_core::ViewState;

    use super::page_label;

    #[test]
    fn label_shows_page_position_and_count() {
        let state = ViewState {
            drugs: vec![drug(); 120],
            current_page: 2,
            ..ViewState::default()
        };
        assert_eq!(page_label(&state), "Page 2/3 · 120 items");
    }

    #[test]
    fn empty_list_is_one_page_of_zero_items() {
        let state = ViewState::default();
        assert_eq!(page_label(&state), "Page 1/1 · 0 items");
    }

    #[test]
    fn single_record_uses_the_singular_noun() {
        let state = ViewState {
            drugs: vec![drug()],
            ..ViewState::default()
        };
        assert_eq!(page_label(&state), "Page 1/1 · 1 item");
    }

    fn drug() -> rxgrid_core::Drug {
        rxgrid_core::Drug {
            id: 1,
            code: "RX-0001".into(),
            generic_name: "aspirin".into(),
            brand_name: "Aspro".into(),
            company: "Bayer".into(),
            launch_date: "1899-03-06T00:00:00Z".into(),
        }
    }
}
