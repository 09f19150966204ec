use super::Frame;
use crate::select_list::Mode;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the gate name and the edit mode.
///
pub fn header(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme))
        .title(Span::styled("Quality Gate", styling::active_block_title_style()));

    let mut spans = vec![];
    match state.get_pane() {
        Some(pane) => {
            spans.push(Span::styled(
                pane.gate().name.clone(),
                styling::active_list_item_style(theme),
            ));
            if pane.gate().default {
                spans.push(Span::styled(" (default)", styling::muted_text_style(theme)));
            }
            if let Some(list) = pane.list() {
                let (label, color) = match list.mode() {
                    Mode::Editable => (" editable", theme.success),
                    Mode::ReadOnly => (" read-only", theme.warning),
                };
                spans.push(Span::styled(
                    label,
                    styling::normal_text_style(theme).fg(color.to_color()),
                ));
            }
        }
        None => spans.push(Span::styled("Loading…", styling::muted_text_style(theme))),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), size);
}
