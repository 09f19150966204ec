use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// Render log widget according to state.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let focused = state.is_log_focused();
    let mut block = Block::default().title("Log").borders(Borders::ALL);
    block = if focused {
        block.border_style(styling::active_block_border_style(theme))
    } else {
        block.border_style(styling::normal_block_border_style(theme))
    };

    let entries = state.get_debug_entries();
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![Span::styled(
                entry.clone(),
                styling::normal_text_style(theme),
            )]))
        })
        .collect();

    let mut list = List::new(items)
        .style(styling::normal_text_style(theme))
        .block(block);

    // Follow the newest entry unless the log is being browsed
    let mut list_state = ListState::default();
    if focused {
        list = list.highlight_style(styling::active_list_item_style(theme));
        list_state.select(Some(state.get_debug_index()));
    } else if !entries.is_empty() {
        list_state.select(Some(entries.len() - 1));
    }
    frame.render_stateful_widget(list, size, &mut list_state);
}
