use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::widgets::styling;
use crate::ui::Theme;

pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Return a centered spinner for the given frame index and area height.
///
pub fn widget<'a>(theme: &Theme, index: usize, height: u16) -> Paragraph<'a> {
    let mut lines: Vec<Line> = (0..height.saturating_sub(2) / 2)
        .map(|_| Line::from(""))
        .collect();
    lines.push(Line::from(Span::styled(
        FRAMES[index % FRAMES.len()],
        styling::active_list_item_style(theme),
    )));
    Paragraph::new(lines).alignment(Alignment::Center)
}
