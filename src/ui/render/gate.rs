use super::{Frame, Pane, PaneContext};
use crate::state::GateProjects;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

const DEFAULT_GATE_TEXT: &str = "This is the default quality gate. Every project not \
associated with another quality gate uses it, so projects cannot be selected here.";

impl Pane for GateProjects {
    fn render(&self, frame: &mut Frame, area: Rect, ctx: &mut PaneContext) {
        if let Some(list) = self.list() {
            list.render(frame, area, ctx);
            return;
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styling::normal_block_border_style(ctx.theme))
            .title("Projects");
        let paragraph = Paragraph::new(Line::from(DEFAULT_GATE_TEXT))
            .style(styling::muted_text_style(ctx.theme))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
    }
}
