use super::widgets::{spinner, styling};
use super::{footer, header, log, Frame, Pane};
use crate::state::State;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const LOG_HEIGHT: u16 = 8;

/// Render the whole screen: header, mounted pane, log panel and footer.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    state.set_terminal_size(size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(LOG_HEIGHT),
            Constraint::Length(1),
        ])
        .split(size);

    header(frame, rows[0], state);

    if let Some(message) = state.get_pane_error().map(str::to_owned) {
        let theme = state.get_theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styling::normal_block_border_style(theme))
            .title("Error");
        let paragraph = Paragraph::new(Line::from(Span::styled(
            message,
            styling::normal_text_style(theme).fg(theme.error.to_color()),
        )))
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(paragraph, rows[1]);
    } else {
        let (pane, mut ctx) = state.pane_context();
        match pane {
            Some(pane) => pane.render(frame, rows[1], &mut ctx),
            None => {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(styling::normal_block_border_style(ctx.theme))
                    .title("Projects");
                frame.render_widget(
                    spinner::widget(ctx.theme, ctx.spinner_index, rows[1].height).block(block),
                    rows[1],
                );
            }
        }
    }

    log(frame, rows[2], state);
    footer(frame, rows[3], state);
}
