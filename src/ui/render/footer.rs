use super::Frame;
use crate::config::hotkeys::{build_footer_text, HotkeyAction};
use crate::select_list::{Column, Mode};
use crate::state::{Focus, State};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Select/deselect hint for the focused column, if toggling is possible.
///
fn tooltip(state: &State) -> Option<String> {
    let list = state.get_select_list()?;
    if list.mode() == Mode::ReadOnly {
        return None;
    }
    let tooltips = list.tooltips();
    let text = match state.current_focus() {
        Focus::Column(Column::Available) => &tooltips.select,
        Focus::Column(Column::Selected) => &tooltips.deselect,
        _ => return None,
    };
    Some(text.clone())
}

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let hotkeys = state.get_hotkeys();
    let theme = state.get_theme();
    let (mode_label, mode_color, controls_text) = match state.current_focus() {
        Focus::Search => (
            "SEARCH:",
            theme.footer_search,
            format!(
                " Type to search,{}",
                build_footer_text(
                    &hotkeys.search_mode,
                    &[(HotkeyAction::SearchModeExit, "exit search", None)],
                )
            ),
        ),
        Focus::Log => (
            "LOG:",
            theme.footer_log,
            build_footer_text(
                &hotkeys.log,
                &[
                    (
                        HotkeyAction::LogNavigateNext,
                        "navigate logs",
                        Some(HotkeyAction::LogNavigatePrev),
                    ),
                    (HotkeyAction::LogCopyEntry, "copy entry", None),
                    (HotkeyAction::LogExit, "exit log", None),
                ],
            ),
        ),
        Focus::Column(_) => (
            "NORMAL:",
            theme.footer_normal,
            build_footer_text(
                &hotkeys.pane,
                &[
                    (
                        HotkeyAction::NavigateNext,
                        "navigate",
                        Some(HotkeyAction::NavigatePrev),
                    ),
                    (HotkeyAction::SwitchColumn, "switch column", None),
                    (HotkeyAction::Toggle, "toggle", None),
                    (HotkeyAction::EnterSearch, "search", None),
                    (HotkeyAction::CycleFilter, "filter", None),
                    (HotkeyAction::LoadMore, "more", None),
                    (HotkeyAction::DismissNotice, "dismiss", None),
                    (HotkeyAction::ToggleReadOnly, "lock", None),
                    (HotkeyAction::CycleTheme, "theme", None),
                    (HotkeyAction::FocusLog, "log", None),
                    (HotkeyAction::Quit, "quit", None),
                ],
            ),
        ),
    };

    let controls_content = Line::from(vec![
        Span::styled(
            mode_label,
            Style::default()
                .fg(theme.text.to_color())
                .bg(mode_color.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(controls_text, Style::default().fg(theme.warning.to_color())),
    ]);
    let controls_widget = Paragraph::new(controls_content).alignment(Alignment::Left);

    // Tooltip for the focused column, otherwise the version
    let right_content = match tooltip(state) {
        Some(text) => Line::from(vec![Span::styled(
            format!("{} ", text),
            Style::default().fg(theme.text_muted.to_color()),
        )]),
        None => Line::from(vec![Span::styled(
            format!(" {}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.primary.to_color()),
        )]),
    };

    let right_content_width = right_content.width();
    let right_widget = Paragraph::new(right_content).alignment(Alignment::Right);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(right_content_width.try_into().unwrap_or(0)),
        ])
        .split(size);

    frame.render_widget(controls_widget, columns[0]);
    frame.render_widget(right_widget, columns[1]);
}
