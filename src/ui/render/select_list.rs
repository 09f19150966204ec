use super::widgets::{spinner, styling};
use super::{Frame, Pane, PaneContext};
use crate::select_list::{Column, Filter, Mode, SelectList};
use crate::state::Focus;
use crate::utils::text_processing::{highlight_matches, query_matcher};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
};

const PENDING_MARKER: &str = "… ";
const IDLE_MARKER: &str = "  ";

impl Pane for SelectList {
    fn render(&self, frame: &mut Frame, area: Rect, ctx: &mut PaneContext) {
        let notice_height = if self.notice().is_some() { 1 } else { 0 };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(notice_height),
                Constraint::Min(3),
            ])
            .split(area);

        filter_tabs(frame, rows[0], self, ctx);
        search_box(frame, rows[1], ctx);
        if let Some(notice) = self.notice() {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                format!(" {} ", notice),
                styling::notice_style(ctx.theme),
            )));
            frame.render_widget(paragraph, rows[2]);
        }

        let visible = self.visible_columns();
        let constraints: Vec<Constraint> = visible
            .iter()
            .map(|_| Constraint::Ratio(1, visible.len() as u32))
            .collect();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(rows[3]);
        for (column, rect) in visible.iter().zip(columns.iter()) {
            column_list(frame, *rect, self, *column, ctx);
        }
    }
}

/// Render the With/Without/All tab bar.
///
fn filter_tabs(frame: &mut Frame, size: Rect, list: &SelectList, ctx: &PaneContext) {
    let labels = list.labels();
    let titles = vec![
        Filter::Selected.label(labels).to_owned(),
        Filter::Deselected.label(labels).to_owned(),
        Filter::All.label(labels).to_owned(),
    ];
    let index = match list.filter() {
        Filter::Selected => 0,
        Filter::Deselected => 1,
        Filter::All => 2,
    };
    let tabs = Tabs::new(titles)
        .select(index)
        .style(styling::muted_text_style(ctx.theme))
        .highlight_style(styling::active_tab_style(ctx.theme));
    frame.render_widget(tabs, size);
}

/// Render the single line search box.
///
fn search_box(frame: &mut Frame, size: Rect, ctx: &mut PaneContext) {
    let theme = ctx.theme;
    let active = ctx.focus == Focus::Search;
    let mut block = Block::default().borders(Borders::ALL).title("Search");
    block = if active {
        block.border_style(styling::active_block_border_style(theme))
    } else {
        block.border_style(styling::normal_block_border_style(theme))
    };
    ctx.search_input.set_block(block);
    ctx.search_input.set_cursor_line_style(Style::default());
    ctx.search_input.set_style(styling::normal_text_style(theme));
    ctx.search_input.set_cursor_style(if active {
        styling::active_tab_style(theme)
    } else {
        Style::default()
    });
    frame.render_widget(ctx.search_input.widget(), size);
}

/// Render one column of items.
///
fn column_list(
    frame: &mut Frame,
    size: Rect,
    list: &SelectList,
    column: Column,
    ctx: &mut PaneContext,
) {
    let theme = ctx.theme;
    let labels = list.labels();
    let items = list.view().column(column);
    let label = match column {
        Column::Selected => &labels.selected,
        Column::Available => &labels.deselected,
    };
    let mut title = format!("{} ({})", label, items.len());
    if column == Column::Available && list.has_more() {
        title.push_str(" +more");
    }
    if list.mode() == Mode::ReadOnly {
        title.push_str(" [read-only]");
    }

    let active = ctx.focus == Focus::Column(column);
    let mut block = Block::default().borders(Borders::ALL);
    let highlight_style;
    if active {
        highlight_style = styling::active_list_item_style(theme);
        block = block
            .border_style(styling::active_block_border_style(theme))
            .title(Span::styled(title, styling::active_block_title_style()));
    } else {
        highlight_style = styling::current_list_item_style(theme);
        block = block
            .border_style(styling::normal_block_border_style(theme))
            .title(title);
    }

    if !list.is_loaded() && list.is_searching() {
        frame.render_widget(
            spinner::widget(theme, ctx.spinner_index, size.height).block(block),
            size,
        );
        return;
    }

    let rows: Vec<ListItem> = if items.is_empty() {
        vec![ListItem::new(Span::styled(
            labels.no_results.clone(),
            styling::muted_text_style(theme),
        ))]
    } else {
        let matcher = query_matcher(&list.view().query);
        items
            .iter()
            .map(|item| {
                let text = list.format(item);
                let marker = if list.is_pending(&item.id) {
                    PENDING_MARKER
                } else {
                    IDLE_MARKER
                };
                let mut spans = vec![Span::styled(marker, styling::muted_text_style(theme))];
                spans.extend(highlight_matches(&text, matcher.as_ref()).into_iter().map(
                    |(segment, matched)| {
                        let style = if matched {
                            styling::match_style(theme)
                        } else {
                            styling::normal_text_style(theme)
                        };
                        Span::styled(segment.to_owned(), style)
                    },
                ));
                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    let widget = List::new(rows)
        .style(styling::normal_text_style(theme))
        .highlight_style(highlight_style)
        .block(block);
    let list_state = match column {
        Column::Selected => &mut *ctx.selected_list_state,
        Column::Available => &mut *ctx.available_list_state,
    };
    frame.render_stateful_widget(widget, size, list_state);
}
