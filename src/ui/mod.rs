//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library, including:
//! - Terminal rendering and layout
//! - Theme management
//! - Widget components (spinner, styling)
//! - The `Pane` render hook implemented by the gate projects pane and the
//!   select list it hosts

use crate::state::Focus;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tui_textarea::TextArea;

type Frame<'a> = ratatui::Frame<'a>;

mod render;
mod theme;
mod widgets;

pub const SPINNER_FRAME_COUNT: usize = widgets::spinner::FRAMES.len();

pub use render::render;
pub use theme::Theme;

/// Host-owned rendering state handed to a pane on every render call.
///
pub struct PaneContext<'a> {
    pub theme: &'a Theme,
    pub focus: Focus,
    pub spinner_index: usize,
    pub search_input: &'a mut TextArea<'static>,
    pub selected_list_state: &'a mut ListState,
    pub available_list_state: &'a mut ListState,
}

/// Render hook for anything mounted into the body of the screen. The area is
/// supplied by the host on every call.
///
pub trait Pane {
    fn render(&self, frame: &mut Frame, area: Rect, ctx: &mut PaneContext);
}
