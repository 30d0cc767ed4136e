//! Terminal UI rendering using ratatui.
//!
//! Each panel is implemented in its own submodule with a `render` function;
//! [`render`] lays them out into the dashboard.
//!
//! ## Submodules
//!
//! - [`tiles`]: Total messages and per-sentiment percentage tiles
//! - [`distribution`]: Sentiment distribution bars and share strip
//! - [`timeline`]: Stacked sentiment-over-time chart
//! - [`messages`]: Recent messages feed
//! - [`detail`]: Modal overlay showing a single message in full
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Header (common::render_header)               │
//! ├──────────┬──────────┬──────────┬─────────────┤
//! │ Total    │ Positive │ Negative │ Neutral     │
//! ├──────────┴──────────┼──────────┴─────────────┤
//! │ Distribution        │                        │
//! ├─────────────────────┤ Recent Messages        │
//! │ Sentiment Over Time │                        │
//! ├─────────────────────┴────────────────────────┤
//! │ Status Bar (common::render_status_bar)       │
//! └──────────────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - common::render_help
//! ```

use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::app::App;

pub mod common;
pub mod detail;
pub mod distribution;
pub mod messages;
pub mod theme;
pub mod tiles;
pub mod timeline;

pub use theme::Theme;

/// Height of the summary tile row.
const TILE_HEIGHT: u16 = 4;

/// Render the whole dashboard into `area`, overlays included.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([
        Constraint::Length(1),           // Header bar
        Constraint::Length(TILE_HEIGHT), // Summary tiles
        Constraint::Min(8),              // Charts and messages
        Constraint::Length(1),           // Status bar
    ])
    .split(area);

    common::render_header(frame, app, rows[0]);
    tiles::render(frame, app, rows[1]);

    let columns =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).split(rows[2]);
    let charts =
        Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)]).split(columns[0]);

    distribution::render(frame, app, charts[0]);
    timeline::render(frame, app, charts[1]);
    messages::render(frame, app, columns[1]);

    common::render_status_bar(frame, app, rows[3]);

    if app.show_detail_overlay {
        detail::render_overlay(frame, app, area);
    }
    if app.show_help {
        common::render_help(frame, app, area);
    }
}
