//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use tracing::info;

use crate::data::{Dashboard, Message};
use crate::source::PollerHandle;
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data
    poller: Option<PollerHandle>,
    source_description: String,
    pub dashboard: Dashboard,

    // Message feed navigation
    pub selected_message_index: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App fed by a running poller.
    pub fn new(poller: PollerHandle, theme: Theme) -> Self {
        let source_description = poller.description().to_string();
        let mut app = Self::detached(&source_description, theme);
        app.poller = Some(poller);
        app
    }

    /// Create an App with no poller attached (for rendering fixed state).
    pub fn detached(source_description: &str, theme: Theme) -> Self {
        Self {
            running: true,
            show_help: false,
            show_detail_overlay: false,
            poller: None,
            source_description: source_description.to_string(),
            dashboard: Dashboard::new(),
            selected_message_index: 0,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        &self.source_description
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Apply every update the poller has delivered since the last call.
    ///
    /// Returns the number of updates applied.
    pub fn reload_data(&mut self) -> usize {
        let Some(poller) = self.poller.as_mut() else {
            return 0;
        };

        let mut applied = 0;
        while let Some(update) = poller.try_next() {
            self.dashboard.apply(update);
            applied += 1;
        }

        if applied > 0 {
            self.clamp_selection();
        }
        applied
    }

    /// Ask the poller for an immediate extra cycle.
    pub fn refresh_now(&mut self) {
        if let Some(poller) = self.poller.as_ref() {
            poller.refresh_now();
            self.set_status_message("Refreshing...".to_string());
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.dashboard.messages.len();
        if self.selected_message_index >= len {
            self.selected_message_index = len.saturating_sub(1);
        }
        if len == 0 {
            self.show_detail_overlay = false;
        }
    }

    /// The message currently highlighted in the feed.
    pub fn selected_message(&self) -> Option<&Message> {
        self.dashboard.messages.get(self.selected_message_index)
    }

    /// Move selection down by one message.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one message.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n messages.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.dashboard.messages.len().saturating_sub(1);
        self.selected_message_index = (self.selected_message_index + n).min(max);
    }

    /// Move selection up by n messages.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_message_index = self.selected_message_index.saturating_sub(n);
    }

    /// Jump to the first message.
    pub fn select_first(&mut self) {
        self.selected_message_index = 0;
    }

    /// Jump to the last message.
    pub fn select_last(&mut self) {
        self.selected_message_index = self.dashboard.messages.len().saturating_sub(1);
    }

    /// Open the detail overlay for the selected message.
    pub fn enter_detail(&mut self) {
        if self.selected_message().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Navigate back: close the help overlay first, then the detail overlay.
    pub fn go_back(&mut self) {
        if self.show_help {
            self.show_help = false;
        } else {
            self.show_detail_overlay = false;
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Thread URL of the selected message, if it is a web link.
    pub fn selected_thread_url(&self) -> Option<&str> {
        let url = self.selected_message()?.thread_url.as_str();
        if url.starts_with("http://") || url.starts_with("https://") {
            Some(url)
        } else {
            None
        }
    }

    /// Open the selected message's thread in the system browser.
    ///
    /// The browser is started as a detached process.
    pub fn open_selected_thread(&mut self) -> Result<()> {
        let Some(url) = self.selected_thread_url().map(str::to_string) else {
            bail!("No link for the selected message");
        };
        open::that_detached(&url)?;
        info!(url = %url, "opened thread in browser");
        self.set_status_message(format!("Opened {}", url));
        Ok(())
    }

    /// Signal the application to quit and stop polling.
    pub fn quit(&mut self) {
        self.running = false;
        if let Some(poller) = self.poller.as_mut() {
            poller.shutdown();
        }
    }

    /// Export the current dashboard to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        if self.dashboard.is_empty() {
            bail!("No data to export");
        }
        write_export(&self.dashboard, path)
    }
}

/// Write a dashboard as pretty-printed JSON.
pub fn write_export(dashboard: &Dashboard, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(dashboard)?;
    std::fs::write(path, json)?;
    Ok(())
}
