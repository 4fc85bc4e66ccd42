// src/app.rs

use crate::core::input::check_paste;
use crate::core::models::StatusMessage;
use ratatui::widgets::ScrollbarState;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub enum AppState {
    /// No download task is running.
    Idle,
    /// At least one download task is still alive.
    Processing,
}

/// Application context handed to every event handler and widget.
pub struct App {
    pub should_quit: bool,
    pub state: AppState,
    pub input: String,
    pub messages: Vec<StatusMessage>,
    pub scroll_offset: usize,
    pub messages_scroll_state: ScrollbarState,
    /// Set when the user tried to quit while tasks were running.
    pub show_exit_warning: bool,
    pub max_link_length: usize,
    tasks: Vec<JoinHandle<()>>,
}

impl App {
    pub fn new(max_link_length: usize) -> Self {
        Self {
            should_quit: false,
            state: AppState::Idle,
            input: String::new(),
            messages: Vec::new(),
            scroll_offset: 0,
            messages_scroll_state: ScrollbarState::default(),
            show_exit_warning: false,
            max_link_length,
            tasks: Vec::new(),
        }
    }

    // --- Status area ---

    pub fn push_message(&mut self, message: StatusMessage) {
        self.messages.push(message);
        // Follow the newest line.
        self.scroll_offset = self.messages.len().saturating_sub(1);
        self.sync_scrollbar();
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
        self.scroll_offset = 0;
        self.sync_scrollbar();
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
        self.sync_scrollbar();
    }

    pub fn scroll_down(&mut self) {
        let last = self.messages.len().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.saturating_add(1).min(last);
        self.sync_scrollbar();
    }

    fn sync_scrollbar(&mut self) {
        self.messages_scroll_state = self
            .messages_scroll_state
            .content_length(self.messages.len())
            .position(self.scroll_offset);
    }

    // --- Input field ---

    /// Inserts pasted text, refusing pastes longer than a link may be.
    pub fn handle_paste(&mut self, text: &str) {
        let text = text.trim_end_matches(['\r', '\n']);
        match check_paste(text, self.max_link_length) {
            Ok(()) => self.input.push_str(text),
            Err(e) => {
                warn!(length = text.chars().count(), "Refused oversized paste.");
                self.push_message(StatusMessage::error(format!("Error: {e}")));
            }
        }
    }

    // --- Background tasks ---

    pub fn track_task(&mut self, handle: JoinHandle<()>) {
        self.tasks.push(handle);
        self.state = AppState::Processing;
    }

    pub fn active_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }

    /// Forgets finished tasks and refreshes the state. Called once per frame.
    pub fn on_tick(&mut self) {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.is_finished());
        if self.tasks.len() != before {
            debug!(remaining = self.tasks.len(), "Download task(s) finished.");
        }
        self.state = if self.tasks.is_empty() { AppState::Idle } else { AppState::Processing };
    }

    // --- Exit ---

    /// Quits, unless a download is still running; then the warning is shown.
    pub fn request_quit(&mut self) {
        if self.active_tasks() > 0 {
            self.show_exit_warning = true;
        } else {
            self.quit();
        }
    }

    pub fn dismiss_exit_warning(&mut self) {
        self.show_exit_warning = false;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::MessageKind;

    #[test]
    fn test_paste_within_limit_is_inserted() {
        let mut app = App::new(300);
        app.input.push_str("https://");
        app.handle_paste("www.songsterr.com/a/wsa/tab-s1\n");
        assert_eq!(app.input, "https://www.songsterr.com/a/wsa/tab-s1");
        assert!(app.messages.is_empty());
    }

    #[test]
    fn test_oversized_paste_is_refused() {
        let mut app = App::new(300);
        app.handle_paste(&"x".repeat(301));
        assert!(app.input.is_empty());
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].kind, MessageKind::Error);
        assert_eq!(app.messages[0].text, "Error: Link is too long. Max length is 300 characters.");
    }

    #[test]
    fn test_quit_without_tasks() {
        let mut app = App::new(300);
        app.request_quit();
        assert!(app.should_quit);
        assert!(!app.show_exit_warning);
    }

    #[tokio::test]
    async fn test_quit_is_refused_while_a_task_runs() {
        let mut app = App::new(300);
        app.track_task(tokio::spawn(std::future::pending::<()>()));

        app.request_quit();
        assert!(!app.should_quit);
        assert!(app.show_exit_warning);
        assert!(matches!(app.state, AppState::Processing));

        app.dismiss_exit_warning();
        assert!(!app.show_exit_warning);
    }

    #[tokio::test]
    async fn test_finished_tasks_are_pruned() {
        let mut app = App::new(300);
        let handle = tokio::spawn(async {});
        while !handle.is_finished() {
            tokio::task::yield_now().await;
        }
        app.track_task(handle);

        app.on_tick();
        assert_eq!(app.active_tasks(), 0);
        assert!(matches!(app.state, AppState::Idle));

        app.request_quit();
        assert!(app.should_quit);
    }

    #[test]
    fn test_scrolling_is_clamped() {
        let mut app = App::new(300);
        app.push_message(StatusMessage::info("one"));
        app.push_message(StatusMessage::info("two"));
        assert_eq!(app.scroll_offset, 1);
        app.scroll_down();
        assert_eq!(app.scroll_offset, 1);
        app.scroll_up();
        app.scroll_up();
        assert_eq!(app.scroll_offset, 0);
        app.clear_messages();
        assert!(app.messages.is_empty());
    }
}
