use crate::api::AssistantClient;
use crate::constants::SUGGESTED_PROMPTS;
use crate::message::Message;
use crate::session::SessionId;
use crate::status_indicator::StatusIndicator;
use crate::typewriter::Typewriter;

/// State owned by one chat widget instance. All mutation goes through the
/// methods below and the send pipeline in `chat_view`; nothing is shared
/// globally.
pub struct App {
    pub messages: Vec<Message>,
    pub input: String,
    pub busy: bool,
    pub session_id: SessionId,
    pub typewriter: Typewriter,
    pub client: AssistantClient,
    pub status_indicator: StatusIndicator,
    // lines scrolled up from the bottom of the message area
    pub scroll: u16,
    pub prompt_cursor: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> App {
        App::with_client(AssistantClient::new())
    }

    pub fn with_client(client: AssistantClient) -> App {
        App {
            messages: Vec::new(),
            input: String::new(),
            busy: false,
            session_id: SessionId::generate(),
            typewriter: Typewriter::new(),
            client,
            status_indicator: StatusIndicator::new(),
            scroll: 0,
            prompt_cursor: 0,
            should_quit: false,
        }
    }

    pub fn push_user_message(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
        self.scroll = 0;
    }

    /// Appends a bot message and restarts the reveal. Any reveal still
    /// running for the previous message is replaced.
    pub fn push_bot_message(&mut self, content: String) {
        self.typewriter.start(content.clone());
        self.messages.push(Message::bot(content));
        self.scroll = 0;
    }

    /// The suggested-prompts panel is shown only while the conversation
    /// is empty.
    pub fn showing_prompts(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn selected_prompt(&self) -> &'static str {
        SUGGESTED_PROMPTS[self.prompt_cursor]
    }

    pub fn next_prompt(&mut self) {
        self.prompt_cursor = (self.prompt_cursor + 1) % SUGGESTED_PROMPTS.len();
    }

    pub fn prev_prompt(&mut self) {
        self.prompt_cursor = self
            .prompt_cursor
            .checked_sub(1)
            .unwrap_or(SUGGESTED_PROMPTS.len() - 1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

impl Default for App {
    fn default() -> Self {
        App::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Sender;

    #[test]
    fn new_app_starts_with_prompts_visible() {
        let app = App::new();
        assert!(app.showing_prompts());
        assert!(!app.busy);
        assert!(app.messages.is_empty());
    }

    #[test]
    fn prompts_hide_once_conversation_starts() {
        let mut app = App::new();
        app.push_user_message("hello");
        assert!(!app.showing_prompts());
    }

    #[test]
    fn push_bot_message_restarts_the_reveal() {
        let mut app = App::new();
        app.push_bot_message("first".to_string());
        while app.typewriter.advance() {}
        app.push_bot_message("second".to_string());
        assert_eq!(app.typewriter.visible(), "");
        assert!(app.typewriter.is_running());
        assert_eq!(app.messages.last().unwrap().sender, Sender::Bot);
    }

    #[test]
    fn prompt_cursor_wraps_both_ways() {
        let mut app = App::new();
        app.prev_prompt();
        assert_eq!(app.prompt_cursor, SUGGESTED_PROMPTS.len() - 1);
        app.next_prompt();
        assert_eq!(app.prompt_cursor, 0);
    }

    #[test]
    fn each_widget_gets_its_own_session() {
        assert_ne!(App::new().session_id, App::new().session_id);
    }
}
