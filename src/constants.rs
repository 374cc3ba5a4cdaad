// UI constants
pub const CHAT_TITLE: &str = "Teaching Assistant";
pub const TYPEWRITER_TICK_MS: u64 = 15;
pub const SPINNER_FRAME_MS: u64 = 80;

// API constants
pub const ASSISTANT_API_URL: &str = "https://fortdocente.tecmilab.com.mx/pydantic-agent";
pub const FALLBACK_ERROR_REPLY: &str = "There was an error processing your message.";

// Shown only while the conversation is empty
pub const SUGGESTED_PROMPTS: &[&str] = &[
    "Walk me through explaining binary logistic regression in Python",
    "Suggest a way to evaluate students on decision trees",
];
