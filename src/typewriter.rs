use std::time::{Duration, Instant};

use crate::constants::TYPEWRITER_TICK_MS;

/// Character-reveal state machine for the most recent bot message.
///
/// Holds at most one active reveal. Starting a new reveal replaces any
/// reveal still in progress, so characters from an earlier message can
/// never leak into a later one. The visible buffer starts empty and the
/// first tick reveals character 0; once the whole text is visible further
/// ticks do nothing.
#[derive(Debug)]
pub struct Typewriter {
    active: Option<Reveal>,
    period: Duration,
}

#[derive(Debug)]
struct Reveal {
    text: String,
    // byte offset into `text`, always on a char boundary
    shown: usize,
    last_tick: Instant,
}

impl Typewriter {
    pub fn new() -> Self {
        Typewriter {
            active: None,
            period: Duration::from_millis(TYPEWRITER_TICK_MS),
        }
    }

    /// Begins revealing `text`, cancelling any reveal in progress.
    pub fn start(&mut self, text: impl Into<String>) {
        self.active = Some(Reveal {
            text: text.into(),
            shown: 0,
            last_tick: Instant::now(),
        });
    }

    /// Drops the active reveal. Called on widget teardown.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Reveals one more character. Returns false once the full text is
    /// visible (or nothing is being revealed).
    pub fn advance(&mut self) -> bool {
        let Some(reveal) = &mut self.active else {
            return false;
        };
        match reveal.text[reveal.shown..].chars().next() {
            Some(c) => {
                reveal.shown += c.len_utf8();
                true
            }
            None => false,
        }
    }

    /// Advances by however many ticks of the fixed period have elapsed
    /// since the last poll. Drives the reveal from the UI event loop.
    pub fn poll(&mut self) {
        let Some(reveal) = &mut self.active else {
            return;
        };
        while reveal.shown < reveal.text.len() && reveal.last_tick.elapsed() >= self.period {
            reveal.last_tick += self.period;
            if let Some(c) = reveal.text[reveal.shown..].chars().next() {
                reveal.shown += c.len_utf8();
            }
        }
    }

    /// The revealed prefix of the active text.
    pub fn visible(&self) -> &str {
        match &self.active {
            Some(reveal) => &reveal.text[..reveal.shown],
            None => "",
        }
    }

    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .map_or(false, |reveal| reveal.shown < reveal.text.len())
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Typewriter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_one_character_per_tick() {
        let mut tw = Typewriter::new();
        tw.start("Hello");
        assert_eq!(tw.visible(), "");
        for k in 1..=5 {
            assert!(tw.advance());
            assert_eq!(tw.visible(), &"Hello"[..k]);
        }
    }

    #[test]
    fn stops_after_full_text() {
        let mut tw = Typewriter::new();
        tw.start("ab");
        assert!(tw.advance());
        assert!(tw.advance());
        assert!(!tw.advance());
        assert_eq!(tw.visible(), "ab");
        assert!(!tw.is_running());
    }

    #[test]
    fn new_reveal_replaces_a_running_one() {
        let mut tw = Typewriter::new();
        tw.start("aaaa");
        tw.advance();
        tw.advance();
        tw.start("bbb");
        assert_eq!(tw.visible(), "");
        tw.advance();
        assert_eq!(tw.visible(), "b");
        while tw.advance() {}
        assert_eq!(tw.visible(), "bbb");
    }

    #[test]
    fn empty_text_finishes_with_zero_ticks() {
        let mut tw = Typewriter::new();
        tw.start("");
        assert!(!tw.is_running());
        assert!(!tw.advance());
        assert_eq!(tw.visible(), "");
    }

    #[test]
    fn advances_whole_characters_only() {
        let mut tw = Typewriter::new();
        tw.start("héllo 日本");
        tw.advance();
        tw.advance();
        assert_eq!(tw.visible(), "hé");
        while tw.advance() {}
        assert_eq!(tw.visible(), "héllo 日本");
    }

    #[test]
    fn cancel_clears_the_buffer() {
        let mut tw = Typewriter::new();
        tw.start("text");
        tw.advance();
        tw.cancel();
        assert_eq!(tw.visible(), "");
        assert!(!tw.is_running());
    }
}
