use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::constants::SPINNER_FRAME_MS;

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Animated busy indicator shown while a send is in flight.
#[derive(Debug)]
pub struct StatusIndicator {
    busy: bool,
    frame: usize,
    last_frame: Instant,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self {
            busy: false,
            frame: 0,
            last_frame: Instant::now(),
        }
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn tick(&mut self) {
        if self.busy && self.last_frame.elapsed() >= Duration::from_millis(SPINNER_FRAME_MS) {
            self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
            self.last_frame = Instant::now();
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.busy {
            return;
        }
        let status = Line::from(vec![
            Span::styled(
                SPINNER_FRAMES[self.frame],
                Style::default().fg(Color::Rgb(5, 172, 24)),
            ),
            Span::raw(" "),
            Span::styled("Waiting for reply...", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(status), area);
    }
}

impl Default for StatusIndicator {
    fn default() -> Self {
        StatusIndicator::new()
    }
}
