use std::sync::Arc;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use textwrap::wrap;
use tokio::sync::Mutex;
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::constants::{CHAT_TITLE, FALLBACK_ERROR_REPLY, SUGGESTED_PROMPTS};
use crate::markdown::render_markdown;
use crate::message::Sender;

const ACCENT: Color = Color::Rgb(5, 172, 24);

/// The send pipeline. One user message in, one bot (or fallback) message
/// out, with the busy flag serializing sends: a second call while a
/// request is in flight is a no-op, as is a call with only whitespace.
/// The busy flag is cleared on every path out.
pub async fn submit_message(app: Arc<Mutex<App>>, text: String) {
    let (client, session) = {
        let mut guard = app.lock().await;
        if text.trim().is_empty() || guard.busy {
            return;
        }
        guard.push_user_message(text.clone());
        guard.input.clear();
        guard.busy = true;
        guard.status_indicator.set_busy(true);
        (guard.client.clone(), guard.session_id.clone())
    };

    let result = client.send(&text, &session).await;

    let mut guard = app.lock().await;
    if guard.should_quit {
        // widget torn down while the request was in flight; drop the reply
        guard.busy = false;
        guard.status_indicator.set_busy(false);
        return;
    }
    match result {
        Ok(reply) => guard.push_bot_message(reply),
        Err(e) => {
            log::warn!("send failed: {}", e);
            guard.push_bot_message(FALLBACK_ERROR_REPLY.to_string());
        }
    }
    guard.busy = false;
    guard.status_indicator.set_busy(false);
}

pub fn draw_chat(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.area());

    let title = Paragraph::new(Line::from(Span::styled(
        CHAT_TITLE,
        Style::default()
            .fg(Color::White)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .style(Style::default().bg(ACCENT));
    f.render_widget(title, chunks[0]);

    if app.showing_prompts() {
        draw_prompts(f, app, chunks[1]);
    } else {
        draw_messages(f, app, chunks[1]);
    }

    app.status_indicator.render(f, chunks[2]);
    draw_input(f, app, chunks[3]);
}

fn draw_messages(f: &mut Frame, app: &App, area: Rect) {
    let lines = message_lines(app, area.width);

    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(area.height);
    // bottom-anchored: scroll counts lines up from the latest message
    let offset = max_scroll.saturating_sub(app.scroll.min(max_scroll));

    let paragraph = Paragraph::new(lines)
        .block(Block::default())
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph.scroll((offset, 0)), area);
}

/// Builds the bubble lines for the whole conversation. The trailing bot
/// message is rendered from the typewriter's visible prefix; everything
/// before it shows its full text.
fn message_lines(app: &App, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let last_idx = app.messages.len().saturating_sub(1);

    for (idx, message) in app.messages.iter().enumerate() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        let stamp = message.timestamp.format("%H:%M").to_string();
        match message.sender {
            Sender::User => {
                lines.push(
                    Line::from(Span::styled(stamp, Style::default().fg(Color::DarkGray)))
                        .right_aligned(),
                );
                let wrap_width = ((width as usize) * 7 / 10).max(16);
                for wrapped in wrap(&message.content, wrap_width) {
                    lines.push(
                        Line::from(Span::styled(
                            wrapped.into_owned(),
                            Style::default().fg(ACCENT),
                        ))
                        .right_aligned(),
                    );
                }
            }
            Sender::Bot => {
                lines.push(Line::from(Span::styled(
                    stamp,
                    Style::default().fg(Color::DarkGray),
                )));
                let text = if idx == last_idx {
                    app.typewriter.visible()
                } else {
                    message.content.as_str()
                };
                lines.extend(render_markdown(text));
            }
        }
    }
    lines
}

fn draw_prompts(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for (idx, prompt) in SUGGESTED_PROMPTS.iter().enumerate() {
        let style = if idx == app.prompt_cursor {
            Style::default().fg(Color::White).bg(ACCENT)
        } else {
            Style::default().fg(ACCENT)
        };
        lines.push(Line::from(Span::styled(format!(" {} ", prompt), style)));
        lines.push(Line::from(""));
    }

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Suggested prompts")
                .border_style(Style::default().fg(ACCENT)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.busy {
        (
            Line::from(Span::styled(
                "Waiting for reply...",
                Style::default().fg(Color::DarkGray),
            )),
            Style::default().fg(Color::DarkGray),
        )
    } else if app.input.is_empty() {
        (
            Line::from(Span::styled(
                "Write a message...",
                Style::default().fg(Color::DarkGray),
            )),
            Style::default(),
        )
    } else {
        (
            Line::from(Span::styled(
                app.input.clone(),
                Style::default().fg(Color::White),
            )),
            Style::default(),
        )
    };

    let input = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style),
    );
    f.render_widget(input, area);

    if !app.busy {
        let cursor_x = area.x + 1 + app.input.width() as u16;
        f.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(2)), area.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AssistantClient;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn app_against(server: &MockServer) -> Arc<Mutex<App>> {
        let client = AssistantClient::with_endpoint(format!("{}/chat", server.uri()));
        Arc::new(Mutex::new(App::with_client(client)))
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[tokio::test]
    async fn user_message_precedes_the_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "Hello"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let app = app_against(&server).await;
        submit_message(app.clone(), "X".to_string()).await;

        let guard = app.lock().await;
        assert_eq!(guard.messages.len(), 2);
        assert_eq!(guard.messages[0].sender, Sender::User);
        assert_eq!(guard.messages[0].content, "X");
        assert_eq!(guard.messages[1].sender, Sender::Bot);
        assert_eq!(guard.messages[1].content, "Hello");
        assert!(!guard.busy);
        assert!(guard.typewriter.is_running());
    }

    #[tokio::test]
    async fn whitespace_only_send_is_a_no_op() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "x" })))
            .expect(0)
            .mount(&server)
            .await;

        let app = app_against(&server).await;
        submit_message(app.clone(), "   \t ".to_string()).await;

        let guard = app.lock().await;
        assert!(guard.messages.is_empty());
        assert!(!guard.busy);
    }

    #[tokio::test]
    async fn send_while_busy_is_a_no_op() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "x" })))
            .expect(0)
            .mount(&server)
            .await;

        let app = app_against(&server).await;
        app.lock().await.busy = true;
        submit_message(app.clone(), "X".to_string()).await;

        let guard = app.lock().await;
        assert!(guard.messages.is_empty());
        assert!(guard.busy);
    }

    #[tokio::test]
    async fn server_error_appends_the_fallback_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let app = app_against(&server).await;
        submit_message(app.clone(), "X".to_string()).await;

        let guard = app.lock().await;
        assert_eq!(guard.messages.len(), 2);
        assert_eq!(guard.messages[1].content, FALLBACK_ERROR_REPLY);
        assert!(!guard.busy);
    }

    #[tokio::test]
    async fn malformed_body_appends_the_fallback_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "?" })))
            .mount(&server)
            .await;

        let app = app_against(&server).await;
        submit_message(app.clone(), "X".to_string()).await;

        let guard = app.lock().await;
        assert_eq!(guard.messages[1].content, FALLBACK_ERROR_REPLY);
        assert!(!guard.busy);
    }

    #[tokio::test]
    async fn reply_arriving_after_teardown_is_dropped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "response": "late" }))
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&server)
            .await;

        let app = app_against(&server).await;
        let task = tokio::spawn(submit_message(app.clone(), "X".to_string()));
        tokio::time::sleep(Duration::from_millis(50)).await;
        app.lock().await.should_quit = true;
        task.await.unwrap();

        let guard = app.lock().await;
        assert_eq!(guard.messages.len(), 1);
        assert_eq!(guard.messages[0].sender, Sender::User);
        assert!(!guard.busy);
    }

    #[tokio::test]
    async fn suggested_prompt_flows_through_the_pipeline() {
        let server = MockServer::start().await;
        let prompt = SUGGESTED_PROMPTS[0];
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_partial_json(json!({ "message": prompt })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "A1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let app = app_against(&server).await;
        let text = app.lock().await.selected_prompt().to_string();
        submit_message(app.clone(), text).await;

        let mut guard = app.lock().await;
        assert_eq!(guard.messages[0].content, prompt);
        assert_eq!(guard.messages[1].content, "A1");

        // run the reveal to completion; the rendered tail equals the reply
        while guard.typewriter.advance() {}
        assert_eq!(guard.typewriter.visible(), "A1");
        let lines = message_lines(&guard, 80);
        let tail = lines.iter().rev().find(|l| l.width() > 0).unwrap();
        assert_eq!(line_text(tail), "A1");
    }

    #[tokio::test]
    async fn partial_reveal_renders_a_prefix_of_the_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "Hello"
            })))
            .mount(&server)
            .await;

        let app = app_against(&server).await;
        submit_message(app.clone(), "X".to_string()).await;

        let mut guard = app.lock().await;
        guard.typewriter.advance();
        guard.typewriter.advance();
        let lines = message_lines(&guard, 80);
        let tail = lines.iter().rev().find(|l| l.width() > 0).unwrap();
        assert_eq!(line_text(tail), "He");
    }
}
