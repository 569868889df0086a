// src/notify/telegram.rs
use super::{Notifier, NotifyError};
use crate::config::MonitorConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use url::Url;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// `sendMessage` rejects longer `text` values.
pub const TELEGRAM_MAX_MESSAGE_CHARS: usize = 4096;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Sends messages through the Telegram Bot API `sendMessage` method.
pub struct TelegramNotifier {
    bot_token: String,
    chat_id: String,
    api_base: String,
    client: Client,
}

impl TelegramNotifier {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_base: TELEGRAM_API_BASE.to_string(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(config.telegram_bot.clone(), config.telegram_chat.clone())
    }

    /// Point the notifier at a different Bot API host.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn endpoint(&self) -> Result<Url, NotifyError> {
        let invalid = |reason: String| NotifyError::Endpoint {
            base: self.api_base.clone(),
            reason,
        };

        let mut url = Url::parse(&self.api_base).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(&format!("bot{}", self.bot_token))
            .push("sendMessage");

        Ok(url)
    }

    /// Send one message, with no retry.
    pub async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
        };

        let response = self
            .client
            .post(self.endpoint()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.without_url()))?;

        let status = response.status();
        // Always read the body, so the connection is released either way.
        let text = response.text().await;

        if status != StatusCode::OK {
            let body = match text {
                Ok(body) => body,
                Err(e) => format!("<failed to read body: {}>", e.without_url()),
            };
            return Err(NotifyError::Rejected { status, body });
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        self.send_message(message).await
    }

    fn max_message_chars(&self) -> Option<usize> {
        Some(TELEGRAM_MAX_MESSAGE_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_embeds_token() {
        let notifier = TelegramNotifier::new("123:abc", "42");
        assert_eq!(
            notifier.endpoint().unwrap().as_str(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_endpoint_with_custom_base() {
        let notifier = TelegramNotifier::new("t", "42").with_api_base("http://127.0.0.1:9999");
        assert_eq!(
            notifier.endpoint().unwrap().as_str(),
            "http://127.0.0.1:9999/bott/sendMessage"
        );
    }

    #[test]
    fn test_invalid_base_is_endpoint_error() {
        let notifier = TelegramNotifier::new("t", "42").with_api_base("not a url");
        assert!(matches!(notifier.endpoint(), Err(NotifyError::Endpoint { .. })));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let notifier = TelegramNotifier::new("123:abc", "42").with_api_base("http://proxy/tg");
        assert_eq!(
            notifier.endpoint().unwrap().as_str(),
            "http://proxy/tg/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_endpoint_escapes_token_delimiters() {
        let notifier = TelegramNotifier::new("12?3#ab/c", "42");
        let url = notifier.endpoint().unwrap();

        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
        assert_eq!(url.path_segments().unwrap().count(), 2);
        assert!(url.path().ends_with("/sendMessage"));
    }

    #[test]
    fn test_message_body_is_escaped_json() {
        let body = SendMessage {
            chat_id: "42",
            text: "API Error: \"quoted\"\nsecond line",
        };
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["chat_id"], "42");
        assert_eq!(value["text"], "API Error: \"quoted\"\nsecond line");
    }
}
