use crate::domain::ports::MessagingBackend;
use crate::utils::error::{QuoteError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

#[derive(Deserialize)]
struct TelegramResponse {
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API 的 sendMessage 用戶端
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }
}

// 不輸出 token
impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_base", &self.api_base)
            .field("bot_token", &"***")
            .field("chat_id", &"***")
            .finish()
    }
}

#[async_trait]
impl MessagingBackend for TelegramClient {
    async fn send_html(&self, text: &str) -> Result<()> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: "HTML",
        };

        // URL 含有 token，錯誤訊息中必須移除
        let response = self
            .client
            .post(self.send_message_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| QuoteError::ApiError(e.without_url()))?;

        let status = response.status();
        let body: TelegramResponse = response
            .json()
            .await
            .map_err(|e| QuoteError::ApiError(e.without_url()))?;

        if !status.is_success() {
            return Err(QuoteError::UpstreamError {
                status: status.as_u16(),
                description: body
                    .description
                    .unwrap_or_else(|| "Неизвестная ошибка".to_string()),
            });
        }

        tracing::debug!("Telegram accepted message ({} chars)", text.chars().count());
        Ok(())
    }
}
