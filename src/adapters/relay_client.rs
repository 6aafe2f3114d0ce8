use crate::domain::model::{LeadRequest, RelayReply};
use crate::domain::ports::LeadNotifier;
use crate::utils::error::{QuoteError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_RELAY_URL: &str = "http://localhost:8080/api/telegram";

/// 透過轉發服務送出詢價，前端永遠不接觸 bot 憑證
#[derive(Debug, Clone)]
pub struct HttpLeadNotifier {
    client: Client,
    endpoint: String,
}

impl HttpLeadNotifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LeadNotifier for HttpLeadNotifier {
    async fn submit_lead(&self, message: &str) -> Result<()> {
        tracing::debug!("Posting lead to relay: {}", self.endpoint);

        let request = LeadRequest {
            message: message.to_string(),
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| QuoteError::LeadSubmissionFailed {
                reason: format!("Ошибка сети: {}", e),
            })?;

        let status = response.status();
        tracing::debug!("Relay response status: {}", status);
        if status.is_success() {
            return Ok(());
        }

        // 轉發服務的錯誤訊息優先，否則退回 HTTP 狀態說明
        let reason = response
            .json::<RelayReply>()
            .await
            .ok()
            .map(|reply| reply.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| {
                format!(
                    "Ошибка сервера: {}",
                    status.canonical_reason().unwrap_or(status.as_str())
                )
            });

        Err(QuoteError::LeadSubmissionFailed { reason })
    }
}
