//! 詢價轉發服務：接收前端的訊息，帶上伺服器端的 bot 憑證轉送到 Telegram。

use crate::adapters::telegram::TelegramClient;
use crate::config::relay::RelayConfig;
use crate::domain::model::{LeadRequest, RelayReply};
use crate::domain::ports::MessagingBackend;
use crate::utils::error::{QuoteError, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const LEAD_PATH: &str = "/api/telegram";

const METHOD_NOT_ALLOWED: &str = "Разрешен только метод POST";
const CONFIG_ERROR: &str = "Ошибка конфигурации сервера: ключи Telegram отсутствуют.";
const INTERNAL_ERROR: &str = "Произошла внутренняя ошибка сервера.";
const SENT: &str = "Сообщение успешно отправлено";

#[derive(Clone)]
pub struct RelayState {
    backend: Option<Arc<dyn MessagingBackend>>,
}

impl RelayState {
    pub fn new(backend: Option<Arc<dyn MessagingBackend>>) -> Self {
        Self { backend }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        let backend = config.credentials.as_ref().map(|credentials| {
            Arc::new(TelegramClient::new(
                config.api_base.clone(),
                credentials.bot_token.clone(),
                credentials.chat_id.clone(),
            )) as Arc<dyn MessagingBackend>
        });
        Self::new(backend)
    }
}

pub fn create_router(state: RelayState) -> Router {
    Router::new()
        .route(LEAD_PATH, any(lead_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn reply(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(RelayReply {
            message: message.into(),
        }),
    )
        .into_response()
}

/// 任何方法都會進來，非 POST 由這裡回 405，確保回應本文一致
pub async fn lead_handler(State(state): State<RelayState>, method: Method, body: Bytes) -> Response {
    if method != Method::POST {
        let mut response = reply(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED);
        response
            .headers_mut()
            .insert(header::ALLOW, header::HeaderValue::from_static("POST"));
        return response;
    }

    let request: LeadRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("❌ Could not read lead request body: {}", e);
            return reply(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR);
        }
    };

    let Some(backend) = &state.backend else {
        tracing::error!("❌ Telegram credentials are not configured on the server");
        return reply(StatusCode::INTERNAL_SERVER_ERROR, CONFIG_ERROR);
    };

    match backend.send_html(&request.message).await {
        Ok(()) => {
            tracing::info!("📨 Lead forwarded to Telegram");
            reply(StatusCode::OK, SENT)
        }
        Err(QuoteError::UpstreamError {
            status,
            description,
        }) => {
            tracing::error!("❌ Telegram API error {}: {}", status, description);
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            reply(
                status,
                format!("Ошибка при отправке в Telegram: {}", description),
            )
        }
        Err(e) => {
            tracing::error!("❌ Internal relay error: {}", e);
            reply(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        }
    }
}

/// 綁定位址並執行，直到收到 Ctrl-C
pub async fn serve(config: RelayConfig) -> Result<()> {
    let state = RelayState::from_config(&config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("🚀 Lead relay listening on {}{}", config.bind_addr, LEAD_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("🛑 Shutting down lead relay");
        })
        .await?;

    Ok(())
}
