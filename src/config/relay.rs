use crate::adapters::telegram::DEFAULT_API_BASE;
use crate::utils::error::{QuoteError, Result};
use crate::utils::validation::{validate_url, Validate};
use std::env;
use std::fmt;
use std::net::SocketAddr;

pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Clone, PartialEq, Eq)]
pub struct TelegramCredentials {
    pub bot_token: String,
    pub chat_id: String,
}

impl fmt::Debug for TelegramCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TelegramCredentials { .. }")
    }
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bind_addr: SocketAddr,
    pub api_base: String,
    /// 缺少任一個金鑰時為 None，請求會回 500
    pub credentials: Option<TelegramCredentials>,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 由任意來源讀取設定值（測試時不必改動行程環境變數）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let bind_addr_raw = present("RELAY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr_raw
            .parse::<SocketAddr>()
            .map_err(|e| QuoteError::InvalidConfigValueError {
                field: "RELAY_BIND_ADDR".to_string(),
                value: bind_addr_raw.clone(),
                reason: e.to_string(),
            })?;

        let credentials = match (present(BOT_TOKEN_VAR), present(CHAT_ID_VAR)) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramCredentials { bot_token, chat_id }),
            _ => None,
        };

        Ok(Self {
            bind_addr,
            api_base: present("TELEGRAM_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            credentials,
        })
    }
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        validate_url("TELEGRAM_API_BASE", &self.api_base)?;

        if self.credentials.is_none() {
            // 不阻止啟動，但每個請求都會回報設定錯誤
            tracing::warn!(
                "⚠️ {} or {} is not set; lead requests will be rejected",
                BOT_TOKEN_VAR,
                CHAT_ID_VAR
            );
        }
        Ok(())
    }
}
