use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Catalog parsing error: {message}")]
    CatalogParseError { message: String },

    #[error("Catalog entry '{path}' is invalid: {message}")]
    CatalogError { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid input '{value}' for '{field}': {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Step navigation refused: {message}")]
    NavigationError { message: String },

    #[error("Lead submission refused: {reason}")]
    SubmissionRefused { reason: String },

    #[error("Lead submission failed: {reason}")]
    LeadSubmissionFailed { reason: String },

    #[error("Upstream messaging API returned {status}: {description}")]
    UpstreamError { status: u16, description: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Catalog,
    Configuration,
    Input,
    Workflow,
    Network,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 行程退出碼；任何錯誤都不會回 0
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl QuoteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QuoteError::CatalogParseError { .. } | QuoteError::CatalogError { .. } => {
                ErrorCategory::Catalog
            }
            QuoteError::ConfigError { .. }
            | QuoteError::MissingConfigError { .. }
            | QuoteError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            QuoteError::InvalidInput { .. } => ErrorCategory::Input,
            QuoteError::NavigationError { .. } | QuoteError::SubmissionRefused { .. } => {
                ErrorCategory::Workflow
            }
            QuoteError::ApiError(_)
            | QuoteError::LeadSubmissionFailed { .. }
            | QuoteError::UpstreamError { .. } => ErrorCategory::Network,
            QuoteError::IoError(_) | QuoteError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Workflow => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Internal => ErrorSeverity::High,
            // 目錄缺項屬於程式/資料錯誤，無法繼續計價
            ErrorCategory::Catalog => ErrorSeverity::Critical,
        }
    }

    /// 錯誤是否可以由使用者重試
    pub fn is_retryable(&self) -> bool {
        matches!(self.category(), ErrorCategory::Network)
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Catalog => {
                "Check the catalog file: every door type, manufacturer and region combination must be present"
            }
            ErrorCategory::Configuration => {
                "Check command line flags and environment variables (TELEGRAM_BOT_TOKEN, TELEGRAM_CHAT_ID)"
            }
            ErrorCategory::Input => "Correct the highlighted value and try again",
            ErrorCategory::Workflow => "Complete the current step before continuing",
            ErrorCategory::Network => "Check the network connection and submit the request again",
            ErrorCategory::Internal => "Retry the operation; if it keeps failing, report the problem",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuoteError::LeadSubmissionFailed { reason } => reason.clone(),
            QuoteError::InvalidInput { field, reason, .. } => {
                format!("Некорректное значение поля «{}»: {}", field, reason)
            }
            QuoteError::NavigationError { message } => message.clone(),
            QuoteError::SubmissionRefused { reason } => reason.clone(),
            QuoteError::CatalogError { .. } | QuoteError::CatalogParseError { .. } => {
                "Ошибка каталога цен. Расчет невозможен.".to_string()
            }
            QuoteError::ApiError(_) | QuoteError::UpstreamError { .. } => {
                "Ошибка связи с сервером. Попробуйте еще раз.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
