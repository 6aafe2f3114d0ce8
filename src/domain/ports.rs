use crate::utils::error::Result;
use async_trait::async_trait;

/// 將格式化好的詢價訊息送出（通常經由伺服器端轉發）
///
/// ```
/// use async_trait::async_trait;
/// use door_quote::domain::ports::LeadNotifier;
/// use door_quote::Result;
///
/// struct Stdout;
///
/// #[async_trait]
/// impl LeadNotifier for Stdout {
///     async fn submit_lead(&self, message: &str) -> Result<()> {
///         println!("{message}");
///         Ok(())
///     }
/// }
///
/// # tokio_test::block_on(async {
/// Stdout.submit_lead("<b>Новая заявка</b>").await.unwrap();
/// # });
/// ```
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    async fn submit_lead(&self, message: &str) -> Result<()>;
}

/// 訊息平台的傳送端，由轉發服務使用
#[async_trait]
pub trait MessagingBackend: Send + Sync {
    async fn send_html(&self, text: &str) -> Result<()>;
}
