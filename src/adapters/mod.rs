// Adapters layer: concrete implementations for external systems (relay, messaging API).

pub mod relay_client;
pub mod telegram;

pub use relay_client::HttpLeadNotifier;
pub use telegram::TelegramClient;
