pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpLeadNotifier, TelegramClient};
pub use config::relay::RelayConfig;
pub use crate::core::{
    catalog::PriceCatalog,
    engine::QuoteEngine,
    session::{QuoteSession, SubmissionState},
    wizard::{Wizard, WizardStep},
};
pub use utils::error::{QuoteError, Result};
