pub mod calculator;
pub mod catalog;
pub mod engine;
pub mod lead;
pub mod session;
pub mod validator;
pub mod wizard;

pub use crate::domain::model::{
    ConfigChange, Configuration, DoorType, LeadForm, Manufacturer, PriceBreakdown, Quantity,
    Region, ValidationErrors,
};
pub use crate::domain::ports::{LeadNotifier, MessagingBackend};
pub use crate::utils::error::Result;
