pub mod console;
#[cfg(feature = "relay")]
pub mod relay;
