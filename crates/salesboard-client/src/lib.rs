pub mod commands;
pub mod contracts;
pub mod error;
pub mod migrations;
pub mod sales;
pub mod setup;
pub mod store;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
