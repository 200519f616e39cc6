pub mod cli;
pub mod cli_commands;
pub mod config;
pub mod flow;
pub mod logger;
pub mod registrar;
pub mod shell;
pub mod ui;
pub mod validate;

pub use config::Config;
pub use flow::{Flow, FlowOutcome};
pub use registrar::{ApiError, GoDaddyClient, PurchaseOptions, PurchaseOutcome};
