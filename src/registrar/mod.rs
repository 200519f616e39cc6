pub mod client;
pub mod types;

pub use client::GoDaddyClient;
pub use types::{
  ApiError, Availability, ContactInfo, Contacts, PurchaseOptions, PurchaseOutcome,
  SuggestedDomain,
};
