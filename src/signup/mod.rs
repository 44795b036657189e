//! Signup module - waitlist registration against a hosted key-value store

mod memory;
mod service;
pub mod store;
mod upstash;

pub use memory::MemoryStore;
pub use service::{validate_email, SignupError, SignupService};
pub use service::{DUPLICATE_EMAIL_MESSAGE, INTERNAL_ERROR_MESSAGE, INVALID_EMAIL_MESSAGE};
pub use store::{SignupMetadata, SignupStore, StoreError};
pub use upstash::UpstashStore;
