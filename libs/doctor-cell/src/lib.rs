pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::*;
pub use services::schedule::{available_slots, validate_schedule, SLOT_MINUTES};
