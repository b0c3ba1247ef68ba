pub mod config;
pub mod error;
pub mod models;
pub mod schemas;
pub mod services;

pub use error::ValidationError;
pub use models::Event;
pub use schemas::{EventBase, EventDetails, View};
