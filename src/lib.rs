pub mod api;
pub mod error;
pub mod view;

// Convenience re-exports
pub use api::client::TodoClient;
pub use api::types;
pub use error::{Result, TodoError};
pub use view::{Context, Effect, Rejected, TodoView};
