pub mod router;
pub mod types;
pub mod handlers {
    pub mod appointment;
    pub mod common;
    pub mod health;
    pub mod owner;
    pub mod partner;
    pub mod pet;
}

pub use router::{create_router, ApiDoc};
pub use types::{AppState, Envelope};
