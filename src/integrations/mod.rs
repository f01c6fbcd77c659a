//! External service integrations.

pub mod auth_client {
    pub use crate::auth_client::*;
}

pub mod zoominfo_client {
    pub use crate::zoominfo_client::*;
}
