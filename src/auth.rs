//! Credential and token value objects owned by the token manager.

pub mod bearer;
pub mod credentials;
pub mod secret;

pub use bearer::*;
pub use credentials::*;
pub use secret::*;
