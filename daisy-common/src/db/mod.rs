//! Database models and queries

pub mod init;
pub mod models;
pub mod posts;
pub mod reports;

pub use init::*;
pub use models::*;
pub use posts::*;
pub use reports::*;
