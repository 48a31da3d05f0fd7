//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    account::{Account, NewAccount},
    profile::Profile,
    session::{Session, SessionUser},
};
pub use repository::{
    AccountLookup, AccountRecord, AccountRepository, AccountSelect, SessionRepository,
};
