//! Value Object Module

pub mod account_id;
pub mod display_name;
pub mod email;
pub mod handle;
pub mod password;
