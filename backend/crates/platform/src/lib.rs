//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Credential hashing (Argon2id with fixed cost parameters)
//! - Session cookie materialization
//! - HMAC token signing and secret handling

pub mod cookie;
pub mod crypto;
pub mod password;
