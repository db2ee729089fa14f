//! Utility modules shared across the API.
//!
//! - [`errors`]: Application error type and HTTP response conversion
//! - [`jwt`]: Access token creation and verification
//! - [`listing`]: Search/sort/order query parameters for list endpoints
//! - [`password`]: Password hashing and verification

pub mod errors;
pub mod jwt;
pub mod listing;
pub mod password;
