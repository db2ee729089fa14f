//! Configuration modules for the Courseboard API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables at startup:
//!
//! - [`cors`]: Allowed origins for the browser client
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: Token secret and expiry settings
//! - [`rate_limit`]: Request throttling configuration

pub mod cors;
pub mod database;
pub mod jwt;
pub mod rate_limit;
