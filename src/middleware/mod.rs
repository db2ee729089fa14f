//! Middleware and extractors for authentication and authorization.
//!
//! - [`auth`]: `AuthUser` and `AdminUser` extractors that validate the
//!   `Authorization: Bearer <token>` header
//! - [`role`]: `require_admin` middleware for gating whole routers
//!
//! # Authentication flow
//!
//! 1. Client logs in and receives a JWT carrying id, name, email, is_admin
//! 2. Subsequent requests send `Authorization: Bearer <token>`
//! 3. `AuthUser` validates the token; `AdminUser` additionally checks the
//!    admin flag, rejecting with 403 otherwise

pub mod auth;
pub mod role;
