//! Token secrets, JWT claim decoding, and access token lifetimes.

pub mod access;
pub mod claims;
pub mod secret;
