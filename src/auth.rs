//! Credential, access token, and session state for authenticated calls.

pub mod refresher;
pub mod session;
pub mod token;

pub use refresher::*;
pub use session::*;
pub use token::{access::*, claims::*, secret::*};
