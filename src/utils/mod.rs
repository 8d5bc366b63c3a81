//! Helpers shared by the server and the admin CLI.
//!
//! - [`token`] - Session token generation and HMAC hashing

pub mod token;
