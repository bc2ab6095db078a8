//! Session and token management.
//!
//! This module provides:
//! - `TokenStore` / `CookieFile`: cookie-style persistence of the one
//!   access token the client holds at a time
//! - `token`: payload decoding and validity checks against the clock
//! - `timer`: cancellable one-shot scheduling of expiry callbacks
//! - `validate`: client-side form validation rules

pub mod store;
pub mod timer;
pub mod token;
pub mod validate;

pub use store::{CookieFile, TokenStore};
pub use timer::{schedule_expiry, ExpiryTimer};
