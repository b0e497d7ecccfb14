//! Session collaborator surface
//!
//! The credential-refresh middleware never talks to a token endpoint or a
//! credential store directly; the host supplies that behavior through the
//! `SessionHooks` trait. This crate defines the trait, the `Credentials`
//! exchanged through it, and a reusable HTTP refresh helper for hosts whose
//! refresh hook is a standard `grant_type=refresh_token` exchange.

pub mod credentials;
pub mod error;
pub mod hooks;
pub mod token;

pub use credentials::Credentials;
pub use error::{Error, Result};
pub use hooks::SessionHooks;
pub use token::refresh_credentials;
