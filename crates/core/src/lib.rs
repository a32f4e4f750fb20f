//! Functional core for kakaologin.
//!
//! Pure types, traits, and functions. Everything that performs I/O lives in
//! `kakaologin_auth` or the `kakaologin` binary.

#[cfg(feature = "auth")]
pub mod auth;
#[cfg(feature = "auth")]
pub mod pages;
pub mod serde;
pub mod storage;
