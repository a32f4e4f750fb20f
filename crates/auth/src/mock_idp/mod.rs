//! Mock Kakao IdP for development and testing.
//!
//! Imitates the Kakao authorize, token, profile, and unlink endpoints so the
//! full login flow runs without real credentials.

mod server;
mod templates;

pub use server::{decode_mock_code, mock_code, MockIdpServer};
