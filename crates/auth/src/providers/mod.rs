//! OAuth2 provider implementations.
//!
//! This module contains the `ProviderClient` implementation for Kakao.
//! Development builds point it at the mock IdP instead of the real servers.

mod kakao;

pub use kakao::KakaoProvider;
