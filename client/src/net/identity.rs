//! Identity-provider seam used by the login flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build binds this to Firebase Auth (`net::firebase`); tests use
//! in-memory fakes. The login flow only ever needs interactive sign-in and an
//! explicit sign-out, so the trait stays that small.

use async_trait::async_trait;

use super::types::Principal;

/// Failure reported by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Sign-in did not complete (popup closed, network failure, rejected
    /// credential). The message is the provider's own wording.
    #[error("{0}")]
    SignIn(String),

    /// Sign-out request failed.
    #[error("sign-out failed: {0}")]
    SignOut(String),

    /// The provider SDK is not loaded in this environment.
    #[error("identity provider unavailable")]
    Unavailable,
}

/// Interactive authentication against an external identity provider.
///
/// Futures are `?Send`: the browser runs everything on one thread.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Run the interactive sign-in and return the authenticated principal.
    async fn sign_in(&self) -> Result<Principal, ProviderError>;

    /// End the provider-side session for the current principal.
    async fn sign_out(&self) -> Result<(), ProviderError>;
}
