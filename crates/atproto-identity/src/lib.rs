//! AT Protocol Identity Resolver
//!
//! Resolves handles to DIDs (DNS TXT with a well-known HTTPS fallback) and
//! DIDs to their PDS endpoint and canonical handle via the DID document.
//! Network access goes through the [`HttpClient`] and [`DnsTxtResolver`]
//! traits so every lookup can be driven from tests.

mod did;
mod error;
mod resolver;
mod transport;
mod types;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use did::Did;
pub use error::{IdentityError, Result, TransportError};
pub use resolver::{IdentityResolver, DEFAULT_PLC_DIRECTORY};
pub use transport::{
    DnsTxtResolver, HickoryDnsTxtResolver, HttpClient, HttpResponse, ReqwestHttpClient,
    BROWSER_USER_AGENT,
};
pub use types::PdsIdentity;
