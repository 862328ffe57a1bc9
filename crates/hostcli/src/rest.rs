//! REST request dispatch
//!
//! [`RequestDispatcher`] turns validated arguments into exactly one request and checks the
//! response envelope. The HTTP call itself goes through the [`RestTransport`] port, whose
//! production adapter is [`ReqwestTransport`], optionally wrapped in a
//! [`RetryingTransport`].

pub mod client;
pub mod dispatch;
pub mod envelope;
pub mod port;
pub mod retry;
pub mod session;

pub use client::ReqwestTransport;
pub use dispatch::{DispatchError, RequestDispatcher, build_payload};
pub use envelope::ResponseEnvelope;
pub use port::{RestRequest, RestResponse, RestTransport, TransportError};
pub use retry::{RetryPolicy, RetryingTransport};
pub use session::{SessionError, SessionProvider, StaticSession};

#[cfg(any(test, feature = "with_mocks"))]
pub use port::MockRestTransport;
#[cfg(any(test, feature = "with_mocks"))]
pub use session::MockSessionProvider;
