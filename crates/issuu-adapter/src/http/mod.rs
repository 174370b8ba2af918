/*
[INPUT]:  Client configuration, credentials and Options
[OUTPUT]: Signed API requests and parsed responses
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod dispatcher;
pub mod documents;
pub mod error;
pub mod signature;
pub mod transport;

pub use error::{IssuuError, Result};
pub use signature::{RequestSigner, SignedQuery};
pub use transport::{HttpTransport, Transport};

pub use client::{Accessor, ClientConfig, Credentials, IssuuClient, DEFAULT_ENDPOINT};
pub use dispatcher::{Dispatcher, PreparedRequest};
