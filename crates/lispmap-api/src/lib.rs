// lispmap-api: Async Rust client for the LISP mapping service RESTCONF API

pub mod error;
pub mod restconf;
pub mod transport;

pub use error::Error;
pub use restconf::client::{Credentials, RestconfClient};
pub use restconf::models;
pub use restconf::models::{
    AuthenticationKey, LocatorRecordWire, MappingAuthKey, MappingDatabase, MappingRecordWire,
    MappingWire, VirtualNetwork,
};
pub use restconf::operations::Operation;
pub use transport::{TlsMode, TransportConfig};
