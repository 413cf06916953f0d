pub mod error;
mod gateway;

pub use error::StoreError;
pub use gateway::{CountQuery, TripleStoreGateway};

// Re-export the SPARQL algebra the gateway speaks.
pub use spargebra::{Query, Update};
