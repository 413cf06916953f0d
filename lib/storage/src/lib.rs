//! [`TripleStoreGateway`](skigraph_common::TripleStoreGateway) implementations.
//!
//! - [`MemoryGateway`] runs the rules against an embedded in-memory store.
//! - [`HttpGateway`] sends them to a remote SPARQL endpoint.

mod http;
mod memory;

pub use http::{
    HttpGateway, HttpGatewayConfig, DEFAULT_QUERY_ENDPOINT, DEFAULT_UPDATE_ENDPOINT, HTTP_TIMEOUT,
};
pub use memory::MemoryGateway;
