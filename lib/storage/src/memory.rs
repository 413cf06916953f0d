use async_trait::async_trait;
use oxigraph::io::RdfFormat;
use oxigraph::model::GraphNameRef;
use oxigraph::sparql::QueryResults;
use oxigraph::store::Store;
use skigraph_common::{CountQuery, StoreError, TripleStoreGateway, Update};
use std::io::{Read, Write};
use tracing::trace;

/// A gateway to an embedded, in-memory [`Store`].
///
/// Usage example:
/// ```
/// use oxigraph::io::RdfFormat;
/// use skigraph_storage::MemoryGateway;
///
/// let gateway = MemoryGateway::new()?;
/// gateway.load(
///     RdfFormat::Turtle,
///     "<http://example.com/s> <http://example.com/p> 1 .".as_bytes(),
/// )?;
/// assert_eq!(gateway.store().len()?, 1);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Clone)]
pub struct MemoryGateway {
    store: Store,
}

impl MemoryGateway {
    /// Creates a gateway to a new, empty store.
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self::from_store(
            Store::new().map_err(StoreError::unavailable)?,
        ))
    }

    pub fn from_store(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Loads a serialization of RDF triples into the default graph.
    pub fn load(&self, format: RdfFormat, reader: impl Read) -> Result<(), StoreError> {
        self.store
            .load_from_reader(format, reader)
            .map_err(StoreError::unavailable)
    }

    /// Writes the default graph to `writer`.
    pub fn dump<W: Write>(&self, format: RdfFormat, writer: W) -> Result<W, StoreError> {
        self.store
            .dump_graph_to_writer(GraphNameRef::DefaultGraph, format, writer)
            .map_err(StoreError::unavailable)
    }
}

#[async_trait]
impl TripleStoreGateway for MemoryGateway {
    async fn apply_rule(&self, update: &Update) -> Result<(), StoreError> {
        let update = update.to_string();
        trace!(%update, "Applying rule");
        self.store
            .update(update.as_str())
            .map_err(StoreError::unavailable)
    }

    async fn count_matches(&self, query: &CountQuery) -> Result<u64, StoreError> {
        let text = query.to_string();
        trace!(query = %text, "Counting matches");
        let QueryResults::Solutions(mut solutions) = self
            .store
            .query(text.as_str())
            .map_err(StoreError::unavailable)?
        else {
            return Err(StoreError::InvalidCount(
                "the count query did not return solutions".to_owned(),
            ));
        };
        let solution = solutions
            .next()
            .transpose()
            .map_err(StoreError::unavailable)?
            .ok_or_else(|| StoreError::InvalidCount("the count query returned no row".to_owned()))?;
        query.read_count(solution.get(query.row_count_variable()))
    }
}
