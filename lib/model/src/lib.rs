mod segment;
pub mod vocab;

pub use segment::SegmentKind;

// Re-export some oxrdf types.
pub use oxrdf::vocab::{rdf, xsd};
pub use oxrdf::{
    Graph, Literal, LiteralRef, NamedNode, NamedNodeRef, Term, TermRef, Triple, TripleRef,
    Variable,
};
