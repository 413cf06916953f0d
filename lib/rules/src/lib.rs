//! The fixed rule set of the route inference.
//!
//! Each [`Rule`] is a typed [`RuleTemplate`]: an insert shape, a where shape, and a count of the
//! facts the rule derives. Templates are built as SPARQL algebra and only turned into text by the
//! gateway that sends them to a store.

mod pattern;
mod rule;
mod template;

pub use rule::Rule;
pub use template::RuleTemplate;
