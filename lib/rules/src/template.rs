use skigraph_common::CountQuery;
use spargebra::algebra::GraphPattern;
use spargebra::term::{GraphNamePattern, QuadPattern, TriplePattern};
use spargebra::{GraphUpdateOperation, Update};
use std::fmt::{Display, Formatter};

/// The insert shape, the where shape, and the target-fact count of one rule.
///
/// The template inserts one `insert` triple per solution of `pattern`. As triples have set
/// semantics in the store, solutions that produce an already present triple insert nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTemplate {
    insert: TriplePattern,
    pattern: GraphPattern,
    count: CountQuery,
}

impl RuleTemplate {
    pub fn new(insert: TriplePattern, pattern: GraphPattern, count: CountQuery) -> Self {
        Self {
            insert,
            pattern,
            count,
        }
    }

    pub fn insert(&self) -> &TriplePattern {
        &self.insert
    }

    pub fn pattern(&self) -> &GraphPattern {
        &self.pattern
    }

    /// Returns the query counting the facts this rule derives.
    pub fn count_query(&self) -> &CountQuery {
        &self.count
    }

    /// Builds the `INSERT { insert } WHERE { pattern }` update of this rule.
    pub fn to_update(&self) -> Update {
        let insert = QuadPattern {
            subject: self.insert.subject.clone(),
            predicate: self.insert.predicate.clone(),
            object: self.insert.object.clone(),
            graph_name: GraphNamePattern::DefaultGraph,
        };
        Update {
            base_iri: None,
            operations: vec![GraphUpdateOperation::DeleteInsert {
                delete: Vec::new(),
                insert: vec![insert],
                using: None,
                pattern: Box::new(self.pattern.clone()),
            }],
        }
    }
}

impl Display for RuleTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.to_update().fmt(f)
    }
}
