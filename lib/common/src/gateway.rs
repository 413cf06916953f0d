use crate::error::StoreError;
use async_trait::async_trait;
use skigraph_model::{Term, Variable};
use spargebra::algebra::{AggregateExpression, AggregateFunction, Expression, GraphPattern};
use spargebra::{Query, Update};
use std::fmt::{Display, Formatter};

const ROW_COUNT: &str = "rowCount";

/// The only access the inference engine has to a triple store.
///
/// Implementations must tolerate concurrent calls, as independent inference branches share one
/// gateway.
#[async_trait]
pub trait TripleStoreGateway: Send + Sync {
    /// Executes an `INSERT ... WHERE` rule. Applying the same rule twice without any other change
    /// to the store must not insert anything on the second application.
    async fn apply_rule(&self, update: &Update) -> Result<(), StoreError>;

    /// Returns the number of solutions of the pattern of `query`.
    async fn count_matches(&self, query: &CountQuery) -> Result<u64, StoreError>;
}

/// A `SELECT (COUNT(?x) AS ?rowCount)` query that returns exactly one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountQuery {
    query: Query,
    row_count: Variable,
}

impl CountQuery {
    /// Creates a query counting the bindings of `counted` in `pattern`.
    pub fn new(pattern: GraphPattern, counted: Variable) -> Self {
        let row_count = Variable::new_unchecked(ROW_COUNT);
        let aggregate = AggregateExpression::FunctionCall {
            name: AggregateFunction::Count,
            expr: Expression::Variable(counted),
            distinct: false,
        };
        let pattern = GraphPattern::Project {
            inner: Box::new(GraphPattern::Group {
                inner: Box::new(pattern),
                variables: Vec::new(),
                aggregates: vec![(row_count.clone(), aggregate)],
            }),
            variables: vec![row_count.clone()],
        };
        Self {
            query: Query::Select {
                dataset: None,
                pattern,
                base_iri: None,
            },
            row_count,
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Returns the variable holding the count in the single result row.
    pub fn row_count_variable(&self) -> &Variable {
        &self.row_count
    }

    /// Reads the count out of the value bound to [`Self::row_count_variable`].
    pub fn read_count(&self, value: Option<&Term>) -> Result<u64, StoreError> {
        match value {
            Some(Term::Literal(literal)) => literal.value().parse().map_err(|_| {
                StoreError::InvalidCount(format!("{literal} is not a non-negative integer"))
            }),
            Some(term) => Err(StoreError::InvalidCount(format!("{term} is not a literal"))),
            None => Err(StoreError::InvalidCount(format!(
                "no value bound to {}",
                self.row_count
            ))),
        }
    }
}

impl Display for CountQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.query.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skigraph_model::{xsd, Literal, NamedNode};
    use spargebra::term::{NamedNodePattern, TriplePattern};

    fn count_all() -> CountQuery {
        let s = Variable::new_unchecked("s");
        let o = Variable::new_unchecked("o");
        let pattern = GraphPattern::Bgp {
            patterns: vec![TriplePattern {
                subject: s.into(),
                predicate: NamedNodePattern::NamedNode(NamedNode::new_unchecked(
                    "http://example.com/p",
                )),
                object: o.clone().into(),
            }],
        };
        CountQuery::new(pattern, o)
    }

    #[test]
    fn rendered_query_parses_back() {
        let query = count_all();
        let text = query.to_string();
        assert!(text.contains("COUNT(?o)"), "{text}");
        assert!(text.contains("?rowCount"), "{text}");
        Query::parse(&text, None).unwrap();
    }

    #[test]
    fn read_count_accepts_integer_literals() {
        let query = count_all();
        let value = Term::Literal(Literal::new_typed_literal("42", xsd::INTEGER));
        assert_eq!(query.read_count(Some(&value)).unwrap(), 42);
    }

    #[test]
    fn read_count_rejects_missing_and_malformed_values() {
        let query = count_all();
        assert!(matches!(
            query.read_count(None),
            Err(StoreError::InvalidCount(_))
        ));
        let negative = Term::Literal(Literal::new_typed_literal("-1", xsd::INTEGER));
        assert!(matches!(
            query.read_count(Some(&negative)),
            Err(StoreError::InvalidCount(_))
        ));
        let iri = Term::NamedNode(NamedNode::new_unchecked("http://example.com/"));
        assert!(matches!(
            query.read_count(Some(&iri)),
            Err(StoreError::InvalidCount(_))
        ));
    }
}
