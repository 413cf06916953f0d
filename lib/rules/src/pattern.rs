//! Small builders for the SPARQL algebra used by the rule templates.

use skigraph_model::{rdf, NamedNodeRef, Variable};
use spargebra::algebra::{Expression, GraphPattern, PropertyPathExpression};
use spargebra::term::{NamedNodePattern, TermPattern, TriplePattern};

pub(crate) fn var(name: &str) -> Variable {
    Variable::new_unchecked(name)
}

pub(crate) fn triple(
    subject: impl Into<TermPattern>,
    predicate: NamedNodeRef<'_>,
    object: impl Into<TermPattern>,
) -> TriplePattern {
    TriplePattern {
        subject: subject.into(),
        predicate: NamedNodePattern::NamedNode(predicate.into_owned()),
        object: object.into(),
    }
}

/// `subject rdf:type class`
pub(crate) fn is_a(subject: &Variable, class: NamedNodeRef<'_>) -> TriplePattern {
    triple(subject.clone(), rdf::TYPE, class.into_owned())
}

pub(crate) fn bgp(patterns: impl IntoIterator<Item = TriplePattern>) -> GraphPattern {
    GraphPattern::Bgp {
        patterns: patterns.into_iter().collect(),
    }
}

pub(crate) fn join(left: GraphPattern, right: GraphPattern) -> GraphPattern {
    GraphPattern::Join {
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub(crate) fn union(left: GraphPattern, right: GraphPattern) -> GraphPattern {
    GraphPattern::Union {
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// `BIND(expression AS ?variable)` over `inner`.
pub(crate) fn bind(inner: GraphPattern, variable: Variable, expression: Expression) -> GraphPattern {
    GraphPattern::Extend {
        inner: Box::new(inner),
        variable,
        expression,
    }
}

/// `FILTER NOT EXISTS { absent }` over `inner`.
pub(crate) fn not_exists(inner: GraphPattern, absent: GraphPattern) -> GraphPattern {
    GraphPattern::Filter {
        expr: Expression::Not(Box::new(Expression::Exists(Box::new(absent)))),
        inner: Box::new(inner),
    }
}

/// `subject (first | second) object`
pub(crate) fn either_path(
    subject: &Variable,
    first: NamedNodeRef<'_>,
    second: NamedNodeRef<'_>,
    object: &Variable,
) -> GraphPattern {
    GraphPattern::Path {
        subject: subject.clone().into(),
        path: PropertyPathExpression::Alternative(
            Box::new(PropertyPathExpression::NamedNode(first.into_owned())),
            Box::new(PropertyPathExpression::NamedNode(second.into_owned())),
        ),
        object: object.clone().into(),
    }
}
