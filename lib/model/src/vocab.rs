//! The IRIs of the ski route ontology.

/// The [ski route ontology](http://www.semanticweb.org/tws/tp2#) vocabulary.
pub mod tp2 {
    use oxrdf::NamedNodeRef;

    /// The namespace of the ontology.
    pub const NAMESPACE: &str = "http://www.semanticweb.org/tws/tp2#";

    /// A chain of segments, linked through `firstElement` and `nextElement`.
    pub const ROUTE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.semanticweb.org/tws/tp2#Route");
    /// An easy ski run.
    pub const BLUE_RUN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.semanticweb.org/tws/tp2#BlueRun");
    /// An intermediate ski run.
    pub const RED_RUN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.semanticweb.org/tws/tp2#RedRun");
    /// A difficult ski run.
    pub const BLACK_RUN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.semanticweb.org/tws/tp2#BlackRun");
    /// A lift going uphill.
    pub const SKI_LIFT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.semanticweb.org/tws/tp2#SkiLift");
    /// A located point of interest at the start or the end of a route.
    pub const PLACE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.semanticweb.org/tws/tp2#Place");
    /// A restaurant located at a place.
    pub const RESTAURANT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.semanticweb.org/tws/tp2#Restaurant");

    /// The head of a route.
    pub const FIRST_ELEMENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.semanticweb.org/tws/tp2#firstElement");
    /// The remaining chain of a route after its head.
    pub const NEXT_ELEMENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.semanticweb.org/tws/tp2#nextElement");
    pub const DURATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.semanticweb.org/tws/tp2#duration");
    pub const DIFFICULTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.semanticweb.org/tws/tp2#difficulty");
    /// Links a node to an enclosing route.
    pub const BELONGS_TO: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.semanticweb.org/tws/tp2#belongsTo");
    pub const IS_START_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.semanticweb.org/tws/tp2#isStartOf");
    pub const IS_END_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.semanticweb.org/tws/tp2#isEndOf");
    pub const LOCATED_AT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.semanticweb.org/tws/tp2#locatedAt");
}
