use crate::pattern::{bgp, bind, either_path, is_a, join, not_exists, triple, union, var};
use crate::template::RuleTemplate;
use skigraph_common::CountQuery;
use skigraph_model::vocab::tp2;
use skigraph_model::{Literal, NamedNodeRef, SegmentKind, Variable};
use spargebra::algebra::{Expression, GraphPattern};
use std::fmt::{Display, Formatter};

/// One of the fixed rules of the route inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Asserts the difficulty of every segment of the given kind.
    DifficultyByKind(SegmentKind),
    /// A route lasts as long as its first element and the rest of its chain together.
    DurationPropagation,
    /// A route is as difficult as the most difficult of its first element and the rest of its
    /// chain.
    DifficultyPropagation,
    /// The first element of a route belongs to it.
    BelongsToFirst,
    /// Whatever belongs to the rest of a route's chain belongs to the route.
    BelongsToRest,
    /// A place at the start or at the end of something belonging to a route belongs to the route.
    BelongsToPlace,
    /// A restaurant located at a place belonging to a route belongs to the route.
    BelongsToRestaurant,
}

impl Rule {
    /// All rules, in declaration order.
    pub const ALL: [Rule; 10] = [
        Rule::DifficultyByKind(SegmentKind::BlueRun),
        Rule::DifficultyByKind(SegmentKind::RedRun),
        Rule::DifficultyByKind(SegmentKind::BlackRun),
        Rule::DifficultyByKind(SegmentKind::SkiLift),
        Rule::DurationPropagation,
        Rule::DifficultyPropagation,
        Rule::BelongsToFirst,
        Rule::BelongsToRest,
        Rule::BelongsToPlace,
        Rule::BelongsToRestaurant,
    ];

    /// Returns the predicate of the facts this rule derives.
    pub fn target_predicate(self) -> NamedNodeRef<'static> {
        match self {
            Rule::DifficultyByKind(_) | Rule::DifficultyPropagation => tp2::DIFFICULTY,
            Rule::DurationPropagation => tp2::DURATION,
            Rule::BelongsToFirst
            | Rule::BelongsToRest
            | Rule::BelongsToPlace
            | Rule::BelongsToRestaurant => tp2::BELONGS_TO,
        }
    }

    pub fn template(self) -> RuleTemplate {
        match self {
            Rule::DifficultyByKind(kind) => difficulty_by_kind(kind),
            Rule::DurationPropagation => chain_metric(
                tp2::DURATION,
                |first, next| Expression::Add(Box::new(first), Box::new(next)),
            ),
            Rule::DifficultyPropagation => chain_metric(tp2::DIFFICULTY, |first, next| {
                Expression::If(
                    Box::new(Expression::GreaterOrEqual(
                        Box::new(first.clone()),
                        Box::new(next.clone()),
                    )),
                    Box::new(first),
                    Box::new(next),
                )
            }),
            Rule::BelongsToFirst => {
                let (route, member) = (var("route"), var("member"));
                belongs_to(
                    &member,
                    &route,
                    bgp([
                        is_a(&route, tp2::ROUTE),
                        triple(route.clone(), tp2::FIRST_ELEMENT, member.clone()),
                    ]),
                )
            }
            Rule::BelongsToRest => {
                let (route, rest, member) = (var("route"), var("rest"), var("member"));
                belongs_to(
                    &member,
                    &route,
                    bgp([
                        is_a(&route, tp2::ROUTE),
                        triple(route.clone(), tp2::NEXT_ELEMENT, rest.clone()),
                        triple(member.clone(), tp2::BELONGS_TO, rest),
                    ]),
                )
            }
            Rule::BelongsToPlace => {
                let (place, start, route) = (var("place"), var("start"), var("route"));
                belongs_to(
                    &place,
                    &route,
                    join(
                        bgp([is_a(&place, tp2::PLACE)]),
                        join(
                            either_path(&place, tp2::IS_START_OF, tp2::IS_END_OF, &start),
                            bgp([triple(start, tp2::BELONGS_TO, route.clone())]),
                        ),
                    ),
                )
            }
            Rule::BelongsToRestaurant => {
                let (restaurant, place, route) =
                    (var("restaurant"), var("place"), var("route"));
                belongs_to(
                    &restaurant,
                    &route,
                    bgp([
                        is_a(&restaurant, tp2::RESTAURANT),
                        triple(restaurant.clone(), tp2::LOCATED_AT, place.clone()),
                        triple(place, tp2::BELONGS_TO, route.clone()),
                    ]),
                )
            }
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::DifficultyByKind(kind) => write!(f, "difficulty-by-kind({kind})"),
            Rule::DurationPropagation => f.write_str("duration-propagation"),
            Rule::DifficultyPropagation => f.write_str("difficulty-propagation"),
            Rule::BelongsToFirst => f.write_str("belongs-to-first"),
            Rule::BelongsToRest => f.write_str("belongs-to-rest"),
            Rule::BelongsToPlace => f.write_str("belongs-to-place"),
            Rule::BelongsToRestaurant => f.write_str("belongs-to-restaurant"),
        }
    }
}

fn difficulty_by_kind(kind: SegmentKind) -> RuleTemplate {
    let (run, difficulty) = (var("run"), var("difficulty"));
    RuleTemplate::new(
        triple(run.clone(), tp2::DIFFICULTY, Literal::from(kind.difficulty())),
        bgp([is_a(&run, kind.class())]),
        CountQuery::new(
            bgp([
                is_a(&run, kind.class()),
                triple(run.clone(), tp2::DIFFICULTY, difficulty.clone()),
            ]),
            difficulty,
        ),
    )
}

/// Propagates `metric` from the elements of a chain to its routes.
///
/// The metric of a route is `combine(first, next)` of the metric of its first element and the
/// metric of its next element. A route without a next element ends its chain and takes the metric
/// of its first element.
fn chain_metric(
    metric: NamedNodeRef<'static>,
    combine: impl FnOnce(Expression, Expression) -> Expression,
) -> RuleTemplate {
    let (route, first, next, any_next) = (var("route"), var("first"), var("next"), var("anyNext"));
    let (first_value, next_value, value) = (var("firstValue"), var("nextValue"), var("value"));

    let chained = bind(
        bgp([
            is_a(&route, tp2::ROUTE),
            triple(route.clone(), tp2::FIRST_ELEMENT, first.clone()),
            triple(route.clone(), tp2::NEXT_ELEMENT, next.clone()),
            triple(first.clone(), metric, first_value.clone()),
            triple(next, metric, next_value.clone()),
        ]),
        value.clone(),
        combine(
            Expression::Variable(first_value.clone()),
            Expression::Variable(next_value),
        ),
    );
    let terminal = bind(
        not_exists(
            bgp([
                is_a(&route, tp2::ROUTE),
                triple(route.clone(), tp2::FIRST_ELEMENT, first.clone()),
                triple(first, metric, first_value.clone()),
            ]),
            bgp([triple(route.clone(), tp2::NEXT_ELEMENT, any_next)]),
        ),
        value.clone(),
        Expression::Variable(first_value),
    );

    let counted = var("counted");
    RuleTemplate::new(
        triple(route.clone(), metric, value),
        union(chained, terminal),
        CountQuery::new(
            bgp([
                is_a(&route, tp2::ROUTE),
                triple(route.clone(), metric, counted.clone()),
            ]),
            counted,
        ),
    )
}

fn belongs_to(member: &Variable, route: &Variable, pattern: GraphPattern) -> RuleTemplate {
    RuleTemplate::new(
        triple(member.clone(), tp2::BELONGS_TO, route.clone()),
        pattern,
        belongs_to_count(),
    )
}

/// Counts every `belongsTo` pair, whatever rule derived it.
fn belongs_to_count() -> CountQuery {
    let (belonger, route) = (var("belonger"), var("route"));
    CountQuery::new(
        bgp([triple(belonger.clone(), tp2::BELONGS_TO, route)]),
        belonger,
    )
}
