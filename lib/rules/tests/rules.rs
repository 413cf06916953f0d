use skigraph_model::vocab::tp2;
use skigraph_model::{Literal, SegmentKind, Variable};
use skigraph_rules::Rule;
use spargebra::term::{NamedNodePattern, TermPattern};
use spargebra::{Query, Update};
use std::collections::HashSet;

#[test]
fn every_rule_renders_to_a_parsable_update() {
    for rule in Rule::ALL {
        let text = rule.template().to_update().to_string();
        assert!(
            Update::parse(&text, None).is_ok(),
            "{rule} renders to invalid SPARQL:\n{text}"
        );
        assert!(text.contains("INSERT"), "{rule}:\n{text}");
        assert!(!text.contains("DELETE"), "{rule}:\n{text}");
    }
}

#[test]
fn every_count_query_parses() {
    for rule in Rule::ALL {
        let template = rule.template();
        let text = template.count_query().to_string();
        assert!(
            Query::parse(&text, None).is_ok(),
            "{rule} count renders to invalid SPARQL:\n{text}"
        );
    }
}

#[test]
fn insert_uses_target_predicate() {
    for rule in Rule::ALL {
        let template = rule.template();
        assert_eq!(
            template.insert().predicate,
            NamedNodePattern::NamedNode(rule.target_predicate().into_owned()),
            "{rule}"
        );
    }
}

#[test]
fn inserted_variables_are_bound_by_the_where_pattern() {
    for rule in Rule::ALL {
        let template = rule.template();
        let mut in_scope = HashSet::new();
        template
            .pattern()
            .on_in_scope_variable(|v| {
                in_scope.insert(v.clone());
            });
        for term in [&template.insert().subject, &template.insert().object] {
            if let TermPattern::Variable(v) = term {
                assert!(in_scope.contains(v), "{rule}: {v} is never bound");
            }
        }
    }
}

#[test]
fn difficulty_by_kind_inserts_the_kind_difficulty() {
    for kind in SegmentKind::ALL {
        let template = Rule::DifficultyByKind(kind).template();
        assert_eq!(
            template.insert().object,
            TermPattern::Literal(Literal::from(kind.difficulty()))
        );
        assert!(template.to_string().contains(kind.class().as_str()));
    }
}

#[test]
fn propagation_rules_combine_first_and_next() {
    let duration = Rule::DurationPropagation.template().to_string();
    assert!(duration.contains(" + "), "{duration}");
    assert!(duration.contains("UNION"), "{duration}");
    assert!(duration.contains("EXISTS"), "{duration}");

    let difficulty = Rule::DifficultyPropagation.template().to_string();
    assert!(difficulty.contains("IF("), "{difficulty}");
    assert!(difficulty.contains(">="), "{difficulty}");
}

#[test]
fn place_rule_follows_start_and_end_links() {
    let text = Rule::BelongsToPlace.template().to_string();
    assert!(text.contains(tp2::IS_START_OF.as_str()), "{text}");
    assert!(text.contains(tp2::IS_END_OF.as_str()), "{text}");
    assert!(text.contains('|'), "{text}");
}

#[test]
fn belongs_to_rules_share_one_count() {
    let counts: HashSet<_> = [
        Rule::BelongsToFirst,
        Rule::BelongsToRest,
        Rule::BelongsToPlace,
        Rule::BelongsToRestaurant,
    ]
    .into_iter()
    .map(|rule| rule.template().count_query().to_string())
    .collect();
    assert_eq!(counts.len(), 1);
}

#[test]
fn rule_names_are_unique() {
    let names: HashSet<_> = Rule::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(names.len(), Rule::ALL.len());
    assert!(names.contains("difficulty-by-kind(SkiLift)"));
}

#[test]
fn counts_read_the_row_count_variable() {
    for rule in Rule::ALL {
        assert_eq!(
            rule.template().count_query().row_count_variable(),
            &Variable::new_unchecked("rowCount")
        );
    }
}
