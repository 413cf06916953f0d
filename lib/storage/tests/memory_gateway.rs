use oxigraph::io::RdfFormat;
use oxigraph::model::{Literal, NamedNode, Term};
use skigraph_common::TripleStoreGateway;
use skigraph_model::vocab::tp2;
use skigraph_model::SegmentKind;
use skigraph_rules::Rule;
use skigraph_storage::MemoryGateway;

const RUNS: &str = r"
@prefix : <http://www.semanticweb.org/tws/tp2#> .
:b1 a :BlueRun .
:b2 a :BlueRun .
:r1 a :RedRun .
";

fn node(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("{}{local}", tp2::NAMESPACE))
}

#[tokio::test]
async fn empty_store_counts_nothing() {
    let gateway = MemoryGateway::new().unwrap();
    for rule in Rule::ALL {
        let count = gateway
            .count_matches(rule.template().count_query())
            .await
            .unwrap();
        assert_eq!(count, 0, "{rule}");
    }
}

#[tokio::test]
async fn applying_a_rule_is_idempotent() {
    let gateway = MemoryGateway::new().unwrap();
    gateway.load(RdfFormat::Turtle, RUNS.as_bytes()).unwrap();
    let template = Rule::DifficultyByKind(SegmentKind::BlueRun).template();
    let update = template.to_update();

    assert_eq!(gateway.count_matches(template.count_query()).await.unwrap(), 0);
    gateway.apply_rule(&update).await.unwrap();
    assert_eq!(gateway.count_matches(template.count_query()).await.unwrap(), 2);

    let len = gateway.store().len().unwrap();
    gateway.apply_rule(&update).await.unwrap();
    assert_eq!(gateway.store().len().unwrap(), len);

    let difficulty: Vec<Term> = gateway
        .store()
        .quads_for_pattern(
            Some(node("b1").as_ref().into()),
            Some(tp2::DIFFICULTY),
            None,
            None,
        )
        .map(|quad| quad.unwrap().object)
        .collect();
    assert_eq!(difficulty, vec![Term::from(Literal::from(1_i64))]);
    // Red runs are left to their own rule.
    assert_eq!(
        gateway
            .store()
            .quads_for_pattern(
                Some(node("r1").as_ref().into()),
                Some(tp2::DIFFICULTY),
                None,
                None,
            )
            .count(),
        0
    );
}

#[test]
fn dump_writes_the_default_graph() {
    let gateway = MemoryGateway::new().unwrap();
    gateway.load(RdfFormat::Turtle, RUNS.as_bytes()).unwrap();
    let dump = gateway.dump(RdfFormat::NTriples, Vec::new()).unwrap();
    let dump = String::from_utf8(dump).unwrap();
    assert_eq!(dump.lines().count(), 3);
    assert!(dump.contains(
        "<http://www.semanticweb.org/tws/tp2#r1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.semanticweb.org/tws/tp2#RedRun> ."
    ));
}

#[test]
fn invalid_data_is_reported() {
    let gateway = MemoryGateway::new().unwrap();
    assert!(gateway
        .load(RdfFormat::Turtle, "not turtle at all".as_bytes())
        .is_err());
}
