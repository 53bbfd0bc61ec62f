//! Timeline construction and the content contract.

use hitstand_core::{GameError, Timeline};
use serde_json::json;

fn year_json(year: u32, quarters: &[u32]) -> serde_json::Value {
    json!({
        "year": year,
        "inflation": 0.03,
        "events": quarters.iter().map(|q| json!({
            "year": year,
            "quarter": q,
            "condition": "Steady",
            "returns": { "volatile": 0.05, "longTerm": 0.02 },
            "insight": "Nothing to see."
        })).collect::<Vec<_>>()
    })
}

fn load(years: Vec<serde_json::Value>) -> Result<Timeline, GameError> {
    Timeline::from_json(&json!({ "years": years }).to_string())
}

fn assert_invalid(result: Result<Timeline, GameError>, needle: &str) {
    match result {
        Err(GameError::InvalidTimeline { reason }) => {
            assert!(reason.contains(needle), "reason '{reason}' missing '{needle}'")
        }
        other => panic!("expected InvalidTimeline, got {other:?}"),
    }
}

#[test]
fn well_formed_json_loads() {
    let t = load(vec![year_json(1, &[1, 2, 3, 4]), year_json(2, &[1, 2, 3, 4])]).unwrap();
    assert_eq!(t.last_year(), 2);
    assert_eq!(t.quarter_count(), 8);
    assert_eq!(t.inflation_for(2).unwrap(), 0.03);
    assert_eq!(t.event_for(2, 4).unwrap().returns.long_term, 0.02);
    assert!(t.event_for(2, 4).unwrap().misleading_insight.is_none());
}

#[test]
fn empty_timeline_rejected() {
    assert_invalid(load(vec![]), "no years");
}

#[test]
fn years_must_start_at_one_and_be_contiguous() {
    assert_invalid(load(vec![year_json(2, &[1, 2, 3, 4])]), "contiguous");
    assert_invalid(
        load(vec![year_json(1, &[1, 2, 3, 4]), year_json(3, &[1, 2, 3, 4])]),
        "contiguous",
    );
}

#[test]
fn each_year_needs_exactly_four_quarters_in_order() {
    assert_invalid(load(vec![year_json(1, &[1, 2, 3])]), "3 events");
    assert_invalid(load(vec![year_json(1, &[1, 2, 3, 4, 4])]), "5 events");
    assert_invalid(load(vec![year_json(1, &[1, 3, 2, 4])]), "slot");
}

#[test]
fn wipe_out_returns_rejected() {
    let mut year = year_json(1, &[1, 2, 3, 4]);
    year["events"][2]["returns"]["volatile"] = json!(-1.5);
    assert_invalid(load(vec![year]), "volatile return");
}

#[test]
fn total_loss_and_four_hundred_percent_inflation_are_allowed() {
    let mut year = year_json(1, &[1, 2, 3, 4]);
    for q in 0..4 {
        year["events"][q]["returns"]["volatile"] = json!(-1.0);
    }
    year["inflation"] = json!(4.0);
    let t = load(vec![year]).unwrap();
    assert_eq!(t.event_for(1, 3).unwrap().returns.volatile, -1.0);
    assert_eq!(t.inflation_for(1).unwrap(), 4.0);
}

#[test]
fn event_year_must_match_owning_year() {
    let mut year = year_json(1, &[1, 2, 3, 4]);
    year["events"][1]["year"] = json!(2);
    assert_invalid(load(vec![year, year_json(2, &[1, 2, 3, 4])]), "slot");
}

#[test]
fn misleading_insight_is_read_when_present() {
    let mut year = year_json(1, &[1, 2, 3, 4]);
    year["events"][0]["misleadingInsight"] = json!("Everyone says it only goes up.");
    let t = load(vec![year]).unwrap();
    assert_eq!(
        t.event_for(1, 1).unwrap().misleading_insight.as_deref(),
        Some("Everyone says it only goes up.")
    );
    assert!(t.event_for(1, 2).unwrap().misleading_insight.is_none());
}

#[test]
fn runaway_inflation_rejected() {
    let mut year = year_json(1, &[1, 2, 3, 4]);
    year["inflation"] = json!(5.0);
    assert_invalid(load(vec![year]), "inflation");
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = Timeline::from_json("{ \"years\": [ { \"year\": 1 } ] }").unwrap_err();
    assert!(matches!(err, GameError::Serialization(_)));
    assert!(!err.is_config_fault());
}

#[test]
fn load_reads_from_disk() {
    let path = std::env::temp_dir().join(format!("timeline-{}.json", std::process::id()));
    let body = json!({ "years": [year_json(1, &[1, 2, 3, 4])] }).to_string();
    std::fs::write(&path, body).unwrap();

    let t = Timeline::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(t.last_year(), 1);

    assert!(matches!(
        Timeline::load("/nonexistent/timeline.json"),
        Err(GameError::Io(_))
    ));
}

#[test]
fn standard_round_trips_through_json() {
    let standard = Timeline::standard();
    let json = serde_json::to_string(standard).unwrap();
    let reloaded = Timeline::from_json(&json).unwrap();
    assert_eq!(&reloaded, standard);
}
