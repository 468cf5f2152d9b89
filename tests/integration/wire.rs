//! Request JSON in, response JSON out.

use serde_json::{json, Value};

use taskrank::payload::{AnalysisRequest, AnalysisResponse};
use taskrank::Strategy;

use crate::fixtures::engine;

const SAMPLE: &str = r#"{
    "Tasks": [
        {"id": 1, "title": "Fix login bug", "due_date": "2025-11-30",
         "estimated_hours": 3, "importance": 8, "dependencies": [],
         "created_at": "2025-11-18T08:00:00Z"},
        {"id": 2, "title": "Hotfix", "due_date": "2025-11-15",
         "estimated_hours": 1, "importance": 10, "dependencies": []}
    ],
    "analyseType": "High Impact"
}"#;

fn respond(request: AnalysisRequest, strategy: Option<&str>) -> Value {
    let name = strategy
        .map(str::to_string)
        .or(request.analyse_type)
        .unwrap_or_default();
    let analysis = engine().analyse_named(request.tasks, &name).unwrap();
    serde_json::to_value(AnalysisResponse::from(analysis)).unwrap()
}

fn order_of(response: &Value) -> Vec<i64> {
    response["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect()
}

#[test]
fn test_sample_request_high_impact() {
    let response = respond(AnalysisRequest::from_json(SAMPLE).unwrap(), None);
    assert_eq!(response["status"], "success");
    assert_eq!(response["cycleStatus"], "");
    assert_eq!(order_of(&response), vec![2, 1]);
    assert_eq!(response["data"], response["recommendations"]);
}

#[test]
fn test_sample_request_every_strategy() {
    let expected = [
        (Strategy::FastestWins, vec![2, 1]),
        (Strategy::HighImpact, vec![2, 1]),
        (Strategy::DeadlineDriven, vec![2, 1]),
        (Strategy::SmartBalance, vec![1, 2]),
    ];
    for (strategy, order) in expected {
        let request = AnalysisRequest::from_json(SAMPLE).unwrap();
        let response = respond(request, Some(strategy.name()));
        assert_eq!(order_of(&response), order, "strategy {}", strategy);
    }
}

#[test]
fn test_response_carries_scores_and_extra_fields() {
    let response = respond(AnalysisRequest::from_json(SAMPLE).unwrap(), Some("Smart Balance"));
    let data = response["data"].as_array().unwrap();

    // Due in 10 days: 0 + 8*5; overdue quick win: 100 + 10*5 + 10.
    assert_eq!(data[0]["score"], json!(40));
    assert_eq!(data[1]["score"], json!(160));
    assert_eq!(data[0]["created_at"], json!("2025-11-18T08:00:00Z"));
    assert!(data[1]["remarks"]
        .as_str()
        .unwrap()
        .starts_with("Smart Remark: 'Hotfix' : 160"));
}

#[test]
fn test_cycle_response_shape() {
    let request = AnalysisRequest::from_json(
        r#"[{"id": 1, "dependencies": [2]}, {"id": 2, "dependencies": [1]}]"#,
    )
    .unwrap();
    let response = respond(request, None);
    assert_eq!(response["status"], "success");
    assert_eq!(response["cycleStatus"], "Cycle detected: 1 → 2 → 1");
    assert_eq!(response["data"], json!([]));
    assert_eq!(response["recommendations"], json!([]));
}

#[test]
fn test_mixed_id_forms_do_not_match() {
    // "1" names no task here: task 1 has an integer id.
    let request = AnalysisRequest::from_json(
        r#"[{"id": 1, "dependencies": ["2"]}, {"id": 2, "dependencies": [1]}]"#,
    )
    .unwrap();
    let response = respond(request, Some("Fastest Wins"));
    assert_eq!(response["cycleStatus"], "");
    assert_eq!(order_of(&response), vec![1, 2]);
}
