//! Hand-built batches with exact expected outcomes.

use taskrank::core::score::score;
use taskrank::core::task::{Task, TaskId};
use taskrank::{Analysis, Strategy};

use crate::fixtures::{due_in, engine, ids, position, task, today};

fn ordered(batch: Vec<Task>, strategy: Strategy) -> Vec<Task> {
    match engine().analyse(batch, strategy).expect("analyse") {
        Analysis::Ordered(tasks) => tasks,
        Analysis::Cycle(cycle) => panic!("unexpected {}", cycle),
    }
}

#[test]
fn test_overdue_quick_win_scores_115() {
    let hotfix = Task::new("hotfix", "Hotfix")
        .with_due_date(&due_in(-1))
        .with_importance(1)
        .with_hours(1.0);
    assert_eq!(score(&hotfix, today()), 115);

    let out = ordered(vec![hotfix], Strategy::SmartBalance);
    assert_eq!(out[0].score, Some(115));
}

#[test]
fn test_simple_chain_under_every_strategy() {
    for strategy in Strategy::ALL {
        let batch = vec![task("C", &["B"]), task("A", &[]), task("B", &["A"])];
        assert_eq!(
            ids(&ordered(batch, strategy)),
            vec!["A", "B", "C"],
            "strategy {}",
            strategy
        );
    }
}

#[test]
fn test_dangling_dependency_keeps_priority_position() {
    let batch = vec![
        task("Y", &[]).with_importance(1),
        task("X", &["ghost"]).with_importance(5),
        task("Z", &[]).with_importance(3),
    ];
    assert_eq!(ids(&ordered(batch, Strategy::HighImpact)), vec!["X", "Z", "Y"]);
}

#[test]
fn test_diamond_under_every_strategy() {
    for strategy in Strategy::ALL {
        let batch = vec![
            task("D", &["B", "C"]).with_importance(9).with_hours(0.5),
            task("B", &["A"]).with_importance(2).with_due_date(&due_in(1)),
            task("C", &["A"]).with_importance(7).with_hours(4.0),
            task("A", &[]).with_importance(0).with_due_date(&due_in(20)),
        ];
        let out = ordered(batch, strategy);
        let at = |id: &str| position(&out, &TaskId::from(id)).expect("present");
        assert_eq!(out.len(), 4);
        assert!(at("A") < at("B"), "strategy {}", strategy);
        assert!(at("A") < at("C"), "strategy {}", strategy);
        assert!(at("B") < at("D"), "strategy {}", strategy);
        assert!(at("C") < at("D"), "strategy {}", strategy);
    }
}

#[test]
fn test_dependency_pulled_only_as_far_as_needed() {
    // c is the slowest task but b needs it, so it lands right before b.
    let batch = vec![
        task("a", &[]).with_hours(1.0),
        task("b", &["c"]).with_hours(2.0),
        task("c", &[]).with_hours(8.0),
        task("d", &[]).with_hours(3.0),
    ];
    assert_eq!(
        ids(&ordered(batch, Strategy::FastestWins)),
        vec!["a", "c", "b", "d"]
    );
}

#[test]
fn test_high_impact_orders_dependency_groups_high_first() {
    let batch = vec![
        task("top", &["x", "y", "z"]).with_importance(10),
        task("x", &[]).with_importance(1),
        task("y", &[]).with_importance(7),
        task("z", &[]).with_importance(4),
        task("side", &[]).with_importance(8),
    ];
    assert_eq!(
        ids(&ordered(batch, Strategy::HighImpact)),
        vec!["y", "z", "x", "top", "side"]
    );
}

#[test]
fn test_deadline_driven_compares_raw_strings() {
    let batch = vec![
        task("stamp", &[]).with_due_date("2025-11-30T10:00:00Z"),
        task("undated", &[]),
        task("plain", &[]).with_due_date("2025-11-30"),
        task("early", &[]).with_due_date("2025-11-21"),
    ];
    assert_eq!(
        ids(&ordered(batch, Strategy::DeadlineDriven)),
        vec!["early", "plain", "stamp", "undated"]
    );
}

#[test]
fn test_smart_balance_puts_lowest_score_first() {
    let batch = vec![
        task("urgent", &[]).with_due_date(&due_in(-3)),
        task("idle", &[]),
        task("week", &[]).with_due_date(&due_in(6)),
    ];
    let out = ordered(batch, Strategy::SmartBalance);
    assert_eq!(ids(&out), vec!["idle", "week", "urgent"]);
    let scores: Vec<_> = out.iter().map(|t| t.score.unwrap()).collect();
    assert_eq!(scores, vec![0, 20, 100]);
}

#[test]
fn test_cycle_reported_under_every_strategy() {
    for strategy in Strategy::ALL {
        let batch = vec![
            task("ok", &[]),
            task("A", &["B"]),
            task("B", &["C"]),
            task("C", &["A", "ok"]),
        ];
        let analysis = engine().analyse(batch, strategy).unwrap();
        assert_eq!(
            analysis.diagnostic().as_deref(),
            Some("Cycle detected: A → B → C → A")
        );
        assert!(analysis.tasks().is_empty());
    }
}

#[test]
fn test_remarks_reference_raw_dependency_ids() {
    let batch = vec![
        Task::new(1, "Schema").with_hours(2.0),
        Task::new(2, "API").with_hours(1.0).with_dependencies([1, 99]),
    ];
    let out = ordered(batch, Strategy::FastestWins);
    assert_eq!(ids(&out), vec!["1", "2"]);
    assert_eq!(
        out[1].remarks.as_deref(),
        Some("Remark: 'API' takes 1 hours and has dependencies [1, 99], which were ordered for fastest completion.")
    );
}

#[test]
fn test_recommend_returns_top_three() {
    let batch = (1..=6)
        .map(|i| Task::new(i, "t").with_importance(10 - i as i64))
        .collect();
    let analysis = engine().recommend(batch, 3).unwrap();
    assert_eq!(ids(analysis.tasks()), vec!["6", "5", "4"]);
}
