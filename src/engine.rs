//! Entry point tying scoring, cycle detection and ordering together.

use chrono::NaiveDate;

use crate::core::dag::{CyclePath, DependencyGraph};
use crate::core::order::order;
use crate::core::score::score;
use crate::core::task::Task;
use crate::strategy::Strategy;
use crate::{rlog_debug, rlog_trace, rlog_warn, Error, Result};

/// Outcome of ranking a batch.
///
/// A cycle is a normal outcome, not an error: the caller shows the
/// diagnostic instead of an ordering.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    Ordered(Vec<Task>),
    Cycle(CyclePath),
}

impl Analysis {
    pub fn is_cycle(&self) -> bool {
        matches!(self, Analysis::Cycle(_))
    }

    /// Ordered tasks, empty when a cycle was found.
    pub fn tasks(&self) -> &[Task] {
        match self {
            Analysis::Ordered(tasks) => tasks,
            Analysis::Cycle(_) => &[],
        }
    }

    pub fn into_tasks(self) -> Vec<Task> {
        match self {
            Analysis::Ordered(tasks) => tasks,
            Analysis::Cycle(_) => Vec::new(),
        }
    }

    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Analysis::Ordered(_) => None,
            Analysis::Cycle(path) => Some(path.diagnostic()),
        }
    }
}

/// Stateless ranking engine.
///
/// "Today" is fixed at construction so scores are reproducible.
#[derive(Debug, Clone)]
pub struct PriorityEngine {
    today: NaiveDate,
    strict_dependencies: bool,
}

impl PriorityEngine {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            strict_dependencies: false,
        }
    }

    /// Engine dated with the local calendar day.
    pub fn for_today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    /// Reject dependency ids that name no task in the batch instead of
    /// treating them as satisfied.
    pub fn strict_dependencies(mut self, strict: bool) -> Self {
        self.strict_dependencies = strict;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Recompute and attach the score of every task.
    pub fn score_batch(&self, batch: &mut [Task]) {
        for task in batch.iter_mut() {
            let value = score(task, self.today);
            rlog_trace!("score {} = {}", task.id, value);
            task.score = Some(value);
        }
    }

    /// Score, check for cycles and order a batch with the given strategy.
    ///
    /// # Errors
    /// Only in strict mode, when a dependency id is missing from the batch.
    pub fn analyse(&self, mut batch: Vec<Task>, strategy: Strategy) -> Result<Analysis> {
        rlog_debug!(
            "analyse strategy={} tasks={} today={}",
            strategy,
            batch.len(),
            self.today
        );
        self.score_batch(&mut batch);

        let positions = {
            let dag = DependencyGraph::new(&batch);
            if let Some(cycle) = dag.detect_cycle() {
                rlog_warn!("{}", cycle);
                return Ok(Analysis::Cycle(cycle));
            }

            let dangling = dag.dangling();
            for missing in &dangling {
                rlog_warn!(
                    "task {} depends on {}, which is not in the batch",
                    missing.task,
                    missing.dependency
                );
            }
            if self.strict_dependencies {
                if let Some(missing) = dangling.into_iter().next() {
                    return Err(Error::UnresolvedDependency {
                        task: missing.task,
                        dependency: missing.dependency,
                    });
                }
            }

            order(&dag, |a, b| strategy.compare(a, b), strategy.direction())?
        };

        let mut slots: Vec<Option<Task>> = batch.into_iter().map(Some).collect();
        let ordered: Vec<Task> = positions
            .into_iter()
            .filter_map(|pos| slots[pos].take())
            .map(|mut task| {
                task.remarks = Some(strategy.remark(&task));
                task
            })
            .collect();

        rlog_debug!(
            "order: {}",
            ordered
                .iter()
                .map(|t| t.id.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(Analysis::Ordered(ordered))
    }

    /// Like `analyse`, resolving the strategy by name. Unknown names fall
    /// back to Smart Balance.
    pub fn analyse_named(&self, batch: Vec<Task>, name: &str) -> Result<Analysis> {
        let strategy = Strategy::parse(name).unwrap_or_else(|| {
            rlog_warn!("unknown strategy {:?}, using {}", name, Strategy::default());
            Strategy::default()
        });
        self.analyse(batch, strategy)
    }

    /// The first `limit` tasks under Smart Balance.
    pub fn recommend(&self, batch: Vec<Task>, limit: usize) -> Result<Analysis> {
        Ok(match self.analyse(batch, Strategy::SmartBalance)? {
            Analysis::Ordered(mut tasks) => {
                tasks.truncate(limit);
                Analysis::Ordered(tasks)
            }
            cycle => cycle,
        })
    }
}
