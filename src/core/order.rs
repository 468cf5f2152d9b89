//! Priority-first ordering that pulls dependencies forward on demand.
//!
//! Tasks are walked in sort-key order. A task whose in-batch dependencies
//! are not all placed yet first has those dependencies ordered (same key,
//! same direction, recursively) and placed, then is placed itself. This is
//! not a depth-layered topological sort: dependencies move only as far
//! forward as the first dependent that needs them.
//!
//! The walk keeps an explicit stack of frames instead of recursing, so
//! dependency chain length is not limited by the call stack.

use std::cmp::Ordering;

use crate::core::dag::DependencyGraph;
use crate::core::task::Task;
use crate::{rlog_trace, Error, Result};

/// Direction applied after the ascending sort of each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    /// Sort ascending, then reverse the whole group (ties included).
    Descending,
}

struct Frame {
    queue: Vec<usize>,
    cursor: usize,
    /// Task waiting for the dependency group pushed above this frame.
    waiting: Option<usize>,
}

/// Order a batch so that every task follows its in-batch dependencies.
///
/// Returns batch positions. Fails with `Error::Cycle` if a task turns out to
/// depend on one still waiting for its own dependencies; run
/// `DependencyGraph::detect_cycle` first for a full diagnostic.
pub fn order<F>(dag: &DependencyGraph<'_>, compare: F, direction: Direction) -> Result<Vec<usize>>
where
    F: Fn(&Task, &Task) -> Ordering,
{
    let tasks = dag.tasks();
    let n = tasks.len();
    let mut placed = vec![false; n];
    let mut waiting = vec![false; n];
    let mut output = Vec::with_capacity(n);

    let sort = |mut group: Vec<usize>| -> Vec<usize> {
        group.sort_by(|&a, &b| compare(&tasks[a], &tasks[b]));
        if direction == Direction::Descending {
            group.reverse();
        }
        group
    };

    let mut stack = vec![Frame {
        queue: sort((0..n).collect()),
        cursor: 0,
        waiting: None,
    }];

    while let Some(frame) = stack.last_mut() {
        if let Some(pos) = frame.waiting.take() {
            waiting[pos] = false;
            if !placed[pos] {
                rlog_trace!("place {} after its dependencies", tasks[pos].id);
                placed[pos] = true;
                output.push(pos);
            }
            continue;
        }

        let Some(&pos) = frame.queue.get(frame.cursor) else {
            stack.pop();
            continue;
        };
        frame.cursor += 1;
        if placed[pos] {
            continue;
        }

        let required: Vec<usize> = dag
            .dependency_positions(pos)
            .into_iter()
            .filter(|&dep| !placed[dep])
            .collect();

        if required.is_empty() {
            rlog_trace!("place {}", tasks[pos].id);
            placed[pos] = true;
            output.push(pos);
            continue;
        }

        if let Some(&blocked) = required.iter().find(|&&dep| waiting[dep] || dep == pos) {
            return Err(Error::Cycle(format!(
                "Cycle detected at task: {}",
                tasks[blocked].id
            )));
        }

        waiting[pos] = true;
        frame.waiting = Some(pos);
        stack.push(Frame {
            queue: sort(required),
            cursor: 0,
            waiting: None,
        });
    }

    Ok(output)
}
