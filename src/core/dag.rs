//! Dependency graph over a task batch.
//!
//! Nodes are the batch positions of the tasks and edges point from a task to
//! each in-batch dependency. References to ids outside the batch produce no
//! edge: they neither block ordering nor take part in cycles.

use crate::core::task::{Task, TaskId};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// A dependency cycle, listed from the first repeated task back to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclePath {
    pub ids: Vec<TaskId>,
}

impl CyclePath {
    /// Human-readable diagnostic, e.g. `Cycle detected: A → B → A`.
    pub fn diagnostic(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for CyclePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" → ");
        write!(f, "Cycle detected: {}", joined)
    }
}

/// A dependency id that names no task in the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingDependency {
    pub task: TaskId,
    pub dependency: TaskId,
}

/// Read-only dependency view of a batch.
pub struct DependencyGraph<'a> {
    tasks: &'a [Task],
    graph: DiGraph<usize, ()>,
    /// Every batch position carrying a given id, in batch order.
    positions: HashMap<&'a TaskId, Vec<NodeIndex>>,
}

impl<'a> DependencyGraph<'a> {
    pub fn new(tasks: &'a [Task]) -> Self {
        let mut graph = DiGraph::with_capacity(tasks.len(), tasks.len());
        let mut positions: HashMap<&TaskId, Vec<NodeIndex>> = HashMap::new();

        for (pos, task) in tasks.iter().enumerate() {
            let node = graph.add_node(pos);
            positions.entry(&task.id).or_default().push(node);
        }

        let mut dag = Self {
            tasks,
            graph,
            positions,
        };
        for pos in 0..tasks.len() {
            let from = NodeIndex::new(pos);
            for to in dag.dependency_nodes(from) {
                dag.graph.add_edge(from, to, ());
            }
        }
        dag
    }

    pub fn tasks(&self) -> &'a [Task] {
        self.tasks
    }

    pub fn task_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of in-batch dependency edges.
    pub fn dependency_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The node a dependency id resolves to.
    ///
    /// If the batch repeats an id, the last task carrying it wins.
    fn resolve(&self, id: &TaskId) -> Option<NodeIndex> {
        self.positions.get(id).and_then(|nodes| nodes.last().copied())
    }

    /// Resolved dependencies of a node, in declared order.
    fn dependency_nodes(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.tasks[node.index()]
            .dependencies
            .iter()
            .filter_map(|dep| self.resolve(dep))
            .collect()
    }

    /// Batch positions of every task whose id appears in the dependency list
    /// of the task at `pos`, in batch order, each once.
    pub fn dependency_positions(&self, pos: usize) -> Vec<usize> {
        let mut found: Vec<usize> = self.tasks[pos]
            .dependencies
            .iter()
            .filter_map(|dep| self.positions.get(dep))
            .flatten()
            .map(|node| node.index())
            .collect();
        found.sort_unstable();
        found.dedup();
        found
    }

    /// Whether any task in the batch carries `id`.
    pub fn contains(&self, id: &TaskId) -> bool {
        self.positions.contains_key(id)
    }

    /// Dependency references that resolve to nothing in the batch, in task
    /// order then declared order.
    pub fn dangling(&self) -> Vec<DanglingDependency> {
        let mut dangling = Vec::new();
        for task in self.tasks {
            for dep in &task.dependencies {
                if !self.contains(dep) {
                    dangling.push(DanglingDependency {
                        task: task.id.clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }
        dangling
    }

    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Find a dependency cycle, if any.
    ///
    /// Depth-first search from each task in batch order, following
    /// dependencies in declared order. The first cycle met is reported; it is
    /// not necessarily the shortest one.
    pub fn detect_cycle(&self) -> Option<CyclePath> {
        if !self.has_cycle() {
            return None;
        }

        let n = self.task_count();
        let mut done = vec![false; n];
        let mut on_path = vec![false; n];

        for task in self.tasks {
            let Some(start) = self.resolve(&task.id) else {
                continue;
            };
            if done[start.index()] {
                continue;
            }

            let mut path: Vec<NodeIndex> = vec![start];
            let mut stack: Vec<(Vec<NodeIndex>, usize)> = vec![(self.dependency_nodes(start), 0)];
            on_path[start.index()] = true;

            while let Some((deps, cursor)) = stack.last_mut() {
                if let Some(&next) = deps.get(*cursor) {
                    *cursor += 1;
                    if on_path[next.index()] {
                        let from = path.iter().position(|&n| n == next).unwrap_or(0);
                        let ids = path[from..]
                            .iter()
                            .chain(std::iter::once(&next))
                            .map(|n| self.tasks[n.index()].id.clone())
                            .collect();
                        return Some(CyclePath { ids });
                    }
                    if done[next.index()] {
                        continue;
                    }
                    on_path[next.index()] = true;
                    path.push(next);
                    stack.push((self.dependency_nodes(next), 0));
                } else {
                    stack.pop();
                    if let Some(finished) = path.pop() {
                        on_path[finished.index()] = false;
                        done[finished.index()] = true;
                    }
                }
            }
        }

        None
    }
}

impl std::fmt::Debug for DependencyGraph<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyGraph")
            .field("tasks", &self.task_count())
            .field("dependencies", &self.dependency_count())
            .finish()
    }
}
