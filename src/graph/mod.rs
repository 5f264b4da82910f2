use crate::task::Task;
use chrono::NaiveDate;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The dependency edges form a cycle. Construction fails; no partial
    /// graph is ever returned.
    Cycle { task_ids: Vec<String> },
    UnknownDependency {
        task_id: String,
        missing_id: String,
    },
    InvalidTaskRange {
        task_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::Cycle { task_ids } => {
                write!(f, "dependency cycle detected: {}", task_ids.join(" -> "))
            }
            GraphError::UnknownDependency { task_id, missing_id } => write!(
                f,
                "task '{task_id}' depends on unknown task '{missing_id}'"
            ),
            GraphError::InvalidTaskRange { task_id, start, end } => write!(
                f,
                "task '{task_id}' has end date {end} before start date {start}"
            ),
        }
    }
}

impl std::error::Error for GraphError {}

/// Validated directed acyclic graph over a task set's dependency edges
/// (predecessor -> successor), with a precomputed topological order.
#[derive(Debug)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    node_of: HashMap<String, NodeIndex>,
    order: Vec<String>,
}

impl DependencyGraph {
    /// Builds the adjacency from each task's dependency list. Rejects
    /// malformed date ranges, references to tasks outside the set, and
    /// cycles. Nodes are added in input order, which fixes the insertion
    /// index used for all deterministic tie-breaking.
    pub fn build(tasks: &[Task]) -> Result<Self, GraphError> {
        for task in tasks {
            if task.end < task.start {
                return Err(GraphError::InvalidTaskRange {
                    task_id: task.id.clone(),
                    start: task.start,
                    end: task.end,
                });
            }
        }

        let mut graph: DiGraph<String, ()> = DiGraph::with_capacity(tasks.len(), tasks.len());
        let mut node_of: HashMap<String, NodeIndex> = HashMap::with_capacity(tasks.len());
        for task in tasks {
            let ix = graph.add_node(task.id.clone());
            node_of.insert(task.id.clone(), ix);
        }

        for task in tasks {
            let succ = node_of[task.id.as_str()];
            for dep in &task.dependencies {
                let Some(&pred) = node_of.get(dep.as_str()) else {
                    return Err(GraphError::UnknownDependency {
                        task_id: task.id.clone(),
                        missing_id: dep.clone(),
                    });
                };
                graph.update_edge(pred, succ, ());
            }
        }

        if let Some(cycle) = find_cycle(&graph) {
            return Err(GraphError::Cycle {
                task_ids: cycle.into_iter().map(|ix| graph[ix].clone()).collect(),
            });
        }

        let order = stable_topological_order(&graph);
        Ok(Self {
            graph,
            node_of,
            order,
        })
    }

    /// Topological order of task ids. Deterministic: among tasks with no
    /// edge constraint between them, input order is preserved.
    pub fn topological_order(&self) -> &[String] {
        &self.order
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.node_of.contains_key(task_id)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn predecessors(&self, task_id: &str) -> Vec<&str> {
        self.neighbors(task_id, Direction::Incoming)
    }

    pub fn successors(&self, task_id: &str) -> Vec<&str> {
        self.neighbors(task_id, Direction::Outgoing)
    }

    fn neighbors(&self, task_id: &str, direction: Direction) -> Vec<&str> {
        match self.node_of.get(task_id) {
            Some(&ix) => self
                .graph
                .neighbors_directed(ix, direction)
                .map(|n| self.graph[n].as_str())
                .collect(),
            None => Vec::new(),
        }
    }
}

const WHITE: u8 = 0;
const GRAY: u8 = 1;
const BLACK: u8 = 2;

struct DfsFrame {
    node: NodeIndex,
    neighbors: Vec<NodeIndex>,
    next: usize,
}

impl DfsFrame {
    fn new(node: NodeIndex, graph: &DiGraph<String, ()>) -> Self {
        Self {
            node,
            neighbors: graph.neighbors(node).collect(),
            next: 0,
        }
    }
}

/// Three-color depth-first search. Returns the node path of the first
/// back edge found: the in-progress chain from the revisited node down to
/// the point of revisit.
fn find_cycle(graph: &DiGraph<String, ()>) -> Option<Vec<NodeIndex>> {
    let mut color = vec![WHITE; graph.node_count()];

    for start in graph.node_indices() {
        if color[start.index()] != WHITE {
            continue;
        }
        color[start.index()] = GRAY;
        let mut stack = vec![DfsFrame::new(start, graph)];

        while !stack.is_empty() {
            let advance = {
                let frame = stack.last_mut().expect("non-empty stack");
                if frame.next < frame.neighbors.len() {
                    let node = frame.neighbors[frame.next];
                    frame.next += 1;
                    Some(node)
                } else {
                    None
                }
            };

            match advance {
                Some(node) => match color[node.index()] {
                    WHITE => {
                        color[node.index()] = GRAY;
                        stack.push(DfsFrame::new(node, graph));
                    }
                    GRAY => {
                        let mut path: Vec<NodeIndex> =
                            stack.iter().map(|frame| frame.node).collect();
                        let at = path
                            .iter()
                            .position(|&n| n == node)
                            .expect("gray node is on the in-progress chain");
                        return Some(path.split_off(at));
                    }
                    _ => {}
                },
                None => {
                    let frame = stack.pop().expect("non-empty stack");
                    color[frame.node.index()] = BLACK;
                }
            }
        }
    }
    None
}

/// Kahn's algorithm with a min-heap keyed on insertion index, so ties
/// between unconstrained tasks always resolve to input order. Assumes the
/// graph is acyclic (checked beforehand).
fn stable_topological_order(graph: &DiGraph<String, ()>) -> Vec<String> {
    let mut indegree = vec![0usize; graph.node_count()];
    for ix in graph.node_indices() {
        indegree[ix.index()] = graph.neighbors_directed(ix, Direction::Incoming).count();
    }

    let mut ready: BinaryHeap<Reverse<usize>> = graph
        .node_indices()
        .filter(|ix| indegree[ix.index()] == 0)
        .map(|ix| Reverse(ix.index()))
        .collect();

    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(Reverse(index)) = ready.pop() {
        let node = NodeIndex::new(index);
        order.push(graph[node].clone());
        for succ in graph.neighbors(node) {
            indegree[succ.index()] -= 1;
            if indegree[succ.index()] == 0 {
                ready.push(Reverse(succ.index()));
            }
        }
    }

    debug_assert_eq!(order.len(), graph.node_count());
    order
}
