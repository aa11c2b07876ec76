//! Dependency Graph service module (spec.md §4.2)
//!
//! Builds a directed graph of operation-to-operation precedence edges and
//! exposes cycle detection, topological ordering, and topological batch
//! layering (operations that share a layer have no precedence relationship
//! between them and may be dispatched in any order within it).

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::domain::entities::Operation;

/// Service for analyzing operation precedence graphs.
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    operation_indices: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            operation_indices: HashMap::new(),
        }
    }

    /// Builds the graph from a slice of operations: one node per operation,
    /// one edge per declared predecessor -> operation link.
    pub fn build(operations: &[&Operation]) -> Self {
        let mut dependency_graph = Self::new();
        for operation in operations {
            dependency_graph.add_operation(&operation.id);
        }
        for operation in operations {
            for predecessor_id in &operation.predecessors {
                dependency_graph.add_edge(predecessor_id, &operation.id);
            }
        }
        dependency_graph
    }

    fn add_operation(&mut self, operation_id: &str) {
        if !self.operation_indices.contains_key(operation_id) {
            let index = self.graph.add_node(operation_id.to_string());
            self.operation_indices.insert(operation_id.to_string(), index);
        }
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        self.add_operation(from);
        self.add_operation(to);
        let from_index = self.operation_indices[from];
        let to_index = self.operation_indices[to];
        self.graph.add_edge(from_index, to_index, ());
    }

    /// Operation ids in topological order, or `Err` listing ids involved in a
    /// cycle (spec.md §7 tier 2: cycles are reported, not fatal).
    pub fn topological_order(&self) -> Result<Vec<String>, Vec<String>> {
        match toposort(&self.graph, None) {
            Ok(sorted) => Ok(sorted.into_iter().map(|index| self.graph[index].clone()).collect()),
            Err(_) => Err(self.find_cycle_members()),
        }
    }

    pub fn has_cycle(&self) -> bool {
        toposort(&self.graph, None).is_err()
    }

    /// Three-color DFS identifying every node that lies on some cycle.
    fn find_cycle_members(&self) -> Vec<String> {
        #[derive(Clone, Copy, PartialEq)]
        enum Color {
            White,
            Gray,
            Black,
        }

        let mut color: HashMap<NodeIndex, Color> = self.graph.node_indices().map(|n| (n, Color::White)).collect();
        let mut cyclic = HashSet::new();

        fn visit(
            graph: &DiGraph<String, ()>,
            node: NodeIndex,
            color: &mut HashMap<NodeIndex, Color>,
            stack: &mut Vec<NodeIndex>,
            cyclic: &mut HashSet<NodeIndex>,
        ) {
            color.insert(node, Color::Gray);
            stack.push(node);
            for edge in graph.edges_directed(node, petgraph::Direction::Outgoing) {
                let target = edge.target();
                match color.get(&target).copied().unwrap_or(Color::White) {
                    Color::White => visit(graph, target, color, stack, cyclic),
                    Color::Gray => {
                        if let Some(position) = stack.iter().position(|n| *n == target) {
                            cyclic.extend(stack[position..].iter().copied());
                        }
                    }
                    Color::Black => {}
                }
            }
            stack.pop();
            color.insert(node, Color::Black);
        }

        let mut stack = Vec::new();
        for node in self.graph.node_indices() {
            if color[&node] == Color::White {
                visit(&self.graph, node, &mut color, &mut stack, &mut cyclic);
            }
        }

        cyclic.into_iter().map(|n| self.graph[n].clone()).collect()
    }

    /// Topological batches: layer 0 is every operation with no predecessor in
    /// the graph, layer N+1 is every operation whose predecessors are all
    /// resolved by layer N. Operations on a cycle never resolve and are
    /// omitted from every batch (spec.md §4.2 "unresolvable operations are
    /// excluded from batching, not fatal").
    pub fn topological_batches(&self) -> Vec<Vec<String>> {
        let mut remaining_in_degree: HashMap<NodeIndex, usize> = self
            .graph
            .node_indices()
            .map(|n| (n, self.graph.edges_directed(n, petgraph::Direction::Incoming).count()))
            .collect();
        let mut resolved: HashSet<NodeIndex> = HashSet::new();
        let mut batches = Vec::new();

        loop {
            let ready: Vec<NodeIndex> = remaining_in_degree
                .iter()
                .filter(|(node, &degree)| degree == 0 && !resolved.contains(*node))
                .map(|(node, _)| *node)
                .collect();
            if ready.is_empty() {
                break;
            }
            for &node in &ready {
                resolved.insert(node);
                for edge in self.graph.edges_directed(node, petgraph::Direction::Outgoing) {
                    if let Some(degree) = remaining_in_degree.get_mut(&edge.target()) {
                        *degree = degree.saturating_sub(1);
                    }
                }
            }
            let mut batch: Vec<String> = ready.into_iter().map(|n| self.graph[n].clone()).collect();
            batch.sort();
            batches.push(batch);
        }

        batches
    }

    /// True iff every predecessor id an operation declares actually resolves
    /// to a node in this graph (spec.md invariant: dangling predecessor ids
    /// are a validation error, not a silent no-op).
    pub fn all_predecessors_known(&self, operations: &[&Operation]) -> Result<(), Vec<String>> {
        let known: HashSet<&str> = operations.iter().map(|o| o.id.as_str()).collect();
        let mut dangling = Vec::new();
        for operation in operations {
            for predecessor_id in &operation.predecessors {
                if !known.contains(predecessor_id.as_str()) {
                    dangling.push(predecessor_id.clone());
                }
            }
        }
        if dangling.is_empty() {
            Ok(())
        } else {
            Err(dangling)
        }
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(id: &str, predecessors: &[&str]) -> Operation {
        let mut operation = Operation::new(id.into(), "WO-1".into(), 10, "FAM".into(), 5.0);
        operation.predecessors = predecessors.iter().map(|s| s.to_string()).collect();
        operation
    }

    #[test]
    fn linear_chain_sorts_topologically() {
        let a = op("A", &[]);
        let b = op("B", &["A"]);
        let c = op("C", &["B"]);
        let ops = vec![&a, &b, &c];
        let graph = DependencyGraph::build(&ops);
        let order = graph.topological_order().unwrap();
        assert_eq!(order, vec!["A", "B", "C"]);
    }

    #[test]
    fn cycle_is_detected_and_members_reported() {
        let a = op("A", &["C"]);
        let b = op("B", &["A"]);
        let c = op("C", &["B"]);
        let ops = vec![&a, &b, &c];
        let graph = DependencyGraph::build(&ops);
        assert!(graph.has_cycle());
        let mut members = graph.topological_order().unwrap_err();
        members.sort();
        assert_eq!(members, vec!["A", "B", "C"]);
    }

    #[test]
    fn batches_group_independent_operations() {
        let a = op("A", &[]);
        let b = op("B", &[]);
        let c = op("C", &["A", "B"]);
        let ops = vec![&a, &b, &c];
        let graph = DependencyGraph::build(&ops);
        let batches = graph.topological_batches();
        assert_eq!(batches, vec![vec!["A".to_string(), "B".to_string()], vec!["C".to_string()]]);
    }

    #[test]
    fn dangling_predecessor_is_reported() {
        let a = op("A", &["GHOST"]);
        let ops = vec![&a];
        let graph = DependencyGraph::build(&ops);
        assert_eq!(graph.all_predecessors_known(&ops), Err(vec!["GHOST".to_string()]));
    }
}
