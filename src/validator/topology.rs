use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

use crate::workflow::WorkflowDefinition;

/// Adjacency structure and topological order for a workflow graph.
///
/// Edges referencing unknown nodes are ignored, matching the compiler's
/// tolerance. Hash maps do not iterate deterministically, so the Kahn queue
/// is seeded in sorted id order to keep the topological order (and therefore
/// validation output) stable across runs.
pub(super) struct Topology {
    adjacency: AHashMap<String, Vec<String>>,
    reverse: AHashMap<String, Vec<String>>,
    order: Vec<String>,
    order_index: AHashMap<String, usize>,
    node_count: usize,
}

impl Topology {
    pub(super) fn build(workflow: &WorkflowDefinition) -> Self {
        let mut adjacency: AHashMap<String, Vec<String>> = AHashMap::new();
        let mut reverse: AHashMap<String, Vec<String>> = AHashMap::new();
        let mut in_degree: AHashMap<String, usize> = AHashMap::new();

        for node in &workflow.nodes {
            adjacency.entry(node.id.clone()).or_default();
            reverse.entry(node.id.clone()).or_default();
            in_degree.entry(node.id.clone()).or_insert(0);
        }

        for edge in &workflow.edges {
            if !adjacency.contains_key(&edge.source) || !adjacency.contains_key(&edge.target) {
                continue;
            }
            if let Some(out) = adjacency.get_mut(&edge.source) {
                out.push(edge.target.clone());
            }
            if let Some(incoming) = reverse.get_mut(&edge.target) {
                incoming.push(edge.source.clone());
            }
            if let Some(degree) = in_degree.get_mut(&edge.target) {
                *degree += 1;
            }
        }

        // Kahn's algorithm.
        let mut queue: Vec<String> = in_degree
            .iter()
            .filter(|(_, deg)| **deg == 0)
            .map(|(id, _)| id.clone())
            .sorted()
            .collect();
        let mut order = Vec::with_capacity(adjacency.len());
        let mut head = 0;
        while head < queue.len() {
            let u = queue[head].clone();
            head += 1;
            order.push(u.clone());
            for v in adjacency.get(&u).map(Vec::as_slice).unwrap_or_default() {
                if let Some(degree) = in_degree.get_mut(v) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push(v.clone());
                    }
                }
            }
        }

        let order_index = order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        Self {
            node_count: adjacency.len(),
            adjacency,
            reverse,
            order,
            order_index,
        }
    }

    /// A cycle exists iff Kahn's algorithm could not order every node.
    pub(super) fn has_cycle(&self) -> bool {
        self.order.len() < self.node_count
    }

    /// Position of a node in the topological order, if it was ordered at all
    /// (nodes on a cycle are not).
    pub(super) fn position(&self, id: &str) -> Option<usize> {
        self.order_index.get(id).copied()
    }

    /// Every node reachable from `start` by following edges forward.
    pub(super) fn reachable_from(&self, start: &str) -> AHashSet<String> {
        Self::flood(&self.adjacency, std::iter::once(start))
    }

    /// Every node that can reach at least one of `seeds`, computed as a
    /// multi-source flood over the reversed edges.
    pub(super) fn reaching<'a>(&self, seeds: impl Iterator<Item = &'a str>) -> AHashSet<String> {
        Self::flood(&self.reverse, seeds)
    }

    fn flood<'a>(
        adjacency: &AHashMap<String, Vec<String>>,
        seeds: impl Iterator<Item = &'a str>,
    ) -> AHashSet<String> {
        let mut visited = AHashSet::new();
        let mut stack: Vec<String> = seeds.map(str::to_string).collect();
        while let Some(u) = stack.pop() {
            if visited.insert(u.clone()) {
                if let Some(neighbors) = adjacency.get(&u) {
                    stack.extend(neighbors.iter().cloned());
                }
            }
        }
        visited
    }
}
