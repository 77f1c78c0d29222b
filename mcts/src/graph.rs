use std::fmt::Debug;

use petgraph::dot::{Config, Dot};
use petgraph::graph::NodeIndex;
use petgraph::{Directed, Graph};

use crate::mcts::SearchTree;

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub visits: u32,
    pub wins: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge<A> {
    pub count: u32,
    pub action: A,
}

/// Copies a search tree into a petgraph `Graph`.
///
/// Arena order is preserved, so `NodeIndex::new(id.index())` addresses the
/// node `id` of the tree. Edge counts are the child's visit count.
pub fn to_graph<A: Clone, P>(tree: &SearchTree<A, P>) -> Graph<GraphNode, GraphEdge<A>, Directed> {
    let mut graph = Graph::with_capacity(tree.len(), tree.len().saturating_sub(1));

    for (_, node) in tree.iter() {
        graph.add_node(GraphNode {
            visits: node.visits(),
            wins: node.wins(),
        });
    }

    for (id, node) in tree.iter() {
        for (action, child) in node.children() {
            graph.add_edge(
                NodeIndex::new(id.index()),
                NodeIndex::new(child.index()),
                GraphEdge {
                    count: tree.get(*child).visits(),
                    action: action.clone(),
                },
            );
        }
    }

    graph
}

/// Graphviz rendering of the tree, nodes labelled with `visits`/`wins` and edges with the action.
pub fn to_dot<A: Clone + Debug, P>(tree: &SearchTree<A, P>) -> String {
    let graph = to_graph(tree).map(
        |_, node| format!("{}/{:.2}", node.visits, node.wins),
        |_, edge| format!("{:?} ({})", edge.action, edge.count),
    );
    format!("{}", Dot::with_config(&graph, &[Config::GraphContentOnly]))
}
