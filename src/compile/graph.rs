//! Link graph over note identities.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::domain::{BrokenLink, NotePath, Reference};

/// Forward links and backlinks of one note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Adjacency {
    forward: Vec<NotePath>,
    backlinks: Vec<NotePath>,
}

impl Adjacency {
    /// Notes this note links to, in reference order.
    pub fn forward(&self) -> &[NotePath] {
        &self.forward
    }

    /// Notes linking to this note, ordered by path.
    pub fn backlinks(&self) -> &[NotePath] {
        &self.backlinks
    }
}

/// Directed graph of links between notes.
///
/// Every forward edge `A -> B` has exactly one matching backlink `B <- A`.
/// Cycles and self-loops are allowed; nothing here walks the graph, so they
/// need no special treatment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LinkGraph {
    nodes: BTreeMap<NotePath, Adjacency>,
}

/// Output of building the graph: the graph plus references that did not resolve.
#[derive(Debug, Clone, Default)]
pub struct GraphBuild {
    pub graph: LinkGraph,
    pub broken_links: Vec<BrokenLink>,
}

impl LinkGraph {
    /// Builds the graph from every note's candidate references.
    ///
    /// The full note set must be supplied: a reference resolves only if its
    /// target is among the given notes. Unresolved references become broken
    /// links attributed to the referencing note, ordered by source path and
    /// then reference order.
    pub fn build<'a, I>(notes: I) -> GraphBuild
    where
        I: IntoIterator<Item = (&'a NotePath, &'a [Reference])>,
    {
        let mut entries: Vec<(&NotePath, &[Reference])> = notes.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut nodes: BTreeMap<NotePath, Adjacency> = entries
            .iter()
            .map(|(path, _)| ((*path).clone(), Adjacency::default()))
            .collect();

        // Pass 1: forward edges.
        let mut broken_links = Vec::new();
        for (source, references) in &entries {
            let mut forward: Vec<NotePath> = Vec::new();
            for reference in references.iter() {
                match reference.target() {
                    Some(target) if nodes.contains_key(target) => {
                        if !forward.contains(target) {
                            forward.push(target.clone());
                        }
                    }
                    _ => broken_links.push(BrokenLink::new(
                        (*source).clone(),
                        reference.raw_target(),
                    )),
                }
            }
            if let Some(node) = nodes.get_mut(*source) {
                node.forward = forward;
            }
        }

        // Pass 2: transpose. Sources are visited in ascending order, so each
        // backlink list comes out sorted.
        let edges: Vec<(NotePath, NotePath)> = nodes
            .iter()
            .flat_map(|(source, node)| {
                node.forward
                    .iter()
                    .map(move |target| (source.clone(), target.clone()))
            })
            .collect();
        for (source, target) in edges {
            if let Some(node) = nodes.get_mut(&target) {
                node.backlinks.push(source);
            }
        }

        let graph = LinkGraph { nodes };
        debug!(
            notes = graph.len(),
            edges = graph.edge_count(),
            broken = broken_links.len(),
            "built link graph"
        );

        GraphBuild {
            graph,
            broken_links,
        }
    }

    /// Returns the number of notes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no notes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if the note is part of the graph.
    pub fn contains(&self, path: &NotePath) -> bool {
        self.nodes.contains_key(path)
    }

    /// Returns the adjacency of a note.
    pub fn get(&self, path: &NotePath) -> Option<&Adjacency> {
        self.nodes.get(path)
    }

    /// Notes the given note links to; empty for unknown notes.
    pub fn forward(&self, path: &NotePath) -> &[NotePath] {
        self.nodes.get(path).map_or(&[], |node| node.forward())
    }

    /// Notes linking to the given note; empty for unknown notes.
    pub fn backlinks(&self, path: &NotePath) -> &[NotePath] {
        self.nodes.get(path).map_or(&[], |node| node.backlinks())
    }

    /// Total number of forward edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.forward.len()).sum()
    }

    /// Total number of backlink entries.
    pub fn backlink_count(&self) -> usize {
        self.nodes.values().map(|n| n.backlinks.len()).sum()
    }

    /// Iterates over all forward edges as `(source, target)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&NotePath, &NotePath)> {
        self.nodes
            .iter()
            .flat_map(|(source, node)| node.forward.iter().map(move |target| (source, target)))
    }

    /// Iterates over notes and their adjacency in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&NotePath, &Adjacency)> {
        self.nodes.iter()
    }
}
