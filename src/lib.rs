//! # edge hierarchies
//!
//! `edge_hierarchies` computes exact shortest-path distances in large
//! directed, positively weighted graphs by precomputing an edge hierarchy:
//! an assignment of integer ranks to the edges of an augmented graph such
//! that every shortest path is representable as a walk whose edge ranks
//! first strictly increase and then strictly decrease. Point-to-point
//! queries then run a bidirectional search that only follows edges
//! consistent with this up-down discipline.

/// This module regroups the graph structures carrying per-edge weights and
/// hierarchy ranks, with a dynamic builder phase and a frozen query phase
pub mod graph;

/// Encompasses the low-level structures supporting construction and queries
pub mod data_structure;

/// This module collects the edge hierarchy construction algorithms
pub mod hierarchy;

/// Regroups the shortest-path query algorithms
pub mod query;

/// Regroups a collection of useful objects
pub mod utils;
