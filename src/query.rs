mod dijkstra;
mod frozen_query;
mod hierarchy_query;

pub use dijkstra::{dijkstra_rank_queries, Dijkstra, DijkstraRankQuery};
pub use frozen_query::FrozenQuery;
pub use hierarchy_query::EdgeHierarchyQuery;
