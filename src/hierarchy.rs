mod construction;
mod ranking;
mod shortcut_analysis;
mod vertex_cover;

pub use construction::EdgeHierarchyConstruction;
pub use ranking::{
    EdgeRanker, ShortcutCountingRoundsEdgeRanker, ShortcutCountingSortingRoundsEdgeRanker,
    ShortcutsHopsRoundsEdgeRanker,
};
pub use shortcut_analysis::{shortest_paths_lost, ShortestPathsLost, WitnessOracle};
pub use vertex_cover::BipartiteMinimumVertexCover;
