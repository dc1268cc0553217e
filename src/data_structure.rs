mod array_set;
mod edge_id_map;
mod index_min_pq;
mod timestamp_flags;

pub use array_set::ArraySet;
pub use edge_id_map::EdgeIdMap;
pub use index_min_pq::IndexMinPriorityQueue;
pub use timestamp_flags::TimestampFlags;
