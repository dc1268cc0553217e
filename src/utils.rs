mod input_output;

pub use input_output::{read_edge_hierarchy, read_graph_dimacs, read_lines, write_edge_hierarchy};
