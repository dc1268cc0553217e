use crate::graph::{EdgeHierarchyGraph, EdgeRank, EdgeWeight, NodeId};
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

pub fn read_lines<P>(filename: P) -> io::Result<io::Lines<io::BufReader<File>>>
where
    P: AsRef<Path>,
{
    // The output is wrapped in a Result to allow matching on errors
    // Returns an Iterator to the Reader of the lines of the file.
    let file = File::open(filename)?;
    Ok(io::BufReader::new(file).lines())
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

fn parse_token<T: FromStr>(
    tokens: &mut std::str::SplitWhitespace,
    nb_line: usize,
    what: &str,
) -> io::Result<T> {
    tokens
        .next()
        .and_then(|token| token.parse::<T>().ok())
        .ok_or_else(|| invalid_data(format!("line {}: bad or missing {what}", nb_line + 1)))
}

/// Reads a graph in DIMACS shortest-path format: a `p sp N M` line declares
/// the vertex and edge counts, each `a u v w` line declares a directed arc
/// with 1-based endpoints, every other line is ignored. Duplicate arcs
/// after the first and self-loops are dropped. A malformed `p` or `a` line
/// fails the whole load and no partial graph is returned.
pub fn read_graph_dimacs<P: AsRef<Path>>(filename: P) -> io::Result<EdgeHierarchyGraph> {
    let mut graph: Option<EdgeHierarchyGraph> = None;
    for (nb_line, line) in read_lines(filename)?.enumerate() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("p") => {
                if graph.is_some() {
                    return Err(invalid_data(format!(
                        "line {}: second problem line",
                        nb_line + 1
                    )));
                }
                let _sp: String = parse_token(&mut tokens, nb_line, "problem kind")?;
                let nb_vertices: usize = parse_token(&mut tokens, nb_line, "vertex count")?;
                let _nb_edges: usize = parse_token(&mut tokens, nb_line, "edge count")?;
                graph = Some(EdgeHierarchyGraph::init(nb_vertices));
            }
            Some("a") => {
                let graph = graph.as_mut().ok_or_else(|| {
                    invalid_data(format!("line {}: arc before problem line", nb_line + 1))
                })?;
                let u: usize = parse_token(&mut tokens, nb_line, "arc tail")?;
                let v: usize = parse_token(&mut tokens, nb_line, "arc head")?;
                let weight: EdgeWeight = parse_token(&mut tokens, nb_line, "arc weight")?;
                if u == 0 || v == 0 || u > graph.nb_vertices() || v > graph.nb_vertices() {
                    return Err(invalid_data(format!(
                        "line {}: arc endpoint out of range",
                        nb_line + 1
                    )));
                }
                let (u, v) = ((u - 1) as NodeId, (v - 1) as NodeId);
                if u != v && !graph.has_edge(u, v) {
                    graph.add_edge(u, v, weight);
                }
            }
            _ => {}
        }
    }
    graph.ok_or_else(|| invalid_data("no problem line in input".to_string()))
}

/// Writes a ranked graph as text: a first line `N M`, then one
/// `u v weight rank` line per edge with 0-based vertex numbers.
pub fn write_edge_hierarchy<P: AsRef<Path>>(
    filename: P,
    graph: &EdgeHierarchyGraph,
) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(filename)?);
    writeln!(out, "{} {}", graph.nb_vertices(), graph.nb_edges())?;
    for u in 0..graph.nb_vertices() {
        for edge in graph.out_edges(u as NodeId) {
            writeln!(out, "{} {} {} {}", u, edge.neighbor, edge.weight, edge.rank)?;
        }
    }
    out.flush()
}

/// Reads back a graph written by [`write_edge_hierarchy`] in a single
/// pass, skipping duplicate edges. A malformed line fails the whole load.
pub fn read_edge_hierarchy<P: AsRef<Path>>(filename: P) -> io::Result<EdgeHierarchyGraph> {
    let mut lines = read_lines(filename)?;
    let header = lines
        .next()
        .ok_or_else(|| invalid_data("empty edge hierarchy file".to_string()))??;
    let mut tokens = header.split_whitespace();
    let nb_vertices: usize = parse_token(&mut tokens, 0, "vertex count")?;
    let _nb_edges: usize = parse_token(&mut tokens, 0, "edge count")?;
    let mut graph = EdgeHierarchyGraph::init(nb_vertices);

    for (nb_line, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let u: NodeId = parse_token(&mut tokens, nb_line + 1, "edge tail")?;
        let v: NodeId = parse_token(&mut tokens, nb_line + 1, "edge head")?;
        let weight: EdgeWeight = parse_token(&mut tokens, nb_line + 1, "edge weight")?;
        let rank: EdgeRank = parse_token(&mut tokens, nb_line + 1, "edge rank")?;
        if !graph.has_edge(u, v) {
            graph.add_edge(u, v, weight);
            graph.set_edge_rank(u, v, rank);
        }
    }
    Ok(graph)
}
