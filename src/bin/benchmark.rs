//! Benchmark front-end: reads a DIMACS road network, builds (or reloads)
//! its edge hierarchy, freezes the graph in depth-first order and
//! cross-checks random or Dijkstra-rank queries against a plain Dijkstra
//! oracle. The process exit code is the number of query mismatches.

use clap::Parser;
use edge_hierarchies::graph::{EdgeHierarchyGraph, EdgeWeight, NodeId, QueryGraph};
use edge_hierarchies::hierarchy::{EdgeHierarchyConstruction, ShortcutCountingRoundsEdgeRanker};
use edge_hierarchies::query::{dijkstra_rank_queries, Dijkstra, FrozenQuery};
use edge_hierarchies::utils::{read_edge_hierarchy, read_graph_dimacs, write_edge_hierarchy};
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(about = "Benchmark program for edge hierarchies")]
struct Args {
    /// Filename of the DIMACS graph to benchmark on
    filename: PathBuf,

    /// Run N queries
    #[arg(long, default_value_t = 1000)]
    queries: usize,

    /// The seed to use for the prng
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Model turn costs on the edge graph of the input
    #[arg(long)]
    turn_costs: bool,

    /// Penalty added to u-turn arcs of the turn cost graph
    #[arg(long, default_value_t = 100)]
    u_turn_cost: EdgeWeight,

    /// Generate queries by Dijkstra rank instead of uniformly at random
    #[arg(long)]
    dijkstra_rank: bool,

    /// Enable forward stalling in the queries
    #[arg(long)]
    forward_stalling: bool,

    /// Enable backward stalling in the queries
    #[arg(long)]
    backward_stalling: bool,

    /// Share of each reverse adjacency the backward stall scan inspects
    #[arg(long, default_value_t = 100)]
    stall_percent: usize,

    /// Renumber vertices in depth-first pre-order instead of post-order
    #[arg(long)]
    dfs_pre_order: bool,

    /// Reconstruct the hierarchy even when a persisted one exists
    #[arg(long)]
    rebuild: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let mut graph = read_graph_dimacs(&args.filename).unwrap_or_else(|error| {
        eprintln!("could not read {}: {error}", args.filename.display());
        std::process::exit(1);
    });
    info!(
        "reading input graph took {} ms",
        start.elapsed().as_millis()
    );
    info!(
        "input graph has {} vertices and {} edges",
        graph.nb_vertices(),
        graph.nb_edges()
    );

    if args.turn_costs {
        let start = Instant::now();
        graph = graph.turn_cost_graph(args.u_turn_cost);
        info!("adding turn costs took {} ms", start.elapsed().as_millis());
        info!(
            "turn cost graph has {} vertices and {} edges",
            graph.nb_vertices(),
            graph.nb_edges()
        );
    }

    // oracle distances are computed on the graph before augmentation
    let original_graph = graph.clone();

    let suffix = if args.turn_costs { ".turncost" } else { "" };
    let hierarchy_path = PathBuf::from(format!("{}{suffix}.eh", args.filename.display()));
    if hierarchy_path.is_file() && !args.rebuild {
        graph = read_edge_hierarchy(&hierarchy_path).unwrap_or_else(|error| {
            eprintln!(
                "could not read {}: {error}",
                hierarchy_path.display()
            );
            std::process::exit(1);
        });
        info!("reloaded hierarchy from {}", hierarchy_path.display());
    } else {
        let start = Instant::now();
        let ranker = ShortcutCountingRoundsEdgeRanker::init(&graph);
        let mut construction = EdgeHierarchyConstruction::init(&graph, ranker);
        construction.run(&mut graph);
        info!("construction took {} ms", start.elapsed().as_millis());
        info!(
            "edge hierarchy graph has {} vertices and {} edges",
            graph.nb_vertices(),
            graph.nb_edges()
        );
        if let Err(error) = write_edge_hierarchy(&hierarchy_path, &graph) {
            eprintln!(
                "could not write {}: {error}",
                hierarchy_path.display()
            );
        }
    }

    graph.sort_edges();
    let frozen = graph.to_query_graph(args.dfs_pre_order);

    let queries = generate_queries(&args, &original_graph);
    info!("generated {} queries", queries.len());

    let mismatches = match (args.forward_stalling, args.backward_stalling) {
        (false, false) => run_queries::<false, false>(&args, &frozen, &queries),
        (false, true) => run_queries::<false, true>(&args, &frozen, &queries),
        (true, false) => run_queries::<true, false>(&args, &frozen, &queries),
        (true, true) => run_queries::<true, true>(&args, &frozen, &queries),
    };
    std::process::exit(mismatches);
}

// (source, target, oracle distance) triples
fn generate_queries(
    args: &Args,
    graph: &EdgeHierarchyGraph,
) -> Vec<(NodeId, NodeId, EdgeWeight)> {
    if args.dijkstra_rank {
        return dijkstra_rank_queries(graph, args.queries, args.seed)
            .into_iter()
            .map(|query| (query.source, query.target, query.distance))
            .collect();
    }
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut oracle = Dijkstra::init(graph.nb_vertices());
    (0..args.queries)
        .map(|_| {
            let s = rng.gen_range(0..graph.nb_vertices()) as NodeId;
            let t = rng.gen_range(0..graph.nb_vertices()) as NodeId;
            (s, t, oracle.distance(graph, s, t))
        })
        .collect()
}

fn run_queries<const FWD_STALL: bool, const BWD_STALL: bool>(
    args: &Args,
    frozen: &QueryGraph,
    queries: &[(NodeId, NodeId, EdgeWeight)],
) -> i32 {
    let mut query = FrozenQuery::<FWD_STALL, BWD_STALL>::with_stall_percent(
        frozen.nb_vertices(),
        args.stall_percent,
    );

    let mut mismatches = 0;
    for &(s, t, expected) in queries {
        let distance = query.distance(frozen, s, t);
        if distance != expected {
            eprintln!("wrong distance for {s} and {t}: {distance} (should be {expected})");
            mismatches += 1;
        }
    }
    info!("done checking, measuring time");

    query.reset_counters();
    let start = Instant::now();
    for &(s, t, _) in queries {
        query.distance(frozen, s, t);
    }
    let elapsed = start.elapsed();
    if !queries.is_empty() {
        info!(
            "average query time : {} us, {} vertices settled, {} edges relaxed",
            elapsed.as_micros() / queries.len() as u128,
            query.nb_vertices_settled / queries.len(),
            query.nb_edges_relaxed / queries.len()
        );
    }
    mismatches
}
