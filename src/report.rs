//! Human-readable rendering of already-computed results. Pure functions of
//! solver output and final network state; the algorithmic core never formats.

use crate::network::FlowNetwork;
use crate::solver::{AugmentingPath, CutArc};
use num_traits::NumAssign;
use std::fmt::{Display, Write};

/// One line per augmenting path: the vertex route and its bottleneck.
pub fn path_trace<Flow: Display>(paths: &[AugmentingPath<Flow>]) -> String {
    let mut out = String::new();
    for (i, path) in paths.iter().enumerate() {
        let route = path.vertices.iter().map(usize::to_string).collect::<Vec<_>>().join(" -> ");
        let _ = writeln!(out, "path {}: {} (bottleneck {})", i + 1, route, path.bottleneck);
    }
    out
}

/// One line per original arc that carries flow.
pub fn flow_summary<Flow: Display>(arc_flows: &[(usize, usize, Flow)]) -> String {
    let mut out = String::new();
    for (from, to, flow) in arc_flows {
        let _ = writeln!(out, "{} -> {}: {}", from, to, flow);
    }
    out
}

/// The cut arcs with their original capacities and the capacity total.
pub fn cut_summary<Flow>(cut: &[CutArc<Flow>]) -> String
where
    Flow: NumAssign + Ord + Copy + Display,
{
    let mut out = String::new();
    let mut total = Flow::zero();
    for arc in cut {
        total += arc.capacity;
        let _ = writeln!(out, "{} -> {}: {}", arc.from, arc.to, arc.capacity);
    }
    let _ = writeln!(out, "cut capacity: {}", total);
    out
}

/// Column-aligned dump of the residual matrix, row = from, column = to.
pub fn residual_matrix<Flow>(network: &FlowNetwork<Flow>) -> String
where
    Flow: NumAssign + Ord + Copy + Display,
{
    let n = network.num_vertices();
    let cells: Vec<Vec<String>> = (0..n)
        .map(|u| (0..n).map(|v| network.residual(u, v).to_string()).collect())
        .collect();
    let width = cells.iter().flatten().map(String::len).max().unwrap_or(1);

    let mut out = String::new();
    for row in &cells {
        for (v, cell) in row.iter().enumerate() {
            if v > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{:>width$}", cell);
        }
        out.push('\n');
    }
    out
}
