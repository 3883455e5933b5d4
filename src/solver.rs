use crate::error::FlowError;
use crate::network::FlowNetwork;
use num_traits::NumAssign;
use std::collections::VecDeque;
use std::fmt::Debug;
use tracing::{debug, trace};

const NO_PARENT: usize = usize::MAX;

/// One augmentation of the last [`FlowSolver::max_flow`] run: the vertex
/// sequence from source to sink and the flow pushed along it.
#[derive(PartialEq, Debug, Clone)]
pub struct AugmentingPath<Flow> {
    pub vertices: Vec<usize>,
    pub bottleneck: Flow,
}

/// An original arc crossing the minimum cut, with the capacity it was declared
/// with.
#[derive(PartialEq, Debug, Clone)]
pub struct CutArc<Flow> {
    pub from: usize,
    pub to: usize,
    pub capacity: Flow,
}

/// Edmonds-Karp maximum flow and the minimum cut derived from the saturated
/// residual graph. Holds the per-search scratch and the recorded augmentation
/// trace; reusable across networks.
#[derive(Default)]
pub struct FlowSolver<Flow> {
    parent: Vec<usize>,
    queue: VecDeque<usize>,
    paths: Vec<AugmentingPath<Flow>>,
}

impl<Flow> FlowSolver<Flow>
where
    Flow: NumAssign + Ord + Copy + Debug,
{
    /// Drains augmenting paths from `source` to `sink` until none remain and
    /// returns the total flow pushed. Mutates the network's residual matrix;
    /// a second run on the same network returns zero.
    pub fn max_flow(&mut self, network: &mut FlowNetwork<Flow>, source: usize, sink: usize) -> Result<Flow, FlowError> {
        network.check_vertex(source)?;
        network.check_vertex(sink)?;
        if source == sink {
            return Err(FlowError::SourceIsSink { vertex: source });
        }

        self.paths.clear();
        let mut total = Flow::zero();
        while self.has_augmenting_path(network, source, sink) {
            // walk the parent chain back from the sink
            let mut chain = vec![sink];
            let mut v = sink;
            while v != source {
                v = self.parent[v];
                chain.push(v);
            }
            chain.reverse();

            let mut bottleneck = network.residual(chain[0], chain[1]);
            for pair in chain.windows(2) {
                bottleneck = bottleneck.min(network.residual(pair[0], pair[1]));
            }

            for pair in chain.windows(2) {
                network.push(pair[0], pair[1], bottleneck);
            }

            total += bottleneck;
            debug!(path = ?chain, bottleneck = ?bottleneck, "augmented");
            self.paths.push(AugmentingPath { vertices: chain, bottleneck });
        }

        debug!(total = ?total, augmentations = self.paths.len(), "network saturated");
        Ok(total)
    }

    /// Minimum cut separating `source` from every vertex unreachable in the
    /// final residual graph. Caller contract: run only after [`max_flow`] has
    /// saturated the network, otherwise the cut capacities need not sum to the
    /// true minimum.
    ///
    /// [`max_flow`]: FlowSolver::max_flow
    pub fn min_cut(&mut self, network: &FlowNetwork<Flow>, source: usize) -> Result<Vec<CutArc<Flow>>, FlowError> {
        network.check_vertex(source)?;

        // reachability over positive residuals, push-back arcs included
        let mut reachable = vec![false; network.num_vertices()];
        reachable[source] = true;
        self.queue.clear();
        self.queue.push_back(source);
        while let Some(v) = self.queue.pop_front() {
            for arc in network.successors(v) {
                if !reachable[arc.to] && network.residual(v, arc.to) > Flow::zero() {
                    reachable[arc.to] = true;
                    self.queue.push_back(arc.to);
                }
            }
        }

        // original arcs crossing the reachability boundary
        let mut cut = Vec::new();
        for u in 0..network.num_vertices() {
            if !reachable[u] {
                continue;
            }
            for arc in network.successors(u) {
                let capacity = network.capacity(u, arc.to);
                if !reachable[arc.to] && capacity > Flow::zero() {
                    cut.push(CutArc { from: u, to: arc.to, capacity });
                }
            }
        }

        debug!(cut_arcs = cut.len(), "minimum cut extracted");
        Ok(cut)
    }

    /// Augmentation trace of the last [`FlowSolver::max_flow`] run.
    pub fn augmenting_paths(&self) -> &[AugmentingPath<Flow>] {
        &self.paths
    }

    /// Net flow carried per original arc, positive entries only.
    pub fn arc_flows(&self, network: &FlowNetwork<Flow>) -> Vec<(usize, usize, Flow)> {
        let mut flows = Vec::new();
        for u in 0..network.num_vertices() {
            for arc in network.successors(u) {
                let (capacity, residual) = (network.capacity(u, arc.to), network.residual(u, arc.to));
                if residual < capacity {
                    flows.push((u, arc.to, capacity - residual));
                }
            }
        }
        flows
    }

    // Breadth-first search over positive-residual arcs. Fewest-edges paths,
    // ties broken by adjacency order; stops as soon as the sink is parented.
    fn has_augmenting_path(&mut self, network: &FlowNetwork<Flow>, source: usize, sink: usize) -> bool {
        self.parent.clear();
        self.parent.resize(network.num_vertices(), NO_PARENT);
        self.queue.clear();
        self.queue.push_back(source);

        while let Some(v) = self.queue.pop_front() {
            if self.parent[sink] != NO_PARENT {
                break;
            }
            for arc in network.successors(v) {
                let w = arc.to;
                if self.parent[w] == NO_PARENT && w != source && network.residual(v, w) > Flow::zero() {
                    self.parent[w] = v;
                    trace!(vertex = w, parent = v, "discovered");
                    self.queue.push_back(w);
                }
            }
        }

        self.parent[sink] != NO_PARENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn build(num_vertices: usize, arcs: &[(usize, usize, i32)]) -> FlowNetwork<i32> {
        let mut network = FlowNetwork::new("test", num_vertices);
        for &(from, to, capacity) in arcs {
            network.add_arc(from, to, capacity).unwrap();
        }
        network
    }

    fn slack_is_conserved(network: &FlowNetwork<i32>) -> bool {
        let n = network.num_vertices();
        (0..n).all(|u| {
            (0..n).all(|v| {
                network.residual(u, v) + network.residual(v, u) == network.capacity(u, v) + network.capacity(v, u)
            })
        })
    }

    #[rstest]
    #[case::two_routes(4, &[(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3)], 0, 3, 4)]
    #[case::cross_arc(4, &[(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3), (1, 2, 1)], 0, 3, 5)]
    #[case::textbook(6, &[(0, 1, 16), (0, 2, 13), (1, 2, 10), (1, 3, 12), (2, 1, 4), (2, 4, 14), (3, 2, 9), (3, 5, 20), (4, 3, 7), (4, 5, 4)], 0, 5, 23)]
    #[case::single_arc(2, &[(0, 1, 5)], 0, 1, 5)]
    fn max_flow_matches_min_cut(
        #[case] num_vertices: usize,
        #[case] arcs: &[(usize, usize, i32)],
        #[case] source: usize,
        #[case] sink: usize,
        #[case] expected: i32,
    ) {
        let mut network = build(num_vertices, arcs);
        let mut solver = FlowSolver::default();

        let flow = solver.max_flow(&mut network, source, sink).unwrap();
        assert_eq!(flow, expected);

        // never more than the capacity leaving the source
        let out_capacity: i32 = (0..num_vertices).map(|v| network.capacity(source, v)).sum();
        assert!(flow >= 0 && flow <= out_capacity);

        assert!(slack_is_conserved(&network));

        // duality: the cut capacities sum to the flow
        let cut = solver.min_cut(&network, source).unwrap();
        let cut_capacity: i32 = cut.iter().map(|arc| arc.capacity).sum();
        assert_eq!(cut_capacity, flow);
    }

    #[test]
    fn single_arc_cut_is_that_arc() {
        let mut network = build(2, &[(0, 1, 5)]);
        let mut solver = FlowSolver::default();

        assert_eq!(solver.max_flow(&mut network, 0, 1).unwrap(), 5);
        assert_eq!(solver.min_cut(&network, 0).unwrap(), vec![CutArc { from: 0, to: 1, capacity: 5 }]);
    }

    #[test]
    fn second_run_finds_no_flow() {
        let mut network = build(6, &[(0, 1, 16), (0, 2, 13), (1, 2, 10), (1, 3, 12), (2, 1, 4), (2, 4, 14), (3, 2, 9), (3, 5, 20), (4, 3, 7), (4, 5, 4)]);
        let mut solver = FlowSolver::default();

        assert_eq!(solver.max_flow(&mut network, 0, 5).unwrap(), 23);
        assert_eq!(solver.max_flow(&mut network, 0, 5).unwrap(), 0);
        assert!(solver.augmenting_paths().is_empty());
    }

    #[test]
    fn disconnected_sink_yields_zero_flow_and_empty_cut() {
        let mut network = build(3, &[(0, 1, 5)]);
        let mut solver = FlowSolver::default();

        assert_eq!(solver.max_flow(&mut network, 0, 2).unwrap(), 0);
        assert!(solver.min_cut(&network, 0).unwrap().is_empty());
    }

    #[test]
    fn rejects_source_equal_to_sink() {
        let mut network = build(2, &[(0, 1, 5)]);
        let mut solver = FlowSolver::default();

        assert_eq!(solver.max_flow(&mut network, 1, 1), Err(FlowError::SourceIsSink { vertex: 1 }));
        // rejection leaves the residuals untouched
        assert_eq!(network.residual(0, 1), 5);
    }

    #[test]
    fn rejects_out_of_range_endpoints() {
        let mut network = build(2, &[(0, 1, 5)]);
        let mut solver = FlowSolver::default();

        assert_eq!(solver.max_flow(&mut network, 0, 7), Err(FlowError::VertexOutOfRange { vertex: 7, num_vertices: 2 }));
        assert_eq!(solver.min_cut(&network, 7), Err(FlowError::VertexOutOfRange { vertex: 7, num_vertices: 2 }));
    }

    #[test]
    fn bfs_prefers_the_shortest_route() {
        let mut network = build(4, &[(0, 1, 1), (1, 2, 1), (2, 3, 1), (0, 3, 1)]);
        let mut solver = FlowSolver::default();

        assert_eq!(solver.max_flow(&mut network, 0, 3).unwrap(), 2);
        assert_eq!(solver.augmenting_paths()[0].vertices, vec![0, 3]);
    }

    #[test]
    fn recorded_bottlenecks_sum_to_the_total() {
        let mut network = build(4, &[(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3), (1, 2, 1)]);
        let mut solver = FlowSolver::default();

        let flow = solver.max_flow(&mut network, 0, 3).unwrap();
        let pushed: i32 = solver.augmenting_paths().iter().map(|p| p.bottleneck).sum();
        assert_eq!(pushed, flow);

        for path in solver.augmenting_paths() {
            assert_eq!(*path.vertices.first().unwrap(), 0);
            assert_eq!(*path.vertices.last().unwrap(), 3);
            assert!(path.bottleneck > 0);
        }
    }

    #[test]
    fn arc_flows_report_net_usage_only() {
        let mut network = build(2, &[(0, 1, 5)]);
        let mut solver = FlowSolver::default();

        solver.max_flow(&mut network, 0, 1).unwrap();
        // the push-back credit on 1 -> 0 is not a flow
        assert_eq!(solver.arc_flows(&network), vec![(0, 1, 5)]);
    }

    #[test]
    fn arc_flows_balance_at_interior_vertices() {
        let mut network = build(4, &[(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3), (1, 2, 1)]);
        let mut solver = FlowSolver::default();

        let flow = solver.max_flow(&mut network, 0, 3).unwrap();
        let flows = solver.arc_flows(&network);

        for vertex in 1..=2 {
            let inbound: i32 = flows.iter().filter(|(_, to, _)| *to == vertex).map(|(_, _, f)| f).sum();
            let outbound: i32 = flows.iter().filter(|(from, _, _)| *from == vertex).map(|(_, _, f)| f).sum();
            assert_eq!(inbound, outbound);
        }

        let into_sink: i32 = flows.iter().filter(|(_, to, _)| *to == 3).map(|(_, _, f)| f).sum();
        assert_eq!(into_sink, flow);
    }
}
