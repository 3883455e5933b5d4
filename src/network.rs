use crate::error::FlowError;
use num_traits::NumAssign;
use std::fmt;

/// Directed capacitated arc descriptor. Immutable once added, except that
/// re-adding the same ordered pair overwrites its capacity.
#[derive(PartialEq, Debug, Clone)]
pub struct Arc<Flow> {
    pub from: usize,
    pub to: usize,
    pub capacity: Flow,
}

/// A flow network over vertices `0..num_vertices` with dense capacity and
/// residual matrices. The shape (vertices, arcs, `cap`) is fixed once solving
/// begins; only `res` mutates, and only through [`FlowSolver`].
///
/// [`FlowSolver`]: crate::solver::FlowSolver
pub struct FlowNetwork<Flow> {
    name: String,
    num_vertices: usize,
    successors: Vec<Vec<Arc<Flow>>>,
    cap: Vec<Vec<Flow>>,
    res: Vec<Vec<Flow>>,
}

impl<Flow> FlowNetwork<Flow>
where
    Flow: NumAssign + Ord + Copy,
{
    pub fn new(name: impl Into<String>, num_vertices: usize) -> Self {
        FlowNetwork {
            name: name.into(),
            num_vertices,
            successors: vec![Vec::new(); num_vertices],
            cap: vec![vec![Flow::zero(); num_vertices]; num_vertices],
            res: vec![vec![Flow::zero(); num_vertices]; num_vertices],
        }
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capacity declared for the arc `u -> v`, zero if no such arc.
    #[inline]
    pub fn capacity(&self, u: usize, v: usize) -> Flow {
        self.cap[u][v]
    }

    /// Capacity remaining on `u -> v` in the residual graph, push-back credit
    /// included.
    #[inline]
    pub fn residual(&self, u: usize, v: usize) -> Flow {
        self.res[u][v]
    }

    /// Outgoing arc descriptors of `u`, in insertion order. Includes the
    /// zero-capacity reverse descriptors created for push-back.
    #[inline]
    pub fn successors(&self, u: usize) -> &[Arc<Flow>] {
        &self.successors[u]
    }

    /// Adds the arc `source -> destination` with the given capacity, together
    /// with a zero-capacity reverse descriptor unless an arc
    /// `destination -> source` already exists. Re-adding an ordered pair
    /// overwrites its capacity; last write wins.
    pub fn add_arc(&mut self, source: usize, destination: usize, capacity: Flow) -> Result<(), FlowError> {
        self.check_vertex(source)?;
        self.check_vertex(destination)?;
        if capacity < Flow::zero() {
            return Err(FlowError::NegativeCapacity { from: source, to: destination });
        }

        match self.successors[source].iter_mut().find(|arc| arc.to == destination) {
            Some(arc) => arc.capacity = capacity,
            None => {
                self.successors[source].push(Arc { from: source, to: destination, capacity });
                if source != destination && !self.successors[destination].iter().any(|arc| arc.to == source) {
                    // reverse arc for residual push-back
                    self.successors[destination].push(Arc { from: destination, to: source, capacity: Flow::zero() });
                }
            }
        }

        self.cap[source][destination] = capacity;
        self.res[source][destination] = capacity;
        Ok(())
    }

    pub(crate) fn check_vertex(&self, vertex: usize) -> Result<(), FlowError> {
        if vertex >= self.num_vertices {
            return Err(FlowError::VertexOutOfRange { vertex, num_vertices: self.num_vertices });
        }
        Ok(())
    }

    /// Moves `delta` units of flow across `u -> v`: debit the forward residual,
    /// credit the reverse one. Total slack on the pair is conserved.
    pub(crate) fn push(&mut self, u: usize, v: usize, delta: Flow) {
        self.res[u][v] -= delta;
        self.res[v][u] += delta;
        debug_assert!(self.res[u][v] >= Flow::zero());
    }
}

impl<Flow> fmt::Display for FlowNetwork<Flow>
where
    Flow: NumAssign + Ord + Copy + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "network {}", self.name)?;
        for u in 0..self.num_vertices {
            write!(f, "{}:", u)?;
            for arc in &self.successors[u] {
                if arc.capacity > Flow::zero() {
                    write!(f, " -> {} ({})", arc.to, arc.capacity)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
