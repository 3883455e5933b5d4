use thiserror::Error;

/// Errors reported at the crate boundary. Every variant is a rejected input;
/// the network is left unchanged and the caller may correct and retry.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum FlowError {
    #[error("vertex {vertex} is out of range for a network with {num_vertices} vertices")]
    VertexOutOfRange { vertex: usize, num_vertices: usize },

    #[error("arc {from} -> {to} has negative capacity")]
    NegativeCapacity { from: usize, to: usize },

    #[error("source and sink are both vertex {vertex}")]
    SourceIsSink { vertex: usize },
}
