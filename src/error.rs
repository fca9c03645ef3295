use std::io::ErrorKind;

use thiserror::Error;

use crate::{EdgeId, VertexId};

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum QueueError {
    #[error("Priority queue is empty")]
    Empty,
    #[error("Handle does not reference a live queue entry")]
    StaleHandle,
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum GraphError {
    #[error("Vertex {0:?} does not belong to the graph")]
    VertexNotFound(VertexId),
    #[error("Edge {0:?} has a negative or non-finite weight")]
    InvalidWeight(EdgeId),
    #[error(transparent)]
    Queue(#[from] QueueError),
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum RouteError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("Cannot find route between {0:?} and {1:?}")]
    NoPathFound(VertexId, VertexId),
    #[error("Shortest paths were computed from {found:?}, expected {expected:?}")]
    SourceMismatch { expected: VertexId, found: VertexId },
}

#[derive(Error, Debug, PartialEq, Clone)]
pub enum ReadError {
    #[error("Route map I/O error: {0:?}")]
    Io(ErrorKind),
    #[error("Route map line {line} is not valid: {reason}")]
    Parse { line: usize, reason: String },
    #[error("Edge references unknown node {0}")]
    UnknownVertex(u64),
}

impl From<std::io::Error> for ReadError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.kind())
    }
}
