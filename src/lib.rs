#![doc = include_str!("../README.md")]

mod error;
mod graph;
mod model;
mod queue;
mod reader;
mod report;
mod routing;

pub use error::{GraphError, QueueError, ReadError, RouteError};
pub use graph::dijkstra::ShortestPathTree;
pub use graph::traversal::{SearchLevels, SearchTree};
pub use graph::{Edge, Graph};
pub use model::{Coordinate, Cost, EdgeId, VertexId};
pub use queue::{AdaptablePriorityQueue, Handle};
pub use reader::{ReaderConfig, WeightField, read_graph, read_route_map};
pub use report::{write_gps_route, write_shortest_paths};
pub use routing::{Route, RouteMap, Waypoint};
