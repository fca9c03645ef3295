//! Reader of road networks stored in the plain text node/edge format.
//!
//! The file lists blocks of lines, each block starts with its keyword:
//!
//! ```text
//! Node
//! id: 358357
//! latlong: 51.8833 -8.5036
//! Edge
//! source: 358357
//! target: 330068634
//! length: 120.5
//! time: 9.8
//! oneway: N
//! ```
//!
//! Edges must reference nodes that were declared before them.

use std::io::BufRead;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use strum::{Display, EnumString};
use tracing::{debug, info};

use crate::{Coordinate, Cost, EdgeId, Graph, ReadError, RouteMap, VertexId};

/// Edge attribute used as the edge weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum WeightField {
    /// Travel time.
    #[default]
    Time,
    /// Edge length.
    Length,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReaderConfig {
    pub weight: WeightField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
enum Block {
    Node,
    Edge,
}

/// Reads a route map, where vertices are labelled by their node ID and geolocated.
pub fn read_route_map(
    reader: impl BufRead,
    config: &ReaderConfig,
) -> Result<RouteMap<u64>, ReadError> {
    let mut map = RouteMap::new();
    read_network(reader, config, &mut map)?;
    info!(
        "Read route map with {} vertices and {} edges",
        map.num_vertices(),
        map.num_edges()
    );
    Ok(map)
}

/// Reads a graph where vertices are labelled by their node ID, coordinates are discarded.
pub fn read_graph(
    reader: impl BufRead,
    config: &ReaderConfig,
) -> Result<Graph<u64, Cost>, ReadError> {
    let mut graph = Graph::new();
    read_network(reader, config, &mut graph)?;
    info!(
        "Read graph with {} vertices and {} edges",
        graph.num_vertices(),
        graph.num_edges()
    );
    Ok(graph)
}

trait Network {
    fn add_node(&mut self, id: u64, coordinate: Coordinate) -> VertexId;
    fn add_edge(&mut self, v: VertexId, w: VertexId, weight: Cost) -> Option<EdgeId>;
}

impl Network for RouteMap<u64> {
    fn add_node(&mut self, id: u64, coordinate: Coordinate) -> VertexId {
        self.add_vertex(id, coordinate)
    }

    fn add_edge(&mut self, v: VertexId, w: VertexId, weight: Cost) -> Option<EdgeId> {
        RouteMap::add_edge(self, v, w, weight)
    }
}

impl Network for Graph<u64, Cost> {
    fn add_node(&mut self, id: u64, _: Coordinate) -> VertexId {
        self.add_vertex(id)
    }

    fn add_edge(&mut self, v: VertexId, w: VertexId, weight: Cost) -> Option<EdgeId> {
        Graph::add_edge(self, v, w, weight)
    }
}

fn read_network(
    reader: impl BufRead,
    config: &ReaderConfig,
    network: &mut impl Network,
) -> Result<(), ReadError> {
    let mut lines = NetworkLines {
        lines: reader.lines(),
        number: 0,
    };

    // node ID -> vertex
    let mut vertices: FxHashMap<u64, VertexId> = FxHashMap::default();

    while let Some(line) = lines.next_line()? {
        let block = Block::from_str(line.trim())
            .map_err(|_| lines.error(format!("expected `Node` or `Edge`, found `{line}`")))?;

        match block {
            Block::Node => {
                let id: u64 = lines.value("id")?;
                let latlong = lines.field("latlong")?;
                let lat = lines.parse("latlong", latlong.first())?;
                let lon = lines.parse("latlong", latlong.get(1))?;

                let vertex = network.add_node(id, Coordinate::new(lat, lon));
                vertices.insert(id, vertex);
            }
            Block::Edge => {
                let source: u64 = lines.value("source")?;
                let target: u64 = lines.value("target")?;
                let length = lines.weight("length")?;
                let time = lines.weight("time")?;
                lines.field("oneway")?;

                let weight = match config.weight {
                    WeightField::Time => time,
                    WeightField::Length => length,
                };

                let v = *vertices
                    .get(&source)
                    .ok_or(ReadError::UnknownVertex(source))?;
                let w = *vertices
                    .get(&target)
                    .ok_or(ReadError::UnknownVertex(target))?;

                network.add_edge(v, w, weight);
            }
        }
    }

    debug!("Read {} lines", lines.number);

    Ok(())
}

struct NetworkLines<R> {
    lines: std::io::Lines<R>,
    /// Number of the last line read (1-based).
    number: usize,
}

impl<R: BufRead> NetworkLines<R> {
    /// Gets the next non-empty line, None at the end of the input.
    fn next_line(&mut self) -> Result<Option<String>, ReadError> {
        for line in self.lines.by_ref() {
            self.number += 1;
            let line = line?;
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    /// Reads the next line, that must be the given field, and returns its values.
    fn field(&mut self, name: &str) -> Result<Vec<String>, ReadError> {
        let line = self
            .next_line()?
            .ok_or_else(|| self.error(format!("missing `{name}` field")))?;

        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some(key) if key.trim_end_matches(':') == name => {
                Ok(tokens.map(str::to_owned).collect())
            }
            _ => Err(self.error(format!("expected `{name}` field, found `{line}`"))),
        }
    }

    /// Reads the next line, that must be the given field, and parses its first value.
    fn value<T: FromStr>(&mut self, name: &str) -> Result<T, ReadError> {
        let values = self.field(name)?;
        self.parse(name, values.first())
    }

    /// Reads the next line, that must be the given field, and parses its first value as an
    /// edge weight.
    fn weight(&mut self, name: &str) -> Result<Cost, ReadError> {
        let weight = Cost::new(self.value(name)?);
        if weight.is_valid_weight() {
            Ok(weight)
        } else {
            Err(self.error(format!("invalid `{name}` weight {weight}")))
        }
    }

    fn parse<T: FromStr>(&self, name: &str, value: Option<&String>) -> Result<T, ReadError> {
        value
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| self.error(format!("invalid `{name}` value")))
    }

    fn error(&self, reason: String) -> ReadError {
        ReadError::Parse {
            line: self.number,
            reason,
        }
    }
}
