//! Plain text reports of shortest paths and routes.

use std::fmt::Display;
use std::io::{self, Write};

use crate::{Graph, Route, RouteMap, ShortestPathTree};

/// Writes one line per vertex of the shortest path tree with its cost and predecessor,
/// in vertex ID order.
pub fn write_shortest_paths<V: Display, E>(
    graph: &Graph<V, E>,
    tree: &ShortestPathTree,
    mut writer: impl Write,
) -> io::Result<()> {
    let mut paths: Vec<_> = tree.iter().collect();
    paths.sort_unstable_by_key(|&(vertex, _, _)| vertex);

    for (vertex, cost, predecessor) in paths {
        let Some(label) = graph.vertex(vertex) else {
            continue;
        };

        write!(writer, "Vertex: {label}; Cost: {cost}; Preceding Vertex: ")?;
        match predecessor.and_then(|p| graph.vertex(p)) {
            Some(predecessor) => writeln!(writer, "{predecessor}")?,
            None => writeln!(writer, "None")?,
        }
    }

    Ok(())
}

/// Writes the route as tab separated GPS waypoints (latitude, longitude, label and cost).
pub fn write_gps_route<V: Display>(
    map: &RouteMap<V>,
    route: &Route,
    mut writer: impl Write,
) -> io::Result<()> {
    writeln!(writer, "type\tlatitude\tlongitude\telement\tcost")?;

    for waypoint in route.iter() {
        let Some(label) = map.vertex(waypoint.vertex) else {
            continue;
        };

        writeln!(
            writer,
            "W\t{}\t{}\t{label}\t{}",
            waypoint.coordinate.lat, waypoint.coordinate.lon, waypoint.cost
        )?;
    }

    Ok(())
}
