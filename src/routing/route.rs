use std::ops::Deref;

use crate::{Coordinate, Cost, VertexId};

/// Stop along a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub vertex: VertexId,
    pub coordinate: Coordinate,
    /// Cost of the shortest path from the route source to this waypoint.
    pub cost: Cost,
}

/// Shortest route between two vertices of a route map, ordered from source to destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Route(Vec<Waypoint>);

impl From<Vec<Waypoint>> for Route {
    fn from(waypoints: Vec<Waypoint>) -> Self {
        Self(waypoints)
    }
}

impl Deref for Route {
    type Target = Vec<Waypoint>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Route {
    pub fn vertices(&self) -> impl DoubleEndedIterator<Item = VertexId> + '_ {
        self.0.iter().map(|w| w.vertex)
    }

    pub fn to_path(&self) -> Vec<VertexId> {
        self.vertices().collect()
    }

    /// Gets the total cost of the route, that is the cost of its last waypoint.
    pub fn cost(&self) -> Cost {
        self.last().map_or(Cost::ZERO, |w| w.cost)
    }

    pub fn into_waypoints(self) -> Vec<Waypoint> {
        self.0
    }
}
