use std::sync::LazyLock;

use routemap::{ReaderConfig, RouteMap, VertexId, read_route_map};

pub const NETWORK_DATA: &str = include_str!("../data/network.txt");

/// Small network around Cork city, edge weights are travel times in seconds.
pub static NETWORK: LazyLock<RouteMap<u64>> = LazyLock::new(|| {
    read_route_map(NETWORK_DATA.as_bytes(), &ReaderConfig::default()).unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Place {
    WesternGatewayBuilding,
    TurnersCross,
    Neptune,
    UniversityHospital,
    OldOak,
    Gaol,
    MahonPoint,
    /// Node that no road connects to.
    Island,
}

impl Place {
    pub const fn node_id(self) -> u64 {
        match self {
            Self::WesternGatewayBuilding => 1669466540,
            Self::TurnersCross => 348809726,
            Self::Neptune => 1147697924,
            Self::UniversityHospital => 860206013,
            Self::OldOak => 358357,
            Self::Gaol => 3777201945,
            Self::MahonPoint => 330068634,
            Self::Island => 999,
        }
    }

    pub fn vertex(self, map: &RouteMap<u64>) -> VertexId {
        map.get_vertex_by_label(&self.node_id()).unwrap()
    }
}
