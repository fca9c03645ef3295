mod network;

pub use network::{NETWORK, NETWORK_DATA, Place};
