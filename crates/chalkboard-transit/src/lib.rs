//! Chalkboard Transit
//!
//! A small rail network with fastest-route queries and a map renderer.
//!
//! Every edge carries travel time and distance. Routes minimize time, and
//! the distance reported is the distance along the chosen route. The
//! network is built once and never mutated, so a single instance can be
//! shared by any number of concurrent readers.
//!
//! # Usage
//!
//! ```
//! use chalkboard_transit::TransitNetwork;
//!
//! let network = TransitNetwork::metro_manila();
//! let route = network.shortest_path("Recto", "Legarda");
//! assert_eq!(route.path, vec!["Recto", "Legarda"]);
//! assert_eq!(route.minutes, 2);
//!
//! let svg = network.render_with_path(&route.path);
//! assert!(svg.contains("data-station=\"Recto\""));
//! ```

mod graph;
mod network;
mod render;

pub use graph::{Edge, Graph, Route};
pub use network::{Line, TransitNetwork, Transfer, HOP, LAYOUT, LINES, LRT_1, LRT_2, MRT_3, TRANSFER, TRANSFERS};
pub use render::{BACKGROUND, MAP_HEIGHT, MAP_WIDTH, PATH_COLOR, STATION_FILL, STATION_RADIUS};
