//! The fixed three-line rail network and its map layout.

use std::collections::HashMap;

use chalkboard_svg::Point;

use crate::graph::{Edge, Graph, Route};

/// A named rail line drawn in one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub name: &'static str,
    pub color: &'static str,
    /// Stations in running order. Consecutive pairs are connected.
    pub stations: &'static [&'static str],
}

impl Line {
    /// Consecutive station pairs along the line.
    pub fn segments(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.stations.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// A walking connection between two lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub from: &'static str,
    pub to: &'static str,
    pub edge: Edge,
}

/// Cost of one hop between neighboring stations on the same line.
pub const HOP: Edge = Edge::new(2, 1000);

/// Cost of walking between lines.
pub const TRANSFER: Edge = Edge::new(5, 200);

pub const MRT_3: Line = Line {
    name: "MRT-3",
    color: "#FFD700",
    stations: &[
        "North Avenue",
        "Quezon Avenue",
        "GMA Kamuning",
        "Araneta Center-Cubao",
        "Santolan",
        "Ortigas",
        "Shaw Boulevard",
        "Boni",
        "Guadalupe",
        "Buendia",
        "Ayala",
        "Magallanes",
        "Taft Avenue",
    ],
};

pub const LRT_1: Line = Line {
    name: "LRT-1",
    color: "#FF0000",
    stations: &[
        "Roosevelt",
        "Balintawak",
        "Monumento",
        "Blumentritt",
        "Tayuman",
        "Bambang",
        "Doroteo Jose",
        "Carriedo",
        "Central Terminal",
        "United Nations",
        "Pedro Gil",
        "Quirino",
        "Vito Cruz",
        "Gil Puyat",
        "Libertad",
        "EDSA",
        "Baclaran",
    ],
};

pub const LRT_2: Line = Line {
    name: "LRT-2",
    color: "#6F2DA8",
    stations: &[
        "Recto",
        "Legarda",
        "Pureza",
        "V. Mapa",
        "J. Ruiz",
        "Gilmore",
        "Betty Go-Belmonte",
        "Araneta Center-Cubao",
        "Anonas",
        "Katipunan",
        "Santolan",
    ],
};

pub const LINES: [Line; 3] = [MRT_3, LRT_1, LRT_2];

pub const TRANSFERS: [Transfer; 2] = [
    Transfer { from: "Doroteo Jose", to: "Recto", edge: TRANSFER },
    Transfer { from: "EDSA", to: "Taft Avenue", edge: TRANSFER },
];

/// Map position of every station, in drawing order.
///
/// Stations shared by two lines appear once, at their LRT-2 position.
pub const LAYOUT: [(&str, Point); 39] = [
    ("North Avenue", Point::new(100, 100)),
    ("Quezon Avenue", Point::new(150, 100)),
    ("GMA Kamuning", Point::new(200, 100)),
    ("Araneta Center-Cubao", Point::new(800, 50)),
    ("Santolan", Point::new(950, 50)),
    ("Ortigas", Point::new(350, 100)),
    ("Shaw Boulevard", Point::new(400, 100)),
    ("Boni", Point::new(450, 100)),
    ("Guadalupe", Point::new(500, 100)),
    ("Buendia", Point::new(550, 100)),
    ("Ayala", Point::new(600, 100)),
    ("Magallanes", Point::new(650, 100)),
    ("Taft Avenue", Point::new(700, 100)),
    ("Roosevelt", Point::new(100, 200)),
    ("Balintawak", Point::new(150, 200)),
    ("Monumento", Point::new(250, 200)),
    ("Blumentritt", Point::new(300, 200)),
    ("Tayuman", Point::new(350, 200)),
    ("Bambang", Point::new(400, 200)),
    ("Doroteo Jose", Point::new(450, 200)),
    ("Carriedo", Point::new(500, 200)),
    ("Central Terminal", Point::new(550, 200)),
    ("United Nations", Point::new(600, 200)),
    ("Pedro Gil", Point::new(650, 200)),
    ("Quirino", Point::new(700, 200)),
    ("Vito Cruz", Point::new(750, 200)),
    ("Gil Puyat", Point::new(800, 200)),
    ("Libertad", Point::new(850, 200)),
    ("EDSA", Point::new(900, 200)),
    ("Baclaran", Point::new(950, 200)),
    ("Recto", Point::new(450, 50)),
    ("Legarda", Point::new(500, 50)),
    ("Pureza", Point::new(550, 50)),
    ("V. Mapa", Point::new(600, 50)),
    ("J. Ruiz", Point::new(650, 50)),
    ("Gilmore", Point::new(700, 50)),
    ("Betty Go-Belmonte", Point::new(750, 50)),
    ("Anonas", Point::new(850, 50)),
    ("Katipunan", Point::new(900, 50)),
];

/// A read-only rail network: topology, line metadata and map layout.
///
/// Built once and shared; queries never mutate it.
#[derive(Debug, Clone)]
pub struct TransitNetwork {
    graph: Graph,
    lines: Vec<Line>,
    layout: Vec<(&'static str, Point)>,
    positions: HashMap<&'static str, Point>,
}

impl TransitNetwork {
    /// Build a network from lines, transfers and a map layout.
    ///
    /// Stations missing from `layout` still route; they are just not drawn.
    pub fn new(lines: &[Line], transfers: &[Transfer], layout: &[(&'static str, Point)]) -> Self {
        let mut graph = Graph::new();
        for line in lines {
            for (u, v) in line.segments() {
                graph.add_edge(u, v, HOP);
            }
        }
        for transfer in transfers {
            graph.add_edge(transfer.from, transfer.to, transfer.edge);
        }

        let positions = layout.iter().copied().collect();

        tracing::debug!(
            stations = graph.station_count(),
            edges = graph.edge_count(),
            lines = lines.len(),
            "transit network built"
        );

        Self {
            graph,
            lines: lines.to_vec(),
            layout: layout.to_vec(),
            positions,
        }
    }

    /// MRT-3, LRT-1 and LRT-2 with their transfers.
    pub fn metro_manila() -> Self {
        Self::new(&LINES, &TRANSFERS, &LAYOUT)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Station positions in drawing order.
    pub fn layout(&self) -> &[(&'static str, Point)] {
        &self.layout
    }

    pub fn position(&self, station: &str) -> Option<Point> {
        self.positions.get(station).copied()
    }

    pub fn stations(&self) -> impl Iterator<Item = &str> {
        self.graph.stations()
    }

    pub fn shortest_path(&self, src: &str, dst: &str) -> Route {
        self.graph.shortest_path(src, dst)
    }
}

impl Default for TransitNetwork {
    fn default() -> Self {
        Self::metro_manila()
    }
}
