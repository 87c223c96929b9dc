//! Map rendering for a [`TransitNetwork`].

use std::collections::HashSet;

use chalkboard_svg::{Element, SvgDocument};

use crate::network::TransitNetwork;

pub const MAP_WIDTH: i64 = 1200;
pub const MAP_HEIGHT: i64 = 600;
pub const BACKGROUND: &str = "#1e1e2e";
pub const STATION_FILL: &str = "#555";
pub const PATH_COLOR: &str = "#38bdf8";
pub const STATION_RADIUS: i64 = 8;

const LINE_WIDTH: u32 = 4;
const PATH_WIDTH: u32 = 8;

impl TransitNetwork {
    /// Draw the full network with nothing highlighted.
    pub fn render(&self) -> String {
        self.render_with_path::<&str>(&[])
    }

    /// Draw the full network and trace `path` over it.
    pub fn render_with_path<S: AsRef<str>>(&self, path: &[S]) -> String {
        self.map_document(path).finish()
    }

    /// Build the map without serializing it.
    ///
    /// Paint order is line segments, then stations with labels, then the
    /// path overlay. Anything without a layout position is skipped.
    pub fn map_document<S: AsRef<str>>(&self, path: &[S]) -> SvgDocument {
        let mut doc = SvgDocument::new(MAP_WIDTH, MAP_HEIGHT).without_view_box();
        doc.push(Element::backdrop(BACKGROUND));

        for line in self.lines() {
            for (u, v) in line.segments() {
                if let (Some(a), Some(b)) = (self.position(u), self.position(v)) {
                    doc.push(
                        Element::line(a, b)
                            .attr("stroke", line.color)
                            .attr("stroke-width", LINE_WIDTH),
                    );
                }
            }
        }

        let on_path: HashSet<&str> = path.iter().map(|s| s.as_ref()).collect();
        for &(station, at) in self.layout() {
            let fill = if on_path.contains(station) { PATH_COLOR } else { STATION_FILL };
            doc.push(
                Element::circle(at, STATION_RADIUS)
                    .attr("fill", fill)
                    .attr("data-station", station)
                    .attr("class", "station"),
            );
            doc.push(
                Element::text(at.offset(12, 5), station)
                    .attr("fill", "white")
                    .attr("font-size", 12),
            );
        }

        for pair in path.windows(2) {
            let (u, v) = (pair[0].as_ref(), pair[1].as_ref());
            if let (Some(a), Some(b)) = (self.position(u), self.position(v)) {
                doc.push(
                    Element::line(a, b)
                        .attr("stroke", PATH_COLOR)
                        .attr("stroke-width", PATH_WIDTH)
                        .attr("stroke-opacity", 0.5),
                );
            }
        }

        doc
    }
}
