//! Proximity-based color inheritance for new nodes.

use crate::types::{HexColor, Node, WorldPoint};

/// Color of the node nearest to `point` within `radius`, or `None`.
///
/// Linear scan over `nodes`. On an exact distance tie the first node in
/// iteration order wins.
pub fn nearest_color<'a>(
    point: WorldPoint,
    radius: f64,
    nodes: impl IntoIterator<Item = &'a Node>,
) -> Option<HexColor> {
    let mut best: Option<(f64, &Node)> = None;
    for node in nodes {
        let d = node.anchor().distance(point);
        if d > radius {
            continue;
        }
        if best.is_none_or(|(best_d, _)| d < best_d) {
            best = Some((d, node));
        }
    }
    best.map(|(_, node)| node.color.clone())
}
