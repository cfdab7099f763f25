#![forbid(unsafe_code)]

//! Vertical layout of form nodes.
//!
//! Every node (each field, then the submit control) is a block of rows:
//! one title row, the widget's body rows, and one row reserved for the
//! error message so that showing an error never moves other nodes.

use iform_core::geometry::Extent;

/// Blank rows between two nodes.
pub const NODE_GAP: f32 = 1.0;

/// Rows a node with `body_rows` body lines occupies.
pub fn node_rows(body_rows: usize) -> f32 {
    // title + body + error line
    (body_rows + 2) as f32
}

/// Extents of every node inside the scrollable content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormLayout {
    extents: Vec<Extent>,
    content_height: f32,
}

impl FormLayout {
    /// Stack nodes of the given heights, with `padding` rows before the
    /// first and after the last.
    pub fn stack(heights: impl IntoIterator<Item = f32>, padding: f32) -> Self {
        let mut extents = Vec::new();
        let mut y = padding;
        for (i, height) in heights.into_iter().enumerate() {
            if i > 0 {
                y += NODE_GAP;
            }
            extents.push(Extent::new(y, height));
            y += height;
        }
        Self {
            extents,
            content_height: y + padding,
        }
    }

    /// Extent of node `index`.
    pub fn extent(&self, index: usize) -> Option<Extent> {
        self.extents.get(index).copied()
    }

    pub fn extents(&self) -> &[Extent] {
        &self.extents
    }

    /// Total content height, padding included.
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Index of the node whose center is closest to `y`. Ties go to the
    /// earlier node.
    pub fn closest_to(&self, y: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, extent) in self.extents.iter().enumerate() {
            let d = extent.distance_to(y);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacks_with_gaps_and_padding() {
        let layout = FormLayout::stack([3.0, 5.0, 2.0], 4.0);
        assert_eq!(layout.extent(0), Some(Extent::new(4.0, 3.0)));
        assert_eq!(layout.extent(1), Some(Extent::new(8.0, 5.0)));
        assert_eq!(layout.extent(2), Some(Extent::new(14.0, 2.0)));
        assert_eq!(layout.content_height(), 20.0);
        assert_eq!(layout.extent(3), None);
    }

    #[test]
    fn closest_node_wins() {
        let layout = FormLayout::stack([4.0, 4.0, 4.0], 0.0);
        assert_eq!(layout.closest_to(0.0), Some(0));
        assert_eq!(layout.closest_to(7.0), Some(1));
        assert_eq!(layout.closest_to(100.0), Some(2));
        assert_eq!(FormLayout::default().closest_to(1.0), None);
    }

    #[test]
    fn node_rows_reserve_title_and_error() {
        assert_eq!(node_rows(1), 3.0);
        assert_eq!(node_rows(4), 6.0);
    }
}
