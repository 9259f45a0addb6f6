//! Run-scoped interning of occlusion shapes.

use blockdump_geom::{Aabb, GridBox};
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

/// Ordered box list in grid units. Box order is significant: two shapes
/// listing the same boxes in a different order are different shapes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape(pub Vec<GridBox>);

impl Shape {
    pub fn empty() -> Shape {
        Shape(Vec::new())
    }

    pub fn from_boxes(boxes: &[Aabb]) -> Shape {
        Shape(boxes.iter().map(|b| b.to_grid()).collect())
    }

    /// Six integers per box.
    pub fn to_flat(&self) -> Vec<i32> {
        self.0.iter().flat_map(|b| b.to_flat()).collect()
    }
}

/// Ids are handed out in first-seen order and never reassigned.
#[derive(Default, Debug)]
pub struct ShapeTable {
    ids: HashMap<Shape, u32>,
    shapes: Vec<Shape>,
}

impl ShapeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, shape: Shape) -> u32 {
        match self.ids.entry(shape) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let id = self.shapes.len() as u32;
                self.shapes.push(e.key().clone());
                e.insert(id);
                id
            }
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Flattened shapes ordered by id.
    pub fn export(&self) -> Vec<Vec<i32>> {
        self.shapes.iter().map(Shape::to_flat).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half(top: bool) -> Shape {
        let y = if top { 8 } else { 0 };
        Shape(vec![GridBox::new([0, y, 0], [16, y + 8, 16])])
    }

    #[test]
    fn same_shape_same_id() {
        let mut t = ShapeTable::new();
        let a = t.intern(Shape(vec![GridBox::FULL]));
        let b = t.intern(half(false));
        let c = t.intern(Shape(vec![GridBox::FULL]));
        assert_eq!((a, b, c), (0, 1, 0));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn box_order_matters() {
        let mut t = ShapeTable::new();
        let lo = half(false).0[0];
        let hi = half(true).0[0];
        let a = t.intern(Shape(vec![lo, hi]));
        let b = t.intern(Shape(vec![hi, lo]));
        assert_ne!(a, b);
    }

    #[test]
    fn export_flattens_in_id_order() {
        let mut t = ShapeTable::new();
        t.intern(Shape::empty());
        t.intern(half(true));
        assert_eq!(t.export(), vec![vec![], vec![0, 8, 0, 16, 16, 16]]);
    }
}
