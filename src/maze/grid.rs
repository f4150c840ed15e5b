use super::{Direction, Point, cell::Cell};
use crate::error::{Error, Result};

/// Identity markers that can be stamped onto a passage cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Start,
    Goal,
}

impl Marker {
    fn bit(self) -> u32 {
        match self {
            Marker::Start => Cell::START,
            Marker::Goal => Cell::GOAL,
        }
    }

    fn conflicting_bit(self) -> u32 {
        match self {
            Marker::Start => Cell::GOAL,
            Marker::Goal => Cell::START,
        }
    }
}

/// Row-major array of packed cells. The outermost ring is the perimeter and is never carved.
#[derive(Default, Debug, Clone)]
pub struct Grid {
    data: Box<[Cell]>,
    rows: usize,
    cols: usize,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        let data = vec![Cell::WALLED; rows * cols].into_boxed_slice();
        Grid { data, rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[Cell] {
        &self.data
    }

    /// Restore every cell to fully walled and uncarved, keeping the allocation.
    pub fn reset(&mut self) {
        self.data.fill(Cell::WALLED);
    }

    fn ravel_index(&self, point: Point) -> usize {
        point.row * self.cols + point.col
    }

    /// True if the point lies anywhere in the array, perimeter included.
    pub fn in_bounds(&self, point: Point) -> bool {
        point.row < self.rows && point.col < self.cols
    }

    /// True if the point lies strictly inside the perimeter.
    pub fn is_interior(&self, point: Point) -> bool {
        point.row > 0 && point.col > 0 && point.row < self.rows - 1 && point.col < self.cols - 1
    }

    pub fn is_boundary(&self, point: Point) -> bool {
        self.in_bounds(point) && !self.is_interior(point)
    }

    /// Room cells sit on the odd/odd lattice.
    pub fn is_room(&self, point: Point) -> bool {
        self.is_interior(point) && point.row % 2 == 1 && point.col % 2 == 1
    }

    pub fn is_passable(&self, point: Point) -> bool {
        self.in_bounds(point) && self[point].is_passage()
    }

    /// Neighbor `distance` steps away in `direction`, if it stays inside the perimeter.
    pub fn interior_step(&self, point: Point, direction: Direction, distance: usize) -> Option<Point> {
        point
            .step(direction, distance)
            .filter(|&next| self.is_interior(next))
    }

    /// Iterate over every room cell in row-major order.
    pub fn rooms(&self) -> impl Iterator<Item = Point> + '_ {
        (1..self.rows - 1)
            .step_by(2)
            .flat_map(move |row| (1..self.cols - 1).step_by(2).map(move |col| Point::new(row, col)))
    }

    pub fn update(&mut self, point: Point, f: impl FnOnce(&mut Cell)) {
        let idx = self.ravel_index(point);
        f(&mut self.data[idx]);
    }

    /// Clear the mutual walls between two cells one step apart and mark both as passages.
    ///
    /// # Panics
    /// * If `a` and `b` are not adjacent
    /// * If either cell lies on the perimeter
    pub fn carve_passage(&mut self, a: Point, b: Point) {
        let direction = a
            .direction_to(b)
            .unwrap_or_else(|| panic!("Cannot carve between non-adjacent cells {a} and {b}"));
        if !self.is_interior(a) || !self.is_interior(b) {
            panic!("Cannot carve into the perimeter between {a} and {b}");
        }
        self.update(a, |cell| {
            cell.remove(direction.wall_bit());
            cell.insert(Cell::PASSAGE);
        });
        self.update(b, |cell| {
            cell.remove(direction.opposite().wall_bit());
            cell.insert(Cell::PASSAGE);
        });
    }

    /// Carve two room cells together through the joint between them.
    pub fn join_rooms(&mut self, from: Point, to: Point) {
        let joint = from.midpoint(to);
        self.carve_passage(from, joint);
        self.carve_passage(joint, to);
    }

    /// Mark a single interior cell as a passage and connect it to every passable neighbor.
    pub fn open(&mut self, point: Point) {
        if !self.is_interior(point) {
            return;
        }
        self.update(point, |cell| cell.insert(Cell::PASSAGE));
        for direction in Direction::ALL {
            if let Some(next) = self.interior_step(point, direction, 1) {
                if self[next].is_passage() {
                    self.carve_passage(point, next);
                }
            }
        }
    }

    /// Turn an interior cell back into a wall, restoring the walls its neighbors face.
    pub fn close(&mut self, point: Point) {
        if !self.is_interior(point) {
            return;
        }
        self.update(point, |cell| {
            cell.remove(Cell::PASSAGE);
            cell.insert(Cell::WALL_MASK);
        });
        for direction in Direction::ALL {
            match point.step(direction, 1) {
                Some(next) if self.in_bounds(next) => {
                    self.update(next, |cell| cell.insert(direction.opposite().wall_bit()));
                }
                _ => {}
            }
        }
    }

    /// True if a carved opening joins `point` to its neighbor in `direction`.
    pub fn is_open_toward(&self, point: Point, direction: Direction) -> bool {
        match point.step(direction, 1) {
            Some(next) if self.in_bounds(next) => {
                !self[point].has_wall(direction) && self[next].is_passage()
            }
            _ => false,
        }
    }

    /// Stamp a start or goal marker, refusing cells that already carry the other identity.
    pub fn place_marker(&mut self, point: Point, marker: Marker) -> Result<()> {
        if !self.is_passable(point) {
            return Err(Error::NotPassable { point });
        }
        if self[point].intersects(marker.conflicting_bit()) {
            return Err(Error::MarkerConflict { point });
        }
        self.update(point, |cell| cell.insert(marker.bit()));
        Ok(())
    }

    /// Remove builder, walk, and backtrack bookkeeping left behind by a generator.
    pub fn clear_builder_marks(&mut self) {
        self.data.iter_mut().for_each(|cell| {
            cell.remove(Cell::BUILDER | Cell::WALK);
            cell.set_backtrack(None);
        });
    }

    /// Remove per-agent seen and paint bits.
    pub fn clear_agent_marks(&mut self) {
        self.data
            .iter_mut()
            .for_each(|cell| cell.remove(Cell::SEEN_MASK | Cell::PAINT_MASK));
    }
}

impl std::ops::Index<Point> for Grid {
    type Output = Cell;

    fn index(&self, index: Point) -> &Self::Output {
        &self.data[self.ravel_index(index)]
    }
}
