use crate::maze::{Grid, Point};

/// Open floor with no walls inside the perimeter.
pub fn open_arena(grid: &mut Grid) {
    for row in 1..grid.rows() - 1 {
        for col in 1..grid.cols() - 1 {
            grid.open(Point::new(row, col));
        }
    }
}
