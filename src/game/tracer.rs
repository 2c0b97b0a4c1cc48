use crate::models::Cell;

pub struct SelectionTracer;

impl SelectionTracer {
    /// True when `from` and `to` lie on one row, one column or one 45°
    /// diagonal
    pub fn is_straight_line(from: Cell, to: Cell) -> bool {
        let (d_row, d_col) = Self::deltas(from, to);
        d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs()
    }

    /// Every cell from `anchor` to `current` inclusive, or an empty vec when
    /// the two are not in a straight line.
    ///
    /// Callers re-trace from the original anchor on every pointer move, so a
    /// drag can swing to a new direction mid-gesture.
    pub fn trace(anchor: Cell, current: Cell) -> Vec<Cell> {
        if !Self::is_straight_line(anchor, current) {
            return Vec::new();
        }

        let (d_row, d_col) = Self::deltas(anchor, current);
        let steps = d_row.abs().max(d_col.abs());
        if steps == 0 {
            return vec![anchor];
        }

        let step_row = d_row / steps;
        let step_col = d_col / steps;

        (0..=steps)
            .map(|i| Cell {
                row: anchor.row.wrapping_add_signed(step_row * i),
                col: anchor.col.wrapping_add_signed(step_col * i),
            })
            .collect()
    }

    fn deltas(from: Cell, to: Cell) -> (isize, isize) {
        (
            to.row as isize - from.row as isize,
            to.col as isize - from.col as isize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(usize, usize)]) -> Vec<Cell> {
        coords.iter().map(|&(row, col)| Cell::new(row, col)).collect()
    }

    #[test]
    fn test_rejects_knight_move() {
        assert!(SelectionTracer::trace(Cell::new(0, 0), Cell::new(1, 2)).is_empty());
        assert!(!SelectionTracer::is_straight_line(Cell::new(0, 0), Cell::new(1, 2)));
    }

    #[test]
    fn test_horizontal_trace() {
        assert_eq!(
            SelectionTracer::trace(Cell::new(2, 2), Cell::new(2, 5)),
            cells(&[(2, 2), (2, 3), (2, 4), (2, 5)])
        );
    }

    #[test]
    fn test_backward_and_vertical_traces() {
        assert_eq!(
            SelectionTracer::trace(Cell::new(0, 2), Cell::new(0, 0)),
            cells(&[(0, 2), (0, 1), (0, 0)])
        );
        assert_eq!(
            SelectionTracer::trace(Cell::new(3, 1), Cell::new(1, 1)),
            cells(&[(3, 1), (2, 1), (1, 1)])
        );
    }

    #[test]
    fn test_diagonal_traces() {
        assert_eq!(
            SelectionTracer::trace(Cell::new(1, 1), Cell::new(3, 3)),
            cells(&[(1, 1), (2, 2), (3, 3)])
        );
        assert_eq!(
            SelectionTracer::trace(Cell::new(4, 0), Cell::new(2, 2)),
            cells(&[(4, 0), (3, 1), (2, 2)])
        );
        assert_eq!(
            SelectionTracer::trace(Cell::new(2, 2), Cell::new(0, 0)),
            cells(&[(2, 2), (1, 1), (0, 0)])
        );
    }

    #[test]
    fn test_single_cell_trace() {
        assert_eq!(
            SelectionTracer::trace(Cell::new(5, 5), Cell::new(5, 5)),
            cells(&[(5, 5)])
        );
    }

    #[test]
    fn test_trace_swings_direction_from_fixed_anchor() {
        let anchor = Cell::new(4, 4);

        let first = SelectionTracer::trace(anchor, Cell::new(4, 6));
        assert_eq!(first.len(), 3);

        // Same anchor, new direction: nothing of the old line survives
        let second = SelectionTracer::trace(anchor, Cell::new(6, 4));
        assert_eq!(second, cells(&[(4, 4), (5, 4), (6, 4)]));
    }
}
