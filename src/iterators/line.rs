use glam::IVec2;

/// Bresenham traversal of every cell on the segment `start..=end`.
///
/// Integer-only: the error term is kept in `i64` so segments spanning the whole
/// `i32` range cannot overflow. Both axes may step in the same iteration, which
/// makes the line 8-connected. Exactly `max(|dx|, |dy|) + 1` cells are yielded,
/// starting at `start` and ending at `end`.
///
/// Ties (the ideal line passing exactly between two cells) are broken towards
/// the same cell whichever end the walk starts from, so walking `end..=start`
/// yields the same cells in reverse order.
#[derive(Debug, Clone)]
pub struct LineIterator {
    cell: IVec2,
    end: IVec2,
    step: IVec2,
    /// |dx| and |dy|.
    dx: i64,
    dy: i64,
    /// Step in x while `2 * err > x_limit`, in y while `2 * err < y_limit`.
    x_limit: i64,
    y_limit: i64,
    err: i64,
    remaining: usize,
}

impl LineIterator {
    pub fn new(start: IVec2, end: IVec2) -> Self {
        let dx = (end.x as i64 - start.x as i64).abs();
        let dy = (end.y as i64 - start.y as i64).abs();
        let step = IVec2::new(
            if start.x < end.x { 1 } else { -1 },
            if start.y < end.y { 1 } else { -1 },
        );

        // Walks from the lexicographically greater end take ties the other way.
        let tie_bias = i64::from((start.x, start.y) > (end.x, end.y));

        Self {
            cell: start,
            end,
            step,
            dx,
            dy,
            x_limit: -dy - tie_bias,
            y_limit: dx + tie_bias,
            err: dx - dy,
            remaining: (dx.max(dy) + 1) as usize,
        }
    }
}

impl Iterator for LineIterator {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let cell = self.cell;
        if cell == self.end {
            self.remaining = 0;
            return Some(cell);
        }

        let e2 = 2 * self.err;
        if e2 > self.x_limit {
            self.err -= self.dy;
            self.cell.x += self.step.x;
        }
        if e2 < self.y_limit {
            self.err += self.dx;
            self.cell.y += self.step.y;
        }

        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for LineIterator {}

/// Cells on the segment from `(x0, y0)` to `(x1, y1)`, endpoints included.
pub fn rasterize(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    LineIterator::new(IVec2::new(x0, y0), IVec2::new(x1, y1))
        .map(|c| (c.x, c.y))
        .collect()
}
