//! Spanning-tree check over generated passages
//!
//! A perfect maze is a spanning tree of the grid graph: exactly
//! `rows * cols - 1` open passages and every cell reachable. Having both
//! properties rules out cycles, so no separate cycle search is needed.

use std::collections::VecDeque;

use super::passages::Passages;
use crate::error::{MazeError, Result};

pub fn validate(passages: &Passages) -> Result<()> {
    let expected = passages.cell_count() - 1;
    let found = passages.open_count();
    if found != expected {
        return Err(MazeError::PassageCount { expected, found });
    }

    let reached = reachable_from(passages, (0, 0));
    let unreachable = passages.cell_count() - reached;
    if unreachable > 0 {
        return Err(MazeError::Disconnected { unreachable });
    }

    Ok(())
}

/// Breadth-first count of cells reachable through open passages
fn reachable_from(passages: &Passages, start: (usize, usize)) -> usize {
    let mut seen = vec![vec![false; passages.cols()]; passages.rows()];
    let mut queue = VecDeque::from([start]);
    seen[start.0][start.1] = true;
    let mut count = 0;

    while let Some(cell) = queue.pop_front() {
        count += 1;
        for (row, col) in passages.open_neighbors(cell) {
            if !seen[row][col] {
                seen[row][col] = true;
                queue.push_back((row, col));
            }
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Direction;

    #[test]
    fn test_closed_grid_fails_count() {
        let p = Passages::new(2, 3).unwrap();
        assert_eq!(
            validate(&p),
            Err(MazeError::PassageCount {
                expected: 5,
                found: 0
            })
        );
    }

    #[test]
    fn test_cycle_with_stranded_cell() {
        // 2x3: loop around the left 2x2 block, right column cut off
        let mut p = Passages::new(2, 3).unwrap();
        p.open((0, 0), Direction::Right);
        p.open((0, 0), Direction::Down);
        p.open((1, 0), Direction::Right);
        p.open((0, 1), Direction::Down);
        p.open((0, 2), Direction::Down);
        assert_eq!(validate(&p), Err(MazeError::Disconnected { unreachable: 2 }));
    }

    #[test]
    fn test_valid_tree() {
        let mut p = Passages::new(2, 2).unwrap();
        p.open((0, 0), Direction::Right);
        p.open((0, 1), Direction::Down);
        p.open((1, 1), Direction::Left);
        assert_eq!(validate(&p), Ok(()));
    }

    #[test]
    fn test_single_cell_is_valid() {
        let p = Passages::new(1, 1).unwrap();
        assert_eq!(validate(&p), Ok(()));
    }
}
