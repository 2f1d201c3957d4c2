//! Randomized depth-first carve ("recursive backtracker")
//!
//! The traversal runs on an explicit stack of frames instead of recursion so
//! that serpentine mazes of any size cannot overflow the call stack. A child
//! frame is pushed, and its candidates shuffled, at exactly the point where a
//! recursive walk would recurse, so visiting order and RNG draws match the
//! recursive formulation step for step.

use rand::Rng;

use super::passages::{Cell, Direction, Passages};
use crate::error::Result;

/// Randomness consumed by the generator
pub trait MazeRng {
    /// Pick the cell the carve starts from
    fn start_cell(&mut self, rows: usize, cols: usize) -> Cell;

    /// Reorder neighbor candidates in place
    fn shuffle(&mut self, dirs: &mut [Direction]);
}

impl<R: Rng + ?Sized> MazeRng for R {
    fn start_cell(&mut self, rows: usize, cols: usize) -> Cell {
        (self.random_range(0..rows), self.random_range(0..cols))
    }

    fn shuffle(&mut self, dirs: &mut [Direction]) {
        // Fisher-Yates from the back, swapping with an index in [0, i]
        for i in (0..dirs.len()).rev() {
            let j = self.random_range(0..=i);
            dirs.swap(i, j);
        }
    }
}

/// A cell whose candidates are still being walked
struct Frame {
    cell: Cell,
    dirs: [Direction; 4],
    next: usize,
}

impl Frame {
    fn enter<R: MazeRng + ?Sized>(cell: Cell, rng: &mut R) -> Self {
        let mut dirs = Direction::ALL;
        rng.shuffle(&mut dirs);
        Self { cell, dirs, next: 0 }
    }
}

/// Carve a perfect maze over a `rows` x `cols` grid
pub fn generate<R: MazeRng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Passages> {
    let mut passages = Passages::new(rows, cols)?;
    let mut visited = vec![vec![false; cols]; rows];

    let start = rng.start_cell(rows, cols);
    visited[start.0][start.1] = true;
    let mut stack = vec![Frame::enter(start, rng)];

    while let Some(frame) = stack.last_mut() {
        let Some(&dir) = frame.dirs.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let cell = frame.cell;

        let Some(next) = passages.neighbor(cell, dir) else {
            continue;
        };
        if visited[next.0][next.1] {
            continue;
        }

        passages.open(cell, dir);
        visited[next.0][next.1] = true;
        stack.push(Frame::enter(next, rng));
    }

    log::debug!(
        "Carved {}x{} maze from {:?}: {} passages open",
        rows,
        cols,
        start,
        passages.open_count()
    );

    Ok(passages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MazeError;
    use crate::maze::validate;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Always starts at the top-left and never reorders candidates
    struct Unshuffled;

    impl MazeRng for Unshuffled {
        fn start_cell(&mut self, _rows: usize, _cols: usize) -> Cell {
            (0, 0)
        }

        fn shuffle(&mut self, _dirs: &mut [Direction]) {}
    }

    fn grid(rows: &[&str]) -> Vec<Vec<bool>> {
        rows.iter()
            .map(|r| r.chars().map(|c| c == '1').collect())
            .collect()
    }

    /// Depth-first carve written as plain recursion
    fn carve_recursive<R: MazeRng>(
        passages: &mut Passages,
        visited: &mut [Vec<bool>],
        cell: Cell,
        rng: &mut R,
    ) {
        if visited[cell.0][cell.1] {
            return;
        }
        visited[cell.0][cell.1] = true;

        let mut dirs = Direction::ALL;
        rng.shuffle(&mut dirs);
        for dir in dirs {
            let Some(next) = passages.neighbor(cell, dir) else {
                continue;
            };
            if visited[next.0][next.1] {
                continue;
            }
            passages.open(cell, dir);
            carve_recursive(passages, visited, next, rng);
        }
    }

    #[test]
    fn test_golden_6x6() {
        let maze = generate(6, 6, &mut Unshuffled).unwrap();

        let verticals = grid(&[
            "11111", //
            "01010", //
            "00000", //
            "00000", //
            "00000", //
            "10101",
        ]);
        let horizontals = grid(&[
            "000001", //
            "111111", //
            "111111", //
            "111111", //
            "111111",
        ]);
        assert_eq!(maze.verticals(), verticals.as_slice());
        assert_eq!(maze.horizontals(), horizontals.as_slice());
        assert_eq!(validate(&maze), Ok(()));
    }

    #[test]
    fn test_rejects_invalid_dimensions() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(
            generate(0, 5, &mut rng),
            Err(MazeError::InvalidDimensions { rows: 0, cols: 5 })
        );
        assert!(generate(5, 0, &mut rng).is_err());
    }

    #[test]
    fn test_single_cell() {
        let mut rng = Pcg32::seed_from_u64(7);
        let maze = generate(1, 1, &mut rng).unwrap();
        assert_eq!(maze.open_count(), 0);
        assert_eq!(validate(&maze), Ok(()));
    }

    #[test]
    fn test_single_row_is_a_corridor() {
        let mut rng = Pcg32::seed_from_u64(3);
        let maze = generate(1, 8, &mut rng).unwrap();
        assert!(maze.verticals()[0].iter().all(|&open| open));
    }

    #[test]
    fn test_determinism() {
        let a = generate(15, 20, &mut Pcg32::seed_from_u64(99999)).unwrap();
        let b = generate(15, 20, &mut Pcg32::seed_from_u64(99999)).unwrap();
        assert_eq!(a, b);

        let c = generate(15, 20, &mut Pcg32::seed_from_u64(12345)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_large_serpentine_does_not_overflow() {
        // The unshuffled walk is one long path of depth rows * cols
        let maze = generate(300, 300, &mut Unshuffled).unwrap();
        assert_eq!(maze.open_count(), 300 * 300 - 1);
    }

    #[test]
    fn test_matches_recursive_walk() {
        for seed in 0..64 {
            let rows = 1 + (seed as usize % 12);
            let cols = 1 + (seed as usize * 7 % 12);

            let mut rng = Pcg32::seed_from_u64(seed);
            let mut expected = Passages::new(rows, cols).unwrap();
            let mut visited = vec![vec![false; cols]; rows];
            let start = rng.start_cell(rows, cols);
            carve_recursive(&mut expected, &mut visited, start, &mut rng);

            let carved = generate(rows, cols, &mut Pcg32::seed_from_u64(seed)).unwrap();
            assert_eq!(carved, expected, "seed {seed}, {rows}x{cols}");
        }
    }

    #[test]
    fn test_shuffle_keeps_every_direction() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..32 {
            let mut dirs = Direction::ALL;
            rng.shuffle(&mut dirs);
            for dir in Direction::ALL {
                assert!(dirs.contains(&dir));
            }
        }
    }

    proptest! {
        #[test]
        fn prop_generates_spanning_tree(rows in 1usize..24, cols in 1usize..24, seed: u64) {
            let maze = generate(rows, cols, &mut Pcg32::seed_from_u64(seed)).unwrap();
            prop_assert_eq!(maze.open_count(), rows * cols - 1);
            prop_assert_eq!(validate(&maze), Ok(()));
        }

        #[test]
        fn prop_start_cell_in_bounds(rows in 1usize..64, cols in 1usize..64, seed: u64) {
            let (row, col) = Pcg32::seed_from_u64(seed).start_cell(rows, cols);
            prop_assert!(row < rows);
            prop_assert!(col < cols);
        }
    }
}
