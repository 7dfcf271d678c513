// vim: set ai et ts=4 sts=4 sw=4:
//! Nonogram solving by line logic.
//!
//! A [`Puzzle`] holds the runs of every row and column plus the grid of squares.
//! A [`Solver`] scans the lines of a puzzle, deducing squares line by line until
//! nothing changes, a line contradicts its runs, or a step budget runs out.
//! [`worker::SolverWorker`] runs a solver on its own thread behind a message channel.
//!
//! ```
//! use nonogram::{Puzzle, Solver, SolverConfig, Outcome};
//!
//! let puzzle = Puzzle::new(&[vec![3], vec![1], vec![1]],
//!                          &[vec![1], vec![3], vec![1]]).unwrap();
//! let mut solver = Solver::new(puzzle, SolverConfig::default());
//! assert_eq!(solver.solve(), Ok(Outcome::Success { complete: true }));
//! ```
pub mod util;
pub mod grid;
pub mod row;
pub mod puzzle;
pub mod worker;

pub use self::util::Direction;
pub use self::grid::{Grid, SquareStatus, StatusChange, StatusError};
pub use self::row::solver::{solve_line, calculate_runs, LineSolution};
pub use self::puzzle::{Puzzle, PuzzleError};
pub use self::puzzle::solver::{Error, Mode, Outcome, ScanStep, Scanner, Snapshot, SolveEvent, Solver, SolverConfig, State};
