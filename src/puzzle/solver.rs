// vim: set ai et ts=4 sts=4 sw=4:
//! Line-by-line scanning of a puzzle until no more deductions can be made.
//!
//! The [`Solver`] owns a [`Puzzle`] and moves a [`Scanner`] round-robin over all
//! rows, then all columns, solving each line that changed since it was last
//! looked at and writing the deductions back into the grid. Scanning stops at a
//! fixpoint (a full pass changes nothing), at the first contradictory line, or
//! when the configured step budget runs out.
//!
//! Two ways of driving it:
//!  * batch: [`Solver::solve`] runs to completion in one go;
//!  * paced: the solver is an [`Iterator`] yielding one [`ScanStep`] per line,
//!    and [`Solver::run`] reports a [`SolveEvent`] after each step.
use std::fmt;
use std::error;
use std::thread;
use std::time::{Duration, Instant};
use log::{debug, info, trace, warn};

use super::Puzzle;
use super::super::grid::{Grid, SquareStatus, StatusChange, StatusError, Changes};
use super::super::util::{Direction, Direction::*};

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Mode {
    Batch,
    Paced,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct SolverConfig {
    pub mode: Mode,
    pub delay: Duration,           // pause between steps in paced mode
    pub max_steps: Option<usize>,  // give up after this many line scans
}
impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            mode: Mode::Batch,
            delay: Duration::from_millis(50),
            max_steps: None,
        }
    }
}

// ------------------------------------------------

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct Scanner {
    pub direction: Direction,
    pub index: usize,
    pub contradiction: bool,
}
impl Scanner {
    fn new(direction: Direction, index: usize) -> Self {
        Scanner { direction, index, contradiction: false }
    }
    /// The line after this one: all rows first, then all columns, then around again.
    fn next(&self, grid: &Grid) -> Self {
        if self.index + 1 < grid.line_count(self.direction) {
            Scanner::new(self.direction, self.index + 1)
        } else {
            Scanner::new(self.direction.orthogonal(), 0)
        }
    }
}
impl fmt::Display for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.direction.line_name(), self.index)
    }
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Outcome {
    /// No further deductions; `complete` tells whether every square is known and correct.
    Success { complete: bool },
    /// No placement of this line agrees with the grid.
    Contradiction { direction: Direction, index: usize },
    /// The step budget ran out before a fixpoint was reached.
    GaveUp { steps: usize },
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum State {
    Idle,
    Scanning,
    Converged(Outcome),
}

#[derive(PartialEq, Debug, Clone)]
pub enum ScanStep {
    Scanned { direction: Direction, index: usize, changes: Changes },
    Finished(Outcome),
}

/// Read-only copy of the solver's state, for renderers and other threads.
#[derive(PartialEq, Debug, Clone)]
pub struct Snapshot {
    pub grid: Grid,
    pub row_runs: Vec<Vec<usize>>,
    pub col_runs: Vec<Vec<usize>>,
    pub rows_completed: Vec<bool>,
    pub cols_completed: Vec<bool>,
    pub scanner: Option<Scanner>,
    pub state: State,
}

#[derive(PartialEq, Debug, Clone)]
pub enum SolveEvent {
    Update(Snapshot),
    Success { elapsed: Duration, complete: bool },
    Error { direction: Direction, index: usize },
    GaveUp { steps: usize },
}

// ------------------------------------------------

#[derive(PartialEq, Debug, Clone)]
pub enum Error {
    Busy,                              // a scan is in progress
    OutOfBounds { x: usize, y: usize },
    InvalidSeed(SquareStatus),         // only FilledIn or CrossedOut can be seeded
    Status(StatusError),
}
impl From<StatusError> for Error {
    fn from(other: StatusError) -> Self {
        Error::Status(other)
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Busy                => write!(f, "Solver is busy scanning"),
            Error::OutOfBounds { x, y } => write!(f, "Square (col={}, row={}) is outside the grid", x, y),
            Error::InvalidSeed(status) => write!(f, "Cannot seed a square with status {}", status),
            Error::Status(x)           => write!(f, "{}", x),
        }
    }
}
impl error::Error for Error {}

// ------------------------------------------------

#[derive(Debug)]
pub struct Solver {
    pub config: SolverConfig,
    puzzle: Puzzle,
    iterations: usize,
    state: State,
    scanner: Option<Scanner>,
    started: Option<Instant>,
    elapsed: Option<Duration>,
}

impl Solver {
    pub fn new(puzzle: Puzzle, config: SolverConfig) -> Self {
        Solver {
            puzzle,
            config,
            iterations: 0,
            state: State::Idle,
            scanner: None,
            started: None,
            elapsed: None,
        }
    }

    pub fn puzzle(&self) -> &Puzzle { &self.puzzle }
    /// Lines scanned by the current or last scan.
    pub fn iterations(&self) -> usize { self.iterations }
    pub fn state(&self) -> State { self.state }
    pub fn scanner(&self) -> Option<Scanner> { self.scanner }
    pub fn is_busy(&self) -> bool { self.state == State::Scanning }
    /// Wall time of the last scan that reached a terminal state.
    pub fn elapsed(&self) -> Option<Duration> { self.elapsed }
    pub fn into_puzzle(self) -> Puzzle { self.puzzle }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.puzzle.grid.clone(),
            row_runs: self.puzzle.row_run_lengths(),
            col_runs: self.puzzle.col_run_lengths(),
            rows_completed: self.puzzle.rows.iter().map(|row| row.completed).collect(),
            cols_completed: self.puzzle.cols.iter().map(|col| col.completed).collect(),
            scanner: self.scanner,
            state: self.state,
        }
    }

    /// Begins a new scan. Rejected while one is already running.
    pub fn start(&mut self) -> Result<(), Error> {
        if self.is_busy() {
            return Err(Error::Busy);
        }
        self._begin();
        Ok(())
    }

    fn _begin(&mut self) {
        debug!("starting scan of {}x{} puzzle", self.puzzle.width(), self.puzzle.height());
        self.state = State::Scanning;
        self.scanner = None;
        self.iterations = 0;
        self.started = Some(Instant::now());
        self.elapsed = None;
    }

    /// Scans until the puzzle converges, starting a scan first if none is running.
    pub fn finish(&mut self) -> Outcome {
        loop {
            if let State::Converged(outcome) = self.state {
                return outcome;
            }
            self.scan_step();
        }
    }

    /// Batch mode: runs a complete scan without pausing.
    pub fn solve(&mut self) -> Result<Outcome, Error> {
        self.start()?;
        Ok(self.finish())
    }

    /// Runs a complete scan, reporting progress to `observer`. In paced mode every
    /// step is followed by an update event and a pause of `config.delay`.
    pub fn run<F>(&mut self, mut observer: F) -> Result<Outcome, Error>
        where F: FnMut(&SolveEvent)
    {
        self.start()?;
        loop {
            match self.scan_step() {
                ScanStep::Finished(outcome) => {
                    observer(&self._event_for(outcome));
                    return Ok(outcome);
                }
                ScanStep::Scanned { .. } => {
                    if self.config.mode == Mode::Paced {
                        observer(&SolveEvent::Update(self.snapshot()));
                        if self.config.delay > Duration::from_millis(0) {
                            thread::sleep(self.config.delay);
                        }
                    }
                }
            }
        }
    }

    fn _event_for(&self, outcome: Outcome) -> SolveEvent {
        match outcome {
            Outcome::Success { complete }          => SolveEvent::Success {
                elapsed: self.elapsed.unwrap_or_default(),
                complete,
            },
            Outcome::Contradiction { direction, index } => SolveEvent::Error { direction, index },
            Outcome::GaveUp { steps }                  => SolveEvent::GaveUp { steps },
        }
    }

    /// Abandons a running scan between steps. Deductions made so far stay in the grid.
    pub fn stop(&mut self) {
        if self.is_busy() {
            info!("scan stopped after {} step(s)", self.iterations);
            self.state = State::Idle;
            self.scanner = None;
        }
    }

    /// Clears the grid and all line bookkeeping, keeping the runs.
    pub fn refresh(&mut self) -> Result<(), Error> {
        if self.is_busy() {
            return Err(Error::Busy);
        }
        self.puzzle.reset();
        self.state = State::Idle;
        self.scanner = None;
        self.iterations = 0;
        self.started = None;
        self.elapsed = None;
        Ok(())
    }

    /// Fixes one square from outside (e.g. a user guess). The square's row and
    /// column are marked changed and the solver drops back to idle, so the next
    /// `solve()`, `run()` or `next()` propagates the consequences.
    pub fn seed_square(&mut self, x: usize, y: usize, status: SquareStatus)
        -> Result<Option<StatusChange>, Error>
    {
        if self.is_busy() {
            return Err(Error::Busy);
        }
        if !self.puzzle.grid.contains(x, y) {
            return Err(Error::OutOfBounds { x, y });
        }
        if status == SquareStatus::Unknown {
            return Err(Error::InvalidSeed(status));
        }

        let change = self.puzzle.grid.set_square(x, y, status)?;
        if let Some(ref c) = change {
            debug!("seeded: {}", c);
            self.puzzle.rows[y].unchanged = false;
            self.puzzle.cols[x].unchanged = false;
            self.state = State::Idle;
            self.scanner = None;
        }
        Ok(change)
    }

    /// Performs one step: either scans the next line that needs it, or
    /// concludes the scan. Starts a scan if the solver is idle.
    fn scan_step(&mut self) -> ScanStep {
        match self.state {
            State::Converged(outcome) => return ScanStep::Finished(outcome),
            State::Idle               => self._begin(),
            State::Scanning           => {}
        }

        let scanner = match self._advance_scanner() {
            Some(s) => s,
            None    => {
                let complete = self.puzzle.is_solved();
                return self._converge(Outcome::Success { complete });
            }
        };
        if let Some(max_steps) = self.config.max_steps {
            if self.iterations >= max_steps {
                return self._converge(Outcome::GaveUp { steps: self.iterations });
            }
        }
        self.iterations += 1;

        let Scanner { direction, index, .. } = scanner;
        debug!("step {}: scanning {}", self.iterations, scanner);

        let line = self.puzzle.get_line(direction, index);
        let row = self.puzzle.get_row_mut(direction, index);
        row.unchanged = true;
        let solution = row.solve(&line);

        let changes = match solution.contradiction {
            false => self._set_back_to_grid(direction, index, &solution.line),
            true  => Err(()),
        };
        let changes = match changes {
            Ok(changes) => changes,
            Err(())     => {
                self.puzzle.get_row_mut(direction, index).unchanged = false;
                if let Some(s) = self.scanner.as_mut() {
                    s.contradiction = true;
                }
                return self._converge(Outcome::Contradiction { direction, index });
            }
        };

        if self.puzzle.is_line_correct(direction, index) {
            self.puzzle.get_row_mut(direction, index).completed = true;
        }
        ScanStep::Scanned { direction, index, changes }
    }

    /// Moves the scanner to the next line that is neither completed nor unchanged.
    /// Returns `None` once every line is settled.
    fn _advance_scanner(&mut self) -> Option<Scanner> {
        loop {
            let settled = self.puzzle.rows.iter()
                                          .chain(self.puzzle.cols.iter())
                                          .all(|row| row.unchanged || row.completed);
            if settled {
                self.scanner = None;
                return None;
            }

            let next = match self.scanner {
                None    => Scanner::new(Horizontal, 0),
                Some(s) => s.next(&self.puzzle.grid),
            };
            self.scanner = Some(next);

            let row = self.puzzle.get_row(next.direction, next.index);
            if !(row.completed || row.unchanged) {
                return Some(next);
            }
        }
    }

    /// Writes the known squares of a solved line into the grid. Every square that
    /// actually changes wakes up the line crossing it.
    fn _set_back_to_grid(&mut self, direction: Direction, index: usize, line: &[SquareStatus])
        -> Result<Changes, ()>
    {
        let mut changes = Vec::<StatusChange>::new();
        for (at, &status) in line.iter().enumerate() {
            if status == SquareStatus::Unknown {
                continue;
            }
            let (x, y) = Grid::square_index(direction, index, at);
            match self.puzzle.grid.set_square(x, y, status) {
                Ok(Some(change)) => {
                    trace!("{}", change);
                    self.puzzle.get_row_mut(direction.orthogonal(), at).unchanged = false;
                    changes.push(change);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("{} {}: {}", direction.line_name(), index, e);
                    return Err(());
                }
            }
        }
        Ok(changes)
    }

    fn _converge(&mut self, outcome: Outcome) -> ScanStep {
        self.elapsed = self.started.map(|t| t.elapsed());
        self.state = State::Converged(outcome);
        match outcome {
            Outcome::Success { complete } => {
                self.scanner = None;
                info!("converged after {} step(s): {}", self.iterations,
                      if complete { "solved" } else { "no further deductions" });
            }
            Outcome::Contradiction { direction, index } => {
                warn!("bad runs at {} {}", direction.line_name(), index + 1);
            }
            Outcome::GaveUp { steps } => {
                warn!("gave up after {} step(s)", steps);
            }
        }
        ScanStep::Finished(outcome)
    }
}

/// Paced mode: each call scans one line. Yields `ScanStep::Finished` once when the
/// scan concludes, and `None` after that until the solver is restarted.
impl Iterator for Solver {
    type Item = ScanStep;

    fn next(&mut self) -> Option<ScanStep> {
        if let State::Converged(_) = self.state {
            return None;
        }
        Some(self.scan_step())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::super::grid::SquareStatus::*;

    fn solver(rows: &[Vec<usize>], cols: &[Vec<usize>]) -> Solver {
        Solver::new(Puzzle::new(rows, cols).unwrap(), SolverConfig::default())
    }
    fn squares(solver: &Solver) -> Vec<String> {
        solver.puzzle.grid.rows()
              .map(|row| row.iter().map(|s| match s {
                  FilledIn   => '#',
                  CrossedOut => 'x',
                  Unknown    => '.',
              }).collect())
              .collect()
    }
    fn assert_runs_round_trip(solver: &Solver) {
        for y in 0..solver.puzzle.height() {
            assert_eq!(solver.puzzle.calculate_runs(Horizontal, y), Some(solver.puzzle.rows[y].run_lengths()));
        }
        for x in 0..solver.puzzle.width() {
            assert_eq!(solver.puzzle.calculate_runs(Vertical, x), Some(solver.puzzle.cols[x].run_lengths()));
        }
    }

    #[test]
    fn solves_the_letter_h() {
        let mut solver = solver(&[vec![1, 1], vec![1, 1], vec![5], vec![1, 1], vec![1, 1]],
                                &[vec![5], vec![1], vec![1], vec![1], vec![5]]);
        assert_eq!(solver.solve(), Ok(Outcome::Success { complete: true }));
        assert_eq!(squares(&solver), vec!["#xxx#", "#xxx#", "#####", "#xxx#", "#xxx#"]);
        assert_runs_round_trip(&solver);
        assert!(solver.scanner().is_none());
        assert!(solver.elapsed().is_some());
    }

    #[test]
    fn solves_stacked_bars() {
        let mut solver = solver(&[vec![5], vec![1, 1], vec![5], vec![1, 1], vec![5]],
                                &[vec![5], vec![1, 1, 1], vec![1, 1, 1], vec![1, 1, 1], vec![5]]);
        assert_eq!(solver.solve(), Ok(Outcome::Success { complete: true }));
        assert_eq!(squares(&solver), vec!["#####", "#xxx#", "#####", "#xxx#", "#####"]);
        assert_runs_round_trip(&solver);
        assert!(solver.puzzle.rows.iter().chain(solver.puzzle.cols.iter()).all(|r| r.completed));
    }

    #[test]
    fn fills_a_single_column() {
        let mut solver = solver(&vec![vec![1]; 5],
                                &[vec![5], vec![], vec![], vec![], vec![]]);
        assert_eq!(solver.solve(), Ok(Outcome::Success { complete: true }));
        assert_eq!(squares(&solver), vec!["#xxxx"; 5]);
    }

    #[test]
    fn ambiguous_puzzle_converges_with_unknowns() {
        let mut solver = solver(&[vec![1], vec![1]], &[vec![1], vec![1]]);
        assert_eq!(solver.solve(), Ok(Outcome::Success { complete: false }));
        assert_eq!(solver.puzzle.grid.num_known(), 0);
        assert!(!solver.puzzle.is_solved());
    }

    #[test]
    fn seeding_propagates_a_guess() {
        let mut solver = solver(&[vec![1], vec![1]], &[vec![1], vec![1]]);
        solver.solve().unwrap();

        let change = solver.seed_square(0, 0, FilledIn).unwrap();
        assert_eq!(change, Some(StatusChange::new(0, 0, Unknown, FilledIn)));
        assert_eq!(solver.state(), State::Idle);
        assert_eq!(solver.solve(), Ok(Outcome::Success { complete: true }));
        assert_eq!(squares(&solver), vec!["#x", "x#"]);
    }

    #[test]
    fn seeds_accumulate_until_the_next_solve() {
        let mut solver = solver(&[vec![1], vec![1], vec![1]], &[vec![1], vec![1], vec![1]]);
        assert_eq!(solver.solve(), Ok(Outcome::Success { complete: false }));

        assert!(solver.seed_square(0, 0, FilledIn).unwrap().is_some());
        assert!(!solver.is_busy());
        assert!(solver.seed_square(1, 1, FilledIn).unwrap().is_some());
        assert_eq!(solver.state(), State::Idle);

        let mut events = Vec::<SolveEvent>::new();
        assert_eq!(solver.run(|e| events.push(e.clone())), Ok(Outcome::Success { complete: true }));
        assert!(matches!(events.as_slice(), [SolveEvent::Success { complete: true, .. }]));
        assert_eq!(squares(&solver), vec!["#xx", "x#x", "xx#"]);
    }

    #[test]
    fn seeding_the_same_status_twice_is_a_no_op() {
        let mut solver = solver(&[vec![1], vec![1]], &[vec![1], vec![1]]);
        assert!(solver.seed_square(1, 1, CrossedOut).unwrap().is_some());
        solver.finish();
        assert_eq!(solver.seed_square(1, 1, CrossedOut), Ok(None));
        assert!(!solver.is_busy());
    }

    #[test]
    fn seeding_validates_its_input() {
        let mut solver = solver(&[vec![1], vec![1]], &[vec![1], vec![1]]);
        assert_eq!(solver.seed_square(2, 0, FilledIn), Err(Error::OutOfBounds { x: 2, y: 0 }));
        assert_eq!(solver.seed_square(0, 0, Unknown), Err(Error::InvalidSeed(Unknown)));

        solver.seed_square(0, 0, FilledIn).unwrap();
        solver.finish();
        match solver.seed_square(0, 0, CrossedOut) {
            Err(Error::Status(StatusError::ChangeRejected(change, _))) => assert_eq!(change.old, FilledIn),
            other => panic!("expected a rejected change, got {:?}", other),
        }
    }

    #[test]
    fn contradiction_in_the_seeded_row() {
        let mut solver = solver(&[vec![2, 2]], &[vec![1], vec![1], vec![], vec![1], vec![1]]);
        solver.seed_square(2, 0, FilledIn).unwrap();
        assert_eq!(solver.finish(), Outcome::Contradiction { direction: Horizontal, index: 0 });
        assert_eq!(solver.scanner().map(|s| s.contradiction), Some(true));
        assert!(!solver.puzzle.rows[0].unchanged);
    }

    #[test]
    fn contradiction_found_in_crossing_column() {
        let mut solver = solver(&[vec![1], vec![1]], &[vec![2], vec![]]);
        solver.seed_square(1, 0, FilledIn).unwrap();
        assert_eq!(solver.finish(), Outcome::Contradiction { direction: Vertical, index: 0 });
        assert_eq!(squares(&solver)[0], "x#");

        // asking again finds the same line
        assert_eq!(solver.solve(), Ok(Outcome::Contradiction { direction: Vertical, index: 0 }));
    }

    #[test]
    fn busy_solver_rejects_reentry() {
        let mut solver = solver(&[vec![5], vec![1, 1], vec![5], vec![1, 1], vec![5]],
                                &[vec![5], vec![1, 1, 1], vec![1, 1, 1], vec![1, 1, 1], vec![5]]);
        solver.start().unwrap();
        assert!(solver.next().is_some());
        let before = solver.snapshot();

        assert_eq!(solver.start(), Err(Error::Busy));
        assert_eq!(solver.solve(), Err(Error::Busy));
        assert_eq!(solver.refresh(), Err(Error::Busy));
        assert_eq!(solver.seed_square(1, 1, FilledIn), Err(Error::Busy));
        assert_eq!(solver.snapshot(), before);

        solver.stop();
        assert_eq!(solver.state(), State::Idle);
        assert_eq!(solver.solve(), Ok(Outcome::Success { complete: true }));
    }

    #[test]
    fn iterating_scans_one_line_per_step() {
        let mut solver = solver(&[vec![1, 1], vec![1, 1], vec![5], vec![1, 1], vec![1, 1]],
                                &[vec![5], vec![1], vec![1], vec![1], vec![5]]);
        let steps = solver.by_ref().collect::<Vec<_>>();

        assert_eq!(steps.last(), Some(&ScanStep::Finished(Outcome::Success { complete: true })));
        let scanned = steps.iter().filter(|s| matches!(s, ScanStep::Scanned { .. })).count();
        assert_eq!(scanned, solver.iterations);
        assert_eq!(steps[0], ScanStep::Scanned {
            direction: Horizontal,
            index: 0,
            changes: vec![],
        });
        // the full row is the first deduction
        match &steps[2] {
            ScanStep::Scanned { direction: Horizontal, index: 2, changes } => assert_eq!(changes.len(), 5),
            other => panic!("unexpected step {:?}", other),
        }
        assert!(solver.next().is_none());
    }

    #[test]
    fn step_budget_gives_up() {
        let mut solver = solver(&[vec![1, 1], vec![1, 1], vec![5], vec![1, 1], vec![1, 1]],
                                &[vec![5], vec![1], vec![1], vec![1], vec![5]]);
        solver.config.max_steps = Some(3);
        assert_eq!(solver.solve(), Ok(Outcome::GaveUp { steps: 3 }));
        assert_eq!(solver.iterations, 3);
    }

    #[test]
    fn refresh_clears_the_grid() {
        let mut solver = solver(&vec![vec![1]; 5],
                                &[vec![5], vec![], vec![], vec![], vec![]]);
        solver.solve().unwrap();
        solver.refresh().unwrap();
        assert_eq!(solver.state(), State::Idle);
        assert_eq!(solver.puzzle.grid.num_known(), 0);
        assert!(solver.puzzle.rows.iter().all(|r| !r.completed && !r.unchanged));
        assert_eq!(solver.solve(), Ok(Outcome::Success { complete: true }));
    }

    #[test]
    fn paced_run_reports_every_step() {
        let mut solver = solver(&[vec![1, 1], vec![1, 1], vec![5], vec![1, 1], vec![1, 1]],
                                &[vec![5], vec![1], vec![1], vec![1], vec![5]]);
        solver.config.mode = Mode::Paced;
        solver.config.delay = Duration::from_millis(0);

        let mut events = Vec::<SolveEvent>::new();
        let outcome = solver.run(|e| events.push(e.clone())).unwrap();
        assert_eq!(outcome, Outcome::Success { complete: true });

        let updates = events.iter().filter(|e| matches!(e, SolveEvent::Update(_))).count();
        assert_eq!(updates, solver.iterations);
        assert!(matches!(events.last(), Some(SolveEvent::Success { complete: true, .. })));
        match &events[0] {
            SolveEvent::Update(snapshot) => {
                assert_eq!(snapshot.state, State::Scanning);
                assert_eq!(snapshot.scanner.map(|s| (s.direction, s.index)), Some((Horizontal, 0)));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn batch_run_reports_only_the_outcome() {
        let mut solver = solver(&[vec![1], vec![1]], &[vec![2], vec![]]);
        solver.seed_square(1, 0, FilledIn).unwrap();

        let mut events = Vec::<SolveEvent>::new();
        solver.run(|e| events.push(e.clone())).unwrap();
        assert_eq!(events, vec![SolveEvent::Error { direction: Vertical, index: 0 }]);
    }

    #[test]
    fn snapshots_are_copies() {
        let mut solver = solver(&vec![vec![1]; 5],
                                &[vec![5], vec![], vec![], vec![], vec![]]);
        let before = solver.snapshot();
        solver.solve().unwrap();
        assert_eq!(before.grid.num_known(), 0);
        assert_eq!(before.state, State::Idle);

        let after = solver.snapshot();
        assert!(after.grid.is_fully_determined());
        assert_eq!(after.col_runs[0], vec![5]);
        assert!(after.rows_completed.iter().all(|&c| c));
        assert_eq!(after.state, State::Converged(Outcome::Success { complete: true }));
    }
}
