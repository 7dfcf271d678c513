// vim: set ai et ts=4 sts=4 sw=4:
//! Single-line solving by exhaustive placement enumeration.
//!
//! A placement fixes the start position of every run in a line. Enumerating all
//! placements that agree with the squares already known, and intersecting them,
//! yields every square that is forced filled or forced crossed out. A line for
//! which no placement survives is contradictory.
use std::fmt;
use log::trace;
use super::super::grid::SquareStatus::{self, CrossedOut, FilledIn, Unknown};

/// Working value for a square while placements are being intersected.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
enum Tentative {
    Filled,       // filled in every placement seen so far
    Empty,        // empty in every placement seen so far
    Inconsistent, // placements disagree; stays unknown
}
impl Tentative {
    fn merge(current: Option<Tentative>, filled: bool) -> Tentative {
        let seen = if filled { Tentative::Filled } else { Tentative::Empty };
        match current {
            None                        => seen,
            Some(t) if t == seen        => seen,
            Some(_)                     => Tentative::Inconsistent,
        }
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct LineSolution {
    pub line: Vec<SquareStatus>,
    pub contradiction: bool,
}
impl LineSolution {
    fn contradicted(line: &[SquareStatus]) -> Self {
        LineSolution { line: line.to_vec(), contradiction: true }
    }
}

/// The set of run placements for one line that are still consistent with
/// what is known about its squares.
#[derive(Clone, PartialEq, Eq)]
pub struct Placements {
    runs: Vec<usize>,
    length: usize,
    starts: Vec<Vec<usize>>, // start position of each run, one entry per placement
}

impl Placements {
    /// Enumerates every placement of `runs` in `line` that does not conflict with a known square.
    pub fn enumerate(line: &[SquareStatus], runs: &[usize]) -> Self {
        let mut starts = Vec::<Vec<usize>>::new();
        let mut current = Vec::<usize>::with_capacity(runs.len());
        Self::_find_all(line, runs, 0, 0, &mut current, &mut starts);
        trace!("enumerated {} placement(s) of runs {:?} in a line of length {}", starts.len(), runs, line.len());
        Placements {
            runs: runs.to_vec(),
            length: line.len(),
            starts,
        }
    }

    fn _find_all(line: &[SquareStatus],
                 runs: &[usize],
                 run_idx: usize,
                 from: usize,
                 current: &mut Vec<usize>,
                 found: &mut Vec<Vec<usize>>)
    {
        if run_idx == runs.len() {
            // everything after the last run is blank
            if line[from..].iter().all(|&s| s != FilledIn) {
                found.push(current.clone());
            }
            return;
        }

        // space needed by this run and every run after it, separators included
        let required: usize = runs[run_idx..].iter().sum::<usize>() + (runs.len() - run_idx - 1);
        if from + required > line.len() {
            return;
        }
        let last_start = line.len() - required;
        let run_length = runs[run_idx];

        for start in from..=last_start {
            // squares in front of the run (from..start) are blank; once a filled
            // square falls into that gap, every later start is ruled out too
            if start > from && line[start-1] == FilledIn {
                break;
            }
            let end = start + run_length;
            if line[start..end].iter().any(|&s| s == CrossedOut) {
                continue;
            }
            if end < line.len() && line[end] == FilledIn {
                continue;
            }

            current.push(start);
            let next_from = if end < line.len() { end + 1 } else { end };
            Self::_find_all(line, runs, run_idx + 1, next_from, current, found);
            current.pop();
        }
    }

    pub fn len(&self) -> usize { self.starts.len() }
    pub fn is_empty(&self) -> bool { self.starts.is_empty() }

    fn _agrees_with(filled: &[bool], line: &[SquareStatus]) -> bool {
        filled.iter().zip(line.iter()).all(|(&f, &s)| match s {
            FilledIn   => f,
            CrossedOut => !f,
            Unknown    => true,
        })
    }

    /// Drops every placement that disagrees with a known square of `line`, then
    /// intersects the remaining ones.
    pub fn solve(&mut self, line: &[SquareStatus]) -> LineSolution {
        assert_eq!(line.len(), self.length, "line length does not match the enumerated placements");

        let mut working: Vec<Option<Tentative>> = vec![None; self.length];
        let mut surviving = Vec::<Vec<usize>>::with_capacity(self.starts.len());

        for starts in self.starts.drain(..) {
            let filled = materialize(&self.runs, &starts, self.length);
            if !Self::_agrees_with(&filled, line) {
                continue;
            }
            for (w, &f) in working.iter_mut().zip(filled.iter()) {
                *w = Some(Tentative::merge(*w, f));
            }
            surviving.push(starts);
        }
        self.starts = surviving;

        if self.starts.is_empty() {
            return LineSolution::contradicted(line);
        }

        let resolved = line.iter()
                           .zip(working.iter())
                           .map(|(&known, &w)| match (known, w) {
                               (Unknown, Some(Tentative::Filled)) => FilledIn,
                               (Unknown, Some(Tentative::Empty))  => CrossedOut,
                               (status, _)                        => status,
                           })
                           .collect();
        LineSolution { line: resolved, contradiction: false }
    }
}

fn materialize(runs: &[usize], starts: &[usize], length: usize) -> Vec<bool> {
    let mut filled = vec![false; length];
    for (&start, &run_length) in starts.iter().zip(runs.iter()) {
        for square in filled[start..start+run_length].iter_mut() {
            *square = true;
        }
    }
    filled
}

impl fmt::Debug for Placements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Placements(runs={:?}, length={}, count={})", self.runs, self.length, self.starts.len())
    }
}

/// Solves a single line from scratch.
///
/// Returns the most constrained line consistent with `runs`, or the input line
/// with `contradiction` set when no placement fits.
pub fn solve_line(line: &[SquareStatus], runs: &[usize]) -> LineSolution {
    let min_length = runs.iter().sum::<usize>() + runs.len().saturating_sub(1);
    if min_length > line.len() {
        return LineSolution::contradicted(line);
    }
    Placements::enumerate(line, runs).solve(line)
}

/// Derives the run lengths of a fully determined line; `None` if any square is still unknown.
pub fn calculate_runs(line: &[SquareStatus]) -> Option<Vec<usize>> {
    let mut runs = Vec::<usize>::new();
    let mut last_filled = false;
    for &square in line {
        match square {
            FilledIn => {
                match (last_filled, runs.last_mut()) {
                    (true, Some(last)) => *last += 1,
                    _                  => runs.push(1),
                }
            }
            CrossedOut => {}
            Unknown    => return None,
        }
        last_filled = square == FilledIn;
    }
    Some(runs)
}
