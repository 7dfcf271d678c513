// vim: set ai et ts=4 sw=4 sts=4:
pub mod solver;

use std::fmt;
use ansi_term::{Colour, Style, ANSIString};
use log::debug;

use super::util::Direction;
use super::grid::SquareStatus::{self, Unknown};
use self::solver::{LineSolution, Placements, calculate_runs};

/// One row or column of the puzzle: its runs plus the scan bookkeeping for it.
#[derive(Debug, Clone)]
pub struct Row {
    pub direction:  Direction,
    pub index:      usize,
    pub length:     usize,
    pub runs:       Vec<Run>,
    pub completed:  bool, // squares in the grid match the runs exactly
    pub unchanged:  bool, // no square in this row was written since it was last scanned
    placements:     Option<Placements>,
}

impl Row {
    pub fn new(direction: Direction,
               row_index: usize,
               row_length: usize,
               run_lengths: &[usize]) -> Self
    {
        let runs = run_lengths.iter()
                              .enumerate()
                              .map(|(i, &len)| Run::new(direction, i, row_index, len))
                              .collect::<Vec<_>>();
        Row {
            direction,
            index:      row_index,
            length:     row_length,
            runs,
            completed:  false,
            unchanged:  false,
            placements: None,
        }
    }

    pub fn run_lengths(&self) -> Vec<usize> {
        self.runs.iter().map(|run| run.length).collect()
    }
    /// Number of squares needed to fit all runs with a single separator between each.
    pub fn min_length(&self) -> usize {
        self.runs.iter().map(|run| run.length).sum::<usize>() + self.runs.len().saturating_sub(1)
    }
    pub fn filled_total(&self) -> usize {
        self.runs.iter().map(|run| run.length).sum()
    }
    pub fn matches(&self, line: &[SquareStatus]) -> bool {
        calculate_runs(line).map_or(false, |runs| runs == self.run_lengths())
    }

    /// Forgets all scan state; the row will be enumerated afresh next time it is solved.
    pub fn reset(&mut self) {
        self.completed = false;
        self.unchanged = false;
        self.placements = None;
    }

    /// Solves this row given its current squares, reusing the placements that
    /// survived the previous call.
    pub fn solve(&mut self, line: &[SquareStatus]) -> LineSolution {
        assert_eq!(line.len(), self.length);

        if line.iter().all(|&s| s != Unknown) {
            // nothing left to deduce, only whether it is right
            return LineSolution {
                line: line.to_vec(),
                contradiction: !self.matches(line),
            };
        }
        if self.min_length() > self.length {
            return LineSolution { line: line.to_vec(), contradiction: true };
        }

        let run_lengths = self.run_lengths();
        let placements = self.placements.get_or_insert_with(|| Placements::enumerate(line, &run_lengths));
        let solution = placements.solve(line);
        debug!("{} {}: {} placement(s) left{}",
               self.direction.line_name(),
               self.index,
               placements.len(),
               if solution.contradiction { ", contradiction" } else { "" });
        solution
    }

    pub fn to_colored_strings(&self) -> Vec<ANSIString<'static>> {
        self.runs.iter()
                 .map(|run| run.to_colored_string(self.completed))
                 .collect()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let runs = self.runs.iter().map(|run| run.to_string()).collect::<Vec<_>>();
        write!(f, "{} {} [{}]", self.direction.line_name(), self.index, runs.join(" "))
    }
}

// -------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub direction: Direction,
    pub length: usize,
    pub index: usize,
    pub row_index: usize,
}

impl Run {
    pub fn new(direction: Direction,
               index: usize,
               row_index: usize,
               length: usize) -> Self
    {
        Run {
            direction,
            length,
            index,
            row_index,
        }
    }
    pub fn to_colored_string(&self, completed: bool) -> ANSIString<'static> {
        let style = match completed {
            true  => Style::new().fg(Colour::Fixed(241)),
            false => Style::default(),
        };
        style.paint(self.to_string())
    }
}
impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.length)
    }
}
