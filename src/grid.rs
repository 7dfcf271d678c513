// vim: set ai et ts=4 sts=4:
use std::fmt;
use std::error;
use super::util::{Direction, Direction::*};

pub trait HasGridLocation {
    fn get_row(&self) -> usize;
    fn get_col(&self) -> usize;
    fn fmt_location(&self) -> String {
        format!("(col={:-2}, row={:-2})", self.get_col(), self.get_row())
    }
}

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum SquareStatus {
    FilledIn,
    CrossedOut,
    Unknown,
}
impl SquareStatus {
    pub fn is_known(&self) -> bool {
        *self != SquareStatus::Unknown
    }
    pub fn fmt_visual(&self) -> &'static str {
        match self {
            SquareStatus::CrossedOut => " ",
            SquareStatus::FilledIn   => "\u{25A0}",
            SquareStatus::Unknown    => ".",
        }
    }
}
impl fmt::Display for SquareStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match *self {
            SquareStatus::FilledIn   => "FilledIn",
            SquareStatus::CrossedOut => "CrossedOut",
            SquareStatus::Unknown    => "Unknown",
        })
    }
}

// ------------------------------------------------

#[derive(PartialEq, Debug, Clone)]
pub struct StatusChange {
    pub row: usize,
    pub col: usize,
    pub old: SquareStatus,
    pub new: SquareStatus,
}
impl StatusChange {
    pub fn new(row: usize, col: usize, old: SquareStatus, new: SquareStatus) -> Self {
        Self { row, col, old, new }
    }
}
impl HasGridLocation for StatusChange {
    fn get_row(&self) -> usize { self.row }
    fn get_col(&self) -> usize { self.col }
}
impl fmt::Display for StatusChange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Change: in square {}, status was changed from {} to {}",
            self.fmt_location(),
            self.old,
            self.new)
    }
}
pub type Changes = Vec<StatusChange>;

// ------------------------------------------------

#[derive(PartialEq, Debug, Clone)]
pub enum StatusError {
    ChangeRejected(StatusChange, String),  // new status conflicts with existing (non-unknown) status
}
impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "StatusError: {}", match self {
            StatusError::ChangeRejected(change, msg) =>
                format!("In {}, attempt to change status from {} to {} was rejected: {}",
                    change.fmt_location(), change.old, change.new, msg),
        })
    }
}
impl error::Error for StatusError {}

// if it worked: the change, if any; if it didn't, the change that was rejected
pub type StatusResult = Result<Option<StatusChange>, StatusError>;

// ------------------------------------------------

#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    squares: Vec<Vec<SquareStatus>>,
    width: usize,
}
impl Grid {
    pub fn new(width: usize, height: usize)
        -> Self
    {
        Grid {
            squares: vec![vec![SquareStatus::Unknown; width]; height],
            width,
        }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.squares.len() }
    pub fn get_square(&self, x: usize, y: usize) -> SquareStatus {
        self.squares[y][x]
    }
    /// Iterates over the rows of squares, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[SquareStatus]> {
        self.squares.iter().map(|row| row.as_slice())
    }
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }

    pub fn set_square(&mut self, x: usize, y: usize, new_status: SquareStatus) -> StatusResult {
        let old = self.squares[y][x];
        let cand_change = StatusChange::new(y, x, old, new_status);

        // a known square can't be changed anymore, that would be a conflict
        if old != SquareStatus::Unknown && old != new_status {
            return Err(StatusError::ChangeRejected(cand_change, "conflicting information".to_string()));
        }
        if old != new_status {
            self.squares[y][x] = new_status;
            return Ok(Some(cand_change));
        }
        Ok(None)
    }

    /// Number of squares in a line running in the given direction.
    pub fn line_length(&self, direction: Direction) -> usize {
        match direction {
            Horizontal => self.width(),
            Vertical   => self.height(),
        }
    }
    /// Number of lines running in the given direction.
    pub fn line_count(&self, direction: Direction) -> usize {
        self.line_length(direction.orthogonal())
    }
    /// Maps position `at` within line `line_index` to (x, y) grid coordinates.
    pub fn square_index(direction: Direction, line_index: usize, at: usize) -> (usize, usize) {
        match direction {
            Horizontal => (at, line_index),
            Vertical   => (line_index, at),
        }
    }
    /// Copies out a single row or column.
    pub fn get_line(&self, direction: Direction, line_index: usize) -> Vec<SquareStatus> {
        (0..self.line_length(direction))
            .map(|at| {
                let (x, y) = Self::square_index(direction, line_index, at);
                self.get_square(x, y)
            })
            .collect()
    }

    pub fn clear(&mut self) {
        for row in self.squares.iter_mut() {
            for square in row.iter_mut() {
                *square = SquareStatus::Unknown;
            }
        }
    }
    pub fn num_known(&self) -> usize {
        self.squares.iter()
                    .map(|row| row.iter().filter(|s| s.is_known()).count())
                    .sum()
    }
    pub fn is_fully_determined(&self) -> bool {
        self.num_known() == self.width() * self.height()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid(w={}, h={})", self.width(), self.height())
    }
}
