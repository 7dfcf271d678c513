// vim: set ai et ts=4 sw=4 sts=4:
pub mod solver;

use std::fmt;
use std::error;
use std::convert::TryFrom;
use yaml_rust::{Yaml, YamlLoader};
use ansi_term::ANSIString;

use super::grid::{Grid, SquareStatus};
use super::util::{ralign, lalign_colored, ralign_joined_coloreds, Direction, Direction::*};
use super::row::{Row, solver::calculate_runs};

#[derive(Debug, Clone, PartialEq)]
pub enum PuzzleError {
    EmptyPuzzle,
    ZeroLengthRun { direction: Direction, index: usize },
    RunsTooLong { direction: Direction, index: usize, required: usize, available: usize },
    TotalMismatch { row_total: usize, col_total: usize },
    Parse(String),
}
impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PuzzleError::EmptyPuzzle =>
                write!(f, "Puzzle must have at least one row and one column"),
            PuzzleError::ZeroLengthRun { direction, index } =>
                write!(f, "Run lengths must be positive, found a zero in {} {}",
                       direction.line_name(), index + 1),
            PuzzleError::RunsTooLong { direction, index, required, available } =>
                write!(f, "Runs of {} {} need at least {} squares, but the line is only {} long",
                       direction.line_name(), index + 1, required, available),
            PuzzleError::TotalMismatch { row_total, col_total } =>
                write!(f, "Rows call for {} filled squares in total but columns call for {}",
                       row_total, col_total),
            PuzzleError::Parse(msg) =>
                write!(f, "Invalid puzzle definition: {}", msg),
        }
    }
}
impl error::Error for PuzzleError {}

#[derive(Debug, Clone)]
pub struct Puzzle {
    pub rows: Vec<Row>,
    pub cols: Vec<Row>,
    pub grid: Grid,
}

impl Puzzle {
    /// Builds a puzzle from copies of the given run lengths, rejecting hints no grid could satisfy.
    pub fn new(row_run_lengths: &[Vec<usize>],
               col_run_lengths: &[Vec<usize>]) -> Result<Self, PuzzleError>
    {
        let height = row_run_lengths.len();
        let width = col_run_lengths.len();
        if width == 0 || height == 0 {
            return Err(PuzzleError::EmptyPuzzle);
        }

        let rows = (0..height).map(|y| Row::new(Horizontal, y, width, &row_run_lengths[y]))
                              .collect::<Vec<_>>();
        let cols = (0..width).map(|x| Row::new(Vertical, x, height, &col_run_lengths[x]))
                             .collect::<Vec<_>>();

        for row in rows.iter().chain(cols.iter()) {
            if row.runs.iter().any(|run| run.length == 0) {
                return Err(PuzzleError::ZeroLengthRun { direction: row.direction, index: row.index });
            }
            if row.min_length() > row.length {
                return Err(PuzzleError::RunsTooLong {
                    direction: row.direction,
                    index:     row.index,
                    required:  row.min_length(),
                    available: row.length,
                });
            }
        }

        let row_total: usize = rows.iter().map(|row| row.filled_total()).sum();
        let col_total: usize = cols.iter().map(|col| col.filled_total()).sum();
        if row_total != col_total {
            return Err(PuzzleError::TotalMismatch { row_total, col_total });
        }

        Ok(Puzzle {
            rows,
            cols,
            grid: Grid::new(width, height),
        })
    }
    pub fn width(&self) -> usize { self.grid.width() }
    pub fn height(&self) -> usize { self.grid.height() }

    pub fn from_yaml_str(s: &str) -> Result<Puzzle, PuzzleError> {
        let docs: Vec<Yaml> = YamlLoader::load_from_str(s)
            .map_err(|e| PuzzleError::Parse(e.to_string()))?;
        match docs.first() {
            Some(doc) => Self::from_yaml(doc),
            None      => Err(PuzzleError::Parse("document is empty".to_string())),
        }
    }

    /// Reads a document with `rows` and `cols` lists. Column runs are listed top to bottom.
    pub fn from_yaml(doc: &Yaml) -> Result<Puzzle, PuzzleError>
    {
        let row_run_lengths = Self::_parse_row(&doc["rows"], "rows")?;
        let col_run_lengths = Self::_parse_row(&doc["cols"], "cols")?;
        Puzzle::new(&row_run_lengths, &col_run_lengths)
    }

    fn _parse_row(input: &Yaml, key: &str) -> Result<Vec<Vec<usize>>, PuzzleError> {
        let list: &Vec<Yaml> = input.as_vec()
            .ok_or_else(|| PuzzleError::Parse(format!("expected a list under '{}'", key)))?;
        list.iter()
            .enumerate()
            .map(|(i, yaml_val)| Self::_parse_row_runs(yaml_val)
                                     .map_err(|msg| PuzzleError::Parse(format!("{} entry {}: {}", key, i + 1, msg))))
            .collect()
    }

    fn _parse_row_runs(input: &Yaml) -> Result<Vec<usize>, String> {
        match input {
            Yaml::String(s)  => { s.split_whitespace()
                                   .map(|int| int.trim().parse::<usize>()
                                                 .map_err(|_| format!("'{}' is not a run length", int)))
                                   .collect()
                                },
            Yaml::Integer(i) => { usize::try_from(*i).map(|len| vec![len])
                                                     .map_err(|_| format!("'{}' is not a run length", i)) }
            Yaml::Null       => { Ok(vec![]) }
            _ => Err(format!("unexpected data type: {:?}", input)),
        }
    }

    pub fn get_line(&self, direction: Direction, index: usize) -> Vec<SquareStatus> {
        self.grid.get_line(direction, index)
    }
    pub fn get_row(&self, direction: Direction, index: usize) -> &Row {
        match direction {
            Horizontal => &self.rows[index],
            Vertical   => &self.cols[index],
        }
    }
    pub fn get_row_mut(&mut self, direction: Direction, index: usize) -> &mut Row {
        match direction {
            Horizontal => &mut self.rows[index],
            Vertical   => &mut self.cols[index],
        }
    }
    pub fn row_run_lengths(&self) -> Vec<Vec<usize>> {
        self.rows.iter().map(|row| row.run_lengths()).collect()
    }
    pub fn col_run_lengths(&self) -> Vec<Vec<usize>> {
        self.cols.iter().map(|col| col.run_lengths()).collect()
    }

    /// Runs currently drawn in a line, or `None` while any of its squares is unknown.
    pub fn calculate_runs(&self, direction: Direction, index: usize) -> Option<Vec<usize>> {
        calculate_runs(&self.get_line(direction, index))
    }
    pub fn is_line_correct(&self, direction: Direction, index: usize) -> bool {
        self.get_row(direction, index).matches(&self.get_line(direction, index))
    }
    /// Every square is known and every line agrees with its runs.
    pub fn is_solved(&self) -> bool {
        self.grid.is_fully_determined()
            && (0..self.height()).all(|y| self.is_line_correct(Horizontal, y))
            && (0..self.width()).all(|x| self.is_line_correct(Vertical, x))
    }

    /// Back to a blank grid against the same runs.
    pub fn reset(&mut self) {
        self.grid.clear();
        for row in self.rows.iter_mut().chain(self.cols.iter_mut()) {
            row.reset();
        }
    }
}

impl Puzzle {
    // helper functions for Puzzle::fmt
    pub fn to_string_with(&self, subdivision: Option<usize>, emit_color: bool)
        -> String
    {
        // if subdivision is given, insert visual subdivisor lines across the grid every Nth row/col
        let subdivision = subdivision.filter(|&n| n > 0);
        let row_prefixes: Vec<Vec<ANSIString>> =
            self.rows.iter()
                     .map(|row| row.to_colored_strings())
                     .collect();

        let prefix_len = row_prefixes.iter()
                                     .map(|parts| parts.iter()
                                                       .fold(0, |sum, ansi_str| sum + ansi_str.len() + 1) // note: .len() returns length WITHOUT ansi color escape sequences
                                                       .saturating_sub(1)) // minus one at the end to match the length of a join(" ")
                                     .max().unwrap_or(0);
        let max_col_runs = self.cols.iter()
                                    .map(|col| col.runs.len())
                                    .max().unwrap_or(0);

        let mut result = String::new();

        for i in (0..max_col_runs).rev() {
            result.push_str(&self._fmt_header(i, prefix_len, subdivision, emit_color));
        }

        // top board line
        result.push_str(&Self::_fmt_line(
            &ralign("", prefix_len),
            "\u{2554}",
            "\u{2557}",
            "\u{2564}",
            subdivision,
            &(0..self.width()).map(|_| String::from("\u{2550}\u{2550}\u{2550}"))
                              .collect::<Vec<_>>()
        ));

        for (y, squares) in self.grid.rows().enumerate() {
            // board content line
            result.push_str(&Self::_fmt_line(
                &ralign_joined_coloreds(&row_prefixes[y], prefix_len, emit_color),
                "\u{2551}",
                "\u{2551}",
                "\u{2502}",
                subdivision,
                &squares.iter()
                        .map(|s| format!(" {:1} ", s.fmt_visual()))
                        .collect::<Vec<_>>()
            ));

            // horizontal subdivisor line
            if let Some(subdiv) = subdivision {
                if ((y+1) % subdiv == 0) && (y != self.height()-1) {
                    result.push_str(&Self::_fmt_line(
                        &ralign("", prefix_len),
                        "\u{255F}",
                        "\u{2562}",
                        "\u{253C}",
                        subdivision,
                        &(0..self.width()).map(|_| String::from("\u{2500}\u{2500}\u{2500}"))
                                          .collect::<Vec<_>>()
                    ));
                }
            }
        }
        // bottom board line
        result.push_str(&Self::_fmt_line(
            &ralign("", prefix_len),
            "\u{255A}",
            "\u{255D}",
            "\u{2567}",
            subdivision,
            &(0..self.width()).map(|_| String::from("\u{2550}\u{2550}\u{2550}"))
                              .collect::<Vec<_>>()
        ));

        result
    }

    fn _fmt_line(prefix: &str,
                 left_delim: &str,
                 right_delim: &str,
                 columnwise_separator: &str,
                 subdivision: Option<usize>,
                 content_parts: &[String])
        -> String
    {
        let mut result = format!("{} {}", prefix, left_delim);
        for (idx, s) in content_parts.iter().enumerate() {
            result.push_str(s);
            if let Some(subdiv) = subdivision {
                if ((idx+1) % subdiv == 0) && (idx < content_parts.len()-1) {
                    result.push_str(columnwise_separator);
                }
            }
        }
        result.push_str(&format!("{}\n", right_delim));
        result
    }

    fn _fmt_header(&self, line_idx: usize,
                          prefix_len: usize,
                          subdivision: Option<usize>,
                          emit_color: bool)
        -> String
    {
        let mut content_parts = Vec::<String>::new();
        for col in &self.cols {
            let part: String;
            if line_idx < col.runs.len() {
                let colored = col.runs[col.runs.len()-1-line_idx].to_colored_string(col.completed);
                part = format!(" {}", lalign_colored(&colored, 2, emit_color));
            } else {
                part = format!(" {:-2}", " ");
            }

            content_parts.push(part);
        }

        Self::_fmt_line(
            &ralign("", prefix_len),
            " ",
            " ",
            " ",
            subdivision,
            &content_parts
        )
    }
}
impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_string_with(Some(5), false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::grid::SquareStatus::*;

    const SMALL: &str = "
rows:
    - 1 1
    - 3
    -
cols:
    - 2
    - 1
    - 2
";

    #[test]
    fn loads_runs_from_yaml() {
        let puzzle = Puzzle::from_yaml_str(SMALL).unwrap();
        assert_eq!(puzzle.width(), 3);
        assert_eq!(puzzle.height(), 3);
        assert_eq!(puzzle.row_run_lengths(), vec![vec![1, 1], vec![3], vec![]]);
        assert_eq!(puzzle.col_run_lengths(), vec![vec![2], vec![1], vec![2]]);
        assert!(puzzle.get_row(Vertical, 1).runs.len() == 1);
    }

    #[test]
    fn yaml_errors_are_reported() {
        assert!(matches!(Puzzle::from_yaml_str("rows: [1]\n"), Err(PuzzleError::Parse(_))));
        assert!(matches!(Puzzle::from_yaml_str("rows: [a]\ncols: [1]\n"), Err(PuzzleError::Parse(_))));
        assert!(matches!(Puzzle::from_yaml_str("rows: [-1]\ncols: [1]\n"), Err(PuzzleError::Parse(_))));
        assert!(matches!(Puzzle::from_yaml_str("rows: [[1]]\ncols: [1]\n"), Err(PuzzleError::Parse(_))));
        assert!(matches!(Puzzle::from_yaml_str(""), Err(PuzzleError::Parse(_))));
    }

    #[test]
    fn validation_rejects_impossible_runs() {
        let five = vec![vec![1]; 5];
        assert_eq!(Puzzle::new(&[vec![6]], &five).unwrap_err(),
                   PuzzleError::RunsTooLong { direction: Horizontal, index: 0, required: 6, available: 5 });
        assert_eq!(Puzzle::new(&[vec![2, 0]], &[vec![1], vec![1]]).unwrap_err(),
                   PuzzleError::ZeroLengthRun { direction: Horizontal, index: 0 });
        assert_eq!(Puzzle::new(&[], &five).unwrap_err(), PuzzleError::EmptyPuzzle);
        assert_eq!(Puzzle::new(&[vec![1], vec![]], &[vec![2], vec![]]).unwrap_err(),
                   PuzzleError::TotalMismatch { row_total: 1, col_total: 2 });
    }

    #[test]
    fn line_correctness_follows_the_grid() {
        let mut puzzle = Puzzle::from_yaml_str(SMALL).unwrap();
        assert!(!puzzle.is_line_correct(Horizontal, 0));
        assert_eq!(puzzle.calculate_runs(Horizontal, 0), None);

        for (x, status) in [FilledIn, CrossedOut, FilledIn].iter().enumerate() {
            puzzle.grid.set_square(x, 0, *status).unwrap();
        }
        assert!(puzzle.is_line_correct(Horizontal, 0));
        assert_eq!(puzzle.calculate_runs(Horizontal, 0), Some(vec![1, 1]));
        assert!(!puzzle.is_solved());

        puzzle.reset();
        assert_eq!(puzzle.grid.num_known(), 0);
    }

    #[test]
    fn display_shows_runs_and_squares() {
        let mut puzzle = Puzzle::from_yaml_str(SMALL).unwrap();
        puzzle.grid.set_square(1, 1, FilledIn).unwrap();
        let shown = puzzle.to_string();
        let lines = shown.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 1 + 1 + 3 + 1); // header, top, rows, bottom
        assert!(lines[0].contains('2'));
        assert!(lines[2].starts_with("1 1 \u{2551}"));
        assert!(lines[3].contains('\u{25A0}'));
        assert!(!shown.contains('\u{1b}'));
    }
}
