//! The `Sudoku` board type: parsing, printing and the solving conveniences
//! built on top of the solver core.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::parse_errors::{InvalidEntry, LineParseError};
use crate::solver;

/// The main structure exposing all the functionality of the library.
///
/// Cells hold `0` for empty and `1..=9` for placed digits, in reading order
/// (left to right, top to bottom).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Sudoku([u8; 81]);

impl Sudoku {
    /// Creates a sudoku from a line of 81 cell characters.
    ///
    /// Accepted cell characters are the digits `'1'..='9'` and `'.'`, `'0'`
    /// or `'_'` for empty cells. A comment may follow the 81 cells if
    /// delimited by a space or tab.
    pub fn from_str_line(s: &str) -> Result<Sudoku, LineParseError> {
        let mut grid = [0u8; 81];
        let mut cell = 0;
        for ch in s.chars() {
            if cell == 81 {
                // only a delimited comment may follow the grid
                return match ch {
                    ' ' | '\t' => Ok(Sudoku(grid)),
                    '1'..='9' | '.' | '0' | '_' => Err(LineParseError::TooManyCells),
                    _ => Err(LineParseError::MissingCommentDelimiter),
                };
            }
            match ch {
                '1'..='9' => grid[cell] = ch as u8 - b'0',
                '.' | '0' | '_' => grid[cell] = 0,
                _ => {
                    return Err(LineParseError::InvalidEntry(InvalidEntry {
                        cell: cell as u8,
                        ch,
                    }))
                }
            }
            cell += 1;
        }
        if cell < 81 {
            return Err(LineParseError::NotEnoughCells(cell as u8));
        }
        Ok(Sudoku(grid))
    }

    /// Creates a sudoku from a byte array of cell contents, `0` for empty
    /// cells and `1..=9` for digits. Returns `Err(())` on out of range bytes.
    pub fn from_bytes(bytes: [u8; 81]) -> Result<Sudoku, ()> {
        if bytes.iter().all(|&byte| byte <= 9) {
            Ok(Sudoku(bytes))
        } else {
            Err(())
        }
    }

    /// Returns the cell contents as a byte array, `0` for empty cells and
    /// `1..=9` for digits.
    pub fn to_bytes(self) -> [u8; 81] {
        self.0
    }

    /// Returns an iterator over the cells in reading order; `None` marks an
    /// empty cell.
    pub fn iter(&self) -> impl Iterator<Item = Option<u8>> + '_ {
        self.0.iter().map(|&num| if num == 0 { None } else { Some(num) })
    }

    /// Number of placed digits.
    pub fn n_clues(&self) -> u8 {
        self.0.iter().filter(|&&num| num != 0).count() as u8
    }

    /// Finds a solution to the sudoku. If multiple solutions exist, an
    /// unspecified but deterministic one of them is returned. Returns `None`
    /// if no solution exists.
    pub fn solve_one(self) -> Option<Sudoku> {
        self.solve_limited(1)
    }

    /// Solves the sudoku and returns the solution if it is unique.
    pub fn solve_unique(self) -> Option<Sudoku> {
        self.solve_limited(2)
    }

    /// Finds up to `limit` solutions and returns them in a deterministic
    /// order. Returns `None` if no solution exists.
    pub fn solve_at_most(self, limit: usize) -> Option<Vec<Sudoku>> {
        let puzzle = self.to_puzzle_bytes();
        let mut solver = solver::Solver::new();
        let mut solutions = Vec::new();
        // counting up to k hands back the k-th solution of the search
        // order, so every pass extends the collection by one
        for k in 1..=limit {
            let mut solution = [0u8; 81];
            let (found, _) = solver.solve(&puzzle, &mut solution, k);
            if found < k {
                break;
            }
            solutions.push(Sudoku::from_solution_bytes(&solution));
        }
        if solutions.is_empty() {
            None
        } else {
            Some(solutions)
        }
    }

    /// Counts the solutions of the sudoku, up to `limit`.
    pub fn count_at_most(self, limit: usize) -> usize {
        let mut solution = [0u8; 81];
        let (solutions, _) = solver::solve(&self.to_puzzle_bytes(), &mut solution, limit);
        solutions
    }

    /// Checks whether the sudoku is completely and correctly filled.
    pub fn is_solved(&self) -> bool {
        let mut rows = [0u16; 9];
        let mut cols = [0u16; 9];
        let mut blocks = [0u16; 9];
        for (pos, &num) in self.0.iter().enumerate() {
            if num == 0 {
                return false;
            }
            let bit = 1 << (num - 1);
            let (row, col) = (pos / 9, pos % 9);
            let block = row / 3 * 3 + col / 3;
            if rows[row] & bit != 0 || cols[col] & bit != 0 || blocks[block] & bit != 0 {
                return false;
            }
            rows[row] |= bit;
            cols[col] |= bit;
            blocks[block] |= bit;
        }
        true
    }

    /// Returns the sudoku as a line of 81 characters, `'.'` for empty cells.
    pub fn to_str_line(&self) -> SudokuLine {
        let mut line = [0u8; 81];
        for (out, &num) in line.iter_mut().zip(self.0.iter()) {
            *out = if num == 0 { b'.' } else { b'0' + num };
        }
        SudokuLine(line)
    }

    // expands a solution count limit into a solved board, if one was found
    // that meets the limit semantics
    fn solve_limited(self, limit: usize) -> Option<Sudoku> {
        let mut solution = [0u8; 81];
        let (solutions, _) = solver::solve(&self.to_puzzle_bytes(), &mut solution, limit);
        if solutions == 0 || (limit > 1 && solutions > 1) {
            return None;
        }
        Some(Sudoku::from_solution_bytes(&solution))
    }

    fn from_solution_bytes(solution: &[u8; 81]) -> Sudoku {
        let mut grid = [0u8; 81];
        for (out, &byte) in grid.iter_mut().zip(solution.iter()) {
            *out = byte - b'0';
        }
        Sudoku(grid)
    }

    fn to_puzzle_bytes(self) -> [u8; 81] {
        let mut puzzle = [0u8; 81];
        for (out, &num) in puzzle.iter_mut().zip(self.0.iter()) {
            *out = if num == 0 { b'.' } else { b'0' + num };
        }
        puzzle
    }
}

impl FromStr for Sudoku {
    type Err = LineParseError;

    fn from_str(s: &str) -> Result<Sudoku, LineParseError> {
        Sudoku::from_str_line(s)
    }
}

impl fmt::Display for Sudoku {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (cell, &num) in self.0.iter().enumerate() {
            let (row, col) = (cell / 9, cell % 9);
            match (row, col) {
                (_, 3) | (_, 6) => write!(f, " ")?, // separate blocks in columns
                (3, 0) | (6, 0) => write!(f, "\n\n")?, // separate blocks in rows
                (_, 0) if row != 0 => writeln!(f)?,
                _ => {}
            }
            match num {
                0 => write!(f, "_")?,
                1..=9 => write!(f, "{}", num)?,
                _ => unreachable!(),
            }
        }
        Ok(())
    }
}

/// A sudoku in line notation, directly printable and dereferencing to `str`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SudokuLine([u8; 81]);

impl Deref for SudokuLine {
    type Target = str;

    fn deref(&self) -> &str {
        // the line is built from ascii digits and '.' only
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Display for SudokuLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_roundtrip() {
        let line = "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
        let sudoku = Sudoku::from_str_line(line).unwrap();
        assert_eq!(&*sudoku.to_str_line(), line);
        assert_eq!(sudoku.n_clues(), 30);
    }

    #[test]
    fn line_accepts_all_empty_markers() {
        let dots = Sudoku::from_str_line(&".".repeat(81)).unwrap();
        let zeros = Sudoku::from_str_line(&"0".repeat(81)).unwrap();
        let underscores = Sudoku::from_str_line(&"_".repeat(81)).unwrap();
        assert_eq!(dots, zeros);
        assert_eq!(dots, underscores);
    }

    #[test]
    fn line_comments_need_a_delimiter() {
        let base = ".".repeat(81);
        assert!(Sudoku::from_str_line(&format!("{} a comment", base)).is_ok());
        assert_eq!(
            Sudoku::from_str_line(&format!("{}comment", base)),
            Err(LineParseError::MissingCommentDelimiter)
        );
        assert_eq!(
            Sudoku::from_str_line(&format!("{}5", base)),
            Err(LineParseError::TooManyCells)
        );
    }

    #[test]
    fn line_rejects_bad_input() {
        assert_eq!(
            Sudoku::from_str_line(&".".repeat(80)),
            Err(LineParseError::NotEnoughCells(80))
        );
        let mut bad = ".".repeat(81);
        bad.replace_range(10..11, "x");
        match Sudoku::from_str_line(&bad) {
            Err(LineParseError::InvalidEntry(entry)) => {
                assert_eq!((entry.cell, entry.ch), (10, 'x'));
                assert_eq!((entry.row(), entry.col(), entry.block()), (1, 1, 0));
            }
            other => panic!("unexpected parse result: {:?}", other),
        }
    }

    #[test]
    fn from_bytes_validates_range() {
        assert!(Sudoku::from_bytes([0; 81]).is_ok());
        assert!(Sudoku::from_bytes([10; 81]).is_err());
    }

    #[test]
    fn is_solved_detects_duplicates() {
        let solved = Sudoku::from_str_line(
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179",
        )
        .unwrap();
        assert!(solved.is_solved());
        let mut bytes = solved.to_bytes();
        bytes[0] = bytes[1];
        assert!(!Sudoku::from_bytes(bytes).unwrap().is_solved());
        assert!(!Sudoku::from_bytes([0; 81]).unwrap().is_solved());
    }
}
