use crate::games::terminal::{self, GridCursor, TICK_MS, TerminalGuard, highlight};
use crate::games::{flag_value, split_flag};
use crossterm::event::KeyCode;
use std::io::Stdout;
use std::time::{Duration, Instant};

pub const SIZE: usize = 4;

type Grid = [[u8; SIZE]; SIZE];

const EASY: Grid = [[1, 3, 2, 4], [0, 4, 1, 3], [4, 1, 3, 0], [3, 2, 4, 1]];
const MEDIUM: Grid = [[1, 0, 2, 4], [0, 4, 1, 0], [4, 1, 0, 0], [0, 2, 4, 1]];
const HARD: Grid = [[0, 0, 2, 0], [0, 4, 0, 0], [0, 0, 3, 0], [0, 2, 0, 0]];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty
{
    Easy,
    Medium,
    Hard,
}

impl Difficulty
{
    pub fn parse(value: &str) -> Result<Self, String>
    {
        match value.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Unknown difficulty '{value}' (easy, medium, hard)")),
        }
    }

    pub fn name(self) -> &'static str
    {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    fn puzzle(self) -> &'static Grid
    {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Medium => &MEDIUM,
            Difficulty::Hard => &HARD,
        }
    }
}

/// A 4x4 board over one of the static puzzles. Entries are not checked.
pub struct Board
{
    difficulty: Difficulty,
    cells: Grid,
}

impl Board
{
    pub fn new(difficulty: Difficulty) -> Self
    {
        Self {
            difficulty,
            cells: *difficulty.puzzle(),
        }
    }

    pub fn difficulty(&self) -> Difficulty
    {
        self.difficulty
    }

    /// Switching difficulty always starts from a fresh copy of the puzzle.
    pub fn select_difficulty(&mut self, difficulty: Difficulty)
    {
        *self = Self::new(difficulty);
    }

    pub fn is_given(&self, row: usize, col: usize) -> bool
    {
        self.difficulty.puzzle()[row][col] != 0
    }

    /// Given cells are left alone; anything outside 1-4 clears the cell.
    pub fn set(&mut self, row: usize, col: usize, value: u8)
    {
        if row >= SIZE || col >= SIZE || self.is_given(row, col) {
            return;
        }
        self.cells[row][col] = if (1..=SIZE as u8).contains(&value) { value } else { 0 };
    }

    pub fn get(&self, row: usize, col: usize) -> u8
    {
        self.cells[row][col]
    }

    pub fn filled(&self) -> usize
    {
        self.cells.iter().flatten().filter(|value| **value != 0).count()
    }
}

pub struct SudokuConfig
{
    difficulty: Difficulty,
}

impl SudokuConfig
{
    pub fn from_args(args: &[String]) -> Result<Self, String>
    {
        let mut config = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let (flag, inline) = split_flag(arg);
            match flag {
                "--difficulty" => {
                    config.difficulty = Difficulty::parse(flag_value(flag, inline, &mut iter)?)?;
                }
                _ => return Err(format!("Unknown sudoku option '{arg}'")),
            }
        }
        Ok(config)
    }
}

impl Default for SudokuConfig
{
    fn default() -> Self
    {
        Self {
            difficulty: Difficulty::Easy,
        }
    }
}

pub fn run_with_config(config: SudokuConfig) -> Result<(), String>
{
    let mut board = Board::new(config.difficulty);
    let mut cursor = GridCursor::new(SIZE, SIZE);
    let mut term = TerminalGuard::enter()?;
    let mut last_tick = Instant::now();

    loop {
        for key in terminal::drain_keys()? {
            if terminal::is_quit(&key) {
                return Ok(());
            }
            if cursor.apply(key.code) {
                continue;
            }
            match key.code {
                KeyCode::Char(ch @ '0'..='9') => {
                    board.set(cursor.row, cursor.col, ch as u8 - b'0');
                }
                KeyCode::Backspace | KeyCode::Delete => board.set(cursor.row, cursor.col, 0),
                KeyCode::Char('e') => board.select_difficulty(Difficulty::Easy),
                KeyCode::Char('m') => board.select_difficulty(Difficulty::Medium),
                KeyCode::Char('h') => board.select_difficulty(Difficulty::Hard),
                _ => {}
            }
        }

        if last_tick.elapsed() >= Duration::from_millis(TICK_MS) {
            draw_ui(term.stdout(), &board, &cursor)?;
            last_tick = Instant::now();
        }

        std::thread::sleep(Duration::from_millis(1));
    }
}

fn render_board(board: &Board, cursor: &GridCursor) -> Vec<String>
{
    let mut rows = Vec::with_capacity(SIZE + 1);
    for row in 0..SIZE {
        if row == SIZE / 2 {
            rows.push("------+------".to_string());
        }
        let mut line = String::new();
        for col in 0..SIZE {
            if col == SIZE / 2 {
                line.push('|');
            }
            let value = board.get(row, col);
            let text = match (value, board.is_given(row, col)) {
                (0, _) => " . ".to_string(),
                (value, true) => format!("\x1b[1m {} \x1b[0m", value),
                (value, false) => format!("\x1b[36m {} \x1b[0m", value),
            };
            line.push_str(&highlight(&text, cursor.row == row && cursor.col == col));
        }
        rows.push(line);
    }
    rows
}

fn draw_ui(stdout: &mut Stdout, board: &Board, cursor: &GridCursor) -> Result<(), String>
{
    let mut lines = Vec::new();
    lines.push(format!("Puzzle Hub - Sudoku ({})", board.difficulty().name()));
    lines.push(format!("Filled: {}/{}", board.filled(), SIZE * SIZE));
    lines.push(String::new());
    lines.extend(render_board(board, cursor));
    lines.push(String::new());
    lines.push("Arrows move. 1-4 fills, 0/Backspace clears.".to_string());
    lines.push("E/M/H switch difficulty. Esc quits.".to_string());
    terminal::draw_lines(stdout, &lines)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn given_cells_are_locked()
    {
        let mut board = Board::new(Difficulty::Easy);
        board.set(0, 0, 4);
        assert_eq!(board.get(0, 0), 1);
        board.set(1, 0, 2);
        assert_eq!(board.get(1, 0), 2);
    }

    #[test]
    fn out_of_range_values_clear()
    {
        let mut board = Board::new(Difficulty::Hard);
        board.set(0, 0, 3);
        assert_eq!(board.get(0, 0), 3);
        board.set(0, 0, 7);
        assert_eq!(board.get(0, 0), 0);
        board.set(9, 9, 1);
        assert_eq!(board.filled(), 4);
    }

    #[test]
    fn switching_difficulty_resets_board()
    {
        let mut board = Board::new(Difficulty::Medium);
        board.set(0, 1, 3);
        board.select_difficulty(Difficulty::Medium);
        assert_eq!(board.get(0, 1), 0);
        board.select_difficulty(Difficulty::Easy);
        assert_eq!(board.difficulty(), Difficulty::Easy);
        assert_eq!(board.filled(), 14);
    }

    #[test]
    fn config_reads_difficulty()
    {
        let config = SudokuConfig::from_args(&["--difficulty=Hard".to_string()]).unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        let config =
            SudokuConfig::from_args(&["--difficulty".to_string(), "medium".to_string()]).unwrap();
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert!(SudokuConfig::from_args(&["--difficulty=expert".to_string()]).is_err());
    }
}
