//! Batch harness: loads a puzzle file, solves every puzzle and reports
//! aggregate timing and guess statistics.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use sudoku_simd::Solver;

#[derive(Parser, Debug)]
#[command(name = "sudoku-simd")]
#[command(about = "Batch solver for files of classical 9x9 sudokus")]
struct Args {
    /// Puzzle file: one puzzle per line, digits for clues and '.', '0', '-',
    /// '_' for empty cells; '#' or "//" introduce comments
    file: PathBuf,

    /// Count solutions up to this limit per puzzle (2 detects non-unique
    /// puzzles)
    #[arg(long, default_value_t = 1)]
    limit: usize,

    /// Print the solution of every solved puzzle
    #[arg(long)]
    print_solutions: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let text = std::fs::read_to_string(&args.file)?;
    let puzzles: Vec<[u8; 81]> = text.lines().filter_map(parse_line).collect();
    if puzzles.is_empty() {
        return Err(format!("no puzzles found in {}", args.file.display()).into());
    }

    let total_empties: usize = puzzles
        .iter()
        .map(|puzzle| puzzle.iter().filter(|&&byte| byte == b'.').count())
        .sum();

    let mut solver = Solver::new();
    let mut solution = [0u8; 81];
    let mut solved = 0usize;
    let mut unsolvable = 0usize;
    let mut non_unique = 0usize;
    let mut total_guesses = 0usize;

    let start = Instant::now();
    for puzzle in &puzzles {
        let (solutions, guesses) = solver.solve(puzzle, &mut solution, args.limit);
        total_guesses += guesses;
        match solutions {
            0 => unsolvable += 1,
            1 => solved += 1,
            _ => non_unique += 1,
        }
        if solutions > 0 && args.print_solutions {
            println!("{}", std::str::from_utf8(&solution)?);
        }
    }
    let elapsed = start.elapsed();

    let secs = elapsed.as_secs_f64();
    println!("puzzles:      {}", puzzles.len());
    println!(
        "empty cells:  {} ({:.1} per puzzle)",
        total_empties,
        total_empties as f64 / puzzles.len() as f64
    );
    println!("solved:       {}", solved);
    println!("unsolvable:   {}", unsolvable);
    if args.limit > 1 {
        println!("non-unique:   {}", non_unique);
    }
    println!("guesses:      {}", total_guesses);
    println!("elapsed time: {:.3} ms", secs * 1e3);
    println!("rate:         {:.0} puzzles/s", puzzles.len() as f64 / secs);
    Ok(())
}

// Lenient line grammar: the first 81 puzzle characters count; a trailing
// comment may follow after whitespace. Lines that are blank, comments or too
// short are skipped.
fn parse_line(line: &str) -> Option<[u8; 81]> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
        return None;
    }
    let mut puzzle = [b'.'; 81];
    let mut cell = 0;
    for ch in line.chars() {
        if cell == 81 || ch == ' ' || ch == '\t' {
            break;
        }
        match ch {
            '1'..='9' => puzzle[cell] = ch as u8,
            '.' | '0' | '-' | '_' => puzzle[cell] = b'.',
            _ => return None,
        }
        cell += 1;
    }
    (cell == 81).then_some(puzzle)
}
