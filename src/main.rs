use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use text_io::try_read;
use tracing_subscriber::EnvFilter;

use wordgrid::grid::CliOverrides;
use wordgrid::utils::vocab::read_word_file;
use wordgrid::{Board, Solution, Solver, SolverConfig};

const DEMO_BOARD: [&str; 5] = ["cntss", "datin", "oomel", "siknd", "picle"];

const DEMO_WORDS: [&str; 20] = [
    "apple", "pickle", "side", "kick", "sick", "mood", "cat", "cats", "man", "super", "antman",
    "godzilla", "dog", "dot", "sine", "cos", "signal", "bitcoin", "cool", "zapper",
];

#[derive(Parser)]
#[command(author, version, about = "Find dictionary words traced on a letter grid", long_about = None)]
struct Cli {
    /// Board rows, one cell per character (e.g. cat xxx xxx)
    rows: Vec<String>,

    /// JSON board file: an array of rows of single-letter strings
    #[arg(short, long, conflicts_with = "rows")]
    board: Option<PathBuf>,

    /// Random board of the given size, e.g. 4x4
    #[arg(long, conflicts_with_all = ["rows", "board"])]
    random: Option<String>,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Type the board rows in at the terminal
    #[arg(short, long, conflicts_with_all = ["rows", "board", "random"])]
    interactive: bool,

    /// Dictionary file with one word per line (default: built-in demo list)
    #[arg(short, long)]
    words: Option<PathBuf>,

    /// JSON solver config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum word length to report
    #[arg(short = 'm', long = "min-len")]
    min_len: Option<usize>,

    /// Lower-case the dictionary before searching
    #[arg(long)]
    normalize_dictionary: bool,

    /// Use the explicit stack traversal instead of recursion
    #[arg(long)]
    stack: bool,

    /// Search start cells in parallel
    #[arg(short, long)]
    parallel: bool,

    /// Number of threads for --parallel
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Print the cells of each word
    #[arg(long)]
    paths: bool,

    /// Print the result as JSON
    #[arg(long, conflicts_with = "paths")]
    json: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_size(size: &str) -> Result<(usize, usize)> {
    let Some((rows, cols)) = size.split_once(|c: char| c == 'x' || c == 'X') else {
        bail!("board size must look like ROWSxCOLS, got {:?}", size);
    };
    let rows: usize = rows.trim().parse().context("invalid row count")?;
    let cols: usize = cols.trim().parse().context("invalid column count")?;
    if rows == 0 || cols == 0 {
        bail!("board size must be at least 1x1");
    }
    Ok((rows, cols))
}

fn read_board_interactive() -> Result<Board> {
    println!("Enter number of rows:");
    let n_rows: Result<usize, _> = try_read!("{}\n");
    let n_rows = n_rows.map_err(|e| anyhow!("invalid row count: {}", e))?;
    let mut rows = Vec::with_capacity(n_rows);
    for i in 0..n_rows {
        println!("Row {}:", i + 1);
        let row: Result<String, _> = try_read!("{}\n");
        let row = row.map_err(|e| anyhow!("invalid row: {}", e))?;
        rows.push(row.trim().chars().collect());
    }
    Ok(Board::new(rows)?)
}

fn load_board(cli: &Cli) -> Result<Board> {
    if let Some(path) = &cli.board {
        return Board::from_file(path)
            .with_context(|| format!("failed to load board from {}", path.display()));
    }
    if let Some(size) = &cli.random {
        let (rows, cols) = parse_size(size)?;
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        return Ok(Board::random(rows, cols, &mut rng));
    }
    if cli.interactive {
        return read_board_interactive();
    }
    let rows: Vec<Vec<char>> = if cli.rows.is_empty() {
        DEMO_BOARD.iter().map(|r| r.chars().collect()).collect()
    } else {
        cli.rows.iter().map(|r| r.chars().collect()).collect()
    };
    Ok(Board::new(rows)?)
}

fn load_words(cli: &Cli) -> Result<Vec<String>> {
    match &cli.words {
        Some(path) => read_word_file(path)
            .with_context(|| format!("failed to read words from {}", path.display())),
        None => Ok(DEMO_WORDS.iter().map(|w| w.to_string()).collect()),
    }
}

fn load_config(cli: &Cli) -> Result<SolverConfig> {
    let config = match &cli.config {
        Some(path) => SolverConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SolverConfig::default(),
    };
    let overrides = CliOverrides {
        min_word_len: cli.min_len,
        normalize_dictionary: cli.normalize_dictionary,
        stack: cli.stack,
        parallel: cli.parallel,
        thread_count: cli.threads,
    };
    Ok(config.merge_with_cli(&overrides))
}

fn print_solution(solution: &Solution, paths: bool) {
    println!("words found:");
    for (word, path) in solution.iter() {
        if paths {
            let cells = path
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            println!("{}: {}", word, cells);
        } else {
            println!("{}", word);
        }
    }
    println!("total: {}", solution.len());
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let board = load_board(&cli)?;
    tracing::debug!("board:\n{}", board);
    let words = load_words(&cli)?;

    let solver = Solver::with_config(&words, config)?;
    let solution = solver.solve(&board)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        print_solution(&solution, cli.paths);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    run(cli)
}
