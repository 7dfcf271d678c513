// vim: set ai et ts=4 sts=4 sw=4:
use std::fs;
use std::io;
use std::process;
use std::thread;
use std::time::Duration;
use clap::{App, Arg, ArgMatches, crate_version, value_t};
use log::{info, LevelFilter};

use nonogram::{Puzzle, Solver, SolverConfig, Mode, Outcome, ScanStep, SolveEvent};
use nonogram::util::is_a_tty;

pub struct Args {
    pub puzzle_path: String,
    pub visual_groups: Option<usize>, // draw a separator line every N squares
    pub config: SolverConfig,
    pub emit_color: bool,
    pub verbosity: u64,
}
impl Args {
    fn from_matches(matches: &ArgMatches) -> Self {
        let mut config = SolverConfig::default();
        if matches.is_present("paced") {
            config.mode = Mode::Paced;
        }
        if matches.is_present("delay") {
            config.delay = Duration::from_millis(value_t!(matches, "delay", u64).unwrap_or_else(|e| e.exit()));
        }
        if matches.is_present("max_steps") {
            config.max_steps = Some(value_t!(matches, "max_steps", usize).unwrap_or_else(|e| e.exit()));
        }
        let visual_groups = match matches.is_present("visual_groups") {
            true  => Some(value_t!(matches, "visual_groups", usize).unwrap_or_else(|e| e.exit())),
            false => Some(5),
        };
        Args {
            puzzle_path: matches.value_of("PUZZLE").unwrap_or_default().to_string(),
            visual_groups,
            config,
            emit_color: !matches.is_present("no_color") && is_a_tty(io::stdout()),
            verbosity: matches.occurrences_of("verbose"),
        }
    }
}

fn parse_args() -> Args {
    let matches = App::new("nonogram")
        .version(crate_version!())
        .about("Solves nonogram puzzles by line logic")
        .arg(Arg::with_name("PUZZLE")
                 .help("YAML file with 'rows' and 'cols' run lists")
                 .required(true)
                 .index(1))
        .arg(Arg::with_name("visual_groups")
                 .short("g")
                 .long("visual-groups")
                 .takes_value(true)
                 .value_name("N")
                 .help("Draws a separator every N squares (0 for none, default 5)"))
        .arg(Arg::with_name("paced")
                 .long("paced")
                 .help("Prints the board after every scanned line"))
        .arg(Arg::with_name("delay")
                 .long("delay")
                 .takes_value(true)
                 .value_name("MS")
                 .help("Pause between lines in paced mode (default 50)"))
        .arg(Arg::with_name("max_steps")
                 .long("max-steps")
                 .takes_value(true)
                 .value_name("N")
                 .help("Gives up after scanning N lines"))
        .arg(Arg::with_name("no_color")
                 .long("no-color")
                 .help("Never colors the output"))
        .arg(Arg::with_name("verbose")
                 .short("v")
                 .multiple(true)
                 .help("Logs more detail to stderr (repeat for more)"))
        .get_matches();
    Args::from_matches(&matches)
}

fn setup_logging(verbosity: u64) -> Result<(), log::SetLoggerError> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
}

fn load_puzzle(path: &str) -> Result<Puzzle, String> {
    let s = fs::read_to_string(path).map_err(|e| format!("Cannot read {}: {}", path, e))?;
    Puzzle::from_yaml_str(&s).map_err(|e| e.to_string())
}

fn solve_paced(solver: &mut Solver, args: &Args) -> Outcome {
    // one line per step, redrawing the board in between
    while let Some(step) = solver.next() {
        match step {
            ScanStep::Scanned { direction, index, changes } => {
                println!("{} {}: {} square(s) changed", direction.line_name(), index + 1, changes.len());
                println!("{}", solver.puzzle().to_string_with(args.visual_groups, args.emit_color));
                if solver.config.delay > Duration::from_millis(0) {
                    thread::sleep(solver.config.delay);
                }
            }
            ScanStep::Finished(outcome) => return outcome,
        }
    }
    solver.finish()
}

fn main() {
    let args = parse_args();
    if let Err(e) = setup_logging(args.verbosity) {
        eprintln!("Cannot set up logging: {}", e);
    }

    let puzzle = match load_puzzle(&args.puzzle_path) {
        Ok(puzzle) => puzzle,
        Err(msg)   => {
            eprintln!("Error: {}", msg);
            process::exit(1);
        }
    };
    info!("loaded {}x{} puzzle from {}", puzzle.width(), puzzle.height(), args.puzzle_path);

    let mut solver = Solver::new(puzzle, args.config.clone());
    let outcome = match args.config.mode {
        Mode::Paced => solve_paced(&mut solver, &args),
        Mode::Batch => {
            let result = solver.run(|event| if let SolveEvent::Success { elapsed, .. } = event {
                info!("finished in {:?}", elapsed);
            });
            match result {
                Ok(outcome) => outcome,
                Err(e)      => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }
    };

    let puzzle = solver.puzzle();
    println!("{}", puzzle.to_string_with(args.visual_groups, args.emit_color));
    let code = match outcome {
        Outcome::Success { complete: true } => {
            println!("Solved after {} step(s)", solver.iterations());
            0
        }
        Outcome::Success { complete: false } => {
            let unknown = puzzle.width() * puzzle.height() - puzzle.grid.num_known();
            println!("Stuck: {} square(s) cannot be determined by line logic", unknown);
            2
        }
        Outcome::Contradiction { direction, index } => {
            println!("Contradiction in {} {}", direction.line_name(), index + 1);
            1
        }
        Outcome::GaveUp { steps } => {
            println!("Gave up after {} step(s)", steps);
            2
        }
    };
    process::exit(code);
}
