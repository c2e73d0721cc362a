//! Terminal front end for brain_digits.
//!
//! ```text
//! brain-digits practice --mode multiplication --digits 7,8 --questions 5
//! brain-digits challenge --seed 42
//! brain-digits leaderboard
//! brain-digits tutorial --replay
//! ```
//!
//! Log verbosity follows `RUST_LOG` (e.g. `RUST_LOG=brain_digits=debug`).

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use brain_digits::{
    AppContext, ChallengeState, DigitFilter, JsonFileStore, KeyValueStore, Leaderboard,
    QuizMode, Scene, Settings, TutorialStep,
};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ModeArg {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    SquareRoot,
    Pattern,
}

impl From<ModeArg> for QuizMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Addition       => QuizMode::Addition,
            ModeArg::Subtraction    => QuizMode::Subtraction,
            ModeArg::Multiplication => QuizMode::Multiplication,
            ModeArg::Division       => QuizMode::Division,
            ModeArg::SquareRoot     => QuizMode::SquareRoot,
            ModeArg::Pattern        => QuizMode::Pattern,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "brain-digits", about = "Arithmetic drills for young learners", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Key-value store file (leaderboard, best streak, tutorial flag)
    #[arg(long, global = true, default_value = "brain_digits.json")]
    store: PathBuf,

    /// Optional settings JSON
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// RNG seed for reproducible questions
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Practice one mode
    Practice {
        #[arg(short, long, value_enum, default_value = "multiplication")]
        mode: ModeArg,

        /// Restrict operands to 0..=5
        #[arg(long)]
        easy: bool,

        /// Tables to practise, e.g. `2,3,7` (default: all)
        #[arg(long, value_delimiter = ',')]
        digits: Vec<u32>,

        /// Stop after this many questions
        #[arg(short, long, default_value_t = 10)]
        questions: usize,

        /// Print each question as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Timed multiplication challenge
    Challenge,
    /// Show the top 10 streaks
    Leaderboard,
    /// Walk through the tutorial
    Tutorial {
        /// Show it again even if already completed
        #[arg(long)]
        replay: bool,
    },
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> brain_digits::Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let store = JsonFileStore::open(&cli.store)?;
    let mut app = AppContext::new(store, settings);

    match cli.command {
        Commands::Practice { mode, easy, digits, questions, json } => {
            practice(&mut app, mode.into(), easy, &digits, questions, json, cli.seed)
        }
        Commands::Challenge => challenge(&mut app, cli.seed),
        Commands::Leaderboard => {
            print_leaderboard(&app.open_leaderboard());
            Ok(())
        }
        Commands::Tutorial { replay } => tutorial(&mut app, replay),
    }
}

/// Print `text`, read one line. `None` on EOF.
fn prompt(text: &str) -> io::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn print_options(options: &[u32]) {
    for (i, v) in options.iter().enumerate() {
        println!("  [{}] {}", i + 1, v);
    }
}

fn parse_slot(input: &str, len: usize) -> Option<usize> {
    input.parse::<usize>().ok().filter(|&n| n >= 1 && n <= len).map(|n| n - 1)
}

fn practice<S: KeyValueStore>(
    app: &mut AppContext<S>,
    mode: QuizMode,
    easy: bool,
    digits: &[u32],
    questions: usize,
    json: bool,
    seed: Option<u64>,
) -> brain_digits::Result<()> {
    let mut session = app.start_practice(mode, seed);
    if !digits.is_empty() {
        let filter = DigitFilter::from_digits(digits);
        for d in filter.digits() {
            session.toggle_digit(d);
        }
    }
    if easy {
        session.set_easy_mode(true);
    }
    let reveal = app.settings.reveal_delay_secs;

    println!("{} practice (tables: {}, easy: {})", mode, session.filter(), session.easy_mode());
    let (mut answered, mut correct) = (0usize, 0usize);
    for _ in 0..questions {
        let q = session.current().clone();
        if json {
            println!("{}", serde_json::to_string(&q)?);
        } else {
            println!();
            println!("{}", q.equation.prompt());
        }
        print_options(&q.answers.options);

        let feedback = loop {
            let Some(line) = prompt("> ")? else {
                return Ok(());
            };
            if let Some(fb) = parse_slot(&line, q.answers.len()).and_then(|i| session.answer(i)) {
                break fb;
            }
            println!("Pick 1-{}", q.answers.len());
        };
        answered += 1;
        if feedback.is_correct {
            correct += 1;
            println!("Correct! {}", q.equation);
        } else {
            println!("Not quite. {}", q.equation);
        }
        session.tick(reveal);
    }
    println!();
    println!("Score: {}/{}", correct, answered);
    app.navigate(Scene::MainMenu);
    Ok(())
}

fn challenge<S: KeyValueStore>(app: &mut AppContext<S>, seed: Option<u64>) -> brain_digits::Result<()> {
    let mut seq = app.start_challenge(seed);
    println!("Best streak: {}", seq.best_streak());
    if prompt("Press Enter to start the challenge...")?.is_none() {
        return Ok(());
    }
    seq.start();
    let reveal = app.settings.challenge_reveal_delay_secs;
    let mut last = Instant::now();

    while seq.is_running() {
        let Some(q) = seq.current_question().cloned() else {
            break;
        };
        println!();
        println!("[{}] Streak: {}", seq.clock(), seq.streak());
        println!("{}", q.equation.prompt());
        print_options(&q.answers.options);

        let Some(line) = prompt("> ")? else {
            return Ok(());
        };
        seq.tick(last.elapsed().as_secs_f32());
        last = Instant::now();
        if !seq.is_running() {
            break;
        }
        let Some(slot) = parse_slot(&line, q.answers.len()) else {
            println!("Pick 1-{}", q.answers.len());
            continue;
        };
        match seq.answer_index(slot, &mut app.store) {
            Ok(Some(fb)) if fb.is_correct => {
                println!("Correct!{}", if fb.new_best { " New best streak!" } else { "" });
                seq.tick(reveal);
            }
            Ok(Some(fb)) => println!("The answer was {}", fb.correct_value),
            Ok(None) => {}
            Err(e) => {
                log::warn!("best streak not saved: {e}");
                println!("Correct! New best streak! (could not save it: {e})");
                seq.tick(reveal);
            }
        }
    }

    if let ChallengeState::Ended(_) = seq.state() {
        if let Some(msg) = seq.end_message() {
            println!();
            println!("{msg}");
        }
    }

    let mut board = Leaderboard::load(&app.store);
    if seq.streak() > 0 && board.qualifies(seq.streak()) {
        loop {
            let Some(name) = prompt("Enter your name for the leaderboard: ")? else {
                break;
            };
            match board.submit(&name, seq.streak()) {
                Ok(rank) => {
                    board.save(&mut app.store)?;
                    if let Some(rank) = rank {
                        println!("You placed #{rank}!");
                    }
                    print_leaderboard(&board);
                    break;
                }
                Err(e) => println!("{e}"),
            }
        }
    }
    seq.reset();
    app.navigate(Scene::MainMenu);
    Ok(())
}

fn print_leaderboard(board: &Leaderboard) {
    if board.is_empty() {
        println!("No streaks recorded yet.");
        return;
    }
    for (i, line) in board.lines().iter().enumerate().filter(|(_, l)| !l.is_empty()) {
        println!("{:>2}. {}", i + 1, line);
    }
}

fn tutorial<S: KeyValueStore>(app: &mut AppContext<S>, replay: bool) -> brain_digits::Result<()> {
    let mut tutorial = app.open_main_menu();
    if replay {
        tutorial.replay(&mut app.store)?;
    }
    let mut step = tutorial.current();
    loop {
        match step {
            TutorialStep::Completed => {
                println!("Tutorial complete. The main menu is unlocked.");
                return Ok(());
            }
            TutorialStep::Message { text, speaker, .. } => {
                println!("{:?}: {}", speaker, text);
                if prompt("(Enter for next) ")?.is_none() {
                    return Ok(());
                }
                step = tutorial.next(&mut app.store)?;
            }
        }
    }
}
