//! Walk-through of every drill mode plus a scripted challenge run.
//!
//! Run with: `cargo run --example demo`
//!
//! 1. **All six modes**: one question per mode with fixed seeds, so the
//!    output is reproducible.
//! 2. **Digit filter and easy mode**: the same mode restricted to the 7 table,
//!    then with easy mode on.
//! 3. **Challenge**: an in-memory store, five correct answers then a wrong
//!    one, and the resulting leaderboard.
//!
//! Set `RUST_LOG=brain_digits=debug` to see the generator's log lines.

use brain_digits::{
    generate_question, ChallengeSequencer, DigitFilter, KeyValueStore, Leaderboard, MemoryStore,
    Question, QuestionRequest, QuizMode, Settings,
};

fn print_question(label: &str, q: &Question) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  [{label}]  ID: {}", q.question_id);
    println!("  {}", q.equation.prompt());
    for (i, v) in q.answers.options.iter().enumerate() {
        let marker = if *v == q.answers.correct { "✓" } else { " " };
        println!("    {marker} [{}] {v}", i + 1);
    }
}

fn main() {
    pretty_env_logger::init();

    println!("\n═══ ONE QUESTION PER MODE ═══\n");
    for (i, mode) in QuizMode::ALL.into_iter().enumerate() {
        let q = generate_question(QuestionRequest::new(mode).seeded(100 + i as u64));
        print_question(&mode.to_string(), &q);
    }

    println!("\n═══ DIGIT FILTER: 7 TABLE ═══\n");
    let sevens = DigitFilter::from_digits(&[7]);
    for seed in 0..3 {
        let q = generate_question(QuestionRequest {
            filter: sevens,
            ..QuestionRequest::new(QuizMode::Multiplication).seeded(seed)
        });
        print_question(&format!("tables {sevens}"), &q);
    }

    println!("\n═══ EASY MODE ═══\n");
    for seed in 0..3 {
        let q = generate_question(QuestionRequest {
            easy_mode: true,
            ..QuestionRequest::new(QuizMode::Addition).seeded(seed)
        });
        print_question("easy addition", &q);
    }

    println!("\n═══ CHALLENGE ═══\n");
    let mut store = MemoryStore::new();
    let settings = Settings::default();
    let mut seq = ChallengeSequencer::new(&store, &settings, Some(7));
    seq.start();

    for _ in 0..5 {
        let Some(q) = seq.current_question().cloned() else { break };
        print_question(&format!("streak {}  {}", seq.streak(), seq.clock()), &q);
        if let Ok(Some(fb)) = seq.answer(q.answers.correct, &mut store) {
            println!("  -> correct, streak {}{}", fb.streak, if fb.new_best { " (new best)" } else { "" });
        }
        seq.tick(settings.challenge_reveal_delay_secs);
    }

    if let Some(q) = seq.current_question().cloned() {
        print_question("deliberate miss", &q);
        let wrong = q.answers.options.iter().copied().find(|&v| v != q.answers.correct);
        if let Some(wrong) = wrong {
            let _ = seq.answer(wrong, &mut store);
        }
    }
    if let Some(msg) = seq.end_message() {
        println!("\n  {msg}");
    }
    println!("  Stored best streak: {:?}", store.get_int("BestStreak"));

    let mut board = Leaderboard::load(&store);
    if board.submit("Ada", seq.streak()).is_ok() && board.save(&mut store).is_ok() {
        println!("\n  Leaderboard:");
        for line in board.lines().iter().filter(|l| !l.is_empty()) {
            println!("    {line}");
        }
    }
}
