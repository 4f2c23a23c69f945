use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quizlock::problems::ProblemSet;
use quizlock::runtime::{FixedTicker, QuizEvent, Runner, TestEventSource};
use quizlock::session::{QuizSession, RejectReason, Signal};
use quizlock::settings::Settings;

fn problems(n: usize) -> ProblemSet {
    ProblemSet::new((0..n).map(|i| PathBuf::from(format!("p{i}.png"))).collect())
}

fn key(c: char) -> QuizEvent {
    QuizEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

// Headless integration using the internal runtime + QuizSession without a TTY.
// Verifies that a quiz answered through key events completes.
#[test]
fn headless_quiz_flow_completes() {
    let settings = Settings {
        min_words: 2,
        time_limit: 60,
        wpm_limit: 0,
        wpm_td: 10,
    };
    let mut session = QuizSession::start(settings, problems(2), Instant::now());

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for answer in ["x is four", "y is nine"] {
        for c in answer.chars() {
            tx.send(key(c)).unwrap();
        }
        tx.send(QuizEvent::Key(KeyEvent::new(
            KeyCode::Enter,
            KeyModifiers::NONE,
        )))
        .unwrap();
    }

    let mut signals = Vec::new();
    for _ in 0..500u32 {
        match runner.step() {
            QuizEvent::Tick => session.tick(Instant::now()),
            QuizEvent::Resize => {}
            QuizEvent::Key(key) => match key.code {
                KeyCode::Enter => {
                    let _ = session.advance(Instant::now());
                }
                KeyCode::Char(c) => session.input_char(c, Instant::now()),
                _ => {}
            },
        }
        signals.extend(session.take_signals());
        if session.is_completed() {
            break;
        }
    }

    assert!(session.is_completed(), "session should have completed");
    let answers: Vec<_> = signals
        .iter()
        .filter_map(|s| match s {
            Signal::AnswerSubmitted(a) => Some(a.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(answers, vec!["x is four", "y is nine"]);
    assert_eq!(
        signals
            .iter()
            .filter(|s| **s == Signal::SessionCompleted)
            .count(),
        1
    );
}

#[test]
fn headless_time_limit_unlocks_next() {
    // One-second limit: ticks must release the word minimum without any input
    let settings = Settings {
        min_words: 50,
        time_limit: 1,
        wpm_limit: 0,
        wpm_td: 10,
    };
    let mut session = QuizSession::start(settings, problems(1), Instant::now());
    assert_eq!(
        session.advance(Instant::now()),
        Err(RejectReason::InsufficientInput { required: 50 })
    );

    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(20)),
    );
    for _ in 0..200u32 {
        if let QuizEvent::Tick = runner.step() {
            session.tick(Instant::now());
        }
        if !session.countdown_running() {
            break;
        }
    }

    assert!(!session.countdown_running(), "countdown should have expired");
    assert!(session.advance(Instant::now()).is_ok());
    assert!(session.is_completed());
}

#[test]
fn headless_burst_of_keys_is_throttled() {
    // Default settings: 30 wpm over 10s allows at most 5 words in a burst
    let mut session = QuizSession::start(Settings::default(), problems(1), Instant::now());
    session.take_signals();

    for c in "one two three four five six".chars() {
        session.input_char(c, Instant::now());
    }

    let signals = session.take_signals();
    assert_eq!(
        signals.iter().filter(|s| **s == Signal::TypingTooFast).count(),
        1
    );
    assert!(session.input().split_whitespace().count() < 5);
}
