use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::problems::ProblemSet;
use crate::settings::Settings;
use crate::typing_rate::TypingRateLimiter;

/// Whitespace-separated token count of an answer
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// question `i` is on screen and accepting input
    Presenting(usize),
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    InsufficientInput { required: usize },
    /// the session already finished
    Completed,
}

/// An answer accepted on advancement
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub index: usize,
    pub image: PathBuf,
    pub text: String,
    pub word_count: usize,
    pub elapsed: Duration,
}

/// Notifications for the presentation layer, drained with `take_signals`
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    QuestionChanged { index: usize, image: PathBuf },
    TimerTick { seconds_remaining: u64 },
    AdvanceRejected(RejectReason),
    TypingTooFast,
    AnswerSubmitted(Answer),
    SessionCompleted,
}

/// One run through a problem set.
///
/// Time is always passed in by the caller so the event loop owns the clock.
#[derive(Debug)]
pub struct QuizSession {
    settings: Settings,
    problems: ProblemSet,
    state: SessionState,
    started_at: Instant,
    countdown_armed: bool,
    input: String,
    rate: TypingRateLimiter,
    signals: VecDeque<Signal>,
}

impl QuizSession {
    pub fn start(settings: Settings, problems: ProblemSet, now: Instant) -> Self {
        let mut session = Self {
            rate: TypingRateLimiter::from_settings(&settings),
            settings,
            problems,
            state: SessionState::Completed,
            started_at: now,
            countdown_armed: false,
            input: String::new(),
            signals: VecDeque::new(),
        };

        if session.problems.is_empty() {
            info!("no problems to present, session completes immediately");
            session.signals.push_back(Signal::SessionCompleted);
        } else {
            session.present(0, now);
        }
        session
    }

    fn present(&mut self, index: usize, now: Instant) {
        self.state = SessionState::Presenting(index);
        self.input.clear();
        self.rate.reset();
        self.started_at = now;
        self.countdown_armed = true;

        let image = self
            .problems
            .get(index)
            .map(Path::to_path_buf)
            .unwrap_or_default();
        debug!("presenting question {index}: {}", image.display());
        self.signals
            .push_back(Signal::QuestionChanged { index, image });
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::Presenting(i) => Some(i),
            SessionState::Completed => None,
        }
    }

    pub fn current_image(&self) -> Option<&Path> {
        self.current_index().and_then(|i| self.problems.get(i))
    }

    pub fn question_count(&self) -> usize {
        self.problems.len()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.input)
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.settings
            .time_limit()
            .saturating_sub(self.elapsed(now))
    }

    /// Whole seconds left on the countdown, rounded down
    pub fn seconds_remaining(&self, now: Instant) -> u64 {
        self.remaining(now).as_secs()
    }

    pub fn time_expired(&self, now: Instant) -> bool {
        self.elapsed(now) >= self.settings.time_limit()
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown_armed
    }

    /// Whether the "next" control is usable right now
    pub fn can_advance(&self, now: Instant) -> bool {
        !self.is_completed()
            && (self.word_count() >= self.settings.min_words || self.time_expired(now))
    }

    pub fn tick(&mut self, now: Instant) {
        if !self.countdown_armed || self.is_completed() {
            return;
        }
        if self.time_expired(now) {
            self.countdown_armed = false;
            debug!("time limit reached on question {:?}", self.current_index());
            self.signals.push_back(Signal::TimerTick {
                seconds_remaining: 0,
            });
        } else {
            self.signals.push_back(Signal::TimerTick {
                seconds_remaining: self.seconds_remaining(now),
            });
        }
    }

    pub fn advance(&mut self, now: Instant) -> Result<(), RejectReason> {
        let SessionState::Presenting(index) = self.state else {
            return Err(RejectReason::Completed);
        };

        let words = self.word_count();
        if words < self.settings.min_words && !self.time_expired(now) {
            let reason = RejectReason::InsufficientInput {
                required: self.settings.min_words,
            };
            debug!("rejected advance on question {index} with {words} words");
            self.signals.push_back(Signal::AdvanceRejected(reason));
            return Err(reason);
        }

        let answer = Answer {
            index,
            image: self
                .problems
                .get(index)
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            text: self.input.trim().to_string(),
            word_count: words,
            elapsed: self.elapsed(now),
        };
        self.signals.push_back(Signal::AnswerSubmitted(answer));

        let next = index + 1;
        if next < self.problems.len() {
            self.present(next, now);
        } else {
            self.state = SessionState::Completed;
            self.countdown_armed = false;
            self.input.clear();
            info!("all {} questions answered", self.problems.len());
            self.signals.push_back(Signal::SessionCompleted);
        }
        Ok(())
    }

    pub fn input_char(&mut self, c: char, now: Instant) {
        if self.is_completed() {
            return;
        }
        self.input.push(c);
        self.on_input_changed(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        if self.is_completed() {
            return;
        }
        if self.input.pop().is_some() {
            self.on_input_changed(now);
        }
    }

    pub fn clear_input(&mut self, now: Instant) {
        if self.is_completed() || self.input.is_empty() {
            return;
        }
        self.input.clear();
        self.on_input_changed(now);
    }

    fn on_input_changed(&mut self, now: Instant) {
        if self.rate.record(now, self.word_count()) {
            info!(
                "typing too fast on question {:?}, clearing answer",
                self.current_index()
            );
            self.input.clear();
            self.signals.push_back(Signal::TypingTooFast);
        }
    }

    pub fn take_signals(&mut self) -> Vec<Signal> {
        self.signals.drain(..).collect()
    }
}
