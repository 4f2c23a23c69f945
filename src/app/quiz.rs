use std::time::Instant;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, warn};
use webbrowser::Browser;

use crate::answer_log::{AnswerLog, AnswerRecord};
use crate::app::Notice;
use crate::kiosk::{is_clipboard_shortcut, is_close_attempt};
use crate::problem_image::ProblemImage;
use crate::session::{QuizSession, RejectReason, Signal};

/// Presentation state of the quiz window around a running session
#[derive(Debug)]
pub struct QuizApp {
    pub session: QuizSession,
    /// header of the image on screen, or why it could not be read
    pub image: Option<Result<ProblemImage, String>>,
    pub seconds_remaining: u64,
    pub time_up: bool,
    pub notice: Option<Notice>,
    pub answer_log: Option<AnswerLog>,
    /// Esc quits, for trying the quiz out without the lock
    pub dev_mode: bool,
    pub finished: bool,
    pub should_quit: bool,
}

impl QuizApp {
    pub fn new(session: QuizSession, answer_log: Option<AnswerLog>, dev_mode: bool) -> Self {
        let seconds_remaining = session.settings().time_limit;
        let mut app = Self {
            session,
            image: None,
            seconds_remaining,
            time_up: seconds_remaining == 0,
            notice: None,
            answer_log,
            dev_mode,
            finished: false,
            should_quit: false,
        };
        app.process_signals();
        app
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.session.tick(now);
        self.process_signals();
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        if self.dev_mode && key.code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }

        // A notice is modal: the key that dismisses it does nothing else
        if self.notice.take().is_some() {
            if self.finished {
                self.should_quit = true;
            }
            return;
        }

        if self.finished {
            self.should_quit = true;
            return;
        }

        if is_close_attempt(&key) {
            self.notice = Some(Notice::warning("Warning", "You cannot close this window!"));
            return;
        }
        if is_clipboard_shortcut(&key) {
            debug!("swallowed clipboard shortcut {:?}", key.code);
            return;
        }

        match key.code {
            KeyCode::Enter => {
                // rejection arrives as a signal
                let _ = self.session.advance(now);
            }
            KeyCode::Backspace => self.session.backspace(now),
            KeyCode::Char('o') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.open_image();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.session.clear_input(now);
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.session.input_char(c, now);
            }
            KeyCode::Tab => self.session.input_char(' ', now),
            _ => {}
        }
        self.process_signals();
    }

    fn open_image(&mut self) {
        let Some(path) = self.session.current_image() else {
            return;
        };
        if !Browser::is_available() {
            self.notice = Some(Notice::warning(
                "No viewer",
                "No image viewer is available on this system.",
            ));
            return;
        }
        let target = path.to_string_lossy().into_owned();
        if let Err(e) = webbrowser::open(&target) {
            warn!("could not open {target}: {e}");
            self.notice = Some(Notice::error("Error", format!("Could not open image: {e}")));
        }
    }

    pub fn process_signals(&mut self) {
        for signal in self.session.take_signals() {
            match signal {
                Signal::QuestionChanged { image, .. } => {
                    self.image = Some(ProblemImage::open(&image).map_err(|e| {
                        warn!("problem image {} unreadable: {e}", image.display());
                        e.to_string()
                    }));
                    self.seconds_remaining = self.session.settings().time_limit;
                    self.time_up = self.seconds_remaining == 0;
                }
                Signal::TimerTick { seconds_remaining } => {
                    self.seconds_remaining = seconds_remaining;
                    self.time_up = !self.session.countdown_running();
                }
                Signal::AdvanceRejected(RejectReason::InsufficientInput { required }) => {
                    self.notice = Some(Notice::warning(
                        "Insufficient words",
                        format!("Please write at least {required} words."),
                    ));
                }
                Signal::AdvanceRejected(RejectReason::Completed) => {}
                Signal::TypingTooFast => {
                    self.notice = Some(Notice::warning(
                        "Slow down!",
                        "You are typing too fast! Please type at a reasonable pace.",
                    ));
                }
                Signal::AnswerSubmitted(answer) => {
                    if let Some(log) = &self.answer_log {
                        if let Err(e) = log.append(&AnswerRecord::new(&answer, Local::now())) {
                            warn!("failed to record answer: {e}");
                        }
                    }
                }
                Signal::SessionCompleted => {
                    self.finished = true;
                    self.image = None;
                    let body = if self.session.question_count() == 0 {
                        "There are no questions to answer."
                    } else {
                        "You have completed all questions!"
                    };
                    self.notice = Some(Notice::info("Completed", body));
                }
            }
        }
    }
}
