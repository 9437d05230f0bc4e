#![forbid(unsafe_code)]

//! "Decoding" effect for card titles on hover.
//!
//! The title is redrawn `n = max(1, duration / interval)` times. Frame `i`
//! keeps each non-space character with probability `i / n` and otherwise
//! shows a random glyph; frame `n` is the real text. Randomness comes from a
//! seeded xorshift64 so runs are reproducible per card.

use std::time::Duration;

use naju_runtime::{Scheduler, Token};

/// Glyphs shown in place of hidden characters.
pub const SCRAMBLE_GLYPHS: &str = "qwerty1337h@ck3r";

/// Scrambling title text.
#[derive(Debug, Clone)]
pub struct TextScramble {
    text: String,
    shown: String,
    steps: u32,
    step: u32,
    interval: Duration,
    state: u64,
    token: Option<Token>,
}

impl TextScramble {
    /// Create a resting scramble showing `text`.
    #[must_use]
    pub fn new(text: impl Into<String>, duration: Duration, interval: Duration, seed: u64) -> Self {
        let text = text.into();
        let steps = if interval.is_zero() {
            1
        } else {
            u32::try_from(duration.as_millis() / interval.as_millis().max(1))
                .unwrap_or(u32::MAX)
                .max(1)
        };
        Self {
            shown: text.clone(),
            text,
            steps,
            step: 0,
            interval,
            state: seed_state(seed),
            token: None,
        }
    }

    /// The real text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text to draw right now.
    #[must_use]
    pub fn displayed(&self) -> &str {
        &self.shown
    }

    /// Frames per run.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Whether a frame is pending.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.token.is_some()
    }

    /// Start (or restart) the effect; frame 0 is shown immediately.
    pub fn start<M>(&mut self, sched: &mut Scheduler<M>, msg: M) -> Token {
        sched.cancel_slot(&mut self.token);
        self.step = 0;
        self.render();
        let token = sched.schedule(self.interval, msg);
        self.token = Some(token);
        token
    }

    /// Deliver a fired frame tick. Returns whether the text changed.
    pub fn tick<M>(&mut self, sched: &mut Scheduler<M>, token: Token, msg: M) -> bool {
        if self.token != Some(token) {
            return false;
        }
        self.token = None;
        self.step += 1;
        if self.step >= self.steps {
            self.shown.clone_from(&self.text);
            return true;
        }
        self.render();
        self.token = Some(sched.schedule(self.interval, msg));
        true
    }

    /// Stop and show the real text at once.
    pub fn restore<M>(&mut self, sched: &mut Scheduler<M>) {
        sched.cancel_slot(&mut self.token);
        self.shown.clone_from(&self.text);
    }

    fn render(&mut self) {
        let glyphs: Vec<char> = SCRAMBLE_GLYPHS.chars().collect();
        let pct = self.step as f64 / self.steps as f64;
        let text: Vec<char> = self.text.chars().collect();
        let mut out = String::with_capacity(self.text.len());
        for ch in text {
            if ch == ' ' {
                out.push(' ');
                continue;
            }
            let roll = self.next_u64();
            if ((roll >> 11) as f64 / (1u64 << 53) as f64) < pct {
                out.push(ch);
            } else {
                out.push(glyphs[(self.next_u64() % glyphs.len() as u64) as usize]);
            }
        }
        self.shown = out;
    }

    fn next_u64(&mut self) -> u64 {
        // xorshift64
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

/// xorshift64 is stuck at zero, so a zero state is replaced.
fn seed_state(seed: u64) -> u64 {
    match seed.wrapping_add(1) {
        0 => 0x9E37_79B9_7F4A_7C15,
        state => state,
    }
}
