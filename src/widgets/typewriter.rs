//! Looping type/delete animation for the hero headline.
//!
//! The cadence lives in [`TypewriterLoop`], a pure state machine advanced
//! by [`TypewriterLoop::tick`]; each tick says what to render and how long
//! to wait before the next one. The widget is just the scheduling shell
//! around it, so the cycle behavior is testable without a browser.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

use crate::dom;

const PHRASES: [&str; 3] = [
    "Your Ultimate Software Solution",
    "Attendance + Exams + Fees",
    "Built for Teachers & Students",
];

pub const TYPE_MS: u32 = 100;
pub const DELETE_MS: u32 = 50;
pub const HOLD_FULL_MS: u32 = 2000;
pub const HOLD_EMPTY_MS: u32 = 500;
/// The splash screen owns the viewport this long before typing starts.
pub const START_DELAY_MS: u32 = 2500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Revealing characters; `shown` is how many are visible after this tick.
    Typing { shown: usize },
    /// Full phrase on screen, waiting before deletion begins.
    HoldingFull,
    /// Removing characters; `shown` is how many remain after this tick.
    Deleting { shown: usize },
    /// Empty again, waiting before the next phrase.
    HoldingEmpty,
}

/// One rendered step of the animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub delay_ms: u32,
}

pub struct TypewriterLoop {
    phrases: Vec<String>,
    phrase: usize,
    phase: Phase,
}

impl TypewriterLoop {
    /// An empty list is folded to one blank phrase so the cycle stays
    /// well defined.
    pub fn new<S: Into<String>>(phrases: impl IntoIterator<Item = S>) -> Self {
        let mut phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        if phrases.is_empty() {
            phrases.push(String::new());
        }
        Self {
            phrases,
            phrase: 0,
            phase: Phase::Typing { shown: 1 },
        }
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    /// Advance one step and return the frame to render.
    ///
    /// The phrase index moves on the tick that renders the empty string at
    /// the end of the post-deletion hold, so a full cycle always passes
    /// through `""` before the next phrase starts.
    pub fn tick(&mut self) -> Frame {
        let text = self.phrases[self.phrase].clone();
        let len = text.chars().count();

        match self.phase {
            Phase::Typing { shown } => {
                let frame = Frame {
                    text: prefix(&text, shown).to_string(),
                    delay_ms: TYPE_MS,
                };
                self.phase = if shown < len {
                    Phase::Typing { shown: shown + 1 }
                } else {
                    Phase::HoldingFull
                };
                frame
            }
            Phase::HoldingFull => {
                self.phase = Phase::Deleting { shown: len };
                Frame {
                    text,
                    delay_ms: HOLD_FULL_MS,
                }
            }
            Phase::Deleting { shown } => {
                let frame = Frame {
                    text: prefix(&text, shown).to_string(),
                    delay_ms: DELETE_MS,
                };
                self.phase = if shown > 0 {
                    Phase::Deleting { shown: shown - 1 }
                } else {
                    Phase::HoldingEmpty
                };
                frame
            }
            Phase::HoldingEmpty => {
                self.phrase = (self.phrase + 1) % self.phrases.len();
                self.phase = Phase::Typing { shown: 1 };
                Frame {
                    text: String::new(),
                    delay_ms: HOLD_EMPTY_MS,
                }
            }
        }
    }
}

/// First `chars` characters of `text`, respecting char boundaries.
fn prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Drives [`TypewriterLoop`] against the `#typewriter-text` element.
pub struct Typewriter {
    alive: Rc<Cell<bool>>,
}

impl Typewriter {
    pub fn mount(document: &Document) -> Option<Self> {
        let target: Element = dom::by_id(document, "typewriter-text")?;
        let alive = Rc::new(Cell::new(true));

        let flag = alive.clone();
        spawn_local(async move {
            let mut machine = TypewriterLoop::new(PHRASES);
            TimeoutFuture::new(START_DELAY_MS).await;
            loop {
                if !flag.get() {
                    break;
                }
                let frame = machine.tick();
                target.set_inner_html(&frame.text);
                TimeoutFuture::new(frame.delay_ms).await;
            }
        });

        Some(Self { alive })
    }
}

impl Drop for Typewriter {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(phrases: &[&str]) -> TypewriterLoop {
        TypewriterLoop::new(phrases.iter().copied())
    }

    /// Run until the empty hold that ends the cycle, returning its
    /// frames. The phrase index is no terminator: on a single-phrase
    /// machine it never moves.
    fn one_cycle(machine: &mut TypewriterLoop) -> Vec<Frame> {
        let mut frames = Vec::new();
        loop {
            let frame = machine.tick();
            let cycle_end = frame.text.is_empty() && frame.delay_ms == HOLD_EMPTY_MS;
            frames.push(frame);
            if cycle_end {
                return frames;
            }
            assert!(frames.len() < 10_000, "cycle did not terminate");
        }
    }

    #[test]
    fn types_one_character_per_tick() {
        let mut tw = machine(&["abc"]);
        assert_eq!(tw.tick(), Frame { text: "a".into(), delay_ms: TYPE_MS });
        assert_eq!(tw.tick(), Frame { text: "ab".into(), delay_ms: TYPE_MS });
        assert_eq!(tw.tick(), Frame { text: "abc".into(), delay_ms: TYPE_MS });
    }

    #[test]
    fn holds_full_phrase_before_deleting() {
        let mut tw = machine(&["hi"]);
        tw.tick();
        tw.tick();
        let hold = tw.tick();
        assert_eq!(hold.text, "hi");
        assert_eq!(hold.delay_ms, HOLD_FULL_MS);
        // Deletion starts at the full phrase and steps down.
        assert_eq!(tw.tick(), Frame { text: "hi".into(), delay_ms: DELETE_MS });
        assert_eq!(tw.tick(), Frame { text: "h".into(), delay_ms: DELETE_MS });
        assert_eq!(tw.tick(), Frame { text: "".into(), delay_ms: DELETE_MS });
    }

    #[test]
    fn cycle_ends_empty_before_next_phrase() {
        let mut tw = machine(&["one", "two", "three"]);
        for expected_next in [1, 2, 0] {
            let frames = one_cycle(&mut tw);
            let last = frames.last().unwrap();
            assert_eq!(last.text, "");
            assert_eq!(last.delay_ms, HOLD_EMPTY_MS);
            // The next phrase is selected on that same empty-hold tick.
            assert_eq!(tw.phrase_index(), expected_next);
        }
    }

    #[test]
    fn single_phrase_keeps_cycling_in_place() {
        let mut tw = machine(&["solo"]);
        for _ in 0..2 {
            let frames = one_cycle(&mut tw);
            assert!(frames.iter().any(|f| f.text == "solo"));
            let last = frames.last().unwrap();
            assert_eq!(last.text, "");
            assert_eq!(last.delay_ms, HOLD_EMPTY_MS);
            assert_eq!(tw.phrase_index(), 0);
        }
    }

    #[test]
    fn empty_phrase_list_cycles_blank_frames() {
        let mut tw = TypewriterLoop::new(Vec::<String>::new());
        let frames = one_cycle(&mut tw);
        assert!(frames.iter().all(|f| f.text.is_empty()));
        assert_eq!(tw.phrase_index(), 0);
    }

    #[test]
    fn full_phrase_is_rendered_during_the_cycle() {
        let mut tw = machine(&["attendance"]);
        let frames = one_cycle(&mut tw);
        assert!(frames.iter().any(|f| f.text == "attendance"));
    }

    #[test]
    fn multibyte_phrases_do_not_split_characters() {
        let mut tw = machine(&["héllo"]);
        let frames = one_cycle(&mut tw);
        assert!(frames.iter().any(|f| f.text == "h\u{e9}"));
        assert!(frames.iter().any(|f| f.text == "héllo"));
    }

    #[test]
    fn wraps_to_first_phrase_after_last() {
        let mut tw = machine(&["a", "b"]);
        one_cycle(&mut tw);
        assert_eq!(tw.phrase_index(), 1);
        one_cycle(&mut tw);
        assert_eq!(tw.phrase_index(), 0);
    }
}
