//! Count-up animation for the stats band.
//!
//! Each `.counter` element declares its end value in `data-target` and an
//! optional `data-suffix`. The animation itself is the pure [`CountUp`]
//! machine: a fixed 16 ms tick adds `target / 125` per step, renders
//! integers ceiling-rounded and other targets to one decimal, and the
//! final frame is always the exact target, never the accumulated sum.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

use crate::dom;
use crate::observe::ViewportWatch;

pub const TICK_MS: u32 = 16;
pub const DURATION_MS: u32 = 2000;

/// Elements animate once at least half visible.
const VISIBLE_RATIO: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountFrame {
    /// Intermediate value; render and keep ticking.
    Running(String),
    /// Exact target value; render and stop.
    Done(String),
}

pub struct CountUp {
    target: f64,
    suffix: String,
    current: f64,
    step: f64,
}

impl CountUp {
    pub fn new(target: f64, suffix: &str) -> Self {
        Self {
            target,
            suffix: suffix.to_string(),
            current: 0.0,
            step: target / f64::from(DURATION_MS / TICK_MS),
        }
    }

    pub fn advance(&mut self) -> CountFrame {
        self.current += self.step;
        if self.current < self.target {
            CountFrame::Running(self.render_partial())
        } else {
            CountFrame::Done(self.render_final())
        }
    }

    fn render_partial(&self) -> String {
        if is_whole(self.target) {
            format!("{}{}", self.current.ceil() as i64, self.suffix)
        } else {
            format!("{:.1}{}", self.current, self.suffix)
        }
    }

    fn render_final(&self) -> String {
        if is_whole(self.target) {
            format!("{}{}", self.target as i64, self.suffix)
        } else {
            format!("{}{}", self.target, self.suffix)
        }
    }
}

fn is_whole(value: f64) -> bool {
    value.fract() == 0.0
}

/// Watches `.counter` elements and animates each one the first time it
/// becomes visible. Observation stops per element on trigger, so the
/// animation runs at most once no matter how often it scrolls back in.
pub struct Counters {
    _watch: ViewportWatch,
    alive: Rc<Cell<bool>>,
}

impl Counters {
    pub fn mount(document: &Document) -> Option<Self> {
        let counters = dom::query_all(document, ".counter");
        if counters.is_empty() {
            return None;
        }

        let alive = Rc::new(Cell::new(true));
        let flag = alive.clone();
        let watch = ViewportWatch::new(VISIBLE_RATIO, None, move |element, observer| {
            observer.unobserve(&element);
            animate(element, flag.clone());
        })?;

        for counter in &counters {
            watch.observe(counter);
        }

        Some(Self {
            _watch: watch,
            alive,
        })
    }
}

impl Drop for Counters {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

fn animate(element: Element, alive: Rc<Cell<bool>>) {
    let target = element
        .get_attribute("data-target")
        .and_then(|raw| raw.trim().parse::<f64>().ok());
    let target = match target {
        Some(target) => target,
        None => {
            log::warn!("counter element without a numeric data-target; skipping");
            return;
        }
    };
    let suffix = element.get_attribute("data-suffix").unwrap_or_default();

    spawn_local(async move {
        let mut count = CountUp::new(target, &suffix);
        loop {
            if !alive.get() {
                return;
            }
            match count.advance() {
                CountFrame::Running(text) => element.set_text_content(Some(&text)),
                CountFrame::Done(text) => {
                    element.set_text_content(Some(&text));
                    return;
                }
            }
            TimeoutFuture::new(TICK_MS).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the machine to completion, returning every rendered frame.
    fn run_to_done(count: &mut CountUp) -> (Vec<String>, String) {
        let mut partials = Vec::new();
        loop {
            match count.advance() {
                CountFrame::Running(text) => partials.push(text),
                CountFrame::Done(text) => return (partials, text),
            }
            assert!(partials.len() < 1_000, "animation did not finish");
        }
    }

    #[test]
    fn integer_target_lands_exactly() {
        let mut count = CountUp::new(500.0, "+");
        let (_, done) = run_to_done(&mut count);
        assert_eq!(done, "500+");
    }

    #[test]
    fn fractional_target_lands_exactly() {
        let mut count = CountUp::new(4.9, "");
        let (_, done) = run_to_done(&mut count);
        assert_eq!(done, "4.9");
    }

    #[test]
    fn zero_target_is_done_immediately() {
        let mut count = CountUp::new(0.0, "%");
        let (partials, done) = run_to_done(&mut count);
        assert!(partials.is_empty());
        assert_eq!(done, "0%");
    }

    #[test]
    fn integer_partials_are_ceiling_rounded() {
        let mut count = CountUp::new(500.0, "+");
        match count.advance() {
            // 500 / 125 = 4 per step.
            CountFrame::Running(text) => assert_eq!(text, "4+"),
            CountFrame::Done(_) => panic!("finished on the first step"),
        }
    }

    #[test]
    fn fractional_partials_use_one_decimal() {
        let mut count = CountUp::new(99.9, "%");
        match count.advance() {
            CountFrame::Running(text) => {
                assert!(text.ends_with('%'));
                let digits = &text[..text.len() - 1];
                assert_eq!(digits.split('.').nth(1).map(str::len), Some(1));
            }
            CountFrame::Done(_) => panic!("finished on the first step"),
        }
    }

    #[test]
    fn runs_the_expected_number_of_steps() {
        // 2000 ms at 16 ms per tick = 125 steps, the last being Done.
        let mut count = CountUp::new(1000.0, "");
        let (partials, _) = run_to_done(&mut count);
        assert_eq!(partials.len() + 1, 125);
    }

    #[test]
    fn final_value_ignores_accumulated_drift() {
        // 0.3 * 125 accumulates floating error; the final frame must not.
        let mut count = CountUp::new(37.5, "");
        let (_, done) = run_to_done(&mut count);
        assert_eq!(done, "37.5");
    }
}
