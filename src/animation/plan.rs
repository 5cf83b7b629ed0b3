//! Declarative description of a timed animation.
//!
//! A plan is an ordered list of [`Step`]s. Each step tweens every element
//! matched by its selector from one [`VisualState`] to another. Times are in
//! seconds from the timeline origin; element `i` of a step starts at
//! `offset + i * stagger`.

use super::ease::Ease;
use super::state::VisualState;

const DEFAULT_DURATION: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub target: String,
    pub from: VisualState,
    pub to: VisualState,
    pub duration: f64,
    pub stagger: f64,
    pub ease: Ease,
    pub offset: f64,
}

impl Step {
    pub fn new(target: impl Into<String>, from: VisualState, to: VisualState) -> Self {
        Self {
            target: target.into(),
            from,
            to,
            duration: DEFAULT_DURATION,
            stagger: 0.0,
            ease: Ease::default(),
            offset: 0.0,
        }
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    pub fn stagger(mut self, seconds: f64) -> Self {
        self.stagger = seconds.max(0.0);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Position on the timeline, in seconds from the origin.
    pub fn at(mut self, offset: f64) -> Self {
        self.offset = offset.max(0.0);
        self
    }

    pub fn start_of(&self, index: usize) -> f64 {
        self.offset + index as f64 * self.stagger
    }

    /// When the last of `count` elements settles. A step with no elements
    /// ends where it starts.
    pub fn end_of(&self, count: usize) -> f64 {
        match count {
            0 => self.offset,
            n => self.start_of(n - 1) + self.duration,
        }
    }

    /// State of element `index` at timeline time `time`.
    pub fn sample(&self, index: usize, time: f64) -> VisualState {
        let elapsed = time - self.start_of(index);
        let progress = if self.duration <= 0.0 {
            if elapsed >= 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            (elapsed / self.duration).clamp(0.0, 1.0)
        };
        self.from.lerp(&self.to, self.ease.apply(progress))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationPlan {
    steps: Vec<Step>,
}

impl AnimationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Total running time given how many elements each step resolved to,
    /// in step order. Steps without a count are treated as empty.
    pub fn duration(&self, counts: &[usize]) -> f64 {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| step.end_of(counts.get(i).copied().unwrap_or(0)))
            .fold(0.0, f64::max)
    }
}
