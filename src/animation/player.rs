//! Plays an [`AnimationPlan`] against a [`Surface`].
//!
//! The player has a clock-free core: [`Player::start`] resolves targets and
//! shows the initial frame, [`Player::advance`] renders the frame for a
//! timestamp. [`Player::play`] hooks that core up to the browser's frame
//! loop.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;

use super::frame::FrameLoop;
use super::plan::AnimationPlan;
use super::state::VisualState;

/// Where a player writes its frames.
pub trait Surface {
    type Node;

    /// Every node the selector matches, in document order. No match is not
    /// an error; the step simply has nothing to animate.
    fn resolve(&self, selector: &str) -> Vec<Self::Node>;

    fn write(&self, node: &Self::Node, state: &VisualState);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Playback {
    Idle,
    Running,
    Finished,
    Disposed,
}

struct Inner<S: Surface> {
    plan: AnimationPlan,
    surface: S,
    /// Nodes per plan step, resolved once on start.
    tracks: Vec<Vec<S::Node>>,
    duration: f64,
    origin: Option<f64>,
    status: Playback,
    on_complete: Vec<Box<dyn FnOnce()>>,
    frames: Option<FrameLoop>,
}

impl<S: Surface> Inner<S> {
    fn render(&self, time: f64) {
        for (step, nodes) in self.plan.steps().iter().zip(&self.tracks) {
            for (index, node) in nodes.iter().enumerate() {
                self.surface.write(node, &step.sample(index, time));
            }
        }
    }
}

pub struct Player<S: Surface> {
    inner: Rc<RefCell<Inner<S>>>,
}

impl<S: Surface> Clone for Player<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: Surface + 'static> Player<S> {
    pub fn new(plan: AnimationPlan, surface: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                plan,
                surface,
                tracks: Vec::new(),
                duration: 0.0,
                origin: None,
                status: Playback::Idle,
                on_complete: Vec::new(),
                frames: None,
            })),
        }
    }

    /// Resolves every step's targets and renders time zero, so elements
    /// sit in their `from` state before the first frame. Only the first
    /// call has an effect.
    pub fn start(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.status != Playback::Idle {
            return;
        }

        let tracks: Vec<Vec<S::Node>> = inner
            .plan
            .steps()
            .iter()
            .map(|step| {
                let nodes = inner.surface.resolve(&step.target);
                if nodes.is_empty() {
                    debug!("No elements match {}, skipping", step.target);
                }
                nodes
            })
            .collect();
        let counts: Vec<usize> = tracks.iter().map(Vec::len).collect();
        let duration = inner.plan.duration(&counts);
        inner.duration = duration;
        inner.tracks = tracks;
        inner.status = Playback::Running;
        inner.render(0.0);
    }

    /// Renders the frame for timestamp `now` (seconds). The first call
    /// after `start` fixes the timeline origin. Completion callbacks run
    /// once, after the final frame has been written.
    pub fn advance(&self, now: f64) -> Playback {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            if inner.status != Playback::Running {
                return inner.status;
            }

            let origin = *inner.origin.get_or_insert(now);
            let time = (now - origin).max(0.0);
            inner.render(time.min(inner.duration));
            if time < inner.duration {
                return Playback::Running;
            }

            inner.status = Playback::Finished;
            std::mem::take(&mut inner.on_complete)
        };

        debug!("Timeline finished");
        for callback in callbacks {
            callback();
        }
        Playback::Finished
    }

    /// Runs `callback` when the timeline finishes. Registering on a
    /// finished player runs it right away; a disposed player drops it.
    pub fn on_complete(&self, callback: impl FnOnce() + 'static) {
        let status = {
            let mut inner = self.inner.borrow_mut();
            if matches!(inner.status, Playback::Idle | Playback::Running) {
                inner.on_complete.push(Box::new(callback));
                return;
            }
            inner.status
        };
        if status == Playback::Finished {
            callback();
        }
    }

    /// Starts the timeline and drives it from animation frames.
    pub fn play(&self) {
        self.start();
        if self.status() != Playback::Running || self.inner.borrow().frames.is_some() {
            return;
        }

        let weak: Weak<RefCell<Inner<S>>> = Rc::downgrade(&self.inner);
        let frames = FrameLoop::start(move |now| match weak.upgrade() {
            Some(inner) => Player { inner }.advance(now) == Playback::Running,
            None => false,
        });
        self.inner.borrow_mut().frames = frames;
    }

    /// Stops playback where it is. Pending completion callbacks never run.
    pub fn dispose(&self) {
        let frames = {
            let mut inner = self.inner.borrow_mut();
            inner.status = Playback::Disposed;
            inner.on_complete.clear();
            inner.frames.take()
        };
        drop(frames);
    }

    pub fn status(&self) -> Playback {
        self.inner.borrow().status
    }

    /// Running time of the resolved timeline; zero until started.
    pub fn duration(&self) -> f64 {
        self.inner.borrow().duration
    }
}


#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::testing::RecordingSurface;
    use super::*;
    use crate::animation::ease::Ease;
    use crate::animation::plan::Step;

    fn fade_plan() -> AnimationPlan {
        AnimationPlan::new().step(
            Step::new(
                ".item",
                VisualState::new().opacity(0.0),
                VisualState::new().opacity(1.0),
            )
            .duration(1.0)
            .stagger(0.5)
            .ease(Ease::Linear),
        )
    }

    #[test]
    fn start_renders_from_state() {
        let surface = Rc::new(RecordingSurface::default().with(".item", 2));
        let player = Player::new(fade_plan(), surface.clone());
        player.start();

        assert_eq!(player.status(), Playback::Running);
        assert_eq!(player.duration(), 1.5);
        assert_eq!(surface.latest(".item", 0).and_then(|s| s.opacity), Some(0.0));
        assert_eq!(surface.latest(".item", 1).and_then(|s| s.opacity), Some(0.0));
    }

    #[test]
    fn advance_is_relative_to_first_frame() {
        let surface = Rc::new(RecordingSurface::default().with(".item", 2));
        let player = Player::new(fade_plan(), surface.clone());
        player.start();

        assert_eq!(player.advance(100.0), Playback::Running);
        assert_eq!(player.advance(100.75), Playback::Running);
        assert_eq!(surface.latest(".item", 0).and_then(|s| s.opacity), Some(0.75));
        assert_eq!(surface.latest(".item", 1).and_then(|s| s.opacity), Some(0.25));
    }

    #[test]
    fn completion_fires_once_after_final_frame() {
        let surface = Rc::new(RecordingSurface::default().with(".item", 2));
        let player = Player::new(fade_plan(), surface.clone());
        let fired = Rc::new(Cell::new(0));
        {
            let fired = fired.clone();
            let surface = surface.clone();
            player.on_complete(move || {
                assert_eq!(surface.latest(".item", 1).and_then(|s| s.opacity), Some(1.0));
                fired.set(fired.get() + 1);
            });
        }
        player.start();
        player.advance(0.0);
        assert_eq!(fired.get(), 0);
        assert_eq!(player.advance(2.0), Playback::Finished);
        assert_eq!(player.advance(3.0), Playback::Finished);
        assert_eq!(fired.get(), 1);
        assert_eq!(player.status(), Playback::Finished);
    }

    #[test]
    fn late_registration_on_finished_player_runs_immediately() {
        let surface = Rc::new(RecordingSurface::default().with(".item", 1));
        let player = Player::new(fade_plan(), surface);
        player.start();
        player.advance(0.0);
        player.advance(5.0);

        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        player.on_complete(move || flag.set(true));
        assert!(fired.get());
    }

    #[test]
    fn disposed_player_never_completes() {
        let surface = Rc::new(RecordingSurface::default().with(".item", 1));
        let player = Player::new(fade_plan(), surface.clone());
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        player.on_complete(move || flag.set(true));
        player.start();
        player.advance(0.0);
        player.dispose();

        surface.clear();
        assert_eq!(player.advance(10.0), Playback::Disposed);
        assert!(!fired.get());
        assert!(surface.writes.borrow().is_empty());
    }

    #[test]
    fn missing_targets_finish_immediately() {
        let surface = Rc::new(RecordingSurface::default());
        let player = Player::new(fade_plan(), surface.clone());
        player.start();
        assert_eq!(player.duration(), 0.0);
        assert_eq!(player.advance(0.0), Playback::Finished);
        assert!(surface.writes.borrow().is_empty());
    }
}
