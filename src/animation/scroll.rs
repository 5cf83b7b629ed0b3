//! Scroll-scrubbed effects.
//!
//! A [`ScrollEffect`] maps the scroll position inside a trigger region to a
//! single visual property. [`ScrollBinding::bind`] attaches an effect to the
//! page and hands back a [`BindingHandle`] that owns the listeners; dropping
//! or disposing the handle detaches them.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use gloo_timers::callback::Timeout;
use log::debug;
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Window};

use super::dom::{write_style, DomSurface};
use super::ease::Ease;
use super::frame::FrameLoop;
use super::player::Surface;
use super::state::{Property, VisualState};
use crate::config;

/// Below this distance a lagging scrub snaps onto its goal.
const SETTLE_EPSILON: f64 = 1e-4;
/// A lag of `n` seconds closes ~98% of the gap in `n` seconds.
const CATCH_UP_RATE: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

impl Edge {
    fn fraction(self) -> f64 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => 0.5,
            Edge::Bottom => 1.0,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAnchorError {
    #[error("expected `<region edge> <viewport edge>`, got `{0}`")]
    Arity(String),
    #[error("unknown edge `{0}`")]
    UnknownEdge(String),
}

impl FromStr for Edge {
    type Err = ParseAnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Edge::Top),
            "center" => Ok(Edge::Center),
            "bottom" => Ok(Edge::Bottom),
            other => Err(ParseAnchorError::UnknownEdge(other.to_string())),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Edge::Top => "top",
            Edge::Center => "center",
            Edge::Bottom => "bottom",
        })
    }
}

/// The scroll position at which `region` edge of the trigger meets
/// `viewport` edge of the window, e.g. `"bottom top"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub region: Edge,
    pub viewport: Edge,
}

impl Anchor {
    pub const fn new(region: Edge, viewport: Edge) -> Self {
        Self { region, viewport }
    }

    pub fn position(&self, geometry: &Geometry) -> f64 {
        geometry.top + self.region.fraction() * geometry.height
            - self.viewport.fraction() * geometry.viewport_height
    }
}

impl FromStr for Anchor {
    type Err = ParseAnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(region), Some(viewport), None) => Ok(Anchor::new(region.parse()?, viewport.parse()?)),
            _ => Err(ParseAnchorError::Arity(s.to_string())),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.region, self.viewport)
    }
}

/// Trigger region layout, in document pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    pub top: f64,
    pub height: f64,
    pub viewport_height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollRange {
    pub start: Anchor,
    pub end: Anchor,
}

impl ScrollRange {
    pub const fn new(start: Anchor, end: Anchor) -> Self {
        Self { start, end }
    }

    /// Builds a range from two anchor strings, e.g. `"top top"` and
    /// `"bottom center"`.
    pub fn parse(start: &str, end: &str) -> Result<Self, ParseAnchorError> {
        Ok(Self::new(start.parse()?, end.parse()?))
    }

    /// Where `scroll_y` falls between the two anchors, clamped to `[0, 1]`.
    /// An empty or inverted range flips from 0 to 1 at its start.
    pub fn progress(&self, geometry: &Geometry, scroll_y: f64) -> f64 {
        let start = self.start.position(geometry);
        let end = self.end.position(geometry);
        if end <= start {
            return if scroll_y >= start { 1.0 } else { 0.0 };
        }
        ((scroll_y - start) / (end - start)).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interpolation {
    pub from: f64,
    pub to: f64,
    pub ease: Ease,
}

impl Interpolation {
    pub fn linear(from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            ease: Ease::Linear,
        }
    }

    pub fn value_at(&self, progress: f64) -> f64 {
        self.from + (self.to - self.from) * self.ease.apply(progress)
    }
}

/// How the written value follows the scroll position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scrub {
    Immediate,
    /// Chase the scroll position, taking about this many seconds to catch up.
    Lag(f64),
}

impl Scrub {
    /// A non-positive lag follows the scroll position directly.
    pub fn lag(seconds: f64) -> Self {
        if seconds > 0.0 {
            Scrub::Lag(seconds)
        } else {
            Scrub::Immediate
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollEffect {
    pub region: String,
    pub target: String,
    pub property: Property,
    pub interpolation: Interpolation,
    pub range: ScrollRange,
    pub scrub: Scrub,
}

impl ScrollEffect {
    pub fn state_of(&self, value: f64) -> VisualState {
        VisualState::new().with(self.property, value)
    }

    /// Value before the range starts; what the target shows when bound.
    pub fn rest_value(&self) -> f64 {
        self.interpolation.value_at(0.0)
    }

    /// The resting value for a scroll position.
    pub fn value_at(&self, geometry: &Geometry, scroll_y: f64) -> f64 {
        self.interpolation
            .value_at(self.range.progress(geometry, scroll_y))
    }
}

/// Smooths progress toward a moving goal.
#[derive(Clone, Debug)]
pub struct Scrubber {
    lag: f64,
    current: Option<f64>,
}

impl Scrubber {
    pub fn new(scrub: Scrub) -> Self {
        let lag = match scrub {
            Scrub::Immediate => 0.0,
            Scrub::Lag(seconds) => seconds.max(0.0),
        };
        Self { lag, current: None }
    }

    /// A scrubber sitting at the effect's rest value, so a binding made
    /// mid-page eases in from there instead of jumping.
    pub fn for_effect(effect: &ScrollEffect) -> Self {
        let mut scrubber = Self::new(effect.scrub);
        scrubber.jump(effect.rest_value());
        scrubber
    }

    pub fn jump(&mut self, value: f64) {
        self.current = Some(value);
    }

    /// Moves `dt` seconds toward `goal` and returns the new value.
    pub fn step(&mut self, goal: f64, dt: f64) -> f64 {
        let current = match self.current {
            Some(current) if self.lag > 0.0 => current,
            _ => {
                self.current = Some(goal);
                return goal;
            }
        };

        let alpha = 1.0 - (-CATCH_UP_RATE * dt.max(0.0) / self.lag).exp();
        let mut next = current + (goal - current) * alpha;
        if (goal - next).abs() < SETTLE_EPSILON {
            next = goal;
        }
        self.current = Some(next);
        next
    }

    pub fn is_settled(&self, goal: f64) -> bool {
        self.current == Some(goal)
    }
}

struct BindingState {
    effect: ScrollEffect,
    window: Window,
    region: Element,
    targets: Vec<HtmlElement>,
    geometry: Geometry,
    scrubber: Scrubber,
    goal: f64,
    last_frame: Option<f64>,
    animating: bool,
    frames: Option<FrameLoop>,
    refresh: Option<Timeout>,
}

impl BindingState {
    fn measure(&mut self) {
        if let Some(geometry) = measure(&self.window, &self.region) {
            self.geometry = geometry;
        }
    }

    fn write(&self, value: f64) {
        let state = self.effect.state_of(value);
        for target in &self.targets {
            write_style(target, &state);
        }
    }
}

fn measure(window: &Window, region: &Element) -> Option<Geometry> {
    let rect = region.get_bounding_client_rect();
    let scroll_y = window.scroll_y().ok()?;
    let viewport_height = window.inner_height().ok()?.as_f64()?;
    // A fixed region does not move with the document.
    let fixed = window
        .get_computed_style(region)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("position").ok())
        .map_or(false, |position| position == "fixed");
    Some(Geometry {
        top: rect.top() + if fixed { 0.0 } else { scroll_y },
        height: rect.height(),
        viewport_height,
    })
}

fn update(state: &Rc<RefCell<BindingState>>) {
    let mut s = state.borrow_mut();
    let scroll_y = s.window.scroll_y().unwrap_or(0.0);
    let goal = s.effect.value_at(&s.geometry, scroll_y);
    s.goal = goal;

    let scrub = s.effect.scrub;
    match scrub {
        Scrub::Immediate => {
            s.scrubber.jump(goal);
            s.write(goal);
        }
        Scrub::Lag(_) => {
            if !s.animating {
                s.animating = true;
                s.last_frame = None;
                let weak = Rc::downgrade(state);
                s.frames = FrameLoop::start(move |now| step_frame(&weak, now));
            }
        }
    }
}

fn step_frame(weak: &Weak<RefCell<BindingState>>, now: f64) -> bool {
    let Some(state) = weak.upgrade() else {
        return false;
    };
    let mut s = state.borrow_mut();
    let dt = s.last_frame.map_or(0.0, |last| now - last);
    s.last_frame = Some(now);

    let goal = s.goal;
    let value = s.scrubber.step(goal, dt);
    s.write(value);

    let keep_going = !s.scrubber.is_settled(goal);
    s.animating = keep_going;
    keep_going
}

pub struct ScrollBinding;

impl ScrollBinding {
    /// Attaches `effect` to the page. The region and targets are looked up
    /// inside the surface's scope; a missing region yields no binding.
    pub fn bind(surface: &DomSurface, effect: ScrollEffect) -> Option<BindingHandle> {
        let window = web_sys::window()?;
        let Some(region) = surface.scope().query_selector(&effect.region).ok().flatten() else {
            debug!("Scroll region {} not found, skipping binding", effect.region);
            return None;
        };
        let targets = surface.resolve(&effect.target);
        if targets.is_empty() {
            debug!("No elements match {}, binding writes nothing", effect.target);
        }

        let geometry = measure(&window, &region).unwrap_or_default();
        let scrubber = Scrubber::for_effect(&effect);
        let rest = effect.rest_value();

        debug!(
            "Binding {:?} on {} to {} ({} -> {}, {})",
            effect.property,
            effect.target,
            effect.region,
            effect.range.start,
            effect.range.end,
            effect.interpolation.ease
        );
        let state = Rc::new(RefCell::new(BindingState {
            effect,
            window: window.clone(),
            region,
            targets,
            geometry,
            scrubber,
            goal: rest,
            last_frame: None,
            animating: false,
            frames: None,
            refresh: None,
        }));
        state.borrow().write(rest);
        // Already scrolled into the range: chase the position from rest.
        let goal = state.borrow().effect.value_at(&geometry, window.scroll_y().unwrap_or(0.0));
        if goal != rest {
            update(&state);
        }

        let on_scroll = {
            let weak = Rc::downgrade(&state);
            Closure::wrap(Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    update(&state);
                }
            }) as Box<dyn FnMut()>)
        };

        // Layout settles after resizes; re-measure once it has stopped.
        let on_resize = {
            let weak = Rc::downgrade(&state);
            Closure::wrap(Box::new(move || {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                let weak = Rc::downgrade(&state);
                let timer = Timeout::new(config::SCROLL_REFRESH_DEBOUNCE_MS, move || {
                    if let Some(state) = weak.upgrade() {
                        state.borrow_mut().measure();
                        update(&state);
                    }
                });
                state.borrow_mut().refresh = Some(timer);
            }) as Box<dyn FnMut()>)
        };

        let _ = window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
        let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());

        Some(BindingHandle {
            window,
            state,
            on_scroll,
            on_resize,
            disposed: Cell::new(false),
        })
    }
}

/// Owns a live scroll binding.
pub struct BindingHandle {
    window: Window,
    state: Rc<RefCell<BindingState>>,
    on_scroll: Closure<dyn FnMut()>,
    on_resize: Closure<dyn FnMut()>,
    disposed: Cell<bool>,
}

impl BindingHandle {
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        let _ = self
            .window
            .remove_event_listener_with_callback("scroll", self.on_scroll.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());

        let mut state = self.state.borrow_mut();
        state.animating = false;
        state.frames.take();
        state.refresh.take();
    }
}

impl Drop for BindingHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}
