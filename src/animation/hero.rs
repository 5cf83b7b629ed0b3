//! Hero section choreography: an entrance timeline followed by two
//! scroll-scrubbed effects that stay armed until the page unmounts.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info};
use thiserror::Error;
use web_sys::Element;

use super::dom::DomSurface;
use super::ease::{Ease, ParseEaseError};
use super::plan::{AnimationPlan, Step};
use super::player::Player;
use super::scroll::{BindingHandle, Interpolation, ParseAnchorError, ScrollBinding, ScrollEffect, ScrollRange, Scrub};
use super::state::{Property, VisualState};

pub const HERO_REGION: &str = ".hero-section";
pub const HERO_IMAGE: &str = ".hero-image";
pub const HERO_CONTENT: &str = ".hero-content";
pub const TITLE_LETTER: &str = ".title-letter";
pub const SUBTITLE_LETTER: &str = ".subtitle-letter";

const ENTRANCE_EASE: &str = "power2.out";
const HERO_IMAGE_DURATION: f64 = 1.5;
const TITLE_DURATION: f64 = 0.3;
const TITLE_STAGGER: f64 = 0.05;
const SUBTITLE_DURATION: f64 = 0.6;
const SUBTITLE_STAGGER: f64 = 0.01;
const LETTER_BLUR: f64 = 3.0;

const IMAGE_SCROLL_RANGE: (&str, &str) = ("top top", "bottom top");
const CONTENT_SCROLL_RANGE: (&str, &str) = ("top top", "bottom center");
const CONTENT_MAX_BLUR: f64 = 3.0;
/// Seconds the scroll effects take to catch up with the scroll position.
const SCRUB_LAG: f64 = 1.0;

#[derive(Debug, Error)]
pub enum HeroError {
    #[error("invalid entrance ease: {0}")]
    Ease(#[from] ParseEaseError),
    #[error("invalid scroll range: {0}")]
    Range(#[from] ParseAnchorError),
}

/// Background settles from 1.2x while the title and subtitle drop in letter
/// by letter. Everything starts at the timeline origin.
pub fn entrance_plan() -> Result<AnimationPlan, HeroError> {
    let ease: Ease = ENTRANCE_EASE.parse()?;
    let letter_rest = VisualState::new().y(0.0).opacity(1.0).blur(0.0);

    Ok(AnimationPlan::new()
        .step(
            Step::new(
                HERO_IMAGE,
                VisualState::new().scale(1.2),
                VisualState::new().scale(1.0),
            )
            .duration(HERO_IMAGE_DURATION)
            .ease(ease)
            .at(0.0),
        )
        .step(
            Step::new(
                TITLE_LETTER,
                VisualState::new().y(-50.0).opacity(0.0).blur(LETTER_BLUR),
                letter_rest,
            )
            .duration(TITLE_DURATION)
            .stagger(TITLE_STAGGER)
            .ease(ease)
            .at(0.0),
        )
        .step(
            Step::new(
                SUBTITLE_LETTER,
                VisualState::new().y(-25.0).opacity(0.0).blur(LETTER_BLUR),
                letter_rest,
            )
            .duration(SUBTITLE_DURATION)
            .stagger(SUBTITLE_STAGGER)
            .ease(ease)
            .at(0.0),
        ))
}

/// Background zooms over the whole hero; content blurs out by the time the
/// hero's bottom reaches the middle of the viewport.
pub fn scroll_effects() -> Result<Vec<ScrollEffect>, HeroError> {
    let (start, end) = IMAGE_SCROLL_RANGE;
    let image_range = ScrollRange::parse(start, end)?;
    let (start, end) = CONTENT_SCROLL_RANGE;
    let content_range = ScrollRange::parse(start, end)?;

    Ok(vec![
        ScrollEffect {
            region: HERO_REGION.to_string(),
            target: HERO_IMAGE.to_string(),
            property: Property::Scale,
            interpolation: Interpolation::linear(1.0, 1.5),
            range: image_range,
            scrub: Scrub::lag(SCRUB_LAG),
        },
        ScrollEffect {
            region: HERO_REGION.to_string(),
            target: HERO_CONTENT.to_string(),
            property: Property::Blur,
            interpolation: Interpolation::linear(0.0, CONTENT_MAX_BLUR),
            range: content_range,
            scrub: Scrub::lag(SCRUB_LAG),
        },
    ])
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Entrance,
    Armed,
    Disposed,
}

impl Phase {
    /// Phases only move forward; disposal is reachable from anywhere.
    pub fn can_enter(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Idle, Phase::Entrance)
                | (Phase::Entrance, Phase::Armed)
                | (Phase::Idle | Phase::Entrance | Phase::Armed, Phase::Disposed)
        )
    }
}

fn transition(phase: &Cell<Phase>, next: Phase) -> bool {
    let current = phase.get();
    if !current.can_enter(next) {
        return false;
    }
    debug!("Hero animation {:?} -> {:?}", current, next);
    phase.set(next);
    true
}

/// Moves a finished entrance to `Armed` and binds every effect. Outside
/// the entrance phase nothing is bound.
fn arm<H>(
    phase: &Cell<Phase>,
    effects: Vec<ScrollEffect>,
    bind: impl FnMut(ScrollEffect) -> Option<H>,
) -> Vec<H> {
    if !transition(phase, Phase::Armed) {
        return Vec::new();
    }
    effects.into_iter().filter_map(bind).collect()
}

/// Runs the hero choreography inside one mounted scope.
pub struct HeroAnimation {
    phase: Rc<Cell<Phase>>,
    player: Player<DomSurface>,
    bindings: Rc<RefCell<Vec<BindingHandle>>>,
}

impl HeroAnimation {
    pub fn mount(scope: Element) -> Result<Self, HeroError> {
        info!("Mounting hero animation");
        let plan = entrance_plan()?;
        let effects = scroll_effects()?;
        let surface = DomSurface::new(scope);
        let phase = Rc::new(Cell::new(Phase::Idle));
        let bindings = Rc::new(RefCell::new(Vec::new()));
        let player = Player::new(plan, surface.clone());

        {
            let phase = phase.clone();
            let bindings = bindings.clone();
            player.on_complete(move || {
                let handles = arm(&phase, effects, |effect| ScrollBinding::bind(&surface, effect));
                debug!("Armed {} scroll bindings", handles.len());
                bindings.borrow_mut().extend(handles);
            });
        }

        transition(&phase, Phase::Entrance);
        player.play();
        debug!("Hero entrance runs {:.2}s", player.duration());

        Ok(Self {
            phase,
            player,
            bindings,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn dispose(&self) {
        if !transition(&self.phase, Phase::Disposed) {
            return;
        }
        self.player.dispose();
        let bindings = std::mem::take(&mut *self.bindings.borrow_mut());
        debug!("Releasing {} scroll bindings", bindings.len());
        drop(bindings);
    }
}

impl Drop for HeroAnimation {
    fn drop(&mut self) {
        self.dispose();
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn scope_with(markup: &str) -> Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let scope = document.create_element("main").unwrap();
        scope.set_inner_html(markup);
        document.body().unwrap().append_child(&scope).unwrap();
        scope
    }

    fn style_of(scope: &Element, selector: &str, property: &str) -> String {
        scope
            .query_selector(selector)
            .unwrap()
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap()
            .style()
            .get_property_value(property)
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn mount_shows_entrance_from_state() {
        let scope = scope_with(
            r#"<section class="hero-section">
                <div class="hero-content"><h1><span class="title-letter">S</span></h1></div>
                <img class="hero-image" />
            </section>"#,
        );
        let animation = HeroAnimation::mount(scope.clone()).unwrap();
        assert_eq!(animation.phase(), Phase::Entrance);
        assert_eq!(style_of(&scope, ".title-letter", "opacity"), "0");
        assert_eq!(style_of(&scope, ".hero-image", "transform"), "scale(1.2)");

        animation.dispose();
        assert_eq!(animation.phase(), Phase::Disposed);
    }

    #[wasm_bindgen_test]
    fn missing_targets_are_skipped() {
        let scope = scope_with("<p>nothing to animate</p>");
        let animation = HeroAnimation::mount(scope).unwrap();
        assert_eq!(animation.phase(), Phase::Entrance);
        animation.dispose();
    }

    fn number_in(value: &str, prefix: &str, suffix: &str) -> f64 {
        value
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix))
            .and_then(|n| n.parse().ok())
            .unwrap_or_else(|| panic!("unexpected style value `{value}`"))
    }

    #[wasm_bindgen_test]
    async fn scrolling_halfway_after_the_entrance() {
        let window = web_sys::window().unwrap();
        window.scroll_to_with_x_and_y(0.0, 0.0);
        let scope = scope_with(
            r#"<section class="hero-section" style="position: fixed; top: 0; left: 0; width: 100%; height: 100vh;">
                <div class="hero-content"><h1><span class="title-letter">S</span></h1></div>
                <img class="hero-image" />
            </section>
            <div style="height: 400vh;"></div>"#,
        );
        let animation = HeroAnimation::mount(scope.clone()).unwrap();

        TimeoutFuture::new(1_800).await;
        assert_eq!(animation.phase(), Phase::Armed);
        assert_eq!(style_of(&scope, ".hero-image", "transform"), "scale(1)");
        assert_eq!(style_of(&scope, ".hero-content", "filter"), "blur(0px)");

        let viewport = window.inner_height().unwrap().as_f64().unwrap();
        window.scroll_to_with_x_and_y(0.0, viewport / 2.0);
        TimeoutFuture::new(3_000).await;

        let scroll_y = window.scroll_y().unwrap();
        let scale = number_in(&style_of(&scope, ".hero-image", "transform"), "scale(", ")");
        let blur = number_in(&style_of(&scope, ".hero-content", "filter"), "blur(", "px)");
        assert!((scale - (1.0 + 0.5 * scroll_y / viewport)).abs() < 1e-3, "{scale}");
        assert!((blur - 3.0 * (2.0 * scroll_y / viewport).min(1.0)).abs() < 1e-3, "{blur}");
        assert!((scale - 1.25).abs() < 0.01, "{scale}");

        animation.dispose();
        scope.remove();
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}
