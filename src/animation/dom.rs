use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use super::player::Surface;
use super::state::VisualState;

/// Resolves selectors inside one scope element and writes inline styles.
#[derive(Clone)]
pub struct DomSurface {
    scope: Element,
}

impl DomSurface {
    pub fn new(scope: Element) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> &Element {
        &self.scope
    }
}

impl Surface for DomSurface {
    type Node = HtmlElement;

    fn resolve(&self, selector: &str) -> Vec<HtmlElement> {
        let Ok(list) = self.scope.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn write(&self, node: &HtmlElement, state: &VisualState) {
        write_style(node, state);
    }
}

pub fn write_style(node: &HtmlElement, state: &VisualState) {
    let style = node.style();
    for (property, value) in state.declarations() {
        let _ = style.set_property(property, &value);
    }
}
