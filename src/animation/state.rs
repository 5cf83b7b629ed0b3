/// A single animatable property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Property {
    Scale,
    Y,
    Opacity,
    Blur,
}

impl Property {
    pub const ALL: [Property; 4] = [Property::Scale, Property::Y, Property::Opacity, Property::Blur];
}

/// The visual properties an animation can drive on one element. Unset
/// properties are left alone when the state is written.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisualState {
    pub scale: Option<f64>,
    /// Vertical offset in pixels.
    pub y: Option<f64>,
    pub opacity: Option<f64>,
    /// Gaussian blur radius in pixels.
    pub blur: Option<f64>,
}

impl VisualState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(mut self, value: f64) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn y(mut self, value: f64) -> Self {
        self.y = Some(value);
        self
    }

    pub fn opacity(mut self, value: f64) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn blur(mut self, value: f64) -> Self {
        self.blur = Some(value);
        self
    }

    pub fn with(self, property: Property, value: f64) -> Self {
        match property {
            Property::Scale => self.scale(value),
            Property::Y => self.y(value),
            Property::Opacity => self.opacity(value),
            Property::Blur => self.blur(value),
        }
    }

    pub fn get(&self, property: Property) -> Option<f64> {
        match property {
            Property::Scale => self.scale,
            Property::Y => self.y,
            Property::Opacity => self.opacity,
            Property::Blur => self.blur,
        }
    }

    /// Property-wise interpolation. A property set on only one side keeps
    /// that side's value for the whole transition.
    pub fn lerp(&self, to: &VisualState, t: f64) -> VisualState {
        Property::ALL.iter().fold(VisualState::new(), |state, &property| {
            match lerp_opt(self.get(property), to.get(property), t) {
                Some(value) => state.with(property, value),
                None => state,
            }
        })
    }

    pub fn transform(&self) -> Option<String> {
        match (self.y, self.scale) {
            (None, None) => None,
            (Some(y), None) => Some(format!("translate3d(0px, {}px, 0px)", y)),
            (None, Some(s)) => Some(format!("scale({})", s)),
            (Some(y), Some(s)) => Some(format!("translate3d(0px, {}px, 0px) scale({})", y, s)),
        }
    }

    pub fn filter(&self) -> Option<String> {
        self.blur.map(|b| format!("blur({}px)", b))
    }

    /// Inline style declarations for the properties that are set.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::with_capacity(3);
        if let Some(transform) = self.transform() {
            out.push(("transform", transform));
        }
        if let Some(opacity) = self.opacity {
            out.push(("opacity", opacity.to_string()));
        }
        if let Some(filter) = self.filter() {
            out.push(("filter", filter));
        }
        out
    }
}

fn lerp_opt(a: Option<f64>, b: Option<f64>, t: f64) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_blends_shared_properties() {
        let from = VisualState::new().y(-50.0).opacity(0.0).blur(3.0);
        let to = VisualState::new().y(0.0).opacity(1.0).blur(0.0);
        let mid = from.lerp(&to, 0.5);
        assert_eq!(mid.y, Some(-25.0));
        assert_eq!(mid.opacity, Some(0.5));
        assert_eq!(mid.blur, Some(1.5));
        assert_eq!(mid.scale, None);
    }

    #[test]
    fn one_sided_property_is_held() {
        let from = VisualState::new().scale(1.0);
        let to = VisualState::new().scale(1.5).blur(2.0);
        assert_eq!(from.lerp(&to, 0.25).blur, Some(2.0));
    }

    #[test]
    fn declarations_only_cover_set_properties() {
        let decls = VisualState::new().scale(1.2).declarations();
        assert_eq!(decls, vec![("transform", "scale(1.2)".to_string())]);

        let decls = VisualState::new().y(-25.0).opacity(0.0).blur(3.0).declarations();
        assert_eq!(
            decls,
            vec![
                ("transform", "translate3d(0px, -25px, 0px)".to_string()),
                ("opacity", "0".to_string()),
                ("filter", "blur(3px)".to_string()),
            ]
        );
    }

    #[test]
    fn with_and_get_agree() {
        let state = VisualState::new().with(Property::Blur, 3.0);
        assert_eq!(state.get(Property::Blur), Some(3.0));
        assert_eq!(state.get(Property::Scale), None);
    }
}
