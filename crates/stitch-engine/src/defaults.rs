//! Default values for [`crate::EngineConfig`].

use stitch_syntax::DEFAULT_MAX_DEPTH;

/// Attribute injected at generation time to re-identify elements.
pub const DEFAULT_STABLE_ID_ATTRIBUTE: &str = "data-stitch-id";

/// Attribute created when an element without classes gains some.
pub const DEFAULT_CLASS_ATTRIBUTE: &str = "className";

/// Attributes holding an element's class list, in lookup order.
pub const DEFAULT_CLASS_ATTRIBUTES: &[&str] = &[DEFAULT_CLASS_ATTRIBUTE, "class"];

/// Maximum distance in bytes between a position hint and an element start.
pub const DEFAULT_POSITION_TOLERANCE_BYTES: usize = 50;

/// Lowest accepted similarity for a fuzzy text match.
pub const DEFAULT_SIMILARITY_FLOOR: f64 = 0.5;

/// Default stable-id attribute name.
#[must_use]
pub fn default_stable_id_attribute() -> String {
    DEFAULT_STABLE_ID_ATTRIBUTE.to_owned()
}

/// Default class attribute names.
#[must_use]
pub fn default_class_attributes() -> Vec<String> {
    DEFAULT_CLASS_ATTRIBUTES
        .iter()
        .map(|name| (*name).to_owned())
        .collect()
}

/// Default position tolerance.
#[must_use]
pub const fn default_position_tolerance() -> usize {
    DEFAULT_POSITION_TOLERANCE_BYTES
}

/// Default similarity floor.
#[must_use]
pub const fn default_similarity_floor() -> f64 {
    DEFAULT_SIMILARITY_FLOOR
}

/// Default traversal depth ceiling.
#[must_use]
pub const fn default_max_traversal_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Shared default for switches that start enabled.
#[must_use]
pub const fn enabled() -> bool {
    true
}
