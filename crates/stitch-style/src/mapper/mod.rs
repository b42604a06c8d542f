//! CSS property to utility-class mapping.
//!
//! Every supported property has its own rule. Known discrete values map
//! through lookup tables; anything else becomes an arbitrary-value class
//! (`p-[13px]`) or, for keyword properties, an arbitrary property
//! (`[display:ruby]`). Properties without a rule are not mapped.

mod tables;

use tracing::debug;

use crate::declaration::{Declaration, to_kebab_case};
use crate::units::{Length, Unit, parse_thousandths};

use tables::{
    BORDER_WIDTHS, COLORS, FONT_SIZES, FONT_WEIGHTS, FRACTIONS, KEYWORD_PROPERTIES, Keywords,
    LETTER_SPACING, LINE_HEIGHT_LENGTHS, LINE_HEIGHT_RATIOS, MAX_WIDTHS, OPACITY, RADII,
    SPACING, Z_INDEX,
};

const MAPPER_TARGET: &str = "stitch_style::mapper";

const IMPORTANT: &str = "!important";

/// Declarations split into utility classes and the leftovers no class
/// expresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMapping {
    /// Classes produced, in declaration order.
    pub classes: Vec<String>,
    /// Declarations without a mapping.
    pub unmapped: Vec<Declaration>,
}

/// Maps one CSS declaration to a utility class.
///
/// `name` may be kebab-case (`font-size`) or camelCase (`fontSize`). A
/// trailing `!important` becomes the `!` class marker. Returns `None` for
/// properties without a rule and for empty values.
#[must_use]
pub fn map_property(name: &str, value: &str) -> Option<String> {
    let property = to_kebab_case(name.trim());
    let trimmed = value.trim();
    let (raw, important) = trimmed
        .strip_suffix(IMPORTANT)
        .map_or((trimmed, false), |rest| (rest.trim_end(), true));
    if raw.is_empty() {
        return None;
    }
    let class = map_value(&property, raw)?;
    Some(if important { format!("!{class}") } else { class })
}

/// Maps every declaration, keeping the ones that have no class.
#[must_use]
pub fn map_declarations(declarations: &[Declaration]) -> StyleMapping {
    let mut mapping = StyleMapping::default();
    for declaration in declarations {
        match map_property(&declaration.property, &declaration.value) {
            Some(class) => mapping.classes.push(class),
            None => {
                debug!(
                    target: MAPPER_TARGET,
                    property = %declaration.property,
                    "no utility class for declaration"
                );
                mapping.unmapped.push(declaration.clone());
            }
        }
    }
    mapping
}

fn map_value(property: &str, value: &str) -> Option<String> {
    let class = match property {
        "color" => color("text", value),
        "background-color" | "background" => color("bg", value),
        "border-color" => color("border", value),
        "font-size" => font_size(value),
        "font-weight" => font_weight(value),
        "line-height" => line_height(value),
        "letter-spacing" => letter_spacing(value),
        "padding" => spacing("p", value),
        "padding-top" => spacing("pt", value),
        "padding-right" => spacing("pr", value),
        "padding-bottom" => spacing("pb", value),
        "padding-left" => spacing("pl", value),
        "padding-inline" => spacing("px", value),
        "padding-block" => spacing("py", value),
        "margin" => spacing("m", value),
        "margin-top" => spacing("mt", value),
        "margin-right" => spacing("mr", value),
        "margin-bottom" => spacing("mb", value),
        "margin-left" => spacing("ml", value),
        "margin-inline" => spacing("mx", value),
        "margin-block" => spacing("my", value),
        "gap" => spacing("gap", value),
        "row-gap" => spacing("gap-y", value),
        "column-gap" => spacing("gap-x", value),
        "top" | "right" | "bottom" | "left" | "inset" => sizing(property, value),
        "width" => sizing("w", value),
        "height" => sizing("h", value),
        "min-width" => sizing("min-w", value),
        "min-height" => sizing("min-h", value),
        "max-height" => sizing("max-h", value),
        "max-width" => max_width(value),
        "flex-basis" => sizing("basis", value),
        "border-radius" => radius(value),
        "border-width" => border_width(value),
        "box-shadow" => shadow(value),
        "opacity" => opacity(value),
        "z-index" => z_index(value),
        "flex" => flex(value),
        "flex-grow" => unit_toggle("grow", value),
        "flex-shrink" => unit_toggle("shrink", value),
        "grid-template-columns" => grid_tracks("grid-cols", value),
        "grid-template-rows" => grid_tracks("grid-rows", value),
        _ => return keyword(property, value),
    };
    Some(class)
}

/// `prefix-[value]`, with spaces written as underscores.
fn arbitrary(prefix: &str, value: &str) -> String {
    format!("{prefix}-[{}]", value.replace(' ', "_"))
}

fn lookup<K: PartialEq + Copy>(table: &[(K, &'static str)], key: K) -> Option<&'static str> {
    table
        .iter()
        .find_map(|(candidate, token)| (*candidate == key).then_some(*token))
}

fn color(prefix: &str, value: &str) -> String {
    let lower = value.to_ascii_lowercase();
    lookup(COLORS, lower.as_str()).map_or_else(
        || arbitrary(prefix, value),
        |token| format!("{prefix}-{token}"),
    )
}

fn px_of(value: &str) -> Option<i64> {
    Length::parse(value)?.to_px_thousandths()
}

fn font_size(value: &str) -> String {
    px_of(value)
        .and_then(|px| lookup(FONT_SIZES, px))
        .map_or_else(|| arbitrary("text", value), |token| format!("text-{token}"))
}

fn font_weight(value: &str) -> String {
    let lower = value.to_ascii_lowercase();
    lookup(FONT_WEIGHTS, lower.as_str())
        .map_or_else(|| arbitrary("font", value), |token| format!("font-{token}"))
}

fn line_height(value: &str) -> String {
    if value.eq_ignore_ascii_case("normal") {
        return "leading-normal".to_owned();
    }
    let token = Length::parse(value).and_then(|length| match length.unit {
        Unit::None => lookup(LINE_HEIGHT_RATIOS, length.thousandths),
        _ => lookup(LINE_HEIGHT_LENGTHS, length.to_px_thousandths()?),
    });
    token.map_or_else(|| arbitrary("leading", value), |t| format!("leading-{t}"))
}

fn letter_spacing(value: &str) -> String {
    if value.eq_ignore_ascii_case("normal") {
        return "tracking-normal".to_owned();
    }
    let token = Length::parse(value).and_then(|length| match length.unit {
        Unit::Em => lookup(LETTER_SPACING, length.thousandths),
        Unit::None if length.is_zero() => Some("normal"),
        _ => None,
    });
    token.map_or_else(|| arbitrary("tracking", value), |t| format!("tracking-{t}"))
}

/// Looks `value` up on the spacing scale, signing the class for negative
/// lengths.
fn spacing_token(prefix: &str, value: &str) -> Option<String> {
    if value.eq_ignore_ascii_case("auto") {
        return Some(format!("{prefix}-auto"));
    }
    let length = Length::parse(value)?;
    let token = lookup(SPACING, length.abs().to_px_thousandths()?)?;
    Some(if length.is_negative() {
        format!("-{prefix}-{token}")
    } else {
        format!("{prefix}-{token}")
    })
}

fn spacing(prefix: &str, value: &str) -> String {
    spacing_token(prefix, value).unwrap_or_else(|| arbitrary(prefix, value))
}

fn fraction_token(prefix: &str, value: &str) -> Option<String> {
    let length = Length::parse(value)?;
    if length.unit != Unit::Percent {
        return None;
    }
    let token = lookup(FRACTIONS, length.abs().thousandths)?;
    Some(if length.is_negative() {
        format!("-{prefix}-{token}")
    } else {
        format!("{prefix}-{token}")
    })
}

fn sizing(prefix: &str, value: &str) -> String {
    let lower = value.to_ascii_lowercase();
    let keyword = match (prefix, lower.as_str()) {
        (_, "fit-content") => Some("fit"),
        (_, "min-content") => Some("min"),
        (_, "max-content") => Some("max"),
        ("w" | "min-w", "100vw") | ("h" | "min-h" | "max-h", "100vh") => Some("screen"),
        _ => None,
    };
    if let Some(token) = keyword {
        return format!("{prefix}-{token}");
    }
    fraction_token(prefix, value)
        .or_else(|| spacing_token(prefix, value))
        .unwrap_or_else(|| arbitrary(prefix, value))
}

fn max_width(value: &str) -> String {
    let lower = value.to_ascii_lowercase();
    let token = match lower.as_str() {
        "none" => Some("none"),
        "100%" => Some("full"),
        "fit-content" => Some("fit"),
        "min-content" => Some("min"),
        "max-content" => Some("max"),
        _ => px_of(value).and_then(|px| lookup(MAX_WIDTHS, px)),
    };
    token.map_or_else(|| arbitrary("max-w", value), |t| format!("max-w-{t}"))
}

fn radius(value: &str) -> String {
    if value.trim() == "50%" {
        return "rounded-full".to_owned();
    }
    px_of(value)
        .and_then(|px| lookup(RADII, px))
        .map_or_else(|| arbitrary("rounded", value), |suffix| format!("rounded{suffix}"))
}

fn border_width(value: &str) -> String {
    px_of(value)
        .and_then(|px| lookup(BORDER_WIDTHS, px))
        .map_or_else(|| arbitrary("border", value), |suffix| format!("border{suffix}"))
}

fn shadow(value: &str) -> String {
    if value.eq_ignore_ascii_case("none") {
        "shadow-none".to_owned()
    } else {
        arbitrary("shadow", value)
    }
}

fn opacity(value: &str) -> String {
    let token = Length::parse(value).and_then(|length| match length.unit {
        Unit::None => lookup(OPACITY, length.thousandths),
        Unit::Percent => OPACITY.iter().find_map(|(fraction, token)| {
            (fraction.checked_mul(100) == Some(length.thousandths)).then_some(*token)
        }),
        _ => None,
    });
    token.map_or_else(|| arbitrary("opacity", value), |t| format!("opacity-{t}"))
}

fn z_index(value: &str) -> String {
    if value.eq_ignore_ascii_case("auto") {
        return "z-auto".to_owned();
    }
    let (negative, magnitude) = value
        .strip_prefix('-')
        .map_or((false, value), |rest| (true, rest));
    if Z_INDEX.iter().any(|level| *level == magnitude) {
        if negative {
            format!("-z-{magnitude}")
        } else {
            format!("z-{magnitude}")
        }
    } else {
        arbitrary("z", value)
    }
}

fn flex(value: &str) -> String {
    let normalised = value.split_whitespace().collect::<Vec<_>>().join(" ");
    let token = match normalised.to_ascii_lowercase().as_str() {
        "1" | "1 1 0%" | "1 1 0" => Some("1"),
        "auto" | "1 1 auto" => Some("auto"),
        "initial" | "0 1 auto" => Some("initial"),
        "none" | "0 0 auto" => Some("none"),
        _ => None,
    };
    token.map_or_else(|| arbitrary("flex", value), |t| format!("flex-{t}"))
}

/// `grow`/`shrink`: `1` is the bare class and `0` the `-0` class.
fn unit_toggle(prefix: &str, value: &str) -> String {
    match parse_thousandths(value.trim()) {
        Some(1_000) => prefix.to_owned(),
        Some(0) => format!("{prefix}-0"),
        _ => arbitrary(prefix, value),
    }
}

fn grid_tracks(prefix: &str, value: &str) -> String {
    let compact: String = value.chars().filter(|ch| !ch.is_whitespace()).collect();
    if compact.eq_ignore_ascii_case("none") {
        return format!("{prefix}-none");
    }
    let count = compact
        .strip_prefix("repeat(")
        .and_then(|rest| rest.strip_suffix(",minmax(0,1fr))"))
        .filter(|digits| !digits.is_empty() && digits.chars().all(|ch| ch.is_ascii_digit()));
    count.map_or_else(
        || arbitrary(prefix, value),
        |digits| format!("{prefix}-{digits}"),
    )
}

fn keyword(property: &str, value: &str) -> Option<String> {
    let (_, rule) = KEYWORD_PROPERTIES
        .iter()
        .find(|(name, _)| *name == property)?;
    let lower = value.to_ascii_lowercase();
    let mapped = match rule {
        Keywords::Map(pairs) => lookup(*pairs, lower.as_str()).map(str::to_owned),
        Keywords::Prefixed(prefix, values) => values
            .iter()
            .any(|candidate| *candidate == lower)
            .then(|| format!("{prefix}-{lower}")),
    };
    Some(mapped.unwrap_or_else(|| format!("[{property}:{}]", value.replace(' ', "_"))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("font-size", "16px", "text-base")]
    #[case("fontSize", "0.875rem", "text-sm")]
    #[case("font-size", "15px", "text-[15px]")]
    #[case("font-weight", "700", "font-bold")]
    #[case("color", "#FFFFFF", "text-white")]
    #[case("color", "rgb(1, 2, 3)", "text-[rgb(1,_2,_3)]")]
    #[case("background-color", "#3b82f6", "bg-blue-500")]
    #[case("padding", "16px", "p-4")]
    #[case("padding", "8px 16px", "p-[8px_16px]")]
    #[case("padding-left", "0.5rem", "pl-2")]
    #[case("margin-top", "-8px", "-mt-2")]
    #[case("margin", "auto", "m-auto")]
    #[case("margin", "13px", "m-[13px]")]
    #[case("gap", "1px", "gap-px")]
    #[case("width", "100%", "w-full")]
    #[case("width", "50%", "w-1/2")]
    #[case("height", "100vh", "h-screen")]
    #[case("width", "320px", "w-80")]
    #[case("max-width", "768px", "max-w-3xl")]
    #[case("top", "0", "top-0")]
    #[case("left", "-50%", "-left-1/2")]
    #[case("border-radius", "8px", "rounded-lg")]
    #[case("border-radius", "4px", "rounded")]
    #[case("border-radius", "50%", "rounded-full")]
    #[case("border-width", "1px", "border")]
    #[case("border-style", "dashed", "border-dashed")]
    #[case("box-shadow", "none", "shadow-none")]
    #[case("box-shadow", "0 1px 2px #000", "shadow-[0_1px_2px_#000]")]
    #[case("display", "none", "hidden")]
    #[case("display", "ruby", "[display:ruby]")]
    #[case("position", "absolute", "absolute")]
    #[case("visibility", "hidden", "invisible")]
    #[case("flex-direction", "column", "flex-col")]
    #[case("justify-content", "space-between", "justify-between")]
    #[case("align-items", "center", "items-center")]
    #[case("flex", "1 1 0%", "flex-1")]
    #[case("flex-grow", "0", "grow-0")]
    #[case("grid-template-columns", "repeat(3, minmax(0, 1fr))", "grid-cols-3")]
    #[case("overflow", "hidden", "overflow-hidden")]
    #[case("opacity", "0.5", "opacity-50")]
    #[case("opacity", "75%", "opacity-75")]
    #[case("z-index", "10", "z-10")]
    #[case("z-index", "999", "z-[999]")]
    #[case("pointer-events", "none", "pointer-events-none")]
    #[case("user-select", "none", "select-none")]
    #[case("line-height", "1.5", "leading-normal")]
    #[case("line-height", "24px", "leading-6")]
    #[case("letter-spacing", "0.05em", "tracking-wider")]
    #[case("text-align", "center", "text-center")]
    #[case("text-decoration", "none", "no-underline")]
    #[case("color", "red !important", "!text-[red]")]
    fn maps_declarations(#[case] name: &str, #[case] value: &str, #[case] expected: &str) {
        assert_eq!(map_property(name, value).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("custom-x", "1")]
    #[case("color", "")]
    #[case("--gap", "4px")]
    fn leaves_unknown_properties_unmapped(#[case] name: &str, #[case] value: &str) {
        assert_eq!(map_property(name, value), None);
    }

    #[test]
    fn map_declarations_keeps_leftovers() {
        let mapping = map_declarations(&[
            Declaration::new("padding", "4px"),
            Declaration::new("mask-image", "none"),
        ]);
        assert_eq!(mapping.classes, ["p-1"]);
        assert_eq!(mapping.unmapped, [Declaration::new("mask-image", "none")]);
    }
}
