//! Conflict groups for utility classes.
//!
//! A conflict group is a set of mutually exclusive utilities: an element can
//! only sensibly carry one padding, one font size, one text colour. Groups
//! are static and indexed once on first use.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use strum::{Display, EnumString};

/// Canonical ordering buckets used by [`crate::sort`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    /// Display, position, flex and grid.
    Layout,
    /// Spacing and sizing.
    BoxModel,
    /// Font and text layout.
    Typography,
    /// Text, background and border colours.
    Color,
    /// Borders, radii, shadows, opacity.
    Decoration,
    /// Everything else.
    Misc,
}

/// A named set of mutually exclusive utility classes.
#[derive(Debug, PartialEq, Eq)]
pub struct ConflictGroup {
    /// Group name, e.g. `padding_x`.
    pub name: &'static str,
    /// Ordering bucket.
    pub category: Category,
    /// Classes that belong to the group verbatim.
    pub exact: &'static [&'static str],
    /// Prefix families, e.g. `px-`.
    pub prefixes: &'static [&'static str],
    /// Narrower groups this group also replaces (`p-4` replaces `px-2`).
    pub overrides: &'static [&'static str],
}

const fn exact(
    name: &'static str,
    category: Category,
    members: &'static [&'static str],
) -> ConflictGroup {
    ConflictGroup {
        name,
        category,
        exact: members,
        prefixes: &[],
        overrides: &[],
    }
}

const fn family(
    name: &'static str,
    category: Category,
    prefixes: &'static [&'static str],
) -> ConflictGroup {
    ConflictGroup {
        name,
        category,
        exact: &[],
        prefixes,
        overrides: &[],
    }
}

const fn wide(
    name: &'static str,
    category: Category,
    prefixes: &'static [&'static str],
    overrides: &'static [&'static str],
) -> ConflictGroup {
    ConflictGroup {
        name,
        category,
        exact: &[],
        prefixes,
        overrides,
    }
}

const fn mixed(
    name: &'static str,
    category: Category,
    members: &'static [&'static str],
    prefixes: &'static [&'static str],
) -> ConflictGroup {
    ConflictGroup {
        name,
        category,
        exact: members,
        prefixes,
        overrides: &[],
    }
}

/// A side or corner radius: `rounded-t` alone, or `rounded-t-lg`.
const fn radius(
    name: &'static str,
    members: &'static [&'static str],
    prefixes: &'static [&'static str],
    overrides: &'static [&'static str],
) -> ConflictGroup {
    ConflictGroup {
        name,
        category: Category::Decoration,
        exact: members,
        prefixes,
        overrides,
    }
}

use Category::{BoxModel, Color, Decoration, Layout, Misc, Typography};

static GROUPS: &[ConflictGroup] = &[
    // Layout
    exact(
        "display",
        Layout,
        &[
            "block", "inline-block", "inline", "flex", "inline-flex", "grid", "inline-grid",
            "hidden", "contents", "table", "flow-root", "list-item",
        ],
    ),
    exact("position", Layout, &["static", "fixed", "absolute", "relative", "sticky"]),
    exact("visibility", Layout, &["visible", "invisible", "collapse"]),
    wide(
        "inset",
        Layout,
        &["inset-"],
        &["inset_x", "inset_y", "top", "right", "bottom", "left"],
    ),
    wide("inset_x", Layout, &["inset-x-"], &["left", "right"]),
    wide("inset_y", Layout, &["inset-y-"], &["top", "bottom"]),
    family("top", Layout, &["top-"]),
    family("right", Layout, &["right-"]),
    family("bottom", Layout, &["bottom-"]),
    family("left", Layout, &["left-"]),
    family("z_index", Layout, &["z-"]),
    exact(
        "flex_direction",
        Layout,
        &["flex-row", "flex-row-reverse", "flex-col", "flex-col-reverse"],
    ),
    exact("flex_wrap", Layout, &["flex-wrap", "flex-nowrap", "flex-wrap-reverse"]),
    mixed(
        "flex",
        Layout,
        &["flex-1", "flex-auto", "flex-initial", "flex-none"],
        &["flex-"],
    ),
    mixed("grow", Layout, &["grow"], &["grow-"]),
    mixed("shrink", Layout, &["shrink"], &["shrink-"]),
    family("basis", Layout, &["basis-"]),
    family("justify_content", Layout, &["justify-"]),
    family("justify_items", Layout, &["justify-items-"]),
    family("justify_self", Layout, &["justify-self-"]),
    family("align_items", Layout, &["items-"]),
    family("align_self", Layout, &["self-"]),
    family("align_content", Layout, &["content-"]),
    family("grid_cols", Layout, &["grid-cols-"]),
    family("grid_rows", Layout, &["grid-rows-"]),
    family("col_span", Layout, &["col-span-"]),
    family("row_span", Layout, &["row-span-"]),
    family("order", Layout, &["order-"]),
    wide("overflow", Layout, &["overflow-"], &["overflow_x", "overflow_y"]),
    family("overflow_x", Layout, &["overflow-x-"]),
    family("overflow_y", Layout, &["overflow-y-"]),
    family("object_fit", Layout, &["object-"]),
    // Box model
    wide(
        "padding",
        BoxModel,
        &["p-"],
        &[
            "padding_x", "padding_y", "padding_top", "padding_right", "padding_bottom",
            "padding_left",
        ],
    ),
    wide("padding_x", BoxModel, &["px-"], &["padding_right", "padding_left"]),
    wide("padding_y", BoxModel, &["py-"], &["padding_top", "padding_bottom"]),
    family("padding_top", BoxModel, &["pt-"]),
    family("padding_right", BoxModel, &["pr-"]),
    family("padding_bottom", BoxModel, &["pb-"]),
    family("padding_left", BoxModel, &["pl-"]),
    wide(
        "margin",
        BoxModel,
        &["m-"],
        &[
            "margin_x", "margin_y", "margin_top", "margin_right", "margin_bottom", "margin_left",
        ],
    ),
    wide("margin_x", BoxModel, &["mx-"], &["margin_right", "margin_left"]),
    wide("margin_y", BoxModel, &["my-"], &["margin_top", "margin_bottom"]),
    family("margin_top", BoxModel, &["mt-"]),
    family("margin_right", BoxModel, &["mr-"]),
    family("margin_bottom", BoxModel, &["mb-"]),
    family("margin_left", BoxModel, &["ml-"]),
    wide("gap", BoxModel, &["gap-"], &["gap_x", "gap_y"]),
    family("gap_x", BoxModel, &["gap-x-"]),
    family("gap_y", BoxModel, &["gap-y-"]),
    wide("size", BoxModel, &["size-"], &["width", "height"]),
    family("width", BoxModel, &["w-"]),
    family("min_width", BoxModel, &["min-w-"]),
    family("max_width", BoxModel, &["max-w-"]),
    family("height", BoxModel, &["h-"]),
    family("min_height", BoxModel, &["min-h-"]),
    family("max_height", BoxModel, &["max-h-"]),
    family("aspect", BoxModel, &["aspect-"]),
    // Typography
    exact(
        "font_size",
        Typography,
        &[
            "text-xs", "text-sm", "text-base", "text-lg", "text-xl", "text-2xl", "text-3xl",
            "text-4xl", "text-5xl", "text-6xl", "text-7xl", "text-8xl", "text-9xl",
        ],
    ),
    exact(
        "font_weight",
        Typography,
        &[
            "font-thin", "font-extralight", "font-light", "font-normal", "font-medium",
            "font-semibold", "font-bold", "font-extrabold", "font-black",
        ],
    ),
    family("font_family", Typography, &["font-"]),
    exact("font_style", Typography, &["italic", "not-italic"]),
    exact(
        "text_align",
        Typography,
        &[
            "text-left", "text-center", "text-right", "text-justify", "text-start", "text-end",
        ],
    ),
    exact(
        "text_transform",
        Typography,
        &["uppercase", "lowercase", "capitalize", "normal-case"],
    ),
    exact("text_overflow", Typography, &["truncate", "text-ellipsis", "text-clip"]),
    family("line_height", Typography, &["leading-"]),
    family("letter_spacing", Typography, &["tracking-"]),
    family("whitespace", Typography, &["whitespace-"]),
    exact(
        "text_wrap",
        Typography,
        &["text-wrap", "text-nowrap", "text-balance", "text-pretty"],
    ),
    // Color
    family("text_color", Color, &["text-"]),
    family("background_color", Color, &["bg-"]),
    wide(
        "border_color",
        Color,
        &["border-"],
        &[
            "border_color_x", "border_color_y", "border_color_t", "border_color_r",
            "border_color_b", "border_color_l",
        ],
    ),
    wide("border_color_x", Color, &[], &["border_color_r", "border_color_l"]),
    wide("border_color_y", Color, &[], &["border_color_t", "border_color_b"]),
    family("border_color_t", Color, &[]),
    family("border_color_r", Color, &[]),
    family("border_color_b", Color, &[]),
    family("border_color_l", Color, &[]),
    // Decoration
    exact(
        "text_decoration",
        Decoration,
        &["underline", "overline", "line-through", "no-underline"],
    ),
    ConflictGroup {
        name: "border_width",
        category: Decoration,
        exact: &["border", "border-0", "border-2", "border-4", "border-8"],
        prefixes: &[],
        overrides: &[
            "border_width_x", "border_width_y", "border_width_t", "border_width_r",
            "border_width_b", "border_width_l",
        ],
    },
    ConflictGroup {
        name: "border_width_x",
        category: Decoration,
        exact: &["border-x"],
        prefixes: &["border-x-"],
        overrides: &["border_width_r", "border_width_l"],
    },
    ConflictGroup {
        name: "border_width_y",
        category: Decoration,
        exact: &["border-y"],
        prefixes: &["border-y-"],
        overrides: &["border_width_t", "border_width_b"],
    },
    mixed("border_width_t", Decoration, &["border-t"], &["border-t-"]),
    mixed("border_width_r", Decoration, &["border-r"], &["border-r-"]),
    mixed("border_width_b", Decoration, &["border-b"], &["border-b-"]),
    mixed("border_width_l", Decoration, &["border-l"], &["border-l-"]),
    exact("border_collapse", Decoration, &["border-collapse", "border-separate"]),
    family("border_spacing", Decoration, &["border-spacing-"]),
    exact(
        "border_style",
        Decoration,
        &[
            "border-solid", "border-dashed", "border-dotted", "border-double", "border-hidden",
            "border-none",
        ],
    ),
    ConflictGroup {
        name: "rounded",
        category: Decoration,
        exact: &["rounded"],
        prefixes: &["rounded-"],
        overrides: &[
            "rounded_t", "rounded_r", "rounded_b", "rounded_l", "rounded_tl", "rounded_tr",
            "rounded_br", "rounded_bl",
        ],
    },
    radius("rounded_t", &["rounded-t"], &["rounded-t-"], &["rounded_tl", "rounded_tr"]),
    radius("rounded_r", &["rounded-r"], &["rounded-r-"], &["rounded_tr", "rounded_br"]),
    radius("rounded_b", &["rounded-b"], &["rounded-b-"], &["rounded_br", "rounded_bl"]),
    radius("rounded_l", &["rounded-l"], &["rounded-l-"], &["rounded_tl", "rounded_bl"]),
    radius("rounded_tl", &["rounded-tl"], &["rounded-tl-"], &[]),
    radius("rounded_tr", &["rounded-tr"], &["rounded-tr-"], &[]),
    radius("rounded_br", &["rounded-br"], &["rounded-br-"], &[]),
    radius("rounded_bl", &["rounded-bl"], &["rounded-bl-"], &[]),
    mixed("shadow", Decoration, &["shadow"], &["shadow-"]),
    family("opacity", Decoration, &["opacity-"]),
    exact("background_size", Decoration, &["bg-auto", "bg-cover", "bg-contain"]),
    exact(
        "background_position",
        Decoration,
        &[
            "bg-center", "bg-top", "bg-bottom", "bg-left", "bg-right", "bg-left-top",
            "bg-left-bottom", "bg-right-top", "bg-right-bottom",
        ],
    ),
    exact(
        "background_repeat",
        Decoration,
        &[
            "bg-repeat", "bg-no-repeat", "bg-repeat-x", "bg-repeat-y", "bg-repeat-round",
            "bg-repeat-space",
        ],
    ),
    exact("background_attachment", Decoration, &["bg-fixed", "bg-local", "bg-scroll"]),
    mixed(
        "background_image",
        Decoration,
        &["bg-none"],
        &["bg-gradient-to-", "bg-linear-to-"],
    ),
    family("background_clip", Decoration, &["bg-clip-"]),
    family("background_origin", Decoration, &["bg-origin-"]),
    // Misc
    family("cursor", Misc, &["cursor-"]),
    family("pointer_events", Misc, &["pointer-events-"]),
    family("user_select", Misc, &["select-"]),
    mixed("transition", Misc, &["transition"], &["transition-"]),
    family("duration", Misc, &["duration-"]),
    family("ease", Misc, &["ease-"]),
    family("translate_x", Misc, &["translate-x-"]),
    family("translate_y", Misc, &["translate-y-"]),
    family("rotate", Misc, &["rotate-"]),
    family("scale", Misc, &["scale-"]),
];

/// Families whose arbitrary values switch group when the value is a length:
/// `text-[14px]` is a font size, `text-[#333]` a colour.
const LENGTH_ARBITRARY: &[(&str, &str)] = &[
    ("text_color", "font_size"),
    ("border_color", "border_width"),
];

/// Families whose arbitrary values switch group when the value is an image.
const IMAGE_ARBITRARY: &[(&str, &str)] = &[("background_color", "background_image")];

/// Side border widths whose colour-valued members are side border colours:
/// `border-t-2` is a width, `border-t-red-500` a colour.
const COLOR_VALUED: &[(&str, &str)] = &[
    ("border_width_x", "border_color_x"),
    ("border_width_y", "border_color_y"),
    ("border_width_t", "border_color_t"),
    ("border_width_r", "border_color_r"),
    ("border_width_b", "border_color_b"),
    ("border_width_l", "border_color_l"),
];

const NAMED_COLORS: &[&str] = &["inherit", "current", "transparent", "black", "white"];

const PALETTE: &[&str] = &[
    "slate", "gray", "zinc", "neutral", "stone", "red", "orange", "amber", "yellow", "lime",
    "green", "emerald", "teal", "cyan", "sky", "blue", "indigo", "violet", "purple", "fuchsia",
    "pink", "rose",
];

const ARBITRARY_COLOR_STARTS: &[&str] = &["#", "rgb", "hsl", "oklch", "oklab", "color:", "var("];

static BY_NAME: Lazy<HashMap<&'static str, &'static ConflictGroup>> =
    Lazy::new(|| GROUPS.iter().map(|group| (group.name, group)).collect());

static BY_EXACT: Lazy<HashMap<&'static str, &'static ConflictGroup>> = Lazy::new(|| {
    GROUPS
        .iter()
        .flat_map(|group| group.exact.iter().map(move |class| (*class, group)))
        .collect()
});

static BY_PREFIX: Lazy<Vec<(&'static str, &'static ConflictGroup)>> = Lazy::new(|| {
    let mut prefixes: Vec<_> = GROUPS
        .iter()
        .flat_map(|group| group.prefixes.iter().map(move |prefix| (*prefix, group)))
        .collect();
    // Longest prefix wins: `gap-x-` before `gap-`.
    prefixes.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    prefixes
});

/// Returns every static conflict group.
#[must_use]
pub const fn conflict_groups() -> &'static [ConflictGroup] {
    GROUPS
}

/// Looks up a group by name.
#[must_use]
pub fn conflict_group(name: &str) -> Option<&'static ConflictGroup> {
    BY_NAME.get(name).copied()
}

/// The conflict identity of a class.
///
/// Two classes conflict when their variants and important markers agree and
/// their groups are equal or one overrides the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassKey {
    /// Variant prefix including the trailing colon, e.g. `md:hover:`.
    pub variants: String,
    /// Whether the class carries the `!` important marker.
    pub important: bool,
    /// Group name. Inferred families are named `arbitrary:<prefix>` and
    /// arbitrary properties `property:<name>`.
    pub group: String,
    /// Ordering bucket.
    pub category: Category,
}

impl ClassKey {
    /// Returns whether adding `self` should displace a class keyed `other`.
    #[must_use]
    pub fn displaces(&self, other: &Self) -> bool {
        if self.variants != other.variants || self.important != other.important {
            return false;
        }
        self.group == other.group
            || conflict_group(&self.group)
                .is_some_and(|group| group.overrides.iter().any(|name| *name == other.group))
    }
}

/// Splits a class into its variant prefix and the utility itself.
///
/// Colons inside arbitrary values (`bg-[url(a:b)]`) are not variant
/// separators.
#[must_use]
pub fn split_variants(class: &str) -> (&str, &str) {
    let mut depth = 0_usize;
    let mut split = 0;
    for (index, ch) in class.char_indices() {
        match ch {
            '[' => depth = depth.saturating_add(1),
            ']' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => split = index.saturating_add(1),
            _ => {}
        }
    }
    class.split_at_checked(split).unwrap_or(("", class))
}

/// Returns the conflict identity of `class`, or `None` when the class
/// belongs to no group.
#[must_use]
pub fn class_key(class: &str) -> Option<ClassKey> {
    let (variants, utility) = split_variants(class);
    let (important, bare) = utility
        .strip_prefix('!')
        .or_else(|| utility.strip_suffix('!'))
        .map_or((false, utility), |rest| (true, rest));
    let positive = bare.strip_prefix('-').unwrap_or(bare);
    let (group, category) = classify(positive)?;
    Some(ClassKey {
        variants: variants.to_owned(),
        important,
        group,
        category,
    })
}

/// Returns the ordering bucket of `class`; unknown classes are
/// [`Category::Misc`].
#[must_use]
pub fn category_of(class: &str) -> Category {
    class_key(class).map_or(Category::Misc, |key| key.category)
}

fn classify(utility: &str) -> Option<(String, Category)> {
    if let Some(property) = arbitrary_property(utility) {
        return Some((format!("property:{property}"), Category::Misc));
    }
    if let Some(group) = BY_EXACT.get(utility) {
        return Some((group.name.to_owned(), group.category));
    }
    let matched = BY_PREFIX.iter().find_map(|(prefix, group)| {
        let rest = utility.strip_prefix(prefix)?;
        (!rest.is_empty()).then_some((*group, rest))
    });
    if let Some((group, rest)) = matched {
        let resolved = route_by_value(group, rest)?;
        return Some((resolved.name.to_owned(), resolved.category));
    }
    let (family_prefix, _) = utility.split_once("-[")?;
    (!family_prefix.is_empty() && utility.ends_with(']'))
        .then(|| (format!("arbitrary:{family_prefix}"), Category::Misc))
}

fn arbitrary_property(utility: &str) -> Option<&str> {
    let inner = utility.strip_prefix('[')?.strip_suffix(']')?;
    let (property, _) = inner.split_once(':')?;
    (!property.is_empty()).then_some(property)
}

/// Picks the group for a prefix match from the value after the prefix.
///
/// Colour families only take colour values; anything else under their
/// prefix belongs to no group unless an arbitrary value names a length or
/// an image.
fn route_by_value(group: &'static ConflictGroup, rest: &str) -> Option<&'static ConflictGroup> {
    if let Some(resolved) = arbitrary_value_group(group, rest) {
        return Some(resolved);
    }
    if let Some((_, color_group)) = COLOR_VALUED.iter().find(|(from, _)| *from == group.name) {
        return if is_color_value(rest) {
            conflict_group(color_group)
        } else {
            Some(group)
        };
    }
    if group.category == Category::Color && !is_color_value(rest) {
        return None;
    }
    Some(group)
}

fn arbitrary_value_group(
    group: &'static ConflictGroup,
    rest: &str,
) -> Option<&'static ConflictGroup> {
    let value = rest.strip_prefix('[')?;
    let table = if value.starts_with(|ch: char| ch.is_ascii_digit() || ch == '.') {
        LENGTH_ARBITRARY
    } else if value.starts_with("url(") || value.contains("gradient(") {
        IMAGE_ARBITRARY
    } else {
        return None;
    };
    table
        .iter()
        .find(|(from, _)| *from == group.name)
        .and_then(|(_, to)| conflict_group(to))
}

/// Whether a utility value names a colour: a palette shade, a named or
/// theme colour, or an arbitrary colour. An opacity modifier is ignored.
fn is_color_value(value: &str) -> bool {
    if let Some(inner) = value.strip_prefix('[') {
        let keyword = inner
            .strip_suffix(']')
            .is_some_and(|word| !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase()));
        return keyword || ARBITRARY_COLOR_STARTS.iter().any(|start| inner.starts_with(start));
    }
    let color = value.split_once('/').map_or(value, |(color, _)| color);
    if NAMED_COLORS.contains(&color) {
        return true;
    }
    let shaded = color.rsplit_once('-').is_some_and(|(palette, shade)| {
        PALETTE.contains(&palette) && !shade.is_empty() && shade.bytes().all(|b| b.is_ascii_digit())
    });
    // Theme colours are named by words: `primary`, `muted-foreground`.
    shaded
        || color
            .split('-')
            .all(|word| !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn group(class: &str) -> Option<String> {
        class_key(class).map(|key| key.group)
    }

    #[rstest]
    #[case("p-4", Some("padding"))]
    #[case("px-2", Some("padding_x"))]
    #[case("-mt-2", Some("margin_top"))]
    #[case("gap-x-4", Some("gap_x"))]
    #[case("text-sm", Some("font_size"))]
    #[case("text-red-500", Some("text_color"))]
    #[case("text-[14px]", Some("font_size"))]
    #[case("text-[#333]", Some("text_color"))]
    #[case("border", Some("border_width"))]
    #[case("border-dashed", Some("border_style"))]
    #[case("border-gray-200", Some("border_color"))]
    #[case("flex", Some("display"))]
    #[case("flex-col", Some("flex_direction"))]
    #[case("rounded-t-lg", Some("rounded_t"))]
    #[case("rounded-tl-none", Some("rounded_tl"))]
    #[case("rounded-b", Some("rounded_b"))]
    #[case("border-t", Some("border_width_t"))]
    #[case("border-t-2", Some("border_width_t"))]
    #[case("border-x-[3px]", Some("border_width_x"))]
    #[case("border-t-red-500", Some("border_color_t"))]
    #[case("border-primary", Some("border_color"))]
    #[case("bg-cover", Some("background_size"))]
    #[case("bg-no-repeat", Some("background_repeat"))]
    #[case("bg-white/50", Some("background_color"))]
    #[case("bg-[url(/a.png)]", Some("background_image"))]
    #[case("text-wrap", Some("text_wrap"))]
    #[case("text-[red]", Some("text_color"))]
    #[case("text-foo2", None)]
    #[case("[mask-type:luminance]", Some("property:mask-type"))]
    #[case("foo-[3px]", Some("arbitrary:foo"))]
    #[case("card-title", None)]
    fn classifies_classes(#[case] class: &str, #[case] expected: Option<&str>) {
        assert_eq!(group(class).as_deref(), expected);
    }

    #[test]
    fn variants_and_important_are_part_of_the_key() {
        let key = class_key("md:hover:!p-4").expect("key");
        assert_eq!(key.variants, "md:hover:");
        assert!(key.important);
        assert_eq!(key.group, "padding");
        let plain = class_key("p-2").expect("key");
        assert!(!key.displaces(&plain));
    }

    #[test]
    fn wide_groups_displace_narrow_ones() {
        let wide = class_key("p-4").expect("key");
        let narrow = class_key("px-2").expect("key");
        assert!(wide.displaces(&narrow));
        assert!(!narrow.displaces(&wide));
    }

    #[test]
    fn colons_inside_arbitrary_values_are_not_variants() {
        assert_eq!(split_variants("md:bg-[url(a:b)]"), ("md:", "bg-[url(a:b)]"));
    }

    #[test]
    fn group_names_are_unique() {
        assert_eq!(BY_NAME.len(), conflict_groups().len());
    }
}
