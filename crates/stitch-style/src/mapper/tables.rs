//! Lookup tables for the style mapper.
//!
//! Lengths are keyed in thousandths of a pixel (see [`crate::units`]).

/// Spacing scale shared by padding, margin, gap, inset and sizing.
pub(super) const SPACING: &[(i64, &str)] = &[
    (0, "0"),
    (1_000, "px"),
    (2_000, "0.5"),
    (4_000, "1"),
    (6_000, "1.5"),
    (8_000, "2"),
    (10_000, "2.5"),
    (12_000, "3"),
    (14_000, "3.5"),
    (16_000, "4"),
    (20_000, "5"),
    (24_000, "6"),
    (28_000, "7"),
    (32_000, "8"),
    (36_000, "9"),
    (40_000, "10"),
    (44_000, "11"),
    (48_000, "12"),
    (56_000, "14"),
    (64_000, "16"),
    (80_000, "20"),
    (96_000, "24"),
    (112_000, "28"),
    (128_000, "32"),
    (144_000, "36"),
    (160_000, "40"),
    (176_000, "44"),
    (192_000, "48"),
    (208_000, "52"),
    (224_000, "56"),
    (240_000, "60"),
    (256_000, "64"),
    (288_000, "72"),
    (320_000, "80"),
    (384_000, "96"),
];

pub(super) const FONT_SIZES: &[(i64, &str)] = &[
    (12_000, "xs"),
    (14_000, "sm"),
    (16_000, "base"),
    (18_000, "lg"),
    (20_000, "xl"),
    (24_000, "2xl"),
    (30_000, "3xl"),
    (36_000, "4xl"),
    (48_000, "5xl"),
    (60_000, "6xl"),
    (72_000, "7xl"),
    (96_000, "8xl"),
    (128_000, "9xl"),
];

pub(super) const FONT_WEIGHTS: &[(&str, &str)] = &[
    ("100", "thin"),
    ("200", "extralight"),
    ("300", "light"),
    ("400", "normal"),
    ("normal", "normal"),
    ("500", "medium"),
    ("600", "semibold"),
    ("700", "bold"),
    ("bold", "bold"),
    ("800", "extrabold"),
    ("900", "black"),
];

/// Unitless line-height ratios, in thousandths.
pub(super) const LINE_HEIGHT_RATIOS: &[(i64, &str)] = &[
    (1_000, "none"),
    (1_250, "tight"),
    (1_375, "snug"),
    (1_500, "normal"),
    (1_625, "relaxed"),
    (2_000, "loose"),
];

pub(super) const LINE_HEIGHT_LENGTHS: &[(i64, &str)] = &[
    (12_000, "3"),
    (16_000, "4"),
    (20_000, "5"),
    (24_000, "6"),
    (28_000, "7"),
    (32_000, "8"),
    (36_000, "9"),
    (40_000, "10"),
];

/// Letter spacing in thousandths of an em.
pub(super) const LETTER_SPACING: &[(i64, &str)] = &[
    (-50, "tighter"),
    (-25, "tight"),
    (0, "normal"),
    (25, "wide"),
    (50, "wider"),
    (100, "widest"),
];

/// Radius suffixes; the empty suffix is the bare `rounded` class.
pub(super) const RADII: &[(i64, &str)] = &[
    (0, "-none"),
    (2_000, "-sm"),
    (4_000, ""),
    (6_000, "-md"),
    (8_000, "-lg"),
    (12_000, "-xl"),
    (16_000, "-2xl"),
    (24_000, "-3xl"),
    (9_999_000, "-full"),
];

/// Border width suffixes; the empty suffix is the bare `border` class.
pub(super) const BORDER_WIDTHS: &[(i64, &str)] = &[
    (0, "-0"),
    (1_000, ""),
    (2_000, "-2"),
    (4_000, "-4"),
    (8_000, "-8"),
];

pub(super) const MAX_WIDTHS: &[(i64, &str)] = &[
    (320_000, "xs"),
    (384_000, "sm"),
    (448_000, "md"),
    (512_000, "lg"),
    (576_000, "xl"),
    (672_000, "2xl"),
    (768_000, "3xl"),
    (896_000, "4xl"),
    (1_024_000, "5xl"),
    (1_152_000, "6xl"),
    (1_280_000, "7xl"),
];

/// Percentages (in thousandths of a percent) with fraction names.
pub(super) const FRACTIONS: &[(i64, &str)] = &[
    (20_000, "1/5"),
    (25_000, "1/4"),
    (40_000, "2/5"),
    (50_000, "1/2"),
    (60_000, "3/5"),
    (75_000, "3/4"),
    (80_000, "4/5"),
    (100_000, "full"),
];

/// Opacity as a unitless fraction in thousandths.
pub(super) const OPACITY: &[(i64, &str)] = &[
    (0, "0"),
    (50, "5"),
    (100, "10"),
    (150, "15"),
    (200, "20"),
    (250, "25"),
    (300, "30"),
    (350, "35"),
    (400, "40"),
    (450, "45"),
    (500, "50"),
    (550, "55"),
    (600, "60"),
    (650, "65"),
    (700, "70"),
    (750, "75"),
    (800, "80"),
    (850, "85"),
    (900, "90"),
    (950, "95"),
    (1_000, "100"),
];

pub(super) const Z_INDEX: &[&str] = &["0", "10", "20", "30", "40", "50"];

/// Colour values (lower-cased) with palette names.
pub(super) const COLORS: &[(&str, &str)] = &[
    ("transparent", "transparent"),
    ("currentcolor", "current"),
    ("inherit", "inherit"),
    ("#000", "black"),
    ("#000000", "black"),
    ("black", "black"),
    ("#fff", "white"),
    ("#ffffff", "white"),
    ("white", "white"),
    ("#f9fafb", "gray-50"),
    ("#f3f4f6", "gray-100"),
    ("#e5e7eb", "gray-200"),
    ("#d1d5db", "gray-300"),
    ("#9ca3af", "gray-400"),
    ("#6b7280", "gray-500"),
    ("#4b5563", "gray-600"),
    ("#374151", "gray-700"),
    ("#1f2937", "gray-800"),
    ("#111827", "gray-900"),
    ("#fee2e2", "red-100"),
    ("#ef4444", "red-500"),
    ("#dc2626", "red-600"),
    ("#b91c1c", "red-700"),
    ("#ffedd5", "orange-100"),
    ("#f97316", "orange-500"),
    ("#fef9c3", "yellow-100"),
    ("#eab308", "yellow-500"),
    ("#dcfce7", "green-100"),
    ("#22c55e", "green-500"),
    ("#16a34a", "green-600"),
    ("#dbeafe", "blue-100"),
    ("#3b82f6", "blue-500"),
    ("#2563eb", "blue-600"),
    ("#1d4ed8", "blue-700"),
    ("#e0e7ff", "indigo-100"),
    ("#6366f1", "indigo-500"),
    ("#4f46e5", "indigo-600"),
    ("#f3e8ff", "purple-100"),
    ("#a855f7", "purple-500"),
    ("#fce7f3", "pink-100"),
    ("#ec4899", "pink-500"),
];

/// How a keyword-valued property maps to classes.
pub(super) enum Keywords {
    /// Explicit value-to-class pairs.
    Map(&'static [(&'static str, &'static str)]),
    /// `prefix-value` for each listed value.
    Prefixed(&'static str, &'static [&'static str]),
}

pub(super) const KEYWORD_PROPERTIES: &[(&str, Keywords)] = &[
    (
        "display",
        Keywords::Map(&[
            ("block", "block"),
            ("inline-block", "inline-block"),
            ("inline", "inline"),
            ("flex", "flex"),
            ("inline-flex", "inline-flex"),
            ("grid", "grid"),
            ("inline-grid", "inline-grid"),
            ("none", "hidden"),
            ("contents", "contents"),
            ("table", "table"),
            ("flow-root", "flow-root"),
            ("list-item", "list-item"),
        ]),
    ),
    (
        "position",
        Keywords::Map(&[
            ("static", "static"),
            ("fixed", "fixed"),
            ("absolute", "absolute"),
            ("relative", "relative"),
            ("sticky", "sticky"),
        ]),
    ),
    (
        "visibility",
        Keywords::Map(&[
            ("visible", "visible"),
            ("hidden", "invisible"),
            ("collapse", "collapse"),
        ]),
    ),
    (
        "overflow",
        Keywords::Prefixed("overflow", &["auto", "hidden", "visible", "scroll", "clip"]),
    ),
    (
        "overflow-x",
        Keywords::Prefixed("overflow-x", &["auto", "hidden", "visible", "scroll", "clip"]),
    ),
    (
        "overflow-y",
        Keywords::Prefixed("overflow-y", &["auto", "hidden", "visible", "scroll", "clip"]),
    ),
    (
        "flex-direction",
        Keywords::Map(&[
            ("row", "flex-row"),
            ("row-reverse", "flex-row-reverse"),
            ("column", "flex-col"),
            ("column-reverse", "flex-col-reverse"),
        ]),
    ),
    (
        "flex-wrap",
        Keywords::Map(&[
            ("wrap", "flex-wrap"),
            ("nowrap", "flex-nowrap"),
            ("wrap-reverse", "flex-wrap-reverse"),
        ]),
    ),
    (
        "justify-content",
        Keywords::Map(&[
            ("flex-start", "justify-start"),
            ("start", "justify-start"),
            ("flex-end", "justify-end"),
            ("end", "justify-end"),
            ("center", "justify-center"),
            ("space-between", "justify-between"),
            ("space-around", "justify-around"),
            ("space-evenly", "justify-evenly"),
            ("stretch", "justify-stretch"),
        ]),
    ),
    (
        "align-items",
        Keywords::Map(&[
            ("flex-start", "items-start"),
            ("start", "items-start"),
            ("flex-end", "items-end"),
            ("end", "items-end"),
            ("center", "items-center"),
            ("baseline", "items-baseline"),
            ("stretch", "items-stretch"),
        ]),
    ),
    (
        "align-self",
        Keywords::Map(&[
            ("auto", "self-auto"),
            ("flex-start", "self-start"),
            ("start", "self-start"),
            ("flex-end", "self-end"),
            ("end", "self-end"),
            ("center", "self-center"),
            ("baseline", "self-baseline"),
            ("stretch", "self-stretch"),
        ]),
    ),
    (
        "text-align",
        Keywords::Prefixed("text", &["left", "center", "right", "justify", "start", "end"]),
    ),
    (
        "font-style",
        Keywords::Map(&[("italic", "italic"), ("normal", "not-italic")]),
    ),
    (
        "text-decoration",
        Keywords::Map(&[
            ("underline", "underline"),
            ("overline", "overline"),
            ("line-through", "line-through"),
            ("none", "no-underline"),
        ]),
    ),
    (
        "text-decoration-line",
        Keywords::Map(&[
            ("underline", "underline"),
            ("overline", "overline"),
            ("line-through", "line-through"),
            ("none", "no-underline"),
        ]),
    ),
    (
        "text-transform",
        Keywords::Map(&[
            ("uppercase", "uppercase"),
            ("lowercase", "lowercase"),
            ("capitalize", "capitalize"),
            ("none", "normal-case"),
        ]),
    ),
    (
        "white-space",
        Keywords::Prefixed(
            "whitespace",
            &["normal", "nowrap", "pre", "pre-line", "pre-wrap", "break-spaces"],
        ),
    ),
    (
        "border-style",
        Keywords::Prefixed(
            "border",
            &["solid", "dashed", "dotted", "double", "hidden", "none"],
        ),
    ),
    (
        "pointer-events",
        Keywords::Prefixed("pointer-events", &["none", "auto"]),
    ),
    (
        "user-select",
        Keywords::Prefixed("select", &["none", "text", "all", "auto"]),
    ),
    (
        "cursor",
        Keywords::Prefixed(
            "cursor",
            &[
                "auto", "default", "pointer", "wait", "text", "move", "help", "not-allowed",
                "grab", "grabbing",
            ],
        ),
    ),
    (
        "object-fit",
        Keywords::Prefixed("object", &["contain", "cover", "fill", "none", "scale-down"]),
    ),
];
