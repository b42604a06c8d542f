//! End-to-end tests for stitch-style: inline styles in, utility classes out.

use insta::assert_snapshot;
use rstest::rstest;

use stitch_style::{
    Category, ClassList, category_of, class_key, conflict_groups, map_declarations, merge,
    parse_inline_style, sort,
};

fn classes_for(style: &str) -> ClassList {
    let declarations =
        parse_inline_style(style).unwrap_or_else(|err| panic!("parse '{style}': {err}"));
    map_declarations(&declarations).classes.into_iter().collect()
}

#[test]
fn inline_style_becomes_sorted_utility_classes() {
    let mapped = classes_for(
        "color: #6b7280; padding: 1rem; display: flex; font-size: 14px; border-radius: 8px",
    );
    assert_snapshot!(mapped.to_string(), @"text-gray-500 p-4 flex text-sm rounded-lg");
    assert_snapshot!(sort(&mapped).to_string(), @"flex p-4 text-sm text-gray-500 rounded-lg");
}

#[test]
fn unmapped_declarations_are_returned() {
    let declarations =
        parse_inline_style("margin: 0 auto; mask-image: none; -webkit-box-orient: vertical")
            .unwrap_or_else(|err| panic!("parse: {err}"));
    let mapping = map_declarations(&declarations);
    assert_snapshot!(mapping.classes.join(" "), @"m-[0_auto]");
    let leftovers: Vec<_> = mapping
        .unmapped
        .iter()
        .map(|declaration| declaration.property.as_str())
        .collect();
    assert_eq!(leftovers, ["mask-image", "-webkit-box-orient"]);
}

#[test]
fn mapped_styles_merge_over_existing_classes() {
    let existing = ClassList::parse("flex p-2 text-sm hover:bg-gray-100 bg-white card");
    let incoming = classes_for("padding: 24px; background-color: #3b82f6");
    let merged = merge(&existing, &incoming);
    assert_snapshot!(merged.to_string(), @"flex text-sm hover:bg-gray-100 card p-6 bg-blue-500");
}

#[rstest]
#[case("md:hover:p-4", "md:hover:", "padding")]
#[case("!-mt-2", "", "margin_top")]
#[case("bg-[url(a:b)]", "", "background_image")]
#[case("[mask-type:alpha]", "", "property:mask-type")]
#[case("grid-cols-[auto_1fr]", "", "grid_cols")]
#[case("ring-[3px]", "", "arbitrary:ring")]
fn keys_capture_variants_and_groups(
    #[case] class: &str,
    #[case] variants: &str,
    #[case] group: &str,
) {
    let key = class_key(class).unwrap_or_else(|| panic!("no key for {class}"));
    assert_eq!(key.variants, variants);
    assert_eq!(key.group, group);
}

#[test]
fn group_names_are_unique() {
    let mut names: Vec<_> = conflict_groups().iter().map(|group| group.name).collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
}

#[test]
fn unknown_classes_sort_last() {
    assert_eq!(category_of("card"), Category::Misc);
    assert_eq!(category_of("sm:flex"), Category::Layout);
}
