//! Element lookup strategies.
//!
//! Each strategy degrades differently: positions go stale after edits,
//! text changes as the user types, ids are only present on generated
//! markup and class lists are rarely unique. The locator therefore tries
//! every hint it is given in a fixed order and reports which one resolved.

use stitch_syntax::{LineIndex, NodePath, SourceTree};
use tracing::debug;

use crate::config::EngineConfig;
use crate::element::{ElementEntry, decode_entities, index_elements, normalize_whitespace};
use crate::error::EngineError;
use crate::request::{ClassHint, IdHint, LocatorCriteria, PositionHint, Strategy, TextHint};

const LOCATOR_TARGET: &str = "stitch_engine::locator";

/// Finds elements in one parsed source.
pub(crate) struct ElementLocator<'a> {
    source: &'a str,
    config: &'a EngineConfig,
    elements: Vec<ElementEntry>,
}

impl<'a> ElementLocator<'a> {
    /// Indexes the elements of `tree`, which must be the parse of `source`.
    pub(crate) fn new(tree: &SourceTree, source: &'a str, config: &'a EngineConfig) -> Self {
        Self {
            source,
            config,
            elements: index_elements(tree, config),
        }
    }

    /// Every named element, in document order.
    pub(crate) fn elements(&self) -> &[ElementEntry] {
        &self.elements
    }

    /// Resolves `criteria`, trying position, text, id and class hints in
    /// that order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidOperation`] when no hint is given and
    /// [`EngineError::NodeNotFound`] when no hint resolves.
    pub(crate) fn locate(
        &self,
        criteria: &LocatorCriteria,
    ) -> Result<(NodePath, Strategy), EngineError> {
        if criteria.is_empty() {
            return Err(EngineError::invalid_operation("no locator hint given"));
        }
        let attempts = [
            criteria
                .by_position
                .map(|hint| (Strategy::Position, self.by_position(hint))),
            criteria
                .by_text
                .as_ref()
                .map(|hint| (Strategy::Text, self.by_text(hint))),
            criteria
                .by_id
                .as_ref()
                .map(|hint| (Strategy::Id, self.by_id(hint))),
            criteria
                .by_class_name
                .as_ref()
                .map(|hint| (Strategy::ClassName, self.by_class(hint))),
        ];
        let mut tried = Vec::new();
        for (strategy, found) in attempts.into_iter().flatten() {
            match found {
                Some(entry) => {
                    debug!(
                        target: LOCATOR_TARGET,
                        %strategy,
                        path = %entry.path,
                        element = %entry.name,
                        "element located"
                    );
                    return Ok((entry.path.clone(), strategy));
                }
                None => {
                    debug!(target: LOCATOR_TARGET, %strategy, "strategy found no element");
                    tried.push(strategy.to_string());
                }
            }
        }
        Err(EngineError::node_not_found(format!(
            "no element matched by {}",
            tried.join(", ")
        )))
    }

    /// Every element carrying stable id `id`, in document order.
    pub(crate) fn all_by_id(&self, id: &str) -> Vec<&ElementEntry> {
        self.elements
            .iter()
            .filter(|entry| entry.stable_id.as_deref() == Some(id))
            .collect()
    }

    /// The requested instance among the elements sharing an id.
    pub(crate) fn by_id(&self, hint: &IdHint) -> Option<&ElementEntry> {
        self.all_by_id(hint.id()).get(hint.instance()).copied()
    }

    /// The element starting closest to a click position.
    ///
    /// Candidates must start within the configured byte tolerance of the
    /// hint or, when enabled, on the same line. Ties go to the earlier
    /// element.
    pub(crate) fn by_position(&self, hint: PositionHint) -> Option<&ElementEntry> {
        let index = LineIndex::new(self.source);
        let offset = index.offset_of(self.source, hint.line, hint.column)?;
        let line = usize::try_from(hint.line.checked_sub(1)?).ok()?;
        let settings = &self.config.position;
        self.elements
            .iter()
            .filter_map(|entry| {
                let span = entry.span?;
                let distance = span.start_byte().abs_diff(offset);
                let same_line = settings.same_line && span.start_row() == line;
                (distance <= settings.tolerance_bytes || same_line).then_some((distance, entry))
            })
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, entry)| entry)
    }

    /// The element whose direct text matches.
    ///
    /// An exact match (after whitespace normalisation) wins outright.
    /// Otherwise the most similar element whose text contains the query, or
    /// is contained by it, is accepted if its similarity reaches the floor.
    pub(crate) fn by_text(&self, hint: &TextHint) -> Option<&ElementEntry> {
        let query = normalize_whitespace(&decode_entities(&hint.original));
        if query.is_empty() {
            return None;
        }
        let query_len = query.chars().count();
        let mut best: Option<(usize, usize, &ElementEntry)> = None;
        for entry in self.named(hint.tag_name_filter.as_deref()) {
            if entry.text.is_empty() {
                continue;
            }
            if entry.text == query {
                return Some(entry);
            }
            if !(entry.text.contains(&query) || query.contains(&entry.text)) {
                continue;
            }
            let text_len = entry.text.chars().count();
            let (shorter, longer) = (text_len.min(query_len), text_len.max(query_len));
            let better = best.is_none_or(|(best_shorter, best_longer, _)| {
                shorter.saturating_mul(best_longer) > best_shorter.saturating_mul(longer)
            });
            if better {
                best = Some((shorter, longer, entry));
            }
        }
        let (shorter, longer, entry) = best?;
        let accepted = meets_floor(shorter, longer, self.config.text.similarity_floor);
        debug!(
            target: LOCATOR_TARGET,
            shorter,
            longer,
            accepted,
            "fuzzy text candidate"
        );
        accepted.then_some(entry)
    }

    /// The first element whose class attribute equals the hint.
    pub(crate) fn by_class(&self, hint: &ClassHint) -> Option<&ElementEntry> {
        let wanted = normalize_whitespace(&hint.value);
        self.named(hint.tag_name_filter.as_deref())
            .into_iter()
            .find(|entry| {
                entry
                    .class_value
                    .as_deref()
                    .is_some_and(|value| normalize_whitespace(value) == wanted)
            })
    }

    /// Elements whose name matches `filter`, or every element without one.
    fn named(&self, filter: Option<&str>) -> Vec<&ElementEntry> {
        self.elements
            .iter()
            .filter(|entry| filter.is_none_or(|name| entry.name == name))
            .collect()
    }
}

/// Whether `shorter / longer` reaches `floor`.
#[expect(
    clippy::float_arithmetic,
    reason = "similarity is a ratio compared against a fractional floor"
)]
fn meets_floor(shorter: usize, longer: usize, floor: f64) -> bool {
    if longer == 0 {
        return false;
    }
    let as_float = |value: usize| f64::from(u32::try_from(value).unwrap_or(u32::MAX));
    as_float(shorter) / as_float(longer) >= floor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use stitch_syntax::{SupportedLanguage, parse_source};

    const LIST: &str = concat!(
        "export const List = () => (\n",
        "  <section className=\"card p-4\">\n",
        "    <h2 data-stitch-id=\"title\">Save Changes</h2>\n",
        "    <ul>\n",
        "      <li data-stitch-id=\"row\">Alpha</li>\n",
        "      <li data-stitch-id=\"row\">Beta</li>\n",
        "    </ul>\n",
        "    <button className=\"btn\">Save</button>\n",
        "  </section>\n",
        ");\n",
    );

    #[fixture]
    fn tree() -> SourceTree {
        parse_source(LIST, SupportedLanguage::Tsx).expect("parse")
    }

    fn path_of(found: Option<&ElementEntry>) -> Option<String> {
        found.map(|entry| entry.path.to_string())
    }

    fn name_of(found: Option<&ElementEntry>) -> Option<&str> {
        found.map(|entry| entry.name.as_str())
    }

    #[rstest]
    fn ids_resolve_every_instance(tree: SourceTree) {
        let config = EngineConfig::default();
        let locator = ElementLocator::new(&tree, LIST, &config);
        assert_eq!(locator.all_by_id("row").len(), 2);
        let second = locator.by_id(&IdHint::Instance {
            id: "row".to_owned(),
            instance: Some(1),
        });
        assert_eq!(second.map(|entry| entry.text.as_str()), Some("Beta"));
        assert!(
            locator
                .by_id(&IdHint::Instance {
                    id: "row".to_owned(),
                    instance: Some(2),
                })
                .is_none()
        );
    }

    #[rstest]
    #[case(2, 4, Some("section"))]
    #[case(3, 4, Some("h2"))]
    #[case(3, 20, Some("h2"))]
    #[case(3, 40, Some("ul"))]
    #[case(5, 6, Some("li"))]
    #[case(10, 0, None)]
    fn positions_pick_the_nearest_element(
        tree: SourceTree,
        #[case] line: u32,
        #[case] column: u32,
        #[case] expected: Option<&str>,
    ) {
        let config = EngineConfig::default();
        let locator = ElementLocator::new(&tree, LIST, &config);
        assert_eq!(
            name_of(locator.by_position(PositionHint { line, column })),
            expected
        );
    }

    #[rstest]
    fn distant_positions_on_other_lines_fail(tree: SourceTree) {
        let mut config = EngineConfig::default();
        config.position.tolerance_bytes = 2;
        let locator = ElementLocator::new(&tree, LIST, &config);
        // Line 4 starts `    <ul>`; column 0 is four bytes from the element.
        assert_eq!(
            name_of(locator.by_position(PositionHint { line: 4, column: 0 })),
            Some("ul")
        );
        config.position.same_line = false;
        let strict = ElementLocator::new(&tree, LIST, &config);
        assert!(strict.by_position(PositionHint { line: 4, column: 0 }).is_none());
    }

    #[rstest]
    #[case("Save Changes", None, Some("h2"))]
    #[case("Save Changes Now", None, Some("h2"))]
    #[case("  Save\n Changes ", None, Some("h2"))]
    #[case("Save", None, Some("button"))]
    #[case("Sav", Some("button"), Some("button"))]
    #[case("Alph", None, Some("li"))]
    #[case("Gamma", None, None)]
    fn text_matches_exactly_or_by_similarity(
        tree: SourceTree,
        #[case] original: &str,
        #[case] filter: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let config = EngineConfig::default();
        let locator = ElementLocator::new(&tree, LIST, &config);
        let hint = TextHint {
            original: original.to_owned(),
            tag_name_filter: filter.map(str::to_owned),
        };
        assert_eq!(name_of(locator.by_text(&hint)), expected);
    }

    #[test]
    fn short_queries_fall_below_the_floor() {
        let source = "const a = <p>Save Changes</p>;";
        let tree = parse_source(source, SupportedLanguage::Tsx).expect("parse");
        let config = EngineConfig::default();
        let locator = ElementLocator::new(&tree, source, &config);
        let hint = TextHint {
            original: "Save".to_owned(),
            tag_name_filter: None,
        };
        assert!(locator.by_text(&hint).is_none());
    }

    #[rstest]
    fn classes_match_the_whole_attribute(tree: SourceTree) {
        let config = EngineConfig::default();
        let locator = ElementLocator::new(&tree, LIST, &config);
        let hint = |value: &str| ClassHint {
            value: value.to_owned(),
            tag_name_filter: None,
        };
        assert_eq!(name_of(locator.by_class(&hint(" card  p-4 "))), Some("section"));
        assert!(locator.by_class(&hint("card")).is_none());
    }

    #[rstest]
    fn located_entries_outlive_filtered_hints(tree: SourceTree) {
        let config = EngineConfig::default();
        let locator = ElementLocator::new(&tree, LIST, &config);
        let by_text = {
            let hint = TextHint {
                original: "Beta".to_owned(),
                tag_name_filter: Some("li".to_owned()),
            };
            locator.by_text(&hint)
        };
        let by_class = {
            let hint = ClassHint {
                value: "btn".to_owned(),
                tag_name_filter: Some("button".to_owned()),
            };
            locator.by_class(&hint)
        };
        assert_eq!(by_text.map(|entry| entry.text.as_str()), Some("Beta"));
        assert_eq!(name_of(by_class), Some("button"));
    }

    #[rstest]
    fn criteria_follow_the_priority_order(tree: SourceTree) {
        let config = EngineConfig::default();
        let locator = ElementLocator::new(&tree, LIST, &config);
        let criteria = LocatorCriteria {
            by_id: Some(IdHint::Plain("title".to_owned())),
            by_class_name: Some(ClassHint {
                value: "btn".to_owned(),
                tag_name_filter: None,
            }),
            by_text: Some(TextHint {
                original: "Nothing like it".to_owned(),
                tag_name_filter: None,
            }),
            ..LocatorCriteria::default()
        };
        let (path, strategy) = locator.locate(&criteria).expect("located");
        assert_eq!(strategy, Strategy::Id);
        assert_eq!(
            Some(path.to_string()),
            path_of(locator.by_id(&IdHint::Plain("title".to_owned())))
        );
        let err = locator
            .locate(&LocatorCriteria::text("Nothing like it"))
            .expect_err("no match");
        assert_eq!(err.kind(), crate::ErrorKind::NodeNotFound);
    }
}
