//! Color rebinding walk.
//!
//! [`Rebinder`] walks a page depth-first, pre-order, and rewrites each
//! node's fill and stroke lists: an unbound solid paint whose color is in the
//! [`ColorIndex`] is replaced by the same paint bound to the indexed token.
//! Lists are rebuilt and written back whole.
//!
//! A node that refuses the write (locked, read-only) is recorded as a
//! [`SkippedNode`] and its paint counts are dropped; the walk still descends
//! into its children and carries on with its siblings.

use log::{info, warn};

use swatch_core::paint::Paint;

use crate::{
    document::{Node, Page, PaintSlot},
    index::ColorIndex,
    report::{PaintTally, RebindReport, SkippedNode},
};

/// Binds literal paints to tokens through a [`ColorIndex`].
#[derive(Debug, Clone, Copy)]
pub struct Rebinder<'a> {
    index: &'a ColorIndex,
}

impl<'a> Rebinder<'a> {
    pub fn new(index: &'a ColorIndex) -> Self {
        Self { index }
    }

    /// Returns the rebound version of `paints`, counting into `tally`.
    ///
    /// Non-solid paints are copied as is. Solid paints that already carry a
    /// binding are never touched, even when their color matches some other
    /// token. Unbound solid paints are bound on an index hit and copied
    /// otherwise.
    pub fn bind_paints(&self, paints: &[Paint], tally: &mut PaintTally) -> Vec<Paint> {
        paints
            .iter()
            .map(|paint| {
                let Paint::Solid(solid) = paint else {
                    return paint.clone();
                };
                if solid.bound_color().is_some() {
                    tally.already_bound += 1;
                    return paint.clone();
                }
                match self.index.get(solid.key()) {
                    Some(variable) => {
                        tally.newly_bound += 1;
                        Paint::Solid(solid.with_bound_color(variable))
                    }
                    None => paint.clone(),
                }
            })
            .collect()
    }

    /// Rebinds `node`'s own paint lists, then its subtree.
    pub fn rebind_node(&self, node: &mut Node, report: &mut RebindReport) {
        report.nodes_visited += 1;

        for slot in PaintSlot::ALL {
            let Some(paints) = node.paints(slot) else {
                continue;
            };
            let mut tally = PaintTally::default();
            let rebound = self.bind_paints(paints, &mut tally);
            if let Err(reason) = node.set_paints(slot, rebound) {
                warn!(node = node.id(), reason = reason.to_string(); "Skipping node");
                report.skipped.push(SkippedNode {
                    node_id: node.id().to_string(),
                    node_name: node.name().to_string(),
                    reason,
                });
                break;
            }
            report.paints += tally;
        }

        for child in node.children_mut() {
            self.rebind_node(child, report);
        }
    }

    /// Rebinds every top-level node of `page` and their subtrees.
    pub fn rebind_page(&self, page: &mut Page) -> RebindReport {
        let mut report = RebindReport::default();
        for node in page.children_mut() {
            self.rebind_node(node, &mut report);
        }

        info!(
            page = page.name(),
            newly_bound = report.newly_bound(),
            already_bound = report.already_bound(),
            skipped = report.skipped.len();
            "Page rebound"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Map;
    use swatch_core::{
        color::Color,
        identifier::{CollectionId, ModeId, Name, VariableId},
        paint::{ColorStop, GradientPaint, SolidPaint},
        value::{VariableType, VariableValue},
    };

    use super::*;
    use crate::{
        document::{EditError, NodeKind},
        resolve::AliasResolver,
        store::{MemoryStore, VariableStore},
    };

    struct Fixture {
        store: MemoryStore,
        collection: CollectionId,
        mode: ModeId,
        accent: VariableId,
        bar: VariableId,
        surface: VariableId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut store = MemoryStore::new();
            let collection = store.create_collection(Name::new("Colors")).unwrap();
            let mode = store.collection(collection).unwrap().default_mode_id();

            let mut token = |name: &str, value: VariableValue| {
                let id = store
                    .create_variable(Name::new(name), collection, VariableType::Color)
                    .unwrap();
                store.set_value_for_mode(id, mode, value).unwrap();
                id
            };
            let accent = token("base/color-accent-1", hex("#ffff00").into());
            let surface = token("base/color-surface", hex("#ffffff").into());
            let bar = token("component/color-sticky-bar-bg", VariableValue::Alias(accent));

            Self {
                store,
                collection,
                mode,
                accent,
                bar,
                surface,
            }
        }

        fn index(&self) -> ColorIndex {
            ColorIndex::build(&AliasResolver::new(&self.store, self.mode), self.collection)
        }
    }

    fn hex(value: &str) -> Color {
        Color::new(value).unwrap()
    }

    fn solid(value: &str) -> Paint {
        SolidPaint::new(hex(value), 1.0).into()
    }

    fn bound_to(paint: &Paint) -> Option<VariableId> {
        paint.as_solid().and_then(SolidPaint::bound_color)
    }

    #[test]
    fn test_binds_to_highest_tier_token() {
        let fixture = Fixture::new();
        let index = fixture.index();
        let mut tally = PaintTally::default();

        let paints = Rebinder::new(&index).bind_paints(&[solid("#ffff00")], &mut tally);

        assert_eq!(bound_to(&paints[0]), Some(fixture.bar));
        assert_eq!(tally.newly_bound, 1);
        assert_eq!(tally.already_bound, 0);
    }

    #[test]
    fn test_bound_paint_left_alone() {
        let fixture = Fixture::new();
        let index = fixture.index();
        let mut tally = PaintTally::default();
        // Bound to the surface token, but its literal color matches the bar.
        let paint: Paint = SolidPaint::new(hex("#ffff00"), 1.0)
            .with_bound_color(fixture.surface)
            .into();

        let paints = Rebinder::new(&index).bind_paints(std::slice::from_ref(&paint), &mut tally);

        assert_eq!(paints[0], paint);
        assert_eq!(tally.already_bound, 1);
        assert_eq!(tally.newly_bound, 0);
    }

    #[test]
    fn test_miss_and_non_solid_pass_through() {
        let fixture = Fixture::new();
        let index = fixture.index();
        let mut tally = PaintTally::default();
        let gradient = Paint::GradientLinear(GradientPaint {
            gradient_stops: vec![
                ColorStop {
                    position: 0.0,
                    color: hex("#ffff00"),
                    extra: Map::new(),
                },
                ColorStop {
                    position: 1.0,
                    color: hex("#ffffff"),
                    extra: Map::new(),
                },
            ],
            opacity: 1.0,
            extra: Map::new(),
        });
        let input = vec![gradient.clone(), solid("#123456")];

        let paints = Rebinder::new(&index).bind_paints(&input, &mut tally);

        assert_eq!(paints, input);
        assert_eq!(tally, PaintTally::default());
    }

    #[test]
    fn test_paint_attributes_preserved() {
        let fixture = Fixture::new();
        let index = fixture.index();
        let paint = SolidPaint::new(hex("#ffffff"), 1.0).with_visible(false);

        let paints = Rebinder::new(&index)
            .bind_paints(&[paint.clone().into()], &mut PaintTally::default());

        assert_eq!(paints[0], Paint::Solid(paint.with_bound_color(fixture.surface)));
    }

    #[test]
    fn test_opacity_is_matched() {
        let fixture = Fixture::new();
        let index = fixture.index();
        let faded: Paint = SolidPaint::new(hex("#ffff00"), 0.5).into();

        let paints = Rebinder::new(&index).bind_paints(&[faded.clone()], &mut PaintTally::default());

        assert_eq!(paints[0], faded);
    }

    #[test]
    fn test_walk_binds_fills_and_strokes_in_subtree() {
        let fixture = Fixture::new();
        let index = fixture.index();
        let mut page = Page::new(
            "Home",
            vec![
                Node::new("1:1", "Frame", NodeKind::Frame)
                    .with_fills(vec![solid("#ffffff")])
                    .with_children(vec![
                        Node::new("1:2", "Bar", NodeKind::Rectangle)
                            .with_fills(vec![solid("#ffff00")])
                            .with_strokes(vec![solid("#ffffff")]),
                    ]),
            ],
        );

        let report = Rebinder::new(&index).rebind_page(&mut page);

        assert_eq!(report.newly_bound(), 3);
        assert_eq!(report.nodes_visited, 2);
        let bar = page.find("1:2").unwrap();
        assert_eq!(bound_to(&bar.paints(PaintSlot::Fills).unwrap()[0]), Some(fixture.bar));
        assert_eq!(
            bound_to(&bar.paints(PaintSlot::Strokes).unwrap()[0]),
            Some(fixture.surface)
        );
    }

    #[test]
    fn test_locked_node_skipped_children_processed() {
        let fixture = Fixture::new();
        let index = fixture.index();
        let mut page = Page::new(
            "Home",
            vec![
                Node::new("1:1", "Locked", NodeKind::Frame)
                    .with_locked(true)
                    .with_fills(vec![solid("#ffff00")])
                    .with_children(vec![
                        Node::new("1:2", "Child", NodeKind::Rectangle)
                            .with_fills(vec![solid("#ffff00")]),
                    ]),
                Node::new("1:3", "Sibling", NodeKind::Rectangle)
                    .with_read_only(true)
                    .with_strokes(vec![solid("#ffffff")]),
            ],
        );

        let report = Rebinder::new(&index).rebind_page(&mut page);

        assert_eq!(report.newly_bound(), 1);
        assert_eq!(report.nodes_visited, 3);
        assert_eq!(
            report.skipped,
            vec![
                SkippedNode {
                    node_id: "1:1".to_string(),
                    node_name: "Locked".to_string(),
                    reason: EditError::Locked,
                },
                SkippedNode {
                    node_id: "1:3".to_string(),
                    node_name: "Sibling".to_string(),
                    reason: EditError::ReadOnly,
                },
            ]
        );
        let locked = page.find("1:1").unwrap();
        assert_eq!(bound_to(&locked.paints(PaintSlot::Fills).unwrap()[0]), None);
        let child = page.find("1:2").unwrap();
        assert_eq!(bound_to(&child.paints(PaintSlot::Fills).unwrap()[0]), Some(fixture.bar));
    }

    #[test]
    fn test_second_walk_counts_already_bound() {
        let fixture = Fixture::new();
        let index = fixture.index();
        let mut page = Page::new(
            "Home",
            vec![Node::new("1:1", "Bar", NodeKind::Rectangle).with_fills(vec![solid("#ffff00")])],
        );
        let rebinder = Rebinder::new(&index);

        let first = rebinder.rebind_page(&mut page);
        let second = rebinder.rebind_page(&mut page);

        assert_eq!((first.newly_bound(), first.already_bound()), (1, 0));
        assert_eq!((second.newly_bound(), second.already_bound()), (0, 1));
        assert_ne!(fixture.accent, fixture.bar);
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;
    use swatch_core::{
        color::Color,
        identifier::{Name, VariableId},
        paint::SolidPaint,
        value::VariableType,
    };

    use super::*;
    use crate::{
        resolve::AliasResolver,
        store::{MemoryStore, VariableStore},
    };

    // ===================
    // Strategies
    // ===================

    fn rgb8_strategy() -> impl Strategy<Value = (u8, u8, u8)> {
        (any::<u8>(), any::<u8>(), any::<u8>())
    }

    fn alpha_strategy() -> impl Strategy<Value = u16> {
        0u16..=1000
    }

    /// Fraction of half a quantization step.
    fn noise_strategy() -> impl Strategy<Value = f64> {
        -0.99f64..0.99
    }

    // ===================
    // Helpers
    // ===================

    /// A one-token index holding `color`.
    fn single_token_index(color: Color) -> (ColorIndex, VariableId) {
        let mut store = MemoryStore::new();
        let collection = store.create_collection(Name::new("Colors")).unwrap();
        let mode = store.collection(collection).unwrap().default_mode_id();
        let token = store
            .create_variable(Name::new("semantic/color-accent"), collection, VariableType::Color)
            .unwrap();
        store.set_value_for_mode(token, mode, color.into()).unwrap();
        let index = ColorIndex::build(&AliasResolver::new(&store, mode), collection);
        (index, token)
    }

    // ===================
    // Property Test Functions
    // ===================

    /// A paint within float noise of a token binds to it and keeps its own
    /// literal color and opacity.
    fn check_noisy_paint_binds_and_keeps_literal(
        (r, g, b): (u8, u8, u8),
        alpha_milli: u16,
        noise: [f64; 4],
    ) -> Result<(), TestCaseError> {
        let alpha = f32::from(alpha_milli) / 1000.0;
        let (index, token) = single_token_index(Color::from_rgba8(r, g, b, alpha));

        let perturb = |value: u8, n: f64| {
            (f64::from(value) / 255.0 + n / 510.0).clamp(0.0, 1.0) as f32
        };
        let color = Color::rgba(perturb(r, noise[0]), perturb(g, noise[1]), perturb(b, noise[2]), 1.0);
        let opacity = (f64::from(alpha) + noise[3] * 0.0005).clamp(0.0, 1.0) as f32;
        let paint: Paint = SolidPaint::new(color, opacity).into();

        let mut tally = PaintTally::default();
        let rebound = Rebinder::new(&index).bind_paints(&[paint], &mut tally);

        prop_assert_eq!(tally.newly_bound, 1);
        let solid = rebound[0].as_solid().unwrap();
        prop_assert_eq!(solid.bound_color(), Some(token));
        prop_assert!(approx_eq!(f32, solid.opacity(), opacity));
        prop_assert!(approx_eq!(f32, solid.color().red(), color.red()));
        prop_assert!(approx_eq!(f32, solid.color().green(), color.green()));
        prop_assert!(approx_eq!(f32, solid.color().blue(), color.blue()));
        Ok(())
    }

    /// A paint one 8-bit step away from the only token stays unbound.
    fn check_one_step_off_stays_literal(
        (r, g, b): (u8, u8, u8),
        alpha_milli: u16,
    ) -> Result<(), TestCaseError> {
        let alpha = f32::from(alpha_milli) / 1000.0;
        let (index, _) = single_token_index(Color::from_rgba8(r, g, b, alpha));
        let off = r.checked_add(1).unwrap_or(r - 1);
        let paint: Paint = SolidPaint::new(Color::from_rgba8(off, g, b, 1.0), alpha).into();

        let mut tally = PaintTally::default();
        let rebound = Rebinder::new(&index).bind_paints(std::slice::from_ref(&paint), &mut tally);

        prop_assert_eq!(tally, PaintTally::default());
        prop_assert_eq!(&rebound[0], &paint);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn noisy_paint_binds_and_keeps_literal(
            rgb in rgb8_strategy(),
            alpha in alpha_strategy(),
            n0 in noise_strategy(),
            n1 in noise_strategy(),
            n2 in noise_strategy(),
            n3 in noise_strategy(),
        ) {
            check_noisy_paint_binds_and_keeps_literal(rgb, alpha, [n0, n1, n2, n3])?;
        }

        #[test]
        fn one_step_off_stays_literal(rgb in rgb8_strategy(), alpha in alpha_strategy()) {
            check_one_step_off_stays_literal(rgb, alpha)?;
        }
    }
}
