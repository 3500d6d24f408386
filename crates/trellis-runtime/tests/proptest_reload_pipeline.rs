//! Property-based tests for the background reload pipeline.
//!
//! 1. The final snapshot mirrors the provider's sections and item counts.
//! 2. Completion runs exactly once per surviving reload, never for a
//!    superseded one.
//! 3. Every insert the surface receives addresses an item or section that
//!    exists in the final snapshot, and nothing is inserted twice.
//! 4. Item frames span the reload width.

use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;
use trellis_core::{Axis, Rect, Size};
use trellis_layout::{LayoutNode, SizeLayout};
use trellis_runtime::{
    AdapterConfig, IndexPath, ReloadAdapter, ReloadOptions, ReloadableSurface, Section,
};

const WAIT: Duration = Duration::from_secs(5);
const WIDTH: f64 = 200.0;

/// Surface whose interaction state the test flips between hops.
#[derive(Debug, Default)]
struct ScriptedSurface {
    moving: bool,
    reloads: usize,
    inserted_items: Vec<IndexPath>,
    inserted_sections: Vec<usize>,
}

impl ReloadableSurface for ScriptedSurface {
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, WIDTH, 600.0)
    }

    fn is_tracking(&self) -> bool {
        self.moving
    }

    fn is_decelerating(&self) -> bool {
        false
    }

    fn scroll_axis(&self) -> Axis {
        Axis::Vertical
    }

    fn reload_data_sync(&mut self) {
        self.reloads += 1;
    }

    fn register_views(&mut self, _reuse_id: &str) {}

    fn insert_sections(&mut self, sections: &[usize]) {
        self.inserted_sections.extend_from_slice(sections);
    }

    fn insert_items(&mut self, index_paths: &[IndexPath]) {
        self.inserted_items.extend_from_slice(index_paths);
    }
}

fn sections(counts: &[usize]) -> Vec<Section<LayoutNode>> {
    counts
        .iter()
        .map(|&count| {
            Section::new(
                (0..count).map(|i| LayoutNode::new(SizeLayout::new().height(8.0 + i as f64))),
            )
        })
        .collect()
}

fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
    let count = Rc::new(Cell::new(0));
    let inner = Rc::clone(&count);
    (count, move || inner.set(inner.get() + 1))
}

fn assert_snapshot_matches(
    adapter: &ReloadAdapter<ScriptedSurface>,
    counts: &[usize],
) -> Result<(), TestCaseError> {
    prop_assert_eq!(adapter.number_of_sections(), counts.len());
    for (section, &count) in counts.iter().enumerate() {
        prop_assert_eq!(adapter.number_of_items(section), count);
        for item in 0..count {
            let size = adapter.item_size(IndexPath::new(section, item));
            prop_assert_eq!(size, Some(Size::new(WIDTH, 8.0 + item as f64)));
        }
    }
    Ok(())
}

fn section_counts() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..4, 0..4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn first_load_survives_interaction(
        counts in section_counts(),
        moving in prop::collection::vec(any::<bool>(), 0..16),
    ) {
        let mut adapter =
            ReloadAdapter::new(ScriptedSurface::default(), AdapterConfig::default()).unwrap();
        let (done, completion) = counter();
        let provided = counts.clone();
        adapter.reload(
            ReloadOptions::default().width(WIDTH),
            move || sections(&provided),
            completion,
        );

        for flag in moving {
            if adapter.is_idle() {
                break;
            }
            adapter.surface_mut().moving = flag;
            adapter.pump_one(WAIT);
        }
        adapter.surface_mut().moving = false;
        adapter.pump_until_idle(WAIT).unwrap();

        prop_assert_eq!(done.get(), 1);
        assert_snapshot_matches(&adapter, &counts)?;

        let surface = adapter.surface();
        prop_assert_eq!(surface.reloads, 1);

        let unique_items: BTreeSet<_> = surface.inserted_items.iter().copied().collect();
        prop_assert_eq!(unique_items.len(), surface.inserted_items.len());
        for path in &surface.inserted_items {
            prop_assert!(path.item < adapter.number_of_items(path.section));
        }

        let unique_sections: BTreeSet<_> = surface.inserted_sections.iter().copied().collect();
        prop_assert_eq!(unique_sections.len(), surface.inserted_sections.len());
        for &section in &surface.inserted_sections {
            prop_assert!(section < adapter.number_of_sections());
        }
    }

    #[test]
    fn superseded_reload_never_completes(
        first in section_counts(),
        second in section_counts(),
    ) {
        let mut adapter =
            ReloadAdapter::new(ScriptedSurface::default(), AdapterConfig::default()).unwrap();
        let (first_done, first_completion) = counter();
        let (second_done, second_completion) = counter();

        adapter.reload(
            ReloadOptions::default().width(WIDTH),
            move || sections(&first),
            first_completion,
        );
        let provided = second.clone();
        adapter.reload(
            ReloadOptions::default().width(WIDTH),
            move || sections(&provided),
            second_completion,
        );
        adapter.pump_until_idle(WAIT).unwrap();

        prop_assert_eq!(first_done.get(), 0);
        prop_assert_eq!(second_done.get(), 1);
        assert_snapshot_matches(&adapter, &second)?;
    }
}
