use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

pub type ElementId = u64;

/// Store shared between the HTTP layer and the batch-flush timers. Readers
/// take the read half; a flush takes the write half for the whole batch.
pub type SharedStore = Arc<RwLock<Store>>;

// ---------------------------------------------------------------------------
// State snapshot
// ---------------------------------------------------------------------------

/// Point-in-time snapshot of selection state, consumed by an external
/// persistence collaborator via `GET /api/state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub selected_ids: Vec<ElementId>,
    pub sort_order: Vec<ElementId>,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Single source of truth for catalog membership, selection membership, and
/// the user-chosen display order of selected elements.
///
/// Invariants: selection ⊆ catalog; ids leave the display order in the same
/// mutation that deselects them. All operations are synchronous and
/// in-memory; expected business conditions surface as `bool`, not errors.
#[derive(Debug, Default)]
pub struct Store {
    elements: HashSet<ElementId>,
    selected: HashSet<ElementId>,
    sort_order: Vec<ElementId>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with ids `1..=count`.
    pub fn seeded(count: ElementId) -> Self {
        Self {
            elements: (1..=count).collect(),
            selected: HashSet::new(),
            sort_order: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// All catalog ids, no guaranteed order.
    pub fn list_all(&self) -> Vec<ElementId> {
        self.elements.iter().copied().collect()
    }

    /// Catalog minus selection, no guaranteed order.
    pub fn list_unselected(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .copied()
            .filter(|id| !self.selected.contains(id))
            .collect()
    }

    /// Selected ids rendered in display order.
    ///
    /// Ids present in both the display order and the selection come first, in
    /// display-order relative order; selected ids missing from the display
    /// order are appended in ascending order. With an empty display order the
    /// selection is returned in ascending numeric order.
    pub fn list_selected_ordered(&self) -> Vec<ElementId> {
        if self.sort_order.is_empty() {
            let mut ids: Vec<ElementId> = self.selected.iter().copied().collect();
            ids.sort_unstable();
            return ids;
        }

        let mut out: Vec<ElementId> = self
            .sort_order
            .iter()
            .copied()
            .filter(|id| self.selected.contains(id))
            .collect();

        if out.len() < self.selected.len() {
            let mut stragglers: Vec<ElementId> = self
                .selected
                .iter()
                .copied()
                .filter(|id| !self.sort_order.contains(id))
                .collect();
            stragglers.sort_unstable();
            out.extend(stragglers);
        }

        out
    }

    pub fn exists(&self, id: ElementId) -> bool {
        self.elements.contains(&id)
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected.contains(&id)
    }

    /// Number of ids in the catalog.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn state(&self) -> State {
        let mut selected_ids: Vec<ElementId> = self.selected.iter().copied().collect();
        selected_ids.sort_unstable();
        State {
            selected_ids,
            sort_order: self.sort_order.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Insert `id` into the catalog. Returns `false` if already present.
    pub fn add(&mut self, id: ElementId) -> bool {
        self.elements.insert(id)
    }

    /// Move `id` into the selection and append it to the display order.
    /// Returns `false` if `id` is unknown or already selected.
    pub fn select(&mut self, id: ElementId) -> bool {
        if !self.elements.contains(&id) || !self.selected.insert(id) {
            return false;
        }
        self.sort_order.push(id);
        true
    }

    /// Remove `id` from the selection and the display order. Returns `false`
    /// if `id` was not selected.
    pub fn deselect(&mut self, id: ElementId) -> bool {
        if !self.selected.remove(&id) {
            return false;
        }
        self.sort_order.retain(|sorted| *sorted != id);
        true
    }

    /// Replace the display order with `new_order`, reconciling against the
    /// current selection: unknown or unselected ids are silently dropped,
    /// duplicates collapse to their first occurrence, and selected ids absent
    /// from `new_order` are appended preserving their prior relative order.
    /// Always succeeds.
    pub fn reorder(&mut self, new_order: &[ElementId]) -> bool {
        let mut next: Vec<ElementId> = Vec::with_capacity(self.selected.len());
        let mut placed: HashSet<ElementId> = HashSet::with_capacity(new_order.len());

        for &id in new_order {
            if self.selected.contains(&id) && placed.insert(id) {
                next.push(id);
            }
        }

        for &id in &self.sort_order {
            if self.selected.contains(&id) && placed.insert(id) {
                next.push(id);
            }
        }

        self.sort_order = next;
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
