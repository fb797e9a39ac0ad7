//! Proposed movement paths and attack projections.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::FieldId;

/// An ordered, possibly-interrupted sequence of fields.
///
/// Index 0 is always the field the move starts from. `interrupted_at` holds
/// the index the first blocked step (occupied or missing field) would have
/// occupied; every stored field strictly precedes it and is a valid step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    fields: SmallVec<[FieldId; 8]>,
    interrupted_at: Option<usize>,
}

impl Path {
    /// Start a path at the given field.
    #[must_use]
    pub fn new(start: FieldId) -> Self {
        let mut fields = SmallVec::new();
        fields.push(start);
        Self {
            fields,
            interrupted_at: None,
        }
    }

    /// Append a reachable step.
    pub fn push(&mut self, field: FieldId) {
        debug_assert!(self.interrupted_at.is_none(), "push after interruption");
        self.fields.push(field);
    }

    /// Mark the index the first blocked step would have occupied.
    pub fn mark_interrupted(&mut self, index: usize) {
        debug_assert!(index >= self.fields.len());
        self.interrupted_at = Some(index);
    }

    /// Whether the walk hit an occupied or missing field.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        self.interrupted_at.is_some()
    }

    /// Index of the first blocked step, if any.
    #[must_use]
    pub fn interrupted_at(&self) -> Option<usize> {
        self.interrupted_at
    }

    /// Every field on the path, starting field included.
    #[must_use]
    pub fn fields(&self) -> &[FieldId] {
        &self.fields
    }

    /// The fields to actually move through (starting field excluded).
    #[must_use]
    pub fn steps(&self) -> &[FieldId] {
        &self.fields[1..]
    }

    /// Number of movement steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.fields.len() - 1
    }

    /// The field the move starts from.
    #[must_use]
    pub fn start(&self) -> FieldId {
        self.fields[0]
    }

    /// The last reachable field (the start itself if no step is possible).
    #[must_use]
    pub fn destination(&self) -> FieldId {
        *self.fields.last().expect("path always holds its start")
    }
}

/// Damage projected onto fields by one or more attack resolutions.
///
/// Amounts are additive: two sources targeting the same field stack.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttackData {
    damage: FxHashMap<FieldId, i64>,
}

impl AttackData {
    /// An empty projection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add damage to a field, stacking with any existing amount.
    pub fn add(&mut self, field: FieldId, amount: i64) {
        *self.damage.entry(field).or_insert(0) += amount;
    }

    /// The accumulated damage on a field.
    #[must_use]
    pub fn amount(&self, field: FieldId) -> i64 {
        self.damage.get(&field).copied().unwrap_or(0)
    }

    /// Fold another projection into this one.
    pub fn merge(&mut self, other: &AttackData) {
        for (&field, &amount) in &other.damage {
            self.add(field, amount);
        }
    }

    /// Iterate over (field, damage) pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, i64)> + '_ {
        self.damage.iter().map(|(&f, &d)| (f, d))
    }

    /// Number of targeted fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.damage.len()
    }

    /// Whether no field is targeted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.damage.is_empty()
    }
}
