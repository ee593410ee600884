//! Shortcut collision detection.
//!
//! Scans the registry in a fixed order (Global entries in catalog order, then
//! Local entries) so results are deterministic. The unbound sentinel never
//! collides with anything.

use crate::chord::KeyChord;
use crate::registry::{BindingEntry, BindingRegistry};

/// Two distinct entries bound to the same chord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict<'a> {
    pub chord: KeyChord,
    /// The entry that comes first in traversal order.
    pub first: &'a BindingEntry,
    pub second: &'a BindingEntry,
}

/// First entry other than `excluding` whose chord equals `candidate`.
pub fn find_conflict<'a>(
    registry: &'a BindingRegistry,
    candidate: KeyChord,
    excluding: &str,
) -> Option<&'a BindingEntry> {
    if candidate.is_unbound() {
        return None;
    }
    registry
        .entries()
        .filter(|e| e.config_path() != excluding)
        .find(|e| e.chord() == candidate)
}

/// Every pair of bound entries sharing a chord, in traversal order.
pub fn find_duplicates(registry: &BindingRegistry) -> Vec<Conflict<'_>> {
    let entries: Vec<&BindingEntry> = registry
        .entries()
        .filter(|e| !e.chord().is_unbound())
        .collect();

    let mut conflicts = Vec::new();
    for (i, &first) in entries.iter().enumerate() {
        for &second in &entries[i + 1..] {
            if first.chord() == second.chord() {
                conflicts.push(Conflict {
                    chord: first.chord(),
                    first,
                    second,
                });
            }
        }
    }
    conflicts
}
