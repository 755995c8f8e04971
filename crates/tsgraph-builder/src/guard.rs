//! In-flight construction tracking.
//!
//! The set of identities currently being built on the active call chain.
//! Hitting an in-flight identity means the recursion has come back
//! around to a node that is still under construction; the builder then
//! hands back a by-ref producer instead of recursing, which is what
//! breaks cycles. Cycles are expected, never an error.

use rustc_hash::FxHashSet;

#[derive(Debug, Default)]
pub(crate) struct InFlight {
    building: FxHashSet<String>,
}

impl InFlight {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn contains(&self, ref_id: &str) -> bool {
        self.building.contains(ref_id)
    }

    /// Marks an identity as under construction for the current call
    /// chain. Entering the same identity twice indicates a missed
    /// in-flight check in the builder.
    pub(crate) fn enter(&mut self, ref_id: String) {
        let fresh = self.building.insert(ref_id);
        debug_assert!(fresh, "identity entered while already in flight");
    }

    pub(crate) fn leave(&mut self, ref_id: &str) {
        let present = self.building.remove(ref_id);
        debug_assert!(present, "left an identity that was not in flight");
    }
}
