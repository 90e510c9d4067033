//! Gem arena
//!
//! Every gem lives in a [`GemPool`] and is addressed by its [`GemId`].
//! Usage counters and placements are kept beside the gems in a
//! [`UsageLedger`].

use tracing::{debug, trace};

use gemforge_core::{GemError, GemId, LeafCode, SlotIndex};

use crate::gem::Gem;
use crate::ledger::UsageLedger;

/// Owns every gem of a recipe and hands out ids.
///
/// Gems are append-only: a fusion refers to its inputs by id, so the same
/// gem can feed many fusions (or both sides of one) without being copied.
#[derive(Debug, Clone, Default)]
pub struct GemPool {
    gems: Vec<Gem>,
    ledger: UsageLedger,
}

impl GemPool {
    pub fn new() -> Self {
        Self {
            gems: Vec::new(),
            ledger: UsageLedger::new(),
        }
    }

    fn next_id(&self) -> GemId {
        GemId::from_raw(self.gems.len() as u32)
    }

    fn push(&mut self, gem: Gem) -> GemId {
        let id = gem.id();
        self.ledger.register(id);
        self.gems.push(gem);
        id
    }

    // ---- Construction ----

    /// Add a base gem from its letter code.
    pub fn leaf(&mut self, code: char) -> Result<GemId, GemError> {
        let code = LeafCode::from_char(code)?;
        Ok(self.add_leaf(code))
    }

    /// Add a base gem of an already parsed kind.
    pub fn add_leaf(&mut self, code: LeafCode) -> GemId {
        let id = self.next_id();
        trace!("leaf {} = '{}'", id, code);
        self.push(Gem::leaf(id, code))
    }

    /// Fuse two gems of this pool into a new one. Both inputs gain one use
    /// (a gem fused with itself gains two).
    pub fn fuse(&mut self, a: GemId, b: GemId) -> Result<GemId, GemError> {
        let id = self.next_id();
        let gem = Gem::fuse(id, self.gem(a)?, self.gem(b)?);

        self.ledger.record_use(a);
        self.ledger.record_use(b);

        debug!(
            "fuse {} + {} -> {}: grade {}, cost {}, {}",
            a,
            b,
            id,
            gem.grade(),
            gem.cost(),
            gem.spec_word()
        );
        Ok(self.push(gem))
    }

    /// Fuse a gem with itself `times` times, returning the top of the chain.
    pub fn upgrade(&mut self, id: GemId, times: u32) -> Result<GemId, GemError> {
        let mut current = id;
        self.gem(current)?;
        for _ in 0..times {
            current = self.fuse(current, current)?;
        }
        Ok(current)
    }

    /// Forget every gem from `len` on and give back the uses they took
    /// from older gems.
    pub(crate) fn rollback(&mut self, len: usize) {
        if len >= self.gems.len() {
            return;
        }
        for gem in self.gems.drain(len..).rev() {
            if let Some((c1, c2)) = gem.components() {
                self.ledger.release_use(c1);
                self.ledger.release_use(c2);
            }
        }
        self.ledger.truncate(len);
        debug!("rolled back to {} gems", len);
    }

    // ---- Lookup ----

    pub fn get(&self, id: GemId) -> Option<&Gem> {
        self.gems.get(id.index())
    }

    /// Like [`get`](Self::get), but an unknown id is an error.
    pub fn gem(&self, id: GemId) -> Result<&Gem, GemError> {
        self.get(id).ok_or(GemError::MissingGem(id))
    }

    pub fn contains(&self, id: GemId) -> bool {
        id.index() < self.gems.len()
    }

    /// All gems in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Gem> {
        self.gems.iter()
    }

    pub fn len(&self) -> usize {
        self.gems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gems.is_empty()
    }

    // ---- Usage bookkeeping ----

    pub fn ledger(&self) -> &UsageLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut UsageLedger {
        &mut self.ledger
    }

    /// Copy of the current bookkeeping, for a search branch to restore later.
    pub fn ledger_snapshot(&self) -> UsageLedger {
        self.ledger.clone()
    }

    /// Replace the bookkeeping, returning the previous ledger. Gems built
    /// after the snapshot was taken start out unused and unslotted.
    pub fn restore_ledger(&mut self, ledger: UsageLedger) -> UsageLedger {
        let previous = std::mem::replace(&mut self.ledger, ledger);
        self.ledger.cover(self.gems.len());
        previous
    }

    pub fn use_count(&self, id: GemId) -> u32 {
        self.ledger.use_count(id)
    }

    pub fn slot(&self, id: GemId) -> Option<SlotIndex> {
        self.ledger.slot(id)
    }

    pub fn set_slot(&mut self, id: GemId, slot: Option<SlotIndex>) -> Result<(), GemError> {
        if self.ledger.set_slot(id, slot) {
            Ok(())
        } else {
            Err(GemError::MissingGem(id))
        }
    }

    pub fn set_original_slot(&mut self, id: GemId, slot: Option<SlotIndex>) -> Result<(), GemError> {
        if self.ledger.set_original_slot(id, slot) {
            Ok(())
        } else {
            Err(GemError::MissingGem(id))
        }
    }

    /// Consumed by at least one fusion and not placed yet.
    /// Base gems that were never fused are never needed.
    pub fn is_needed(&self, id: GemId) -> bool {
        self.ledger.is_needed(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemforge_core::GemColor;

    #[test]
    fn leaf_rejects_unknown_codes() {
        let mut pool = GemPool::new();
        assert_eq!(pool.leaf('z'), Err(GemError::InvalidCode('z')));
        assert!(pool.is_empty());
    }

    #[test]
    fn fuse_rejects_missing_inputs() {
        let mut pool = GemPool::new();
        let y = pool.leaf('y').unwrap();
        let ghost = GemId::from_raw(42);
        assert_eq!(pool.fuse(y, ghost), Err(GemError::MissingGem(ghost)));
        assert_eq!(pool.fuse(ghost, y), Err(GemError::MissingGem(ghost)));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.use_count(y), 0);
    }

    #[test]
    fn canonical_order_is_reference_identical() {
        let mut pool = GemPool::new();
        let y = pool.leaf('y').unwrap();
        let b = pool.leaf('b').unwrap();
        let yy = pool.fuse(y, y).unwrap();

        for (p, q) in [(y, b), (y, yy), (b, yy), (y, y)] {
            let pq = pool.fuse(p, q).unwrap();
            let qp = pool.fuse(q, p).unwrap();
            assert_eq!(pool.gem(pq).unwrap().components(), pool.gem(qp).unwrap().components());
        }
    }

    #[test]
    fn usage_accounting() {
        let mut pool = GemPool::new();
        let a = pool.leaf('o').unwrap();
        let b = pool.leaf('y').unwrap();
        let bystander = pool.leaf('b').unwrap();

        let c = pool.fuse(a, b).unwrap();
        assert_eq!(pool.use_count(a), 1);
        assert_eq!(pool.use_count(b), 1);
        assert_eq!(pool.use_count(bystander), 0);
        assert_eq!(pool.use_count(c), 0);

        pool.fuse(c, bystander).unwrap();
        assert_eq!(pool.use_count(a), 1);
        assert_eq!(pool.use_count(c), 1);
        assert_eq!(pool.use_count(bystander), 1);
    }

    #[test]
    fn self_fusion_counts_both_sides() {
        let mut pool = GemPool::new();
        let y = pool.leaf('y').unwrap();
        pool.fuse(y, y).unwrap();
        assert_eq!(pool.use_count(y), 2);
    }

    #[test]
    fn needed_gems() {
        let mut pool = GemPool::new();
        let y = pool.leaf('y').unwrap();
        let yy = pool.fuse(y, y).unwrap();
        let top = pool.fuse(yy, yy).unwrap();

        assert!(pool.is_needed(y));
        assert!(pool.is_needed(yy));
        assert!(!pool.is_needed(top));

        pool.set_slot(yy, Some(SlotIndex(3))).unwrap();
        assert!(!pool.is_needed(yy));
        assert_eq!(pool.slot(yy), Some(SlotIndex(3)));
        assert_eq!(
            pool.set_slot(GemId::from_raw(99), None),
            Err(GemError::MissingGem(GemId::from_raw(99)))
        );
    }

    #[test]
    fn ledger_snapshot_isolates_branches() {
        let mut pool = GemPool::new();
        let y = pool.leaf('y').unwrap();
        let before = pool.ledger_snapshot();

        pool.fuse(y, y).unwrap();
        assert_eq!(pool.use_count(y), 2);

        let branch = pool.restore_ledger(before);
        assert_eq!(branch.use_count(y), 2);
        assert_eq!(pool.use_count(y), 0);

        // the fusion built after the snapshot still has a usable entry
        let yy = GemId::from_raw(1);
        assert_eq!(pool.ledger().len(), 2);
        assert!(pool.set_slot(yy, Some(SlotIndex(0))).is_ok());
    }

    #[test]
    fn rollback_returns_borrowed_uses() {
        let mut pool = GemPool::new();
        let y = pool.leaf('y').unwrap();
        let b = pool.leaf('b').unwrap();
        let yb = pool.fuse(y, b).unwrap();
        pool.set_slot(yb, Some(SlotIndex(1))).unwrap();
        let before = pool.ledger_snapshot();

        let twice = pool.fuse(yb, yb).unwrap();
        pool.fuse(twice, y).unwrap();
        assert_eq!(pool.use_count(yb), 2);
        assert_eq!(pool.use_count(y), 2);

        pool.rollback(3);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.ledger(), &before);
        assert_eq!(pool.use_count(yb), 0);
        assert_eq!(pool.use_count(y), 1);
        assert_eq!(pool.slot(yb), Some(SlotIndex(1)));
        assert!(pool.get(twice).is_none());

        // nothing to undo
        pool.rollback(10);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn upgrade_builds_a_pure_chain() {
        let mut pool = GemPool::new();
        let o = pool.leaf('o').unwrap();
        let top = pool.upgrade(o, 3).unwrap();
        let gem = pool.gem(top).unwrap();
        assert_eq!(gem.grade(), 3);
        assert_eq!(gem.cost(), 8);
        assert_eq!(gem.color(), GemColor::ORANGE);
        assert!(gem.is_pure_upgrade());
        assert!(!gem.is_spec());
        assert_eq!(pool.upgrade(o, 0).unwrap(), o);
    }

    #[test]
    fn damage_is_monotonic_across_a_mixed_tree() {
        let mut pool = GemPool::new();
        let mut ids = Vec::new();
        for c in "oykmgbrh".chars() {
            ids.push(pool.leaf(c).unwrap());
        }
        let mut frontier = ids.clone();
        for round in 0..3 {
            let mut next = Vec::new();
            for pair in frontier.chunks(2) {
                let (a, b) = (pair[0], pair[pair.len() - 1]);
                let fused = pool.fuse(a, b).unwrap();
                let gem = pool.gem(fused).unwrap();
                let (c1, c2) = gem.components().unwrap();
                let d1 = pool.gem(c1).unwrap().damage();
                let d2 = pool.gem(c2).unwrap().damage();
                assert!(gem.damage() >= d1.max(d2), "round {round}");
                next.push(fused);
            }
            frontier = next;
        }
    }
}
