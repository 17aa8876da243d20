multiversx_sc::imports!();

// ============================================================
// Access control, pause switch and reentrancy lock
// ============================================================

#[multiversx_sc::module]
pub trait GuardModule: crate::storage::StorageModule {
    fn only_owner(&self) {
        let caller = self.blockchain().get_caller();
        require!(caller == self.owner().get(), "Only owner");
    }

    /// Pause authority is two-tier: the owner or the emergency council.
    fn only_owner_or_council(&self) {
        let caller = self.blockchain().get_caller();
        require!(
            caller == self.owner().get() || caller == self.emergency_council().get(),
            "Only owner or emergency council"
        );
    }

    fn require_not_paused(&self) {
        require!(!self.paused().get(), "Voting is paused");
    }

    fn lock(&self) {
        require!(!self.reentrancy_lock().get(), "Reentrant call");
        self.reentrancy_lock().set(true);
    }

    fn unlock(&self) {
        self.reentrancy_lock().clear();
    }
}
