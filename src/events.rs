multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait EventsModule {
    // ── Votes ──

    #[event("voteCast")]
    fn vote_cast_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] strategy: &ManagedAddress,
        #[indexed] epoch: u64,
        weight: &BigUint,
    );

    #[event("voteReset")]
    fn vote_reset_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] strategy: &ManagedAddress,
        #[indexed] epoch: u64,
        weight: &BigUint,
    );

    #[event("delegationChanged")]
    fn delegation_changed_event(
        &self,
        #[indexed] delegator: &ManagedAddress,
        #[indexed] delegate: &ManagedAddress,
        amount: &BigUint,
    );

    // ── Revenue ──

    #[event("revenueNotified")]
    fn revenue_notified_event(
        &self,
        #[indexed] source: &ManagedAddress,
        #[indexed] token: &TokenIdentifier,
        #[indexed] index: &BigUint,
        amount: &BigUint,
    );

    #[event("revenueForwarded")]
    fn revenue_forwarded_event(
        &self,
        #[indexed] token: &TokenIdentifier,
        #[indexed] treasury: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("revenueDistributed")]
    fn revenue_distributed_event(
        &self,
        #[indexed] strategy: &ManagedAddress,
        #[indexed] token: &TokenIdentifier,
        amount: &BigUint,
    );

    // ── Administration ──

    #[event("strategyAdded")]
    fn strategy_added_event(
        &self,
        #[indexed] strategy: &ManagedAddress,
        #[indexed] bribe: &ManagedAddress,
    );

    #[event("strategyKilled")]
    fn strategy_killed_event(&self, #[indexed] strategy: &ManagedAddress);

    #[event("strategyRevived")]
    fn strategy_revived_event(&self, #[indexed] strategy: &ManagedAddress);

    #[event("revenueSourceChanged")]
    fn revenue_source_changed_event(&self, #[indexed] revenue_source: &ManagedAddress);

    #[event("emergencyCouncilChanged")]
    fn emergency_council_changed_event(&self, #[indexed] council: &ManagedAddress);

    #[event("ownerChanged")]
    fn owner_changed_event(&self, #[indexed] owner: &ManagedAddress);

    #[event("paused")]
    fn paused_event(&self, #[indexed] by: &ManagedAddress);

    #[event("unpaused")]
    fn unpaused_event(&self, #[indexed] by: &ManagedAddress);
}
