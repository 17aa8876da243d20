multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait StorageModule {
    // ── Configuration ──

    #[view(getOwner)]
    #[storage_mapper("owner")]
    fn owner(&self) -> SingleValueMapper<ManagedAddress>;

    /// Contract answering `getMembershipBalance(account)`
    #[view(getMembershipSource)]
    #[storage_mapper("membershipSource")]
    fn membership_source(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getRevenueSource)]
    #[storage_mapper("revenueSource")]
    fn revenue_source(&self) -> SingleValueMapper<ManagedAddress>;

    /// Fallback destination for revenue nobody can claim
    #[view(getTreasury)]
    #[storage_mapper("treasury")]
    fn treasury(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getEmergencyCouncil)]
    #[storage_mapper("emergencyCouncil")]
    fn emergency_council(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getEpochStart)]
    #[storage_mapper("epochStart")]
    fn epoch_start(&self) -> SingleValueMapper<u64>;

    #[view(isPaused)]
    #[storage_mapper("paused")]
    fn paused(&self) -> SingleValueMapper<bool>;

    #[storage_mapper("reentrancyLock")]
    fn reentrancy_lock(&self) -> SingleValueMapper<bool>;

    // ── Strategies ──
    // Append-only arena; entries are never removed, only marked dead.

    #[view(getStrategies)]
    #[storage_mapper("strategies")]
    fn strategies(&self) -> VecMapper<ManagedAddress>;

    #[view(isValidStrategy)]
    #[storage_mapper("isValid")]
    fn is_valid(&self, strategy: &ManagedAddress) -> SingleValueMapper<bool>;

    #[view(isAliveStrategy)]
    #[storage_mapper("isAlive")]
    fn is_alive(&self, strategy: &ManagedAddress) -> SingleValueMapper<bool>;

    #[view(getStrategyBribe)]
    #[storage_mapper("strategyBribe")]
    fn strategy_bribe(&self, strategy: &ManagedAddress) -> SingleValueMapper<ManagedAddress>;

    #[view(getStrategyWeight)]
    #[storage_mapper("strategyWeight")]
    fn strategy_weight(&self, strategy: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[view(getTotalWeight)]
    #[storage_mapper("totalWeight")]
    fn total_weight(&self) -> SingleValueMapper<BigUint>;

    // ── Revenue index ──

    #[view(getRevenueTokens)]
    #[storage_mapper("revenueTokens")]
    fn revenue_tokens(&self) -> UnorderedSetMapper<TokenIdentifier>;

    #[view(getIndex)]
    #[storage_mapper("index")]
    fn index(&self, token: &TokenIdentifier) -> SingleValueMapper<BigUint>;

    #[view(getSupplyIndex)]
    #[storage_mapper("supplyIndex")]
    fn supply_index(
        &self,
        strategy: &ManagedAddress,
        token: &TokenIdentifier,
    ) -> SingleValueMapper<BigUint>;

    #[storage_mapper("claimable")]
    fn claimable(
        &self,
        strategy: &ManagedAddress,
        token: &TokenIdentifier,
    ) -> SingleValueMapper<BigUint>;

    // ── Accounts ──

    #[view(getVotedStrategies)]
    #[storage_mapper("votedStrategies")]
    fn voted_strategies(&self, account: &ManagedAddress) -> VecMapper<ManagedAddress>;

    #[view(getVotes)]
    #[storage_mapper("votes")]
    fn votes(
        &self,
        account: &ManagedAddress,
        strategy: &ManagedAddress,
    ) -> SingleValueMapper<BigUint>;

    #[view(getUsedWeight)]
    #[storage_mapper("usedWeight")]
    fn used_weight(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;

    /// First epoch in which the account may vote or reset again
    #[storage_mapper("nextVoteEpoch")]
    fn next_vote_epoch(&self, account: &ManagedAddress) -> SingleValueMapper<u64>;

    // ── Delegation ──

    #[storage_mapper("delegateOf")]
    fn delegate_of(&self, account: &ManagedAddress) -> SingleValueMapper<ManagedAddress>;

    /// Exact power credited to the delegate, debited back on release
    #[storage_mapper("delegatedAmount")]
    fn delegated_amount(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[view(getDelegatedPower)]
    #[storage_mapper("delegatedPower")]
    fn delegated_power(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;
}
