multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Reward Data: per reward token accumulator state
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct RewardData<M: ManagedTypeApi> {
    /// Timestamp at which the current reward period stops emitting
    pub period_finish: u64,
    /// Tokens emitted per second over the whole balance supply
    pub reward_rate: BigUint<M>,
    /// Last timestamp the accumulator was brought up to date
    pub last_update_time: u64,
    /// Cumulative reward per unit of balance, scaled by PRECISION
    pub reward_per_token_stored: BigUint<M>,
}

/// State of a token that has never been notified
impl<M: ManagedTypeApi> Default for RewardData<M> {
    fn default() -> Self {
        RewardData {
            period_finish: 0,
            reward_rate: BigUint::zero(),
            last_update_time: 0,
            reward_per_token_stored: BigUint::zero(),
        }
    }
}
