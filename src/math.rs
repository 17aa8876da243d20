multiversx_sc::imports!();

// Fixed-point helpers of the voting ledger. Every division truncates
// toward zero; the residue stays in the contract as dust.

/// Scale of the revenue distribution index (1e18)
pub const PRECISION: u64 = 1_000_000_000_000_000_000;

/// Epoch number of `now`, counted from the anchor. Timestamps before
/// the anchor all belong to epoch 0.
pub fn epoch_at(now: u64, epoch_start: u64, epoch_duration: u64) -> u64 {
    now.saturating_sub(epoch_start) / epoch_duration
}

/// Index growth for `amount` of revenue spread over `total_weight`.
pub fn index_increment<M: ManagedTypeApi>(
    amount: &BigUint<M>,
    total_weight: &BigUint<M>,
) -> BigUint<M> {
    if *total_weight == 0u64 {
        return BigUint::zero();
    }
    amount * PRECISION / total_weight
}

/// Revenue earned by `weight` while the index moved from `last_index`
/// to `current_index`.
pub fn accrued_share<M: ManagedTypeApi>(
    weight: &BigUint<M>,
    current_index: &BigUint<M>,
    last_index: &BigUint<M>,
) -> BigUint<M> {
    if *weight == 0u64 || current_index <= last_index {
        return BigUint::zero();
    }
    let delta = current_index - last_index;
    weight * &delta / PRECISION
}

/// Part of `voting_power` assigned to one entry of a weighted vote.
pub fn allocate_weight<M: ManagedTypeApi>(
    input_weight: &BigUint<M>,
    voting_power: &BigUint<M>,
    total_input_weight: &BigUint<M>,
) -> BigUint<M> {
    if *total_input_weight == 0u64 {
        return BigUint::zero();
    }
    input_weight * voting_power / total_input_weight
}
