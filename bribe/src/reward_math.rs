multiversx_sc::imports!();

use crate::types::RewardData;
use crate::{DURATION, PRECISION};

// Pure accumulator arithmetic. Every division truncates toward zero.

/// Emission stops at `period_finish`; nothing accrues past it.
pub fn last_time_reward_applicable<M: ManagedTypeApi>(data: &RewardData<M>, now: u64) -> u64 {
    core::cmp::min(now, data.period_finish)
}

/// Cumulative reward per unit of balance as of `now`.
/// With an empty supply the stored value is returned unchanged.
pub fn reward_per_token<M: ManagedTypeApi>(
    data: &RewardData<M>,
    total_supply: &BigUint<M>,
    now: u64,
) -> BigUint<M> {
    if *total_supply == 0u64 {
        return data.reward_per_token_stored.clone();
    }

    let elapsed = last_time_reward_applicable(data, now).saturating_sub(data.last_update_time);
    if elapsed == 0 {
        return data.reward_per_token_stored.clone();
    }

    let accrued = &data.reward_rate * elapsed * PRECISION / total_supply;
    accrued + &data.reward_per_token_stored
}

pub fn earned<M: ManagedTypeApi>(
    balance: &BigUint<M>,
    reward_per_token: &BigUint<M>,
    paid: &BigUint<M>,
    pending: &BigUint<M>,
) -> BigUint<M> {
    if reward_per_token <= paid {
        return pending.clone();
    }
    let delta = reward_per_token - paid;
    balance * &delta / PRECISION + pending
}

/// Rate for a new notification of `amount`, rolling in whatever the
/// running period has not emitted yet.
pub fn next_reward_rate<M: ManagedTypeApi>(
    data: &RewardData<M>,
    amount: &BigUint<M>,
    now: u64,
) -> BigUint<M> {
    if now >= data.period_finish {
        return amount.clone() / DURATION;
    }

    let remaining = data.period_finish - now;
    let leftover = &data.reward_rate * remaining;
    (leftover + amount) / DURATION
}

/// Tokens still to be emitted by the running period.
pub fn left<M: ManagedTypeApi>(data: &RewardData<M>, now: u64) -> BigUint<M> {
    if now >= data.period_finish {
        return BigUint::zero();
    }
    &data.reward_rate * (data.period_finish - now)
}
