#![no_std]

multiversx_sc::imports!();

pub mod admin;
pub mod distribution;
pub mod events;
pub mod guard;
pub mod math;
pub mod membership_proxy;
pub mod storage;
pub mod types;
pub mod voter_proxy;

use bribe::bribe_proxy;

// ============================================================
// Constants
// ============================================================

/// Voting epoch: 7 days in seconds
pub const EPOCH_DURATION: u64 = 604_800;

/// Hard cap on registered strategies, also bounds every vote array
pub const MAX_STRATEGIES: usize = 50;

/// Hard cap on distinct revenue tokens, bounds every sync loop
pub const MAX_REVENUE_TOKENS: usize = 10;

// ============================================================
// Contract
// ============================================================

/// Epoch-gated weighted voting over revenue strategies. Voting power is
/// the caller's balance at the membership source plus power delegated to it;
/// weight committed to a strategy earns that strategy a share of every
/// revenue notification and mirrors into the strategy's Bribe.
#[multiversx_sc::contract]
pub trait RevenueVoter:
    storage::StorageModule
    + events::EventsModule
    + guard::GuardModule
    + distribution::DistributionModule
    + admin::AdminModule
{
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(
        &self,
        membership_source: ManagedAddress,
        revenue_source: ManagedAddress,
        treasury: ManagedAddress,
        emergency_council: ManagedAddress,
        epoch_start: u64,
    ) {
        require!(
            !membership_source.is_zero()
                && !revenue_source.is_zero()
                && !treasury.is_zero()
                && !emergency_council.is_zero(),
            "Invalid address"
        );

        let caller = self.blockchain().get_caller();
        self.owner().set(&caller);
        self.membership_source().set(&membership_source);
        self.revenue_source().set(&revenue_source);
        self.treasury().set(&treasury);
        self.emergency_council().set(&emergency_council);
        self.epoch_start().set(epoch_start);
        self.total_weight().set(BigUint::zero());
        self.paused().set(false);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: vote
    // Replaces the caller's previous vote. Weights are relative;
    // the caller's full voting power is split across the alive
    // strategies in proportion to them.
    // ========================================================

    #[endpoint(vote)]
    fn vote(&self, strategies: ManagedVec<ManagedAddress>, weights: ManagedVec<BigUint>) {
        self.require_not_paused();
        self.lock();

        require!(strategies.len() == weights.len(), "Array length mismatch");
        require!(strategies.len() <= MAX_STRATEGIES, "Too many strategies");
        for (i, strategy) in strategies.iter().enumerate() {
            for other in strategies.iter().skip(i + 1) {
                require!(*strategy != *other, "Duplicate strategy");
            }
        }

        let caller = self.blockchain().get_caller();
        let epoch = self.current_epoch();
        self.require_new_epoch(&caller, epoch);

        let power = self.voting_power(&caller);
        require!(power > 0u64, "No voting power");

        self.reset_votes(&caller, epoch);

        let mut eligible_total = BigUint::zero();
        for (strategy, weight) in strategies.iter().zip(weights.iter()) {
            if self.is_eligible(&strategy) {
                eligible_total += &*weight;
            }
        }
        require!(eligible_total > 0u64, "No eligible weight");

        let mut used = BigUint::zero();
        for (strategy, weight) in strategies.iter().zip(weights.iter()) {
            if !self.is_eligible(&strategy) {
                continue;
            }

            let allocated = math::allocate_weight(&*weight, &power, &eligible_total);
            if allocated == 0u64 {
                continue;
            }

            self.sync_strategy(&strategy);
            self.strategy_weight(&strategy)
                .update(|total| *total += &allocated);
            self.votes(&caller, &strategy).set(&allocated);
            self.voted_strategies(&caller).push(&strategy);
            used += &allocated;

            let bribe = self.strategy_bribe(&strategy).get();
            self.tx()
                .to(&bribe)
                .typed(bribe_proxy::BribeProxy)
                .deposit(caller.clone(), allocated.clone())
                .sync_call();

            self.vote_cast_event(&caller, &strategy, epoch, &allocated);
        }
        require!(used > 0u64, "Allocated weight is zero");

        self.total_weight().update(|total| *total += &used);
        self.used_weight(&caller).set(&used);
        self.next_vote_epoch(&caller).set(epoch + 1);

        self.unlock();
    }

    // ========================================================
    // ENDPOINT: reset
    // Withdraws every committed vote. Consumes the epoch the
    // same way a vote does. Stays open while paused.
    // ========================================================

    #[endpoint(reset)]
    fn reset(&self) {
        self.lock();

        let caller = self.blockchain().get_caller();
        let epoch = self.current_epoch();
        self.require_new_epoch(&caller, epoch);

        self.reset_votes(&caller, epoch);
        self.next_vote_epoch(&caller).set(epoch + 1);

        self.unlock();
    }

    // ========================================================
    // ENDPOINT: delegate / undelegate
    // One outgoing edge per account. The delegate votes with the
    // delegator's membership balance as it stood when delegated.
    // ========================================================

    #[endpoint(delegate)]
    fn delegate(&self, target: ManagedAddress) {
        self.require_not_paused();

        let caller = self.blockchain().get_caller();
        require!(!target.is_zero(), "Invalid address");
        require!(target != caller, "Cannot delegate to self");
        require!(
            self.used_weight(&caller).get() == 0u64,
            "Reset votes before delegating"
        );

        let amount = self.membership_balance(&caller);
        require!(amount > 0u64, "No voting power");

        if !self.delegate_of(&caller).is_empty() {
            self.release_delegation(&caller);
        }

        self.delegated_power(&target).update(|power| *power += &amount);
        self.delegate_of(&caller).set(&target);
        self.delegated_amount(&caller).set(&amount);

        self.delegation_changed_event(&caller, &target, &amount);
    }

    #[endpoint(undelegate)]
    fn undelegate(&self) {
        let caller = self.blockchain().get_caller();
        require!(!self.delegate_of(&caller).is_empty(), "Not delegating");

        self.release_delegation(&caller);

        self.delegation_changed_event(&caller, &ManagedAddress::zero(), &BigUint::zero());
    }

    // ========================================================
    // ENDPOINT: claimIncentives
    // Collects the caller's Bribe rewards from several strategies.
    // ========================================================

    #[endpoint(claimIncentives)]
    fn claim_incentives(&self, strategies: MultiValueEncoded<ManagedAddress>) {
        self.lock();

        let strategies = strategies.to_vec();
        require!(strategies.len() <= MAX_STRATEGIES, "Too many strategies");

        let caller = self.blockchain().get_caller();
        for strategy in strategies.iter() {
            require!(self.is_valid(&strategy).get(), "Invalid strategy");

            let bribe = self.strategy_bribe(&strategy).get();
            self.tx()
                .to(&bribe)
                .typed(bribe_proxy::BribeProxy)
                .claim_for(caller.clone())
                .sync_call();
        }

        self.unlock();
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn current_epoch(&self) -> u64 {
        let now = self.blockchain().get_block_timestamp();
        math::epoch_at(now, self.epoch_start().get(), EPOCH_DURATION)
    }

    fn require_new_epoch(&self, account: &ManagedAddress, epoch: u64) {
        require!(
            self.next_vote_epoch(account).get() <= epoch,
            "Already voted this epoch"
        );
    }

    fn is_eligible(&self, strategy: &ManagedAddress) -> bool {
        self.is_valid(strategy).get() && self.is_alive(strategy).get()
    }

    fn membership_balance(&self, account: &ManagedAddress) -> BigUint {
        let source = self.membership_source().get();
        self.tx()
            .to(&source)
            .typed(membership_proxy::MembershipSourceProxy)
            .membership_balance(account.clone())
            .returns(ReturnsResult)
            .sync_call()
    }

    fn voting_power(&self, account: &ManagedAddress) -> BigUint {
        if !self.delegate_of(account).is_empty() {
            return BigUint::zero();
        }
        self.membership_balance(account) + self.delegated_power(account).get()
    }

    /// Fails while the delegate's committed weight exceeds its raw power
    /// minus the released amount.
    fn release_delegation(&self, account: &ManagedAddress) {
        let delegate = self.delegate_of(account).get();
        let amount = self.delegated_amount(account).get();

        let remaining =
            self.membership_balance(&delegate) + self.delegated_power(&delegate).get() - &amount;
        require!(
            self.used_weight(&delegate).get() <= remaining,
            "Delegate has committed this power"
        );

        self.delegate_of(account).clear();
        self.delegated_amount(account).clear();
        self.delegated_power(&delegate)
            .update(|power| *power -= &amount);
    }

    /// Pulls every committed vote back out of strategies and Bribes.
    /// Each strategy is synced first so the weight it carried up to
    /// now is credited before it drops.
    fn reset_votes(&self, account: &ManagedAddress, epoch: u64) {
        let mut removed = BigUint::zero();
        for strategy in self.voted_strategies(account).iter() {
            let weight = self.votes(account, &strategy).take();
            if weight == 0u64 {
                continue;
            }

            self.sync_strategy(&strategy);
            self.strategy_weight(&strategy)
                .update(|total| *total -= &weight);
            removed += &weight;

            let bribe = self.strategy_bribe(&strategy).get();
            self.tx()
                .to(&bribe)
                .typed(bribe_proxy::BribeProxy)
                .withdraw(account.clone(), weight.clone())
                .sync_call();

            self.vote_reset_event(account, &strategy, epoch, &weight);
        }

        self.total_weight().update(|total| *total -= &removed);
        self.used_weight(account).clear();
        self.voted_strategies(account).clear();
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getCurrentEpoch)]
    fn get_current_epoch(&self) -> u64 {
        self.current_epoch()
    }

    #[view(getVotingPower)]
    fn get_voting_power(&self, account: ManagedAddress) -> BigUint {
        self.voting_power(&account)
    }

    /// Epoch of the account's last vote or reset, empty if it never voted
    #[view(getLastVoted)]
    fn get_last_voted(&self, account: ManagedAddress) -> OptionalValue<u64> {
        let next_epoch = self.next_vote_epoch(&account).get();
        if next_epoch == 0 {
            return OptionalValue::None;
        }
        OptionalValue::Some(next_epoch - 1)
    }

    #[view(getDelegate)]
    fn get_delegate(&self, account: ManagedAddress) -> OptionalValue<ManagedAddress> {
        if self.delegate_of(&account).is_empty() {
            return OptionalValue::None;
        }
        OptionalValue::Some(self.delegate_of(&account).get())
    }
}
