multiversx_sc::imports!();

use crate::math;
use crate::{MAX_REVENUE_TOKENS, MAX_STRATEGIES};

// ============================================================
// Revenue distribution index
//
// Revenue is never pushed to strategies when it arrives. Each
// notification bumps a per-token index (revenue per unit of
// weight); a strategy's share is settled lazily from the index
// delta since its own last sync.
// ============================================================

#[multiversx_sc::module]
pub trait DistributionModule:
    crate::storage::StorageModule + crate::events::EventsModule + crate::guard::GuardModule
{
    // ========================================================
    // ENDPOINT: notifyRevenue
    // Only the revenue source. With no weight committed the
    // payment goes straight to the treasury.
    // ========================================================

    #[payable("*")]
    #[endpoint(notifyRevenue)]
    fn notify_revenue(&self) {
        self.lock();

        let caller = self.blockchain().get_caller();
        require!(
            caller == self.revenue_source().get(),
            "Only revenue source"
        );

        let payment = self.call_value().single_esdt();
        require!(payment.token_nonce == 0, "Only fungible tokens");
        require!(payment.amount > 0u64, "Amount must be positive");

        let token = payment.token_identifier;
        let amount = payment.amount;

        let total_weight = self.total_weight().get();
        if total_weight == 0u64 {
            self.forward_to_treasury(&token, &amount);
            self.unlock();
            return;
        }

        if !self.revenue_tokens().contains(&token) {
            require!(
                self.revenue_tokens().len() < MAX_REVENUE_TOKENS,
                "Too many revenue tokens"
            );
            self.revenue_tokens().insert(token.clone());
        }

        // A ratio that truncates to zero is dropped; the tokens stay as dust.
        let ratio = math::index_increment(&amount, &total_weight);
        if ratio > 0u64 {
            self.index(&token).update(|index| *index += &ratio);
        }

        let index = self.index(&token).get();
        self.revenue_notified_event(&caller, &token, &index, &amount);

        self.unlock();
    }

    // ========================================================
    // ENDPOINT: distribute
    // Anyone may push a strategy's settled share to it.
    // Idempotent when the index has not moved.
    // ========================================================

    #[endpoint(distribute)]
    fn distribute(&self, strategy: ManagedAddress, token: TokenIdentifier) -> BigUint {
        self.lock();
        let amount = self.distribute_to(&strategy, &token);
        self.unlock();
        amount
    }

    #[endpoint(distributeMany)]
    fn distribute_many(
        &self,
        token: TokenIdentifier,
        strategies: MultiValueEncoded<ManagedAddress>,
    ) -> BigUint {
        self.lock();

        let strategies = strategies.to_vec();
        require!(strategies.len() <= MAX_STRATEGIES, "Too many strategies");

        let mut total = BigUint::zero();
        for strategy in strategies.iter() {
            total += self.distribute_to(&strategy, &token);
        }

        self.unlock();
        total
    }

    fn distribute_to(&self, strategy: &ManagedAddress, token: &TokenIdentifier) -> BigUint {
        require!(self.is_valid(strategy).get(), "Invalid strategy");
        if !self.revenue_tokens().contains(token) {
            return BigUint::zero();
        }

        self.sync_strategy_token(strategy, token);

        let amount = self.claimable(strategy, token).take();
        if amount > 0u64 {
            self.send().direct_esdt(strategy, token, 0, &amount);
            self.revenue_distributed_event(strategy, token, &amount);
        }
        amount
    }

    // ========================================================
    // INTERNAL: sync
    // Runs before every change of a strategy's weight so each
    // index interval is credited to the weight in force during it.
    // ========================================================

    fn sync_strategy(&self, strategy: &ManagedAddress) {
        for token in self.revenue_tokens().iter() {
            self.sync_strategy_token(strategy, &token);
        }
    }

    fn sync_strategy_token(&self, strategy: &ManagedAddress, token: &TokenIdentifier) {
        let current_index = self.index(token).get();
        let last_index = self.supply_index(strategy, token).get();
        if current_index == last_index {
            return;
        }

        let weight = self.strategy_weight(strategy).get();
        let share = math::accrued_share(&weight, &current_index, &last_index);
        self.supply_index(strategy, token).set(&current_index);

        if share == 0u64 {
            return;
        }

        // A dead strategy's remaining weight no longer earns for it.
        if self.is_alive(strategy).get() {
            self.claimable(strategy, token).update(|claimable| *claimable += &share);
        } else {
            self.forward_to_treasury(token, &share);
        }
    }

    fn forward_to_treasury(&self, token: &TokenIdentifier, amount: &BigUint) {
        let treasury = self.treasury().get();
        self.send().direct_esdt(&treasury, token, 0, amount);
        self.revenue_forwarded_event(token, &treasury, amount);
    }

    // ========================================================
    // VIEWS
    // ========================================================

    /// Settled plus not-yet-synced share, without writing anything.
    #[view(getClaimable)]
    fn get_claimable(&self, strategy: ManagedAddress, token: TokenIdentifier) -> BigUint {
        let stored = self.claimable(&strategy, &token).get();
        if !self.is_alive(&strategy).get() {
            return stored;
        }

        let pending = math::accrued_share(
            &self.strategy_weight(&strategy).get(),
            &self.index(&token).get(),
            &self.supply_index(&strategy, &token).get(),
        );
        stored + pending
    }
}
