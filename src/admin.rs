multiversx_sc::imports!();

use crate::types::StrategyInfo;
use crate::MAX_STRATEGIES;

// ============================================================
// Strategy registry and governance settings
// ============================================================

#[multiversx_sc::module]
pub trait AdminModule:
    crate::storage::StorageModule
    + crate::events::EventsModule
    + crate::guard::GuardModule
    + crate::distribution::DistributionModule
{
    // ── Strategies ──

    #[endpoint(registerStrategy)]
    fn register_strategy(&self, strategy: ManagedAddress, bribe: ManagedAddress) {
        self.only_owner();
        require!(!strategy.is_zero() && !bribe.is_zero(), "Invalid address");
        require!(!self.is_valid(&strategy).get(), "Strategy already registered");
        require!(
            self.strategies().len() < MAX_STRATEGIES,
            "Strategy cap reached"
        );

        // Revenue notified before registration belongs to earlier voters.
        for token in self.revenue_tokens().iter() {
            let current_index = self.index(&token).get();
            self.supply_index(&strategy, &token).set(&current_index);
        }

        self.strategies().push(&strategy);
        self.is_valid(&strategy).set(true);
        self.is_alive(&strategy).set(true);
        self.strategy_bribe(&strategy).set(&bribe);

        self.strategy_added_event(&strategy, &bribe);
    }

    /// Stops a strategy from earning. Whatever it had accrued and not
    /// pulled yet goes to the treasury.
    #[endpoint(killStrategy)]
    fn kill_strategy(&self, strategy: ManagedAddress) {
        self.only_owner();
        self.lock();
        require!(self.is_valid(&strategy).get(), "Invalid strategy");
        require!(self.is_alive(&strategy).get(), "Strategy not alive");

        self.sync_strategy(&strategy);
        for token in self.revenue_tokens().iter() {
            let pending = self.claimable(&strategy, &token).take();
            if pending > 0u64 {
                self.forward_to_treasury(&token, &pending);
            }
        }
        self.is_alive(&strategy).set(false);

        self.strategy_killed_event(&strategy);
        self.unlock();
    }

    #[endpoint(reviveStrategy)]
    fn revive_strategy(&self, strategy: ManagedAddress) {
        self.only_owner();
        self.lock();
        require!(self.is_valid(&strategy).get(), "Invalid strategy");
        require!(!self.is_alive(&strategy).get(), "Strategy already alive");

        // settles the dead interval to the treasury
        self.sync_strategy(&strategy);
        self.is_alive(&strategy).set(true);

        self.strategy_revived_event(&strategy);
        self.unlock();
    }

    // ── Roles ──

    #[endpoint(setRevenueSource)]
    fn set_revenue_source(&self, revenue_source: ManagedAddress) {
        self.only_owner();
        require!(!revenue_source.is_zero(), "Invalid address");
        self.revenue_source().set(&revenue_source);
        self.revenue_source_changed_event(&revenue_source);
    }

    #[endpoint(setEmergencyCouncil)]
    fn set_emergency_council(&self, council: ManagedAddress) {
        self.only_owner();
        require!(!council.is_zero(), "Invalid address");
        self.emergency_council().set(&council);
        self.emergency_council_changed_event(&council);
    }

    #[endpoint(setOwner)]
    fn set_owner(&self, new_owner: ManagedAddress) {
        self.only_owner();
        require!(!new_owner.is_zero(), "Invalid address");
        self.owner().set(&new_owner);
        self.owner_changed_event(&new_owner);
    }

    #[endpoint(pause)]
    fn pause(&self) {
        self.only_owner_or_council();
        self.paused().set(true);
        self.paused_event(&self.blockchain().get_caller());
    }

    #[endpoint(unpause)]
    fn unpause(&self) {
        self.only_owner_or_council();
        self.paused().set(false);
        self.unpaused_event(&self.blockchain().get_caller());
    }

    // ── Views ──

    #[view(getStrategyInfo)]
    fn get_strategy_info(&self, strategy: ManagedAddress) -> StrategyInfo<Self::Api> {
        require!(self.is_valid(&strategy).get(), "Invalid strategy");
        StrategyInfo {
            bribe: self.strategy_bribe(&strategy).get(),
            weight: self.strategy_weight(&strategy).get(),
            alive: self.is_alive(&strategy).get(),
        }
    }
}
