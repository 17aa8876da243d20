#![no_std]

multiversx_sc::imports!();

pub mod bribe_proxy;
pub mod reward_math;
pub mod types;

use types::RewardData;

// ============================================================
// Constants
// ============================================================

/// Reward period: 7 days in seconds
pub const DURATION: u64 = 604_800;

/// Fixed-point scale of the reward-per-token accumulator (1e18)
pub const PRECISION: u64 = 1_000_000_000_000_000_000;

/// Hard cap on distinct reward tokens, bounds every per-account loop
pub const MAX_REWARD_TOKENS: usize = 16;

// ============================================================
// Contract
// ============================================================

/// Incentive ledger attached to one strategy. Balances are virtual:
/// they mirror the vote weight committed through the voter and are
/// never backed by deposited tokens.
#[multiversx_sc::contract]
pub trait Bribe {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self, voter: ManagedAddress) {
        require!(!voter.is_zero(), "Invalid address");
        self.voter().set(&voter);
        self.total_supply().set(BigUint::zero());
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: deposit / withdraw
    // Virtual balance bookkeeping, driven by the voter only.
    // ========================================================

    #[endpoint(deposit)]
    fn deposit(&self, account: ManagedAddress, amount: BigUint) {
        self.only_voter();
        require!(amount > 0u64, "Amount must be positive");

        self.update_all_rewards(&account);

        self.balance_of(&account).update(|balance| *balance += &amount);
        self.total_supply().update(|supply| *supply += &amount);

        self.deposit_event(&account, &amount);
    }

    #[endpoint(withdraw)]
    fn withdraw(&self, account: ManagedAddress, amount: BigUint) {
        self.only_voter();
        require!(amount > 0u64, "Amount must be positive");

        let balance = self.balance_of(&account).get();
        require!(balance >= amount, "Insufficient balance");

        self.update_all_rewards(&account);

        self.balance_of(&account).set(&(balance - &amount));
        self.total_supply().update(|supply| *supply -= &amount);

        self.withdraw_event(&account, &amount);
    }

    // ========================================================
    // ENDPOINT: notifyReward
    // Open to anyone. Starts a new DURATION-long period, rolling
    // the unemitted remainder of the running one into the rate.
    // ========================================================

    #[payable("*")]
    #[endpoint(notifyReward)]
    fn notify_reward(&self) {
        self.lock();

        let caller = self.blockchain().get_caller();
        let payment = self.call_value().single_esdt();
        require!(payment.token_nonce == 0, "Only fungible tokens");
        require!(payment.amount > 0u64, "Amount must be positive");

        let token = payment.token_identifier;
        let amount = payment.amount;

        if !self.reward_tokens().contains(&token) {
            require!(
                self.reward_tokens().len() < MAX_REWARD_TOKENS,
                "Too many reward tokens"
            );
            self.reward_tokens().insert(token.clone());
        }

        let now = self.blockchain().get_block_timestamp();
        let mut data = self.update_reward(&token, None);

        let rate = reward_math::next_reward_rate(&data, &amount, now);
        require!(rate > 0u64, "Reward rate is zero");

        // The payment is already part of the contract balance here.
        let balance = self.token_balance(&token);
        require!(rate <= balance / DURATION, "Reward too high");

        data.reward_rate = rate;
        data.last_update_time = now;
        data.period_finish = now + DURATION;
        self.reward_data(&token).set(&data);

        self.reward_notified_event(&caller, &token, data.period_finish, &amount);

        self.unlock();
    }

    // ========================================================
    // ENDPOINT: claim / claimToken / claimFor
    // ========================================================

    #[endpoint(claim)]
    fn claim(&self) {
        self.lock();
        let caller = self.blockchain().get_caller();
        self.pay_all_rewards(&caller);
        self.unlock();
    }

    #[endpoint(claimToken)]
    fn claim_token(&self, token: TokenIdentifier) -> BigUint {
        self.lock();
        require!(self.reward_tokens().contains(&token), "Unknown reward token");

        let caller = self.blockchain().get_caller();
        let paid = self.pay_reward(&token, &caller);

        self.unlock();
        paid
    }

    /// Lets the voter settle an account's rewards on its behalf.
    /// Tokens always go to `account`, never to the voter.
    #[endpoint(claimFor)]
    fn claim_for(&self, account: ManagedAddress) {
        self.only_voter();
        self.lock();
        self.pay_all_rewards(&account);
        self.unlock();
    }

    // ========================================================
    // INTERNAL: accumulator snapshots
    // Must run before any balance change so that past accrual
    // is priced against the balance actually held.
    // ========================================================

    fn update_all_rewards(&self, account: &ManagedAddress) {
        for token in self.reward_tokens().iter() {
            self.update_reward(&token, Some(account));
        }
    }

    fn update_reward(
        &self,
        token: &TokenIdentifier,
        account: Option<&ManagedAddress>,
    ) -> RewardData<Self::Api> {
        let now = self.blockchain().get_block_timestamp();
        let total_supply = self.total_supply().get();

        let mut data = self.load_reward_data(token);
        data.reward_per_token_stored = reward_math::reward_per_token(&data, &total_supply, now);
        data.last_update_time = reward_math::last_time_reward_applicable(&data, now);
        self.reward_data(token).set(&data);

        if let Some(account) = account {
            let earned = self.earned_at(token, account, &data.reward_per_token_stored);
            self.rewards(token, account).set(&earned);
            self.user_reward_per_token_paid(token, account)
                .set(&data.reward_per_token_stored);
        }

        data
    }

    fn earned_at(
        &self,
        token: &TokenIdentifier,
        account: &ManagedAddress,
        reward_per_token: &BigUint,
    ) -> BigUint {
        reward_math::earned(
            &self.balance_of(account).get(),
            reward_per_token,
            &self.user_reward_per_token_paid(token, account).get(),
            &self.rewards(token, account).get(),
        )
    }

    fn pay_all_rewards(&self, account: &ManagedAddress) {
        for token in self.reward_tokens().iter() {
            self.pay_reward(&token, account);
        }
    }

    fn pay_reward(&self, token: &TokenIdentifier, account: &ManagedAddress) -> BigUint {
        self.update_reward(token, Some(account));

        let reward = self.rewards(token, account).take();
        if reward > 0u64 {
            self.send().direct_esdt(account, token, 0, &reward);
            self.reward_claimed_event(account, token, &reward);
        }
        reward
    }

    fn load_reward_data(&self, token: &TokenIdentifier) -> RewardData<Self::Api> {
        if self.reward_data(token).is_empty() {
            return RewardData::default();
        }
        self.reward_data(token).get()
    }

    fn current_reward_per_token(&self, token: &TokenIdentifier) -> BigUint {
        let data = self.load_reward_data(token);
        let now = self.blockchain().get_block_timestamp();
        reward_math::reward_per_token(&data, &self.total_supply().get(), now)
    }

    fn token_balance(&self, token: &TokenIdentifier) -> BigUint {
        self.blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::esdt(token.clone()), 0)
    }

    fn only_voter(&self) {
        let caller = self.blockchain().get_caller();
        require!(caller == self.voter().get(), "Only voter");
    }

    fn lock(&self) {
        require!(!self.reentrancy_lock().get(), "Reentrant call");
        self.reentrancy_lock().set(true);
    }

    fn unlock(&self) {
        self.reentrancy_lock().clear();
    }

    // ========================================================
    // VIEWS: read-only queries
    // ========================================================

    #[view(getRewardPerToken)]
    fn get_reward_per_token(&self, token: TokenIdentifier) -> BigUint {
        self.current_reward_per_token(&token)
    }

    #[view(getEarned)]
    fn get_earned(&self, account: ManagedAddress, token: TokenIdentifier) -> BigUint {
        let reward_per_token = self.current_reward_per_token(&token);
        self.earned_at(&token, &account, &reward_per_token)
    }

    #[view(getLastTimeRewardApplicable)]
    fn get_last_time_reward_applicable(&self, token: TokenIdentifier) -> u64 {
        let now = self.blockchain().get_block_timestamp();
        reward_math::last_time_reward_applicable(&self.load_reward_data(&token), now)
    }

    #[view(getRewardForDuration)]
    fn get_reward_for_duration(&self, token: TokenIdentifier) -> BigUint {
        self.load_reward_data(&token).reward_rate * DURATION
    }

    #[view(getLeft)]
    fn get_left(&self, token: TokenIdentifier) -> BigUint {
        let now = self.blockchain().get_block_timestamp();
        reward_math::left(&self.load_reward_data(&token), now)
    }

    #[view(getRewardData)]
    fn get_reward_data(&self, token: TokenIdentifier) -> RewardData<Self::Api> {
        self.load_reward_data(&token)
    }

    /// Mirrors the checks of `notifyReward` for a prospective payment,
    /// so callers can skip a notification that would abort.
    #[view(isRewardAcceptable)]
    fn is_reward_acceptable(&self, token: TokenIdentifier, amount: BigUint) -> bool {
        if amount == 0u64 {
            return false;
        }
        if !self.reward_tokens().contains(&token)
            && self.reward_tokens().len() >= MAX_REWARD_TOKENS
        {
            return false;
        }

        let now = self.blockchain().get_block_timestamp();
        let data = self.load_reward_data(&token);
        let rate = reward_math::next_reward_rate(&data, &amount, now);
        if rate == 0u64 {
            return false;
        }

        let balance_after = self.token_balance(&token) + &amount;
        rate <= balance_after / DURATION
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("deposit")]
    fn deposit_event(&self, #[indexed] account: &ManagedAddress, amount: &BigUint);

    #[event("withdraw")]
    fn withdraw_event(&self, #[indexed] account: &ManagedAddress, amount: &BigUint);

    #[event("rewardNotified")]
    fn reward_notified_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] token: &TokenIdentifier,
        #[indexed] period_finish: u64,
        amount: &BigUint,
    );

    #[event("rewardClaimed")]
    fn reward_claimed_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] token: &TokenIdentifier,
        amount: &BigUint,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getVoter)]
    #[storage_mapper("voter")]
    fn voter(&self) -> SingleValueMapper<ManagedAddress>;

    // ── Virtual balances ──

    #[view(getTotalSupply)]
    #[storage_mapper("totalSupply")]
    fn total_supply(&self) -> SingleValueMapper<BigUint>;

    #[view(getBalance)]
    #[storage_mapper("balanceOf")]
    fn balance_of(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;

    // ── Rewards ──

    #[view(getRewardTokens)]
    #[storage_mapper("rewardTokens")]
    fn reward_tokens(&self) -> UnorderedSetMapper<TokenIdentifier>;

    #[storage_mapper("rewardData")]
    fn reward_data(&self, token: &TokenIdentifier) -> SingleValueMapper<RewardData<Self::Api>>;

    #[storage_mapper("userRewardPerTokenPaid")]
    fn user_reward_per_token_paid(
        &self,
        token: &TokenIdentifier,
        account: &ManagedAddress,
    ) -> SingleValueMapper<BigUint>;

    #[storage_mapper("rewards")]
    fn rewards(&self, token: &TokenIdentifier, account: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("reentrancyLock")]
    fn reentrancy_lock(&self) -> SingleValueMapper<bool>;
}
