#![no_std]

multiversx_sc::imports!();

pub mod pair_proxy;
pub mod strategy_proxy;
pub mod types;

use bribe::bribe_proxy;
use revenue_voter::voter_proxy;
use types::{Destination, SwapRoute};

// ============================================================
// Constants
// ============================================================

/// Upper bound on tokens per executeBatch call
pub const MAX_BATCH_TOKENS: usize = 10;

/// Gas handed to the pair for one swap
const SWAP_GAS: u64 = 20_000_000;

/// Gas reserved for the swap callback
const SWAP_CALLBACK_GAS: u64 = 10_000_000;

/// Minimum output accepted from the pair
const MIN_SWAP_OUTPUT: u64 = 1;

// ============================================================
// Contract
// ============================================================

/// Revenue destination registered with the voter. Pulls its share on
/// every execution and forwards the whole balance of the token to the
/// configured destination.
///
/// Must be deployed payable-by-SC: the voter pays it by direct transfer.
#[multiversx_sc::contract]
pub trait RevenueStrategy {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self, voter: ManagedAddress, destination: Destination<Self::Api>) {
        require!(!voter.is_zero(), "Invalid address");
        self.require_valid_destination(&destination);

        self.owner().set(self.blockchain().get_caller());
        self.voter().set(&voter);
        self.destination().set(&destination);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: execute / executeBatch
    // Open to anyone. A destination that refuses the balance is
    // reported and skipped; the tokens stay here for a retry.
    // ========================================================

    #[endpoint(execute)]
    fn execute(&self, token: TokenIdentifier) -> BigUint {
        self.lock();
        let processed = self.execute_token(&token);
        self.unlock();
        processed
    }

    #[endpoint(executeBatch)]
    fn execute_batch(&self, tokens: MultiValueEncoded<TokenIdentifier>) -> MultiValueEncoded<BigUint> {
        self.lock();

        let tokens = tokens.to_vec();
        require!(tokens.len() <= MAX_BATCH_TOKENS, "Too many tokens");

        let mut processed = MultiValueEncoded::new();
        for token in tokens.iter() {
            processed.push(self.execute_token(&token));
        }

        self.unlock();
        processed
    }

    fn execute_token(&self, token: &TokenIdentifier) -> BigUint {
        self.pull_share(token);

        let balance = self.token_balance(token);
        if balance == 0u64 {
            return BigUint::zero();
        }

        match self.destination().get() {
            Destination::Bribe(bribe) => {
                if !self.forward_to_bribe(&bribe, token, &balance) {
                    return BigUint::zero();
                }
            },
            Destination::Treasury(treasury) => {
                self.send().direct_esdt(&treasury, token, 0, &balance);
            },
            Destination::SwapAndDeposit(route) => {
                self.swap_and_deposit(&route, token, &balance);
            },
        }

        self.executed_event(token, &balance);
        balance
    }

    // ── Destination handlers ──

    fn pull_share(&self, token: &TokenIdentifier) {
        let voter = self.voter().get();
        self.tx()
            .to(&voter)
            .typed(voter_proxy::RevenueVoterProxy)
            .distribute(self.blockchain().get_sc_address(), token.clone())
            .sync_call();
    }

    /// Returns false when the Bribe would refuse the payment; nothing
    /// is sent in that case.
    fn forward_to_bribe(
        &self,
        bribe: &ManagedAddress,
        token: &TokenIdentifier,
        amount: &BigUint,
    ) -> bool {
        let acceptable: bool = self
            .tx()
            .to(bribe)
            .typed(bribe_proxy::BribeProxy)
            .is_reward_acceptable(token.clone(), amount.clone())
            .returns(ReturnsResult)
            .sync_call();
        if !acceptable {
            self.execution_failed_event(token, amount, &ManagedBuffer::from("Reward not acceptable"));
            return false;
        }

        self.tx()
            .to(bribe)
            .typed(bribe_proxy::BribeProxy)
            .notify_reward()
            .single_esdt(token, 0, amount)
            .sync_call();
        true
    }

    fn swap_and_deposit(&self, route: &SwapRoute<Self::Api>, token: &TokenIdentifier, amount: &BigUint) {
        if *token == route.output_token {
            self.send().direct_esdt(&route.recipient, token, 0, amount);
            return;
        }

        self.tx()
            .to(&route.pair)
            .typed(pair_proxy::PairProxy)
            .swap_tokens_fixed_input(route.output_token.clone(), BigUint::from(MIN_SWAP_OUTPUT))
            .single_esdt(token, 0, amount)
            .gas(SWAP_GAS)
            .callback(self.callbacks().swap_callback(
                token.clone(),
                amount.clone(),
                route.recipient.clone(),
            ))
            .gas_for_callback(SWAP_CALLBACK_GAS)
            .register_promise();

        self.swap_dispatched_event(token, &route.pair, amount);
    }

    // On failure the pair's input is refunded to this contract by the protocol.
    #[promises_callback]
    fn swap_callback(
        &self,
        token_in: TokenIdentifier,
        amount_in: BigUint,
        recipient: ManagedAddress,
        #[call_result] result: ManagedAsyncCallResult<EsdtTokenPayment>,
    ) {
        match result {
            ManagedAsyncCallResult::Ok(output) => {
                if output.amount > 0u64 {
                    self.send().direct_esdt(
                        &recipient,
                        &output.token_identifier,
                        output.token_nonce,
                        &output.amount,
                    );
                }
                self.swap_completed_event(&token_in, &output.token_identifier, &output.amount);
            },
            ManagedAsyncCallResult::Err(err) => {
                self.execution_failed_event(&token_in, &amount_in, &err.err_msg);
            },
        }
    }

    // ========================================================
    // ENDPOINT: owner actions
    // ========================================================

    #[endpoint(setDestination)]
    fn set_destination(&self, destination: Destination<Self::Api>) {
        self.only_owner();
        self.require_valid_destination(&destination);

        self.destination().set(&destination);
        self.destination_changed_event(&destination);
    }

    /// Moves stuck tokens out, e.g. after a refused Bribe payment or a
    /// failed swap.
    #[endpoint(rescue)]
    fn rescue(&self, token: TokenIdentifier, amount: BigUint, to: ManagedAddress) {
        self.only_owner();
        require!(!to.is_zero(), "Invalid address");
        require!(amount > 0u64, "Amount must be positive");
        require!(amount <= self.token_balance(&token), "Insufficient balance");

        self.send().direct_esdt(&to, &token, 0, &amount);
        self.rescued_event(&token, &to, &amount);
    }

    #[endpoint(setOwner)]
    fn set_owner(&self, new_owner: ManagedAddress) {
        self.only_owner();
        require!(!new_owner.is_zero(), "Invalid address");
        self.owner().set(&new_owner);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn require_valid_destination(&self, destination: &Destination<Self::Api>) {
        match destination {
            Destination::Bribe(address) | Destination::Treasury(address) => {
                require!(!address.is_zero(), "Invalid address");
            },
            Destination::SwapAndDeposit(route) => {
                require!(
                    !route.pair.is_zero() && !route.recipient.is_zero(),
                    "Invalid address"
                );
                require!(
                    route.output_token.is_valid_esdt_identifier(),
                    "Invalid output token"
                );
            },
        }
    }

    fn token_balance(&self, token: &TokenIdentifier) -> BigUint {
        self.blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::esdt(token.clone()), 0)
    }

    fn only_owner(&self) {
        let caller = self.blockchain().get_caller();
        require!(caller == self.owner().get(), "Only owner");
    }

    fn lock(&self) {
        require!(!self.reentrancy_lock().get(), "Reentrant call");
        self.reentrancy_lock().set(true);
    }

    fn unlock(&self) {
        self.reentrancy_lock().clear();
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getBalance)]
    fn get_balance(&self, token: TokenIdentifier) -> BigUint {
        self.token_balance(&token)
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("executed")]
    fn executed_event(&self, #[indexed] token: &TokenIdentifier, amount: &BigUint);

    #[event("executionFailed")]
    fn execution_failed_event(
        &self,
        #[indexed] token: &TokenIdentifier,
        #[indexed] amount: &BigUint,
        reason: &ManagedBuffer,
    );

    #[event("swapDispatched")]
    fn swap_dispatched_event(
        &self,
        #[indexed] token: &TokenIdentifier,
        #[indexed] pair: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("swapCompleted")]
    fn swap_completed_event(
        &self,
        #[indexed] token_in: &TokenIdentifier,
        #[indexed] token_out: &TokenIdentifier,
        amount_out: &BigUint,
    );

    #[event("rescued")]
    fn rescued_event(
        &self,
        #[indexed] token: &TokenIdentifier,
        #[indexed] to: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("destinationChanged")]
    fn destination_changed_event(&self, destination: &Destination<Self::Api>);

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getOwner)]
    #[storage_mapper("owner")]
    fn owner(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getVoter)]
    #[storage_mapper("voter")]
    fn voter(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getDestination)]
    #[storage_mapper("destination")]
    fn destination(&self) -> SingleValueMapper<Destination<Self::Api>>;

    #[storage_mapper("reentrancyLock")]
    fn reentrancy_lock(&self) -> SingleValueMapper<bool>;
}
