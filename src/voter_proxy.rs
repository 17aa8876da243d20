use multiversx_sc::proxy_imports::*;

use crate::types::StrategyInfo;

pub struct RevenueVoterProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for RevenueVoterProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = RevenueVoterProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        RevenueVoterProxyMethods { wrapped_tx: tx }
    }
}

pub struct RevenueVoterProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, Gas> RevenueVoterProxyMethods<Env, From, (), Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    Gas: TxGas<Env>,
{
    pub fn init<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<ManagedAddress<Env::Api>>,
        Arg2: ProxyArg<ManagedAddress<Env::Api>>,
        Arg3: ProxyArg<ManagedAddress<Env::Api>>,
        Arg4: ProxyArg<u64>,
    >(
        self,
        membership_source: Arg0,
        revenue_source: Arg1,
        treasury: Arg2,
        emergency_council: Arg3,
        epoch_start: Arg4,
    ) -> TxTypedDeploy<Env, From, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_deploy()
            .argument(&membership_source)
            .argument(&revenue_source)
            .argument(&treasury)
            .argument(&emergency_council)
            .argument(&epoch_start)
            .original_result()
    }
}

impl<Env, From, To, Gas> RevenueVoterProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    pub fn vote<
        Arg0: ProxyArg<ManagedVec<Env::Api, ManagedAddress<Env::Api>>>,
        Arg1: ProxyArg<ManagedVec<Env::Api, BigUint<Env::Api>>>,
    >(
        self,
        strategies: Arg0,
        weights: Arg1,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("vote")
            .argument(&strategies)
            .argument(&weights)
            .original_result()
    }

    pub fn reset(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("reset")
            .original_result()
    }

    pub fn delegate<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        target: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("delegate")
            .argument(&target)
            .original_result()
    }

    pub fn undelegate(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("undelegate")
            .original_result()
    }

    pub fn claim_incentives<Arg0: ProxyArg<MultiValueEncoded<Env::Api, ManagedAddress<Env::Api>>>>(
        self,
        strategies: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("claimIncentives")
            .argument(&strategies)
            .original_result()
    }

    pub fn notify_revenue(
        self,
    ) -> TxTypedCall<Env, From, To, (), Gas, ()> {
        self.wrapped_tx
            .raw_call("notifyRevenue")
            .original_result()
    }

    pub fn distribute<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<TokenIdentifier<Env::Api>>,
    >(
        self,
        strategy: Arg0,
        token: Arg1,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("distribute")
            .argument(&strategy)
            .argument(&token)
            .original_result()
    }

    pub fn distribute_many<
        Arg0: ProxyArg<TokenIdentifier<Env::Api>>,
        Arg1: ProxyArg<MultiValueEncoded<Env::Api, ManagedAddress<Env::Api>>>,
    >(
        self,
        token: Arg0,
        strategies: Arg1,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("distributeMany")
            .argument(&token)
            .argument(&strategies)
            .original_result()
    }

    pub fn register_strategy<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<ManagedAddress<Env::Api>>,
    >(
        self,
        strategy: Arg0,
        bribe: Arg1,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("registerStrategy")
            .argument(&strategy)
            .argument(&bribe)
            .original_result()
    }

    pub fn kill_strategy<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        strategy: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("killStrategy")
            .argument(&strategy)
            .original_result()
    }

    pub fn revive_strategy<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        strategy: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("reviveStrategy")
            .argument(&strategy)
            .original_result()
    }

    pub fn set_revenue_source<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        revenue_source: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("setRevenueSource")
            .argument(&revenue_source)
            .original_result()
    }

    pub fn set_emergency_council<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        council: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("setEmergencyCouncil")
            .argument(&council)
            .original_result()
    }

    pub fn set_owner<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        new_owner: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("setOwner")
            .argument(&new_owner)
            .original_result()
    }

    pub fn pause(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("pause")
            .original_result()
    }

    pub fn unpause(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("unpause")
            .original_result()
    }

    pub fn current_epoch(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, u64> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getCurrentEpoch")
            .original_result()
    }

    pub fn voting_power<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        account: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getVotingPower")
            .argument(&account)
            .original_result()
    }

    pub fn last_voted<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        account: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, OptionalValue<u64>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getLastVoted")
            .argument(&account)
            .original_result()
    }

    pub fn delegate_of<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        account: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, OptionalValue<ManagedAddress<Env::Api>>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getDelegate")
            .argument(&account)
            .original_result()
    }

    pub fn delegated_power<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        account: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getDelegatedPower")
            .argument(&account)
            .original_result()
    }

    pub fn claimable<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<TokenIdentifier<Env::Api>>,
    >(
        self,
        strategy: Arg0,
        token: Arg1,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getClaimable")
            .argument(&strategy)
            .argument(&token)
            .original_result()
    }

    pub fn strategy_info<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        strategy: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, StrategyInfo<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getStrategyInfo")
            .argument(&strategy)
            .original_result()
    }

    pub fn owner(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getOwner")
            .original_result()
    }

    pub fn membership_source(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getMembershipSource")
            .original_result()
    }

    pub fn revenue_source(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getRevenueSource")
            .original_result()
    }

    pub fn treasury(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getTreasury")
            .original_result()
    }

    pub fn emergency_council(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getEmergencyCouncil")
            .original_result()
    }

    pub fn epoch_start(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, u64> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getEpochStart")
            .original_result()
    }

    pub fn is_paused(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("isPaused")
            .original_result()
    }

    pub fn strategies(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, MultiValueEncoded<Env::Api, ManagedAddress<Env::Api>>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getStrategies")
            .original_result()
    }

    pub fn is_valid_strategy<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        strategy: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("isValidStrategy")
            .argument(&strategy)
            .original_result()
    }

    pub fn is_alive_strategy<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        strategy: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("isAliveStrategy")
            .argument(&strategy)
            .original_result()
    }

    pub fn strategy_bribe<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        strategy: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getStrategyBribe")
            .argument(&strategy)
            .original_result()
    }

    pub fn strategy_weight<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        strategy: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getStrategyWeight")
            .argument(&strategy)
            .original_result()
    }

    pub fn total_weight(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getTotalWeight")
            .original_result()
    }

    pub fn revenue_tokens(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, MultiValueEncoded<Env::Api, TokenIdentifier<Env::Api>>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getRevenueTokens")
            .original_result()
    }

    pub fn index<Arg0: ProxyArg<TokenIdentifier<Env::Api>>>(
        self,
        token: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getIndex")
            .argument(&token)
            .original_result()
    }

    pub fn supply_index<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<TokenIdentifier<Env::Api>>,
    >(
        self,
        strategy: Arg0,
        token: Arg1,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getSupplyIndex")
            .argument(&strategy)
            .argument(&token)
            .original_result()
    }

    pub fn voted_strategies<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        account: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, MultiValueEncoded<Env::Api, ManagedAddress<Env::Api>>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getVotedStrategies")
            .argument(&account)
            .original_result()
    }

    pub fn votes<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<ManagedAddress<Env::Api>>,
    >(
        self,
        account: Arg0,
        strategy: Arg1,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getVotes")
            .argument(&account)
            .argument(&strategy)
            .original_result()
    }

    pub fn used_weight<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        account: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getUsedWeight")
            .argument(&account)
            .original_result()
    }
}
