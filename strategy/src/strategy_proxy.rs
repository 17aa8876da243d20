use multiversx_sc::proxy_imports::*;

use crate::types::Destination;

pub struct RevenueStrategyProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for RevenueStrategyProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = RevenueStrategyProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        RevenueStrategyProxyMethods { wrapped_tx: tx }
    }
}

pub struct RevenueStrategyProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, Gas> RevenueStrategyProxyMethods<Env, From, (), Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    Gas: TxGas<Env>,
{
    pub fn init<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<Destination<Env::Api>>,
    >(
        self,
        voter: Arg0,
        destination: Arg1,
    ) -> TxTypedDeploy<Env, From, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_deploy()
            .argument(&voter)
            .argument(&destination)
            .original_result()
    }
}

impl<Env, From, To, Gas> RevenueStrategyProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    pub fn execute<Arg0: ProxyArg<TokenIdentifier<Env::Api>>>(
        self,
        token: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("execute")
            .argument(&token)
            .original_result()
    }

    pub fn execute_batch<Arg0: ProxyArg<MultiValueEncoded<Env::Api, TokenIdentifier<Env::Api>>>>(
        self,
        tokens: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, MultiValueEncoded<Env::Api, BigUint<Env::Api>>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("executeBatch")
            .argument(&tokens)
            .original_result()
    }

    pub fn set_destination<Arg0: ProxyArg<Destination<Env::Api>>>(
        self,
        destination: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("setDestination")
            .argument(&destination)
            .original_result()
    }

    pub fn rescue<
        Arg0: ProxyArg<TokenIdentifier<Env::Api>>,
        Arg1: ProxyArg<BigUint<Env::Api>>,
        Arg2: ProxyArg<ManagedAddress<Env::Api>>,
    >(
        self,
        token: Arg0,
        amount: Arg1,
        to: Arg2,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("rescue")
            .argument(&token)
            .argument(&amount)
            .argument(&to)
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

    pub fn balance<Arg0: ProxyArg<TokenIdentifier<Env::Api>>>(
        self,
        token: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getBalance")
            .argument(&token)
            .original_result()
    }

    pub fn owner(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getOwner")
            .original_result()
    }

    pub fn voter(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getVoter")
            .original_result()
    }

    pub fn destination(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, Destination<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getDestination")
            .original_result()
    }
}
