use multiversx_sc::proxy_imports::*;

/// Read side of the membership source: one voting unit per held token.
pub struct MembershipSourceProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for MembershipSourceProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = MembershipSourceProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        MembershipSourceProxyMethods { wrapped_tx: tx }
    }
}

pub struct MembershipSourceProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, To, Gas> MembershipSourceProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    pub fn membership_balance<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        account: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getMembershipBalance")
            .argument(&account)
            .original_result()
    }
}
