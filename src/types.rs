multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Strategy Info: registry snapshot returned by getStrategyInfo
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct StrategyInfo<M: ManagedTypeApi> {
    /// Incentive ledger receiving the strategy's vote weight
    pub bribe: ManagedAddress<M>,
    pub weight: BigUint<M>,
    /// False once killed; the strategy stays valid forever
    pub alive: bool,
}
