multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Destination: where an executed balance ends up
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct SwapRoute<M: ManagedTypeApi> {
    /// xExchange-style pair trading the revenue token for `output_token`
    pub pair: ManagedAddress<M>,
    pub output_token: TokenIdentifier<M>,
    /// Receives the swap output
    pub recipient: ManagedAddress<M>,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub enum Destination<M: ManagedTypeApi> {
    /// Paid into a Bribe as rewards for the strategy's voters
    Bribe(ManagedAddress<M>),
    Treasury(ManagedAddress<M>),
    SwapAndDeposit(SwapRoute<M>),
}
