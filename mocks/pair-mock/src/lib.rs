#![no_std]

multiversx_sc::imports!();

pub mod pair_mock_proxy;

/// Swap pair for tests: trades 1:1 out of whatever reserves it holds.
#[multiversx_sc::contract]
pub trait PairMock {
    #[init]
    fn init(&self) {}

    #[upgrade]
    fn upgrade(&self) {}

    #[payable("*")]
    #[endpoint(addReserve)]
    fn add_reserve(&self) {}

    #[payable("*")]
    #[endpoint(swapTokensFixedInput)]
    fn swap_tokens_fixed_input(
        &self,
        token_out: TokenIdentifier,
        amount_out_min: BigUint,
    ) -> EsdtTokenPayment {
        let payment = self.call_value().single_esdt();
        let amount_out = payment.amount.clone();
        require!(amount_out >= amount_out_min, "Slippage exceeded");

        let reserve = self
            .blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::esdt(token_out.clone()), 0);
        require!(reserve >= amount_out, "Insufficient liquidity");

        let caller = self.blockchain().get_caller();
        self.send().direct_esdt(&caller, &token_out, 0, &amount_out);
        EsdtTokenPayment::new(token_out, 0, amount_out)
    }
}
