#![no_std]

multiversx_sc::imports!();

pub mod membership_mock_proxy;

/// Membership source for tests. Balances are set directly instead of
/// being read from token holdings.
#[multiversx_sc::contract]
pub trait MembershipMock {
    #[init]
    fn init(&self) {}

    #[upgrade]
    fn upgrade(&self) {}

    #[endpoint(setMembershipBalance)]
    fn set_membership_balance(&self, account: ManagedAddress, amount: BigUint) {
        self.membership_balance(&account).set(&amount);
    }

    #[view(getMembershipBalance)]
    #[storage_mapper("membershipBalance")]
    fn membership_balance(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;
}
