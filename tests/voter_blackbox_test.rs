// Blackbox tests for the revenue voter, with real Bribe ledgers attached.
//
// Strategies are plain accounts: the voter only ever transfers revenue to
// them, so their balances show exactly what `distribute` pushed out.

use bribe::bribe_proxy::BribeProxy;
use bribe::DURATION;
use membership_mock::membership_mock_proxy::MembershipMockProxy;
use multiversx_sc_scenario::imports::*;
use revenue_voter::math::PRECISION;
use revenue_voter::voter_proxy::RevenueVoterProxy;
use revenue_voter::EPOCH_DURATION;

const OWNER: TestAddress = TestAddress::new("owner");
const SOURCE: TestAddress = TestAddress::new("revenue-source");
const TREASURY: TestAddress = TestAddress::new("treasury");
const COUNCIL: TestAddress = TestAddress::new("council");
const FUNDER: TestAddress = TestAddress::new("funder");
const ALICE: TestAddress = TestAddress::new("alice");
const BOB: TestAddress = TestAddress::new("bob");
const CAROL: TestAddress = TestAddress::new("carol");

const STRATEGY_1: TestAddress = TestAddress::new("strategy1");
const STRATEGY_2: TestAddress = TestAddress::new("strategy2");
const STRATEGY_3: TestAddress = TestAddress::new("strategy3");
const UNKNOWN: TestAddress = TestAddress::new("unknown");

const MEMBERSHIP: TestSCAddress = TestSCAddress::new("membership");
const VOTER: TestSCAddress = TestSCAddress::new("voter");
const BRIBE_1: TestSCAddress = TestSCAddress::new("bribe1");
const BRIBE_2: TestSCAddress = TestSCAddress::new("bribe2");
const BRIBE_3: TestSCAddress = TestSCAddress::new("bribe3");

const VOTER_CODE: MxscPath = MxscPath::new("output/revenue-voter.mxsc.json");
const BRIBE_CODE: MxscPath = MxscPath::new("bribe/output/bribe.mxsc.json");
const MEMBERSHIP_CODE: MxscPath =
    MxscPath::new("mocks/membership-mock/output/membership-mock.mxsc.json");

const REVENUE_ID: &str = "REV-123456";
const REVENUE_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new(REVENUE_ID);
const REWARD_ID: &str = "RWD-123456";
const REWARD_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new(REWARD_ID);

const EPOCH_START: u64 = 1_000_000;
const START: u64 = EPOCH_START + 10;
const NEXT_EPOCH: u64 = EPOCH_START + EPOCH_DURATION;

fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();
    blockchain.register_contract(VOTER_CODE, revenue_voter::ContractBuilder);
    blockchain.register_contract(BRIBE_CODE, bribe::ContractBuilder);
    blockchain.register_contract(MEMBERSHIP_CODE, membership_mock::ContractBuilder);
    blockchain
}

fn managed(address: Address) -> ManagedAddress<StaticApi> {
    ManagedAddress::from(address)
}

fn token(id: &str) -> TokenIdentifier<StaticApi> {
    TokenIdentifier::from(id)
}

fn addresses(accounts: &[TestAddress]) -> ManagedVec<StaticApi, ManagedAddress<StaticApi>> {
    let mut result = ManagedVec::new();
    for account in accounts {
        result.push(managed(account.to_address()));
    }
    result
}

fn weights(values: &[u64]) -> ManagedVec<StaticApi, BigUint<StaticApi>> {
    let mut result = ManagedVec::new();
    for value in values {
        result.push(BigUint::from(*value));
    }
    result
}

fn strategy_list(accounts: &[TestAddress]) -> MultiValueEncoded<StaticApi, ManagedAddress<StaticApi>> {
    let mut result = MultiValueEncoded::new();
    for account in accounts {
        result.push(managed(account.to_address()));
    }
    result
}

fn deploy_bribe(world: &mut ScenarioWorld, address: TestSCAddress) {
    world
        .tx()
        .from(OWNER)
        .typed(BribeProxy)
        .init(managed(VOTER.to_address()))
        .code(BRIBE_CODE)
        .new_address(address)
        .run();
}

/// Alice holds 3 membership units, Bob 2, Carol none. Strategies 1 and 2
/// are registered; strategy 3 has a Bribe deployed but is not registered.
fn setup() -> ScenarioWorld {
    let mut world = world();

    world.account(OWNER).nonce(1);
    world
        .account(SOURCE)
        .nonce(1)
        .esdt_balance(REVENUE_TOKEN, 1_000_000u64);
    world.account(TREASURY).nonce(1);
    world.account(COUNCIL).nonce(1);
    world
        .account(FUNDER)
        .nonce(1)
        .esdt_balance(REWARD_TOKEN, DURATION * 10_000);
    world.account(ALICE).nonce(1);
    world.account(BOB).nonce(1);
    world.account(CAROL).nonce(1);
    world.account(STRATEGY_1).nonce(1);
    world.account(STRATEGY_2).nonce(1);
    world.account(STRATEGY_3).nonce(1);

    world.current_block().block_timestamp(START);

    world
        .tx()
        .from(OWNER)
        .typed(MembershipMockProxy)
        .init()
        .code(MEMBERSHIP_CODE)
        .new_address(MEMBERSHIP)
        .run();
    set_membership(&mut world, ALICE, 3);
    set_membership(&mut world, BOB, 2);

    world
        .tx()
        .from(OWNER)
        .typed(RevenueVoterProxy)
        .init(
            managed(MEMBERSHIP.to_address()),
            managed(SOURCE.to_address()),
            managed(TREASURY.to_address()),
            managed(COUNCIL.to_address()),
            EPOCH_START,
        )
        .code(VOTER_CODE)
        .new_address(VOTER)
        .run();

    deploy_bribe(&mut world, BRIBE_1);
    deploy_bribe(&mut world, BRIBE_2);
    deploy_bribe(&mut world, BRIBE_3);

    register(&mut world, STRATEGY_1, BRIBE_1);
    register(&mut world, STRATEGY_2, BRIBE_2);

    world
}

fn set_membership(world: &mut ScenarioWorld, account: TestAddress, units: u64) {
    world
        .tx()
        .from(OWNER)
        .to(MEMBERSHIP)
        .typed(MembershipMockProxy)
        .set_membership_balance(managed(account.to_address()), BigUint::from(units))
        .run();
}

fn register(world: &mut ScenarioWorld, strategy: TestAddress, bribe: TestSCAddress) {
    world
        .tx()
        .from(OWNER)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .register_strategy(managed(strategy.to_address()), managed(bribe.to_address()))
        .run();
}

fn vote(world: &mut ScenarioWorld, account: TestAddress, strategies: &[TestAddress], values: &[u64]) {
    world
        .tx()
        .from(account)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .vote(addresses(strategies), weights(values))
        .run();
}

fn vote_expect_error(
    world: &mut ScenarioWorld,
    account: TestAddress,
    strategies: &[TestAddress],
    values: &[u64],
    message: &str,
) {
    world
        .tx()
        .from(account)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .vote(addresses(strategies), weights(values))
        .returns(ExpectError(4, message))
        .run();
}

fn delegate(world: &mut ScenarioWorld, account: TestAddress, target: TestAddress) {
    world
        .tx()
        .from(account)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .delegate(managed(target.to_address()))
        .run();
}

fn undelegate(world: &mut ScenarioWorld, account: TestAddress) {
    world
        .tx()
        .from(account)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .undelegate()
        .run();
}

fn notify_revenue(world: &mut ScenarioWorld, amount: u64) {
    world
        .tx()
        .from(SOURCE)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .notify_revenue()
        .single_esdt(&token(REVENUE_ID), 0, &BigUint::from(amount))
        .run();
}

fn distribute(world: &mut ScenarioWorld, strategy: TestAddress, expected: u64) {
    world
        .tx()
        .from(CAROL)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .distribute(managed(strategy.to_address()), token(REVENUE_ID))
        .returns(ExpectValue(expected))
        .run();
}

fn check_strategy_weight(world: &mut ScenarioWorld, strategy: TestAddress, expected: u64) {
    world
        .query()
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .strategy_weight(managed(strategy.to_address()))
        .returns(ExpectValue(expected))
        .run();
}

fn check_total_weight(world: &mut ScenarioWorld, expected: u64) {
    world
        .query()
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .total_weight()
        .returns(ExpectValue(expected))
        .run();
}

fn check_claimable(world: &mut ScenarioWorld, strategy: TestAddress, expected: u64) {
    world
        .query()
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .claimable(managed(strategy.to_address()), token(REVENUE_ID))
        .returns(ExpectValue(expected))
        .run();
}

fn check_bribe_balance(world: &mut ScenarioWorld, bribe: TestSCAddress, account: TestAddress, expected: u64) {
    world
        .query()
        .to(bribe)
        .typed(BribeProxy)
        .balance_of(managed(account.to_address()))
        .returns(ExpectValue(expected))
        .run();
}

fn check_voting_power(world: &mut ScenarioWorld, account: TestAddress, expected: u64) {
    world
        .query()
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .voting_power(managed(account.to_address()))
        .returns(ExpectValue(expected))
        .run();
}

// ── Voting ──

#[test]
fn vote_allocates_floor_of_relative_weights() {
    let mut world = setup();

    vote(&mut world, ALICE, &[STRATEGY_1, STRATEGY_2], &[60, 40]);

    check_strategy_weight(&mut world, STRATEGY_1, 1);
    check_strategy_weight(&mut world, STRATEGY_2, 1);
    check_total_weight(&mut world, 2);
    world
        .query()
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .used_weight(managed(ALICE.to_address()))
        .returns(ExpectValue(2u64))
        .run();
    check_bribe_balance(&mut world, BRIBE_1, ALICE, 1);
    check_bribe_balance(&mut world, BRIBE_2, ALICE, 1);
}

#[test]
fn ineligible_strategies_are_skipped() {
    let mut world = setup();

    vote(&mut world, ALICE, &[STRATEGY_1, UNKNOWN], &[1, 5]);

    // the unknown entry is dropped before weights are normalised
    check_strategy_weight(&mut world, STRATEGY_1, 3);
    check_total_weight(&mut world, 3);
}

#[test]
fn vote_rejects_malformed_input() {
    let mut world = setup();

    vote_expect_error(&mut world, ALICE, &[STRATEGY_1, STRATEGY_2], &[1], "Array length mismatch");
    vote_expect_error(&mut world, ALICE, &[STRATEGY_1, STRATEGY_1], &[1, 1], "Duplicate strategy");
    vote_expect_error(&mut world, ALICE, &[UNKNOWN], &[1], "No eligible weight");
    vote_expect_error(&mut world, ALICE, &[STRATEGY_1], &[0], "No eligible weight");
    vote_expect_error(&mut world, CAROL, &[STRATEGY_1], &[1], "No voting power");
}

#[test]
fn vote_where_every_allocation_floors_to_zero_is_rejected() {
    let mut world = setup();
    register(&mut world, STRATEGY_3, BRIBE_3);

    // 2 units over three equal weights: floor(2 / 3) everywhere
    vote_expect_error(
        &mut world,
        BOB,
        &[STRATEGY_1, STRATEGY_2, STRATEGY_3],
        &[1, 1, 1],
        "Allocated weight is zero",
    );
}

#[test]
fn second_vote_in_same_epoch_is_rejected() {
    let mut world = setup();
    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);

    world
        .current_block()
        .block_timestamp(NEXT_EPOCH - 1);
    vote_expect_error(&mut world, ALICE, &[STRATEGY_2], &[1], "Already voted this epoch");
    world
        .tx()
        .from(ALICE)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .reset()
        .returns(ExpectError(4, "Already voted this epoch"))
        .run();

    world.current_block().block_timestamp(NEXT_EPOCH);
    vote(&mut world, ALICE, &[STRATEGY_2], &[1]);

    // the new vote replaced the old one
    check_strategy_weight(&mut world, STRATEGY_1, 0);
    check_strategy_weight(&mut world, STRATEGY_2, 3);
    check_bribe_balance(&mut world, BRIBE_1, ALICE, 0);
    check_bribe_balance(&mut world, BRIBE_2, ALICE, 3);
}

#[test]
fn reset_restores_pre_vote_state() {
    let mut world = setup();
    vote(&mut world, BOB, &[STRATEGY_1], &[1]);
    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);

    world.current_block().block_timestamp(NEXT_EPOCH);
    world
        .tx()
        .from(ALICE)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .reset()
        .run();

    check_strategy_weight(&mut world, STRATEGY_1, 2);
    check_total_weight(&mut world, 2);
    check_bribe_balance(&mut world, BRIBE_1, ALICE, 0);
    world
        .query()
        .to(BRIBE_1)
        .typed(BribeProxy)
        .total_supply()
        .returns(ExpectValue(2u64))
        .run();
    world
        .query()
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .used_weight(managed(ALICE.to_address()))
        .returns(ExpectValue(0u64))
        .run();

    let voted = world
        .query()
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .voted_strategies(managed(ALICE.to_address()))
        .returns(ReturnsResult)
        .run();
    assert!(voted.is_empty());
}

#[test]
fn last_voted_tracks_epoch_of_vote() {
    let mut world = setup();

    let before = world
        .query()
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .last_voted(managed(ALICE.to_address()))
        .returns(ReturnsResult)
        .run();
    assert_eq!(before.into_option(), None);

    world.current_block().block_timestamp(NEXT_EPOCH + 5);
    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);

    let after = world
        .query()
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .last_voted(managed(ALICE.to_address()))
        .returns(ReturnsResult)
        .run();
    assert_eq!(after.into_option(), Some(1));
}

#[test]
fn weights_stay_consistent_across_revotes() {
    let mut world = setup();
    register(&mut world, STRATEGY_3, BRIBE_3);

    vote(&mut world, ALICE, &[STRATEGY_1, STRATEGY_2], &[1, 2]);
    vote(&mut world, BOB, &[STRATEGY_2, STRATEGY_3], &[1, 1]);

    check_strategy_weight(&mut world, STRATEGY_1, 1);
    check_strategy_weight(&mut world, STRATEGY_2, 3);
    check_strategy_weight(&mut world, STRATEGY_3, 1);
    check_total_weight(&mut world, 5);

    world.current_block().block_timestamp(NEXT_EPOCH);
    vote(&mut world, ALICE, &[STRATEGY_3], &[1]);

    check_strategy_weight(&mut world, STRATEGY_1, 0);
    check_strategy_weight(&mut world, STRATEGY_2, 1);
    check_strategy_weight(&mut world, STRATEGY_3, 4);
    check_total_weight(&mut world, 5);
    check_bribe_balance(&mut world, BRIBE_3, ALICE, 3);
    check_bribe_balance(&mut world, BRIBE_3, BOB, 1);
}

// ── Revenue ──

#[test]
fn revenue_splits_by_strategy_weight() {
    let mut world = setup();
    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);
    vote(&mut world, BOB, &[STRATEGY_2], &[1]);

    notify_revenue(&mut world, 5_000);

    world
        .query()
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .index(token(REVENUE_ID))
        .returns(ExpectValue(BigUint::<StaticApi>::from(1_000u64) * PRECISION))
        .run();

    distribute(&mut world, STRATEGY_1, 3_000);
    distribute(&mut world, STRATEGY_2, 2_000);

    world
        .check_account(STRATEGY_1)
        .esdt_balance(REVENUE_TOKEN, 3_000u64);
    world
        .check_account(STRATEGY_2)
        .esdt_balance(REVENUE_TOKEN, 2_000u64);
}

#[test]
fn floored_split_votes_share_revenue_by_allocated_weight() {
    let mut world = setup();
    vote(&mut world, ALICE, &[STRATEGY_1, STRATEGY_2], &[60, 40]);
    vote(&mut world, BOB, &[STRATEGY_2], &[1]);

    // 1 + 1 from alice, 2 from bob; alice's third unit is lost to flooring
    check_total_weight(&mut world, 4);

    notify_revenue(&mut world, 5_000);
    distribute(&mut world, STRATEGY_1, 1_250);
    distribute(&mut world, STRATEGY_2, 3_750);
}

#[test]
fn distribute_is_idempotent() {
    let mut world = setup();
    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);
    notify_revenue(&mut world, 600);

    distribute(&mut world, STRATEGY_1, 600);
    distribute(&mut world, STRATEGY_1, 0);

    world
        .check_account(STRATEGY_1)
        .esdt_balance(REVENUE_TOKEN, 600u64);
}

#[test]
fn truncated_index_leaves_dust() {
    let mut world = setup();
    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);

    notify_revenue(&mut world, 1_000);

    check_claimable(&mut world, STRATEGY_1, 999);
    distribute(&mut world, STRATEGY_1, 999);
}

#[test]
fn distribute_many_pays_every_listed_strategy() {
    let mut world = setup();
    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);
    vote(&mut world, BOB, &[STRATEGY_2], &[1]);
    notify_revenue(&mut world, 5_000);

    world
        .tx()
        .from(CAROL)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .distribute_many(token(REVENUE_ID), strategy_list(&[STRATEGY_1, STRATEGY_2]))
        .returns(ExpectValue(5_000u64))
        .run();

    world
        .check_account(STRATEGY_2)
        .esdt_balance(REVENUE_TOKEN, 2_000u64);
}

#[test]
fn distribute_rejects_unknown_strategy() {
    let mut world = setup();

    world
        .tx()
        .from(CAROL)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .distribute(managed(UNKNOWN.to_address()), token(REVENUE_ID))
        .returns(ExpectError(4, "Invalid strategy"))
        .run();
}

#[test]
fn revenue_without_weight_goes_to_treasury() {
    let mut world = setup();

    notify_revenue(&mut world, 700);

    world
        .check_account(TREASURY)
        .esdt_balance(REVENUE_TOKEN, 700u64);
    world
        .query()
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .index(token(REVENUE_ID))
        .returns(ExpectValue(0u64))
        .run();
}

#[test]
fn weight_change_settles_accrual_first() {
    let mut world = setup();
    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);
    notify_revenue(&mut world, 3_000);

    // Bob joins after the first notification and only shares the second
    vote(&mut world, BOB, &[STRATEGY_1], &[1]);
    notify_revenue(&mut world, 5_000);

    check_claimable(&mut world, STRATEGY_1, 8_000);
    world
        .query()
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .supply_index(managed(STRATEGY_1.to_address()), token(REVENUE_ID))
        .returns(ExpectValue(BigUint::<StaticApi>::from(1_000u64) * PRECISION))
        .run();
}

#[test]
fn late_registration_starts_at_current_index() {
    let mut world = setup();
    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);
    notify_revenue(&mut world, 3_000);

    register(&mut world, STRATEGY_3, BRIBE_3);

    world
        .query()
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .supply_index(managed(STRATEGY_3.to_address()), token(REVENUE_ID))
        .returns(ExpectValue(BigUint::<StaticApi>::from(1_000u64) * PRECISION))
        .run();
    check_claimable(&mut world, STRATEGY_3, 0);
}

#[test]
fn only_revenue_source_notifies() {
    let mut world = setup();

    world
        .tx()
        .from(FUNDER)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .notify_revenue()
        .single_esdt(&token(REWARD_ID), 0, &BigUint::from(100u64))
        .returns(ExpectError(4, "Only revenue source"))
        .run();
}

// ── Strategy lifecycle ──

#[test]
fn register_validates_input() {
    let mut world = setup();

    world
        .tx()
        .from(ALICE)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .register_strategy(managed(STRATEGY_3.to_address()), managed(BRIBE_3.to_address()))
        .returns(ExpectError(4, "Only owner"))
        .run();
    world
        .tx()
        .from(OWNER)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .register_strategy(managed(STRATEGY_1.to_address()), managed(BRIBE_1.to_address()))
        .returns(ExpectError(4, "Strategy already registered"))
        .run();
    world
        .tx()
        .from(OWNER)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .register_strategy(ManagedAddress::<StaticApi>::zero(), managed(BRIBE_3.to_address()))
        .returns(ExpectError(4, "Invalid address"))
        .run();
}

#[test]
fn registry_is_capped() {
    let mut world = setup();

    // two strategies are registered by setup
    for i in 0..48u8 {
        world
            .tx()
            .from(OWNER)
            .to(VOTER)
            .typed(RevenueVoterProxy)
            .register_strategy(
                managed(Address::from([i + 1; 32])),
                managed(BRIBE_3.to_address()),
            )
            .run();
    }

    world
        .tx()
        .from(OWNER)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .register_strategy(managed(STRATEGY_3.to_address()), managed(BRIBE_3.to_address()))
        .returns(ExpectError(4, "Strategy cap reached"))
        .run();
}

#[test]
fn kill_flushes_pending_revenue_to_treasury() {
    let mut world = setup();
    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);
    notify_revenue(&mut world, 900);

    world
        .tx()
        .from(OWNER)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .kill_strategy(managed(STRATEGY_1.to_address()))
        .run();

    world
        .check_account(TREASURY)
        .esdt_balance(REVENUE_TOKEN, 900u64);

    // the dead strategy's weight still counts; its accrual is redirected
    notify_revenue(&mut world, 300);
    check_claimable(&mut world, STRATEGY_1, 0);
    distribute(&mut world, STRATEGY_1, 0);
    world
        .check_account(TREASURY)
        .esdt_balance(REVENUE_TOKEN, 1_200u64);

    vote_expect_error(&mut world, BOB, &[STRATEGY_1], &[1], "No eligible weight");
}

#[test]
fn kill_and_revive_require_matching_state() {
    let mut world = setup();

    world
        .tx()
        .from(OWNER)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .revive_strategy(managed(STRATEGY_1.to_address()))
        .returns(ExpectError(4, "Strategy already alive"))
        .run();
    world
        .tx()
        .from(OWNER)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .kill_strategy(managed(UNKNOWN.to_address()))
        .returns(ExpectError(4, "Invalid strategy"))
        .run();
    world
        .tx()
        .from(OWNER)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .kill_strategy(managed(STRATEGY_1.to_address()))
        .run();
    world
        .tx()
        .from(OWNER)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .kill_strategy(managed(STRATEGY_1.to_address()))
        .returns(ExpectError(4, "Strategy not alive"))
        .run();
}

#[test]
fn revived_strategy_earns_again() {
    let mut world = setup();
    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);

    world
        .tx()
        .from(OWNER)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .kill_strategy(managed(STRATEGY_1.to_address()))
        .run();
    notify_revenue(&mut world, 300);

    world
        .tx()
        .from(OWNER)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .revive_strategy(managed(STRATEGY_1.to_address()))
        .run();
    notify_revenue(&mut world, 600);

    check_claimable(&mut world, STRATEGY_1, 600);
    world
        .check_account(TREASURY)
        .esdt_balance(REVENUE_TOKEN, 300u64);

    let info = world
        .query()
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .strategy_info(managed(STRATEGY_1.to_address()))
        .returns(ReturnsResult)
        .run();
    assert!(info.alive);
    assert_eq!(info.weight, BigUint::from(3u64));
    assert_eq!(info.bribe, managed(BRIBE_1.to_address()));
}

// ── Delegation ──

#[test]
fn delegation_moves_power_to_delegate() {
    let mut world = setup();

    world
        .tx()
        .from(BOB)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .delegate(managed(ALICE.to_address()))
        .run();

    check_voting_power(&mut world, ALICE, 5);
    check_voting_power(&mut world, BOB, 0);

    let delegate = world
        .query()
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .delegate_of(managed(BOB.to_address()))
        .returns(ReturnsResult)
        .run();
    assert_eq!(delegate.into_option(), Some(managed(ALICE.to_address())));

    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);
    check_strategy_weight(&mut world, STRATEGY_1, 5);
    vote_expect_error(&mut world, BOB, &[STRATEGY_2], &[1], "No voting power");

    world.current_block().block_timestamp(NEXT_EPOCH);
    world
        .tx()
        .from(ALICE)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .reset()
        .run();
    undelegate(&mut world, BOB);

    check_voting_power(&mut world, ALICE, 3);
    check_voting_power(&mut world, BOB, 2);
}

#[test]
fn redelegation_moves_the_recorded_amount() {
    let mut world = setup();

    world
        .tx()
        .from(BOB)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .delegate(managed(ALICE.to_address()))
        .run();
    world
        .tx()
        .from(BOB)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .delegate(managed(CAROL.to_address()))
        .run();

    check_voting_power(&mut world, ALICE, 3);
    check_voting_power(&mut world, CAROL, 2);
}

#[test]
fn delegation_rejects_invalid_requests() {
    let mut world = setup();

    world
        .tx()
        .from(ALICE)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .delegate(managed(ALICE.to_address()))
        .returns(ExpectError(4, "Cannot delegate to self"))
        .run();
    world
        .tx()
        .from(CAROL)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .delegate(managed(ALICE.to_address()))
        .returns(ExpectError(4, "No voting power"))
        .run();
    world
        .tx()
        .from(CAROL)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .undelegate()
        .returns(ExpectError(4, "Not delegating"))
        .run();

    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);
    world
        .tx()
        .from(ALICE)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .delegate(managed(BOB.to_address()))
        .returns(ExpectError(4, "Reset votes before delegating"))
        .run();
}

#[test]
fn delegated_power_stays_with_delegate_while_voted() {
    let mut world = setup();
    delegate(&mut world, BOB, ALICE);
    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);
    check_total_weight(&mut world, 5);

    world
        .tx()
        .from(BOB)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .undelegate()
        .returns(ExpectError(4, "Delegate has committed this power"))
        .run();
    world
        .tx()
        .from(BOB)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .delegate(managed(CAROL.to_address()))
        .returns(ExpectError(4, "Delegate has committed this power"))
        .run();
    vote_expect_error(&mut world, BOB, &[STRATEGY_2], &[1], "No voting power");
    check_voting_power(&mut world, CAROL, 0);
    check_total_weight(&mut world, 5);

    // once alice pulls her votes the units are free to move
    world.current_block().block_timestamp(NEXT_EPOCH);
    world
        .tx()
        .from(ALICE)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .reset()
        .run();
    undelegate(&mut world, BOB);
    delegate(&mut world, BOB, CAROL);
    vote(&mut world, CAROL, &[STRATEGY_2], &[1]);

    check_strategy_weight(&mut world, STRATEGY_1, 0);
    check_strategy_weight(&mut world, STRATEGY_2, 2);
    check_total_weight(&mut world, 2);
    check_bribe_balance(&mut world, BRIBE_1, ALICE, 0);
    check_bribe_balance(&mut world, BRIBE_2, CAROL, 2);

    world.current_block().block_timestamp(NEXT_EPOCH + EPOCH_DURATION);
    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);
    check_total_weight(&mut world, 5);
}

#[test]
fn undelegate_allowed_when_floored_votes_fit_remaining_power() {
    let mut world = setup();
    register(&mut world, STRATEGY_3, BRIBE_3);
    delegate(&mut world, BOB, ALICE);

    // 5 units over three equal weights commits only 3
    vote(&mut world, ALICE, &[STRATEGY_1, STRATEGY_2, STRATEGY_3], &[1, 1, 1]);
    check_total_weight(&mut world, 3);

    undelegate(&mut world, BOB);
    vote(&mut world, BOB, &[STRATEGY_1], &[1]);

    check_voting_power(&mut world, ALICE, 3);
    check_strategy_weight(&mut world, STRATEGY_1, 3);
    check_total_weight(&mut world, 5);
}

// ── Governance ──

#[test]
fn pause_blocks_voting_only() {
    let mut world = setup();
    vote(&mut world, BOB, &[STRATEGY_1], &[1]);

    world
        .tx()
        .from(ALICE)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .pause()
        .returns(ExpectError(4, "Only owner or emergency council"))
        .run();
    world
        .tx()
        .from(COUNCIL)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .pause()
        .run();

    vote_expect_error(&mut world, ALICE, &[STRATEGY_1], &[1], "Voting is paused");
    world
        .tx()
        .from(ALICE)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .delegate(managed(BOB.to_address()))
        .returns(ExpectError(4, "Voting is paused"))
        .run();

    // revenue keeps flowing while paused
    notify_revenue(&mut world, 400);
    distribute(&mut world, STRATEGY_1, 400);

    world.current_block().block_timestamp(NEXT_EPOCH);
    world
        .tx()
        .from(BOB)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .reset()
        .run();

    world
        .tx()
        .from(OWNER)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .unpause()
        .run();
    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);
}

#[test]
fn role_setters_are_owner_only() {
    let mut world = setup();

    world
        .tx()
        .from(ALICE)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .set_revenue_source(managed(ALICE.to_address()))
        .returns(ExpectError(4, "Only owner"))
        .run();
    world
        .tx()
        .from(OWNER)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .set_emergency_council(ManagedAddress::<StaticApi>::zero())
        .returns(ExpectError(4, "Invalid address"))
        .run();

    world
        .tx()
        .from(OWNER)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .set_owner(managed(CAROL.to_address()))
        .run();
    world
        .query()
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .owner()
        .returns(ExpectValue(managed(CAROL.to_address())))
        .run();
    world
        .tx()
        .from(OWNER)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .set_revenue_source(managed(OWNER.to_address()))
        .returns(ExpectError(4, "Only owner"))
        .run();
}

// ── Incentives ──

#[test]
fn voters_claim_bribe_rewards_through_voter() {
    let mut world = setup();
    vote(&mut world, ALICE, &[STRATEGY_1], &[1]);
    vote(&mut world, BOB, &[STRATEGY_1], &[1]);

    world
        .tx()
        .from(FUNDER)
        .to(BRIBE_1)
        .typed(BribeProxy)
        .notify_reward()
        .single_esdt(&token(REWARD_ID), 0, &BigUint::from(DURATION * 1_000))
        .run();

    world.current_block().block_timestamp(START + DURATION);

    world
        .tx()
        .from(ALICE)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .claim_incentives(strategy_list(&[STRATEGY_1, STRATEGY_2]))
        .run();

    world
        .check_account(ALICE)
        .esdt_balance(REWARD_TOKEN, 362_880_000u64);

    world
        .tx()
        .from(BOB)
        .to(VOTER)
        .typed(RevenueVoterProxy)
        .claim_incentives(strategy_list(&[UNKNOWN]))
        .returns(ExpectError(4, "Invalid strategy"))
        .run();
}
