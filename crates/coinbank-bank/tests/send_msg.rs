use std::collections::{BTreeMap, HashSet};

use coinbank_bank::{
    Address, BankError, Coin, Coins, HasRequiredAuthorities, Input, Msg, Output, SendMsg, Side,
};
use coinbank_types::coins;
use proptest::prelude::*;

fn addr(byte: u8) -> Address {
    Address::new(vec![byte])
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn simple_transfer_is_valid() {
    let msg = SendMsg::new(
        vec![Input::new(addr(0xa), coins![("atom", 123)])],
        vec![Output::new(addr(0xb), coins![("atom", 123)])],
    );
    assert!(msg.validate_basic().is_ok());
}

#[test]
fn extra_denomination_on_one_side_is_unbalanced() {
    let msg = SendMsg::new(
        vec![Input::new(addr(0xa), coins![("atom", 123), ("eth", 20)])],
        vec![Output::new(addr(0xb), coins![("atom", 124)])],
    );
    let err = msg.validate_basic().unwrap_err();
    assert_eq!(err.error_code(), "UNBALANCED_TRANSFER");
    assert_eq!(err.position(), None);
}

#[test]
fn unsorted_bundle_rejected() {
    let err = coins![("eth", 1), ("atom", 1)].validate().unwrap_err();
    assert!(matches!(err, BankError::UnsortedOrDuplicateDenomination { .. }));
}

#[test]
fn unsorted_bundle_reports_ordering_whatever_the_amounts() {
    for bundle in [coins![("eth", -1), ("atom", 1)], coins![("eth", 0), ("atom", 1)]] {
        let err = bundle.validate().unwrap_err();
        assert!(matches!(err, BankError::UnsortedOrDuplicateDenomination { .. }));
    }

    let msg = SendMsg::new(
        vec![Input::new(addr(0xa), coins![("eth", 0), ("atom", 1)])],
        vec![Output::new(addr(0xb), coins![("atom", 1)])],
    );
    let err = msg.validate_basic().unwrap_err();
    assert_eq!(err.error_code(), "UNSORTED_OR_DUPLICATE_DENOMINATION");
    assert_eq!(err.position(), Some((Side::Input, 0)));
}

#[test]
fn negative_bundle_rejected() {
    let err = coins![("eth", -34)].validate().unwrap_err();
    assert!(matches!(err, BankError::NonPositiveAmount { amount: -34, .. }));
}

#[test]
fn balanced_totals_past_amount_range_validate() {
    let msg = SendMsg::new(
        vec![
            Input::new(addr(0xa), coins![("atom", i64::MAX)]),
            Input::new(addr(0xb), coins![("atom", 1)]),
        ],
        vec![
            Output::new(addr(0xc), coins![("atom", i64::MAX)]),
            Output::new(addr(0xd), coins![("atom", 1)]),
        ],
    );
    assert!(msg.validate_basic().is_ok());
}

#[test]
fn empty_owner_rejected_inside_message() {
    let msg = SendMsg::new(
        vec![Input::new(Address::default(), coins![("atom", 123)])],
        vec![Output::new(addr(0xb), coins![("atom", 123)])],
    );
    let err = msg.validate_basic().unwrap_err();
    assert_eq!(err.root_cause(), &BankError::EmptyIdentity);
    assert_eq!(err.position(), Some((Side::Input, 0)));
}

#[test]
fn multi_denomination_conservation_across_inputs() {
    let a = addr(0xa);
    let msg = SendMsg::new(
        vec![
            Input::new(a.clone(), coins![("atom", 123)]),
            Input::new(a.clone(), coins![("eth", 123)]),
        ],
        vec![Output::new(addr(0xb), coins![("atom", 123), ("eth", 123)])],
    );
    assert!(msg.validate_basic().is_ok());
    assert_eq!(msg.required_authorities(), vec![a]);
}

#[test]
fn decoded_message_round_trip_through_msg() {
    let json = r#"{
        "type": "send",
        "inputs": [{"address": "0A", "coins": [{"denom": "atom", "amount": 7}]}],
        "outputs": [
            {"address": "0B", "coins": [{"denom": "atom", "amount": 3}]},
            {"address": "0C", "coins": [{"denom": "atom", "amount": 4}]}
        ]
    }"#;
    let msg: Msg = serde_json::from_str(json).unwrap();
    assert!(msg.validate_basic().is_ok());
    assert_eq!(msg.required_authorities(), vec![addr(0xa)]);
}

#[test]
fn bad_address_fails_decoding() {
    let json = r#"{"type":"send","inputs":[{"address":"xyz","coins":[]}],"outputs":[]}"#;
    assert!(serde_json::from_str::<Msg>(json).is_err());
}

// ============================================================================
// Properties
// ============================================================================

const DENOMS: &[&str] = &["atom", "btc", "eth", "steak", "usd"];

fn any_denom() -> impl Strategy<Value = String> {
    prop::sample::select(DENOMS).prop_map(str::to_string)
}

fn any_bundle() -> impl Strategy<Value = Coins> {
    prop::collection::vec((any_denom(), -5i64..50), 0..5)
        .prop_map(|entries| Coins::new(entries.into_iter().map(|(d, a)| Coin::new(d, a)).collect()))
}

fn canonical_bundle() -> impl Strategy<Value = Coins> {
    prop::collection::btree_map(any_denom(), 1i64..1_000, 1..4).prop_map(|map: BTreeMap<String, i64>| {
        Coins::new(map.into_iter().map(|(d, a)| Coin::new(d, a)).collect())
    })
}

fn owner() -> impl Strategy<Value = Address> {
    (1u8..6).prop_map(addr)
}

fn inputs() -> impl Strategy<Value = Vec<Input>> {
    prop::collection::vec(
        (owner(), canonical_bundle()).prop_map(|(o, c)| Input::new(o, c)),
        1..6,
    )
}

/// A conserving message: every input bundle is credited back to some owner
fn balanced_msg() -> impl Strategy<Value = SendMsg> {
    (inputs(), owner()).prop_map(|(inputs, to)| {
        let outputs = inputs
            .iter()
            .rev()
            .map(|input| Output::new(to.clone(), input.coins.clone()))
            .collect();
        SendMsg::new(inputs, outputs)
    })
}

/// Any message with structurally valid endpoints, balanced or not
fn any_msg() -> impl Strategy<Value = SendMsg> {
    let outputs = prop::collection::vec(
        (owner(), canonical_bundle()).prop_map(|(o, c)| Output::new(o, c)),
        1..6,
    );
    prop_oneof![balanced_msg(), (inputs(), outputs).prop_map(|(i, o)| SendMsg::new(i, o))]
}

proptest! {
    #[test]
    fn bundle_valid_iff_canonical(coins in any_bundle()) {
        let entries = coins.as_slice();
        let canonical = !entries.is_empty()
            && entries.iter().all(|c| c.amount > 0)
            && entries.windows(2).all(|w| w[0].denom < w[1].denom);
        prop_assert_eq!(coins.validate().is_ok(), canonical);
    }

    #[test]
    fn balanced_messages_validate(msg in balanced_msg()) {
        prop_assert!(msg.validate_basic().is_ok());
    }

    #[test]
    fn extra_output_unbalances(msg in balanced_msg(), extra in canonical_bundle()) {
        let mut msg = msg;
        msg.outputs.push(Output::new(addr(0xee), extra));
        let err = msg.validate_basic().unwrap_err();
        prop_assert_eq!(err.error_code(), "UNBALANCED_TRANSFER");
    }

    #[test]
    fn verdict_ignores_endpoint_order(
        (msg, shuffled_in, shuffled_out) in any_msg().prop_flat_map(|msg| {
            let ins = Just(msg.inputs.clone()).prop_shuffle();
            let outs = Just(msg.outputs.clone()).prop_shuffle();
            (Just(msg), ins, outs)
        })
    ) {
        let permuted = SendMsg::new(shuffled_in, shuffled_out);
        prop_assert_eq!(msg.validate_basic(), permuted.validate_basic());
    }

    #[test]
    fn required_authorities_dedup_in_order(msg in any_msg()) {
        let first = msg.required_authorities();
        prop_assert_eq!(&first, &msg.required_authorities());

        let unique: HashSet<_> = first.iter().collect();
        prop_assert_eq!(unique.len(), first.len());

        let mut expected = Vec::new();
        for input in &msg.inputs {
            if !expected.contains(&input.address) {
                expected.push(input.address.clone());
            }
        }
        prop_assert_eq!(first, expected);
    }
}
