// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use proptest::prelude::*;
use rustc_hash::FxHashSet;

use crate::settle::{SelectionPolicy, SettlementEngine};
use crate::tests::determinism_tests::{genesis, ledger_of, random_batch, Pcg32};
use crate::tests::helpers::{coins, spend};
use crate::types::amount::Amount;
use crate::validate::TxValidator;

fn policy() -> impl Strategy<Value = SelectionPolicy> {
    prop_oneof![Just(SelectionPolicy::FirstFit), Just(SelectionPolicy::MaxFee)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_value_is_conserved(seed in any::<u64>(), len in 0usize..20, policy in policy()) {
        let genesis = genesis(5);
        let ledger = ledger_of(&genesis);
        let batch = random_batch(&mut Pcg32::new(seed), &genesis, len);

        let mut engine = SettlementEngine::new(&ledger);
        let settlement = engine.settle(&batch, policy).unwrap();

        let before = ledger.total_value().unwrap();
        let after = engine.ledger().total_value().unwrap();
        prop_assert!(!settlement.total_fee.is_negative());
        prop_assert_eq!(before.checked_sub(after), Some(settlement.total_fee));

        let summed = Amount::checked_sum(settlement.accepted.iter().map(|a| a.fee));
        prop_assert_eq!(summed, Some(settlement.total_fee));
    }

    #[test]
    fn prop_accepted_replays_in_order(seed in any::<u64>(), len in 0usize..20, policy in policy()) {
        let genesis = genesis(5);
        let ledger = ledger_of(&genesis);
        let batch = random_batch(&mut Pcg32::new(seed), &genesis, len);

        let mut engine = SettlementEngine::new(&ledger);
        let settlement = engine.settle(&batch, policy).unwrap();

        // Every accepted transaction was valid against the ledger at its turn,
        // with the reported fee, and no output was consumed twice.
        let validator = TxValidator::new();
        let mut replay = ledger.clone();
        let mut consumed = FxHashSet::default();
        for accepted in &settlement.accepted {
            prop_assert_eq!(&batch[accepted.batch_index], &accepted.tx);
            prop_assert_eq!(validator.check(&accepted.tx, &replay), Ok(accepted.fee));
            for input in accepted.tx.inputs() {
                prop_assert!(consumed.insert(input.prev));
            }
            replay.commit(&accepted.tx).unwrap();
        }
        prop_assert_eq!(&replay, engine.ledger());
    }

    #[test]
    fn prop_verdicts_are_idempotent(seed in any::<u64>(), len in 1usize..12) {
        let genesis = genesis(5);
        let ledger = ledger_of(&genesis);
        let batch = random_batch(&mut Pcg32::new(seed), &genesis, len);

        let validator = TxValidator::new();
        for tx in &batch {
            let first = validator.check(tx, &ledger);
            prop_assert_eq!(validator.check(tx, &ledger), first);
        }
    }

    #[test]
    fn prop_policies_agree_without_conflicts(
        spends in prop::collection::vec((any::<bool>(), 0i64..25), 0..8),
    ) {
        let genesis = genesis(spends.len() as u8);
        let ledger = ledger_of(&genesis);

        // One candidate per genesis output: no two candidates compete.
        let batch: Vec<_> = genesis
            .iter()
            .zip(&spends)
            .map(|(&(prev, _, owner), &(honest, value))| {
                let signer = if honest { owner } else { owner + 10 };
                spend(&[(prev, signer)], &[(value, 1)])
            })
            .collect();

        let mut first_fit = SettlementEngine::new(&ledger);
        let mut max_fee = SettlementEngine::new(&ledger);
        let a = first_fit.settle(&batch, SelectionPolicy::FirstFit).unwrap();
        let b = max_fee.settle(&batch, SelectionPolicy::MaxFee).unwrap();

        let mut a_hashes = a.hashes();
        let mut b_hashes = b.hashes();
        a_hashes.sort();
        b_hashes.sort();
        prop_assert_eq!(a_hashes, b_hashes);
        prop_assert_eq!(a.total_fee, b.total_fee);
        prop_assert_eq!(first_fit.ledger(), max_fee.ledger());

        let expected = spends.iter().filter(|&&(honest, value)| honest && coins(value) <= coins(20)).count();
        prop_assert_eq!(a.accepted.len(), expected);
    }
}
