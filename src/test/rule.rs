use {
    super::tables,
    crate::{Error, RuleTable, RULE_GEN_CUTOFF},
    rand::{rngs::mock::StepRng, rngs::StdRng, SeedableRng},
};

/// Every generated table pairs `p·0` and `p·1` to distinct outputs, which is
/// what makes the backward chain deterministic.
#[test]
fn generated_tables_are_left_reversible() {
    let mut rng = StdRng::seed_from_u64(42);
    for k in [1, 3, 5, 7, 9] {
        let table = RuleTable::random(k, &mut rng).unwrap();
        assert_eq!(table.k(), k);
        assert_eq!(table.output_bits().len(), 1 << k);
        for prefix in 0..1usize << (k - 1) {
            assert_ne!(
                table.output(prefix << 1),
                table.output((prefix << 1) | 1),
                "prefix {prefix} repeats an output for k={k}"
            );
        }
    }
}

#[test]
fn neighborhood_size_must_be_odd_and_positive() {
    let mut rng = StdRng::seed_from_u64(42);
    assert!(matches!(
        RuleTable::random(4, &mut rng),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        RuleTable::random(0, &mut rng),
        Err(Error::InvalidArgument(_))
    ));
}

/// Z_right of the pinned reference tables, computed by hand from the
/// distinct-suffix counts.
#[test]
fn z_right_reference_values() {
    let z = |k, bits: &[u8]| {
        RuleTable::from_output_bits(k, bits.to_vec())
            .unwrap()
            .z_right()
    };
    assert_eq!(z(3, &tables::K3_TABLE), 0.5);
    assert_eq!(z(5, &tables::K5_TABLE), 0.5);
    assert_eq!(z(5, &tables::FRAGILE_TABLE), 0.75);
    assert_eq!(z(7, &tables::K7_TABLE), 0.5625);
}

#[test]
fn reversible_generation_passes_the_confusion_gate() {
    let mut rng = StdRng::seed_from_u64(7);
    for k in [3, 5, 7] {
        let table = RuleTable::random_reversible(k, &mut rng).unwrap();
        assert!(table.z_right() >= 0.5);
    }

    let table = RuleTable::random_reversible_seeded(5, 42).unwrap();
    assert!(table.z_right() >= 0.5);
    // Same seed, same table.
    assert_eq!(table, RuleTable::random_reversible_seeded(5, 42).unwrap());
}

/// An RNG that always orients pairs the same way yields the table
/// `R(x) = last bit of x`, whose Z_right is 0, so generation must exhaust
/// its attempt budget.
#[test]
fn generation_gives_up_after_the_cutoff() {
    let mut rng = StepRng::new(0, 0);
    assert!(matches!(
        RuleTable::random_reversible(7, &mut rng),
        Err(Error::RuleGenExhausted(RULE_GEN_CUTOFF))
    ));
}

#[test]
fn raw_tables_are_validated() {
    // Equal outputs within a pair break left-reversibility.
    assert!(matches!(
        RuleTable::from_output_bits(3, vec![0, 0, 1, 0, 1, 0, 0, 1]),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        RuleTable::from_output_bits(3, vec![0, 1, 1, 0]),
        Err(Error::LengthMismatch { left: 4, right: 8 })
    ));
    assert!(matches!(
        RuleTable::from_output_bits(3, vec![0, 1, 1, 0, 2, 0, 0, 1]),
        Err(Error::NonBinary(2))
    ));

    let table = RuleTable::from_output_bits(3, tables::K3_TABLE.to_vec()).unwrap();
    assert_eq!(table.output_bits(), tables::K3_TABLE);
}
