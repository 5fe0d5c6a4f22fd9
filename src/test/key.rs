use {
    super::tables,
    crate::{Error, Key, RuleTable},
    std::fs,
};

#[test]
fn save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key.shared");

    let rules = RuleTable::random_reversible_seeded(5, 42).unwrap();
    let key = Key::new(rules, 3).unwrap();
    key.save(&path).unwrap();

    let loaded = Key::load(&path).unwrap();
    assert_eq!(loaded, key);
    assert_eq!(loaded.rules().output_bits(), key.rules().output_bits());
    assert_eq!(loaded.rules().z_right(), key.rules().z_right());
}

#[test]
fn file_format_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key.shared");

    let rules = RuleTable::from_output_bits(3, tables::K3_TABLE.to_vec()).unwrap();
    Key::new(rules, 2).unwrap().save(&path).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "# k ::: 3\n# T ::: 2\n# R ::: 1 0 1 0 1 0 0 1\n"
    );
}

/// Parsing tolerates blank lines, extra whitespace, and missing `#`
/// prefixes.
#[test]
fn parsing_is_whitespace_tolerant() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key.shared");

    fs::write(
        &path,
        "\n\n#   k  :::   3\nT ::: 2\n  # R :::  1 0 1 0 1 0 0 1  \n",
    )
    .unwrap();

    let key = Key::load(&path).unwrap();
    assert_eq!(key.k(), 3);
    assert_eq!(key.steps(), 2);
    assert_eq!(key.rules().output_bits(), tables::K3_TABLE);
}

#[test]
fn malformed_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let load = |name: &str, text: &str| {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        Key::load(&path)
    };

    assert!(matches!(
        load("empty", ""),
        Err(Error::MalformedKey(_))
    ));
    assert!(matches!(
        load("no-steps", "# k ::: 3\n"),
        Err(Error::MalformedKey(_))
    ));
    assert!(matches!(
        load("bad-tag", "# q ::: 3\n# T ::: 2\n# R ::: 1 0 1 0 1 0 0 1\n"),
        Err(Error::MalformedKey(_))
    ));
    assert!(matches!(
        load("bad-k", "# k ::: three\n# T ::: 2\n# R ::: 1 0 1 0 1 0 0 1\n"),
        Err(Error::MalformedKey(_))
    ));
    // The right number of bits, but a pair with equal outputs.
    assert!(matches!(
        load("no-pair", "# k ::: 3\n# T ::: 2\n# R ::: 1 1 1 0 1 0 0 1\n"),
        Err(Error::MalformedKey(_))
    ));
    assert!(matches!(
        load("short-table", "# k ::: 3\n# T ::: 2\n# R ::: 1 0\n"),
        Err(Error::MalformedKey(_))
    ));
    assert!(matches!(
        load("zero-steps", "# k ::: 3\n# T ::: 0\n# R ::: 1 0 1 0 1 0 0 1\n"),
        Err(Error::InvalidArgument(_))
    ));

    assert!(matches!(
        Key::load(dir.path().join("nothing-here")),
        Err(Error::MissingFile(_))
    ));
}

#[test]
fn generation_validates_its_arguments() {
    let key = Key::generate(5, 3, Some(42)).unwrap();
    assert_eq!(key.k(), 5);
    assert_eq!(key.steps(), 3);
    assert!(key.rules().z_right() >= 0.5);

    assert!(matches!(
        Key::generate(6, 3, Some(42)),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        Key::generate(5, 0, Some(42)),
        Err(Error::InvalidArgument(_))
    ));
}
