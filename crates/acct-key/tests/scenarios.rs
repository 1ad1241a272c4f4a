use acct_key::{
    account_key, account_name, canonicalize, derive_key, AccountKeys, AcctError, DigestAlgorithm,
    KeyConfig, PairBlock,
};

const SCENARIO_KEY: &str = "1f32646e6b265766a13c55cdb7896922";

#[test]
fn input_order_does_not_change_the_key() {
    let first = derive_key(r#"{"currency":"USD","ledger":"main"}"#).expect("first");
    let second = derive_key(r#"{"ledger":"main","currency":"USD"}"#).expect("second");
    assert_eq!(first, second);
    assert_eq!(first.as_str(), SCENARIO_KEY);
}

#[test]
fn account_name_sorts_names_ascending() {
    let text = canonicalize([("ledger", "main"), ("currency", "USD")]);
    assert_eq!(text.as_str(), r#"{"currency":"USD","ledger":"main"}"#);
}

#[test]
fn duplicate_pairs_keep_the_last_value() {
    assert_eq!(
        canonicalize([("a", "1"), ("a", "2")]),
        canonicalize([("a", "2")])
    );
    assert_eq!(
        derive_key(r#"{"a":"1","a":"2"}"#).expect("key").as_str(),
        "4c4de1409294f3736c68d84e91377fee"
    );
}

#[test]
fn malformed_input_is_rejected() {
    match derive_key("{not valid}") {
        Err(AcctError::MalformedInput(info)) => assert_eq!(info.code, "acct.malformed_json"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn name_and_key_paths_agree() {
    let keys = AccountKeys::default();
    let positions = ["region", "eu\u{e9}", "ledger", "main", "currency", "USD"];
    let block = PairBlock::new(&positions).expect("block");
    let name = account_name(&keys, &block).expect("name");
    let via_text = account_key(&keys, name.as_bytes()).expect("key");
    let direct = keys.key_for_text(&canonicalize(block.pairs()));
    assert_eq!(via_text, direct.as_str());
}

#[test]
fn canonical_text_survives_reparsing() {
    let text = canonicalize([("k", "quote\" slash\\ tab\t ctl\u{1} é")]);
    let keys = AccountKeys::default();
    assert_eq!(keys.normalize_name(text.as_str()).expect("reparse"), text);
}

#[test]
fn non_ascii_values_hash_their_utf8_bytes() {
    assert_eq!(
        derive_key(r#"{"region":"eué"}"#).expect("key").as_str(),
        "655544ddd5994557ff183cc8dbadbab8"
    );
}

#[test]
fn configured_algorithm_is_applied() {
    let config = KeyConfig {
        algorithm: "sha256-128".into(),
        ..KeyConfig::default()
    };
    let keys = AccountKeys::from_config(&config).expect("keys");
    assert_eq!(keys.algorithm(), DigestAlgorithm::Sha256Truncated);
    assert_eq!(
        keys.derive_key(r#"{"ledger":"main","currency":"USD"}"#)
            .expect("key")
            .as_str(),
        "d3d80465e583c593c6a612f1527f28be"
    );
}

#[test]
fn unknown_algorithm_fails_at_construction() {
    let config = KeyConfig {
        algorithm: "whirlpool".into(),
        ..KeyConfig::default()
    };
    assert!(matches!(
        AccountKeys::from_config(&config),
        Err(AcctError::InternalUnavailable(_))
    ));
}

#[test]
fn verify_compares_against_stored_key() {
    let keys = AccountKeys::default();
    let stored = acct_key::AccountKey::parse(SCENARIO_KEY).expect("stored");
    assert!(keys
        .verify(r#"{"ledger":"main","currency":"USD"}"#, &stored)
        .expect("verify"));
    assert!(!keys
        .verify(r#"{"ledger":"side","currency":"USD"}"#, &stored)
        .expect("verify"));
}

#[test]
fn config_parses_from_json_with_defaults() {
    let config: KeyConfig = serde_json::from_str(r#"{"duplicates":"reject"}"#).expect("config");
    assert_eq!(config.algorithm, "md5");
    assert_eq!(config.duplicates, acct_key::DuplicatePolicy::Reject);
}
