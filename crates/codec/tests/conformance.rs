use gametraits_codec::conformance::{self, all_subsets};
use gametraits_codec::harness::canonical_sample;
use gametraits_codec::{CodecError, CodecStrategy, DecodePolicy, Trait, TraitSet};

fn sorted_tags(data: &[u8]) -> Vec<String> {
    let mut tags: Vec<String> = serde_json::from_slice(data).unwrap();
    tags.sort();
    tags
}

fn strict() -> impl Iterator<Item = CodecStrategy> {
    CodecStrategy::ALL
        .into_iter()
        .filter(|s| s.policy() == DecodePolicy::Strict)
}

fn permissive() -> impl Iterator<Item = CodecStrategy> {
    CodecStrategy::ALL
        .into_iter()
        .filter(|s| s.policy() == DecodePolicy::Permissive)
}

#[test]
fn test_round_trip_every_subset() {
    for strategy in CodecStrategy::ALL {
        for subset in all_subsets() {
            let encoded = strategy.encode(&subset).unwrap();
            assert_eq!(strategy.decode(&encoded).unwrap(), subset, "{strategy}");
        }
    }
}

#[test]
fn test_canonical_sample_example() {
    let sample = canonical_sample();
    let mut expected = vec!["can_be_bought", "has_demo", "p_linux", "p_osx", "p_windows"];
    expected.sort();

    for strategy in CodecStrategy::ALL {
        let encoded = strategy.encode(&sample).unwrap();
        assert_eq!(sorted_tags(&encoded), expected, "{strategy}");

        let decoded = strategy.decode(&encoded).unwrap();
        assert!(decoded.get(Trait::PlatformWindows));
        assert!(decoded.get(Trait::PlatformLinux));
        assert!(decoded.get(Trait::PlatformOsx));
        assert!(decoded.get(Trait::HasDemo));
        assert!(decoded.get(Trait::CanBeBought));
        assert!(!decoded.get(Trait::PlatformAndroid));
        assert!(!decoded.get(Trait::InPressSystem));
    }
}

#[test]
fn test_omission_gives_empty_array() {
    for strategy in CodecStrategy::ALL {
        assert_eq!(strategy.encode(&TraitSet::default()).unwrap(), b"[]");
    }
}

#[test]
fn test_decode_twice_is_idempotent() {
    let data = br#"["p_osx","has_demo"]"#;
    for strategy in CodecStrategy::ALL {
        let mut once = TraitSet::new();
        strategy.decode_into(data, &mut once).unwrap();
        let mut twice = once;
        strategy.decode_into(data, &mut twice).unwrap();
        assert_eq!(once, twice, "{strategy}");
    }
}

#[test]
fn test_unknown_tags_are_ignored() {
    for strategy in CodecStrategy::ALL {
        let decoded = strategy.decode(br#"["not_a_real_tag"]"#).unwrap();
        assert!(decoded.is_empty(), "{strategy}");

        let decoded = strategy
            .decode(br#"["not_a_real_tag","p_android"]"#)
            .unwrap();
        assert_eq!(
            decoded,
            TraitSet::from_traits([Trait::PlatformAndroid]),
            "{strategy}"
        );
    }
}

#[test]
fn test_decode_merges_instead_of_replacing() {
    for strategy in CodecStrategy::ALL {
        let mut set = TraitSet::from_traits([Trait::PlatformWindows]);
        strategy.decode_into(br#"["has_demo"]"#, &mut set).unwrap();
        assert!(set.get(Trait::PlatformWindows), "{strategy}");
        assert!(set.get(Trait::HasDemo), "{strategy}");
        assert_eq!(set.len(), 2);

        strategy.decode_into(b"[]", &mut set).unwrap();
        assert_eq!(set.len(), 2, "{strategy}");
    }
}

#[test]
fn test_strict_strategies_reject_malformed_input() {
    let inputs: [&[u8]; 6] = [
        br#"["p_windows""#,
        br#"["p_windows]"#,
        br#"["p_windows",]"#,
        b"p_windows",
        b"",
        br#"{"p_windows":true}"#,
    ];
    for strategy in strict() {
        for input in inputs {
            let mut set = TraitSet::from_traits([Trait::HasDemo]);
            let result = strategy.decode_into(input, &mut set);
            assert!(
                matches!(result, Err(CodecError::MalformedInput(_))),
                "{strategy} accepted {:?}",
                String::from_utf8_lossy(input)
            );
            assert_eq!(set, TraitSet::from_traits([Trait::HasDemo]), "{strategy}");
        }
    }
}

#[test]
fn test_permissive_strategies_tolerate_missing_bracket() {
    for strategy in permissive() {
        let decoded = strategy.decode(br#"["p_windows""#).unwrap();
        assert_eq!(decoded, TraitSet::from_traits([Trait::PlatformWindows]));

        let decoded = strategy.decode(br#"["p_windows",]"#).unwrap();
        assert_eq!(decoded, TraitSet::from_traits([Trait::PlatformWindows]));
    }
}

#[test]
fn test_permissive_strategies_reject_unterminated_string() {
    for strategy in permissive() {
        assert!(
            matches!(
                strategy.decode(br#"["p_windows]"#),
                Err(CodecError::MalformedInput(_))
            ),
            "{strategy}"
        );
    }
}

#[test]
fn test_only_strict_strategies_unescape() {
    let data = br#"["p\u005fosx"]"#;
    for strategy in strict() {
        assert_eq!(
            strategy.decode(data).unwrap(),
            TraitSet::from_traits([Trait::PlatformOsx]),
            "{strategy}"
        );
    }
    for strategy in permissive() {
        assert!(strategy.decode(data).unwrap().is_empty(), "{strategy}");
    }
}

#[test]
fn test_escaped_quote_in_unknown_tag() {
    let inputs: [&[u8]; 2] = [br#"["x\"]","p_osx"]"#, br#"["x\"y","p_osx"]"#];
    for strategy in CodecStrategy::ALL {
        for input in inputs {
            assert_eq!(
                strategy.decode(input).unwrap(),
                TraitSet::from_traits([Trait::PlatformOsx]),
                "{strategy} on {:?}",
                String::from_utf8_lossy(input)
            );
        }
    }
}

#[test]
fn test_concurrent_decoding_shares_the_table() {
    let encoded = CodecStrategy::HandRolled.encode(&canonical_sample()).unwrap();
    std::thread::scope(|scope| {
        for strategy in CodecStrategy::ALL {
            let encoded = &encoded;
            scope.spawn(move || {
                for _ in 0..1_000 {
                    assert_eq!(strategy.decode(encoded).unwrap(), canonical_sample());
                }
            });
        }
    });
}

#[test]
fn test_conformance_runner_is_clean() {
    let reports = conformance::check_all(&CodecStrategy::ALL);
    assert!(reports.iter().all(|r| r.is_ok()));
}
