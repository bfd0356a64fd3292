//! Integration tests for propguard-core.

use std::sync::Arc;
use std::thread;

use propguard_core::prelude::*;

#[derive(Debug)]
struct Ref(&'static str);

impl DeferredReference for Ref {
    fn describe(&self) -> String {
        format!("Ref({})", self.0)
    }
}

fn every_validator() -> Vec<Validator> {
    Validator::ALL_NAMES
        .iter()
        .map(|name| {
            let bounds = (*name == "integer_range").then_some((1, 10));
            Validator::named(name, bounds).unwrap()
        })
        .collect()
}

fn sample_inputs() -> Vec<Value> {
    vec![
        Value::Null,
        Value::from(true),
        Value::from(false),
        Value::from(-2),
        Value::from(-1),
        Value::from(0),
        Value::from(1),
        Value::from(5),
        Value::from(10),
        Value::from(65_535),
        Value::from(65_536),
        Value::from(2.5),
        Value::from("0"),
        Value::from("1"),
        Value::from("True"),
        Value::from("false"),
        Value::from("-7"),
        Value::from("abc"),
        Value::from("AB"),
        Value::from("my.bucket-01"),
        Value::from("base64"),
        Value::from("Active"),
        Value::from("/"),
        Value::from("/team/"),
        Value::from("deploy-role@corp"),
        Value::from("x".repeat(64)),
        Value::from("x".repeat(65)),
        Value::from("x".repeat(129)),
        Value::from(vec![Value::from(1)]),
        Value::deferred(Ref("Port")),
    ]
}

#[test]
fn every_validator_is_idempotent_on_accepted_values() {
    for validator in every_validator() {
        for input in sample_inputs() {
            let Ok(first) = validator.validate(&input) else {
                continue;
            };
            let second = validator
                .validate(&first)
                .unwrap_or_else(|e| panic!("{validator} rejected its own output {first}: {e}"));
            assert_eq!(first, second, "{validator} on {input}");
        }
    }
}

#[test]
fn pass_through_validators_return_the_input() {
    for validator in every_validator() {
        if validator == Validator::Boolean {
            continue;
        }
        for input in sample_inputs() {
            if let Ok(out) = validator.validate(&input) {
                assert_eq!(out, input, "{validator} transformed {input}");
            }
        }
    }
}

#[test]
fn boolean_normalizes_to_canonical_strings() {
    let outputs: Vec<Value> = sample_inputs()
        .iter()
        .filter_map(|v| boolean(v).ok())
        .collect();
    assert!(!outputs.is_empty());
    for out in outputs {
        assert!(out == Value::from("true") || out == Value::from("false"));
    }
}

#[test]
fn network_port_passes_any_deferred_reference() {
    let reference = Value::deferred(Ref("NotEvenANumber"));
    let out = network_port(&reference).unwrap();
    assert!(out.is_deferred());
    assert_eq!(out, reference);
}

#[test]
fn other_validators_do_not_special_case_deferred_values() {
    let reference = Value::deferred(Ref("Name"));
    assert!(integer(&reference).is_err());
    assert!(s3_bucket_name(&reference).is_err());
    assert!(iam_role_name(&reference).is_err());
}

#[test]
fn role_and_group_length_messages_name_their_own_limits() {
    let role = iam_role_name(&Value::from("x".repeat(65))).unwrap_err();
    let group = iam_group_name(&Value::from("x".repeat(129))).unwrap_err();
    assert!(role.to_string().contains("64"), "{role}");
    assert!(!role.to_string().contains("128"), "{role}");
    assert!(group.to_string().contains("128"), "{group}");
}

#[test]
fn errors_embed_offending_value_and_bounds() {
    let err = integer_range(1, 10)(&Value::from("0")).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("\"0\"") && msg.contains('1') && msg.contains("10"));

    let err = positive_integer(&Value::from(-1)).unwrap_err();
    assert!(err.to_string().contains("-1"));
}

#[test]
fn validators_are_shareable_across_threads() {
    let range = integer_range(1, 100);
    let inputs = Arc::new(sample_inputs());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let inputs = Arc::clone(&inputs);
            thread::spawn(move || {
                inputs
                    .iter()
                    .map(|v| {
                        (
                            range(v).is_ok(),
                            s3_bucket_name(v).is_ok(),
                            iam_path(v).is_ok(),
                        )
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for other in &results[1..] {
        assert_eq!(&results[0], other);
    }
}
