use proptest::prelude::*;
use proptest::sample::select;
use shapecheck::{
    coerce_to, explain, is_valid, Config, Keyword, Member, Primitive, Scalar, Schema, Type,
    Validator, Value,
};

const KEYS: &[&str] = &["a", "b", "c"];

fn scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        select(vec!["a", "b", ""]).prop_map(Scalar::from),
        select(vec![0.0, 1.0, -2.5]).prop_map(Scalar::Number),
        any::<bool>().prop_map(Scalar::Bool),
        (-3i64..3).prop_map(Scalar::BigInt),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        select(vec![0.0, 1.0, -2.5, 1e9]).prop_map(Value::Number),
        (-3i64..3).prop_map(Value::BigInt),
        select(vec!["a", "b", "", "12"]).prop_map(Value::from),
    ];

    leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec((select(KEYS), inner), 0..4).prop_map(|fields| {
                Value::Object(
                    fields
                        .into_iter()
                        .map(|(key, value)| (key.to_owned(), value))
                        .collect(),
                )
            }),
        ]
    })
}

fn schema() -> impl Strategy<Value = Schema> {
    let leaf = prop_oneof![
        select(vec![
            Primitive::String,
            Primitive::Boolean,
            Primitive::Number,
            Primitive::Null,
        ])
        .prop_map(Schema::Primitive),
        (scalar(), any::<bool>()).prop_map(|(value, spelled_match)| Schema::Literal {
            value,
            keyword: if spelled_match {
                Keyword::Match
            } else {
                Keyword::Literal
            },
        }),
    ];

    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec((select(KEYS), inner.clone(), any::<bool>()), 0..4).prop_map(
                |members| {
                    Schema::Object(
                        members
                            .into_iter()
                            .map(|(key, schema, required)| {
                                (key.to_owned(), Member { schema, required })
                            })
                            .collect(),
                    )
                }
            ),
            prop::collection::vec(inner.clone(), 0..3).prop_map(Schema::OneOf),
            prop::collection::vec(inner.clone(), 0..3).prop_map(Schema::AllOf),
            inner.prop_map(|schema| Schema::ArrayOf(Box::new(schema))),
        ]
    })
}

proptest! {
    /// Coercion is defined exactly for valid values, and hands back the same
    /// reference.
    #[test]
    fn coerce_to_is_identity_on_valid_values(schema in schema(), value in value()) {
        let ty = Type::from(schema);
        match coerce_to(&ty, &value) {
            Some(coerced) => {
                prop_assert!(is_valid(&ty, &value));
                prop_assert!(std::ptr::eq(coerced, &value));
            }
            None => prop_assert!(!is_valid(&ty, &value)),
        }
    }

    /// The fail-fast and exhaustive traversals always agree.
    #[test]
    fn explain_agrees_with_is_valid(schema in schema(), value in value()) {
        let ty = Type::from(schema);
        prop_assert_eq!(explain(&ty, &value).is_none(), is_valid(&ty, &value));
    }

    /// Every explanation flattens into at least one failure.
    #[test]
    fn explanations_have_failures(schema in schema(), value in value()) {
        let ty = Type::from(schema);
        if let Some(explanation) = explain(&ty, &value) {
            prop_assert!(!explanation.failures().is_empty());
        }
    }

    /// A depth limit deep enough for the schema never changes the verdict.
    #[test]
    fn generous_depth_limit_is_transparent(schema in schema(), value in value()) {
        let mut config = Config::new();
        config.max_depth(64);
        let validator = Validator::new_with_config(config);

        let ty = Type::from(schema.clone());
        prop_assert_eq!(validator.is_valid(&schema, &value).ok(), Some(is_valid(&ty, &value)));
    }

    /// Schemas survive their wire form.
    #[test]
    fn wire_form_round_trips(schema in schema()) {
        let json = serde_json::to_value(&schema).expect("serialize");
        let parsed: Schema = serde_json::from_value(json).expect("deserialize");
        prop_assert_eq!(parsed, schema);
    }
}
