use formgate::{
    Answers, CollectingDiagnostics, ConditionGroup, ConditionNode, ConditionRule, Diagnostic,
    Evaluator, GroupOperator, NoopDiagnostics, Operator, Value, evaluate_conditions,
    evaluate_serialized, field,
};

fn quiet() -> Evaluator<NoopDiagnostics> {
    Evaluator::with_diagnostics(NoopDiagnostics)
}

#[test]
fn full_time_gate() {
    let group = ConditionGroup::all([field("employmentType").equals("full-time")]);

    let full_time = Answers::new().set("employmentType", "full-time");
    let part_time = Answers::new().set("employmentType", "part-time");
    assert!(evaluate_conditions(Some(&group), &full_time));
    assert!(!evaluate_conditions(Some(&group), &part_time));
    assert!(!evaluate_conditions(Some(&group), &Answers::new()));
}

#[test]
fn salary_or_equity_gate() {
    let group = ConditionGroup::any([
        field("salary").greater_than(50_000),
        field("hasEquity").equals(true),
    ]);

    let with_equity = Answers::new().set("salary", 40_000).set("hasEquity", true);
    let without = Answers::new().set("salary", 40_000).set("hasEquity", false);
    let high_salary = Answers::new().set("salary", 60_000.5);
    assert!(evaluate_conditions(Some(&group), &with_equity));
    assert!(!evaluate_conditions(Some(&group), &without));
    assert!(evaluate_conditions(Some(&group), &high_salary));
}

#[test]
fn no_conditions_always_visible() {
    for answers in [
        Answers::new(),
        Answers::new().set("anything", Value::Null),
        Answers::new().set("a.b.c", vec![1_i64, 2, 3]),
    ] {
        assert!(evaluate_conditions(None, &answers));
        assert!(evaluate_serialized(None, &answers));
        assert!(evaluate_serialized(Some(""), &answers));
    }
}

#[test]
fn empty_rules_visible_for_both_operators() {
    let answers = Answers::new().set("x", 1_i64);
    for operator in [GroupOperator::And, GroupOperator::Or] {
        let group = ConditionGroup::new(operator, Vec::new());
        assert!(quiet().evaluate(Some(&group), &answers), "{operator}");
    }
    assert!(evaluate_serialized(Some(r#"{"operator": "or", "rules": []}"#), &answers));
    assert!(evaluate_serialized(Some(r#"{"rules": []}"#), &answers));
}

#[test]
fn boolean_string_coercion() {
    let equals = ConditionGroup::all([field("hasEquity").equals(true)]);
    let not_equals = ConditionGroup::all([field("hasEquity").not_equals(true)]);
    let cases = [
        (Value::Bool(true), true),
        (Value::from("true"), true),
        (Value::from("True"), false),
        (Value::from("TRUE"), false),
        (Value::Int(1), false),
        (Value::Bool(false), false),
        (Value::from("yes"), false),
    ];
    for (value, expected) in cases {
        let answers = Answers::new().set("hasEquity", value.clone());
        assert_eq!(quiet().evaluate(Some(&equals), &answers), expected, "{value}");
        assert_eq!(quiet().evaluate(Some(&not_equals), &answers), !expected, "{value}");
    }
}

#[test]
fn nested_path_resolution() {
    let nested = Answers::new().set("employer.address.country", "CH");
    assert_eq!(
        nested.get("employer.address.country"),
        Some(&Value::from("CH"))
    );

    let hollow = Answers::from_json(r#"{"employer": {}}"#).unwrap();
    assert_eq!(hollow.get("employer.address.country"), None);

    let null_root = Answers::from_json(r#"{"a": null}"#).unwrap();
    assert_eq!(null_root.get("a.b"), None);
    assert_eq!(Value::Null.get_path("a.b"), None);

    let group = ConditionGroup::all([field("employer.address.country").empty()]);
    assert!(quiet().evaluate(Some(&group), &hollow));
    assert!(quiet().evaluate(Some(&group), &null_root));
    assert!(!quiet().evaluate(Some(&group), &nested));
}

#[test]
fn path_through_scalar_is_missing() {
    let answers = Answers::new().set("employer", "Acme");
    let group = ConditionGroup::all([field("employer.name").equals("Acme")]);
    assert!(!quiet().evaluate(Some(&group), &answers));
    let group = ConditionGroup::all([field("employer.name").not_empty()]);
    assert!(!quiet().evaluate(Some(&group), &answers));
}

#[test]
fn malformed_json_fails_open() {
    let sink = CollectingDiagnostics::new();
    let evaluator = Evaluator::with_diagnostics(&sink);
    let inputs = [
        "{not valid json",
        "[]",
        "42",
        r#"{"operator": "xor", "rules": []}"#,
        r#"{"operator": "and", "rules": [{"field": 1}]}"#,
    ];
    for text in inputs {
        assert!(evaluator.evaluate_serialized(Some(text), &Answers::new()), "{text}");
    }
    let recorded = sink.take();
    assert_eq!(recorded.len(), inputs.len());
    assert!(recorded
        .iter()
        .all(|d| matches!(d, Diagnostic::MalformedConditions { .. })));
}

#[test]
fn unknown_operator_always_passes() {
    let sink = CollectingDiagnostics::new();
    let evaluator = Evaluator::with_diagnostics(&sink);
    let group = ConditionGroup::all([ConditionRule::new(
        "salary",
        "betweenInclusive",
        Some(Value::from(vec![1_i64, 10])),
    )]);
    for answers in [
        Answers::new(),
        Answers::new().set("salary", 5_i64),
        Answers::new().set("salary", "five"),
    ] {
        assert!(evaluator.evaluate(Some(&group), &answers));
    }
    assert_eq!(sink.recorded().len(), 3);
}

#[test]
fn unknown_operator_inside_failing_and() {
    let sink = CollectingDiagnostics::new();
    let evaluator = Evaluator::with_diagnostics(&sink);
    let group = ConditionGroup::all([
        field("y").equals(1_i64),
        ConditionRule::new("x", "matchesRegex", Some(Value::from(".*"))),
    ]);
    assert!(!evaluator.evaluate(Some(&group), &Answers::new().set("y", 2_i64)));
    assert!(evaluator.evaluate(Some(&group), &Answers::new().set("y", 1_i64)));
    assert_eq!(
        sink.take(),
        vec![
            Diagnostic::UnknownOperator {
                field: "x".into(),
                operator: "matchesRegex".into(),
            };
            2
        ]
    );
}

#[test]
fn unknown_operator_inside_passing_or() {
    let sink = CollectingDiagnostics::new();
    let evaluator = Evaluator::with_diagnostics(&sink);
    let group = ConditionGroup::any([
        field("nda").empty(),
        ConditionRule::new("salary", "betweenInclusive", None),
    ]);
    assert!(evaluator.evaluate(Some(&group), &Answers::new()));
    assert_eq!(
        sink.take(),
        vec![Diagnostic::UnknownOperator {
            field: "salary".into(),
            operator: "betweenInclusive".into(),
        }]
    );
}

#[test]
fn groups_past_max_depth_pass() {
    let sink = CollectingDiagnostics::new();
    let evaluator = Evaluator::with_diagnostics(&sink);
    let mut group = ConditionGroup::all([field("x").equals(1_i64)]);
    for _ in 0..ConditionGroup::MAX_DEPTH + 10 {
        group = ConditionGroup::all([group]);
    }
    assert!(evaluator.evaluate(Some(&group), &Answers::new().set("x", 2_i64)));
    assert_eq!(
        sink.take(),
        vec![Diagnostic::NestingTooDeep {
            max_depth: ConditionGroup::MAX_DEPTH,
        }]
    );
    assert!(group.to_string().contains("(..)"));
}

#[test]
fn operator_tags_are_case_sensitive() {
    let text = r#"{"rules": [{"field": "x", "operator": "Equals", "value": 1}]}"#;
    let group = quiet().parse(text).unwrap();
    assert_eq!(
        group.iter_rules().next().map(|r| r.operator.is_known()),
        Some(false)
    );
    // Unknown, so it passes even though x is not 1.
    assert!(quiet().evaluate(Some(&group), &Answers::new().set("x", 2_i64)));
}

#[test]
fn zero_and_false_are_not_empty() {
    let answers = Answers::new()
        .set("zero", 0_i64)
        .set("no", false)
        .set("blank", "")
        .set("nothing", Value::Null)
        .set("list", Vec::<Value>::new())
        .set("object", Value::Object(Default::default()));
    for name in ["zero", "no", "object"] {
        let group = ConditionGroup::all([field(name).not_empty()]);
        assert!(quiet().evaluate(Some(&group), &answers), "{name}");
    }
    for name in ["blank", "nothing", "list", "absent"] {
        let group = ConditionGroup::all([field(name).empty()]);
        assert!(quiet().evaluate(Some(&group), &answers), "{name}");
    }
}

#[test]
fn explicit_null_value_differs_from_missing_value() {
    let missing = r#"{"rules": [{"field": "x", "operator": "equals"}]}"#;
    let null = r#"{"rules": [{"field": "x", "operator": "equals", "value": null}]}"#;
    let unanswered = Answers::new();
    let cleared = Answers::new().set("x", Value::Null);

    assert!(quiet().evaluate_serialized(Some(missing), &unanswered));
    assert!(!quiet().evaluate_serialized(Some(missing), &cleared));
    assert!(!quiet().evaluate_serialized(Some(null), &unanswered));
    assert!(quiet().evaluate_serialized(Some(null), &cleared));
}

#[test]
fn numbers_compare_across_int_and_float() {
    let answers = Answers::from_json(r#"{"salary": 50000.0, "age": 30}"#).unwrap();
    assert!(quiet().evaluate(Some(&ConditionGroup::all([field("salary").equals(50_000)])), &answers));
    assert!(quiet().evaluate(
        Some(&ConditionGroup::all([field("age").greater_than_or_equal(29.5)])),
        &answers
    ));
}

#[test]
fn nan_and_infinity() {
    let answers = Answers::new()
        .set("nan", f64::NAN)
        .set("inf", f64::INFINITY);
    let check = |rule: ConditionRule| quiet().evaluate(Some(&ConditionGroup::all([rule])), &answers);

    assert!(!check(field("nan").equals(f64::NAN)));
    assert!(check(field("nan").not_equals(f64::NAN)));
    assert!(!check(field("nan").greater_than(0)));
    assert!(!check(field("nan").less_than_or_equal(0)));
    assert!(check(field("inf").greater_than(i64::MAX)));
    assert!(check(field("inf").equals(f64::INFINITY)));
}

#[test]
fn unicode_string_operators() {
    let answers = Answers::new().set("city", "Zürich").set("note", "ÉCOLE privée");
    let check = |rule: ConditionRule| quiet().evaluate(Some(&ConditionGroup::all([rule])), &answers);

    assert!(check(field("city").starts_with("zü")));
    assert!(check(field("city").contains("RICH")));
    assert!(check(field("note").contains("école")));
    assert!(check(field("note").ends_with("PRIVÉE")));
    assert!(!check(field("city").equals("zürich")));
}

#[test]
fn contains_on_arrays_is_exact() {
    let answers = Answers::new().set("benefits", vec!["health", "pension"]);
    let check = |rule: ConditionRule| quiet().evaluate(Some(&ConditionGroup::all([rule])), &answers);

    assert!(check(field("benefits").contains("pension")));
    assert!(!check(field("benefits").contains("Pension")));
    assert!(!check(field("benefits").contains("pens")));
    assert!(check(field("benefits").not_contains("gym")));
}

#[test]
fn in_with_composite_members() {
    let answers = Answers::new().set("range", vec![1_i64, 2]);
    let group = ConditionGroup::all([field("range").one_of(vec![
        Value::from(vec![3_i64, 4]),
        Value::from(vec![1_i64, 2]),
    ])]);
    assert!(quiet().evaluate(Some(&group), &answers));
}

#[test]
fn deeply_nested_groups() {
    // ((((x == 1))))... 32 levels of alternating AND / OR.
    let mut group = ConditionGroup::all([field("x").equals(1_i64)]);
    for depth in 0..32 {
        let operator = if depth % 2 == 0 {
            GroupOperator::Or
        } else {
            GroupOperator::And
        };
        group = ConditionGroup::new(operator, vec![ConditionNode::Group(group)]);
    }
    assert!(quiet().evaluate(Some(&group), &Answers::new().set("x", 1_i64)));
    assert!(!quiet().evaluate(Some(&group), &Answers::new().set("x", 2_i64)));

    let text = quiet().serialize(Some(&group)).unwrap();
    assert_eq!(quiet().parse(&text), Some(group));
}

#[test]
fn two_pairs_of_alternatives() {
    // (a AND b) OR (c AND d)
    let group = ConditionGroup::any([
        ConditionGroup::all([field("a").equals(true), field("b").not_empty()]),
        ConditionGroup::all([field("c").one_of(vec!["x", "y"]), field("d").less_than(10)]),
    ]);
    let eval = |answers: Answers| quiet().evaluate(Some(&group), &answers);

    assert!(eval(Answers::new().set("a", "true").set("b", "filled")));
    assert!(eval(Answers::new().set("c", "y").set("d", 3_i64)));
    assert!(!eval(Answers::new().set("a", true).set("d", 3_i64)));
    assert!(!eval(Answers::new()));
}

#[test]
fn many_rules() {
    let rules: Vec<ConditionRule> = (0..500_i32)
        .map(|i| field(&format!("f{i}")).equals(i64::from(i)))
        .collect();
    let all = ConditionGroup::all(rules.clone());
    let any = ConditionGroup::any(rules);

    let mut answers: Answers = (0..500_i32).map(|i| (format!("f{i}"), i64::from(i))).collect();
    assert!(quiet().evaluate(Some(&all), &answers));

    answers.insert("f250", Value::Int(-1));
    assert!(!quiet().evaluate(Some(&all), &answers));
    assert!(quiet().evaluate(Some(&any), &answers));
}

#[test]
fn every_known_operator_has_a_tag_that_parses_back() {
    for op in Operator::KNOWN {
        assert_eq!(Operator::from_tag(op.tag()), op);
    }
}
