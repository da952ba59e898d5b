use formgate::{Answers, evaluate_serialized, parse_conditions, serialize_conditions};

const STORED: &str = r#"{
    "operator": "and",
    "rules": [
        { "field": "employer.address.country", "operator": "equals", "value": "CH" },
        { "field": "permitType", "operator": "isNotEmpty" }
    ]
}"#;

fn main() {
    // RUST_LOG=formgate=warn shows the recovered problems below.
    env_logger::init();

    let answers = Answers::from_json(
        r#"{"employer": {"address": {"country": "CH"}}, "permitType": "B"}"#,
    )
    .expect("valid answers");

    println!("Permit step visible: {}", evaluate_serialized(Some(STORED), &answers));

    if let Some(group) = parse_conditions(STORED) {
        println!("Parsed: {group}");
        println!("Stored form: {}", serialize_conditions(Some(&group)).unwrap_or_default());
        for issue in group.lint() {
            println!("Lint: {issue}");
        }
    }

    // Broken text and unknown operators never hide a step.
    println!(
        "Broken conditions visible: {}",
        evaluate_serialized(Some("{not valid json"), &answers)
    );
    let future = r#"{"rules": [{"field": "salary", "operator": "betweenInclusive", "value": [1, 2]}]}"#;
    println!(
        "Unknown operator visible: {}",
        evaluate_serialized(Some(future), &answers)
    );
}
