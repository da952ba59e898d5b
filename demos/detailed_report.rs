use formgate::{Answers, ConditionGroup, Evaluator, field};

fn main() {
    env_logger::init();

    let conditions = ConditionGroup::any([
        ConditionGroup::all([
            field("employmentType").equals("full-time"),
            field("employer.address.country").one_of(vec!["CH", "DE", "AT"]),
        ]),
        ConditionGroup::all([
            field("benefits").contains("pension"),
            field("salary").greater_than_or_equal(80_000),
        ]),
    ]);

    let answers = Answers::new()
        .set("employmentType", "full-time")
        .set("employer.address.country", "FR")
        .set("benefits", vec!["health", "pension"])
        .set("salary", 75_000);

    let report = Evaluator::new().evaluate_detailed(Some(&conditions), &answers);

    println!("{report}");
    println!();
    for outcome in report.outcomes() {
        println!("  {outcome}");
    }
    println!("Duration: {:?}", report.duration());
}
