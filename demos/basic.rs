use formgate::{Answers, ConditionGroup, Evaluator, field};

fn main() {
    env_logger::init();

    // Show the equity step to well-paid hires, or anyone already promised equity.
    let conditions = ConditionGroup::any([
        field("salary").greater_than(50_000),
        field("hasEquity").equals(true),
    ]);

    println!("{conditions}");

    let evaluator = Evaluator::new();
    let answers = Answers::new()
        .set("salary", 40_000)
        .set("hasEquity", "true");

    if evaluator.evaluate(Some(&conditions), &answers) {
        println!("Equity step: shown");
    } else {
        println!("Equity step: hidden");
    }
}
