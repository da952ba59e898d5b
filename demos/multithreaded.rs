use std::sync::Arc;
use std::thread;

use formgate::{Answers, ConditionGroup, Evaluator, field};

fn main() {
    env_logger::init();

    let evaluator = Arc::new(Evaluator::new());
    let conditions = Arc::new(ConditionGroup::all([
        field("employmentType").not_equals("contractor"),
        field("salary").greater_than_or_equal(60_000),
    ]));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let (ev, cond) = (Arc::clone(&evaluator), Arc::clone(&conditions));
            thread::spawn(move || {
                let salary = 45_000_i64 + 10_000 * i64::from(i);
                let answers = Answers::new()
                    .set("employmentType", "full-time")
                    .set("salary", salary);

                let visible = ev.evaluate(Some(&cond), &answers);
                println!("Thread {i}: salary {salary} -> visible: {visible}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
