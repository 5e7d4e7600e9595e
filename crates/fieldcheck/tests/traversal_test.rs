//! Integration tests for tree traversal: queue short-circuiting, history
//! visibility and related lookups.

use fieldcheck::prelude::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

type Node = Validation<String, &'static str>;

fn s(value: &str) -> String {
    value.to_string()
}

fn counting(counter: &Arc<AtomicUsize>, valid: bool) -> Validator<String> {
    let counter = Arc::clone(counter);
    Validator::custom(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        valid
    })
}

// ============================================================================
// QUEUE
// ============================================================================

#[test]
fn queue_stops_after_required_failure() {
    let min_length_runs = Arc::new(AtomicUsize::new(0));
    let min_length = Arc::clone(&min_length_runs);

    let queue = Node::queue(vec![
        Node::message(Validator::required(), UiPayload::failure("Required"))
            .with_after(TerminationStrategy::StopAfterFailure),
        Node::message(
            Validator::custom(move |value: &String| {
                min_length.fetch_add(1, Ordering::SeqCst);
                value.chars().count() >= 5
            }),
            UiPayload::failure("Too short"),
        )
        .with_key("min"),
    ]);

    let (result, history) = queue.validate_fresh(&s(""));

    assert_eq!(result, Some(UiPayload::failure("Required")));
    assert_eq!(min_length_runs.load(Ordering::SeqCst), 0);
    assert_eq!(history.matching(&"min").count(), 0);
}

#[test]
fn queue_runs_every_child_when_nothing_stops() {
    let runs = Arc::new(AtomicUsize::new(0));
    let queue = Node::queue(vec![
        Node::message(counting(&runs, true), UiPayload::failure("a")),
        Node::message(counting(&runs, true), UiPayload::failure("b")),
        Node::message(counting(&runs, true), UiPayload::failure("c")),
    ]);

    assert_eq!(queue.validate_fresh(&s("x")).0, None);
    assert_eq!(runs.load(Ordering::SeqCst), 3);
}

#[test]
fn queue_always_stop_evaluates_exactly_one_child() {
    let runs = Arc::new(AtomicUsize::new(0));
    let queue = Node::queue(vec![
        Node::message(counting(&runs, true), UiPayload::failure("a"))
            .with_after(TerminationStrategy::AlwaysStop)
            .with_key("first"),
        Node::message(counting(&runs, true), UiPayload::failure("b")).with_key("second"),
    ]);

    let (_, history) = queue.validate_fresh(&s("x"));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    let keys: Vec<_> = history.iter().map(|e| *e.key()).collect();
    assert_eq!(keys, vec!["first"]);
}

#[test]
fn queue_never_stop_collects_all_failures() {
    let queue = Node::queue(vec![
        Node::message(Validator::min_length(10), UiPayload::failure("short"))
            .with_after(TerminationStrategy::NeverStop),
        Node::message(Validator::allow_pattern(r"\d").unwrap(), UiPayload::failure("digit"))
            .with_after(TerminationStrategy::NeverStop),
    ]);

    let result = queue.validate_fresh(&s("abc")).0.unwrap();
    assert_eq!(result.severity(), Severity::Failure);
    assert_eq!(
        result.nested,
        vec![UiPayload::failure("short"), UiPayload::failure("digit")]
    );
}

#[test]
fn queue_termination_sees_child_result_not_composite() {
    // The accumulated payload already contains a failure, but the second
    // child's own result is a success, so StopIfContainsFailure must not fire.
    let runs = Arc::new(AtomicUsize::new(0));
    let queue = Node::queue(vec![
        Node::message(Validator::required(), UiPayload::failure("Required"))
            .with_after(TerminationStrategy::NeverStop),
        Node::message(Validator::custom(|_| true), UiPayload::failure("unused"))
            .with_success(UiPayload::success("fine"))
            .with_after(TerminationStrategy::StopIfContainsFailure),
        Node::message(counting(&runs, true), UiPayload::failure("c")),
    ]);

    queue.validate_fresh(&s(""));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn queue_stop_after_severity_on_warning() {
    let runs = Arc::new(AtomicUsize::new(0));
    let queue = Node::queue(vec![
        Node::message(Validator::min_length(12), UiPayload::warning("Weak"))
            .with_after(TerminationStrategy::StopAfterSeverity(
                SeverityFlags::failure().with_warning(),
            )),
        Node::message(counting(&runs, true), UiPayload::failure("never")),
    ]);

    assert_eq!(queue.validate_fresh(&s("short")).0, Some(UiPayload::warning("Weak")));
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[test]
fn queue_composite_called_once_per_child_in_order() {
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let composite = CompositeStrategy::custom(move |acc: Option<UiPayload>, next: Option<UiPayload>| {
        log.lock()
            .unwrap()
            .push(next.as_ref().map(|p| p.text.clone()));
        next.or(acc)
    });

    let queue = Node::queue(vec![
        Node::message(Validator::required(), UiPayload::failure("a"))
            .with_success(UiPayload::info("first")),
        Node::valid(),
        Node::message(Validator::required(), UiPayload::failure("c"))
            .with_success(UiPayload::info("third")),
    ])
    .with_composite(composite);

    let result = queue.validate_fresh(&s("x")).0;
    assert_eq!(result, Some(UiPayload::info("third")));
    assert_eq!(
        *seen.lock().unwrap(),
        vec![Some(s("first")), None, Some(s("third"))]
    );
}

#[test]
fn nested_queue_stops_parent_on_deep_failure() {
    let runs = Arc::new(AtomicUsize::new(0));
    let inner = Node::queue(vec![
        Node::message(Validator::custom(|_| true), UiPayload::failure("unused"))
            .with_success(UiPayload::success("ok")),
        Node::message(Validator::max_length(2), UiPayload::failure("long")),
    ]);
    let outer = Node::queue(vec![
        inner,
        Node::message(counting(&runs, true), UiPayload::failure("never")),
    ]);

    let result = outer.validate_fresh(&s("abc")).0.unwrap();
    assert!(result.contains_failure());
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[test]
fn stop_if_contains_failure_detects_nested_failure_under_warning() {
    let summary = UiPayload::warning("Check the highlighted fields")
        .with_nested(vec![UiPayload::info("a").with_nested(vec![UiPayload::failure("deep")])]);
    let runs = Arc::new(AtomicUsize::new(0));

    let stops = Node::queue(vec![
        Node::message(Validator::custom(|_| false), summary.clone())
            .with_after(TerminationStrategy::StopIfContainsFailure),
        Node::message(counting(&runs, true), UiPayload::failure("never")),
    ]);
    stops.validate_fresh(&s("x"));
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    let continues = Node::queue(vec![
        Node::message(Validator::custom(|_| false), summary)
            .with_after(TerminationStrategy::StopAfterFailure),
        Node::message(counting(&runs, true), UiPayload::failure("runs")),
    ]);
    continues.validate_fresh(&s("x"));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

// ============================================================================
// HISTORY VISIBILITY
// ============================================================================

#[test]
fn key_recorded_after_children() {
    let queue = Node::queue(vec![Node::valid().with_key("child")]).with_key("parent");
    let (_, history) = queue.validate_fresh(&s("v"));
    let keys: Vec<_> = history.iter().map(|e| *e.key()).collect();
    assert_eq!(keys, vec!["child", "parent"]);
}

#[test]
fn related_sees_earlier_sibling() {
    let queue = Node::queue(vec![
        Node::valid().with_key("x"),
        Node::related("x", RelatedValidator::IsDifferentFrom, UiPayload::failure("same")),
    ]);
    assert_eq!(queue.validate_fresh(&s("v")).0, Some(UiPayload::failure("same")));
}

#[test]
fn related_does_not_see_later_sibling() {
    let queue = Node::queue(vec![
        Node::related("x", RelatedValidator::IsDifferentFrom, UiPayload::failure("same")),
        Node::valid().with_key("x"),
    ]);
    let (result, history) = queue.validate_fresh(&s("v"));
    assert_eq!(result, None);
    assert_eq!(history.len(), 1);
}

#[test]
fn history_is_shared_across_top_level_calls() {
    let password = Node::queue(vec![
        Node::message(Validator::required(), UiPayload::failure("Required")),
        Node::message(Validator::min_length(8), UiPayload::failure("Too short")),
    ])
    .with_key("password");
    let confirm = Node::related(
        "password",
        RelatedValidator::IsSameAs,
        UiPayload::failure("Passwords do not match"),
    )
    .with_success(UiPayload::success("Match"))
    .with_key("confirm");

    let mut history = History::new();
    assert_eq!(password.validate(&s("mypassword"), &mut history), None);
    assert_eq!(
        confirm.validate(&s("mypassword"), &mut history),
        Some(UiPayload::success("Match"))
    );
    assert_eq!(history.len(), 2);
}

// ============================================================================
// RELATED
// ============================================================================

#[test]
fn related_mismatch_yields_failure() {
    let mut history = History::new();
    history.record("password", s("mypassword"));

    let confirm = Node::related(
        "password",
        RelatedValidator::IsSameAs,
        UiPayload::failure("Passwords do not match"),
    );
    assert_eq!(
        confirm.validate(&s("different"), &mut history),
        Some(UiPayload::failure("Passwords do not match"))
    );
}

#[test]
fn related_without_entry_yields_nothing() {
    let confirm = Node::related(
        "password",
        RelatedValidator::IsSameAs,
        UiPayload::failure("Passwords do not match"),
    )
    .with_success(UiPayload::success("Match"));
    assert_eq!(confirm.validate_fresh(&s("different")).0, None);
}

#[test]
fn related_checks_every_matching_entry() {
    let mut history: History<String, &str> =
        [("email", s("a@x.io")), ("other", s("b@x.io")), ("email", s("c@x.io"))]
            .into_iter()
            .collect();

    let distinct = Node::related(
        "email",
        RelatedValidator::IsDifferentFrom,
        UiPayload::failure("Already used"),
    )
    .with_success(UiPayload::success("Unique"))
    .with_after(TerminationStrategy::NeverStop);

    let result = distinct.validate(&s("d@x.io"), &mut history).unwrap();
    assert_eq!(
        result.nested,
        vec![UiPayload::success("Unique"), UiPayload::success("Unique")]
    );
}

#[test]
fn related_after_governs_each_transient_check() {
    // Two earlier entries both mismatch. The node's own `after` is carried by
    // every transient check, so it decides whether the second one runs.
    let history: History<String, &str> = [("pin", s("1111")), ("pin", s("2222"))]
        .into_iter()
        .collect();

    let keep_going = Node::related("pin", RelatedValidator::IsSameAs, UiPayload::failure("mismatch"))
        .with_after(TerminationStrategy::NeverStop);
    let result = keep_going
        .validate(&s("0000"), &mut history.clone())
        .unwrap();
    assert_eq!(result.nested.len(), 2);

    let first_only = Node::related("pin", RelatedValidator::IsSameAs, UiPayload::failure("mismatch"))
        .with_after(TerminationStrategy::StopAfterFailure);
    let result = first_only.validate(&s("0000"), &mut history.clone());
    assert_eq!(result, Some(UiPayload::failure("mismatch")));
}

#[test]
fn related_custom_factory() {
    let mut history: History<u32, &str> = History::new();
    history.record("min", 18);

    let at_least = RelatedValidator::custom(|min: &u32| {
        let min = *min;
        Validator::custom(move |age: &u32| *age >= min)
    });
    let age: Validation<u32, &str> =
        Validation::related("min", at_least, UiPayload::failure("Too young"));

    assert_eq!(age.validate(&21, &mut history.clone()), None);
    assert_eq!(
        age.validate(&16, &mut history),
        Some(UiPayload::failure("Too young"))
    );
}

// ============================================================================
// SHARING
// ============================================================================

#[test]
fn tree_is_reusable_across_threads() {
    let tree = Arc::new(
        Node::queue(vec![
            Node::message(Validator::required(), UiPayload::failure("Required")),
            Node::message(Validator::max_length(4), UiPayload::failure("Too long")),
        ])
        .with_key("code"),
    );

    std::thread::scope(|scope| {
        for input in ["", "abcd", "abcdef"] {
            let tree = Arc::clone(&tree);
            scope.spawn(move || {
                let (result, history) = tree.validate_fresh(&s(input));
                assert_eq!(history.len(), 1);
                match input {
                    "" => assert_eq!(result, Some(UiPayload::failure("Required"))),
                    "abcd" => assert_eq!(result, None),
                    _ => assert_eq!(result, Some(UiPayload::failure("Too long"))),
                }
            });
        }
    });
}
