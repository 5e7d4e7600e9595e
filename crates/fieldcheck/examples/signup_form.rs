//! Validates a signup form field by field, sharing one history so the
//! confirmation field can see the password.

use fieldcheck::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let password: Validation<String, &str> = Validation::queue(vec![
        Validation::message(
            Validator::required(),
            UiPayload::failure("Password is required"),
        ),
        Validation::message(
            Validator::min_length(8),
            UiPayload::failure("At least 8 characters"),
        ),
        Validation::message(
            Validator::deny_pattern(r"\s").expect("static pattern"),
            UiPayload::warning("Spaces are easy to mistype"),
        ),
    ])
    .with_key("password");

    let confirm: Validation<String, &str> = Validation::related(
        "password",
        RelatedValidator::IsSameAs,
        UiPayload::failure("Passwords do not match"),
    )
    .with_success(UiPayload::success("Passwords match"));

    let attempts = [
        ("hunter2hunter2", "hunter2hunter2"),
        ("short", "short"),
        ("long enough", "long enuogh"),
    ];

    for (first, second) in attempts {
        let mut history = History::new();
        let password_result = password.validate(&first.to_string(), &mut history);
        let confirm_result = confirm.validate(&second.to_string(), &mut history);

        println!("{first:?} / {second:?}");
        for (field, result) in [("password", password_result), ("confirm", confirm_result)] {
            match result {
                Some(payload) => {
                    for item in payload.flatten().into_iter().filter(|p| !p.text.is_empty()) {
                        println!("  {field}: {item}");
                    }
                }
                None => println!("  {field}: ok"),
            }
        }
    }
}
