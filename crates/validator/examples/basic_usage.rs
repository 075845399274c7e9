//! Basic usage example for fieldwise-validator
//!
//! Run: `cargo run -p fieldwise-validator --example basic_usage`
//!
//! Set `RUST_LOG=fieldwise_validator=trace` to see per-field diagnostics.

use chrono::{Duration, Utc};
use fieldwise_validator::prelude::*;
use fieldwise_validator::record;
use regex::Regex;
use tracing_subscriber::EnvFilter;

record! {
    struct Account {
        id: String,
        email: String,
        age: u8,
        nickname: Option<String>,
        expires_at: chrono::DateTime<Utc>,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    single_values();
    records();
    setup_errors();
}

fn single_values() {
    println!("=== Single Values ===\n");

    let username = string().required().min(3).max(20);
    for input in ["ferris", "al", ""] {
        println!("username {input:?}: {}", status(&username.validate(&input.to_owned())));
    }

    let port = number::<u16>().min(1024);
    println!("port 80: {}", status(&port.validate(&80)));

    println!();
}

fn account_validator() -> Result<ObjectValidator<Account>, SetupError> {
    let email = Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid regex");

    try_object::<Account>(
        ValidatorMap::new()
            .field("id", string().required())
            .field("email", string().required().matches(email))
            .field("age", number::<u8>().min(18))
            .field("nickname", optional_string().max(12))
            .field("expires_at", time().after(Utc::now)),
    )
}

fn records() {
    println!("=== Records ===\n");

    let validator = match account_validator() {
        Ok(v) => v,
        Err(e) => {
            println!("setup failed: {e}");
            return;
        }
    };

    let good = Account {
        id: "acc-1".into(),
        email: "ferris@example.com".into(),
        age: 30,
        nickname: None,
        expires_at: Utc::now() + Duration::days(30),
    };
    println!("good account: {}", status(&validator.validate(&good)));

    let bad = Account {
        id: String::new(),
        email: "not-an-email".into(),
        age: 12,
        nickname: Some("a much too long nickname".into()),
        expires_at: Utc::now() - Duration::days(1),
    };
    match validator.validate(&bad) {
        Ok(()) => println!("bad account: valid?"),
        Err(e) => {
            println!("bad account:");
            for entry in e.field_errors().into_iter().flatten() {
                println!(
                    "  {:<10} [{}] {} (input: {})",
                    entry.field(),
                    entry.error().code(),
                    entry.error(),
                    entry.error().input().as_debug()
                );
            }
        }
    }

    println!();
}

fn setup_errors() {
    println!("=== Setup Errors ===\n");

    if let Err(e) = try_object::<Account>(ValidatorMap::new().field("phone", string())) {
        println!("unknown field: {e}");
    }

    if let Err(e) = try_object::<Account>(ValidatorMap::new().field("age", number::<i64>())) {
        println!("type mismatch: {e}");
    }
}

fn status(result: &Result<(), ValidationError>) -> String {
    match result {
        Ok(()) => "✓ valid".to_owned(),
        Err(e) => format!("✗ {e}"),
    }
}
