//! Validating JSON documents with fieldwise-validator.
//!
//! Run: `cargo run -p fieldwise-validator --features serde --example json_validation`

use fieldwise_validator::json::value_map_from_json;
use fieldwise_validator::prelude::*;
use serde_json::json;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = map(
        ValidatorMap::new()
            .field("host", string().required())
            .field("port", number::<i64>().min(1).max(65535))
            .field("workers", number::<i64>().one_of([1, 2, 4, 8]))
            .field(
                "tls",
                map(ValidatorMap::new()
                    .field("enabled", Validator::<bool>::new())
                    .field("cert", string().max(4096))),
            ),
    );

    let documents = [
        (
            "valid",
            json!({
                "host": "localhost",
                "port": 8080,
                "workers": 4,
                "tls": { "enabled": true, "cert": "/etc/cert.pem" },
            }),
        ),
        (
            "bad values",
            json!({
                "host": "",
                "port": 0,
                "workers": 3,
                "tls": { "enabled": false, "cert": "" },
            }),
        ),
        (
            "missing field",
            json!({ "host": "localhost", "port": 8080, "workers": 1 }),
        ),
        (
            "wrong type",
            json!({ "host": "localhost", "port": "8080", "workers": 1, "tls": {} }),
        ),
        ("not an object", json!([1, 2, 3])),
    ];

    for (name, doc) in documents {
        println!("=== {name} ===");
        let report = value_map_from_json(doc).and_then(|input| config.validate(&input));
        match report {
            Ok(()) => println!("✓ valid\n"),
            Err(e) => match serde_json::to_string_pretty(&e.to_json_value()) {
                Ok(pretty) => println!("{pretty}\n"),
                Err(_) => println!("✗ {e}\n"),
            },
        }
    }
}
