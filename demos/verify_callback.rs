use std::io::{self, Read};

use target365::{DeliveryReport, RequestVerifier, Verifier};
use tracing_subscriber::EnvFilter;

fn required_var(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

/// Verify a delivery report callback read from stdin.
///
/// `TARGET365_AUTHORIZATION` and `TARGET365_CALLBACK_URI` carry the request's
/// `Authorization` header and full URI; the body is the raw request body.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let public_key = std::fs::read_to_string(required_var("TARGET365_SERVER_PUBLIC_KEY_FILE")?)?;
    let authorization = required_var("TARGET365_AUTHORIZATION")?;
    let uri = required_var("TARGET365_CALLBACK_URI")?;
    let mut body = String::new();
    io::stdin().read_to_string(&mut body)?;

    let verifier = RequestVerifier::new(Verifier::from_armored(&public_key)?);
    let header = verifier.verify_request(&authorization, "POST", &uri, &body)?;
    println!("signature ok (key {}, nonce {})", header.key_name, header.nonce);

    let report = DeliveryReport::from_json(&body)?;
    println!(
        "transaction {}: status {}, delivered {}",
        report.transaction_id, report.status_code, report.delivered
    );

    Ok(())
}
