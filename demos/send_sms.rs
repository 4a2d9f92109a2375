use std::io;

use target365::{Msisdn, OutMessage, Target365Client};
use tracing_subscriber::EnvFilter;

fn required_var(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let key_name = required_var("TARGET365_KEY_NAME")?;
    let private_key = std::fs::read_to_string(required_var("TARGET365_PRIVATE_KEY_FILE")?)?;
    let recipient = required_var("TARGET365_RECIPIENT")?;
    let sender = std::env::var("TARGET365_SENDER").unwrap_or_else(|_| "Target365".to_owned());
    let content = std::env::var("TARGET365_MESSAGE")
        .unwrap_or_else(|_| "Hello from the target365 demo.".to_owned());

    let mut builder = Target365Client::builder(key_name, private_key);
    if let Ok(base_url) = std::env::var("TARGET365_BASE_URL") {
        builder = builder.base_url(base_url);
    }
    let client = builder.build()?;

    println!("ping: {}", client.ping().await?);

    // international format, e.g. +4798079008
    let recipient = Msisdn::parse(None, recipient)?;
    let message = OutMessage {
        sender,
        recipient: recipient.as_str().to_owned(),
        content,
        ..Default::default()
    };
    let transaction_id = client.create_out_message(&message).await?;
    println!("created out-message {transaction_id}");

    if let Some(message) = client.get_out_message(&transaction_id).await? {
        println!("status: {:?}", message.status_code);
    }

    Ok(())
}
