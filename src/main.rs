// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use entity_mixins::config::{load_and_validate_config, BoundPorts, PortGraph};
use entity_mixins::crypto::{Cipher, CryptoSuite, Sha256Hasher};
use entity_mixins::entity::Patch;
use entity_mixins::errors::CryptoError;
use entity_mixins::factory::{Dependencies, UuidGenerator};
use entity_mixins::models::order::{self, order_callbacks, NewOrder, OrderField};

const DEFAULT_PORTS: &str = "config/order-ports.yaml";

/// Base64 stand-in for a real cipher. It hides nothing; it only makes the
/// encrypt/decrypt round trip visible in the demo output.
struct DemoCipher;

impl Cipher for DemoCipher {
    fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        Ok(STANDARD.encode(plaintext))
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError> {
        let bytes = STANDARD
            .decode(ciphertext)
            .map_err(|e| CryptoError::Decrypt(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| CryptoError::Decrypt(e.to_string()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let ports_file = args.get(1).map(String::as_str).unwrap_or(DEFAULT_PORTS);

    println!("📦 Order Fulfillment Demo");
    println!("═════════════════════════");
    println!("Ports: {}", ports_file);
    println!();

    let config = load_and_validate_config::<order::Order, _>(ports_file)
        .with_context(|| format!("loading {}", ports_file))?;
    let graph = PortGraph::from_config(&config);
    let ports = BoundPorts::bind(&graph, &order_callbacks())?;

    println!("🔌 Active Ports:");
    for name in graph.topological_order()? {
        let timeout = graph
            .timeout(&name)
            .map(|t| format!("{:?}", t))
            .unwrap_or_else(|| "none".to_string());
        let consumers = graph.edges().consumers_of(&name).join(", ");
        if consumers.is_empty() {
            println!("  • {} (timeout: {})", name, timeout);
        } else {
            println!("  • {} → {} (timeout: {})", name, consumers, timeout);
        }
    }
    println!("🚪 Entry Points: {}", Vec::<String>::from(graph.entry_points()).join(", "));
    println!("🛠️  Explicit Ports: {}", graph.explicit_ports().join(", "));
    println!();

    let deps = Dependencies::new(
        Arc::new(UuidGenerator),
        CryptoSuite::new(Arc::new(DemoCipher), Arc::new(Sha256Hasher::new("demo-salt"))),
    );
    let orders = order::definition(&deps);

    let mut current = orders.create(NewOrder {
        customer_info: json!({"customerId": "c-42"}),
        order_items: json!([
            {"itemId": "hammer", "price": 24.99, "qty": 1},
            {"itemId": "nails", "price": 0.05, "qty": 200},
        ]),
        credit_card_number: json!("4111111111111111"),
        shipping_address: json!("1 Main St"),
        billing_address: json!("1 Main St"),
        last_name: json!("Lovelace"),
        email: json!("ada@example.com"),
    })?;
    println!("🆕 Created order {}", current.get(OrderField::OrderNo).unwrap_or(&json!(null)));

    let events = [
        ("authorizePayment", json!({"authorization": "AUTH-123"})),
        ("fillOrder", json!({})),
        ("shipOrder", json!({"trackingId": "TRK-9"})),
        ("trackShipment", json!({})),
        ("verifyDelivery", json!({"proofOfDelivery": "signed by A. Lovelace"})),
        ("completePayment", json!({})),
    ];

    for (port, event) in events {
        let patch = ports.handle(port, &current, &event).await?;
        current = orders.update(&current, &patch)?;
        println!(
            "  ✅ {} → status {}",
            port,
            current.get(OrderField::OrderStatus).unwrap_or(&json!(null))
        );
    }

    let reopen = Patch::new().set(OrderField::OrderStatus, "CANCELED");
    match orders.update(&current, &reopen) {
        Ok(_) => println!("  ⚠️  completed order was reopened"),
        Err(e) => println!("  🔒 {}", e),
    }

    println!();
    println!("📄 Stored:");
    println!("{}", serde_json::to_string_pretty(&current)?);
    println!("📖 Read back:");
    println!("{}", serde_json::to_string_pretty(&orders.read(&current)?)?);

    Ok(())
}
