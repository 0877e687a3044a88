//! # Seed Data Generator
//!
//! Populates the database with sample back-office records for development.
//!
//! ## Usage
//! ```bash
//! # Default database path (./berkas_dev.db)
//! cargo run -p berkas-store --bin seed
//!
//! # Specify database path
//! cargo run -p berkas-store --bin seed -- --db ./data/berkas.db
//! ```
//!
//! ## Generated Data
//! - Default settings (seeded implicitly on first settings read)
//! - A pair of purchase orders (one incoming, one outgoing)
//! - An invoice referencing the outgoing order, partially paid
//! - A delivery order and a shipping label for the same customer

use std::env;

use chrono::{Datelike, Utc};
use tracing_subscriber::EnvFilter;

use berkas_core::numbering;
use berkas_core::{
    DeliveryOrder, DeliveryStatus, DoItem, Invoice, LineItem, Money, PaymentDetail, PoStatus,
    PoType, PurchaseOrder, ShippingLabel,
};
use berkas_store::repository::generate_record_id;
use berkas_store::{Store, StoreConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./berkas_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Berkas Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./berkas_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Berkas Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let store = Store::new(StoreConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    let (total, applied) = berkas_store::migrations::migration_status(store.pool()).await?;
    println!("✓ Migrations applied ({applied}/{total})");

    let existing = store.purchase_orders().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} purchase orders", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Settings seed themselves with defaults on first read
    let settings = store.settings().get().await?;
    println!("✓ Settings initialized for {}", settings.default_account_name);

    let year = Utc::now().year();
    let today = Utc::now().format("%Y-%m-%d").to_string();

    // Incoming order: raw material purchase
    let mut incoming = PurchaseOrder {
        id: generate_record_id(),
        po_number: numbering::next_po_number(&[], PoType::Incoming, year),
        po_type: PoType::Incoming,
        customer_name: "CV Sumber Tani".to_string(),
        address: "Jl. Raya Turen No. 12, Malang".to_string(),
        date_created: today.clone(),
        items: vec![LineItem {
            id: "1".to_string(),
            name: "Singkong Mentah".to_string(),
            specification: "Grade A".to_string(),
            quantity: 500,
            unit: "kg".to_string(),
            unit_price: Money::from_units(4_000),
            ..Default::default()
        }],
        status: PoStatus::Approved,
        created_by: settings.default_admin_name.clone(),
        approved_by: settings.default_manager_name.clone(),
        ..Default::default()
    };
    incoming.recalculate();
    store.purchase_orders().save(&incoming).await?;

    // Outgoing order: customer sale
    let pos = store.purchase_orders().get_all().await?;
    let mut outgoing = PurchaseOrder {
        id: generate_record_id(),
        po_number: numbering::next_po_number(&pos, PoType::Outgoing, year),
        po_type: PoType::Outgoing,
        customer_name: "Toko Oleh-Oleh Barokah".to_string(),
        address: "Jl. Pasar Besar No. 45, Malang".to_string(),
        date_created: today.clone(),
        items: vec![LineItem {
            id: "1".to_string(),
            name: "Keripik Singkong".to_string(),
            specification: "250g".to_string(),
            quantity: 200,
            unit: "pcs".to_string(),
            unit_price: Money::from_units(12_000),
            ..Default::default()
        }],
        status: PoStatus::Completed,
        created_by: settings.default_admin_name.clone(),
        approved_by: settings.default_manager_name.clone(),
        ..Default::default()
    };
    outgoing.recalculate();
    store.purchase_orders().save(&outgoing).await?;
    println!("✓ Seeded 2 purchase orders");

    // Partially paid invoice against the outgoing order
    let mut invoice = Invoice {
        id: generate_record_id(),
        invoice_number: numbering::next_invoice_number(&[], year),
        ref_po_number: Some(outgoing.po_number.clone()),
        customer_name: outgoing.customer_name.clone(),
        address: outgoing.address.clone(),
        date_created: today.clone(),
        due_date: today.clone(),
        items: outgoing.items.clone(),
        payment_details: vec![PaymentDetail {
            amount: Money::from_units(1_000_000),
            date: today.clone(),
        }],
        bank_name: settings.default_bank_name.clone(),
        account_number: settings.default_account_number.clone(),
        account_name: settings.default_account_name.clone(),
        created_by: settings.default_admin_name.clone(),
        approved_by: settings.default_manager_name.clone(),
        ..Default::default()
    };
    invoice.recalculate();
    store.invoices().save(&invoice).await?;
    println!(
        "✓ Seeded invoice {} ({:?}, remaining {})",
        invoice.invoice_number, invoice.status, invoice.remaining_balance
    );

    // Delivery order for the same shipment
    let delivery = DeliveryOrder {
        id: generate_record_id(),
        do_number: numbering::next_do_number(&[], year),
        ref_po_number: Some(outgoing.po_number.clone()),
        customer_name: outgoing.customer_name.clone(),
        address: outgoing.address.clone(),
        date: today.clone(),
        driver_name: "Budi".to_string(),
        license_plate: "N 1234 AB".to_string(),
        items: vec![DoItem {
            id: "1".to_string(),
            name: "Keripik Singkong".to_string(),
            specification: "250g".to_string(),
            quantity: 200,
            unit: "pcs".to_string(),
            ..Default::default()
        }],
        status: DeliveryStatus::Preparing,
        warehouse_staff: settings.default_admin_name.clone(),
        ..Default::default()
    };
    store.delivery_orders().save(&delivery).await?;
    println!("✓ Seeded delivery order {}", delivery.do_number);

    // Shipping label for the parcel
    let label = ShippingLabel {
        id: generate_record_id(),
        date_created: today,
        customer_name: outgoing.customer_name.clone(),
        address: outgoing.address.clone(),
        phone: "081234567890".to_string(),
        sender_name: settings.default_account_name.clone(),
        qr_content: format!("https://wa.me/62{}", settings.company_phone.trim_start_matches('0')),
    };
    store.shipping_labels().save(&label).await?;
    println!("✓ Seeded shipping label");

    // Show the reconciled stock view as a smoke test
    println!();
    println!("Inventory summary:");
    for line in store.inventory_summary().await? {
        println!(
            "  {} {}: in {}, out {}, remaining {}",
            line.name, line.specification, line.total_in, line.total_out, line.remaining
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
