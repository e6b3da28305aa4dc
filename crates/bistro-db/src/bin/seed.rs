//! # Seed Data Generator
//!
//! Populates the database with a small menu and floor plan for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p bistro-db --bin seed
//!
//! # Specify database path
//! cargo run -p bistro-db --bin seed -- --db ./data/bistro.db
//! ```

use chrono::Utc;
use std::env;

use bistro_core::{MenuItem, Table, DEFAULT_LOW_STOCK_THRESHOLD};
use bistro_db::{Database, DbConfig};
use uuid::Uuid;

/// (name, description, price cents, stock)
const MENU: &[(&str, &str, i64, i64)] = &[
    ("Bruschetta", "Grilled bread, tomato, basil", 650, 40),
    ("Caprese Salad", "Mozzarella, tomato, olive oil", 850, 30),
    ("Margherita", "Tomato, mozzarella, basil", 1250, 50),
    ("Quattro Formaggi", "Four cheese pizza", 1450, 35),
    ("Spaghetti Carbonara", "Guanciale, pecorino, egg", 1350, 45),
    ("Lasagne", "Beef ragù, béchamel", 1400, 25),
    ("Risotto ai Funghi", "Porcini mushroom risotto", 1500, 20),
    ("Tiramisu", "Mascarpone, espresso, cocoa", 700, 30),
    ("Panna Cotta", "Vanilla cream, berry coulis", 650, 25),
    ("Espresso", "Single shot", 250, 200),
    ("House Red", "Glass of house red wine", 550, 60),
    ("San Pellegrino", "Sparkling water 500ml", 350, 80),
];

/// (floor number, capacity)
const TABLES: &[(i64, i64)] = &[
    (1, 2),
    (2, 2),
    (3, 4),
    (4, 4),
    (5, 4),
    (6, 6),
    (7, 6),
    (8, 8),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./bistro_dev.db");

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
                println!("Bistro Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./bistro_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bistro Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.menu().list().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} menu items", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding menu...");
    let now = Utc::now();
    for (name, description, price_cents, stock) in MENU {
        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price_cents: *price_cents,
            inventory_count: *stock,
            is_active: true,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            created_at: now,
            updated_at: now,
        };
        db.menu().insert(&item).await?;
    }
    println!("  {} menu items", MENU.len());

    println!("Seeding tables...");
    for (number, capacity) in TABLES {
        let table = Table {
            id: Uuid::new_v4().to_string(),
            number: *number,
            capacity: *capacity,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.tables().insert(&table).await?;
    }
    println!("  {} tables", TABLES.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
