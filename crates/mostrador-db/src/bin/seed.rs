//! # Seed Data Generator
//!
//! Populates the database with a demo classification hierarchy and
//! inventory for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p mostrador-db --bin seed
//!
//! # Specify database path
//! cargo run -p mostrador-db --bin seed -- --db ./data/mostrador.db
//! ```
//!
//! ## Generated Data
//! - Business lines (Alimentos, Bebidas, Limpieza)
//! - Product families under each line, with attribute labels
//! - Brands and attribute values
//! - Demo products, each classified and carrying a generated SKU

use std::collections::HashMap;
use std::env;

use mostrador_core::{AttributeLabels, NewProduct, ProductKind};
use mostrador_db::{Database, DbConfig, Dimension};

/// (business line, families with their attribute labels)
const HIERARCHY: &[(&str, &[(&str, &str, &str)])] = &[
    (
        "Alimentos",
        &[
            ("Lácteos", "Color", "Tamaño"),
            ("Panificados", "Tipo", "Peso"),
            ("Almacén", "Tipo", "Peso"),
        ],
    ),
    (
        "Bebidas",
        &[
            ("Gaseosas", "Sabor", "Tamaño"),
            ("Aguas", "Tipo", "Tamaño"),
        ],
    ),
    (
        "Limpieza",
        &[("Hogar", "Aroma", "Tamaño")],
    ),
];

/// Demo products: (barcode, name, price cents, stock, family, brand,
/// attribute 1, attribute 2)
const PRODUCTS: &[(&str, &str, i64, i64, &str, &str, &str, &str)] = &[
    (
        "7790895000430",
        "Leche Entera 1L",
        1450,
        24,
        "Lácteos",
        "La Serenísima",
        "Blanco",
        "1L",
    ),
    (
        "7790895000447",
        "Leche Descremada 1L",
        1450,
        18,
        "Lácteos",
        "Sancor",
        "Blanco",
        "1L",
    ),
    (
        "7790040938405",
        "Pan Lactal",
        2100,
        12,
        "Panificados",
        "Bimbo",
        "Blanco",
        "500g",
    ),
    (
        "7790895001234",
        "Gaseosa Cola 2.25L",
        2800,
        30,
        "Gaseosas",
        "Coca-Cola",
        "Cola",
        "2.25L",
    ),
    (
        "7790670012345",
        "Agua Mineral 2L",
        1100,
        40,
        "Aguas",
        "Villavicencio",
        "Sin Gas",
        "2L",
    ),
    (
        "7791290789012",
        "Detergente Limón",
        1950,
        15,
        "Hogar",
        "Ala",
        "Limón",
        "750ml",
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./mostrador_dev.db");

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
                println!("Mostrador Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./mostrador_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Mostrador Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding classification hierarchy...");

    let classifications = db.classifications();
    let mut family_ids: HashMap<&str, i64> = HashMap::new();
    for (line_name, families) in HIERARCHY {
        let line_id = classifications
            .resolve(Dimension::BusinessLine, line_name)
            .await?;
        for (family_name, label_1, label_2) in *families {
            let family = classifications.create_family(line_id, family_name).await?;
            classifications
                .set_attribute_labels(
                    family.id,
                    &AttributeLabels {
                        label_1: label_1.to_string(),
                        label_2: label_2.to_string(),
                    },
                )
                .await?;
            family_ids.insert(family_name, family.id);
        }
    }
    println!("  {} business lines, {} families", HIERARCHY.len(), family_ids.len());

    println!();
    println!("Seeding products...");

    for (barcode, name, price_cents, stock, family_name, brand, attr_1, attr_2) in PRODUCTS {
        // Resolve the full classification by name, then encode and
        // associate the SKU before the product row references it.
        let family_id = *family_ids
            .get(family_name)
            .ok_or_else(|| format!("family {family_name} was not seeded"))?;
        let brand_id = classifications.resolve(Dimension::Brand, brand).await?;
        let attr_1_id = classifications
            .resolve(Dimension::AttributeValue, attr_1)
            .await?;
        let attr_2_id = classifications
            .resolve(Dimension::AttributeValue, attr_2)
            .await?;

        let sku = db
            .skus()
            .generate(family_id, brand_id, attr_1_id, attr_2_id)
            .await?;
        db.skus()
            .associate(&sku, family_id, brand_id, attr_1_id, attr_2_id)
            .await?;

        let product = db
            .products()
            .insert(&NewProduct {
                barcode: barcode.to_string(),
                name: name.to_string(),
                price_cents: *price_cents,
                stock: *stock,
                kind: ProductKind::Unit,
                sku: Some(sku.clone()),
            })
            .await?;

        println!("  {} → {} ({})", product.barcode, sku, product.name);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
