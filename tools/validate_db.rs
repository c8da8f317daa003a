//! Consistency checks for the catalog tables.
//!
//! Reports products stored under more than one category (left behind when a
//! category change could not remove the old copy), rows with out-of-range
//! values, and catalog images that lack a blob or whose category has no
//! product. `--fix` keeps the most recently updated copy of each duplicated
//! product.

use anyhow::Context;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use sqlx::Row;
use std::env;

#[derive(Parser)]
#[command(about = "Validate catalog database consistency")]
struct Cli {
    #[arg(long)]
    database_url: Option<String>,

    /// Delete stale product copies, keeping the newest per id
    #[arg(long)]
    fix: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let db_url = cli
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .context("DATABASE_URL must be set or passed with --database-url")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await
        .context("connecting to database")?;

    // Products present in more than one category partition
    let duplicated = sqlx::query(
        r#"SELECT id, array_agg(category ORDER BY updated_at DESC) AS categories
           FROM products GROUP BY id HAVING COUNT(*) > 1"#,
    )
    .fetch_all(&pool)
    .await?;

    println!("Products stored under several categories: {}", duplicated.len());
    for row in duplicated.iter() {
        let id: uuid::Uuid = row.get("id");
        let categories: Vec<String> = row.get("categories");
        println!("id: {}, categories (newest first): {:?}", id, categories);

        if cli.fix {
            let stale = &categories[1..];
            let removed = sqlx::query("DELETE FROM products WHERE id = $1 AND category = ANY($2)")
                .bind(id)
                .bind(stale)
                .execute(&pool)
                .await?
                .rows_affected();
            println!("Fixed: {} kept '{}', removed {} stale copies", id, categories[0], removed);
        }
    }

    let invalid_products = sqlx::query(
        r#"SELECT id, category, price FROM products
           WHERE price < 0 OR price = 'NaN'::float8 OR btrim(category) = '' OR btrim(name) = ''"#,
    )
    .fetch_all(&pool)
    .await?;

    println!("Products with invalid values: {}", invalid_products.len());
    for row in invalid_products.iter() {
        let id: uuid::Uuid = row.get("id");
        let category: String = row.get("category");
        let price: f64 = row.get("price");
        println!("id: {}, category: '{}', price: {}", id, category, price);
    }

    let unnamed_images = sqlx::query(
        r#"SELECT id FROM catalog_images WHERE btrim(blob_name) = '' OR btrim(blob_url) = ''"#,
    )
    .fetch_all(&pool)
    .await?;

    println!("Catalog images without a blob: {}", unnamed_images.len());
    for row in unnamed_images.iter() {
        let id: uuid::Uuid = row.get("id");
        println!("id: {}", id);
    }

    let orphaned_images = sqlx::query(
        r#"SELECT i.id, i.product_category FROM catalog_images i
           WHERE NOT EXISTS (SELECT 1 FROM products p WHERE p.category = i.product_category)"#,
    )
    .fetch_all(&pool)
    .await?;

    println!("Catalog images without a product in their category: {}", orphaned_images.len());
    for row in orphaned_images.iter() {
        let id: uuid::Uuid = row.get("id");
        let category: String = row.get("product_category");
        println!("id: {}, productCategory: {}", id, category);
    }

    Ok(())
}
