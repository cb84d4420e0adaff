//! Seed the database with demo products and news.

use mini_shop_api::db::{self, NewsRepository, ProductRepository};
use mini_shop_api::models::{NewsInput, ProductInput};
use rust_decimal::Decimal;
use tracing::info;

use super::{CommandError, database_url};

/// Demo catalog: title, price in cents, image.
const PRODUCTS: &[(&str, i64, &str)] = &[
    ("Classic T-Shirt", 2499, "/images/products/tshirt.png"),
    ("Canvas Tote Bag", 1850, "/images/products/tote.png"),
    ("Enamel Mug", 1200, "/images/products/mug.png"),
    ("Sticker Pack", 499, "/images/products/stickers.png"),
];

const NEWS: &[&str] = &[
    "/images/news/summer-sale.png",
    "/images/news/new-arrivals.png",
];

fn demo_products() -> impl Iterator<Item = ProductInput> {
    PRODUCTS.iter().map(|&(title, cents, image)| ProductInput {
        title: title.to_string(),
        price: Decimal::new(cents, 2),
        image: image.to_string(),
    })
}

/// Insert the demo data.
///
/// Does nothing if products or news already exist, unless `force` is set.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing or a query fails.
pub async fn run(force: bool) -> Result<(), CommandError> {
    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let products = ProductRepository::new(&pool);
    let news = NewsRepository::new(&pool);

    let existing_products = products.count_all().await?;
    let existing_news = news.count_all().await?;
    if !force && (existing_products > 0 || existing_news > 0) {
        info!(
            products = existing_products,
            news = existing_news,
            "Database already has data, skipping seed (use --force to override)"
        );
        return Ok(());
    }

    for input in demo_products() {
        let product = products.create(&input).await?;
        info!(id = %product.id, title = %product.title, "Created product");
    }

    for image in NEWS {
        let entry = news
            .create(&NewsInput {
                image: (*image).to_string(),
            })
            .await?;
        info!(id = %entry.id, "Created news");
    }

    info!("Seed complete!");
    Ok(())
}
