//! Seed the cake catalogue with sample data.
//!
//! Inserts go through the same `CakeStore` the API uses, so names that
//! already exist are skipped rather than duplicated. Running the command
//! twice is harmless.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

use confectionery_api::db::{CakeStore, PgStore, RepositoryError};
use confectionery_api::models::NewCake;
use confectionery_core::Price;

use super::{CommandError, database_url};

/// Sample catalogue: name and price in minor units.
const SAMPLE_CAKES: &[(&str, u64)] = &[
    ("Bolo de Cenoura", 4_500),
    ("Bolo de Fubá", 3_800),
    ("Brigadeiro", 6_200),
    ("Red Velvet", 8_900),
    ("Torta de Limão", 5_400),
    ("Floresta Negra", 9_500),
];

/// Outcome of a seed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Insert the sample cakes into the database named by `DATABASE_URL`.
///
/// # Errors
///
/// Returns `CommandError` if `DATABASE_URL` is unset or a store operation fails.
pub async fn cakes() -> Result<SeedReport, CommandError> {
    let url = database_url()?;
    let pool = PgPool::connect(url.expose_secret()).await?;
    let store = PgStore::new(pool);

    seed_cakes(&store).await
}

/// Insert the sample cakes into any cake store.
///
/// # Errors
///
/// Returns `CommandError::Store` if a lookup or insert fails for a reason
/// other than the name already existing.
pub async fn seed_cakes(store: &dyn CakeStore) -> Result<SeedReport, CommandError> {
    let mut report = SeedReport::default();

    for &(name, price) in SAMPLE_CAKES {
        if store.find_cake_by_name(name).await?.is_some() {
            info!(name, "Cake exists, skipping");
            report.skipped += 1;
            continue;
        }

        let price = Price::from_minor_units(price)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        let cake = NewCake {
            name: name.to_string(),
            price,
        };

        match store.insert_cake(cake).await {
            Ok(cake) => {
                info!(cake_id = %cake.id, name, "Cake inserted");
                report.inserted += 1;
            }
            // Inserted concurrently since the lookup
            Err(RepositoryError::Conflict(_)) => report.skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(report)
}
