//! Seed the database with sample café listings.
//!
//! Rows that already exist (by name) are skipped, so the command is safe to
//! re-run.

use cuppa_core::{CoffeePrice, PriceError, SeatsBucket};
use cuppa_web::db::{self, CafeRepository, RepositoryError};
use cuppa_web::models::CafeDraft;

use super::database_url;

/// Insert the sample cafés.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or an insert fails for
/// a reason other than a duplicate name.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = database_url();

    tracing::info!(url = %database_url, "Connecting to database");
    let pool = db::create_pool(&database_url).await?;
    db::MIGRATOR.run(&pool).await?;

    let repo = CafeRepository::new(&pool);
    let mut inserted = 0_usize;
    let mut skipped = 0_usize;

    for draft in sample_cafes()? {
        match repo.create(&draft).await {
            Ok(cafe) => {
                inserted += 1;
                tracing::info!(name = %cafe.name, id = %cafe.id, "Inserted");
            }
            Err(RepositoryError::Conflict(_)) => {
                skipped += 1;
                tracing::info!(name = %draft.name, "Already present, skipped");
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!("Seeding complete: {inserted} inserted, {skipped} skipped");
    Ok(())
}

fn sample_cafes() -> Result<Vec<CafeDraft>, PriceError> {
    Ok(vec![
        CafeDraft {
            name: "Monmouth Coffee Company".to_owned(),
            map_url: "https://goo.gl/maps/L9YJopnsTinrbMfJ7".to_owned(),
            img_url: "https://images.unsplash.com/photo-1453614512568-c4024d13c247".to_owned(),
            location: "Borough Market, London".to_owned(),
            has_sockets: false,
            has_toilet: true,
            has_wifi: false,
            can_take_calls: false,
            seats: Some(SeatsBucket::TenToTwenty),
            coffee_price: Some(CoffeePrice::parse("2.80")?),
        },
        CafeDraft {
            name: "Prufrock Coffee".to_owned(),
            map_url: "https://goo.gl/maps/YqPB3YkKPvEjeTkQ9".to_owned(),
            img_url: "https://images.unsplash.com/photo-1501339847302-ac426a4a7cbb".to_owned(),
            location: "Leather Lane, London".to_owned(),
            has_sockets: true,
            has_toilet: true,
            has_wifi: true,
            can_take_calls: false,
            seats: Some(SeatsBucket::ThirtyToForty),
            coffee_price: Some(CoffeePrice::parse("3.00")?),
        },
        CafeDraft {
            name: "Kaffeine".to_owned(),
            map_url: "https://goo.gl/maps/XPhDo5mLmwRoWa2B8".to_owned(),
            img_url: "https://images.unsplash.com/photo-1554118811-1e0d58224f24".to_owned(),
            location: "Great Titchfield Street, London".to_owned(),
            has_sockets: false,
            has_toilet: true,
            has_wifi: true,
            can_take_calls: true,
            seats: Some(SeatsBucket::TwentyToThirty),
            coffee_price: Some(CoffeePrice::parse("3.20")?),
        },
        CafeDraft {
            name: "Climpson & Sons".to_owned(),
            map_url: "https://goo.gl/maps/pPhpM5W3nCtprrzc6".to_owned(),
            img_url: "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085".to_owned(),
            location: "Broadway Market, London".to_owned(),
            has_sockets: true,
            has_toilet: false,
            has_wifi: true,
            can_take_calls: true,
            seats: Some(SeatsBucket::ZeroToTen),
            coffee_price: Some(CoffeePrice::parse("2.60")?),
        },
    ])
}
