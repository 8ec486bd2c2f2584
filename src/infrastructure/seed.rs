//! Default room catalog

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::{DomainResult, RepositoryProvider, Room, RoomCategory};

/// The resort's four showcase rooms.
pub fn default_catalog() -> Vec<Room> {
    vec![
        Room::new(
            "1",
            "Oceanview Paradise Chalet",
            RoomCategory::Chalet,
            Decimal::from(450),
            2,
        )
        .with_weekend_price(Decimal::from(550))
        .with_description(
            "A secluded chalet on the bluff with floor-to-ceiling windows over the bay.",
        )
        .with_amenities(["Ocean view", "Private deck", "Hot tub", "King bed", "Wi-Fi"])
        .with_images(["https://picsum.photos/seed/chalet/800/600"]),
        Room::new(
            "2",
            "Alpine Retreat Suite",
            RoomCategory::Suite,
            Decimal::from(320),
            4,
        )
        .with_weekend_price(Decimal::from(380))
        .with_description("Two-bedroom suite with a stone fireplace and mountain views.")
        .with_amenities(["Fireplace", "Kitchenette", "Mountain view", "Wi-Fi"])
        .with_images(["https://picsum.photos/seed/suite/800/600"]),
        Room::new(
            "3",
            "Garden Deluxe Room",
            RoomCategory::StandardRoom,
            Decimal::from(180),
            2,
        )
        .with_weekend_price(Decimal::from(220))
        .with_description("Quiet room opening onto the tropical garden terrace.")
        .with_amenities(["Garden terrace", "Queen bed", "Rain shower", "Wi-Fi"])
        .with_images(["https://picsum.photos/seed/garden/800/600"]),
        Room::new(
            "4",
            "Royal Palms Resort Villa",
            RoomCategory::ResortVilla,
            Decimal::from(150),
            8,
        )
        .with_weekend_price(Decimal::from(200))
        .with_description("Private villa for groups, priced per guest per night.")
        .with_amenities(["Private pool", "Butler service", "Outdoor kitchen", "Wi-Fi"])
        .with_images(["https://picsum.photos/seed/villa/800/600"]),
    ]
}

/// Insert the default catalog when no rooms exist. Returns the number of
/// rooms inserted.
pub async fn seed_default_catalog(repos: &dyn RepositoryProvider) -> DomainResult<usize> {
    let existing = repos.rooms().count().await?;
    if existing > 0 {
        info!(rooms = existing, "Catalog already populated, skipping seed");
        return Ok(0);
    }

    let catalog = default_catalog();
    let count = catalog.len();
    for room in catalog {
        repos.rooms().save(room).await?;
    }
    info!(rooms = count, "Seeded default room catalog");
    Ok(count)
}
