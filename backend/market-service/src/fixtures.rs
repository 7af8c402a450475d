/// Bengali demo listings for a fresh marketplace
use crate::models::{ListingCategory, ListingKind, NewListing};
use crate::services::MarketService;
use krishi_common::{AuthorSnapshot, Config, UserType};
use uuid::Uuid;

/// Seed demo data unless configuration disables it
pub fn seed_if_enabled(service: &MarketService, config: &Config) -> usize {
    if config.seed_demo_data {
        seed(service)
    } else {
        0
    }
}

/// Seed demo listings. Returns the number created.
pub fn seed(service: &MarketService) -> usize {
    let karim = AuthorSnapshot::new(
        Uuid::new_v4(),
        "করিম মিয়া",
        "রংপুর",
        UserType::Farmer,
    )
    .verified();
    let jamal = AuthorSnapshot::new(Uuid::new_v4(), "জামাল উদ্দিন", "কুষ্টিয়া", UserType::Farmer);

    let listings = [
        (
            karim.clone(),
            NewListing {
                title: "ব্রি ধান-২৮, নতুন সংগ্রহ".to_string(),
                description: "এই মৌসুমের টাটকা ধান। আর্দ্রতা ১৪% এর নিচে।".to_string(),
                category: ListingCategory::Crops,
                kind: ListingKind::Sell,
                price: 1250,
                unit: Some("প্রতি মণ".to_string()),
                location: "রংপুর".to_string(),
                tags: vec!["ধান".to_string(), "ব্রি-২৮".to_string()],
                images: vec![],
            },
        ),
        (
            jamal.clone(),
            NewListing {
                title: "পাওয়ার টিলার ভাড়া".to_string(),
                description: "দৈনিক চুক্তিতে পাওয়ার টিলার ভাড়া দেওয়া হয়, চালকসহ।".to_string(),
                category: ListingCategory::Machinery,
                kind: ListingKind::Rent,
                price: 1800,
                unit: Some("প্রতি দিন".to_string()),
                location: "কুষ্টিয়া".to_string(),
                tags: vec!["যন্ত্রপাতি".to_string()],
                images: vec![],
            },
        ),
        (
            jamal,
            NewListing {
                title: "জৈব সার বিক্রি".to_string(),
                description: "গোবর ভিত্তিক জৈব সার, বস্তা প্রতি ৫০ কেজি।".to_string(),
                category: ListingCategory::Fertilizer,
                kind: ListingKind::Sell,
                price: 600,
                unit: Some("প্রতি বস্তা".to_string()),
                location: "কুষ্টিয়া".to_string(),
                tags: vec!["জৈব সার".to_string()],
                images: vec![],
            },
        ),
    ];

    let mut created = 0;
    for (author, new) in listings {
        if service.create_listing(new, author).is_ok() {
            created += 1;
        }
    }

    tracing::debug!(listings = created, "marketplace fixtures seeded");
    created
}
