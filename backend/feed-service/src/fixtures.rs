/// Bengali demo data for the feed
///
/// Mirrors the seed content a fresh deployment shows before real users
/// post anything. Seeding goes through the service so every invariant
/// (validation, tag normalization, prepend order) applies to fixtures too.
use crate::models::NewPost;
use crate::services::FeedService;
use krishi_common::{AuthorSnapshot, Config, UserType};
use uuid::Uuid;

/// Seed demo data unless configuration disables it
pub fn seed_if_enabled(service: &FeedService, config: &Config) -> usize {
    if config.seed_demo_data {
        seed(service)
    } else {
        0
    }
}

/// Seed a handful of demo posts and comments. Returns the number of posts
/// created.
pub fn seed(service: &FeedService) -> usize {
    let karim = AuthorSnapshot::new(
        Uuid::new_v4(),
        "করিম মিয়া",
        "রংপুর",
        UserType::Farmer,
    )
    .verified();
    let fatema = AuthorSnapshot::new(Uuid::new_v4(), "ফাতেমা বেগম", "যশোর", UserType::Farmer);
    let dr_rahman = AuthorSnapshot::new(
        Uuid::new_v4(),
        "ড. মাহমুদুর রহমান",
        "ঢাকা",
        UserType::Expert,
    )
    .verified();

    let posts = [
        (
            karim.clone(),
            "এই মৌসুমে আমার ধানের ফলন খুব ভালো হয়েছে। ব্রি ধান-২৮ জাত ব্যবহার করেছি।",
            vec!["ধান", "ফলন"],
        ),
        (
            fatema.clone(),
            "সবজি ক্ষেতে জৈব সার ব্যবহারে ভালো ফল পাচ্ছি। কারো অভিজ্ঞতা থাকলে জানাবেন।",
            vec!["সবজি", "জৈব সার"],
        ),
        (
            dr_rahman.clone(),
            "বর্ষার আগে পাট ক্ষেতে পানি নিষ্কাশনের ব্যবস্থা রাখুন। জলাবদ্ধতায় শিকড় পচে যায়।",
            vec!["পাট", "পরামর্শ"],
        ),
    ];

    let mut created = Vec::new();
    for (author, content, tags) in posts {
        let new = NewPost {
            content: content.to_string(),
            tags: tags.into_iter().map(String::from).collect(),
            ..Default::default()
        };
        if let Ok(post) = service.create_post(new, author) {
            created.push(post);
        }
    }

    // One comment thread so the demo feed is not sterile
    if let Some(advice_post) = created.last() {
        let _ = service.add_comment(
            advice_post.id,
            "খুবই দরকারি পরামর্শ, ধন্যবাদ।",
            karim.clone(),
        );
    }

    tracing::debug!(posts = created.len(), "feed fixtures seeded");
    created.len()
}
