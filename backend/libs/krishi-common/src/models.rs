/// Shared identity models
///
/// Every authored entity in KrishiLink carries a denormalized snapshot of
/// its author. The snapshot keeps the display fields the UI needs without a
/// join, while `user_id` is the stable identity used for every ownership
/// check. Display names are never compared for authorization.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of an account in the marketplace
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    /// Registered farmer selling produce and posting field updates
    Farmer,
    /// Buyer browsing the marketplace
    Customer,
    /// Agricultural expert answering diagnosis requests
    Expert,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Farmer => "farmer",
            UserType::Customer => "customer",
            UserType::Expert => "expert",
        }
    }
}

/// Denormalized author snapshot carried on authored entities
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorSnapshot {
    pub user_id: Uuid,
    pub name: String,
    pub location: String,
    pub verified: bool,
    pub user_type: UserType,
}

impl AuthorSnapshot {
    pub fn new(
        user_id: Uuid,
        name: impl Into<String>,
        location: impl Into<String>,
        user_type: UserType,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            location: location.into(),
            verified: false,
            user_type,
        }
    }

    pub fn verified(mut self) -> Self {
        self.verified = true;
        self
    }

    pub fn is_expert(&self) -> bool {
        self.user_type == UserType::Expert
    }
}

/// Normalize a tag list: trim, drop empties, dedup case-insensitively
/// preserving first occurrence. Shared by the feed and marketplace stores
/// so the two cannot drift apart.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_lowercase()))
        .map(|t| t.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_as_str() {
        assert_eq!(UserType::Farmer.as_str(), "farmer");
        assert_eq!(UserType::Expert.as_str(), "expert");
    }

    #[test]
    fn test_author_snapshot_builder() {
        let author = AuthorSnapshot::new(Uuid::new_v4(), "করিম মিয়া", "রংপুর", UserType::Farmer)
            .verified();
        assert!(author.verified);
        assert!(!author.is_expert());
    }

    #[test]
    fn test_normalize_tags_dedups_case_insensitively() {
        let tags = vec![
            "ধান".to_string(),
            " Dhan ".to_string(),
            "dhan".to_string(),
            "".to_string(),
        ];
        assert_eq!(normalize_tags(&tags), vec!["ধান", "Dhan"]);
    }

}
