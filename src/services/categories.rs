use std::collections::{HashMap, HashSet};

use crate::{
    error::{AppError, AppResult},
    models::{CategoryDescriptor, CategoryKind, CustomCategory, SearchType},
};

/// Generic image for custom categories
pub const CUSTOM_PLACEHOLDER: &str = "/placeholder.svg?height=400&width=400";

/// Number of leading built-in categories offered when a user has no preference
const DEFAULT_CATEGORY_COUNT: usize = 4;

struct BuiltIn {
    id: &'static str,
    label: &'static str,
    types: &'static [&'static str],
    keyword: &'static str,
    placeholder: &'static str,
}

const BUILTIN_CATEGORIES: &[BuiltIn] = &[
    BuiltIn {
        id: "cafe",
        label: "カフェ",
        types: &["cafe"],
        keyword: "カフェ",
        placeholder: "/images/placeholders/cafe.svg",
    },
    BuiltIn {
        id: "restaurant",
        label: "レストラン",
        types: &["restaurant"],
        keyword: "レストラン",
        placeholder: "/images/placeholders/restaurant.svg",
    },
    BuiltIn {
        id: "public_bath",
        label: "銭湯",
        types: &["spa"],
        keyword: "銭湯",
        placeholder: "/images/placeholders/public_bath.svg",
    },
    BuiltIn {
        id: "tourist_attraction",
        label: "観光スポット",
        types: &["tourist_attraction"],
        keyword: "観光スポット",
        placeholder: "/images/placeholders/tourist_attraction.svg",
    },
    BuiltIn {
        id: "bar",
        label: "バー",
        types: &["bar", "night_club"],
        keyword: "バー",
        placeholder: "/images/placeholders/bar.svg",
    },
];

fn builtin(id: &str) -> Option<&'static BuiltIn> {
    BUILTIN_CATEGORIES.iter().find(|b| b.id == id)
}

impl BuiltIn {
    fn descriptor(&self) -> CategoryDescriptor {
        let search_type = match self.types {
            [single] => SearchType::Single((*single).to_string()),
            many => SearchType::Multiple(many.iter().map(|t| (*t).to_string()).collect()),
        };

        CategoryDescriptor {
            id: self.id.to_string(),
            label: self.label.to_string(),
            keywords: self.keyword.to_string(),
            kind: CategoryKind::BuiltIn { search_type },
        }
    }
}

/// Every built-in category, in table order
pub fn builtin_categories() -> Vec<CategoryDescriptor> {
    BUILTIN_CATEGORIES.iter().map(BuiltIn::descriptor).collect()
}

/// Ids offered when the caller names no categories
pub fn default_category_ids() -> Vec<String> {
    BUILTIN_CATEGORIES
        .iter()
        .take(DEFAULT_CATEGORY_COUNT)
        .map(|b| b.id.to_string())
        .collect()
}

/// Image used for a spot of this category when the provider has no photo
pub fn placeholder_for(descriptor: &CategoryDescriptor) -> &'static str {
    match descriptor.kind {
        CategoryKind::Custom => CUSTOM_PLACEHOLDER,
        CategoryKind::BuiltIn { .. } => builtin(&descriptor.id)
            .map(|b| b.placeholder)
            .unwrap_or(CUSTOM_PLACEHOLDER),
    }
}

/// Maps category ids to provider search parameters
///
/// Built-in ids come from a fixed table. Custom categories are supplied per
/// request and searched by their label alone. Lookups are pure.
#[derive(Debug, Clone, Default)]
pub struct CategoryResolver {
    custom: HashMap<String, CustomCategory>,
}

impl CategoryResolver {
    pub fn new(custom_categories: &[CustomCategory]) -> Self {
        let mut custom = HashMap::new();
        for category in custom_categories {
            custom
                .entry(category.id.clone())
                .or_insert_with(|| category.clone());
        }
        Self { custom }
    }

    /// Resolves one id; the built-in table wins over a custom category with the same id
    pub fn resolve(&self, category_id: &str) -> AppResult<CategoryDescriptor> {
        if let Some(b) = builtin(category_id) {
            return Ok(b.descriptor());
        }

        self.custom
            .get(category_id)
            .map(|custom| CategoryDescriptor {
                id: custom.id.clone(),
                label: custom.label.clone(),
                keywords: custom.label.clone(),
                kind: CategoryKind::Custom,
            })
            .ok_or_else(|| AppError::UnknownCategory(category_id.to_string()))
    }

    /// Resolves a batch, dropping unknown ids and repeated ids
    ///
    /// Output keeps the first-occurrence order of the input.
    pub fn resolve_all(&self, category_ids: &[String]) -> Vec<CategoryDescriptor> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(category_ids.len());

        for id in category_ids {
            if !seen.insert(id.as_str()) {
                continue;
            }
            match self.resolve(id) {
                Ok(descriptor) => resolved.push(descriptor),
                Err(e) => tracing::warn!(category = %id, error = %e, "Dropping unresolvable category"),
            }
        }

        resolved
    }
}
