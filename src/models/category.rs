use serde::{Deserialize, Serialize};

/// Provider place-type filter for a built-in category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchType {
    Single(String),
    Multiple(Vec<String>),
}

impl SearchType {
    /// The type token sent to the provider, which accepts only one per query
    pub fn primary(&self) -> Option<&str> {
        match self {
            SearchType::Single(t) => Some(t.as_str()),
            SearchType::Multiple(types) => types.first().map(String::as_str),
        }
    }
}

/// Whether a category comes from the fixed table or from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryKind {
    BuiltIn { search_type: SearchType },
    Custom,
}

/// Resolved search-parameter bundle for one interest category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDescriptor {
    pub id: String,
    pub label: String,
    pub keywords: String,
    pub kind: CategoryKind,
}

impl CategoryDescriptor {
    pub fn is_custom(&self) -> bool {
        matches!(self.kind, CategoryKind::Custom)
    }

    pub fn search_type(&self) -> Option<&SearchType> {
        match &self.kind {
            CategoryKind::BuiltIn { search_type } => Some(search_type),
            CategoryKind::Custom => None,
        }
    }
}

/// A user-defined category as it arrives from the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCategory {
    pub id: String,
    pub label: String,
}

impl CustomCategory {
    /// Trims both fields, rejecting the entry when either ends up empty
    pub fn validated(self) -> Option<Self> {
        let id = self.id.trim();
        let label = self.label.trim();
        if id.is_empty() || label.is_empty() {
            return None;
        }
        Some(Self {
            id: id.to_string(),
            label: label.to_string(),
        })
    }
}

/// Category listing entry returned to clients
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategorySummary {
    pub id: String,
    pub label: String,
}

impl From<&CategoryDescriptor> for CategorySummary {
    fn from(descriptor: &CategoryDescriptor) -> Self {
        Self {
            id: descriptor.id.clone(),
            label: descriptor.label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_search_type() {
        assert_eq!(SearchType::Single("cafe".to_string()).primary(), Some("cafe"));
        assert_eq!(
            SearchType::Multiple(vec!["bar".to_string(), "night_club".to_string()]).primary(),
            Some("bar")
        );
        assert_eq!(SearchType::Multiple(vec![]).primary(), None);
    }

    #[test]
    fn test_search_type_deserializes_string_or_list() {
        let single: SearchType = serde_json::from_str(r#""spa""#).unwrap();
        assert_eq!(single, SearchType::Single("spa".to_string()));

        let multiple: SearchType = serde_json::from_str(r#"["bar","night_club"]"#).unwrap();
        assert_eq!(
            multiple,
            SearchType::Multiple(vec!["bar".to_string(), "night_club".to_string()])
        );
    }

    #[test]
    fn test_custom_category_validation() {
        let valid = CustomCategory {
            id: " custom-1 ".to_string(),
            label: " 古着屋 ".to_string(),
        }
        .validated()
        .unwrap();
        assert_eq!(valid.id, "custom-1");
        assert_eq!(valid.label, "古着屋");

        let blank_label = CustomCategory {
            id: "custom-2".to_string(),
            label: "   ".to_string(),
        };
        assert!(blank_label.validated().is_none());
    }
}
