//! Facility categories and their visual treatment

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Icon and colors used for a category on the map and in the results list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStyle {
    /// Icon class name (Font Awesome)
    pub icon: String,

    /// Foreground / marker color
    pub color: String,

    /// Light background tint
    pub background: String,
}

impl CategoryStyle {
    pub fn new(icon: &str, color: &str, background: &str) -> Self {
        Self {
            icon: icon.to_string(),
            color: color.to_string(),
            background: background.to_string(),
        }
    }
}

/// The fixed set of recognized facility categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Municipality,
    Hospital,
    Clinic,
    Directorate,
    Court,
    CivilStatus,
    PassportOffice,
    Daira,
    School,
    University,
    Notary,
    Lawyer,
    Bailiff,
    Architect,
    /// Fallback for unrecognized types
    Default,
}

impl Category {
    pub const ALL: [Category; 15] = [
        Category::Municipality,
        Category::Hospital,
        Category::Clinic,
        Category::Directorate,
        Category::Court,
        Category::CivilStatus,
        Category::PassportOffice,
        Category::Daira,
        Category::School,
        Category::University,
        Category::Notary,
        Category::Lawyer,
        Category::Bailiff,
        Category::Architect,
        Category::Default,
    ];

    /// Resolve a facility's `type` field. Unknown values map to `Default`.
    pub fn from_type(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| *c != Category::Default && c.label() == value)
            .unwrap_or(Category::Default)
    }

    /// The `type` string registered facilities carry for this category
    pub fn label(&self) -> &'static str {
        match self {
            Category::Municipality => "بلدية",
            Category::Hospital => "مستشفى",
            Category::Clinic => "عيادة",
            Category::Directorate => "مديرية",
            Category::Court => "محكمة",
            Category::CivilStatus => "وحدة الحالة المدنية",
            Category::PassportOffice => "مصلحة الجوازات",
            Category::Daira => "دائرة",
            Category::School => "مدرسة",
            Category::University => "جامعة",
            Category::Notary => "موثق",
            Category::Lawyer => "محامي",
            Category::Bailiff => "محضر قضائي",
            Category::Architect => "مهندس معماري",
            Category::Default => "default",
        }
    }

    /// Built-in style for this category
    pub fn default_style(&self) -> CategoryStyle {
        match self {
            Category::Municipality => CategoryStyle::new("fas fa-landmark", "#1b5e42", "#e8f5e9"),
            Category::Hospital => CategoryStyle::new("fas fa-hospital", "#c62828", "#ffebee"),
            Category::Clinic => CategoryStyle::new("fas fa-notes-medical", "#e53935", "#ffebee"),
            Category::Directorate => {
                CategoryStyle::new("fas fa-building-columns", "#1565c0", "#e3f2fd")
            }
            Category::Court => CategoryStyle::new("fas fa-gavel", "#6a1b9a", "#f3e5f5"),
            Category::CivilStatus => {
                CategoryStyle::new("fas fa-file-signature", "#00695c", "#e0f2f1")
            }
            Category::PassportOffice => CategoryStyle::new("fas fa-passport", "#0277bd", "#e1f5fe"),
            Category::Daira => CategoryStyle::new("fas fa-city", "#558b2f", "#f1f8e9"),
            Category::School => CategoryStyle::new("fas fa-school", "#f57f17", "#fffde7"),
            Category::University => {
                CategoryStyle::new("fas fa-graduation-cap", "#4527a0", "#ede7f6")
            }
            Category::Notary => CategoryStyle::new("fas fa-stamp", "#4e342e", "#efebe9"),
            Category::Lawyer => CategoryStyle::new("fas fa-scale-balanced", "#37474f", "#eceff1"),
            Category::Bailiff => CategoryStyle::new("fas fa-file-contract", "#455a64", "#eceff1"),
            Category::Architect => {
                CategoryStyle::new("fas fa-drafting-compass", "#5d4037", "#efebe9")
            }
            Category::Default => CategoryStyle::new("fas fa-map-pin", "#1b5e42", "#e8f5e9"),
        }
    }
}

/// Style lookup table, built-in styles plus configured overrides
///
/// Overrides are keyed by the raw `type` string, so a deployment can also
/// style types outside the fixed category set.
#[derive(Debug, Clone, Default)]
pub struct CategoryStyles {
    overrides: HashMap<String, CategoryStyle>,
}

impl CategoryStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the style of a `type` value (or `"default"`)
    pub fn insert(&mut self, type_name: impl Into<String>, style: CategoryStyle) {
        self.overrides.insert(type_name.into(), style);
    }

    /// Style for a facility `type`, falling back to the default category
    pub fn resolve(&self, facility_type: &str) -> CategoryStyle {
        if let Some(style) = self.overrides.get(facility_type) {
            return style.clone();
        }

        let category = Category::from_type(facility_type);
        if category == Category::Default {
            if let Some(style) = self.overrides.get(Category::Default.label()) {
                return style.clone();
            }
        }

        category.default_style()
    }
}
