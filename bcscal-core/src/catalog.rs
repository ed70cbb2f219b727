//! The declarative catalog: categories of classes and sessions, as written in
//! `configuration.yaml`.
//!
//! ```yaml
//! categories:
//!   yoga:
//!     calendar: abc123@group.calendar.google.com
//!     default:
//!       location: Salle 2
//!       duration: 60
//!     items:
//!       - title: Yoga doux
//!         start_day: 01/09/2025
//!         start_time: 14h00
//!         duration: 90
//! ```
//!
//! Category order is kept as written. Every item is merged with its
//! category's `default` block and checked when the catalog is built, so a
//! malformed catalog is rejected before anything touches a calendar.

use std::path::Path;

use chrono_tz::Tz;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{BcsError, BcsResult};
use crate::time_window::TimeWindow;

/// Item attributes as written in YAML, all optional so the same shape serves
/// both items and category defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemSpec {
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub start_day: Option<String>,
    pub start_time: Option<String>,
    pub duration: Option<u32>,
}

impl ItemSpec {
    /// Fill attributes missing from `self` with those of `defaults`.
    pub fn merged_with(&self, defaults: &ItemSpec) -> ItemSpec {
        ItemSpec {
            title: self.title.clone().or_else(|| defaults.title.clone()),
            location: self.location.clone().or_else(|| defaults.location.clone()),
            description: self
                .description
                .clone()
                .or_else(|| defaults.description.clone()),
            start_day: self.start_day.clone().or_else(|| defaults.start_day.clone()),
            start_time: self
                .start_time
                .clone()
                .or_else(|| defaults.start_time.clone()),
            duration: self.duration.or(defaults.duration),
        }
    }
}

/// One effective event occurrence: an [`ItemSpec`] with defaults merged in and
/// every required attribute present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    pub location: String,
    pub description: String,
    /// `DD/MM/YYYY`
    pub start_day: String,
    /// `HHhMM`
    pub start_time: String,
    /// Minutes, at least 1.
    pub duration: u32,
}

impl Item {
    pub fn from_spec(spec: &ItemSpec, defaults: &ItemSpec) -> Result<Self, String> {
        let merged = spec.merged_with(defaults);
        let required = |value: Option<String>, field: &str| {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| format!("missing field '{field}'"))
        };

        let duration = merged.duration.ok_or("missing field 'duration'")?;
        if duration == 0 {
            return Err("'duration' must be at least 1 minute".to_string());
        }

        Ok(Item {
            title: required(merged.title, "title")?,
            location: merged.location.unwrap_or_default(),
            description: merged.description.unwrap_or_default(),
            start_day: required(merged.start_day, "start_day")?,
            start_time: required(merged.start_time, "start_time")?,
            duration,
        })
    }

    pub fn window(&self, tz: Tz) -> BcsResult<TimeWindow> {
        TimeWindow::build(&self.start_day, &self.start_time, self.duration, tz)
    }
}

/// A named group of items published to one calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub calendar_id: String,
    pub defaults: ItemSpec,
    pub items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCategory {
    calendar: String,
    #[serde(default)]
    default: ItemSpec,
    #[serde(default)]
    items: Vec<ItemSpec>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    categories: IndexMap<String, RawCategory>,
}

impl Category {
    fn from_raw(name: String, raw: RawCategory) -> BcsResult<Self> {
        if raw.calendar.trim().is_empty() {
            return Err(BcsError::Config(format!(
                "category '{name}': 'calendar' must not be empty"
            )));
        }

        let items = raw
            .items
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                Item::from_spec(spec, &raw.default).map_err(|reason| {
                    BcsError::Config(format!("category '{name}', item #{}: {reason}", i + 1))
                })
            })
            .collect::<BcsResult<Vec<_>>>()?;

        Ok(Category {
            name,
            calendar_id: raw.calendar,
            defaults: raw.default,
            items,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn from_yaml_str(yaml: &str) -> BcsResult<Self> {
        let raw: RawCatalog =
            serde_yaml::from_str(yaml).map_err(|e| BcsError::Config(e.to_string()))?;

        let categories = raw
            .categories
            .into_iter()
            .map(|(name, raw)| Category::from_raw(name, raw))
            .collect::<BcsResult<Vec<_>>>()?;

        Ok(Catalog { categories })
    }

    pub fn load(path: &Path) -> BcsResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BcsError::Config(format!("Could not read catalog {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Build every item's window once so bad dates and times are reported
    /// before any category is reconciled.
    pub fn validate(&self, tz: Tz) -> BcsResult<()> {
        for category in &self.categories {
            for item in &category.items {
                item.window(tz).map_err(|e| {
                    BcsError::Config(format!(
                        "category '{}', item '{}': {e}",
                        category.name, item.title
                    ))
                })?;
            }
        }
        Ok(())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, name: &str) -> BcsResult<&Category> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| BcsError::CategoryNotFound {
                name: name.to_string(),
                available: self
                    .categories
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// All categories, or only `name` when given.
    pub fn select(&self, name: Option<&str>) -> BcsResult<Vec<&Category>> {
        match name {
            Some(name) => Ok(vec![self.get(name)?]),
            None => Ok(self.categories.iter().collect()),
        }
    }
}
