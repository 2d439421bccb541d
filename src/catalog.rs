// ABOUTME: Immutable catalog of meals and activities with restriction and season filtering
// ABOUTME: Hands out lazy, restartable candidate iterators in declaration order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Catalog
//!
//! The catalog is built once, validated, and then only read. It is `Sync`
//! and can be shared by concurrent solves without locking.

use std::collections::{BTreeSet, HashMap};
use std::slice;
use tracing::debug;
use vitaplan_core::errors::{SolveError, SolveResult};
use vitaplan_core::models::{Activity, CatalogItem, HealthProfile, ItemKind, Meal, Season};

/// Restriction and season filter applied to candidates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Items carrying any of these tags are excluded
    pub restrictions: BTreeSet<String>,
    /// When set, items unavailable in this season are excluded
    pub season: Option<Season>,
}

impl CatalogFilter {
    /// Filter derived from a profile's restrictions and season preference
    #[must_use]
    pub fn from_profile(profile: &HealthProfile) -> Self {
        Self {
            restrictions: profile.restrictions.clone(),
            season: profile.preferences.season,
        }
    }

    /// Whether an item passes the filter
    #[must_use]
    pub fn admits(&self, item: &CatalogItem) -> bool {
        item.is_eligible(&self.restrictions, self.season)
    }
}

/// Lazy iterator over eligible items of one kind, in declaration order
///
/// Cloning yields an independent iterator from the same position, so a
/// fresh clone taken before iteration restarts the sequence.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    items: slice::Iter<'a, CatalogItem>,
    kind: Option<ItemKind>,
    filter: &'a CatalogFilter,
}

impl<'a> Iterator for Candidates<'a> {
    type Item = &'a CatalogItem;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.kind;
        let filter = self.filter;
        self.items
            .by_ref()
            .find(|item| kind.is_none_or(|k| item.kind() == k) && filter.admits(item))
    }
}

/// Validated, immutable collection of catalog items
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and invalid values
    ///
    /// # Errors
    ///
    /// Returns `InvalidCatalog` on duplicate ids, negative or non-finite
    /// nutrient amounts, or non-positive MET values
    pub fn new(items: Vec<CatalogItem>) -> SolveResult<Self> {
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if item.id().is_empty() {
                return Err(SolveError::invalid_catalog(format!(
                    "item at position {position} has an empty id"
                )));
            }
            if index.insert(item.id().to_owned(), position).is_some() {
                return Err(SolveError::invalid_catalog(format!(
                    "duplicate item id `{}`",
                    item.id()
                )));
            }
            match item {
                CatalogItem::Meal(meal) if meal.nutrients.has_invalid_amounts() => {
                    return Err(SolveError::invalid_catalog(format!(
                        "meal `{}` has negative or non-finite nutrient amounts",
                        meal.id
                    )));
                }
                CatalogItem::Activity(activity)
                    if !activity.met.is_finite() || activity.met <= 0.0 =>
                {
                    return Err(SolveError::invalid_catalog(format!(
                        "activity `{}` has a non-positive MET value",
                        activity.id
                    )));
                }
                CatalogItem::Meal(_) | CatalogItem::Activity(_) => {}
            }
        }

        debug!(items = items.len(), "Catalog built");
        Ok(Self { items, index })
    }

    /// Parse a JSON array of catalog items
    ///
    /// # Errors
    ///
    /// Returns `InvalidCatalog` if the JSON is malformed or fails validation
    pub fn from_json_str(json: &str) -> SolveResult<Self> {
        let items: Vec<CatalogItem> = serde_json::from_str(json)
            .map_err(|e| SolveError::invalid_catalog(format!("malformed JSON: {e}")))?;
        Self::new(items)
    }

    /// Eligible items of `kind` passing `filter`
    #[must_use]
    pub fn candidates<'a>(&'a self, kind: ItemKind, filter: &'a CatalogFilter) -> Candidates<'a> {
        Candidates {
            items: self.items.iter(),
            kind: Some(kind),
            filter,
        }
    }

    /// Eligible meals passing `filter`
    pub fn meals<'a>(
        &'a self,
        filter: &'a CatalogFilter,
    ) -> impl Iterator<Item = &'a Meal> + Clone + 'a {
        self.candidates(ItemKind::Meal, filter)
            .filter_map(|item| match item {
                CatalogItem::Meal(meal) => Some(meal),
                CatalogItem::Activity(_) => None,
            })
    }

    /// Eligible activities passing `filter`
    pub fn activities<'a>(
        &'a self,
        filter: &'a CatalogFilter,
    ) -> impl Iterator<Item = &'a Activity> + Clone + 'a {
        self.candidates(ItemKind::Activity, filter)
            .filter_map(|item| match item {
                CatalogItem::Activity(activity) => Some(activity),
                CatalogItem::Meal(_) => None,
            })
    }

    /// Look up an item by id
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&CatalogItem> {
        self.index.get(id).and_then(|position| self.items.get(*position))
    }

    /// All items in declaration order
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
