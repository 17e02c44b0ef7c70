//! Offset project listings and the purchase flow.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Category of an offset project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    ForestConservation,
    RenewableEnergy,
    WasteManagement,
}

/// A carbon-credit listing in the marketplace catalog.
///
/// Listings are global — the catalog is the one surface deliberately not
/// tenant-scoped; ownership only begins at purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetListing {
    pub listing_id: String,
    pub project_name: String,
    pub project_type: ProjectType,
    pub location: String,
    pub credits_available: f64,
    pub price_per_credit: f64,
    pub verification_standard: String,
    pub vintage_year: i32,
    pub seller: String,
    pub rating: f64,
    pub co_benefits: Vec<String>,
}

/// Catalog query filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingFilter {
    pub project_type: Option<ProjectType>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
}

/// Outcome of a successful purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub listing_id: String,
    pub project_name: String,
    pub credits_purchased: f64,
    pub price_per_credit: f64,
    pub total_cost: f64,
    /// Synthetic transaction reference in ledger format.
    pub ledger_reference: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarketError {
    #[error("listing not found")]
    ListingNotFound,

    #[error("insufficient credits available")]
    InsufficientCredits,

    #[error("credit amount must be positive")]
    InvalidAmount,
}

/// The marketplace catalog.
///
/// Purchases mutate availability, so the API layer wraps the catalog in a
/// lock; the catalog itself stays synchronous and lock-free.
#[derive(Debug, Clone)]
pub struct ListingCatalog {
    listings: Vec<OffsetListing>,
}

impl ListingCatalog {
    pub fn new(listings: Vec<OffsetListing>) -> Self {
        Self { listings }
    }

    /// The stock catalog the platform ships with.
    pub fn seed() -> Self {
        Self::new(vec![
            OffsetListing {
                listing_id: "LIST-001".to_string(),
                project_name: "Amazon Rainforest Preservation".to_string(),
                project_type: ProjectType::ForestConservation,
                location: "Brazil".to_string(),
                credits_available: 1000.0,
                price_per_credit: 25.50,
                verification_standard: "VCS".to_string(),
                vintage_year: 2023,
                seller: "GreenEarth Foundation".to_string(),
                rating: 4.8,
                co_benefits: vec![
                    "Biodiversity".to_string(),
                    "Community Development".to_string(),
                ],
            },
            OffsetListing {
                listing_id: "LIST-002".to_string(),
                project_name: "Solar Farm Development".to_string(),
                project_type: ProjectType::RenewableEnergy,
                location: "India".to_string(),
                credits_available: 2500.0,
                price_per_credit: 18.75,
                verification_standard: "Gold Standard".to_string(),
                vintage_year: 2023,
                seller: "CleanEnergy Partners".to_string(),
                rating: 4.6,
                co_benefits: vec!["Job Creation".to_string(), "Energy Access".to_string()],
            },
            OffsetListing {
                listing_id: "LIST-003".to_string(),
                project_name: "Methane Capture Facility".to_string(),
                project_type: ProjectType::WasteManagement,
                location: "California, USA".to_string(),
                credits_available: 750.0,
                price_per_credit: 32.00,
                verification_standard: "ACR".to_string(),
                vintage_year: 2024,
                seller: "WasteToEnergy Corp".to_string(),
                rating: 4.9,
                co_benefits: vec!["Air Quality".to_string(), "Waste Reduction".to_string()],
            },
        ])
    }

    /// Listings matching the filter.
    pub fn list(&self, filter: &ListingFilter) -> Vec<OffsetListing> {
        self.listings
            .iter()
            .filter(|l| {
                filter
                    .project_type
                    .is_none_or(|t| l.project_type == t)
                    && filter.max_price.is_none_or(|p| l.price_per_credit <= p)
                    && filter.min_rating.is_none_or(|r| l.rating >= r)
            })
            .cloned()
            .collect()
    }

    pub fn get(&self, listing_id: &str) -> Option<&OffsetListing> {
        self.listings.iter().find(|l| l.listing_id == listing_id)
    }

    /// Buy credits from a listing, decrementing availability.
    pub fn purchase(&mut self, listing_id: &str, credits: f64) -> Result<Purchase, MarketError> {
        if !credits.is_finite() || credits <= 0.0 {
            return Err(MarketError::InvalidAmount);
        }

        let listing = self
            .listings
            .iter_mut()
            .find(|l| l.listing_id == listing_id)
            .ok_or(MarketError::ListingNotFound)?;

        if credits > listing.credits_available {
            return Err(MarketError::InsufficientCredits);
        }

        listing.credits_available -= credits;

        Ok(Purchase {
            listing_id: listing.listing_id.clone(),
            project_name: listing.project_name.clone(),
            credits_purchased: credits,
            price_per_credit: listing.price_per_credit,
            total_cost: credits * listing.price_per_credit,
            ledger_reference: ledger_reference(),
        })
    }
}

/// 32-byte hex reference in transaction-hash format.
fn ledger_reference() -> String {
    let a = Uuid::now_v7();
    let b = Uuid::now_v7();
    format!("0x{}{}", a.simple(), b.simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_compose() {
        let catalog = ListingCatalog::seed();

        let cheap = catalog.list(&ListingFilter {
            max_price: Some(20.0),
            ..Default::default()
        });
        assert_eq!(cheap.len(), 1);
        assert_eq!(cheap[0].listing_id, "LIST-002");

        let top_rated_forest = catalog.list(&ListingFilter {
            project_type: Some(ProjectType::ForestConservation),
            min_rating: Some(4.7),
            ..Default::default()
        });
        assert_eq!(top_rated_forest.len(), 1);
    }

    #[test]
    fn purchase_decrements_availability() {
        let mut catalog = ListingCatalog::seed();
        let purchase = catalog.purchase("LIST-001", 100.0).unwrap();

        assert!((purchase.total_cost - 2550.0).abs() < 1e-9);
        assert!(purchase.ledger_reference.starts_with("0x"));
        assert_eq!(purchase.ledger_reference.len(), 66);
        assert!((catalog.get("LIST-001").unwrap().credits_available - 900.0).abs() < 1e-9);
    }

    #[test]
    fn overdraw_is_rejected_without_mutation() {
        let mut catalog = ListingCatalog::seed();
        let err = catalog.purchase("LIST-003", 10_000.0).unwrap_err();
        assert_eq!(err, MarketError::InsufficientCredits);
        assert!((catalog.get("LIST-003").unwrap().credits_available - 750.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_listing() {
        let mut catalog = ListingCatalog::seed();
        assert_eq!(
            catalog.purchase("LIST-999", 1.0).unwrap_err(),
            MarketError::ListingNotFound
        );
    }

    #[test]
    fn zero_amount_rejected() {
        let mut catalog = ListingCatalog::seed();
        assert_eq!(
            catalog.purchase("LIST-001", 0.0).unwrap_err(),
            MarketError::InvalidAmount
        );
    }
}
