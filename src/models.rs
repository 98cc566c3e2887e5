// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! # API Data Models
//!
//! Request and response data structures used by the REST API. All types
//! derive `Serialize`, `Deserialize`, and `ToSchema` for automatic JSON
//! handling and OpenAPI documentation.
//!
//! The wire format is camelCase, the contract the web client was built
//! against. Persistent rows and wire responses share the same structs;
//! detail responses compose a row with `#[serde(flatten)]` plus joined
//! neighbor data (seller, reporter, restaurant).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Pagination
// =============================================================================

/// Default page size when the client does not pass `limit`.
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// Paginated response envelope: `{items, hasMore, total}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// The requested page of items.
    pub items: Vec<T>,
    /// Whether more items exist past this page.
    pub has_more: bool,
    /// Total number of items matching the filter.
    pub total: usize,
}

impl<T> Paginated<T> {
    /// Empty page, used when the request context carries no university.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            has_more: false,
            total: 0,
        }
    }

    /// Slice a filtered, pre-ordered result set into a page.
    pub fn page(items: Vec<T>, offset: usize, limit: usize) -> Self {
        let total = items.len();
        let page: Vec<T> = items.into_iter().skip(offset).take(limit).collect();
        let has_more = offset + page.len() < total;
        Self {
            items: page,
            has_more,
            total,
        }
    }
}

// =============================================================================
// Profiles
// =============================================================================

/// A user profile row, keyed by the authentication subject id.
///
/// The row is provisioned by the identity system; the onboarding flow
/// fills in `universityName` and flips `onboardingCompleted`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Subject id from the verified token (`sub` claim).
    pub id: String,
    pub full_name: Option<String>,
    /// University the user belongs to; set during onboarding.
    pub university_name: Option<String>,
    pub department: Option<String>,
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub mobile_number: Option<String>,
    pub id_card_url: Option<String>,
    /// Set by the id-card verification endpoint.
    pub is_verified: bool,
    pub onboarding_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Fresh, un-onboarded profile for a subject id.
    pub fn new(subject_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: subject_id.into(),
            full_name: None,
            university_name: None,
            department: None,
            class_name: None,
            mobile_number: None,
            id_card_url: None,
            is_verified: false,
            onboarding_completed: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body for `PATCH /api/profiles/onboarding`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    pub university_name: Option<String>,
}

/// Body for `PATCH /api/profiles/{id}`. Only these fields are writable.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub department: Option<String>,
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub mobile_number: Option<String>,
}

impl ProfileUpdateRequest {
    /// True when no writable field is present.
    pub fn is_empty(&self) -> bool {
        self.department.is_none() && self.class_name.is_none() && self.mobile_number.is_none()
    }
}

/// Body for `POST /api/profiles/{id}/verify`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub id_card_url: Option<String>,
}

/// Result of an id-card verification attempt.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub success: bool,
    pub message: String,
}

// =============================================================================
// Marketplace
// =============================================================================

/// A marketplace listing, scoped to the seller's university.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceItem {
    pub id: String,
    pub seller_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Price kept as a display string (clients send `"450"` or `450`).
    pub price: String,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub manufactured_year: Option<String>,
    pub is_negotiable: bool,
    pub image_url: Option<String>,
    pub university_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Price input accepted as either a JSON string or number.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PriceInput {
    Text(String),
    Number(f64),
}

impl PriceInput {
    pub fn into_string(self) -> String {
        match self {
            PriceInput::Text(s) => s,
            PriceInput::Number(n) => n.to_string(),
        }
    }
}

/// Body for `POST /api/marketplace`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMarketplaceItemRequest {
    pub title: String,
    pub description: Option<String>,
    pub price: PriceInput,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub manufactured_year: Option<String>,
    #[serde(default)]
    pub is_negotiable: bool,
    pub image_url: Option<String>,
}

/// Seller fields joined into a marketplace item detail.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerInfo {
    pub id: String,
    pub full_name: Option<String>,
    pub mobile_number: Option<String>,
    pub department: Option<String>,
    pub is_verified: bool,
}

impl From<Profile> for SellerInfo {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            full_name: profile.full_name,
            mobile_number: profile.mobile_number,
            department: profile.department,
            is_verified: profile.is_verified,
        }
    }
}

/// Response for `GET /api/marketplace/{id}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MarketplaceItemDetail {
    #[serde(flatten)]
    pub item: MarketplaceItem,
    pub seller: Option<SellerInfo>,
}

// =============================================================================
// Lost & Found
// =============================================================================

/// Whether a report is about a lost or a found item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LostFoundType {
    Lost,
    Found,
}

/// A lost-and-found report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LostFoundReport {
    pub id: String,
    pub reporter_id: String,
    pub item_name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: LostFoundType,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub university_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for `POST /api/lostfound`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLostFoundRequest {
    pub item_name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: LostFoundType,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<String>,
}

/// List entry with the reporter's display name flattened in.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LostFoundListItem {
    #[serde(flatten)]
    pub report: LostFoundReport,
    pub reporter_name: String,
}

/// Reporter fields joined into a report detail.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReporterInfo {
    pub id: String,
    pub full_name: Option<String>,
    pub mobile_number: Option<String>,
    pub department: Option<String>,
}

impl From<Profile> for ReporterInfo {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            full_name: profile.full_name,
            mobile_number: profile.mobile_number,
            department: profile.department,
        }
    }
}

/// Response for `GET /api/lostfound/{id}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LostFoundDetail {
    #[serde(flatten)]
    pub report: LostFoundReport,
    pub reporter: Option<ReporterInfo>,
}

// =============================================================================
// Social Feed
// =============================================================================

/// A post on the university social feed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub likes_count: i64,
    pub university_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for `POST /api/social`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
}

// =============================================================================
// Announcements
// =============================================================================

/// A university-wide announcement (read via the dashboard).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub university_name: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Food & Restaurants
// =============================================================================

/// A restaurant near campus.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodListing {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    /// Comma-separated labels, e.g. "Vegetarian, Fast Food, Chinese".
    pub tags: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Opening hours, e.g. "9 AM - 11 PM".
    pub timing: Option<String>,
    pub price_range: Option<String>,
    pub rating: f64,
    pub review_count: i64,
    pub image_url: Option<String>,
    pub location: String,
    pub university_name: String,
    pub created_at: DateTime<Utc>,
}

/// A dish on a restaurant's menu.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    /// "Starters", "Main Course", "Drinks", "Desserts".
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_veg: bool,
    pub is_available: bool,
    pub rating: f64,
    pub review_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Response for `GET /api/food/{id}`: restaurant plus full menu.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RestaurantDetail {
    #[serde(flatten)]
    pub restaurant: FoodListing,
    pub menu: Vec<MenuItem>,
}

/// Minimal restaurant fields joined into a menu-item detail.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRef {
    pub id: String,
    pub name: String,
    pub location: String,
}

/// Response for `GET /api/food/menu-item/{id}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MenuItemDetail {
    #[serde(flatten)]
    pub item: MenuItem,
    pub restaurant: Option<RestaurantRef>,
}

// =============================================================================
// Accommodation
// =============================================================================

/// Housing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AccommodationType {
    #[serde(rename = "PG")]
    Pg,
    Hostel,
    Apartment,
}

impl AccommodationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccommodationType::Pg => "PG",
            AccommodationType::Hostel => "Hostel",
            AccommodationType::Apartment => "Apartment",
        }
    }
}

/// A housing listing near campus.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationListing {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccommodationType,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Comma-separated labels, e.g. "WiFi, AC, Laundry, Gym".
    pub amenities: Option<String>,
    /// JSON-encoded array of image URLs; parsed in the detail response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub rent_range: Option<String>,
    pub rating: f64,
    pub review_count: i64,
    pub location: String,
    pub contact: Option<String>,
    pub university_name: String,
    pub created_at: DateTime<Utc>,
}

/// Response for `GET /api/accommodation/{id}` with images decoded.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccommodationDetail {
    #[serde(flatten)]
    pub listing: AccommodationListing,
    pub images: Vec<String>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Response for `GET /api/dashboard/summary`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardSummary {
    /// Three most recent marketplace listings.
    pub marketplace: Vec<MarketplaceItem>,
    /// Two most recent announcements.
    pub announcements: Vec<Announcement>,
    /// Two most recent feed posts.
    pub social: Vec<SocialPost>,
}
