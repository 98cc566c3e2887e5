// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Typed repositories over the campus database, one per domain.

pub mod accommodation;
pub mod announcements;
pub mod food;
pub mod lostfound;
pub mod marketplace;
pub mod profiles;
pub mod social;

pub use accommodation::AccommodationRepository;
pub use announcements::AnnouncementRepository;
pub use food::FoodRepository;
pub use lostfound::LostFoundRepository;
pub use marketplace::MarketplaceRepository;
pub use profiles::ProfileRepository;
pub use social::SocialRepository;
