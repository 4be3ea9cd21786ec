//! Top-level dashboard sections

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::NavigationError;

/// Navigable areas of the dashboard. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Dashboard,
    Tours,
    Variants,
    Pricing,
    Categories,
    Cities,
    Bookings,
    Reviews,
    Customers,
    Mail,
    Coupons,
    Collections,
    Countries,
    Currencies,
    Banners,
    Partners,
    Faqs,
    Analytics,
    Settings,
    Users,
}

impl SectionId {
    pub const ALL: [SectionId; 20] = [
        SectionId::Dashboard,
        SectionId::Tours,
        SectionId::Variants,
        SectionId::Pricing,
        SectionId::Categories,
        SectionId::Cities,
        SectionId::Bookings,
        SectionId::Reviews,
        SectionId::Customers,
        SectionId::Mail,
        SectionId::Coupons,
        SectionId::Collections,
        SectionId::Countries,
        SectionId::Currencies,
        SectionId::Banners,
        SectionId::Partners,
        SectionId::Faqs,
        SectionId::Analytics,
        SectionId::Settings,
        SectionId::Users,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Identifier used in commands and REST paths
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Dashboard => "dashboard",
            SectionId::Tours => "tours",
            SectionId::Variants => "variants",
            SectionId::Pricing => "pricing",
            SectionId::Categories => "categories",
            SectionId::Cities => "cities",
            SectionId::Bookings => "bookings",
            SectionId::Reviews => "reviews",
            SectionId::Customers => "customers",
            SectionId::Mail => "mail",
            SectionId::Coupons => "coupons",
            SectionId::Collections => "collections",
            SectionId::Countries => "countries",
            SectionId::Currencies => "currencies",
            SectionId::Banners => "banners",
            SectionId::Partners => "partners",
            SectionId::Faqs => "faqs",
            SectionId::Analytics => "analytics",
            SectionId::Settings => "settings",
            SectionId::Users => "users",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SectionId::Dashboard => "Dashboard",
            SectionId::Tours => "Tours",
            SectionId::Variants => "Variants",
            SectionId::Pricing => "Pricing",
            SectionId::Categories => "Categories",
            SectionId::Cities => "Cities",
            SectionId::Bookings => "Bookings",
            SectionId::Reviews => "Reviews",
            SectionId::Customers => "Customers",
            SectionId::Mail => "Mail",
            SectionId::Coupons => "Coupons",
            SectionId::Collections => "Collections",
            SectionId::Countries => "Countries",
            SectionId::Currencies => "Currencies",
            SectionId::Banners => "Banners",
            SectionId::Partners => "Partners",
            SectionId::Faqs => "FAQs",
            SectionId::Analytics => "Analytics",
            SectionId::Settings => "Settings",
            SectionId::Users => "Users",
        }
    }

    /// Position in [`SectionId::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Sections that support a create form
    pub fn is_editable(&self) -> bool {
        !matches!(
            self,
            SectionId::Dashboard | SectionId::Analytics | SectionId::Mail | SectionId::Settings
        )
    }

    pub fn cycle(&self, forward: bool) -> SectionId {
        let index = self.index();
        let next = if forward {
            (index + 1) % Self::COUNT
        } else {
            (index + Self::COUNT - 1) % Self::COUNT
        };
        Self::ALL[next]
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        let needle = match needle.as_str() {
            "home" | "overview" => "dashboard",
            "faq" => "faqs",
            "user" => "users",
            other => other,
        };
        SectionId::ALL
            .iter()
            .copied()
            .find(|section| section.as_str() == needle)
            .ok_or_else(|| NavigationError::InvalidSection(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_position_in_all() {
        for (pos, section) in SectionId::ALL.iter().enumerate() {
            assert_eq!(section.index(), pos);
        }
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Tours".parse::<SectionId>().unwrap(), SectionId::Tours);
        assert_eq!(" bookings ".parse::<SectionId>().unwrap(), SectionId::Bookings);
        assert_eq!("faq".parse::<SectionId>().unwrap(), SectionId::Faqs);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "flights".parse::<SectionId>().unwrap_err();
        assert_eq!(err, NavigationError::InvalidSection("flights".to_string()));
    }

    #[test]
    fn cycle_wraps_both_ways() {
        assert_eq!(SectionId::Users.cycle(true), SectionId::Dashboard);
        assert_eq!(SectionId::Dashboard.cycle(false), SectionId::Users);
        assert_eq!(SectionId::Tours.cycle(true), SectionId::Variants);
    }
}
