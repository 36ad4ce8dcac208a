//! Visitable sites and visit types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed stations a visit can be logged against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "Punjabi Bagh")]
    PunjabiBagh,
    #[serde(rename = "Hauz Khas")]
    HauzKhas,
    #[serde(rename = "South Delhi")]
    SouthDelhi,
    #[serde(rename = "Noida Sector 62")]
    NoidaSector62,
    #[serde(rename = "Gurugram Cyber City")]
    GurugramCyberCity,
    #[serde(rename = "Connaught Place")]
    ConnaughtPlace,
    #[serde(rename = "Dwarka Sector 21")]
    DwarkaSector21,
    #[serde(rename = "Rohini Sector 7")]
    RohiniSector7,
    #[serde(rename = "Vasant Kunj")]
    VasantKunj,
    #[serde(rename = "Greater Kailash")]
    GreaterKailash,
    #[serde(rename = "Nehru Place")]
    NehruPlace,
    #[serde(rename = "Karol Bagh")]
    KarolBagh,
    #[serde(rename = "Lajpat Nagar")]
    LajpatNagar,
    #[serde(rename = "Saket")]
    Saket,
    #[serde(rename = "Janakpuri")]
    Janakpuri,
}

impl Location {
    /// All sites, in display order
    pub const ALL: [Location; 15] = [
        Location::PunjabiBagh,
        Location::HauzKhas,
        Location::SouthDelhi,
        Location::NoidaSector62,
        Location::GurugramCyberCity,
        Location::ConnaughtPlace,
        Location::DwarkaSector21,
        Location::RohiniSector7,
        Location::VasantKunj,
        Location::GreaterKailash,
        Location::NehruPlace,
        Location::KarolBagh,
        Location::LajpatNagar,
        Location::Saket,
        Location::Janakpuri,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Location::PunjabiBagh => "Punjabi Bagh",
            Location::HauzKhas => "Hauz Khas",
            Location::SouthDelhi => "South Delhi",
            Location::NoidaSector62 => "Noida Sector 62",
            Location::GurugramCyberCity => "Gurugram Cyber City",
            Location::ConnaughtPlace => "Connaught Place",
            Location::DwarkaSector21 => "Dwarka Sector 21",
            Location::RohiniSector7 => "Rohini Sector 7",
            Location::VasantKunj => "Vasant Kunj",
            Location::GreaterKailash => "Greater Kailash",
            Location::NehruPlace => "Nehru Place",
            Location::KarolBagh => "Karol Bagh",
            Location::LajpatNagar => "Lajpat Nagar",
            Location::Saket => "Saket",
            Location::Janakpuri => "Janakpuri",
        }
    }

    /// Look up by 1-based position in [`Location::ALL`]
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Location {
    type Err = String;

    /// Accepts a 1-based index or a case-insensitive site name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(index) = s.parse::<usize>() {
            return Self::from_index(index)
                .ok_or_else(|| format!("No location #{} (1-{})", index, Self::ALL.len()));
        }

        Self::ALL
            .iter()
            .copied()
            .find(|l| l.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown location: {}", s))
    }
}

/// Whether the visit is a home visit or a station visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitType {
    Home,
    Station,
}

impl VisitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitType::Home => "home",
            VisitType::Station => "station",
        }
    }
}

impl fmt::Display for VisitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(VisitType::Home),
            "station" => Ok(VisitType::Station),
            other => Err(format!("Unknown visit type: {}", other)),
        }
    }
}
