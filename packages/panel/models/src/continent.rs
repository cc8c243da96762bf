//! Country to continent lookup.
//!
//! A static, exact-match table from country names (as they appear in the
//! `Entity` column of the World Bank / Our World in Data GDP exports) to
//! the six inhabited continents. Aggregates such as `"World"` or
//! `"High-income countries"` are deliberately absent and resolve to
//! [`Continent::Other`].

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Continent an entity belongs to.
///
/// [`Continent::Other`] is the sentinel for entities missing from the
/// lookup table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Continent {
    /// Africa
    Africa,
    /// Asia, including the Middle East and the Caucasus
    Asia,
    /// Europe, including Russia
    Europe,
    /// North America, Central America and the Caribbean
    #[serde(rename = "North America")]
    #[strum(serialize = "North America")]
    NorthAmerica,
    /// Oceania
    Oceania,
    /// South America
    #[serde(rename = "South America")]
    #[strum(serialize = "South America")]
    SouthAmerica,
    /// Entities without a continent mapping (aggregates, territories)
    Other,
}

impl Continent {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Africa,
            Self::Asia,
            Self::Europe,
            Self::NorthAmerica,
            Self::Oceania,
            Self::SouthAmerica,
            Self::Other,
        ]
    }
}

/// Result of looking up an entity in the continent table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinentLookup {
    /// The entity is a known country.
    Mapped(Continent),
    /// The entity is not in the table.
    Unmapped,
}

impl ContinentLookup {
    /// Resolves the lookup to a continent, using [`Continent::Other`] for
    /// unmapped entities.
    #[must_use]
    pub const fn resolve(self) -> Continent {
        match self {
            Self::Mapped(continent) => continent,
            Self::Unmapped => Continent::Other,
        }
    }

    /// Whether the entity was found in the table.
    #[must_use]
    pub const fn is_mapped(self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}

/// Looks up the continent for a country name.
///
/// Matching is exact and case-sensitive.
#[must_use]
pub fn continent_for(entity: &str) -> ContinentLookup {
    let continent = match entity {
        // ── Europe ────────────────────────────────────────
        "Albania"
        | "Andorra"
        | "Austria"
        | "Belarus"
        | "Belgium"
        | "Bosnia and Herzegovina"
        | "Bulgaria"
        | "Croatia"
        | "Cyprus"
        | "Czech Republic"
        | "Czechia"
        | "Denmark"
        | "Estonia"
        | "Finland"
        | "France"
        | "Germany"
        | "Greece"
        | "Hungary"
        | "Iceland"
        | "Ireland"
        | "Italy"
        | "Latvia"
        | "Lithuania"
        | "Luxembourg"
        | "Malta"
        | "Moldova"
        | "Monaco"
        | "Montenegro"
        | "Netherlands"
        | "North Macedonia"
        | "Norway"
        | "Poland"
        | "Portugal"
        | "Romania"
        | "Russia"
        | "San Marino"
        | "Serbia"
        | "Slovakia"
        | "Slovenia"
        | "Spain"
        | "Sweden"
        | "Switzerland"
        | "Ukraine"
        | "United Kingdom"
        | "Vatican" => Continent::Europe,

        // ── Asia ──────────────────────────────────────────
        "Afghanistan"
        | "Armenia"
        | "Azerbaijan"
        | "Bahrain"
        | "Bangladesh"
        | "Bhutan"
        | "Brunei"
        | "Cambodia"
        | "China"
        | "Georgia"
        | "India"
        | "Indonesia"
        | "Iran"
        | "Iraq"
        | "Israel"
        | "Japan"
        | "Jordan"
        | "Kazakhstan"
        | "Kuwait"
        | "Kyrgyzstan"
        | "Laos"
        | "Lebanon"
        | "Malaysia"
        | "Maldives"
        | "Mongolia"
        | "Myanmar"
        | "Nepal"
        | "North Korea"
        | "Oman"
        | "Pakistan"
        | "Palestine"
        | "Philippines"
        | "Qatar"
        | "Saudi Arabia"
        | "Singapore"
        | "South Korea"
        | "Sri Lanka"
        | "Syria"
        | "Taiwan"
        | "Tajikistan"
        | "Thailand"
        | "Timor"
        | "Turkey"
        | "Turkmenistan"
        | "United Arab Emirates"
        | "Uzbekistan"
        | "Vietnam"
        | "Yemen" => Continent::Asia,

        // ── Africa ────────────────────────────────────────
        "Algeria"
        | "Angola"
        | "Benin"
        | "Botswana"
        | "Burkina Faso"
        | "Burundi"
        | "Cameroon"
        | "Cape Verde"
        | "Central African Republic"
        | "Chad"
        | "Comoros"
        | "Congo"
        | "Democratic Republic of Congo"
        | "Djibouti"
        | "Egypt"
        | "Equatorial Guinea"
        | "Eritrea"
        | "Eswatini"
        | "Ethiopia"
        | "Gabon"
        | "Gambia"
        | "Ghana"
        | "Guinea"
        | "Guinea-Bissau"
        | "Ivory Coast"
        | "Kenya"
        | "Lesotho"
        | "Liberia"
        | "Libya"
        | "Madagascar"
        | "Malawi"
        | "Mali"
        | "Mauritania"
        | "Mauritius"
        | "Morocco"
        | "Mozambique"
        | "Namibia"
        | "Niger"
        | "Nigeria"
        | "Rwanda"
        | "Sao Tome and Principe"
        | "Senegal"
        | "Seychelles"
        | "Sierra Leone"
        | "Somalia"
        | "South Africa"
        | "South Sudan"
        | "Sudan"
        | "Tanzania"
        | "Togo"
        | "Tunisia"
        | "Uganda"
        | "Zambia"
        | "Zimbabwe" => Continent::Africa,

        // ── North America ─────────────────────────────────
        "Canada"
        | "United States"
        | "Mexico"
        | "Antigua and Barbuda"
        | "Bahamas"
        | "Barbados"
        | "Belize"
        | "Costa Rica"
        | "Cuba"
        | "Dominica"
        | "Dominican Republic"
        | "El Salvador"
        | "Grenada"
        | "Guatemala"
        | "Haiti"
        | "Honduras"
        | "Jamaica"
        | "Nicaragua"
        | "Panama"
        | "Saint Kitts and Nevis"
        | "Saint Lucia"
        | "Saint Vincent and the Grenadines"
        | "Trinidad and Tobago" => Continent::NorthAmerica,

        // ── South America ─────────────────────────────────
        "Argentina"
        | "Bolivia"
        | "Brazil"
        | "Chile"
        | "Colombia"
        | "Ecuador"
        | "Guyana"
        | "Paraguay"
        | "Peru"
        | "Suriname"
        | "Uruguay"
        | "Venezuela" => Continent::SouthAmerica,

        // ── Oceania ───────────────────────────────────────
        "Australia"
        | "Fiji"
        | "Kiribati"
        | "Marshall Islands"
        | "Micronesia"
        | "Nauru"
        | "New Zealand"
        | "Palau"
        | "Papua New Guinea"
        | "Samoa"
        | "Solomon Islands"
        | "Tonga"
        | "Tuvalu"
        | "Vanuatu" => Continent::Oceania,
        _ => return ContinentLookup::Unmapped,
    };

    ContinentLookup::Mapped(continent)
}
