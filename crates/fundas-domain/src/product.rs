//! Product domain types.

use serde::{Deserialize, Serialize};

/// Skate category a boot cover fits.
///
/// Wire values are the ones the storefront has always sent
/// (`artisticos`, `hockey`, `velocidad`, `recreativos`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCategory {
    #[serde(rename = "artisticos")]
    Artistic,
    #[serde(rename = "hockey")]
    Hockey,
    #[serde(rename = "velocidad")]
    Speed,
    #[serde(rename = "recreativos")]
    Recreational,
}

impl ProductCategory {
    pub const ALL: [Self; 4] = [Self::Artistic, Self::Hockey, Self::Speed, Self::Recreational];

    /// Wire value stored in the database and sent over the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Artistic => "artisticos",
            Self::Hockey => "hockey",
            Self::Speed => "velocidad",
            Self::Recreational => "recreativos",
        }
    }

    /// Parse a wire value. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "artisticos" => Some(Self::Artistic),
            "hockey" => Some(Self::Hockey),
            "velocidad" => Some(Self::Speed),
            "recreativos" => Some(Self::Recreational),
            _ => None,
        }
    }

    /// Human-readable label shown by the storefront.
    pub fn label(self) -> &'static str {
        match self {
            Self::Artistic => "Patines Artísticos",
            Self::Hockey => "Patines de Hockey",
            Self::Speed => "Patines de Velocidad",
            Self::Recreational => "Patines Recreativos",
        }
    }
}
