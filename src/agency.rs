//! Static catalogs of agencies, transaction types and stations.

use crate::error::Error;

/// An operator or ticket zone, as recorded on a trip.
#[derive(Debug, PartialEq, Eq)]
pub struct Agency {
    pub name: &'static str,
    pub short_name: &'static str,
}

/// Returned for agency codes missing from the catalog.
pub static UNKNOWN_AGENCY: Agency = Agency {
    name: "Tuntematon",
    short_name: "?",
};

static AGENCIES: [Agency; 5] = [
    Agency {
        name: "Sisäinen lippu",
        short_name: "SIS",
    },
    Agency {
        name: "Seutulippu",
        short_name: "SEUTU",
    },
    Agency {
        name: "Metro",
        short_name: "METRO",
    },
    Agency {
        name: "Lähijuna",
        short_name: "JUNA",
    },
    Agency {
        name: "Suomenlinnan lautta",
        short_name: "LAUTTA",
    },
];

/// Agency code of the metro.
pub const METRO: u32 = 2;

/// Label of stored-value refills.
pub const REFILL_LABEL: &str = "Arvon lataus";

/// Look up an agency by code.
pub fn agency(code: u32) -> &'static Agency {
    AGENCIES.get(code as usize).unwrap_or(&UNKNOWN_AGENCY)
}

/// The kind of event a trip record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    PurseUse,
    Cancel,
    TapIn,
    TapOut,
    PassUse,
    Unknown(u32),
}

impl TransactionType {
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => Self::PurseUse,
            1 => Self::Cancel,
            2 => Self::TapIn,
            3 => Self::TapOut,
            4 => Self::PassUse,
            _ => Self::Unknown(code),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PurseUse => "purse-use",
            Self::Cancel => "cancel",
            Self::TapIn => "tap-in",
            Self::TapOut => "tap-out",
            Self::PassUse => "pass-use",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// A stop on the metro line.
#[derive(Debug, PartialEq, Eq)]
pub struct Station {
    pub name: &'static str,
    pub short_name: &'static str,
}

macro_rules! stations {
    ($(($name:literal, $short:literal)),* $(,)?) => {
        [$(Station { name: $name, short_name: $short }),*]
    };
}

/// Metro stations, west to east, then the Vuosaari branch.
pub static STATIONS: [Station; 17] = stations![
    ("Ruoholahti", "RL"),
    ("Kamppi", "KP"),
    ("Rautatientori", "RT"),
    ("Kaisaniemi", "KS"),
    ("Hakaniemi", "HN"),
    ("Sörnäinen", "SN"),
    ("Kalasatama", "KA"),
    ("Kulosaari", "KL"),
    ("Herttoniemi", "HT"),
    ("Siilitie", "ST"),
    ("Itäkeskus", "IK"),
    ("Myllypuro", "MP"),
    ("Kontula", "KO"),
    ("Mellunmäki", "MM"),
    ("Puotila", "PT"),
    ("Rastila", "RA"),
    ("Vuosaari", "VS"),
];

/// Coach numbers that denote a station rather than a vehicle.
const STATION_COACHES: core::ops::RangeInclusive<u32> = 0x300..=0x3FF;

/// Whether an agency and coach number denote a rail trip.
pub fn is_rail(agency: u32, coach: u32) -> bool {
    agency == METRO && STATION_COACHES.contains(&coach)
}

/// Look up a station by index.
pub fn station(index: u32) -> Result<&'static Station, Error> {
    STATIONS.get(index as usize).ok_or(Error::OutOfRangeIndex {
        index,
        len: STATIONS.len(),
    })
}

/// Resolve the station of a trip, if it is a rail trip.
pub fn resolve_station(agency: u32, coach: u32) -> Result<Option<&'static Station>, Error> {
    if !is_rail(agency, coach) {
        return Ok(None);
    }

    station(coach - STATION_COACHES.start()).map(Some)
}
