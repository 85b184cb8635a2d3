/// Gauge station registry and ZIP code resolution.
///
/// Maps a postal code to the USGS gauge whose readings feed the odds score.
/// This is the single source of truth for site codes; other modules take
/// the `GaugeStation` handed out by `resolve` rather than hardcoding codes.
///
/// ZIP codes without an entry are not an error: they resolve to the default
/// Schuylkill River gauge, and callers can tell from the `Resolution`
/// variant that the gauge is not local.

use crate::model::Coordinates;

// ---------------------------------------------------------------------------
// Station metadata
// ---------------------------------------------------------------------------

/// Metadata for a single USGS gauge station.
#[derive(Debug, PartialEq)]
pub struct GaugeStation {
    /// 8-digit USGS site code.
    pub site_code: &'static str,
    /// Official USGS site name.
    pub name: &'static str,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    /// Typical fishable stage, in feet. The level factor peaks here.
    pub normal_stage_ft: f64,
    /// Distance from `normal_stage_ft` at which the level factor reaches zero.
    pub stage_tolerance_ft: f64,
}

impl GaugeStation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Gauge used when a ZIP code has no mapping.
pub static DEFAULT_STATION: GaugeStation = GaugeStation {
    site_code: "01473730",
    name: "Schuylkill River at Philadelphia, PA",
    latitude: 39.9670,
    longitude: -75.1880,
    normal_stage_ft: 7.0,
    stage_tolerance_ft: 5.0,
};

static PEORIA: GaugeStation = GaugeStation {
    site_code: "05567500",
    name: "Illinois River at Peoria, IL",
    latitude: 40.6939,
    longitude: -89.5898,
    normal_stage_ft: 12.0,
    stage_tolerance_ft: 6.0,
};

static KINGSTON_MINES: GaugeStation = GaugeStation {
    site_code: "05568500",
    name: "Illinois River at Kingston Mines, IL",
    latitude: 40.5614,
    longitude: -89.9956,
    normal_stage_ft: 10.0,
    stage_tolerance_ft: 6.0,
};

static CHILLICOTHE: GaugeStation = GaugeStation {
    site_code: "05568000",
    name: "Illinois River at Chillicothe, IL",
    latitude: 40.9200,
    longitude: -89.4854,
    normal_stage_ft: 9.0,
    stage_tolerance_ft: 6.0,
};

static ST_LOUIS: GaugeStation = GaugeStation {
    site_code: "07010000",
    name: "Mississippi River at St. Louis, MO",
    latitude: 38.6289,
    longitude: -90.1797,
    normal_stage_ft: 15.0,
    stage_tolerance_ft: 12.0,
};

static MEMPHIS: GaugeStation = GaugeStation {
    site_code: "07032000",
    name: "Mississippi River at Memphis, TN",
    latitude: 35.1231,
    longitude: -90.0767,
    normal_stage_ft: 10.0,
    stage_tolerance_ft: 15.0,
};

/// ZIP code → gauge. Several ZIPs may share a gauge.
pub static ZIP_REGISTRY: &[(&str, &GaugeStation)] = &[
    ("19103", &DEFAULT_STATION),
    ("19130", &DEFAULT_STATION),
    ("19128", &DEFAULT_STATION),
    ("61602", &PEORIA),
    ("61603", &PEORIA),
    ("61604", &PEORIA),
    ("61554", &KINGSTON_MINES),
    ("61546", &KINGSTON_MINES),
    ("61523", &CHILLICOTHE),
    ("63102", &ST_LOUIS),
    ("63104", &ST_LOUIS),
    ("38103", &MEMPHIS),
];

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Outcome of resolving a ZIP code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// The ZIP has a registered gauge.
    Mapped(&'static GaugeStation),
    /// No mapping; this is `DEFAULT_STATION`, so gauge data is not local.
    Default(&'static GaugeStation),
}

impl Resolution {
    pub fn station(&self) -> &'static GaugeStation {
        match self {
            Resolution::Mapped(s) | Resolution::Default(s) => s,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Resolution::Default(_))
    }
}

/// Resolves a ZIP code to its gauge station. Never fails.
pub fn resolve(zip_code: &str) -> Resolution {
    let zip = zip_code.trim();
    ZIP_REGISTRY
        .iter()
        .find(|(z, _)| *z == zip)
        .map(|(_, station)| Resolution::Mapped(*station))
        .unwrap_or(Resolution::Default(&DEFAULT_STATION))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
