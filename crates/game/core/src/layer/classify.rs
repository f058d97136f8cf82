//! Tile classification against configured region / terrain-tag id lists.

use core::fmt;

/// Id list as written in plugin parameters: `"1, 2,5"`.
///
/// Parsing is lenient. Entries that are not positive integers are dropped, so
/// `"0"`, `""` and garbage all produce a disabled list that never matches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawIdList", into = "String"))]
pub struct IdList {
    ids: Vec<u16>,
}

impl IdList {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn parse(raw: &str) -> Self {
        let ids = raw.split(',').filter_map(parse_id).collect();
        Self { ids }
    }

    pub fn from_ids(ids: impl IntoIterator<Item = u16>) -> Self {
        Self {
            ids: ids.into_iter().filter(|id| *id > 0).collect(),
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn matches(&self, value: u16) -> bool {
        value > 0 && self.ids.contains(&value)
    }

    pub fn ids(&self) -> &[u16] {
        &self.ids
    }
}

fn parse_id(entry: &str) -> Option<u16> {
    let value: f64 = entry.trim().parse().ok()?;
    if value.fract() != 0.0 || value < 1.0 || value > f64::from(u16::MAX) {
        return None;
    }
    Some(value as u16)
}

impl fmt::Display for IdList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ids.is_empty() {
            return write!(f, "0");
        }
        for (i, id) in self.ids.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}

impl From<IdList> for String {
    fn from(list: IdList) -> Self {
        list.to_string()
    }
}

/// Accepted serialized shapes: `"1,2"`, `[1, 2]` or `3`.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawIdList {
    Text(String),
    Ids(Vec<i64>),
    Single(i64),
}

#[cfg(feature = "serde")]
impl From<RawIdList> for IdList {
    fn from(raw: RawIdList) -> Self {
        match raw {
            RawIdList::Text(text) => IdList::parse(&text),
            RawIdList::Ids(ids) => {
                IdList::from_ids(ids.into_iter().filter_map(|id| u16::try_from(id).ok()))
            }
            RawIdList::Single(id) => IdList::from_ids(u16::try_from(id).ok()),
        }
    }
}

/// A tile matches the rule if its region id OR its terrain tag is listed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TileRule {
    pub regions: IdList,
    pub terrain_tags: IdList,
}

impl TileRule {
    pub fn new(regions: IdList, terrain_tags: IdList) -> Self {
        Self {
            regions,
            terrain_tags,
        }
    }

    pub fn regions(raw: &str) -> Self {
        Self::new(IdList::parse(raw), IdList::disabled())
    }

    pub fn terrain_tags(raw: &str) -> Self {
        Self::new(IdList::disabled(), IdList::parse(raw))
    }

    pub fn matches(&self, region_id: u16, terrain_tag: u16) -> bool {
        self.regions.matches(region_id) || self.terrain_tags.matches(terrain_tag)
    }
}

/// Rules classifying bridge surfaces and bridge entrances.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayerConfig {
    pub overpass: TileRule,
    pub gateway: TileRule,
}

impl LayerConfig {
    pub fn new(overpass: TileRule, gateway: TileRule) -> Self {
        Self { overpass, gateway }
    }
}

/// Classification of a single tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileClass {
    pub overpass: bool,
    pub gateway: bool,
}

impl TileClass {
    pub const PLAIN: Self = Self {
        overpass: false,
        gateway: false,
    };
    pub const OVERPASS: Self = Self {
        overpass: true,
        gateway: false,
    };
    pub const GATEWAY: Self = Self {
        overpass: false,
        gateway: true,
    };

    /// True for tiles that take part in the layer system at all.
    pub fn is_layered(self) -> bool {
        self.overpass || self.gateway
    }
}
