use analytics::formulas;
use core_types::GdpComponents;
use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One year of a GDP series.
///
/// The GDP total is derived from the components when the entry is created and
/// cannot be edited afterwards. On disk an entry is the pair
/// `[year, {"C", "G", "I", "NX", "GDP"}]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, EntryValues)", into = "(String, EntryValues)")]
pub struct GdpEntry {
    year: String,
    components: GdpComponents,
    gdp: Decimal,
}

impl GdpEntry {
    pub fn new(year: impl Into<String>, components: GdpComponents) -> Self {
        Self {
            year: year.into(),
            gdp: formulas::gdp(&components),
            components,
        }
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn components(&self) -> &GdpComponents {
        &self.components
    }

    pub fn gdp(&self) -> Decimal {
        self.gdp
    }
}

/// The value half of a persisted entry. Amounts are exact JSON numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryValues {
    #[serde(rename = "C", with = "rust_decimal::serde::arbitrary_precision")]
    consumption: Decimal,
    #[serde(rename = "G", with = "rust_decimal::serde::arbitrary_precision")]
    government: Decimal,
    #[serde(rename = "I", with = "rust_decimal::serde::arbitrary_precision")]
    investment: Decimal,
    #[serde(rename = "NX", with = "rust_decimal::serde::arbitrary_precision")]
    net_exports: Decimal,
    #[serde(rename = "GDP", with = "rust_decimal::serde::arbitrary_precision")]
    gdp: Decimal,
}

impl From<GdpEntry> for (String, EntryValues) {
    fn from(entry: GdpEntry) -> Self {
        let c = entry.components;
        (
            entry.year,
            EntryValues {
                consumption: c.consumption,
                government: c.government,
                investment: c.investment,
                net_exports: c.net_exports,
                gdp: entry.gdp,
            },
        )
    }
}

// Loaded entries keep their stored total verbatim.
impl From<(String, EntryValues)> for GdpEntry {
    fn from((year, values): (String, EntryValues)) -> Self {
        Self {
            year,
            components: GdpComponents::new(
                values.consumption,
                values.government,
                values.investment,
                values.net_exports,
            ),
            gdp: values.gdp,
        }
    }
}

/// Named GDP series, keyed by a user-chosen list name.
///
/// Both the list names and the entries within a list keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesStore {
    lists: Vec<(String, Vec<GdpEntry>)>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes GDP for the components and appends the entry to `list_name`,
    /// creating the list if it does not exist yet.
    pub fn add_entry(&mut self, list_name: &str, year: &str, components: GdpComponents) -> GdpEntry {
        let entry = GdpEntry::new(year, components);

        match self.lists.iter_mut().find(|(name, _)| name == list_name) {
            Some((_, entries)) => entries.push(entry.clone()),
            None => {
                tracing::info!(list = list_name, "Creating new GDP list.");
                self.lists.push((list_name.to_string(), vec![entry.clone()]));
            }
        }

        entry
    }

    pub fn list_names(&self) -> Vec<&str> {
        self.lists.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn get(&self, list_name: &str) -> Option<&[GdpEntry]> {
        self.lists
            .iter()
            .find(|(name, _)| name == list_name)
            .map(|(_, entries)| entries.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[GdpEntry])> {
        self.lists.iter().map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Number of named lists.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    // A repeated key in a document replaces the earlier list.
    fn insert_list(&mut self, list_name: String, entries: Vec<GdpEntry>) {
        match self.lists.iter_mut().find(|(name, _)| *name == list_name) {
            Some((_, existing)) => *existing = entries,
            None => self.lists.push((list_name, entries)),
        }
    }
}

impl Serialize for SeriesStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.lists.len()))?;
        for (name, entries) in &self.lists {
            map.serialize_entry(name, entries)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SeriesStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StoreVisitor;

        impl<'de> Visitor<'de> for StoreVisitor {
            type Value = SeriesStore;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of list names to [year, components] entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut store = SeriesStore::new();
                while let Some((name, entries)) = access.next_entry::<String, Vec<GdpEntry>>()? {
                    store.insert_list(name, entries);
                }
                Ok(store)
            }
        }

        deserializer.deserialize_map(StoreVisitor)
    }
}
