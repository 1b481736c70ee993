// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use estate_app::{Address, ExternalAccount, PriceEvent, Property, PropertyId};
use std::path::PathBuf;
use std::sync::Arc;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

const CITIES: [&str; 14] = [
    "Austin",
    "Seattle",
    "Denver",
    "Madison",
    "Raleigh",
    "Pittsburgh",
    "Portland",
    "Boise",
    "Phoenix",
    "Nashville",
    "Columbus",
    "Minneapolis",
    "Omaha",
    "Tucson",
];
const STATES: [&str; 14] = [
    "TX", "WA", "CO", "WI", "NC", "PA", "OR", "ID", "AZ", "TN", "OH", "MN", "NE", "UT",
];
const STREET_NAMES: [&str; 18] = [
    "Cedar",
    "Maple",
    "Oak",
    "Pine",
    "Willow",
    "Elm",
    "Birch",
    "Juniper",
    "Sunset",
    "Ridge",
    "Valley",
    "Lakeview",
    "Northview",
    "Hillcrest",
    "Brookside",
    "Meadow",
    "Aspen",
    "Canyon",
];
const STREET_SUFFIXES: [&str; 5] = ["St", "Ave", "Ln", "Dr", "Ct"];
const CHANNELS: [&str; 5] = ["airbnb", "vrbo", "zillow", "booking", "craigslist"];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator of plausible property records.
#[derive(Debug, Clone)]
pub struct PropertyFaker {
    rng: DeterministicRng,
    issued: usize,
}

impl PropertyFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            issued: 0,
        }
    }

    pub fn property(&mut self) -> Property {
        self.issued += 1;
        let id = format!("prop-{:03}", self.issued);
        let city_index = self.rng.int_n(CITIES.len());
        let street = format!(
            "{} {} {}",
            self.int_range_i64(10, 9_999),
            self.pick(&STREET_NAMES),
            self.pick(&STREET_SUFFIXES),
        );

        let bought_at = self.random_datetime_between(
            datetime!(2012-01-01 0:00 UTC),
            datetime!(2022-12-31 0:00 UTC),
        );
        let bought = PriceEvent {
            at: bought_at,
            price_cents: self.int_range_i64(150_000, 1_200_000) * 100,
        };
        let sold = if self.rng.bool() {
            let at = self.random_datetime_between(
                bought_at + Duration::days(180),
                bought_at + Duration::days(3_650),
            );
            let markup = self.int_range_i64(90, 160);
            Some(PriceEvent {
                at,
                price_cents: bought.price_cents / 100 * markup,
            })
        } else {
            None
        };

        let channel_count = self.rng.int_n(CHANNELS.len().min(3) + 1);
        let offset = self.rng.int_n(CHANNELS.len());
        let external_accounts = (0..channel_count)
            .map(|step| {
                let channel = CHANNELS[(offset + step) % CHANNELS.len()];
                ExternalAccount {
                    channel: channel.to_owned(),
                    account: format!("{channel}-{:06}", self.int_range_i64(1, 999_999)),
                }
            })
            .collect();

        Property {
            picture: format!("{id}.jpg"),
            picture_handle: format!("/assets/properties/{id}.jpg"),
            id: PropertyId::new(id),
            address: Address {
                street,
                city: CITIES[city_index].to_owned(),
                state: STATES[city_index].to_owned(),
                country: "US".to_owned(),
            },
            bought,
            sold,
            external_accounts,
        }
    }

    pub fn properties(&mut self, count: usize) -> Vec<Property> {
        (0..count).map(|_| self.property()).collect()
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range_i64(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }

    fn random_datetime_between(
        &mut self,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> OffsetDateTime {
        let start_ts = start.unix_timestamp();
        let end_ts = end.unix_timestamp();
        if end_ts <= start_ts {
            return start;
        }
        let span = (end_ts - start_ts) as u64;
        let offset = self.rng.next_u64() % (span + 1);
        OffsetDateTime::from_unix_timestamp(start_ts + offset as i64).unwrap_or(start)
    }
}

/// Deterministic list used by `--demo`.
pub fn demo_properties() -> Vec<Property> {
    PropertyFaker::new(2026).properties(23)
}

/// A minimal record with fixed dates and the given `(channel, account)` links.
pub fn sample_property(id: &str, channels: &[(&str, &str)]) -> Property {
    Property {
        id: PropertyId::from(id),
        picture: format!("{id}.jpg"),
        picture_handle: format!("/assets/properties/{id}.jpg"),
        address: Address {
            street: "100 Oak St".to_owned(),
            city: "Madison".to_owned(),
            state: "WI".to_owned(),
            country: "US".to_owned(),
        },
        bought: PriceEvent {
            at: fixture_datetime(),
            price_cents: 32_500_000,
        },
        sold: None,
        external_accounts: channels
            .iter()
            .map(|(channel, account)| ExternalAccount {
                channel: (*channel).to_owned(),
                account: (*account).to_owned(),
            })
            .collect(),
    }
}

pub fn sample_list(ids: &[&str]) -> Arc<[Property]> {
    ids.iter()
        .map(|id| sample_property(id, &[]))
        .collect::<Vec<_>>()
        .into()
}

pub fn fixture_datetime() -> OffsetDateTime {
    datetime!(2026-02-19 12:34:56 UTC)
}

pub fn temp_data_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let data_path = dir.path().join("properties.json");
    Ok((dir, data_path))
}

/// Writes `records` as a JSON data file inside a fresh temp dir.
pub fn write_data_file(records: &[Property]) -> Result<(tempfile::TempDir, PathBuf)> {
    let (dir, path) = temp_data_path()?;
    let raw = serde_json::to_string_pretty(records).context("encode properties")?;
    std::fs::write(&path, raw).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}

pub fn channel_names() -> &'static [&'static str] {
    &CHANNELS
}

#[cfg(test)]
mod tests {
    use super::{PropertyFaker, channel_names, demo_properties, sample_list, write_data_file};
    use anyhow::Result;
    use estate_app::Property;
    use std::collections::BTreeSet;

    #[test]
    fn new_deterministic_seed() {
        let left = PropertyFaker::new(42).properties(5);
        let right = PropertyFaker::new(42).properties(5);
        assert_eq!(left, right);
    }

    #[test]
    fn ids_are_unique() {
        let properties = PropertyFaker::new(7).properties(40);
        let ids: BTreeSet<_> = properties.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), properties.len());
    }

    #[test]
    fn sales_follow_purchases() {
        for property in PropertyFaker::new(9).properties(50) {
            if let Some(sold) = &property.sold {
                assert!(sold.at > property.bought.at, "property {}", property.id);
            }
        }
    }

    #[test]
    fn channels_come_from_known_list_without_duplicates() {
        for property in PropertyFaker::new(11).properties(50) {
            let channels: Vec<&str> = property.channels().collect();
            let unique: BTreeSet<&str> = channels.iter().copied().collect();
            assert_eq!(unique.len(), channels.len());
            assert!(channels.iter().all(|c| channel_names().contains(c)));
        }
    }

    #[test]
    fn variety_across_seeds() {
        let cities: BTreeSet<String> = (1_u64..20)
            .map(|seed| PropertyFaker::new(seed).property().address.city)
            .collect();
        assert!(cities.len() > 1);
    }

    #[test]
    fn demo_list_is_stable() {
        assert_eq!(demo_properties(), demo_properties());
        assert_eq!(demo_properties().len(), 23);
    }

    #[test]
    fn sample_list_preserves_order() {
        let list = sample_list(&["a", "b", "c"]);
        let ids: Vec<&str> = list.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn data_file_round_trips_through_json() -> Result<()> {
        let properties = PropertyFaker::new(3).properties(4);
        let (_dir, path) = write_data_file(&properties)?;
        let raw = std::fs::read_to_string(&path)?;
        let decoded: Vec<Property> = serde_json::from_str(&raw)?;
        assert_eq!(decoded, properties);
        Ok(())
    }
}
