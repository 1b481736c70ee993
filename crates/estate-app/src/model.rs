// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ids::PropertyId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

/// A purchase or sale of a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEvent {
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
    pub price_cents: i64,
}

/// Link between a property and an account on an external listing channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalAccount {
    pub channel: String,
    pub account: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub picture: String,
    pub picture_handle: String,
    pub address: Address,
    pub bought: PriceEvent,
    #[serde(default)]
    pub sold: Option<PriceEvent>,
    #[serde(default)]
    pub external_accounts: Vec<ExternalAccount>,
}

impl Property {
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.external_accounts
            .iter()
            .map(|external| external.channel.as_str())
    }

    pub fn has_channel(&self, channel: &str) -> bool {
        self.channels().any(|candidate| candidate == channel)
    }
}

/// Value of a row's channel selector.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelChoice {
    #[default]
    None,
    Channel(String),
}

impl ChannelChoice {
    pub const NONE_LABEL: &'static str = "none";

    pub fn channel(name: impl Into<String>) -> Self {
        Self::Channel(name.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::None => Self::NONE_LABEL,
            Self::Channel(name) => name,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
