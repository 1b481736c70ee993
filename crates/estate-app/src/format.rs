// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::OffsetDateTime;
use time::macros::format_description;

use crate::model::{Address, PriceEvent};

/// `Mar 4, 2024`
pub fn format_event_date(at: OffsetDateTime) -> String {
    at.format(format_description!(
        "[month repr:short] [day padding:none], [year]"
    ))
    .unwrap_or_default()
}

pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let absolute = cents.unsigned_abs();
    let dollars = group_thousands(absolute / 100);
    let cents_component = absolute % 100;
    format!("{sign}${dollars}.{cents_component:02}")
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

pub fn format_address(address: &Address) -> String {
    format!("{}, {}, {}", address.city, address.state, address.country)
}

/// Date and price cells for an optional event; an absent event renders empty.
pub fn format_event(event: Option<&PriceEvent>) -> (String, String) {
    match event {
        Some(event) => (format_event_date(event.at), format_money(event.price_cents)),
        None => (String::new(), String::new()),
    }
}
