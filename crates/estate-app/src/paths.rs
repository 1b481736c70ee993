// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Route paths of the surrounding dashboard application.

pub const HOME: &str = "/";

pub mod auth {
    pub const SIGN_IN: &str = "/auth/sign-in";
    pub const SIGN_UP: &str = "/auth/sign-up";
    pub const RESET_PASSWORD: &str = "/auth/reset-password";
}

pub mod dashboard {
    pub const OVERVIEW: &str = "/dashboard";
    pub const ACCOUNT: &str = "/dashboard/account";
    pub const CUSTOMERS: &str = "/dashboard/customers";
    pub const INTEGRATIONS: &str = "/dashboard/integrations";
    pub const SETTINGS: &str = "/dashboard/settings";
    pub const PROPERTIES: &str = "/dashboard/properties";
    pub const TENANTS: &str = "/dashboard/tenants";
    pub const RENTING: &str = "/dashboard/renting";
    pub const EXPENSES: &str = "/dashboard/expenses";
}

pub mod errors {
    pub const NOT_FOUND: &str = "/errors/not-found";
}

/// Dotted route name to path, in declaration order.
pub const ALL: [(&str, &str); 14] = [
    ("home", HOME),
    ("auth.sign_in", auth::SIGN_IN),
    ("auth.sign_up", auth::SIGN_UP),
    ("auth.reset_password", auth::RESET_PASSWORD),
    ("dashboard.overview", dashboard::OVERVIEW),
    ("dashboard.account", dashboard::ACCOUNT),
    ("dashboard.customers", dashboard::CUSTOMERS),
    ("dashboard.integrations", dashboard::INTEGRATIONS),
    ("dashboard.settings", dashboard::SETTINGS),
    ("dashboard.properties", dashboard::PROPERTIES),
    ("dashboard.tenants", dashboard::TENANTS),
    ("dashboard.renting", dashboard::RENTING),
    ("dashboard.expenses", dashboard::EXPENSES),
    ("errors.not_found", errors::NOT_FOUND),
];

pub fn lookup(name: &str) -> Option<&'static str> {
    ALL.iter()
        .find(|(route, _)| *route == name)
        .map(|(_, path)| *path)
}
