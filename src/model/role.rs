//! Staff roles, the stations they may write to and the pages they may open.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Delivery,
    Menuhub,
    Display,
    Counter,
    Kitchen,
    Guest,
}

/// A screen that mutates orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Station {
    Counter,
    Kitchen,
    Delivery,
}

/// A page of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Counter,
    Kitchen,
    Delivery,
    MenuEditor,
    RoleAdmin,
    AuditLog,
    TvBoard,
    StatusLookup,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    /// Roles an administrator can grant from the request queue.
    pub const REQUESTABLE: [Role; 4] = [Role::Delivery, Role::Menuhub, Role::Display, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Delivery => "delivery",
            Role::Menuhub => "menuhub",
            Role::Display => "display",
            Role::Counter => "counter",
            Role::Kitchen => "kitchen",
            Role::Guest => "guest",
        }
    }

    /// Whether this role may write through `station`. Admin may write everywhere.
    pub fn permits(self, station: Station) -> bool {
        matches!(
            (self, station),
            (Role::Admin, _)
                | (Role::Counter, Station::Counter)
                | (Role::Kitchen, Station::Kitchen)
                | (Role::Delivery, Station::Delivery)
        )
    }

    pub fn can_open(self, page: Page) -> bool {
        match page {
            Page::Home | Page::TvBoard | Page::StatusLookup => true,
            Page::Counter => self.permits(Station::Counter),
            Page::Kitchen => self.permits(Station::Kitchen),
            Page::Delivery => self.permits(Station::Delivery),
            Page::MenuEditor | Page::RoleAdmin | Page::AuditLog => self == Role::Admin,
        }
    }
}

impl Page {
    /// Pages shown without signing in.
    pub fn is_public(self) -> bool {
        matches!(self, Page::TvBoard | Page::StatusLookup)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "delivery" => Ok(Role::Delivery),
            "menuhub" => Ok(Role::Menuhub),
            "display" => Ok(Role::Display),
            "counter" => Ok(Role::Counter),
            "kitchen" => Ok(Role::Kitchen),
            "guest" => Ok(Role::Guest),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}
