//! Favorite profile records and the in-memory manager that edits them.
//!
//! Tabs reference a profile by `ProfileId`; when a profile is renamed the
//! updated record is published so open tabs can refresh their titles.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a profile
pub type ProfileId = Uuid;

/// A saved connection profile ("favorite")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier for this profile
    pub id: ProfileId,

    /// Display name, also used as the title of tabs opened from this profile
    pub name: String,

    /// Protocol the session speaks (e.g. "ssh", "rdp")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// Remote host name or address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Remote port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Searchable tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Display order in the favorites list
    #[serde(default)]
    pub order: usize,
}

impl Profile {
    /// Create a new profile with a fresh ID
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Create a profile with a specific ID (for testing or deserialization)
    pub fn with_id(id: ProfileId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            protocol: None,
            host: None,
            port: None,
            tags: Vec::new(),
            order: 0,
        }
    }

    /// Builder method to set protocol
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Builder method to set host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Builder method to set port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Tooltip text shown on tabs opened from this profile
    pub fn tooltip(&self) -> String {
        match (&self.protocol, &self.host, self.port) {
            (Some(proto), Some(host), Some(port)) => format!("{proto}://{host}:{port}"),
            (Some(proto), Some(host), None) => format!("{proto}://{host}"),
            (None, Some(host), Some(port)) => format!("{host}:{port}"),
            (None, Some(host), None) => host.clone(),
            _ => self.name.clone(),
        }
    }
}

/// In-memory favorites store.
///
/// Edits hand back the updated record so the caller can publish it.
#[derive(Debug, Clone, Default)]
pub struct ProfileManager {
    profiles: HashMap<ProfileId, Profile>,
}

impl ProfileManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a profile (replaces an existing one with the same ID)
    pub fn add(&mut self, profile: Profile) {
        self.profiles.insert(profile.id, profile);
    }

    pub fn get(&self, id: &ProfileId) -> Option<&Profile> {
        self.profiles.get(id)
    }

    /// Rename a profile, returning the updated record for publishing
    pub fn rename(&mut self, id: &ProfileId, name: impl Into<String>) -> Option<Profile> {
        let profile = self.profiles.get_mut(id)?;
        profile.name = name.into();
        Some(profile.clone())
    }
}
