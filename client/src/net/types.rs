//! Wire DTOs for the content backend's REST API.
//!
//! DESIGN
//! ======
//! Field names follow the backend's camelCase JSON. Records the client does
//! not interpret (admin identity, settings) keep unknown fields in a flattened
//! map so a snapshot can be echoed back to the server without loss.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Built-in site name used until the backend provides one.
pub const DEFAULT_SITE_NAME: &str = "College of Fishery, Jabalpur";

/// Login form payload for `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The logged-in administrator as described by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminIdentity {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Backend fields this layer passes through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AdminIdentity {
    /// Name for headers and greetings: `name` when set, else `username`.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }
}

/// `data` of a successful `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Session {
    pub admin: AdminIdentity,
    pub token: String,
}

/// `data` of a successful `GET /auth/me`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CurrentAdmin {
    pub admin: AdminIdentity,
}

/// Social profile links shown in the site chrome.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(deserialize_with = "null_as_default")]
    pub facebook: String,
    #[serde(deserialize_with = "null_as_default")]
    pub twitter: String,
    #[serde(deserialize_with = "null_as_default")]
    pub instagram: String,
    #[serde(deserialize_with = "null_as_default")]
    pub youtube: String,
    #[serde(deserialize_with = "null_as_default")]
    pub linkedin: String,
}

impl SocialLinks {
    /// Non-empty links as `(label, url)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Facebook", self.facebook.as_str()),
            ("Twitter", self.twitter.as_str()),
            ("Instagram", self.instagram.as_str()),
            ("YouTube", self.youtube.as_str()),
            ("LinkedIn", self.linkedin.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| !url.trim().is_empty())
        .collect()
    }
}

/// Campus location for the contact map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapLocation {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng")]
    pub longitude: f64,
    pub zoom: u8,
}

impl Default for MapLocation {
    fn default() -> Self {
        Self { latitude: 23.1815, longitude: 79.9864, zoom: 15 }
    }
}

impl MapLocation {
    /// OpenStreetMap link centered on this location.
    pub fn map_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map={zoom}/{lat}/{lon}",
            lat = self.latitude,
            lon = self.longitude,
            zoom = self.zoom,
        )
    }
}

/// Site-wide configuration snapshot served by `GET /settings/public`.
///
/// Missing fields deserialize to the built-in baseline, so every field is
/// always populated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(deserialize_with = "null_as_default")]
    pub site_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tagline: String,
    #[serde(deserialize_with = "null_as_default")]
    pub contact_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub contact_phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub social_links: SocialLinks,
    #[serde(deserialize_with = "null_as_default")]
    pub map_location: MapLocation,
    /// Backend fields this layer passes through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_owned(),
            tagline: "Nanaji Deshmukh Veterinary Science University".to_owned(),
            contact_email: String::new(),
            contact_phone: String::new(),
            address: "College of Fishery, Jabalpur, Madhya Pradesh, India".to_owned(),
            social_links: SocialLinks::default(),
            map_location: MapLocation::default(),
            extra: Map::new(),
        }
    }
}

/// Partial settings payload for `PUT /settings`. Unset fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_location: Option<MapLocation>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Standard `{success, data, message}` response wrapper.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a non-2xx response.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
