//! Core data structures: infobase entries, groups, and the registry tree.

use serde::{Deserialize, Serialize};

/// Client interface flavour requested for a launched session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterfaceKind {
    /// Let the platform pick the interface
    #[default]
    #[serde(rename = "Auto")]
    Auto,
    /// The 8.5-style interface
    #[serde(rename = "8.5", alias = "Версия 8.5")]
    Version85,
    /// The Taxi interface
    #[serde(rename = "Taxi", alias = "Такси")]
    Taxi,
    /// The classic (pre-Taxi) interface
    #[serde(rename = "Classic", alias = "Обычный")]
    Classic,
}

impl InterfaceKind {
    /// Returns the document label for this interface flavour.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Version85 => "8.5",
            Self::Taxi => "Taxi",
            Self::Classic => "Classic",
        }
    }
}

/// How credentials are obtained when connecting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Pick automatically (OS user or saved credentials)
    #[default]
    Auto,
    /// Prompt for a username and password
    Manual,
}

/// A stored username/password pair for one launch mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPair {
    /// Account name, empty when unset
    #[serde(default)]
    pub username: String,
    /// Password, empty when unset
    #[serde(default)]
    pub password: String,
}

impl AuthPair {
    /// Creates a pair from owned parts.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns true when both the username and the password are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }
}

/// The (name, connect) pair that identifies "the same infobase" across
/// document sections.
///
/// Display names are not unique on their own; two entries are the same
/// base only when both the name and the connection string match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryIdentity {
    /// Display name
    pub name: String,
    /// Encoded connection string
    pub connect: String,
}

impl EntryIdentity {
    /// Creates an identity from owned parts.
    #[must_use]
    pub fn new(name: impl Into<String>, connect: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connect: connect.into(),
        }
    }
}

impl std::fmt::Display for EntryIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.connect)
    }
}

/// A single launchable infobase configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseEntry {
    /// Display label shown in the tree; not guaranteed unique
    #[serde(default)]
    pub name: String,
    /// Platform version identifier; empty means "inherit from the
    /// nearest ancestor group that defines one"
    #[serde(default)]
    pub platform: String,
    /// Encoded connection string (see [`crate::connect::ConnectString`])
    #[serde(default)]
    pub connect: String,
    /// Free-form extra launch parameters
    #[serde(default)]
    pub parameters: String,
    /// Requested client interface flavour
    #[serde(default)]
    pub interface: InterfaceKind,
    /// Credential acquisition mode
    #[serde(default)]
    pub auth_mode: AuthMode,
    /// Use operating-system authentication instead of stored credentials
    #[serde(default)]
    pub auth_os: bool,
    /// Legacy unified username, kept for backward compatibility with
    /// older documents; duplicates `auth_enterprise.username`
    #[serde(default)]
    pub username: String,
    /// Legacy unified password, see `username`
    #[serde(default)]
    pub password: String,
    /// Credentials used for enterprise-mode launches
    #[serde(default)]
    pub auth_enterprise: AuthPair,
    /// Credentials used for configurator-mode launches
    #[serde(default)]
    pub auth_designer: AuthPair,
    /// Advisory last-launch timestamp, free-form text
    #[serde(default)]
    pub last_run: String,
    /// Advisory on-disk size, free-form text
    #[serde(default)]
    pub size: String,
}

impl BaseEntry {
    /// Creates an entry with the given name and connection string;
    /// everything else defaults.
    #[must_use]
    pub fn new(name: impl Into<String>, connect: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connect: connect.into(),
            ..Self::default()
        }
    }

    /// Returns this entry's deduplication identity.
    #[must_use]
    pub fn identity(&self) -> EntryIdentity {
        EntryIdentity::new(self.name.clone(), self.connect.clone())
    }

    /// Checks whether this entry has the given identity.
    #[must_use]
    pub fn matches(&self, identity: &EntryIdentity) -> bool {
        self.name == identity.name && self.connect == identity.connect
    }
}

/// A named container of entries and nested groups.
///
/// A group may carry its own platform version, inherited by descendant
/// entries that leave theirs empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Display name, matched exactly during import materialization
    pub name: String,
    /// Platform version inherited by descendants; empty means none
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub platform: String,
    /// Child nodes in display order
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Group {
    /// Creates an empty group with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One node of the registry tree: either a nested group or an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    /// A nested group
    #[serde(rename = "group")]
    Group(Group),
    /// A launchable infobase entry
    #[serde(rename = "base")]
    Base(BaseEntry),
}

impl Node {
    /// Returns the contained entry, if this node is one.
    #[must_use]
    pub const fn as_base(&self) -> Option<&BaseEntry> {
        match self {
            Self::Base(entry) => Some(entry),
            Self::Group(_) => None,
        }
    }

    /// Returns the contained group, if this node is one.
    #[must_use]
    pub const fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(group) => Some(group),
            Self::Base(_) => None,
        }
    }
}

/// A mutable entry field addressable by [`update_field`].
///
/// [`update_field`]: crate::registry::RegistryDocument::update_field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    /// The platform version identifier
    Platform,
    /// The free-form launch parameters
    Parameters,
    /// The advisory last-launch timestamp
    LastRun,
    /// The advisory size text
    Size,
}

impl EntryField {
    /// Reads the field's current value from an entry.
    #[must_use]
    pub fn get<'a>(self, entry: &'a BaseEntry) -> &'a str {
        match self {
            Self::Platform => &entry.platform,
            Self::Parameters => &entry.parameters,
            Self::LastRun => &entry.last_run,
            Self::Size => &entry.size,
        }
    }

    /// Overwrites the field on an entry.
    pub fn set(self, entry: &mut BaseEntry, value: &str) {
        let slot = match self {
            Self::Platform => &mut entry.platform,
            Self::Parameters => &mut entry.parameters,
            Self::LastRun => &mut entry.last_run,
            Self::Size => &mut entry.size,
        };
        value.clone_into(slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_requires_both_fields_to_match() {
        let entry = BaseEntry::new("Demo", "File=C:\\bases\\demo;");
        assert!(entry.matches(&EntryIdentity::new("Demo", "File=C:\\bases\\demo;")));
        assert!(!entry.matches(&EntryIdentity::new("Demo", "File=C:\\bases\\other;")));
        assert!(!entry.matches(&EntryIdentity::new("Other", "File=C:\\bases\\demo;")));
    }

    #[test]
    fn node_tag_round_trips() {
        let node = Node::Base(BaseEntry::new("Demo", "Srvr=srv1;Ref=db1;"));
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains(r#""type":"base""#));
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn group_platform_omitted_when_empty() {
        let group = Group::new("Clients");
        let json = serde_json::to_string(&group).unwrap();
        assert!(!json.contains("platform"));
    }

    #[test]
    fn interface_kind_accepts_legacy_labels() {
        let taxi: InterfaceKind = serde_json::from_str(r#""Такси""#).unwrap();
        assert_eq!(taxi, InterfaceKind::Taxi);
        let modern: InterfaceKind = serde_json::from_str(r#""Taxi""#).unwrap();
        assert_eq!(modern, InterfaceKind::Taxi);
    }

    #[test]
    fn sparse_entry_deserializes_with_defaults() {
        let entry: BaseEntry =
            serde_json::from_str(r#"{"name":"Demo","connect":"File=C:\\x;"}"#).unwrap();
        assert_eq!(entry.interface, InterfaceKind::Auto);
        assert_eq!(entry.auth_mode, AuthMode::Auto);
        assert!(!entry.auth_os);
        assert!(entry.auth_enterprise.is_empty());
    }
}
