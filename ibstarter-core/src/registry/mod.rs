//! The persisted registry of infobases: favorites plus a tree of groups.
//!
//! Favorites hold independent copies of entries, not references into the
//! group tree. The two sections are deliberately NOT kept in sync: a
//! favorite snapshots the entry's field values at the moment it was added,
//! and later edits on either side do not propagate to the other. Tree
//! mutations that must reach both sides (field assignment, deletion) walk
//! favorites and every group subtree explicitly.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{BaseEntry, EntryField, EntryIdentity, Group, Node};

/// Name of the group that receives entries registered without an
/// explicit target group.
pub const DEFAULT_GROUP_NAME: &str = "Информационные базы";

/// The whole persisted document; the unit of persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDocument {
    /// Flat ordered snapshots of favorited entries
    #[serde(default)]
    pub favorites: Vec<BaseEntry>,
    /// Ordered top-level groups
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Group {
    /// Returns the child group with the given name, creating it at the
    /// end of the children when absent. Matching is case-sensitive and
    /// the first match wins.
    pub fn ensure_child_group(&mut self, name: &str) -> &mut Group {
        let position = self
            .children
            .iter()
            .position(|node| matches!(node, Node::Group(g) if g.name == name));
        let index = position.unwrap_or_else(|| {
            self.children.push(Node::Group(Group::new(name)));
            self.children.len() - 1
        });
        match &mut self.children[index] {
            Node::Group(group) => group,
            Node::Base(_) => unreachable!("index points at a group node"),
        }
    }

    /// Appends an entry under the given descendant path, materializing
    /// intermediate groups as needed. An empty path appends directly to
    /// this group's children.
    pub fn add_entry_at(&mut self, path: &[&str], entry: BaseEntry) {
        let mut current = self;
        for segment in path {
            current = current.ensure_child_group(segment);
        }
        current.children.push(Node::Base(entry));
    }
}

/// Depth-first walk over every entry in a subtree.
fn visit_entries<'a>(nodes: &'a [Node], f: &mut impl FnMut(&'a BaseEntry)) {
    for node in nodes {
        match node {
            Node::Base(entry) => f(entry),
            Node::Group(group) => visit_entries(&group.children, f),
        }
    }
}

/// Mutable depth-first walk over every entry in a subtree.
fn visit_entries_mut(nodes: &mut [Node], f: &mut impl FnMut(&mut BaseEntry)) {
    for node in nodes {
        match node {
            Node::Base(entry) => f(entry),
            Node::Group(group) => visit_entries_mut(&mut group.children, f),
        }
    }
}

/// Removes every matching entry from a subtree, returning the count.
fn remove_entries(nodes: &mut Vec<Node>, identity: &EntryIdentity) -> usize {
    let before = nodes.len();
    nodes.retain(|node| !matches!(node, Node::Base(entry) if entry.matches(identity)));
    let mut removed = before - nodes.len();
    for node in nodes {
        if let Node::Group(group) = node {
            removed += remove_entries(&mut group.children, identity);
        }
    }
    removed
}

/// Finds the first matching entry and resolves its effective platform,
/// carrying the nearest ancestor platform down the walk.
fn resolve_in(nodes: &[Node], identity: &EntryIdentity, inherited: &str) -> Option<String> {
    for node in nodes {
        match node {
            Node::Base(entry) if entry.matches(identity) => {
                let effective = if entry.platform.is_empty() {
                    inherited
                } else {
                    &entry.platform
                };
                return Some(effective.to_string());
            }
            Node::Group(group) => {
                let next = if group.platform.is_empty() {
                    inherited
                } else {
                    &group.platform
                };
                if let Some(platform) = resolve_in(&group.children, identity, next) {
                    return Some(platform);
                }
            }
            Node::Base(_) => {}
        }
    }
    None
}

impl RegistryDocument {
    /// Returns the top-level group with the given name, creating it at
    /// the end when absent.
    pub fn ensure_top_group(&mut self, name: &str) -> &mut Group {
        let index = self
            .groups
            .iter()
            .position(|g| g.name == name)
            .unwrap_or_else(|| {
                self.groups.push(Group::new(name));
                self.groups.len() - 1
            });
        &mut self.groups[index]
    }

    /// Appends an entry at the given group path (first segment names a
    /// top-level group), materializing intermediate groups. An empty
    /// path targets the default registration group.
    pub fn add_entry(&mut self, group_path: &[&str], entry: BaseEntry) {
        match group_path.split_first() {
            Some((top, rest)) => self.ensure_top_group(top).add_entry_at(rest, entry),
            None => self
                .ensure_top_group(DEFAULT_GROUP_NAME)
                .add_entry_at(&[], entry),
        }
    }

    /// Removes every entry with the given identity from favorites and
    /// from every group subtree. Removing an absent identity is a no-op.
    /// Returns the number of occurrences removed.
    pub fn remove_entry(&mut self, identity: &EntryIdentity) -> usize {
        let before = self.favorites.len();
        self.favorites.retain(|entry| !entry.matches(identity));
        let mut removed = before - self.favorites.len();
        for group in &mut self.groups {
            removed += remove_entries(&mut group.children, identity);
        }
        removed
    }

    /// Overwrites one field on every occurrence of the identity — both in
    /// the group tree and in any favorite snapshot — counting only the
    /// occurrences whose value actually changed. The count feeds a
    /// user-facing confirmation message, not control flow.
    pub fn update_field(
        &mut self,
        identity: &EntryIdentity,
        field: EntryField,
        value: &str,
    ) -> usize {
        let mut updated = 0;
        let mut apply = |entry: &mut BaseEntry| {
            if entry.matches(identity) && field.get(entry) != value {
                field.set(entry, value);
                updated += 1;
            }
        };
        for entry in &mut self.favorites {
            apply(entry);
        }
        for group in &mut self.groups {
            visit_entries_mut(&mut group.children, &mut apply);
        }
        updated
    }

    /// Adds a deep copy of the entry to favorites unless a favorite with
    /// the same identity already exists. Never overwrites an existing
    /// snapshot. Returns whether a copy was added.
    pub fn add_favorite(&mut self, entry: &BaseEntry) -> bool {
        let identity = entry.identity();
        if self.favorites.iter().any(|f| f.matches(&identity)) {
            return false;
        }
        self.favorites.push(entry.clone());
        true
    }

    /// Removes the favorite snapshot with the given identity, leaving
    /// the group tree untouched. Returns whether anything was removed.
    pub fn remove_favorite(&mut self, identity: &EntryIdentity) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|entry| !entry.matches(identity));
        self.favorites.len() != before
    }

    /// Finds the first entry with the given identity, favorites first,
    /// then a depth-first walk of the group tree.
    #[must_use]
    pub fn find_entry(&self, identity: &EntryIdentity) -> Option<&BaseEntry> {
        if let Some(entry) = self.favorites.iter().find(|f| f.matches(identity)) {
            return Some(entry);
        }
        let mut found = None;
        for group in &self.groups {
            visit_entries(&group.children, &mut |entry| {
                if found.is_none() && entry.matches(identity) {
                    found = Some(entry);
                }
            });
            if found.is_some() {
                break;
            }
        }
        found
    }

    /// Finds the first entry whose name contains the query,
    /// case-insensitively, favorites first.
    #[must_use]
    pub fn search(&self, query: &str) -> Option<&BaseEntry> {
        let needle = query.to_lowercase();
        let matches = |entry: &BaseEntry| entry.name.to_lowercase().contains(&needle);
        if let Some(entry) = self.favorites.iter().find(|f| matches(f)) {
            return Some(entry);
        }
        let mut found = None;
        for group in &self.groups {
            visit_entries(&group.children, &mut |entry| {
                if found.is_none() && matches(entry) {
                    found = Some(entry);
                }
            });
            if found.is_some() {
                break;
            }
        }
        found
    }

    /// Resolves the effective platform for the first occurrence of the
    /// identity: the entry's own platform when non-empty, otherwise the
    /// nearest ancestor group's non-empty platform, otherwise empty.
    ///
    /// Favorite snapshots sit outside the group tree and have no
    /// ancestors, so only their own platform applies. Returns `None`
    /// when the identity is not present at all.
    #[must_use]
    pub fn resolve_platform(&self, identity: &EntryIdentity) -> Option<String> {
        if let Some(entry) = self.favorites.iter().find(|f| f.matches(identity)) {
            return Some(entry.platform.clone());
        }
        for group in &self.groups {
            let inherited = group.platform.as_str();
            if let Some(platform) = resolve_in(&group.children, identity, inherited) {
                return Some(platform);
            }
        }
        None
    }

    /// Collects the connection strings of every entry reachable via the
    /// group tree. This is the running identity set the importer checks
    /// before adding an entry; favorites are snapshots and do not count.
    #[must_use]
    pub fn collect_connects(&self) -> HashSet<String> {
        let mut connects = HashSet::new();
        for group in &self.groups {
            visit_entries(&group.children, &mut |entry| {
                connects.insert(entry.connect.clone());
            });
        }
        connects
    }

    /// Calls `f` for every entry in the group tree, depth-first.
    pub fn for_each_entry<'a>(&'a self, mut f: impl FnMut(&'a BaseEntry)) {
        for group in &self.groups {
            visit_entries(&group.children, &mut f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, connect: &str) -> BaseEntry {
        BaseEntry::new(name, connect)
    }

    #[test]
    fn add_entry_materializes_intermediate_groups() {
        let mut doc = RegistryDocument::default();
        doc.add_entry(&["Root", "Clients", "Acme"], entry("Demo", "File=C:\\d;"));

        let root = &doc.groups[0];
        assert_eq!(root.name, "Root");
        let clients = root.children[0].as_group().unwrap();
        assert_eq!(clients.name, "Clients");
        let acme = clients.children[0].as_group().unwrap();
        assert_eq!(acme.name, "Acme");
        assert_eq!(acme.children[0].as_base().unwrap().name, "Demo");
    }

    #[test]
    fn add_entry_without_path_uses_default_group() {
        let mut doc = RegistryDocument::default();
        doc.add_entry(&[], entry("Demo", "File=C:\\d;"));
        assert_eq!(doc.groups[0].name, DEFAULT_GROUP_NAME);
        assert_eq!(doc.groups[0].children.len(), 1);
    }

    #[test]
    fn removal_is_identity_scoped() {
        let mut doc = RegistryDocument::default();
        doc.add_entry(&["G"], entry("A", "File=C:\\x;"));
        doc.add_entry(&["G"], entry("A", "File=C:\\y;"));
        doc.add_favorite(&entry("A", "File=C:\\x;"));

        let removed = doc.remove_entry(&EntryIdentity::new("A", "File=C:\\x;"));
        assert_eq!(removed, 2);
        assert!(doc.favorites.is_empty());
        // The same name with a different connect string survives
        assert_eq!(doc.groups[0].children.len(), 1);
        assert_eq!(
            doc.groups[0].children[0].as_base().unwrap().connect,
            "File=C:\\y;"
        );
    }

    #[test]
    fn removing_absent_identity_is_a_noop() {
        let mut doc = RegistryDocument::default();
        doc.add_entry(&["G"], entry("A", "File=C:\\x;"));
        assert_eq!(doc.remove_entry(&EntryIdentity::new("Z", "File=C:\\z;")), 0);
        assert_eq!(doc.groups[0].children.len(), 1);
    }

    #[test]
    fn update_field_touches_tree_and_favorite_copies() {
        let mut doc = RegistryDocument::default();
        let mut base = entry("A", "File=C:\\x;");
        base.platform = "8.3.18".into();
        doc.add_entry(&["G"], base.clone());
        doc.add_favorite(&base);
        // Diverge the favorite snapshot
        doc.favorites[0].platform = "8.3.19".into();

        let identity = EntryIdentity::new("A", "File=C:\\x;");
        let updated = doc.update_field(&identity, EntryField::Platform, "8.3.20");
        assert_eq!(updated, 2);
        assert_eq!(doc.favorites[0].platform, "8.3.20");
    }

    #[test]
    fn update_field_skips_occurrences_already_at_value() {
        let mut doc = RegistryDocument::default();
        let mut base = entry("A", "File=C:\\x;");
        base.platform = "8.3.20".into();
        doc.add_entry(&["G"], base);

        let identity = EntryIdentity::new("A", "File=C:\\x;");
        assert_eq!(doc.update_field(&identity, EntryField::Platform, "8.3.20"), 0);
    }

    #[test]
    fn favorites_are_snapshots_not_references() {
        let mut doc = RegistryDocument::default();
        doc.add_entry(&["G"], entry("A", "File=C:\\x;"));
        let original = doc.groups[0].children[0].as_base().unwrap().clone();
        assert!(doc.add_favorite(&original));
        assert!(!doc.add_favorite(&original), "identity dedup");

        // Editing the tree entry leaves the favorite untouched
        doc.groups[0].children[0] = Node::Base({
            let mut e = original.clone();
            e.parameters = "/Debug".into();
            e
        });
        assert_eq!(doc.favorites[0].parameters, "");
    }

    #[test]
    fn platform_inherits_from_nearest_ancestor() {
        let mut doc = RegistryDocument::default();
        let mut top = Group::new("Top");
        top.platform = "8.3.20".into();
        let mut mid = Group::new("Mid");
        let mut inner = Group::new("Inner");
        inner
            .children
            .push(Node::Base(entry("Deep", "File=C:\\deep;")));
        mid.children.push(Node::Group(inner));
        top.children.push(Node::Group(mid));
        doc.groups.push(top);

        let identity = EntryIdentity::new("Deep", "File=C:\\deep;");
        assert_eq!(doc.resolve_platform(&identity).as_deref(), Some("8.3.20"));
    }

    #[test]
    fn own_platform_wins_over_ancestors() {
        let mut doc = RegistryDocument::default();
        let mut top = Group::new("Top");
        top.platform = "8.3.20".into();
        let mut base = entry("A", "File=C:\\x;");
        base.platform = "8.3.10".into();
        top.children.push(Node::Base(base));
        doc.groups.push(top);

        let identity = EntryIdentity::new("A", "File=C:\\x;");
        assert_eq!(doc.resolve_platform(&identity).as_deref(), Some("8.3.10"));
    }

    #[test]
    fn search_prefers_favorites() {
        let mut doc = RegistryDocument::default();
        let mut tree_copy = entry("Accounting", "File=C:\\a;");
        tree_copy.platform = "tree".into();
        doc.add_entry(&["G"], tree_copy);
        let mut fav = entry("Accounting prod", "File=C:\\b;");
        fav.platform = "fav".into();
        doc.add_favorite(&fav);

        let hit = doc.search("accounting").unwrap();
        assert_eq!(hit.platform, "fav");
    }
}
