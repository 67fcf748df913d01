//! Parser and merger for `.v8i` registry files.
//!
//! The format is INI-like: one section per infobase, `Key=Value` lines,
//! section and key names case-sensitive. Files in the wild ship either
//! as UTF-8 (often with a BOM) or as cp1251; both encodings are tried
//! in that order.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ImportError, ImportResult};
use crate::models::{AuthMode, AuthPair, BaseEntry};
use crate::registry::RegistryDocument;

use super::ImportReport;

/// Display label of the singleton top-level group that receives
/// imported entries. Created lazily on first import, reused thereafter.
pub const V8I_IMPORT_GROUP: &str = "🗂 Импорт из .v8i";

/// One entry parsed out of a `.v8i` section, not yet merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedBase {
    /// The entry as it will appear in the document
    pub entry: BaseEntry,
    /// The source `Folder` value, a `\`- or `/`-separated path
    pub folder: String,
}

/// Reads a `.v8i` file, trying strict UTF-8 first and cp1251 second.
///
/// # Errors
///
/// Returns [`ImportError::Io`] when the file cannot be read and
/// [`ImportError::Encoding`] when neither encoding decodes it cleanly.
pub fn read_v8i_file(path: &Path) -> ImportResult<String> {
    let bytes = fs::read(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let without_bom = bytes
        .strip_prefix(b"\xef\xbb\xbf")
        .unwrap_or(bytes.as_slice());
    if let Ok(text) = std::str::from_utf8(without_bom) {
        return Ok(text.to_string());
    }
    let (text, _, had_errors) = encoding_rs::WINDOWS_1251.decode(&bytes);
    if had_errors {
        return Err(ImportError::Encoding {
            path: path.to_path_buf(),
        });
    }
    Ok(text.into_owned())
}

/// Parses `[section]` / `Key=Value` content into ordered sections.
///
/// Keys keep their case; duplicate section names merge; comment lines
/// (`#`, `;`) and lines without `=` are skipped.
fn parse_sections(content: &str) -> Vec<(String, HashMap<String, String>)> {
    let mut sections: Vec<(String, HashMap<String, String>)> = Vec::new();
    let mut current: Option<usize> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            let name = line[1..line.len() - 1].to_string();
            let index = sections
                .iter()
                .position(|(n, _)| *n == name)
                .unwrap_or_else(|| {
                    sections.push((name.clone(), HashMap::new()));
                    sections.len() - 1
                });
            current = Some(index);
            continue;
        }
        if let Some((key, value)) = line.split_once('=')
            && let Some(index) = current
        {
            sections[index]
                .1
                .insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    sections
}

/// Parses `.v8i` content into importable entries.
///
/// Sections without a `Connect` value are skipped silently; `Name`
/// defaults to the section identifier and the platform version falls
/// back from `Version` to `DefaultVersion`. A present `Usr` switches
/// the entry to manual authentication.
#[must_use]
pub fn parse_v8i(content: &str) -> Vec<ImportedBase> {
    let mut bases = Vec::new();

    for (section, keys) in parse_sections(content) {
        let connect = keys.get("Connect").cloned().unwrap_or_default();
        if connect.is_empty() {
            continue;
        }
        let name = keys.get("Name").cloned().unwrap_or_else(|| section.clone());
        let platform = keys
            .get("Version")
            .or_else(|| keys.get("DefaultVersion"))
            .cloned()
            .unwrap_or_default();
        let username = keys.get("Usr").cloned().unwrap_or_default();
        let password = keys.get("Pwd").cloned().unwrap_or_default();
        let parameters = keys.get("App").cloned().unwrap_or_default();
        let folder = keys.get("Folder").cloned().unwrap_or_default();

        let entry = BaseEntry {
            name,
            platform,
            connect,
            parameters,
            auth_mode: if username.is_empty() {
                AuthMode::Auto
            } else {
                AuthMode::Manual
            },
            auth_enterprise: AuthPair::new(username.clone(), password.clone()),
            username,
            password,
            ..BaseEntry::default()
        };
        bases.push(ImportedBase { entry, folder });
    }

    bases
}

/// Splits a `Folder` value into group-path segments.
///
/// Whichever of `\` and `/` is present acts as the separator; blank
/// segments are dropped. A bare separator (or empty value) means the
/// import root itself.
fn folder_segments(folder: &str) -> Vec<&str> {
    let folder = folder.trim();
    if folder.is_empty() || folder == "/" || folder == "\\" {
        return Vec::new();
    }
    let separator = if folder.contains('\\') { '\\' } else { '/' };
    folder
        .split(separator)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Merges parsed entries into the document under the import root.
///
/// Entries whose connection string already exists anywhere in the group
/// tree are skipped; only a new connection string produces a new entry,
/// so re-importing the same file is a no-op. Returns the number of
/// entries added.
pub fn merge_into(document: &mut RegistryDocument, bases: Vec<ImportedBase>) -> usize {
    let mut connects = document.collect_connects();
    let mut added = 0;

    for base in bases {
        if connects.contains(&base.entry.connect) {
            continue;
        }
        connects.insert(base.entry.connect.clone());
        let root = document.ensure_top_group(V8I_IMPORT_GROUP);
        root.add_entry_at(&folder_segments(&base.folder), base.entry);
        added += 1;
    }

    added
}

/// Reads, parses, and merges one `.v8i` file.
///
/// # Errors
///
/// Returns [`ImportError`] when the file cannot be read or decoded.
pub fn merge_file_into(document: &mut RegistryDocument, path: &Path) -> ImportResult<usize> {
    let content = read_v8i_file(path)?;
    Ok(merge_into(document, parse_v8i(&content)))
}

/// Imports several `.v8i` files into the document, one at a time.
///
/// Missing files are skipped quietly; a read or decode failure is
/// logged and that file is skipped without aborting the rest.
pub fn import_all<P: AsRef<Path>>(
    document: &mut RegistryDocument,
    paths: &[P],
) -> ImportReport {
    let mut report = ImportReport::default();

    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "import source missing, skipping");
            continue;
        }
        match merge_file_into(document, path) {
            Ok(added) => {
                report.added += added;
                report.files += 1;
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "import failed, skipping file");
                report.failed.push(path.to_path_buf());
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryIdentity;

    const SAMPLE: &str = "\
[1]
Name=Demo
Connect=Srvr=srv1;Ref=db1;
Folder=Clients\\Acme
Version=8.3.20
";

    #[test]
    fn parses_sections_into_entries() {
        let bases = parse_v8i(SAMPLE);
        assert_eq!(bases.len(), 1);
        let base = &bases[0];
        assert_eq!(base.entry.name, "Demo");
        assert_eq!(base.entry.connect, "Srvr=srv1;Ref=db1;");
        assert_eq!(base.entry.platform, "8.3.20");
        assert_eq!(base.folder, "Clients\\Acme");
        assert_eq!(base.entry.auth_mode, AuthMode::Auto);
    }

    #[test]
    fn name_defaults_to_section_identifier() {
        let bases = parse_v8i("[prod-db]\nConnect=File=C:\\bases\\prod;\n");
        assert_eq!(bases[0].entry.name, "prod-db");
    }

    #[test]
    fn sections_without_connect_are_skipped_silently() {
        let bases = parse_v8i("[a]\nName=No connect here\n\n[b]\nConnect=File=C:\\x;\n");
        assert_eq!(bases.len(), 1);
        assert_eq!(bases[0].entry.connect, "File=C:\\x;");
    }

    #[test]
    fn version_falls_back_to_default_version() {
        let bases = parse_v8i("[a]\nConnect=File=C:\\x;\nDefaultVersion=8.3.18\n");
        assert_eq!(bases[0].entry.platform, "8.3.18");
    }

    #[test]
    fn username_switches_auth_mode_to_manual() {
        let bases = parse_v8i("[a]\nConnect=File=C:\\x;\nUsr=admin\nPwd=secret\n");
        let entry = &bases[0].entry;
        assert_eq!(entry.auth_mode, AuthMode::Manual);
        assert_eq!(entry.auth_enterprise.username, "admin");
        assert_eq!(entry.auth_enterprise.password, "secret");
        assert_eq!(entry.username, "admin");
        assert!(entry.auth_designer.is_empty());
    }

    #[test]
    fn merge_materializes_folder_hierarchy() {
        let mut doc = RegistryDocument::default();
        let added = merge_into(&mut doc, parse_v8i(SAMPLE));
        assert_eq!(added, 1);

        let root = &doc.groups[0];
        assert_eq!(root.name, V8I_IMPORT_GROUP);
        let clients = root.children[0].as_group().unwrap();
        assert_eq!(clients.name, "Clients");
        let acme = clients.children[0].as_group().unwrap();
        assert_eq!(acme.name, "Acme");
        let entry = acme.children[0].as_base().unwrap();
        assert_eq!(entry.name, "Demo");
        assert_eq!(entry.connect, "Srvr=srv1;Ref=db1;");

        let identity = EntryIdentity::new("Demo", "Srvr=srv1;Ref=db1;");
        assert_eq!(doc.resolve_platform(&identity).as_deref(), Some("8.3.20"));
    }

    #[test]
    fn import_is_idempotent() {
        let mut doc = RegistryDocument::default();
        assert_eq!(merge_into(&mut doc, parse_v8i(SAMPLE)), 1);
        let snapshot = doc.clone();
        assert_eq!(merge_into(&mut doc, parse_v8i(SAMPLE)), 0);
        assert_eq!(doc, snapshot);
    }

    #[test]
    fn dedup_is_by_connect_only() {
        let mut doc = RegistryDocument::default();
        merge_into(&mut doc, parse_v8i(SAMPLE));
        // Same connection string under a different name: still a duplicate
        let renamed = "[2]\nName=Demo renamed\nConnect=Srvr=srv1;Ref=db1;\n";
        assert_eq!(merge_into(&mut doc, parse_v8i(renamed)), 0);
        // A different connection string with the same name is a new base
        let moved = "[3]\nName=Demo\nConnect=Srvr=srv2;Ref=db1;\n";
        assert_eq!(merge_into(&mut doc, parse_v8i(moved)), 1);
    }

    #[test]
    fn bare_separator_folder_lands_at_import_root() {
        let mut doc = RegistryDocument::default();
        merge_into(
            &mut doc,
            parse_v8i("[a]\nName=Rooted\nConnect=File=C:\\x;\nFolder=/\n"),
        );
        let root = &doc.groups[0];
        assert_eq!(root.children[0].as_base().unwrap().name, "Rooted");
    }

    #[test]
    fn blank_folder_segments_are_dropped() {
        assert_eq!(folder_segments("Clients\\\\Acme"), vec!["Clients", "Acme"]);
        assert_eq!(folder_segments("/a//b/"), vec!["a", "b"]);
        assert_eq!(folder_segments("  "), Vec::<&str>::new());
    }

    #[test]
    fn existing_groups_are_reused_by_exact_name() {
        let mut doc = RegistryDocument::default();
        merge_into(&mut doc, parse_v8i(SAMPLE));
        let sibling = "[2]\nName=Second\nConnect=File=C:\\second;\nFolder=Clients\\Acme\n";
        merge_into(&mut doc, parse_v8i(sibling));

        let root = &doc.groups[0];
        assert_eq!(root.children.len(), 1, "Clients group not duplicated");
        let acme = root.children[0].as_group().unwrap().children[0]
            .as_group()
            .unwrap();
        assert_eq!(acme.children.len(), 2);
    }

    #[test]
    fn reads_utf8_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bases.v8i");
        let mut bytes = b"\xef\xbb\xbf".to_vec();
        bytes.extend_from_slice("[a]\nName=Демо\nConnect=File=C:\\x;\n".as_bytes());
        fs::write(&path, bytes).unwrap();

        let content = read_v8i_file(&path).unwrap();
        assert_eq!(parse_v8i(&content)[0].entry.name, "Демо");
    }

    #[test]
    fn falls_back_to_cp1251() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bases.v8i");
        // "Демо" in cp1251, not valid UTF-8
        let mut bytes = b"[a]\nName=".to_vec();
        bytes.extend_from_slice(&[0xC4, 0xE5, 0xEC, 0xEE]);
        bytes.extend_from_slice(b"\nConnect=File=C:\\x;\n");
        fs::write(&path, bytes).unwrap();

        let content = read_v8i_file(&path).unwrap();
        assert_eq!(parse_v8i(&content)[0].entry.name, "Демо");
    }

    #[test]
    fn batch_continues_past_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.v8i");
        fs::write(&good, SAMPLE).unwrap();
        let missing = dir.path().join("missing.v8i");

        let mut doc = RegistryDocument::default();
        let report = import_all(&mut doc, &[missing, good]);
        assert_eq!(report.added, 1);
        assert_eq!(report.files, 1);
        assert!(report.failed.is_empty());
    }
}
