//! List the registry tree.

use std::path::Path;

use ibstarter_core::models::{BaseEntry, Node};

use crate::error::CliError;
use crate::util::load_registry;

/// List command handler
pub fn cmd_list(config_path: Option<&Path>) -> Result<(), CliError> {
    let (_, document) = load_registry(config_path)?;

    println!("★ Favorites");
    if document.favorites.is_empty() {
        println!("  (none)");
    }
    for entry in &document.favorites {
        print_entry(entry, 1);
    }

    for group in &document.groups {
        print_group_line(&group.name, &group.platform, 0);
        print_children(&group.children, 1);
    }

    Ok(())
}

fn print_children(children: &[Node], depth: usize) {
    for node in children {
        match node {
            Node::Group(group) => {
                print_group_line(&group.name, &group.platform, depth);
                print_children(&group.children, depth + 1);
            }
            Node::Base(entry) => print_entry(entry, depth),
        }
    }
}

fn print_group_line(name: &str, platform: &str, depth: usize) {
    let indent = "  ".repeat(depth);
    if platform.is_empty() {
        println!("{indent}{name}/");
    } else {
        println!("{indent}{name}/ ({platform})");
    }
}

fn print_entry(entry: &BaseEntry, depth: usize) {
    let indent = "  ".repeat(depth);
    let platform = if entry.platform.is_empty() {
        String::new()
    } else {
        format!(" [{}]", entry.platform)
    };
    println!("{indent}{}{platform}  {}", entry.name, entry.connect);
}
