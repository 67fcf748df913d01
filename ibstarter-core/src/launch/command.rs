//! Launch command-line construction.
//!
//! Builds the argument vector handed to the platform executable:
//! mode tokens, one connection token, and optional credential tokens.
//! Values are concatenated directly onto their flag prefixes with no
//! escaping; a password containing `;` or a flag prefix will corrupt
//! the argument. That matches the external tool's own launcher and is
//! an accepted limitation, not something to fix here.

use crate::models::{AuthPair, BaseEntry};

/// Mode token for enterprise (and test) sessions.
const ENTERPRISE_TOKEN: &str = "ENTERPRISE";
/// Mode token for configurator sessions.
const DESIGNER_TOKEN: &str = "DESIGNER";
/// Extra debug-console flag appended in test mode.
const DEBUG_CONSOLE_FLAG: &str = "/C";

/// What kind of session to start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LaunchMode {
    /// A regular user session
    #[default]
    Enterprise,
    /// The configurator (designer)
    Configurator,
    /// An enterprise session with the debug console attached
    Test,
}

impl LaunchMode {
    /// Returns the lowercase identifier used in user interfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enterprise => "enterprise",
            Self::Configurator => "configurator",
            Self::Test => "test",
        }
    }
}

impl std::str::FromStr for LaunchMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enterprise" => Ok(Self::Enterprise),
            "configurator" | "designer" => Ok(Self::Configurator),
            "test" => Ok(Self::Test),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the credential pair for a launch.
///
/// Policy: the unified top-level username/password pair wins; the
/// mode-specific pair (enterprise pair for enterprise and test runs,
/// designer pair for the configurator) applies only when the unified
/// pair is entirely empty. With OS authentication no credentials are
/// passed at all.
#[must_use]
pub fn select_credentials(entry: &BaseEntry, mode: LaunchMode) -> AuthPair {
    if entry.auth_os {
        return AuthPair::default();
    }
    let unified = AuthPair::new(entry.username.clone(), entry.password.clone());
    if !unified.is_empty() {
        return unified;
    }
    match mode {
        LaunchMode::Enterprise | LaunchMode::Test => entry.auth_enterprise.clone(),
        LaunchMode::Configurator => entry.auth_designer.clone(),
    }
}

/// Finds an ASCII needle case-insensitively, returning its byte offset.
fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

/// Builds the connection token from a raw connection string.
///
/// A string containing `ws=` yields a web-service token carrying the
/// URL up to the next `;`; one containing `srvr=` yields a server token
/// with all `;` stripped; anything else is a file token with the
/// `File=` prefix and `;` stripped. Markers match case-insensitively.
fn connection_token(connect: &str) -> String {
    if let Some(pos) = find_ascii_ci(connect, "ws=") {
        let rest = &connect[pos + "ws=".len()..];
        let url = rest.split(';').next().unwrap_or_default();
        return format!("/WS{url}");
    }
    if find_ascii_ci(connect, "srvr=").is_some() {
        return format!("/S{}", connect.replace(';', ""));
    }
    format!("/F{}", connect.replace("File=", "").replace(';', ""))
}

/// Builds the full argument vector for one launch.
///
/// Credential tokens are appended only when OS authentication is not
/// requested; a username blank after trimming is omitted, and the
/// password is omitted when empty.
#[must_use]
pub fn build_launch_args(
    connect: &str,
    mode: LaunchMode,
    credentials: &AuthPair,
    auth_os: bool,
) -> Vec<String> {
    let mut args = Vec::new();

    match mode {
        LaunchMode::Enterprise => args.push(ENTERPRISE_TOKEN.to_string()),
        LaunchMode::Configurator => args.push(DESIGNER_TOKEN.to_string()),
        LaunchMode::Test => {
            args.push(ENTERPRISE_TOKEN.to_string());
            args.push(DEBUG_CONSOLE_FLAG.to_string());
        }
    }

    args.push(connection_token(connect));

    if !auth_os {
        if !credentials.username.trim().is_empty() {
            args.push(format!("/N{}", credentials.username));
        }
        if !credentials.password.is_empty() {
            args.push(format!("/P{}", credentials.password));
        }
    }

    args
}
