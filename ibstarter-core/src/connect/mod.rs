//! Connection-string codec.
//!
//! An infobase is reached through one of three connection kinds, all
//! persisted as a single delimited string: a local file directory
//! (`File=<path>;`), an application server (`Srvr=<server>;Ref=<db>;`),
//! or a web-service URL carried verbatim.

/// A decoded connection descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectString {
    /// File infobase: a directory path
    File {
        /// Infobase directory
        path: String,
    },
    /// Server infobase: cluster address plus database reference
    Server {
        /// Cluster address
        server: String,
        /// Database reference name
        reference: String,
    },
    /// Web-service infobase: the URL itself
    WebService {
        /// Publication URL
        url: String,
    },
}

impl ConnectString {
    /// Encodes this descriptor into its single-string form.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::File { path } => format!("File={path};"),
            Self::Server { server, reference } => format!("Srvr={server};Ref={reference};"),
            Self::WebService { url } => url.clone(),
        }
    }

    /// Classifies a raw connection string and extracts its fields.
    ///
    /// A string starting with `Srvr=` is a server descriptor; one starting
    /// with `http` or `/WS` is a web-service URL; anything else is treated
    /// as a file path, with a leading `File=` stripped when present.
    /// No path or URL syntax is validated; malformed segments simply
    /// produce empty fields.
    #[must_use]
    pub fn decode(raw: &str) -> Self {
        if raw.starts_with("Srvr=") {
            let fields = split_fields(raw);
            return Self::Server {
                server: lookup(&fields, "Srvr"),
                reference: lookup(&fields, "Ref"),
            };
        }
        if raw.starts_with("http") || raw.starts_with("/WS") {
            return Self::WebService {
                url: raw.to_string(),
            };
        }
        let path = raw.strip_prefix("File=").unwrap_or(raw);
        Self::File {
            path: path.trim_end_matches(';').to_string(),
        }
    }
}

impl std::fmt::Display for ConnectString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Splits a `key=value;key=value;` string into pairs, keeping the first
/// `=` in each segment as the delimiter. Segments without `=` are dropped.
fn split_fields(raw: &str) -> Vec<(&str, &str)> {
    raw.split(';')
        .filter_map(|segment| segment.split_once('='))
        .collect()
}

fn lookup(fields: &[(&str, &str)], key: &str) -> String {
    fields
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| (*v).to_string())
        .unwrap_or_default()
}
