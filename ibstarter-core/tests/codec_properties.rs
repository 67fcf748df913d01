//! Property tests for the connection-string codec: decoding an encoded
//! descriptor recovers the kind and every field, for well-formed inputs
//! of each connection kind.

use ibstarter_core::connect::ConnectString;
use proptest::prelude::*;

// Field values may contain anything except the `;` delimiter; file
// paths additionally avoid a leading prefix that would reclassify them.
const FIELD: &str = "[A-Za-z0-9_\\\\:. -]{1,40}";

proptest! {
    #[test]
    fn file_descriptors_round_trip(path in FIELD) {
        let original = ConnectString::File { path: path.clone() };
        let decoded = ConnectString::decode(&original.encode());
        prop_assert_eq!(decoded, original);
    }

    #[test]
    fn server_descriptors_round_trip(server in FIELD, reference in FIELD) {
        let original = ConnectString::Server {
            server: server.clone(),
            reference: reference.clone(),
        };
        let decoded = ConnectString::decode(&original.encode());
        prop_assert_eq!(decoded, original);
    }

    #[test]
    fn web_service_descriptors_round_trip(suffix in "[A-Za-z0-9./_-]{0,40}") {
        for prefix in ["http://", "https://", "/WS/"] {
            let original = ConnectString::WebService {
                url: format!("{prefix}{suffix}"),
            };
            let decoded = ConnectString::decode(&original.encode());
            prop_assert_eq!(decoded, original);
        }
    }

    #[test]
    fn decoding_never_panics(raw in ".{0,80}") {
        let _ = ConnectString::decode(&raw);
    }
}
