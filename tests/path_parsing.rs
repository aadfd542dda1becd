//! Property tests for splitting registry paths.

use proptest::prelude::*;
use win_utilities::{RegistryError, RegistryPath, RootKey};

fn root_key() -> impl Strategy<Value = RootKey> {
    prop::sample::select(RootKey::ALL.to_vec())
}

proptest! {
    #[test]
    fn valid_paths_split_into_root_and_subkey(
        root in root_key(),
        subkey in r"[A-Za-z0-9 _.\\-]{0,40}",
    ) {
        let path = RegistryPath::parse(&format!("{}\\{}", root.alias(), subkey)).unwrap();
        prop_assert_eq!(path.root, root);
        prop_assert_eq!(path.subkey, subkey);
    }

    #[test]
    fn paths_without_alias_are_rejected(text in r"[^H].{0,40}") {
        let err = RegistryPath::parse(&text).unwrap_err();
        let is_invalid_root = matches!(err, RegistryError::InvalidRootKey { .. });
        prop_assert!(is_invalid_root);
    }

    #[test]
    fn alias_must_be_followed_by_separator(
        root in root_key(),
        rest in r"[A-Za-z0-9_/]{0,20}",
    ) {
        let text = format!("{}{}", root.alias(), rest);
        let rejected = RegistryPath::parse(&text).is_err();
        prop_assert!(rejected);
    }
}
