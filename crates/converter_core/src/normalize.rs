//! Shape checks and canonicalization for the two text forms.

const UUID_HEX_DIGITS: usize = 32;
const GROUP_LENGTHS: [usize; 5] = [8, 4, 4, 4, 12];

fn strip_hyphens(text: &str) -> String {
    text.chars().filter(|ch| *ch != '-').collect()
}

/// True when `text` is exactly 32 hex digits once hyphens are removed.
pub fn is_uuid_shaped(text: &str) -> bool {
    let clean = strip_hyphens(text);
    clean.len() == UUID_HEX_DIGITS && clean.chars().all(|ch| ch.is_ascii_hexdigit())
}

/// Lowercases and regroups 8-4-4-4-12. Input that is not UUID-shaped is
/// returned unchanged.
pub fn normalize_uuid(text: &str) -> String {
    if !is_uuid_shaped(text) {
        return text.to_string();
    }

    let clean = strip_hyphens(text).to_ascii_lowercase();
    let mut groups = Vec::with_capacity(GROUP_LENGTHS.len());
    let mut start = 0;
    for len in GROUP_LENGTHS {
        groups.push(&clean[start..start + len]);
        start += len;
    }
    groups.join("-")
}

pub fn is_in_alphabet(text: &str, alphabet: &str) -> bool {
    text.chars().all(|ch| alphabet.contains(ch))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn groups_bare_hex() {
        assert_eq!(
            normalize_uuid("550e8400e29b41d4a716446655440000"),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn lowercases_and_regroups_misplaced_hyphens() {
        assert_eq!(
            normalize_uuid("550E8400E29B-41D4A716-4466-5544-0000"),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn rejects_wrong_length_and_non_hex() {
        assert!(!is_uuid_shaped(""));
        assert!(!is_uuid_shaped("550e8400-e29b-41d4-a716-44665544000"));
        assert!(!is_uuid_shaped("550e8400-e29b-41d4-a716-4466554400000"));
        assert!(!is_uuid_shaped("550e8400-e29b-41d4-a716-44665544000g"));
        assert!(!is_uuid_shaped("550e8400 e29b 41d4 a716 446655440000"));
    }

    #[test]
    fn leaves_malformed_input_untouched() {
        assert_eq!(normalize_uuid("not-a-uuid"), "not-a-uuid");
    }

    #[test]
    fn alphabet_membership_is_per_character() {
        assert!(is_in_alphabet("abc", "abcdef"));
        assert!(!is_in_alphabet("ab c", "abcdef"));
        assert!(is_in_alphabet("", "abcdef"));
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(bits in any::<u128>(), upper in any::<bool>()) {
            let hex = format!("{bits:032x}");
            let input = if upper { hex.to_ascii_uppercase() } else { hex };
            let once = normalize_uuid(&input);
            prop_assert_eq!(normalize_uuid(&once), once.clone());
            prop_assert_eq!(once.len(), 36);
        }
    }
}
