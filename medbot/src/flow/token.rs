//! Selection tokens carried by candidate buttons.
//!
//! A candidate's button carries `select_<exact name>`. Telegram caps callback data at 64 bytes, so a
//! name too long for that gets `pick_<generation>_<index>` instead. The generation identifies the
//! keyboard, so a tap on an older keyboard cannot resolve against a newer candidate list.

pub const SELECT_PREFIX: &str = "select_";
pub const PICK_PREFIX: &str = "pick_";
pub const MAX_TOKEN_BYTES: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionToken {
    Name(String),
    Index { generation: u64, index: usize },
}

impl SelectionToken {
    /// Parses button data. Returns None for data this bot never produces.
    pub fn parse(data: &str) -> Option<Self> {
        if let Some(name) = data.strip_prefix(SELECT_PREFIX) {
            return Some(SelectionToken::Name(name.to_string()));
        }
        let (generation, index) = data.strip_prefix(PICK_PREFIX)?.split_once('_')?;
        Some(SelectionToken::Index {
            generation: generation.parse().ok()?,
            index: index.parse().ok()?,
        })
    }

    /// Token for the candidate at `index` of the keyboard built for search `generation`.
    pub fn for_candidate(generation: u64, index: usize, name: &str) -> String {
        let token = format!("{}{}", SELECT_PREFIX, name);
        if token.len() <= MAX_TOKEN_BYTES {
            token
        } else {
            format!("{}{}_{}", PICK_PREFIX, generation, index)
        }
    }

    /// Whether `data` looks like a token of this bot (used for routing).
    pub fn is_selection_data(data: &str) -> bool {
        data.starts_with(SELECT_PREFIX) || data.starts_with(PICK_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_token() {
        assert_eq!(
            SelectionToken::parse("select_Aspirin Cardio"),
            Some(SelectionToken::Name("Aspirin Cardio".to_string()))
        );
        // Only the leading prefix is stripped.
        assert_eq!(
            SelectionToken::parse("select_select_x"),
            Some(SelectionToken::Name("select_x".to_string()))
        );
    }

    #[test]
    fn test_parse_index_token() {
        assert_eq!(
            SelectionToken::parse("pick_7_3"),
            Some(SelectionToken::Index {
                generation: 7,
                index: 3
            })
        );
        assert_eq!(SelectionToken::parse("pick_3"), None);
        assert_eq!(SelectionToken::parse("pick_x_1"), None);
        assert_eq!(SelectionToken::parse("pick_1_x"), None);
        assert_eq!(SelectionToken::parse("other"), None);
    }

    #[test]
    fn test_for_candidate_short_name_uses_name() {
        assert_eq!(
            SelectionToken::for_candidate(1, 0, "Aspirin Cardio"),
            "select_Aspirin Cardio"
        );
    }

    #[test]
    fn test_for_candidate_long_name_uses_index() {
        // 40 Cyrillic chars = 80 bytes.
        let name = "Ж".repeat(40);
        let token = SelectionToken::for_candidate(12, 5, &name);
        assert_eq!(token, "pick_12_5");
        assert!(SelectionToken::for_candidate(u64::MAX, usize::MAX, &name).len() <= MAX_TOKEN_BYTES);
        assert_eq!(
            SelectionToken::parse(&token),
            Some(SelectionToken::Index {
                generation: 12,
                index: 5
            })
        );
    }

    #[test]
    fn test_is_selection_data() {
        assert!(SelectionToken::is_selection_data("select_A"));
        assert!(SelectionToken::is_selection_data("pick_0_0"));
        assert!(!SelectionToken::is_selection_data("noop"));
    }
}
