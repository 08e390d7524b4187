/// Canned prompts offered before the user has typed anything.
pub const SUGGESTIONS: [&str; 4] = [
    "I'm feeling stressed",
    "I need help with anxiety",
    "How can I feel better?",
    "I'm having a bad day",
];

pub fn suggestion(index: usize) -> Option<&'static str> {
    SUGGESTIONS.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_bounds_checked() {
        assert_eq!(suggestion(0), Some("I'm feeling stressed"));
        assert_eq!(suggestion(SUGGESTIONS.len()), None);
    }
}
