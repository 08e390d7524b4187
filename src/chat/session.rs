/// Holds the backend's opaque session token between turns.
#[derive(Debug, Default, Clone)]
pub struct SessionBinder {
    session_id: Option<String>,
}

impl SessionBinder {
    pub fn get(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn set(&mut self, token: impl Into<String>) {
        self.session_id = Some(token.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_latest_token_wins() {
        let mut binder = SessionBinder::default();
        assert_eq!(binder.get(), None);

        binder.set("abc");
        binder.set("def");
        assert_eq!(binder.get(), Some("def"));
    }
}
