/// Local identity and whether the user has joined the chat.
///
/// Starts inactive and becomes active exactly once; there is no way back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    display_name: String,
    active: bool,
}

impl Session {
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activates the session under the trimmed `name`.
    ///
    /// Returns the stored name on the transition, `None` when the name is
    /// blank or the session is already active.
    pub fn activate(&mut self, name: &str) -> Option<&str> {
        let trimmed = name.trim();
        if self.active || trimmed.is_empty() {
            return None;
        }

        self.display_name = trimmed.to_owned();
        self.active = true;
        Some(&self.display_name)
    }
}
