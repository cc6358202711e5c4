/// Menu commands understood by the bot. Incoming text resolves here through
/// [`Command::parse`]; every handler is dispatched by value from one match,
/// so there is no shared handler table to mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Tournaments,
    ActiveTournaments,
    Rating,
    Profile,
    MyRegistrations,
    Back,
}

impl Command {
    /// Map a message text to a command. Button labels and the slash forms
    /// are both accepted; anything else is left to the fallback reply.
    pub fn parse(text: &str) -> Option<Command> {
        match text.trim() {
            "/start" => Some(Command::Start),
            "/help" | "Help" => Some(Command::Help),
            "/tournaments" | "Tournaments" => Some(Command::Tournaments),
            "Active tournaments" => Some(Command::ActiveTournaments),
            "/rating" | "Rating" => Some(Command::Rating),
            "/profile" | "My profile" => Some(Command::Profile),
            "My registrations" => Some(Command::MyRegistrations),
            "Back" => Some(Command::Back),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_commands_and_button_labels_both_resolve() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(Command::parse("Help"), Some(Command::Help));
        assert_eq!(Command::parse("Tournaments"), Some(Command::Tournaments));
        assert_eq!(
            Command::parse("Active tournaments"),
            Some(Command::ActiveTournaments)
        );
        assert_eq!(Command::parse("Rating"), Some(Command::Rating));
        assert_eq!(Command::parse("My profile"), Some(Command::Profile));
        assert_eq!(
            Command::parse("My registrations"),
            Some(Command::MyRegistrations)
        );
        assert_eq!(Command::parse("Back"), Some(Command::Back));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert_eq!(Command::parse("  /start  "), Some(Command::Start));
    }

    #[test]
    fn unknown_text_falls_through() {
        assert_eq!(Command::parse("all in"), None);
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("/starts"), None);
    }
}
