use crate::client::{Profile, RatingEntry, TournamentDetail, TournamentSummary};
use crate::telegram::ReplyKeyboard;

pub fn main_menu() -> ReplyKeyboard {
    ReplyKeyboard::new(&[&["Tournaments", "Rating"], &["My profile", "Help"]])
}

pub fn tournaments_menu() -> ReplyKeyboard {
    ReplyKeyboard::new(&[&["Active tournaments", "My registrations"], &["Back"]])
}

pub fn welcome(first_name: &str, frontend_url: &str) -> String {
    format!(
        "Hi, {first_name}!\n\n\
         Welcome to the <b>Poker Club</b>.\n\n\
         Here you can:\n\
         - browse upcoming tournaments\n\
         - follow the player rating\n\
         - track your own progress\n\n\
         Registration and everything else lives in the web app:\n\
         <a href=\"{frontend_url}\">{frontend_url}</a>"
    )
}

pub fn help(frontend_url: &str) -> String {
    format!(
        "<b>Bot guide</b>\n\n\
         Tournaments - upcoming and running tournaments\n\
         Rating - the leaderboard\n\
         My profile - your score and position\n\n\
         To register for a tournament, use the web app:\n\
         <a href=\"{frontend_url}\">{frontend_url}</a>"
    )
}

pub fn tournaments_intro(frontend_url: &str) -> String {
    format!(
        "<b>Tournaments</b>\n\n\
         Browse the active list or check your registrations.\n\
         Full management: <a href=\"{frontend_url}\">web app</a>"
    )
}

pub fn active_tournaments(tournaments: &[TournamentSummary], frontend_url: &str) -> String {
    if tournaments.is_empty() {
        return "No tournaments are open at the moment.".to_string();
    }

    let mut text = String::from("<b>Active tournaments:</b>\n\n");
    for t in tournaments.iter().take(5) {
        text.push_str(&format!(
            "<b>{}</b>\n\
             Buy-in: {}\n\
             Chips: {}\n\
             Starts: {}\n\
             Players: {}\n\n",
            t.name,
            t.buy_in_cost,
            t.buy_in_chips,
            t.start_time.format("%d.%m %H:%M"),
            t.registered_players
        ));
    }

    if tournaments.len() > 5 {
        text.push_str(&format!(
            "<i>...and {} more</i>\n\n",
            tournaments.len() - 5
        ));
    }
    text.push_str(&format!(
        "Register in the <a href=\"{frontend_url}\">web app</a>"
    ));
    text
}

pub fn rating_table(entries: &[RatingEntry]) -> String {
    if entries.is_empty() {
        return "The rating table is empty.".to_string();
    }

    let mut text = String::from("<b>Top 10 players:</b>\n\n");
    for (index, entry) in entries.iter().take(10).enumerate() {
        text.push_str(&format!(
            "<b>{}. {}</b> - {}",
            index + 1,
            entry.player_name,
            entry.score
        ));
        if let Some(handle) = &entry.telegram_username {
            text.push_str(&format!(" (@{handle})"));
        }
        text.push('\n');
    }
    text
}

pub fn profile(profile: &Profile) -> String {
    let mut text = format!(
        "<b>Your profile</b>\n\nName: {}\n",
        profile.display_name
    );
    if let Some(handle) = &profile.telegram_username {
        text.push_str(&format!("Username: @{handle}\n"));
    }
    match &profile.rating {
        Some(rating) => {
            text.push_str(&format!("Score: {}\n", rating.score));
            if let Some(position) = rating.position {
                text.push_str(&format!("Position: {position}\n"));
            }
        }
        None => text.push_str("Score: not rated yet\n"),
    }
    text
}

pub fn my_registrations(tournaments: &[TournamentDetail], frontend_url: &str) -> String {
    if tournaments.is_empty() {
        return "You have no tournament registrations.".to_string();
    }

    let mut text = String::from("<b>Your registrations:</b>\n\n");
    for t in tournaments.iter().take(3) {
        text.push_str(&format!("<b>{}</b>\nStatus: {}\n\n", t.name, t.status));
    }
    if tournaments.len() > 3 {
        text.push_str(&format!(
            "<i>...and {} more</i>\n\n",
            tournaments.len() - 3
        ));
    }
    text.push_str(&format!(
        "Details in the <a href=\"{frontend_url}\">web app</a>"
    ));
    text
}

pub fn unknown_command() -> &'static str {
    "Unknown command. Use the menu buttons or /help."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_table_caps_at_ten_rows() {
        let entries: Vec<RatingEntry> = (0..15)
            .map(|i| RatingEntry {
                player_name: format!("Player {i}"),
                telegram_username: None,
                score: 1000 + i,
            })
            .collect();

        let text = rating_table(&entries);
        assert!(text.contains("Player 9"));
        assert!(!text.contains("Player 10"));
    }

    #[test]
    fn empty_states_have_friendly_messages() {
        assert!(active_tournaments(&[], "http://club.example").contains("No tournaments"));
        assert!(rating_table(&[]).contains("empty"));
        assert!(my_registrations(&[], "http://club.example").contains("no tournament"));
    }
}
