pub mod auth;
pub mod players;
pub mod profile;
pub mod rating;
pub mod registrations;
pub mod tournaments;
