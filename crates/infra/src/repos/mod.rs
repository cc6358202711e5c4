pub mod player_chips;
pub mod rating;
pub mod registrations;
pub mod table_assignments;
pub mod tournament_tables;
pub mod tournaments;
pub mod users;

pub use player_chips::UpsertPlayerChips;
pub use rating::{CreateRatingEntry, UpdateRatingEntry};
pub use table_assignments::UpsertAssignment;
pub use tournaments::{
    CreateTournamentData, EffectiveStatus, TournamentStatus, UpdateTournamentData,
};
pub use users::{CreateUserData, UserRole};
