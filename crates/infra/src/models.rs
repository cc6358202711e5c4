use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::repos::tournaments::{EffectiveStatus, TournamentStatus};

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserRow {
    pub id: Uuid,
    pub username: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub telegram_username: Option<String>,
    pub telegram_id: Option<i64>,
    pub display_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub fn is_director(&self) -> bool {
        self.role == "director"
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TournamentRow {
    pub id: Uuid,
    pub name: String,
    pub buy_in_cost: i32,
    pub buy_in_chips: i32,
    pub rebuy_cost: i32,
    pub rebuy_chips: i32,
    pub addon_cost: i32,
    pub addon_chips: i32,
    pub level_minutes: i32,
    pub start_time: DateTime<Utc>,
    pub late_reg_end_time: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TournamentRow {
    /// Time-derived display status. Never mutates the persisted value.
    pub fn effective_status(&self, now: DateTime<Utc>) -> EffectiveStatus {
        derive_effective_status(self.status, self.start_time, self.late_reg_end_time, now)
    }
}

/// Effective-status decision table, shared by the full row and the
/// listing summary.
pub fn derive_effective_status(
    persisted: TournamentStatus,
    start_time: DateTime<Utc>,
    late_reg_end_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> EffectiveStatus {
    match persisted {
        TournamentStatus::Completed => EffectiveStatus::Completed,
        TournamentStatus::ActiveNoLateReg => EffectiveStatus::ActiveNoLateReg,
        TournamentStatus::Active => {
            if now < late_reg_end_time {
                EffectiveStatus::LateRegistration
            } else {
                EffectiveStatus::Active
            }
        }
        TournamentStatus::Registration => {
            if now < start_time {
                EffectiveStatus::Registration
            } else if now < late_reg_end_time {
                EffectiveStatus::LateRegistration
            } else {
                EffectiveStatus::Active
            }
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RegistrationRow {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub user_id: Uuid,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlayerChipsRow {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub user_id: Uuid,
    pub chips: i32,
    pub rebuys: i32,
    pub addons: i32,
    pub updated_at: DateTime<Utc>,
}

/// Rating rows are linked to users only by matching `telegram_username`.
/// There is no foreign key; the lookup may legitimately find no match.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RatingRow {
    pub id: Uuid,
    pub player_name: String,
    pub telegram_username: Option<String>,
    pub score: i32,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TournamentTableRow {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub table_number: i32,
    pub max_seats: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TableAssignmentRow {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub table_id: Uuid,
    pub user_id: Uuid,
    pub seat_number: i32,
    pub assigned_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tournament(status: TournamentStatus) -> TournamentRow {
        TournamentRow {
            id: Uuid::new_v4(),
            name: "Friday Deepstack".into(),
            buy_in_cost: 2000,
            buy_in_chips: 30000,
            rebuy_cost: 0,
            rebuy_chips: 0,
            addon_cost: 0,
            addon_chips: 0,
            level_minutes: 15,
            start_time: Utc.with_ymd_and_hms(2025, 3, 7, 19, 0, 0).unwrap(),
            late_reg_end_time: Utc.with_ymd_and_hms(2025, 3, 7, 20, 30, 0).unwrap(),
            created_by: None,
            status,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 7, h, m, 0).unwrap()
    }

    #[test]
    fn registration_phase_follows_the_clock() {
        let t = tournament(TournamentStatus::Registration);
        assert_eq!(t.effective_status(at(18, 0)), EffectiveStatus::Registration);
        assert_eq!(
            t.effective_status(at(19, 0)),
            EffectiveStatus::LateRegistration
        );
        assert_eq!(
            t.effective_status(at(20, 0)),
            EffectiveStatus::LateRegistration
        );
        assert_eq!(t.effective_status(at(20, 30)), EffectiveStatus::Active);
        assert_eq!(t.effective_status(at(23, 0)), EffectiveStatus::Active);
    }

    #[test]
    fn effective_status_is_monotonic_for_registration() {
        let t = tournament(TournamentStatus::Registration);
        let samples = [
            at(10, 0),
            at(18, 59),
            at(19, 0),
            at(19, 45),
            at(20, 29),
            at(20, 30),
            at(22, 0),
        ];
        let ranks: Vec<u8> = samples
            .iter()
            .map(|now| match t.effective_status(*now) {
                EffectiveStatus::Registration => 0,
                EffectiveStatus::LateRegistration => 1,
                EffectiveStatus::Active => 2,
                other => panic!("unexpected status {other:?}"),
            })
            .collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn active_tournament_reports_late_registration_until_cutoff() {
        let t = tournament(TournamentStatus::Active);
        assert_eq!(
            t.effective_status(at(19, 30)),
            EffectiveStatus::LateRegistration
        );
        assert_eq!(t.effective_status(at(20, 30)), EffectiveStatus::Active);
    }

    #[test]
    fn forced_statuses_ignore_the_clock() {
        let closed = tournament(TournamentStatus::ActiveNoLateReg);
        assert_eq!(
            closed.effective_status(at(19, 15)),
            EffectiveStatus::ActiveNoLateReg
        );

        let done = tournament(TournamentStatus::Completed);
        // Completed stays completed even before the nominal start.
        assert_eq!(done.effective_status(at(10, 0)), EffectiveStatus::Completed);
        assert_eq!(done.effective_status(at(23, 0)), EffectiveStatus::Completed);
    }
}
