use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use infra::repos::{
    registrations, table_assignments, table_assignments::UpsertAssignment, tournament_tables,
    tournaments,
};

pub const TABLE_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSeat {
    pub user_id: Uuid,
    pub table_number: i32,
    pub seat_number: i32,
    pub newly_assigned: bool,
}

#[derive(Debug, Clone)]
pub struct SeatingPlan {
    pub seats: Vec<PlannedSeat>,
    pub table_count: i32,
    pub newly_assigned: usize,
    pub registrant_count: usize,
}

/// Result reported back to the director.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AssignResult {
    pub tables_count: i32,
    pub players_count: usize,
    pub new_players_assigned: usize,
}

/// Chunk the registrant list into tables of ten and pick seats.
///
/// Pure positional chunking over the full list, in load order: chunk `i`
/// (0-indexed) lands on table `i + 1`, so a previously seated player keeps
/// the seat number but may change tables once new registrants shift the
/// chunk boundaries. Each chunk draws new seats from its own shuffled pool
/// of 1..=10; a chunk never exceeds the pool, so the draw cannot run dry.
pub fn plan_seating<R: Rng>(
    registrants: &[Uuid],
    existing: &HashMap<Uuid, i32>,
    rng: &mut R,
) -> Result<SeatingPlan, AppError> {
    if registrants.is_empty() {
        return Err(AppError::NothingToAssign("No registered players"));
    }

    let newly_assigned = registrants
        .iter()
        .filter(|&user_id| !existing.contains_key(user_id))
        .count();
    if newly_assigned == 0 {
        return Err(AppError::NothingToAssign("All players are already seated"));
    }

    let table_count = registrants.len().div_ceil(TABLE_CAPACITY);
    let mut seats = Vec::with_capacity(registrants.len());

    for (chunk_index, chunk) in registrants.chunks(TABLE_CAPACITY).enumerate() {
        let mut pool: Vec<i32> = (1..=TABLE_CAPACITY as i32).collect();
        pool.shuffle(rng);
        let mut draw = pool.into_iter();

        for user_id in chunk {
            let (seat_number, is_new) = match existing.get(user_id) {
                Some(kept) => (*kept, false),
                None => (
                    draw.next().expect("a chunk never exceeds the seat pool"),
                    true,
                ),
            };
            seats.push(PlannedSeat {
                user_id: *user_id,
                table_number: chunk_index as i32 + 1,
                seat_number,
                newly_assigned: is_new,
            });
        }
    }

    Ok(SeatingPlan {
        seats,
        table_count: table_count as i32,
        newly_assigned,
        registrant_count: registrants.len(),
    })
}

/// Run a seating pass: rebuild the table grouping and upsert one assignment
/// per registrant. Safe to call again as players keep registering.
pub async fn assign_tables(pool: &PgPool, tournament_id: Uuid) -> Result<AssignResult, AppError> {
    tournaments::get(pool, tournament_id)
        .await?
        .ok_or(AppError::NotFound("Tournament"))?;

    let mut tx = pool.begin().await?;

    let registrants = registrations::list_user_ids(&mut *tx, tournament_id).await?;
    let existing = table_assignments::seat_numbers_by_user(&mut *tx, tournament_id).await?;

    let plan = plan_seating(&registrants, &existing, &mut rand::rng())?;

    // The old grouping goes away wholesale; assignments stay and are
    // re-pointed below (the FK is deferred until commit).
    tournament_tables::delete_for_tournament(&mut *tx, tournament_id).await?;

    let mut table_ids = Vec::with_capacity(plan.table_count as usize);
    for table_number in 1..=plan.table_count {
        let table = tournament_tables::create(
            &mut *tx,
            tournament_id,
            table_number,
            TABLE_CAPACITY as i32,
        )
        .await?;
        table_ids.push(table.id);
    }

    for seat in &plan.seats {
        table_assignments::upsert(
            &mut *tx,
            UpsertAssignment {
                tournament_id,
                table_id: table_ids[(seat.table_number - 1) as usize],
                user_id: seat.user_id,
                seat_number: seat.seat_number,
            },
        )
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        %tournament_id,
        tables = plan.table_count,
        new_players = plan.newly_assigned,
        "seating pass completed"
    );

    Ok(AssignResult {
        tables_count: plan.table_count,
        players_count: plan.registrant_count,
        new_players_assigned: plan.newly_assigned,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn players(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn twenty_three_players_fill_three_tables() {
        let registrants = players(23);
        let mut rng = StdRng::seed_from_u64(7);

        let plan = plan_seating(&registrants, &HashMap::new(), &mut rng).unwrap();

        assert_eq!(plan.table_count, 3);
        assert_eq!(plan.registrant_count, 23);
        assert_eq!(plan.newly_assigned, 23);

        let per_table = |n: i32| plan.seats.iter().filter(|s| s.table_number == n).count();
        assert_eq!(per_table(1), 10);
        assert_eq!(per_table(2), 10);
        assert_eq!(per_table(3), 3);
    }

    #[test]
    fn chunking_is_positional() {
        let registrants = players(12);
        let mut rng = StdRng::seed_from_u64(3);

        let plan = plan_seating(&registrants, &HashMap::new(), &mut rng).unwrap();

        // First ten in load order stay on table 1, the tail goes to table 2.
        for (index, seat) in plan.seats.iter().enumerate() {
            assert_eq!(seat.user_id, registrants[index]);
            assert_eq!(seat.table_number, if index < 10 { 1 } else { 2 });
        }
    }

    #[test]
    fn new_seats_within_a_chunk_never_collide() {
        let registrants = players(10);
        let mut rng = StdRng::seed_from_u64(11);

        let plan = plan_seating(&registrants, &HashMap::new(), &mut rng).unwrap();

        let mut seats: Vec<i32> = plan.seats.iter().map(|s| s.seat_number).collect();
        seats.sort_unstable();
        assert_eq!(seats, (1..=10).collect::<Vec<i32>>());
    }

    #[test]
    fn seated_players_keep_their_seat_numbers() {
        let registrants = players(8);
        let mut rng = StdRng::seed_from_u64(21);
        let first = plan_seating(&registrants, &HashMap::new(), &mut rng).unwrap();

        let existing: HashMap<Uuid, i32> = first
            .seats
            .iter()
            .map(|s| (s.user_id, s.seat_number))
            .collect();

        // Three newcomers at the end of the list.
        let mut grown = registrants.clone();
        grown.extend(players(3));

        let second = plan_seating(&grown, &existing, &mut rng).unwrap();
        assert_eq!(second.newly_assigned, 3);

        for seat in &second.seats {
            if let Some(kept) = existing.get(&seat.user_id) {
                assert_eq!(seat.seat_number, *kept);
                assert!(!seat.newly_assigned);
            } else {
                assert!(seat.newly_assigned);
            }
        }
    }

    #[test]
    fn growth_can_move_a_player_to_another_table_but_keeps_the_seat() {
        // Ten seated players; five newcomers registered earlier in load
        // order would shift everyone, but registration order is stable, so
        // growth only appends. Simulate a shift anyway by seating players
        // 5..15 first, then presenting the full 0..15 list.
        let all = players(15);
        let seated_slice = &all[5..];
        let mut rng = StdRng::seed_from_u64(5);
        let first = plan_seating(&seated_slice.to_vec(), &HashMap::new(), &mut rng).unwrap();

        let existing: HashMap<Uuid, i32> = first
            .seats
            .iter()
            .map(|s| (s.user_id, s.seat_number))
            .collect();

        let second = plan_seating(&all, &existing, &mut rng).unwrap();
        assert_eq!(second.table_count, 2);

        // The last five of the seated block now fall into chunk 2: a new
        // table, the same seat label.
        for seat in &second.seats {
            if let Some(kept) = existing.get(&seat.user_id) {
                assert_eq!(seat.seat_number, *kept);
            }
        }
        let moved = second
            .seats
            .iter()
            .filter(|s| existing.contains_key(&s.user_id) && s.table_number == 2)
            .count();
        assert_eq!(moved, 5);
    }

    #[test]
    fn empty_registrations_and_fully_seated_both_refuse() {
        let mut rng = StdRng::seed_from_u64(1);

        let err = plan_seating(&[], &HashMap::new(), &mut rng).unwrap_err();
        assert!(matches!(err, AppError::NothingToAssign(_)));

        let registrants = players(4);
        let existing: HashMap<Uuid, i32> = registrants
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i as i32 + 1))
            .collect();
        let err = plan_seating(&registrants, &existing, &mut rng).unwrap_err();
        assert!(matches!(err, AppError::NothingToAssign(_)));
    }

    #[test]
    fn replans_without_newcomers_are_rejected_not_reshuffled() {
        // Idempotence on seat numbers comes from refusing a no-op pass.
        let registrants = players(6);
        let mut rng = StdRng::seed_from_u64(9);
        let first = plan_seating(&registrants, &HashMap::new(), &mut rng).unwrap();

        let existing: HashMap<Uuid, i32> = first
            .seats
            .iter()
            .map(|s| (s.user_id, s.seat_number))
            .collect();

        assert!(plan_seating(&registrants, &existing, &mut rng).is_err());
    }
}
