mod common;

use std::collections::HashMap;

use api::error::AppError;
use api::services::seating;
use common::{create_director, create_player, create_tournament, register_players, setup_test_db};
use infra::repos::{registrations, table_assignments, tournament_tables};
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
async fn twenty_three_registrants_are_chunked_over_three_tables() {
    let pool = setup_test_db().await;
    let director_id = create_director(&pool).await;
    let tournament_id = create_tournament(&pool, director_id, 30000).await;
    register_players(&pool, tournament_id, 23).await;

    let result = seating::assign_tables(&pool, tournament_id).await.unwrap();
    assert_eq!(result.tables_count, 3);
    assert_eq!(result.players_count, 23);
    assert_eq!(result.new_players_assigned, 23);

    let tables = tournament_tables::list_with_counts(&pool, tournament_id)
        .await
        .unwrap();
    assert_eq!(tables.len(), 3);
    let counts: Vec<i64> = tables.iter().map(|t| t.seated_players).collect();
    assert_eq!(counts, vec![10, 10, 3]);
    assert!(tables.iter().all(|t| t.max_seats == 10));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
async fn rerun_with_newcomers_preserves_existing_seat_numbers() {
    let pool = setup_test_db().await;
    let director_id = create_director(&pool).await;
    let tournament_id = create_tournament(&pool, director_id, 30000).await;
    register_players(&pool, tournament_id, 8).await;

    seating::assign_tables(&pool, tournament_id).await.unwrap();
    let before: HashMap<Uuid, i32> = table_assignments::seat_numbers_by_user(&pool, tournament_id)
        .await
        .unwrap();
    assert_eq!(before.len(), 8);

    // Four more players show up and the director re-runs the draw.
    let newcomers = register_players(&pool, tournament_id, 4).await;
    let result = seating::assign_tables(&pool, tournament_id).await.unwrap();
    assert_eq!(result.tables_count, 2);
    assert_eq!(result.new_players_assigned, 4);

    let after = table_assignments::seat_numbers_by_user(&pool, tournament_id)
        .await
        .unwrap();
    assert_eq!(after.len(), 12);
    for (user_id, seat) in &before {
        assert_eq!(after.get(user_id), Some(seat), "seat number must survive");
    }
    for user_id in &newcomers {
        assert!(after.contains_key(user_id));
    }
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
async fn rerun_without_newcomers_is_refused() {
    let pool = setup_test_db().await;
    let director_id = create_director(&pool).await;
    let tournament_id = create_tournament(&pool, director_id, 30000).await;
    register_players(&pool, tournament_id, 6).await;

    seating::assign_tables(&pool, tournament_id).await.unwrap();
    let err = seating::assign_tables(&pool, tournament_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NothingToAssign(_)));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
async fn seating_without_registrants_is_refused() {
    let pool = setup_test_db().await;
    let director_id = create_director(&pool).await;
    let tournament_id = create_tournament(&pool, director_id, 30000).await;

    let err = seating::assign_tables(&pool, tournament_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NothingToAssign(_)));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
async fn table_grouping_is_rebuilt_per_run() {
    let pool = setup_test_db().await;
    let director_id = create_director(&pool).await;
    let tournament_id = create_tournament(&pool, director_id, 30000).await;
    register_players(&pool, tournament_id, 10).await;

    seating::assign_tables(&pool, tournament_id).await.unwrap();
    let first_tables = tournament_tables::list_with_counts(&pool, tournament_id)
        .await
        .unwrap();

    let extra = create_player(&pool, "eleventh").await;
    registrations::insert(&pool, tournament_id, extra)
        .await
        .unwrap();
    seating::assign_tables(&pool, tournament_id).await.unwrap();

    let second_tables = tournament_tables::list_with_counts(&pool, tournament_id)
        .await
        .unwrap();
    assert_eq!(second_tables.len(), 2);

    // Fresh table rows every run, even for the surviving table number.
    for table in &second_tables {
        assert!(first_tables.iter().all(|t| t.id != table.id));
    }
}
