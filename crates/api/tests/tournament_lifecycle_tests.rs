mod common;

use chrono::Utc;

use api::error::AppError;
use api::services::{chips, lifecycle, registration};
use common::{create_director, create_player, create_tournament, register_players, setup_test_db};
use infra::repos::{player_chips, registrations, tournaments, TournamentStatus};

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
async fn start_seeds_every_registrant_exactly_once() {
    let pool = setup_test_db().await;
    let director_id = create_director(&pool).await;
    let tournament_id = create_tournament(&pool, director_id, 30000).await;
    let player_ids = register_players(&pool, tournament_id, 23).await;

    let result = lifecycle::start(&pool, tournament_id).await.unwrap();
    assert_eq!(result.tournament.status, TournamentStatus::Active);
    assert_eq!(result.seeded_players, 23);

    let rows = player_chips::list_for_tournament(&pool, tournament_id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 23);
    for row in &rows {
        assert_eq!(row.chips, 30000);
        assert_eq!(row.rebuys, 0);
        assert_eq!(row.addons, 0);
    }

    // A director adjusts one stack, then hits start again by mistake. The
    // adjusted stack must survive and no extra rows may appear.
    chips::update_chips(&pool, tournament_id, player_ids[0], 41500, 1, 0)
        .await
        .unwrap();

    let second = lifecycle::start(&pool, tournament_id).await.unwrap();
    assert_eq!(second.seeded_players, 0);

    let adjusted = player_chips::get(&pool, tournament_id, player_ids[0])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(adjusted.chips, 41500);
    assert_eq!(adjusted.rebuys, 1);

    let rows = player_chips::list_for_tournament(&pool, tournament_id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 23);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
async fn late_joiner_into_active_tournament_gets_a_stack() {
    let pool = setup_test_db().await;
    let director_id = create_director(&pool).await;
    let tournament_id = create_tournament(&pool, director_id, 25000).await;

    lifecycle::start(&pool, tournament_id).await.unwrap();

    let late_joiner = create_player(&pool, "latecomer").await;
    registration::register(&pool, late_joiner, tournament_id, Utc::now())
        .await
        .unwrap();

    let stack = player_chips::get(&pool, tournament_id, late_joiner)
        .await
        .unwrap()
        .expect("late joiner should be seeded");
    assert_eq!(stack.chips, 25000);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
async fn registration_is_refused_once_late_reg_is_closed() {
    let pool = setup_test_db().await;
    let director_id = create_director(&pool).await;
    let tournament_id = create_tournament(&pool, director_id, 30000).await;

    lifecycle::close_late_registration(&pool, tournament_id)
        .await
        .unwrap();

    let player_id = create_player(&pool, "toolate").await;
    let err = registration::register(&pool, player_id, tournament_id, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::RegistrationClosed(_)));

    assert!(registrations::get(&pool, tournament_id, player_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
async fn duplicate_registration_is_rejected() {
    let pool = setup_test_db().await;
    let director_id = create_director(&pool).await;
    let tournament_id = create_tournament(&pool, director_id, 30000).await;
    let player_id = create_player(&pool, "eager").await;

    registration::register(&pool, player_id, tournament_id, Utc::now())
        .await
        .unwrap();
    let err = registration::register(&pool, player_id, tournament_id, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyRegistered));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
async fn non_director_cannot_update_chips() {
    let pool = setup_test_db().await;
    let director_id = create_director(&pool).await;
    let tournament_id = create_tournament(&pool, director_id, 30000).await;
    let player_id = create_player(&pool, "sneaky").await;

    let err = api::auth::require_director(&pool, player_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AccessDenied));

    // The gate failed, so no update ran and no ledger row exists.
    assert!(player_chips::get(&pool, tournament_id, player_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
async fn delete_cascades_to_everything() {
    let pool = setup_test_db().await;
    let director_id = create_director(&pool).await;
    let tournament_id = create_tournament(&pool, director_id, 30000).await;
    register_players(&pool, tournament_id, 5).await;

    lifecycle::start(&pool, tournament_id).await.unwrap();
    api::services::seating::assign_tables(&pool, tournament_id)
        .await
        .unwrap();

    lifecycle::delete(&pool, tournament_id).await.unwrap();

    assert!(tournaments::get(&pool, tournament_id)
        .await
        .unwrap()
        .is_none());
    assert!(registrations::list_user_ids(&pool, tournament_id)
        .await
        .unwrap()
        .is_empty());
    assert!(player_chips::list_for_tournament(&pool, tournament_id)
        .await
        .unwrap()
        .is_empty());
}
