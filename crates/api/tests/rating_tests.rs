mod common;

use common::{create_director, setup_test_db};
use infra::repos::rating::{self, CreateRatingEntry};
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
async fn fresh_pool_all_ties_at_position_one() {
    let pool = setup_test_db().await;
    let director_id = create_director(&pool).await;

    let tag = Uuid::new_v4().simple().to_string();
    let mut scores = Vec::new();
    for index in 0..4 {
        let entry = rating::create(
            &pool,
            CreateRatingEntry {
                player_name: format!("Fresh Player {index}"),
                telegram_username: format!("fresh_{index}_{tag}"),
                score: 1000,
                created_by: director_id,
            },
        )
        .await
        .unwrap();
        scores.push(entry.score);
    }

    // Equal scores share a position; on a freshly seeded database that
    // shared position is 1. Unrelated rows from other runs may shift the
    // number, but never split the tie.
    let positions: Vec<i64> = {
        let mut out = Vec::new();
        for score in scores {
            out.push(rating::position_for_score(&pool, score).await.unwrap());
        }
        out
    };
    assert!(positions.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
async fn position_counts_strictly_greater_scores() {
    let pool = setup_test_db().await;
    let director_id = create_director(&pool).await;

    let tag = Uuid::new_v4().simple().to_string();
    let high = rating::create(
        &pool,
        CreateRatingEntry {
            player_name: "Shark".into(),
            telegram_username: format!("shark_{tag}"),
            score: 900_000,
            created_by: director_id,
        },
    )
    .await
    .unwrap();
    let low = rating::create(
        &pool,
        CreateRatingEntry {
            player_name: "Fish".into(),
            telegram_username: format!("fish_{tag}"),
            score: 899_999,
            created_by: director_id,
        },
    )
    .await
    .unwrap();

    let high_pos = rating::position_for_score(&pool, high.score).await.unwrap();
    let low_pos = rating::position_for_score(&pool, low.score).await.unwrap();
    assert_eq!(low_pos, high_pos + 1);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL pointing at Postgres"]
async fn handle_lookup_is_a_weak_reference() {
    let pool = setup_test_db().await;

    // No rating row for this handle; the lookup legitimately finds nothing.
    let missing = rating::get_by_handle(&pool, &format!("ghost_{}", Uuid::new_v4().simple()))
        .await
        .unwrap();
    assert!(missing.is_none());
}
