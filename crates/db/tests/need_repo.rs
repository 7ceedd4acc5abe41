//! Integration tests for the need and assignment repositories.
//!
//! Requires a PostgreSQL `DATABASE_URL`; run with `--features pg-tests`.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use volunteer_core::need::assignment_status;
use volunteer_db::models::need::CreateNeed;
use volunteer_db::models::project::CreateProject;
use volunteer_db::repositories::{AssignmentRepo, EventRepo, NeedRepo, ProjectRepo};

async fn seed_project(pool: &PgPool) -> i64 {
    ProjectRepo::create(
        pool,
        &CreateProject {
            entity_table: "event".to_string(),
            entity_id: 1,
            title: "Needs".to_string(),
            description: None,
            is_active: true,
        },
    )
    .await
    .unwrap()
    .id
}

fn need(project_id: i64, is_flexible: bool, hours_from_now: Option<i64>) -> CreateNeed {
    CreateNeed {
        project_id,
        role_id: if is_flexible { None } else { Some(1) },
        is_flexible,
        start_time: hours_from_now.map(|h| Utc::now() + Duration::hours(h)),
        duration: Some(60),
        quantity: Some(3),
        visibility_id: 1,
        is_active: true,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn visible_needs_sorted_by_start_time(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let late = NeedRepo::create(&pool, &need(project_id, false, Some(48))).await.unwrap();
    let early = NeedRepo::create(&pool, &need(project_id, false, Some(24))).await.unwrap();
    let flexible = NeedRepo::create(&pool, &need(project_id, true, None)).await.unwrap();

    let mut hidden = need(project_id, false, Some(12));
    hidden.visibility_id = 2;
    NeedRepo::create(&pool, &hidden).await.unwrap();

    let mut inactive = need(project_id, false, Some(12));
    inactive.is_active = false;
    NeedRepo::create(&pool, &inactive).await.unwrap();

    let ids: Vec<i64> = NeedRepo::list_active_by_visibility(&pool, project_id, 1)
        .await
        .unwrap()
        .iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(ids, vec![flexible.id, early.id, late.id]);

    let flexible_ids = NeedRepo::list_active_flexible_ids(&pool, project_id).await.unwrap();
    assert_eq!(flexible_ids, vec![flexible.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancelled_assignments_are_not_counted(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let n = NeedRepo::create(&pool, &need(project_id, false, Some(24))).await.unwrap();

    AssignmentRepo::create(&pool, n.id, 1, assignment_status::SCHEDULED).await.unwrap();
    AssignmentRepo::create(&pool, n.id, 2, assignment_status::COMPLETED).await.unwrap();
    AssignmentRepo::create(&pool, n.id, 3, assignment_status::CANCELLED).await.unwrap();

    assert_eq!(AssignmentRepo::count_current(&pool, n.id).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn event_round_trip(pool: PgPool) {
    let start = Utc::now() + Duration::days(3);
    let event = EventRepo::create(&pool, "Spring Gala", start, None).await.unwrap();

    let found = EventRepo::find_by_id(&pool, event.id).await.unwrap().unwrap();
    assert_eq!(found.title, "Spring Gala");
    assert!(found.end_date.is_none());
}
