//! Integration tests for the project contact repository.
//!
//! Requires a PostgreSQL `DATABASE_URL`; run with `--features pg-tests`.

use sqlx::PgPool;
use volunteer_db::models::project::CreateProject;
use volunteer_db::models::project_contact::{
    CreateProjectContact, ProjectContactFilter, UpdateProjectContact,
};
use volunteer_db::repositories::{OptionValueRepo, ProjectContactRepo, ProjectRepo};

async fn seed_project(pool: &PgPool) -> i64 {
    ProjectRepo::create(
        pool,
        &CreateProject {
            entity_table: "event".to_string(),
            entity_id: 1,
            title: "Contacts".to_string(),
            description: None,
            is_active: true,
        },
    )
    .await
    .unwrap()
    .id
}

fn link(project_id: i64, contact_id: i64, relationship_type_id: i64) -> CreateProjectContact {
    CreateProjectContact {
        project_id,
        contact_id,
        relationship_type_id,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn filter_by_contact_list_and_type(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    ProjectContactRepo::create(&pool, &link(project_id, 101, 5)).await.unwrap();
    ProjectContactRepo::create(&pool, &link(project_id, 102, 5)).await.unwrap();
    ProjectContactRepo::create(&pool, &link(project_id, 103, 5)).await.unwrap();
    ProjectContactRepo::create(&pool, &link(project_id, 101, 2)).await.unwrap();

    let rows = ProjectContactRepo::list(
        &pool,
        &ProjectContactFilter {
            contact_ids: Some(vec![101, 102]),
            relationship_type_id: Some(5),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let contacts: Vec<i64> = rows.iter().map(|r| r.contact_id).collect();
    assert_eq!(contacts, vec![101, 102]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_and_delete_contact(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let row = ProjectContactRepo::create(&pool, &link(project_id, 7, 1)).await.unwrap();

    let updated = ProjectContactRepo::update(
        &pool,
        row.id,
        &UpdateProjectContact {
            relationship_type_id: Some(2),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.relationship_type_id, 2);
    assert_eq!(updated.contact_id, 7);

    assert!(ProjectContactRepo::delete(&pool, row.id).await.unwrap());
    assert!(!ProjectContactRepo::delete(&pool, row.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn relationship_options_are_seeded(pool: PgPool) {
    let owner = OptionValueRepo::list_by_value(&pool, "volunteer_project_relationship", "1")
        .await
        .unwrap();
    assert_eq!(owner.len(), 1);
    assert_eq!(owner[0].label, "Owner");

    let public = OptionValueRepo::list_by_name(&pool, "visibility", "public")
        .await
        .unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].value, "1");
}
