//! Integration tests for the users repository.

use sqlx::PgPool;
use timeforing_db::models::user::{CreateUser, UpdateUser};
use timeforing_db::repositories::UserRepo;

fn new_user(epost: &str) -> CreateUser {
    CreateUser {
        navn: "Kari Nordmann".to_string(),
        mobil: "+4791234567".to_string(),
        epost: epost.to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_starts_at_version_one(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("kari@example.no")).await.unwrap();
    assert_eq!(user.version, 1);
    assert_eq!(user.subject(), user.id.to_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_email_lookup_is_case_insensitive(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("kari@example.no")).await.unwrap();

    assert!(UserRepo::epost_taken(&pool, "Kari@example.no", None).await.unwrap());
    assert!(!UserRepo::epost_taken(&pool, "kari@example.no", Some(user.id))
        .await
        .unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_index_rejects_case_variant(pool: PgPool) {
    UserRepo::create(&pool, &new_user("kari@example.no")).await.unwrap();

    let err = UserRepo::create(&pool, &new_user("KARI@example.no"))
        .await
        .expect_err("duplicate e-mail must violate uq_users_epost");
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_users_epost"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_bumps_version(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("kari@example.no")).await.unwrap();

    let updated = UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            navn: "Kari N.".to_string(),
            mobil: user.mobil.clone(),
            epost: user.epost.clone(),
            version: user.version,
        },
    )
    .await
    .unwrap()
    .expect("current version must apply");

    assert_eq!(updated.navn, "Kari N.");
    assert_eq!(updated.version, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_with_stale_version_is_skipped(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("kari@example.no")).await.unwrap();
    let input = UpdateUser {
        navn: "First".to_string(),
        mobil: user.mobil.clone(),
        epost: user.epost.clone(),
        version: user.version,
    };
    UserRepo::update(&pool, user.id, &input).await.unwrap().unwrap();

    // Same (now stale) version again.
    let second = UserRepo::update(&pool, user.id, &input).await.unwrap();
    assert!(second.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_pages(pool: PgPool) {
    for i in 0..3 {
        UserRepo::create(&pool, &new_user(&format!("u{i}@example.no")))
            .await
            .unwrap();
    }
    assert_eq!(UserRepo::list(&pool, 2, 0).await.unwrap().len(), 2);
    assert_eq!(UserRepo::list(&pool, 2, 2).await.unwrap().len(), 1);
}
