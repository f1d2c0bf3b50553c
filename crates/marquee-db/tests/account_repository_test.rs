//! Integration tests for the account repository using in-memory
//! SurrealDB.

use chrono::{Duration, Utc};
use marquee_core::MarqueeError;
use marquee_core::models::account::{CreateAccount, OtpChallenge, UpdateAccount};
use marquee_core::repository::{AccountRepository, Pagination};
use marquee_db::repository::SurrealAccountRepository;
use marquee_db::verify_password;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> SurrealAccountRepository<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    marquee_db::run_migrations(&db).await.unwrap();
    SurrealAccountRepository::new(db)
}

fn ada() -> CreateAccount {
    CreateAccount {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        password: "correct horse battery staple".to_string(),
    }
}

#[tokio::test]
async fn create_and_get_account() {
    let repo = setup().await;

    let created = repo.create(ada()).await.unwrap();
    assert_eq!(created.name, "Ada Lovelace");
    assert_eq!(created.email, "ada@example.com");
    assert!(!created.verified);
    assert_eq!(created.role, "user");
    assert!(created.verify_otp.is_none());
    assert!(created.reset_otp.is_none());
    assert!(created.password_hash.starts_with("$argon2id$"));
    assert_eq!(created.created_at, created.updated_at);

    let fetched = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.email, created.email);
    assert_eq!(fetched.password_hash, created.password_hash);
}

#[tokio::test]
async fn get_by_email_finds_account() {
    let repo = setup().await;

    let created = repo.create(ada()).await.unwrap();
    let fetched = repo.get_by_email("ada@example.com").await.unwrap();
    assert_eq!(fetched.id, created.id);

    let err = repo.get_by_email("nobody@example.com").await.unwrap_err();
    assert!(matches!(err, MarqueeError::NotFound { .. }));
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let repo = setup().await;

    let err = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, MarqueeError::NotFound { .. }));
}

#[tokio::test]
async fn duplicate_email_rejected() {
    let repo = setup().await;

    repo.create(ada()).await.unwrap();

    let mut second = ada();
    second.name = "Impostor".to_string();
    let err = repo.create(second).await.unwrap_err();
    assert!(matches!(err, MarqueeError::AlreadyExists { .. }));
}

#[tokio::test]
async fn update_name_only_changes_name() {
    let repo = setup().await;

    let created = repo.create(ada()).await.unwrap();
    let updated = repo
        .update(
            created.id,
            UpdateAccount {
                name: Some("Countess of Lovelace".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Countess of Lovelace");
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.password_hash, created.password_hash);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_password_rehashes() {
    let repo = setup().await;

    let created = repo.create(ada()).await.unwrap();
    let updated = repo
        .update(
            created.id,
            UpdateAccount {
                password: Some("a brand new passphrase".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_ne!(updated.password_hash, created.password_hash);
    assert!(verify_password("a brand new passphrase", &updated.password_hash).unwrap());
    assert!(!verify_password("correct horse battery staple", &updated.password_hash).unwrap());
}

#[tokio::test]
async fn otp_slots_arm_and_clear_independently() {
    let repo = setup().await;
    let created = repo.create(ada()).await.unwrap();

    let verify = OtpChallenge {
        code: "123456".to_string(),
        expires_at: Utc::now() + Duration::minutes(10),
    };
    let reset = OtpChallenge {
        code: "654321".to_string(),
        expires_at: Utc::now() + Duration::minutes(10),
    };

    let updated = repo
        .update(
            created.id,
            UpdateAccount {
                verify_otp: Some(Some(verify.clone())),
                reset_otp: Some(Some(reset.clone())),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Expiry round-trips at second precision.
    let stored_verify = updated.verify_otp.expect("verify slot armed");
    assert_eq!(stored_verify.code, verify.code);
    assert_eq!(
        stored_verify.expires_at.timestamp(),
        verify.expires_at.timestamp()
    );

    let cleared = repo
        .update(
            created.id,
            UpdateAccount {
                verify_otp: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(cleared.verify_otp.is_none());
    let stored_reset = cleared.reset_otp.expect("reset slot untouched");
    assert_eq!(stored_reset.code, reset.code);
}

#[tokio::test]
async fn rearming_a_slot_overwrites_the_previous_code() {
    let repo = setup().await;
    let created = repo.create(ada()).await.unwrap();

    for code in ["111111", "222222"] {
        repo.update(
            created.id,
            UpdateAccount {
                verify_otp: Some(Some(OtpChallenge {
                    code: code.to_string(),
                    expires_at: Utc::now() + Duration::minutes(10),
                })),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    let account = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(account.verify_otp.unwrap().code, "222222");
}

#[tokio::test]
async fn verified_flag_updates() {
    let repo = setup().await;
    let created = repo.create(ada()).await.unwrap();

    let updated = repo
        .update(
            created.id,
            UpdateAccount {
                verified: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(updated.verified);
}

#[tokio::test]
async fn update_missing_account_is_not_found() {
    let repo = setup().await;

    let err = repo
        .update(
            Uuid::new_v4(),
            UpdateAccount {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, MarqueeError::NotFound { .. }));
}

#[tokio::test]
async fn list_accounts_with_pagination() {
    let repo = setup().await;

    for i in 0..5 {
        repo.create(CreateAccount {
            name: format!("User {i}"),
            email: format!("user{i}@example.com"),
            password: "some password".to_string(),
        })
        .await
        .unwrap();
    }

    let page = repo
        .list(Pagination {
            offset: 0,
            limit: 3,
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 3);
    assert_eq!(page.total, 5);
    assert_eq!(page.limit, 3);

    let rest = repo
        .list(Pagination {
            offset: 3,
            limit: 3,
        })
        .await
        .unwrap();
    assert_eq!(rest.items.len(), 2);
    assert_eq!(rest.total, 5);

    let first_emails: Vec<_> = page.items.iter().map(|a| a.email.clone()).collect();
    let rest_emails: Vec<_> = rest.items.iter().map(|a| a.email.clone()).collect();
    for email in &rest_emails {
        assert!(!first_emails.contains(email), "pages overlap on {email}");
    }
}

#[tokio::test]
async fn count_accounts() {
    let repo = setup().await;
    assert_eq!(repo.count().await.unwrap(), 0);

    repo.create(ada()).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 1);
}
