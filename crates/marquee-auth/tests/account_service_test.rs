//! Integration tests for the account service against in-memory
//! SurrealDB and a recording mailer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use marquee_auth::service::{LoginInput, RegisterInput};
use marquee_auth::{AccountService, AuthConfig, token};
use marquee_core::MarqueeError;
use marquee_core::mailer::{Mailer, OutboundEmail};
use marquee_core::models::account::{OtpChallenge, UpdateAccount};
use marquee_core::repository::{AccountRepository, Pagination};
use marquee_db::repository::SurrealAccountRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

/// Mailer double that records every message and can be switched into
/// a failure mode.
#[derive(Clone, Default)]
struct RecordingMailer {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingMailer {
    fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Six-digit code from the most recent message body.
    fn last_code(&self) -> String {
        let sent = self.sent.lock().unwrap();
        let text = sent
            .last()
            .and_then(|m| m.text.clone())
            .expect("no mail with a text body recorded");
        text.chars().filter(|c| c.is_ascii_digit()).take(6).collect()
    }

    fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

impl Mailer for RecordingMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MarqueeError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(MarqueeError::Mail("mail provider offline".to_string()));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

struct Harness {
    service: AccountService<SurrealAccountRepository<Db>, RecordingMailer>,
    mailer: RecordingMailer,
    repo: SurrealAccountRepository<Db>,
    db: Surreal<Db>,
}

fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-test-secret-0123456789".to_string(),
        ..Default::default()
    }
}

async fn setup_with(config: AuthConfig) -> Harness {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    marquee_db::run_migrations(&db).await.unwrap();

    let repo = SurrealAccountRepository::new(db.clone());
    let mailer = RecordingMailer::default();
    let service = AccountService::new(repo.clone(), mailer.clone(), config);

    Harness {
        service,
        mailer,
        repo,
        db,
    }
}

async fn setup() -> Harness {
    setup_with(test_config()).await
}

fn ada() -> RegisterInput {
    RegisterInput {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        password: "correct horse battery staple".to_string(),
    }
}

fn auth_reason(err: MarqueeError) -> String {
    match err {
        MarqueeError::AuthenticationFailed { reason } => reason,
        other => panic!("expected AuthenticationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn register_hashes_password_and_issues_token() {
    let h = setup().await;

    let out = h.service.register(ada()).await.unwrap();
    assert_eq!(out.account.email, "ada@example.com");
    assert!(!out.account.verified);
    assert!(out.account.password_hash.starts_with("$argon2id$"));

    let session = token::validate_session_token(&out.token, h.service.config()).unwrap();
    assert_eq!(session.account_id().unwrap(), out.account.id);

    let sent = h.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Welcome to our platform!");
    assert_eq!(sent[0].to, "ada@example.com");
}

#[tokio::test]
async fn register_duplicate_email_rejected() {
    let h = setup().await;

    h.service.register(ada()).await.unwrap();
    let err = h.service.register(ada()).await.unwrap_err();
    assert!(matches!(err, MarqueeError::AlreadyExists { .. }));
}

#[tokio::test]
async fn register_survives_mail_outage() {
    let h = setup().await;
    h.mailer.set_failing(true);

    let out = h.service.register(ada()).await.unwrap();
    assert!(!out.token.is_empty());
}

#[tokio::test]
async fn login_happy_path() {
    let h = setup().await;
    h.service.register(ada()).await.unwrap();

    let out = h
        .service
        .login(LoginInput {
            email: "ada@example.com".to_string(),
            password: "correct horse battery staple".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(out.account.email, "ada@example.com");
    let session = token::validate_session_token(&out.token, h.service.config()).unwrap();
    assert_eq!(session.account_id().unwrap(), out.account.id);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let h = setup().await;
    h.service.register(ada()).await.unwrap();

    let wrong_password = h
        .service
        .login(LoginInput {
            email: "ada@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    let unknown_email = h
        .service
        .login(LoginInput {
            email: "nobody@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    let a = auth_reason(wrong_password);
    let b = auth_reason(unknown_email);
    assert_eq!(a, "Invalid credentials");
    assert_eq!(a, b);
}

#[tokio::test]
async fn full_verification_flow() {
    let h = setup().await;
    let account = h.service.register(ada()).await.unwrap().account;

    h.service.send_verify_otp(account.id).await.unwrap();

    let sent = h.mailer.sent();
    assert_eq!(sent.last().unwrap().subject, "Verify your account");

    // The mailed code matches the stored challenge.
    let code = h.mailer.last_code();
    let stored = h.repo.get_by_id(account.id).await.unwrap();
    assert_eq!(stored.verify_otp.unwrap().code, code);

    h.service.verify_account(account.id, &code).await.unwrap();

    let verified = h.repo.get_by_id(account.id).await.unwrap();
    assert!(verified.verified);
    assert!(verified.verify_otp.is_none(), "challenge must be consumed");

    // A second request is rejected as already verified.
    let err = h.service.send_verify_otp(account.id).await.unwrap_err();
    assert!(matches!(err, MarqueeError::Validation { .. }));
}

#[tokio::test]
async fn verify_with_wrong_code_rejected() {
    let h = setup().await;
    let account = h.service.register(ada()).await.unwrap().account;
    h.service.send_verify_otp(account.id).await.unwrap();

    let right = h.mailer.last_code();
    let wrong = if right == "123456" { "654321" } else { "123456" };

    let err = h.service.verify_account(account.id, wrong).await.unwrap_err();
    assert_eq!(auth_reason(err), "Invalid OTP");

    // The challenge survives a failed attempt.
    let stored = h.repo.get_by_id(account.id).await.unwrap();
    assert!(!stored.verified);
    assert!(stored.verify_otp.is_some());
}

#[tokio::test]
async fn verify_with_expired_code_rejected() {
    let h = setup().await;
    let account = h.service.register(ada()).await.unwrap().account;

    h.repo
        .update(
            account.id,
            UpdateAccount {
                verify_otp: Some(Some(OtpChallenge {
                    code: "123456".to_string(),
                    expires_at: Utc::now() - Duration::hours(1),
                })),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let err = h
        .service
        .verify_account(account.id, "123456")
        .await
        .unwrap_err();
    assert_eq!(auth_reason(err), "OTP expired");
}

#[tokio::test]
async fn resend_invalidates_previous_code() {
    let h = setup().await;
    let account = h.service.register(ada()).await.unwrap().account;

    h.service.send_verify_otp(account.id).await.unwrap();
    let first = h.mailer.last_code();

    h.service.send_verify_otp(account.id).await.unwrap();
    let second = h.mailer.last_code();

    if first != second {
        let err = h
            .service
            .verify_account(account.id, &first)
            .await
            .unwrap_err();
        assert_eq!(auth_reason(err), "Invalid OTP");
    }

    h.service.verify_account(account.id, &second).await.unwrap();
}

#[tokio::test]
async fn verification_gate_blocks_unverified_login() {
    let config = AuthConfig {
        require_verified_login: true,
        ..test_config()
    };
    let h = setup_with(config).await;
    let account = h.service.register(ada()).await.unwrap().account;

    let err = h
        .service
        .login(LoginInput {
            email: "ada@example.com".to_string(),
            password: "correct horse battery staple".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(auth_reason(err), "Account not verified");

    // Verification opens the door.
    h.service.send_verify_otp(account.id).await.unwrap();
    let code = h.mailer.last_code();
    h.service.verify_account(account.id, &code).await.unwrap();

    h.service
        .login(LoginInput {
            email: "ada@example.com".to_string(),
            password: "correct horse battery staple".to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn verification_gate_exempts_admin_role() {
    let config = AuthConfig {
        require_verified_login: true,
        ..test_config()
    };
    let h = setup_with(config).await;
    h.service.register(ada()).await.unwrap();

    h.db.query("UPDATE account SET role = 'admin' WHERE email = $email")
        .bind(("email", "ada@example.com".to_string()))
        .await
        .unwrap()
        .check()
        .unwrap();

    let out = h
        .service
        .login(LoginInput {
            email: "ada@example.com".to_string(),
            password: "correct horse battery staple".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(out.account.role, "admin");
    assert!(!out.account.verified);
}

#[tokio::test]
async fn full_reset_flow() {
    let h = setup().await;
    h.service.register(ada()).await.unwrap();

    h.service.send_reset_otp("ada@example.com").await.unwrap();
    assert_eq!(
        h.mailer.sent().last().unwrap().subject,
        "Reset your password"
    );
    let code = h.mailer.last_code();

    h.service
        .reset_password("ada@example.com", &code, "a brand new passphrase")
        .await
        .unwrap();

    // Old password out, new password in.
    let err = h
        .service
        .login(LoginInput {
            email: "ada@example.com".to_string(),
            password: "correct horse battery staple".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(auth_reason(err), "Invalid credentials");

    h.service
        .login(LoginInput {
            email: "ada@example.com".to_string(),
            password: "a brand new passphrase".to_string(),
        })
        .await
        .unwrap();

    let stored = h.repo.get_by_email("ada@example.com").await.unwrap();
    assert!(stored.reset_otp.is_none(), "challenge must be consumed");
}

#[tokio::test]
async fn reset_with_wrong_code_rejected() {
    let h = setup().await;
    h.service.register(ada()).await.unwrap();
    h.service.send_reset_otp("ada@example.com").await.unwrap();

    let right = h.mailer.last_code();
    let wrong = if right == "123456" { "654321" } else { "123456" };

    let err = h
        .service
        .reset_password("ada@example.com", wrong, "whatever")
        .await
        .unwrap_err();
    assert_eq!(auth_reason(err), "Invalid OTP");
}

#[tokio::test]
async fn reset_with_expired_code_rejected() {
    let h = setup().await;
    let account = h.service.register(ada()).await.unwrap().account;

    h.repo
        .update(
            account.id,
            UpdateAccount {
                reset_otp: Some(Some(OtpChallenge {
                    code: "123456".to_string(),
                    expires_at: Utc::now() - Duration::hours(1),
                })),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let err = h
        .service
        .reset_password("ada@example.com", "123456", "whatever")
        .await
        .unwrap_err();
    assert_eq!(auth_reason(err), "OTP expired");
}

#[tokio::test]
async fn reset_for_unknown_email_is_not_found() {
    let h = setup().await;

    let err = h
        .service
        .send_reset_otp("nobody@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, MarqueeError::NotFound { .. }));
}

#[tokio::test]
async fn verify_otp_mail_outage_keeps_challenge() {
    let h = setup().await;
    let account = h.service.register(ada()).await.unwrap().account;

    h.mailer.set_failing(true);
    let err = h.service.send_verify_otp(account.id).await.unwrap_err();
    assert!(matches!(err, MarqueeError::Mail(_)));

    // The challenge stays armed so a retry can reuse the slot.
    let stored = h.repo.get_by_id(account.id).await.unwrap();
    assert!(stored.verify_otp.is_some());
}

#[tokio::test]
async fn update_name_trims_and_validates() {
    let h = setup().await;
    let account = h.service.register(ada()).await.unwrap().account;

    let updated = h
        .service
        .update_name(account.id, "  Augusta Ada  ")
        .await
        .unwrap();
    assert_eq!(updated.name, "Augusta Ada");

    let err = h.service.update_name(account.id, " ab ").await.unwrap_err();
    match err {
        MarqueeError::Validation { message } => {
            assert_eq!(message, "Name must be at least 3 characters long");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn account_data_returns_profile() {
    let h = setup().await;
    let account = h.service.register(ada()).await.unwrap().account;

    let data = h.service.account_data(account.id).await.unwrap();
    assert_eq!(data.email, "ada@example.com");
    assert_eq!(data.role, "user");

    let err = h
        .service
        .account_data(uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, MarqueeError::NotFound { .. }));
}

#[tokio::test]
async fn list_and_count_accounts() {
    let h = setup().await;

    for i in 0..3 {
        h.service
            .register(RegisterInput {
                name: format!("User {i}"),
                email: format!("user{i}@example.com"),
                password: "some password".to_string(),
            })
            .await
            .unwrap();
    }

    assert_eq!(h.service.count_accounts().await.unwrap(), 3);

    let page = h.service.list_accounts(Pagination::default()).await.unwrap();
    assert_eq!(page.items.len(), 3);
    assert_eq!(page.total, 3);
}
