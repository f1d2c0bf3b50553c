//! Account service — registration, login, OTP flows and profile
//! operations.

use marquee_core::error::{MarqueeError, MarqueeResult};
use marquee_core::mailer::Mailer;
use marquee_core::models::account::{Account, CreateAccount, UpdateAccount};
use marquee_core::repository::{AccountRepository, PaginatedResult, Pagination};
use marquee_mail::templates;
use tracing::warn;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::{otp, password, token};

/// Input for the registration flow.
#[derive(Debug)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful registration result.
#[derive(Debug)]
pub struct RegisterOutput {
    pub account: Account,
    /// Session token, so the client is logged in immediately.
    pub token: String,
}

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    pub account: Account,
    pub token: String,
}

/// Account service.
///
/// Generic over the repository and mailer implementations so that the
/// business logic has no dependency on the database crate or on a mail
/// provider account.
pub struct AccountService<R: AccountRepository, M: Mailer> {
    accounts: R,
    mailer: M,
    config: AuthConfig,
}

impl<R: AccountRepository, M: Mailer> AccountService<R, M> {
    pub fn new(accounts: R, mailer: M, config: AuthConfig) -> Self {
        Self {
            accounts,
            mailer,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Register a new account and issue a session token.
    pub async fn register(&self, input: RegisterInput) -> MarqueeResult<RegisterOutput> {
        // 1. Reject taken emails up front. The unique index backstops
        //    concurrent registrations.
        match self.accounts.get_by_email(&input.email).await {
            Ok(_) => {
                return Err(MarqueeError::AlreadyExists {
                    entity: "account".to_string(),
                });
            }
            Err(MarqueeError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        // 2. Create the account. The repository hashes the password.
        let account = self
            .accounts
            .create(CreateAccount {
                name: input.name,
                email: input.email,
                password: input.password,
            })
            .await?;

        // 3. Issue the session token.
        let token = token::issue_session_token(account.id, &self.config)?;

        // 4. The welcome email is best-effort; registration succeeds
        //    even when the provider is down.
        let welcome = templates::welcome_email(&account.name, &account.email);
        if let Err(e) = self.mailer.send(welcome).await {
            warn!(error = %e, "Welcome email could not be sent");
        }

        Ok(RegisterOutput { account, token })
    }

    /// Authenticate with email and password and issue a session token.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, input: LoginInput) -> MarqueeResult<LoginOutput> {
        // 1. Look up the account by email.
        let account = match self.accounts.get_by_email(&input.email).await {
            Ok(account) => account,
            Err(MarqueeError::NotFound { .. }) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        // 2. Verify the password.
        if !password::verify_password(&input.password, &account.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        // 3. Optional verification gate, with role exemptions.
        if self.config.require_verified_login
            && !account.verified
            && !self
                .config
                .verification_exempt_roles
                .contains(&account.role)
        {
            return Err(AuthError::AccountNotVerified.into());
        }

        // 4. Issue the session token.
        let token = token::issue_session_token(account.id, &self.config)?;

        Ok(LoginOutput { account, token })
    }

    /// Issue an email-verification code and dispatch it.
    ///
    /// A newer code silently replaces any outstanding one.
    pub async fn send_verify_otp(&self, account_id: Uuid) -> MarqueeResult<()> {
        // 1. The account must exist and still be unverified.
        let account = self.accounts.get_by_id(account_id).await?;
        if account.verified {
            return Err(AuthError::AlreadyVerified.into());
        }

        // 2. Arm a fresh challenge; last write wins on races.
        let challenge = otp::new_challenge(self.config.otp_lifetime_secs);
        let account = self
            .accounts
            .update(
                account_id,
                UpdateAccount {
                    verify_otp: Some(Some(challenge.clone())),
                    ..Default::default()
                },
            )
            .await?;

        // 3. Deliver the code. A failure surfaces to the caller; the
        //    stored challenge stays live for a retry.
        self.mailer
            .send(templates::verification_email(
                &account.name,
                &account.email,
                &challenge.code,
            ))
            .await?;

        Ok(())
    }

    /// Confirm an emailed verification code and mark the account
    /// verified.
    pub async fn verify_account(&self, account_id: Uuid, submitted: &str) -> MarqueeResult<()> {
        // 1. Check the outstanding challenge. Code mismatch is
        //    reported before expiry.
        let account = self.accounts.get_by_id(account_id).await?;
        otp::check(account.verify_otp.as_ref(), submitted)?;

        // 2. Flip the flag and consume the challenge.
        self.accounts
            .update(
                account_id,
                UpdateAccount {
                    verified: Some(true),
                    verify_otp: Some(None),
                    ..Default::default()
                },
            )
            .await?;

        Ok(())
    }

    /// Issue a password-reset code for the given email.
    pub async fn send_reset_otp(&self, email: &str) -> MarqueeResult<()> {
        let account = self.accounts.get_by_email(email).await?;

        let challenge = otp::new_challenge(self.config.otp_lifetime_secs);
        let account = self
            .accounts
            .update(
                account.id,
                UpdateAccount {
                    reset_otp: Some(Some(challenge.clone())),
                    ..Default::default()
                },
            )
            .await?;

        self.mailer
            .send(templates::password_reset_email(
                &account.name,
                &account.email,
                &challenge.code,
            ))
            .await?;

        Ok(())
    }

    /// Reset the password after checking the emailed code.
    ///
    /// Existing session tokens stay valid until they expire.
    pub async fn reset_password(
        &self,
        email: &str,
        submitted: &str,
        new_password: &str,
    ) -> MarqueeResult<()> {
        // 1. Check the code against the stored reset slot.
        let account = self.accounts.get_by_email(email).await?;
        otp::check(account.reset_otp.as_ref(), submitted)?;

        // 2. Store the new hash and consume the challenge.
        self.accounts
            .update(
                account.id,
                UpdateAccount {
                    password: Some(new_password.to_string()),
                    reset_otp: Some(None),
                    ..Default::default()
                },
            )
            .await?;

        Ok(())
    }

    /// Current profile for the session's account.
    pub async fn account_data(&self, account_id: Uuid) -> MarqueeResult<Account> {
        self.accounts.get_by_id(account_id).await
    }

    /// Rename the account. Leading and trailing whitespace is dropped.
    pub async fn update_name(&self, account_id: Uuid, new_name: &str) -> MarqueeResult<Account> {
        let trimmed = new_name.trim();
        if trimmed.chars().count() < 3 {
            return Err(MarqueeError::Validation {
                message: "Name must be at least 3 characters long".to_string(),
            });
        }

        self.accounts
            .update(
                account_id,
                UpdateAccount {
                    name: Some(trimmed.to_string()),
                    ..Default::default()
                },
            )
            .await
    }

    /// All accounts, oldest first.
    pub async fn list_accounts(
        &self,
        pagination: Pagination,
    ) -> MarqueeResult<PaginatedResult<Account>> {
        self.accounts.list(pagination).await
    }

    pub async fn count_accounts(&self) -> MarqueeResult<u64> {
        self.accounts.count().await
    }
}
