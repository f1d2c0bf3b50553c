//! Email subjects and bodies for the account flows.
//!
//! Templates carry `{{email}}` and `{{otp}}` placeholders that are
//! substituted at send time.

use marquee_core::mailer::OutboundEmail;

const VERIFY_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
  <body style="margin:0;padding:0;background:#f4f4f7;font-family:Arial,Helvetica,sans-serif">
    <table role="presentation" width="100%" cellpadding="0" cellspacing="0">
      <tr>
        <td align="center" style="padding:32px 16px">
          <table role="presentation" width="480" cellpadding="0" cellspacing="0"
                 style="background:#ffffff;border-radius:8px;padding:32px">
            <tr>
              <td style="color:#333333;font-size:15px;line-height:22px">
                <p>Hi,</p>
                <p>You are receiving this email because a verification was
                   requested for <strong>{{email}}</strong>.</p>
                <p>Use the code below to verify your account. It expires in
                   10 minutes.</p>
                <p style="text-align:center;margin:28px 0">
                  <span style="display:inline-block;background:#22d172;color:#ffffff;
                               font-size:22px;letter-spacing:6px;font-weight:bold;
                               padding:12px 24px;border-radius:6px">{{otp}}</span>
                </p>
                <p>If you did not request this, you can safely ignore this
                   email.</p>
              </td>
            </tr>
          </table>
        </td>
      </tr>
    </table>
  </body>
</html>"#;

const RESET_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
  <body style="margin:0;padding:0;background:#f4f4f7;font-family:Arial,Helvetica,sans-serif">
    <table role="presentation" width="100%" cellpadding="0" cellspacing="0">
      <tr>
        <td align="center" style="padding:32px 16px">
          <table role="presentation" width="480" cellpadding="0" cellspacing="0"
                 style="background:#ffffff;border-radius:8px;padding:32px">
            <tr>
              <td style="color:#333333;font-size:15px;line-height:22px">
                <p>Hi,</p>
                <p>A password reset was requested for
                   <strong>{{email}}</strong>.</p>
                <p>Use the code below to choose a new password. It expires in
                   10 minutes.</p>
                <p style="text-align:center;margin:28px 0">
                  <span style="display:inline-block;background:#4c83ee;color:#ffffff;
                               font-size:22px;letter-spacing:6px;font-weight:bold;
                               padding:12px 24px;border-radius:6px">{{otp}}</span>
                </p>
                <p>If you did not request a reset, your password is unchanged
                   and you can ignore this email.</p>
              </td>
            </tr>
          </table>
        </td>
      </tr>
    </table>
  </body>
</html>"#;

fn render(template: &str, email: &str, code: &str) -> String {
    template.replace("{{email}}", email).replace("{{otp}}", code)
}

/// Plain-text note sent right after registration.
pub fn welcome_email(name: &str, email: &str) -> OutboundEmail {
    OutboundEmail {
        to: email.to_string(),
        to_name: Some(name.to_string()),
        subject: "Welcome to our platform!".to_string(),
        html: None,
        text: Some(format!(
            "Welcome! Your account has been created with email: {email}"
        )),
    }
}

/// Account-verification code delivery.
pub fn verification_email(name: &str, email: &str, code: &str) -> OutboundEmail {
    OutboundEmail {
        to: email.to_string(),
        to_name: Some(name.to_string()),
        subject: "Verify your account".to_string(),
        html: Some(render(VERIFY_TEMPLATE, email, code)),
        text: Some(format!(
            "Your verification code is {code}. It expires in 10 minutes."
        )),
    }
}

/// Password-reset code delivery.
pub fn password_reset_email(name: &str, email: &str, code: &str) -> OutboundEmail {
    OutboundEmail {
        to: email.to_string(),
        to_name: Some(name.to_string()),
        subject: "Reset your password".to_string(),
        html: Some(render(RESET_TEMPLATE, email, code)),
        text: Some(format!(
            "Your password reset code is {code}. It expires in 10 minutes."
        )),
    }
}
