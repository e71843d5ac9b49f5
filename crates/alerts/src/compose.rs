//! Deterministic rendering of the recipient-facing alert notification.
//!
//! [`compose`] is pure: identical inputs produce byte-identical subject
//! and bodies, so the content contract is tested here without touching
//! any delivery channel. Both a plain-text and an HTML variant are
//! produced; the HTML variant adds a classification-dependent accent
//! color but carries the same content.

use carewatch_core::vitals::{HeartRateClass, NORMAL_RANGE_LABEL};

use crate::resolve::{PatientContext, Recipient};

/// Accent color for critically low readings.
const LOW_ACCENT: &str = "#ff3b30";

/// Accent color for elevated readings.
const HIGH_ACCENT: &str = "#ff9500";

/// A fully rendered notification, ready for the mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEmail {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Render the notification for one recipient.
///
/// `class` is expected to be [`HeartRateClass::Low`] or
/// [`HeartRateClass::High`]; the dispatcher never composes for normal or
/// unclassifiable readings.
pub fn compose(
    ctx: &PatientContext,
    class: HeartRateClass,
    bpm: i64,
    observed_at: &str,
    recipient: &Recipient,
) -> AlertEmail {
    AlertEmail {
        subject: subject(ctx, class, bpm),
        text_body: text_body(ctx, class, bpm, observed_at, recipient),
        html_body: html_body(ctx, class, bpm, observed_at, recipient),
    }
}

/// Subject line: patient name, classification label, and the reading.
fn subject(ctx: &PatientContext, class: HeartRateClass, bpm: i64) -> String {
    format!(
        "Heart Rate Alert: {} - {class} ({bpm} BPM)",
        ctx.patient_name
    )
}

/// One-line description of what was detected.
fn lead_in(class: HeartRateClass) -> &'static str {
    match class {
        HeartRateClass::Low => "A critically low heart rate has been detected",
        _ => "An elevated heart rate has been detected",
    }
}

/// The classification-specific recommended action.
fn recommended_action(class: HeartRateClass) -> &'static str {
    match class {
        HeartRateClass::Low => {
            "Please check on the patient immediately. \
             A heart rate below 50 BPM requires urgent attention."
        }
        _ => {
            "Please monitor the patient closely. \
             Consider checking their activity level and stress."
        }
    }
}

/// Accent color used by the HTML variant's banner and callouts.
fn accent_color(class: HeartRateClass) -> &'static str {
    match class {
        HeartRateClass::Low => LOW_ACCENT,
        _ => HIGH_ACCENT,
    }
}

/// Plain-text variant.
fn text_body(
    ctx: &PatientContext,
    class: HeartRateClass,
    bpm: i64,
    observed_at: &str,
    recipient: &Recipient,
) -> String {
    format!(
        "HEART RATE ALERT - {class}\n\
         \n\
         Dear {name} ({role}),\n\
         \n\
         This is an automated alert from the CareWatch monitoring system.\n\
         {lead_in} for {patient}.\n\
         \n\
         PATIENT INFORMATION:\n\
         --------------------\n\
         Patient Name: {patient}\n\
         Device ID: {device}\n\
         Heart Rate: {bpm} BPM\n\
         Timestamp: {observed_at}\n\
         Normal Range: {range}\n\
         \n\
         RECOMMENDED ACTION:\n\
         {action}\n\
         \n\
         ---\n\
         This is an automated alert from the CareWatch monitoring system.\n\
         You are receiving this because you are listed as a {role} for this patient.\n\
         \n\
         If you have any questions, please contact your healthcare provider.\n",
        name = recipient.display_name,
        role = recipient.role,
        lead_in = lead_in(class),
        patient = ctx.patient_name,
        device = ctx.device_id,
        range = NORMAL_RANGE_LABEL,
        action = recommended_action(class),
    )
}

/// HTML variant. Same content as the text body, with the accent color on
/// the banner, the heart-rate figure, and the recommended-action callout.
fn html_body(
    ctx: &PatientContext,
    class: HeartRateClass,
    bpm: i64,
    observed_at: &str,
    recipient: &Recipient,
) -> String {
    let accent = accent_color(class);

    format!(
        r#"<html>
  <body style="font-family: -apple-system, 'Segoe UI', Roboto, Arial, sans-serif;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
      <div style="background: {accent}; color: white; padding: 20px; border-radius: 10px; text-align: center;">
        <h1 style="margin: 0; font-size: 28px; font-weight: 600;">Heart Rate Alert</h1>
        <p style="font-size: 18px; margin: 10px 0 0 0; font-weight: 500;">{class} Heart Rate Detected</p>
      </div>
      <div style="background: #f5f5f7; padding: 24px; border-radius: 10px; margin-top: 20px;">
        <p style="margin: 0 0 12px 0; font-size: 14px; color: #86868b;">Dear {name} ({role}),</p>
        <p style="margin: 12px 0; font-size: 14px; color: #1d1d1f;">
          This is an automated alert from the CareWatch monitoring system.
          {lead_in} for {patient}.
        </p>
        <h2 style="color: #1d1d1f; margin: 20px 0 16px 0; font-size: 18px; font-weight: 600;">Patient Information</h2>
        <table style="width: 100%; border-collapse: collapse;">
          <tr>
            <td style="padding: 10px 0; color: #86868b;">Patient Name:</td>
            <td style="padding: 10px 0; font-weight: bold;">{patient}</td>
          </tr>
          <tr>
            <td style="padding: 10px 0; color: #86868b;">Device ID:</td>
            <td style="padding: 10px 0; font-weight: bold; font-family: monospace;">{device}</td>
          </tr>
          <tr>
            <td style="padding: 10px 0; color: #86868b;">Heart Rate:</td>
            <td style="padding: 10px 0; font-weight: bold; color: {accent}; font-size: 24px;">{bpm} BPM</td>
          </tr>
          <tr>
            <td style="padding: 10px 0; color: #86868b;">Timestamp:</td>
            <td style="padding: 10px 0; font-weight: bold;">{observed_at}</td>
          </tr>
          <tr>
            <td style="padding: 10px 0; color: #86868b;">Normal Range:</td>
            <td style="padding: 10px 0; font-weight: bold;">{range}</td>
          </tr>
        </table>
      </div>
      <div style="background: #f5f5f7; padding: 16px; border-radius: 10px; margin-top: 20px; border-left: 4px solid {accent};">
        <p style="margin: 0; font-size: 14px; color: #1d1d1f; font-weight: 500;">Recommended Action:</p>
        <p style="margin: 8px 0 0 0; font-size: 13px; color: #1d1d1f;">{action}</p>
      </div>
      <p style="color: #86868b; text-align: center; margin-top: 24px; font-size: 12px;">
        This is an automated alert from the CareWatch monitoring system.<br/>
        You are receiving this because you are listed as a {role} for this patient.
      </p>
    </div>
  </body>
</html>
"#,
        name = recipient.display_name,
        role = recipient.role,
        lead_in = lead_in(class),
        patient = ctx.patient_name,
        device = ctx.device_id,
        range = NORMAL_RANGE_LABEL,
        action = recommended_action(class),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
