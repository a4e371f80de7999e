//! The portal wire contract.
//!
//! Everything in this module is contractual with the live upstream: the
//! hidden-field names, the hand-off token field, the invalid-login marker,
//! and the balance-table labels must match the portal's markup exactly or
//! the scrape silently degrades into parse errors. Label alternatives
//! exist where the portal generation changed the wording.

use catcard_core::{BalanceFields, BoardMeals, Cents};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::FetchError;
use crate::extract::{hidden_field, table_field};

// ============================================================================
// Contractual field names
// ============================================================================

/// SSO probe hidden field: post-login destination.
pub const FIELD_GOTO: &str = "goto";
/// SSO probe hidden field: failure destination.
pub const FIELD_GOTO_ON_FAIL: &str = "gotoOnFail";
/// SSO probe hidden field: opaque query-params blob.
pub const FIELD_SUN_QUERY_PARAMS: &str = "SunQueryParamsString";
/// SSO probe hidden field: encoding flag.
pub const FIELD_ENCODED: &str = "encoded";
/// SSO probe hidden field: charset token.
pub const FIELD_CHARSET: &str = "gx_charset";
/// Hand-off token field passed between hops.
pub const FIELD_TOKEN: &str = "LARES";
/// Login form field carrying the NetID.
pub const FIELD_USER: &str = "IDToken1";
/// Login form field carrying the password.
pub const FIELD_PASSWORD: &str = "IDToken2";

/// Marker string the SSO emits on a bad NetID/password.
pub const INVALID_LOGIN_MARKER: &str = "Authentication Failed";

/// Cache-buster query parameter added to the probe GET.
pub const PROBE_TIMESTAMP_PARAM: &str = "ts";

// ============================================================================
// Balance-table labels (exact text, per-generation alternatives)
// ============================================================================

/// Cardholder name row.
pub const NAME_LABELS: &[&str] = &["Name:"];
/// Plan name row.
pub const PLAN_LABELS: &[&str] = &["Meal Plan:", "Plan:"];
/// Board meals row.
pub const BOARD_LABELS: &[&str] = &["Board:"];
/// Equivalency/exchange meals row (label changed between generations).
pub const SECONDARY_LABELS: &[&str] = &["Equivalency:", "Exchanges:"];
/// Points / dining dollars row (label changed between generations).
pub const POINTS_LABELS: &[&str] = &["Dining Dollars:", "Points:"];
/// Cat Cash row.
pub const CAT_CASH_LABELS: &[&str] = &["Cat Cash:"];
/// Bonus cash row (optional; not every plan has one).
pub const BONUS_LABELS: &[&str] = &["Bonus Cash:", "Bonus:"];
/// Server-reported update time row (optional).
pub const UPDATED_LABELS: &[&str] = &["Last Updated:", "As Of:"];

/// Board cell text indicating an unlimited plan instead of a count.
const BOARD_UNLIMITED_TEXT: &str = "unlimited";

/// Timestamp formats the portal has been seen emitting.
const UPDATED_AT_FORMATS: &[&str] = &["%m/%d/%Y %I:%M %p", "%m/%d/%Y %H:%M"];

// ============================================================================
// Portal configuration
// ============================================================================

/// Endpoint configuration for one portal deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// SSO entry page probed for hidden form fields.
    pub probe_url: String,
    /// SSO login endpoint the credentials are posted to.
    pub login_url: String,
    /// Balance-check endpoint the hand-off token is posted to.
    pub balance_url: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            probe_url: "https://sso.campus.edu/amserver/UI/Login".to_string(),
            login_url: "https://sso.campus.edu/amserver/UI/Login".to_string(),
            balance_url: "https://catcard.campus.edu/myeaccount/balance".to_string(),
        }
    }
}

impl PortalConfig {
    /// The probe URL with the cache-buster timestamp parameter appended.
    pub fn timestamped_probe_url(&self, now: DateTime<Utc>) -> String {
        match Url::parse(&self.probe_url) {
            Ok(mut url) => {
                url.query_pairs_mut()
                    .append_pair(PROBE_TIMESTAMP_PARAM, &now.timestamp_millis().to_string());
                url.to_string()
            }
            // Malformed config URLs surface later as transport errors.
            Err(_) => self.probe_url.clone(),
        }
    }
}

// ============================================================================
// Probe page
// ============================================================================

/// The hidden form fields the SSO probe page must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFields {
    /// Post-login destination.
    pub goto: String,
    /// Failure destination.
    pub goto_on_fail: String,
    /// Opaque query-params blob.
    pub sun_query_params: String,
    /// Encoding flag.
    pub encoded: String,
    /// Charset token.
    pub charset: String,
}

impl ProbeFields {
    /// The login form body: probe fields plus credentials.
    pub fn login_form<'a>(
        &'a self,
        net_id: &'a str,
        password: &'a str,
    ) -> Vec<(&'static str, &'a str)> {
        vec![
            (FIELD_GOTO, self.goto.as_str()),
            (FIELD_GOTO_ON_FAIL, self.goto_on_fail.as_str()),
            (FIELD_SUN_QUERY_PARAMS, self.sun_query_params.as_str()),
            (FIELD_ENCODED, self.encoded.as_str()),
            (FIELD_CHARSET, self.charset.as_str()),
            (FIELD_USER, net_id),
            (FIELD_PASSWORD, password),
        ]
    }
}

/// Extracts the required hidden fields from the SSO probe page.
pub fn parse_probe_page(html: &str) -> Result<ProbeFields, FetchError> {
    let field = |name: &'static str| {
        hidden_field(html, name).ok_or(FetchError::MissingField(name))
    };
    Ok(ProbeFields {
        goto: field(FIELD_GOTO)?,
        goto_on_fail: field(FIELD_GOTO_ON_FAIL)?,
        sun_query_params: field(FIELD_SUN_QUERY_PARAMS)?,
        encoded: field(FIELD_ENCODED)?,
        charset: field(FIELD_CHARSET)?,
    })
}

/// Finds a hand-off token embedded in the page, if any.
pub fn find_token(html: &str) -> Option<String> {
    hidden_field(html, FIELD_TOKEN).filter(|token| !token.is_empty())
}

/// True when the page carries the SSO's invalid-login marker.
pub fn has_invalid_login_marker(html: &str) -> bool {
    html.contains(INVALID_LOGIN_MARKER)
}

// ============================================================================
// Balance page
// ============================================================================

/// First label alternative that resolves to a table cell.
fn labeled_field(html: &str, labels: &[&'static str]) -> Option<String> {
    labels.iter().find_map(|label| table_field(html, label))
}

/// Like [`labeled_field`] but a required row.
fn required_field(html: &str, labels: &[&'static str]) -> Result<String, FetchError> {
    labeled_field(html, labels).ok_or(FetchError::MissingTableRow(labels[0]))
}

/// Parses a currency cell ("1.95", with or without a leading `$`).
fn parse_cents(field: &'static str, text: &str) -> Result<Cents, FetchError> {
    let trimmed = text.trim().trim_start_matches('$').trim();
    Cents::parse(trimmed).ok_or_else(|| FetchError::MalformedValue {
        field,
        value: text.to_string(),
    })
}

/// Parses a count cell.
fn parse_count(field: &'static str, text: &str) -> Result<u32, FetchError> {
    text.trim().parse().map_err(|_| FetchError::MalformedValue {
        field,
        value: text.to_string(),
    })
}

/// Parses the board cell: a count, or the unlimited marker.
fn parse_board(text: &str) -> Result<BoardMeals, FetchError> {
    if text.to_lowercase().contains(BOARD_UNLIMITED_TEXT) {
        return Ok(BoardMeals::Unlimited);
    }
    parse_count("board", text).map(BoardMeals::Count)
}

/// Parses the server-reported update time; unparseable text reads as
/// "not reported" rather than failing the whole scrape.
fn parse_updated_at(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    UPDATED_AT_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(trimmed, format)
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    })
}

/// Scrapes a balance page into typed fields.
///
/// Every required row must resolve; `bonus` and the update time are
/// generation-dependent and may be absent.
pub fn parse_balance_page(html: &str) -> Result<BalanceFields, FetchError> {
    let name = required_field(html, NAME_LABELS)?;
    let plan_name = required_field(html, PLAN_LABELS)?;
    let board_meals = parse_board(&required_field(html, BOARD_LABELS)?)?;
    let secondary_meals = parse_count("secondary", &required_field(html, SECONDARY_LABELS)?)?;
    let points = parse_cents("points", &required_field(html, POINTS_LABELS)?)?;
    let cat_cash = parse_cents("cat_cash", &required_field(html, CAT_CASH_LABELS)?)?;
    let bonus = labeled_field(html, BONUS_LABELS)
        .map(|text| parse_cents("bonus", &text))
        .transpose()?;
    let updated_at = labeled_field(html, UPDATED_LABELS).and_then(|text| parse_updated_at(&text));

    Ok(BalanceFields {
        name,
        plan_name,
        board_meals,
        secondary_meals,
        points,
        cat_cash,
        bonus,
        updated_at,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PROBE_HTML: &str = r#"
        <form name="Login" action="/amserver/UI/Login" method="post">
            <input type="hidden" name="goto" value="aHR0cHM6Ly9leGFtcGxl">
            <input type="hidden" name="gotoOnFail" value="">
            <input type="hidden" name="SunQueryParamsString" value="cmVhbG09Y2FtcHVz">
            <input type="hidden" name="encoded" value="true">
            <input type="hidden" name="gx_charset" value="UTF-8">
        </form>"#;

    const BALANCE_HTML: &str = r#"
        <table>
            <tr><td>Name:</td><td>Catamount, Rufus</td></tr>
            <tr><td>Meal Plan:</td><td>Block 160</td></tr>
            <tr><td>Board:</td><td>37</td></tr>
            <tr><td>Equivalency:</td><td>3</td></tr>
            <tr><td>Dining Dollars:</td><td>0.00</td></tr>
            <tr><td>Cat Cash:</td><td>1.95</td></tr>
            <tr><td>Last Updated:</td><td>09/01/2024 11:30 AM</td></tr>
        </table>"#;

    #[test]
    fn test_parse_probe_page() {
        let fields = parse_probe_page(PROBE_HTML).unwrap();
        assert_eq!(fields.goto, "aHR0cHM6Ly9leGFtcGxl");
        assert_eq!(fields.goto_on_fail, "");
        assert_eq!(fields.encoded, "true");
        assert_eq!(fields.charset, "UTF-8");
    }

    #[test]
    fn test_parse_probe_page_missing_field() {
        let html = PROBE_HTML.replace("encoded", "something_else");
        let err = parse_probe_page(&html).unwrap_err();
        assert!(matches!(err, FetchError::MissingField(FIELD_ENCODED)));
    }

    #[test]
    fn test_login_form_layout() {
        let fields = parse_probe_page(PROBE_HTML).unwrap();
        let form = fields.login_form("rcatamount", "hunter2");
        assert_eq!(form.len(), 7);
        assert!(form.contains(&(FIELD_USER, "rcatamount")));
        assert!(form.contains(&(FIELD_PASSWORD, "hunter2")));
        assert!(form.contains(&(FIELD_ENCODED, "true")));
    }

    #[test]
    fn test_find_token() {
        let html = r#"<input type="hidden" name="LARES" value="AAAtoken=="/>"#;
        assert_eq!(find_token(html), Some("AAAtoken==".to_string()));
        assert_eq!(find_token("<p>no token</p>"), None);
        // An empty token is not a token.
        assert_eq!(find_token(r#"<input name="LARES" value="">"#), None);
    }

    #[test]
    fn test_invalid_login_marker() {
        assert!(has_invalid_login_marker(
            "<b>Authentication Failed</b> Try again."
        ));
        assert!(!has_invalid_login_marker("<b>Welcome</b>"));
    }

    #[test]
    fn test_parse_balance_page() {
        let fields = parse_balance_page(BALANCE_HTML).unwrap();
        assert_eq!(fields.name, "Catamount, Rufus");
        assert_eq!(fields.plan_name, "Block 160");
        assert_eq!(fields.board_meals, BoardMeals::Count(37));
        assert_eq!(fields.secondary_meals, 3);
        assert_eq!(fields.points, Cents(0));
        assert_eq!(fields.cat_cash, Cents(195));
        assert_eq!(fields.bonus, None);
        assert!(fields.updated_at.is_some());
    }

    #[test]
    fn test_parse_balance_page_unlimited_and_legacy_labels() {
        let html = r#"
            <tr><td>Name:</td><td>Catamount, Rufus</td></tr>
            <tr><td>Plan:</td><td>Retro Unlimited</td></tr>
            <tr><td>Board:</td><td>Unlimited</td></tr>
            <tr><td>Exchanges:</td><td>1</td></tr>
            <tr><td>Points:</td><td>15.00</td></tr>
            <tr><td>Cat Cash:</td><td>$4.05</td></tr>
            <tr><td>Bonus:</td><td>2.50</td></tr>"#;
        let fields = parse_balance_page(html).unwrap();
        assert_eq!(fields.board_meals, BoardMeals::Unlimited);
        assert_eq!(fields.secondary_meals, 1);
        assert_eq!(fields.points, Cents(1500));
        assert_eq!(fields.cat_cash, Cents(405));
        assert_eq!(fields.bonus, Some(Cents(250)));
        assert_eq!(fields.updated_at, None);
    }

    #[test]
    fn test_parse_balance_page_missing_row() {
        let html = "<tr><td>Name:</td><td>X</td></tr>";
        let err = parse_balance_page(html).unwrap_err();
        assert!(matches!(err, FetchError::MissingTableRow(_)));
    }

    #[test]
    fn test_parse_balance_page_malformed_currency() {
        let html = BALANCE_HTML.replace("1.95", "one dollar");
        let err = parse_balance_page(&html).unwrap_err();
        assert!(matches!(err, FetchError::MalformedValue { field: "cat_cash", .. }));
    }

    #[test]
    fn test_timestamped_probe_url() {
        let config = PortalConfig::default();
        let now = Utc::now();
        let url = config.timestamped_probe_url(now);
        assert!(url.starts_with(&config.probe_url));
        assert!(url.contains("ts="));
    }
}
