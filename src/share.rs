use std::env;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};

use crate::state::{
    BaseballSheet, BasketballSheet, CardState, FootballSheet, SoccerSheet, Sport, StatSheet, Theme,
};

pub const DATA_PARAM: &str = "data";
pub const PAYLOAD_VERSION: u64 = 1;

const DEFAULT_BASE_URL: &str = "https://couchstats.app/card";

/// Decoded share payload. Every field is optional: absent fields leave the
/// current card untouched. The photo is never part of the payload.
#[derive(Debug, Clone, Default)]
pub struct SharePayload {
    pub version: Option<u64>,
    pub sport: Option<Sport>,
    pub theme: Option<Theme>,
    pub name: Option<String>,
    pub team: Option<String>,
    pub stats: Option<Value>,
}

/// Serialize the card into a value safe for a single `data` query parameter:
/// JSON, then base64, then percent-escape.
pub fn encode(card: &CardState) -> Result<String> {
    let payload = json!({
        "v": PAYLOAD_VERSION,
        "sport": card.sport,
        "theme": card.theme,
        "name": card.name,
        "team": card.team,
        "stats": sheet_to_value(&card.stats)?,
    });
    let b64 = BASE64.encode(payload.to_string());
    Ok(url::form_urlencoded::byte_serialize(b64.as_bytes()).collect())
}

/// Reverse of [`encode`]. `raw` is the still-escaped parameter value as it
/// appears in the query string.
pub fn decode(raw: &str) -> Result<SharePayload> {
    let unescaped = unescape_component(raw);
    let bytes = BASE64
        .decode(unescaped.as_bytes())
        .context("share payload base64 decode failed")?;
    let text = String::from_utf8(bytes).context("share payload is not utf8")?;
    parse_share_json(&text)
}

/// Overwrite the card from a decoded payload. Sport is applied first so its
/// reset invariant runs, then theme/name/team, then stats parsed against the
/// effective sport. Applies all-or-nothing: a bad stats block leaves the card
/// exactly as it was.
pub fn apply_share(card: &mut CardState, payload: &SharePayload) -> Result<()> {
    let mut next = card.clone();
    if let Some(sport) = payload.sport {
        next.select_sport(sport);
    }
    if let Some(theme) = payload.theme {
        next.theme = theme;
    }
    if let Some(name) = &payload.name {
        next.name = name.clone();
    }
    if let Some(team) = &payload.team {
        next.team = team.clone();
    }
    if let Some(stats) = &payload.stats {
        next.stats = sheet_from_value(next.sport, stats.clone())?;
    }
    *card = next;
    Ok(())
}

pub fn share_base_url() -> String {
    env::var("COUCH_STATS_BASE_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Fully qualified shareable link for the current card.
pub fn share_url(card: &CardState) -> Result<String> {
    let base = share_base_url();
    let encoded = encode(card)?;
    Ok(format!("{}?{DATA_PARAM}={encoded}", base.trim_end_matches('?')))
}

/// Pull the raw (still-escaped) `data` value out of a full URL or a bare
/// query string.
pub fn extract_data_param(arg: &str) -> Option<String> {
    let query = match arg.split_once('?') {
        Some((_, rest)) => rest,
        None => arg,
    };
    let query = query.split('#').next().unwrap_or(query);
    for pair in query.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            if key == DATA_PARAM {
                return Some(value.to_string());
            }
        }
    }
    None
}

fn unescape_component(raw: &str) -> String {
    url::form_urlencoded::parse(format!("d={raw}").as_bytes())
        .find(|(k, _)| k == "d")
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default()
}

fn parse_share_json(text: &str) -> Result<SharePayload> {
    let root: Value = serde_json::from_str(text).context("share payload json parse failed")?;
    let obj = root
        .as_object()
        .context("share payload is not a json object")?;

    let sport = match obj.get("sport") {
        Some(v) => Some(
            serde_json::from_value(v.clone()).context("share payload has an unknown sport")?,
        ),
        None => None,
    };
    let theme = match obj.get("theme") {
        Some(v) => Some(
            serde_json::from_value(v.clone()).context("share payload has an unknown theme")?,
        ),
        None => None,
    };

    Ok(SharePayload {
        version: obj.get("v").and_then(Value::as_u64),
        sport,
        theme,
        name: obj.get("name").and_then(Value::as_str).map(str::to_string),
        team: obj.get("team").and_then(Value::as_str).map(str::to_string),
        stats: obj.get("stats").cloned(),
    })
}

fn sheet_to_value(sheet: &StatSheet) -> Result<Value> {
    let value = match sheet {
        StatSheet::Basketball(s) => serde_json::to_value(s),
        StatSheet::Football(s) => serde_json::to_value(s),
        StatSheet::Baseball(s) => serde_json::to_value(s),
        StatSheet::Soccer(s) => serde_json::to_value(s),
    };
    value.context("stat sheet serialization failed")
}

/// Parse a payload stats object against the sheet schema of `sport`. Unknown
/// keys are ignored; missing keys keep that sport's defaults, so stale links
/// from an older schema degrade field-by-field.
fn sheet_from_value(sport: Sport, value: Value) -> Result<StatSheet> {
    let ctx = "share payload stats did not match the sport schema";
    Ok(match sport {
        Sport::Basketball => {
            StatSheet::Basketball(serde_json::from_value::<BasketballSheet>(value).context(ctx)?)
        }
        Sport::Football => {
            StatSheet::Football(serde_json::from_value::<FootballSheet>(value).context(ctx)?)
        }
        Sport::Baseball => {
            StatSheet::Baseball(serde_json::from_value::<BaseballSheet>(value).context(ctx)?)
        }
        Sport::Soccer => {
            StatSheet::Soccer(serde_json::from_value::<SoccerSheet>(value).context(ctx)?)
        }
    })
}
