use std::collections::VecDeque;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Basketball,
    Football,
    Baseball,
    Soccer,
}

pub const ALL_SPORTS: [Sport; 4] = [
    Sport::Basketball,
    Sport::Football,
    Sport::Baseball,
    Sport::Soccer,
];

impl Sport {
    pub fn label(self) -> &'static str {
        match self {
            Sport::Basketball => "Basketball",
            Sport::Football => "Football",
            Sport::Baseball => "Baseball",
            Sport::Soccer => "Soccer",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Sport::Basketball => "basketball",
            Sport::Football => "football",
            Sport::Baseball => "baseball",
            Sport::Soccer => "soccer",
        }
    }

    pub fn next(self) -> Sport {
        match self {
            Sport::Basketball => Sport::Football,
            Sport::Football => Sport::Baseball,
            Sport::Baseball => Sport::Soccer,
            Sport::Soccer => Sport::Basketball,
        }
    }

    pub fn prev(self) -> Sport {
        match self {
            Sport::Basketball => Sport::Soccer,
            Sport::Football => Sport::Basketball,
            Sport::Baseball => Sport::Football,
            Sport::Soccer => Sport::Baseball,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "espn")]
    Espn,
    #[serde(rename = "espn-fantasy")]
    EspnFantasy,
    #[serde(rename = "yahoo")]
    Yahoo,
}

impl Theme {
    pub fn label(self) -> &'static str {
        match self {
            Theme::Espn => "ESPN-like",
            Theme::EspnFantasy => "ESPN Fantasy-like",
            Theme::Yahoo => "Yahoo Fantasy-like",
        }
    }

    pub fn accent_hex(self) -> &'static str {
        match self {
            Theme::Espn => "#cc0000",
            Theme::EspnFantasy => "#00843d",
            Theme::Yahoo => "#6001d2",
        }
    }

    pub fn next(self) -> Theme {
        match self {
            Theme::Espn => Theme::EspnFantasy,
            Theme::EspnFantasy => Theme::Yahoo,
            Theme::Yahoo => Theme::Espn,
        }
    }

    pub fn prev(self) -> Theme {
        match self {
            Theme::Espn => Theme::Yahoo,
            Theme::EspnFantasy => Theme::Espn,
            Theme::Yahoo => Theme::EspnFantasy,
        }
    }
}

/// A stat cell is either a number or free text. Editing a numeric stat with
/// something unparseable turns it into text for good; the wire form stays a
/// bare JSON number or string either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl StatValue {
    pub fn text(v: impl Into<String>) -> StatValue {
        StatValue::Text(v.into())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            StatValue::Number(v) => Some(*v),
            StatValue::Text(_) => None,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Number(v) => {
                if v.fract() == 0.0 && v.abs() < 1e15 {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{v}")
                }
            }
            StatValue::Text(s) => f.write_str(s),
        }
    }
}

/// Coerce raw form input the way the original did: numeric-looking text
/// becomes a number, anything else is kept verbatim.
pub fn coerce_stat_input(raw: &str) -> StatValue {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => StatValue::Number(v),
        _ => StatValue::Text(raw.to_string()),
    }
}

macro_rules! stat_sheet {
    ($name:ident { $($field:ident: $key:literal = $default:expr),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct $name {
            $(
                #[serde(rename = $key)]
                pub $field: StatValue,
            )+
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field: StatValue::Number($default),)+
                }
            }
        }

        impl $name {
            pub const KEYS: &'static [&'static str] = &[$($key),+];

            pub fn get(&self, key: &str) -> Option<&StatValue> {
                match key {
                    $($key => Some(&self.$field),)+
                    _ => None,
                }
            }

            pub fn set(&mut self, key: &str, value: StatValue) -> bool {
                match key {
                    $($key => { self.$field = value; true },)+
                    _ => false,
                }
            }
        }
    };
}

stat_sheet!(BasketballSheet {
    minutes: "minutes" = 2.0,
    points: "points" = 0.0,
    fgm: "fgm" = 0.0,
    fga: "fga" = 3.0,
    three_made: "threeMade" = 0.0,
    three_att: "threeAtt" = 1.0,
    rebounds: "rebounds" = 0.0,
    assists: "assists" = 0.0,
    fouls: "fouls" = 5.0,
});

stat_sheet!(FootballSheet {
    pass_y: "passY" = 0.0,
    rush_y: "rushY" = 0.0,
    rec_y: "recY" = 0.0,
    td: "td" = 0.0,
    ints: "ints" = 0.0,
});

stat_sheet!(BaseballSheet {
    ab: "ab" = 4.0,
    h: "h" = 0.0,
    r: "r" = 0.0,
    rbi: "rbi" = 0.0,
    hr: "hr" = 0.0,
});

stat_sheet!(SoccerSheet {
    mins: "mins" = 90.0,
    goals: "goals" = 0.0,
    assists: "assists" = 0.0,
    shots: "shots" = 0.0,
    yellow: "yellow" = 0.0,
    red: "red" = 0.0,
});

/// One stat sheet per sport. The schema (keys and count) is fixed within a
/// sport but differs across sports; declaration order is the render order.
#[derive(Debug, Clone, PartialEq)]
pub enum StatSheet {
    Basketball(BasketballSheet),
    Football(FootballSheet),
    Baseball(BaseballSheet),
    Soccer(SoccerSheet),
}

impl StatSheet {
    pub fn defaults(sport: Sport) -> StatSheet {
        match sport {
            Sport::Basketball => StatSheet::Basketball(BasketballSheet::default()),
            Sport::Football => StatSheet::Football(FootballSheet::default()),
            Sport::Baseball => StatSheet::Baseball(BaseballSheet::default()),
            Sport::Soccer => StatSheet::Soccer(SoccerSheet::default()),
        }
    }

    pub fn sport(&self) -> Sport {
        match self {
            StatSheet::Basketball(_) => Sport::Basketball,
            StatSheet::Football(_) => Sport::Football,
            StatSheet::Baseball(_) => Sport::Baseball,
            StatSheet::Soccer(_) => Sport::Soccer,
        }
    }

    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            StatSheet::Basketball(_) => BasketballSheet::KEYS,
            StatSheet::Football(_) => FootballSheet::KEYS,
            StatSheet::Baseball(_) => BaseballSheet::KEYS,
            StatSheet::Soccer(_) => SoccerSheet::KEYS,
        }
    }

    pub fn get(&self, key: &str) -> Option<&StatValue> {
        match self {
            StatSheet::Basketball(s) => s.get(key),
            StatSheet::Football(s) => s.get(key),
            StatSheet::Baseball(s) => s.get(key),
            StatSheet::Soccer(s) => s.get(key),
        }
    }

    pub fn set(&mut self, key: &str, value: StatValue) -> bool {
        match self {
            StatSheet::Basketball(s) => s.set(key, value),
            StatSheet::Football(s) => s.set(key, value),
            StatSheet::Baseball(s) => s.set(key, value),
            StatSheet::Soccer(s) => s.set(key, value),
        }
    }

    pub fn entries(&self) -> Vec<(&'static str, &StatValue)> {
        self.keys()
            .iter()
            .filter_map(|k| self.get(k).map(|v| (*k, v)))
            .collect()
    }
}

pub const DEFAULT_NAME: &str = "Victor Mann";
pub const DEFAULT_TEAM: &str = "Couch Crew";

/// The card being fabricated. The photo is an opaque local reference: it is
/// never serialized into the share payload and never restored from a link.
#[derive(Debug, Clone, PartialEq)]
pub struct CardState {
    pub sport: Sport,
    pub theme: Theme,
    pub name: String,
    pub team: String,
    pub photo: Option<PathBuf>,
    pub stats: StatSheet,
}

impl Default for CardState {
    fn default() -> Self {
        Self::new()
    }
}

impl CardState {
    pub fn new() -> Self {
        Self {
            sport: Sport::Basketball,
            theme: Theme::Espn,
            name: DEFAULT_NAME.to_string(),
            team: DEFAULT_TEAM.to_string(),
            photo: None,
            stats: StatSheet::defaults(Sport::Basketball),
        }
    }

    /// Direct sport selection resets the stat sheet to that sport's defaults.
    /// Name, team and photo survive the switch.
    pub fn select_sport(&mut self, sport: Sport) {
        self.sport = sport;
        self.stats = StatSheet::defaults(sport);
    }

    pub fn update_stat(&mut self, key: &str, raw: &str) -> bool {
        self.stats.set(key, coerce_stat_input(raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Sport,
    Theme,
    Name,
    Team,
    Photo,
    Stat(usize),
}

#[derive(Debug, Clone)]
pub struct EditBuffer {
    pub field: FormField,
    pub input: String,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub card: CardState,
    pub focus: usize,
    pub editing: Option<EditBuffer>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub last_export: Option<String>,
    pub last_share: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            card: CardState::new(),
            focus: 0,
            editing: None,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
            last_export: None,
            last_share: None,
        }
    }

    /// Fixed fields first, then one entry per stat key of the current sheet.
    pub fn form_fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::Sport,
            FormField::Theme,
            FormField::Name,
            FormField::Team,
            FormField::Photo,
        ];
        for idx in 0..self.card.stats.keys().len() {
            fields.push(FormField::Stat(idx));
        }
        fields
    }

    pub fn focused_field(&self) -> FormField {
        let fields = self.form_fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn select_next(&mut self) {
        let len = self.form_fields().len();
        self.focus = (self.focus + 1) % len;
    }

    pub fn select_prev(&mut self) {
        let len = self.form_fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn clamp_focus(&mut self) {
        let len = self.form_fields().len();
        if self.focus >= len {
            self.focus = len - 1;
        }
    }

    pub fn stat_key(&self, idx: usize) -> Option<&'static str> {
        self.card.stats.keys().get(idx).copied()
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}
