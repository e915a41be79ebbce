use couch_stats::state::{ALL_SPORTS, CardState, Sport, StatValue};

fn number(card: &CardState, key: &str) -> f64 {
    card.stats
        .get(key)
        .and_then(StatValue::as_number)
        .unwrap_or_else(|| panic!("{key} should be a number"))
}

#[test]
fn basketball_defaults_match_documented_schema() {
    let card = CardState::new();
    assert_eq!(card.sport, Sport::Basketball);
    let expected = [
        ("minutes", 2.0),
        ("points", 0.0),
        ("fgm", 0.0),
        ("fga", 3.0),
        ("threeMade", 0.0),
        ("threeAtt", 1.0),
        ("rebounds", 0.0),
        ("assists", 0.0),
        ("fouls", 5.0),
    ];
    assert_eq!(card.stats.keys().len(), expected.len());
    for (key, value) in expected {
        assert_eq!(number(&card, key), value, "default for {key}");
    }
}

#[test]
fn each_sport_selection_resets_to_its_defaults() {
    let expectations: [(Sport, &[(&str, f64)]); 4] = [
        (
            Sport::Basketball,
            &[
                ("minutes", 2.0),
                ("points", 0.0),
                ("fgm", 0.0),
                ("fga", 3.0),
                ("threeMade", 0.0),
                ("threeAtt", 1.0),
                ("rebounds", 0.0),
                ("assists", 0.0),
                ("fouls", 5.0),
            ],
        ),
        (
            Sport::Football,
            &[
                ("passY", 0.0),
                ("rushY", 0.0),
                ("recY", 0.0),
                ("td", 0.0),
                ("ints", 0.0),
            ],
        ),
        (
            Sport::Baseball,
            &[("ab", 4.0), ("h", 0.0), ("r", 0.0), ("rbi", 0.0), ("hr", 0.0)],
        ),
        (
            Sport::Soccer,
            &[
                ("mins", 90.0),
                ("goals", 0.0),
                ("assists", 0.0),
                ("shots", 0.0),
                ("yellow", 0.0),
                ("red", 0.0),
            ],
        ),
    ];

    for (sport, expected) in expectations {
        let mut card = CardState::new();
        card.update_stat("points", "99");
        card.select_sport(sport);
        assert_eq!(card.sport, sport);
        assert_eq!(card.stats.keys().len(), expected.len());
        for (key, value) in expected {
            assert_eq!(number(&card, key), *value, "{:?} default for {key}", sport);
        }
    }
    assert_eq!(ALL_SPORTS.len(), 4);
}

#[test]
fn sport_switch_keeps_name_team_and_photo() {
    let mut card = CardState::new();
    card.name = "Dana Quick".to_string();
    card.team = "Garage Giants".to_string();
    card.photo = Some("me.png".into());

    card.select_sport(Sport::Soccer);

    assert_eq!(card.name, "Dana Quick");
    assert_eq!(card.team, "Garage Giants");
    assert_eq!(card.photo.as_deref(), Some(std::path::Path::new("me.png")));
    assert_eq!(number(&card, "mins"), 90.0);
}

#[test]
fn reselecting_the_current_sport_still_resets() {
    let mut card = CardState::new();
    card.update_stat("points", "52");
    card.select_sport(Sport::Basketball);
    assert_eq!(number(&card, "points"), 0.0);
}

#[test]
fn update_stat_coerces_numeric_input() {
    let mut card = CardState::new();
    assert!(card.update_stat("points", "7"));
    assert_eq!(card.stats.get("points"), Some(&StatValue::Number(7.0)));
}

#[test]
fn update_stat_keeps_free_text_indefinitely() {
    let mut card = CardState::new();
    assert!(card.update_stat("points", "seven"));
    assert_eq!(card.stats.get("points"), Some(&StatValue::text("seven")));

    // No re-coercion happens on later edits of other keys.
    card.update_stat("assists", "3");
    assert_eq!(card.stats.get("points"), Some(&StatValue::text("seven")));
    assert_eq!(card.stats.get("assists"), Some(&StatValue::Number(3.0)));
}

#[test]
fn update_stat_rejects_keys_outside_the_schema() {
    let mut card = CardState::new();
    assert!(!card.update_stat("ab", "4"));
    assert!(card.stats.get("ab").is_none());
}
