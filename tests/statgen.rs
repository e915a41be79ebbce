use rand::SeedableRng;
use rand::rngs::StdRng;

use couch_stats::state::{Sport, StatSheet, StatValue};
use couch_stats::statgen::generate_stats;

fn number(sheet: &StatSheet, key: &str) -> f64 {
    sheet
        .get(key)
        .and_then(StatValue::as_number)
        .unwrap_or_else(|| panic!("{key} should be a number"))
}

fn assert_in_range(sheet: &StatSheet, key: &str, hi: f64) {
    let v = number(sheet, key);
    assert!(v >= 0.0 && v < hi, "{key}={v} out of [0,{hi})");
    assert_eq!(v.fract(), 0.0, "{key}={v} should be floored");
}

#[test]
fn basketball_draws_stay_in_documented_ranges() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..200 {
        let sheet = generate_stats(Sport::Basketball, &mut rng);
        assert_in_range(&sheet, "minutes", 6.0);
        assert_in_range(&sheet, "points", 5.0);
        assert_in_range(&sheet, "fga", 6.0);
        assert_in_range(&sheet, "fgm", 3.0);
        assert_in_range(&sheet, "threeAtt", 3.0);
        assert_in_range(&sheet, "threeMade", 1.5);
        assert_in_range(&sheet, "rebounds", 8.0);
        assert_in_range(&sheet, "assists", 5.0);
        assert_in_range(&sheet, "fouls", 5.0);
        // Keys from other sports' schemas never leak in.
        assert!(sheet.get("ab").is_none());
        assert!(sheet.get("mins").is_none());
    }
}

#[test]
fn football_draws_stay_in_documented_ranges() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..200 {
        let sheet = generate_stats(Sport::Football, &mut rng);
        assert_in_range(&sheet, "passY", 350.0);
        assert_in_range(&sheet, "rushY", 120.0);
        assert_in_range(&sheet, "recY", 150.0);
        assert_in_range(&sheet, "td", 4.0);
        assert_in_range(&sheet, "ints", 2.0);
    }
}

#[test]
fn baseball_at_bats_are_always_four() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let sheet = generate_stats(Sport::Baseball, &mut rng);
        assert_eq!(number(&sheet, "ab"), 4.0);
        assert_in_range(&sheet, "h", 4.0);
        assert_in_range(&sheet, "r", 3.0);
        assert_in_range(&sheet, "rbi", 4.0);
        assert_in_range(&sheet, "hr", 2.0);
    }
}

#[test]
fn soccer_minutes_are_fixed_and_red_is_zero() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..200 {
        let sheet = generate_stats(Sport::Soccer, &mut rng);
        assert_eq!(number(&sheet, "mins"), 90.0);
        assert_in_range(&sheet, "goals", 3.0);
        assert_in_range(&sheet, "assists", 2.0);
        assert_in_range(&sheet, "shots", 6.0);
        assert_in_range(&sheet, "yellow", 2.0);
        // [0,1) floored is always 0.
        assert_eq!(number(&sheet, "red"), 0.0);
    }
}

#[test]
fn seeded_generation_is_reproducible() {
    let a = generate_stats(Sport::Basketball, &mut StdRng::seed_from_u64(77));
    let b = generate_stats(Sport::Basketball, &mut StdRng::seed_from_u64(77));
    assert_eq!(a, b);
}

#[test]
fn generated_sheet_matches_the_requested_sport() {
    let mut rng = StdRng::seed_from_u64(5);
    for sport in [
        Sport::Basketball,
        Sport::Football,
        Sport::Baseball,
        Sport::Soccer,
    ] {
        assert_eq!(generate_stats(sport, &mut rng).sport(), sport);
    }
}
