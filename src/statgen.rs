use rand::Rng;

use crate::state::{
    BaseballSheet, BasketballSheet, FootballSheet, SoccerSheet, Sport, StatSheet, StatValue,
};

/// Draw a "funny" box score for the given sport. Each stat is a uniform draw
/// in `[0, hi)` floored to an integer; baseball's `ab` and soccer's `mins`
/// are fixed. The rng is injected so tests can seed it.
pub fn generate_stats(sport: Sport, rng: &mut impl Rng) -> StatSheet {
    match sport {
        Sport::Basketball => StatSheet::Basketball(BasketballSheet {
            minutes: draw(rng, 6.0),
            points: draw(rng, 5.0),
            fga: draw(rng, 6.0),
            fgm: draw(rng, 3.0),
            three_att: draw(rng, 3.0),
            three_made: draw(rng, 1.5),
            rebounds: draw(rng, 8.0),
            assists: draw(rng, 5.0),
            fouls: draw(rng, 5.0),
        }),
        Sport::Football => StatSheet::Football(FootballSheet {
            pass_y: draw(rng, 350.0),
            rush_y: draw(rng, 120.0),
            rec_y: draw(rng, 150.0),
            td: draw(rng, 4.0),
            ints: draw(rng, 2.0),
        }),
        Sport::Baseball => StatSheet::Baseball(BaseballSheet {
            ab: StatValue::Number(4.0),
            h: draw(rng, 4.0),
            r: draw(rng, 3.0),
            rbi: draw(rng, 4.0),
            hr: draw(rng, 2.0),
        }),
        Sport::Soccer => StatSheet::Soccer(SoccerSheet {
            mins: StatValue::Number(90.0),
            goals: draw(rng, 3.0),
            assists: draw(rng, 2.0),
            shots: draw(rng, 6.0),
            yellow: draw(rng, 2.0),
            red: draw(rng, 1.0),
        }),
    }
}

fn draw(rng: &mut impl Rng, hi: f64) -> StatValue {
    StatValue::Number(rng.gen_range(0.0..hi).floor())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn draw_floors_to_integer() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            let v = draw(&mut rng, 1.5).as_number().unwrap();
            assert!(v == 0.0 || v == 1.0);
        }
    }

    #[test]
    fn soccer_red_card_range_is_degenerate() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..32 {
            let StatSheet::Soccer(sheet) = generate_stats(Sport::Soccer, &mut rng) else {
                panic!("wrong sheet variant");
            };
            assert_eq!(sheet.red.as_number(), Some(0.0));
            assert_eq!(sheet.mins.as_number(), Some(90.0));
        }
    }
}
