use std::fmt::Write as _;

use crate::state::CardState;

pub const CARD_WIDTH: f64 = 560.0;

const MARGIN: f64 = 20.0;
const ACCENT_WIDTH: f64 = 6.0;
const CONTENT_X: f64 = MARGIN + ACCENT_WIDTH + 12.0;
const PHOTO_SIZE: f64 = 96.0;
const HEADER_HEIGHT: f64 = 140.0;
const TILE_WIDTH: f64 = 156.0;
const TILE_HEIGHT: f64 = 64.0;
const TILE_GAP: f64 = 10.0;
const TILES_PER_ROW: usize = 3;
const FOOTER_HEIGHT: f64 = 44.0;

const FONT: &str = "Inter, Segoe UI, sans-serif";
const WATERMARK: &str = "For entertainment only - Couch Stats";

/// Pixel size of the card at 1x scale; height grows with the stat rows.
pub fn card_size(card: &CardState) -> (u32, u32) {
    let tiles = card.stats.keys().len();
    let rows = tiles.div_ceil(TILES_PER_ROW);
    let height = HEADER_HEIGHT + rows as f64 * (TILE_HEIGHT + TILE_GAP) + FOOTER_HEIGHT;
    (CARD_WIDTH as u32, height as u32)
}

/// Build the SVG markup of the preview card. `photo` is an optional
/// pre-encoded data URI; everything user-supplied is XML-escaped. The area
/// outside the rounded card body stays transparent.
pub fn card_svg(card: &CardState, photo: Option<&str>) -> String {
    let (width, height) = card_size(card);
    let accent = card.theme.accent_hex();

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}' viewBox='0 0 {width} {height}' role='img'>"
    );
    let _ = writeln!(
        svg,
        "  <rect x='4' y='4' width='{:.0}' height='{}' rx='14' fill='#ffffff' stroke='#e3e3e3'/>",
        CARD_WIDTH - 8.0,
        height - 8
    );
    let _ = writeln!(
        svg,
        "  <rect x='{MARGIN:.0}' y='24' width='{ACCENT_WIDTH:.0}' height='{}' fill='{accent}'/>",
        height - 48
    );

    // Header: photo box, name, team line.
    let _ = writeln!(
        svg,
        "  <rect x='{CONTENT_X:.0}' y='28' width='{PHOTO_SIZE:.0}' height='{PHOTO_SIZE:.0}' rx='10' fill='#ededed'/>"
    );
    if let Some(uri) = photo {
        let _ = writeln!(
            svg,
            "  <image x='{CONTENT_X:.0}' y='28' width='{PHOTO_SIZE:.0}' height='{PHOTO_SIZE:.0}' preserveAspectRatio='xMidYMid slice' href='{uri}'/>"
        );
    }

    let text_x = CONTENT_X + PHOTO_SIZE + 16.0;
    let _ = writeln!(
        svg,
        "  <text x='{text_x:.0}' y='64' fill='#141414' font-family='{FONT}' font-size='26' font-weight='700'>{}</text>",
        escape_text(&card.name)
    );
    let _ = writeln!(
        svg,
        "  <text x='{text_x:.0}' y='92' fill='#666666' font-family='{FONT}' font-size='15'>{} · {}</text>",
        escape_text(&card.team),
        card.sport.tag().to_uppercase()
    );

    // Stat tiles, three per row in sheet order.
    for (idx, (key, value)) in card.stats.entries().iter().enumerate() {
        let col = idx % TILES_PER_ROW;
        let row = idx / TILES_PER_ROW;
        let x = CONTENT_X + col as f64 * (TILE_WIDTH + TILE_GAP);
        let y = HEADER_HEIGHT + row as f64 * (TILE_HEIGHT + TILE_GAP);
        let _ = writeln!(svg, "  <g transform='translate({x:.0} {y:.0})'>");
        let _ = writeln!(
            svg,
            "    <rect width='{TILE_WIDTH:.0}' height='{TILE_HEIGHT:.0}' rx='8' fill='#fafafa'/>"
        );
        let _ = writeln!(
            svg,
            "    <text x='12' y='22' fill='#666666' font-family='{FONT}' font-size='11'>{}</text>",
            escape_text(&key.to_uppercase())
        );
        let _ = writeln!(
            svg,
            "    <text x='12' y='48' fill='#141414' font-family='{FONT}' font-size='19' font-weight='700'>{}</text>",
            escape_text(&value.to_string())
        );
        let _ = writeln!(svg, "  </g>");
    }

    let _ = writeln!(
        svg,
        "  <text x='{CONTENT_X:.0}' y='{}' fill='#999999' font-family='{FONT}' font-size='12'>{WATERMARK}</text>",
        height as f64 - 20.0
    );
    let _ = writeln!(svg, "</svg>");

    svg
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Sport;

    #[test]
    fn markup_escapes_user_text() {
        let mut card = CardState::new();
        card.name = "A & B <X>".to_string();
        let svg = card_svg(&card, None);
        assert!(svg.contains("A &amp; B &lt;X&gt;"));
        assert!(!svg.contains("<X>"));
    }

    #[test]
    fn markup_carries_theme_accent_and_stats() {
        let card = CardState::new();
        let svg = card_svg(&card, None);
        assert!(svg.contains("#cc0000"));
        assert!(svg.contains("MINUTES"));
        assert!(svg.contains("BASKETBALL"));
        assert!(svg.contains(WATERMARK));
        assert!(!svg.contains("<image"));
    }

    #[test]
    fn height_tracks_stat_rows() {
        let mut card = CardState::new();
        let (_, bb_height) = card_size(&card);
        card.select_sport(Sport::Football);
        let (_, fb_height) = card_size(&card);
        assert!(bb_height > fb_height);
    }
}
