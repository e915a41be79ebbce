use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::card;
use crate::share;
use crate::state::CardState;

/// Fixed upscaling factor for exported cards.
pub const EXPORT_SCALE: f32 = 2.0;

/// `"Victor Mann"` -> `"Victor_Mann_stat.png"`; any whitespace run collapses
/// to a single underscore.
pub fn export_file_name(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('_');
            }
            in_whitespace = true;
        } else {
            slug.push(ch);
            in_whitespace = false;
        }
    }
    format!("{slug}_stat.png")
}

/// Rasterize the card at 2x with a transparent background and write the PNG
/// into the working directory. `photo` is a pre-encoded data URI, if any.
pub fn export_card(card_state: &CardState, photo: Option<&str>) -> Result<PathBuf> {
    let svg = card::card_svg(card_state, photo);
    let (width, height) = card::card_size(card_state);
    let bytes = svg_to_png(&svg, width, height, EXPORT_SCALE)?;
    let path = PathBuf::from(export_file_name(&card_state.name));
    fs::write(&path, bytes).with_context(|| format!("write failed: {}", path.display()))?;
    Ok(path)
}

/// Decode a user-supplied image and re-encode it as a PNG data URI so the
/// SVG renderer can embed it. Validates the file in the process.
pub fn photo_data_uri(path: &Path) -> Result<String> {
    let img = image::open(path).with_context(|| format!("photo load failed: {}", path.display()))?;
    let mut png_bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)
        .context("photo re-encode failed")?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(png_bytes)))
}

/// Write the shareable URL to the system clipboard; returns the URL for the
/// console notice.
pub fn copy_share_link(card_state: &CardState) -> Result<String> {
    let link = share::share_url(card_state)?;
    let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
    clipboard
        .set_text(link.clone())
        .context("clipboard write failed")?;
    Ok(link)
}

fn svg_to_png(svg: &str, width: u32, height: u32, scale: f32) -> Result<Vec<u8>> {
    use tiny_skia::{Pixmap, Transform};
    use usvg::{Options, Tree};

    let mut options = Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree: Tree = Tree::from_data(svg.as_bytes(), &options).context("svg parse failed")?;

    let out_width = (width as f32 * scale) as u32;
    let out_height = (height as f32 * scale) as u32;
    let mut pixmap = Pixmap::new(out_width, out_height).context("pixmap allocation failed")?;
    let mut pixmap_ref = pixmap.as_mut();
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap_ref);

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, out_width, out_height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .write_header()
            .context("png header write failed")?
            .write_image_data(pixmap.data())
            .context("png data write failed")?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_collapses_whitespace_runs() {
        assert_eq!(export_file_name("Victor Mann"), "Victor_Mann_stat.png");
        assert_eq!(export_file_name("A  B\tC"), "A_B_C_stat.png");
        assert_eq!(export_file_name(" pad "), "_pad__stat.png");
        assert_eq!(export_file_name(""), "_stat.png");
    }

    #[test]
    fn rasterizes_a_default_card() {
        let card_state = CardState::new();
        let svg = card::card_svg(&card_state, None);
        let (w, h) = card::card_size(&card_state);
        let bytes = svg_to_png(&svg, w, h, EXPORT_SCALE).unwrap();
        // PNG signature plus a plausible body.
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert!(bytes.len() > 64);
    }
}
