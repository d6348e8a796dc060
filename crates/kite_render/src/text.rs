//! CPU text rasterization: lays out a single line with kerning and blends
//! glyph coverage into an RGBA image in the requested color.

use ab_glyph::{point, Font as _, FontRef, Glyph, GlyphId, PxScale, ScaleFont};
use kite_core::{Color, EngineError, Font, Image, Result};

pub fn rasterize_text(font: &Font, text: &str, color: Color) -> Result<Image> {
    let face = FontRef::try_from_slice(font.data())
        .map_err(|e| EngineError::FontNotFound(format!("{} ({e})", font.path())))?;
    let scaled = face.as_scaled(PxScale::from(font.size() as f32));

    let ascent = scaled.ascent();
    let height = (ascent - scaled.descent()).ceil().max(1.0) as u32;

    let mut glyphs: Vec<Glyph> = Vec::with_capacity(text.len());
    let mut caret = 0.0f32;
    let mut previous: Option<GlyphId> = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        glyphs.push(id.with_scale_and_position(scaled.scale(), point(caret, ascent)));
        caret += scaled.h_advance(id);
        previous = Some(id);
    }
    let width = caret.ceil().max(1.0) as u32;

    let mut pixels = vec![0u8; width as usize * height as usize * 4];
    for glyph in glyphs {
        let Some(outlined) = face.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let x = bounds.min.x as i64 + gx as i64;
            let y = bounds.min.y as i64 + gy as i64;
            if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                return;
            }
            let idx = (y as usize * width as usize + x as usize) * 4;
            let alpha = (coverage.clamp(0.0, 1.0) * color.a as f32).round() as u8;
            pixels[idx] = color.r;
            pixels[idx + 1] = color.g;
            pixels[idx + 2] = color.b;
            pixels[idx + 3] = pixels[idx + 3].max(alpha);
        });
    }

    Image::new(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_font_data_is_font_not_found() {
        let font = Font::new("fonts/broken.ttf", 16, vec![0u8; 8]);
        let err = rasterize_text(&font, "hi", Color::WHITE).expect_err("not a font");
        assert!(matches!(err, EngineError::FontNotFound(path) if path.contains("broken.ttf")));
    }
}
