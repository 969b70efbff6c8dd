use std::io::BufWriter;

use log::debug;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
    Rgb as PdfRgb,
};

use crate::config::{ReportStyle, Rgb};
use crate::error::{ReportError, Result};
use crate::pdf::layout::{text_width_mm, Align, Element, Page, PagedDocument, FOOTER_BASELINE_MM};

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn color(rgb: Rgb) -> Color {
    let (r, g, b) = rgb.to_unit();
    Color::Rgb(PdfRgb::new(r, g, b, None))
}

/// Draws one laid-out page, flipping the top-down layout coordinates into PDF space
fn draw_page(layer: &PdfLayerReference, page: &Page, height: f64, fonts: &Fonts, style: &ReportStyle) {
    let flip = |y: f64| Mm((height - y) as f32);

    for element in &page.elements {
        match element {
            Element::Fill {
                x,
                y,
                width,
                height: h,
                color: fill,
            } => {
                layer.set_fill_color(color(*fill));
                let rect = Rect::new(
                    Mm(*x as f32),
                    flip(y + h),
                    Mm((x + width) as f32),
                    flip(*y),
                )
                .with_mode(PaintMode::Fill);
                layer.add_rect(rect);
            }
            Element::Text {
                x,
                y,
                size,
                bold,
                color: ink,
                align,
                content,
            } => {
                let left = match align {
                    Align::Left => *x,
                    Align::Center => x - text_width_mm(content, *size) / 2.0,
                    Align::Right => x - text_width_mm(content, *size),
                };
                let font = if *bold { &fonts.bold } else { &fonts.regular };
                layer.set_fill_color(color(*ink));
                layer.use_text(content.as_str(), *size, Mm(left as f32), flip(*y), font);
            }
            Element::Rule { x1, x2, y, color: stroke } => {
                layer.set_outline_color(color(*stroke));
                layer.set_outline_thickness(0.5);
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(*x1 as f32), flip(*y)), false),
                        (Point::new(Mm(*x2 as f32), flip(*y)), false),
                    ],
                    is_closed: false,
                });
            }
        }
    }

    if let Some(footer) = &page.footer {
        let width = style.page_width_mm;
        let left = width / 2.0 - text_width_mm(footer, 8.0) / 2.0;
        layer.set_fill_color(color(style.text));
        layer.use_text(
            footer.as_str(),
            8.0,
            Mm(left as f32),
            Mm(FOOTER_BASELINE_MM as f32),
            &fonts.regular,
        );
    }
}

/// Serialize a laid-out document into PDF bytes
pub fn render_pdf(document: &PagedDocument, style: &ReportStyle) -> Result<Vec<u8>> {
    let (width, height) = (Mm(document.width_mm as f32), Mm(document.height_mm as f32));
    let (doc, cover_page, cover_layer) = PdfDocument::new(&document.title, width, height, "Layer 1");

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?,
    };

    let layer = doc.get_page(cover_page).get_layer(cover_layer);
    draw_page(&layer, &document.cover, document.height_mm, &fonts, style);

    for page in &document.pages {
        let (index, layer_index) = doc.add_page(width, height, "Layer 1");
        let layer = doc.get_page(index).get_layer(layer_index);
        draw_page(&layer, page, document.height_mm, &fonts, style);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Pdf(format!("save error: {e}")))?;
    let bytes = buf
        .into_inner()
        .map_err(|e| ReportError::Pdf(format!("buffer error: {e}")))?;

    debug!(
        "serialized PDF with {} page(s) ({} bytes)",
        document.total_pages(),
        bytes.len()
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::build_document;
    use crate::report::{ReportBundle, ReportContext};

    #[test]
    fn renders_pdf_bytes() {
        let ctx = ReportContext::new("Clinica", "05/03/2025");
        let document = build_document(&ReportBundle::default(), &ctx);
        let bytes = render_pdf(&document, &ctx.style).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
