//! PDF output for laid-out documents
//!
//! Uses the built-in Helvetica family, so no font files are embedded.

use std::io::BufWriter;

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect,
};
use tracing::{debug, instrument};

use crate::error::{PdfError, PdfResult};
use crate::layout::{Document, Element, FontStyle, Page, RectBox, Rgb, TextRun};

/// Border line width in points
const LINE_WIDTH: f32 = 0.5;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> PdfResult<Self> {
        let add = |font| {
            doc.add_builtin_font(font)
                .map_err(|e| PdfError::Pdf(e.to_string()))
        };
        Ok(Self {
            regular: add(BuiltinFont::Helvetica)?,
            bold: add(BuiltinFont::HelveticaBold)?,
            italic: add(BuiltinFont::HelveticaOblique)?,
        })
    }

    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        rgb.0 as f32 / 255.0,
        rgb.1 as f32 / 255.0,
        rgb.2 as f32 / 255.0,
        None,
    ))
}

impl Document {
    /// Serialize the document to PDF bytes
    #[instrument(skip(self), fields(title = %self.title, pages = self.pages.len()))]
    pub fn to_pdf_bytes(&self) -> PdfResult<Vec<u8>> {
        let width = Mm(self.setup.width);
        let height = Mm(self.setup.height);

        let (doc, page1, layer1) = PdfDocument::new(&self.title, width, height, "Layer 1");
        let fonts = Fonts::load(&doc)?;

        for (idx, page) in self.pages.iter().enumerate() {
            let layer = if idx == 0 {
                doc.get_page(page1).get_layer(layer1)
            } else {
                let (p, l) = doc.add_page(width, height, "Layer 1");
                doc.get_page(p).get_layer(l)
            };
            self.draw_page(&layer, page, &fonts);
        }

        let mut writer = BufWriter::new(Vec::<u8>::new());
        doc.save(&mut writer)
            .map_err(|e| PdfError::Pdf(e.to_string()))?;
        let bytes = writer
            .into_inner()
            .map_err(|e| PdfError::Io(e.into_error()))?;

        debug!(bytes = bytes.len(), "PDF written");
        Ok(bytes)
    }

    fn draw_page(&self, layer: &PdfLayerReference, page: &Page, fonts: &Fonts) {
        layer.set_outline_color(color(Rgb::BLACK));
        layer.set_outline_thickness(LINE_WIDTH);
        layer.set_fill_color(color(Rgb::BLACK));

        for element in &page.elements {
            match element {
                Element::Rect(rect) => self.draw_rect(layer, rect),
                Element::Text(run) => self.draw_text(layer, run, fonts),
            }
        }
    }

    fn draw_rect(&self, layer: &PdfLayerReference, rect: &RectBox) {
        let mode = match (rect.fill.is_some(), rect.stroke) {
            (true, true) => PaintMode::FillStroke,
            (true, false) => PaintMode::Fill,
            (false, true) => PaintMode::Stroke,
            (false, false) => return,
        };
        if let Some(fill) = rect.fill {
            layer.set_fill_color(color(fill));
        }

        // PDF origin is bottom-left
        let top = self.setup.height - rect.y;
        let shape = Rect::new(
            Mm(rect.x),
            Mm(top - rect.h),
            Mm(rect.x + rect.w),
            Mm(top),
        )
        .with_mode(mode);
        layer.add_rect(shape);

        // Text is painted with the fill colour
        layer.set_fill_color(color(Rgb::BLACK));
    }

    fn draw_text(&self, layer: &PdfLayerReference, run: &TextRun, fonts: &Fonts) {
        if run.text.is_empty() {
            return;
        }
        layer.use_text(
            run.text.as_str(),
            run.size,
            Mm(run.x),
            Mm(self.setup.height - run.y),
            fonts.get(run.style),
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::{CellOpts, DocumentBuilder, PageSetup, Rgb};

    #[test]
    fn test_pdf_bytes() {
        let mut b = DocumentBuilder::new("Test", PageSetup::a4().with_header("Title"));
        b.set_fill_color(Rgb(200, 220, 255));
        b.cell(50.0, 10.0, "Header", CellOpts::new().border().fill().ln())
            .unwrap();
        b.cell(50.0, 10.0, "Row", CellOpts::new().border().ln()).unwrap();
        let bytes = b.finish().unwrap().to_pdf_bytes().unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 200);
    }

    #[test]
    fn test_multi_page_pdf() {
        let mut b = DocumentBuilder::new("Long", PageSetup::a4());
        for i in 0..80 {
            b.cell(0.0, 10.0, &format!("Line {}", i), CellOpts::new().ln())
                .unwrap();
        }
        let doc = b.finish().unwrap();
        assert!(doc.page_count() >= 3);
        assert!(doc.to_pdf_bytes().unwrap().starts_with(b"%PDF"));
    }
}
