//! Page layout builder
//!
//! A cursor-based API in the style of classic PDF report writers: cells are
//! placed left to right, `ln` moves to the next row, and a cell that would
//! cross the bottom margin starts a new page. Every page gets the configured
//! header and a page-number footer.
//!
//! Coordinates are millimetres measured from the top-left corner of the page.

use crate::encoding::{ensure_winansi, text_width, wrap_to_width};
use crate::error::PdfResult;

/// Points to millimetres
const PT_TO_MM: f32 = 25.4 / 72.0;

/// Horizontal padding between a cell edge and its text
pub const CELL_PADDING: f32 = 1.0;

/// Font variant (Helvetica family)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
}

/// Horizontal text alignment inside a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

/// Cell drawing options
#[derive(Debug, Clone, Copy, Default)]
pub struct CellOpts {
    pub border: bool,
    pub fill: bool,
    pub align: Align,
    /// Move to the start of the next row after this cell
    pub line_break: bool,
}

impl CellOpts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a frame around the cell
    pub fn border(mut self) -> Self {
        self.border = true;
        self
    }

    /// Paint the background with the current fill colour
    pub fn fill(mut self) -> Self {
        self.fill = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Break the line after the cell
    pub fn ln(mut self) -> Self {
        self.line_break = true;
        self
    }
}

/// Page geometry and decoration
#[derive(Debug, Clone)]
pub struct PageSetup {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    /// Distance from the bottom edge that triggers a page break
    pub break_margin: f32,
    /// Title repeated at the top of every page
    pub header: Option<String>,
    /// Print `Page N` at the bottom of every page
    pub page_numbers: bool,
}

impl PageSetup {
    /// Portrait A4 with 10mm margins and a 20mm break margin
    pub fn a4() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin_left: 10.0,
            margin_top: 10.0,
            margin_right: 10.0,
            break_margin: 20.0,
            header: None,
            page_numbers: true,
        }
    }

    pub fn with_header(mut self, title: impl Into<String>) -> Self {
        self.header = Some(title.into());
        self
    }

    /// Lowest y a cell may reach before a page break
    pub fn break_trigger(&self) -> f32 {
        self.height - self.break_margin
    }

    /// Usable width between the side margins
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::a4()
    }
}

/// A positioned run of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    /// Baseline position
    pub y: f32,
    /// Top of the cell the text sits in; runs on one row share it
    pub row_top: f32,
    pub size: f32,
    pub style: FontStyle,
    pub text: String,
}

/// A rectangle, stroked and/or filled
#[derive(Debug, Clone, PartialEq)]
pub struct RectBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub stroke: bool,
    pub fill: Option<Rgb>,
}

/// Drawing element
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextRun),
    Rect(RectBox),
}

/// One laid-out page
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub number: usize,
    pub elements: Vec<Element>,
}

impl Page {
    /// Text of each row, cells joined by two spaces, top to bottom in
    /// the order the rows were written
    pub fn text_lines(&self) -> Vec<String> {
        let mut rows: Vec<(u32, Vec<&str>)> = Vec::new();
        for element in &self.elements {
            if let Element::Text(run) = element {
                let key = run.row_top.to_bits();
                match rows.iter_mut().find(|(k, _)| *k == key) {
                    Some((_, cells)) => cells.push(&run.text),
                    None => rows.push((key, vec![&run.text])),
                }
            }
        }
        rows.into_iter().map(|(_, cells)| cells.join("  ")).collect()
    }
}

/// A finished, paginated document
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    pub setup: PageSetup,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Text lines of all pages in order
    pub fn text_lines(&self) -> Vec<String> {
        self.pages.iter().flat_map(|p| p.text_lines()).collect()
    }
}

/// Cursor-based document builder
pub struct DocumentBuilder {
    title: String,
    setup: PageSetup,
    pages: Vec<Page>,
    x: f32,
    y: f32,
    style: FontStyle,
    size: f32,
    fill_color: Rgb,
    /// Set while drawing header/footer; suppresses page breaks
    in_decoration: bool,
}

impl DocumentBuilder {
    /// Create a builder; the first page is opened on first use
    pub fn new(title: impl Into<String>, setup: PageSetup) -> Self {
        let x = setup.margin_left;
        let y = setup.margin_top;
        Self {
            title: title.into(),
            setup,
            pages: Vec::new(),
            x,
            y,
            style: FontStyle::Regular,
            size: 12.0,
            fill_color: Rgb::WHITE,
            in_decoration: false,
        }
    }

    /// Current page number (0 before the first page)
    pub fn page_no(&self) -> usize {
        self.pages.len()
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_y(&mut self, y: f32) -> &mut Self {
        self.y = y;
        self.x = self.setup.margin_left;
        self
    }

    pub fn set_font(&mut self, style: FontStyle, size: f32) -> &mut Self {
        self.style = style;
        self.size = size;
        self
    }

    pub fn set_fill_color(&mut self, color: Rgb) -> &mut Self {
        self.fill_color = color;
        self
    }

    /// Start a new page, closing the current one
    pub fn add_page(&mut self) -> PdfResult<&mut Self> {
        if !self.pages.is_empty() {
            self.footer()?;
        }

        let number = self.pages.len() + 1;
        self.pages.push(Page {
            number,
            elements: Vec::new(),
        });
        self.x = self.setup.margin_left;
        self.y = self.setup.margin_top;

        self.header()?;
        Ok(self)
    }

    /// Line break: back to the left margin and down `h`
    pub fn ln(&mut self, h: f32) -> &mut Self {
        self.x = self.setup.margin_left;
        self.y += h;
        self
    }

    /// Place one cell at the cursor
    ///
    /// A width of `0.0` extends the cell to the right margin.
    pub fn cell(&mut self, w: f32, h: f32, text: &str, opts: CellOpts) -> PdfResult<&mut Self> {
        ensure_winansi(text)?;

        if self.pages.is_empty() {
            self.add_page()?;
        }
        if !self.in_decoration && self.y + h > self.setup.break_trigger() {
            let x = self.x;
            self.add_page()?;
            self.x = x;
        }

        let w = if w == 0.0 {
            self.setup.width - self.setup.margin_right - self.x
        } else {
            w
        };

        if opts.border || opts.fill {
            let rect = RectBox {
                x: self.x,
                y: self.y,
                w,
                h,
                stroke: opts.border,
                fill: opts.fill.then_some(self.fill_color),
            };
            self.push(Element::Rect(rect));
        }

        self.place_text(self.x, self.y, w, h, text, opts.align);

        if opts.line_break {
            self.ln(h);
        } else {
            self.x += w;
        }
        Ok(self)
    }

    /// Place text wrapped over as many rows as needed
    ///
    /// Leaves the cursor at the left margin below the last row.
    pub fn multi_cell(&mut self, w: f32, h: f32, text: &str, opts: CellOpts) -> PdfResult<&mut Self> {
        ensure_winansi(text)?;

        let w = if w == 0.0 {
            self.setup.width - self.setup.margin_right - self.x
        } else {
            w
        };
        let left = self.x;
        let lines = wrap_to_width(text, w - 2.0 * CELL_PADDING, self.style, self.size);

        for line in lines {
            self.x = left;
            self.cell(w, h, &line, CellOpts { line_break: false, ..opts })?;
            self.y += h;
        }
        self.x = self.setup.margin_left;
        Ok(self)
    }

    /// Place one table row whose cells wrap inside their widths
    ///
    /// The row is as tall as its longest cell (`line_h` per wrapped line) and
    /// every frame spans the full row height. The whole row moves to a new
    /// page if it would cross the bottom margin.
    pub fn row(&mut self, cells: &[(f32, &str)], line_h: f32, opts: CellOpts) -> PdfResult<&mut Self> {
        for (_, text) in cells {
            ensure_winansi(text)?;
        }
        if self.pages.is_empty() {
            self.add_page()?;
        }

        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .map(|(w, text)| wrap_to_width(text, w - 2.0 * CELL_PADDING, self.style, self.size))
            .collect();
        let count = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let h = line_h * count as f32;

        if !self.in_decoration && self.y + h > self.setup.break_trigger() {
            let x = self.x;
            self.add_page()?;
            self.x = x;
        }

        let top = self.y;
        for ((w, _), lines) in cells.iter().zip(&wrapped) {
            if opts.border || opts.fill {
                let rect = RectBox {
                    x: self.x,
                    y: top,
                    w: *w,
                    h,
                    stroke: opts.border,
                    fill: opts.fill.then_some(self.fill_color),
                };
                self.push(Element::Rect(rect));
            }
            for (k, line) in lines.iter().enumerate() {
                // Continuation lines only carry text
                if k > 0 && line.is_empty() {
                    continue;
                }
                self.place_text(self.x, top + k as f32 * line_h, *w, line_h, line, opts.align);
            }
            self.x += w;
        }

        if opts.line_break {
            self.x = self.setup.margin_left;
            self.y = top + h;
        }
        Ok(self)
    }

    /// Close the last page and return the document
    pub fn finish(mut self) -> PdfResult<Document> {
        if self.pages.is_empty() {
            self.add_page()?;
        }
        self.footer()?;

        Ok(Document {
            title: self.title,
            setup: self.setup,
            pages: self.pages,
        })
    }

    /// Text run inside the box at (`x`, `top`) of size `w` x `h`
    fn place_text(&mut self, x: f32, top: f32, w: f32, h: f32, text: &str, align: Align) {
        let tw = text_width(text, self.style, self.size);
        let tx = match align {
            Align::Left => x + CELL_PADDING,
            Align::Center => x + (w - tw) / 2.0,
            Align::Right => x + w - CELL_PADDING - tw,
        };
        let run = TextRun {
            x: tx,
            y: top + 0.5 * h + 0.3 * self.size * PT_TO_MM,
            row_top: top,
            size: self.size,
            style: self.style,
            text: text.to_string(),
        };
        self.push(Element::Text(run));
    }

    fn push(&mut self, element: Element) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    fn header(&mut self) -> PdfResult<()> {
        let Some(title) = self.setup.header.clone() else {
            return Ok(());
        };
        let saved = (self.style, self.size);

        self.in_decoration = true;
        self.set_font(FontStyle::Bold, 16.0);
        self.cell(0.0, 10.0, &title, CellOpts::new().align(Align::Center).ln())?;
        self.ln(5.0);
        self.in_decoration = false;

        self.set_font(saved.0, saved.1);
        Ok(())
    }

    fn footer(&mut self) -> PdfResult<()> {
        if !self.setup.page_numbers {
            return Ok(());
        }
        let saved = (self.style, self.size, self.x, self.y);

        self.in_decoration = true;
        self.set_y(self.setup.height - 15.0);
        self.set_font(FontStyle::Italic, 8.0);
        let label = format!("Page {}", self.page_no());
        self.cell(0.0, 10.0, &label, CellOpts::new().align(Align::Center))?;
        self.in_decoration = false;

        self.set_font(saved.0, saved.1);
        self.x = saved.2;
        self.y = saved.3;
        Ok(())
    }
}
