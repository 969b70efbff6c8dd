use log::debug;

use crate::config::{LabelKey, Labels, Rgb};
use crate::report::{assemble, filter_lines, ReportBundle, ReportContext, Section};

/// Horizontal page margin
pub const MARGIN_MM: f64 = 14.0;
/// Top of the body area on content pages, below the running header
pub const BODY_TOP_MM: f64 = 20.0;
/// Distance from the page bottom reserved for the footer
pub const BODY_BOTTOM_MM: f64 = 16.0;
/// Footer baseline, measured from the page bottom
pub const FOOTER_BASELINE_MM: f64 = 8.0;

const COVER_BAND_MM: f64 = 42.0;
const SECTION_TITLE_MM: f64 = 9.0;
const SECTION_GAP_MM: f64 = 8.0;
const CELL_PADDING_MM: f64 = 2.0;
const BODY_PT: f32 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Positioned drawing primitive. Coordinates are millimetres from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Fill {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgb,
    },
    /// `x` is the anchor for `align`, `y` the baseline
    Text {
        x: f64,
        y: f64,
        size: f32,
        bold: bool,
        color: Rgb,
        align: Align,
        content: String,
    },
    Rule {
        x1: f64,
        x2: f64,
        y: f64,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
    /// Filled in by the numbering pass once the page count is known
    pub footer: Option<String>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }
}

/// Laid-out report: an unnumbered cover page followed by numbered content pages
#[derive(Debug, Clone, PartialEq)]
pub struct PagedDocument {
    pub title: String,
    pub width_mm: f64,
    pub height_mm: f64,
    pub cover: Page,
    pub pages: Vec<Page>,
}

impl PagedDocument {
    pub fn total_pages(&self) -> usize {
        self.pages.len() + 1
    }
}

/// Rough Helvetica advance width; good enough for centering and truncation
pub(crate) fn text_width_mm(text: &str, size: f32) -> f64 {
    text.chars().count() as f64 * size as f64 * 0.5 * 0.3528
}

fn fit_text(text: &str, width: f64, size: f32) -> String {
    if text_width_mm(text, size) <= width {
        return text.to_string();
    }
    let per_char = size as f64 * 0.5 * 0.3528;
    let keep = ((width / per_char) as usize).saturating_sub(3);
    let truncated: String = text.chars().take(keep).collect();
    format!("{truncated}...")
}

fn text(x: f64, y: f64, size: f32, bold: bool, color: Rgb, align: Align, content: String) -> Element {
    Element::Text {
        x,
        y,
        size,
        bold,
        color,
        align,
        content,
    }
}

fn cover_page(bundle: &ReportBundle, ctx: &ReportContext, width: f64) -> Page {
    let style = &ctx.style;
    let mut page = Page::default();

    page.elements.push(Element::Fill {
        x: 0.0,
        y: 0.0,
        width,
        height: COVER_BAND_MM,
        color: style.primary,
    });
    page.elements.push(text(
        MARGIN_MM,
        18.0,
        22.0,
        true,
        style.header_text,
        Align::Left,
        ctx.clinic_name.clone(),
    ));
    if let Some(tagline) = &ctx.tagline {
        page.elements.push(text(
            MARGIN_MM,
            27.0,
            11.0,
            false,
            style.header_text,
            Align::Left,
            tagline.clone(),
        ));
    }
    page.elements.push(text(
        MARGIN_MM,
        36.0,
        BODY_PT,
        false,
        style.header_text,
        Align::Left,
        ctx.generated_line(),
    ));

    page.elements.push(text(
        width / 2.0,
        60.0,
        16.0,
        true,
        style.text,
        Align::Center,
        ctx.labels.get(LabelKey::ReportTitle).to_string(),
    ));
    page.elements.push(Element::Rule {
        x1: MARGIN_MM,
        x2: width - MARGIN_MM,
        y: 65.0,
        color: style.primary,
    });

    let filters = filter_lines(&bundle.filters, ctx);
    if !filters.is_empty() {
        let mut y = 76.0;
        page.elements.push(text(
            MARGIN_MM,
            y,
            10.0,
            true,
            style.text,
            Align::Left,
            ctx.labels.get(LabelKey::FiltersHeading).to_string(),
        ));
        for line in filters {
            y += 6.0;
            page.elements.push(text(
                MARGIN_MM + 4.0,
                y,
                10.0,
                false,
                style.text,
                Align::Left,
                line,
            ));
        }
    }

    page
}

/// Column widths for a table spanning the body width. The label column gets the larger share.
fn column_widths(columns: usize, body_width: f64) -> Vec<f64> {
    match columns {
        0 => Vec::new(),
        1 => vec![body_width],
        n => {
            let first = if n == 2 { body_width * 0.6 } else { body_width * 0.5 };
            let rest = (body_width - first) / (n - 1) as f64;
            std::iter::once(first)
                .chain(std::iter::repeat(rest).take(n - 1))
                .collect()
        }
    }
}

/// Flows sections down content pages, breaking before any row that would cross the bottom margin
pub(crate) struct PageFlow<'a> {
    ctx: &'a ReportContext,
    width: f64,
    height: f64,
    pages: Vec<Page>,
    cursor: f64,
}

impl<'a> PageFlow<'a> {
    pub(crate) fn new(ctx: &'a ReportContext) -> Self {
        let mut flow = Self {
            ctx,
            width: ctx.style.page_width_mm,
            height: ctx.style.page_height_mm,
            pages: Vec::new(),
            cursor: BODY_TOP_MM,
        };
        flow.new_page();
        flow
    }

    fn bottom(&self) -> f64 {
        self.height - BODY_BOTTOM_MM
    }

    fn page(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn new_page(&mut self) {
        let ctx = self.ctx;
        let style = &ctx.style;
        let mut page = Page::default();
        page.elements.push(text(
            MARGIN_MM,
            10.0,
            8.0,
            false,
            style.text,
            Align::Left,
            ctx.clinic_name.clone(),
        ));
        page.elements.push(text(
            self.width - MARGIN_MM,
            10.0,
            8.0,
            false,
            style.text,
            Align::Right,
            ctx.labels.get(LabelKey::ReportTitle).to_string(),
        ));
        page.elements.push(Element::Rule {
            x1: MARGIN_MM,
            x2: self.width - MARGIN_MM,
            y: 13.0,
            color: style.primary,
        });
        self.pages.push(page);
        self.cursor = BODY_TOP_MM;
    }

    /// Start a new page unless `needed` fits below the cursor. An empty page always accepts.
    fn ensure(&mut self, needed: f64) -> bool {
        if self.cursor + needed > self.bottom() && self.cursor > BODY_TOP_MM {
            self.new_page();
            return true;
        }
        false
    }

    pub(crate) fn section(&mut self, section: &Section) {
        let row_height = self.ctx.style.row_height_mm;
        let body_width = self.width - 2.0 * MARGIN_MM;
        let widths = column_widths(section.columns(), body_width);

        // keep the title together with the header and first row
        self.ensure(SECTION_TITLE_MM + 2.0 * row_height);
        let (color, cursor) = (self.ctx.style.primary, self.cursor);
        self.page().elements.push(text(
            MARGIN_MM,
            cursor + 6.0,
            12.0,
            true,
            color,
            Align::Left,
            section.title.clone(),
        ));
        self.cursor += SECTION_TITLE_MM;

        self.row(&section.header, &widths, true, false);
        for (i, cells) in section.rows.iter().enumerate() {
            if self.ensure(row_height) {
                self.row(&section.header, &widths, true, false);
            }
            self.row(cells, &widths, false, i % 2 == 1);
        }

        self.cursor += SECTION_GAP_MM;
    }

    fn row(&mut self, cells: &[String], widths: &[f64], header: bool, striped: bool) {
        let ctx = self.ctx;
        let style = &ctx.style;
        let row_height = style.row_height_mm;
        let top = self.cursor;
        let baseline = top + row_height * 0.68;
        let text_color = if header { style.header_text } else { style.text };

        let mut elements = Vec::new();
        if header || striped {
            elements.push(Element::Fill {
                x: MARGIN_MM,
                y: top,
                width: widths.iter().sum(),
                height: row_height,
                color: if header { style.primary } else { style.stripe },
            });
        }

        let mut x = MARGIN_MM;
        for (col, (cell, width)) in cells.iter().zip(widths).enumerate() {
            let content = fit_text(cell, width - 2.0 * CELL_PADDING_MM, BODY_PT);
            let (anchor, align) = if col == 0 {
                (x + CELL_PADDING_MM, Align::Left)
            } else if header {
                (x + width / 2.0, Align::Center)
            } else {
                (x + width - CELL_PADDING_MM, Align::Right)
            };
            elements.push(text(anchor, baseline, BODY_PT, header, text_color, align, content));
            x += width;
        }

        if !header {
            elements.push(Element::Rule {
                x1: MARGIN_MM,
                x2: MARGIN_MM + widths.iter().sum::<f64>(),
                y: top + row_height,
                color: style.stripe,
            });
        }

        self.page().elements.extend(elements);
        self.cursor += row_height;
    }

    pub(crate) fn finish(self) -> Vec<Page> {
        self.pages
    }
}

/// Footer pass: runs after layout so the denominator is the real content page count
pub fn number_pages(pages: &mut [Page], labels: &Labels) {
    let total = pages.len();
    for (i, page) in pages.iter_mut().enumerate() {
        page.footer = Some(labels.page_footer(i + 1, total));
    }
}

/// Lay the report out as a cover page plus flowing content pages
pub fn build_document(bundle: &ReportBundle, ctx: &ReportContext) -> PagedDocument {
    let width = ctx.style.page_width_mm;
    let cover = cover_page(bundle, ctx, width);

    let mut flow = PageFlow::new(ctx);
    for section in assemble(bundle, ctx) {
        flow.section(&section);
    }
    let mut pages = flow.finish();
    number_pages(&mut pages, &ctx.labels);

    debug!("laid out document with {} content page(s)", pages.len());

    PagedDocument {
        title: ctx.labels.get(LabelKey::ReportTitle).to_string(),
        width_mm: width,
        height_mm: ctx.style.page_height_mm,
        cover,
        pages,
    }
}
