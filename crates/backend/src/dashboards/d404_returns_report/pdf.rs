use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};

use super::layout::{ReportDocument, ReportRow, RowShading, Tone, TABLE_HEADERS};

// A4, все координаты в мм от нижнего левого угла
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 18.0;
const TABLE_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const HEADER_HEIGHT: f32 = 9.0;
const ROW_HEIGHT: f32 = 7.8;
const COLUMN_WIDTHS: [f32; 6] = [32.0, 32.0, 25.0, 28.0, 18.0, 25.0];
const KPI_COLUMNS: [f32; 3] = [25.0, 78.0, 131.0];

fn rgb(hex: u32) -> Color {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    Color::Rgb(Rgb::new(channel(16), channel(8), channel(0), None))
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Primary => rgb(0x6366f1),
        Tone::Text => rgb(0x1f2937),
        Tone::Danger => rgb(0xef4444),
        Tone::Warning => rgb(0xf59e0b),
        Tone::Success => rgb(0x22c55e),
    }
}

const MUTED: u32 = 0x6b7280;
const PANEL: u32 = 0xf8fafc;
const TABLE_HEADER: u32 = 0xe2e8f0;
const HIGH_RISK_ROW: u32 = 0xfef2f2;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn fill_rect(layer: &PdfLayerReference, color: u32, x: f32, top: f32, width: f32, height: f32) {
    layer.set_fill_color(rgb(color));
    layer.add_rect(Rect::new(Mm(x), Mm(top - height), Mm(x + width), Mm(top)));
}

fn text(layer: &PdfLayerReference, value: &str, color: Color, size: f32, x: f32, y: f32, font: &IndirectFontRef) {
    layer.set_fill_color(color);
    layer.use_text(value, size, Mm(x), Mm(y), font);
}

/// Заголовок таблицы, возвращает y под ним
fn draw_table_header(layer: &PdfLayerReference, fonts: &Fonts, top: f32) -> f32 {
    fill_rect(layer, TABLE_HEADER, MARGIN, top, TABLE_WIDTH, HEADER_HEIGHT);
    let mut x = MARGIN;
    for (header, width) in TABLE_HEADERS.iter().zip(COLUMN_WIDTHS) {
        text(layer, header, tone_color(Tone::Text), 9.0, x + 2.0, top - 6.0, &fonts.bold);
        x += width;
    }
    top - HEADER_HEIGHT
}

fn draw_row(layer: &PdfLayerReference, fonts: &Fonts, row: &ReportRow, top: f32) {
    match row.shading {
        RowShading::HighRisk => fill_rect(layer, HIGH_RISK_ROW, MARGIN, top, TABLE_WIDTH, ROW_HEIGHT),
        RowShading::Striped => fill_rect(layer, PANEL, MARGIN, top, TABLE_WIDTH, ROW_HEIGHT),
        RowShading::Plain => {}
    }

    let baseline = top - 5.2;
    let cells: [(&str, Tone, &IndirectFontRef); 6] = [
        (row.customer.as_str(), Tone::Text, &fonts.regular),
        (row.shipment.as_str(), Tone::Text, &fonts.regular),
        (row.amount.as_str(), Tone::Text, &fonts.regular),
        (row.location.as_str(), Tone::Text, &fonts.regular),
        (row.risk_label, row.risk_tone, &fonts.bold),
        (row.decision_label.as_str(), row.decision_tone, &fonts.bold),
    ];
    let mut x = MARGIN;
    for ((value, tone, font), width) in cells.into_iter().zip(COLUMN_WIDTHS) {
        text(layer, value, tone_color(tone), 8.0, x + 2.0, baseline, font);
        x += width;
    }
}

/// Первая страница: заголовок и KPI, возвращает y начала таблицы
fn draw_summary(layer: &PdfLayerReference, fonts: &Fonts, report: &ReportDocument) -> f32 {
    text(layer, report.title, tone_color(Tone::Primary), 24.0, 45.0, PAGE_HEIGHT - 28.0, &fonts.bold);
    text(layer, &report.generated_on, rgb(MUTED), 11.0, 45.0, PAGE_HEIGHT - 37.0, &fonts.regular);
    text(layer, "Executive Summary", tone_color(Tone::Text), 16.0, MARGIN, PAGE_HEIGHT - 52.0, &fonts.bold);

    let panel_top = PAGE_HEIGHT - 57.0;
    fill_rect(layer, PANEL, MARGIN, panel_top, TABLE_WIDTH, 42.0);
    for (row_index, kpi_row) in report.kpis.iter().enumerate() {
        let label_y = panel_top - 8.0 - row_index as f32 * 18.0;
        for (kpi, x) in kpi_row.iter().zip(KPI_COLUMNS) {
            text(layer, kpi.label, rgb(MUTED), 10.0, x, label_y, &fonts.regular);
            text(layer, &kpi.value, tone_color(kpi.tone), 16.0, x, label_y - 7.0, &fonts.bold);
        }
    }

    let section_y = panel_top - 52.0;
    text(layer, "Returns Details", tone_color(Tone::Text), 16.0, MARGIN, section_y, &fonts.bold);
    section_y - 5.0
}

/// Отрисовать отчет в PDF
///
/// Встроенные шрифты PDF не содержат знака рупии, суммы уже в виде "Rs. ...".
pub fn render_pdf(report: &ReportDocument) -> anyhow::Result<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(report.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| anyhow::anyhow!("Failed to load font: {:?}", e))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| anyhow::anyhow!("Failed to load font: {:?}", e))?,
    };

    let page_count = report.pages.len();
    for (page_index, page) in report.pages.iter().enumerate() {
        let layer = if page_index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            doc.get_page(page_ref).get_layer(layer_ref)
        };

        let table_top = if page_index == 0 {
            draw_summary(&layer, &fonts, report)
        } else {
            PAGE_HEIGHT - MARGIN
        };

        let mut row_top = draw_table_header(&layer, &fonts, table_top);
        for row in &page.rows {
            draw_row(&layer, &fonts, row, row_top);
            row_top -= ROW_HEIGHT;
        }

        if page_index + 1 == page_count {
            text(&layer, report.footer, rgb(MUTED), 9.0, 42.0, MARGIN, &fonts.regular);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| anyhow::anyhow!("Failed to encode PDF: {:?}", e))
}
