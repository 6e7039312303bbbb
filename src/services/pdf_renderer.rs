//! Renderizado del informe de flota a PDF (A4, Helvetica)
//!
//! Las fuentes base de PDF solo cubren Latin-1 de forma fiable, así que el
//! texto se pasa a ASCII antes de escribirlo.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use rust_decimal::Decimal;

use crate::models::report::FleetReport;
use crate::utils::errors::{AppError, AppResult};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const LINE_HEIGHT: f32 = 6.0;

const ROUTE_COLUMNS: [(&str, f32); 5] = [
    ("Fecha", 0.0),
    ("Vehiculo", 25.0),
    ("Motorista", 75.0),
    ("Ruta", 115.0),
    ("Km", 165.0),
];

const REFUEL_COLUMNS: [(&str, f32); 6] = [
    ("Fecha", 0.0),
    ("Vehiculo", 25.0),
    ("Puesto", 75.0),
    ("Tienda", 110.0),
    ("Litros", 140.0),
    ("Total", 160.0),
];

/// Cursor de escritura que abre páginas nuevas al llegar al margen inferior
struct PdfWriter {
    doc: PdfDocumentReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    layer: PdfLayerReference,
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> AppResult<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::Report(format!("Error cargando fuente: {:?}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::Report(format!("Error cargando fuente: {:?}", e)))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            regular,
            bold,
            layer,
            y: PAGE_HEIGHT - MARGIN,
        })
    }

    fn ensure_space(&mut self, lines: f32) {
        if self.y - lines * LINE_HEIGHT < MARGIN {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn text(&mut self, text: &str, size: f32, bold: bool) {
        self.ensure_space(1.0);
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(to_ascii(text), size, Mm(MARGIN), Mm(self.y), font);
        self.y -= LINE_HEIGHT;
    }

    fn row(&mut self, cells: &[(String, f32)], bold: bool) {
        self.ensure_space(1.0);
        let font = if bold { &self.bold } else { &self.regular };
        for (cell, offset) in cells {
            self.layer
                .use_text(to_ascii(cell), 8.0, Mm(MARGIN + offset), Mm(self.y), font);
        }
        self.y -= LINE_HEIGHT;
    }

    fn gap(&mut self) {
        self.y -= LINE_HEIGHT / 2.0;
    }

    fn finish(self) -> AppResult<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| AppError::Report(format!("Error generando PDF: {:?}", e)))
    }
}

/// Sustituye acentos y símbolos fuera de ASCII
pub fn to_ascii(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ç' => 'c',
            'Ç' => 'C',
            'ñ' => 'n',
            'Ñ' => 'N',
            c if c.is_ascii() => c,
            _ => '-',
        })
        .collect()
}

fn money(value: Decimal) -> String {
    format!("R$ {}", value.round_dp(2))
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Genera el PDF del informe: cabecera, resumen y las dos tablas
pub fn render_pdf(report: &FleetReport) -> AppResult<Vec<u8>> {
    let mut pdf = PdfWriter::new(&report.title)?;

    pdf.text(&report.title, 16.0, true);
    pdf.text(&format!("Periodo: {} a {}", report.start, report.end), 10.0, false);
    if let Some(vehicle) = &report.vehicle {
        pdf.text(&format!("Vehiculo: {}", vehicle), 10.0, false);
    }
    pdf.gap();

    let summary = &report.summary;
    pdf.text("Resumen", 12.0, true);
    pdf.text(&format!("Rutas: {}", summary.total_routes), 10.0, false);
    pdf.text(&format!("Distancia total: {} km", summary.total_distance.round_dp(1)), 10.0, false);
    pdf.text(&format!("Litros: {}", summary.total_liters.round_dp(2)), 10.0, false);
    pdf.text(&format!("Costo total: {}", money(summary.total_cost)), 10.0, false);
    let average = summary
        .average_consumption
        .map_or_else(|| "-".to_string(), |c| format!("{:.2} km/L", c));
    pdf.text(&format!("Consumo medio: {}", average), 10.0, false);
    pdf.gap();

    pdf.text("Rutas", 12.0, true);
    pdf.row(
        &ROUTE_COLUMNS.map(|(name, offset)| (name.to_string(), offset)),
        true,
    );
    for route in &report.routes {
        pdf.row(
            &[
                (route.date.format("%d/%m/%Y").to_string(), ROUTE_COLUMNS[0].1),
                (truncate(&route.vehicle, 28), ROUTE_COLUMNS[1].1),
                (truncate(&route.driver, 22), ROUTE_COLUMNS[2].1),
                (truncate(&route.route_name, 28), ROUTE_COLUMNS[3].1),
                (route.distance.round_dp(1).to_string(), ROUTE_COLUMNS[4].1),
            ],
            false,
        );
    }
    if report.routes.is_empty() {
        pdf.text("Sin rutas en el periodo", 9.0, false);
    }
    pdf.gap();

    pdf.text("Abastecimientos", 12.0, true);
    pdf.row(
        &REFUEL_COLUMNS.map(|(name, offset)| (name.to_string(), offset)),
        true,
    );
    for refuel in &report.refuels {
        pdf.row(
            &[
                (refuel.date.format("%d/%m/%Y").to_string(), REFUEL_COLUMNS[0].1),
                (truncate(&refuel.vehicle, 28), REFUEL_COLUMNS[1].1),
                (truncate(&refuel.station, 18), REFUEL_COLUMNS[2].1),
                (truncate(&refuel.store, 16), REFUEL_COLUMNS[3].1),
                (refuel.liters.round_dp(2).to_string(), REFUEL_COLUMNS[4].1),
                (money(refuel.total_price), REFUEL_COLUMNS[5].1),
            ],
            false,
        );
    }
    if report.refuels.is_empty() {
        pdf.text("Sin abastecimientos en el periodo", 9.0, false);
    }

    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::{ReportRouteRow, ReportSummary};
    use chrono::NaiveDate;

    fn report(routes: usize) -> FleetReport {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        FleetReport {
            title: "Informe de Flota".to_string(),
            start: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            vehicle: None,
            summary: ReportSummary {
                total_routes: routes,
                total_distance: Decimal::from(120 * routes as i64),
                total_liters: Decimal::ZERO,
                total_cost: Decimal::ZERO,
                average_consumption: None,
            },
            routes: (0..routes)
                .map(|i| ReportRouteRow {
                    date,
                    vehicle: "Fiorino - ABC1D23".to_string(),
                    driver: "João".to_string(),
                    route_name: format!("Rota {}", i),
                    distance: Decimal::from(120),
                })
                .collect(),
            refuels: Vec::new(),
        }
    }

    #[test]
    fn test_pdf_starts_with_magic_bytes() {
        let bytes = render_pdf(&report(2)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_report_paginates() {
        let bytes = render_pdf(&report(120)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_to_ascii() {
        assert_eq!(to_ascii("João Ônibus → Centro"), "Joao Onibus - Centro");
    }
}
