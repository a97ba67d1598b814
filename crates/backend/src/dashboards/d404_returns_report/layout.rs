//! Содержимое PDF-отчета без привязки к конкретной библиотеке отрисовки

use chrono::{DateTime, Utc};
use contracts::dashboards::d402_returns_intelligence::dto::DashboardSummary;
use contracts::domain::a025_return_judgment::aggregate::{Decision, JudgmentRecord};
use contracts::enums::risk_tier::RiskTier;

use crate::shared::format::{format_inr, truncate_chars};

pub const REPORT_TITLE: &str = "Returns Intelligence Report";
pub const REPORT_FOOTER: &str =
    "This report is auto-generated by Reklaim Returns Intelligence System.";
pub const ROWS_PER_PAGE: usize = 20;
pub const TABLE_HEADERS: [&str; 6] = ["Customer", "Shipment ID", "Amount", "Location", "Risk", "Decision"];

const CUSTOMER_WIDTH: usize = 15;
const SHIPMENT_WIDTH: usize = 12;
const LOCATION_WIDTH: usize = 10;

/// Цветовая роль текста
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Text,
    Danger,
    Warning,
    Success,
}

/// Фон строки таблицы; подсветка высокого риска перекрывает чередование
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShading {
    Plain,
    Striped,
    HighRisk,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Kpi {
    pub label: &'static str,
    pub value: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub customer: String,
    pub shipment: String,
    pub amount: String,
    pub location: String,
    pub risk_label: &'static str,
    pub risk_tone: Tone,
    pub decision_label: String,
    pub decision_tone: Tone,
    pub shading: RowShading,
}

/// Страница таблицы; заголовок таблицы повторяется на каждой
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportPage {
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: &'static str,
    pub generated_on: String,
    /// 2 ряда по 3 показателя
    pub kpis: [[Kpi; 3]; 2],
    pub pages: Vec<ReportPage>,
    pub footer: &'static str,
}

pub fn amount_label(amount: f64) -> String {
    format!("Rs. {}", format_inr(amount.round()))
}

fn risk_cell(tier: RiskTier) -> (&'static str, Tone) {
    let tone = match tier {
        RiskTier::High => Tone::Danger,
        RiskTier::Medium => Tone::Warning,
        RiskTier::Low => Tone::Success,
    };
    (tier.short_label(), tone)
}

/// "reject" -> "Reject"; без решения - "Pending"
fn decision_cell(decision: Option<&Decision>) -> (String, Tone) {
    let Some(decision) = decision else {
        return ("Pending".to_string(), Tone::Warning);
    };
    let tone = match decision {
        Decision::Reject => Tone::Danger,
        Decision::Approve => Tone::Success,
        _ => Tone::Warning,
    };
    let raw = decision.as_str();
    let mut chars = raw.chars();
    let label = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Pending".to_string(),
    };
    (label, tone)
}

fn build_row(record: &JudgmentRecord, index: usize) -> ReportRow {
    let shading = if record.is_high_risk() {
        RowShading::HighRisk
    } else if index % 2 == 0 {
        RowShading::Striped
    } else {
        RowShading::Plain
    };
    let (risk_label, risk_tone) = risk_cell(record.risk_tier());
    let (decision_label, decision_tone) = decision_cell(record.decision.as_ref());

    ReportRow {
        customer: truncate_chars(&record.user_name, CUSTOMER_WIDTH),
        shipment: record
            .shipment_id
            .as_deref()
            .map(|id| truncate_chars(id, SHIPMENT_WIDTH))
            .unwrap_or_else(|| "N/A".to_string()),
        amount: amount_label(record.refund_amount),
        location: truncate_chars(&record.delivery_city, LOCATION_WIDTH),
        risk_label,
        risk_tone,
        decision_label,
        decision_tone,
        shading,
    }
}

fn build_kpis(summary: &DashboardSummary) -> [[Kpi; 3]; 2] {
    [
        [
            Kpi {
                label: "Total Returns Analyzed",
                value: summary.analyzed_returns.to_string(),
                tone: Tone::Primary,
            },
            Kpi {
                label: "Total Value at Risk",
                value: amount_label(summary.total_value),
                tone: Tone::Success,
            },
            Kpi {
                label: "Avg Fraud Score",
                value: format!("{:.1}/10", summary.avg_fraud_score),
                tone: Tone::Warning,
            },
        ],
        [
            Kpi {
                label: "High Risk Cases",
                value: summary.high_risk_count.to_string(),
                tone: Tone::Danger,
            },
            Kpi {
                label: "Rejection Rate",
                value: format!("{}%", summary.avg_return_rate),
                tone: Tone::Danger,
            },
            Kpi {
                label: "Approved / Review / Reject",
                value: format!(
                    "{} / {} / {}",
                    summary.approve_count, summary.review_count, summary.reject_count
                ),
                tone: Tone::Text,
            },
        ],
    ]
}

/// Собрать содержимое отчета; всегда хотя бы одна страница таблицы
pub fn build_report(
    records: &[JudgmentRecord],
    summary: &DashboardSummary,
    generated_at: DateTime<Utc>,
) -> ReportDocument {
    let rows: Vec<ReportRow> = records
        .iter()
        .enumerate()
        .map(|(index, record)| build_row(record, index))
        .collect();

    let mut pages: Vec<ReportPage> = rows
        .chunks(ROWS_PER_PAGE)
        .map(|chunk| ReportPage {
            rows: chunk.to_vec(),
        })
        .collect();
    if pages.is_empty() {
        pages.push(ReportPage::default());
    }

    ReportDocument {
        title: REPORT_TITLE,
        generated_on: format!(
            "Generated on {}",
            generated_at.format("%A, %-d %B %Y at %H:%M UTC")
        ),
        kpis: build_kpis(summary),
        pages,
        footer: REPORT_FOOTER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d402_returns_intelligence::service::summarize;
    use crate::domain::a025_return_judgment::mapper::map_all;
    use chrono::TimeZone;
    use serde_json::{json, Map, Value};

    fn report_for(values: Vec<Value>) -> ReportDocument {
        let records = map_all(&values);
        let summary = summarize(&records, &Map::new());
        let at = Utc.with_ymd_and_hms(2026, 3, 7, 9, 30, 0).unwrap();
        build_report(&records, &summary, at)
    }

    #[test]
    fn test_empty_report_has_one_page() {
        let report = report_for(vec![]);
        assert_eq!(report.pages.len(), 1);
        assert!(report.pages[0].rows.is_empty());
        assert_eq!(report.kpis[0][0].value, "0");
        assert_eq!(report.kpis[1][1].value, "0%");
        assert_eq!(report.generated_on, "Generated on Saturday, 7 March 2026 at 09:30 UTC");
    }

    #[test]
    fn test_pagination() {
        let values: Vec<Value> = (0..45).map(|i| json!({ "shipment_id": format!("S{}", i) })).collect();
        let report = report_for(values);
        let sizes: Vec<usize> = report.pages.iter().map(|p| p.rows.len()).collect();
        assert_eq!(sizes, vec![20, 20, 5]);
        assert_eq!(report.pages[1].rows[0].shipment, "S20");
    }

    #[test]
    fn test_row_shading_and_highlight() {
        let report = report_for(vec![
            json!({ "shipment_id": "S0" }),
            json!({ "shipment_id": "S1" }),
            json!({ "shipment_id": "S2" }),
            json!({ "shipment_id": "S3", "key_flags": ["a", "b", "c"] }),
        ]);
        let shading: Vec<RowShading> = report.pages[0].rows.iter().map(|r| r.shading).collect();
        assert_eq!(
            shading,
            vec![RowShading::Striped, RowShading::Plain, RowShading::Striped, RowShading::HighRisk]
        );
    }

    #[test]
    fn test_row_cells() {
        let report = report_for(vec![
            json!({
                "shipment_id": "SHIPMENT-0000012345",
                "user_name": "Venkataraghavan Subramaniam",
                "delivery_state": "Andhra Pradesh",
                "refund_amount": 123456,
                "key_flags": ["a"],
                "decision": "manual_review"
            }),
            json!({ "decision": "reject", "key_flags": ["a", "b", "c"] }),
            json!({ "decision": "approve" }),
        ]);
        let rows = &report.pages[0].rows;
        assert_eq!(rows[0].customer, "Venkataraghavan");
        assert_eq!(rows[0].shipment, "SHIPMENT-000");
        assert_eq!(rows[0].location, "Andhra Pra");
        assert_eq!(rows[0].amount, "Rs. 1,23,456");
        assert_eq!((rows[0].risk_label, rows[0].risk_tone), ("Med", Tone::Warning));
        assert_eq!(rows[0].decision_label, "Manual_review");
        assert_eq!(rows[0].decision_tone, Tone::Warning);

        assert_eq!(rows[1].shipment, "N/A");
        assert_eq!((rows[1].risk_label, rows[1].risk_tone), ("High", Tone::Danger));
        assert_eq!((rows[1].decision_label.as_str(), rows[1].decision_tone), ("Reject", Tone::Danger));

        assert_eq!((rows[2].risk_label, rows[2].risk_tone), ("Low", Tone::Success));
        assert_eq!((rows[2].decision_label.as_str(), rows[2].decision_tone), ("Approve", Tone::Success));
    }

    #[test]
    fn test_kpis_follow_summary() {
        let report = report_for(vec![
            json!({ "decision": "reject", "refund_amount": 1500, "fraud_score": 8, "key_flags": ["a", "b", "c"] }),
            json!({ "decision": "approve", "refund_amount": 300, "fraud_score": 2 }),
        ]);
        assert_eq!(report.kpis[0][0].value, "2");
        assert_eq!(report.kpis[0][1].value, "Rs. 1,800");
        assert_eq!(report.kpis[0][2].value, "5.0/10");
        assert_eq!(report.kpis[1][0].value, "1");
        assert_eq!(report.kpis[1][1].value, "50%");
        assert_eq!(report.kpis[1][2].value, "1 / 0 / 1");
        assert!(report.pages[0].rows[1].decision_label == "Approve");
    }
}
