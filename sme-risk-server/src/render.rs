//! HTML page
//!
//! One page: the input form plus, after a submission, the verdict block.
//! Everything user-supplied is escaped before it reaches the markup.

use sme_risk_core::logic::features::FEATURE_LAYOUT;
use sme_risk_core::Severity;

use crate::models::PredictionResponse;

/// Display label for each layout feature
fn field_label(name: &str) -> &'static str {
    match name {
        "working_capital_to_total_assets" => "Working Capital / Total Assets",
        "retained_earnings_to_total_assets" => "Retained Earnings / Total Assets",
        "ebit_to_total_assets" => "EBIT / Total Assets",
        "sales_to_total_assets" => "Sales / Total Assets",
        "debt_to_total_assets" => "Total Debt / Total Assets",
        _ => "Ratio",
    }
}

fn alert_style(severity: Severity) -> &'static str {
    match severity {
        Severity::Danger => "background:#f8d7da;color:#842029;border-color:#f5c2c7",
        Severity::Success => "background:#d1e7dd;color:#0f5132;border-color:#badbcc",
        Severity::Warning => "background:#fff3cd;color:#664d03;border-color:#ffecb5",
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the page. `submitted` refills the form after a POST.
pub fn page(submitted: &[(String, String)], result: Option<&PredictionResponse>) -> String {
    let mut inputs = String::new();
    for name in FEATURE_LAYOUT {
        let value = submitted
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| escape(value))
            .unwrap_or_default();

        inputs.push_str(&format!(
            r#"      <label for="{name}">{label}</label>
      <input type="text" id="{name}" name="{name}" value="{value}" required>
"#,
            name = name,
            label = field_label(name),
            value = value,
        ));
    }

    let verdict = result.map(render_result).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>SME Bankruptcy Risk</title>
  <style>
    body {{ font-family: sans-serif; max-width: 640px; margin: 2rem auto; }}
    label {{ display: block; margin-top: .75rem; }}
    input {{ width: 100%; padding: .4rem; }}
    button {{ margin-top: 1rem; padding: .5rem 1.5rem; }}
    .alert {{ margin-top: 1.5rem; padding: 1rem; border: 1px solid; border-radius: 4px; }}
  </style>
</head>
<body>
  <h1>SME Bankruptcy Risk</h1>
  <form method="post" action="/predict">
{inputs}      <button type="submit">Predict</button>
  </form>
{verdict}</body>
</html>
"#,
        inputs = inputs,
        verdict = verdict,
    )
}

fn render_result(result: &PredictionResponse) -> String {
    format!(
        r#"  <div class="alert alert-{color}" style="{style}">
    <h2>{text}</h2>
    <p>{explanation}</p>
  </div>
"#,
        color = result.alert_color.as_str(),
        style = alert_style(result.alert_color),
        text = escape(&result.prediction_text),
        explanation = escape(&result.explanation),
    )
}
