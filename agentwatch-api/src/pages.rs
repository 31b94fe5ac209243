// ---------------------------------------------------------------------------
// Server-rendered pages
// ---------------------------------------------------------------------------
//
// Self-contained HTML with inline CSS; the surf page pulls its data from the
// JSON API with a small inline script.

use std::fmt::Write;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use agentwatch_forecast::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use agentwatch_types::Finding;

use crate::error::ApiError;
use crate::routes::compute_stats;
use crate::state::AppState;

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn risk_class(score: u8) -> &'static str {
    if score >= 90 {
        "risk-critical"
    } else if score > 70 {
        "risk-high"
    } else if score > 50 {
        "risk-medium"
    } else {
        "risk-low"
    }
}

const PAGE_CSS: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#0f1419;color:#e6e6e6}\
header{padding:16px 24px;background:#161b22;border-bottom:1px solid #2d333b}\
h1{font-size:20px;margin:0}main{padding:24px}\
.stats{display:flex;gap:24px;margin-bottom:24px}\
.stat{background:#161b22;border:1px solid #2d333b;border-radius:8px;padding:12px 20px}\
.stat .value{font-size:24px;font-weight:600}.stat .label{font-size:12px;color:#8b949e}\
table{width:100%;border-collapse:collapse;background:#161b22;border:1px solid #2d333b}\
th,td{padding:8px 12px;text-align:left;border-bottom:1px solid #2d333b;font-size:14px}\
th{color:#8b949e;font-weight:500}\
.risk-critical{color:#f85149;font-weight:600}.risk-high{color:#db6d28;font-weight:600}\
.risk-medium{color:#d29922}.risk-low{color:#3fb950}\
.tag{display:inline-block;background:#21262d;border-radius:4px;padding:1px 6px;margin-right:4px;font-size:12px}";

/// GET /: the findings dashboard.
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let findings = state.store.load()?;
    let stats = compute_stats(&findings, state.scanner.has_credentials());

    let mut out = String::with_capacity(16_384);
    let _ = write_dashboard(&mut out, &findings, stats.total, stats.high_risk, stats.avg_risk);
    Ok(Html(out))
}

fn write_dashboard(
    out: &mut String,
    findings: &[Finding],
    total: usize,
    high_risk: usize,
    avg_risk: f64,
) -> std::fmt::Result {
    write!(
        out,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>agentwatch</title><style>{PAGE_CSS}</style></head><body>\
         <header><h1>agentwatch &mdash; exposed installation dashboard</h1></header><main>"
    )?;

    write!(
        out,
        "<div class=\"stats\">\
         <div class=\"stat\"><div class=\"value\">{total}</div><div class=\"label\">findings</div></div>\
         <div class=\"stat\"><div class=\"value\">{high_risk}</div><div class=\"label\">high risk</div></div>\
         <div class=\"stat\"><div class=\"value\">{avg_risk:.1}</div><div class=\"label\">average risk</div></div>\
         </div>"
    )?;

    out.push_str(
        "<table><thead><tr><th>Address</th><th>Location</th><th>Service</th>\
         <th>Vulnerabilities</th><th>Risk</th><th>Time to compromise</th></tr></thead><tbody>",
    );

    for f in findings {
        let location = match (&f.location.city, &f.location.country) {
            (Some(city), Some(country)) => format!("{city}, {country}"),
            (None, Some(country)) => country.clone(),
            (Some(city), None) => city.clone(),
            (None, None) => "Unknown".to_string(),
        };
        let tags: String = f
            .vulns
            .iter()
            .map(|v| format!("<span class=\"tag\">{}</span>", html_escape(v)))
            .collect();
        write!(
            out,
            "<tr><td>{ip}:{port}</td><td>{location}</td><td>{service}</td>\
             <td>{tags}</td><td class=\"{class}\">{score}</td><td>{ttc}</td></tr>",
            ip = html_escape(&f.ip),
            port = f.port,
            location = html_escape(&location),
            service = html_escape(&f.service),
            class = risk_class(f.risk_score),
            score = f.risk_score,
            ttc = f.time_to_compromise(),
        )?;
    }

    out.push_str("</tbody></table></main></body></html>");
    Ok(())
}

/// GET /surf: the forecast page. Data loads client-side from the JSON API.
pub async fn surf() -> Html<String> {
    let mut out = String::with_capacity(8_192);
    let _ = write!(
        out,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>agentwatch &mdash; wind forecast</title><style>{PAGE_CSS}\
         #hourly-scroll{{display:flex;gap:8px;overflow-x:auto;padding:8px 0}}\
         .hour{{background:#161b22;border:1px solid #2d333b;border-radius:8px;padding:8px 12px;min-width:80px;text-align:center}}\
         </style></head><body>\
         <header><h1>Wind forecast</h1></header><main>\
         <div class=\"stats\">\
         <div class=\"stat\"><div class=\"value\" id=\"best-time\">&ndash;</div><div class=\"label\">best time</div></div>\
         <div class=\"stat\"><div class=\"value\" id=\"wind-summary\">&ndash;</div><div class=\"label\">wind</div></div>\
         </div>\
         <div id=\"hourly-scroll\"></div>\
         <script>\
         fetch('/api/surf/forecast?lat={lat}&lon={lon}')\
           .then(function(r){{return r.json();}})\
           .then(function(data){{\
             if (data.best_time) {{\
               document.getElementById('best-time').textContent = data.best_time.time;\
               document.getElementById('wind-summary').textContent = data.best_time.wind_speed + ' km/h';\
             }}\
             var scroll = document.getElementById('hourly-scroll');\
             (data.hours || []).forEach(function(h){{\
               var div = document.createElement('div');\
               div.className = 'hour';\
               div.textContent = h.time.slice(11) + ' \\u00b7 ' + h.wind_speed + ' km/h \\u00b7 ' + h.score;\
               scroll.appendChild(div);\
             }});\
           }});\
         </script></main></body></html>",
        lat = DEFAULT_LATITUDE,
        lon = DEFAULT_LONGITUDE,
    );
    Html(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(html_escape("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
    }

    #[test]
    fn risk_classes_bucket_correctly() {
        assert_eq!(risk_class(95), "risk-critical");
        assert_eq!(risk_class(80), "risk-high");
        assert_eq!(risk_class(60), "risk-medium");
        assert_eq!(risk_class(50), "risk-low");
    }
}
