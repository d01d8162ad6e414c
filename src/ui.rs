use crate::advice::{advice_for_day, AdvicePolicy};
use crate::charts::{build_charts, DashboardCharts};
use crate::errors::DataError;
use crate::models::{ActivityDataset, AdviceMessage, DerivedStatistics, InsightSummary, Trend};
use crate::state::Page;
use crate::stats::{compute, insights};
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Ok,
    Error,
}

/// One-line feedback shown under the page header after a form action.
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Ok,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

pub struct PageContext<'a> {
    pub dataset: &'a ActivityDataset,
    pub policy: &'a AdvicePolicy,
    pub status: Option<&'a StatusLine>,
    pub selected_day: Option<&'a str>,
}

pub fn render_page(page: Page, ctx: &PageContext<'_>) -> String {
    let charts = build_charts(ctx.dataset);
    let body = match page {
        Page::Dashboard => render_dashboard(ctx),
        Page::Insights => render_insights(ctx),
        Page::Upload => render_upload(ctx),
        Page::About => render_about(),
        Page::AddEntry => render_add_entry(ctx),
    };

    LAYOUT_HTML
        .replace("{{TITLE}}", page.title())
        .replace("{{NAV}}", &render_nav(page))
        .replace("{{STATUS}}", &render_status(ctx.status))
        .replace("{{CHARTS}}", &charts_json(&charts))
        .replace("{{BODY}}", &body)
}

fn render_nav(active: Page) -> String {
    Page::ALL
        .iter()
        .map(|page| {
            let class = if *page == active { "nav-link active" } else { "nav-link" };
            format!(r#"<a class="{class}" href="{}">{}</a>"#, page.path(), page.title())
        })
        .collect()
}

fn render_status(status: Option<&StatusLine>) -> String {
    match status {
        Some(line) => {
            let kind = match line.kind {
                StatusKind::Ok => "ok",
                StatusKind::Error => "error",
            };
            format!(
                r#"<div class="status" id="status" data-type="{kind}">{}</div>"#,
                escape(&line.text)
            )
        }
        None => r#"<div class="status" id="status"></div>"#.to_string(),
    }
}

fn charts_json(charts: &DashboardCharts) -> String {
    match serde_json::to_string(charts) {
        // `<` and `{{` only occur inside JSON strings here, where the escapes are equivalent
        Ok(json) => json.replace('<', "\\u003c").replace("{{", "{\\u007b"),
        Err(err) => {
            error!("failed to serialize charts: {err}");
            "{}".to_string()
        }
    }
}

fn render_dashboard(ctx: &PageContext<'_>) -> String {
    let summary = match compute(ctx.dataset) {
        Ok(stats) => format!(
            r#"<section class="panel">
      {}
      {}
      {}
      {}
    </section>"#,
            stat_card("Total steps", &group_thousands(stats.total_steps as i64), ""),
            stat_card("Average steps", &group_thousands(stats.mean_steps as i64), ""),
            stat_card(
                "Average calories",
                &format!("{} kcal", group_thousands(stats.mean_calories as i64)),
                "calories"
            ),
            stat_card(
                "Best day for steps",
                &format!(
                    "{} ({} steps)",
                    escape(stats.best_day.day.label()),
                    group_thousands(stats.best_day.steps as i64)
                ),
                "accent"
            ),
        ),
        Err(_) => empty_card(
            "No activity data yet. Upload a CSV file with Day, Steps and Calories columns, or add an entry by hand.",
        ),
    };

    format!(
        r#"<header>
      <h1>Dashboard</h1>
      <p class="subtitle">Your week of steps and calories at a glance.</p>
    </header>
    <section class="actions">
      <form method="post" action="/refresh">
        <button class="btn-primary" type="submit">Refresh from CSV</button>
      </form>
      <a class="btn-secondary" href="/upload">Upload a CSV file</a>
    </section>
    {summary}
    <section class="charts">
      {}
      {}
    </section>"#,
        chart_card("steps"),
        chart_card("calories"),
    )
}

fn render_insights(ctx: &PageContext<'_>) -> String {
    let header = r#"<header>
      <h1>Insights &amp; Recommendations</h1>
      <p class="subtitle">How your latest day compares, and what to do next.</p>
    </header>"#;

    let stats = match compute(ctx.dataset) {
        Ok(stats) => stats,
        Err(_) => {
            return format!(
                "{header}\n    {}",
                empty_card("Upload a CSV file on the Upload page to see your insights.")
            );
        }
    };
    let summary = insights(ctx.dataset, &stats);

    let latest = match stats.last_day_delta() {
        Ok(delta) => {
            let last_index = ctx.dataset.len() - 1;
            let advice = advice_block(
                advice_for_day(ctx.policy, ctx.dataset, &stats, last_index),
                ctx.policy,
            );
            let record = &ctx.dataset.records()[last_index];
            let percent = delta
                .steps_diff_percent
                .map(|p| format!(" ({p:+.0}%)"))
                .unwrap_or_default();
            format!(
                r#"<section class="card">
      <h2>Latest day summary</h2>
      <p>Day: <strong>{}</strong> compared with {}</p>
      <p>Steps: {} ({:+}{percent})</p>
      <p>Calories: {} kcal ({:+.0})</p>
      {advice}
    </section>"#,
                escape(&delta.day),
                escape(&delta.previous_day),
                group_thousands(record.steps as i64),
                delta.steps_diff,
                format_amount(record.calories),
                delta.calories_diff,
            )
        }
        Err(err) => format!(
            r#"<section class="card">
      <h2>Latest day summary</h2>
      <p class="muted">You need at least two days of data to see a day-over-day comparison ({}).</p>
    </section>"#,
            escape(&err.to_string())
        ),
    };

    format!(
        r#"{header}
    {latest}
    {}
    <section class="grid">
      {}
      {}
      {}
      {}
    </section>
    {}
    <section class="charts single">
      {}
    </section>"#,
        trend_card(summary.trend),
        snapshot_card(&stats),
        bonus_card(&summary),
        trophy_card(&stats, &summary, ctx.dataset),
        progress_card(&summary),
        day_picker(ctx, &stats),
        chart_card("steps"),
    )
}

fn advice_block(advice: Result<AdviceMessage, DataError>, policy: &AdvicePolicy) -> String {
    match advice {
        Ok(advice) => format!(
            r#"<div class="alert alert-{}" data-policy="{}">{}</div>"#,
            advice.severity.as_str(),
            policy.name(),
            escape(advice.text)
        ),
        Err(err) => format!(
            r#"<div class="alert alert-muted" data-policy="{}">{}</div>"#,
            policy.name(),
            escape(&err.to_string())
        ),
    }
}

fn trend_card(trend: Option<Trend>) -> String {
    match trend {
        Some(Trend::Rising) => r#"<section class="card outline-success">
      <h3>You're on a roll!</h3>
      <p>Your step count has increased for 3 days straight. Keep the momentum going!</p>
    </section>"#
            .to_string(),
        Some(Trend::Falling) => r#"<section class="card outline-danger">
      <h3>Let's turn it around</h3>
      <p>Your activity has been trending down. A small, achievable goal for today can break the pattern.</p>
    </section>"#
            .to_string(),
        None => String::new(),
    }
}

fn snapshot_card(stats: &DerivedStatistics) -> String {
    format!(
        r#"<div class="card">
        <h3>Weekly snapshot</h3>
        <p class="label">Average daily steps</p>
        <p class="value">{}</p>
        <p class="label">Average daily calories burned</p>
        <p class="value calories">{}</p>
      </div>"#,
        group_thousands(stats.mean_steps as i64),
        group_thousands(stats.mean_calories as i64),
    )
}

fn bonus_card(summary: &InsightSummary) -> String {
    format!(
        r#"<div class="card">
        <h3>The power of extra steps</h3>
        <p>On your more active days (above average steps), you burned an average of:</p>
        <p class="value accent">{} extra calories</p>
      </div>"#,
        group_thousands(summary.calorie_bonus as i64),
    )
}

fn trophy_card(stats: &DerivedStatistics, summary: &InsightSummary, dataset: &ActivityDataset) -> String {
    if summary.personal_best {
        if let Some(last) = dataset.last() {
            return format!(
                r#"<div class="card highlight">
        <h3>New personal best!</h3>
        <p>You reached {} steps on {}, a new record for this period.</p>
      </div>"#,
                group_thousands(last.steps as i64),
                escape(last.day.label()),
            );
        }
    }
    format!(
        r#"<div class="card">
        <h3>Trophy room</h3>
        <p><strong>Highest step count:</strong> {} on {}</p>
        <p class="muted"><strong>Lowest step count:</strong> {} on {}</p>
      </div>"#,
        group_thousands(stats.best_day.steps as i64),
        escape(stats.best_day.day.label()),
        group_thousands(stats.worst_day.steps as i64),
        escape(stats.worst_day.day.label()),
    )
}

fn progress_card(summary: &InsightSummary) -> String {
    format!(
        r#"<div class="card">
        <h3>Latest day vs. your average</h3>
        {}
        {}
      </div>"#,
        progress_bar("Steps progress", summary.steps_progress, "steps"),
        progress_bar("Calories progress", summary.calories_progress, "calories"),
    )
}

fn progress_bar(label: &str, percent: Option<f64>, class: &str) -> String {
    match percent {
        Some(percent) => format!(
            r#"<div class="progress-row">
          <p class="label">{label}</p>
          <div class="progress"><div class="progress-fill {class}" style="width: {:.0}%"></div></div>
          <small>{percent:.0}% of average</small>
        </div>"#,
            percent.clamp(0.0, 100.0),
        ),
        None => format!(
            r#"<div class="progress-row">
          <p class="label">{label}</p>
          <small class="muted">No average to compare against yet.</small>
        </div>"#
        ),
    }
}

fn day_picker(ctx: &PageContext<'_>, stats: &DerivedStatistics) -> String {
    let options: String = ctx
        .dataset
        .records()
        .iter()
        .map(|record| {
            let label = escape(record.day.label());
            let selected = match ctx.selected_day {
                Some(day) if day.trim().eq_ignore_ascii_case(record.day.label().trim()) => " selected",
                _ => "",
            };
            format!(r#"<option value="{label}"{selected}>{label}</option>"#)
        })
        .collect();

    let result = match ctx.selected_day {
        None => String::new(),
        Some(day) => match ctx.dataset.position_of(day) {
            Some(index) => {
                let record = &ctx.dataset.records()[index];
                format!(
                    r#"<div class="day-advice">
        <h3>{}</h3>
        <p>Steps: {} | Calories: {}</p>
        {}
      </div>"#,
                    escape(record.day.label()),
                    group_thousands(record.steps as i64),
                    format_amount(record.calories),
                    advice_block(advice_for_day(ctx.policy, ctx.dataset, stats, index), ctx.policy),
                )
            }
            None => format!(
                r#"<div class="alert alert-muted">No entry for '{}'.</div>"#,
                escape(day)
            ),
        },
    };

    format!(
        r#"<section class="card">
      <h2>Advice for a specific day</h2>
      <form class="inline-form" method="get" action="/insights">
        <select name="day">{options}</select>
        <button class="btn-primary" type="submit">Get advice</button>
      </form>
      {result}
    </section>"#
    )
}

fn render_upload(ctx: &PageContext<'_>) -> String {
    format!(
        r#"<header>
      <h1>Upload CSV</h1>
      <p class="subtitle">Upload a CSV file with columns: Day, Steps, Calories. It replaces the current data.</p>
    </header>
    <section class="card">
      <form id="upload-form">
        <input id="upload-file" type="file" accept=".csv" />
        <button class="btn-primary" type="submit">Upload</button>
      </form>
    </section>
    <section class="card">
      <h2>Current data</h2>
      {}
    </section>"#,
        data_table(ctx.dataset),
    )
}

fn render_about() -> String {
    r#"<header>
      <h1>About FitTrack</h1>
      <p class="subtitle">A small dashboard to visualize and analyze physical activity.</p>
    </header>
    <section class="card">
      <p>Load a week of steps and calories from a CSV file, see the trend charts, and get simple advice based on how each day compares with your average or with the day before.</p>
      <p class="muted">Data stays on this server. Use "Save to CSV" on the Add entry page to keep manual changes.</p>
    </section>"#
        .to_string()
}

fn render_add_entry(ctx: &PageContext<'_>) -> String {
    format!(
        r#"<header>
      <h1>Add entry</h1>
      <p class="subtitle">Enter a day and its steps. Calories are estimated when left blank.</p>
    </header>
    <section class="card">
      <form class="entry-form" method="post" action="/add">
        <input name="day" type="text" placeholder="Day (e.g. Monday)" />
        <input name="steps" type="number" min="0" placeholder="Steps" />
        <input name="calories" type="number" min="0" step="any" placeholder="Calories (optional)" />
        <button class="btn-primary" type="submit">Add entry</button>
      </form>
      <form method="post" action="/save">
        <button class="btn-secondary" type="submit">Save to CSV</button>
      </form>
    </section>
    <section class="charts single">
      {}
    </section>
    <section class="card">
      <h2>Current data</h2>
      {}
    </section>"#,
        chart_card("steps"),
        data_table(ctx.dataset),
    )
}

fn stat_card(label: &str, value: &str, class: &str) -> String {
    format!(
        r#"<div class="stat">
        <span class="label">{label}</span>
        <span class="value {class}">{value}</span>
      </div>"#
    )
}

fn empty_card(text: &str) -> String {
    format!(
        r#"<section class="card empty">
      <p>{}</p>
    </section>"#,
        escape(text)
    )
}

fn chart_card(key: &str) -> String {
    format!(
        r#"<div class="chart-card">
        <svg class="chart" data-chart="{key}" viewBox="0 0 600 260" role="img"></svg>
      </div>"#
    )
}

fn data_table(dataset: &ActivityDataset) -> String {
    if dataset.is_empty() {
        return r#"<p class="muted">No rows loaded.</p>"#.to_string();
    }
    let rows: String = dataset
        .records()
        .iter()
        .map(|record| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(record.day.label()),
                group_thousands(record.steps as i64),
                format_amount(record.calories),
            )
        })
        .collect();
    format!(
        r#"<table class="data-table">
        <thead><tr><th>Day</th><th>Steps</th><th>Calories</th></tr></thead>
        <tbody>{rows}</tbody>
      </table>"#
    )
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            // keeps user text from forming `{{...}}` template markers
            '{' => out.push_str("&#123;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        group_thousands(value as i64)
    } else {
        format!("{value:.1}")
    }
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>FitTrack · {{TITLE}}</title>
  <style>
    :root {
      --bg: #222222;
      --card: #303030;
      --ink: #f5f5f5;
      --muted: #a5a5a5;
      --steps: #ffeb3b;
      --calories: #e53935;
      --success: #00bc8c;
      --info: #3498db;
      --warning: #f39c12;
      --danger: #e74c3c;
      --shadow: 0 18px 40px rgba(0, 0, 0, 0.35);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", Arial, sans-serif;
    }

    nav {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 8px;
      padding: 14px 24px;
      background: #111111;
    }

    nav .brand {
      font-weight: 700;
      margin-right: 18px;
      color: var(--steps);
      text-decoration: none;
    }

    .nav-link {
      color: var(--muted);
      text-decoration: none;
      padding: 6px 12px;
      border-radius: 999px;
    }

    .nav-link.active {
      background: rgba(255, 235, 59, 0.15);
      color: var(--steps);
    }

    .app {
      width: min(1080px, 100%);
      margin: 0 auto;
      padding: 28px 18px 48px;
      display: grid;
      gap: 22px;
    }

    header {
      text-align: center;
    }

    h1 {
      margin: 0;
      color: var(--steps);
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    h2, h3 {
      margin-top: 0;
    }

    .subtitle, .muted {
      color: var(--muted);
    }

    .panel, .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
    }

    .stat, .card, .chart-card {
      background: var(--card);
      border-radius: 12px;
      padding: 18px;
      box-shadow: var(--shadow);
    }

    .stat {
      display: grid;
      gap: 8px;
      text-align: center;
    }

    .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--steps);
    }

    .value.calories {
      color: var(--calories);
    }

    .value.accent {
      color: var(--success);
    }

    .card.empty {
      text-align: center;
      color: var(--muted);
    }

    .card.highlight {
      background: var(--warning);
      color: #111111;
    }

    .outline-success {
      border: 1px solid var(--success);
    }

    .outline-danger {
      border: 1px solid var(--danger);
    }

    .actions {
      display: flex;
      flex-wrap: wrap;
      justify-content: center;
      gap: 12px;
    }

    .actions form {
      margin: 0;
    }

    button, .btn-secondary {
      appearance: none;
      border: none;
      border-radius: 8px;
      padding: 10px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      text-decoration: none;
      display: inline-flex;
      align-items: center;
    }

    .btn-primary {
      background: var(--steps);
      color: #111111;
    }

    .btn-secondary {
      background: var(--calories);
      color: white;
    }

    input, select {
      padding: 9px 12px;
      border-radius: 8px;
      border: 1px solid #555555;
      background: #1b1b1b;
      color: var(--ink);
      font-size: 1rem;
    }

    .entry-form, .inline-form, #upload-form {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      margin-bottom: 12px;
    }

    .alert {
      margin-top: 14px;
      padding: 12px 16px;
      border-radius: 8px;
      color: white;
    }

    .alert-success { background: var(--success); }
    .alert-info { background: var(--info); }
    .alert-warning { background: var(--warning); }
    .alert-danger { background: var(--danger); }
    .alert-muted { background: #444444; }

    .progress {
      height: 14px;
      border-radius: 999px;
      background: #1b1b1b;
      overflow: hidden;
    }

    .progress-fill {
      height: 100%;
    }

    .progress-fill.steps { background: var(--steps); }
    .progress-fill.calories { background: var(--calories); }

    .progress-row {
      margin-bottom: 14px;
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(380px, 1fr));
      gap: 16px;
    }

    .charts.single {
      grid-template-columns: 1fr;
    }

    .chart {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart-title {
      fill: var(--ink);
      font-size: 15px;
      font-weight: 600;
    }

    .chart-grid {
      stroke: rgba(255, 255, 255, 0.08);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .data-table {
      width: 100%;
      border-collapse: collapse;
    }

    .data-table th, .data-table td {
      padding: 8px;
      border-bottom: 1px solid #444444;
      text-align: left;
    }

    .status {
      text-align: center;
      min-height: 1.2em;
      color: var(--info);
    }

    .status[data-type="error"] {
      color: var(--danger);
    }

    .status[data-type="ok"] {
      color: var(--success);
    }

    @media (max-width: 600px) {
      .charts {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <nav>
    <a class="brand" href="/">FitTrack</a>
    {{NAV}}
  </nav>
  <main class="app">
    {{BODY}}
    {{STATUS}}
  </main>

  <script id="chart-data" type="application/json">{{CHARTS}}</script>
  <script>
    const statusEl = document.getElementById('status');
    const chartData = JSON.parse(document.getElementById('chart-data').textContent || '{}');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const formatAxisValue = (value) => {
      const rounded = Math.round(value);
      return rounded.toLocaleString();
    };

    const renderChart = (svg, spec) => {
      const width = 600;
      const height = 260;
      const paddingX = 52;
      const paddingY = 34;
      const top = 36;
      const title = `<text class="chart-title" x="${width / 2}" y="20" text-anchor="middle">${spec.title}</text>`;

      if (!spec.points.length) {
        svg.innerHTML = `${title}<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>`;
        return;
      }

      const values = spec.points.map((point) => point.value);
      const min = 0;
      let max = Math.max(...values);
      if (max === min) {
        max = 1;
      }

      const range = max - min;
      const slots = spec.points.length;
      const slotWidth = (width - paddingX * 2) / slots;
      const scaleY = (height - top - paddingY) / range;
      const x = (index) => paddingX + slotWidth * (index + 0.5);
      const y = (value) => height - paddingY - (value - min) * scaleY;

      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + (range * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 8}" y="${yPos + 4}" text-anchor="end">${formatAxisValue(value)}</text>`;
      }

      const escapeText = (text) => text.replace(/&/g, '&amp;').replace(/</g, '&lt;');
      const xLabels = spec.points
        .map((point, index) => `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${escapeText(point.label)}</text>`)
        .join('');

      let marks = '';
      if (spec.kind === 'bar') {
        const barWidth = slotWidth * 0.6;
        marks = spec.points
          .map((point, index) => `<rect x="${x(index) - barWidth / 2}" y="${y(point.value)}" width="${barWidth}" height="${y(min) - y(point.value)}" fill="${spec.color}" />`)
          .join('');
      } else {
        const path = spec.points
          .map((point, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(point.value).toFixed(2)}`)
          .join(' ');
        marks = `<path d="${path}" fill="none" stroke="${spec.color}" stroke-width="3" />`;
        if (spec.markers) {
          marks += spec.points
            .map((point, index) => `<circle cx="${x(index)}" cy="${y(point.value)}" r="4" fill="${spec.color}" />`)
            .join('');
        }
      }

      svg.style.background = spec.background;
      svg.innerHTML = `${title}${grid}${marks}${xLabels}`;
    };

    document.querySelectorAll('svg[data-chart]').forEach((svg) => {
      const spec = chartData[svg.dataset.chart];
      if (spec) {
        renderChart(svg, spec);
      }
    });

    const uploadForm = document.getElementById('upload-form');
    if (uploadForm) {
      uploadForm.addEventListener('submit', (event) => {
        event.preventDefault();
        const file = document.getElementById('upload-file').files[0];
        if (!file) {
          setStatus('Choose a CSV file first.', 'error');
          return;
        }
        const reader = new FileReader();
        reader.onload = async () => {
          setStatus('Uploading...', 'info');
          const res = await fetch('/api/upload', {
            method: 'POST',
            headers: { 'content-type': 'application/json' },
            body: JSON.stringify({ filename: file.name, contents: reader.result })
          });
          if (!res.ok) {
            setStatus(`Upload failed: ${await res.text()}`, 'error');
            return;
          }
          const body = await res.json();
          setStatus(body.message, 'ok');
          setTimeout(() => window.location.reload(), 800);
        };
        reader.onerror = () => setStatus('Could not read the file.', 'error');
        reader.readAsDataURL(file);
      });
    }
  </script>
</body>
</html>
"#;
