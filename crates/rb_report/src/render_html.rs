// crates/rb_report/src/render_html.rs
//
// Self-contained HTML for a rendered page: one embedded template, inline CSS,
// no external assets. All text goes through minijinja's HTML auto-escaping
// (the template name ends in `.html`).

use minijinja::{context, Environment};

use crate::surface::Page;
use crate::ReportError;

const TEMPLATE_NAME: &str = "dashboard.html";

static TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{{ page.title }}</title>
<style>
body{font-family:system-ui,-apple-system,Segoe UI,Roboto,Ubuntu,Arial,sans-serif;margin:24px;background:#0f1217;color:#e6e9ef}
h1,h2{margin:0.2em 0}
.card{background:#171b22;border-radius:10px;padding:12px 16px;margin:12px 0}
.kv{display:flex;justify-content:space-between;padding:2px 0}
.kv .k{opacity:0.8}
table{border-collapse:collapse;width:100%}
td,th{padding:4px 8px;border-bottom:1px solid #2a303b;text-align:left}
.badge{padding:.1em .5em;border-radius:9999px;background:#2a303b}
.badge.low{background:#35c48a}.badge.medium{background:#ffb020}.badge.high{background:#ff7a45}.badge.critical{background:#ff5a5a}
.level-low{background:rgba(53,196,138,.45)}.level-medium{background:rgba(255,176,32,.45)}
.level-high{background:rgba(255,122,69,.55)}.level-critical{background:rgba(255,90,90,.65)}
.bar-row{display:grid;grid-template-columns:160px 1fr;gap:8px;align-items:center;margin:4px 0}
.bar{background:#20252e;border-radius:6px;height:12px;overflow:hidden}
.bar-fill{height:100%}
.donuts{display:flex;flex-wrap:wrap;gap:16px}
.donut-card{text-align:center}
.donut{width:96px;height:96px;border-radius:50%;display:grid;place-items:center}
.donut-inner{width:64px;height:64px;border-radius:50%;background:#171b22;display:grid;place-items:center}
.muted{opacity:0.7}
</style>
</head>
<body>
<h1>{{ page.title }}</h1>
{% for c in page.containers %}
<section class="card">
<h2>{{ c.heading }}</h2>
{% if c.columns %}
<table id="{{ c.id }}">
<thead><tr>{% for h in c.columns %}<th>{{ h }}</th>{% endfor %}</tr></thead>
<tbody>
{% for n in c.nodes %}<tr>{% for cell in n.cells %}{% if cell.cell == "badge" %}<td><span class="badge {{ cell.class }}">{{ cell.text }}</span></td>{% elif cell.cell == "level" %}<td class="level-cell{% if cell.highlight %} {{ cell.highlight }}{% endif %}">{{ cell.text }}</td>{% else %}<td>{{ cell.text }}</td>{% endif %}{% endfor %}</tr>
{% endfor %}</tbody>
</table>
{% else %}
<div id="{{ c.id }}" class="{{ c.layout }}">
{% for n in c.nodes %}{% if n.kind == "kv" %}<div class="kv"><div class="k">{{ n.key }}</div><div class="v">{{ n.value }}</div></div>
{% elif n.kind == "bar" %}<div class="bar-row"><div class="bar-label">{{ n.label }}</div><div class="bar"><div class="bar-fill" style="width: {{ n.width }}; background: {{ n.fill }}"></div></div></div>
{% elif n.kind == "donut" %}<div class="donut-card"><div class="donut" style="background: {{ n.background }}"><div class="donut-inner">{{ n.text }}</div></div><div>{{ n.label }}</div></div>
{% endif %}{% endfor %}
</div>
{% endif %}
</section>
{% endfor %}
{% if page.sources %}
<section class="card muted">
<h2>Sources</h2>
<table id="sources">
<thead><tr><th>Artifact</th><th>Location</th><th>Status</th><th>Producer</th><th>Details</th></tr></thead>
<tbody>
{% for s in page.sources %}<tr><td>{{ s.artifact }}</td><td>{{ s.location }}</td><td>{{ s.status }}{% if s.detail %}: {{ s.detail }}{% endif %}</td><td>{{ s.generated_by or "" }}</td><td>{{ s.facts | join("; ") }}</td></tr>
{% endfor %}</tbody>
</table>
</section>
{% endif %}
</body>
</html>
"#;

/// Render the page as a standalone HTML document.
pub fn render_html(page: &Page) -> Result<String, ReportError> {
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)
        .map_err(|e| ReportError::Template(e.to_string()))?;
    let tmpl = env
        .get_template(TEMPLATE_NAME)
        .map_err(|e| ReportError::Template(e.to_string()))?;
    tmpl.render(context! { page => page.view() })
        .map_err(|e| ReportError::Template(e.to_string()))
}
