//! Self-contained interactive HTML output: embedded CSS, embedded or
//! fetched scene data, and a vanilla-JS viewer that draws the precomputed
//! geometry and wires pan/zoom, hover tooltip, and the click detail panel.

use crate::config::{Config, TooltipSize};
use crate::scene::Scene;
use anyhow::Result;

/// Where the generated page gets its scene data from.
pub enum DataSource {
    /// Scene JSON embedded directly in the page.
    Inline(Scene),
    /// Scene JSON fetched once from this URL on load.
    Remote(String),
}

pub fn render_page(source: &DataSource, config: &Config, title: &str) -> Result<String> {
    let data_js = match source {
        DataSource::Inline(scene) => {
            let json = serde_json::to_string(scene)?.replace("</", "<\\/");
            format!("const sceneData = {json};\nconst dataUrl = null;")
        }
        DataSource::Remote(url) => {
            let url = url.replace('\\', "\\\\").replace('\'', "\\'").replace("</", "<\\/");
            format!("const sceneData = null;\nconst dataUrl = '{url}';")
        }
    };

    let config_js = format!(
        "const ZOOM_MIN = {};\nconst ZOOM_MAX = {};\nconst PANEL_MAX = {};",
        config.interaction.zoom_min,
        config.interaction.zoom_max,
        match config.interaction.panel_max_chars {
            Some(max) => max.to_string(),
            None => "null".to_string(),
        },
    );

    let tooltip_font = match config.interaction.tooltip_size {
        TooltipSize::Small => "0.75rem",
        TooltipSize::Medium => "0.85rem",
        TooltipSize::Large => "1rem",
    };

    let css = page_css(&config.render.background, tooltip_font);
    let title = crate::render::escape_xml(title);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
{css}
</style>
</head>
<body>
<div class="viewer">
  <svg id="canvas"></svg>
  <div class="panel">
    <h2 class="title"></h2>
    <pre class="desc"></pre>
  </div>
</div>
<div class="tooltip" hidden></div>
<div class="error-banner" hidden>
  <span class="error-text"></span>
  <button type="button" class="retry">Retry</button>
</div>
<script>
{data_js}
{config_js}
{PAGE_SCRIPT}
</script>
</body>
</html>
"#
    ))
}

fn page_css(background: &str, tooltip_font: &str) -> String {
    format!(
        r#".viewer {{ display: flex; width: 100vw; height: 100vh; margin: 0; }}
body {{ margin: 0; font-family: "Helvetica Neue", Helvetica, Arial, sans-serif; }}
#canvas {{ flex: 1; background: {background}; cursor: grab; }}
#canvas.panning {{ cursor: grabbing; }}
.panel {{
    width: 320px; overflow: auto; border-left: 1px solid #ddd;
    padding: 0.75rem 1rem; box-sizing: border-box;
}}
.panel .title {{ margin: 0 0 0.5rem 0; font-size: 1.1rem; word-break: break-all; }}
.panel .desc {{ white-space: pre-wrap; word-break: break-all; font-size: 0.85rem; }}
.tooltip {{
    position: absolute; background: #fff; border: 1px solid #ccc;
    border-radius: 4px; padding: 0.4rem 0.6rem; font-size: {tooltip_font};
    pointer-events: none; z-index: 10; max-width: 420px;
    white-space: pre-wrap; word-break: break-all;
    box-shadow: 0 2px 8px rgba(0,0,0,0.15);
}}
.error-banner {{
    position: absolute; top: 12px; left: 50%; transform: translateX(-50%);
    background: #fff0f0; border: 1px solid #c00; color: #c00;
    border-radius: 4px; padding: 0.5rem 1rem; z-index: 20;
}}
.error-banner .retry {{ margin-left: 0.75rem; }}"#
    )
}

const PAGE_SCRIPT: &str = r#"const SVG_NS = 'http://www.w3.org/2000/svg';
const canvas = document.getElementById('canvas');
const panelTitle = document.querySelector('.panel .title');
const panelDesc = document.querySelector('.panel .desc');
const tooltip = document.querySelector('.tooltip');
const errorBanner = document.querySelector('.error-banner');
const errorText = document.querySelector('.error-banner .error-text');
const retryButton = document.querySelector('.error-banner .retry');

let view = { x: 0, y: 0, k: 1 };
let diagram = null;

function el(name, attrs) {
  const node = document.createElementNS(SVG_NS, name);
  for (const key in attrs) node.setAttribute(key, attrs[key]);
  return node;
}

function applyTransform() {
  if (diagram) {
    diagram.setAttribute('transform',
      'translate(' + view.x + ',' + view.y + ') scale(' + view.k + ')');
  }
}

function pathFrom(points) {
  return points.map((p, i) => (i === 0 ? 'M ' : 'L ') + p[0] + ' ' + p[1]).join(' ');
}

function clipPanel(text) {
  return PANEL_MAX === null ? text : text.slice(0, PANEL_MAX);
}

function draw(scene) {
  canvas.replaceChildren();
  const defs = el('defs', {});
  const marker = el('marker', {
    id: 'vee', viewBox: '0 0 10 10', refX: 9, refY: 5,
    markerWidth: 8, markerHeight: 6, orient: 'auto'
  });
  marker.appendChild(el('path', { d: 'M 0 0 L 10 5 L 0 10 L 4 5 z', fill: scene.line_color }));
  defs.appendChild(marker);
  canvas.appendChild(defs);

  diagram = el('g', {});
  canvas.appendChild(diagram);

  for (const edge of scene.edges) {
    diagram.appendChild(el('path', {
      d: pathFrom(edge.points), fill: 'none',
      stroke: scene.line_color, 'stroke-width': 1.4, 'marker-end': 'url(#vee)'
    }));
  }

  for (const node of scene.nodes) {
    const group = el('g', {});
    group.appendChild(el('rect', {
      x: node.x, y: node.y, width: node.width, height: node.height,
      rx: 5, ry: 5, fill: node.fill, stroke: node.stroke, 'stroke-width': 1.4
    }));
    const text = el('text', {
      x: node.x + node.width / 2, y: node.y + node.height / 2,
      'text-anchor': 'middle', 'dominant-baseline': 'central',
      'font-family': scene.font_family, 'font-size': scene.font_size,
      fill: node.text_color
    });
    text.textContent = node.label;
    group.appendChild(text);

    group.addEventListener('mouseenter', event => {
      tooltip.textContent = node.tooltip;
      tooltip.hidden = false;
      moveTooltip(event);
    });
    group.addEventListener('mousemove', moveTooltip);
    group.addEventListener('mouseleave', () => { tooltip.hidden = true; });
    // Always replace: clicking X then Y leaves exactly Y's content.
    group.addEventListener('click', () => {
      panelTitle.textContent = node.label;
      panelDesc.textContent = clipPanel(node.description);
    });
    diagram.appendChild(group);
  }

  const rect = canvas.getBoundingClientRect();
  view = { x: (rect.width - scene.width) / 2, y: (rect.height - scene.height) / 2, k: 1 };
  applyTransform();
}

function moveTooltip(event) {
  tooltip.style.left = (event.pageX + 12) + 'px';
  tooltip.style.top = (event.pageY + 12) + 'px';
}

canvas.addEventListener('wheel', event => {
  if (!diagram) return;
  event.preventDefault();
  const factor = Math.exp(-event.deltaY * 0.002);
  const next = Math.min(ZOOM_MAX, Math.max(ZOOM_MIN, view.k * factor));
  const rect = canvas.getBoundingClientRect();
  const mx = event.clientX - rect.left;
  const my = event.clientY - rect.top;
  const scale = next / view.k;
  view = { x: mx - (mx - view.x) * scale, y: my - (my - view.y) * scale, k: next };
  applyTransform();
}, { passive: false });

let panning = null;
canvas.addEventListener('pointerdown', event => {
  panning = { x: event.clientX - view.x, y: event.clientY - view.y };
  canvas.classList.add('panning');
  canvas.setPointerCapture(event.pointerId);
});
canvas.addEventListener('pointermove', event => {
  if (!panning) return;
  view.x = event.clientX - panning.x;
  view.y = event.clientY - panning.y;
  applyTransform();
});
canvas.addEventListener('pointerup', () => {
  panning = null;
  canvas.classList.remove('panning');
});

function showError(message) {
  errorText.textContent = message;
  errorBanner.hidden = false;
}

function load() {
  errorBanner.hidden = true;
  if (sceneData !== null) {
    draw(sceneData);
    return;
  }
  fetch(dataUrl)
    .then(response => {
      if (!response.ok) throw new Error('HTTP ' + response.status);
      return response.json();
    })
    .then(draw)
    .catch(err => showError('Failed to load graph data: ' + err.message));
}

retryButton.addEventListener('click', load);
load();"#;
