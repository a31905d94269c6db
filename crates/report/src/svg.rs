//! SVG scatter chart with the clipped trend line.
//!
//! Data coordinates map linearly onto the plot area. Points outside the
//! viewport's x range are skipped, and solved points above or below the
//! y range are clipped away by a `clipPath`.

use crate::html::escape;
use crate::model::{ChartPoint, PageModel};
use hmatch_core::{TrendLine, Viewport};

const SVG_W: f64 = 960.0;
const SVG_H: f64 = 440.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 60.0;
const POINT_RADIUS: f64 = 6.0;
const X_TICK_STEP: f64 = 5.0;

/// Maps data coordinates onto pixel coordinates.
struct Plot {
    viewport: Viewport,
    width: f64,
    height: f64,
}

impl Plot {
    fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            width: SVG_W - MARGIN_LEFT - MARGIN_RIGHT,
            height: SVG_H - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }

    fn px(&self, x: f64) -> f64 {
        MARGIN_LEFT + (x - self.viewport.x_min) / self.viewport.width() * self.width
    }

    fn py(&self, y: f64) -> f64 {
        MARGIN_TOP + (self.viewport.y_max - y) / self.viewport.height() * self.height
    }
}

/// Tick values from the first multiple of `step` at or above `min` up to `max`.
fn ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    let mut ticks = Vec::new();
    let mut value = (min / step).ceil() * step;
    while value <= max + 1e-9 {
        ticks.push(value);
        value += step;
    }
    ticks
}

fn y_tick_step(viewport: &Viewport) -> f64 {
    if viewport.height() > 20.0 {
        5.0
    } else if viewport.height() > 10.0 {
        2.0
    } else {
        1.0
    }
}

fn render_grid(svg: &mut String, plot: &Plot) {
    let vp = &plot.viewport;

    for x in ticks(vp.x_min, vp.x_max, X_TICK_STEP) {
        let px = plot.px(x);
        svg.push_str(&format!(
            "<line x1=\"{px:.1}\" y1=\"{:.1}\" x2=\"{px:.1}\" y2=\"{:.1}\" stroke=\"#E5E7EB\" stroke-dasharray=\"3 3\"/>\n",
            MARGIN_TOP,
            MARGIN_TOP + plot.height
        ));
        svg.push_str(&format!(
            "<text x=\"{px:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"12\" fill=\"#6B7280\">{x:.0}</text>\n",
            MARGIN_TOP + plot.height + 18.0
        ));
    }

    for y in ticks(vp.y_min, vp.y_max, y_tick_step(vp)) {
        let py = plot.py(y);
        svg.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{py:.1}\" x2=\"{:.1}\" y2=\"{py:.1}\" stroke=\"#E5E7EB\" stroke-dasharray=\"3 3\"/>\n",
            MARGIN_LEFT,
            MARGIN_LEFT + plot.width
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"12\" fill=\"#6B7280\">{y:.0}</text>\n",
            MARGIN_LEFT - 8.0,
            py + 4.0
        ));
    }

    // axes
    svg.push_str(&format!(
        "<rect x=\"{MARGIN_LEFT:.1}\" y=\"{MARGIN_TOP:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"none\" stroke=\"#9CA3AF\"/>\n",
        plot.width, plot.height
    ));
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"13\" fill=\"#374151\">Benchmark Release Date</text>\n",
        MARGIN_LEFT + plot.width / 2.0,
        SVG_H - 14.0
    ));
    let label_y = MARGIN_TOP + plot.height / 2.0;
    svg.push_str(&format!(
        "<text x=\"20\" y=\"{label_y:.1}\" text-anchor=\"middle\" font-size=\"13\" fill=\"#374151\" transform=\"rotate(-90 20 {label_y:.1})\">Time to Human Level (Years)</text>\n"
    ));
}

fn render_trend(svg: &mut String, plot: &Plot, trend: &TrendLine) {
    if let [start, end] = trend.points.as_slice() {
        svg.push_str(&format!(
            "<line class=\"trend\" x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"red\" stroke-width=\"2\" stroke-dasharray=\"5 5\"/>\n",
            plot.px(start.x),
            plot.py(start.y),
            plot.px(end.x),
            plot.py(end.y)
        ));
    }
}

fn render_point(svg: &mut String, plot: &Plot, point: &ChartPoint) {
    let cx = plot.px(point.x);
    let cy = plot.py(point.y);
    let fill = if point.unsolved {
        "none".to_string()
    } else {
        point.color.to_string()
    };
    svg.push_str(&format!(
        "<circle cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"{POINT_RADIUS}\" fill=\"{fill}\" stroke=\"{}\" stroke-width=\"2\"><title>{}</title></circle>\n",
        point.color,
        escape(&point.name)
    ));
    svg.push_str(&format!(
        "<text x=\"{cx:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\" font-weight=\"500\" fill=\"currentColor\">{}</text>\n",
        cy - 15.0,
        escape(&point.name)
    ));
}

/// Render the chart for `model` as a standalone SVG document.
pub fn render_chart(model: &PageModel) -> String {
    let plot = Plot::new(model.viewport);
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {SVG_W} {SVG_H}\" width=\"100%\" font-family=\"system-ui,Arial,sans-serif\" role=\"img\" aria-label=\"Time to human level by release date\">\n"
    ));
    svg.push_str(&format!(
        "<defs><clipPath id=\"plot-area\"><rect x=\"{MARGIN_LEFT:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\"/></clipPath></defs>\n",
        MARGIN_TOP - POINT_RADIUS,
        plot.width,
        plot.height + 2.0 * POINT_RADIUS
    ));

    render_grid(&mut svg, &plot);

    svg.push_str("<g clip-path=\"url(#plot-area)\">\n");
    render_trend(&mut svg, &plot, &model.trend);
    for point in model
        .points
        .iter()
        .filter(|p| p.x >= model.viewport.x_min && p.x <= model.viewport.x_max)
    {
        render_point(&mut svg, &plot, point);
    }
    svg.push_str("</g>\n</svg>\n");

    svg
}
