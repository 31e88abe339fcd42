// src/chart.rs
//! Chart Renderer: one of four chart families per aspect, drawn with
//! `plotters` into an in-memory RGB buffer (`Figure`). Encoding and saving
//! the buffer is the exporter's job.
//!
//! | aspect | chart                                              |
//! |--------|----------------------------------------------------|
//! | `mar`  | lines: raw (faint) + smoothed (bold) per team      |
//! | `a/t`  | scatter: assists vs turnovers, one labelled point  |
//! | `acc`  | grouped bars: 3P%, 2P%, FT% per team               |
//! | other  | bars: one value per team, y range tightened        |

use std::error::Error;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::aspects::{Aspect, MARGINS};
use crate::error::{Result, VizError};
use crate::query::Query;
use crate::sourcing::{margin_col, smoothed_col, Dataset};
use crate::table::Frame;

type DrawResult = std::result::Result<(), Box<dyn Error>>;
type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const TITLE_FONT: (&str, u32) = ("sans-serif", 30);
const LABEL_FONT: (&str, u32) = ("sans-serif", 18);
const ZERO_LINE: RGBColor = RGBColor(105, 105, 105);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Lines,
    Scatter,
    GroupedBars,
    Bars,
}

impl ChartKind {
    pub fn for_aspect(code: &str) -> Self {
        match code {
            MARGINS => ChartKind::Lines,
            "a/t" => ChartKind::Scatter,
            "acc" => ChartKind::GroupedBars,
            _ => ChartKind::Bars,
        }
    }

    /// Pixel size, scaled with the number of teams where the chart is per-team.
    pub fn size(self, teams: usize) -> (u32, u32) {
        let n = teams.max(1) as u32;
        match self {
            ChartKind::Lines => (1600, 900),
            ChartKind::Scatter => (1000, 1000),
            ChartKind::GroupedBars => (400 * n, 700),
            ChartKind::Bars => ((150 * n).max(450), 450),
        }
    }
}

/// A rendered chart: packed RGB8 pixels, row-major.
#[derive(Clone, Debug)]
pub struct Figure {
    pub kind: ChartKind,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Y range for plain bars: `ceil(min - 0.6*spread) .. ceil(max + 0.4*spread)`.
/// With one value the spread is a tenth of that value.
pub fn bar_y_range(values: &[f64]) -> (f64, f64) {
    let (low, high) = (min_of(values), max_of(values));
    if !low.is_finite() {
        return (0.0, 1.0);
    }
    let spread = if values.len() > 1 { high - low } else { low / 10.0 };
    ((low - 0.6 * spread).ceil(), (high + 0.4 * spread).ceil())
}

fn title(text: &str, query: &Query) -> String {
    format!("{text} in {}", query.season_phrase())
}

pub fn render(aspect: &Aspect, data: &Dataset, query: &Query) -> Result<Figure> {
    let kind = ChartKind::for_aspect(aspect.code);
    let (width, height) = kind.size(query.teams.len());
    logf!("Rendering {kind:?} chart {width}x{height} for {:?}", query.teams);

    let mut pixels = vec![255u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        let frame = data.frame();
        let caption = title(&aspect.plot_title, query);
        let drawn = match kind {
            ChartKind::Lines => draw_lines(&root, frame, query, &caption),
            ChartKind::Scatter => draw_scatter(&root, frame, query, &caption),
            ChartKind::GroupedBars => draw_grouped_bars(&root, frame, query, &caption),
            ChartKind::Bars => draw_bars(&root, frame, query, aspect, &caption),
        };
        drawn.and_then(|_| root.present().map_err(Into::into)).map_err(|e| {
            loge!("Rendering failed: {e}");
            VizError::Render(e.to_string())
        })?;
    }

    Ok(Figure { kind, width, height, pixels })
}

fn team_color(i: usize) -> RGBAColor {
    Palette99::pick(i).mix(1.0)
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn padded(lo: f64, hi: f64, pad: f64) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        (0.0, 1.0)
    } else if hi > lo {
        (lo - pad * (hi - lo), hi + pad * (hi - lo))
    } else {
        (lo - 1.0, hi + 1.0)
    }
}

/* ---------------- Lines (margins) ---------------- */

fn draw_lines(root: &Area<'_>, frame: &Frame, query: &Query, caption: &str) -> DrawResult {
    root.fill(&WHITE)?;

    let n = frame.len() as f64;
    let values = frame.values();
    let lo = values.iter().copied().fold(0.0, f64::min);
    let hi = values.iter().copied().fold(0.0, f64::max);
    let (lo, hi) = padded(lo, hi, 0.05);

    let mut chart = ChartBuilder::on(root)
        .caption(caption, TITLE_FONT)
        .margin(25)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..n + 1.0, lo..hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Game No.")
        .y_desc("Winning / Losing Margin (points)")
        .label_style(LABEL_FONT)
        .draw()?;

    chart.draw_series(LineSeries::new(vec![(0.0, 0.0), (n + 1.0, 0.0)], ZERO_LINE.stroke_width(1)))?;

    for (i, team) in query.teams.iter().enumerate() {
        let color = team_color(i);
        let series = |col: &str| -> Vec<(f64, f64)> {
            frame
                .numeric(col)
                .unwrap_or_default()
                .into_iter()
                .enumerate()
                .filter_map(|(g, v)| Some((g as f64 + 1.0, v?)))
                .collect()
        };

        chart
            .draw_series(LineSeries::new(series(&margin_col(team)), color.mix(0.25).stroke_width(2)))?
            .label(team.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], color.mix(0.25).stroke_width(2)));

        chart
            .draw_series(LineSeries::new(series(&smoothed_col(team)), color.stroke_width(3)))?
            .label(format!("{team} smooth"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(3)));
    }

    chart
        .configure_series_labels()
        .label_font(LABEL_FONT)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/* ---------------- Scatter (assists vs turnovers) ---------------- */

fn draw_scatter(root: &Area<'_>, frame: &Frame, query: &Query, caption: &str) -> DrawResult {
    root.fill(&WHITE)?;

    let points: Vec<(&str, f64, f64)> = query
        .teams
        .iter()
        .filter_map(|t| Some((t.as_str(), frame.value(t, "AST")?, frame.value(t, "TOV")?)))
        .collect();

    let xs: Vec<f64> = points.iter().map(|p| p.1).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.2).collect();
    let (x_lo, x_hi) = padded(min_of(&xs), max_of(&xs), 0.15);
    let (y_lo, y_hi) = padded(min_of(&ys), max_of(&ys), 0.15);

    let mut chart = ChartBuilder::on(root)
        .caption(caption, TITLE_FONT)
        .margin(25)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Assists")
        .y_desc("Turnovers")
        .label_style(LABEL_FONT)
        .draw()?;

    let dot = team_color(0);
    chart.draw_series(points.iter().map(|&(code, x, y)| {
        EmptyElement::at((x, y))
            + Circle::new((0, 0), 10, dot.filled())
            + Text::new(code.to_string(), (15, -5), LABEL_FONT.into_font())
    }))?;
    Ok(())
}

/* ---------------- Grouped bars (shooting accuracy) ---------------- */

const ACCURACY_SERIES: [(&str, &str); 3] = [
    ("3P%", "3-Point-Shots"),
    ("2P%", "2-Point-Shots"),
    ("FT%", "Free Throws"),
];
const GROUP_BAR_WIDTH: f64 = 0.22;

fn draw_grouped_bars(root: &Area<'_>, frame: &Frame, query: &Query, caption: &str) -> DrawResult {
    root.fill(&WHITE)?;

    let teams = &query.teams;
    let n = teams.len() as f64;
    let top = frame.values().into_iter().fold(1.0, f64::max) * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption(caption, TITLE_FONT)
        .margin(25)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..n - 0.5, 0.0..top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(teams.len() * 2 + 1)
        .x_label_formatter(&|x| {
            let r = x.round();
            if (x - r).abs() < 1e-6 && r >= 0.0 && (r as usize) < teams.len() {
                teams[r as usize].clone()
            } else {
                s!()
            }
        })
        .y_desc("Accuracy")
        .label_style(LABEL_FONT)
        .draw()?;

    for (s, (col, label)) in ACCURACY_SERIES.iter().enumerate() {
        let color = team_color(s);
        let offset = (s as f64 - 1.0) * GROUP_BAR_WIDTH;
        let bars: Vec<(f64, f64)> = teams
            .iter()
            .enumerate()
            .filter_map(|(i, t)| Some((i as f64 + offset, frame.value(t, col)?)))
            .collect();

        chart
            .draw_series(bars.iter().map(|&(x, v)| {
                Rectangle::new(
                    [(x - GROUP_BAR_WIDTH / 2.0, 0.0), (x + GROUP_BAR_WIDTH / 2.0, v)],
                    color.filled(),
                )
            }))?
            .label(*label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));

        chart.draw_series(bars.iter().map(|&(x, v)| {
            Text::new(format!("{v:.3}"), (x - GROUP_BAR_WIDTH / 2.0, v + top * 0.03), LABEL_FONT.into_font())
        }))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .label_font(LABEL_FONT)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/* ---------------- Plain bars ---------------- */

fn draw_bars(root: &Area<'_>, frame: &Frame, query: &Query, aspect: &Aspect, caption: &str) -> DrawResult {
    root.fill(&WHITE)?;

    let col = aspect.columns.first().copied().unwrap_or_default();
    let bars: Vec<(usize, f64)> = query
        .teams
        .iter()
        .enumerate()
        .filter_map(|(i, t)| Some((i, frame.value(t, col)?)))
        .collect();
    let values: Vec<f64> = bars.iter().map(|(_, v)| *v).collect();

    let (lo, mut hi) = bar_y_range(&values);
    if hi <= lo {
        hi = lo + 1.0;
    }

    let teams = &query.teams;
    let n = teams.len() as f64;
    let mut chart = ChartBuilder::on(root)
        .caption(caption, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(35)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..n - 0.5, lo..hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(teams.len() * 2 + 1)
        .x_label_formatter(&|x| {
            let r = x.round();
            if (x - r).abs() < 1e-6 && r >= 0.0 && (r as usize) < teams.len() {
                teams[r as usize].clone()
            } else {
                s!()
            }
        })
        .y_desc(aspect.short)
        .label_style(LABEL_FONT)
        .draw()?;

    let color = team_color(0);
    chart.draw_series(bars.iter().map(|&(i, v)| {
        let x = i as f64;
        Rectangle::new([(x - 0.4, lo), (x + 0.4, v)], color.filled())
    }))?;
    chart.draw_series(bars.iter().map(|&(i, v)| {
        Text::new(format!("{v}"), (i as f64 - 0.2, v + (hi - lo) * 0.03), LABEL_FONT.into_font())
    }))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_by_aspect() {
        assert_eq!(ChartKind::for_aspect("mar"), ChartKind::Lines);
        assert_eq!(ChartKind::for_aspect("a/t"), ChartKind::Scatter);
        assert_eq!(ChartKind::for_aspect("acc"), ChartKind::GroupedBars);
        assert_eq!(ChartKind::for_aspect("pts"), ChartKind::Bars);
        assert_eq!(ChartKind::for_aspect("orb"), ChartKind::Bars);
        assert_eq!(ChartKind::for_aspect("drb"), ChartKind::Bars);
    }

    #[test]
    fn bar_range_for_several_teams() {
        // spread 100: ceil(8900 - 60), ceil(9000 + 40)
        assert_eq!(bar_y_range(&[9000.0, 8900.0]), (8840.0, 9040.0));
        assert_eq!(bar_y_range(&[10.5, 11.0, 12.5]), (10.0, 14.0));
    }

    #[test]
    fn bar_range_for_one_team() {
        // spread is a tenth of the value: ceil(1000 - 60), ceil(1000 + 40)
        assert_eq!(bar_y_range(&[1000.0]), (940.0, 1040.0));
        assert_eq!(bar_y_range(&[]), (0.0, 1.0));
    }

    #[test]
    fn title_names_league_and_season() {
        let q = Query::new("pts", &["MIA"], 2022);
        assert_eq!(title("Total points scored", &q), "Total points scored in NBA season 2021/2022");
        let q = Query::new("pts", &["BOS"], 1948);
        assert_eq!(title("Total points scored", &q), "Total points scored in BAA season 1947/1948");
    }

    #[test]
    fn sizes_scale_with_teams() {
        assert_eq!(ChartKind::Bars.size(1), (450, 450));
        assert_eq!(ChartKind::Bars.size(5), (750, 450));
        assert_eq!(ChartKind::GroupedBars.size(3), (1200, 700));
        assert_eq!(ChartKind::Lines.size(4), (1600, 900));
    }
}
