// @file chart.rs
// @brief plotters-backed scatter surface

use crate::vankrevelen::color::{DensityColorMap, parse_color};
use crate::vankrevelen::error::PlotError;
use crate::vankrevelen::plot::{COLOR_KEY, ScatterSurface};
use crate::vankrevelen::style::{PlotStyle, StyleValue};
use anyhow::Result;
use plotters::coord::Shift;
use plotters::element::{Drawable, PointCollection};
use plotters::prelude::*;
use plotters_backend::{BackendStyle, DrawingErrorKind};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Figure styling knobs, loadable from a yaml config.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartAppearance {
    pub margin: u32,
    pub x_label_area_size: u32,
    pub y_label_area_size: u32,
    pub marker_radius: u32,
    pub marker_alpha: f64,
    pub default_color: String,
    pub density_palette: [String; 2], // [low, high]
    pub label_font: String,
    pub label_font_size: u32,
}

impl Default for ChartAppearance {
    fn default() -> ChartAppearance {
        ChartAppearance {
            margin: 20,
            x_label_area_size: 40,
            y_label_area_size: 50,
            marker_radius: 3,
            marker_alpha: 0.8,
            default_color: "blue".to_string(),
            density_palette: ["#0040ff".to_string(), "#ff0040".to_string()],
            label_font: "sans-serif".to_string(),
            label_font_size: 14,
        }
    }
}

/// Load a `ChartAppearance` from a yaml file.
pub fn load_appearance(file: &str) -> Result<ChartAppearance> {
    let file = std::fs::File::open(file)?;
    Ok(serde_yaml::from_reader(file)?)
}

struct Marker {
    pos: (f64, f64),
    radius: u32,
    color: RGBAColor,
}

impl<'a> PointCollection<'a, (f64, f64)> for &'a Marker {
    type Point = &'a (f64, f64);
    type IntoIter = std::iter::Once<&'a (f64, f64)>;

    fn point_iter(self) -> Self::IntoIter {
        std::iter::once(&self.pos)
    }
}

impl<DB> Drawable<DB> for Marker
where
    DB: DrawingBackend,
{
    fn draw<I>(&self, pos: I, backend: &mut DB, _: (u32, u32)) -> Result<(), DrawingErrorKind<DB::ErrorType>>
    where
        I: Iterator<Item = (i32, i32)>,
    {
        let mut pos = pos;
        let pos = pos.next().unwrap();
        backend.draw_circle(pos, self.radius, &self.color.color(), true)?;
        Ok(())
    }
}

/// Scatter surface that buffers draw calls and flushes them onto a plotters
/// drawing area in `present`, so the mesh is always drawn under the points.
pub struct VanKrevelenChart<DB>
where
    DB: DrawingBackend,
{
    area: DrawingArea<DB, Shift>,
    app: ChartAppearance,
    markers: Vec<Marker>,
    grid: bool,
    x_desc: String,
    y_desc: String,
}

impl<DB> VanKrevelenChart<DB>
where
    DB: DrawingBackend,
{
    pub fn new(area: DrawingArea<DB, Shift>, appearance: ChartAppearance) -> VanKrevelenChart<DB> {
        VanKrevelenChart {
            area,
            app: appearance,
            markers: Vec::new(),
            grid: true,
            x_desc: String::new(),
            y_desc: String::new(),
        }
    }

    fn resolve_colors(&self, n: usize, style: &PlotStyle) -> Result<Vec<RGBColor>, PlotError> {
        match style.get(COLOR_KEY) {
            None => Ok(vec![parse_color(&self.app.default_color)?; n]),
            Some(StyleValue::Text(name)) => Ok(vec![parse_color(name)?; n]),
            Some(StyleValue::Series(values)) => {
                if values.len() != n {
                    return Err(PlotError::LengthMismatch {
                        expected: n,
                        actual: values.len(),
                    });
                }
                let map = DensityColorMap {
                    palette: [
                        parse_color(&self.app.density_palette[0])?,
                        parse_color(&self.app.density_palette[1])?,
                    ],
                };
                let picker = map.to_picker(values);
                Ok(values.iter().map(|&v| picker.get_color(v)).collect())
            }
            Some(StyleValue::Scalar(_)) => Err(PlotError::InvalidOption(
                "a scalar color must be given as text (a name or \"#rrggbb\")".to_string(),
            )),
        }
    }

    fn resolve_radii(&self, n: usize, style: &PlotStyle) -> Vec<u32> {
        let to_radius = |v: f64| v.round().max(1.0) as u32;
        match style.get("s") {
            Some(StyleValue::Scalar(s)) => vec![to_radius(*s); n],
            Some(StyleValue::Series(values)) => (0..n)
                .map(|i| values.get(i).map_or(self.app.marker_radius, |&s| to_radius(s)))
                .collect(),
            _ => vec![self.app.marker_radius; n],
        }
    }

    /// Draw everything buffered so far and flush the backing area.
    pub fn present(mut self) -> Result<(), PlotError> {
        let markers = std::mem::take(&mut self.markers);
        let x_range = compute_range(markers.iter().map(|m| m.pos.0), (0.0, 1.0));
        let y_range = compute_range(markers.iter().map(|m| m.pos.1), (0.0, 2.0));

        {
            let mut chart = ChartBuilder::on(&self.area)
                .margin(self.app.margin)
                .x_label_area_size(self.app.x_label_area_size)
                .y_label_area_size(self.app.y_label_area_size)
                .build_cartesian_2d(x_range, y_range)
                .map_err(|e| PlotError::Render(e.to_string()))?;

            let mut mesh = chart.configure_mesh();
            mesh.x_desc(self.x_desc.as_str())
                .y_desc(self.y_desc.as_str())
                .axis_desc_style((self.app.label_font.as_str(), self.app.label_font_size as i32));
            if !self.grid {
                mesh.disable_mesh();
            }
            mesh.draw().map_err(|e| PlotError::Render(e.to_string()))?;

            chart.draw_series(markers).map_err(|e| PlotError::Render(e.to_string()))?;
        }
        self.area.present().map_err(|e| PlotError::Render(e.to_string()))?;
        Ok(())
    }
}

impl<DB> ScatterSurface for VanKrevelenChart<DB>
where
    DB: DrawingBackend,
{
    fn scatter(&mut self, x: &[f64], y: &[f64], style: &PlotStyle) -> Result<(), PlotError> {
        if x.len() != y.len() {
            return Err(PlotError::LengthMismatch {
                expected: x.len(),
                actual: y.len(),
            });
        }
        let colors = self.resolve_colors(x.len(), style)?;
        let radii = self.resolve_radii(x.len(), style);
        let alpha = match style.get("alpha") {
            Some(StyleValue::Scalar(a)) => a.clamp(0.0, 1.0),
            _ => self.app.marker_alpha,
        };

        for i in 0..x.len() {
            self.markers.push(Marker {
                pos: (x[i], y[i]),
                radius: radii[i],
                color: colors[i].mix(alpha),
            });
        }
        Ok(())
    }

    fn grid(&mut self, enabled: bool) -> Result<(), PlotError> {
        self.grid = enabled;
        Ok(())
    }

    fn xlabel(&mut self, text: &str) -> Result<(), PlotError> {
        self.x_desc = text.to_string();
        Ok(())
    }

    fn ylabel(&mut self, text: &str) -> Result<(), PlotError> {
        self.y_desc = text.to_string();
        Ok(())
    }
}

// pad the data span; ratios are non-negative so the lower bound is not
// pushed below zero
fn compute_range(values: impl Iterator<Item = f64>, fallback: (f64, f64)) -> Range<f64> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return fallback.0..fallback.1;
    }
    if (max - min).abs() < 1e-12 {
        return (min - 0.5).max(0.0)..max + 0.5;
    }

    let pad = (max - min) * 0.1;
    let lower = if min >= 0.0 { (min - pad).max(0.0) } else { min - pad };
    lower..max + pad
}
