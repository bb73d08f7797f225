use crate::chart::surface::{Anchor, LineRole, Point, Surface};
use crate::chart::ChartLayout;
use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const BAR: RGBColor = RGBColor(76, 175, 80);
const AXIS: RGBColor = RGBColor(51, 51, 51);
const GRID: RGBColor = RGBColor(224, 224, 224);
const TEXT: RGBColor = RGBColor(51, 51, 51);
const FONT_SIZE: f64 = 10.0;

/// Draws onto an SVG document held in a `String`.
///
/// Coordinates are rounded to whole units, which is all the SVG backend accepts.
pub struct SvgSurface<'a> {
    area: DrawingArea<SVGBackend<'a>, Shift>,
}

impl<'a> SvgSurface<'a> {
    pub fn new(buf: &'a mut String, width: u32, height: u32) -> Self {
        Self {
            area: SVGBackend::with_string(buf, (width, height)).into_drawing_area(),
        }
    }

    /// Writes the finished document into the buffer.
    pub fn finish(self) -> Result<()> {
        self.area
            .present()
            .map_err(|e| anyhow!("Unable to write the chart: {e}"))
    }
}

fn px(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn drawing_error(e: impl std::fmt::Display) -> anyhow::Error {
    anyhow!("Unable to draw the chart: {e}")
}

impl Surface for SvgSurface<'_> {
    fn line(&mut self, from: Point, to: Point, role: LineRole) -> Result<()> {
        let style = match role {
            LineRole::Axis => AXIS.stroke_width(1),
            LineRole::Grid | LineRole::Guide => GRID.stroke_width(1),
        };
        self.area
            .draw(&PathElement::new(vec![px(from), px(to)], style))
            .map_err(drawing_error)
    }

    fn rect(&mut self, at: Point, width: f64, height: f64) -> Result<()> {
        let corner = Point::new(at.x + width, at.y + height);
        self.area
            .draw(&Rectangle::new([px(at), px(corner)], BAR.filled()))
            .map_err(drawing_error)
    }

    fn text(&mut self, at: Point, text: &str, anchor: Anchor) -> Result<()> {
        let h_pos = match anchor {
            Anchor::Start => HPos::Left,
            Anchor::Middle => HPos::Center,
            Anchor::End => HPos::Right,
        };
        let style = ("sans-serif", FONT_SIZE)
            .into_font()
            .color(&TEXT)
            .pos(Pos::new(h_pos, VPos::Bottom));
        self.area
            .draw(&Text::new(text.to_string(), px(at), style))
            .map_err(drawing_error)
    }
}

/// Renders `layout` as a complete SVG document.
pub fn render_svg(layout: &ChartLayout) -> Result<String> {
    let mut buf = String::new();
    {
        let mut surface = SvgSurface::new(
            &mut buf,
            layout.frame.width.round() as u32,
            layout.frame.height.round() as u32,
        );
        layout.draw(&mut surface)?;
        surface.finish()?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartFrame, ChartSpec};
    use crate::model::YearMonth;
    use crate::projection::TallyEntry;

    #[test]
    fn test_render_habit_chart() {
        let tally = vec![
            TallyEntry {
                name: "workout".into(),
                count: 12,
                retired: false,
            },
            TallyEntry {
                name: "code".into(),
                count: 31,
                retired: false,
            },
        ];
        let spec = ChartSpec::habits(&tally, YearMonth::new(2024, 1).unwrap());
        let svg = render_svg(&ChartLayout::compute(&spec, ChartFrame::default())).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("workout"));
        assert!(svg.contains("<rect"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_render_empty_chart() {
        let spec = ChartSpec::habits(&[], YearMonth::new(2024, 1).unwrap());
        let svg = render_svg(&ChartLayout::compute(&spec, ChartFrame::default())).unwrap();
        assert!(svg.contains("No habit data for this month."));
        assert!(!svg.contains("<rect"));
    }
}
