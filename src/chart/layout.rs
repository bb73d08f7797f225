use crate::chart::surface::{Anchor, LineRole, Point, Surface};
use crate::chart::{ChartFrame, ChartSpec, Guides};
use anyhow::Result;

const Y_TICKS: usize = 4;
const VALUE_LABEL_RISE: f64 = 5.0;
const X_LABEL_DROP: f64 = 15.0;
const Y_LABEL_INSET: f64 = 5.0;
/// Nudges y labels so they sit centered on their gridline.
const Y_LABEL_SHIFT: f64 = 3.0;
const TOOLTIP_OFFSET: f64 = 10.0;

/// A laid out bar: its rectangle plus the texts that belong to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub value_label: String,
    pub tooltip: String,
}

impl Bar {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    fn contains(&self, p: Point) -> bool {
        self.height > 0.0
            && p.x >= self.x
            && p.x <= self.x + self.width
            && p.y >= self.y
            && p.y <= self.y + self.height
    }
}

/// A y axis tick and its gridline.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub y: f64,
    /// The value rounded to the nearest integer.
    pub label: String,
}

/// The geometry of a chart, computed once and then drawn or hit-tested.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub frame: ChartFrame,
    pub scale_max: f64,
    pub bars: Vec<Bar>,
    /// Five ticks from 0 to `scale_max`, bottom to top.
    pub ticks: Vec<Tick>,
    /// The x coordinates of vertical guide lines.
    pub guides: Vec<f64>,
    /// Set when there is nothing to chart; nothing else is drawn then.
    pub empty_message: Option<String>,
}

impl ChartLayout {
    pub fn compute(spec: &ChartSpec, frame: ChartFrame) -> Self {
        let scale_max = spec.scale.resolve(&spec.entries);
        if spec.entries.is_empty() {
            return Self {
                frame,
                scale_max,
                bars: Vec::new(),
                ticks: Vec::new(),
                guides: Vec::new(),
                empty_message: Some(spec.empty_message.clone()),
            };
        }

        let n = spec.entries.len();
        let bar_width = frame.inner_width() / (n as f64 * 1.5);
        let gap = bar_width / 2.0;
        let height_of = |value: f64| {
            if scale_max > 0.0 {
                value / scale_max * frame.inner_height()
            } else {
                0.0
            }
        };

        let bars: Vec<Bar> = spec
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let height = height_of(entry.value);
                Bar {
                    index,
                    x: frame.margin + index as f64 * (bar_width + gap),
                    y: frame.baseline() - height,
                    width: bar_width,
                    height,
                    label: entry.label.clone(),
                    value_label: entry.value_label.clone(),
                    tooltip: entry.tooltip.clone(),
                }
            })
            .collect();

        let ticks = (0..=Y_TICKS)
            .map(|i| {
                let value = i as f64 / Y_TICKS as f64 * scale_max;
                Tick {
                    value,
                    y: frame.baseline() - height_of(value),
                    label: format!("{}", value.round() as i64),
                }
            })
            .collect();

        let guides = match spec.guides {
            Guides::None => Vec::new(),
            Guides::EveryThird => bars
                .iter()
                .filter(|b| b.index % 3 == 0 || b.index == n - 1)
                .map(Bar::center_x)
                .collect(),
        };

        Self {
            frame,
            scale_max,
            bars,
            ticks,
            guides,
            empty_message: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty_message.is_some()
    }

    /// The bar under `(x, y)`, if any. Zero-height bars cannot be hit.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Bar> {
        let p = Point::new(x, y);
        self.bars.iter().find(|b| b.contains(p))
    }

    pub fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        let f = self.frame;
        if let Some(message) = &self.empty_message {
            return surface.text(
                Point::new(f.width / 2.0, f.height / 2.0),
                message,
                Anchor::Middle,
            );
        }

        let left = f.margin;
        let right = f.width - f.margin;
        let top = f.margin;
        let bottom = f.baseline();
        surface.line(Point::new(left, bottom), Point::new(right, bottom), LineRole::Axis)?;
        surface.line(Point::new(left, top), Point::new(left, bottom), LineRole::Axis)?;

        for bar in &self.bars {
            let cx = bar.center_x();
            surface.rect(Point::new(bar.x, bar.y), bar.width, bar.height)?;
            surface.text(Point::new(cx, bottom + X_LABEL_DROP), &bar.label, Anchor::Middle)?;
            surface.text(
                Point::new(cx, bar.y - VALUE_LABEL_RISE),
                &bar.value_label,
                Anchor::Middle,
            )?;
        }

        for x in &self.guides {
            surface.line(Point::new(*x, top), Point::new(*x, bottom), LineRole::Guide)?;
        }

        for tick in &self.ticks {
            surface.text(
                Point::new(left - Y_LABEL_INSET, tick.y + Y_LABEL_SHIFT),
                &tick.label,
                Anchor::End,
            )?;
            surface.line(Point::new(left, tick.y), Point::new(right, tick.y), LineRole::Grid)?;
        }
        Ok(())
    }
}

/// What to show while the pointer is over a bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    /// The tooltip's bottom-left corner: right of and above the pointer.
    pub at: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HoverEvent {
    Enter(Tooltip),
    Leave,
}

/// Turns pointer movement over a chart into tooltip show and hide events.
#[derive(Debug, Default, Clone)]
pub struct Hover {
    over: Option<usize>,
}

impl Hover {
    pub fn new() -> Self {
        Self::default()
    }

    /// The index of the bar under the pointer.
    pub fn current(&self) -> Option<usize> {
        self.over
    }

    /// Returns an event only when the pointer enters a bar or leaves one. Moving within a bar
    /// keeps the tooltip where it first appeared.
    pub fn pointer_moved(&mut self, layout: &ChartLayout, x: f64, y: f64) -> Option<HoverEvent> {
        match (self.over, layout.hit_test(x, y)) {
            (Some(i), Some(bar)) if i == bar.index => None,
            (_, Some(bar)) => {
                self.over = Some(bar.index);
                Some(HoverEvent::Enter(Tooltip {
                    text: bar.tooltip.clone(),
                    at: Point::new(x + TOOLTIP_OFFSET, y - TOOLTIP_OFFSET),
                }))
            }
            (Some(_), None) => {
                self.over = None;
                Some(HoverEvent::Leave)
            }
            (None, None) => None,
        }
    }

    pub fn pointer_left(&mut self) -> Option<HoverEvent> {
        self.over.take().map(|_| HoverEvent::Leave)
    }
}
