//! Column chart for a numeric series, drawn with eighth blocks

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

const BARS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One column per value, scaled to the full height of the area
pub struct SeriesChart<'a> {
    data: &'a [u64],
    style: Style,
}

impl<'a> SeriesChart<'a> {
    pub fn new(data: &'a [u64]) -> Self {
        Self {
            data,
            style: Style::default().fg(Color::Cyan),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// Height of `value` in eighths of a cell, out of `rows * 8`
fn eighths(value: u64, max: u64, rows: u16) -> u64 {
    let total = u64::from(rows) * 8;
    ((value as f64 / max.max(1) as f64) * total as f64).round() as u64
}

impl<'a> Widget for SeriesChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.data.is_empty() {
            return;
        }

        let max = self.data.iter().copied().max().unwrap_or(1);

        // newest values win when the area is narrower than the series
        let visible = self.data.len().min(area.width as usize);
        let start = self.data.len() - visible;

        for (i, &value) in self.data[start..].iter().enumerate() {
            let x = area.x + i as u16;
            let mut remaining = eighths(value, max, area.height);
            for row in (0..area.height).rev() {
                let fill = remaining.min(8);
                remaining -= fill;
                buf.get_mut(x, area.y + row)
                    .set_char(BARS[fill as usize])
                    .set_style(self.style);
            }
        }
    }
}
