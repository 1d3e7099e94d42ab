use crate::components::fit_to_width;
use crate::themes::Theme;
use ratatui::text::{Line, Span};

use timeline_core::formatting::format_count;
use timeline_core::models::CategoryLabel;
use timeline_core::time_utils::period_label;
use timeline_data::aggregator::TimelineRow;

/// Character used for every bar segment.
pub const BAR_CHAR: &str = "█";

/// One horizontal stacked bar: the period label, one coloured segment per
/// category in display order, then the period total.
///
/// Segment widths are proportional to `scale_max`, the largest period total
/// in the chart, so bars are comparable across periods.
pub struct StackedBar<'a> {
    pub row: &'a TimelineRow,
    pub scale_max: usize,
    /// Columns available to the bar itself.
    pub width: u16,
    /// Columns reserved for the period label.
    pub label_width: usize,
    pub theme: &'a Theme,
}

impl<'a> StackedBar<'a> {
    pub fn new(row: &'a TimelineRow, scale_max: usize, theme: &'a Theme) -> Self {
        Self {
            row,
            scale_max,
            width: 50,
            label_width: 10,
            theme,
        }
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Column count of each segment, in category order.
    ///
    /// The bar spans `round(total * width / scale_max)` columns and never more
    /// than `width`, so the largest period fills the width exactly. Segments
    /// split that span at rounded cumulative boundaries. A non-zero count gets
    /// at least one column, taken from the widest segment, while the span
    /// has room for it.
    pub fn segment_widths(&self) -> [usize; 3] {
        let mut widths = [0usize; 3];
        let counts = CategoryLabel::ALL.map(|label| self.row.counts.get(label));
        let total: usize = counts.iter().sum();
        if self.scale_max == 0 || total == 0 {
            return widths;
        }

        let width = self.width as usize;
        let non_zero = counts.iter().filter(|&&c| c > 0).count();
        let span = rounded_div(total * width, self.scale_max)
            .max(non_zero)
            .min(width);

        let mut cumulative = 0usize;
        let mut boundary = 0usize;
        for (i, &count) in counts.iter().enumerate() {
            cumulative += count;
            let next = rounded_div(cumulative * span, total);
            widths[i] = next - boundary;
            boundary = next;
        }

        for i in 0..widths.len() {
            if counts[i] == 0 || widths[i] > 0 {
                continue;
            }
            let widest = (0..widths.len()).max_by_key(|&j| widths[j]).unwrap_or(i);
            if widths[widest] > 1 {
                widths[widest] -= 1;
                widths[i] = 1;
            }
        }
        widths
    }

    pub fn to_line(&self) -> Line<'a> {
        let mut spans: Vec<Span<'a>> = vec![Span::styled(
            format!("{} ", fit_to_width(&period_label(&self.row.period), self.label_width)),
            self.theme.chart_label,
        )];

        for (label, chars) in CategoryLabel::ALL.into_iter().zip(self.segment_widths()) {
            if chars > 0 {
                spans.push(Span::styled(
                    BAR_CHAR.repeat(chars),
                    self.theme.category_style(label),
                ));
            }
        }

        spans.push(Span::styled(
            format!(" {}", format_count(self.row.counts.total())),
            self.theme.chart_label,
        ));

        Line::from(spans)
    }
}

/// `numerator / denominator` rounded half up.
fn rounded_div(numerator: usize, denominator: usize) -> usize {
    (2 * numerator + denominator) / (2 * denominator)
}

/// Colour key for the chart: one swatch and name per category.
pub fn legend_line(theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for label in CategoryLabel::ALL {
        spans.push(Span::styled(BAR_CHAR.repeat(2), theme.category_style(label)));
        spans.push(Span::styled(format!(" {}   ", label.label()), theme.label));
    }
    Line::from(spans)
}
