use plotters::prelude::*;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::config::PlotConfig;
use crate::models::{Annotation, Candle, CandleMatch, ChartSpec, PricePoint, TradeEvent, TradeSide};
use crate::utils::errors::PlotError;

/// Price units between the window's extreme closes and the y-axis limits
pub const Y_MARGIN: f64 = 10.0;

/// Price units between an annotated point and its label
pub const LABEL_OFFSET: f64 = 5.0;

const ARROW_HEAD_PX: i32 = 6;
const LABEL_NUDGE_PX: (i32, i32) = (4, -18);

/// Draws a prepared chart
pub trait ChartRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<(), PlotError>;
}

/// `[min(close) - 10, max(close) + 10]`; `None` for an empty window
pub fn y_axis_range(rows: &[Candle]) -> Option<(f64, f64)> {
    if rows.is_empty() {
        return None;
    }
    let min_price = rows.iter().map(|c| c.close_price).fold(f64::INFINITY, f64::min);
    let max_price = rows.iter().map(|c| c.close_price).fold(f64::NEG_INFINITY, f64::max);
    Some((min_price - Y_MARGIN, max_price + Y_MARGIN))
}

/// `BUY: 20000` / `SELL: 20100.5`
pub fn annotation_for(side: TradeSide, matched: &CandleMatch) -> Annotation {
    Annotation {
        side,
        text: format!("{}: {}", side.label(), matched.close_price),
        point: PricePoint {
            timestamp: matched.close_time,
            price: matched.close_price,
        },
        text_at: PricePoint {
            timestamp: matched.close_time,
            price: matched.close_price + LABEL_OFFSET,
        },
    }
}

/// Collect everything that will be drawn for one trade
///
/// `rows` is the plot window already sliced from the candle table.
pub fn build_chart_spec(
    config: &PlotConfig,
    event: &TradeEvent,
    rows: &[Candle],
    buy: &CandleMatch,
    sell: &CandleMatch,
    trailing_stops: Vec<PricePoint>,
) -> Option<ChartSpec> {
    let y_range = y_axis_range(rows)?;
    let buy_id = event.buy_id.to_string();

    let series = rows
        .iter()
        .map(|c| PricePoint {
            timestamp: c.close_time,
            price: c.close_price,
        })
        .collect();

    Some(ChartSpec {
        title: format!(
            "{} {} buy #{}",
            config.dataset.symbol, config.dataset.interval, buy_id
        ),
        series,
        y_range,
        buy: annotation_for(TradeSide::Buy, buy),
        sell: annotation_for(TradeSide::Sell, sell),
        trailing_stops,
        output_path: config.output_path(&buy_id),
        width: config.width,
        height: config.height,
    })
}

fn side_color(side: TradeSide) -> RGBColor {
    match side {
        TradeSide::Buy => RED,
        TradeSide::Sell => GREEN,
    }
}

/// Renders charts to PNG files with the plotters bitmap backend
#[derive(Debug, Default, Clone, Copy)]
pub struct PngChartRenderer;

impl ChartRenderer for PngChartRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<(), PlotError> {
        let (first, last) = match (spec.series.first(), spec.series.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(PlotError::Render("No price data to plot".to_string())),
        };

        // Get time range; a single-row window still needs a non-zero span
        let x_min = first.timestamp;
        let mut x_max = last.timestamp;
        if x_max <= x_min {
            x_max = x_min + Duration::minutes(1);
        }
        let (y_min, y_max) = spec.y_range;

        debug!("Rendering {} points to {}", spec.series.len(), spec.output_path.display());

        let backend = BitMapBackend::new(&spec.output_path, (spec.width, spec.height));
        let root = backend.into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| PlotError::Render(format!("Failed to fill canvas: {}", e)))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, ("sans-serif", 30.0).into_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| PlotError::Render(format!("Failed to build chart: {}", e)))?;

        chart
            .configure_mesh()
            .x_labels(8)
            .x_label_formatter(&|t: &DateTime<Utc>| t.format("%m-%d %H:%M").to_string())
            .y_desc("Close price")
            .x_desc("Close time")
            .draw()
            .map_err(|e| PlotError::Render(format!("Failed to draw mesh: {}", e)))?;

        chart
            .draw_series(LineSeries::new(
                spec.series.iter().map(|p| (p.timestamp, p.price)),
                &BLUE,
            ))
            .map_err(|e| PlotError::Render(format!("Failed to draw price line: {}", e)))?
            .label("CLOSE_PRICE")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

        if !spec.trailing_stops.is_empty() {
            chart
                .draw_series(LineSeries::new(
                    spec.trailing_stops.iter().map(|p| (p.timestamp, p.price)),
                    &MAGENTA,
                ))
                .map_err(|e| PlotError::Render(format!("Failed to draw trailing stop: {}", e)))?
                .label("TRAILING_STOP")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], MAGENTA));
            // A lone stop has no line segment, so mark every point
            chart
                .draw_series(
                    spec.trailing_stops
                        .iter()
                        .map(|p| Circle::new((p.timestamp, p.price), 3, MAGENTA.filled())),
                )
                .map_err(|e| PlotError::Render(format!("Failed to draw trailing stop points: {}", e)))?;
        }

        for annotation in [&spec.buy, &spec.sell] {
            let color = side_color(annotation.side);
            let point = (annotation.point.timestamp, annotation.point.price);
            let text_at = (annotation.text_at.timestamp, annotation.text_at.price);

            // Arrow shaft from the label down to the candle
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![text_at, point],
                    color.stroke_width(2),
                )))
                .map_err(|e| PlotError::Render(format!("Failed to draw arrow: {}", e)))?;
            // Arrow head touching the candle, pointing down
            chart
                .draw_series(std::iter::once(
                    EmptyElement::at(point)
                        + Polygon::new(
                            vec![(0, 0), (-ARROW_HEAD_PX, -2 * ARROW_HEAD_PX), (ARROW_HEAD_PX, -2 * ARROW_HEAD_PX)],
                            color.filled(),
                        ),
                ))
                .map_err(|e| PlotError::Render(format!("Failed to draw arrow head: {}", e)))?;
            // Text anchors at its top-left corner; lift it clear of the shaft
            chart
                .draw_series(std::iter::once(
                    EmptyElement::at(text_at)
                        + Text::new(
                            annotation.text.clone(),
                            LABEL_NUDGE_PX,
                            ("sans-serif", 16).into_font().color(&color),
                        ),
                ))
                .map_err(|e| PlotError::Render(format!("Failed to draw label: {}", e)))?;
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| PlotError::Render(format!("Failed to draw legend: {}", e)))?;

        root.present()
            .map_err(|e| PlotError::Render(format!("Failed to render chart: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TradeId;
    use crate::services::test_support::candle_at;

    fn event(id: i64) -> TradeEvent {
        TradeEvent {
            buy_id: TradeId::Number(id),
            buy_time: "2023-01-05 10:00:00".to_string(),
            sell_time: "2023-01-05 10:02:00".to_string(),
            trailing_sell: Vec::new(),
        }
    }

    fn matched(rows: &[Candle], index: usize) -> CandleMatch {
        CandleMatch {
            index,
            close_time: rows[index].close_time,
            close_price: rows[index].close_price,
        }
    }

    #[test]
    fn test_y_range_is_exact_margin() {
        let rows = vec![
            candle_at("2023-01-05 10:00:00", 20000.0),
            candle_at("2023-01-05 10:01:00", 19950.25),
            candle_at("2023-01-05 10:02:00", 20100.0),
        ];
        assert_eq!(y_axis_range(&rows), Some((19940.25, 20110.0)));
        assert_eq!(y_axis_range(&[]), None);
    }

    #[test]
    fn test_annotation_labels_and_offset() {
        let rows = vec![candle_at("2023-01-05 10:00:00", 20000.0)];
        let buy = annotation_for(TradeSide::Buy, &matched(&rows, 0));
        assert_eq!(buy.text, "BUY: 20000");
        assert_eq!(buy.text_at.price, 20005.0);
        assert_eq!(buy.text_at.timestamp, buy.point.timestamp);

        let rows = vec![candle_at("2023-01-05 10:00:00", 20100.5)];
        let sell = annotation_for(TradeSide::Sell, &matched(&rows, 0));
        assert_eq!(sell.text, "SELL: 20100.5");
    }

    #[test]
    fn test_build_chart_spec() {
        let rows = vec![
            candle_at("2023-01-05 10:00:00", 20000.0),
            candle_at("2023-01-05 10:01:00", 20050.0),
            candle_at("2023-01-05 10:02:00", 20100.0),
        ];
        let config = PlotConfig::default();
        let spec = build_chart_spec(&config, &event(1), &rows, &matched(&rows, 0), &matched(&rows, 2), Vec::new())
            .expect("non-empty window");

        assert_eq!(spec.series.len(), 3);
        assert_eq!(spec.series[1].price, 20050.0);
        assert_eq!(spec.y_range, (19990.0, 20110.0));
        assert_eq!(spec.buy.text, "BUY: 20000");
        assert_eq!(spec.sell.text, "SELL: 20100");
        assert_eq!(spec.output_path, std::path::PathBuf::from("plots/buy_1.png"));
        assert_eq!(spec.title, "BTCUSDT 1m buy #1");
    }

    #[test]
    fn test_empty_window_has_no_spec() {
        let rows = vec![candle_at("2023-01-05 10:00:00", 20000.0)];
        let m = matched(&rows, 0);
        let config = PlotConfig::default();
        assert!(build_chart_spec(&config, &event(1), &[], &m, &m, Vec::new()).is_none());
    }

    const PNG_MAGIC: [u8; 4] = [0x89, b'P', b'N', b'G'];

    fn config_in(dir: &std::path::Path) -> PlotConfig {
        PlotConfig {
            output_dir: dir.to_path_buf(),
            width: 640,
            height: 480,
            ..PlotConfig::default()
        }
    }

    fn assert_png(path: &std::path::Path) {
        let bytes = std::fs::read(path).expect("chart written");
        assert!(bytes.len() > PNG_MAGIC.len());
        assert_eq!(&bytes[..4], &PNG_MAGIC[..]);
    }

    #[test]
    fn test_png_renderer_writes_chart() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config_in(dir.path());
        let rows = vec![
            candle_at("2023-01-05 10:00:00", 20000.0),
            candle_at("2023-01-05 10:01:00", 20050.0),
            candle_at("2023-01-05 10:02:00", 20100.0),
        ];
        let spec = build_chart_spec(&config, &event(1), &rows, &matched(&rows, 0), &matched(&rows, 2), Vec::new())
            .expect("non-empty window");

        PngChartRenderer.render(&spec).expect("render");
        assert_eq!(spec.output_path, dir.path().join("buy_1.png"));
        assert_png(&spec.output_path);
    }

    #[test]
    fn test_png_renderer_single_row_window() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config_in(dir.path());
        let rows = vec![candle_at("2023-01-05 10:00:00", 20000.0)];
        let m = matched(&rows, 0);
        let spec = build_chart_spec(&config, &event(2), &rows, &m, &m, Vec::new()).expect("one row");

        PngChartRenderer.render(&spec).expect("render");
        assert_png(&dir.path().join("buy_2.png"));
    }

    #[test]
    fn test_png_renderer_single_trailing_stop() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config_in(dir.path());
        let rows = vec![
            candle_at("2023-01-05 10:00:00", 20000.0),
            candle_at("2023-01-05 10:01:00", 20050.0),
        ];
        let stops = vec![PricePoint {
            timestamp: rows[1].close_time,
            price: 19990.0,
        }];
        let spec = build_chart_spec(&config, &event(3), &rows, &matched(&rows, 0), &matched(&rows, 1), stops)
            .expect("non-empty window");

        PngChartRenderer.render(&spec).expect("render");
        assert_png(&dir.path().join("buy_3.png"));
    }

    #[test]
    fn test_png_renderer_annotations_outside_window() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config_in(dir.path());
        let rows = vec![
            candle_at("2023-01-05 10:00:00", 20000.0),
            candle_at("2023-01-05 10:01:00", 20050.0),
        ];
        let outside = vec![
            candle_at("2023-01-05 09:00:00", 21000.0),
            candle_at("2023-01-05 11:00:00", 19000.0),
        ];
        let spec = build_chart_spec(
            &config,
            &event(4),
            &rows,
            &matched(&outside, 1),
            &matched(&outside, 0),
            Vec::new(),
        )
        .expect("non-empty window");

        PngChartRenderer.render(&spec).expect("render");
        assert_png(&dir.path().join("buy_4.png"));
    }
}
