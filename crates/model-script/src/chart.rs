use std::{fs, iter, path::Path};

use plotters::prelude::*;

use crate::config::{Annotation, Series};

/// Fixed plot window: PPI on x, IPC on y.
pub const X_RANGE: (f64, f64) = (1.0, 3.0);
pub const Y_RANGE: (f64, f64) = (0.0, 5.0);

/// `IPC = Rate/PPI` overlay curves: (rate, dashed, color).
const MODEL_RATES: &[(f64, bool, RGBColor)] = &[(3.1, false, BLACK), (6.0, true, GREEN)];

const CONNECTOR: RGBColor = RGBColor(200, 200, 200);

pub struct ModelPoint {
    pub name: String,
    pub ppi: f64,
    pub ipc: f64,
    pub ideal_ipc: f64,
}

impl ModelPoint {
    fn of(&self, series: Series) -> f64 {
        match series {
            Series::Ipc => self.ipc,
            Series::IdealIpc => self.ideal_ipc,
        }
    }

    fn in_window(&self) -> bool {
        X_RANGE.0 <= self.ppi && self.ppi <= X_RANGE.1
    }
}

pub fn render_model_chart(
    points: &[ModelPoint],
    annotations: &[Annotation],
    output: &Path,
) -> anyhow::Result<()> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    let points: Vec<&ModelPoint> = points.iter().filter(|p| p.in_window()).collect();

    let root = BitMapBackend::new(output, (1000, 720)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(X_RANGE.0..X_RANGE.1, Y_RANGE.0..Y_RANGE.1)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("PPI: pointers per instruction")
        .y_desc("IPC")
        .label_style(("sans-serif", 16).into_font())
        .draw()?;

    // vertical connector between the two series at each benchmark
    for point in &points {
        chart.draw_series(LineSeries::new(
            [(point.ppi, point.ipc), (point.ppi, point.ideal_ipc)],
            CONNECTOR,
        ))?;
    }

    chart
        .draw_series(
            points
                .iter()
                .map(|p| TriangleMarker::new((p.ppi, p.ideal_ipc), 6, BLUE.filled())),
        )?
        .label("IPC in idealized OoO")
        .legend(|(x, y)| TriangleMarker::new((x + 10, y), 6, BLUE.filled()));

    chart
        .draw_series(
            points
                .iter()
                .map(|p| Circle::new((p.ppi, p.ipc), 4, RED.filled())),
        )?
        .label("IPC in dataflow")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, RED.filled()));

    for &(rate, dashed, color) in MODEL_RATES {
        let style = color.stroke_width(2);
        let series = if dashed {
            chart.draw_series(DashedLineSeries::new(curve(rate), 6, 4, style))?
        } else {
            chart.draw_series(LineSeries::new(curve(rate), style))?
        };
        series
            .label(format!("IPC = Rate/PPI, Rate = {rate}"))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        // mark the benchmarks whose ideal IPC the curve underestimates
        chart.draw_series(
            points
                .iter()
                .filter(|p| rate / p.ppi < p.ideal_ipc && rate / p.ppi <= Y_RANGE.1)
                .map(|p| Circle::new((p.ppi, rate / p.ppi), 3, color.filled())),
        )?;
    }

    for annotation in annotations {
        let Some(point) = points.iter().find(|p| p.name == annotation.benchmark) else {
            eprintln!(
                "annotation benchmark {:?} has no plotted row, skipping",
                annotation.benchmark
            );
            continue;
        };
        let at = (point.ppi, point.of(annotation.series));
        chart.draw_series(iter::once(Circle::new(at, 18, BLACK)))?;
        chart.draw_series(iter::once(Text::new(
            annotation.text.clone(),
            (at.0 + annotation.dx, at.1 + annotation.dy),
            ("sans-serif", 15).into_font(),
        )))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Sample points of `IPC = rate/PPI`, clamped so the curve enters the
/// window through its top edge instead of overshooting it.
fn curve(rate: f64) -> Vec<(f64, f64)> {
    let start = (rate / Y_RANGE.1).max(X_RANGE.0);
    let steps = ((X_RANGE.1 - start) / 0.01) as usize;
    (0..=steps)
        .map(|i| {
            let x = start + i as f64 * 0.01;
            (x, rate / x)
        })
        .collect()
}
