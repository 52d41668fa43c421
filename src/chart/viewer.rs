// Interactive window backend built on eframe and egui_plot

use egui::{
    Color32, Frame, Margin, Rect, RichText, Sense, ViewportBuilder, Visuals, pos2, style::Widgets,
    vec2,
};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, PlotUi, Points};
use log::{debug, info};

use super::{ChartRenderer, Figure, FigureBody, Theme, TrackColoring, group_markers_by_color};
use crate::errors::LaptraceError;
use crate::shaper::{CompoundStack, Series};

const DEFAULT_WINDOW_SIZE: [f32; 2] = [1000.0, 600.0];
const MIN_TRACK_WINDOW: f32 = 480.0;
const COLOR_BAR_BINS: usize = 32;
const COLOR_BAR_WIDTH: f32 = 90.0;

/// Opens a native window for every presented figure and blocks until the
/// user closes it
pub struct WindowRenderer {
    theme: Theme,
}

impl WindowRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl ChartRenderer for WindowRenderer {
    fn present(&mut self, figure: &Figure) -> Result<(), LaptraceError> {
        let title = figure
            .labels
            .title
            .clone()
            .unwrap_or_else(|| "laptrace".to_string());
        let inner_size = match figure.size {
            Some((width, height)) => [
                (width as f32).max(MIN_TRACK_WINDOW) + COLOR_BAR_WIDTH,
                (height as f32).max(MIN_TRACK_WINDOW),
            ],
            None => DEFAULT_WINDOW_SIZE,
        };
        let options = eframe::NativeOptions {
            viewport: ViewportBuilder::default()
                .with_inner_size(inner_size)
                .with_title(&title),
            ..Default::default()
        };

        info!("Opening chart window \"{}\"", title);
        debug!("Window inner size {:?}", inner_size);
        let figure = figure.clone();
        let theme = self.theme.clone();
        eframe::run_native(
            &title,
            options,
            Box::new(move |cc| Ok(Box::new(ChartViewerApp::new(figure, theme, cc)))),
        )
        .map_err(|e| LaptraceError::ViewerError {
            reason: e.to_string(),
        })
    }
}

/// Displays a single figure
pub struct ChartViewerApp {
    figure: Figure,
    theme: Theme,
}

impl ChartViewerApp {
    pub fn new(figure: Figure, theme: Theme, cc: &eframe::CreationContext<'_>) -> Self {
        let background: Color32 = theme.background.into();
        let visuals = Visuals {
            dark_mode: true,
            panel_fill: background,
            window_fill: background,
            extreme_bg_color: background,
            faint_bg_color: background,
            override_text_color: Some(theme.foreground.into()),
            widgets: Widgets::dark(),
            striped: false,
            ..Visuals::dark()
        };
        cc.egui_ctx.set_visuals(visuals);
        Self { figure, theme }
    }

    fn plot(&self, id: &str) -> Plot<'static> {
        let mut plot = Plot::new(id.to_string())
            .legend(Legend::default().background_alpha(self.theme.legend_background_alpha))
            .show_background(false);
        if let Some(label) = &self.figure.labels.x_label {
            plot = plot.x_axis_label(label.clone());
        }
        if let Some(label) = &self.figure.labels.y_label {
            plot = plot.y_axis_label(label.clone());
        }
        plot
    }

    fn show_lines(&self, plot_ui: &mut PlotUi, series: &[Series]) {
        for (index, s) in series.iter().enumerate() {
            // one line per segment so missing values show as gaps, the shared
            // name keeps a single legend entry
            for points in s.segments() {
                plot_ui.line(
                    Line::new(series_name(s, index), PlotPoints::new(points))
                        .color(s.color)
                        .width(s.width.unwrap_or(self.theme.default_line_width) as f32),
                );
            }
        }
    }

    fn show_bars(&self, plot_ui: &mut PlotUi, series: &[Series]) {
        for (index, s) in series.iter().enumerate() {
            let color: Color32 = s.color.into();
            let bars = s
                .points()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .map(|(x, y)| {
                    Bar::new(x, y)
                        .width(s.width.unwrap_or(self.theme.bar_width))
                        .fill(color)
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(series_name(s, index), bars).color(color));
        }
    }

    fn show_stacked_bars(&self, plot_ui: &mut PlotUi, stack: &CompoundStack) {
        let mut charts: Vec<BarChart> = Vec::with_capacity(stack.columns.len());
        for ((compound, column), color) in stack.columns.iter().zip(&stack.colors) {
            let color: Color32 = (*color).into();
            // laps on other compounds get zero height bars so indices line up for stacking
            let bars = stack
                .lap_axis
                .iter()
                .zip(column)
                .map(|(x, value)| {
                    Bar::new(*x, value.unwrap_or(0.))
                        .width(self.theme.stacked_bar_width)
                        .fill(color)
                })
                .collect();
            let below: Vec<&BarChart> = charts.iter().collect();
            let chart = BarChart::new(compound.to_string(), bars)
                .color(color)
                .stack_on(&below);
            charts.push(chart);
        }
        for chart in charts {
            plot_ui.bar_chart(chart);
        }
    }

    fn show_track_map(&self, plot_ui: &mut PlotUi, x: &[f64], y: &[f64], coloring: &TrackColoring) {
        let outline: Vec<[f64; 2]> = x.iter().zip(y).map(|(x, y)| [*x, *y]).collect();
        plot_ui.line(
            Line::new("", PlotPoints::new(outline))
                .color(self.theme.track_outline)
                .width(self.theme.track_outline_width as f32),
        );

        let radius = self.theme.marker_radius as f32;
        match coloring {
            TrackColoring::Continuous { .. } => {
                let colors = coloring.binned_marker_colors(Some(COLOR_BAR_BINS));
                for (color, points) in group_markers_by_color(x, y, &colors) {
                    plot_ui.points(
                        Points::new("", PlotPoints::new(points))
                            .color(color)
                            .radius(radius)
                            .filled(true),
                    );
                }
            }
            TrackColoring::Categorical {
                categories,
                palette,
                labels,
            } => {
                // faster category first so that it leads the legend
                for category in [1u8, 0] {
                    let points: Vec<[f64; 2]> = x
                        .iter()
                        .zip(y)
                        .zip(categories)
                        .filter(|(_, c)| u8::from(**c > 0) == category)
                        .map(|((x, y), _)| [*x, *y])
                        .collect();
                    plot_ui.points(
                        Points::new(labels[category as usize].clone(), PlotPoints::new(points))
                            .color(palette[category as usize])
                            .radius(radius)
                            .filled(true),
                    );
                }
            }
        }
    }

    fn color_bar(&self, ui: &mut egui::Ui, coloring: &TrackColoring) {
        let TrackColoring::Continuous { scale, label, .. } = coloring else {
            return;
        };
        let (min, max) = coloring.value_range().unwrap_or((0., 0.));
        ui.add_space(20.);
        ui.label(RichText::new(label).strong());
        ui.label(format!("{:.0}", max));

        let height = (ui.available_height() - 60.).max(40.);
        let (rect, _) = ui.allocate_exact_size(vec2(16., height), Sense::hover());
        let strip = height / COLOR_BAR_BINS as f32;
        for bin in 0..COLOR_BAR_BINS {
            let t = 1. - bin as f64 / (COLOR_BAR_BINS - 1) as f64;
            let top = rect.top() + bin as f32 * strip;
            ui.painter().rect_filled(
                Rect::from_min_max(pos2(rect.left(), top), pos2(rect.right(), top + strip)),
                0.0,
                scale.sample(t),
            );
        }
        ui.label(format!("{:.0}", min));
    }
}

fn series_name(series: &Series, index: usize) -> String {
    series
        .label
        .clone()
        .unwrap_or_else(|| format!("Series {}", index + 1))
}

impl eframe::App for ChartViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(title) = &self.figure.labels.title {
            egui::TopBottomPanel::top("chart_title")
                .frame(Frame::new().inner_margin(Margin::same(5)))
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| ui.heading(RichText::new(title).strong()));
                });
        }

        if let FigureBody::TrackMap { coloring, .. } = &self.figure.body {
            if matches!(coloring, TrackColoring::Continuous { .. }) {
                egui::SidePanel::right("color_bar")
                    .exact_width(COLOR_BAR_WIDTH)
                    .resizable(false)
                    .show(ctx, |ui| self.color_bar(ui, coloring));
            }
        }

        egui::CentralPanel::default()
            .frame(Frame::new().inner_margin(Margin::same(5)))
            .show(ctx, |ui| match &self.figure.body {
                FigureBody::Line(series) => {
                    self.plot("line_chart")
                        .show(ui, |plot_ui| self.show_lines(plot_ui, series));
                }
                FigureBody::Bar(series) => {
                    self.plot("bar_chart")
                        .show(ui, |plot_ui| self.show_bars(plot_ui, series));
                }
                FigureBody::StackedBar(stack) => {
                    self.plot("stacked_bar_chart")
                        .show(ui, |plot_ui| self.show_stacked_bars(plot_ui, stack));
                }
                FigureBody::TrackMap { x, y, coloring } => {
                    self.plot("track_map")
                        .data_aspect(1.0)
                        .show_axes(false)
                        .show_grid(false)
                        .show(ui, |plot_ui| self.show_track_map(plot_ui, x, y, coloring));
                }
            });
    }
}
