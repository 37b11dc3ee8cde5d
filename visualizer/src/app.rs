use crate::config::VisualizerConfig;
use crate::globe_view::GlobeCanvas;
use crate::surface::{CanvasSurface, GlobeFrame};
use iced::{
    time::{self, Instant},
    widget::{button, canvas::Canvas, column, pick_list, row, text, Column, Container},
    window, Alignment, Element, Length, Size, Subscription, Task, Theme,
};
use log::{info, warn};
use sarcore::dashboard::SarDashboard;
use sarcore::filter::Facet;
use sarcore::presenter::GlobePresenter;
use sarcore::record::{Frequency, Polarization};
use sarcore::source::{BatchOrigin, DataSource, LoadOutcome, RecordFetcher};
use std::time::Duration;

/// Radians per orbit button press.
const ORBIT_STEP: f64 = 0.15;
/// Fixed width of the control column left of the globe.
const CONTROL_WIDTH: f32 = 320.0;
/// Outer padding and column spacing of the top-level row.
const LAYOUT_PADDING: f32 = 20.0;
const LAYOUT_SPACING: f32 = 20.0;
/// Upper bound on one frame's step so a stalled window does not skip animations.
const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub enum Message {
    Tick(Instant),
    Reload,
    DataLoaded(LoadOutcome),
    FrequencyChanged(Facet<Frequency>),
    PolarizationChanged(Facet<Polarization>),
    Animate,
    Focus,
    ToggleRotation,
    Orbit(f64, f64),
    Resized(Size),
}

/// Size of the globe canvas inside a window of `window` size.
fn canvas_size(window: Size) -> (u32, u32) {
    let width = window.width - CONTROL_WIDTH - LAYOUT_SPACING - 2.0 * LAYOUT_PADDING;
    let height = window.height - 2.0 * LAYOUT_PADDING;
    (width.max(0.0) as u32, height.max(0.0) as u32)
}

pub struct SarVisualizer<F> {
    config: VisualizerConfig,
    source: DataSource<F>,
    dashboard: SarDashboard<CanvasSurface>,
    frame: Option<GlobeFrame>,
    last_tick: Option<Instant>,
    focus_scheduled: bool,
    auto_rotate: bool,
    status: String,
}

impl<F> SarVisualizer<F>
where
    F: RecordFetcher + Clone + Send + Sync + 'static,
{
    pub fn boot(config: VisualizerConfig, fetcher: F) -> (Self, Task<Message>) {
        let presenter = GlobePresenter::new(CanvasSurface::new(), config.globe.clone());
        let dashboard = SarDashboard::new(presenter);
        let status = if dashboard.start() {
            "Loading SAR data..."
        } else {
            "Globe unavailable; statistics only"
        };
        let state = Self {
            source: DataSource::new(fetcher, config.fallback.clone()),
            auto_rotate: config.globe.auto_rotate,
            config,
            dashboard,
            frame: None,
            last_tick: None,
            focus_scheduled: false,
            status: status.into(),
        };
        let task = state.load_task();
        (state, task)
    }

    fn load_task(&self) -> Task<Message> {
        let source = self.source.clone();
        Task::perform(async move { source.load().await }, Message::DataLoaded)
    }

    pub fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick(now) => {
                let dt = state
                    .last_tick
                    .map(|last| now.saturating_duration_since(last))
                    .unwrap_or_else(|| state.config.frame_interval())
                    .min(MAX_FRAME_STEP);
                state.last_tick = Some(now);
                state.advance(dt);
                Task::none()
            }
            Message::Reload => {
                state.status = "Reloading SAR data...".into();
                state.load_task()
            }
            Message::DataLoaded(outcome) => {
                state.status = match &outcome.origin {
                    BatchOrigin::Remote => format!("{} observations from backend", outcome.batch.len()),
                    BatchOrigin::Fallback { reason } => {
                        format!("Backend unavailable ({}); showing sample data", reason)
                    }
                };
                state.dashboard.apply_outcome(outcome);
                if !state.focus_scheduled {
                    let delay = state.config.focus_delay();
                    let distance = state.config.focus_distance;
                    state.dashboard.with_presenter(|presenter| {
                        let marker = presenter.options().highlight.clone();
                        presenter.schedule_focus(delay, marker.lat, marker.lng, distance);
                    });
                    state.focus_scheduled = true;
                }
                Task::none()
            }
            Message::FrequencyChanged(facet) => {
                state.dashboard.set_frequency(facet);
                Task::none()
            }
            Message::PolarizationChanged(facet) => {
                state.dashboard.set_polarization(facet);
                Task::none()
            }
            Message::Animate => {
                state.dashboard.with_presenter(|presenter| presenter.reveal());
                Task::none()
            }
            Message::Focus => {
                let distance = state.config.focus_distance;
                state
                    .dashboard
                    .with_presenter(|presenter| presenter.focus_highlight(distance));
                Task::none()
            }
            Message::ToggleRotation => {
                state.auto_rotate = !state.auto_rotate;
                let (enabled, speed) = (state.auto_rotate, state.config.globe.rotation_speed);
                state
                    .dashboard
                    .with_presenter(|presenter| presenter.set_auto_rotate(enabled, speed));
                Task::none()
            }
            Message::Orbit(d_azimuth, d_polar) => {
                let moved = state
                    .dashboard
                    .with_presenter(|presenter| presenter.orbit(d_azimuth, d_polar))
                    .unwrap_or(false);
                if !moved {
                    warn!("orbit ignored: controls unavailable");
                }
                Task::none()
            }
            Message::Resized(window) => {
                let (width, height) = canvas_size(window);
                info!("viewport resized to {}x{}", width, height);
                state
                    .dashboard
                    .with_presenter(|presenter| presenter.resize(width, height));
                Task::none()
            }
        }
    }

    fn advance(&mut self, dt: Duration) {
        let rendered = self.dashboard.tick(dt);
        if rendered {
            self.frame = self
                .dashboard
                .with_presenter(|presenter| presenter.surface().frame().cloned())
                .flatten();
        }
    }

    pub fn view(state: &Self) -> Element<'_, Message> {
        let selection = state.dashboard.selection();
        let loads = state.source.metrics().snapshot();

        let controls = column![
            text("SAR Globe").size(26),
            text("Frequency").size(14),
            pick_list(
                Facet::options(&Frequency::ALL),
                Some(selection.frequency),
                Message::FrequencyChanged
            ),
            text("Polarization").size(14),
            pick_list(
                Facet::options(&Polarization::ALL),
                Some(selection.polarization),
                Message::PolarizationChanged
            ),
            row![
                button("Reload").on_press(Message::Reload).padding(8),
                button("Animate Points").on_press(Message::Animate).padding(8),
            ]
            .spacing(8),
            row![
                button("Focus Japan").on_press(Message::Focus).padding(8),
                button(if state.auto_rotate { "Stop Rotation" } else { "Rotate" })
                    .on_press(Message::ToggleRotation)
                    .padding(8),
            ]
            .spacing(8),
            row![
                button("<").on_press(Message::Orbit(-ORBIT_STEP, 0.0)),
                button("^").on_press(Message::Orbit(0.0, -ORBIT_STEP)),
                button("v").on_press(Message::Orbit(0.0, ORBIT_STEP)),
                button(">").on_press(Message::Orbit(ORBIT_STEP, 0.0)),
            ]
            .spacing(6),
            text(&state.status).size(14),
            text(format!(
                "Backend loads: {} / sample fallbacks: {}",
                loads.remote, loads.fallback
            ))
            .size(12),
            text("Statistics").size(20),
            state.stats_column(),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(CONTROL_WIDTH));

        let globe = Canvas::new(GlobeCanvas {
            frame: state.frame.clone(),
        })
        .width(Length::Fill)
        .height(Length::Fill);

        let layout = row![controls, globe]
            .spacing(LAYOUT_SPACING)
            .align_y(Alignment::Start)
            .padding(LAYOUT_PADDING);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn stats_column(&self) -> Column<'_, Message> {
        self.dashboard
            .stats_entries()
            .into_iter()
            .fold(Column::new().spacing(4), |col, entry| {
                col.push(
                    row![
                        text(entry.label).size(14).width(Length::Fill),
                        text(entry.count.to_string()).size(14),
                    ]
                    .spacing(8),
                )
            })
    }

    pub fn subscription(state: &Self) -> Subscription<Message> {
        Subscription::batch([
            time::every(state.config.frame_interval()).map(Message::Tick),
            window::resize_events().map(|(_, size)| Message::Resized(size)),
        ])
    }

    pub fn theme(_: &Self) -> Theme {
        Theme::Dark
    }

    pub fn title(_: &Self) -> String {
        "SAR Globe Visualizer".into()
    }

    #[cfg(test)]
    fn dashboard(&self) -> &SarDashboard<CanvasSurface> {
        &self.dashboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sarcore::prelude::LoadResult;
    use sarcore::record::SarRecord;
    use sarcore::source::FallbackGenerator;
    use sarcore::stats::TOTAL_POINTS;
    use sarcore::LoadError;
    use std::future::Future;

    #[derive(Clone)]
    struct OfflineFetcher;

    impl RecordFetcher for OfflineFetcher {
        fn fetch(&self) -> impl Future<Output = LoadResult<Vec<SarRecord>>> + Send {
            async { Err(LoadError::Network("offline".into())) }
        }
    }

    fn fallback_outcome(count: usize) -> LoadOutcome {
        LoadOutcome {
            batch: FallbackGenerator::with_count(count).generate(),
            origin: BatchOrigin::Fallback {
                reason: LoadError::Network("offline".into()),
            },
        }
    }

    fn booted() -> SarVisualizer<OfflineFetcher> {
        let (state, _task) = SarVisualizer::boot(VisualizerConfig::default(), OfflineFetcher);
        state
    }

    #[test]
    fn boot_starts_globe_before_data_arrives() {
        let state = booted();
        assert_eq!(state.status, "Loading SAR data...");
        assert_eq!(
            state.dashboard().with_presenter(|p| p.is_running()),
            Some(true)
        );
        assert!(state.frame.is_none());
    }

    #[test]
    fn loaded_batch_updates_stats_and_status() {
        let mut state = booted();
        let _ = SarVisualizer::update(&mut state, Message::DataLoaded(fallback_outcome(20)));
        assert!(state.status.contains("sample data"));
        assert_eq!(state.dashboard().total_points(), 20);
        let total = state
            .dashboard()
            .stats_entries()
            .into_iter()
            .find(|entry| entry.label == TOTAL_POINTS)
            .map(|entry| entry.count);
        assert_eq!(total, Some(20));
    }

    #[test]
    fn frequency_change_filters_visible_points() {
        let mut state = booted();
        let _ = SarVisualizer::update(&mut state, Message::DataLoaded(fallback_outcome(40)));
        let expected = state
            .dashboard()
            .filter()
            .batch()
            .iter()
            .filter(|record| record.frequency == Frequency::CBand)
            .count();
        let _ = SarVisualizer::update(
            &mut state,
            Message::FrequencyChanged(Facet::Only(Frequency::CBand)),
        );
        assert_eq!(state.dashboard().total_points(), expected);
    }

    #[test]
    fn ticks_commit_frames_for_the_canvas() {
        let mut state = booted();
        let _ = SarVisualizer::update(&mut state, Message::DataLoaded(fallback_outcome(5)));
        let start = Instant::now();
        let _ = SarVisualizer::update(&mut state, Message::Tick(start));
        let frame = state.frame.as_ref().expect("frame after tick");
        assert_eq!(frame.points.len(), 6);
        assert!(frame.points.last().map(|p| p.is_highlight()).unwrap_or(false));
    }

    #[test]
    fn first_batch_schedules_highlight_focus() {
        let mut state = booted();
        let _ = SarVisualizer::update(&mut state, Message::DataLoaded(fallback_outcome(5)));
        assert!(state.focus_scheduled);
        state.advance(Duration::from_millis(2999));
        assert!(state.dashboard().with_presenter(|p| p.focus_target()).flatten().is_none());
        state.advance(Duration::from_millis(1));
        let target = state
            .dashboard()
            .with_presenter(|p| p.focus_target())
            .flatten();
        assert!(target.is_some());
    }

    #[test]
    fn resize_uses_canvas_area_not_whole_window() {
        assert_eq!(canvas_size(Size::new(1280.0, 800.0)), (900, 760));
        assert_eq!(canvas_size(Size::new(300.0, 30.0)), (0, 0));

        let mut state = booted();
        let _ = SarVisualizer::update(&mut state, Message::Resized(Size::new(1280.0, 800.0)));
        let aspect = state
            .dashboard()
            .with_presenter(|p| p.camera().aspect)
            .unwrap();
        assert!((aspect - 900.0 / 760.0).abs() < 1e-9);

        // A window too small for the canvas leaves the previous viewport in place.
        let _ = SarVisualizer::update(&mut state, Message::Resized(Size::new(300.0, 30.0)));
        let options = state
            .dashboard()
            .with_presenter(|p| (p.options().width, p.options().height))
            .unwrap();
        assert_eq!(options, (900, 760));
    }

    #[test]
    fn toggle_rotation_stops_spin() {
        let mut state = booted();
        let _ = SarVisualizer::update(&mut state, Message::ToggleRotation);
        state.advance(Duration::from_millis(16));
        let before = state.dashboard().with_presenter(|p| p.rotation());
        state.advance(Duration::from_millis(16));
        assert_eq!(state.dashboard().with_presenter(|p| p.rotation()), before);
    }
}
