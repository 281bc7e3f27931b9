use std::time::{Duration, Instant};
use jetshare_core::{LayoutFetchError, LayoutSource};
use jetshare_seatmap::{DividerGeometry, SeatLayout, SplitOrientation, SplitPercentage};
use serde::Serialize;
use tracing::{debug, warn};
use crate::models::SplitConfiguration;

pub const DEFAULT_CHANGE_DEBOUNCE: Duration = Duration::from_millis(100);

pub type ChangeCallback = Box<dyn FnMut(&SplitConfiguration) + Send>;
pub type RatioCallback = Box<dyn FnMut(SplitPercentage) + Send>;

/// Construction options for a [`Configurator`]
#[derive(Debug, Clone)]
pub struct ConfiguratorOptions {
    pub jet_id: String,
    /// Used until a fetched layout arrives, and whenever a fetch fails
    pub default_layout: Option<SeatLayout>,
    pub initial_split: Option<SplitPercentage>,
    pub initial_orientation: SplitOrientation,
    pub read_only: bool,
    pub show_controls: bool,
    pub seat_size_px: f64,
    pub debounce: Duration,
}

impl Default for ConfiguratorOptions {
    fn default() -> Self {
        Self {
            jet_id: String::new(),
            default_layout: None,
            initial_split: None,
            initial_orientation: SplitOrientation::Horizontal,
            read_only: false,
            show_controls: true,
            seat_size_px: jetshare_seatmap::geometry::DEFAULT_SEAT_SIZE_PX,
            debounce: DEFAULT_CHANGE_DEBOUNCE,
        }
    }
}

/// Trailing-edge debounce: keeps only the latest value and releases it once
/// no newer value arrived for `window`.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((_, at)) if now >= *at + self.window);
        if due {
            self.pending.take().map(|(v, _)| v)
        } else {
            None
        }
    }

    /// Release the pending value regardless of the window
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }

    /// Drop the pending value without releasing it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Identifies one layout request; results carrying an older ticket are ignored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub jet_id: String,
    seq: u64,
}

/// Which side of the divide a rendered seat is on
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeatSide {
    First,
    Second,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeatCell {
    pub id: String,
    pub side: SeatSide,
}

/// Everything needed to draw the configurator
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguratorView {
    /// `None` marks a skipped grid position
    pub grid: Vec<Vec<Option<SeatCell>>>,
    pub orientation: SplitOrientation,
    pub percentage: SplitPercentage,
    pub ratio_label: String,
    pub divider_offset_px: f64,
    pub grid_width_px: f64,
    pub grid_height_px: f64,
    pub visualizer_open: bool,
    pub show_controls: bool,
    pub read_only: bool,
    pub loading: bool,
    pub layout_error: Option<String>,
}

/// Interactive seat-split editor state.
///
/// The percentage is the only stored split value; seat groups and the
/// divider position are recomputed from it. Configuration changes reach the
/// host through a debounced `on_change` callback, ratio changes through an
/// immediate `on_ratio_change` callback.
pub struct Configurator {
    jet_id: String,
    default_layout: Option<SeatLayout>,
    layout: SeatLayout,
    orientation: SplitOrientation,
    percentage: SplitPercentage,
    geometry: DividerGeometry,
    read_only: bool,
    show_controls: bool,
    visualizer_open: bool,
    loading: bool,
    layout_error: Option<LayoutFetchError>,
    fetch_seq: u64,
    changes: Debouncer<SplitConfiguration>,
    last_emitted: Option<SplitConfiguration>,
    on_change: Option<ChangeCallback>,
    on_ratio_change: Option<RatioCallback>,
}

impl std::fmt::Debug for Configurator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configurator")
            .field("jet_id", &self.jet_id)
            .field("layout", &self.layout)
            .field("orientation", &self.orientation)
            .field("percentage", &self.percentage)
            .field("loading", &self.loading)
            .field("layout_error", &self.layout_error)
            .finish_non_exhaustive()
    }
}

impl Configurator {
    pub fn new(options: ConfiguratorOptions) -> Self {
        let layout = options
            .default_layout
            .clone()
            .unwrap_or_else(SeatLayout::default_fallback);

        Self {
            jet_id: options.jet_id,
            default_layout: options.default_layout,
            layout,
            orientation: options.initial_orientation,
            percentage: options.initial_split.unwrap_or_default(),
            geometry: DividerGeometry::new(options.seat_size_px),
            read_only: options.read_only,
            show_controls: options.show_controls,
            visualizer_open: false,
            loading: false,
            layout_error: None,
            fetch_seq: 0,
            changes: Debouncer::new(options.debounce),
            last_emitted: None,
            on_change: None,
            on_ratio_change: None,
        }
    }

    pub fn on_change(mut self, callback: impl FnMut(&SplitConfiguration) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn on_ratio_change(mut self, callback: impl FnMut(SplitPercentage) + Send + 'static) -> Self {
        self.on_ratio_change = Some(Box::new(callback));
        self
    }

    pub fn jet_id(&self) -> &str {
        &self.jet_id
    }

    pub fn layout(&self) -> &SeatLayout {
        &self.layout
    }

    pub fn orientation(&self) -> SplitOrientation {
        self.orientation
    }

    pub fn percentage(&self) -> SplitPercentage {
        self.percentage
    }

    pub fn is_open(&self) -> bool {
        self.visualizer_open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn layout_error(&self) -> Option<&LayoutFetchError> {
        self.layout_error.as_ref()
    }

    pub fn open_visualizer(&mut self) {
        self.visualizer_open = true;
    }

    /// Close the editor, delivering any change still waiting on the debounce
    pub fn close_visualizer(&mut self) {
        self.visualizer_open = false;
        self.flush_change();
    }

    pub fn current_configuration(&self) -> SplitConfiguration {
        SplitConfiguration::compute(self.jet_id.clone(), &self.layout, self.orientation, self.percentage)
    }

    pub fn divider_offset_px(&self) -> f64 {
        self.geometry.offset_for(&self.layout, self.orientation, self.percentage)
    }

    /// Set the split percentage; out-of-range values are clamped to `[1, 99]`.
    ///
    /// Returns the percentage now in effect (unchanged when read-only).
    pub fn update_ratio(&mut self, percentage: i64) -> SplitPercentage {
        self.set_percentage(SplitPercentage::clamped(percentage))
    }

    /// Finish a divider drag at `raw_px` along the active axis
    pub fn drag_divider_to(&mut self, raw_px: f64) -> SplitPercentage {
        let pct = self.geometry.percentage_from_drag(&self.layout, self.orientation, raw_px);
        self.set_percentage(pct)
    }

    /// Switch axis while keeping the numeric percentage
    pub fn set_orientation(&mut self, orientation: SplitOrientation) {
        if self.read_only || orientation == self.orientation {
            return;
        }
        self.orientation = orientation;
        self.schedule_change(Instant::now());
    }

    pub fn toggle_orientation(&mut self) -> SplitOrientation {
        self.set_orientation(self.orientation.toggled());
        self.orientation
    }

    /// Point the configurator at another aircraft.
    ///
    /// The previous aircraft's layout and any undelivered change are
    /// dropped, in-flight fetches for it are ignored when they complete, and
    /// the returned ticket is the fetch the host must now perform. No change
    /// is emitted until that fetch is applied. Returns `None` when the id is
    /// unchanged.
    pub fn set_jet_id(&mut self, jet_id: impl Into<String>) -> Option<FetchTicket> {
        let jet_id = jet_id.into();
        if jet_id == self.jet_id {
            return None;
        }
        self.jet_id = jet_id;
        self.layout = self.fallback_layout();
        self.layout_error = None;
        self.changes.cancel();
        Some(self.begin_layout_fetch())
    }

    pub fn begin_layout_fetch(&mut self) -> FetchTicket {
        self.fetch_seq += 1;
        self.loading = true;
        FetchTicket {
            jet_id: self.jet_id.clone(),
            seq: self.fetch_seq,
        }
    }

    /// Apply the outcome of a layout fetch.
    ///
    /// A failure swaps in the fallback layout and records an inline error;
    /// it never propagates. Returns `false` when the ticket was superseded.
    pub fn apply_layout_result(
        &mut self,
        ticket: FetchTicket,
        result: Result<SeatLayout, LayoutFetchError>,
    ) -> bool {
        if ticket.seq != self.fetch_seq || ticket.jet_id != self.jet_id {
            debug!("Discarding stale layout response for jet {}", ticket.jet_id);
            return false;
        }

        self.loading = false;
        match result {
            Ok(layout) => {
                debug!("Loaded seat layout {}x{} for jet {}", layout.rows(), layout.seats_per_row(), self.jet_id);
                self.layout = layout;
                self.layout_error = None;
            }
            Err(e) => {
                warn!("Falling back to default seat layout for jet {}: {}", self.jet_id, e);
                self.layout = self.fallback_layout();
                self.layout_error = Some(e);
            }
        }
        self.schedule_change(Instant::now());
        true
    }

    pub async fn load_layout(&mut self, source: &dyn LayoutSource) -> bool {
        let ticket = self.begin_layout_fetch();
        let result = source.fetch_layout(&ticket.jet_id).await;
        self.apply_layout_result(ticket, result)
    }

    /// Clear the inline error and go back to the default layout
    pub fn reset_layout(&mut self) {
        self.layout_error = None;
        self.layout = self.fallback_layout();
        self.schedule_change(Instant::now());
    }

    pub fn dismiss_error(&mut self) {
        self.layout_error = None;
    }

    /// Deliver the pending configuration if its debounce window has passed
    pub fn poll_change(&mut self, now: Instant) -> bool {
        match self.changes.poll(now) {
            Some(config) => self.emit(config),
            None => false,
        }
    }

    pub fn flush_change(&mut self) -> bool {
        match self.changes.flush() {
            Some(config) => self.emit(config),
            None => false,
        }
    }

    pub fn has_pending_change(&self) -> bool {
        self.changes.is_pending()
    }

    pub fn view(&self) -> ConfiguratorView {
        let config = self.current_configuration();
        let first: std::collections::HashSet<&str> =
            config.first_group().iter().map(String::as_str).collect();

        let grid = (0..self.layout.rows())
            .map(|row| {
                (0..self.layout.seats_per_row())
                    .map(|col| {
                        self.layout.is_seat(row, col).then(|| {
                            let id = jetshare_seatmap::identifier_for(row, col);
                            let side = if first.contains(id.as_str()) {
                                SeatSide::First
                            } else {
                                SeatSide::Second
                            };
                            SeatCell { id, side }
                        })
                    })
                    .collect()
            })
            .collect();

        ConfiguratorView {
            grid,
            orientation: self.orientation,
            percentage: self.percentage,
            ratio_label: self.percentage.ratio_label(),
            divider_offset_px: self.divider_offset_px(),
            grid_width_px: self.geometry.grid_extent_px(&self.layout, SplitOrientation::Vertical),
            grid_height_px: self.geometry.grid_extent_px(&self.layout, SplitOrientation::Horizontal),
            visualizer_open: self.visualizer_open,
            show_controls: self.show_controls && !self.read_only,
            read_only: self.read_only,
            loading: self.loading,
            layout_error: self.layout_error.as_ref().map(|e| e.to_string()),
        }
    }

    fn fallback_layout(&self) -> SeatLayout {
        self.default_layout
            .clone()
            .unwrap_or_else(SeatLayout::default_fallback)
    }

    fn set_percentage(&mut self, pct: SplitPercentage) -> SplitPercentage {
        if self.read_only || pct == self.percentage {
            return self.percentage;
        }
        self.percentage = pct;
        if let Some(cb) = self.on_ratio_change.as_mut() {
            cb(pct);
        }
        self.schedule_change(Instant::now());
        pct
    }

    fn schedule_change(&mut self, now: Instant) {
        // the layout in hand may belong to another jet until the fetch lands
        if self.loading {
            return;
        }
        self.changes.push(self.current_configuration(), now);
    }

    fn emit(&mut self, config: SplitConfiguration) -> bool {
        if self.last_emitted.as_ref() == Some(&config) {
            return false;
        }
        if let Some(cb) = self.on_change.as_mut() {
            cb(&config);
        }
        self.last_emitted = Some(config);
        true
    }
}
