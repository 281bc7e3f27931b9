use chrono::{DateTime, Utc};
use jetshare_core::NewJetShareOffer;
use jetshare_seatmap::{SeatLayout, SplitOrientation, SplitPercentage};
use jetshare_shared::models::events::JetSelectedEvent;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::models::{SeatSelectionConfiguration, SplitConfiguration};

/// Wizard sections, in order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormSection {
    FlightDetails,
    AircraftSelection,
    SeatConfiguration,
    CostDetails,
}

impl FormSection {
    pub const ALL: [FormSection; 4] = [
        FormSection::FlightDetails,
        FormSection::AircraftSelection,
        FormSection::SeatConfiguration,
        FormSection::CostDetails,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Where a percentage change came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentageSource {
    Slider,
    Configurator,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("No form section at index {0}")]
    UnknownSection(usize),

    #[error("Offer form is invalid ({} field errors)", .0.len())]
    Invalid(Vec<FieldError>),

    #[error("Offer is already being submitted")]
    AlreadySubmitting,
}

/// Payload sent when a JetShare offer is created.
///
/// `split_configuration` is passed through as opaque JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JetShareOfferSubmission {
    pub jet_id: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub total_seats: u32,
    pub available_seats: u32,
    pub total_flight_cost: i64,
    pub requested_share_amount: i64,
    #[serde(default, alias = "seat_split_configuration")]
    pub split_configuration: Option<serde_json::Value>,
}

impl JetShareOfferSubmission {
    /// Whole-payload validation; returns every problem found
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), FormError> {
        let mut errors = Vec::new();

        if self.origin.trim().is_empty() {
            errors.push(FieldError::new("origin", "Departure location is required"));
        }
        if self.destination.trim().is_empty() {
            errors.push(FieldError::new("destination", "Arrival location is required"));
        }
        if !self.origin.trim().is_empty() && self.origin.trim().eq_ignore_ascii_case(self.destination.trim()) {
            errors.push(FieldError::new("destination", "Arrival must differ from departure"));
        }
        if self.departure_time <= now {
            errors.push(FieldError::new("departure_time", "Departure must be in the future"));
        }
        if self.jet_id.trim().is_empty() {
            errors.push(FieldError::new("jet_id", "Select an aircraft"));
        }
        if self.total_seats == 0 {
            errors.push(FieldError::new("total_seats", "Aircraft must have at least one seat"));
        } else if self.total_seats as usize > SeatLayout::MAX_SEATS {
            errors.push(FieldError::new(
                "total_seats",
                format!("Aircraft cannot have more than {} seats", SeatLayout::MAX_SEATS),
            ));
        }
        if self.available_seats == 0 || self.available_seats > self.total_seats {
            errors.push(FieldError::new("available_seats", "Available seats must be between 1 and the aircraft's seat count"));
        }
        if self.total_flight_cost <= 0 {
            errors.push(FieldError::new("total_flight_cost", "Total flight cost must be positive"));
        }
        if self.requested_share_amount <= 0 || self.requested_share_amount > self.total_flight_cost {
            errors.push(FieldError::new("requested_share_amount", "Requested share must be positive and at most the total cost"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FormError::Invalid(errors))
        }
    }

    pub fn into_new_offer(self, user_id: impl Into<String>) -> NewJetShareOffer {
        NewJetShareOffer {
            user_id: user_id.into(),
            jet_id: self.jet_id,
            origin: self.origin,
            destination: self.destination,
            departure_time: self.departure_time,
            // bounded by validate(); saturate rather than wrap if it was skipped
            total_seats: i32::try_from(self.total_seats).unwrap_or(i32::MAX),
            available_seats: i32::try_from(self.available_seats).unwrap_or(i32::MAX),
            total_flight_cost: self.total_flight_cost,
            requested_share_amount: self.requested_share_amount,
            split_configuration: self.split_configuration.unwrap_or(serde_json::Value::Null),
        }
    }
}

/// `round(total × pct / 100)`
pub fn share_amount(total_flight_cost: i64, percentage: SplitPercentage) -> i64 {
    (total_flight_cost as f64 * percentage.value() as f64 / 100.0).round() as i64
}

/// `round(pct / 100 × total_seats)`
pub fn seats_for_share(total_seats: u32, percentage: SplitPercentage) -> u32 {
    (percentage.value() as f64 / 100.0 * total_seats as f64).round() as u32
}

/// State of the multi-step JetShare offer form.
///
/// The split percentage is owned here; the share amount and available seat
/// count are derived from it on every change.
#[derive(Debug, Clone)]
pub struct OfferForm {
    section: FormSection,
    origin: String,
    destination: String,
    departure_time: Option<DateTime<Utc>>,
    jet_id: Option<String>,
    jet_model: Option<String>,
    total_seats: u32,
    layout: Option<SeatLayout>,
    split_percentage: SplitPercentage,
    orientation: SplitOrientation,
    configuration: Option<SplitConfiguration>,
    total_flight_cost: i64,
    share_amount: i64,
    available_seats: u32,
    submitting: bool,
}

impl Default for OfferForm {
    fn default() -> Self {
        Self::new()
    }
}

impl OfferForm {
    pub fn new() -> Self {
        Self {
            section: FormSection::FlightDetails,
            origin: String::new(),
            destination: String::new(),
            departure_time: None,
            jet_id: None,
            jet_model: None,
            total_seats: 0,
            layout: None,
            split_percentage: SplitPercentage::default(),
            orientation: SplitOrientation::Horizontal,
            configuration: None,
            total_flight_cost: 0,
            share_amount: 0,
            available_seats: 0,
            submitting: false,
        }
    }

    pub fn section(&self) -> FormSection {
        self.section
    }

    pub fn next(&mut self) -> FormSection {
        if let Some(next) = FormSection::from_index(self.section.index() + 1) {
            self.section = next;
        }
        self.section
    }

    pub fn prev(&mut self) -> FormSection {
        if let Some(prev) = self.section.index().checked_sub(1).and_then(FormSection::from_index) {
            self.section = prev;
        }
        self.section
    }

    pub fn go_to(&mut self, index: usize) -> Result<FormSection, FormError> {
        self.section = FormSection::from_index(index).ok_or(FormError::UnknownSection(index))?;
        Ok(self.section)
    }

    pub fn set_flight_details(
        &mut self,
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_time: DateTime<Utc>,
    ) {
        self.origin = origin.into();
        self.destination = destination.into();
        self.departure_time = Some(departure_time);
    }

    pub fn jet_id(&self) -> Option<&str> {
        self.jet_id.as_deref()
    }

    pub fn jet_model(&self) -> Option<&str> {
        self.jet_model.as_deref()
    }

    /// React to an aircraft being picked: the old split no longer applies
    pub fn apply_jet_selection(&mut self, event: &JetSelectedEvent) {
        debug!("Offer form switching to jet {}", event.jet_id);
        self.jet_id = Some(event.jet_id.clone());
        self.jet_model = event.model.clone();
        self.total_seats = event.total_seats;
        self.layout = None;
        self.configuration = None;
        self.recompute();
    }

    /// Adopt the seat layout the configurator settled on
    pub fn set_seat_layout(&mut self, layout: SeatLayout) {
        self.total_seats = layout.total_seats() as u32;
        self.layout = Some(layout);
        self.refresh_configuration();
        self.recompute();
    }

    pub fn set_total_flight_cost(&mut self, total: i64) {
        self.total_flight_cost = total;
        self.recompute();
    }

    /// Store a new percentage and refresh the derived amounts.
    ///
    /// Slider changes also rebuild the configuration from the known layout;
    /// configurator changes arrive with their own configuration.
    pub fn set_split_percentage(&mut self, percentage: i64, source: PercentageSource) -> SplitPercentage {
        self.split_percentage = SplitPercentage::clamped(percentage);
        if source == PercentageSource::Slider {
            self.refresh_configuration();
        }
        self.recompute();
        self.split_percentage
    }

    /// Take a configuration emitted by the configurator
    pub fn apply_configuration(&mut self, config: SplitConfiguration) {
        self.split_percentage = config.split_percentage;
        self.orientation = config.split_orientation;
        if self.jet_id.is_none() {
            self.jet_id = Some(config.jet_id.clone());
        }
        self.configuration = Some(config);
        self.recompute();
    }

    /// Take a flat seat selection, converting it to the canonical shape
    pub fn apply_selection(&mut self, selection: &SeatSelectionConfiguration) {
        let layout = self.layout.clone().unwrap_or_else(SeatLayout::default_fallback);
        self.apply_configuration(selection.to_split(&layout));
    }

    pub fn split_percentage(&self) -> SplitPercentage {
        self.split_percentage
    }

    pub fn configuration(&self) -> Option<&SplitConfiguration> {
        self.configuration.as_ref()
    }

    pub fn share_amount(&self) -> i64 {
        self.share_amount
    }

    pub fn available_seats(&self) -> u32 {
        self.available_seats
    }

    pub fn total_seats(&self) -> u32 {
        self.total_seats
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn draft(&self) -> JetShareOfferSubmission {
        JetShareOfferSubmission {
            jet_id: self.jet_id.clone().unwrap_or_default(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            departure_time: self.departure_time.unwrap_or(DateTime::<Utc>::MIN_UTC),
            total_seats: self.total_seats,
            available_seats: self.available_seats,
            total_flight_cost: self.total_flight_cost,
            requested_share_amount: self.share_amount,
            split_configuration: self
                .configuration
                .as_ref()
                .and_then(|c| serde_json::to_value(c).ok()),
        }
    }

    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), FormError> {
        self.draft().validate(now)
    }

    /// Validate the whole form and lock it for submission
    pub fn begin_submit(&mut self, now: DateTime<Utc>) -> Result<JetShareOfferSubmission, FormError> {
        if self.submitting {
            return Err(FormError::AlreadySubmitting);
        }
        let submission = self.draft();
        submission.validate(now)?;
        self.submitting = true;
        Ok(submission)
    }

    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    fn refresh_configuration(&mut self) {
        if let (Some(jet_id), Some(layout)) = (&self.jet_id, &self.layout) {
            self.configuration = Some(SplitConfiguration::compute(
                jet_id.clone(),
                layout,
                self.orientation,
                self.split_percentage,
            ));
        }
    }

    fn recompute(&mut self) {
        self.share_amount = share_amount(self.total_flight_cost, self.split_percentage);
        self.available_seats = seats_for_share(self.total_seats, self.split_percentage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jetshare_seatmap::LayoutType;

    fn selected(jet: &str, seats: u32) -> JetSelectedEvent {
        JetSelectedEvent {
            jet_id: jet.to_string(),
            model: Some("Citation X".to_string()),
            total_seats: seats,
            selected_at: 0,
        }
    }

    fn filled_form(now: DateTime<Utc>) -> OfferForm {
        let mut form = OfferForm::new();
        form.set_flight_details("KTEB", "KMIA", now + Duration::days(3));
        form.apply_jet_selection(&selected("jet-1", 12));
        form.set_seat_layout(SeatLayout::new(3, 4, LayoutType::Standard).unwrap());
        form.set_total_flight_cost(40_000);
        form.set_split_percentage(50, PercentageSource::Slider);
        form
    }

    #[test]
    fn test_wizard_navigation() {
        let mut form = OfferForm::new();
        assert_eq!(form.prev(), FormSection::FlightDetails);
        assert_eq!(form.next(), FormSection::AircraftSelection);
        assert_eq!(form.next(), FormSection::SeatConfiguration);
        assert_eq!(form.next(), FormSection::CostDetails);
        assert_eq!(form.next(), FormSection::CostDetails);
        assert_eq!(form.go_to(1), Ok(FormSection::AircraftSelection));
        assert_eq!(form.go_to(7), Err(FormError::UnknownSection(7)));
        assert_eq!(form.section(), FormSection::AircraftSelection);
    }

    #[test]
    fn test_percentage_drives_amount_and_seats() {
        let now = Utc::now();
        let mut form = filled_form(now);
        assert_eq!(form.share_amount(), 20_000);
        assert_eq!(form.available_seats(), 6);

        form.set_split_percentage(33, PercentageSource::Slider);
        assert_eq!(form.share_amount(), 13_200);
        assert_eq!(form.available_seats(), 4);

        form.set_split_percentage(0, PercentageSource::Slider);
        assert_eq!(form.split_percentage().value(), 1);
    }

    #[test]
    fn test_slider_rebuilds_configuration() {
        let form = filled_form(Utc::now());
        let config = form.configuration().unwrap();
        assert_eq!(config.split_ratio, "50/50");
        assert_eq!(config.first_group().len(), 6);
    }

    #[test]
    fn test_configurator_change_is_adopted() {
        let mut form = filled_form(Utc::now());
        let layout = SeatLayout::new(3, 4, LayoutType::Standard).unwrap();
        let config = SplitConfiguration::compute("jet-1", &layout, SplitOrientation::Vertical, SplitPercentage::clamped(25));

        form.apply_configuration(config.clone());
        assert_eq!(form.split_percentage().value(), 25);
        assert_eq!(form.share_amount(), 10_000);
        assert_eq!(form.configuration(), Some(&config));
    }

    #[test]
    fn test_selection_is_converted() {
        let mut form = filled_form(Utc::now());
        let selection = SeatSelectionConfiguration {
            jet_id: "jet-1".into(),
            selected_seats: vec!["A1".into(), "A2".into(), "A3".into()],
            total_seats: 12,
            split_orientation: SplitOrientation::Horizontal,
        };

        form.apply_selection(&selection);
        assert_eq!(form.split_percentage().value(), 25);
        assert_eq!(form.configuration().unwrap().first_group().len(), 3);
    }

    #[test]
    fn test_jet_change_resets_split() {
        let mut form = filled_form(Utc::now());
        form.apply_jet_selection(&selected("jet-2", 8));

        assert_eq!(form.jet_id(), Some("jet-2"));
        assert!(form.configuration().is_none());
        assert_eq!(form.available_seats(), 4);
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let form = OfferForm::new();
        let Err(FormError::Invalid(errors)) = form.validate(Utc::now()) else {
            panic!("empty form must not validate");
        };

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        for field in ["origin", "destination", "departure_time", "jet_id", "total_flight_cost"] {
            assert!(fields.contains(&field), "missing error for {field}");
        }
    }

    #[test]
    fn test_submit_packages_configuration() {
        let now = Utc::now();
        let mut form = filled_form(now);

        let submission = form.begin_submit(now).unwrap();
        assert_eq!(submission.requested_share_amount, 20_000);
        assert_eq!(submission.split_configuration.as_ref().unwrap()["splitPercentage"], 50);
        assert_eq!(form.begin_submit(now), Err(FormError::AlreadySubmitting));

        form.finish_submit();
        let offer = form.begin_submit(now).unwrap().into_new_offer("user-1");
        assert_eq!(offer.user_id, "user-1");
        assert_eq!(offer.split_configuration["jetId"], "jet-1");
    }

    #[test]
    fn test_oversized_seat_counts_are_rejected() {
        let now = Utc::now();
        let mut form = filled_form(now);
        let mut submission = form.begin_submit(now).unwrap();
        submission.total_seats = 3_000_000_000;
        submission.available_seats = 2_500_000_000;

        let Err(FormError::Invalid(errors)) = submission.validate(now) else {
            panic!("seat counts beyond any aircraft must not validate");
        };
        assert!(errors.iter().any(|e| e.field == "total_seats"));

        let stored = submission.into_new_offer("user-1");
        assert!(stored.total_seats > 0);
        assert!(stored.available_seats > 0);
    }

    #[test]
    fn test_submission_accepts_legacy_field_name() {
        let json = serde_json::json!({
            "jet_id": "jet-1",
            "origin": "KTEB",
            "destination": "KMIA",
            "departure_time": "2030-01-01T12:00:00Z",
            "total_seats": 12,
            "available_seats": 6,
            "total_flight_cost": 40000,
            "requested_share_amount": 20000,
            "seat_split_configuration": { "anything": true }
        });

        let submission: JetShareOfferSubmission = serde_json::from_value(json).unwrap();
        assert_eq!(submission.split_configuration, Some(serde_json::json!({ "anything": true })));
    }
}
