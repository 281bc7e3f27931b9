pub mod models;
pub mod configurator;
pub mod form;
pub mod bus;

pub use models::{IncomingSplit, SeatSelectionConfiguration, SplitConfiguration};
pub use configurator::{Configurator, ConfiguratorOptions, ConfiguratorView, FetchTicket};
pub use form::{FormError, FormSection, JetShareOfferSubmission, OfferForm, PercentageSource};
pub use bus::JetSelectionBus;
