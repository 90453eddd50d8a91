pub mod bag_setup;
pub mod course;
pub mod event;
pub mod event_participant;
pub mod profile;
pub mod scorecard;
pub mod series;
pub mod series_participant;
pub mod tee_set;

pub use bag_setup::BagSetup;
pub use course::Course;
pub use event::{Event, EventFormat, EventStatus};
pub use event_participant::{EventParticipant, RegistrationStatus};
pub use profile::Profile;
pub use scorecard::Scorecard;
pub use series::{ScoringType, Series, SeriesStatus};
pub use series_participant::{InvitationStatus, ParticipantRole, ParticipantStatus, SeriesParticipant};
pub use tee_set::TeeSet;
