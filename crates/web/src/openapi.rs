use utoipa::OpenApi;

use crate::envelope::Deleted;
use crate::features::{bag_setups, courses, events, profiles, series};

#[derive(OpenApi)]
#[openapi(
    paths(
        profiles::handlers::get_profile,
        profiles::handlers::create_profile,
        profiles::handlers::update_profile,
        bag_setups::handlers::list_bag_setups,
        bag_setups::handlers::get_bag_setup,
        bag_setups::handlers::create_bag_setup,
        bag_setups::handlers::update_bag_setup,
        bag_setups::handlers::delete_bag_setup,
        bag_setups::handlers::set_default_bag_setup,
        courses::handlers::list_courses,
        courses::handlers::get_course,
        courses::handlers::create_course,
        courses::handlers::update_course,
        courses::handlers::delete_course,
        courses::handlers::list_tee_sets,
        courses::handlers::replace_tee_sets,
        series::handlers::list_series,
        series::handlers::get_series,
        series::handlers::create_series,
        series::handlers::update_series,
        series::handlers::delete_series,
        series::handlers::list_participants,
        series::handlers::invite_participant,
        series::handlers::update_participant,
        events::handlers::list_events,
        events::handlers::get_event,
        events::handlers::create_event,
        events::handlers::update_event,
        events::handlers::delete_event,
        events::handlers::list_participants,
        events::handlers::add_participant,
        events::handlers::update_participant,
        events::handlers::list_scorecards,
        events::handlers::submit_scorecard,
        events::handlers::get_leaderboard,
    ),
    components(
        schemas(
            Deleted,
            storage::dto::common::PaginationMeta,
            storage::dto::profile::CreateProfileRequest,
            storage::dto::profile::UpdateProfileRequest,
            storage::dto::bag_setup::CreateBagSetupRequest,
            storage::dto::bag_setup::UpdateBagSetupRequest,
            storage::dto::course::CreateCourseRequest,
            storage::dto::course::UpdateCourseRequest,
            storage::dto::course::TeeSetInput,
            storage::dto::course::ReplaceTeeSetsRequest,
            storage::dto::series::CreateSeriesRequest,
            storage::dto::series::UpdateSeriesRequest,
            storage::dto::series::InviteSeriesParticipantRequest,
            storage::dto::series::UpdateSeriesParticipantRequest,
            storage::dto::event::CreateEventRequest,
            storage::dto::event::UpdateEventRequest,
            storage::dto::event::AddEventParticipantRequest,
            storage::dto::event::UpdateEventParticipantRequest,
            storage::dto::scorecard::SubmitScorecardRequest,
            storage::dto::leaderboard::LeaderboardEntry,
            storage::dto::leaderboard::LeaderboardResponse,
            storage::models::Profile,
            storage::models::BagSetup,
            storage::models::Course,
            storage::models::TeeSet,
            storage::models::Series,
            storage::models::SeriesStatus,
            storage::models::ScoringType,
            storage::models::SeriesParticipant,
            storage::models::ParticipantRole,
            storage::models::ParticipantStatus,
            storage::models::InvitationStatus,
            storage::models::Event,
            storage::models::EventFormat,
            storage::models::EventStatus,
            storage::models::EventParticipant,
            storage::models::RegistrationStatus,
            storage::models::Scorecard,
        )
    ),
    tags(
        (name = "profiles", description = "The caller's golfer profile"),
        (name = "bag-setups", description = "The caller's bag setups and default choice"),
        (name = "courses", description = "Courses and tee sets"),
        (name = "series", description = "Season series and their rosters"),
        (name = "events", description = "Events, rosters, scorecards, and standings"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
