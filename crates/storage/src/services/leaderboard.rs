use std::collections::HashMap;

use uuid::Uuid;

use crate::dto::leaderboard::{LeaderboardEntry, LeaderboardResponse};
use crate::models::{Course, Event, EventParticipant, ScoringType, Scorecard};

/// Aggregate the scorecards of an event into standings.
///
/// Only participants who are playing (accepted, not withdrawn) appear;
/// those without a card are listed with nothing played. Complete cards come
/// first, ranked by net for net scoring and by gross otherwise, with
/// competition ranking for ties (1, 2, 2, 4). Incomplete cards follow
/// without a position, most holes played first.
pub fn build_leaderboard(
    event: &Event,
    course: &Course,
    scoring_type: ScoringType,
    participants: &[EventParticipant],
    scorecards: &[Scorecard],
) -> LeaderboardResponse {
    let cards: HashMap<Uuid, &Scorecard> = scorecards
        .iter()
        .filter(|card| card.event_id == event.id)
        .map(|card| (card.user_id, card))
        .collect();

    let holes = usize::try_from(course.holes).unwrap_or(0);
    let mut entries: Vec<LeaderboardEntry> = participants
        .iter()
        .filter(|p| p.event_id == event.id && p.is_playing())
        .map(|p| entry_for(p.user_id, cards.get(&p.user_id).copied(), holes, course.par))
        .collect();

    let rank_score = |entry: &LeaderboardEntry| match scoring_type {
        ScoringType::Net => entry.net.unwrap_or(entry.gross),
        ScoringType::Gross | ScoringType::Both => entry.gross,
    };
    let complete = |entry: &LeaderboardEntry| entry.holes_played == holes;

    entries.sort_by(|a, b| {
        complete(b)
            .cmp(&complete(a))
            .then_with(|| {
                if complete(a) {
                    rank_score(a).cmp(&rank_score(b))
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .then_with(|| b.holes_played.cmp(&a.holes_played))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    let mut previous: Option<(i32, u32)> = None;
    for (index, entry) in entries.iter_mut().enumerate() {
        if !complete(entry) {
            break;
        }
        let score = rank_score(entry);
        let position = match previous {
            Some((prev_score, prev_position)) if prev_score == score => prev_position,
            _ => index as u32 + 1,
        };
        entry.position = Some(position);
        previous = Some((score, position));
    }

    LeaderboardResponse {
        event_id: event.id,
        course_id: course.id,
        scoring_type,
        holes: course.holes,
        par: course.par,
        entries,
    }
}

fn entry_for(user_id: Uuid, card: Option<&Scorecard>, holes: usize, par: i32) -> LeaderboardEntry {
    let Some(card) = card else {
        return LeaderboardEntry {
            position: None,
            user_id,
            gross: 0,
            net: None,
            to_par: None,
            holes_played: 0,
            submitted: false,
        };
    };

    let gross = card.gross();
    let holes_played = card.hole_scores.len();
    LeaderboardEntry {
        position: None,
        user_id,
        gross,
        net: card.course_handicap.map(|handicap| gross - handicap),
        to_par: (holes_played == holes).then_some(gross - par),
        holes_played,
        submitted: card.submitted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventFormat, EventStatus, InvitationStatus, RegistrationStatus};
    use chrono::{NaiveDate, Utc};

    fn course(holes: i32, par: i32) -> Course {
        Course {
            id: Uuid::new_v4(),
            name: "Nine Acres".to_string(),
            city: None,
            region: None,
            country: None,
            holes,
            par,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn event(course: &Course) -> Event {
        Event {
            id: Uuid::new_v4(),
            series_id: None,
            course_id: course.id,
            tee_set_id: None,
            name: "Twilight".to_string(),
            event_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            format: EventFormat::StrokePlay,
            status: EventStatus::Completed,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn player(event: &Event, invitation: InvitationStatus) -> EventParticipant {
        EventParticipant {
            id: Uuid::new_v4(),
            event_id: event.id,
            user_id: Uuid::new_v4(),
            invitation_status: invitation,
            registration_status: RegistrationStatus::Registered,
            handicap_index: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn card(event: &Event, p: &EventParticipant, scores: &[i32], handicap: Option<i32>) -> Scorecard {
        Scorecard {
            id: Uuid::new_v4(),
            event_id: event.id,
            user_id: p.user_id,
            hole_scores: scores.to_vec(),
            course_handicap: handicap,
            submitted: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_gross_ranking_with_ties() {
        let course = course(3, 11);
        let event = event(&course);
        let players: Vec<_> = (0..4)
            .map(|_| player(&event, InvitationStatus::Accepted))
            .collect();
        let cards = vec![
            card(&event, &players[0], &[4, 4, 4], None),
            card(&event, &players[1], &[3, 4, 3], None),
            card(&event, &players[2], &[4, 4, 4], None),
            card(&event, &players[3], &[5, 5], None),
        ];

        let board = build_leaderboard(&event, &course, ScoringType::Gross, &players, &cards);
        let positions: Vec<_> = board.entries.iter().map(|e| e.position).collect();

        assert_eq!(positions, [Some(1), Some(2), Some(2), None]);
        assert_eq!(board.entries[0].user_id, players[1].user_id);
        assert_eq!(board.entries[0].to_par, Some(-1));
        assert_eq!(board.entries[3].holes_played, 2);
        assert_eq!(board.entries[3].to_par, None);
    }

    #[test]
    fn test_net_ranking_uses_handicap() {
        let course = course(2, 8);
        let event = event(&course);
        let scratch = player(&event, InvitationStatus::Accepted);
        let hacker = player(&event, InvitationStatus::Accepted);
        let cards = vec![
            card(&event, &scratch, &[4, 4], Some(0)),
            card(&event, &hacker, &[5, 5], Some(4)),
        ];
        let players = [scratch.clone(), hacker.clone()];

        let net = build_leaderboard(&event, &course, ScoringType::Net, &players, &cards);
        assert_eq!(net.entries[0].user_id, hacker.user_id);
        assert_eq!(net.entries[0].net, Some(6));

        let gross = build_leaderboard(&event, &course, ScoringType::Gross, &players, &cards);
        assert_eq!(gross.entries[0].user_id, scratch.user_id);
    }

    #[test]
    fn test_only_playing_participants_are_listed() {
        let course = course(2, 8);
        let event = event(&course);
        let pending = player(&event, InvitationStatus::Pending);
        let mut withdrawn = player(&event, InvitationStatus::Accepted);
        withdrawn.registration_status = RegistrationStatus::Withdrawn;
        let waiting = player(&event, InvitationStatus::Accepted);

        let board = build_leaderboard(
            &event,
            &course,
            ScoringType::Both,
            &[pending, withdrawn, waiting.clone()],
            &[],
        );

        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].user_id, waiting.user_id);
        assert_eq!(board.entries[0].holes_played, 0);
        assert_eq!(board.entries[0].position, None);
    }
}
