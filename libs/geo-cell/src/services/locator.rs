use tracing::debug;
use uuid::Uuid;

use crate::models::{ClinicPin, GeoPoint, RoutePath};
use crate::services::distance::nearest;

/// Per-session locator state. `Idle` until a specialty filter and a user
/// position are both known, `Searching` while no eligible clinic has been
/// selected, `Located` once the nearest clinic is chosen.
#[derive(Debug, Clone)]
pub enum LocatorState {
    Idle,
    Searching,
    Located {
        nearest: ClinicPin,
        distance_km: f64,
        route: RoutePath,
    },
}

/// Handle for one outbound route request. Carries the clinic it targets so
/// a response that resolves after the selection has moved on can be
/// recognized and discarded instead of overwriting a fresher route.
#[derive(Debug, Clone)]
pub struct RouteTicket {
    pub doctor_id: Uuid,
    pub start: GeoPoint,
    pub end: GeoPoint,
}

/// Drives nearest-clinic selection for one user session. Mutations return a
/// `RouteTicket` when a route fetch is due; the caller performs the fetch
/// (the only suspension point) and hands the result back via `apply_route`.
/// Until then `Located` holds the straight two-point path, so the session
/// always has something drawable.
pub struct LocatorSession {
    user_position: Option<GeoPoint>,
    specialty_filter: Option<String>,
    candidates: Vec<ClinicPin>,
    state: LocatorState,
}

impl LocatorSession {
    pub fn new() -> Self {
        Self {
            user_position: None,
            specialty_filter: None,
            candidates: Vec::new(),
            state: LocatorState::Idle,
        }
    }

    pub fn state(&self) -> &LocatorState {
        &self.state
    }

    pub fn set_position(&mut self, position: Option<GeoPoint>) -> Option<RouteTicket> {
        self.user_position = position;
        self.recompute()
    }

    pub fn set_filter(&mut self, specialty: Option<String>) -> Option<RouteTicket> {
        self.specialty_filter = specialty;
        self.recompute()
    }

    /// Replace the candidate set (e.g. fresh data loaded). Selection and
    /// route are recomputed from scratch, never patched incrementally.
    pub fn set_candidates(&mut self, candidates: Vec<ClinicPin>) -> Option<RouteTicket> {
        self.candidates = candidates;
        self.recompute()
    }

    /// Deliver a resolved route. Returns false and leaves the state alone
    /// when the ticket no longer matches the current selection (a stale
    /// response) or when the session has left `Located`.
    pub fn apply_route(&mut self, ticket: &RouteTicket, route: RoutePath) -> bool {
        match &mut self.state {
            LocatorState::Located {
                nearest, route: current, ..
            } if nearest.id == ticket.doctor_id => {
                *current = route;
                true
            }
            _ => {
                debug!(
                    "Discarding stale route response for clinic {}",
                    ticket.doctor_id
                );
                false
            }
        }
    }

    fn recompute(&mut self) -> Option<RouteTicket> {
        let (Some(position), Some(filter)) = (self.user_position, self.specialty_filter.clone())
        else {
            self.state = LocatorState::Idle;
            return None;
        };

        let filtered: Vec<ClinicPin> = self
            .candidates
            .iter()
            .filter(|c| c.specialty == filter)
            .cloned()
            .collect();

        match nearest(position, &filtered) {
            Some((clinic, distance_km)) => {
                let end = clinic
                    .position()
                    .unwrap_or(position);
                let ticket = RouteTicket {
                    doctor_id: clinic.id,
                    start: position,
                    end,
                };
                self.state = LocatorState::Located {
                    nearest: clinic.clone(),
                    distance_km,
                    route: vec![position, end],
                };
                Some(ticket)
            }
            None => {
                self.state = LocatorState::Searching;
                None
            }
        }
    }
}

impl Default for LocatorSession {
    fn default() -> Self {
        Self::new()
    }
}
