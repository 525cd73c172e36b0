pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{GeoPoint, RoutePath};
pub use services::distance::{haversine_km, nearest, Locatable};
pub use services::locator::{LocatorSession, LocatorState, RouteTicket};
pub use services::route::RouteService;
