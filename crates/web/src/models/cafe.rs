//! Café domain types.

use cuppa_core::{CafeId, CoffeePrice, SeatsBucket};

/// A café listing.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Cafe {
    /// Unique café ID, assigned by the store.
    pub id: CafeId,
    /// Café name, globally unique.
    pub name: String,
    /// Link to the café on a map service. Opaque, not checked for reachability.
    pub map_url: String,
    /// Link to a photo of the café. Opaque, not checked for reachability.
    pub img_url: String,
    /// Human-readable location (e.g. "Borough Market, London").
    pub location: String,
    pub has_sockets: bool,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub can_take_calls: bool,
    /// Bucketed seat count, if recorded.
    pub seats: Option<SeatsBucket>,
    /// Coffee price, stored as its display representation ("£x.xx").
    pub coffee_price: Option<CoffeePrice>,
}

/// The mutable attributes of a café, as produced by a validated form
/// submission or a seed row. Applied whole on create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct CafeDraft {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub has_sockets: bool,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub can_take_calls: bool,
    pub seats: Option<SeatsBucket>,
    pub coffee_price: Option<CoffeePrice>,
}
