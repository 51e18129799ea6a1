use serde::{Deserialize, Serialize};

/// A room of the property, as listed in the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// The room identifier bookings refer to
    pub id: String,
    /// The room type label, e.g. "Standard"
    #[serde(rename = "type")]
    pub room_type: String,
    /// A display name
    pub name: String,
    /// The nightly rate
    pub price_per_night: f64,
    /// What the room offers
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// A catalog room that is free for a requested stay, priced for that stay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct AvailableRoom {
    /// The room
    #[serde(flatten)]
    pub room: Room,
    /// Nights in the requested stay
    pub nights: u32,
    /// `price_per_night * nights`
    pub total_price: f64,
}

/// The availability of a single room for a requested stay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct RoomAvailability {
    /// The room that was checked
    pub room_id: String,
    /// Whether no confirmed booking overlaps the stay
    pub available: bool,
}

fn room(id: &str, room_type: &str, name: &str, price_per_night: f64, amenities: &[&str]) -> Room {
    Room {
        id: id.to_owned(),
        room_type: room_type.to_owned(),
        name: name.to_owned(),
        price_per_night,
        amenities: amenities.iter().map(|a| (*a).to_owned()).collect(),
    }
}

/// The catalog used when no rooms are configured.
pub fn default_rooms() -> Vec<Room> {
    let standard = ["Wi-Fi", "TV", "Air conditioning", "Minibar"];
    let deluxe = [
        "Wi-Fi",
        "Smart TV",
        "Air conditioning",
        "Minibar",
        "Balcony",
        "Breakfast",
    ];
    let suite = [
        "Wi-Fi",
        "Smart TV",
        "Air conditioning",
        "Minibar",
        "Balcony",
        "Hot tub",
        "Room service",
        "Breakfast",
    ];
    vec![
        room("standard-101", "Standard", "Standard Room 101", 200.0, &standard),
        room("standard-102", "Standard", "Standard Room 102", 200.0, &standard),
        room("deluxe-201", "Deluxe", "Deluxe Room 201", 350.0, &deluxe),
        room("suite-301", "Suite", "Master Suite 301", 500.0, &suite),
    ]
}
