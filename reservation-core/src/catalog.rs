//! Collaborator catalogs
//!
//! The reservation core does not own the property, room, or service
//! catalogs; it consumes them through these traits. `InMemoryCatalog` backs
//! the tests and single-process embeddings.

use std::collections::{HashMap, HashSet};

/// Room type data the core needs for pricing and capacity checks
#[derive(Debug, Clone, Copy)]
pub struct RoomTypeInfo {
    /// Undiscounted nightly price in currency unit
    pub base_nightly_price: f64,
    /// Maximum guests per room of this type
    pub capacity: i32,
}

/// Physical room data
#[derive(Debug, Clone, Copy)]
pub struct RoomInfo {
    pub property_id: i64,
    pub room_type_id: i64,
}

/// Property / room-type / room lookup (external catalog)
pub trait PropertyCatalog: Send + Sync {
    fn property_exists(&self, property_id: i64) -> bool;

    fn room_type(&self, property_id: i64, room_type_id: i64) -> Option<RoomTypeInfo>;

    fn room(&self, room_id: i64) -> Option<RoomInfo>;
}

/// Add-on service pricing (external collaborator)
pub trait ServiceCatalog: Send + Sync {
    /// Unit price for a service, or None when the service is unknown
    fn service_price(&self, service_id: i64) -> Option<f64>;
}

/// In-memory catalog for tests and single-process embedding
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    properties: HashSet<i64>,
    room_types: HashMap<(i64, i64), RoomTypeInfo>,
    rooms: HashMap<i64, RoomInfo>,
    services: HashMap<i64, f64>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_property(&mut self, property_id: i64) -> &mut Self {
        self.properties.insert(property_id);
        self
    }

    pub fn add_room_type(
        &mut self,
        property_id: i64,
        room_type_id: i64,
        base_nightly_price: f64,
        capacity: i32,
    ) -> &mut Self {
        self.properties.insert(property_id);
        self.room_types.insert(
            (property_id, room_type_id),
            RoomTypeInfo {
                base_nightly_price,
                capacity,
            },
        );
        self
    }

    pub fn add_room(&mut self, room_id: i64, property_id: i64, room_type_id: i64) -> &mut Self {
        self.rooms.insert(
            room_id,
            RoomInfo {
                property_id,
                room_type_id,
            },
        );
        self
    }

    pub fn add_service(&mut self, service_id: i64, unit_price: f64) -> &mut Self {
        self.services.insert(service_id, unit_price);
        self
    }
}

impl PropertyCatalog for InMemoryCatalog {
    fn property_exists(&self, property_id: i64) -> bool {
        self.properties.contains(&property_id)
    }

    fn room_type(&self, property_id: i64, room_type_id: i64) -> Option<RoomTypeInfo> {
        self.room_types.get(&(property_id, room_type_id)).copied()
    }

    fn room(&self, room_id: i64) -> Option<RoomInfo> {
        self.rooms.get(&room_id).copied()
    }
}

impl ServiceCatalog for InMemoryCatalog {
    fn service_price(&self, service_id: i64) -> Option<f64> {
        self.services.get(&service_id).copied()
    }
}
