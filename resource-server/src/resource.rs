//! The four resource kinds a service instance can host

use std::fmt;

/// Which resource this process serves.
///
/// | Resource | Collection | Route prefix | Port |
/// |----------|------------|--------------|------|
/// | Menu | menus | /api/menu | 5001 |
/// | Order | orders | /api/orders | 5002 |
/// | Reservation | reservations | /api/reservation | 5003 |
/// | Contact | contacts | /api/contact | 5004 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Menu,
    Order,
    Reservation,
    Contact,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Menu,
        Resource::Order,
        Resource::Reservation,
        Resource::Contact,
    ];

    /// Binary and log file name
    pub const fn service_name(&self) -> &'static str {
        match self {
            Resource::Menu => "menu-service",
            Resource::Order => "order-service",
            Resource::Reservation => "reservation-service",
            Resource::Contact => "contact-service",
        }
    }

    /// Document store collection owned by this resource
    pub const fn collection(&self) -> &'static str {
        match self {
            Resource::Menu => "menus",
            Resource::Order => "orders",
            Resource::Reservation => "reservations",
            Resource::Contact => "contacts",
        }
    }

    pub const fn route_prefix(&self) -> &'static str {
        match self {
            Resource::Menu => "/api/menu",
            Resource::Order => "/api/orders",
            Resource::Reservation => "/api/reservation",
            Resource::Contact => "/api/contact",
        }
    }

    pub const fn default_port(&self) -> u16 {
        match self {
            Resource::Menu => 5001,
            Resource::Order => 5002,
            Resource::Reservation => 5003,
            Resource::Contact => 5004,
        }
    }

    /// Only the menu stores images and serves `/uploads`
    pub const fn serves_uploads(&self) -> bool {
        matches!(self, Resource::Menu)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service_name())
    }
}
