//! Panels shown under the map.

mod crew;
mod info;

pub use crew::{CrewState, CrewWidget};
pub use info::InfoWidget;
