pub mod health;
pub mod switches;
pub mod vlans;

pub use health::health;
pub use switches::switch_status;
pub use vlans::{list_vlans, list_vlans_advanced};
