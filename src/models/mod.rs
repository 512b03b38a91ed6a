pub mod mac;
pub mod switch;

pub use mac::MacAddress;
pub use switch::{Switch, SwitchId};
