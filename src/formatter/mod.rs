pub mod json;

pub use json::{ErrorJson, JsonFormatter, SwitchStatusJson, VlanJson, VlanListJson};
