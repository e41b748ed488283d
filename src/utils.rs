pub mod prompt_processing;
pub mod token;
pub mod diff;
pub mod timing;
pub mod clipboard;
#[cfg(feature = "terminal_printing")]
pub mod printing;

use serde_json::{Map, Value};

pub type JsonMap = Map<String, Value>;
