mod change_id;
mod locate;

use itertools::Itertools;

use crate::ids::ServoId;

pub use change_id::{change_servo_id, ChangeIdError, Changed};
pub use locate::{locate_single, Located};

pub const SEPARATOR: &str = "--------------------------------------------------";

/// `[3, 7]`
pub fn id_list(ids: &[ServoId]) -> String {
    format!("[{}]", ids.iter().join(", "))
}
