//! Form coordination settings.

use campus_core::enums::DuplicatePolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormsConfig {
    /// What a form group does when a second form registers under a taken id.
    #[serde(default)]
    pub duplicate_registration: DuplicatePolicy,
}
