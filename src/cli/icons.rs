//! Console output icons shared by all commands.

use console::{style, StyledObject};

use docmeta::models::Classification;

/// Success checkmark icon (green ✓).
pub fn success() -> StyledObject<&'static str> {
    style("✓").green()
}

/// Info/progress arrow icon (cyan →).
pub fn info() -> StyledObject<&'static str> {
    style("→").cyan()
}

/// Warning icon (yellow !).
pub fn warn() -> StyledObject<&'static str> {
    style("!").yellow()
}

/// Error icon (red ✗).
pub fn error() -> StyledObject<&'static str> {
    style("✗").red()
}

/// Dim arrow for secondary info.
pub fn dim_arrow() -> StyledObject<&'static str> {
    style("→").dim()
}

/// Classification colored by restrictiveness.
pub fn classification(level: Classification) -> StyledObject<&'static str> {
    let text = style(level.as_str()).bold();
    match level {
        Classification::Public => text.green(),
        Classification::Internal => text.cyan(),
        Classification::Confidential => text.yellow(),
        Classification::Secret | Classification::TopSecret => text.red(),
    }
}
