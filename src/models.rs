//! Domain models shared by the fetcher, the SQLite store, and the TUI. The
//! intent is that these types stay light-weight data holders so other layers
//! can focus on transport and presentation logic.

use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// The beer triple served by the random-beer endpoint and persisted locally.
/// The endpoint returns many more fields (ibu, alcohol, ...) which serde
/// silently drops; we only ever cared about these three.
pub struct BeerRecord {
    /// Brewery or brand label, opaque text with no validation.
    pub brand: String,
    /// The beer name shown in the saved list.
    pub name: String,
    /// Style description such as "Stout" or "IPA".
    pub style: String,
}

impl BeerRecord {
    /// Compose a `Name (Style)` string that gracefully omits the parentheses
    /// when the style is blank. The detail card header relies on this
    /// ready-to-use formatting.
    pub fn display_title(&self) -> String {
        if self.style.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.style)
        }
    }
}

impl fmt::Display for BeerRecord {
    /// Write the beer name to any formatter. Display is implemented so the
    /// type plays nicely with Ratatui widgets that consume strings implicitly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
