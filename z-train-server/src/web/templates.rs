//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::DEFAULT_ORIGIN;

/// How often the dashboard re-polls the API.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Departures shown per card.
pub const CARD_DEPARTURES: usize = 2;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Dashboard page.
///
/// The page itself carries no train data. Each card tells the script which
/// query to poll through `data-` attributes.
#[derive(Debug, Clone, Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub cards: Vec<StationCard>,
    pub poll_interval_secs: u64,
}

impl IndexTemplate {
    /// Poll interval in the milliseconds the script wants.
    pub fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_secs.saturating_mul(1000)
    }
}

impl Default for IndexTemplate {
    /// Helsinki in both directions and Mäntsälä towards Helsinki.
    fn default() -> Self {
        Self {
            cards: vec![
                StationCard {
                    dom_key: "hki".into(),
                    station: DEFAULT_ORIGIN.into(),
                    target: None,
                    title: "Helsingistä (HKI)".into(),
                    badge: "Z → Mäntsälä / Lahti".into(),
                    subtitle: "Seuraavat Z-junat Helsingistä".into(),
                    count: CARD_DEPARTURES,
                },
                StationCard {
                    dom_key: "mantsala".into(),
                    station: "MLÄ".into(),
                    target: Some(DEFAULT_ORIGIN.into()),
                    title: "Mäntsälästä (MLÄ)".into(),
                    badge: "Z → Helsinki".into(),
                    subtitle: "Seuraavat Z-junat Mäntsälästä".into(),
                    count: CARD_DEPARTURES,
                },
            ],
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One station card on the dashboard.
#[derive(Debug, Clone)]
pub struct StationCard {
    /// Unique key used in element ids
    pub dom_key: String,
    /// Station whose departures are shown
    pub station: String,
    /// Only show trains continuing to this station
    pub target: Option<String>,
    pub title: String,
    /// Direction label shown in the corner
    pub badge: String,
    pub subtitle: String,
    /// How many departures to request
    pub count: usize,
}

impl StationCard {
    /// Target code for the data attribute, empty when there is none.
    pub fn target_code(&self) -> &str {
        self.target.as_deref().unwrap_or("")
    }
}
