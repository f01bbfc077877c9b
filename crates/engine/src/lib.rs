//! `partsdash-engine` — the dashboard core.
//!
//! Pure data transforms over inventory snapshots: grouping
//! ([`mod@group`]), layout planning ([`layout`]), change detection
//! ([`diff`]), and alert rendering ([`notify`]), orchestrated per poll
//! by [`refresh`]. Rendering consumes only the [`RenderPlan`] and the
//! transition events; it never re-derives grouping itself.

pub mod diff;
pub mod group;
pub mod layout;
pub mod notify;
pub mod refresh;
pub mod settings;

pub use diff::{ChangeDetector, TransitionEvent};
pub use group::{group, BrandGroup, FamilyGroup, GroupedInventory};
pub use layout::{plan, BrandSection, FamilyCard, PlannedPart, RenderPlan};
pub use notify::{dispatch_alerts, AlertLevel, AlertSink, TracingSink, ALERT_DISMISS};
pub use refresh::{
    CycleOutcome, RefreshEngine, RefreshError, SettingsSource, SnapshotSource,
    DEFAULT_POLL_INTERVAL,
};
pub use settings::DisplaySettings;
