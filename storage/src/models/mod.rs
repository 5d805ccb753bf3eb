pub mod participant;
pub mod points_catalog;
pub mod refresh_state;
pub mod result_record;
pub mod roster;
pub mod season;
pub mod selection;

pub use participant::{Participant, PointsBreakdown};
pub use points_catalog::{PointsCatalog, ScoringProfile};
pub use refresh_state::RefreshPolicyState;
pub use result_record::ResultRecord;
pub use roster::{Driver, Team};
pub use season::{Event, Season};
pub use selection::SelectionRecord;
