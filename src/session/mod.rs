mod controller;
pub mod hours;
pub mod machine;
mod status;
pub mod timers;

pub use controller::TextingSession;
pub use hours::{CampaignHoursPolicy, HoursPolicy, WindowReading};
pub use status::{SessionStatus, WarningReason};
pub use timers::{TimerFired, TimerPurpose};
