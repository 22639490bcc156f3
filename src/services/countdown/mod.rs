mod clock;
mod controller;
mod error;
pub mod layout;
mod page;
mod render;
mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{CountdownConfig, CountdownController, TickOutcome, Transition};
pub use error::CountdownError;
pub use layout::{Breakpoint, ResponsiveLayout, RingStroke};
pub use page::CountdownPage;
pub use render::{MemoryRenderTarget, RenderSnapshot, RenderTarget, Slot};
pub use scheduler::{IntervalScheduler, Scheduler, TimerHandle, TimerId};
