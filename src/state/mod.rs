//! State Module - runtime state shared across the component tree.
//!
//! - **Reactive** - `State<T>` cells with ordered, synchronous listeners
//! - **Scheduler** - per-application repaint requests
//! - **Animate** - explicitly ticked periodic tasks and tweens
//! - **Focus** - the focus-context stack and key routing
//! - **Keyboard** - the normalized key vocabulary

mod reactive;
mod scheduler;
mod animate;
mod focus;
pub mod keyboard;

pub use reactive::{state, State, Subscription};
pub use scheduler::RenderScheduler;
pub use animate::{TaskHandle, Timers, Tween};
pub use focus::{FocusContext, FocusManager};
