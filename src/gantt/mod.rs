//! Gantt timeline interaction: bar geometry, the drag/resize session,
//! subcategory row lookup and the pointer flow that commits gestures to the
//! event store.

pub mod drag;
pub mod geometry;
pub mod interaction;
pub mod layout;

pub use drag::{DragController, DragMode, DragSession};
pub use geometry::{GeometryError, TimelineGeometry};
pub use interaction::{DragCommit, GanttInteraction};
pub use layout::{LayoutMetrics, SubcategoryLayout, SubcategoryRow};
