pub mod bulk;
pub mod classifier;
pub mod config;
pub mod conflicts;
pub mod editor;
pub mod grid;
pub mod log;
pub mod lookup;
pub mod view;

pub use bulk::{BulkOutcome, BulkPlan, BulkTarget, SharedFields, apply_bulk_shift};
pub use classifier::{Classifier, CoverageSlot, ShiftLabel};
pub use conflicts::{ConflictMap, detect_conflicts};
pub use editor::{EditorState, ShiftEditor};
pub use grid::{GridBuilder, GridDescriptor, build_grid};
pub use lookup::ShiftLookup;
pub use view::{LoadStatus, ScheduleSettings, ScheduleView, ViewError};
