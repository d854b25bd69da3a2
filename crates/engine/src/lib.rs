mod batch;
mod catalog;
mod cursor;
mod error;
mod mask;
mod ports;
mod selection;
mod session;

pub use batch::{BatchApplier, BatchOutcome, BatchReport};
pub use catalog::{AttrDef, AttrFlags, Catalog, PREVIEW_UNSET, USER_MODIFIABLE};
pub use cursor::FileCursor;
pub use error::{AttrError, SessionError};
pub use mask::{BulkMode, Mask, compile_mask};
pub use ports::{
    AttributeProvider, ErrorChoice, FileListing, FormCommand, FormView, InteractionPort, ListEntry,
    VecListing,
};
pub use selection::{SelectionModel, SelectionState};
pub use session::EditSession;
