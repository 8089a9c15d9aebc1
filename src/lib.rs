//! marginalia: in-page text highlighting engine
//!
//! Lets a host select passages on a page, persist them as highlight
//! records (text + note + color + source url) and re-materialize them on
//! revisit, when the document is a fresh tree with no stable node
//! identity. The host owns layout, drawing and real input; this crate
//! owns the hard parts:
//!
//! - [`anchor`] turns a stored string back into a live range
//!   (exact-substring, first match, single text leaf);
//! - [`overlay`] paints ranges as marker element groups and unwraps
//!   them back to the byte-identical original tree;
//! - [`session`] is the one-pending-annotation state machine wiring
//!   selections, hovers and the floating toolbar to persistence.
//!
//! Persistence is a collaborator behind [`storage::CollectionStore`]; the
//! popup and library UI live elsewhere and only share the record shapes
//! in [`records`].

pub mod anchor;
pub mod config;
pub mod dom;
pub mod error;
pub mod geometry;
pub mod overlay;
pub mod records;
pub mod session;
pub mod storage;

pub use config::OverlayConfig;
pub use error::{HighlightError, Result};
pub use records::{BookmarkRecord, HighlightRecord, PageContext};
pub use session::{InteractionSession, SessionState};
