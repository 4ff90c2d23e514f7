pub mod kind;
pub mod metadata;
pub mod model;
pub mod view_model;

pub use kind::{ContentType, MessageKind, PlaybackState};
pub use metadata::Metadata;
pub use model::{FileMetaInfo, Geocode, MessageModel};
pub use view_model::MessageViewModel;
