pub mod assets;
pub mod index;
pub mod surahs;

pub use assets::AudioCatalog;
pub use index::SectionIndex;
