//! Output formatters for paypalc: the generated Go enum file and the event
//! inventory listing.

pub mod events;
pub mod generator;
pub mod output;
pub mod wrap;

pub use events::{render_events, EventFormat};
pub use generator::{
    Generator, GeneratorOptions, DEFAULT_CATALOG_URL, DEFAULT_PACKAGE, MAX_COLUMN, TAB_WIDTH,
    TYPE_NAME,
};
pub use output::{write_generated, WriteError, GENERATED_FILE_MODE};
pub use wrap::wrap;
