pub mod blocks;
pub mod page;

pub use blocks::*;
pub use page::{Page, PageContainer, PageKind, slugify};
