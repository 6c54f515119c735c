//! Shared helpers for unit tests: synthetic images and a loader for them.


pub use image::*;

use crate::metadata::view::CilView;

/// Build `builder` and load the resulting image.
pub fn load(builder: &ImageBuilder) -> CilView {
    CilView::from_mem(builder.build()).unwrap()
}
