/// UI building blocks
///
/// Pure view functions, one per region of the window:
/// - Upload button and selfie preview (uploader.rs)
/// - Style preset grid (style_grid.rs)
/// - Original/generated result panes (display.rs)

pub mod display;
pub mod style_grid;
pub mod uploader;
