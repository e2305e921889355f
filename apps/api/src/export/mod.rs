// Export: turns a reviewed analysis into the renderer's input document.

pub mod finalize;
pub mod handlers;
pub mod labels;
pub mod themes;
