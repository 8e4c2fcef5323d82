//! Reusable UI Components
//!
//! - `DialogFrame` - Centered popup frame with rounded borders
//! - `InputField` - Text input with focus handling and password masking
//! - `TabSelector` - Horizontal tab row with a selection marker

mod dialog_frame;
mod input_field;
mod tab_selector;

pub use dialog_frame::{render_dialog_frame, total_dialog_height, DialogFrameConfig};
pub use input_field::{render_input_field, InputFieldConfig, INPUT_FIELD_HEIGHT};
pub use tab_selector::{render_tab_selector, TabItem};
