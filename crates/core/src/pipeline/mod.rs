pub mod infrastructure;
pub mod pipeline_executor;
pub mod tilt_shift_image_use_case;
pub mod tilt_shift_sequence_use_case;
