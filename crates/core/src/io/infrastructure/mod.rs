pub mod image_file_reader;
pub mod image_file_writer;
pub mod image_sequence_reader;
pub mod image_sequence_writer;
pub mod resizing_reader;
