pub mod filename_template;
pub mod module_id;
pub mod serial_asset;
pub mod serializer_input;
pub mod serializer_output;
pub mod source;
pub mod source_joiner;
