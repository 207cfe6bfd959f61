pub mod base64;
pub mod concat_string;
pub mod indexmap;
pub mod path_ext;
pub mod pretty_type_name;
pub mod sanitize_file_name;
pub mod xxhash;
