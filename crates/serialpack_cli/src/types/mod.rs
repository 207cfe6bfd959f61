pub mod graph_file;
pub mod output_mode;
