pub mod debug_id;
pub mod default_bundle;
pub mod output_mode;
pub mod plugin_chain;
pub mod static_assets;
