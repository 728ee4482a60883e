//! Couche configuration : chemins + I/O JSON du store de settings.
pub mod io;
pub mod path;

pub use io::{load_settings, load_settings_from, save_settings, save_settings_to, SettingsStore};
pub use path::{settings_path, ssh_config_path};
