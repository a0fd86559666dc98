pub mod settings_loader;

pub use settings_loader::SettingsStore;
