pub mod connection;
pub mod headless;

pub use connection::{connect_to_browser, connect_to_browser_and_page, find_active_page};
pub use headless::launch_headless_browser;
