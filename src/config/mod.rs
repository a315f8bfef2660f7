pub mod settings;

pub use settings::{AppConfig, FontConfig, SalahConfig};
