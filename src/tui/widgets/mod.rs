pub mod flyer;
pub mod statusbar;
