pub mod badges;
pub mod header;
pub mod next_prayer;
pub mod note;
pub mod prayers;
pub mod statusbar;
pub mod streak;
