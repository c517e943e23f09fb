//! TUI widgets.

mod details;
mod help;
mod movers;
mod notifications;
mod search;
mod status_bar;
mod tab_bar;
mod view_all;
mod watchlists;

pub use details::DetailsView;
pub use help::HelpPanel;
pub use movers::MoversPanel;
pub use notifications::{render_error, render_error_panel, render_notification};
pub use search::{SearchBar, render_input_popup};
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;
pub use view_all::ViewAllList;
pub use watchlists::{WatchlistDetailView, WatchlistPicker, WatchlistsView};
