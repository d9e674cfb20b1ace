mod console;
mod listing;
mod menu_loop;

pub use console::Console;
pub use listing::write_account_listing;
pub use menu_loop::MenuLoop;
