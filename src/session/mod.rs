mod session_controller;
#[cfg(test)]
mod tests;

pub use session_controller::SessionController;
