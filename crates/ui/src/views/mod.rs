mod state;

pub use state::{ViewError, ViewState, careers_view_state};
