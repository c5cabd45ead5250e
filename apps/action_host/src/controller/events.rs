//! Events flowing from the backend worker to the hosting surface.

use shared::protocol::Toast;

pub enum UiEvent {
    Info(String),
    Toast(Toast),
    /// Rendered sum from the number adder panel.
    SumComputed(String),
    /// The panel asked the host to dismiss the action surface.
    CloseActionScreen,
    Error(String),
}
